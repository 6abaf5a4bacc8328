use crate::application::register::Receipt;
use crate::domain::change::BreakdownLine;
use crate::domain::sales::SalesSummary;
use serde::Serialize;
use std::io::{self, Write};

/// JSON shape of a processed payment.
///
/// `recorded` is false for a dry run, where the receipt number was only previewed.
#[derive(Debug, Serialize)]
pub struct ReceiptReport<'a> {
    #[serde(flatten)]
    pub receipt: &'a Receipt,
    pub recorded: bool,
}

/// Writes the human-readable outcome of a processed payment.
pub fn write_receipt<W: Write>(mut out: W, receipt: &Receipt) -> io::Result<()> {
    let record = &receipt.record;
    writeln!(out, "Receipt No: {}", record.receipt_no)?;
    writeln!(out, "Change to be returned: ${}", record.change)?;

    if !receipt.has_change() {
        if record.payable == record.tendered {
            writeln!(out, "Exact amount received.")?;
        }
        writeln!(out, "No change to dispense.")?;
        return Ok(());
    }

    write_section(&mut out, "Notes dispensed", receipt.breakdown.notes())?;
    write_section(&mut out, "Coins dispensed", receipt.breakdown.coins())?;
    Ok(())
}

fn write_section<'a, W: Write>(
    out: &mut W,
    title: &str,
    lines: impl Iterator<Item = &'a BreakdownLine>,
) -> io::Result<()> {
    let mut lines = lines.peekable();
    if lines.peek().is_none() {
        return Ok(());
    }

    writeln!(out, "{}:", title)?;
    for line in lines {
        writeln!(out, "  {} × {}", line.count, line.denomination)?;
    }
    Ok(())
}

/// Writes the totals printed under a sales summary table.
pub fn write_sales_footer<W: Write>(mut out: W, summary: &SalesSummary) -> io::Result<()> {
    writeln!(
        out,
        "Grand Total (all agents, all months): {:.2}",
        summary.grand_total.round_dp(2)
    )?;
    writeln!(
        out,
        "Files processed: {} | Skipped files: {} | Skipped rows: {}",
        summary.files_processed, summary.files_skipped, summary.rows_skipped
    )
}
