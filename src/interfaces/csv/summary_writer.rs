use crate::domain::sales::{MONTHS, SalesSummary};
use crate::error::Result;
use rust_decimal::Decimal;
use std::io::Write;

/// Writes a yearly sales summary as a CSV table.
///
/// One row per agent with the twelve monthly totals and a `TOTAL` column, all with
/// two decimal places.
pub struct SummaryWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> SummaryWriter<W> {
    pub fn new(sink: W) -> Self {
        let writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(sink);
        Self { writer }
    }

    pub fn write_summary(&mut self, summary: &SalesSummary) -> Result<()> {
        let mut header = vec!["Agent".to_string()];
        header.extend((1..=MONTHS).map(|m| format!("{:02}", m)));
        header.push("TOTAL".to_string());
        self.writer.write_record(&header)?;

        for agent in &summary.agents {
            let mut row = vec![agent.agent.clone()];
            row.extend(agent.months.iter().map(|amount| two_places(*amount)));
            row.push(two_places(agent.total));
            self.writer.write_record(&row)?;
        }

        self.writer.flush()?;
        Ok(())
    }
}

fn two_places(amount: Decimal) -> String {
    format!("{:.2}", amount.round_dp(2))
}
