use std::path::Path;
use std::process::Command;

use assert_cmd::cargo_bin;

pub const LEDGER_HEADER: &str = "Receipt No, Amount Payable, Amount Tendered, Change";

/// The binary with a ledger at `ledger` and no inherited configuration.
pub fn change_cmd(ledger: &Path, payable: &str, tendered: &str) -> Command {
    let mut cmd = Command::new(cargo_bin!("till"));
    cmd.env_remove("TILL_LEDGER")
        .env_remove("TILL_START_RECEIPT")
        .arg("change")
        .arg(payable)
        .arg(tendered)
        .arg("--ledger")
        .arg(ledger);
    cmd
}

pub fn write_sales_file(path: &Path, rows: &[[&str; 3]]) -> Result<(), csv::Error> {
    let mut wtr = csv::Writer::from_path(path)?;
    wtr.write_record(["Date", "Agent", "Amount"])?;
    for row in rows {
        wtr.write_record(row)?;
    }
    wtr.flush()?;
    Ok(())
}
