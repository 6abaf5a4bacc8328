use chrono::Datelike;
use clap::{Args, Parser, Subcommand};
use miette::{IntoDiagnostic, Result};
use rust_decimal::Decimal;
use std::io::{self, Write};
use std::path::PathBuf;
use till::application::register::CashRegister;
use till::config::{DEFAULT_LEDGER_PATH, DEFAULT_SALES_DIR, RegisterConfig, SalesConfig};
use till::domain::credential::{self, Access, DenialReason};
use till::domain::ledger::INITIAL_RECEIPT_NO;
use till::domain::ports::LedgerStoreBox;
use till::infrastructure::file_ledger::FileLedger;
use till::infrastructure::in_memory::InMemoryLedger;
use till::infrastructure::sales_archive::SalesArchive;
use till::interfaces::csv::ledger_writer::LedgerWriter;
use till::interfaces::csv::summary_writer::SummaryWriter;
use till::interfaces::report;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log filter such as `debug` or `till=trace`. Defaults to RUST_LOG, then `warn`.
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Work out the change for a payment and record it in the ledger
    Change {
        /// Amount payable in dollars
        payable: Decimal,
        /// Amount tendered in dollars
        tendered: Decimal,
        #[command(flatten)]
        ledger: LedgerArgs,
        /// Compute the change without writing to the ledger
        #[arg(long)]
        dry_run: bool,
        /// Print the receipt as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print every transaction recorded in the ledger
    History {
        #[command(flatten)]
        ledger: LedgerArgs,
    },
    /// Check a user ID and password
    Login { user_id: String, password: String },
    /// Store monthly sales files and summarise them
    Sales {
        #[command(subcommand)]
        command: SalesCommand,
    },
}

#[derive(Args)]
struct LedgerArgs {
    /// Ledger file transactions are appended to
    #[arg(long = "ledger", env = "TILL_LEDGER", default_value = DEFAULT_LEDGER_PATH)]
    path: PathBuf,
    /// Receipt number issued when the ledger is still empty
    #[arg(long, env = "TILL_START_RECEIPT", default_value_t = INITIAL_RECEIPT_NO)]
    start_receipt: u32,
}

impl From<LedgerArgs> for RegisterConfig {
    fn from(args: LedgerArgs) -> Self {
        Self {
            ledger_path: args.path,
            start_receipt: args.start_receipt,
        }
    }
}

#[derive(Args)]
struct SalesArgs {
    /// Directory holding the monthly sales files
    #[arg(long, env = "TILL_SALES_DIR", default_value = DEFAULT_SALES_DIR)]
    dir: PathBuf,
}

impl From<SalesArgs> for SalesConfig {
    fn from(args: SalesArgs) -> Self {
        Self { dir: args.dir }
    }
}

#[derive(Subcommand)]
enum SalesCommand {
    /// Save a sales CSV as `SalesYYYYMM.csv`, replacing any file for that month
    Import {
        file: PathBuf,
        #[arg(long)]
        year: i32,
        #[arg(long)]
        month: u32,
        #[command(flatten)]
        sales: SalesArgs,
    },
    /// Total the sales of one year per agent and month
    Summary {
        /// Defaults to the current year
        #[arg(long)]
        year: Option<i32>,
        #[command(flatten)]
        sales: SalesArgs,
        /// Print the summary as JSON
        #[arg(long)]
        json: bool,
    },
}

fn init_tracing(log_level: Option<&str>) {
    let filter = match log_level {
        Some(directives) => EnvFilter::new(directives),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_level.as_deref());

    match cli.command {
        Command::Change {
            payable,
            tendered,
            ledger,
            dry_run,
            json,
        } => change(payable, tendered, ledger.into(), dry_run, json).await,
        Command::History { ledger } => history(ledger.into()).await,
        Command::Login { user_id, password } => login(&user_id, &password),
        Command::Sales { command } => match command {
            SalesCommand::Import {
                file,
                year,
                month,
                sales,
            } => sales_import(file, year, month, sales.into()).await,
            SalesCommand::Summary { year, sales, json } => {
                let year = year.unwrap_or_else(|| chrono::Local::now().year());
                sales_summary(year, sales.into(), json).await
            }
        },
    }
}

async fn change(
    payable: Decimal,
    tendered: Decimal,
    config: RegisterConfig,
    dry_run: bool,
    json: bool,
) -> Result<()> {
    let file_ledger = FileLedger::new(&config.ledger_path);
    let register = if dry_run {
        // Number the receipt as the real ledger would, but keep it in memory.
        let next = CashRegister::open(Box::new(file_ledger), config.start_receipt)
            .await
            .into_diagnostic()?
            .next_receipt_no()
            .await;
        let ledger: LedgerStoreBox = Box::new(InMemoryLedger::new());
        CashRegister::new(ledger, next)
    } else {
        CashRegister::open(Box::new(file_ledger), config.start_receipt)
            .await
            .into_diagnostic()?
    };

    let receipt = register
        .process(payable, tendered)
        .await
        .into_diagnostic()?;

    if let Err(warning) = receipt.breakdown.check() {
        eprintln!("WARNING: {}", warning);
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();
    if json {
        let report = report::ReceiptReport {
            receipt: &receipt,
            recorded: !dry_run,
        };
        serde_json::to_writer_pretty(&mut out, &report).into_diagnostic()?;
        writeln!(out).into_diagnostic()?;
    } else {
        report::write_receipt(&mut out, &receipt).into_diagnostic()?;
        if dry_run {
            writeln!(out, "Dry run: transaction not recorded").into_diagnostic()?;
        } else {
            writeln!(
                out,
                "Transaction recorded to {}",
                config.ledger_path.display()
            )
            .into_diagnostic()?;
        }
    }

    Ok(())
}

async fn history(config: RegisterConfig) -> Result<()> {
    let register = CashRegister::open(
        Box::new(FileLedger::new(&config.ledger_path)),
        config.start_receipt,
    )
    .await
    .into_diagnostic()?;
    let records = register.history().await.into_diagnostic()?;

    let stdout = io::stdout();
    let mut writer = LedgerWriter::new(stdout.lock());
    writer.write_header().into_diagnostic()?;
    for record in &records {
        writer.write_record(record).into_diagnostic()?;
    }
    writer.into_inner().into_diagnostic()?;

    Ok(())
}

fn login(user_id: &str, password: &str) -> Result<()> {
    let access = credential::classify(user_id, password, chrono::Local::now().year())
        .into_diagnostic()?;

    if let Access::Denied {
        reason: DenialReason::UnverifiableAge,
    } = access
    {
        eprintln!("We couldn't verify your age from the NRIC. Please re-check your ID.");
    }
    println!("{}", access);

    Ok(())
}

async fn sales_import(file: PathBuf, year: i32, month: u32, config: SalesConfig) -> Result<()> {
    let archive = SalesArchive::new(&config.dir);
    let outcome = archive
        .import(&file, year, month)
        .await
        .into_diagnostic()?;

    println!("File saved as {}", outcome.path.display());
    if outcome.replaced {
        println!("The existing file for {}-{:02} was overwritten.", year, month);
    }

    Ok(())
}

async fn sales_summary(year: i32, config: SalesConfig, json: bool) -> Result<()> {
    let summary = SalesArchive::new(&config.dir)
        .summary(year)
        .await
        .into_diagnostic()?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    if json {
        serde_json::to_writer_pretty(&mut out, &summary).into_diagnostic()?;
        writeln!(out).into_diagnostic()?;
        return Ok(());
    }

    if summary.is_empty() {
        writeln!(out, "No sales files found for {} yet.", year).into_diagnostic()?;
        return Ok(());
    }

    SummaryWriter::new(&mut out)
        .write_summary(&summary)
        .into_diagnostic()?;
    report::write_sales_footer(&mut out, &summary).into_diagnostic()?;

    Ok(())
}
