use std::{
    error::Error,
    fs::OpenOptions,
    path::{Path, PathBuf},
    sync::Arc,
};

use clap::{Parser, Subcommand};
use time::Date;
use tracing_subscriber::{EnvFilter, Layer, filter, layer::SubscriberExt, util::SubscriberInitExt};

use spendbook::{
    CurrencyFormat, Record, RecordId, RecordStore, parse_date, report, today, totals_by_category,
    trend_series,
};

/// Record your expenses in a CSV ledger and summarise them for charts.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to the ledger CSV file. An empty ledger is created if the file does not exist.
    #[arg(long, env = "SPENDBOOK_LEDGER", default_value = "pengeluaran.csv")]
    ledger_path: PathBuf,

    /// The local timezone as a canonical timezone name, e.g. "Asia/Jakarta".
    #[arg(long, env = "SPENDBOOK_TIMEZONE", default_value = "Etc/UTC")]
    timezone: String,

    /// The symbol printed in front of amounts.
    #[arg(long, default_value = "Rp")]
    currency_symbol: String,

    /// File path to write debug logs to.
    #[arg(long, default_value = "spendbook.log")]
    log_file: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Record a new expense.
    Add {
        /// What the money was spent on, e.g. "Food".
        #[arg(long, default_value = "")]
        category: String,

        /// How much was spent.
        #[arg(long)]
        amount: f64,

        /// When the money was spent as YYYY-MM-DD. Defaults to today.
        #[arg(long, value_parser = parse_date)]
        date: Option<Date>,

        /// A note about the expense.
        #[arg(long, default_value = "")]
        note: String,
    },

    /// Show every expense.
    List,

    /// Delete the expense with the given ID.
    Delete {
        /// The ID shown by `list`.
        id: RecordId,
    },

    /// Show the total spent per category.
    Totals {
        /// Print chart data as JSON instead of a table.
        #[arg(long)]
        json: bool,
    },

    /// Show each expense in date order.
    Trend {
        /// Print chart data as JSON instead of a table.
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    setup_logging(&args.log_file)?;

    let currency = CurrencyFormat::new(&args.currency_symbol)?;
    let mut store = RecordStore::open(&args.ledger_path)?;

    match args.command {
        Command::Add {
            category,
            amount,
            date,
            note,
        } => {
            let date = match date {
                Some(date) => date,
                None => today(&args.timezone)?,
            };

            let record = store.add(Record::build(date, &category, amount).note(&note))?;
            println!("Added expense #{}.\n", record.id);
            print!("{}", report::records_table(store.list(), &currency));
        }
        Command::List => {
            print!("{}", report::records_table(store.list(), &currency));
        }
        Command::Delete { id } => {
            if store.delete(id)? {
                println!("Deleted expense #{id}.\n");
            } else {
                println!("There is no expense #{id}, nothing was deleted.\n");
            }

            print!("{}", report::records_table(store.list(), &currency));
        }
        Command::Totals { json } => {
            let totals = totals_by_category(store.list());

            if json {
                println!("{}", report::totals_chart_json(&totals)?);
            } else {
                print!("{}", report::totals_table(&totals, &currency));
            }
        }
        Command::Trend { json } => {
            let points = trend_series(store.list())?;

            if json {
                println!("{}", report::trend_chart_json(&points)?);
            } else {
                print!("{}", report::trend_table(&points, &currency));
            }
        }
    }

    Ok(())
}

fn setup_logging(log_path: &Path) -> Result<(), Box<dyn Error>> {
    let console_log = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")));

    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_path)?;

    let debug_log = tracing_subscriber::fmt::layer()
        .with_ansi(false)
        .with_writer(Arc::new(log_file))
        .with_filter(filter::LevelFilter::DEBUG);

    tracing_subscriber::registry()
        .with(console_log)
        .with(debug_log)
        .init();

    Ok(())
}
