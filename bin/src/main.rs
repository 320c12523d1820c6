//! barvault CLI - market data path resolution and SQL loading.

use anyhow::Result;
use barvault_lib::prelude::*;
use clap::{CommandFactory, Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;
mod display;

use display::TableArg;

#[derive(Parser)]
#[command(name = "barvault")]
#[command(about = "Market data path resolution and SQL loading", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Quiet mode (warnings and errors only)
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the storage path of a series
    Path {
        /// Instrument symbol (e.g., ESZ21, TSLA)
        #[arg(short, long)]
        symbol: String,

        /// Sampling frequency (minutely, daily)
        #[arg(short, long)]
        frequency: Frequency,

        /// Asset class (futures, stocks)
        #[arg(short, long)]
        asset_class: AssetClass,

        /// Contract type (expiry, continuous)
        #[arg(long, default_value = "expiry")]
        contract_type: ContractType,

        /// Exchange code (e.g., GLOBEX)
        #[arg(short, long)]
        exchange: String,

        /// Quote currency
        #[arg(short, long, default_value = "USD")]
        currency: String,

        /// File extension (csv, pq)
        #[arg(long, default_value = "csv")]
        ext: Extension,

        /// Bucket name. Defaults to $AM_S3_BUCKET.
        #[arg(long)]
        bucket: Option<String>,
    },

    /// Print the newest symbols metadata file
    LatestSymbols {
        /// Bucket name. Defaults to $AM_S3_BUCKET.
        #[arg(long)]
        bucket: Option<String>,

        /// List a local mirror of the bucket instead of S3
        #[arg(long)]
        local_root: Option<PathBuf>,
    },

    /// Create the database tables
    InitDb {
        /// Database file. Defaults to $BARVAULT_DB_PATH.
        #[arg(long)]
        db: Option<PathBuf>,
    },

    /// Ensure symbol, exchange and trade symbol rows exist and print their ids
    Ensure {
        /// Database file. Defaults to $BARVAULT_DB_PATH.
        #[arg(long)]
        db: Option<PathBuf>,

        /// Instrument symbol
        #[arg(short, long)]
        symbol: String,

        /// Asset class
        #[arg(short, long)]
        asset_class: AssetClass,

        /// Exchange name
        #[arg(short, long)]
        exchange: String,
    },

    /// Load a CSV file (optionally gzipped) of bars or ticks into the database
    Load {
        /// Database file. Defaults to $BARVAULT_DB_PATH.
        #[arg(long)]
        db: Option<PathBuf>,

        /// Destination table
        #[arg(short, long, value_enum)]
        table: TableArg,

        /// Instrument symbol
        #[arg(short, long)]
        symbol: String,

        /// Asset class
        #[arg(short, long)]
        asset_class: AssetClass,

        /// Exchange name
        #[arg(short, long)]
        exchange: String,

        /// Input file (.csv or .csv.gz)
        file: PathBuf,
    },
}

fn init_tracing(verbose: u8, quiet: bool) {
    let default = match (quiet, verbose) {
        (true, _) => "warn",
        (false, 0) => "info",
        (false, 1) => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)))
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    // Show help if no command provided
    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(());
    };

    match command {
        Commands::Path {
            symbol,
            frequency,
            asset_class,
            contract_type,
            exchange,
            currency,
            ext,
            bucket,
        } => {
            let spec = SymbolSpec::new(
                symbol,
                asset_class,
                contract_type,
                exchange,
                currency,
                frequency,
                ext,
            )?;
            commands::path::print_path(&spec, bucket.as_deref())
        }
        Commands::LatestSymbols { bucket, local_root } => {
            commands::latest::print_latest(bucket.as_deref(), local_root.as_deref())
        }
        Commands::InitDb { db } => commands::db::init_db(db.as_deref()),
        Commands::Ensure {
            db,
            symbol,
            asset_class,
            exchange,
        } => commands::db::ensure(db.as_deref(), &symbol, asset_class, &exchange),
        Commands::Load {
            db,
            table,
            symbol,
            asset_class,
            exchange,
            file,
        } => commands::load::load(db.as_deref(), table, &symbol, asset_class, &exchange, &file),
    }
}
