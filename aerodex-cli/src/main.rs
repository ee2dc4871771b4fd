//! # AeroDex CLI
//!
//! Run with: `cargo run --bin aerodex -- --data data.txt list --order hash`

mod render;
mod shell;

use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use tracing::{debug, info};

use aerodex_core::config::{LogFormat, LoggingConfig};
use aerodex_core::{Code, Config};
use aerodex_storage::Catalog;

use crate::shell::Shell;

#[derive(Parser)]
#[command(name = "aerodex")]
#[command(about = "AeroDex - airport records indexed by code tree and chained hash table")]
#[command(version)]
struct Cli {
    /// JSON configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Record file to load, overriding the configured one
    #[arg(long, global = true)]
    data: Option<PathBuf>,

    /// Raise log verbosity (repeatable)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive menu (default)
    Shell,
    /// Print every record
    List {
        #[arg(long, value_enum, default_value_t = Order::Key)]
        order: Order,
    },
    /// Look up one airport code
    Find { code: String },
    /// Hash table efficiency and operation counters
    Stats,
    /// Print the code tree on its side
    Tree,
    /// Write records in hash order to FILE
    Export { file: PathBuf },
}

#[derive(Clone, Copy, ValueEnum)]
enum Order {
    Key,
    Hash,
}

fn init_logging(config: &LoggingConfig, verbose: u8) {
    let level = config.level.raised(verbose).as_tracing();
    let builder = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr);
    match config.format {
        LogFormat::Text => builder.init(),
        LogFormat::Json => builder.json().init(),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::from_file(path)
            .with_context(|| format!("loading configuration from {}", path.display()))?,
        None => Config::default(),
    };
    if let Some(data) = cli.data {
        config.storage.data_file = data;
    }
    init_logging(&config.logging, cli.verbose);
    debug!("Configuration: {:?}", config);

    let mut catalog = Catalog::open(&config.storage.data_file, &config)
        .with_context(|| format!("loading records from {}", config.storage.data_file.display()))?;

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());

    match cli.command.unwrap_or(Commands::Shell) {
        Commands::Shell => {
            let stdin = io::stdin();
            Shell::new(&mut catalog, stdin.lock(), &mut out)
                .with_output(config.storage.output_file.clone(), config.storage.save_on_exit)
                .run()?;
        }
        Commands::List { order } => match order {
            Order::Key => render::key_order(&mut out, &catalog)?,
            Order::Hash => render::hash_order(&mut out, &catalog)?,
        },
        Commands::Find { code } => {
            let code = Code::new(&code)?;
            match catalog.find(&code) {
                Some(record) => writeln!(out, "{}", record)?,
                None => writeln!(out, "No airport exists")?,
            }
        }
        Commands::Stats => {
            render::report(&mut out, &catalog.load_report())?;
            writeln!(out, "Tree height is {}.", catalog.ordered().height())?;
            writeln!(out)?;
            render::metrics(&mut out, &catalog.metrics())?;
        }
        Commands::Tree => render::tree(&mut out, &catalog)?,
        Commands::Export { file } => {
            let written = catalog.save(&file)?;
            writeln!(out, "Wrote {} records to {}", written, file.display())?;
        }
    }
    out.flush()?;

    let released = catalog.teardown()?;
    info!("Shutdown complete, released {} records", released);
    Ok(())
}
