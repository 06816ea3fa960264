use anyhow::Result;
use clap::{Parser, Subcommand};
use sift_ingest::{ExtractOptions, FormatDetector};
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

mod analyze_cmd;
mod config;
mod export_cmd;
mod input;
mod state;


use export_cmd::ExportFormat;

const VERSION: &str = concat!(env!("CARGO_PKG_VERSION"), " (", env!("SIFT_BUILD_SHA"), ")");

#[derive(Parser, Debug)]
#[command(name = "sift", version = VERSION, about = "Bank statement transaction extraction and analysis")]
struct Cli {
    /// Debug logging (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Extract, summarize and group transactions from statements
    Analyze {
        /// Statement files (.txt rendered text, or .pdf via pdftotext)
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Show category, matching rule and merchant per transaction
        #[arg(long)]
        details: bool,

        /// Merchant groups to list (default: [report] top)
        #[arg(long)]
        top: Option<usize>,

        /// Rank merchants within each category instead of overall
        #[arg(long)]
        by_category: bool,

        /// Year for statements without a period header
        #[arg(long)]
        year: Option<i32>,
    },

    /// Write transactions to CSV or the full analysis to JSON
    Export {
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Output path (default: <stem>_transactions.csv in [export] dir)
        #[arg(long, short)]
        out: Option<PathBuf>,

        #[arg(long, value_enum, default_value_t = ExportFormat::Csv)]
        format: ExportFormat,

        /// Year for statements without a period header
        #[arg(long)]
        year: Option<i32>,
    },

    /// List supported statement formats in detection order
    Formats,

    /// Manage ~/.sift/config.toml
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Write a default config if none exists
    Init,
    /// Print the effective config
    Show,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .init();

    match cli.command {
        Command::Analyze {
            files,
            details,
            top,
            by_category,
            year,
        } => {
            let cfg = config::load_config()?;
            let opts = analyze_cmd::AnalyzeOptions {
                details: details || cfg.report.details,
                top: top.unwrap_or(cfg.report.top),
                by_category,
                extract: ExtractOptions {
                    fallback_year: year.or(cfg.extract.fallback_year),
                },
                pdftotext: cfg.pdf.pdftotext,
            };
            analyze_cmd::run(&files, &opts)?;
        }

        Command::Export {
            files,
            out,
            format,
            year,
        } => {
            let cfg = config::load_config()?;
            let extract = ExtractOptions {
                fallback_year: year.or(cfg.extract.fallback_year),
            };
            export_cmd::run(&files, out, format, &cfg.export.dir, extract, &cfg.pdf.pdftotext)?;
        }

        Command::Formats => {
            let detector = FormatDetector::new()?;
            for (i, format) in detector.formats().enumerate() {
                println!("{}. {:<16} {}", i + 1, format.id(), format.bank_name());
            }
        }

        Command::Config { command } => match command {
            ConfigCommand::Init => config::init_config()?,
            ConfigCommand::Show => config::show_config()?,
        },
    }

    Ok(())
}
