//! viewstats CLI
//!
//! Command-line tools for recording page views and managing the saved
//! snapshot of undelivered views.
//!
//! # Commands
//!
//! - `record` - Record page views and deliver or save them
//! - `flush` - Deliver the saved snapshot
//! - `inspect` - Show what the saved snapshot holds
//! - `discard` - Delete the saved snapshot

mod commands;

use clap::{Args, Parser, Subcommand};
use commands::CollectorArgs;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// viewstats page-view tracking tools.
#[derive(Parser)]
#[command(name = "viewstats")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Cache directory holding the saved snapshot
    #[arg(global = true, short, long)]
    cache_dir: Option<PathBuf>,

    /// Enable verbose output
    #[arg(global = true, short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct Collector {
    /// Collector URL
    #[arg(short, long)]
    endpoint: String,

    /// Bearer token sent with every request
    #[arg(short, long)]
    token: Option<String>,

    /// Connect timeout in seconds
    #[arg(long, default_value = "15")]
    connect_timeout: u64,

    /// Read timeout in seconds
    #[arg(long, default_value = "15")]
    read_timeout: u64,
}

impl From<Collector> for CollectorArgs {
    fn from(c: Collector) -> Self {
        Self {
            endpoint: c.endpoint,
            token: c.token,
            connect_timeout: c.connect_timeout,
            read_timeout: c.read_timeout,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Record page views
    Record {
        /// Subject ids (UUIDs) to record, in order
        #[arg(required = true)]
        subjects: Vec<String>,

        /// Deliver the buffer before exiting instead of saving it
        #[arg(short, long)]
        flush: bool,

        #[command(flatten)]
        collector: Collector,
    },

    /// Deliver the saved snapshot
    Flush {
        #[command(flatten)]
        collector: Collector,
    },

    /// Show what the saved snapshot holds
    Inspect {
        /// List every saved view
        #[arg(long)]
        views: bool,

        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Delete the saved snapshot
    Discard,

    /// Show version information
    Version,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match cli.command {
        Commands::Record {
            subjects,
            flush,
            collector,
        } => {
            let dir = cli.cache_dir.ok_or("Cache directory required for record")?;
            commands::record::run(&dir, &collector.into(), &subjects, flush, cli.verbose)?;
        }
        Commands::Flush { collector } => {
            let dir = cli.cache_dir.ok_or("Cache directory required for flush")?;
            commands::flush::run(&dir, &collector.into(), cli.verbose)?;
        }
        Commands::Inspect { views, format } => {
            let dir = cli.cache_dir.ok_or("Cache directory required for inspect")?;
            commands::inspect::run(&dir, views, &format)?;
        }
        Commands::Discard => {
            let dir = cli.cache_dir.ok_or("Cache directory required for discard")?;
            commands::discard::run(&dir)?;
        }
        Commands::Version => {
            println!("viewstats CLI v{}", env!("CARGO_PKG_VERSION"));
            println!("viewstats Core v{}", viewstats_core::VERSION);
        }
    }

    Ok(())
}
