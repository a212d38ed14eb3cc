//! LedgerKV CLI
//!
//! Local command-line interface: get/set/del against a data directory,
//! plus log verification and stats.

use std::process;

use clap::{Parser, Subcommand};
use ledgerkv::{Engine, RecoveryManager};
use tracing_subscriber::{fmt, EnvFilter};

/// LedgerKV CLI
#[derive(Parser, Debug)]
#[command(name = "ledgerkv")]
#[command(about = "Durable key-value store backed by a write-ahead log")]
#[command(version)]
struct Args {
    /// Data directory
    #[arg(short, long, default_value = "./ledgerkv_data")]
    data_dir: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Get a value by key
    Get {
        /// The key to get
        key: String,
    },

    /// Set a key-value pair
    Set {
        /// The key to set
        key: String,

        /// The value to set
        value: String,
    },

    /// Delete a key
    Del {
        /// The key to delete
        key: String,
    },

    /// Check log integrity without modifying it
    Verify,

    /// Show store and log statistics
    Stats,
}

fn main() {
    // Initialize tracing/logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,ledgerkv=info"));

    fmt().with_env_filter(filter).with_target(false).init();

    let args = Args::parse();

    if let Err(e) = run(args) {
        tracing::error!("{}", e);
        process::exit(1);
    }
}

fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    // Verify inspects the log in place; it must not go through Engine::open,
    // which truncates the crash tail as part of recovery.
    if let Commands::Verify = args.command {
        let wal_path = std::path::Path::new(&args.data_dir).join(Engine::WAL_FILENAME);
        let report = RecoveryManager::verify(&wal_path)?;
        println!("records:        {}", report.records_applied);
        println!("discarded:      {}", report.records_discarded);
        println!(
            "last sequence:  {}",
            report
                .last_sequence
                .map_or_else(|| "(empty)".to_string(), |s| s.to_string())
        );
        println!("crash tail:     {}", if report.was_truncated { "yes" } else { "no" });
        return Ok(());
    }

    let engine = Engine::open_path(std::path::Path::new(&args.data_dir))?;

    match args.command {
        Commands::Get { key } => match engine.get(key.as_bytes()) {
            Some(value) => println!("{}", String::from_utf8_lossy(&value)),
            None => println!("(nil)"),
        },
        Commands::Set { key, value } => {
            engine.put(key.as_bytes(), value.as_bytes())?;
            println!("OK");
        }
        Commands::Del { key } => {
            engine.delete(key.as_bytes())?;
            println!("OK");
        }
        Commands::Stats => {
            let report = engine.recovery_report();
            println!("keys:           {}", engine.len());
            println!("next sequence:  {}", engine.next_sequence());
            println!("recovered:      {}", report.records_applied);
            println!("crash tail:     {}", if report.was_truncated { "yes" } else { "no" });
        }
        Commands::Verify => unreachable!("handled above"),
    }

    engine.close()?;
    Ok(())
}
