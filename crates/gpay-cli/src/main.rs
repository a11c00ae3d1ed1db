//! # gpay CLI entry point
//!
//! Parses command-line arguments and dispatches to subcommand handlers.
//! Logs go to stderr so that JSON on stdout stays machine-readable.

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use gpay_cli::check_digit::{run_check_digit, CheckDigitArgs};
use gpay_cli::mrz::{run_mrz, MrzArgs};
use gpay_cli::nationality::{run_nationality, NationalityArgs};
use gpay_cli::scanner::{run_scanner, ScannerArgs};

/// GreenPay portal tooling: passport MRZ decoding and scanner support.
#[derive(Parser, Debug)]
#[command(name = "gpay", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Emit log lines as JSON.
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Decode, verify, or format-check a passport MRZ.
    Mrz(MrzArgs),

    /// Compute or validate an ICAO 9303 check digit.
    CheckDigit(CheckDigitArgs),

    /// Resolve country codes and nationality names.
    Nationality(NationalityArgs),

    /// Scanner profiles, configuration files, and keystroke replay.
    Scanner(ScannerArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // RUST_LOG wins over -v.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    });

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr);
    if cli.log_json {
        subscriber.json().init();
    } else {
        subscriber.init();
    }

    tracing::debug!(version = env!("CARGO_PKG_VERSION"), "gpay CLI starting");

    let result = match cli.command {
        Commands::Mrz(args) => run_mrz(&args),
        Commands::CheckDigit(args) => run_check_digit(&args),
        Commands::Nationality(args) => run_nationality(&args),
        Commands::Scanner(args) => run_scanner(&args),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            eprintln!("error: {e:#}");
            ExitCode::from(2)
        }
    }
}
