//! # Scanner Subcommand
//!
//! - `profiles` — List the known scanner hardware profiles.
//! - `show` — Print the resolved configuration as YAML.
//! - `validate` — Check a configuration file.
//! - `replay` — Run a recorded keystroke log through the wedge capture and
//!   print one JSON line per completed scan.
//!
//! Configuration is resolved from `--config FILE`, else `--env`
//! (`GPAY_SCANNER_*` variables), else `--profile NAME`, else `generic`.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Subcommand};

use gpay_core::MrzParser;
use gpay_scanner::{
    load_config_file, load_keystroke_log, replay, ScannerConfig, ScannerError, ScannerProfile,
    WedgeCapture,
};

use crate::to_json;

/// Arguments for the `gpay scanner` subcommand.
#[derive(Args, Debug)]
pub struct ScannerArgs {
    #[command(subcommand)]
    pub command: ScannerCommand,
}

/// Where to take scanner settings from.
#[derive(Args, Debug, Default, Clone)]
pub struct ConfigSource {
    /// Hardware profile name.
    #[arg(long)]
    pub profile: Option<String>,

    /// YAML configuration file.
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Read GPAY_SCANNER_* environment variables.
    #[arg(long)]
    pub env: bool,
}

/// Scanner subcommands.
#[derive(Subcommand, Debug)]
pub enum ScannerCommand {
    /// List scanner hardware profiles.
    Profiles,

    /// Print the resolved scanner configuration.
    Show(ConfigSource),

    /// Validate a scanner configuration file.
    Validate {
        /// YAML configuration file.
        #[arg(long, value_name = "FILE")]
        config: PathBuf,
    },

    /// Replay a keystroke log (`<ms> <key>` per line).
    Replay {
        /// Keystroke log file.
        log: PathBuf,

        #[command(flatten)]
        source: ConfigSource,

        /// Decode bursts with the strict MRZ parser.
        #[arg(long)]
        strict: bool,
    },
}

/// Execute the scanner subcommand.
pub fn run_scanner(args: &ScannerArgs) -> Result<u8> {
    match &args.command {
        ScannerCommand::Profiles => {
            for line in profile_lines() {
                println!("{line}");
            }
            Ok(0)
        }
        ScannerCommand::Show(source) => {
            let config = resolve_config(source)?;
            let yaml = serde_yaml::to_string(&config).context("failed to render configuration")?;
            print!("{yaml}");
            Ok(0)
        }
        ScannerCommand::Validate { config } => {
            let (code, lines) = validate_report(config)?;
            for line in lines {
                println!("{line}");
            }
            Ok(code)
        }
        ScannerCommand::Replay {
            log,
            source,
            strict,
        } => {
            for line in replay_lines(log, source, *strict)? {
                println!("{line}");
            }
            Ok(0)
        }
    }
}

/// One line per profile: name, timeout, description.
pub fn profile_lines() -> Vec<String> {
    ScannerProfile::ALL
        .iter()
        .map(|p| {
            format!(
                "{:<13}{:>5}ms  {} ({})",
                p.name(),
                p.config().scan_timeout_ms,
                p.display_name(),
                p.description()
            )
        })
        .collect()
}

/// Resolve settings from the first source given.
pub fn resolve_config(source: &ConfigSource) -> Result<ScannerConfig> {
    if let Some(path) = &source.config {
        return load_config_file(path)
            .with_context(|| format!("failed to load scanner config {}", path.display()));
    }
    if source.env {
        return ScannerConfig::from_env().context("failed to read scanner config from environment");
    }
    match &source.profile {
        Some(name) => Ok(name.parse::<ScannerProfile>()?.config()),
        None => Ok(ScannerProfile::Generic.config()),
    }
}

/// Exit code and report lines for a configuration file. Range violations
/// exit 1; unreadable files are errors.
pub fn validate_report(path: &std::path::Path) -> Result<(u8, Vec<String>)> {
    match load_config_file(path) {
        Ok(_) => Ok((0, vec![format!("{}: valid", path.display())])),
        Err(ScannerError::InvalidConfig { errors }) => {
            let mut lines = vec![format!("{}: invalid", path.display())];
            lines.extend(errors.into_iter().map(|e| format!("  - {e}")));
            Ok((1, lines))
        }
        Err(ScannerError::UnknownProfile { name, known }) => Ok((
            1,
            vec![format!(
                "{}: unknown profile {name:?} (expected one of: {known})",
                path.display()
            )],
        )),
        Err(e) => Err(e).with_context(|| format!("failed to load {}", path.display())),
    }
}

/// JSON lines for every scan completed while replaying `log`.
pub fn replay_lines(log: &std::path::Path, source: &ConfigSource, strict: bool) -> Result<Vec<String>> {
    let config = resolve_config(source)?;
    let strokes = load_keystroke_log(log)
        .with_context(|| format!("failed to read keystroke log {}", log.display()))?;

    let mut capture = WedgeCapture::new(config);
    if strict {
        capture = capture.with_parser(MrzParser::strict());
    }

    let captures = replay(&mut capture, &strokes);
    tracing::info!(
        keystrokes = strokes.len(),
        scans = captures.len(),
        "replayed keystroke log"
    );
    captures.iter().map(|c| to_json(c, false)).collect()
}
