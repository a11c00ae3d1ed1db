//! # gpay-cli — Operator CLI for the Voucher Portal
//!
//! Provides the `gpay` command-line interface used at registration desks and
//! in support tooling.
//!
//! ## Subcommands
//!
//! - `gpay mrz` — Decode, verify, or format-check a passport MRZ.
//! - `gpay check-digit` — Compute or validate an ICAO 9303 check digit.
//! - `gpay nationality` — Resolve country codes and nationality names.
//! - `gpay scanner` — Inspect and validate scanner configuration, replay
//!   recorded keystroke logs.
//!
//! ```bash
//! gpay mrz parse --verify "P<PNGDOE<<JOHN<<<...<<08"
//! tesseract page.png - | gpay mrz parse --ocr --stdin
//! gpay scanner replay desk-3.log --profile prehkeytec
//! ```
//!
//! Every handler returns a process exit code: 0 on success, 1 when the input
//! was rejected. Operational failures surface as `anyhow` errors.

pub mod check_digit;
pub mod mrz;
pub mod nationality;
pub mod scanner;

use std::io::Read;

use anyhow::{Context, Result};

/// Take input from the positional argument, or from stdin when the argument
/// is absent or `--stdin` is set.
pub fn read_input(arg: Option<&str>, stdin: bool) -> Result<String> {
    match arg {
        Some(text) if !stdin => Ok(text.to_string()),
        _ => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read input from stdin")?;
            Ok(buf)
        }
    }
}

/// Render JSON for stdout.
pub fn to_json<T: serde::Serialize>(value: &T, pretty: bool) -> Result<String> {
    let rendered = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    };
    rendered.context("failed to serialize output")
}
