//! # MRZ Subcommand
//!
//! - `parse` — Decode an MRZ and print the JSON response the portal returns
//!   to its forms. `--ocr` first locates the MRZ lines in recognized page
//!   text; `--verify` attaches the check-digit report.
//! - `check` — Format check only.
//!
//! Exit code is 0 when the MRZ was accepted and 1 when it was rejected
//! (including a failed check digit under `--verify`).

use anyhow::Result;
use clap::{Args, Subcommand};
use serde_json::{json, Value};

use gpay_core::{
    extract_mrz_from_ocr, is_mrz_format, normalize_ocr_text, verify_check_digits, MrzParser,
    ParseMode, ScanResponse,
};

use crate::{read_input, to_json};

/// Arguments for the `gpay mrz` subcommand.
#[derive(Args, Debug)]
pub struct MrzArgs {
    #[command(subcommand)]
    pub command: MrzCommand,
}

/// MRZ subcommands.
#[derive(Subcommand, Debug)]
pub enum MrzCommand {
    /// Decode an MRZ into a passport record.
    Parse(ParseArgs),

    /// Check that text is a well-formed TD3 passport MRZ.
    Check {
        /// MRZ text. Read from stdin when omitted.
        mrz: Option<String>,
        /// Read the MRZ from stdin.
        #[arg(long)]
        stdin: bool,
    },
}

/// Arguments for `gpay mrz parse`.
#[derive(Args, Debug, Default, Clone)]
pub struct ParseArgs {
    /// MRZ text; spaces and line breaks are ignored. Read from stdin when
    /// omitted.
    pub mrz: Option<String>,

    /// Read the MRZ from stdin.
    #[arg(long)]
    pub stdin: bool,

    /// Reject over-length input, bad characters, invalid dates, and check
    /// digit failures.
    #[arg(long)]
    pub strict: bool,

    /// Attach the check-digit report and fail if any digit is wrong.
    #[arg(long)]
    pub verify: bool,

    /// Treat input as OCR page text and locate the MRZ lines first.
    #[arg(long)]
    pub ocr: bool,

    /// Pretty-print the JSON output.
    #[arg(long)]
    pub pretty: bool,

    /// Window birth years on this year instead of today's.
    #[arg(long, value_name = "YEAR")]
    pub reference_year: Option<i32>,
}

/// Execute the mrz subcommand.
pub fn run_mrz(args: &MrzArgs) -> Result<u8> {
    match &args.command {
        MrzCommand::Parse(parse) => {
            let text = read_input(parse.mrz.as_deref(), parse.stdin)?;
            let (code, output) = parse_report(&text, parse)?;
            println!("{}", to_json(&output, parse.pretty)?);
            Ok(code)
        }
        MrzCommand::Check { mrz, stdin } => {
            let text = read_input(mrz.as_deref(), *stdin)?;
            Ok(check_report(&text))
        }
    }
}

/// Decode `text` per `args`, returning the exit code and JSON output.
pub fn parse_report(text: &str, args: &ParseArgs) -> Result<(u8, Value)> {
    let mrz = if args.ocr {
        match extract_mrz_from_ocr(&normalize_ocr_text(text)) {
            Ok(mrz) => mrz,
            Err(err) => return Ok((1, serde_json::to_value(ScanResponse::failure(&err))?)),
        }
    } else {
        text.to_string()
    };

    let mode = if args.strict {
        ParseMode::Strict
    } else {
        ParseMode::Lenient
    };
    let mut parser = MrzParser::new().with_mode(mode);
    if let Some(year) = args.reference_year {
        parser = parser.with_reference_year(year);
    }

    let result = parser.parse(&mrz);
    let verification = match (&result, args.verify) {
        (Ok(record), true) => Some(verify_check_digits(record)),
        _ => None,
    };

    let mut code = if result.is_ok() { 0 } else { 1 };
    let mut output = serde_json::to_value(ScanResponse::from(result))?;

    if let Some(report) = verification {
        if !report.all_valid() {
            code = 1;
        }
        if let Value::Object(map) = &mut output {
            map.insert(
                "verification".to_string(),
                json!({ "trust": report.trust(), "checks": report.checks }),
            );
        }
    }

    Ok((code, output))
}

/// Print the format verdict and return the exit code.
pub fn check_report(text: &str) -> u8 {
    if is_mrz_format(text) {
        println!("valid TD3 passport MRZ");
        0
    } else {
        println!("not a TD3 passport MRZ");
        1
    }
}
