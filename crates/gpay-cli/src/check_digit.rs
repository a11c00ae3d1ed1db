//! # Check-Digit Subcommand
//!
//! `gpay check-digit <DATA>` prints the ICAO 9303 check digit for a field.
//! With a second argument it validates that digit instead.

use anyhow::{bail, Result};
use clap::Args;

use gpay_core::{compute_check_digit, validate_check_digit};

/// Arguments for the `gpay check-digit` subcommand.
#[derive(Args, Debug)]
pub struct CheckDigitArgs {
    /// Field data, e.g. a passport number or a YYMMDD date.
    pub data: String,

    /// Printed digit to validate against the data.
    pub digit: Option<String>,
}

/// Execute the check-digit subcommand.
pub fn run_check_digit(args: &CheckDigitArgs) -> Result<u8> {
    let (code, line) = check_digit_report(args)?;
    println!("{line}");
    Ok(code)
}

/// Exit code and output line for `args`.
pub fn check_digit_report(args: &CheckDigitArgs) -> Result<(u8, String)> {
    let computed = compute_check_digit(&args.data);
    match (&args.digit, computed) {
        (None, Some(digit)) => Ok((0, digit.to_string())),
        (None, None) => bail!(
            "{:?} contains characters outside A-Z, 0-9 and '<'",
            args.data
        ),
        (Some(found), _) if validate_check_digit(&args.data, found) => {
            Ok((0, format!("ok: {found}")))
        }
        (Some(found), Some(digit)) => Ok((1, format!("mismatch: computed {digit}, found {found}"))),
        (Some(found), None) => Ok((
            1,
            format!("mismatch: data is not weighable, found {found}"),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(data: &str, digit: Option<&str>) -> CheckDigitArgs {
        CheckDigitArgs {
            data: data.to_string(),
            digit: digit.map(str::to_string),
        }
    }

    #[test]
    fn computes_digit() {
        let (code, line) = check_digit_report(&args("AB1234567", None)).unwrap();
        assert_eq!(code, 0);
        assert_eq!(line, "1");
    }

    #[test]
    fn validates_digit() {
        assert_eq!(check_digit_report(&args("AB1234567", Some("1"))).unwrap().0, 0);
        let (code, line) = check_digit_report(&args("AB1234567", Some("7"))).unwrap();
        assert_eq!(code, 1);
        assert_eq!(line, "mismatch: computed 1, found 7");
    }

    #[test]
    fn unweighable_data() {
        assert!(check_digit_report(&args("ab123", None)).is_err());
        assert_eq!(check_digit_report(&args("ab123", Some("5"))).unwrap().0, 1);
    }
}
