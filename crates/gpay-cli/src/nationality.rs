//! # Nationality Subcommand
//!
//! Resolves each argument (an MRZ country code or a nationality name) to its
//! code and nationality string, one tab-separated line per query:
//!
//! ```text
//! $ gpay nationality png "papua new guinean" XYZ
//! png     PNG     Papua New Guinean
//! papua new guinean       PNG     Papua New Guinean
//! XYZ     -       XYZ
//! ```
//!
//! `--same` instead checks that every query names the same nationality.

use anyhow::Result;
use clap::Args;

use gpay_core::{nationalities_match, normalize_nationality, normalize_to_code};

/// Arguments for the `gpay nationality` subcommand.
#[derive(Args, Debug)]
pub struct NationalityArgs {
    /// Country codes or nationality names.
    #[arg(required = true)]
    pub queries: Vec<String>,

    /// Exit 0 only if all queries name the same nationality.
    #[arg(long)]
    pub same: bool,
}

/// Execute the nationality subcommand.
pub fn run_nationality(args: &NationalityArgs) -> Result<u8> {
    let (code, lines) = nationality_report(args);
    for line in lines {
        println!("{line}");
    }
    Ok(code)
}

/// Exit code and output lines for `args`. Unknown queries, and an empty
/// query list, exit 1.
pub fn nationality_report(args: &NationalityArgs) -> (u8, Vec<String>) {
    let Some((first, rest)) = args.queries.split_first() else {
        return (1, vec!["no nationality given".to_string()]);
    };

    if args.same {
        let same = rest.iter().all(|other| nationalities_match(first, other));
        let verdict = if same { "same nationality" } else { "different nationalities" };
        return (u8::from(!same), vec![verdict.to_string()]);
    }

    let mut all_known = true;
    let lines = args
        .queries
        .iter()
        .map(|query| {
            let code = normalize_to_code(query);
            all_known &= code.is_some();
            format!(
                "{query}\t{}\t{}",
                code.unwrap_or("-"),
                normalize_nationality(query)
            )
        })
        .collect();
    (u8::from(!all_known), lines)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(queries: &[&str], same: bool) -> NationalityArgs {
        NationalityArgs {
            queries: queries.iter().map(|q| q.to_string()).collect(),
            same,
        }
    }

    #[test]
    fn resolves_codes_and_names() {
        let (code, lines) = nationality_report(&args(&["png", "Papua New Guinean"], false));
        assert_eq!(code, 0);
        assert_eq!(lines[0], "png\tPNG\tPapua New Guinean");
        assert_eq!(lines[1], "Papua New Guinean\tPNG\tPapua New Guinean");
    }

    #[test]
    fn unknown_query_exits_one() {
        let (code, lines) = nationality_report(&args(&["AUS", "XYZ"], false));
        assert_eq!(code, 1);
        assert_eq!(lines[1], "XYZ\t-\tXYZ");
    }

    #[test]
    fn empty_query_list_exits_one() {
        assert_eq!(nationality_report(&args(&[], true)).0, 1);
        let (code, lines) = nationality_report(&args(&[], false));
        assert_eq!(code, 1);
        assert_eq!(lines, vec!["no nationality given".to_string()]);
    }

    #[test]
    fn same_nationality_check() {
        assert_eq!(nationality_report(&args(&["AUS", "australian"], true)).0, 0);
        assert_eq!(nationality_report(&args(&["AUS", "NZL"], true)).0, 1);
    }
}
