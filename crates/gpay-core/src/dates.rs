//! # MRZ Dates
//!
//! TD3 dates are six characters, `YYMMDD`, with no century. The century is
//! recovered with a windowing rule that differs per field:
//!
//! - **Birth**: a year strictly greater than the current two-digit year is
//!   in the 1900s, otherwise the 2000s. Nobody is born in the future.
//! - **Expiry**: a year strictly greater than 50 is in the 1900s, otherwise
//!   the 2000s.
//!
//! Month and day are copied through verbatim; lenient decoding does not check
//! that they form a real calendar date. [`calendar_date`] performs that
//! check for callers that need one.

use chrono::{Datelike, NaiveDate, Utc};

use crate::error::{DateField, MrzError};

/// Expiry years above this value are read as 19xx.
pub const EXPIRY_PIVOT: u32 = 50;

/// Century-recovery rule for a two-digit year.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum YearWindow {
    /// Date-of-birth window, anchored on the current two-digit year.
    Birth {
        /// Current calendar year modulo 100.
        current_two_digit: u32,
    },
    /// Fixed expiry window pivoting at [`EXPIRY_PIVOT`].
    Expiry,
}

impl YearWindow {
    /// Birth window anchored on the given full calendar year.
    pub fn birth_in(reference_year: i32) -> Self {
        Self::Birth {
            current_two_digit: reference_year.rem_euclid(100) as u32,
        }
    }

    /// Expand a two-digit year (0-99) to a full year.
    pub fn expand(self, two_digit: u32) -> u32 {
        let pivot = match self {
            Self::Birth { current_two_digit } => current_two_digit,
            Self::Expiry => EXPIRY_PIVOT,
        };
        if two_digit > pivot {
            1900 + two_digit
        } else {
            2000 + two_digit
        }
    }

    fn field(self) -> DateField {
        match self {
            Self::Birth { .. } => DateField::Birth,
            Self::Expiry => DateField::Expiry,
        }
    }
}

/// The current calendar year in UTC.
pub fn current_year() -> i32 {
    Utc::now().year()
}

/// Decode a raw `YYMMDD` field into `YYYY-MM-DD`.
///
/// The year digits must be numeric. Month and day are passed through as
/// printed, even when they are not digits.
///
/// # Errors
///
/// Returns [`MrzError::InvalidDate`] when `raw` is not six characters or
/// its first two are not ASCII digits.
pub fn decode_date(raw: &str, window: YearWindow) -> Result<String, MrzError> {
    let invalid = || MrzError::InvalidDate {
        field: window.field(),
        raw: raw.to_string(),
    };

    let chars: Vec<char> = raw.chars().collect();
    if chars.len() != 6 {
        return Err(invalid());
    }
    let (Some(tens), Some(units)) = (chars[0].to_digit(10), chars[1].to_digit(10)) else {
        return Err(invalid());
    };

    let year = window.expand(tens * 10 + units);
    let month: String = chars[2..4].iter().collect();
    let day: String = chars[4..6].iter().collect();
    Ok(format!("{year}-{month}-{day}"))
}

/// Parse a decoded `YYYY-MM-DD` string as a real calendar date.
///
/// Returns `None` for pass-through values such as `2025-13-40`.
pub fn calendar_date(iso: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(iso, "%Y-%m-%d").ok()
}
