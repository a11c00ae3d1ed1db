//! # Error Hierarchy
//!
//! Structured decode errors built with `thiserror`. Every failure path of the
//! decoder ends in one of these variants; nothing in this crate panics on
//! caller-supplied text.
//!
//! Variants carry the diagnostic context an operator needs to decide whether
//! to re-scan: the actual vs expected length, the offending character and its
//! position, or the field whose check digit disagreed.

use thiserror::Error;

use crate::verify::MrzField;

/// Which of the two line-2 dates a date error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DateField {
    /// Date of birth (line 2, columns 13-18).
    Birth,
    /// Date of expiry (line 2, columns 21-26).
    Expiry,
}

impl std::fmt::Display for DateField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Birth => f.write_str("date of birth"),
            Self::Expiry => f.write_str("date of expiry"),
        }
    }
}

/// Errors produced while decoding or locating a passport MRZ.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MrzError {
    /// Fewer characters than a TD3 MRZ holds after whitespace removal.
    #[error("MRZ length is too short ({actual} chars, expected {expected}).")]
    TooShort {
        /// Length of the cleaned input.
        actual: usize,
        /// Required length (88).
        expected: usize,
    },

    /// More characters than a TD3 MRZ holds. Only raised in strict mode;
    /// lenient decoding reads the first 88 characters.
    #[error("MRZ length is too long ({actual} chars, expected {expected}).")]
    TooLong {
        /// Length of the cleaned input.
        actual: usize,
        /// Required length (88).
        expected: usize,
    },

    /// A character outside `A-Z`, `0-9` and `<`. Only raised in strict mode.
    #[error("invalid MRZ character {found:?} at position {position}")]
    InvalidCharacter {
        /// Zero-based offset into the cleaned 88-character string.
        position: usize,
        /// The rejected character.
        found: char,
    },

    /// The document code is not a passport (`P`). Only raised in strict mode.
    #[error("unsupported document type \"{document_type}\" (expected a passport)")]
    UnsupportedDocument {
        /// Line 1 columns 0-1 as printed.
        document_type: String,
    },

    /// The two-digit year is not numeric, or (strict mode) the date is not a
    /// real calendar date.
    #[error("invalid {field}: \"{raw}\" (expected YYMMDD)")]
    InvalidDate {
        /// Which date failed.
        field: DateField,
        /// The six raw characters from the MRZ.
        raw: String,
    },

    /// A check digit disagrees with its field. Only raised in strict mode.
    #[error("{field} check digit mismatch: computed {}, found {found:?}", digit_or_unknown(.computed))]
    CheckDigitMismatch {
        /// The field whose digit failed.
        field: MrzField,
        /// Digit computed from the field data; `None` when the data holds
        /// characters the ICAO alphabet cannot weigh.
        computed: Option<u8>,
        /// Digit printed in the MRZ.
        found: char,
    },

    /// Recognized text did not contain two lines that look like an MRZ.
    #[error("Could not find MRZ lines. Please ensure the bottom of the passport is clearly visible.")]
    MrzLinesNotFound,
}

impl MrzError {
    /// Stable machine-readable code, used as the `error` value of a failed
    /// [`ScanResponse`](crate::ScanResponse).
    pub fn code(&self) -> &'static str {
        match self {
            Self::TooShort { .. } => "too_short",
            Self::TooLong { .. } => "too_long",
            Self::InvalidCharacter { .. } => "invalid_character",
            Self::UnsupportedDocument { .. } => "unsupported_document",
            Self::InvalidDate { .. } => "invalid_date",
            Self::CheckDigitMismatch { .. } => "check_digit_mismatch",
            Self::MrzLinesNotFound => "mrz_lines_not_found",
        }
    }
}

fn digit_or_unknown(digit: &Option<u8>) -> String {
    match digit {
        Some(d) => d.to_string(),
        None => "none".to_string(),
    }
}
