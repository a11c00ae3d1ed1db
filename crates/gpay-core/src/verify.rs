//! # Check-Digit Verification
//!
//! Opt-in integrity check over a decoded record. The decoder never runs this
//! on its own in lenient mode: noisy OCR input still decodes, and callers
//! choose what a failed digit means for them (warn the operator, flag the
//! registration for manual review, or reject the scan).
//!
//! TD3 line 2 carries five check digits:
//!
//! | Field | Data columns | Digit column |
//! |-------|--------------|--------------|
//! | passport number | 0-8 | 9 |
//! | date of birth | 13-18 | 19 |
//! | date of expiry | 21-26 | 27 |
//! | personal number | 28-41 | 42 |
//! | composite | 0-9, 13-19, 21-42 | 43 |

use serde::{Deserialize, Serialize};

use crate::check_digit::{compute_check_digit, validate_check_digit};
use crate::mrz::{MrzRecord, LINE_LENGTH};

/// A line-2 field protected by a check digit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MrzField {
    /// Document number.
    PassportNumber,
    /// Date of birth.
    DateOfBirth,
    /// Date of expiry.
    DateOfExpiry,
    /// Personal number / optional data.
    PersonalNumber,
    /// Composite digit over the whole of line 2.
    Composite,
}

impl MrzField {
    /// All checked fields, in line order.
    pub fn all() -> &'static [MrzField] {
        &[
            Self::PassportNumber,
            Self::DateOfBirth,
            Self::DateOfExpiry,
            Self::PersonalNumber,
            Self::Composite,
        ]
    }

    fn data(self, line2: &[char]) -> String {
        let span = |from: usize, to: usize| line2[from..to].iter().collect::<String>();
        match self {
            Self::PassportNumber => span(0, 9),
            Self::DateOfBirth => span(13, 19),
            Self::DateOfExpiry => span(21, 27),
            Self::PersonalNumber => span(28, 42),
            Self::Composite => [span(0, 10), span(13, 20), span(21, 43)].concat(),
        }
    }

    fn digit_column(self) -> usize {
        match self {
            Self::PassportNumber => 9,
            Self::DateOfBirth => 19,
            Self::DateOfExpiry => 27,
            Self::PersonalNumber => 42,
            Self::Composite => 43,
        }
    }
}

impl std::fmt::Display for MrzField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::PassportNumber => "passport number",
            Self::DateOfBirth => "date of birth",
            Self::DateOfExpiry => "date of expiry",
            Self::PersonalNumber => "personal number",
            Self::Composite => "composite",
        };
        f.write_str(name)
    }
}

/// Outcome of one field's check digit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldCheck {
    /// The field checked.
    pub field: MrzField,
    /// Digit computed from the field data, if the data was weighable.
    pub computed: Option<u8>,
    /// Digit printed in the MRZ.
    pub found: char,
    /// Whether the printed digit is acceptable.
    pub valid: bool,
}

/// How far a decoded record can be trusted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrustLevel {
    /// Every check digit matched.
    Verified,
    /// At least one check digit failed; the data may carry OCR errors.
    Suspect,
}

/// Per-field results of [`verify_check_digits`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationReport {
    /// One entry per [`MrzField`], in line order.
    pub checks: Vec<FieldCheck>,
}

impl VerificationReport {
    /// True when every field passed.
    pub fn all_valid(&self) -> bool {
        self.checks.iter().all(|c| c.valid)
    }

    /// The fields that failed.
    pub fn failures(&self) -> impl Iterator<Item = &FieldCheck> {
        self.checks.iter().filter(|c| !c.valid)
    }

    /// Result for a single field.
    pub fn check(&self, field: MrzField) -> Option<&FieldCheck> {
        self.checks.iter().find(|c| c.field == field)
    }

    /// Summarize the report as a trust level.
    pub fn trust(&self) -> TrustLevel {
        if self.all_valid() {
            TrustLevel::Verified
        } else {
            TrustLevel::Suspect
        }
    }
}

/// Run every line-2 check digit of a decoded record.
pub fn verify_check_digits(record: &MrzRecord) -> VerificationReport {
    let report = verify_raw(&record.raw);
    for failure in report.failures() {
        tracing::warn!(
            fingerprint = %record.fingerprint(),
            field = %failure.field,
            "MRZ check digit mismatch"
        );
    }
    report
}

/// Run every line-2 check digit over a cleaned 88-character MRZ.
///
/// Missing columns (input shorter than 88) count as failures.
pub(crate) fn verify_raw(raw: &str) -> VerificationReport {
    let mut line2: Vec<char> = raw.chars().skip(LINE_LENGTH).take(LINE_LENGTH).collect();
    line2.resize(LINE_LENGTH, ' ');

    let checks = MrzField::all()
        .iter()
        .map(|&field| {
            let data = field.data(&line2);
            let found = line2[field.digit_column()];
            // An unused personal number may carry a filler as its digit.
            let unused_personal_number = field == MrzField::PersonalNumber
                && found == '<'
                && data.chars().all(|c| c == '<');
            FieldCheck {
                field,
                computed: compute_check_digit(&data),
                found,
                valid: unused_personal_number
                    || validate_check_digit(&data, found.encode_utf8(&mut [0; 4])),
            }
        })
        .collect();

    VerificationReport { checks }
}
