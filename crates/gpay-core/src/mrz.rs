//! # TD3 Passport MRZ Decoder
//!
//! Decodes the two-line, 44-column Machine Readable Zone printed on passport
//! data pages (ICAO Doc 9303 Part 4) into an [`MrzRecord`].
//!
//! ```text
//! line 1: P<UTOERIKSSON<<ANNA<MARIA<<<<<<<<<<<<<<<<<<<
//!         ^^ document type, ^^^ issuing state, then SURNAME<<GIVEN<NAMES
//! line 2: L898902C36UTO7408122F1204159ZE184226B<<<<<10
//!         number+cd, nationality, birth+cd, sex, expiry+cd, personal+cd, composite
//! ```
//!
//! ## Lenient vs strict
//!
//! The default [`ParseMode::Lenient`] decoder is forgiving by design of the
//! scanning flows that feed it: it reads the first 88 characters of longer
//! input, copies month/day through without calendar validation, and ignores
//! check digits. [`ParseMode::Strict`] rejects all three, plus characters
//! outside the MRZ alphabet and non-passport document codes.
//!
//! Both modes are pure: no I/O and no shared mutable state. A parser value
//! can be shared freely across threads.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::country::nationality_for_code;
use crate::dates::{calendar_date, current_year, decode_date, YearWindow};
use crate::error::{DateField, MrzError};
use crate::input::strip_whitespace;
use crate::verify::verify_raw;

/// Characters in a TD3 MRZ (two lines of 44).
pub const MRZ_LENGTH: usize = 88;

/// Characters per TD3 line.
pub const LINE_LENGTH: usize = 44;

/// Message attached to every successful decode.
pub const SUCCESS_MESSAGE: &str = "Passport MRZ parsed successfully.";

/// Holder's sex as printed in line 2, column 20.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sex {
    /// `M`.
    Male,
    /// `F`.
    Female,
    /// `<` or anything else.
    Other,
}

impl Sex {
    /// Map the raw MRZ character.
    pub fn from_mrz(c: char) -> Self {
        match c {
            'M' => Self::Male,
            'F' => Self::Female,
            _ => Self::Other,
        }
    }

    /// Display string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Male => "Male",
            Self::Female => "Female",
            Self::Other => "Other",
        }
    }
}

impl std::fmt::Display for Sex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The five raw check digits of line 2, as printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckDigits {
    /// Column 9.
    pub passport_number: char,
    /// Column 19.
    pub dob: char,
    /// Column 27.
    pub expiry: char,
    /// Column 42.
    pub personal_number: char,
    /// Column 43, over the whole line.
    pub composite: char,
}

/// A decoded passport MRZ.
///
/// Produced fresh by every decode and owned by the caller. `raw` always holds
/// exactly 88 characters for records returned by [`MrzParser::parse`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MrzRecord {
    /// Line 1 columns 0-1, verbatim (normally `P<`).
    pub document_type: String,
    /// Line 1 columns 2-4, verbatim.
    pub issuing_country: String,
    /// Line 2 columns 0-8 with fillers removed.
    pub passport_number: String,
    /// Primary identifier.
    pub surname: String,
    /// Secondary identifiers joined by single spaces.
    pub given_name: String,
    /// Display nationality resolved from `nationality_code`.
    pub nationality: String,
    /// Line 2 columns 10-12, verbatim.
    pub nationality_code: String,
    /// Date of birth as `YYYY-MM-DD`.
    pub dob: String,
    /// Holder's sex.
    pub sex: Sex,
    /// Date of expiry as `YYYY-MM-DD`.
    pub date_of_expiry: String,
    /// Line 2 columns 28-41 with fillers removed; empty when unused.
    pub personal_number: String,
    /// Raw check digits.
    pub check_digits: CheckDigits,
    /// The cleaned 88-character input.
    pub raw: String,
}

impl MrzRecord {
    /// Given names followed by surname, as shown on forms.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.given_name, self.surname)
            .trim()
            .to_string()
    }

    /// Ordered label/value pairs for confirmation screens and receipts.
    pub fn display_fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Passport Number", self.passport_number.clone()),
            (
                "Full Name",
                format!("{} {}", self.given_name, self.surname),
            ),
            ("Nationality", self.nationality.clone()),
            ("Date of Birth", self.dob.clone()),
            ("Sex", self.sex.to_string()),
            ("Expiry Date", self.date_of_expiry.clone()),
            ("Issuing Country", self.issuing_country.clone()),
        ]
    }

    /// Date of birth as a calendar date, if it is one.
    pub fn birth_date(&self) -> Option<NaiveDate> {
        calendar_date(&self.dob)
    }

    /// Date of expiry as a calendar date, if it is one.
    pub fn expiry_date(&self) -> Option<NaiveDate> {
        calendar_date(&self.date_of_expiry)
    }

    /// Whether the passport has expired by `date`. A passport is still valid
    /// on its expiry day. `None` when the expiry is not a calendar date.
    pub fn is_expired_on(&self, date: NaiveDate) -> Option<bool> {
        self.expiry_date().map(|expiry| expiry < date)
    }

    /// SHA-256 of `raw`, lowercase hex. Identifies a scan in logs without
    /// exposing passport data.
    pub fn fingerprint(&self) -> String {
        let digest = Sha256::digest(self.raw.as_bytes());
        digest.iter().map(|b| format!("{b:02x}")).collect()
    }
}

/// Quick format check for a candidate MRZ string.
///
/// After removing all whitespace the input must be exactly 88 characters,
/// start with `P<`, and contain only `A-Z`, `0-9` and `<`. Never panics.
pub fn is_mrz_format(input: &str) -> bool {
    let cleaned = strip_whitespace(input);
    cleaned.chars().count() == MRZ_LENGTH
        && cleaned.starts_with("P<")
        && cleaned.chars().all(is_mrz_char)
}

fn is_mrz_char(c: char) -> bool {
    c.is_ascii_uppercase() || c.is_ascii_digit() || c == '<'
}

/// Decoder strictness.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParseMode {
    /// Length floor only; everything else passes through.
    #[default]
    Lenient,
    /// Exact length, MRZ alphabet, passport document code, calendar-valid
    /// dates and matching check digits.
    Strict,
}

/// Configurable MRZ decoder.
///
/// ```
/// use gpay_core::{MrzParser, Sex};
///
/// let mrz = "P<UTOERIKSSON<<ANNA<MARIA<<<<<<<<<<<<<<<<<<<\
///            L898902C36UTO7408122F1204159ZE184226B<<<<<10";
/// let record = MrzParser::strict().with_reference_year(2026).parse(mrz).unwrap();
/// assert_eq!(record.surname, "ERIKSSON");
/// assert_eq!(record.given_name, "ANNA MARIA");
/// assert_eq!(record.dob, "1974-08-12");
/// assert_eq!(record.sex, Sex::Female);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MrzParser {
    mode: ParseMode,
    reference_year: Option<i32>,
}

impl MrzParser {
    /// Lenient parser windowing birth years on the current year.
    pub fn new() -> Self {
        Self::default()
    }

    /// Strict parser windowing birth years on the current year.
    pub fn strict() -> Self {
        Self::default().with_mode(ParseMode::Strict)
    }

    /// Set the strictness.
    pub fn with_mode(mut self, mode: ParseMode) -> Self {
        self.mode = mode;
        self
    }

    /// Window birth years on a fixed year instead of the clock.
    pub fn with_reference_year(mut self, year: i32) -> Self {
        self.reference_year = Some(year);
        self
    }

    /// The configured strictness.
    pub fn mode(&self) -> ParseMode {
        self.mode
    }

    /// Decode an MRZ string. Whitespace anywhere in the input is ignored.
    ///
    /// # Errors
    ///
    /// Always [`MrzError::TooShort`] for fewer than 88 characters and
    /// [`MrzError::InvalidDate`] for a non-numeric year. Strict mode adds
    /// [`MrzError::TooLong`], [`MrzError::InvalidCharacter`],
    /// [`MrzError::UnsupportedDocument`], calendar-invalid
    /// [`MrzError::InvalidDate`], and [`MrzError::CheckDigitMismatch`].
    pub fn parse(&self, input: &str) -> Result<MrzRecord, MrzError> {
        let mut chars: Vec<char> = strip_whitespace(input).chars().collect();

        if chars.len() < MRZ_LENGTH {
            return Err(MrzError::TooShort {
                actual: chars.len(),
                expected: MRZ_LENGTH,
            });
        }
        if self.mode == ParseMode::Strict {
            check_strict_shape(&chars)?;
        }
        chars.truncate(MRZ_LENGTH);

        let (line1, line2) = chars.split_at(LINE_LENGTH);
        let span = |line: &[char], from: usize, to: usize| line[from..to].iter().collect::<String>();

        let names = span(line1, 5, LINE_LENGTH);
        let (surname, given_name) = split_names(&names);

        let nationality_code = span(line2, 10, 13);
        let reference_year = self.reference_year.unwrap_or_else(current_year);
        let dob = decode_date(&span(line2, 13, 19), YearWindow::birth_in(reference_year))?;
        let date_of_expiry = decode_date(&span(line2, 21, 27), YearWindow::Expiry)?;

        let record = MrzRecord {
            document_type: span(line1, 0, 2),
            issuing_country: span(line1, 2, 5),
            passport_number: strip_fillers(&span(line2, 0, 9)),
            surname,
            given_name,
            nationality: nationality_for_code(nationality_code.as_str()),
            nationality_code,
            dob,
            sex: Sex::from_mrz(line2[20]),
            date_of_expiry,
            personal_number: strip_fillers(&span(line2, 28, 42)),
            check_digits: CheckDigits {
                passport_number: line2[9],
                dob: line2[19],
                expiry: line2[27],
                personal_number: line2[42],
                composite: line2[43],
            },
            raw: chars.iter().collect(),
        };

        if self.mode == ParseMode::Strict {
            check_strict_content(&record)?;
        }

        tracing::debug!(
            fingerprint = %record.fingerprint(),
            mode = ?self.mode,
            "decoded passport MRZ"
        );
        Ok(record)
    }
}

/// Decode an MRZ string with the default lenient parser.
///
/// Equivalent to `MrzParser::new().parse(input)`.
pub fn parse_mrz(input: &str) -> Result<MrzRecord, MrzError> {
    MrzParser::new().parse(input)
}

fn check_strict_shape(chars: &[char]) -> Result<(), MrzError> {
    if chars.len() > MRZ_LENGTH {
        return Err(MrzError::TooLong {
            actual: chars.len(),
            expected: MRZ_LENGTH,
        });
    }
    if let Some((position, &found)) = chars.iter().enumerate().find(|(_, c)| !is_mrz_char(**c)) {
        return Err(MrzError::InvalidCharacter { position, found });
    }
    if chars[0] != 'P' {
        return Err(MrzError::UnsupportedDocument {
            document_type: chars[..2].iter().collect(),
        });
    }
    Ok(())
}

fn check_strict_content(record: &MrzRecord) -> Result<(), MrzError> {
    let line2 = &record.raw[LINE_LENGTH..];
    if record.birth_date().is_none() {
        return Err(MrzError::InvalidDate {
            field: DateField::Birth,
            raw: line2[13..19].to_string(),
        });
    }
    if record.expiry_date().is_none() {
        return Err(MrzError::InvalidDate {
            field: DateField::Expiry,
            raw: line2[21..27].to_string(),
        });
    }
    let report = verify_raw(&record.raw);
    let first_failure = report.failures().next().cloned();
    match first_failure {
        Some(failure) => Err(MrzError::CheckDigitMismatch {
            field: failure.field,
            computed: failure.computed,
            found: failure.found,
        }),
        None => Ok(()),
    }
}

/// Split the line-1 name area into surname and given names.
///
/// `<<` separates name components; single `<` fillers become spaces.
/// Empty components (the trailing filler run) are dropped.
fn split_names(section: &str) -> (String, String) {
    let mut components = section.split("<<");
    let surname = components.next().map(fillers_to_spaces).unwrap_or_default();
    let given: Vec<String> = components
        .map(fillers_to_spaces)
        .filter(|name| !name.is_empty())
        .collect();
    (surname, given.join(" "))
}

fn fillers_to_spaces(component: &str) -> String {
    component.replace('<', " ").trim().to_string()
}

fn strip_fillers(field: &str) -> String {
    field.replace('<', "").trim().to_string()
}
