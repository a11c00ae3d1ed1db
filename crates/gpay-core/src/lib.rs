//! # gpay-core — Passport MRZ Decoding
//!
//! Identity primitives for the GreenPay voucher portal. Operators register
//! voucher holders by scanning the Machine Readable Zone of their passport,
//! either through a keyboard-wedge scanner or camera OCR. This crate turns
//! that text into a structured [`MrzRecord`].
//!
//! ## Contents
//!
//! - [`check_digit`]: ICAO 9303 weighted modulo-10 checksum.
//! - [`country`]: static code → nationality table and the reverse normalizer.
//! - [`mrz`]: TD3 format check and decoder ([`parse_mrz`], [`MrzParser`]).
//! - [`verify`]: opt-in check-digit report over a decoded record.
//! - [`input`]: scanner and OCR text cleanup.
//! - [`response`]: the serializable success/failure envelope.
//!
//! ## Crate Policy
//!
//! - Pure functions over owned values. No I/O, no global mutable state; the
//!   country table is a read-only static built on first use.
//! - No `panic!()` or `.unwrap()` outside tests. Every string input is
//!   accepted and answered with a value or an [`MrzError`].
//! - Passport data is personal data. Log events carry
//!   [`MrzRecord::fingerprint`] only.

pub mod check_digit;
pub mod country;
pub mod dates;
pub mod error;
pub mod input;
pub mod mrz;
pub mod response;
pub mod verify;

pub use check_digit::{compute_check_digit, validate_check_digit};
pub use country::{
    code_for_nationality, lookup_nationality, nationalities_match, nationality_for_code,
    normalize_nationality, normalize_to_code,
};
pub use error::{DateField, MrzError};
pub use input::{clean_scanner_input, extract_mrz_from_ocr, normalize_ocr_text};
pub use mrz::{
    is_mrz_format, parse_mrz, CheckDigits, MrzParser, MrzRecord, ParseMode, Sex, LINE_LENGTH,
    MRZ_LENGTH,
};
pub use response::ScanResponse;
pub use verify::{verify_check_digits, FieldCheck, MrzField, TrustLevel, VerificationReport};
