//! # ICAO 9303 Check Digits
//!
//! Weighted modulo-10 checksum used on every TD3 data field. Weights cycle
//! `7, 3, 1` by position; characters are valued `<` = 0, `0-9` = face value,
//! `A-Z` = 10-35.
//!
//! Anything outside that alphabet (lowercase, punctuation, whitespace) makes
//! the checksum uncomputable. Validation then fails closed and returns
//! `false` instead of raising.

const WEIGHTS: [u32; 3] = [7, 3, 1];

/// Numeric value of one MRZ character, or `None` outside the ICAO alphabet.
pub fn char_value(c: char) -> Option<u32> {
    match c {
        '<' => Some(0),
        '0'..='9' => Some(c as u32 - '0' as u32),
        'A'..='Z' => Some(c as u32 - 'A' as u32 + 10),
        _ => None,
    }
}

/// Compute the check digit for `data`.
///
/// Returns `None` if any character is outside the ICAO alphabet.
pub fn compute_check_digit(data: &str) -> Option<u8> {
    let mut sum: u32 = 0;
    for (i, c) in data.chars().enumerate() {
        sum += char_value(c)? * WEIGHTS[i % 3];
    }
    Some((sum % 10) as u8)
}

/// Validate `check_digit` against the checksum of `data`.
///
/// The comparison is textual: the computed digit rendered as a string must
/// equal `check_digit` exactly; surrounding whitespace or a `<` never match.
pub fn validate_check_digit(data: &str, check_digit: &str) -> bool {
    match compute_check_digit(data) {
        Some(digit) => digit.to_string() == check_digit,
        None => false,
    }
}
