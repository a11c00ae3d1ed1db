//! End-to-end decoder properties: the behaviour every caller of
//! `gpay_core::parse_mrz` relies on.

use gpay_core::dates::current_year;
use gpay_core::{
    is_mrz_format, nationality_for_code, parse_mrz, validate_check_digit, MrzError, MrzParser,
    ScanResponse, Sex,
};
use proptest::prelude::*;

const LINE1: &str = "P<PNGDOE<<JOHN<<<<<<<<<<<<<<<<<<<<<<<<<<<<<<";
const LINE2: &str = "AB12345671PNG9001011M2512314<<<<<<<<<<<<<<08";

fn sample() -> String {
    format!("{LINE1}{LINE2}")
}

/// Line 2 with the raw `YYMMDD` date of birth replaced.
fn with_dob(raw: &str) -> String {
    format!("{LINE1}{}{raw}{}", &LINE2[..13], &LINE2[19..])
}

/// Line 2 with the raw `YYMMDD` expiry replaced.
fn with_expiry(raw: &str) -> String {
    format!("{LINE1}{}{raw}{}", &LINE2[..21], &LINE2[27..])
}

// =========================================================================
// Known-good sample
// =========================================================================

#[test]
fn known_good_sample_decodes() {
    let mrz = sample();
    assert_eq!(mrz.len(), 88);
    assert!(is_mrz_format(&mrz));

    let record = parse_mrz(&mrz).unwrap();
    assert_eq!(record.passport_number, "AB1234567");
    assert_eq!(record.surname, "DOE");
    assert_eq!(record.given_name, "JOHN");
    assert_eq!(record.nationality_code, "PNG");
    assert_eq!(record.nationality, "Papua New Guinean");
    assert_eq!(record.dob, "1990-01-01");
    assert_eq!(record.sex, Sex::Male);
    assert_eq!(record.date_of_expiry, "2025-12-31");

    let response = ScanResponse::from(parse_mrz(&mrz));
    assert!(response.success);
}

#[test]
fn misaligned_85_char_sample_is_rejected() {
    // Commonly circulated sample with the passport-number check digit and
    // two fillers missing.
    let short = "P<PNGDOE<<JOHN<<<<<<<<<<<<<<<<<<<<<<<<<<<AB1234567PNG9001011M2512319<<<<<<<<<<<<<<<06";
    assert_eq!(short.len(), 85);
    assert!(!is_mrz_format(short));
    let response = ScanResponse::from(parse_mrz(short));
    assert!(!response.success);
    assert!(response.message.contains("85"));
}

// =========================================================================
// Rejection
// =========================================================================

#[test]
fn every_short_length_is_rejected_with_its_length() {
    let mrz = sample();
    for len in 0..88 {
        let err = parse_mrz(&mrz[..len]).unwrap_err();
        assert_eq!(
            err,
            MrzError::TooShort {
                actual: len,
                expected: 88
            }
        );
        assert!(err.to_string().contains(&format!("({len} chars")));
    }
}

#[test]
fn whitespace_does_not_count_towards_length() {
    let padded = format!("{}          ", &sample()[..80]);
    assert!(matches!(
        parse_mrz(&padded),
        Err(MrzError::TooShort { actual: 80, .. })
    ));
}

#[test]
fn format_rejections() {
    let mrz = sample();
    assert!(!is_mrz_format(&mrz.replacen("P<", "V<", 1)));
    assert!(!is_mrz_format(&mrz.replacen("JOHN", "John", 1)));
}

// =========================================================================
// Nationality fallback
// =========================================================================

#[test]
fn unmapped_codes_pass_through() {
    assert_eq!(nationality_for_code("ZZZ"), "ZZZ");
    assert_eq!(nationality_for_code("zzz"), "ZZZ");
    assert_eq!(nationality_for_code(None), "");
}

#[test]
fn unmapped_nationality_in_mrz_passes_through() {
    let mrz = sample().replacen("PNG9001011", "ZZZ9001011", 1);
    let record = parse_mrz(&mrz).unwrap();
    assert_eq!(record.nationality_code, "ZZZ");
    assert_eq!(record.nationality, "ZZZ");
}

// =========================================================================
// Year windowing
// =========================================================================

#[test]
fn dob_window_flips_strictly_above_current_year() {
    let y2 = current_year().rem_euclid(100);
    let next = (y2 + 1) % 100;
    let prev = (y2 + 99) % 100;

    let record = parse_mrz(&with_dob(&format!("{next:02}0101"))).unwrap();
    assert_eq!(record.dob, format!("19{next:02}-01-01"));

    let record = parse_mrz(&with_dob(&format!("{prev:02}0101"))).unwrap();
    assert_eq!(record.dob, format!("20{prev:02}-01-01"));

    let record = parse_mrz(&with_dob(&format!("{y2:02}0101"))).unwrap();
    assert_eq!(record.dob, format!("20{y2:02}-01-01"));
}

#[test]
fn dob_window_with_fixed_reference_year() {
    let parser = MrzParser::new().with_reference_year(2026);
    assert_eq!(parser.parse(&with_dob("270101")).unwrap().dob, "1927-01-01");
    assert_eq!(parser.parse(&with_dob("250101")).unwrap().dob, "2025-01-01");
}

#[test]
fn expiry_window_pivots_at_fifty() {
    assert_eq!(
        parse_mrz(&with_expiry("510101")).unwrap().date_of_expiry,
        "1951-01-01"
    );
    assert_eq!(
        parse_mrz(&with_expiry("500101")).unwrap().date_of_expiry,
        "2050-01-01"
    );
}

// =========================================================================
// Check digits
// =========================================================================

#[test]
fn check_digit_detects_every_single_substitution() {
    let data = "AB1234567";
    assert!(validate_check_digit(data, "1"));
    let alphabet: Vec<char> = ('0'..='9').chain('A'..='Z').chain(['<']).collect();

    let mut detected = 0;
    let mut total = 0;
    for i in 0..data.len() {
        for &c in &alphabet {
            if data.as_bytes()[i] as char == c {
                continue;
            }
            let mut flipped = data.to_string();
            flipped.replace_range(i..=i, &c.to_string());
            total += 1;
            if !validate_check_digit(&flipped, "1") {
                detected += 1;
            }
        }
    }
    // Modulo 10 cannot catch every substitution, but it catches most.
    assert!(detected * 10 >= total * 8, "{detected}/{total}");
}

#[test]
fn check_digit_rejects_lowercase() {
    assert!(!validate_check_digit("ab123", "5"));
}

// =========================================================================
// Names
// =========================================================================

#[test]
fn names_split_on_double_filler() {
    let line1 = "P<GBRSMITH<<JOHN<PAUL<<<<<<<<<<<<<<<<<<<<<<<";
    assert_eq!(line1.len(), 44);
    let record = parse_mrz(&format!("{line1}{LINE2}")).unwrap();
    assert_eq!(record.surname, "SMITH");
    assert_eq!(record.given_name, "JOHN PAUL");
    assert_eq!(record.issuing_country, "GBR");
}

// =========================================================================
// Idempotence
// =========================================================================

proptest! {
    /// Decoding the same 88-character input twice gives identical output.
    #[test]
    fn decoding_is_idempotent(input in "[A-Z0-9<]{88}") {
        prop_assert_eq!(parse_mrz(&input), parse_mrz(&input));
    }
}
