//! Adversarial inputs: nothing reachable from caller-supplied text may
//! panic. Each test runs the public entry points over hostile strings.

use gpay_core::{
    clean_scanner_input, compute_check_digit, extract_mrz_from_ocr, is_mrz_format,
    nationalities_match, nationality_for_code, normalize_nationality, normalize_ocr_text,
    parse_mrz, validate_check_digit, verify_check_digits, MrzParser,
};
use gpay_scanner::{replay, Key, Keystroke, ScannerConfig, WedgeCapture};

fn hostile_inputs() -> Vec<String> {
    vec![
        String::new(),
        " ".repeat(200),
        "\0".repeat(88),
        "<".repeat(88),
        "P<".repeat(44),
        "ÄÖÜ".repeat(30),
        "🛂".repeat(88),
        "P<UTO".to_string() + &"\u{200b}".repeat(100),
        "\r\n".repeat(50),
        "9".repeat(10_000),
        format!("P<{}", "é".repeat(86)),
    ]
}

#[test]
fn decoder_never_panics() {
    for input in hostile_inputs() {
        let _ = parse_mrz(&input);
        let _ = MrzParser::strict().parse(&input);
        let _ = is_mrz_format(&input);
    }
}

#[test]
fn multibyte_input_keeps_character_offsets() {
    let input = format!("P<{}", "é".repeat(86));
    let record = parse_mrz(&input).err();
    // Year digits are `é`, so the date is rejected rather than sliced mid-character.
    assert!(record.is_some());
}

#[test]
fn verification_never_panics_on_lenient_records() {
    let odd = "P<PNGDÖE<<JOHN<<<<<<<<<<<<<<<<<<<<<<<<<<<<<<AB12345671PNG9001011M2512314<<<<<<<<<<<<<<08";
    let record = parse_mrz(odd).unwrap();
    let report = verify_check_digits(&record);
    assert_eq!(report.checks.len(), 5);
}

#[test]
fn check_digits_never_panic() {
    for input in hostile_inputs() {
        let _ = compute_check_digit(&input);
        let _ = validate_check_digit(&input, &input);
    }
}

#[test]
fn nationality_lookups_never_panic() {
    for input in hostile_inputs() {
        let _ = nationality_for_code(input.as_str());
        let _ = normalize_nationality(&input);
        let _ = nationalities_match(&input, "British");
    }
}

#[test]
fn input_cleanup_never_panics() {
    for input in hostile_inputs() {
        let _ = clean_scanner_input(&input, "é", "🛂");
        let _ = extract_mrz_from_ocr(&normalize_ocr_text(&input));
    }
}

#[test]
fn wedge_survives_clock_going_backwards() {
    let mut capture = WedgeCapture::new(ScannerConfig::default());
    let strokes = vec![
        Keystroke::new(Key::Char('A'), u64::MAX),
        Keystroke::new(Key::Char('B'), 0),
        Keystroke::new(Key::Char('C'), u64::MAX),
        Keystroke::new(Key::Enter, 5),
    ];
    let _ = replay(&mut capture, &strokes);
    let _ = capture.poll(0);
    let _ = capture.poll(u64::MAX);
}
