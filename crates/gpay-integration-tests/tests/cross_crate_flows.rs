//! Registration-desk flows across crates: scanner configuration, keystroke
//! capture, decoding, verification, and nationality matching against a
//! stored record.

use gpay_cli::mrz::{parse_report, ParseArgs};
use gpay_cli::scanner::{replay_lines, ConfigSource};
use gpay_core::{
    code_for_nationality, nationalities_match, verify_check_digits, MrzParser, TrustLevel,
};
use gpay_scanner::{
    load_config_file, load_keystroke_log, replay, Key, Keystroke, ScanKind, ScannerConfig,
    WedgeCapture,
};

const SAMPLE: &str = "P<PNGDOE<<JOHN<<<<<<<<<<<<<<<<<<<<<<<<<<<<<<\
                      AB12345671PNG9001011M2512314<<<<<<<<<<<<<<08";

fn burst(text: &str, start: u64, gap: u64) -> Vec<Keystroke> {
    text.chars()
        .enumerate()
        .map(|(i, c)| Keystroke::new(Key::Char(c), start + i as u64 * gap))
        .collect()
}

#[test]
fn configured_scanner_to_verified_record() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("desk.yaml");
    std::fs::write(&path, "profile: prehkeytec\nprefix_chars: \"]C1\"\nsuffix_chars: \"#\"\n")
        .unwrap();
    let config = load_config_file(&path).unwrap();

    // Operator types a voucher code by hand first, then scans the passport.
    let mut strokes = burst("VOUCH", 0, 400);
    strokes.extend(burst(&format!("]C1{SAMPLE}#"), 5_000, 35));
    strokes.push(Keystroke::new(Key::Enter, 5_000 + 92 * 35));

    let mut capture =
        WedgeCapture::new(config).with_parser(MrzParser::new().with_reference_year(2026));
    let captures = replay(&mut capture, &strokes);
    assert_eq!(captures.len(), 1);

    let record = captures[0].passport().unwrap();
    assert_eq!(record.surname, "DOE");
    assert_eq!(verify_check_digits(record).trust(), TrustLevel::Verified);

    // Stored registrations hold either the code or the nationality string.
    assert!(nationalities_match(&record.nationality, "PNG"));
    assert!(nationalities_match(&record.nationality_code, "papua new guinean"));
    assert_eq!(code_for_nationality(&record.nationality), Some("PNG"));
}

#[test]
fn damaged_scan_is_unrecognized_not_lost() {
    let mut capture = WedgeCapture::new(ScannerConfig::default());
    let damaged = &SAMPLE[..80];
    let mut strokes = burst(damaged, 0, 20);
    strokes.push(Keystroke::new(Key::Enter, 80 * 20));
    let captures = replay(&mut capture, &strokes);
    assert_eq!(
        captures[0].kind,
        ScanKind::Unrecognized {
            raw: damaged.to_string()
        }
    );
}

#[test]
fn ocr_page_through_cli_with_verification() {
    let page = format!(
        "REPUBLIC OF PAPUA NEW GUINEA\nPASSPORT  PASSEPORT\n\n{} \n {}\n",
        SAMPLE[..44].replacen("<<JOHN", "  john", 1),
        &SAMPLE[44..]
    );
    let args = ParseArgs {
        ocr: true,
        verify: true,
        reference_year: Some(2026),
        ..ParseArgs::default()
    };
    let (code, output) = parse_report(&page, &args).unwrap();
    assert_eq!(code, 0, "{output}");
    assert_eq!(output["givenName"], "JOHN");
    assert_eq!(output["verification"]["trust"], "verified");
}

#[test]
fn keystroke_log_replay_through_cli() {
    let dir = tempfile::tempdir().unwrap();
    let log = dir.path().join("scan.log");
    let mut content = String::new();
    for (i, c) in SAMPLE.chars().enumerate() {
        content.push_str(&format!("{} {c}\n", i * 30));
    }
    std::fs::write(&log, &content).unwrap();
    assert_eq!(load_keystroke_log(&log).unwrap().len(), 88);

    // No trailing Enter: the idle poll completes the burst.
    let lines = replay_lines(&log, &ConfigSource::default(), true).unwrap();
    assert_eq!(lines.len(), 1);
    let json: serde_json::Value = serde_json::from_str(&lines[0]).unwrap();
    assert_eq!(json["type"], "passport");
    assert_eq!(json["auto_submit"], true);
}
