//! # Input Cleanup
//!
//! Text reaches the decoder from two noisy sources: keyboard-wedge scanners
//! (which may wrap the MRZ in configured prefix/suffix characters and emit
//! control codes) and camera OCR (which splits the MRZ over several lines,
//! mixes case, and reads fillers as spaces). These helpers turn either into a
//! candidate MRZ string for [`crate::parse_mrz`].

use crate::error::MrzError;

/// Minimum filler count for an OCR line to count as an MRZ line when it does
/// not start with `P<`.
const OCR_MIN_FILLERS: usize = 10;

/// Remove every Unicode whitespace character.
pub fn strip_whitespace(input: &str) -> String {
    input.chars().filter(|c| !c.is_whitespace()).collect()
}

/// Clean a raw keyboard-wedge burst.
///
/// Drops control characters and whitespace, then strips `prefix` and
/// `suffix` once each if present. Empty affixes are ignored.
pub fn clean_scanner_input(raw: &str, prefix: &str, suffix: &str) -> String {
    let cleaned: String = raw
        .chars()
        .filter(|c| !c.is_control() && !c.is_whitespace())
        .collect();

    let mut text = cleaned.as_str();
    if !prefix.is_empty() {
        text = text.strip_prefix(prefix).unwrap_or(text);
    }
    if !suffix.is_empty() {
        text = text.strip_suffix(suffix).unwrap_or(text);
    }
    text.to_string()
}

/// Normalize OCR output line by line: trim, uppercase, and turn interior
/// spaces into `<` fillers.
pub fn normalize_ocr_text(text: &str) -> String {
    text.lines()
        .map(|line| line.trim().to_uppercase().replace(' ', "<"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Locate the two MRZ lines in recognized page text.
///
/// A line qualifies if it starts with `P<` or holds more than ten `<`
/// fillers. The last two qualifying lines are whitespace-stripped and
/// concatenated.
///
/// # Errors
///
/// [`MrzError::MrzLinesNotFound`] when fewer than two lines qualify.
pub fn extract_mrz_from_ocr(text: &str) -> Result<String, MrzError> {
    let candidates: Vec<&str> = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .filter(|line| {
            line.starts_with("P<") || line.matches('<').count() > OCR_MIN_FILLERS
        })
        .collect();

    match candidates.as_slice() {
        [.., line1, line2] => {
            tracing::debug!(
                candidates = candidates.len(),
                "located MRZ lines in OCR text"
            );
            Ok(format!(
                "{}{}",
                strip_whitespace(line1),
                strip_whitespace(line2)
            ))
        }
        _ => Err(MrzError::MrzLinesNotFound),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LINE1: &str = "P<PNGDOE<<JOHN<<<<<<<<<<<<<<<<<<<<<<<<<<<<<<";
    const LINE2: &str = "AB12345671PNG9001011M2512314<<<<<<<<<<<<<<08";

    #[test]
    fn strip_whitespace_removes_all_kinds() {
        assert_eq!(strip_whitespace(" a\tb\r\nc\u{00a0}d "), "abcd");
    }

    #[test]
    fn scanner_input_drops_control_characters() {
        assert_eq!(clean_scanner_input("\u{2}P<PNG\r\n", "", ""), "P<PNG");
    }

    #[test]
    fn scanner_input_strips_affixes_once() {
        assert_eq!(clean_scanner_input("]]P<PNG##", "]]", "##"), "P<PNG");
        assert_eq!(clean_scanner_input("]]]]X", "]]", ""), "]]X");
        assert_eq!(clean_scanner_input("P<PNG", "]]", "##"), "P<PNG");
    }

    #[test]
    fn ocr_text_is_uppercased_and_filled() {
        let text = "  p<png doe<<john  \nab1234567 1png";
        assert_eq!(
            normalize_ocr_text(text),
            "P<PNG<DOE<<JOHN\nAB1234567<1PNG"
        );
    }

    #[test]
    fn extracts_last_two_mrz_lines() {
        let text = format!("REPUBLIC OF PAPUA NEW GUINEA\nPASSPORT\n\n{LINE1}\n {LINE2} \n");
        assert_eq!(
            extract_mrz_from_ocr(&text).unwrap(),
            format!("{LINE1}{LINE2}")
        );
    }

    #[test]
    fn ignores_earlier_filler_noise() {
        let text = format!("<<<<<<<<<<<<<<<<\n{LINE1}\n{LINE2}");
        assert_eq!(
            extract_mrz_from_ocr(&text).unwrap(),
            format!("{LINE1}{LINE2}")
        );
    }

    #[test]
    fn line_with_few_fillers_is_skipped() {
        let text = format!("{LINE1}\nNAME<<DOE");
        assert_eq!(
            extract_mrz_from_ocr(&text),
            Err(MrzError::MrzLinesNotFound)
        );
    }

    #[test]
    fn missing_lines_is_an_error() {
        assert_eq!(extract_mrz_from_ocr(""), Err(MrzError::MrzLinesNotFound));
        assert_eq!(
            extract_mrz_from_ocr(LINE1),
            Err(MrzError::MrzLinesNotFound)
        );
    }
}
