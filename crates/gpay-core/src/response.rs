//! Serializable outcome of a decode, as returned to portal callers.
//!
//! ```json
//! { "success": true, "type": "mrz", "passportNumber": "AB1234567", ..., "message": "Passport MRZ parsed successfully." }
//! { "success": false, "type": "error", "message": "MRZ length is too short (40 chars, expected 88).", "error": "too_short" }
//! ```

use serde::Serialize;

use crate::error::MrzError;
use crate::mrz::{MrzRecord, SUCCESS_MESSAGE};

/// Tagged decode result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScanResponse {
    /// Whether a record was decoded.
    pub success: bool,
    /// `"mrz"` on success, `"error"` on failure.
    #[serde(rename = "type")]
    pub kind: &'static str,
    /// The decoded record, flattened into the top-level object.
    #[serde(flatten)]
    pub record: Option<MrzRecord>,
    /// Human-readable outcome.
    pub message: String,
    /// Machine-readable [`MrzError::code`] on failure.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<&'static str>,
}

impl ScanResponse {
    /// Successful decode.
    pub fn success(record: MrzRecord) -> Self {
        Self {
            success: true,
            kind: "mrz",
            record: Some(record),
            message: SUCCESS_MESSAGE.to_string(),
            error: None,
        }
    }

    /// Failed decode.
    pub fn failure(err: &MrzError) -> Self {
        Self {
            success: false,
            kind: "error",
            record: None,
            message: err.to_string(),
            error: Some(err.code()),
        }
    }
}

impl From<Result<MrzRecord, MrzError>> for ScanResponse {
    fn from(result: Result<MrzRecord, MrzError>) -> Self {
        match result {
            Ok(record) => Self::success(record),
            Err(err) => Self::failure(&err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mrz::MrzParser;

    const PNG_SAMPLE: &str = "P<PNGDOE<<JOHN<<<<<<<<<<<<<<<<<<<<<<<<<<<<<<\
                              AB12345671PNG9001011M2512314<<<<<<<<<<<<<<08";

    #[test]
    fn success_flattens_record() {
        let parsed = MrzParser::new().with_reference_year(2026).parse(PNG_SAMPLE);
        let json = serde_json::to_value(ScanResponse::from(parsed)).unwrap();
        assert_eq!(json["success"], true);
        assert_eq!(json["type"], "mrz");
        assert_eq!(json["passportNumber"], "AB1234567");
        assert_eq!(json["nationality"], "Papua New Guinean");
        assert_eq!(json["message"], "Passport MRZ parsed successfully.");
        assert!(json.get("error").is_none());
    }

    #[test]
    fn failure_carries_message_and_code() {
        let parsed = MrzParser::new().parse("P<PNGDOE");
        let json = serde_json::to_value(ScanResponse::from(parsed)).unwrap();
        assert_eq!(json["success"], false);
        assert_eq!(json["type"], "error");
        assert_eq!(json["error"], "too_short");
        assert_eq!(
            json["message"],
            "MRZ length is too short (8 chars, expected 88)."
        );
        assert!(json.get("passportNumber").is_none());
    }
}
