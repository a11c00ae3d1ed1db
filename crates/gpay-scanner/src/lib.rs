//! # gpay-scanner — Keyboard-Wedge Passport Scanners
//!
//! Hardware support for the passport scanners used at voucher registration
//! desks. These devices present themselves as USB or Bluetooth keyboards and
//! type the MRZ they read, so the portal has to recognize a scan from the
//! rhythm of the keystrokes alone.
//!
//! - [`config`]: hardware profiles, YAML and environment configuration,
//!   range validation.
//! - [`wedge`]: the keystroke-timing state machine that turns bursts into
//!   decoded passports via [`gpay_core::MrzParser`].

pub mod config;
pub mod error;
pub mod wedge;

pub use config::{
    create_scanner_config, load_config_file, scanner_config, ScannerConfig, ScannerConfigFile,
    ScannerOverrides, ScannerProfile,
};
pub use error::{ScannerError, ScannerResult};
pub use wedge::{
    load_keystroke_log, replay, Key, Keystroke, ScanCapture, ScanId, ScanKind, WedgeCapture,
};
