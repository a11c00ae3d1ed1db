//! # Scanner Configuration
//!
//! Timing and behaviour settings for USB/Bluetooth keyboard-wedge scanners.
//! A wedge scanner types the MRZ as keystrokes; the only way to tell it from
//! a person typing is the gap between keys, so the settings that matter most
//! are `scan_timeout_ms` and `min_length`.
//!
//! Configuration resolves in three layers:
//!
//! 1. a named hardware [`ScannerProfile`] (default `generic`),
//! 2. [`ScannerOverrides`] from a YAML file or the environment,
//! 3. [`ScannerConfig::validate`], which rejects out-of-range values.
//!
//! ```yaml
//! # scanner.yaml
//! profile: prehkeytec
//! prefix_chars: "]C1"
//! min_length: 10
//! ```

use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{read_error, ScannerError, ScannerResult};

/// Environment variable naming the base profile.
pub const ENV_PROFILE: &str = "GPAY_SCANNER_PROFILE";
/// Environment variable overriding `scan_timeout_ms`.
pub const ENV_TIMEOUT_MS: &str = "GPAY_SCANNER_TIMEOUT_MS";
/// Environment variable overriding `min_length`.
pub const ENV_MIN_LENGTH: &str = "GPAY_SCANNER_MIN_LENGTH";
/// Environment variable overriding `prefix_chars`.
pub const ENV_PREFIX: &str = "GPAY_SCANNER_PREFIX";
/// Environment variable overriding `suffix_chars`.
pub const ENV_SUFFIX: &str = "GPAY_SCANNER_SUFFIX";

/// Resolved scanner settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScannerConfig {
    /// Longest gap between keystrokes of one scan, in milliseconds.
    pub scan_timeout_ms: u64,
    /// Bursts shorter than this are ignored.
    pub min_length: usize,
    /// Decode bursts of `mrz_length` or more characters as passport MRZs.
    pub enable_mrz_parsing: bool,
    /// Expected MRZ length. Must be 88.
    pub mrz_length: usize,
    /// Enter ends the current burst.
    pub enter_key_submits: bool,
    /// Downstream forms submit as soon as a passport is captured.
    pub auto_submit: bool,
    /// Drop the buffer on a slow keystroke instead of restarting it.
    pub prevent_manual_input: bool,
    /// Characters the scanner prepends to every scan (e.g. `]C1`).
    pub prefix_chars: String,
    /// Characters the scanner appends to every scan.
    pub suffix_chars: String,
    /// Log every capture at `info` instead of `debug`.
    pub debug_mode: bool,
    /// Audible confirmation on capture.
    ///
    /// This and the other feedback settings below are not consulted by
    /// [`WedgeCapture`](crate::WedgeCapture). They are carried through config
    /// files and `gpay scanner show` for the portal's front end, which plays
    /// the confirmation.
    pub enable_beep: bool,
    /// Haptic confirmation on capture, where supported.
    pub enable_vibration: bool,
    /// Beep pitch.
    pub beep_frequency_hz: u32,
    /// Beep length.
    pub beep_duration_ms: u32,
    /// Vibration length.
    pub vibration_duration_ms: u32,
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            scan_timeout_ms: 100,
            min_length: 5,
            enable_mrz_parsing: true,
            mrz_length: gpay_core::MRZ_LENGTH,
            enter_key_submits: true,
            auto_submit: true,
            prevent_manual_input: false,
            prefix_chars: String::new(),
            suffix_chars: String::new(),
            debug_mode: false,
            enable_beep: true,
            enable_vibration: true,
            beep_frequency_hz: 800,
            beep_duration_ms: 200,
            vibration_duration_ms: 200,
        }
    }
}

impl ScannerConfig {
    /// Every range violation, in field order. Empty when valid.
    pub fn validation_errors(&self) -> Vec<String> {
        let mut errors = Vec::new();
        if !(10..=1000).contains(&self.scan_timeout_ms) {
            errors.push("scan_timeout_ms must be between 10 and 1000ms".to_string());
        }
        if !(1..=100).contains(&self.min_length) {
            errors.push("min_length must be between 1 and 100".to_string());
        }
        if self.mrz_length != gpay_core::MRZ_LENGTH {
            errors.push("mrz_length should be 88 for standard passports".to_string());
        }
        errors
    }

    /// Reject out-of-range settings.
    ///
    /// # Errors
    ///
    /// [`ScannerError::InvalidConfig`] listing every violation.
    pub fn validate(&self) -> ScannerResult<()> {
        let errors = self.validation_errors();
        if errors.is_empty() {
            Ok(())
        } else {
            Err(ScannerError::InvalidConfig { errors })
        }
    }

    /// Resolve configuration from the process environment.
    ///
    /// Variables:
    /// - `GPAY_SCANNER_PROFILE` (default: `generic`)
    /// - `GPAY_SCANNER_TIMEOUT_MS`
    /// - `GPAY_SCANNER_MIN_LENGTH`
    /// - `GPAY_SCANNER_PREFIX`
    /// - `GPAY_SCANNER_SUFFIX`
    pub fn from_env() -> ScannerResult<Self> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Resolve configuration from an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// [`ScannerError::UnknownProfile`] for an unknown profile name,
    /// [`ScannerError::InvalidEnv`] for a non-numeric number, and
    /// [`ScannerError::InvalidConfig`] if the result is out of range.
    pub fn from_lookup<F>(lookup: F) -> ScannerResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let profile = match lookup(ENV_PROFILE) {
            Some(name) => name.parse::<ScannerProfile>()?,
            None => ScannerProfile::Generic,
        };
        let overrides = ScannerOverrides {
            scan_timeout_ms: env_number(&lookup, ENV_TIMEOUT_MS)?,
            min_length: env_number(&lookup, ENV_MIN_LENGTH)?,
            prefix_chars: lookup(ENV_PREFIX),
            suffix_chars: lookup(ENV_SUFFIX),
            ..ScannerOverrides::default()
        };
        let config = overrides.apply(profile.config());
        config.validate()?;
        tracing::debug!(profile = profile.name(), "scanner configuration from environment");
        Ok(config)
    }
}

fn env_number<F, T>(lookup: &F, var: &str) -> ScannerResult<Option<T>>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(var) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|e: T::Err| ScannerError::InvalidEnv {
                var: var.to_string(),
                value: raw.clone(),
                reason: e.to_string(),
            }),
    }
}

/// Known scanner hardware.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScannerProfile {
    /// Most USB keyboard-wedge scanners.
    Generic,
    /// High-speed units (Honeywell, Zebra, Datalogic).
    Professional,
    /// Entry-level USB units.
    Budget,
    /// Wireless units with link latency.
    Bluetooth,
    /// Permissive settings for typing an MRZ by hand.
    Testing,
    /// PrehKeyTec MC 147 A S.
    Prehkeytec,
}

impl ScannerProfile {
    /// Every profile, `generic` first.
    pub const ALL: [ScannerProfile; 6] = [
        Self::Generic,
        Self::Professional,
        Self::Budget,
        Self::Bluetooth,
        Self::Testing,
        Self::Prehkeytec,
    ];

    /// Lookup key.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Generic => "generic",
            Self::Professional => "professional",
            Self::Budget => "budget",
            Self::Bluetooth => "bluetooth",
            Self::Testing => "testing",
            Self::Prehkeytec => "prehkeytec",
        }
    }

    /// Human-readable model name.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Generic => "Generic USB Scanner",
            Self::Professional => "Professional Scanner",
            Self::Budget => "Budget Scanner",
            Self::Bluetooth => "Bluetooth Scanner",
            Self::Testing => "Testing Profile",
            Self::Prehkeytec => "PrehKeyTec MC 147 A S",
        }
    }

    /// One-line description.
    pub fn description(&self) -> &'static str {
        match self {
            Self::Generic => "Default settings for most USB keyboard wedge scanners",
            Self::Professional => "High-speed professional barcode/MRZ scanners",
            Self::Budget => "Entry-level USB scanners",
            Self::Bluetooth => "Wireless Bluetooth keyboard wedge scanners",
            Self::Testing => "Permissive settings for manual testing",
            Self::Prehkeytec => "Professional MRZ/Barcode scanner with autodetect",
        }
    }

    /// The profile's settings.
    pub fn config(&self) -> ScannerConfig {
        let base = ScannerConfig::default();
        match self {
            Self::Generic => base,
            Self::Professional => ScannerConfig {
                scan_timeout_ms: 50,
                ..base
            },
            Self::Budget => ScannerConfig {
                scan_timeout_ms: 150,
                ..base
            },
            Self::Bluetooth => ScannerConfig {
                scan_timeout_ms: 120,
                ..base
            },
            Self::Testing => ScannerConfig {
                scan_timeout_ms: 300,
                min_length: 3,
                debug_mode: true,
                ..base
            },
            // Types 30-50ms between characters.
            Self::Prehkeytec => ScannerConfig {
                scan_timeout_ms: 60,
                ..base
            },
        }
    }

    fn known_names() -> String {
        Self::ALL
            .iter()
            .map(ScannerProfile::name)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl FromStr for ScannerProfile {
    type Err = ScannerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|p| p.name() == wanted)
            .ok_or_else(|| ScannerError::UnknownProfile {
                name: s.to_string(),
                known: Self::known_names(),
            })
    }
}

impl std::fmt::Display for ScannerProfile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Settings for a profile name, falling back to `generic` for `None` or an
/// unknown name.
pub fn scanner_config(profile: Option<&str>) -> ScannerConfig {
    match profile {
        None => ScannerProfile::Generic.config(),
        Some(name) => match name.parse::<ScannerProfile>() {
            Ok(profile) => profile.config(),
            Err(_) => {
                tracing::warn!(profile = name, "unknown scanner profile, using generic");
                ScannerProfile::Generic.config()
            }
        },
    }
}

/// Partial settings layered over a base configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScannerOverrides {
    /// Replaces [`ScannerConfig::scan_timeout_ms`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scan_timeout_ms: Option<u64>,
    /// Replaces [`ScannerConfig::min_length`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_length: Option<usize>,
    /// Replaces [`ScannerConfig::enable_mrz_parsing`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enable_mrz_parsing: Option<bool>,
    /// Replaces [`ScannerConfig::mrz_length`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mrz_length: Option<usize>,
    /// Replaces [`ScannerConfig::enter_key_submits`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enter_key_submits: Option<bool>,
    /// Replaces [`ScannerConfig::auto_submit`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_submit: Option<bool>,
    /// Replaces [`ScannerConfig::prevent_manual_input`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prevent_manual_input: Option<bool>,
    /// Replaces [`ScannerConfig::prefix_chars`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prefix_chars: Option<String>,
    /// Replaces [`ScannerConfig::suffix_chars`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suffix_chars: Option<String>,
    /// Replaces [`ScannerConfig::debug_mode`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub debug_mode: Option<bool>,
    /// Replaces [`ScannerConfig::enable_beep`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enable_beep: Option<bool>,
    /// Replaces [`ScannerConfig::enable_vibration`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enable_vibration: Option<bool>,
    /// Replaces [`ScannerConfig::beep_frequency_hz`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub beep_frequency_hz: Option<u32>,
    /// Replaces [`ScannerConfig::beep_duration_ms`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub beep_duration_ms: Option<u32>,
    /// Replaces [`ScannerConfig::vibration_duration_ms`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vibration_duration_ms: Option<u32>,
}

impl ScannerOverrides {
    /// Layer these overrides over `base`.
    pub fn apply(&self, base: ScannerConfig) -> ScannerConfig {
        let o = self.clone();
        ScannerConfig {
            scan_timeout_ms: o.scan_timeout_ms.unwrap_or(base.scan_timeout_ms),
            min_length: o.min_length.unwrap_or(base.min_length),
            enable_mrz_parsing: o.enable_mrz_parsing.unwrap_or(base.enable_mrz_parsing),
            mrz_length: o.mrz_length.unwrap_or(base.mrz_length),
            enter_key_submits: o.enter_key_submits.unwrap_or(base.enter_key_submits),
            auto_submit: o.auto_submit.unwrap_or(base.auto_submit),
            prevent_manual_input: o.prevent_manual_input.unwrap_or(base.prevent_manual_input),
            prefix_chars: o.prefix_chars.unwrap_or(base.prefix_chars),
            suffix_chars: o.suffix_chars.unwrap_or(base.suffix_chars),
            debug_mode: o.debug_mode.unwrap_or(base.debug_mode),
            enable_beep: o.enable_beep.unwrap_or(base.enable_beep),
            enable_vibration: o.enable_vibration.unwrap_or(base.enable_vibration),
            beep_frequency_hz: o.beep_frequency_hz.unwrap_or(base.beep_frequency_hz),
            beep_duration_ms: o.beep_duration_ms.unwrap_or(base.beep_duration_ms),
            vibration_duration_ms: o.vibration_duration_ms.unwrap_or(base.vibration_duration_ms),
        }
    }
}

/// Default settings with `overrides` applied. Not validated.
pub fn create_scanner_config(overrides: &ScannerOverrides) -> ScannerConfig {
    overrides.apply(ScannerConfig::default())
}

/// On-disk scanner configuration: an optional base profile plus overrides.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScannerConfigFile {
    /// Base profile name; `generic` when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<String>,
    /// Settings layered over the profile.
    #[serde(flatten)]
    pub overrides: ScannerOverrides,
}

impl ScannerConfigFile {
    /// Resolve to a validated configuration. Unlike [`scanner_config`], an
    /// unknown profile name is an error.
    pub fn resolve(&self) -> ScannerResult<ScannerConfig> {
        let profile = match &self.profile {
            Some(name) => name.parse::<ScannerProfile>()?,
            None => ScannerProfile::Generic,
        };
        let config = self.overrides.apply(profile.config());
        config.validate()?;
        Ok(config)
    }
}

/// Load and resolve a YAML scanner configuration file.
///
/// # Errors
///
/// [`ScannerError::FileNotFound`], [`ScannerError::YamlParse`], plus any
/// error from [`ScannerConfigFile::resolve`].
pub fn load_config_file(path: &Path) -> ScannerResult<ScannerConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| read_error(path, e))?;
    let file: ScannerConfigFile =
        serde_yaml::from_str(&content).map_err(|e| ScannerError::YamlParse {
            path: path.to_path_buf(),
            source: e,
        })?;
    let config = file.resolve()?;
    tracing::debug!(path = %path.display(), "loaded scanner configuration");
    Ok(config)
}
