//! # Keyboard-Wedge Capture
//!
//! A wedge scanner is a keyboard: it types the MRZ it reads, usually
//! followed by Enter. [`WedgeCapture`] watches timestamped keystrokes and
//! separates scanner bursts (characters arriving within `scan_timeout_ms` of
//! each other) from a person typing.
//!
//! The state machine is driven entirely by the caller's clock. Feed each key
//! to [`WedgeCapture::push`] and call [`WedgeCapture::poll`] periodically so
//! that a burst without a trailing Enter still completes.
//!
//! ```text
//! key within timeout, or buffer empty  -> append
//! key after timeout                    -> restart buffer (or discard)
//! Enter                                -> flush
//! idle for 3 x timeout                 -> flush if >= min_length, else clear
//! ```

use gpay_core::{clean_scanner_input, MrzParser, MrzRecord};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::ScannerConfig;
use crate::error::{read_error, ScannerError, ScannerResult};

/// Idle bursts complete after this many scan timeouts.
const IDLE_TIMEOUT_FACTOR: u64 = 3;

/// Unique identifier for one completed scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScanId(pub Uuid);

impl ScanId {
    /// Generate a new random scan identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Access the inner UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for ScanId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ScanId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "scan:{}", self.0)
    }
}

/// A key as reported by the keyboard layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// A printable character.
    Char(char),
    /// Return/Enter.
    Enter,
    /// Any other non-printing key (Shift, Tab, arrows).
    Other,
}

/// One key-down event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Keystroke {
    /// The key pressed.
    pub key: Key,
    /// Ctrl, Alt or Meta was held. Such keys are shortcuts, not input.
    pub modified: bool,
    /// Event time in milliseconds on the caller's clock.
    pub at_ms: u64,
}

impl Keystroke {
    /// An unmodified keystroke.
    pub fn new(key: Key, at_ms: u64) -> Self {
        Self {
            key,
            modified: false,
            at_ms,
        }
    }

    /// Parse one line of a keystroke log: `<ms> <key>`.
    ///
    /// `<key>` is a single character, `Space`, `Enter`, or any other key
    /// name. A `Ctrl+`, `Alt+` or `Meta+` prefix marks a modified key.
    pub fn parse_log_line(line: &str, line_no: usize) -> ScannerResult<Self> {
        let invalid = |reason: &str| ScannerError::InvalidKeystroke {
            line: line_no,
            reason: reason.to_string(),
        };
        let (ms, key) = line
            .trim_start()
            .split_once(' ')
            .ok_or_else(|| invalid("expected `<ms> <key>`"))?;
        let at_ms = ms
            .parse::<u64>()
            .map_err(|_| invalid("timestamp is not a whole number of milliseconds"))?;

        let mut name = key.trim_end_matches(['\r', '\n']);
        let mut modified = false;
        for prefix in ["Ctrl+", "Alt+", "Meta+"] {
            if let Some(rest) = name.strip_prefix(prefix) {
                name = rest;
                modified = true;
            }
        }

        let mut chars = name.chars();
        let key = match (chars.next(), chars.next()) {
            (None, _) => return Err(invalid("missing key")),
            (Some(c), None) => Key::Char(c),
            _ if name == "Space" => Key::Char(' '),
            _ if name == "Enter" => Key::Enter,
            _ => Key::Other,
        };
        Ok(Self {
            key,
            modified,
            at_ms,
        })
    }
}

/// Read a keystroke log file. Blank lines and `#` comments are skipped.
pub fn load_keystroke_log(path: &std::path::Path) -> ScannerResult<Vec<Keystroke>> {
    let content = std::fs::read_to_string(path).map_err(|e| read_error(path, e))?;
    content
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty() && !line.trim_start().starts_with('#'))
        .map(|(i, line)| Keystroke::parse_log_line(line, i + 1))
        .collect()
}

/// What a completed burst turned out to be.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ScanKind {
    /// A decoded passport MRZ.
    Passport(Box<MrzRecord>),
    /// Anything else: a barcode, a damaged MRZ, or MRZ parsing disabled.
    Unrecognized {
        /// The trimmed burst.
        raw: String,
    },
}

/// A completed scanner burst.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScanCapture {
    /// Identifier for this scan.
    pub id: ScanId,
    /// Decoded content.
    #[serde(flatten)]
    pub kind: ScanKind,
    /// Whether the form should submit without operator confirmation.
    pub auto_submit: bool,
}

impl ScanCapture {
    /// The decoded passport, if this was one.
    pub fn passport(&self) -> Option<&MrzRecord> {
        match &self.kind {
            ScanKind::Passport(record) => Some(record),
            ScanKind::Unrecognized { .. } => None,
        }
    }
}

/// Keystroke-timing state machine for one scanner input.
#[derive(Debug, Clone)]
pub struct WedgeCapture {
    config: ScannerConfig,
    parser: MrzParser,
    buffer: String,
    last_key_ms: Option<u64>,
}

impl WedgeCapture {
    /// Capture with the given settings and the lenient MRZ decoder.
    pub fn new(config: ScannerConfig) -> Self {
        Self {
            config,
            parser: MrzParser::new(),
            buffer: String::new(),
            last_key_ms: None,
        }
    }

    /// Decode bursts with a specific parser.
    pub fn with_parser(mut self, parser: MrzParser) -> Self {
        self.parser = parser;
        self
    }

    /// Active settings.
    pub fn config(&self) -> &ScannerConfig {
        &self.config
    }

    /// Characters currently buffered.
    pub fn buffered_len(&self) -> usize {
        self.buffer.chars().count()
    }

    /// Whether a burst is in progress.
    pub fn is_scanning(&self) -> bool {
        !self.buffer.is_empty()
    }

    /// Drop any partial burst.
    pub fn reset(&mut self) {
        self.buffer.clear();
        self.last_key_ms = None;
    }

    /// Feed one keystroke. Returns a capture when the key completes a burst.
    pub fn push(&mut self, stroke: Keystroke) -> Option<ScanCapture> {
        if stroke.modified {
            return None;
        }

        let gap = self.last_key_ms.map(|t| stroke.at_ms.saturating_sub(t));
        self.last_key_ms = Some(stroke.at_ms);

        match stroke.key {
            Key::Enter if self.config.enter_key_submits => {
                if self.buffer.is_empty() {
                    None
                } else {
                    self.flush()
                }
            }
            Key::Char(c) => {
                let rapid = self.buffer.is_empty()
                    || gap.is_some_and(|gap| gap < self.config.scan_timeout_ms);
                if rapid {
                    self.buffer.push(c);
                } else if self.config.prevent_manual_input {
                    tracing::debug!(
                        buffered = self.buffered_len(),
                        "discarding slow keystrokes"
                    );
                    self.buffer.clear();
                } else {
                    self.buffer.clear();
                    self.buffer.push(c);
                }
                None
            }
            Key::Enter | Key::Other => None,
        }
    }

    /// Complete an idle burst. Call with the current time; once
    /// `3 x scan_timeout_ms` has passed since the last key, a burst of at
    /// least `min_length` characters is flushed and anything shorter is
    /// dropped.
    pub fn poll(&mut self, now_ms: u64) -> Option<ScanCapture> {
        let last = self.last_key_ms?;
        if self.buffer.is_empty()
            || now_ms.saturating_sub(last) < self.config.scan_timeout_ms.saturating_mul(IDLE_TIMEOUT_FACTOR)
        {
            return None;
        }
        if self.buffered_len() >= self.config.min_length {
            self.flush()
        } else {
            self.buffer.clear();
            None
        }
    }

    fn flush(&mut self) -> Option<ScanCapture> {
        let data = self.buffer.trim().to_string();
        self.buffer.clear();

        let len = data.chars().count();
        if len < self.config.min_length {
            tracing::debug!(len, "ignored short scanner burst");
            return None;
        }

        let kind = if self.config.enable_mrz_parsing && len >= self.config.mrz_length {
            let cleaned =
                clean_scanner_input(&data, &self.config.prefix_chars, &self.config.suffix_chars);
            match self.parser.parse(&cleaned) {
                Ok(record) => ScanKind::Passport(Box::new(record)),
                Err(err) => {
                    tracing::debug!(len, error = err.code(), "scanner burst is not a passport MRZ");
                    ScanKind::Unrecognized { raw: data }
                }
            }
        } else {
            ScanKind::Unrecognized { raw: data }
        };

        let capture = ScanCapture {
            id: ScanId::new(),
            kind,
            auto_submit: self.config.auto_submit,
        };
        let passport = capture.passport().is_some();
        if self.config.debug_mode {
            tracing::info!(scan = %capture.id, len, passport, "scanner burst captured");
        } else {
            tracing::debug!(scan = %capture.id, len, passport, "scanner burst captured");
        }
        Some(capture)
    }
}

/// Run a recorded keystroke sequence through `capture`. The idle timer is
/// polled at each key's timestamp before the key is pushed, and once after
/// the final key, so bursts without a trailing Enter still complete.
pub fn replay(capture: &mut WedgeCapture, strokes: &[Keystroke]) -> Vec<ScanCapture> {
    let mut captures = Vec::new();
    for stroke in strokes {
        captures.extend(capture.poll(stroke.at_ms));
        captures.extend(capture.push(*stroke));
    }
    if let Some(last) = strokes.last() {
        let idle = capture.config().scan_timeout_ms.saturating_mul(IDLE_TIMEOUT_FACTOR);
        captures.extend(capture.poll(last.at_ms.saturating_add(idle)));
    }
    captures
}
