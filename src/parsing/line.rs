//! Structural matching of transcript lines.
//!
//! A chat export line starts a new message when it carries a header:
//!
//! - Android: `12/05/2023, 9:41 AM - Alice: Hello`
//! - iOS: `[12/05/2023, 09:41:00] Alice: Hello`
//! - Dotted: `26.10.2025, 20:40 - Alice: Hello`
//!
//! Lines without a header (multi-line continuations, blank lines) do not match.
//! They are not merged into the previous message.

use std::sync::LazyLock;

use regex::Regex;

/// Header grammar shared by every export variant.
///
/// Groups: `date`, `time`, `speaker`, `body`.
const LINE_PATTERN: &str = r"^\x{200E}?\[?(?P<date>\d{1,2}[/\-.]\d{1,2}[/\-.]\d{2,4}),?\s+(?P<time>\d{1,2}:\d{2}(?::\d{2})?(?:\s?[APap][Mm])?)(?:\]\s*(?:-\s+)?|\s+-\s+)(?P<speaker>[^:]+):\s+(?P<body>.+)";

static LINE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(LINE_PATTERN).expect("line pattern is valid"));

/// Raw substrings of a matched header line.
///
/// Nothing here is validated: the date may be impossible and the speaker may
/// be a system label. Downstream stages decide.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawLine<'a> {
    pub date: &'a str,
    pub time: &'a str,
    pub speaker: &'a str,
    pub body: &'a str,
}

impl RawLine<'_> {
    /// Date and time joined the way they appear in the export.
    pub fn timestamp_text(&self) -> String {
        format!("{}, {}", self.date, self.time)
    }
}

/// Matches transcript lines against the header grammar.
#[derive(Debug, Clone)]
pub struct LineMatcher {
    regex: &'static Regex,
}

impl LineMatcher {
    pub fn new() -> Self {
        Self {
            regex: &LINE_REGEX,
        }
    }

    /// Returns the header fields of `line`, or `None` if it is not a header.
    ///
    /// A trailing `\n` or `\r\n` is tolerated.
    pub fn captures<'a>(&self, line: &'a str) -> Option<RawLine<'a>> {
        let line = line.trim_end_matches(['\n', '\r']);
        let caps = self.regex.captures(line)?;

        Some(RawLine {
            date: caps.name("date")?.as_str(),
            time: caps.name("time")?.as_str(),
            speaker: caps.name("speaker")?.as_str(),
            body: caps.name("body")?.as_str(),
        })
    }

    /// Returns `true` if `line` starts a new message.
    pub fn is_header(&self, line: &str) -> bool {
        self.captures(line).is_some()
    }
}

impl Default for LineMatcher {
    fn default() -> Self {
        Self::new()
    }
}
