//! Speaker classification.
//!
//! A raw speaker label from a header line is turned into a [`SpeakerKey`] by a
//! [`SpeakerClassifier`]. Two strategies exist:
//!
//! - [`OpenSetClassifier`] - every non-system label is its own participant
//! - [`RosterClassifier`] - labels must resolve to a configured roster member
//!
//! Both reject system/meta labels (`WhatsApp`, `System`, anything containing
//! `changed`) before looking at anything else.
//!
//! # Example
//!
//! ```rust
//! use chatstats::config::ClassifierConfig;
//! use chatstats::speaker::create_classifier;
//!
//! let classifier = create_classifier(&ClassifierConfig::OpenSet);
//! let key = classifier.classify("  mary jane ").unwrap();
//! assert_eq!(key.as_str(), "Mary Jane");
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::{ClassifierConfig, Roster, RosterMatch};
use crate::core::SkipReason;

/// Canonical identifier of a chat participant.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SpeakerKey(String);

impl SpeakerKey {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SpeakerKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for SpeakerKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for SpeakerKey {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Maps a raw speaker label to a participant, or rejects the line.
pub trait SpeakerClassifier: Send + Sync {
    /// Returns a human-readable name for the strategy.
    fn name(&self) -> &'static str;

    /// Classifies `label`.
    ///
    /// Returns [`SkipReason::SystemSpeaker`] for system/meta labels and
    /// [`SkipReason::UnknownSpeaker`] when the strategy has no key for it.
    fn classify(&self, label: &str) -> Result<SpeakerKey, SkipReason>;
}

/// Trims surrounding whitespace and directional marks from a label.
pub fn normalize_label(label: &str) -> &str {
    label.trim_matches(|c: char| c.is_whitespace() || matches!(c, '\u{200E}' | '\u{200F}'))
}

/// Upper-cases the first letter of every alphabetic run and lower-cases the
/// rest: `mARY-jane o'neil` becomes `Mary-Jane O'Neil`.
pub fn title_case(label: &str) -> String {
    let mut out = String::with_capacity(label.len());
    let mut in_word = false;

    for c in label.chars() {
        if c.is_alphabetic() {
            if in_word {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            in_word = true;
        } else {
            out.push(c);
            in_word = false;
        }
    }

    out
}

/// Returns `true` for labels that belong to the export itself, not a person.
pub fn is_system_label(label: &str) -> bool {
    let lower = normalize_label(label).to_lowercase();
    lower.is_empty() || lower == "system" || lower == "whatsapp" || lower.contains("changed")
}

/// Accepts every non-system speaker, keyed by its title-cased label.
#[derive(Debug, Clone, Copy, Default)]
pub struct OpenSetClassifier;

impl OpenSetClassifier {
    pub fn new() -> Self {
        Self
    }
}

impl SpeakerClassifier for OpenSetClassifier {
    fn name(&self) -> &'static str {
        "open-set"
    }

    fn classify(&self, label: &str) -> Result<SpeakerKey, SkipReason> {
        if is_system_label(label) {
            return Err(SkipReason::SystemSpeaker);
        }
        Ok(SpeakerKey(title_case(normalize_label(label))))
    }
}

/// Accepts only speakers that resolve to a roster member.
#[derive(Debug, Clone)]
pub struct RosterClassifier {
    // (canonical key, lower-cased names)
    members: Vec<(SpeakerKey, Vec<String>)>,
    matching: RosterMatch,
}

impl RosterClassifier {
    pub fn new(roster: &Roster, matching: RosterMatch) -> Self {
        let members = roster
            .entries()
            .iter()
            .map(|entry| {
                let names = entry
                    .names()
                    .map(|n| normalize_label(n).to_lowercase())
                    .filter(|n| !n.is_empty())
                    .collect();
                (SpeakerKey::new(normalize_label(&entry.name)), names)
            })
            .collect();

        Self { members, matching }
    }

    pub fn matching(&self) -> RosterMatch {
        self.matching
    }

    fn lookup(&self, label_lower: &str) -> Option<&SpeakerKey> {
        self.members
            .iter()
            .find(|(_, names)| {
                names.iter().any(|name| match self.matching {
                    RosterMatch::Exact => label_lower == name,
                    RosterMatch::Substring => label_lower.contains(name.as_str()),
                })
            })
            .map(|(key, _)| key)
    }
}

impl SpeakerClassifier for RosterClassifier {
    fn name(&self) -> &'static str {
        "roster"
    }

    fn classify(&self, label: &str) -> Result<SpeakerKey, SkipReason> {
        if is_system_label(label) {
            return Err(SkipReason::SystemSpeaker);
        }

        let lower = normalize_label(label).to_lowercase();
        self.lookup(&lower)
            .cloned()
            .ok_or(SkipReason::UnknownSpeaker)
    }
}

/// Creates the classifier selected by `config`.
pub fn create_classifier(config: &ClassifierConfig) -> Box<dyn SpeakerClassifier> {
    match config {
        ClassifierConfig::OpenSet => Box::new(OpenSetClassifier::new()),
        ClassifierConfig::Roster { roster, matching } => {
            Box::new(RosterClassifier::new(roster, *matching))
        }
    }
}
