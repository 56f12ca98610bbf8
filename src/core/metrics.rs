//! Ratios derived from finished counters.

use std::collections::BTreeMap;

use serde::Serialize;

use super::counters::Counters;
use crate::speaker::SpeakerKey;

/// Division that yields `0.0` instead of `NaN`/`inf` for a zero divisor.
pub fn safe_divide(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        return 0.0;
    }
    numerator as f64 / denominator as f64
}

/// Average words per message, per speaker and overall.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct WordsPerMessage {
    per_speaker: BTreeMap<SpeakerKey, f64>,
    total: f64,
}

impl WordsPerMessage {
    pub fn from_counters(counters: &Counters) -> Self {
        let per_speaker = counters
            .speakers()
            .map(|speaker| {
                let ratio = safe_divide(
                    counters.word_count(speaker),
                    counters.message_count(speaker),
                );
                (speaker.clone(), ratio)
            })
            .collect();

        Self {
            per_speaker,
            total: safe_divide(counters.total_words(), counters.total_messages()),
        }
    }

    /// Ratio for `speaker`; `0.0` for unknown or silent speakers.
    pub fn for_speaker(&self, speaker: &SpeakerKey) -> f64 {
        self.per_speaker.get(speaker).copied().unwrap_or(0.0)
    }

    pub fn total(&self) -> f64 {
        self.total
    }

    pub fn iter(&self) -> impl Iterator<Item = (&SpeakerKey, f64)> {
        self.per_speaker.iter().map(|(k, &v)| (k, v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{AnalyzerConfig, Roster, RosterEntry};
    use crate::core::analyze_str;

    #[test]
    fn test_safe_divide() {
        assert_eq!(safe_divide(10, 4), 2.5);
        assert_eq!(safe_divide(10, 0), 0.0);
        assert_eq!(safe_divide(0, 0), 0.0);
    }

    #[test]
    fn test_words_per_message() {
        let chat = "1/1/2024, 10:00 - Alice: one two three\n\
                    1/1/2024, 10:01 - Alice: four\n\
                    1/1/2024, 10:02 - Bob: five six";
        let analysis = analyze_str(chat, &AnalyzerConfig::default()).unwrap();
        let wpm = WordsPerMessage::from_counters(&analysis.counters);

        assert_eq!(wpm.for_speaker(&SpeakerKey::from("Alice")), 2.0);
        assert_eq!(wpm.for_speaker(&SpeakerKey::from("Bob")), 2.0);
        assert_eq!(wpm.total(), 2.0);
        assert_eq!(wpm.iter().count(), 2);
    }

    #[test]
    fn test_silent_speaker_is_zero() {
        let config = AnalyzerConfig::new()
            .with_roster(Roster::new().with_entry(RosterEntry::new("Victor")));
        let analysis = analyze_str("", &config).unwrap();
        let wpm = WordsPerMessage::from_counters(&analysis.counters);

        assert_eq!(wpm.for_speaker(&SpeakerKey::from("Victor")), 0.0);
        assert_eq!(wpm.total(), 0.0);
        assert_eq!(wpm.for_speaker(&SpeakerKey::from("Nobody")), 0.0);
    }
}
