//! JSON report.

use serde::Serialize;

use crate::core::{Analysis, RankedEmoji, SkipStats, WordsPerMessage};
use crate::error::Result;

/// Everything the console report shows, as one serializable document.
#[derive(Debug, Clone, Serialize)]
pub struct StatsReport<'a> {
    pub speakers: Vec<SpeakerReport<'a>>,
    pub total: TotalReport,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_range: Option<DateRange>,
    /// Lines read and skipped.
    pub input: &'a SkipStats,
}

#[derive(Debug, Clone, Serialize)]
pub struct SpeakerReport<'a> {
    pub name: &'a str,
    pub messages: usize,
    pub words: usize,
    pub words_per_message: f64,
    pub top_emojis: Vec<RankedEmoji>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TotalReport {
    pub messages: usize,
    pub words: usize,
    pub words_per_message: f64,
    pub top_emojis: Vec<RankedEmoji>,
}

/// First and last message, `%Y-%m-%d %H:%M:%S`.
#[derive(Debug, Clone, Serialize)]
pub struct DateRange {
    pub first: String,
    pub last: String,
}

impl<'a> StatsReport<'a> {
    pub fn new(analysis: &'a Analysis, top_n: usize) -> Self {
        let counters = &analysis.counters;
        let wpm = WordsPerMessage::from_counters(counters);

        let speakers = counters
            .speakers()
            .map(|speaker| SpeakerReport {
                name: speaker.as_str(),
                messages: counters.message_count(speaker),
                words: counters.word_count(speaker),
                words_per_message: wpm.for_speaker(speaker),
                top_emojis: counters
                    .emoji_stats(speaker)
                    .map(|tally| tally.ranked(top_n))
                    .unwrap_or_default(),
            })
            .collect();

        let total = TotalReport {
            messages: counters.total_messages(),
            words: counters.total_words(),
            words_per_message: wpm.total(),
            top_emojis: counters.all_emojis().ranked(top_n),
        };

        let date_range = counters.date_range().map(|(first, last)| DateRange {
            first: first.format("%Y-%m-%d %H:%M:%S").to_string(),
            last: last.format("%Y-%m-%d %H:%M:%S").to_string(),
        });

        Self {
            speakers,
            total,
            date_range,
            input: &analysis.skipped,
        }
    }
}

/// Serializes the report for `analysis` as pretty-printed JSON.
pub fn to_json(analysis: &Analysis, top_n: usize) -> Result<String> {
    Ok(serde_json::to_string_pretty(&StatsReport::new(analysis, top_n))?)
}
