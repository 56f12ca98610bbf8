//! The per-line pipeline: match, parse, classify, count.
//!
//! Every line either becomes a [`ParsedEvent`] that is folded into
//! [`Counters`], or is skipped with a [`SkipReason`]. A skipped line never
//! touches the counters and never stops the run.
//!
//! # Example
//!
//! ```rust
//! use chatstats::config::AnalyzerConfig;
//! use chatstats::core::{Aggregator, SkipReason};
//! use chatstats::speaker::SpeakerKey;
//!
//! let mut agg = Aggregator::new(&AnalyzerConfig::default())?;
//! agg.feed_line("12/05/2023, 9:41 AM - Alice: Hello there 😀😀 friend")?;
//! assert_eq!(agg.feed_line("a continuation line"), Err(SkipReason::NoMatch));
//!
//! let analysis = agg.finish();
//! let alice = SpeakerKey::from("Alice");
//! assert_eq!(analysis.counters.message_count(&alice), 1);
//! assert_eq!(analysis.counters.word_count(&alice), 3);
//! assert_eq!(analysis.counters.all_emojis().total('😀'), 2);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use std::collections::BTreeMap;
use std::fmt;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use chrono::NaiveDateTime;
use serde::Serialize;

use super::counters::Counters;
use crate::config::{AnalyzerConfig, ClassifierConfig};
use crate::error::{ChatstatsError, Result};
use crate::parsing::{EmojiSet, LineMatcher, count_words, parse_timestamp};
use crate::speaker::{SpeakerClassifier, SpeakerKey, create_classifier, normalize_label};

/// Why a line contributed nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// No message header (continuation line, blank line, other text).
    NoMatch,
    /// Header matched but the date or time is not a real timestamp.
    InvalidTimestamp,
    /// The speaker is the export itself (`WhatsApp`, subject changes, ...).
    SystemSpeaker,
    /// Roster mode and the speaker matches no member.
    UnknownSpeaker,
    /// The line is not valid UTF-8.
    InvalidUtf8,
}

impl SkipReason {
    pub fn all() -> &'static [SkipReason] {
        &[
            SkipReason::NoMatch,
            SkipReason::InvalidTimestamp,
            SkipReason::SystemSpeaker,
            SkipReason::UnknownSpeaker,
            SkipReason::InvalidUtf8,
        ]
    }
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            SkipReason::NoMatch => "no message header",
            SkipReason::InvalidTimestamp => "invalid timestamp",
            SkipReason::SystemSpeaker => "system speaker",
            SkipReason::UnknownSpeaker => "unknown speaker",
            SkipReason::InvalidUtf8 => "invalid UTF-8",
        };
        f.write_str(text)
    }
}

impl std::error::Error for SkipReason {}

/// One accepted transcript line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedEvent {
    pub timestamp: NaiveDateTime,
    pub speaker: SpeakerKey,
    pub body: String,
}

/// How many lines were read and why the rest were dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SkipStats {
    lines: usize,
    skipped: BTreeMap<SkipReason, usize>,
}

impl SkipStats {
    fn record_line(&mut self) {
        self.lines += 1;
    }

    fn record_skip(&mut self, reason: SkipReason) {
        *self.skipped.entry(reason).or_default() += 1;
    }

    /// Lines read, accepted or not.
    pub fn lines(&self) -> usize {
        self.lines
    }

    pub fn count(&self, reason: SkipReason) -> usize {
        self.skipped.get(&reason).copied().unwrap_or(0)
    }

    pub fn total_skipped(&self) -> usize {
        self.skipped.values().sum()
    }

    /// Reasons with a non-zero count, in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (SkipReason, usize)> + '_ {
        self.skipped.iter().map(|(&reason, &count)| (reason, count))
    }
}

/// Result of a finished run.
#[derive(Debug, Clone)]
pub struct Analysis {
    pub counters: Counters,
    pub skipped: SkipStats,
}

/// Drives the line pipeline and owns the counters until [`finish`](Self::finish).
pub struct Aggregator {
    matcher: LineMatcher,
    classifier: Box<dyn SpeakerClassifier>,
    counters: Counters,
    skipped: SkipStats,
}

impl Aggregator {
    /// Creates an aggregator for `config`.
    ///
    /// Fails if roster mode is selected with an unusable roster. Roster
    /// members start with zero counts so silent members are still reported.
    pub fn new(config: &AnalyzerConfig) -> Result<Self> {
        let mut counters = Counters::new();

        if let ClassifierConfig::Roster { roster, .. } = &config.classifier {
            roster.validate()?;
            for entry in roster.entries() {
                counters.register(&SpeakerKey::new(normalize_label(&entry.name)));
            }
        }

        let classifier = create_classifier(&config.classifier);
        tracing::debug!(classifier = classifier.name(), "aggregator_created");

        Ok(Self {
            matcher: LineMatcher::new(),
            classifier,
            counters,
            skipped: SkipStats::default(),
        })
    }

    /// Creates an aggregator around a custom classifier.
    pub fn with_classifier(classifier: Box<dyn SpeakerClassifier>) -> Self {
        Self {
            matcher: LineMatcher::new(),
            classifier,
            counters: Counters::new(),
            skipped: SkipStats::default(),
        }
    }

    /// Turns one line into an event without recording it.
    pub fn parse_line(&self, line: &str) -> std::result::Result<ParsedEvent, SkipReason> {
        let raw = self.matcher.captures(line).ok_or(SkipReason::NoMatch)?;
        let timestamp = parse_timestamp(raw.date, raw.time).ok_or(SkipReason::InvalidTimestamp)?;
        let speaker = self.classifier.classify(raw.speaker)?;

        Ok(ParsedEvent {
            timestamp,
            speaker,
            body: raw.body.to_string(),
        })
    }

    /// Parses `line` and folds it into the counters.
    pub fn feed_line(&mut self, line: &str) -> std::result::Result<(), SkipReason> {
        self.skipped.record_line();

        match self.parse_line(line) {
            Ok(event) => {
                self.record(event);
                Ok(())
            }
            Err(reason) => {
                self.skip(reason);
                Err(reason)
            }
        }
    }

    /// Like [`feed_line`](Self::feed_line) for raw bytes of one line.
    pub fn feed_bytes(&mut self, bytes: &[u8]) -> std::result::Result<(), SkipReason> {
        match std::str::from_utf8(bytes) {
            Ok(line) => self.feed_line(line),
            Err(_) => {
                self.skipped.record_line();
                self.skip(SkipReason::InvalidUtf8);
                Err(SkipReason::InvalidUtf8)
            }
        }
    }

    /// Feeds every line of `reader` until end of input.
    pub fn consume<R: BufRead>(&mut self, mut reader: R) -> io::Result<()> {
        let mut buf = Vec::new();
        loop {
            buf.clear();
            if reader.read_until(b'\n', &mut buf)? == 0 {
                return Ok(());
            }
            // Per-line outcomes are tallied in `skipped`.
            let _ = self.feed_bytes(&buf);
        }
    }

    /// Counters so far.
    pub fn counters(&self) -> &Counters {
        &self.counters
    }

    pub fn skipped(&self) -> &SkipStats {
        &self.skipped
    }

    /// Ends the run. The counters are read-only from here on.
    pub fn finish(self) -> Analysis {
        tracing::debug!(
            lines = self.skipped.lines(),
            messages = self.counters.total_messages(),
            speakers = self.counters.speaker_count(),
            skipped = self.skipped.total_skipped(),
            "analysis_finished"
        );

        Analysis {
            counters: self.counters,
            skipped: self.skipped,
        }
    }

    fn record(&mut self, event: ParsedEvent) {
        let words = count_words(&event.body);
        let emojis = EmojiSet::from_text(&event.body);
        self.counters
            .record(event.speaker, event.timestamp, words, &emojis);
    }

    fn skip(&mut self, reason: SkipReason) {
        tracing::trace!(line = self.skipped.lines(), %reason, "line_skipped");
        self.skipped.record_skip(reason);
    }
}

impl fmt::Debug for Aggregator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Aggregator")
            .field("classifier", &self.classifier.name())
            .field("counters", &self.counters)
            .field("skipped", &self.skipped)
            .finish_non_exhaustive()
    }
}

/// Analyzes an in-memory transcript.
pub fn analyze_str(content: &str, config: &AnalyzerConfig) -> Result<Analysis> {
    let mut aggregator = Aggregator::new(config)?;
    for line in content.lines() {
        let _ = aggregator.feed_line(line);
    }
    Ok(aggregator.finish())
}

/// Analyzes a transcript from any buffered reader.
pub fn analyze_reader<R: BufRead>(reader: R, config: &AnalyzerConfig) -> Result<Analysis> {
    let mut aggregator = Aggregator::new(config)?;
    aggregator.consume(reader)?;
    Ok(aggregator.finish())
}

/// Analyzes the transcript at `path`.
///
/// The file is open only while it is scanned. Open and read failures are
/// reported as [`ChatstatsError::FileAccess`].
pub fn analyze_file(path: &Path, config: &AnalyzerConfig) -> Result<Analysis> {
    let mut aggregator = Aggregator::new(config)?;
    {
        let file = File::open(path).map_err(|e| ChatstatsError::file_access(path, e))?;
        aggregator
            .consume(BufReader::new(file))
            .map_err(|e| ChatstatsError::file_access(path, e))?;
    }
    Ok(aggregator.finish())
}
