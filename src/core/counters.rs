//! Aggregate state built by one analysis run.
//!
//! [`Counters`] is filled by the [`Aggregator`](super::Aggregator) and read by
//! everything else. Per-speaker tables are `BTreeMap`s, so iteration is sorted
//! by speaker regardless of the order speakers first appeared. Aggregates
//! (total messages, emoji across all speakers) live outside those tables and
//! have their own accessors: [`Counters::speakers`] only ever yields real
//! participants.

use std::collections::BTreeMap;

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::parsing::EmojiSet;
use crate::speaker::SpeakerKey;

/// Emoji frequencies for one speaker, or for everyone.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmojiTally {
    total: BTreeMap<char, usize>,
    messages: BTreeMap<char, usize>,
}

/// One row of an emoji ranking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RankedEmoji {
    pub emoji: char,
    /// Occurrences across all messages.
    pub total: usize,
    /// Messages containing the emoji at least once.
    pub messages: usize,
}

impl EmojiTally {
    pub(crate) fn record(&mut self, set: &EmojiSet) {
        for &emoji in &set.occurrences {
            *self.total.entry(emoji).or_default() += 1;
        }
        for &emoji in &set.distinct {
            *self.messages.entry(emoji).or_default() += 1;
        }
    }

    /// Occurrences of `emoji`.
    pub fn total(&self, emoji: char) -> usize {
        self.total.get(&emoji).copied().unwrap_or(0)
    }

    /// Messages containing `emoji`.
    pub fn messages(&self, emoji: char) -> usize {
        self.messages.get(&emoji).copied().unwrap_or(0)
    }

    pub fn totals(&self) -> &BTreeMap<char, usize> {
        &self.total
    }

    pub fn message_counts(&self) -> &BTreeMap<char, usize> {
        &self.messages
    }

    /// Sum of all occurrences.
    pub fn occurrences(&self) -> usize {
        self.total.values().sum()
    }

    /// Number of different emoji seen.
    pub fn distinct(&self) -> usize {
        self.total.len()
    }

    pub fn is_empty(&self) -> bool {
        self.total.is_empty()
    }

    /// The `top_n` most used emoji, by total descending, ties by code point.
    pub fn ranked(&self, top_n: usize) -> Vec<RankedEmoji> {
        let mut ranked: Vec<RankedEmoji> = self
            .total
            .iter()
            .map(|(&emoji, &total)| RankedEmoji {
                emoji,
                total,
                messages: self.messages(emoji),
            })
            .collect();

        ranked.sort_by(|a, b| b.total.cmp(&a.total).then(a.emoji.cmp(&b.emoji)));
        ranked.truncate(top_n);
        ranked
    }
}

/// Message, word and emoji counts plus the date series of one run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Counters {
    messages: BTreeMap<SpeakerKey, usize>,
    words: BTreeMap<SpeakerKey, usize>,
    emojis: BTreeMap<SpeakerKey, EmojiTally>,
    total_messages: usize,
    total_words: usize,
    all_emojis: EmojiTally,
    dates: Vec<(SpeakerKey, NaiveDateTime)>,
}

impl Counters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `speaker` with zero counts, so it is reported even if silent.
    pub(crate) fn register(&mut self, speaker: &SpeakerKey) {
        self.messages.entry(speaker.clone()).or_default();
        self.words.entry(speaker.clone()).or_default();
        self.emojis.entry(speaker.clone()).or_default();
    }

    /// Folds one accepted message into every table.
    pub(crate) fn record(
        &mut self,
        speaker: SpeakerKey,
        timestamp: NaiveDateTime,
        words: usize,
        emojis: &EmojiSet,
    ) {
        *self.messages.entry(speaker.clone()).or_default() += 1;
        self.total_messages += 1;

        *self.words.entry(speaker.clone()).or_default() += words;
        self.total_words += words;

        self.emojis.entry(speaker.clone()).or_default().record(emojis);
        self.all_emojis.record(emojis);

        self.dates.push((speaker, timestamp));
    }

    /// Participants in sorted order. Never includes an aggregate pseudo-key.
    pub fn speakers(&self) -> impl Iterator<Item = &SpeakerKey> {
        self.messages.keys()
    }

    pub fn speaker_count(&self) -> usize {
        self.messages.len()
    }

    pub fn message_count(&self, speaker: &SpeakerKey) -> usize {
        self.messages.get(speaker).copied().unwrap_or(0)
    }

    /// Messages from every speaker.
    pub fn total_messages(&self) -> usize {
        self.total_messages
    }

    pub fn word_count(&self, speaker: &SpeakerKey) -> usize {
        self.words.get(speaker).copied().unwrap_or(0)
    }

    /// Words from every speaker.
    pub fn total_words(&self) -> usize {
        self.total_words
    }

    pub fn emoji_stats(&self, speaker: &SpeakerKey) -> Option<&EmojiTally> {
        self.emojis.get(speaker)
    }

    /// Emoji across every speaker.
    pub fn all_emojis(&self) -> &EmojiTally {
        &self.all_emojis
    }

    /// `(speaker, timestamp)` per accepted message, in file order.
    pub fn date_series(&self) -> &[(SpeakerKey, NaiveDateTime)] {
        &self.dates
    }

    /// Earliest and latest timestamp, or `None` without messages.
    pub fn date_range(&self) -> Option<(NaiveDateTime, NaiveDateTime)> {
        let min = self.dates.iter().map(|(_, ts)| *ts).min()?;
        let max = self.dates.iter().map(|(_, ts)| *ts).max()?;
        Some((min, max))
    }

    pub fn is_empty(&self) -> bool {
        self.total_messages == 0
    }
}
