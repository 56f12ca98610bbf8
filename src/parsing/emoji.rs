//! Emoji extraction and modifier normalization.
//!
//! Emoji are found by code point range, not by a full emoji property table.
//! Each contiguous run of emoji-bearing code points is stripped of skin-tone,
//! gender, joiner and variation-selector modifiers and then split into single
//! base emoji. `👍🏽` counts as `👍`, and `🤷‍♀️` counts as `🤷`.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;

/// Emoji-bearing blocks.
const EMOJI_RANGES: &[(char, char)] = &[
    ('\u{1F600}', '\u{1F64F}'), // Emoticons
    ('\u{1F300}', '\u{1F5FF}'), // Symbols & pictographs
    ('\u{1F680}', '\u{1F6FF}'), // Transport & map
    ('\u{1F1E0}', '\u{1F1FF}'), // Regional indicators (flags)
    ('\u{2500}', '\u{2BEF}'),   // Misc symbols and arrows
    ('\u{2702}', '\u{27B0}'),   // Dingbats
    ('\u{24C2}', '\u{24C2}'),   // Circled M
    ('\u{1F170}', '\u{1F251}'), // Enclosed alphanumeric / ideographic supplement
    ('\u{1F900}', '\u{1F9FF}'), // Supplemental symbols
    ('\u{1FA70}', '\u{1FAFF}'), // Symbols and pictographs extended-A
];

/// Code points dropped from emoji runs before counting.
const MODIFIERS: &[char] = &[
    '\u{1F3FB}', // Skin tones 1-2
    '\u{1F3FC}', // Skin tone 3
    '\u{1F3FD}', // Skin tone 4
    '\u{1F3FE}', // Skin tone 5
    '\u{1F3FF}', // Skin tone 6
    '\u{2640}',  // Female sign
    '\u{2642}',  // Male sign
    '\u{200D}',  // Zero-width joiner
    '\u{FE0F}',  // Variation selector-16
];

static EMOJI_RUN_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    let mut class = String::from("[");
    for (start, end) in EMOJI_RANGES {
        class.push_str(&format!(r"\x{{{:X}}}-\x{{{:X}}}", *start as u32, *end as u32));
    }
    class.push_str("]+");
    Regex::new(&class).expect("emoji ranges form a valid class")
});

/// Returns `true` if `c` falls in one of the emoji-bearing blocks.
pub fn is_emoji(c: char) -> bool {
    EMOJI_RANGES
        .iter()
        .any(|&(start, end)| (start..=end).contains(&c))
}

/// Returns `true` if `c` is a skin-tone, gender, joiner or variation modifier.
pub fn is_modifier(c: char) -> bool {
    MODIFIERS.contains(&c)
}

/// Contiguous runs of emoji-bearing code points in `text`, unmodified.
pub fn emoji_runs(text: &str) -> impl Iterator<Item = &str> {
    EMOJI_RUN_REGEX.find_iter(text).map(|m| m.as_str())
}

/// Base emoji in `text`, in order, duplicates preserved.
pub fn normalize_emojis(text: &str) -> Vec<char> {
    emoji_runs(text)
        .flat_map(str::chars)
        .filter(|&c| !is_modifier(c))
        .collect()
}

/// Number of whitespace-delimited words in `text`.
///
/// A token made only of emoji and modifiers is not a word; its emoji are
/// counted separately.
pub fn count_words(text: &str) -> usize {
    text.split_whitespace()
        .filter(|token| !token.chars().all(|c| is_emoji(c) || is_modifier(c)))
        .count()
}

/// The emoji found in one message body.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmojiSet {
    /// Every base emoji occurrence, in order.
    pub occurrences: Vec<char>,
    /// Each base emoji once.
    pub distinct: BTreeSet<char>,
}

impl EmojiSet {
    pub fn from_text(text: &str) -> Self {
        let occurrences = normalize_emojis(text);
        let distinct = occurrences.iter().copied().collect();
        Self {
            occurrences,
            distinct,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.occurrences.is_empty()
    }
}
