//! Line-level parsing primitives.
//!
//! - [`line`] - header grammar ([`LineMatcher`], [`RawLine`])
//! - [`date`] - day-first timestamp parsing
//! - [`emoji`] - emoji extraction, normalization and word counting
//!
//! These are pure functions over `&str`; the [`Aggregator`](crate::core::Aggregator)
//! strings them together.

pub mod date;
pub mod emoji;
pub mod line;

// Re-export commonly used items
pub use date::{parse_date, parse_time, parse_timestamp};
pub use emoji::{EmojiSet, count_words, is_emoji, is_modifier, normalize_emojis};
pub use line::{LineMatcher, RawLine};
