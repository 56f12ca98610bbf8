//! Core analysis logic for chatstats.
//!
//! This module contains:
//! - [`aggregator`] - the per-line pipeline and run entry points
//! - [`counters`] - message, word, emoji and date aggregates
//! - [`metrics`] - ratios derived from finished counters
//!
//! # Quick Start
//!
//! ```rust
//! use chatstats::config::AnalyzerConfig;
//! use chatstats::core::{WordsPerMessage, analyze_str};
//!
//! let chat = "12/05/2023, 9:41 AM - Alice: Hello there\n\
//!             12/05/2023, 9:42 AM - Bob: Hi";
//! let analysis = analyze_str(chat, &AnalyzerConfig::default())?;
//! let wpm = WordsPerMessage::from_counters(&analysis.counters);
//!
//! assert_eq!(analysis.counters.total_messages(), 2);
//! assert_eq!(wpm.total(), 1.5);
//! # Ok::<(), chatstats::ChatstatsError>(())
//! ```

pub mod aggregator;
pub mod counters;
pub mod metrics;

// Re-export main types for convenience
pub use aggregator::{
    Aggregator, Analysis, ParsedEvent, SkipReason, SkipStats, analyze_file, analyze_reader,
    analyze_str,
};
pub use counters::{Counters, EmojiTally, RankedEmoji};
pub use metrics::{WordsPerMessage, safe_divide};
