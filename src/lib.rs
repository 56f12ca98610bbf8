//! # chatstats
//!
//! Per-speaker statistics for exported chat transcripts.
//!
//! ## Overview
//!
//! chatstats reads WhatsApp-style text exports, one message per line:
//!
//! ```text
//! 12/05/2023, 9:41 AM - Alice: Hello there 😀😀 friend
//! [13/05/2023, 10:02:11] Bob: Hi!
//! ```
//!
//! and counts, per speaker and overall:
//! - messages and words (and words per message)
//! - emoji, by occurrence and by number of messages containing them
//! - the timestamp of every message, for a monthly volume timeline
//!
//! Lines that are not message headers, have impossible dates, or come from
//! the system (`WhatsApp`, subject changes) are skipped and tallied; they
//! never stop a run.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use chatstats::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let analysis = analyze_file("chat.txt".as_ref(), &AnalyzerConfig::default())?;
//!     let wpm = WordsPerMessage::from_counters(&analysis.counters);
//!
//!     print!("{}", render_table(&analysis.counters, &wpm));
//!     print!("{}", render_emoji_rankings(&analysis.counters, 40));
//!     Ok(())
//! }
//! ```
//!
//! ## Known Participants Only
//!
//! ```rust
//! use chatstats::prelude::*;
//!
//! let roster = Roster::new()
//!     .with_entry(RosterEntry::new("Victor").with_alias("vic"));
//! let config = AnalyzerConfig::new().with_roster(roster);
//!
//! let analysis = analyze_str(
//!     "1/2/2024, 10:00 - vic: hi\n1/2/2024, 10:01 - Stranger: hello",
//!     &config,
//! )?;
//! assert_eq!(analysis.counters.total_messages(), 1);
//! assert_eq!(analysis.skipped.count(SkipReason::UnknownSpeaker), 1);
//! # Ok::<(), chatstats::ChatstatsError>(())
//! ```
//!
//! ## Module Structure
//!
//! - [`parsing`] - header matching, day-first dates, emoji extraction
//! - [`speaker`] - [`SpeakerKey`](speaker::SpeakerKey) and classifiers
//! - [`core`] - [`Aggregator`](core::Aggregator), [`Counters`](core::Counters), metrics
//! - [`config`] - analyzer, roster and report configuration
//! - [`report`] - console tables and JSON
//! - [`timeline`] - monthly resampling, PNG chart and CSV output
//! - [`cli`] - CLI argument types
//! - [`error`] - [`ChatstatsError`], [`Result`]
//! - [`prelude`] - convenient re-exports

#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod parsing;
pub mod report;
pub mod speaker;
pub mod timeline;

// Re-export the main types at the crate root for convenience
pub use crate::core::{Analysis, analyze_file, analyze_reader, analyze_str};
pub use error::{ChatstatsError, Result};

/// Convenient re-exports for common usage.
///
/// ```rust
/// use chatstats::prelude::*;
/// ```
pub mod prelude {
    // Error types
    pub use crate::error::{ChatstatsError, Result};

    // Configuration
    pub use crate::config::{
        AnalyzerConfig, ClassifierConfig, ReportConfig, Roster, RosterEntry, RosterMatch,
    };

    // Analysis
    pub use crate::core::{
        Aggregator, Analysis, Counters, EmojiTally, SkipReason, WordsPerMessage, analyze_file,
        analyze_reader, analyze_str,
    };

    // Speakers
    pub use crate::speaker::{SpeakerClassifier, SpeakerKey};

    // Reports
    pub use crate::report::{
        ReportFormat, render_emoji_rankings, render_summary, render_table,
    };
    #[cfg(feature = "json-output")]
    pub use crate::report::to_json;

    // Timeline
    pub use crate::timeline::{CHART_TITLE, MonthlySeries, TimelineOutcome};
    #[cfg(feature = "csv-output")]
    pub use crate::timeline::write_timeline_csv;
    #[cfg(feature = "png-output")]
    pub use crate::timeline::write_timeline_png;
}
