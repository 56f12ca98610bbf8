//! Configuration types for analysis and reporting.
//!
//! This module provides plain configuration structs for library usage,
//! without any CLI framework dependencies.
//!
//! - [`AnalyzerConfig`] - how transcript lines are turned into counters
//! - [`ClassifierConfig`] - open-set or roster speaker classification
//! - [`Roster`] / [`RosterEntry`] - known participants and their aliases
//! - [`ReportConfig`] - emoji ranking depth and timeline output
//!
//! # Example
//!
//! ```rust
//! use chatstats::config::{AnalyzerConfig, Roster, RosterEntry, RosterMatch};
//!
//! let roster = Roster::new()
//!     .with_entry(RosterEntry::new("Victor").with_alias("vic").with_alias("viktor"))
//!     .with_entry(RosterEntry::new("Anna"));
//!
//! let config = AnalyzerConfig::new()
//!     .with_roster(roster)
//!     .with_roster_match(RosterMatch::Exact);
//! assert!(config.classifier.is_roster());
//! ```

use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ChatstatsError, Result};

/// Default number of emoji listed per ranking.
pub const DEFAULT_TOP_EMOJIS: usize = 40;

/// Default output file for the monthly timeline.
pub const DEFAULT_TIMELINE_PATH: &str = "message_timeline.png";

/// How a roster alias is compared with a speaker label.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RosterMatch {
    /// The whole normalized label must equal an alias, ignoring case.
    #[default]
    Exact,
    /// The label must contain an alias anywhere, ignoring case.
    ///
    /// Prone to false positives: `Victoria` matches the alias `victor`.
    Substring,
}

/// One known participant: a canonical name plus alternative spellings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterEntry {
    /// Canonical name used as the speaker key.
    pub name: String,

    /// Alternative labels for the same person.
    #[serde(default)]
    pub aliases: Vec<String>,
}

impl RosterEntry {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            aliases: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.aliases.push(alias.into());
        self
    }

    /// The canonical name followed by every alias.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.name.as_str()).chain(self.aliases.iter().map(String::as_str))
    }
}

/// Parses the CLI member syntax: `NAME` or `NAME=ALIAS,ALIAS`.
impl FromStr for RosterEntry {
    type Err = ChatstatsError;

    fn from_str(s: &str) -> Result<Self> {
        let (name, aliases) = match s.split_once('=') {
            Some((name, aliases)) => (name, aliases),
            None => (s, ""),
        };

        let name = name.trim();
        if name.is_empty() {
            return Err(ChatstatsError::invalid_roster(format!(
                "member '{s}' has an empty name"
            )));
        }

        let aliases = aliases
            .split(',')
            .map(str::trim)
            .filter(|a| !a.is_empty())
            .map(String::from)
            .collect();

        Ok(Self {
            name: name.to_string(),
            aliases,
        })
    }
}

/// Fixed list of known participants, checked in order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Roster {
    entries: Vec<RosterEntry>,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_entry(mut self, entry: RosterEntry) -> Self {
        self.entries.push(entry);
        self
    }

    pub fn push(&mut self, entry: RosterEntry) {
        self.entries.push(entry);
    }

    pub fn entries(&self) -> &[RosterEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Parses a roster file body: a JSON object mapping canonical names to
    /// alias arrays. Entries are ordered by name.
    ///
    /// ```rust
    /// use chatstats::config::Roster;
    ///
    /// let roster = Roster::from_json_str(r#"{"Victor": ["vic"], "Anna": []}"#)?;
    /// assert_eq!(roster.len(), 2);
    /// assert_eq!(roster.entries()[0].name, "Anna");
    /// # Ok::<(), chatstats::ChatstatsError>(())
    /// ```
    #[cfg(feature = "json-output")]
    pub fn from_json_str(json: &str) -> Result<Self> {
        use std::collections::BTreeMap;

        let map: BTreeMap<String, Vec<String>> = serde_json::from_str(json)
            .map_err(|e| ChatstatsError::invalid_roster(format!("expected {{name: [aliases]}}: {e}")))?;

        let roster = Self {
            entries: map
                .into_iter()
                .map(|(name, aliases)| RosterEntry { name, aliases })
                .collect(),
        };
        roster.validate()?;
        Ok(roster)
    }

    /// Reads a roster file (see [`from_json_str`](Self::from_json_str)).
    #[cfg(feature = "json-output")]
    pub fn from_json_file(path: &std::path::Path) -> Result<Self> {
        let content =
            std::fs::read_to_string(path).map_err(|e| ChatstatsError::file_access(path, e))?;
        Self::from_json_str(&content)
    }

    /// Checks that the roster is non-empty and every name is non-blank.
    pub fn validate(&self) -> Result<()> {
        if self.entries.is_empty() {
            return Err(ChatstatsError::invalid_roster("roster has no members"));
        }
        if let Some(entry) = self
            .entries
            .iter()
            .find(|e| crate::speaker::normalize_label(&e.name).is_empty())
        {
            return Err(ChatstatsError::invalid_roster(format!(
                "member with aliases {:?} has an empty name",
                entry.aliases
            )));
        }
        Ok(())
    }
}

impl FromIterator<RosterEntry> for Roster {
    fn from_iter<I: IntoIterator<Item = RosterEntry>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

/// Speaker classification strategy.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum ClassifierConfig {
    /// Every non-system speaker becomes a key (title-cased label).
    #[default]
    OpenSet,

    /// Only roster members are counted; other speakers are dropped.
    Roster {
        roster: Roster,
        #[serde(default)]
        matching: RosterMatch,
    },
}

impl ClassifierConfig {
    pub fn is_roster(&self) -> bool {
        matches!(self, ClassifierConfig::Roster { .. })
    }
}

/// Configuration for turning transcript lines into counters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyzerConfig {
    /// Speaker classification strategy (default: open-set)
    #[serde(default)]
    pub classifier: ClassifierConfig,
}

impl AnalyzerConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Switches to roster classification, keeping any previous match mode.
    #[must_use]
    pub fn with_roster(mut self, roster: Roster) -> Self {
        let matching = match self.classifier {
            ClassifierConfig::Roster { matching, .. } => matching,
            ClassifierConfig::OpenSet => RosterMatch::default(),
        };
        self.classifier = ClassifierConfig::Roster { roster, matching };
        self
    }

    /// Sets the roster match mode. Has no effect in open-set mode.
    #[must_use]
    pub fn with_roster_match(mut self, mode: RosterMatch) -> Self {
        if let ClassifierConfig::Roster { matching, .. } = &mut self.classifier {
            *matching = mode;
        }
        self
    }
}

/// Configuration for the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Emoji listed per ranking (default: 40)
    pub top_emojis: usize,

    /// Where the monthly timeline chart is written (default: `message_timeline.png`)
    pub timeline_path: PathBuf,

    /// Optional CSV copy of the monthly counts
    #[serde(default)]
    pub timeline_csv: Option<PathBuf>,

    /// Write the timeline at all (default: true)
    pub write_timeline: bool,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            top_emojis: DEFAULT_TOP_EMOJIS,
            timeline_path: PathBuf::from(DEFAULT_TIMELINE_PATH),
            timeline_csv: None,
            write_timeline: true,
        }
    }
}

impl ReportConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_top_emojis(mut self, n: usize) -> Self {
        self.top_emojis = n;
        self
    }

    #[must_use]
    pub fn with_timeline_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.timeline_path = path.into();
        self
    }

    #[must_use]
    pub fn with_timeline_csv(mut self, path: impl Into<PathBuf>) -> Self {
        self.timeline_csv = Some(path.into());
        self
    }

    #[must_use]
    pub fn without_timeline(mut self) -> Self {
        self.write_timeline = false;
        self
    }
}
