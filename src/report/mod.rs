//! Presentation of finished counters.
//!
//! - [`table`] - fixed-width statistics table, emoji rankings, run summary
//! - [`json`] - the same data as a JSON document (feature `json-output`)
//!
//! Nothing here mutates or re-derives counts; it only formats what
//! [`Counters`](crate::core::Counters) already holds.

pub mod table;

#[cfg(feature = "json-output")]
pub mod json;

pub use table::{render_emoji_ranking, render_emoji_rankings, render_summary, render_table};

#[cfg(feature = "json-output")]
pub use json::{StatsReport, to_json};

use serde::{Deserialize, Serialize};

/// Report output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    /// Console tables (default)
    #[default]
    Table,
    /// Pretty-printed JSON document
    Json,
}

impl ReportFormat {
    /// Returns all supported format names.
    pub fn all_names() -> &'static [&'static str] {
        &["table", "json"]
    }
}

impl std::fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReportFormat::Table => write!(f, "Table"),
            ReportFormat::Json => write!(f, "JSON"),
        }
    }
}

impl std::str::FromStr for ReportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" | "text" => Ok(ReportFormat::Table),
            "json" => Ok(ReportFormat::Json),
            _ => Err(format!(
                "Unknown format: '{}'. Expected one of: {}",
                s,
                ReportFormat::all_names().join(", ")
            )),
        }
    }
}
