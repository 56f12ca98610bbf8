//! Command-line interface definition using clap.
//!
//! This module defines:
//! - [`Args`] - CLI argument structure (for use with clap)
//! - [`OutputFormat`] - report format selectable on the command line
//!
//! [`Args`] turns into the library's plain configuration types, so the
//! binary never builds an [`AnalyzerConfig`] by hand:
//!
//! ```rust
//! use chatstats::cli::Args;
//! use clap::Parser;
//!
//! let args = Args::parse_from(["chatstats", "chat.txt", "--member", "Victor=vic"]);
//! let config = args.analyzer_config().unwrap();
//! assert!(config.classifier.is_roster());
//! ```

use std::path::PathBuf;

use clap::{ArgAction, ArgGroup, Parser, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::config::{
    AnalyzerConfig, DEFAULT_TIMELINE_PATH, DEFAULT_TOP_EMOJIS, ReportConfig, Roster, RosterEntry,
    RosterMatch,
};
use crate::error::Result;
use crate::report::ReportFormat;

/// Per-speaker message, word and emoji statistics for an exported
/// WhatsApp-style chat transcript.
#[derive(Parser, Debug, Clone)]
#[command(name = "chatstats")]
#[command(version, about, long_about = None)]
#[command(after_help = "EXAMPLES:
    chatstats chat.txt
    chatstats chat.txt --top 10 --no-timeline
    chatstats chat.txt --member Victor=vic,viktor --member Anna
    chatstats chat.txt --roster roster.json --substring
    chatstats chat.txt --timeline-csv months.csv
    chatstats chat.txt --format json > stats.json")]
#[command(group(ArgGroup::new("roster_source").args(["members", "roster"]).multiple(true)))]
pub struct Args {
    /// Path to the exported transcript
    pub input: PathBuf,

    /// Count only this participant (repeatable). Syntax: NAME or NAME=ALIAS,ALIAS
    #[arg(short, long = "member", value_name = "NAME[=ALIASES]")]
    pub members: Vec<String>,

    /// JSON file mapping canonical names to alias lists
    #[arg(long, value_name = "FILE")]
    pub roster: Option<PathBuf>,

    /// Match roster aliases anywhere inside the speaker label (needs --member or --roster)
    #[arg(long, requires = "roster_source")]
    pub substring: bool,

    /// Number of emoji listed per ranking
    #[arg(long, value_name = "N", default_value_t = DEFAULT_TOP_EMOJIS)]
    pub top: usize,

    /// Report format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Where to write the monthly timeline chart (PNG)
    #[arg(long, value_name = "PATH", default_value = DEFAULT_TIMELINE_PATH)]
    pub timeline: PathBuf,

    /// Also write the monthly counts as a `;`-delimited CSV
    #[arg(long, value_name = "PATH")]
    pub timeline_csv: Option<PathBuf>,

    /// Do not write the timeline file
    #[arg(long)]
    pub no_timeline: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Args {
    /// Builds the analyzer configuration.
    ///
    /// Any `--member` or `--roster` switches to roster mode; members from
    /// the file come first, then the command-line ones.
    pub fn analyzer_config(&self) -> Result<AnalyzerConfig> {
        let mut roster = match &self.roster {
            Some(path) => Roster::from_json_file(path)?,
            None => Roster::new(),
        };
        for member in &self.members {
            roster.push(member.parse::<RosterEntry>()?);
        }

        let config = AnalyzerConfig::new();
        if roster.is_empty() && self.roster.is_none() {
            return Ok(config);
        }

        roster.validate()?;
        let matching = if self.substring {
            RosterMatch::Substring
        } else {
            RosterMatch::Exact
        };
        Ok(config.with_roster(roster).with_roster_match(matching))
    }

    pub fn report_config(&self) -> ReportConfig {
        let mut config = ReportConfig::new()
            .with_top_emojis(self.top)
            .with_timeline_path(&self.timeline);
        if let Some(path) = &self.timeline_csv {
            config = config.with_timeline_csv(path);
        }
        if self.no_timeline {
            config.without_timeline()
        } else {
            config
        }
    }

    /// Default `tracing` filter for the chosen verbosity.
    pub fn log_filter(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "chatstats=debug",
            _ => "chatstats=trace",
        }
    }
}

/// Report formats selectable on the command line.
///
/// Mirrors [`ReportFormat`] so the library type stays free of clap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Console tables and emoji rankings (default)
    #[default]
    #[value(alias = "text")]
    Table,

    /// One JSON document on stdout
    Json,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", ReportFormat::from(*self))
    }
}

// Conversion to library format type
impl From<OutputFormat> for ReportFormat {
    fn from(format: OutputFormat) -> ReportFormat {
        match format {
            OutputFormat::Table => ReportFormat::Table,
            OutputFormat::Json => ReportFormat::Json,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ClassifierConfig;

    fn parse(args: &[&str]) -> Args {
        Args::try_parse_from(args).unwrap()
    }

    #[test]
    fn test_defaults() {
        let args = parse(&["chatstats", "chat.txt"]);
        assert_eq!(args.input, PathBuf::from("chat.txt"));
        assert_eq!(args.top, 40);
        assert_eq!(args.format, OutputFormat::Table);
        assert_eq!(args.timeline, PathBuf::from("message_timeline.png"));
        assert!(args.timeline_csv.is_none());
        assert!(!args.no_timeline);
        assert_eq!(args.log_filter(), "warn");

        let config = args.analyzer_config().unwrap();
        assert_eq!(config.classifier, ClassifierConfig::OpenSet);
    }

    #[test]
    fn test_input_is_required() {
        assert!(Args::try_parse_from(["chatstats"]).is_err());
    }

    #[test]
    fn test_members_select_roster() {
        let args = parse(&[
            "chatstats",
            "chat.txt",
            "--member",
            "Victor=vic,viktor",
            "-m",
            "Anna",
        ]);
        let config = args.analyzer_config().unwrap();

        match config.classifier {
            ClassifierConfig::Roster { roster, matching } => {
                assert_eq!(matching, RosterMatch::Exact);
                assert_eq!(roster.len(), 2);
                assert_eq!(roster.entries()[0].name, "Victor");
                assert_eq!(roster.entries()[0].aliases, vec!["vic", "viktor"]);
                assert_eq!(roster.entries()[1].name, "Anna");
            }
            ClassifierConfig::OpenSet => panic!("expected roster mode"),
        }
    }

    #[test]
    fn test_substring_flag() {
        let args = parse(&["chatstats", "chat.txt", "-m", "Victor", "--substring"]);
        let config = args.analyzer_config().unwrap();
        assert!(matches!(
            config.classifier,
            ClassifierConfig::Roster {
                matching: RosterMatch::Substring,
                ..
            }
        ));
    }

    #[test]
    fn test_substring_requires_roster_source() {
        assert!(Args::try_parse_from(["chatstats", "chat.txt", "--substring"]).is_err());
        assert!(
            Args::try_parse_from(["chatstats", "chat.txt", "--roster", "r.json", "--substring"])
                .is_ok()
        );
    }

    #[test]
    fn test_blank_member_rejected() {
        let args = parse(&["chatstats", "chat.txt", "--member", "=vic"]);
        let err = args.analyzer_config().unwrap_err();
        assert!(err.is_invalid_roster());
    }

    #[test]
    fn test_roster_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("roster.json");
        std::fs::write(&path, r#"{"Victor": ["vic"], "Anna": []}"#).unwrap();

        let args = parse(&[
            "chatstats",
            "chat.txt",
            "--roster",
            path.to_str().unwrap(),
            "--member",
            "Bob",
        ]);
        let config = args.analyzer_config().unwrap();
        match config.classifier {
            ClassifierConfig::Roster { roster, .. } => {
                let names: Vec<&str> = roster.entries().iter().map(|e| e.name.as_str()).collect();
                assert_eq!(names, vec!["Anna", "Victor", "Bob"]);
            }
            ClassifierConfig::OpenSet => panic!("expected roster mode"),
        }
    }

    #[test]
    fn test_missing_roster_file() {
        let args = parse(&["chatstats", "chat.txt", "--roster", "/no/such/roster.json"]);
        let err = args.analyzer_config().unwrap_err();
        assert!(err.is_io());
    }

    #[test]
    fn test_report_config() {
        let args = parse(&[
            "chatstats",
            "chat.txt",
            "--top",
            "5",
            "--timeline",
            "out.png",
            "--timeline-csv",
            "out.csv",
            "--no-timeline",
        ]);
        let config = args.report_config();
        assert_eq!(config.top_emojis, 5);
        assert_eq!(config.timeline_path, PathBuf::from("out.png"));
        assert_eq!(config.timeline_csv, Some(PathBuf::from("out.csv")));
        assert!(!config.write_timeline);
    }

    #[test]
    fn test_verbosity() {
        assert_eq!(parse(&["chatstats", "c.txt", "-v"]).log_filter(), "chatstats=debug");
        assert_eq!(parse(&["chatstats", "c.txt", "-vvv"]).log_filter(), "chatstats=trace");
    }

    #[test]
    fn test_format_values() {
        assert_eq!(parse(&["chatstats", "c.txt", "-f", "json"]).format, OutputFormat::Json);
        assert_eq!(parse(&["chatstats", "c.txt", "--format", "text"]).format, OutputFormat::Table);
        assert!(Args::try_parse_from(["chatstats", "c.txt", "--format", "xml"]).is_err());
    }

    #[test]
    fn test_format_conversion() {
        assert_eq!(ReportFormat::from(OutputFormat::Json), ReportFormat::Json);
        assert_eq!(OutputFormat::Json.to_string(), "JSON");
        assert_eq!(serde_json::to_string(&OutputFormat::Table).unwrap(), "\"table\"");
    }
}
