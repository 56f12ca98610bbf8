//! Fixed-width console report.

use std::fmt::Write as _;

use crate::core::{Analysis, Counters, EmojiTally, WordsPerMessage};

const METRIC_WIDTH: usize = 20;
const MIN_COLUMN_WIDTH: usize = 8;
const RULE_WIDTH: usize = 60;

/// Renders the statistics table: one column per speaker plus a total column.
///
/// ```text
/// CHAT STATISTICS
/// ==================================================
/// | METRIC               | ALICE    | BOB      | TOTAL    |
/// |----------------------|----------|----------|----------|
/// | Total Messages       |        2 |        1 |        3 |
/// ```
pub fn render_table(counters: &Counters, wpm: &WordsPerMessage) -> String {
    let speakers: Vec<_> = counters.speakers().collect();
    let labels: Vec<String> = speakers.iter().map(|s| s.as_str().to_uppercase()).collect();
    let widths: Vec<usize> = labels
        .iter()
        .map(|l| l.chars().count().max(MIN_COLUMN_WIDTH))
        .collect();

    let mut header = format!("| {:<METRIC_WIDTH$} |", "METRIC");
    let mut separator = format!("|{}|", "-".repeat(METRIC_WIDTH + 2));
    for (label, &w) in labels.iter().zip(&widths) {
        let _ = write!(header, " {label:<w$} |");
        let _ = write!(separator, "{}|", "-".repeat(w + 2));
    }
    let _ = write!(header, " {:<MIN_COLUMN_WIDTH$} |", "TOTAL");
    let _ = write!(separator, "{}|", "-".repeat(MIN_COLUMN_WIDTH + 2));

    let row = |name: &str, cells: Vec<String>, total: String| {
        let mut line = format!("| {name:<METRIC_WIDTH$} |");
        for (cell, &w) in cells.iter().zip(&widths) {
            let _ = write!(line, " {cell:>w$} |");
        }
        let _ = write!(line, " {total:>MIN_COLUMN_WIDTH$} |");
        line
    };

    let messages = row(
        "Total Messages",
        speakers
            .iter()
            .map(|s| counters.message_count(s).to_string())
            .collect(),
        counters.total_messages().to_string(),
    );
    let words = row(
        "Total Words",
        speakers
            .iter()
            .map(|s| counters.word_count(s).to_string())
            .collect(),
        counters.total_words().to_string(),
    );
    let ratio = row(
        "Words/Message",
        speakers
            .iter()
            .map(|s| format!("{:.2}", wpm.for_speaker(s)))
            .collect(),
        format!("{:.2}", wpm.total()),
    );

    let mut out = String::new();
    let _ = writeln!(out, "CHAT STATISTICS");
    let _ = writeln!(out, "{}", "=".repeat(header.chars().count()));
    let _ = writeln!(out, "{header}");
    let _ = writeln!(out, "{separator}");
    let _ = writeln!(out, "{messages}");
    let _ = writeln!(out, "{words}");
    let _ = writeln!(out, "{ratio}");
    out
}

/// Renders one ranked emoji list.
pub fn render_emoji_ranking(title: &str, tally: &EmojiTally, top_n: usize) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{title}");
    let _ = writeln!(out, "{}", "-".repeat(RULE_WIDTH));

    let ranked = tally.ranked(top_n);
    if ranked.is_empty() {
        let _ = writeln!(out, "(no emoji)");
    }
    for (rank, entry) in ranked.iter().enumerate() {
        let _ = writeln!(
            out,
            "{:>2}. {} - {:>6} times (in {} messages)",
            rank + 1,
            entry.emoji,
            entry.total,
            entry.messages
        );
    }
    out
}

/// Renders the overall ranking followed by one ranking per speaker.
pub fn render_emoji_rankings(counters: &Counters, top_n: usize) -> String {
    let mut sections = vec![render_emoji_ranking(
        "TOP EMOJIS (ALL)",
        counters.all_emojis(),
        top_n,
    )];

    for speaker in counters.speakers() {
        if let Some(tally) = counters.emoji_stats(speaker) {
            let title = format!("TOP EMOJIS ({})", speaker.as_str().to_uppercase());
            sections.push(render_emoji_ranking(&title, tally, top_n));
        }
    }

    sections.join("\n")
}

/// Renders processed counts, date range, speaker distribution and skipped
/// lines.
pub fn render_summary(analysis: &Analysis) -> String {
    let counters = &analysis.counters;
    let mut out = String::new();
    let _ = writeln!(out, "SUMMARY");

    match counters.date_range() {
        Some((first, last)) => {
            let _ = writeln!(out, "Processed {} messages", counters.total_messages());
            let _ = writeln!(
                out,
                "Date range: {} to {}",
                first.format("%Y-%m-%d"),
                last.format("%Y-%m-%d")
            );
        }
        None => {
            let _ = writeln!(out, "No valid messages found");
        }
    }

    let _ = writeln!(out, "Speaker distribution:");
    for speaker in counters.speakers() {
        let _ = writeln!(out, "- {}: {} messages", speaker, counters.message_count(speaker));
    }

    let skipped = &analysis.skipped;
    let _ = writeln!(
        out,
        "Lines read: {} ({} skipped)",
        skipped.lines(),
        skipped.total_skipped()
    );
    for (reason, count) in skipped.iter() {
        let _ = writeln!(out, "- {reason}: {count}");
    }
    out
}
