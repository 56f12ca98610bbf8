//! Benchmarks for chatstats analysis and reporting.
//!
//! Run with: `cargo bench`
//! Run specific group: `cargo bench --bench analysis -- transcript`

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

use chatstats::config::{AnalyzerConfig, Roster, RosterEntry};
use chatstats::core::{WordsPerMessage, analyze_str};
use chatstats::parsing::{LineMatcher, count_words, normalize_emojis};
use chatstats::report::{render_emoji_rankings, render_table};
use chatstats::timeline::MonthlySeries;

// =============================================================================
// Test Data Generators
// =============================================================================

const BODIES: &[&str] = &[
    "Message number {} with some text",
    "haha 😂😂 that's great 👍🏽",
    "see you tomorrow 🤷‍♀️",
    "<Media omitted>",
    "ok",
];

fn generate_transcript(count: usize) -> String {
    let mut lines = Vec::with_capacity(count);
    for i in 0..count {
        let sender = match i % 3 {
            0 => "Alice",
            1 => "bob",
            _ => "vic",
        };
        let day = (i / 100) % 28 + 1;
        let month = (i / 2800) % 12 + 1;
        let body = BODIES[i % BODIES.len()].replace("{}", &i.to_string());
        lines.push(format!(
            "{}/{}/2023, {}:{:02} AM - {}: {}",
            day,
            month,
            (i % 12) + 1,
            i % 60,
            sender,
            body
        ));
        if i % 50 == 0 {
            lines.push("continuation line".to_string());
        }
    }
    lines.join("\n")
}

// =============================================================================
// Parsing Benchmarks
// =============================================================================

fn bench_line_matching(c: &mut Criterion) {
    let matcher = LineMatcher::new();
    let header = "12/05/2023, 9:41 AM - Alice: Hello there 😀😀 friend";
    let noise = "just a continuation line without a header";

    c.bench_function("line_match_header", |b| {
        b.iter(|| black_box(matcher.captures(black_box(header))));
    });
    c.bench_function("line_match_noise", |b| {
        b.iter(|| black_box(matcher.captures(black_box(noise))));
    });
}

fn bench_emoji(c: &mut Criterion) {
    let text = "haha 😂😂 that's great 👍🏽 see you 🤷‍♀️ 🇰🇿 ❤️ ok ".repeat(10);

    c.bench_function("normalize_emojis", |b| {
        b.iter(|| black_box(normalize_emojis(black_box(&text))));
    });
    c.bench_function("count_words", |b| {
        b.iter(|| black_box(count_words(black_box(&text))));
    });
}

// =============================================================================
// Analysis Benchmarks
// =============================================================================

fn bench_transcript(c: &mut Criterion) {
    let mut group = c.benchmark_group("transcript");
    let open_set = AnalyzerConfig::default();
    let roster = AnalyzerConfig::new().with_roster(
        Roster::new()
            .with_entry(RosterEntry::new("Victor").with_alias("vic"))
            .with_entry(RosterEntry::new("Alice")),
    );

    for size in [100_usize, 1_000, 10_000, 50_000] {
        let txt = generate_transcript(size);
        group.throughput(Throughput::Elements(size as u64));

        group.bench_with_input(BenchmarkId::new("open_set", size), &txt, |b, txt| {
            b.iter(|| black_box(analyze_str(black_box(txt), &open_set).unwrap()));
        });
        group.bench_with_input(BenchmarkId::new("roster", size), &txt, |b, txt| {
            b.iter(|| black_box(analyze_str(black_box(txt), &roster).unwrap()));
        });
    }
    group.finish();
}

// =============================================================================
// Reporting Benchmarks
// =============================================================================

fn bench_reports(c: &mut Criterion) {
    let analysis = analyze_str(&generate_transcript(10_000), &AnalyzerConfig::default()).unwrap();
    let counters = &analysis.counters;

    c.bench_function("render_table", |b| {
        b.iter(|| {
            let wpm = WordsPerMessage::from_counters(black_box(counters));
            black_box(render_table(counters, &wpm))
        });
    });
    c.bench_function("render_emoji_rankings", |b| {
        b.iter(|| black_box(render_emoji_rankings(black_box(counters), 40)));
    });
    c.bench_function("monthly_series", |b| {
        b.iter(|| black_box(MonthlySeries::from_counters(black_box(counters))));
    });
}

criterion_group!(
    benches,
    bench_line_matching,
    bench_emoji,
    bench_transcript,
    bench_reports
);
criterion_main!(benches);
