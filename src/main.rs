//! # chatstats CLI
//!
//! Command-line interface for the chatstats library.

use std::process;

use clap::Parser as ClapParser;
use tracing_subscriber::EnvFilter;

use chatstats::cli::Args;
use chatstats::core::{WordsPerMessage, analyze_file};
use chatstats::report::{
    ReportFormat, render_emoji_rankings, render_summary, render_table, to_json,
};
use chatstats::timeline::{TimelineOutcome, write_timeline_csv, write_timeline_png};
use chatstats::ChatstatsError;

fn main() {
    let args = <Args as ClapParser>::parse();
    init_tracing(&args);

    if let Err(e) = run(&args) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn init_tracing(args: &Args) {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| args.log_filter().into()),
        )
        .init();
}

fn run(args: &Args) -> Result<(), ChatstatsError> {
    let analyzer_config = args.analyzer_config()?;
    let report_config = args.report_config();

    tracing::debug!(
        input = %args.input.display(),
        roster = analyzer_config.classifier.is_roster(),
        "run_started"
    );

    let analysis = analyze_file(&args.input, &analyzer_config)?;

    let format: ReportFormat = args.format.into();
    match format {
        ReportFormat::Table => {
            let wpm = WordsPerMessage::from_counters(&analysis.counters);
            println!("{}", render_table(&analysis.counters, &wpm));
            println!(
                "{}",
                render_emoji_rankings(&analysis.counters, report_config.top_emojis)
            );
            println!("{}", render_summary(&analysis));
        }
        ReportFormat::Json => {
            println!("{}", to_json(&analysis, report_config.top_emojis)?);
        }
    }

    if !report_config.write_timeline {
        return Ok(());
    }

    let mut status = vec![timeline_status(write_timeline_png(
        &analysis.counters,
        &report_config.timeline_path,
    )?)];
    if let Some(csv_path) = &report_config.timeline_csv {
        if let TimelineOutcome::Written { path, months } =
            write_timeline_csv(&analysis.counters, csv_path)?
        {
            status.push(format!("Timeline data saved as {} ({} months)", path.display(), months));
        }
    }

    // Keep stdout a single JSON document.
    for line in status {
        match format {
            ReportFormat::Json => eprintln!("{}", line),
            ReportFormat::Table => println!("{}", line),
        }
    }

    Ok(())
}

fn timeline_status(outcome: TimelineOutcome) -> String {
    match outcome {
        TimelineOutcome::Written { path, months } => {
            format!("Timeline saved as {} ({} months)", path.display(), months)
        }
        TimelineOutcome::Skipped => "No date data available for plotting".to_string(),
    }
}
