//! Monthly message volume.
//!
//! The date series is resampled into calendar months: one bucket per month
//! from the first message to the last, empty months included as zero.
//!
//! Two artifacts can be produced from the buckets:
//!
//! - [`write_timeline_png`] (feature `png-output`): a line chart, total plus
//!   one line per speaker, titled [`CHART_TITLE`]
//! - [`write_timeline_csv`] (feature `csv-output`): the same numbers as a
//!   `;`-delimited table
//!
//! ```text
//! Month;Total;Alice;Bob
//! 2023-05;3;2;1
//! 2023-06;0;0;0
//! 2023-07;1;1;0
//! ```

use std::collections::BTreeMap;
use std::path::PathBuf;

use chrono::{Datelike, NaiveDate, NaiveDateTime};

use crate::core::Counters;
use crate::speaker::SpeakerKey;

/// Message counts per calendar month, overall and per speaker.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MonthlySeries {
    months: Vec<NaiveDate>,
    total: Vec<usize>,
    per_speaker: BTreeMap<SpeakerKey, Vec<usize>>,
}

impl MonthlySeries {
    pub fn from_dates(dates: &[(SpeakerKey, NaiveDateTime)]) -> Self {
        let Some(first) = dates.iter().map(|(_, ts)| month_index(ts)).min() else {
            return Self::default();
        };
        let last = dates
            .iter()
            .map(|(_, ts)| month_index(ts))
            .max()
            .unwrap_or(first);

        let len = usize::try_from(last - first + 1).unwrap_or(0);
        let months = (first..=last).filter_map(month_start).collect();

        let mut total = vec![0; len];
        let mut per_speaker: BTreeMap<SpeakerKey, Vec<usize>> = BTreeMap::new();
        for (speaker, ts) in dates {
            let Ok(bucket) = usize::try_from(month_index(ts) - first) else {
                continue;
            };
            total[bucket] += 1;
            per_speaker
                .entry(speaker.clone())
                .or_insert_with(|| vec![0; len])[bucket] += 1;
        }

        Self {
            months,
            total,
            per_speaker,
        }
    }

    pub fn from_counters(counters: &Counters) -> Self {
        Self::from_dates(counters.date_series())
    }

    /// First day of each bucket's month.
    pub fn months(&self) -> &[NaiveDate] {
        &self.months
    }

    pub fn total(&self) -> &[usize] {
        &self.total
    }

    pub fn speaker(&self, speaker: &SpeakerKey) -> Option<&[usize]> {
        self.per_speaker.get(speaker).map(Vec::as_slice)
    }

    pub fn speakers(&self) -> impl Iterator<Item = &SpeakerKey> {
        self.per_speaker.keys()
    }

    pub fn is_empty(&self) -> bool {
        self.months.is_empty()
    }

    pub fn len(&self) -> usize {
        self.months.len()
    }
}

fn month_index(ts: &NaiveDateTime) -> i32 {
    ts.year() * 12 + ts.month0() as i32
}

fn month_start(index: i32) -> Option<NaiveDate> {
    let month0 = u32::try_from(index.rem_euclid(12)).ok()?;
    NaiveDate::from_ymd_opt(index.div_euclid(12), month0 + 1, 1)
}

/// Caption of the timeline chart.
pub const CHART_TITLE: &str = "Message Frequency Over Time";

/// What happened to the timeline artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimelineOutcome {
    /// Written to this path with this many monthly rows.
    Written { path: PathBuf, months: usize },
    /// No dated messages, so nothing was written.
    Skipped,
}

/// Writes the monthly series as CSV to `path`.
///
/// # Format
/// - Delimiter: `;`
/// - Columns: `Month` (`YYYY-MM`), `Total`, one column per speaker
/// - Encoding: UTF-8
#[cfg(feature = "csv-output")]
pub fn write_timeline_csv(
    counters: &Counters,
    path: &std::path::Path,
) -> crate::Result<TimelineOutcome> {
    let series = MonthlySeries::from_counters(counters);
    if series.is_empty() {
        tracing::info!("timeline_skipped_no_dates");
        return Ok(TimelineOutcome::Skipped);
    }

    let file =
        std::fs::File::create(path).map_err(|e| crate::ChatstatsError::file_access(path, e))?;
    let mut writer = csv::WriterBuilder::new().delimiter(b';').from_writer(file);

    let mut header = vec!["Month".to_string(), "Total".to_string()];
    header.extend(series.speakers().map(ToString::to_string));
    writer.write_record(&header)?;

    for (i, month) in series.months().iter().enumerate() {
        let mut record = vec![month.format("%Y-%m").to_string(), series.total()[i].to_string()];
        record.extend(
            series
                .per_speaker
                .values()
                .map(|counts| counts[i].to_string()),
        );
        writer.write_record(&record)?;
    }

    writer.flush()?;
    tracing::info!(path = %path.display(), months = series.len(), "timeline_written");

    Ok(TimelineOutcome::Written {
        path: path.to_path_buf(),
        months: series.len(),
    })
}

/// Renders the monthly series as a PNG line chart at `path`.
///
/// The total is drawn as a thick dark line, each speaker as a thinner line
/// from the palette. With `png-labels` the chart also carries the
/// [`CHART_TITLE`] caption, month ticks and a legend; if no font can be
/// loaded the chart is redrawn without text.
#[cfg(feature = "png-output")]
pub fn write_timeline_png(
    counters: &Counters,
    path: &std::path::Path,
) -> crate::Result<TimelineOutcome> {
    let series = MonthlySeries::from_counters(counters);
    if series.is_empty() {
        tracing::info!("timeline_skipped_no_dates");
        return Ok(TimelineOutcome::Skipped);
    }

    let labels = cfg!(feature = "png-labels");
    if let Err(message) = chart::draw(&series, path, labels) {
        if !labels {
            return Err(crate::ChatstatsError::chart(path, message));
        }
        tracing::warn!(error = %message, "chart_text_unavailable");
        chart::draw(&series, path, false).map_err(|m| crate::ChatstatsError::chart(path, m))?;
    }

    tracing::info!(path = %path.display(), months = series.len(), "timeline_written");
    Ok(TimelineOutcome::Written {
        path: path.to_path_buf(),
        months: series.len(),
    })
}

#[cfg(feature = "png-output")]
mod chart {
    use std::path::Path;

    use plotters::coord::Shift;
    use plotters::prelude::*;

    use super::{CHART_TITLE, MonthlySeries};

    const SIZE: (u32, u32) = (1200, 600);
    const TOTAL_COLOR: RGBColor = RGBColor(0x2c, 0x3e, 0x50);

    pub(super) fn draw(series: &MonthlySeries, path: &Path, labels: bool) -> Result<(), String> {
        let root = BitMapBackend::new(path, SIZE).into_drawing_area();
        plot(&root, series, labels)
            .and_then(|()| root.present())
            .map_err(|e| e.to_string())
    }

    fn plot<DB: DrawingBackend>(
        root: &DrawingArea<DB, Shift>,
        series: &MonthlySeries,
        labels: bool,
    ) -> Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
        root.fill(&WHITE)?;

        let months = series.len();
        let peak = series.total().iter().copied().max().unwrap_or(0);

        let mut builder = ChartBuilder::on(root);
        builder.margin(20);
        if labels {
            builder
                .caption(CHART_TITLE, ("sans-serif", 28))
                .x_label_area_size(40)
                .y_label_area_size(50);
        }
        let mut chart = builder.build_cartesian_2d(0..months, 0..peak + 1)?;

        if labels {
            let axis = series.months();
            chart
                .configure_mesh()
                .x_labels(months.min(12))
                .x_label_formatter(&|i: &usize| {
                    axis.get(*i)
                        .map(|m| m.format("%Y-%m").to_string())
                        .unwrap_or_default()
                })
                .x_desc("Month")
                .y_desc("Messages")
                .draw()?;
        }

        for (i, (speaker, counts)) in series.per_speaker.iter().enumerate() {
            let color = Palette99::pick(i).to_rgba();
            chart
                .draw_series(LineSeries::new(
                    counts.iter().copied().enumerate(),
                    color.stroke_width(1),
                ))?
                .label(speaker.as_str())
                .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color));
        }

        chart
            .draw_series(LineSeries::new(
                series.total().iter().copied().enumerate(),
                TOTAL_COLOR.stroke_width(3),
            ))?
            .label("Total Messages")
            .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], TOTAL_COLOR.stroke_width(3)));

        if labels {
            chart
                .configure_series_labels()
                .background_style(WHITE.mix(0.8))
                .border_style(BLACK)
                .draw()?;
        }

        Ok(())
    }
}
