use std::fs::File;
use std::io::{self, BufWriter};
use std::path::Path;

use anyhow::{Context, Result, bail};
use serde::Serialize;

use crate::dashboard::{ChartData, View};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Export rows: the column names match the source table's
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct DurationRow<'a> {
    track_genre: &'a str,
    duration_min: f64,
    tracks: usize,
}

#[derive(Serialize)]
struct PopularityRow<'a> {
    track_genre: &'a str,
    popularity: f64,
    tracks: usize,
}

#[derive(Serialize)]
struct BinRow {
    bin_start: f64,
    bin_end: f64,
    count: usize,
}

#[derive(Serialize)]
struct BoxRow {
    explicit_label: &'static str,
    count: usize,
    min: f64,
    q1: f64,
    median: f64,
    q3: f64,
    max: f64,
    lower_whisker: f64,
    upper_whisker: f64,
    outliers: usize,
}

const DURATION_HEADER: [&str; 3] = ["track_genre", "duration_min", "tracks"];
const POPULARITY_HEADER: [&str; 3] = ["track_genre", "popularity", "tracks"];
const BIN_HEADER: [&str; 3] = ["bin_start", "bin_end", "count"];
const BOX_HEADER: [&str; 10] = [
    "explicit_label",
    "count",
    "min",
    "q1",
    "median",
    "q3",
    "max",
    "lower_whisker",
    "upper_whisker",
    "outliers",
];

fn ensure_exportable(chart: &ChartData) -> Result<()> {
    if matches!(chart, ChartData::NoData | ChartData::EmptyView) {
        bail!("nothing to export for this view");
    }
    Ok(())
}

/// Write the aggregate rows behind a view as CSV. The header row is written
/// even when the aggregate has no rows.
pub fn write_csv<W: io::Write>(chart: &ChartData, writer: W) -> Result<()> {
    ensure_exportable(chart)?;
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    match chart {
        ChartData::NoData | ChartData::EmptyView => {}
        ChartData::DurationByGenre(rows) => {
            wtr.write_record(DURATION_HEADER)?;
            for r in rows {
                wtr.serialize(DurationRow {
                    track_genre: &r.genre,
                    duration_min: r.mean,
                    tracks: r.tracks,
                })?;
            }
        }
        ChartData::PopularityByGenre(rows) => {
            wtr.write_record(POPULARITY_HEADER)?;
            for r in rows {
                wtr.serialize(PopularityRow {
                    track_genre: &r.genre,
                    popularity: r.mean,
                    tracks: r.tracks,
                })?;
            }
        }
        ChartData::DurationDistribution(hist) => {
            wtr.write_record(BIN_HEADER)?;
            for b in &hist.bins {
                wtr.serialize(BinRow {
                    bin_start: b.start,
                    bin_end: b.end,
                    count: b.count,
                })?;
            }
        }
        ChartData::ExplicitImpact(groups) => {
            wtr.write_record(BOX_HEADER)?;
            for g in groups {
                wtr.serialize(BoxRow {
                    explicit_label: g.group.label(),
                    count: g.count,
                    min: g.min,
                    q1: g.q1,
                    median: g.median,
                    q3: g.q3,
                    max: g.max,
                    lower_whisker: g.lower_whisker,
                    upper_whisker: g.upper_whisker,
                    outliers: g.outliers.len(),
                })?;
            }
        }
    }
    wtr.flush().context("flushing CSV output")?;
    Ok(())
}

/// Write a view to `path`, as JSON when the extension says so, CSV otherwise.
pub fn export_to_path(chart: &ChartData, path: &Path) -> Result<()> {
    ensure_exportable(chart)?;
    let is_json = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("json"));

    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    if is_json {
        serde_json::to_writer_pretty(BufWriter::new(file), chart).context("writing JSON")?;
    } else {
        write_csv(chart, BufWriter::new(file))?;
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn save_file_dialog(state: &mut AppState, view: View, chart: &ChartData) {
    let file = rfd::FileDialog::new()
        .set_title("Exportar vista")
        .set_file_name(format!("{}.csv", view.slug()))
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .save_file();

    if let Some(path) = file {
        match export_to_path(chart, &path) {
            Ok(()) => {
                log::info!("Exported {} to {}", view.slug(), path.display());
                state.status_message = None;
            }
            Err(e) => {
                log::error!("Failed to export view: {e:#}");
                state.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }
}
