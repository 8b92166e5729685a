use std::cmp::Ordering;
use std::collections::{BTreeMap, HashSet};

use serde::Serialize;
use thiserror::Error;

use super::model::Track;

/// Genres shown in the popularity-by-subgenre view.
pub const TOP_POPULARITY_GENRES: usize = 10;
/// Bin count of the duration histogram.
pub const HISTOGRAM_BINS: usize = 30;
/// Tracks longer than this many minutes are left out of the histogram.
pub const HISTOGRAM_MAX_MINUTES: f64 = 15.0;
/// Whisker reach, in interquartile ranges, before a point is an outlier.
pub const OUTLIER_IQR_FACTOR: f64 = 1.5;

// ---------------------------------------------------------------------------
// Group-by means (duration and popularity by subgenre)
// ---------------------------------------------------------------------------

/// One row of a group-by-genre summary.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenreMean {
    pub genre: String,
    pub mean: f64,
    /// Tracks in the group.
    pub tracks: usize,
}

/// Mean `duration_min` per genre, longest first, truncated to `top_n` rows.
pub fn mean_duration_by_genre(tracks: &[&Track], top_n: usize) -> Vec<GenreMean> {
    mean_by_genre(tracks, |t| t.duration_min, top_n)
}

/// Mean popularity per genre, most popular first, top ten.
pub fn mean_popularity_by_genre(tracks: &[&Track]) -> Vec<GenreMean> {
    mean_by_genre(tracks, |t| t.popularity, TOP_POPULARITY_GENRES)
}

/// Groups are formed in sorted genre order and then stably sorted by
/// descending mean, so ties keep alphabetical order. NaN values are skipped;
/// a group with no numeric value has a NaN mean and sorts last.
fn mean_by_genre(tracks: &[&Track], value: impl Fn(&Track) -> f64, limit: usize) -> Vec<GenreMean> {
    // genre → (sum, numeric values, rows)
    let mut groups: BTreeMap<&str, (f64, usize, usize)> = BTreeMap::new();
    for &t in tracks {
        let entry = groups.entry(t.track_genre.as_str()).or_default();
        let v = value(t);
        if !v.is_nan() {
            entry.0 += v;
            entry.1 += 1;
        }
        entry.2 += 1;
    }

    let mut means: Vec<GenreMean> = groups
        .into_iter()
        .map(|(genre, (sum, n, rows))| GenreMean {
            genre: genre.to_string(),
            mean: if n == 0 { f64::NAN } else { sum / n as f64 },
            tracks: rows,
        })
        .collect();
    means.sort_by(|a, b| descending_nan_last(a.mean, b.mean));
    means.truncate(limit);
    means
}

fn descending_nan_last(a: f64, b: f64) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => b.total_cmp(&a),
    }
}

// ---------------------------------------------------------------------------
// Duration histogram
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistogramBin {
    pub start: f64,
    pub end: f64,
    pub count: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Histogram {
    pub bins: Vec<HistogramBin>,
    /// Tracks left out for exceeding the duration cap (or lacking a duration).
    pub excluded: usize,
}

impl Histogram {
    pub fn total(&self) -> usize {
        self.bins.iter().map(|b| b.count).sum()
    }
}

/// Distribution of `duration_min` for tracks of at most fifteen minutes.
/// Longer tracks are dropped, not clipped into the last bin.
pub fn duration_histogram(tracks: &[&Track]) -> Histogram {
    let values: Vec<f64> = tracks
        .iter()
        .map(|t| t.duration_min)
        .filter(|&d| d <= HISTOGRAM_MAX_MINUTES)
        .collect();

    Histogram {
        excluded: tracks.len() - values.len(),
        bins: equal_width_bins(&values, HISTOGRAM_BINS),
    }
}

/// Split the observed `[min, max]` range into `n_bins` equal-width bins.
///
/// Bins are half-open except the last, which also holds `max`. When every
/// value is identical there is no width to split, so a single bin is returned.
pub fn equal_width_bins(values: &[f64], n_bins: usize) -> Vec<HistogramBin> {
    let Some(min) = values.iter().copied().reduce(f64::min) else {
        return Vec::new();
    };
    let max = values.iter().copied().fold(min, f64::max);
    if n_bins == 0 {
        return Vec::new();
    }
    if max <= min {
        return vec![HistogramBin {
            start: min,
            end: max,
            count: values.len(),
        }];
    }

    let width = (max - min) / n_bins as f64;
    let mut counts = vec![0usize; n_bins];
    for &v in values {
        let idx = (((v - min) / width) as usize).min(n_bins - 1);
        counts[idx] += 1;
    }

    counts
        .into_iter()
        .enumerate()
        .map(|(i, count)| HistogramBin {
            start: min + i as f64 * width,
            end: if i + 1 == n_bins {
                max
            } else {
                min + (i + 1) as f64 * width
            },
            count,
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Popularity by explicit flag (box plot)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ContentGroup {
    Explicit,
    Clean,
}

impl ContentGroup {
    /// `None` for a track whose explicit flag is missing.
    pub fn of(explicit: Option<bool>) -> Option<Self> {
        explicit.map(|e| if e { ContentGroup::Explicit } else { ContentGroup::Clean })
    }

    pub fn label(self) -> &'static str {
        match self {
            ContentGroup::Explicit => "Explicit",
            ContentGroup::Clean => "Clean",
        }
    }
}

/// Five-number summary of one group plus what a box plot needs for
/// whiskers and outlier points.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoxSummary {
    pub group: ContentGroup,
    pub count: usize,
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
    /// Smallest value within `OUTLIER_IQR_FACTOR` IQRs below `q1`.
    pub lower_whisker: f64,
    /// Largest value within `OUTLIER_IQR_FACTOR` IQRs above `q3`.
    pub upper_whisker: f64,
    pub outliers: Vec<f64>,
    /// Sorted raw popularity values.
    #[serde(skip)]
    pub values: Vec<f64>,
}

impl BoxSummary {
    /// `None` when there is no numeric value to summarise.
    pub fn from_values(group: ContentGroup, mut values: Vec<f64>) -> Option<Self> {
        values.retain(|v| !v.is_nan());
        values.sort_by(f64::total_cmp);
        let (&min, &max) = (values.first()?, values.last()?);

        let q1 = quantile(&values, 0.25);
        let median = quantile(&values, 0.5);
        let q3 = quantile(&values, 0.75);
        let reach = OUTLIER_IQR_FACTOR * (q3 - q1);
        let (low_fence, high_fence) = (q1 - reach, q3 + reach);

        let lower_whisker = values.iter().copied().find(|&v| v >= low_fence).unwrap_or(min);
        let upper_whisker = values.iter().rev().copied().find(|&v| v <= high_fence).unwrap_or(max);
        let outliers = values
            .iter()
            .copied()
            .filter(|&v| v < low_fence || v > high_fence)
            .collect();

        Some(BoxSummary {
            group,
            count: values.len(),
            min,
            q1,
            median,
            q3,
            max,
            lower_whisker,
            upper_whisker,
            outliers,
            values,
        })
    }
}

/// Linear-interpolation quantile of a sorted, non-empty slice.
fn quantile(sorted: &[f64], p: f64) -> f64 {
    let h = p * (sorted.len() - 1) as f64;
    let lo = h.floor() as usize;
    let hi = h.ceil() as usize;
    sorted[lo] + (h - lo as f64) * (sorted[hi] - sorted[lo])
}

/// Raised when a view has no rows left to summarise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("no tracks match the selected filters")]
pub struct EmptyView;

/// Popularity distribution of explicit vs clean tracks, groups in order of
/// first appearance. Tracks without an explicit flag belong to neither group,
/// and groups without a numeric popularity are omitted.
pub fn popularity_by_explicit(tracks: &[&Track]) -> Result<Vec<BoxSummary>, EmptyView> {
    let mut order: Vec<ContentGroup> = Vec::with_capacity(2);
    for group in tracks.iter().filter_map(|t| ContentGroup::of(t.explicit)) {
        if !order.contains(&group) {
            order.push(group);
        }
    }

    let summaries: Vec<BoxSummary> = order
        .into_iter()
        .filter_map(|group| {
            let values = tracks
                .iter()
                .filter(|t| ContentGroup::of(t.explicit) == Some(group))
                .map(|t| t.popularity)
                .collect();
            BoxSummary::from_values(group, values)
        })
        .collect();

    if summaries.is_empty() {
        return Err(EmptyView);
    }
    Ok(summaries)
}

// ---------------------------------------------------------------------------
// Headline metrics
// ---------------------------------------------------------------------------

/// The four scalar metrics shown above the charts.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Metrics {
    pub distinct_artists: usize,
    /// `None` for a view without any duration.
    pub mean_duration_min: Option<f64>,
    pub distinct_genres: usize,
    pub total_tracks: usize,
}

impl Metrics {
    pub fn compute(tracks: &[&Track]) -> Self {
        let artists: HashSet<&str> = tracks.iter().map(|t| t.artists.as_str()).collect();
        let genres: HashSet<&str> = tracks.iter().map(|t| t.track_genre.as_str()).collect();
        let durations: Vec<f64> = tracks
            .iter()
            .map(|t| t.duration_min)
            .filter(|d| !d.is_nan())
            .collect();
        let mean_duration_min = if durations.is_empty() {
            None
        } else {
            Some(durations.iter().sum::<f64>() / durations.len() as f64)
        };

        Metrics {
            distinct_artists: artists.len(),
            mean_duration_min,
            distinct_genres: genres.len(),
            total_tracks: tracks.len(),
        }
    }

    /// Mean duration with two decimals, e.g. `"3.44 min"`.
    pub fn mean_duration_label(&self) -> String {
        match self.mean_duration_min {
            Some(m) => format!("{m:.2} min"),
            None => "n/d".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::Dataset;

    fn three_tracks() -> Dataset {
        Dataset::from_tracks(vec![
            Track::new("Artist A", "dance pop", 180_000.0, 80.0, false),
            Track::new("Artist B", "dance pop", 240_000.0, 60.0, true),
            Track::new("Artist C", "k-pop", 200_000.0, 90.0, false),
        ])
    }

    #[test]
    fn duration_means_sorted_descending() {
        let ds = three_tracks();
        let rows = mean_duration_by_genre(&ds.view(), 5);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].genre, "dance pop");
        assert!((rows[0].mean - 3.5).abs() < 1e-9);
        assert_eq!(rows[0].tracks, 2);
        assert_eq!(rows[1].genre, "k-pop");
        assert!((rows[1].mean - 200_000.0 / 60_000.0).abs() < 1e-9);
    }

    #[test]
    fn duration_means_respect_top_n() {
        let tracks: Vec<Track> = (0..20)
            .map(|i| Track::new("X", format!("pop {i}"), 60_000.0 * (i + 1) as f64, 50.0, false))
            .collect();
        let ds = Dataset::from_tracks(tracks);
        for n in [5, 10, 15] {
            let rows = mean_duration_by_genre(&ds.view(), n);
            assert_eq!(rows.len(), n);
            assert!(rows.windows(2).all(|w| w[0].mean >= w[1].mean));
            assert_eq!(rows[0].genre, "pop 19");
        }
    }

    #[test]
    fn tie_at_the_boundary_includes_one_of_the_tied() {
        let ds = Dataset::from_tracks(vec![
            Track::new("A", "pop a", 300_000.0, 1.0, false),
            Track::new("B", "pop b", 120_000.0, 1.0, false),
            Track::new("C", "pop c", 120_000.0, 1.0, false),
        ]);
        let rows = mean_duration_by_genre(&ds.view(), 2);
        assert_eq!(rows[0].genre, "pop a");
        assert!(rows[1].genre == "pop b" || rows[1].genre == "pop c");
    }

    #[test]
    fn popularity_means_capped_at_ten() {
        let tracks: Vec<Track> = (0..12)
            .map(|i| Track::new("X", format!("pop {i}"), 1.0, i as f64, false))
            .collect();
        let ds = Dataset::from_tracks(tracks);
        let rows = mean_popularity_by_genre(&ds.view());
        assert_eq!(rows.len(), TOP_POPULARITY_GENRES);
        assert!(rows.windows(2).all(|w| w[0].mean >= w[1].mean));
        assert_eq!(rows[0].genre, "pop 11");
    }

    #[test]
    fn nan_means_sort_last() {
        let ds = Dataset::from_tracks(vec![
            Track::new("A", "pop a", 1.0, f64::NAN, false),
            Track::new("B", "pop b", 1.0, 10.0, false),
        ]);
        let rows = mean_popularity_by_genre(&ds.view());
        assert_eq!(rows[0].genre, "pop b");
        assert!(rows[1].mean.is_nan());
    }

    #[test]
    fn empty_view_gives_empty_group_summaries() {
        assert!(mean_duration_by_genre(&[], 5).is_empty());
        assert!(mean_popularity_by_genre(&[]).is_empty());
        assert_eq!(duration_histogram(&[]), Histogram::default());
    }

    #[test]
    fn histogram_drops_long_tracks_and_uses_thirty_bins() {
        let mut tracks: Vec<Track> = (1..=10)
            .map(|m| Track::new("X", "pop", m as f64 * 60_000.0, 1.0, false))
            .collect();
        tracks.push(Track::new("X", "pop", 20.0 * 60_000.0, 1.0, false));
        let ds = Dataset::from_tracks(tracks);

        let hist = duration_histogram(&ds.view());
        assert_eq!(hist.bins.len(), HISTOGRAM_BINS);
        assert_eq!(hist.total(), 10);
        assert_eq!(hist.excluded, 1);
        assert_eq!(hist.bins[0].start, 1.0);
        assert_eq!(hist.bins[HISTOGRAM_BINS - 1].end, 10.0);
        assert_eq!(hist.bins[0].count, 1);
        assert_eq!(hist.bins[HISTOGRAM_BINS - 1].count, 1);
    }

    #[test]
    fn histogram_keeps_exactly_fifteen_minutes() {
        let ds = Dataset::from_tracks(vec![
            Track::new("X", "pop", 15.0 * 60_000.0, 1.0, false),
            Track::new("X", "pop", 3.0 * 60_000.0, 1.0, false),
        ]);
        let hist = duration_histogram(&ds.view());
        assert_eq!(hist.total(), 2);
        assert_eq!(hist.excluded, 0);
    }

    #[test]
    fn identical_values_fill_a_single_bin() {
        let bins = equal_width_bins(&[2.0, 2.0, 2.0], HISTOGRAM_BINS);
        assert_eq!(bins.len(), 1);
        assert_eq!(bins[0].count, 3);
    }

    #[test]
    fn box_summary_uses_linear_quartiles() {
        let summary =
            BoxSummary::from_values(ContentGroup::Clean, vec![4.0, 1.0, 3.0, 2.0, 100.0]).unwrap();
        assert_eq!(summary.count, 5);
        assert_eq!(summary.min, 1.0);
        assert_eq!(summary.q1, 2.0);
        assert_eq!(summary.median, 3.0);
        assert_eq!(summary.q3, 4.0);
        assert_eq!(summary.max, 100.0);
        assert_eq!(summary.lower_whisker, 1.0);
        assert_eq!(summary.upper_whisker, 4.0);
        assert_eq!(summary.outliers, vec![100.0]);
        assert_eq!(summary.values, vec![1.0, 2.0, 3.0, 4.0, 100.0]);
    }

    #[test]
    fn box_summary_interpolates_between_ranks() {
        let summary = BoxSummary::from_values(ContentGroup::Explicit, vec![1.0, 2.0, 3.0, 4.0]).unwrap();
        assert!((summary.q1 - 1.75).abs() < 1e-9);
        assert!((summary.median - 2.5).abs() < 1e-9);
        assert!((summary.q3 - 3.25).abs() < 1e-9);
        assert!(summary.outliers.is_empty());
    }

    #[test]
    fn explicit_split_labels_groups() {
        let ds = three_tracks();
        let summaries = popularity_by_explicit(&ds.view()).unwrap();
        assert_eq!(summaries.len(), 2);
        assert_eq!(summaries[0].group.label(), "Clean");
        assert_eq!(summaries[0].values, vec![80.0, 90.0]);
        assert_eq!(summaries[1].group.label(), "Explicit");
        assert_eq!(summaries[1].values, vec![60.0]);
    }

    #[test]
    fn explicit_split_of_empty_view_is_an_error() {
        assert_eq!(popularity_by_explicit(&[]), Err(EmptyView));
    }

    #[test]
    fn explicit_split_without_numeric_popularity_is_an_error() {
        let ds = Dataset::from_tracks(vec![
            Track::new("A", "pop", 1.0, f64::NAN, true),
            Track::new("B", "pop", 1.0, f64::NAN, false),
        ]);
        assert_eq!(popularity_by_explicit(&ds.view()), Err(EmptyView));
    }

    #[test]
    fn tracks_without_explicit_flag_join_no_group() {
        let ds = Dataset::from_tracks(vec![
            Track::new("A", "pop", 180_000.0, 70.0, None),
            Track::new("B", "pop", 180_000.0, 50.0, false),
        ]);
        let summaries = popularity_by_explicit(&ds.view()).unwrap();
        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries[0].group, ContentGroup::Clean);
        assert_eq!(summaries[0].values, vec![50.0]);

        // Still counted everywhere else.
        assert_eq!(Metrics::compute(&ds.view()).total_tracks, 2);
        assert_eq!(mean_popularity_by_genre(&ds.view())[0].mean, 60.0);

        let only_unflagged = Dataset::from_tracks(vec![Track::new("A", "pop", 1.0, 70.0, None)]);
        assert_eq!(popularity_by_explicit(&only_unflagged.view()), Err(EmptyView));
    }

    #[test]
    fn metrics_over_three_tracks() {
        let ds = three_tracks();
        let m = Metrics::compute(&ds.view());
        assert_eq!(m.total_tracks, 3);
        assert_eq!(m.distinct_artists, 3);
        assert_eq!(m.distinct_genres, 2);
        assert_eq!(m.mean_duration_label(), "3.44 min");
    }

    #[test]
    fn metrics_of_nothing_are_zero() {
        let m = Metrics::compute(&[]);
        assert_eq!(m, Metrics::default());
        assert_eq!(m.total_tracks, 0);
        assert_eq!(m.mean_duration_label(), "n/d");
    }
}
