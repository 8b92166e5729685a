use std::collections::BTreeSet;

use serde::Serialize;

use crate::data::aggregate::{
    self, BoxSummary, GenreMean, Histogram, Metrics, duration_histogram, mean_duration_by_genre,
    mean_popularity_by_genre, popularity_by_explicit,
};
use crate::data::filter::{filter_by_genres, filter_by_popularity};
use crate::data::model::{Dataset, Track};

// ---------------------------------------------------------------------------
// User inputs
// ---------------------------------------------------------------------------

/// Row limit for the duration-by-subgenre view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TopN {
    #[default]
    Five,
    Ten,
    Fifteen,
}

impl TopN {
    pub const ALL: [TopN; 3] = [TopN::Five, TopN::Ten, TopN::Fifteen];

    pub fn count(self) -> usize {
        match self {
            TopN::Five => 5,
            TopN::Ten => 10,
            TopN::Fifteen => 15,
        }
    }
}

/// Filter values delivered by the widgets.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Inputs {
    /// Global threshold, slider range 0..=100.
    pub min_popularity: i64,
    pub top_n: TopN,
    /// Genres compared in the explicit-impact view; empty means all.
    pub selected_genres: BTreeSet<String>,
}

/// The four chart views, in tab order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    DurationByGenre,
    DurationDistribution,
    PopularityByGenre,
    ExplicitImpact,
}

impl View {
    pub const ALL: [View; 4] = [
        View::DurationByGenre,
        View::DurationDistribution,
        View::PopularityByGenre,
        View::ExplicitImpact,
    ];

    pub fn title(self) -> &'static str {
        match self {
            View::DurationByGenre => "Duración por Subgénero",
            View::DurationDistribution => "Distribución de Duración",
            View::PopularityByGenre => "Popularidad por Subgénero",
            View::ExplicitImpact => "Impacto Explícito",
        }
    }

    /// Stem used for exported file names.
    pub fn slug(self) -> &'static str {
        match self {
            View::DurationByGenre => "duration_by_genre",
            View::DurationDistribution => "duration_distribution",
            View::PopularityByGenre => "popularity_by_genre",
            View::ExplicitImpact => "explicit_impact",
        }
    }
}

// ---------------------------------------------------------------------------
// Render output
// ---------------------------------------------------------------------------

/// Everything a chart needs to draw one view.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "view", content = "rows", rename_all = "snake_case")]
pub enum ChartData {
    /// The base dataset is empty; nothing was computed.
    NoData,
    /// The filters left no rows for this view.
    EmptyView,
    DurationByGenre(Vec<GenreMean>),
    DurationDistribution(Histogram),
    PopularityByGenre(Vec<GenreMean>),
    ExplicitImpact(Vec<BoxSummary>),
}

// ---------------------------------------------------------------------------
// Dashboard – one recomputation pass
// ---------------------------------------------------------------------------

/// The base dataset with the global popularity filter applied.
///
/// Built fresh for every interaction; nothing is cached between passes.
pub struct Dashboard<'a> {
    dataset: &'a Dataset,
    inputs: &'a Inputs,
    global: Vec<&'a Track>,
}

impl<'a> Dashboard<'a> {
    pub fn new(dataset: &'a Dataset, inputs: &'a Inputs) -> Self {
        let global = filter_by_popularity(&dataset.view(), inputs.min_popularity);
        Self {
            dataset,
            inputs,
            global,
        }
    }

    /// Whether there is anything to show at all.
    pub fn has_data(&self) -> bool {
        !self.dataset.is_empty()
    }

    /// Tracks passing the global filter.
    pub fn global_view(&self) -> &[&'a Track] {
        &self.global
    }

    /// Headline metrics over the global view; all zero without data.
    pub fn metrics(&self) -> Metrics {
        if !self.has_data() {
            return Metrics::default();
        }
        Metrics::compute(&self.global)
    }

    /// Compute the chart data behind one view.
    pub fn render(&self, view: View) -> ChartData {
        if !self.has_data() {
            return ChartData::NoData;
        }
        match view {
            View::DurationByGenre => {
                ChartData::DurationByGenre(mean_duration_by_genre(&self.global, self.inputs.top_n.count()))
            }
            View::DurationDistribution => {
                ChartData::DurationDistribution(duration_histogram(&self.global))
            }
            View::PopularityByGenre => {
                ChartData::PopularityByGenre(mean_popularity_by_genre(&self.global))
            }
            View::ExplicitImpact => {
                let subset = filter_by_genres(&self.global, &self.inputs.selected_genres);
                match popularity_by_explicit(&subset) {
                    Ok(summaries) => ChartData::ExplicitImpact(summaries),
                    Err(aggregate::EmptyView) => ChartData::EmptyView,
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::aggregate::ContentGroup;

    fn three_tracks() -> Dataset {
        Dataset::from_tracks(vec![
            Track::new("Artist A", "dance pop", 180_000.0, 80.0, false),
            Track::new("Artist B", "dance pop", 240_000.0, 60.0, true),
            Track::new("Artist C", "k-pop", 200_000.0, 90.0, false),
        ])
    }

    #[test]
    fn unfiltered_pipeline_matches_the_three_track_scenario() {
        let ds = three_tracks();
        let inputs = Inputs::default();
        let dash = Dashboard::new(&ds, &inputs);

        let m = dash.metrics();
        assert_eq!(m.total_tracks, 3);
        assert_eq!(m.distinct_artists, 3);
        assert_eq!(m.mean_duration_label(), "3.44 min");

        let ChartData::DurationByGenre(rows) = dash.render(View::DurationByGenre) else {
            panic!("expected duration rows");
        };
        let genres: Vec<&str> = rows.iter().map(|r| r.genre.as_str()).collect();
        assert_eq!(genres, ["dance pop", "k-pop"]);
        assert!((rows[0].mean - 3.5).abs() < 1e-9);
    }

    #[test]
    fn popularity_threshold_applies_to_every_view() {
        let ds = three_tracks();
        let inputs = Inputs {
            min_popularity: 85,
            ..Inputs::default()
        };
        let dash = Dashboard::new(&ds, &inputs);

        let m = dash.metrics();
        assert_eq!(m.total_tracks, 1);
        assert_eq!(m.distinct_genres, 1);

        let ChartData::PopularityByGenre(rows) = dash.render(View::PopularityByGenre) else {
            panic!("expected popularity rows");
        };
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].genre, "k-pop");
    }

    #[test]
    fn empty_dataset_renders_no_data_everywhere() {
        let ds = Dataset::empty();
        let inputs = Inputs::default();
        let dash = Dashboard::new(&ds, &inputs);

        assert!(!dash.has_data());
        assert_eq!(dash.metrics(), Metrics::default());
        for view in View::ALL {
            assert_eq!(dash.render(view), ChartData::NoData);
        }
    }

    #[test]
    fn genre_selection_only_narrows_the_explicit_view() {
        let ds = three_tracks();
        let inputs = Inputs {
            selected_genres: ["k-pop".to_string()].into(),
            ..Inputs::default()
        };
        let dash = Dashboard::new(&ds, &inputs);

        let ChartData::ExplicitImpact(groups) = dash.render(View::ExplicitImpact) else {
            panic!("expected box summaries");
        };
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].group, ContentGroup::Clean);
        assert_eq!(groups[0].values, vec![90.0]);

        // Other views still see every genre.
        assert_eq!(dash.metrics().total_tracks, 3);
    }

    #[test]
    fn explicit_view_warns_when_filters_match_nothing() {
        let ds = three_tracks();
        let inputs = Inputs {
            min_popularity: 95,
            ..Inputs::default()
        };
        let dash = Dashboard::new(&ds, &inputs);
        assert_eq!(dash.render(View::ExplicitImpact), ChartData::EmptyView);
        assert_eq!(
            dash.render(View::DurationDistribution),
            ChartData::DurationDistribution(Histogram::default())
        );
    }

    #[test]
    fn rendering_twice_is_identical() {
        let ds = three_tracks();
        let inputs = Inputs {
            min_popularity: 50,
            top_n: TopN::Ten,
            ..Inputs::default()
        };
        for view in View::ALL {
            let first = Dashboard::new(&ds, &inputs).render(view);
            let second = Dashboard::new(&ds, &inputs).render(view);
            assert_eq!(first, second);
        }
    }

    #[test]
    fn top_n_counts() {
        let counts: Vec<usize> = TopN::ALL.iter().map(|n| n.count()).collect();
        assert_eq!(counts, [5, 10, 15]);
        assert_eq!(TopN::default(), TopN::Five);
    }
}
