use std::collections::BTreeSet;

/// Milliseconds per minute, used to derive `duration_min`.
pub const MS_PER_MINUTE: f64 = 60_000.0;

/// Substring every retained genre must contain (case-insensitive).
pub const BASE_GENRE: &str = "pop";

// ---------------------------------------------------------------------------
// Track – one row of the source table
// ---------------------------------------------------------------------------

/// A single track (one row of the source table).
#[derive(Debug, Clone, PartialEq)]
pub struct Track {
    /// Artist credit; may hold several names joined together.
    pub artists: String,
    /// Free-form subgenre label, e.g. `"dance pop"`.
    pub track_genre: String,
    pub duration_ms: f64,
    /// Always `duration_ms / 60000`.
    pub duration_min: f64,
    /// Nominally 0..=100, not validated.
    pub popularity: f64,
    /// `None` when the source cell was missing.
    pub explicit: Option<bool>,
}

impl Track {
    /// Build a track, deriving `duration_min` from `duration_ms`.
    pub fn new(
        artists: impl Into<String>,
        track_genre: impl Into<String>,
        duration_ms: f64,
        popularity: f64,
        explicit: impl Into<Option<bool>>,
    ) -> Self {
        Track {
            artists: artists.into(),
            track_genre: track_genre.into(),
            duration_ms,
            duration_min: duration_ms / MS_PER_MINUTE,
            popularity,
            explicit: explicit.into(),
        }
    }

    /// Whether the genre label belongs to the pop family.
    pub fn is_pop(&self) -> bool {
        self.track_genre.to_lowercase().contains(BASE_GENRE)
    }
}

// ---------------------------------------------------------------------------
// Dataset – the complete loaded table
// ---------------------------------------------------------------------------

/// The base dataset: pop tracks in source order plus the genre index.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    /// All tracks (rows), in file order.
    pub tracks: Vec<Track>,
    /// Sorted set of distinct genres, used for the genre multi-select.
    pub genres: BTreeSet<String>,
}

impl Dataset {
    pub const fn empty() -> Self {
        Dataset {
            tracks: Vec::new(),
            genres: BTreeSet::new(),
        }
    }

    /// Keep only pop tracks and build the genre index.
    pub fn from_tracks(tracks: Vec<Track>) -> Self {
        let tracks: Vec<Track> = tracks.into_iter().filter(Track::is_pop).collect();
        let genres = tracks.iter().map(|t| t.track_genre.clone()).collect();
        Dataset { tracks, genres }
    }

    /// A borrowed view over every track, the input to the filter engine.
    pub fn view(&self) -> Vec<&Track> {
        self.tracks.iter().collect()
    }

    /// Number of tracks.
    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duration_min_is_derived_from_milliseconds() {
        let t = Track::new("A", "dance pop", 200_000.0, 50.0, false);
        assert!((t.duration_min - 200_000.0 / 60_000.0).abs() < 1e-9);
    }

    #[test]
    fn from_tracks_keeps_pop_genres_case_insensitive() {
        let ds = Dataset::from_tracks(vec![
            Track::new("A", "K-POP", 1.0, 1.0, false),
            Track::new("B", "rock", 1.0, 1.0, false),
            Track::new("C", "synth-pop", 1.0, 1.0, true),
            Track::new("D", "nan", 1.0, 1.0, true),
        ]);
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.tracks[0].artists, "A");
        assert_eq!(ds.tracks[1].artists, "C");
        assert!(ds.tracks.iter().all(Track::is_pop));
        let genres: Vec<&str> = ds.genres.iter().map(String::as_str).collect();
        assert_eq!(genres, ["K-POP", "synth-pop"]);
    }

    #[test]
    fn empty_dataset_has_no_genres() {
        let ds = Dataset::empty();
        assert!(ds.is_empty());
        assert!(ds.genres.is_empty());
        assert!(ds.view().is_empty());
    }
}
