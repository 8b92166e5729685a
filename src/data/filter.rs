use std::collections::BTreeSet;

use super::model::Track;

// ---------------------------------------------------------------------------
// Filter predicates: each returns a fresh view, the base is never touched
// ---------------------------------------------------------------------------

/// Tracks with `popularity >= min_popularity`.
///
/// Any threshold is legal; one above every popularity simply yields an empty
/// view. NaN popularity never passes.
pub fn filter_by_popularity<'a>(tracks: &[&'a Track], min_popularity: i64) -> Vec<&'a Track> {
    let threshold = min_popularity as f64;
    tracks
        .iter()
        .copied()
        .filter(|t| t.popularity >= threshold)
        .collect()
}

/// Tracks whose genre is exactly one of `genres`.
///
/// An empty selection means "all genres": the input is returned unchanged.
pub fn filter_by_genres<'a>(tracks: &[&'a Track], genres: &BTreeSet<String>) -> Vec<&'a Track> {
    if genres.is_empty() {
        return tracks.to_vec();
    }
    tracks
        .iter()
        .copied()
        .filter(|t| genres.contains(&t.track_genre))
        .collect()
}
