use crate::color::GenreColors;
use crate::dashboard::{Inputs, View};
use crate::data::model::Dataset;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
#[derive(Default)]
pub struct AppState {
    /// Current filter values.
    pub inputs: Inputs,

    /// Active tab.
    pub view: View,

    /// Swatches for the genre multi-select, built on first use.
    pub genre_colors: Option<GenreColors>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    /// Build the genre swatches once the dataset is available.
    pub fn ensure_genre_colors(&mut self, dataset: &Dataset) {
        if self.genre_colors.is_none() && !dataset.is_empty() {
            self.genre_colors = Some(GenreColors::new(&dataset.genres));
        }
    }

    /// Toggle a single genre in the explicit-impact comparison.
    pub fn toggle_genre(&mut self, genre: &str) {
        if !self.inputs.selected_genres.remove(genre) {
            self.inputs.selected_genres.insert(genre.to_string());
        }
    }

    /// Back to "all genres".
    pub fn clear_genres(&mut self) {
        self.inputs.selected_genres.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::Track;

    #[test]
    fn toggling_twice_restores_the_selection() {
        let mut state = AppState::default();
        state.toggle_genre("k-pop");
        assert!(state.inputs.selected_genres.contains("k-pop"));
        state.toggle_genre("k-pop");
        assert!(state.inputs.selected_genres.is_empty());
    }

    #[test]
    fn clear_selects_all_genres_again() {
        let mut state = AppState::default();
        state.toggle_genre("dance pop");
        state.toggle_genre("k-pop");
        state.clear_genres();
        assert!(state.inputs.selected_genres.is_empty());
    }

    #[test]
    fn genre_colours_wait_for_data() {
        let mut state = AppState::default();
        state.ensure_genre_colors(&Dataset::empty());
        assert!(state.genre_colors.is_none());

        let ds = Dataset::from_tracks(vec![Track::new("A", "k-pop", 1.0, 1.0, false)]);
        state.ensure_genre_colors(&ds);
        assert!(state.genre_colors.is_some());
    }
}
