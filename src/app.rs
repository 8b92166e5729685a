use std::path::PathBuf;

use eframe::egui;

use crate::dashboard::Dashboard;
use crate::data::cache::DatasetHandle;
use crate::state::AppState;
use crate::ui::{charts, panels};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct PopDashboardApp {
    /// Loaded lazily on the first frame, then shared read-only.
    pub dataset: DatasetHandle,
    pub state: AppState,
}

impl PopDashboardApp {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            dataset: DatasetHandle::new(path),
            state: AppState::default(),
        }
    }
}

impl eframe::App for PopDashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let dataset = self.dataset.dataset_or_empty();
        self.state.ensure_genre_colors(dataset);

        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state, dataset);
        });

        // ---- Left side panel: global filter ----
        egui::SidePanel::left("filter_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: metrics and charts ----
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading(
                egui::RichText::new("Dashboard de análisis del Pop - Spotify")
                    .color(crate::color::SPOTIFY_GREEN),
            );

            if dataset.is_empty() {
                panels::no_data_notice(ui, self.dataset.path(), self.dataset.error());
                return;
            }

            // The view controls may change the inputs, so the chart gets its own pass.
            panels::metrics_row(ui, &Dashboard::new(dataset, &self.state.inputs));
            ui.separator();
            panels::tab_bar(ui, &mut self.state);
            ui.separator();
            panels::view_controls(ui, &mut self.state, dataset);

            let dashboard = Dashboard::new(dataset, &self.state.inputs);
            charts::view_chart(ui, self.state.view, &dashboard.render(self.state.view));
        });
    }
}
