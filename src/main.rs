mod app;
mod color;
mod dashboard;
mod data;
mod export;
mod state;
mod ui;

use app::PopDashboardApp;
use eframe::egui;

/// Source table, relative to the working directory.
const DATA_PATH: &str = "datasetspotify.csv";

fn main() -> eframe::Result {
    env_logger::init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 820.0])
            .with_min_inner_size([720.0, 480.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Spotify Pop Dashboard",
        options,
        Box::new(|cc| {
            color::apply_theme(&cc.egui_ctx);
            Ok(Box::new(PopDashboardApp::new(DATA_PATH)))
        }),
    )
}
