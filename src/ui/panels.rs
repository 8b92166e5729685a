use std::path::Path;

use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::color::SPOTIFY_GREEN;
use crate::dashboard::{Dashboard, TopN, View};
use crate::data::loader::LoadError;
use crate::data::model::Dataset;
use crate::export;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – global filter
// ---------------------------------------------------------------------------

/// Render the left settings panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading(RichText::new("Configuración").color(SPOTIFY_GREEN));
    ui.separator();

    ui.strong("Filtros Generales");
    ui.add(
        egui::Slider::new(&mut state.inputs.min_popularity, 0..=100).text("Popularidad mínima"),
    );

    ui.separator();
    ui.small("Datos procesados de Spotify.");
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState, dataset: &Dataset) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("Archivo", |ui: &mut Ui| {
            let button = egui::Button::new("Exportar vista…");
            if ui.add_enabled(!dataset.is_empty(), button).clicked() {
                let view = state.view;
                let chart = Dashboard::new(dataset, &state.inputs).render(view);
                export::save_file_dialog(state, view, &chart);
                ui.close_menu();
            }
        });

        ui.separator();

        if !dataset.is_empty() {
            let visible = Dashboard::new(dataset, &state.inputs).global_view().len();
            ui.label(format!(
                "{} canciones pop cargadas, {visible} sobre el umbral",
                dataset.len()
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// Central panel pieces
// ---------------------------------------------------------------------------

/// Shown instead of everything else when the dataset is empty.
pub fn no_data_notice(ui: &mut Ui, path: &Path, error: Option<&LoadError>) {
    ui.add_space(12.0);
    ui.label(
        RichText::new("No hay datos o el archivo no se encuentra.")
            .color(Color32::YELLOW)
            .strong(),
    );
    ui.label(RichText::new(format!("Archivo: {}", path.display())).weak());
    if let Some(e) = error {
        ui.label(RichText::new(e.to_string()).weak());
    }
}

/// The four headline metrics over the global view.
pub fn metrics_row(ui: &mut Ui, dashboard: &Dashboard<'_>) {
    let m = dashboard.metrics();
    ui.columns(4, |cols: &mut [Ui]| {
        metric(&mut cols[0], "Artistas", m.distinct_artists.to_string());
        metric(&mut cols[1], "Duración Media", m.mean_duration_label());
        metric(&mut cols[2], "Subgéneros Totales", m.distinct_genres.to_string());
        metric(&mut cols[3], "Total Canciones", m.total_tracks.to_string());
    });
}

fn metric(ui: &mut Ui, label: &str, value: String) {
    ui.label(RichText::new(label).weak());
    ui.label(RichText::new(value).size(26.0).color(SPOTIFY_GREEN));
}

pub fn tab_bar(ui: &mut Ui, state: &mut AppState) {
    ui.horizontal(|ui: &mut Ui| {
        for view in View::ALL {
            ui.selectable_value(&mut state.view, view, view.title());
        }
    });
}

/// Per-view inputs: the top-N selector and the genre multi-select.
pub fn view_controls(ui: &mut Ui, state: &mut AppState, dataset: &Dataset) {
    match state.view {
        View::DurationByGenre => top_n_selector(ui, state),
        View::ExplicitImpact => genre_multiselect(ui, state, dataset),
        View::DurationDistribution | View::PopularityByGenre => {}
    }
}

fn top_n_selector(ui: &mut Ui, state: &mut AppState) {
    ui.horizontal(|ui: &mut Ui| {
        ui.label("Mostrar Top");
        egui::ComboBox::from_id_salt("tab1_top")
            .selected_text(state.inputs.top_n.count().to_string())
            .show_ui(ui, |ui: &mut Ui| {
                for n in TopN::ALL {
                    ui.selectable_value(&mut state.inputs.top_n, n, n.count().to_string());
                }
            });
    });
}

/// Options are every genre of the base dataset, not just those over the
/// popularity threshold.
fn genre_multiselect(ui: &mut Ui, state: &mut AppState, dataset: &Dataset) {
    let n_selected = state.inputs.selected_genres.len();
    let header_text = format!(
        "Selecciona los Subgéneros a comparar  ({n_selected}/{})",
        dataset.genres.len()
    );

    egui::CollapsingHeader::new(RichText::new(header_text).strong())
        .id_salt("tab4_multiselect")
        .default_open(false)
        .show(ui, |ui: &mut Ui| {
            if ui
                .small_button("Limpiar")
                .on_hover_text("Deja vacío para ver todos los géneros.")
                .clicked()
            {
                state.clear_genres();
            }

            ScrollArea::vertical()
                .max_height(180.0)
                .auto_shrink([false, true])
                .show(ui, |ui: &mut Ui| {
                    for genre in &dataset.genres {
                        let mut text = RichText::new(genre);
                        if let Some(colors) = &state.genre_colors {
                            text = text.color(colors.color_for(genre));
                        }

                        let mut checked = state.inputs.selected_genres.contains(genre);
                        if ui.checkbox(&mut checked, text).changed() {
                            state.toggle_genre(genre);
                        }
                    }
                });
        });
}
