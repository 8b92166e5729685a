use std::ops::RangeInclusive;

use eframe::egui::{Color32, RichText, ScrollArea, Stroke, Ui};
use egui_extras::{Column, TableBuilder};
use egui_plot::{Bar, BarChart, BoxElem, BoxPlot, BoxSpread, GridMark, Line, Plot, PlotPoints, Points};

use crate::color::{SPOTIFY_GREEN, SPOTIFY_GREY};
use crate::dashboard::{ChartData, View};
use crate::data::aggregate::{BoxSummary, ContentGroup, GenreMean, Histogram};

const PLOT_HEIGHT: f32 = 340.0;
const ROW_HEIGHT: f32 = 18.0;

// ---------------------------------------------------------------------------
// Central panel – one chart per view
// ---------------------------------------------------------------------------

/// Render the active view: heading, chart and the numbers behind it.
pub fn view_chart(ui: &mut Ui, view: View, chart: &ChartData) {
    ui.heading(RichText::new(subtitle(view)).color(SPOTIFY_GREEN));

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| match chart {
            ChartData::NoData => {
                ui.label("No hay datos o el archivo no se encuentra.");
            }
            ChartData::EmptyView => {
                ui.label(
                    RichText::new("No hay datos que coincidan con los filtros seleccionados.")
                        .color(Color32::YELLOW),
                );
            }
            ChartData::DurationByGenre(rows) => {
                duration_bars(ui, rows);
                genre_table(ui, "duration_table", "duration_min", rows);
            }
            ChartData::DurationDistribution(hist) => {
                duration_histogram(ui, hist);
            }
            ChartData::PopularityByGenre(rows) => {
                popularity_line(ui, rows);
                genre_table(ui, "popularity_table", "popularity", rows);
            }
            ChartData::ExplicitImpact(groups) => {
                explicit_box_plot(ui, groups);
                box_table(ui, groups);
            }
        });
}

fn subtitle(view: View) -> &'static str {
    match view {
        View::DurationByGenre => "Duración por Subgénero (General)",
        View::DurationDistribution => "Distribución de Duración (General)",
        View::PopularityByGenre => "Popularidad por Subgénero (General)",
        View::ExplicitImpact => "Impacto del Contenido Explícito en Popularidad",
    }
}

/// Axis formatter naming integer positions after `labels`.
fn category_axis(labels: Vec<String>) -> impl Fn(GridMark, &RangeInclusive<f64>) -> String {
    move |mark: GridMark, _range: &RangeInclusive<f64>| {
        let v = mark.value;
        if v < 0.0 || v.fract() != 0.0 {
            return String::new();
        }
        labels.get(v as usize).cloned().unwrap_or_default()
    }
}

fn static_plot(id: &str) -> Plot<'_> {
    Plot::new(id.to_string())
        .height(PLOT_HEIGHT)
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(false)
        .allow_boxed_zoom(false)
}

// ---------------------------------------------------------------------------
// Charts
// ---------------------------------------------------------------------------

/// Horizontal bars, longest mean at the top.
fn duration_bars(ui: &mut Ui, rows: &[GenreMean]) {
    let n = rows.len();
    let labels: Vec<String> = rows.iter().rev().map(|r| r.genre.clone()).collect();
    let bars: Vec<Bar> = rows
        .iter()
        .enumerate()
        .map(|(i, r)| {
            Bar::new((n - 1 - i) as f64, r.mean)
                .name(&r.genre)
                .fill(SPOTIFY_GREEN)
        })
        .collect();

    static_plot("duration_by_genre")
        .x_axis_label("duration_min")
        .y_axis_label("track_genre")
        .y_axis_formatter(category_axis(labels))
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).horizontal().color(SPOTIFY_GREEN));
        });
}

fn duration_histogram(ui: &mut Ui, hist: &Histogram) {
    let bars: Vec<Bar> = hist
        .bins
        .iter()
        .map(|b| {
            let width = (b.end - b.start).max(0.1);
            Bar::new((b.start + b.end) / 2.0, b.count as f64)
                .width(width)
                .name(format!("{:.2}-{:.2} min", b.start, b.end))
                .fill(SPOTIFY_GREEN)
        })
        .collect();

    static_plot("duration_distribution")
        .x_axis_label("duration_min")
        .y_axis_label("count")
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).color(SPOTIFY_GREEN));
        });

    ui.label(format!(
        "{} canciones de hasta 15 min, {} excluidas",
        hist.total(),
        hist.excluded
    ));
}

/// Line with markers, one point per genre in descending order.
fn popularity_line(ui: &mut Ui, rows: &[GenreMean]) {
    let labels: Vec<String> = rows.iter().map(|r| r.genre.clone()).collect();
    let points: Vec<[f64; 2]> = rows
        .iter()
        .enumerate()
        .map(|(i, r)| [i as f64, r.mean])
        .collect();

    static_plot("popularity_by_genre")
        .x_axis_label("track_genre")
        .y_axis_label("popularity")
        .x_axis_formatter(category_axis(labels))
        .show(ui, |plot_ui| {
            plot_ui.line(
                Line::new(PlotPoints::from(points.clone()))
                    .color(SPOTIFY_GREEN)
                    .width(2.0),
            );
            plot_ui.points(
                Points::new(PlotPoints::from(points))
                    .color(SPOTIFY_GREEN)
                    .radius(4.0),
            );
        });
}

fn group_color(group: ContentGroup) -> Color32 {
    match group {
        ContentGroup::Explicit => SPOTIFY_GREEN,
        ContentGroup::Clean => SPOTIFY_GREY,
    }
}

/// One box per content group; points beyond the whiskers drawn separately.
fn explicit_box_plot(ui: &mut Ui, groups: &[BoxSummary]) {
    let labels: Vec<String> = groups.iter().map(|g| g.group.label().to_string()).collect();

    static_plot("explicit_impact")
        .x_axis_label("Tipo de Contenido")
        .y_axis_label("Popularidad (0-100)")
        .x_axis_formatter(category_axis(labels))
        .show(ui, |plot_ui| {
            for (i, g) in groups.iter().enumerate() {
                let color = group_color(g.group);
                let pos = i as f64;
                let spread = BoxSpread::new(g.lower_whisker, g.q1, g.median, g.q3, g.upper_whisker);
                let elem = BoxElem::new(pos, spread)
                    .name(g.group.label())
                    .box_width(0.5)
                    .fill(color.gamma_multiply(0.4))
                    .stroke(Stroke::new(1.5, color));
                plot_ui.box_plot(BoxPlot::new(vec![elem]).name(g.group.label()));

                if !g.outliers.is_empty() {
                    let outliers: Vec<[f64; 2]> = g.outliers.iter().map(|&v| [pos, v]).collect();
                    plot_ui.points(Points::new(PlotPoints::from(outliers)).color(color).radius(3.0));
                }
            }
        });
}

// ---------------------------------------------------------------------------
// Tables
// ---------------------------------------------------------------------------

fn genre_table(ui: &mut Ui, id: &str, value_header: &str, rows: &[GenreMean]) {
    ui.push_id(id, |ui: &mut Ui| {
        TableBuilder::new(ui)
            .striped(true)
            .vscroll(false)
            .column(Column::auto().at_least(180.0))
            .column(Column::auto().at_least(110.0))
            .column(Column::remainder())
            .header(20.0, |mut header| {
                header.col(|ui| {
                    ui.strong("track_genre");
                });
                header.col(|ui| {
                    ui.strong(value_header);
                });
                header.col(|ui| {
                    ui.strong("canciones");
                });
            })
            .body(|mut body| {
                for r in rows {
                    body.row(ROW_HEIGHT, |mut row| {
                        row.col(|ui| {
                            ui.label(&r.genre);
                        });
                        row.col(|ui| {
                            ui.label(format!("{:.3}", r.mean));
                        });
                        row.col(|ui| {
                            ui.label(r.tracks.to_string());
                        });
                    });
                }
            });
    });
}

fn box_table(ui: &mut Ui, groups: &[BoxSummary]) {
    const HEADERS: [&str; 7] = ["grupo", "n", "min", "q1", "mediana", "q3", "max"];

    ui.push_id("explicit_table", |ui: &mut Ui| {
        let mut table = TableBuilder::new(ui).striped(true).vscroll(false);
        for _ in HEADERS {
            table = table.column(Column::auto().at_least(64.0));
        }
        table
            .header(20.0, |mut header| {
                for h in HEADERS {
                    header.col(|ui| {
                        ui.strong(h);
                    });
                }
            })
            .body(|mut body| {
                for g in groups {
                    body.row(ROW_HEIGHT, |mut row| {
                        row.col(|ui| {
                            ui.colored_label(group_color(g.group), g.group.label());
                        });
                        row.col(|ui| {
                            ui.label(g.count.to_string());
                        });
                        for v in [g.min, g.q1, g.median, g.q3, g.max] {
                            row.col(|ui| {
                                ui.label(format!("{v:.1}"));
                            });
                        }
                    });
                }
            });
    });
}
