use std::f64::consts::{FRAC_PI_2, TAU};

use eframe::egui::{Color32, RichText, Stroke, Ui};
use egui_extras::{Column, TableBuilder};
use egui_plot::{Legend, MarkerShape, Plot, PlotPoint, PlotPoints, Points, Polygon, Text};

use crate::color::{ColorMap, outcome_color};
use crate::dashboard::{PieChartData, ScatterChartData};
use crate::data::model::{FilteredRecords, OutcomeClass};

const CHART_HEIGHT: f32 = 320.0;

/// Arc resolution for a full circle.
const PIE_SEGMENTS: usize = 120;

fn outcome_label(class: OutcomeClass) -> String {
    match class {
        OutcomeClass::Success => format!("{class} (success)"),
        OutcomeClass::Failure => format!("{class} (failure)"),
    }
}

// ---------------------------------------------------------------------------
// Success pie chart
// ---------------------------------------------------------------------------

/// Render outcome counts as a pie, slices clockwise from twelve o'clock.
pub fn success_pie(ui: &mut Ui, data: &PieChartData) {
    ui.heading(&data.title);

    let total = data.counts.total();
    if total == 0 {
        ui.label("No launches match the selected site.");
        return;
    }

    Plot::new("success_pie")
        .height(CHART_HEIGHT)
        .data_aspect(1.0)
        .legend(Legend::default())
        .show_axes(false)
        .show_grid(false)
        .show_x(false)
        .show_y(false)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .include_x(-1.2)
        .include_x(1.2)
        .include_y(-1.2)
        .include_y(1.2)
        .show(ui, |plot_ui| {
            let mut start = FRAC_PI_2;
            for (class, count) in data.counts.iter() {
                let fraction = count as f64 / total as f64;
                let sweep = fraction * TAU;

                plot_ui.polygon(
                    Polygon::new(PlotPoints::new(slice_points(start, sweep)))
                        .name(outcome_label(class))
                        .fill_color(outcome_color(class))
                        .stroke(Stroke::new(1.0, Color32::WHITE)),
                );

                let mid = start - sweep / 2.0;
                plot_ui.text(Text::new(
                    PlotPoint::new(0.6 * mid.cos(), 0.6 * mid.sin()),
                    RichText::new(format!("{:.1}%", fraction * 100.0))
                        .color(Color32::WHITE)
                        .strong(),
                ));
                start -= sweep;
            }
        });
}

/// Closed outline of a unit-circle slice starting at `start` radians and
/// sweeping `sweep` radians clockwise.
fn slice_points(start: f64, sweep: f64) -> Vec<[f64; 2]> {
    let steps = ((sweep / TAU) * PIE_SEGMENTS as f64).ceil().max(1.0) as usize;
    let mut points = Vec::with_capacity(steps + 2);
    points.push([0.0, 0.0]);
    for i in 0..=steps {
        let angle = start - sweep * i as f64 / steps as f64;
        points.push([angle.cos(), angle.sin()]);
    }
    points
}

// ---------------------------------------------------------------------------
// Payload / outcome scatter chart
// ---------------------------------------------------------------------------

/// Render filtered launches as payload mass vs outcome class, one series per
/// booster category.
pub fn payload_scatter(ui: &mut Ui, data: &ScatterChartData, color_map: &ColorMap) {
    ui.heading(&data.title);

    Plot::new("payload_scatter")
        .height(CHART_HEIGHT)
        .legend(Legend::default())
        .x_axis_label("Payload Mass (kg)")
        .y_axis_label("class")
        .include_y(-0.25)
        .include_y(1.25)
        .include_x(0.0)
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            for (category, points) in data.series() {
                plot_ui.points(
                    Points::new(PlotPoints::new(points))
                        .name(category)
                        .color(color_map.color_for(category))
                        .shape(MarkerShape::Circle)
                        .filled(true)
                        .radius(5.0),
                );
            }
        });

    if data.records.is_empty() {
        ui.label("No launches in the selected payload range.");
    }
}

// ---------------------------------------------------------------------------
// Filtered records table
// ---------------------------------------------------------------------------

/// Tabulate the launches currently shown in the scatter chart.
pub fn records_table(ui: &mut Ui, records: &FilteredRecords) {
    TableBuilder::new(ui)
        .striped(true)
        .max_scroll_height(240.0)
        .column(Column::auto().at_least(50.0))
        .column(Column::auto().at_least(110.0))
        .column(Column::auto().at_least(90.0))
        .column(Column::auto().at_least(40.0))
        .column(Column::auto().at_least(120.0))
        .column(Column::remainder())
        .header(20.0, |mut header| {
            for title in ["Flight", "Launch Site", "Payload (kg)", "Class", "Booster", "Category"] {
                header.col(|ui| {
                    ui.strong(title);
                });
            }
        })
        .body(|body| {
            body.rows(18.0, records.len(), |mut row| {
                let rec = &records[row.index()];
                row.col(|ui| {
                    ui.label(rec.flight_number.map(|n| n.to_string()).unwrap_or_default());
                });
                row.col(|ui| {
                    ui.label(&rec.site);
                });
                row.col(|ui| {
                    ui.label(rec.payload_mass_kg.map(|m| format!("{m:.0}")).unwrap_or_default());
                });
                row.col(|ui| {
                    ui.label(rec.class.to_string());
                });
                row.col(|ui| {
                    ui.label(rec.booster_version.as_deref().unwrap_or(""));
                });
                row.col(|ui| {
                    ui.label(&rec.booster_category);
                });
            });
        });
}
