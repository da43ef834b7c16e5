use std::sync::Arc;

use eframe::egui::{self, Color32, RichText, Ui};

use crate::dashboard::SelectionChanged;
use crate::data::model::SiteSelection;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the site dropdown and payload sliders.
///
/// Returns the new selection when any control changed this frame.
pub fn side_panel(ui: &mut Ui, state: &AppState) -> Option<SelectionChanged> {
    ui.heading("Filters");
    ui.separator();

    let table = match &state.table {
        Some(table) => Arc::clone(table),
        None => {
            ui.label("No dataset loaded.");
            return None;
        }
    };

    let mut site = state.site.clone();
    let mut payload = state.payload;
    let bounds = state.slider_bounds;

    // ---- Launch site dropdown ----
    ui.strong("Launch Site");
    egui::ComboBox::from_id_salt("site_dropdown")
        .selected_text(site.to_string())
        .width(ui.available_width())
        .show_ui(ui, |ui: &mut Ui| {
            ui.selectable_value(&mut site, SiteSelection::All, "All Sites");
            for name in &table.sites {
                ui.selectable_value(&mut site, SiteSelection::Site(name.clone()), name);
            }
        });
    ui.add_space(8.0);
    ui.separator();

    // ---- Payload range ----
    ui.strong("Payload range (Kg):");
    let step = state.config.slider_step_kg;
    let low_changed = ui
        .add(
            egui::Slider::new(&mut payload.low, bounds.low..=bounds.high)
                .step_by(step)
                .text("min"),
        )
        .changed();
    let high_changed = ui
        .add(
            egui::Slider::new(&mut payload.high, bounds.low..=bounds.high)
                .step_by(step)
                .text("max"),
        )
        .changed();

    // Dragging one handle past the other pushes it along.
    if low_changed {
        payload.high = payload.high.max(payload.low);
    }
    if high_changed {
        payload.low = payload.low.min(payload.high);
    }
    payload = payload.clamp_to(&bounds);

    ui.horizontal_wrapped(|ui: &mut Ui| {
        for mark in state.config.slider_marks(&bounds) {
            ui.label(RichText::new(format!("{mark:.0}")).small().weak());
        }
    });

    if let Some(observed) = table.payload_bounds {
        if ui.small_button("Reset range").clicked() {
            payload = observed;
        }
    }

    let changed = site != state.site || payload != state.payload;
    changed.then_some(SelectionChanged { site, payload })
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let (Some(table), Some(view)) = (&state.table, &state.view) {
            ui.label(format!(
                "{} launches loaded, {} in payload range",
                table.len(),
                view.scatter.records.len()
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open launch records")
        .add_filter("Supported files", &["csv", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        match crate::data::loader::load_file(&path) {
            Ok(table) => state.set_table(Arc::new(table)),
            Err(e) => {
                log::error!("Failed to load file: {e:#}");
                state.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }
}
