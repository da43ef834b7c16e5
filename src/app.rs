use eframe::egui::{self, ScrollArea, Ui};

use crate::state::AppState;
use crate::ui::{charts, panels};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct LaunchDashboardApp {
    pub state: AppState,
}

impl LaunchDashboardApp {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

impl Default for LaunchDashboardApp {
    fn default() -> Self {
        Self::new(AppState::default())
    }
}

impl eframe::App for LaunchDashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: site + payload controls ----
        let event = egui::SidePanel::left("filter_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| panels::side_panel(ui, &self.state))
            .inner;

        if let Some(event) = event {
            self.state.dispatch(event);
        }

        // ---- Central panel: charts ----
        egui::CentralPanel::default().show(ctx, |ui| {
            dashboard(ui, &self.state);
        });
    }
}

fn dashboard(ui: &mut Ui, state: &AppState) {
    ui.vertical_centered(|ui: &mut Ui| {
        ui.heading(egui::RichText::new(&state.config.title).size(28.0).strong());
    });
    ui.separator();

    let Some(view) = &state.view else {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Open a launch records file  (File → Open…)");
        });
        return;
    };

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            charts::success_pie(ui, &view.pie);
            ui.add_space(12.0);
            charts::payload_scatter(ui, &view.scatter, &state.color_map);
            ui.add_space(12.0);
            egui::CollapsingHeader::new(format!(
                "Launches in range ({})",
                view.scatter.records.len()
            ))
            .default_open(false)
            .show(ui, |ui: &mut Ui| {
                charts::records_table(ui, &view.scatter.records);
            });
        });
}
