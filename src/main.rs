use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, anyhow};
use clap::Parser;
use eframe::egui;

use launch_dashboard::app::LaunchDashboardApp;
use launch_dashboard::config::{DEFAULT_DATA_FILE, DashboardConfig};
use launch_dashboard::data::loader::load_file;
use launch_dashboard::state::AppState;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Launch records file (.csv, .json or .parquet)
    data: Option<PathBuf>,

    /// JSON dashboard settings
    #[arg(short, long)]
    config: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => DashboardConfig::from_file(path).context("loading dashboard config")?,
        None => DashboardConfig::default(),
    };

    let data_path = args
        .data
        .or_else(|| config.data_path.clone())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_FILE));

    let window_size = config.window_size;
    let title = config.title.clone();
    let mut state = AppState::new(config);
    load_initial_table(&mut state, &data_path);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(window_size)
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        &title,
        options,
        Box::new(|_cc| Ok(Box::new(LaunchDashboardApp::new(state)))),
    )
    .map_err(|e| anyhow!("running dashboard: {e}"))
}

/// A missing or broken startup file is reported in the UI rather than
/// aborting; another file can still be opened from the menu.
fn load_initial_table(state: &mut AppState, path: &Path) {
    match load_file(path) {
        Ok(table) => state.set_table(Arc::new(table)),
        Err(e) => {
            log::warn!("Could not load {}: {e:#}", path.display());
            state.status_message = Some(format!("Error: {e:#}"));
        }
    }
}
