//! Launch records dashboard: a launch table, two pure chart queries over it,
//! and the egui front end that re-runs them on every selection change.

pub mod app;
pub mod color;
pub mod config;
pub mod dashboard;
pub mod data;
pub mod state;
pub mod ui;
