use std::sync::Arc;

use crate::color::ColorMap;
use crate::config::DashboardConfig;
use crate::dashboard::{DashboardView, SelectionChanged, on_selection_changed};
use crate::data::model::{LaunchTable, PayloadRange, SiteSelection};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    pub config: DashboardConfig,

    /// Loaded table (None until a file is loaded).
    pub table: Option<Arc<LaunchTable>>,

    /// Current dropdown value.
    pub site: SiteSelection,

    /// Current payload slider values.
    pub payload: PayloadRange,

    /// Range offered by the payload slider.
    pub slider_bounds: PayloadRange,

    /// Chart datasets for the last dispatched selection.
    pub view: Option<DashboardView>,

    /// Booster category colours for the scatter chart.
    pub color_map: ColorMap,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(DashboardConfig::default())
    }
}

impl AppState {
    pub fn new(config: DashboardConfig) -> Self {
        let slider_bounds = config.slider_bounds(None);
        Self {
            config,
            table: None,
            site: SiteSelection::All,
            payload: slider_bounds,
            slider_bounds,
            view: None,
            color_map: ColorMap::default(),
            status_message: None,
        }
    }

    /// Ingest a newly loaded table: reset the selection, seed the payload
    /// range from the observed bounds and compute the initial charts.
    pub fn set_table(&mut self, table: Arc<LaunchTable>) {
        self.slider_bounds = self.config.slider_bounds(table.payload_bounds);
        self.site = SiteSelection::All;
        self.payload = table.payload_bounds.unwrap_or(self.slider_bounds);
        self.color_map = ColorMap::new(&table.booster_categories);
        self.table = Some(table);
        self.status_message = None;

        self.dispatch(self.current_selection());
    }

    /// The selection as currently shown by the controls.
    pub fn current_selection(&self) -> SelectionChanged {
        SelectionChanged {
            site: self.site.clone(),
            payload: self.payload,
        }
    }

    /// Apply a selection event and recompute both chart datasets.
    pub fn dispatch(&mut self, event: SelectionChanged) {
        self.view = self
            .table
            .as_deref()
            .map(|table| on_selection_changed(table, &event));
        self.site = event.site;
        self.payload = event.payload;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{LaunchRecord, OutcomeClass};

    fn record(site: &str, mass: f64) -> LaunchRecord {
        LaunchRecord {
            flight_number: None,
            site: site.to_string(),
            mission_outcome: None,
            class: OutcomeClass::Success,
            payload_mass_kg: Some(mass),
            booster_version: None,
            booster_category: "FT".to_string(),
        }
    }

    fn loaded_state() -> AppState {
        let mut state = AppState::default();
        state.set_table(Arc::new(LaunchTable::from_records(vec![
            record("A", 500.0),
            record("B", 4000.0),
            record("B", 7000.0),
        ])));
        state
    }

    #[test]
    fn set_table_seeds_range_from_observed_payloads() {
        let state = loaded_state();
        assert_eq!(state.payload, PayloadRange::new(500.0, 7000.0));
        assert_eq!(state.slider_bounds, PayloadRange::new(0.0, 10_000.0));
        let view = state.view.as_ref().unwrap();
        assert_eq!(view.pie.counts.total(), 3);
        assert_eq!(view.scatter.records.len(), 3);
    }

    #[test]
    fn dispatch_replaces_view_with_latest_selection() {
        let mut state = loaded_state();
        state.dispatch(SelectionChanged {
            site: SiteSelection::parse("b"),
            payload: PayloadRange::new(0.0, 5000.0),
        });
        state.dispatch(SelectionChanged {
            site: SiteSelection::parse("a"),
            payload: PayloadRange::new(0.0, 10_000.0),
        });

        let view = state.view.as_ref().unwrap();
        assert_eq!(state.site, SiteSelection::Site("a".to_string()));
        assert_eq!(view.pie.counts.total(), 1);
        assert_eq!(view.scatter.records[0].site, "A");
    }

    #[test]
    fn dispatch_without_table_has_no_view() {
        let mut state = AppState::default();
        let event = state.current_selection();
        state.dispatch(event);
        assert!(state.view.is_none());
    }
}
