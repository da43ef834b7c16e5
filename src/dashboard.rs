use std::collections::BTreeMap;

use crate::data::filter::{aggregate_outcomes, filter_records};
use crate::data::model::{FilteredRecords, LaunchTable, OutcomeCounts, PayloadRange, SiteSelection};

// ---------------------------------------------------------------------------
// Selection event
// ---------------------------------------------------------------------------

/// Emitted by the controls whenever the site or payload range changes.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectionChanged {
    pub site: SiteSelection,
    pub payload: PayloadRange,
}

// ---------------------------------------------------------------------------
// Chart datasets
// ---------------------------------------------------------------------------

/// Input for the success pie chart.
#[derive(Debug, Clone, PartialEq)]
pub struct PieChartData {
    pub title: String,
    pub counts: OutcomeCounts,
}

/// Input for the payload / outcome scatter chart.
#[derive(Debug, Clone, PartialEq)]
pub struct ScatterChartData {
    pub title: String,
    pub records: FilteredRecords,
}

impl ScatterChartData {
    /// `(payload_kg, class)` points grouped by booster category.
    pub fn series(&self) -> BTreeMap<&str, Vec<[f64; 2]>> {
        let mut series: BTreeMap<&str, Vec<[f64; 2]>> = BTreeMap::new();
        for rec in &self.records {
            if let Some(mass) = rec.payload_mass_kg {
                series
                    .entry(rec.booster_category.as_str())
                    .or_default()
                    .push([mass, rec.class.as_f64()]);
            }
        }
        series
    }
}

/// Everything the central panel renders for one selection.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardView {
    pub pie: PieChartData,
    pub scatter: ScatterChartData,
}

// ---------------------------------------------------------------------------
// Handler
// ---------------------------------------------------------------------------

pub fn pie_title(site: &SiteSelection) -> String {
    match site {
        SiteSelection::All => "Total Success Launches By Class".to_string(),
        SiteSelection::Site(site) => format!("Total Success Launches for Site {site}"),
    }
}

pub fn scatter_title(site: &SiteSelection) -> String {
    match site {
        SiteSelection::All => "Correlation between Payload and Success for all Sites".to_string(),
        SiteSelection::Site(site) => {
            format!("Correlation between Payload and Success for Site {site}")
        }
    }
}

/// Recompute both chart datasets for a selection. Pure: the table is only read.
pub fn on_selection_changed(table: &LaunchTable, event: &SelectionChanged) -> DashboardView {
    let counts = aggregate_outcomes(table, &event.site);
    let records = filter_records(table, &event.site, &event.payload);

    log::debug!(
        "selection {} [{:.0}, {:.0}] kg → {} counted, {} plotted",
        event.site,
        event.payload.low,
        event.payload.high,
        counts.total(),
        records.len()
    );

    DashboardView {
        pie: PieChartData {
            title: pie_title(&event.site),
            counts,
        },
        scatter: ScatterChartData {
            title: scatter_title(&event.site),
            records,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{LaunchRecord, OutcomeClass};

    fn record(site: &str, class: OutcomeClass, mass: f64, category: &str) -> LaunchRecord {
        LaunchRecord {
            flight_number: None,
            site: site.to_string(),
            mission_outcome: None,
            class,
            payload_mass_kg: Some(mass),
            booster_version: None,
            booster_category: category.to_string(),
        }
    }

    fn table() -> LaunchTable {
        LaunchTable::from_records(vec![
            record("KSC LC-39A", OutcomeClass::Success, 2490.0, "FT"),
            record("KSC LC-39A", OutcomeClass::Failure, 5300.0, "FT"),
            record("VAFB SLC-4E", OutcomeClass::Success, 9600.0, "B4"),
        ])
    }

    #[test]
    fn all_sites_view_uses_fixed_titles() {
        let event = SelectionChanged {
            site: SiteSelection::All,
            payload: PayloadRange::new(0.0, 10_000.0),
        };
        let view = on_selection_changed(&table(), &event);
        assert_eq!(view.pie.title, "Total Success Launches By Class");
        assert_eq!(
            view.scatter.title,
            "Correlation between Payload and Success for all Sites"
        );
        assert_eq!(view.pie.counts.total(), 3);
        assert_eq!(view.scatter.records.len(), 3);
    }

    #[test]
    fn site_view_interpolates_site_into_titles() {
        let event = SelectionChanged {
            site: SiteSelection::parse("ksc lc-39a"),
            payload: PayloadRange::new(0.0, 3000.0),
        };
        let view = on_selection_changed(&table(), &event);
        assert_eq!(view.pie.title, "Total Success Launches for Site ksc lc-39a");
        assert_eq!(
            view.scatter.title,
            "Correlation between Payload and Success for Site ksc lc-39a"
        );
        assert_eq!(view.pie.counts.get(OutcomeClass::Success), 1);
        assert_eq!(view.pie.counts.get(OutcomeClass::Failure), 1);
        assert_eq!(view.scatter.records.len(), 1);
    }

    #[test]
    fn series_groups_points_by_booster_category() {
        let event = SelectionChanged {
            site: SiteSelection::All,
            payload: PayloadRange::new(0.0, 10_000.0),
        };
        let view = on_selection_changed(&table(), &event);
        let series = view.scatter.series();
        assert_eq!(series.len(), 2);
        assert_eq!(series["FT"], vec![[2490.0, 1.0], [5300.0, 0.0]]);
        assert_eq!(series["B4"], vec![[9600.0, 1.0]]);
    }

    #[test]
    fn repeated_events_yield_identical_views() {
        let table = table();
        let event = SelectionChanged {
            site: SiteSelection::parse("VAFB SLC-4E"),
            payload: PayloadRange::new(1000.0, 9600.0),
        };
        assert_eq!(
            on_selection_changed(&table, &event),
            on_selection_changed(&table, &event)
        );
    }
}
