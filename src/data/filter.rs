use super::model::{FilteredRecords, LaunchTable, OutcomeCounts, PayloadRange, SiteSelection};

// ---------------------------------------------------------------------------
// Pie chart input: outcome counts per site selection
// ---------------------------------------------------------------------------

/// Count launches per outcome class for the selected site.
///
/// * `SiteSelection::All` → every record is counted
/// * a concrete site → only records whose site matches under [`site_key`]
///   normalization; an unknown site yields empty counts
///
/// [`site_key`]: super::model::site_key
pub fn aggregate_outcomes(table: &LaunchTable, selection: &SiteSelection) -> OutcomeCounts {
    let key = selection.key();
    table
        .records
        .iter()
        .filter(|rec| key.as_deref().map_or(true, |k| rec.site_matches(k)))
        .map(|rec| rec.class)
        .collect()
}

// ---------------------------------------------------------------------------
// Scatter chart input: records within the payload range
// ---------------------------------------------------------------------------

/// Return the records inside `range` (inclusive) at the selected site.
///
/// Both predicates are applied in a single pass. Records without a payload
/// mass never fall inside a range.
pub fn filter_records(
    table: &LaunchTable,
    selection: &SiteSelection,
    range: &PayloadRange,
) -> FilteredRecords {
    let key = selection.key();
    table
        .records
        .iter()
        .filter(|rec| {
            let in_range = rec.payload_mass_kg.is_some_and(|m| range.contains(m));
            in_range && key.as_deref().map_or(true, |k| rec.site_matches(k))
        })
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{LaunchRecord, OutcomeClass};

    fn record(site: &str, class: i64, mass: f64) -> LaunchRecord {
        LaunchRecord {
            flight_number: None,
            site: site.to_string(),
            mission_outcome: None,
            class: OutcomeClass::try_from(class).unwrap(),
            payload_mass_kg: Some(mass),
            booster_version: None,
            booster_category: "v1.1".to_string(),
        }
    }

    fn two_site_table() -> LaunchTable {
        LaunchTable::from_records(vec![
            record("X", 1, 100.0),
            record("X", 0, 5000.0),
            record("X", 1, 9000.0),
            record("Y", 0, 2500.0),
            record("Y", 0, 7000.0),
        ])
    }

    #[test]
    fn aggregate_all_sites_counts_every_record() {
        let counts = aggregate_outcomes(&two_site_table(), &SiteSelection::All);
        assert_eq!(counts.get(OutcomeClass::Failure), 3);
        assert_eq!(counts.get(OutcomeClass::Success), 2);
    }

    #[test]
    fn aggregate_single_site_matches_lowercase_selection() {
        let counts = aggregate_outcomes(&two_site_table(), &SiteSelection::parse("x"));
        assert_eq!(counts.get(OutcomeClass::Failure), 1);
        assert_eq!(counts.get(OutcomeClass::Success), 2);
    }

    #[test]
    fn aggregate_unknown_site_is_empty() {
        let counts = aggregate_outcomes(&two_site_table(), &SiteSelection::parse("unknown-site"));
        assert!(counts.is_empty());
        assert_eq!(counts.iter().count(), 0);
    }

    #[test]
    fn aggregate_site_with_only_failures_reports_one_class() {
        let counts = aggregate_outcomes(&two_site_table(), &SiteSelection::parse("Y"));
        assert_eq!(counts.iter().collect::<Vec<_>>(), vec![(OutcomeClass::Failure, 2)]);
    }

    #[test]
    fn filter_keeps_inclusive_payload_bounds() {
        let table = LaunchTable::from_records(vec![
            record("X", 1, 100.0),
            record("X", 0, 5000.0),
            record("X", 1, 9000.0),
        ]);
        let rows = filter_records(&table, &SiteSelection::All, &PayloadRange::new(0.0, 5000.0));
        assert_eq!(rows, table.records[..2].to_vec());
    }

    #[test]
    fn filter_restricts_site_and_range_together() {
        let rows = filter_records(
            &two_site_table(),
            &SiteSelection::parse("y"),
            &PayloadRange::new(2000.0, 6000.0),
        );
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].payload_mass_kg, Some(2500.0));
    }

    #[test]
    fn filter_inverted_range_is_empty() {
        let rows = filter_records(
            &two_site_table(),
            &SiteSelection::All,
            &PayloadRange::new(6000.0, 1000.0),
        );
        assert!(rows.is_empty());
    }

    #[test]
    fn filter_skips_records_without_payload() {
        let mut missing = record("X", 1, 0.0);
        missing.payload_mass_kg = None;
        let table = LaunchTable::from_records(vec![missing, record("X", 0, 10.0)]);
        let rows = filter_records(&table, &SiteSelection::All, &PayloadRange::new(0.0, 100.0));
        assert_eq!(rows.len(), 1);
    }

    #[test]
    fn filter_unknown_site_is_empty() {
        let rows = filter_records(
            &two_site_table(),
            &SiteSelection::parse("unknown-site"),
            &PayloadRange::new(0.0, 10_000.0),
        );
        assert!(rows.is_empty());
    }
}
