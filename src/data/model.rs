use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// OutcomeClass – binary launch outcome
// ---------------------------------------------------------------------------

/// Launch outcome as stored in the `class` column: 1 = success, 0 = failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub enum OutcomeClass {
    Failure = 0,
    Success = 1,
}

impl OutcomeClass {
    pub const ALL: [OutcomeClass; 2] = [OutcomeClass::Failure, OutcomeClass::Success];

    /// Index into fixed-size per-class accumulators.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Numeric value as plotted on the scatter y axis.
    pub fn as_f64(self) -> f64 {
        self.index() as f64
    }
}

impl TryFrom<i64> for OutcomeClass {
    type Error = String;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(OutcomeClass::Failure),
            1 => Ok(OutcomeClass::Success),
            other => Err(format!("outcome class must be 0 or 1, got {other}")),
        }
    }
}

impl From<OutcomeClass> for i64 {
    fn from(class: OutcomeClass) -> Self {
        class as i64
    }
}

impl fmt::Display for OutcomeClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.index())
    }
}

// ---------------------------------------------------------------------------
// LaunchRecord – one row of the launch table
// ---------------------------------------------------------------------------

/// A single launch (one row of the source table).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LaunchRecord {
    #[serde(rename = "Flight Number", default)]
    pub flight_number: Option<u32>,
    /// Launch site identifier, kept in its original case.
    #[serde(rename = "Launch Site")]
    pub site: String,
    #[serde(rename = "Mission Outcome", default)]
    pub mission_outcome: Option<String>,
    pub class: OutcomeClass,
    /// Payload mass in kilograms; absent in some raw rows.
    #[serde(rename = "Payload Mass (kg)", default)]
    pub payload_mass_kg: Option<f64>,
    #[serde(rename = "Booster Version", default)]
    pub booster_version: Option<String>,
    /// Hardware family, only used for colour grouping.
    #[serde(rename = "Booster Version Category")]
    pub booster_category: String,
}

impl LaunchRecord {
    /// Whether this record's site matches an already-normalized site key.
    pub fn site_matches(&self, key: &str) -> bool {
        self.site.trim().eq_ignore_ascii_case(key)
    }
}

/// Normalization shared by every site comparison: trimmed, ASCII lower-case.
pub fn site_key(site: &str) -> String {
    site.trim().to_ascii_lowercase()
}

// ---------------------------------------------------------------------------
// Selections
// ---------------------------------------------------------------------------

/// Dropdown value meaning "no site restriction".
pub const ALL_SITES: &str = "ALL";

/// Current launch-site filter.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SiteSelection {
    #[default]
    All,
    /// A concrete site, as labelled in the dropdown.
    Site(String),
}

impl SiteSelection {
    /// Interpret a raw dropdown value; `"ALL"` in any case is the sentinel.
    pub fn parse(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case(ALL_SITES) {
            SiteSelection::All
        } else {
            SiteSelection::Site(value.to_string())
        }
    }

    /// Normalized key to compare records against, `None` for all sites.
    pub fn key(&self) -> Option<String> {
        match self {
            SiteSelection::All => None,
            SiteSelection::Site(site) => Some(site_key(site)),
        }
    }
}

impl fmt::Display for SiteSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SiteSelection::All => write!(f, "All Sites"),
            SiteSelection::Site(site) => write!(f, "{site}"),
        }
    }
}

/// Closed payload interval `[low, high]` in kilograms.
///
/// An inverted interval (`low > high`) is representable and contains nothing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PayloadRange {
    pub low: f64,
    pub high: f64,
}

impl PayloadRange {
    pub fn new(low: f64, high: f64) -> Self {
        Self { low, high }
    }

    pub fn contains(&self, mass: f64) -> bool {
        self.low <= mass && mass <= self.high
    }

    /// Restrict to `bounds`, keeping `low <= high`.
    pub fn clamp_to(&self, bounds: &PayloadRange) -> Self {
        let low = self.low.clamp(bounds.low, bounds.high);
        let high = self.high.clamp(bounds.low, bounds.high);
        Self {
            low: low.min(high),
            high,
        }
    }
}

// ---------------------------------------------------------------------------
// Derived views
// ---------------------------------------------------------------------------

/// Occurrences per outcome class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OutcomeCounts {
    counts: [usize; 2],
}

impl OutcomeCounts {
    pub fn record(&mut self, class: OutcomeClass) {
        self.counts[class.index()] += 1;
    }

    pub fn get(&self, class: OutcomeClass) -> usize {
        self.counts[class.index()]
    }

    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }

    /// Number of classes with at least one occurrence.
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    /// `(class, count)` pairs for classes that actually occurred.
    pub fn iter(&self) -> impl Iterator<Item = (OutcomeClass, usize)> + '_ {
        OutcomeClass::ALL
            .into_iter()
            .map(|class| (class, self.get(class)))
            .filter(|(_, count)| *count > 0)
    }
}

impl FromIterator<OutcomeClass> for OutcomeCounts {
    fn from_iter<I: IntoIterator<Item = OutcomeClass>>(iter: I) -> Self {
        let mut counts = OutcomeCounts::default();
        for class in iter {
            counts.record(class);
        }
        counts
    }
}

/// Records passing the current site and payload filters.
pub type FilteredRecords = Vec<LaunchRecord>;

// ---------------------------------------------------------------------------
// LaunchTable – the complete loaded dataset
// ---------------------------------------------------------------------------

/// The full parsed table with pre-computed indices for the controls.
#[derive(Debug, Clone, Default)]
pub struct LaunchTable {
    /// All launches (rows), in file order.
    pub records: Vec<LaunchRecord>,
    /// Distinct site identifiers in first-appearance order.
    pub sites: Vec<String>,
    /// Sorted distinct booster categories.
    pub booster_categories: BTreeSet<String>,
    /// Observed `[min, max]` payload mass, `None` if no row has one.
    pub payload_bounds: Option<PayloadRange>,
}

impl LaunchTable {
    /// Build indices from the loaded records.
    pub fn from_records(records: Vec<LaunchRecord>) -> Self {
        let mut sites: Vec<String> = Vec::new();
        let mut booster_categories = BTreeSet::new();
        let mut payload_bounds: Option<PayloadRange> = None;

        for rec in &records {
            if !sites.contains(&rec.site) {
                sites.push(rec.site.clone());
            }
            booster_categories.insert(rec.booster_category.clone());

            if let Some(mass) = rec.payload_mass_kg.filter(|m| !m.is_nan()) {
                payload_bounds = Some(match payload_bounds {
                    Some(b) => PayloadRange::new(b.low.min(mass), b.high.max(mass)),
                    None => PayloadRange::new(mass, mass),
                });
            }
        }

        LaunchTable {
            records,
            sites,
            booster_categories,
            payload_bounds,
        }
    }

    /// Number of launches.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
