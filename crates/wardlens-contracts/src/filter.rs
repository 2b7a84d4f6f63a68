//! Filter specifications and filter option sets.
//!
//! Every dimension uses the `"All"` sentinel to mean "no constraint". Option
//! lists handed to the view layer are never empty: when no value was observed
//! they hold `["All", "Unknown"]`.

use serde::{Deserialize, Serialize};

/// Sentinel meaning "do not filter on this dimension".
pub const ALL: &str = "All";

/// Placeholder option (and default label) for dimensions with no data.
pub const UNKNOWN: &str = "Unknown";

/// User-selected encounter filter values.
///
/// `readmitted` accepts `"Yes"` / `"No"` / `"All"`; `year` is compared
/// against the resolved calendar year rendered as a string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncounterFilters {
    pub department: String,
    pub encounter_type: String,
    pub year: String,
    pub readmitted: String,
}

impl Default for EncounterFilters {
    fn default() -> Self {
        Self {
            department: ALL.to_string(),
            encounter_type: ALL.to_string(),
            year: ALL.to_string(),
            readmitted: ALL.to_string(),
        }
    }
}

/// User-selected patient filter values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatientFilters {
    pub gender: String,
    pub city: String,
    pub condition: String,
    /// Inclusive lower bound. Patients with unknown age are never excluded by it.
    pub age_min: Option<u32>,
    /// Inclusive upper bound. Patients with unknown age are never excluded by it.
    pub age_max: Option<u32>,
    /// Case-insensitive substring matched against id, name, city and condition.
    pub query: String,
}

impl Default for PatientFilters {
    fn default() -> Self {
        Self {
            gender: ALL.to_string(),
            city: ALL.to_string(),
            condition: ALL.to_string(),
            age_min: None,
            age_max: None,
            query: String::new(),
        }
    }
}

/// Option lists for the encounter filter bar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterOptions {
    pub department: Vec<String>,
    pub encounter_type: Vec<String>,
    pub year: Vec<String>,
    pub readmitted: Vec<String>,
}

/// Option lists for the patient filter bar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatientFilterOptions {
    pub gender: Vec<String>,
    pub city: Vec<String>,
    pub condition: Vec<String>,
}

/// A `{ name, value }` row as consumed by bar and line charts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountRow {
    pub name: String,
    pub value: usize,
}
