//! Canonical encounter entity.

use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// An encounter record after normalization.
///
/// `patient_id` is a soft reference: it may name a patient that is not in the
/// loaded set. Nothing downstream relies on referential integrity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Encounter {
    /// Never empty. Synthesized as `ENC-NNNNN` (1-based index) when absent.
    pub encounter_id: String,
    pub patient_id: String,
    pub encounter_type: String,
    pub department: String,
    /// Always 0 or 1.
    pub readmitted_30d_flag: u8,
    /// Always finite and non-negative.
    pub total_cost_usd: f64,
    /// The date text exactly as it appeared in the raw record.
    #[serde(rename = "dateStr")]
    pub date_str: String,
    /// The parsed date, or `None` when the text could not be resolved.
    #[serde(rename = "dateObj")]
    pub date: Option<DateTime<Utc>>,
    /// Unrecognised raw fields, passed through untouched.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Encounter {
    /// Calendar year (UTC) of the resolved date.
    pub fn year(&self) -> Option<i32> {
        self.date.map(|d| d.year())
    }

    pub fn is_readmitted(&self) -> bool {
        self.readmitted_30d_flag == 1
    }
}
