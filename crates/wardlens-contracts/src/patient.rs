//! Canonical patient entity.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A patient record after normalization.
///
/// The canonical fields always hold a value; `extra` carries every field of
/// the raw record the normalizer did not recognise, so nothing the source
/// file held is lost. Canonical fields win over same-named raw fields, which
/// is why the normalizer strips them from `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Patient {
    /// Never empty. Synthesized as `PAT-NNNN` (1-based index) when the raw
    /// record has no identifier.
    pub patient_id: String,
    pub full_name: String,
    pub gender: String,
    pub city: String,
    /// `None` when the raw value is missing or not a finite, non-negative number.
    pub age: Option<u32>,
    pub primary_condition_name: String,
    /// Unrecognised raw fields, passed through untouched.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Headline counts over a (usually filtered) patient list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatientKpis {
    pub total: usize,
    pub male: usize,
    pub female: usize,
}
