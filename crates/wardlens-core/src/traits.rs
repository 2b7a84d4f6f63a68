//! The data-access seam.
//!
//! The engine never knows where raw JSON comes from. A `DatasetSource`
//! hands back one untyped JSON document per dataset; the data crate
//! provides a directory-backed and an in-memory implementation, and tests
//! plug in their own.

use async_trait::async_trait;
use serde_json::Value;

use wardlens_contracts::error::WardlensResult;

/// The six raw collections a dashboard is built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Dataset {
    Patients,
    Encounters,
    Conditions,
    Medications,
    Observations,
    ImagingStudies,
}

impl Dataset {
    pub const ALL: [Dataset; 6] = [
        Dataset::Patients,
        Dataset::Encounters,
        Dataset::Conditions,
        Dataset::Medications,
        Dataset::Observations,
        Dataset::ImagingStudies,
    ];

    /// Stable name used in logs and `WardlensError::LoadFailed`.
    pub fn name(self) -> &'static str {
        match self {
            Dataset::Patients => "patients",
            Dataset::Encounters => "encounters",
            Dataset::Conditions => "conditions",
            Dataset::Medications => "medications",
            Dataset::Observations => "observations",
            Dataset::ImagingStudies => "imaging_studies",
        }
    }

    pub fn file_name(self) -> String {
        format!("{}.json", self.name())
    }
}

/// A provider of raw dataset documents.
///
/// Implementations must report a missing or unreadable dataset as
/// `WardlensError::LoadFailed`. What the document contains is not their
/// concern: a non-array payload is handled downstream.
#[async_trait]
pub trait DatasetSource: Send + Sync {
    /// Fetch the raw JSON document for `dataset`.
    async fn fetch(&self, dataset: Dataset) -> WardlensResult<Value>;
}
