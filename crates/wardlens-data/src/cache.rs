//! Memoized clinical snapshot.
//!
//! The cache holds at most one normalized `ClinicalData`. It is only ever
//! replaced by a complete, successful load, so a reader never sees a
//! half-loaded snapshot and a failed forced reload leaves the previous one
//! in place. Entries never expire; `invalidate` or `load(true)` refresh them.
//!
//! Every fetch is stamped with a generation when it starts. A load that
//! finishes after a newer one has already been stored, or that started
//! before an `invalidate`, returns its data to its caller but does not
//! replace the cached snapshot.

use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc,
};

use serde_json::Value;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use wardlens_contracts::{dashboard::ClinicalData, error::WardlensResult};
use wardlens_core::{
    normalize::{normalize_encounters, normalize_patients},
    Dataset, DatasetSource,
};

/// A loaded snapshot and the generation of the fetch that produced it.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub generation: u64,
    pub data: Arc<ClinicalData>,
}

#[derive(Default)]
struct Slot {
    current: Option<Snapshot>,
    /// Loads at or below this generation may not store.
    floor: u64,
}

pub struct ClinicalCache {
    source: Arc<dyn DatasetSource>,
    slot: RwLock<Slot>,
    started: AtomicU64,
}

impl ClinicalCache {
    pub fn new(source: Arc<dyn DatasetSource>) -> Self {
        Self {
            source,
            slot: RwLock::new(Slot::default()),
            started: AtomicU64::new(0),
        }
    }

    /// The cached snapshot, without touching the source.
    pub async fn cached(&self) -> Option<Arc<ClinicalData>> {
        self.slot.read().await.current.as_ref().map(|s| s.data.clone())
    }

    /// Generation of the most recently started fetch; 0 before any.
    pub fn generation(&self) -> u64 {
        self.started.load(Ordering::Acquire)
    }

    /// Return the cached snapshot, or fetch all six datasets concurrently,
    /// normalize them and cache the result. `force` skips the cached copy.
    ///
    /// Any dataset failing to load fails the whole call with
    /// `WardlensError::LoadFailed` and leaves the cache untouched.
    pub async fn load(&self, force: bool) -> WardlensResult<Arc<ClinicalData>> {
        Ok(self.load_snapshot(force).await?.data)
    }

    /// `load`, keeping the generation stamp.
    pub async fn load_snapshot(&self, force: bool) -> WardlensResult<Snapshot> {
        if !force {
            if let Some(hit) = self.slot.read().await.current.clone() {
                debug!(generation = hit.generation, "clinical snapshot served from cache");
                return Ok(hit);
            }
        }

        let generation = self.started.fetch_add(1, Ordering::AcqRel) + 1;

        let (patients, encounters, conditions, medications, observations, imaging_studies) = tokio::try_join!(
            self.fetch_rows(Dataset::Patients),
            self.fetch_rows(Dataset::Encounters),
            self.fetch_rows(Dataset::Conditions),
            self.fetch_rows(Dataset::Medications),
            self.fetch_rows(Dataset::Observations),
            self.fetch_rows(Dataset::ImagingStudies),
        )?;

        let data = Arc::new(ClinicalData {
            patients: normalize_patients(&patients),
            encounters: normalize_encounters(&encounters),
            conditions,
            medications,
            observations,
            imaging_studies,
        });
        let snapshot = Snapshot { generation, data };

        let mut slot = self.slot.write().await;
        if generation <= slot.floor {
            debug!(generation, floor = slot.floor, "superseded clinical snapshot not cached");
            return Ok(snapshot);
        }
        slot.current = Some(snapshot.clone());
        slot.floor = generation;
        drop(slot);

        info!(
            force,
            generation,
            patients = snapshot.data.patients.len(),
            encounters = snapshot.data.encounters.len(),
            "clinical snapshot loaded"
        );
        Ok(snapshot)
    }

    /// Drop the cached snapshot; the next `load` goes to the source and
    /// loads already in flight will not store their result.
    pub async fn invalidate(&self) {
        let mut slot = self.slot.write().await;
        slot.current = None;
        slot.floor = slot.floor.max(self.generation());
        debug!(floor = slot.floor, "clinical snapshot invalidated");
    }

    async fn fetch_rows(&self, dataset: Dataset) -> WardlensResult<Vec<Value>> {
        match self.source.fetch(dataset).await? {
            Value::Array(rows) => Ok(rows),
            other => {
                warn!(
                    dataset = dataset.name(),
                    kind = json_kind(&other),
                    "dataset is not an array; treating as empty"
                );
                Ok(Vec::new())
            }
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
