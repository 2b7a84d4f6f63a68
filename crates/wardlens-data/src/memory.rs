//! In-memory implementation of `DatasetSource`.
//!
//! `InMemorySource` keeps one JSON document per dataset behind a `Mutex` and
//! counts every fetch, so tests can observe whether the cache hit the source.
//! An optional latency makes each fetch sleep first, to exercise
//! cancellation.

use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
    time::Duration,
};

use async_trait::async_trait;
use serde_json::Value;

use wardlens_contracts::error::{WardlensError, WardlensResult};
use wardlens_core::{Dataset, DatasetSource};

// ── Internal mutable state ────────────────────────────────────────────────────

pub(crate) struct InMemoryState {
    pub(crate) datasets: HashMap<Dataset, Value>,
    /// Fetches served so far, including failed ones.
    pub(crate) fetches: usize,
    /// Sleep before every fetch. Shared by all clones.
    pub(crate) latency: Option<Duration>,
}

// ── Public source ─────────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct InMemorySource {
    pub(crate) state: Arc<Mutex<InMemoryState>>,
}

impl Default for InMemorySource {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemorySource {
    /// A source with no datasets; every fetch fails until one is inserted.
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(InMemoryState {
                datasets: HashMap::new(),
                fetches: 0,
                latency: None,
            })),
        }
    }

    /// A source holding an empty array for every dataset.
    pub fn empty() -> Self {
        let source = Self::new();
        for dataset in Dataset::ALL {
            source.insert(dataset, Value::Array(Vec::new()));
        }
        source
    }

    pub fn with_latency(self, latency: Duration) -> Self {
        self.set_latency(Some(latency));
        self
    }

    /// Change the latency of fetches that start from now on.
    pub fn set_latency(&self, latency: Option<Duration>) {
        self.guard().latency = latency;
    }

    fn guard(&self) -> std::sync::MutexGuard<'_, InMemoryState> {
        self.state
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    pub fn insert(&self, dataset: Dataset, document: Value) {
        self.guard().datasets.insert(dataset, document);
    }

    pub fn remove(&self, dataset: Dataset) -> Option<Value> {
        self.guard().datasets.remove(&dataset)
    }

    pub fn fetch_count(&self) -> usize {
        self.guard().fetches
    }
}

// ── DatasetSource impl ────────────────────────────────────────────────────────

#[async_trait]
impl DatasetSource for InMemorySource {
    /// Returns `Err(LoadFailed)` for a dataset that was never inserted.
    async fn fetch(&self, dataset: Dataset) -> WardlensResult<Value> {
        let latency = self.guard().latency;
        if let Some(latency) = latency {
            tokio::time::sleep(latency).await;
        }
        let mut state = self.guard();
        state.fetches += 1;
        state
            .datasets
            .get(&dataset)
            .cloned()
            .ok_or_else(|| WardlensError::LoadFailed {
                dataset: dataset.name().to_string(),
                reason: "dataset not registered".to_string(),
            })
    }
}
