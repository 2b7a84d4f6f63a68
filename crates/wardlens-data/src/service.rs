//! The entry point the view layer calls.
//!
//! `DashboardService` combines the clinical cache with a memoized derived
//! dashboard. Every call takes a [`LoadTicket`]; if the ticket is cancelled
//! while the call is in flight, the result is dropped and the caller gets
//! `WardlensError::Cancelled` instead.
//!
//! The derived dashboard carries the generation of the clinical snapshot it
//! was built from, and only a build from a newer generation may replace it.

use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{debug, info};

use wardlens_contracts::{dashboard::Dashboard, error::WardlensResult};
use wardlens_core::DatasetSource;
use wardlens_synth::Synthesizer;

use crate::{assemble::assemble_dashboard, cache::ClinicalCache, ticket::LoadTicket};

#[derive(Default)]
struct Derived {
    current: Option<Arc<Dashboard>>,
    /// Builds from snapshots at or below this generation may not store.
    floor: u64,
}

pub struct DashboardService {
    cache: ClinicalCache,
    synth: Synthesizer,
    derived: RwLock<Derived>,
}

impl DashboardService {
    pub fn new(source: Arc<dyn DatasetSource>, synth: Synthesizer) -> Self {
        Self {
            cache: ClinicalCache::new(source),
            synth,
            derived: RwLock::new(Derived::default()),
        }
    }

    pub fn cache(&self) -> &ClinicalCache {
        &self.cache
    }

    /// The memoized dashboard, building it on first use.
    pub async fn dashboard(&self, ticket: &LoadTicket) -> WardlensResult<Arc<Dashboard>> {
        let hit = self.derived.read().await.current.clone();
        if let Some(hit) = hit {
            ticket.ensure_live()?;
            debug!(load_id = %ticket.id(), "dashboard served from cache");
            return Ok(hit);
        }
        self.build(ticket, false).await
    }

    /// Refetch every dataset and rebuild, bypassing both caches.
    ///
    /// On failure both caches keep their previous contents and the error is
    /// returned; no stale dashboard is substituted.
    pub async fn reload(&self, ticket: &LoadTicket) -> WardlensResult<Arc<Dashboard>> {
        self.build(ticket, true).await
    }

    /// Drop both cached layers.
    pub async fn invalidate(&self) {
        self.cache.invalidate().await;
        let mut derived = self.derived.write().await;
        derived.current = None;
        derived.floor = derived.floor.max(self.cache.generation());
    }

    async fn build(&self, ticket: &LoadTicket, force: bool) -> WardlensResult<Arc<Dashboard>> {
        let snapshot = self.cache.load_snapshot(force).await?;
        ticket.ensure_live()?;

        let dashboard = Arc::new(assemble_dashboard(&snapshot.data, &self.synth));
        ticket.ensure_live()?;

        let mut derived = self.derived.write().await;
        if snapshot.generation <= derived.floor {
            debug!(
                load_id = %ticket.id(),
                generation = snapshot.generation,
                floor = derived.floor,
                "superseded dashboard not cached"
            );
            return Ok(dashboard);
        }
        derived.current = Some(dashboard.clone());
        derived.floor = snapshot.generation;
        drop(derived);

        info!(
            load_id = %ticket.id(),
            generation = snapshot.generation,
            force,
            appointments = dashboard.appointments.len(),
            "dashboard built"
        );
        Ok(dashboard)
    }
}
