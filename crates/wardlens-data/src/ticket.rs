//! Liveness guard for one fetch-and-derive call.

use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use wardlens_contracts::{
    error::{WardlensError, WardlensResult},
    load::LoadId,
};

/// Handed to a load by its consumer. Cancelling any clone marks the load
/// dead, and its result is discarded instead of returned.
#[derive(Debug, Clone)]
pub struct LoadTicket {
    id: LoadId,
    live: Arc<AtomicBool>,
}

impl Default for LoadTicket {
    fn default() -> Self {
        Self::new()
    }
}

impl LoadTicket {
    pub fn new() -> Self {
        Self {
            id: LoadId::new(),
            live: Arc::new(AtomicBool::new(true)),
        }
    }

    pub fn id(&self) -> &LoadId {
        &self.id
    }

    /// The consumer went away. Idempotent.
    pub fn cancel(&self) {
        self.live.store(false, Ordering::Release);
    }

    pub fn is_live(&self) -> bool {
        self.live.load(Ordering::Acquire)
    }

    /// `Err(Cancelled)` once `cancel` has been called on any clone.
    pub fn ensure_live(&self) -> WardlensResult<()> {
        if self.is_live() {
            Ok(())
        } else {
            Err(WardlensError::Cancelled {
                load_id: self.id.to_string(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cancel_on_clone_is_visible_to_original() {
        let ticket = LoadTicket::new();
        let handle = ticket.clone();
        assert!(ticket.ensure_live().is_ok());

        handle.cancel();
        assert!(!ticket.is_live());
        match ticket.ensure_live() {
            Err(WardlensError::Cancelled { load_id }) => assert_eq!(load_id, ticket.id().to_string()),
            other => panic!("expected Cancelled, got {:?}", other),
        }
    }

    #[test]
    fn tickets_are_independent() {
        let a = LoadTicket::new();
        let b = LoadTicket::new();
        a.cancel();
        assert!(b.is_live());
        assert_ne!(a.id(), b.id());
    }
}
