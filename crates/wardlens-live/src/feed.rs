//! A live value behind a periodic tick.
//!
//! `LiveFeed` is a two-state machine: `Idle` until `subscribe` starts a
//! tokio interval, `Running` until `unsubscribe` stops it. Every feed owns
//! its state, generator and timer, so two feeds at different cadences never
//! share a value or a clock.
//!
//! ```rust,ignore
//! use wardlens_live::{LiveFeed, VitalsState, VITALS_INTERVAL};
//!
//! let mut vitals = LiveFeed::new(VitalsState::default());
//! vitals.subscribe(VITALS_INTERVAL, |v| println!("hr {:.0}", v.hr))?;
//! // ...
//! vitals.unsubscribe();
//! ```

use std::{
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc, Mutex, MutexGuard,
    },
    time::Duration,
};

use rand::{rngs::StdRng, Rng, SeedableRng};
use tokio::{
    task::JoinHandle,
    time::{interval_at, Instant, MissedTickBehavior},
};
use tracing::{debug, info, warn};

use wardlens_contracts::error::{WardlensError, WardlensResult};

/// A fixed-shape record advanced once per tick.
pub trait LiveState: Clone + Send + 'static {
    /// The next value. Must not mutate `self`; the feed swaps it in.
    fn evolve<R: Rng + ?Sized>(&self, rng: &mut R) -> Self;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedState {
    Idle,
    Running,
}

struct Shared<S> {
    value: S,
    rng: StdRng,
}

struct Ticker {
    stop: Arc<AtomicBool>,
    handle: JoinHandle<()>,
}

pub struct LiveFeed<S: LiveState> {
    shared: Arc<Mutex<Shared<S>>>,
    ticker: Option<Ticker>,
}

fn lock<S>(shared: &Mutex<Shared<S>>) -> WardlensResult<MutexGuard<'_, Shared<S>>> {
    shared.lock().map_err(|e| WardlensError::StateMachineError {
        reason: format!("live state lock poisoned: {}", e),
    })
}

impl<S: LiveState> LiveFeed<S> {
    /// An idle feed with an entropy-seeded generator.
    pub fn new(initial: S) -> Self {
        Self::with_rng(initial, StdRng::from_entropy())
    }

    /// An idle feed with a reproducible generator.
    pub fn seeded(initial: S, seed: u64) -> Self {
        Self::with_rng(initial, StdRng::seed_from_u64(seed))
    }

    fn with_rng(initial: S, rng: StdRng) -> Self {
        Self {
            shared: Arc::new(Mutex::new(Shared {
                value: initial,
                rng,
            })),
            ticker: None,
        }
    }

    pub fn state(&self) -> FeedState {
        match self.ticker {
            Some(_) => FeedState::Running,
            None => FeedState::Idle,
        }
    }

    /// The current value.
    pub fn snapshot(&self) -> WardlensResult<S> {
        Ok(lock(&self.shared)?.value.clone())
    }

    /// Advance once, outside any timer, and return the new value.
    pub fn step(&self) -> WardlensResult<S> {
        let mut guard = lock(&self.shared)?;
        let shared = &mut *guard;
        shared.value = shared.value.evolve(&mut shared.rng);
        Ok(shared.value.clone())
    }

    /// Idle → Running. Ticks every `period`, first one `period` from now,
    /// and hands each new value to `on_tick`.
    ///
    /// Must be called inside a tokio runtime. Returns
    /// `WardlensError::StateMachineError` if the feed is already running, the
    /// period is zero, or there is no runtime.
    pub fn subscribe<F>(&mut self, period: Duration, mut on_tick: F) -> WardlensResult<()>
    where
        F: FnMut(&S) + Send + 'static,
    {
        if self.ticker.is_some() {
            return Err(WardlensError::StateMachineError {
                reason: "feed is already running; unsubscribe first".to_string(),
            });
        }
        if period.is_zero() {
            return Err(WardlensError::StateMachineError {
                reason: "tick period must be non-zero".to_string(),
            });
        }
        let runtime =
            tokio::runtime::Handle::try_current().map_err(|e| WardlensError::StateMachineError {
                reason: format!("subscribe needs a tokio runtime: {}", e),
            })?;

        let stop = Arc::new(AtomicBool::new(false));
        let flag = stop.clone();
        let shared = self.shared.clone();

        let handle = runtime.spawn(async move {
            let mut interval = interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                if flag.load(Ordering::Acquire) {
                    break;
                }
                let next = {
                    let Ok(mut guard) = shared.lock() else {
                        warn!("live state lock poisoned; stopping ticker");
                        break;
                    };
                    // Re-checked under the lock: an older ticker blocked here while
                    // the feed was unsubscribed and resubscribed must not tick.
                    if flag.load(Ordering::Acquire) {
                        break;
                    }
                    let g = &mut *guard;
                    g.value = g.value.evolve(&mut g.rng);
                    g.value.clone()
                };
                on_tick(&next);
            }
            debug!("live ticker exited");
        });

        info!(period_ms = period.as_millis() as u64, "live feed subscribed");
        self.ticker = Some(Ticker { stop, handle });
        Ok(())
    }

    /// Running → Idle. Once this returns the state is never mutated by the
    /// old timer again. Returns `false` if the feed was already idle.
    pub fn unsubscribe(&mut self) -> bool {
        let Some(ticker) = self.ticker.take() else {
            return false;
        };
        ticker.stop.store(true, Ordering::Release);
        // Wait out a tick already inside the lock; every later one sees the flag.
        drop(self.shared.lock());
        ticker.handle.abort();
        info!("live feed unsubscribed");
        true
    }
}

impl<S: LiveState> Drop for LiveFeed<S> {
    fn drop(&mut self) {
        self.unsubscribe();
    }
}
