//! # wardlens-live
//!
//! Simulated telemetry for the live dashboard tiles.
//!
//! Values follow a clamped random walk with drift toward a target
//! ([`drift`]). [`presets`] fixes the records the dashboards show (vitals,
//! operational counters, revenue) and their cadences; [`feed`] runs each one
//! on its own tokio timer behind subscribe/unsubscribe.
//!
//! Nothing here is seeded from the dataset. Live values are meant to move
//! differently on every run.

pub mod drift;
pub mod feed;
pub mod presets;

pub use drift::{clamp, next_counter, next_value, CounterPolicy, DriftPolicy};
pub use feed::{FeedState, LiveFeed, LiveState};
pub use presets::{
    OpsState, RevenueState, VitalsState, OPS_INTERVAL, REVENUE_INTERVAL, VITALS_INTERVAL,
};
