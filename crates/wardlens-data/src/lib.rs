//! # wardlens-data
//!
//! Loading and composition for the wardlens dashboards.
//!
//! ## Overview
//!
//! A [`DatasetSource`](wardlens_core::DatasetSource) supplies raw JSON per
//! dataset: [`JsonDirSource`] reads a directory, [`InMemorySource`] serves
//! documents held in memory. [`ClinicalCache`] loads all six datasets
//! concurrently, normalizes them and memoizes the snapshot until it is
//! invalidated or force-reloaded. [`DashboardService`] sits on top, turning
//! a snapshot into a [`Dashboard`](wardlens_contracts::dashboard::Dashboard)
//! and discarding results whose [`LoadTicket`] was cancelled.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use wardlens_data::{DashboardService, JsonDirSource, LoadTicket};
//! use wardlens_synth::Synthesizer;
//!
//! let service = DashboardService::new(Arc::new(JsonDirSource::new("data")), Synthesizer::default());
//! let ticket = LoadTicket::new();
//! let dashboard = service.dashboard(&ticket).await?;
//! ```

pub mod assemble;
pub mod cache;
pub mod memory;
pub mod service;
pub mod source;
pub mod ticket;

pub use assemble::assemble_dashboard;
pub use cache::{ClinicalCache, Snapshot};
pub use memory::InMemorySource;
pub use service::DashboardService;
pub use source::JsonDirSource;
pub use ticket::LoadTicket;

// ── Tests ─────────────────────────────────────────────────────────────────────
