//! # wardlens-core
//!
//! The deterministic half of the wardlens engine.
//!
//! This crate provides:
//! - `seeded`: FNV-1a string hashing and the mulberry32 generator with
//!   its `pick` / `int_in_range` / `num_in_range` helpers
//! - `normalize`: raw record → canonical `Patient` / `Encounter`, never failing
//! - `aggregate`: pure filter, option, grouping and ranking functions
//! - `traits`: the `DatasetSource` seam used by the data layer
//!
//! ## Usage
//!
//! ```rust,ignore
//! use wardlens_core::{aggregate, normalize};
//!
//! let encounters = normalize::normalize_encounters(&raw);
//! let by_month = aggregate::count_by_month(&encounters);
//! ```

pub mod aggregate;
pub mod normalize;
pub mod seeded;
pub mod traits;

pub use traits::{Dataset, DatasetSource};
