//! # wardlens-synth
//!
//! Deterministic synthetic data for the wardlens dashboards.
//!
//! ## Overview
//!
//! The seed dataset only carries patients and encounters. This crate expands
//! it into doctors, appointments, billing buckets, medicine stock and a
//! monthly trend, all drawn from [`wardlens_core::seeded`] generators keyed
//! per entity. Nothing is persisted; the same input and config always produce
//! the same output, bit for bit.
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use wardlens_synth::{SynthConfig, Synthesizer};
//!
//! let synth = Synthesizer::new(SynthConfig::default())?;
//! let derived = synth.derive(&clinical);
//! println!("{} doctors", derived.roster.doctors.len());
//! ```
//!
//! ## Seed keys
//!
//! | Derivation   | Key                                   |
//! |--------------|---------------------------------------|
//! | doctor       | `doc_{index}_{base_seed}`             |
//! | assignment   | `assign_{patient_id}`                 |
//! | appointment  | `appt_{patient_id}_{encounter_id}`    |
//! | charge       | `charge_{patient_id}_{encounter_id}`  |
//! | medicine     | `med_{name}_{index}`                  |
//! | trend        | `trend_{Mon-YY}_{index}`              |

pub mod appointments;
pub mod charges;
pub mod config;
mod draw;
pub mod doctors;
pub mod engine;
pub mod kpis;
pub mod medicine;
pub mod pools;
pub mod trends;

pub use appointments::derive_appointments;
pub use charges::derive_charges;
pub use config::SynthConfig;
pub use doctors::derive_doctors;
pub use engine::{Derivation, Synthesizer};
pub use kpis::derive_hospital_kpis;
pub use medicine::derive_medicine_stock;
pub use trends::derive_trends;

// ── Tests ─────────────────────────────────────────────────────────────────────
