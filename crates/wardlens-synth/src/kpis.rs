//! Headline hospital numbers.

use std::collections::HashSet;

use tracing::debug;

use wardlens_contracts::{dashboard::ClinicalData, derived::HospitalKpis};
use wardlens_core::{aggregate::sum_cost, seeded::round_to};

use crate::pools::{BED_CAPACITY, STAFF_BASELINE};

/// Staff on duty across every group of the baseline.
pub fn staff_on_duty() -> u32 {
    STAFF_BASELINE.iter().map(|(_, n)| n).sum()
}

/// Counts and aggregates over the loaded collections, plus the illustrative
/// bed and staffing constants.
pub fn derive_hospital_kpis(data: &ClinicalData) -> HospitalKpis {
    let encounters = &data.encounters;
    let readmitted = encounters.iter().filter(|e| e.is_readmitted()).count();
    let readmission_rate_pct = if encounters.is_empty() {
        0.0
    } else {
        round_to(readmitted as f64 * 100.0 / encounters.len() as f64, 1)
    };
    let departments = encounters
        .iter()
        .map(|e| e.department.as_str())
        .collect::<HashSet<_>>()
        .len();

    let kpis = HospitalKpis {
        total_patients: data.patients.len(),
        total_encounters: encounters.len(),
        total_conditions: data.conditions.len(),
        total_medications: data.medications.len(),
        total_observations: data.observations.len(),
        total_imaging_studies: data.imaging_studies.len(),
        departments,
        readmission_rate_pct,
        total_cost_usd: round_to(sum_cost(encounters), 2),
        bed_capacity: BED_CAPACITY,
        staff_on_duty: staff_on_duty(),
    };
    debug!(
        patients = kpis.total_patients,
        encounters = kpis.total_encounters,
        "hospital kpis derived"
    );
    kpis
}
