//! Doctor roster generation and patient → doctor assignment.
//!
//! The roster depends only on the config: doctor `i` is drawn from the key
//! `doc_{i}_{base_seed}`. Assignment depends only on the patient id: patient
//! `p` is drawn from `assign_{p}`. Neither depends on list order.

use std::collections::BTreeMap;

use tracing::debug;

use wardlens_contracts::{
    derived::{Doctor, DoctorRoster, DoctorStatus},
    patient::Patient,
};
use wardlens_core::seeded::{pick, seeded};

use crate::{
    config::SynthConfig,
    draw::{draw_amount, draw_count, draw_label},
    pools::{FIRST_NAMES, LAST_NAMES, SPECIALTIES},
};

/// Generate the fixed-size roster.
pub fn derive_roster(config: &SynthConfig) -> Vec<Doctor> {
    let doctors = &config.doctors;
    (0..doctors.roster_size)
        .map(|i| {
            let mut rng = seeded(&format!("doc_{}_{}", i, config.base_seed));

            let first = draw_label(&mut rng, FIRST_NAMES);
            let last = draw_label(&mut rng, LAST_NAMES);
            let (specialization, department) = pick(&mut rng, SPECIALTIES)
                .copied()
                .unwrap_or(("General Physician", "General Medicine"));
            let salary = draw_count(&mut rng, doctors.salary);
            let commission_rate = draw_amount(&mut rng, doctors.commission_pct, 1);
            let status = pick(&mut rng, &DoctorStatus::ALL)
                .copied()
                .unwrap_or(DoctorStatus::Available);
            let rating = draw_amount(&mut rng, doctors.rating, 1);

            Doctor {
                doctor_id: format!("DOC-{:04}", i + 1),
                doctor_name: format!("Dr. {} {}", first, last),
                specialization: specialization.to_string(),
                department: department.to_string(),
                salary,
                commission_rate,
                status,
                rating,
            }
        })
        .collect()
}

/// Map every patient id to a roster doctor id.
///
/// Duplicate patient ids collapse to one entry (they draw the same doctor
/// anyway). An empty roster yields an empty mapping.
pub fn assign_doctors(patients: &[Patient], doctors: &[Doctor]) -> BTreeMap<String, String> {
    patients
        .iter()
        .filter_map(|p| {
            let mut rng = seeded(&format!("assign_{}", p.patient_id));
            pick(&mut rng, doctors).map(|d| (p.patient_id.clone(), d.doctor_id.clone()))
        })
        .collect()
}

/// Roster plus assignment in one call.
pub fn derive_doctors(patients: &[Patient], config: &SynthConfig) -> DoctorRoster {
    let doctors = derive_roster(config);
    let doctor_by_patient = assign_doctors(patients, &doctors);
    debug!(
        doctors = doctors.len(),
        assignments = doctor_by_patient.len(),
        "doctor roster derived"
    );
    DoctorRoster {
        doctors,
        doctor_by_patient,
    }
}
