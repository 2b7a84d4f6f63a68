//! Appointment rows, one per encounter in the leading prefix of the list.

use std::collections::HashMap;

use tracing::debug;

use wardlens_contracts::{
    derived::{Appointment, AppointmentStatus, DoctorRoster},
    encounter::Encounter,
    patient::Patient,
};
use wardlens_core::seeded::{pick, seeded};

use crate::{
    config::SynthConfig,
    draw::{draw_count, draw_label, id_or_index},
    pools::{APPOINTMENT_REASONS, CLINICAL_SUGGESTIONS, UNASSIGNED_DOCTOR, UNKNOWN_PATIENT},
};

/// Build appointments for the first `config.appointments.limit` encounters.
///
/// Each row is seeded by `appt_{patient_id}_{encounter_id}` (the encounter's
/// position stands in for a blank id), so a row's synthetic fields do not
/// depend on its neighbours. Patient and doctor names are lookups; a patient
/// missing from `patients` shows as "Unknown Patient" and one without an
/// assignment as "Unassigned".
pub fn derive_appointments(
    encounters: &[Encounter],
    patients: &[Patient],
    roster: &DoctorRoster,
    config: &SynthConfig,
) -> Vec<Appointment> {
    let names: HashMap<&str, &str> = patients
        .iter()
        .map(|p| (p.patient_id.as_str(), p.full_name.as_str()))
        .collect();

    let appointments: Vec<Appointment> = encounters
        .iter()
        .take(config.appointments.limit)
        .enumerate()
        .map(|(i, e)| {
            let key = format!("appt_{}_{}", e.patient_id, id_or_index(&e.encounter_id, i));
            let mut rng = seeded(&key);

            let reason = draw_label(&mut rng, APPOINTMENT_REASONS);
            let suggest = draw_label(&mut rng, CLINICAL_SUGGESTIONS);
            let status = pick(&mut rng, &AppointmentStatus::ALL)
                .copied()
                .unwrap_or(AppointmentStatus::Scheduled);
            let doctors_fee = draw_count(&mut rng, config.appointments.fee);

            Appointment {
                appointment_id: format!("APT-{:05}", i + 1),
                encounter_id: e.encounter_id.clone(),
                patient_id: e.patient_id.clone(),
                patient_name: names
                    .get(e.patient_id.as_str())
                    .copied()
                    .unwrap_or(UNKNOWN_PATIENT)
                    .to_string(),
                doctor_name: roster
                    .doctor_for(&e.patient_id)
                    .map_or(UNASSIGNED_DOCTOR, |d| d.doctor_name.as_str())
                    .to_string(),
                department: e.department.clone(),
                date: e.date_str.clone(),
                reason,
                suggest,
                status,
                doctors_fee,
            }
        })
        .collect();

    debug!(appointments = appointments.len(), "appointments derived");
    appointments
}
