//! One snapshot in, one dashboard out.

use wardlens_contracts::dashboard::{ClinicalData, Dashboard};
use wardlens_core::aggregate::{build_filter_options, build_patient_filter_options};
use wardlens_synth::Synthesizer;

/// Run every derivation over `data` and compose the result.
pub fn assemble_dashboard(data: &ClinicalData, synth: &Synthesizer) -> Dashboard {
    let derived = synth.derive(data);
    Dashboard {
        filter_options: build_filter_options(&data.encounters),
        patient_filter_options: build_patient_filter_options(&data.patients),
        clinical: data.clone(),
        kpis: derived.kpis,
        doctors: derived.roster.doctors,
        doctor_by_patient: derived.roster.doctor_by_patient,
        appointments: derived.appointments,
        total_bill_amount: derived.charges.total_bill_amount,
        charges: derived.charges.buckets,
        medicine_stock: derived.medicine_stock,
        trends: derived.trends,
    }
}
