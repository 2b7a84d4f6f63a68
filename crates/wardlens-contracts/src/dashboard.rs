//! The composed object handed to the view layer.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{
    derived::{
        Appointment, ChargeBucket, Doctor, HospitalKpis, MedicineStockItem, TrendPoint,
    },
    encounter::Encounter,
    filter::{FilterOptions, PatientFilterOptions},
    patient::Patient,
};

/// Every collection loaded from the data directory.
///
/// Patients and encounters are normalized on load. The remaining datasets are
/// only counted or scanned by the derivations, so they stay as raw JSON.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClinicalData {
    pub patients: Vec<Patient>,
    pub encounters: Vec<Encounter>,
    pub conditions: Vec<Value>,
    pub medications: Vec<Value>,
    pub observations: Vec<Value>,
    pub imaging_studies: Vec<Value>,
}

/// Everything a dashboard page needs, computed in one pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dashboard {
    pub clinical: ClinicalData,
    pub kpis: HospitalKpis,
    pub doctors: Vec<Doctor>,
    pub doctor_by_patient: BTreeMap<String, String>,
    pub appointments: Vec<Appointment>,
    pub charges: Vec<ChargeBucket>,
    pub total_bill_amount: f64,
    pub medicine_stock: Vec<MedicineStockItem>,
    pub trends: Vec<TrendPoint>,
    pub filter_options: FilterOptions,
    pub patient_filter_options: PatientFilterOptions,
}
