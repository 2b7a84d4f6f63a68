//! Synthetic entities derived from the seed dataset.
//!
//! None of these exist in the source files. They are regenerated from the
//! canonical patients and encounters on every derivation, and the seeded
//! generator guarantees the same input always yields the same values.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

// ── Doctors ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DoctorStatus {
    Available,
    Occupied,
}

impl DoctorStatus {
    pub const ALL: [DoctorStatus; 2] = [DoctorStatus::Available, DoctorStatus::Occupied];
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Doctor {
    pub doctor_id: String,
    pub doctor_name: String,
    pub specialization: String,
    pub department: String,
    /// Annual salary in USD.
    pub salary: u32,
    /// Percentage of fees paid out as commission, one decimal place.
    pub commission_rate: f64,
    pub status: DoctorStatus,
    /// 0–5 scale, one decimal place.
    pub rating: f64,
}

/// The generated roster plus the auxiliary patient → doctor lookup.
///
/// The mapping is keyed by patient id, never by list position, so reordering
/// the patient list leaves every assignment unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DoctorRoster {
    pub doctors: Vec<Doctor>,
    pub doctor_by_patient: BTreeMap<String, String>,
}

impl DoctorRoster {
    /// Resolve the doctor assigned to `patient_id`, if any.
    pub fn doctor_for(&self, patient_id: &str) -> Option<&Doctor> {
        let doctor_id = self.doctor_by_patient.get(patient_id)?;
        self.doctors.iter().find(|d| &d.doctor_id == doctor_id)
    }
}

// ── Appointments ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AppointmentStatus {
    Scheduled,
    Completed,
    Pending,
    Cancelled,
}

impl AppointmentStatus {
    pub const ALL: [AppointmentStatus; 4] = [
        AppointmentStatus::Scheduled,
        AppointmentStatus::Completed,
        AppointmentStatus::Pending,
        AppointmentStatus::Cancelled,
    ];
}

/// One row of the doctor's appointment table, derived 1:1 from an encounter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Appointment {
    pub appointment_id: String,
    pub encounter_id: String,
    pub patient_id: String,
    pub patient_name: String,
    pub doctor_name: String,
    pub department: String,
    /// The encounter's original date text.
    pub date: String,
    pub reason: String,
    /// Short clinical note shown next to the reason.
    pub suggest: String,
    pub status: AppointmentStatus,
    pub doctors_fee: u32,
}

// ── Charges ───────────────────────────────────────────────────────────────────

/// The fixed set of billing buckets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ChargeCategory {
    Surgery,
    Room,
    Test,
    Medicine,
    Fees,
    Other,
    Discount,
}

impl ChargeCategory {
    /// Every bucket, in display order.
    pub const ALL: [ChargeCategory; 7] = [
        ChargeCategory::Surgery,
        ChargeCategory::Room,
        ChargeCategory::Test,
        ChargeCategory::Medicine,
        ChargeCategory::Fees,
        ChargeCategory::Other,
        ChargeCategory::Discount,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ChargeCategory::Surgery => "Surgery",
            ChargeCategory::Room => "Room",
            ChargeCategory::Test => "Test",
            ChargeCategory::Medicine => "Medicine",
            ChargeCategory::Fees => "Fees",
            ChargeCategory::Other => "Other",
            ChargeCategory::Discount => "Discount",
        }
    }
}

impl fmt::Display for ChargeCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChargeBucket {
    pub category: ChargeCategory,
    /// Accumulated amount in USD, rounded to 2 decimals. Negative for
    /// `Discount`.
    pub amount: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChargeSummary {
    /// One entry per `ChargeCategory`, in display order. Empty when there
    /// were no encounters.
    pub buckets: Vec<ChargeBucket>,
    /// Sum across all buckets, rounded to 2 decimals.
    pub total_bill_amount: f64,
}

impl ChargeSummary {
    pub fn amount(&self, category: ChargeCategory) -> f64 {
        self.buckets
            .iter()
            .find(|b| b.category == category)
            .map(|b| b.amount)
            .unwrap_or(0.0)
    }
}

// ── Medicine stock ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MedicineStockItem {
    pub name: String,
    #[serde(rename = "saleQty")]
    pub sale_qty: u32,
    #[serde(rename = "stockQty")]
    pub stock_qty: u32,
}

// ── Trends ────────────────────────────────────────────────────────────────────

/// One point of the monthly activity line chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrendPoint {
    /// `Mon-YY`, e.g. `Mar-24`.
    pub label: String,
    pub value: u32,
}

// ── Hospital KPIs ─────────────────────────────────────────────────────────────

/// Headline hospital numbers.
///
/// The counts, rate and cost are measured from the loaded data. `bed_capacity`
/// and `staff_on_duty` are illustrative constants, not measurements.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HospitalKpis {
    pub total_patients: usize,
    pub total_encounters: usize,
    pub total_conditions: usize,
    pub total_medications: usize,
    pub total_observations: usize,
    pub total_imaging_studies: usize,
    /// Distinct departments seen across encounters.
    pub departments: usize,
    /// Share of encounters flagged as 30-day readmissions, percent, 1 decimal.
    pub readmission_rate_pct: f64,
    /// Sum of encounter costs in USD, rounded to 2 decimals.
    pub total_cost_usd: f64,
    pub bed_capacity: u32,
    pub staff_on_duty: u32,
}
