//! The derivation facade.
//!
//! `Synthesizer` owns a validated `SynthConfig` and runs every derivation
//! against one `ClinicalData` snapshot. Each derivation seeds its own
//! generators, so the order they run in here has no effect on the output.

use std::path::Path;

use tracing::info;

use wardlens_contracts::{
    dashboard::ClinicalData,
    derived::{Appointment, ChargeSummary, DoctorRoster, HospitalKpis, MedicineStockItem, TrendPoint},
    error::WardlensResult,
};

use crate::{
    appointments::derive_appointments, charges::derive_charges, config::SynthConfig,
    doctors::derive_doctors, kpis::derive_hospital_kpis, medicine::derive_medicine_stock,
    trends::derive_trends,
};

/// Every synthetic collection for one snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct Derivation {
    pub kpis: HospitalKpis,
    pub roster: DoctorRoster,
    pub appointments: Vec<Appointment>,
    pub charges: ChargeSummary,
    pub medicine_stock: Vec<MedicineStockItem>,
    pub trends: Vec<TrendPoint>,
}

/// Construct via `new`, `from_toml_str` or `from_file`, then call `derive`.
///
/// ```rust,ignore
/// use wardlens_synth::Synthesizer;
///
/// let synth = Synthesizer::from_file(Path::new("config/synth.toml"))?;
/// let derived = synth.derive(&clinical);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Synthesizer {
    config: SynthConfig,
}

impl Synthesizer {
    /// Wrap `config` after validating it.
    pub fn new(config: SynthConfig) -> WardlensResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn from_toml_str(s: &str) -> WardlensResult<Self> {
        Ok(Self {
            config: SynthConfig::from_toml_str(s)?,
        })
    }

    pub fn from_file(path: &Path) -> WardlensResult<Self> {
        Ok(Self {
            config: SynthConfig::from_file(path)?,
        })
    }

    pub fn config(&self) -> &SynthConfig {
        &self.config
    }

    pub fn derive(&self, data: &ClinicalData) -> Derivation {
        let roster = derive_doctors(&data.patients, &self.config);
        let appointments =
            derive_appointments(&data.encounters, &data.patients, &roster, &self.config);
        let derivation = Derivation {
            kpis: derive_hospital_kpis(data),
            charges: derive_charges(&data.encounters, &self.config),
            medicine_stock: derive_medicine_stock(&data.medications, &self.config),
            trends: derive_trends(&data.encounters, &self.config),
            roster,
            appointments,
        };
        info!(
            patients = data.patients.len(),
            encounters = data.encounters.len(),
            appointments = derivation.appointments.len(),
            "derivation complete"
        );
        derivation
    }
}
