//! Tuning constants for the synthetic derivations.
//!
//! Every arbitrary number the generators use lives here: roster size, prefix
//! limits, value ranges, the discount probability and the fallback bucket
//! pool. `SynthConfig::default()` holds the built-in demo values; a TOML
//! document only needs the keys it wants to change.
//!
//! Example:
//! ```toml
//! base_seed = "ward-7"
//!
//! [doctors]
//! roster_size = 12
//!
//! [charges]
//! discount_probability = 0.15
//! fallback_buckets = ["Test", "Other"]
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use wardlens_contracts::{
    derived::ChargeCategory,
    error::{WardlensError, WardlensResult},
};

/// Inclusive integer range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntRange {
    pub min: i64,
    pub max: i64,
}

impl IntRange {
    pub const fn new(min: i64, max: i64) -> Self {
        Self { min, max }
    }
}

/// Half-open float range, used for money and rates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AmountRange {
    pub min: f64,
    pub max: f64,
}

impl AmountRange {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DoctorConfig {
    pub roster_size: usize,
    pub salary: IntRange,
    pub commission_pct: AmountRange,
    pub rating: AmountRange,
}

impl Default for DoctorConfig {
    fn default() -> Self {
        Self {
            roster_size: 8,
            salary: IntRange::new(90_000, 240_000),
            commission_pct: AmountRange::new(5.0, 20.0),
            rating: AmountRange::new(3.5, 5.0),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppointmentConfig {
    /// Only the first `limit` encounters become appointments.
    pub limit: usize,
    pub fee: IntRange,
}

impl Default for AppointmentConfig {
    fn default() -> Self {
        Self {
            limit: 80,
            fee: IntRange::new(50, 400),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChargeConfig {
    pub base_amount: AmountRange,
    /// Flat add-on credited to `Medicine` for every encounter.
    pub medicine_addon: AmountRange,
    /// Chance per encounter of a `Discount` contribution.
    pub discount_probability: f64,
    pub discount_amount: AmountRange,
    /// Buckets drawn from when the encounter type matches no rule.
    pub fallback_buckets: Vec<ChargeCategory>,
}

impl Default for ChargeConfig {
    fn default() -> Self {
        Self {
            base_amount: AmountRange::new(150.0, 2_500.0),
            medicine_addon: AmountRange::new(20.0, 180.0),
            discount_probability: 0.08,
            discount_amount: AmountRange::new(25.0, 300.0),
            fallback_buckets: vec![
                ChargeCategory::Test,
                ChargeCategory::Medicine,
                ChargeCategory::Fees,
                ChargeCategory::Other,
            ],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MedicineConfig {
    pub top_n: usize,
    pub sale_qty: IntRange,
    /// Stock on first sighting is the sale quantity plus this margin.
    pub stock_margin: IntRange,
    /// Stock added on every repeat sighting of the same medication.
    pub restock: IntRange,
}

impl Default for MedicineConfig {
    fn default() -> Self {
        Self {
            top_n: 12,
            sale_qty: IntRange::new(20, 400),
            stock_margin: IntRange::new(30, 500),
            restock: IntRange::new(5, 60),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrendConfig {
    /// Number of most recent months kept.
    pub window: usize,
    pub quantity: IntRange,
}

impl Default for TrendConfig {
    fn default() -> Self {
        Self {
            window: 6,
            quantity: IntRange::new(5, 40),
        }
    }
}

/// The full derivation configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SynthConfig {
    /// Mixed into every doctor seed key; changing it yields a different roster.
    pub base_seed: String,
    pub doctors: DoctorConfig,
    pub appointments: AppointmentConfig,
    pub charges: ChargeConfig,
    pub medicine: MedicineConfig,
    pub trends: TrendConfig,
}

impl Default for SynthConfig {
    fn default() -> Self {
        Self {
            base_seed: "wardlens-demo".to_string(),
            doctors: DoctorConfig::default(),
            appointments: AppointmentConfig::default(),
            charges: ChargeConfig::default(),
            medicine: MedicineConfig::default(),
            trends: TrendConfig::default(),
        }
    }
}

fn config_error(reason: impl Into<String>) -> WardlensError {
    WardlensError::ConfigError {
        reason: reason.into(),
    }
}

fn check_int(name: &str, r: IntRange) -> WardlensResult<()> {
    if r.min > r.max {
        return Err(config_error(format!(
            "{name}: min {} exceeds max {}",
            r.min, r.max
        )));
    }
    Ok(())
}

fn check_amount(name: &str, r: AmountRange) -> WardlensResult<()> {
    if !r.min.is_finite() || !r.max.is_finite() || r.min > r.max {
        return Err(config_error(format!(
            "{name}: invalid range {}..{}",
            r.min, r.max
        )));
    }
    Ok(())
}

impl SynthConfig {
    /// Parse `s` as TOML and validate the result.
    ///
    /// Returns `WardlensError::ConfigError` if the TOML is malformed, does
    /// not match the schema, or holds an invalid range.
    pub fn from_toml_str(s: &str) -> WardlensResult<Self> {
        let config: SynthConfig = toml::from_str(s)
            .map_err(|e| config_error(format!("failed to parse synth TOML: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Read the file at `path` and parse it as TOML derivation configuration.
    pub fn from_file(path: &Path) -> WardlensResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            config_error(format!(
                "failed to read synth config '{}': {}",
                path.display(),
                e
            ))
        })?;
        Self::from_toml_str(&contents)
    }

    pub fn validate(&self) -> WardlensResult<()> {
        if self.doctors.roster_size == 0 {
            return Err(config_error("doctors.roster_size must be at least 1"));
        }
        check_amount("doctors.commission_pct", self.doctors.commission_pct)?;
        check_amount("doctors.rating", self.doctors.rating)?;
        check_amount("charges.base_amount", self.charges.base_amount)?;
        check_amount("charges.medicine_addon", self.charges.medicine_addon)?;
        check_amount("charges.discount_amount", self.charges.discount_amount)?;
        if !(0.0..=1.0).contains(&self.charges.discount_probability) {
            return Err(config_error(format!(
                "charges.discount_probability {} is outside [0, 1]",
                self.charges.discount_probability
            )));
        }
        if self.charges.fallback_buckets.is_empty() {
            return Err(config_error("charges.fallback_buckets must not be empty"));
        }
        // Integer ranges must be ordered, non-negative and fit a u32 count.
        for (name, r) in [
            ("doctors.salary", self.doctors.salary),
            ("appointments.fee", self.appointments.fee),
            ("medicine.sale_qty", self.medicine.sale_qty),
            ("medicine.stock_margin", self.medicine.stock_margin),
            ("medicine.restock", self.medicine.restock),
            ("trends.quantity", self.trends.quantity),
        ] {
            check_int(name, r)?;
            if r.min < 0 {
                return Err(config_error(format!("{name}: quantities cannot be negative")));
            }
            if r.max > i64::from(u32::MAX) {
                return Err(config_error(format!(
                    "{name}: max {} exceeds {}",
                    r.max,
                    u32::MAX
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_yields_defaults() {
        let config = SynthConfig::from_toml_str("").unwrap();
        assert_eq!(config, SynthConfig::default());
        assert_eq!(config.doctors.roster_size, 8);
        assert_eq!(config.appointments.limit, 80);
        assert_eq!(config.medicine.top_n, 12);
        assert_eq!(config.trends.window, 6);
    }

    #[test]
    fn partial_document_overrides_only_named_keys() {
        let toml = r#"
            base_seed = "ward-7"

            [charges]
            discount_probability = 0.15
            fallback_buckets = ["Test", "Other"]
        "#;
        let config = SynthConfig::from_toml_str(toml).unwrap();

        assert_eq!(config.base_seed, "ward-7");
        assert_eq!(config.charges.discount_probability, 0.15);
        assert_eq!(
            config.charges.fallback_buckets,
            vec![ChargeCategory::Test, ChargeCategory::Other]
        );
        // Untouched sections keep their defaults.
        assert_eq!(config.charges.base_amount, ChargeConfig::default().base_amount);
        assert_eq!(config.doctors, DoctorConfig::default());
    }

    #[test]
    fn inverted_range_is_rejected() {
        let toml = r#"
            [medicine]
            sale_qty = { min = 50, max = 10 }
        "#;
        match SynthConfig::from_toml_str(toml) {
            Err(WardlensError::ConfigError { reason }) => {
                assert!(reason.contains("medicine.sale_qty"), "unexpected reason: {reason}");
            }
            other => panic!("expected ConfigError, got {:?}", other),
        }
    }

    #[test]
    fn range_wider_than_a_count_is_rejected() {
        let toml = r#"
            [doctors]
            salary = { min = 1, max = 5000000000 }
        "#;
        match SynthConfig::from_toml_str(toml) {
            Err(WardlensError::ConfigError { reason }) => {
                assert!(reason.contains("doctors.salary"), "unexpected reason: {reason}");
            }
            other => panic!("expected ConfigError, got {:?}", other),
        }

        let at_limit = format!("[medicine]\nrestock = {{ min = 0, max = {} }}\n", u32::MAX);
        assert!(SynthConfig::from_toml_str(&at_limit).is_ok());
    }

    #[test]
    fn probability_outside_unit_interval_is_rejected() {
        let toml = r#"
            [charges]
            discount_probability = 1.5
        "#;
        assert!(matches!(
            SynthConfig::from_toml_str(toml),
            Err(WardlensError::ConfigError { .. })
        ));
    }

    #[test]
    fn empty_fallback_pool_is_rejected() {
        let toml = r#"
            [charges]
            fallback_buckets = []
        "#;
        assert!(SynthConfig::from_toml_str(toml).is_err());
    }

    #[test]
    fn zero_roster_is_rejected() {
        let toml = r#"
            [doctors]
            roster_size = 0
        "#;
        assert!(SynthConfig::from_toml_str(toml).is_err());
    }

    #[test]
    fn toml_parse_error_is_config_error() {
        match SynthConfig::from_toml_str("this is not valid toml ][[[") {
            Err(WardlensError::ConfigError { reason }) => {
                assert!(reason.contains("failed to parse synth TOML"));
            }
            other => panic!("expected ConfigError, got {:?}", other),
        }
    }

    #[test]
    fn missing_file_is_config_error() {
        let err = SynthConfig::from_file(Path::new("/nonexistent/synth.toml")).unwrap_err();
        assert!(err.to_string().contains("failed to read synth config"));
    }
}
