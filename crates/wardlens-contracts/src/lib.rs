//! # wardlens-contracts
//!
//! Shared types for the wardlens dashboard engine.
//!
//! All crates in the workspace import from here. No derivation logic lives in
//! this crate: only entity definitions, filter specs, and error types.

pub mod dashboard;
pub mod derived;
pub mod encounter;
pub mod error;
pub mod filter;
pub mod load;
pub mod patient;

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use derived::{ChargeBucket, ChargeCategory, ChargeSummary, Doctor, DoctorRoster, DoctorStatus};
    use encounter::Encounter;
    use error::WardlensError;
    use filter::{EncounterFilters, PatientFilters, ALL};
    use load::LoadId;
    use serde_json::{json, Map};

    fn encounter(flag: u8) -> Encounter {
        Encounter {
            encounter_id: "ENC-1".to_string(),
            patient_id: "P1".to_string(),
            encounter_type: "Inpatient".to_string(),
            department: "Cardiology".to_string(),
            readmitted_30d_flag: flag,
            total_cost_usd: 120.5,
            date_str: "2024-03-05".to_string(),
            date: Some(Utc.with_ymd_and_hms(2024, 3, 5, 0, 0, 0).unwrap()),
            extra: Map::new(),
        }
    }

    // ── Encounter ────────────────────────────────────────────────────────────

    #[test]
    fn encounter_year_and_readmit_accessors() {
        let e = encounter(1);
        assert_eq!(e.year(), Some(2024));
        assert!(e.is_readmitted());
        assert!(!encounter(0).is_readmitted());
    }

    #[test]
    fn encounter_serializes_date_fields_under_view_names() {
        let mut e = encounter(0);
        e.extra.insert("ward".to_string(), json!("B2"));
        let v = serde_json::to_value(&e).unwrap();

        assert_eq!(v["dateStr"], json!("2024-03-05"));
        assert!(v["dateObj"].is_string());
        // Passthrough fields are flattened next to the canonical ones.
        assert_eq!(v["ward"], json!("B2"));
    }

    // ── Filters ──────────────────────────────────────────────────────────────

    #[test]
    fn default_filters_are_all_sentinels() {
        let f = EncounterFilters::default();
        assert_eq!(f.department, ALL);
        assert_eq!(f.encounter_type, ALL);
        assert_eq!(f.year, ALL);
        assert_eq!(f.readmitted, ALL);

        let p = PatientFilters::default();
        assert_eq!(p.gender, ALL);
        assert!(p.age_min.is_none() && p.age_max.is_none());
        assert!(p.query.is_empty());
    }

    // ── Derived ──────────────────────────────────────────────────────────────

    #[test]
    fn roster_resolves_doctor_by_patient_id() {
        let doctor = Doctor {
            doctor_id: "DOC-0001".to_string(),
            doctor_name: "Dr. Neha Patel".to_string(),
            specialization: "Cardiologist".to_string(),
            department: "Cardiology".to_string(),
            salary: 150_000,
            commission_rate: 10.0,
            status: DoctorStatus::Available,
            rating: 4.5,
        };
        let mut roster = DoctorRoster {
            doctors: vec![doctor],
            ..Default::default()
        };
        roster
            .doctor_by_patient
            .insert("P1".to_string(), "DOC-0001".to_string());

        assert_eq!(roster.doctor_for("P1").map(|d| d.doctor_name.as_str()), Some("Dr. Neha Patel"));
        assert!(roster.doctor_for("P2").is_none());
    }

    #[test]
    fn charge_summary_amount_defaults_to_zero() {
        let summary = ChargeSummary {
            buckets: vec![ChargeBucket {
                category: ChargeCategory::Room,
                amount: 42.0,
            }],
            total_bill_amount: 42.0,
        };
        assert_eq!(summary.amount(ChargeCategory::Room), 42.0);
        assert_eq!(summary.amount(ChargeCategory::Surgery), 0.0);
    }

    #[test]
    fn charge_category_labels_match_display() {
        for c in ChargeCategory::ALL {
            assert_eq!(c.to_string(), c.label());
        }
    }

    // ── LoadId ───────────────────────────────────────────────────────────────

    #[test]
    fn load_id_new_produces_unique_values() {
        let ids: std::collections::HashSet<String> =
            (0..100).map(|_| LoadId::new().to_string()).collect();
        assert_eq!(ids.len(), 100);
    }

    // ── WardlensError display messages ───────────────────────────────────────

    #[test]
    fn error_load_failed_display() {
        let err = WardlensError::LoadFailed {
            dataset: "patients".to_string(),
            reason: "file not found".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("patients"));
        assert!(msg.contains("file not found"));
        assert!(err.is_load_failure());
    }

    #[test]
    fn error_config_error_display() {
        let err = WardlensError::ConfigError {
            reason: "roster_size must be positive".to_string(),
        };
        assert!(err.to_string().contains("configuration error"));
        assert!(!err.is_load_failure());
    }

    #[test]
    fn error_cancelled_display() {
        let err = WardlensError::Cancelled {
            load_id: "abc".to_string(),
        };
        assert!(err.to_string().contains("abc"));
        assert!(err.to_string().contains("discarded"));
    }

    #[test]
    fn error_state_machine_error_display() {
        let err = WardlensError::StateMachineError {
            reason: "feed already running".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("state machine error"));
        assert!(msg.contains("feed already running"));
    }
}
