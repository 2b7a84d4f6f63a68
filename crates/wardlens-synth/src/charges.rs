//! Billing buckets accumulated over every encounter.

use std::collections::BTreeMap;

use tracing::debug;

use wardlens_contracts::{
    derived::{ChargeBucket, ChargeCategory, ChargeSummary},
    encounter::Encounter,
};
use wardlens_core::seeded::{pick, round_to, seeded};

use crate::{
    config::{ChargeConfig, SynthConfig},
    draw::{draw_amount, id_or_index},
};

/// Rule-based bucket for an encounter type, matched case-insensitively by
/// substring. `None` means the fallback pool decides.
pub fn classify_encounter_type(encounter_type: &str) -> Option<ChargeCategory> {
    let t = encounter_type.to_lowercase();
    if t.contains("surg") {
        Some(ChargeCategory::Surgery)
    } else if t.contains("inpatient") {
        Some(ChargeCategory::Room)
    } else if t.contains("outpatient") {
        Some(ChargeCategory::Fees)
    } else {
        None
    }
}

/// Draw every contribution for one encounter, in stream order: base amount,
/// fallback bucket (only when no rule matched), medicine add-on, discount
/// roll, discount amount (only when the roll hits).
fn contributions(key: &str, encounter_type: &str, cfg: &ChargeConfig) -> Vec<(ChargeCategory, f64)> {
    let mut rng = seeded(key);
    let mut out = Vec::with_capacity(3);

    let base = draw_amount(&mut rng, cfg.base_amount, 2);
    let bucket = match classify_encounter_type(encounter_type) {
        Some(c) => c,
        None => pick(&mut rng, &cfg.fallback_buckets)
            .copied()
            .unwrap_or(ChargeCategory::Other),
    };
    out.push((bucket, base));
    out.push((
        ChargeCategory::Medicine,
        draw_amount(&mut rng, cfg.medicine_addon, 2),
    ));
    if rng.next_f64() < cfg.discount_probability {
        out.push((
            ChargeCategory::Discount,
            -draw_amount(&mut rng, cfg.discount_amount, 2),
        ));
    }
    out
}

/// Accumulate charges across `encounters`.
///
/// Each encounter is seeded by `charge_{patient_id}_{encounter_id}` (position
/// for a blank id). The summary lists every category in display order; with
/// no encounters it is empty and the total is 0. Discounts accumulate as a
/// negative amount, so the total is net of them.
pub fn derive_charges(encounters: &[Encounter], config: &SynthConfig) -> ChargeSummary {
    if encounters.is_empty() {
        return ChargeSummary::default();
    }

    let mut totals: BTreeMap<ChargeCategory, f64> = BTreeMap::new();
    for (i, e) in encounters.iter().enumerate() {
        let key = format!("charge_{}_{}", e.patient_id, id_or_index(&e.encounter_id, i));
        for (category, amount) in contributions(&key, &e.encounter_type, &config.charges) {
            *totals.entry(category).or_insert(0.0) += amount;
        }
    }

    let buckets: Vec<ChargeBucket> = ChargeCategory::ALL
        .iter()
        .map(|&category| ChargeBucket {
            category,
            amount: round_to(totals.get(&category).copied().unwrap_or(0.0), 2),
        })
        .collect();
    let total_bill_amount = round_to(buckets.iter().map(|b| b.amount).sum(), 2);

    debug!(encounters = encounters.len(), total_bill_amount, "charges derived");
    ChargeSummary {
        buckets,
        total_bill_amount,
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use wardlens_core::normalize::normalize_encounter;

    use super::*;

    fn encounter(id: &str, kind: &str) -> Encounter {
        normalize_encounter(
            &json!({ "encounter_id": id, "patient_id": "P1", "encounter_type": kind }),
            0,
        )
    }

    // ── Classification ────────────────────────────────────────────────────────

    #[test]
    fn classification_is_case_insensitive_substring() {
        assert_eq!(classify_encounter_type("Day Surgery"), Some(ChargeCategory::Surgery));
        assert_eq!(classify_encounter_type("SURGICAL"), Some(ChargeCategory::Surgery));
        assert_eq!(classify_encounter_type("Inpatient"), Some(ChargeCategory::Room));
        assert_eq!(classify_encounter_type("outpatient clinic"), Some(ChargeCategory::Fees));
        assert_eq!(classify_encounter_type("Emergency"), None);
        assert_eq!(classify_encounter_type(""), None);
    }

    #[test]
    fn surgery_rule_wins_over_inpatient() {
        assert_eq!(
            classify_encounter_type("Inpatient Surgery"),
            Some(ChargeCategory::Surgery)
        );
    }

    // ── Accumulation ──────────────────────────────────────────────────────────

    #[test]
    fn empty_input_yields_empty_summary() {
        let summary = derive_charges(&[], &SynthConfig::default());
        assert!(summary.buckets.is_empty());
        assert_eq!(summary.total_bill_amount, 0.0);
    }

    #[test]
    fn every_category_is_listed_in_display_order() {
        let summary = derive_charges(&[encounter("E1", "Inpatient")], &SynthConfig::default());
        let order: Vec<ChargeCategory> = summary.buckets.iter().map(|b| b.category).collect();
        assert_eq!(order, ChargeCategory::ALL.to_vec());
    }

    #[test]
    fn matched_types_land_in_their_bucket_with_medicine_addon() {
        let config = SynthConfig::default();
        let summary = derive_charges(&[encounter("E1", "Inpatient")], &config);

        let room = summary.amount(ChargeCategory::Room);
        assert!((150.0..=2_500.0).contains(&room));
        let medicine = summary.amount(ChargeCategory::Medicine);
        assert!((20.0..=180.0).contains(&medicine));
        assert_eq!(summary.amount(ChargeCategory::Surgery), 0.0);
        assert_eq!(summary.amount(ChargeCategory::Fees), 0.0);
    }

    #[test]
    fn unmatched_types_use_configured_fallback_pool() {
        let config = SynthConfig {
            charges: ChargeConfig {
                fallback_buckets: vec![ChargeCategory::Other],
                discount_probability: 0.0,
                ..ChargeConfig::default()
            },
            ..SynthConfig::default()
        };
        let encounters: Vec<Encounter> = (0..10)
            .map(|i| encounter(&format!("E{i}"), "Emergency"))
            .collect();
        let summary = derive_charges(&encounters, &config);

        assert!(summary.amount(ChargeCategory::Other) > 0.0);
        for c in [ChargeCategory::Surgery, ChargeCategory::Room, ChargeCategory::Test, ChargeCategory::Fees, ChargeCategory::Discount] {
            assert_eq!(summary.amount(c), 0.0, "{c} should be empty");
        }
    }

    #[test]
    fn discount_probability_bounds_are_respected() {
        let encounters: Vec<Encounter> = (0..50)
            .map(|i| encounter(&format!("E{i}"), "Outpatient"))
            .collect();

        let never = SynthConfig {
            charges: ChargeConfig {
                discount_probability: 0.0,
                ..ChargeConfig::default()
            },
            ..SynthConfig::default()
        };
        assert_eq!(derive_charges(&encounters, &never).amount(ChargeCategory::Discount), 0.0);

        let always = SynthConfig {
            charges: ChargeConfig {
                discount_probability: 1.0,
                ..ChargeConfig::default()
            },
            ..SynthConfig::default()
        };
        let discount = derive_charges(&encounters, &always).amount(ChargeCategory::Discount);
        assert!(discount <= -(50.0 * 25.0));
    }

    #[test]
    fn discounts_reduce_the_total() {
        let encounters: Vec<Encounter> = (0..20)
            .map(|i| encounter(&format!("E{i}"), "Surgery"))
            .collect();
        let with = |p: f64| SynthConfig {
            charges: ChargeConfig {
                discount_probability: p,
                ..ChargeConfig::default()
            },
            ..SynthConfig::default()
        };

        let full = derive_charges(&encounters, &with(0.0));
        let discounted = derive_charges(&encounters, &with(1.0));
        let discount = discounted.amount(ChargeCategory::Discount);

        assert!(discount < 0.0);
        assert!(discounted.total_bill_amount < full.total_bill_amount);
        // Every other bucket is drawn before the discount roll.
        assert_eq!(
            discounted.amount(ChargeCategory::Surgery),
            full.amount(ChargeCategory::Surgery)
        );
        let net = round_to(full.total_bill_amount + discount, 2);
        assert!((discounted.total_bill_amount - net).abs() < 0.011);
    }

    #[test]
    fn total_is_rounded_sum_of_buckets() {
        let encounters: Vec<Encounter> = ["Inpatient", "Surgery", "Outpatient", "Lab"]
            .iter()
            .enumerate()
            .map(|(i, kind)| encounter(&format!("E{i}"), kind))
            .collect();
        let summary = derive_charges(&encounters, &SynthConfig::default());

        let sum: f64 = summary.buckets.iter().map(|b| b.amount).sum();
        assert!((summary.total_bill_amount - round_to(sum, 2)).abs() < 1e-9);
        assert_eq!(summary, derive_charges(&encounters, &SynthConfig::default()));
    }
}
