//! Monthly activity series.

use std::collections::BTreeMap;

use chrono::Datelike;
use tracing::debug;

use wardlens_contracts::{derived::TrendPoint, encounter::Encounter};
use wardlens_core::seeded::seeded;

use crate::{config::SynthConfig, draw::draw_count};

/// Bucket dated encounters by month and keep the most recent
/// `config.trends.window` months, oldest first.
///
/// Encounter `i` contributes a quantity drawn from `trend_{Mon-YY}_{i}`.
/// Undated encounters are skipped; with no dates at all the series is empty.
pub fn derive_trends(encounters: &[Encounter], config: &SynthConfig) -> Vec<TrendPoint> {
    let mut months: BTreeMap<(i32, u32), TrendPoint> = BTreeMap::new();

    for (i, e) in encounters.iter().enumerate() {
        let Some(date) = e.date else { continue };
        let label = date.format("%b-%y").to_string();
        let mut rng = seeded(&format!("trend_{}_{}", label, i));
        let qty = draw_count(&mut rng, config.trends.quantity);

        months
            .entry((date.year(), date.month()))
            .or_insert_with(|| TrendPoint { label, value: 0 })
            .value += qty;
    }

    let skip = months.len().saturating_sub(config.trends.window);
    let points: Vec<TrendPoint> = months.into_values().skip(skip).collect();
    debug!(points = points.len(), "trends derived");
    points
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use wardlens_core::{normalize::normalize_encounter, seeded::int_in_range};

    use super::*;

    fn dated(dates: &[&str]) -> Vec<Encounter> {
        dates
            .iter()
            .enumerate()
            .map(|(i, d)| normalize_encounter(&json!({ "encounter_date": d }), i))
            .collect()
    }

    #[test]
    fn keeps_last_six_months_in_chronological_order() {
        let encounters = dated(&[
            "2024-08-01", "2023-12-15", "2024-01-02", "2024-02-03", "2024-03-04", "2024-04-05",
            "2024-05-06", "2024-06-07", "2024-07-08",
        ]);
        let labels: Vec<String> = derive_trends(&encounters, &SynthConfig::default())
            .into_iter()
            .map(|p| p.label)
            .collect();
        assert_eq!(labels, ["Mar-24", "Apr-24", "May-24", "Jun-24", "Jul-24", "Aug-24"]);
    }

    #[test]
    fn same_month_accumulates() {
        let encounters = dated(&["2024-03-01", "2024-03-20"]);
        let points = derive_trends(&encounters, &SynthConfig::default());

        assert_eq!(points.len(), 1);
        let a = int_in_range(&mut seeded("trend_Mar-24_0"), 5, 40);
        let b = int_in_range(&mut seeded("trend_Mar-24_1"), 5, 40);
        assert_eq!(i64::from(points[0].value), a + b);
    }

    #[test]
    fn same_month_name_in_different_years_stays_separate() {
        let encounters = dated(&["2023-03-01", "2024-03-01"]);
        let points = derive_trends(&encounters, &SynthConfig::default());
        assert_eq!(points.len(), 2);
        assert_eq!(points[0].label, "Mar-23");
        assert_eq!(points[1].label, "Mar-24");
    }

    #[test]
    fn undated_encounters_yield_empty_series() {
        let encounters = dated(&["", "not a date"]);
        assert!(derive_trends(&encounters, &SynthConfig::default()).is_empty());
        assert!(derive_trends(&[], &SynthConfig::default()).is_empty());
    }
}
