//! Filtering and aggregation over canonical entities.
//!
//! Everything here is a pure function of its inputs. Empty inputs produce
//! empty (or placeholder) outputs, never errors; the view layer renders an
//! explicit empty state for them.

use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::OnceLock;

use chrono::Datelike;
use regex::Regex;

use wardlens_contracts::{
    encounter::Encounter,
    filter::{
        CountRow, EncounterFilters, FilterOptions, PatientFilterOptions, PatientFilters, ALL,
        UNKNOWN,
    },
    patient::{Patient, PatientKpis},
};

use crate::normalize::value_to_string;

// ── Options ───────────────────────────────────────────────────────────────────

/// Case-insensitive ordering with a case-sensitive tiebreak, so `"cardiology"`
/// and `"Cardiology"` sit together but still sort deterministically.
pub fn locale_cmp(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

/// Deduplicate, drop empty strings, sort ascending.
pub fn unique_options<I, S>(values: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut seen = HashSet::new();
    let mut out: Vec<String> = values
        .into_iter()
        .filter_map(|v| {
            let v = v.as_ref();
            (!v.is_empty() && seen.insert(v.to_string())).then(|| v.to_string())
        })
        .collect();
    out.sort_by(|a, b| locale_cmp(a, b));
    out
}

/// `["All", ...observed]`, or `["All", "Unknown"]` when nothing was observed.
fn with_all(observed: Vec<String>) -> Vec<String> {
    let mut options = vec![ALL.to_string()];
    if observed.is_empty() {
        options.push(UNKNOWN.to_string());
    } else {
        options.extend(observed);
    }
    options
}

pub fn build_filter_options(encounters: &[Encounter]) -> FilterOptions {
    FilterOptions {
        department: with_all(unique_options(encounters.iter().map(|e| &e.department))),
        encounter_type: with_all(unique_options(encounters.iter().map(|e| &e.encounter_type))),
        year: with_all(unique_options(
            encounters.iter().filter_map(|e| e.year()).map(|y| y.to_string()),
        )),
        readmitted: vec![ALL.to_string(), "Yes".to_string(), "No".to_string()],
    }
}

pub fn build_patient_filter_options(patients: &[Patient]) -> PatientFilterOptions {
    PatientFilterOptions {
        gender: with_all(unique_options(patients.iter().map(|p| &p.gender))),
        city: with_all(unique_options(patients.iter().map(|p| &p.city))),
        condition: with_all(unique_options(
            patients.iter().map(|p| &p.primary_condition_name),
        )),
    }
}

// ── Encounter filters ─────────────────────────────────────────────────────────

fn is_all(value: &str) -> bool {
    value == ALL
}

fn matches_encounter(e: &Encounter, f: &EncounterFilters) -> bool {
    if !is_all(&f.department) && e.department != f.department {
        return false;
    }
    if !is_all(&f.encounter_type) && e.encounter_type != f.encounter_type {
        return false;
    }
    if !is_all(&f.year) && e.year().map(|y| y.to_string()).as_deref() != Some(f.year.as_str()) {
        return false;
    }
    match f.readmitted.as_str() {
        "Yes" => e.is_readmitted(),
        "No" => !e.is_readmitted(),
        _ => true,
    }
}

/// Conjunctive filter. Every dimension set to `"All"` is a no-op.
pub fn apply_filters(encounters: &[Encounter], filters: &EncounterFilters) -> Vec<Encounter> {
    encounters
        .iter()
        .filter(|e| matches_encounter(e, filters))
        .cloned()
        .collect()
}

// ── Aggregates ────────────────────────────────────────────────────────────────

pub fn sum_cost(encounters: &[Encounter]) -> f64 {
    encounters
        .iter()
        .map(|e| e.total_cost_usd)
        .filter(|c| c.is_finite())
        .sum()
}

fn year_month_prefix() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^(\d{4})[-/](\d{2})").expect("year-month pattern is valid"))
}

fn month_label(e: &Encounter) -> Option<String> {
    if let Some(d) = e.date {
        return Some(format!("{}-{:02}", d.year(), d.month()));
    }
    let caps = year_month_prefix().captures(e.date_str.trim())?;
    Some(format!("{}-{}", &caps[1], &caps[2]))
}

/// Encounter counts per `YYYY-MM`, ascending by label.
///
/// Encounters whose date did not parse fall back to a `YYYY-MM` prefix of the
/// raw text; those with neither are skipped.
pub fn count_by_month(encounters: &[Encounter]) -> Vec<CountRow> {
    let mut counts: BTreeMap<String, usize> = BTreeMap::new();
    for label in encounters.iter().filter_map(month_label) {
        *counts.entry(label).or_insert(0) += 1;
    }
    counts
        .into_iter()
        .map(|(name, value)| CountRow { name, value })
        .collect()
}

/// Text value of `key` on an encounter: canonical fields first, then the
/// passthrough map.
pub fn encounter_field(e: &Encounter, key: &str) -> Option<String> {
    match key {
        "encounter_id" => Some(e.encounter_id.clone()),
        "patient_id" => Some(e.patient_id.clone()),
        "encounter_type" => Some(e.encounter_type.clone()),
        "department" => Some(e.department.clone()),
        "readmitted_30d_flag" => Some(e.readmitted_30d_flag.to_string()),
        "total_cost_usd" => Some(value_to_string(&serde_json::json!(e.total_cost_usd))),
        "dateStr" => Some(e.date_str.clone()),
        _ => e.extra.get(key).map(value_to_string),
    }
}

/// Count encounters per value of `key`, descending, truncated to `top_n`.
///
/// Missing or empty values count as `"Unknown"`. Ties keep first-seen order.
pub fn count_by_key(encounters: &[Encounter], key: &str, top_n: usize) -> Vec<CountRow> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut rows: Vec<CountRow> = Vec::new();

    for e in encounters {
        let name = encounter_field(e, key)
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| UNKNOWN.to_string());
        match index.get(&name) {
            Some(&i) => rows[i].value += 1,
            None => {
                index.insert(name.clone(), rows.len());
                rows.push(CountRow { name, value: 1 });
            }
        }
    }

    rows.sort_by(|a, b| b.value.cmp(&a.value));
    rows.truncate(top_n);
    rows
}

/// The `n` most recent encounters. Undated encounters sort as the oldest.
pub fn most_recent(encounters: &[Encounter], n: usize) -> Vec<Encounter> {
    let mut sorted: Vec<Encounter> = encounters.to_vec();
    sorted.sort_by(|a, b| b.date.cmp(&a.date));
    sorted.truncate(n);
    sorted
}

// ── Patients ──────────────────────────────────────────────────────────────────

fn matches_patient(p: &Patient, f: &PatientFilters, query: &str) -> bool {
    if !is_all(&f.gender) && p.gender != f.gender {
        return false;
    }
    if !is_all(&f.city) && p.city != f.city {
        return false;
    }
    if !is_all(&f.condition) && p.primary_condition_name != f.condition {
        return false;
    }
    if let Some(age) = p.age {
        if f.age_min.is_some_and(|min| age < min) || f.age_max.is_some_and(|max| age > max) {
            return false;
        }
    }
    if query.is_empty() {
        return true;
    }
    let blob = format!(
        "{} {} {} {}",
        p.patient_id, p.full_name, p.city, p.primary_condition_name
    )
    .to_lowercase();
    blob.contains(query)
}

/// Conjunctive patient filter: exact gender / city / condition, inclusive age
/// bounds, and a case-insensitive free-text search.
pub fn apply_patient_filters(patients: &[Patient], filters: &PatientFilters) -> Vec<Patient> {
    let query = filters.query.trim().to_lowercase();
    patients
        .iter()
        .filter(|p| matches_patient(p, filters, &query))
        .cloned()
        .collect()
}

pub fn patient_kpis(patients: &[Patient]) -> PatientKpis {
    let gender_count = |g: &str| {
        patients
            .iter()
            .filter(|p| p.gender.eq_ignore_ascii_case(g))
            .count()
    };
    PatientKpis {
        total: patients.len(),
        male: gender_count("male"),
        female: gender_count("female"),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::normalize::{normalize_encounter, normalize_patient};

    fn enc(dept: &str, kind: &str, date: &str, readmit: u8, cost: f64) -> Encounter {
        normalize_encounter(
            &json!({
                "department": dept,
                "encounter_type": kind,
                "encounter_date": date,
                "readmitted_30d_flag": readmit,
                "total_cost_usd": cost
            }),
            0,
        )
    }

    fn sample() -> Vec<Encounter> {
        vec![
            enc("Cardiology", "Inpatient", "2024-01-10", 1, 1000.0),
            enc("Neurology", "Outpatient", "2024-01-22", 0, 250.0),
            enc("Cardiology", "Outpatient", "2024-02-03", 0, 400.0),
            enc("Oncology", "Inpatient", "2023-12-30", 1, 3000.0),
        ]
    }

    // ── Options ──────────────────────────────────────────────────────────────

    #[test]
    fn unique_options_dedupes_drops_empty_and_sorts() {
        let out = unique_options(["b", "", "A", "b", "c"]);
        assert_eq!(out, vec!["A", "b", "c"]);
    }

    #[test]
    fn filter_options_are_never_empty() {
        let opts = build_filter_options(&[]);
        for list in [&opts.department, &opts.encounter_type, &opts.year] {
            assert_eq!(list, &vec!["All".to_string(), "Unknown".to_string()]);
        }
        assert_eq!(opts.readmitted, vec!["All", "Yes", "No"]);

        let popts = build_patient_filter_options(&[]);
        assert_eq!(popts.city, vec!["All", "Unknown"]);
    }

    #[test]
    fn filter_options_list_observed_values() {
        let opts = build_filter_options(&sample());
        assert_eq!(opts.department, vec!["All", "Cardiology", "Neurology", "Oncology"]);
        assert_eq!(opts.encounter_type, vec!["All", "Inpatient", "Outpatient"]);
        assert_eq!(opts.year, vec!["All", "2023", "2024"]);
    }

    // ── apply_filters ────────────────────────────────────────────────────────

    #[test]
    fn all_sentinels_return_input_unchanged() {
        let data = sample();
        assert_eq!(apply_filters(&data, &EncounterFilters::default()), data);
    }

    #[test]
    fn unknown_department_returns_empty() {
        let f = EncounterFilters {
            department: "Dermatology".to_string(),
            ..Default::default()
        };
        assert!(apply_filters(&sample(), &f).is_empty());
    }

    #[test]
    fn dimensions_combine_conjunctively() {
        let f = EncounterFilters {
            department: "Cardiology".to_string(),
            year: "2024".to_string(),
            readmitted: "No".to_string(),
            ..Default::default()
        };
        let out = apply_filters(&sample(), &f);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].encounter_type, "Outpatient");

        let yes = EncounterFilters {
            readmitted: "Yes".to_string(),
            ..Default::default()
        };
        assert_eq!(apply_filters(&sample(), &yes).len(), 2);
    }

    #[test]
    fn year_filter_excludes_undated_encounters() {
        let mut data = sample();
        data.push(enc("Cardiology", "Inpatient", "unknown", 0, 0.0));
        let f = EncounterFilters {
            year: "2024".to_string(),
            ..Default::default()
        };
        assert_eq!(apply_filters(&data, &f).len(), 3);
    }

    // ── Aggregates ───────────────────────────────────────────────────────────

    #[test]
    fn sum_cost_totals_costs() {
        assert_eq!(sum_cost(&sample()), 4650.0);
        assert_eq!(sum_cost(&[]), 0.0);
    }

    #[test]
    fn count_by_month_empty_input() {
        assert!(count_by_month(&[]).is_empty());
    }

    #[test]
    fn count_by_month_two_months_sorted() {
        let data = vec![
            enc("A", "x", "2024-02-01", 0, 0.0),
            enc("A", "x", "2024-01-15", 0, 0.0),
            enc("A", "x", "2024-02-20", 0, 0.0),
        ];
        let rows = count_by_month(&data);
        assert_eq!(
            rows,
            vec![
                CountRow { name: "2024-01".to_string(), value: 1 },
                CountRow { name: "2024-02".to_string(), value: 2 },
            ]
        );
    }

    #[test]
    fn count_by_month_falls_back_to_raw_text() {
        // Month 13 cannot parse, but the raw prefix still buckets it.
        let data = vec![enc("A", "x", "2024-13-01", 0, 0.0), enc("A", "x", "garbage", 0, 0.0)];
        let rows = count_by_month(&data);
        assert_eq!(rows, vec![CountRow { name: "2024-13".to_string(), value: 1 }]);
    }

    #[test]
    fn count_by_key_ranks_and_truncates() {
        let rows = count_by_key(&sample(), "department", 2);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0], CountRow { name: "Cardiology".to_string(), value: 2 });
        // Tie between Neurology and Oncology keeps first-seen order.
        assert_eq!(rows[1].name, "Neurology");
    }

    #[test]
    fn count_by_key_defaults_missing_to_unknown() {
        let mut data = sample();
        data[0].extra.insert("ward".to_string(), json!("7B"));
        let rows = count_by_key(&data, "ward", 10);
        assert_eq!(rows[0], CountRow { name: "Unknown".to_string(), value: 3 });
        assert_eq!(rows[1], CountRow { name: "7B".to_string(), value: 1 });
    }

    #[test]
    fn most_recent_puts_undated_last() {
        let mut data = sample();
        data.push(enc("Z", "x", "", 0, 0.0));
        let recent = most_recent(&data, 5);
        assert_eq!(recent[0].date_str, "2024-02-03");
        assert_eq!(recent[3].date_str, "2023-12-30");
        assert_eq!(recent[4].date_str, "");
        assert_eq!(most_recent(&data, 2).len(), 2);
    }

    // ── Patients ─────────────────────────────────────────────────────────────

    fn patients() -> Vec<Patient> {
        vec![
            normalize_patient(&json!({ "id": "P1", "name": "Ava Nair", "gender": "Female", "city": "Pune", "age": 34, "condition": "Asthma" }), 0),
            normalize_patient(&json!({ "id": "P2", "name": "Omar Kim", "gender": "male", "city": "Austin", "age": 71, "condition": "Diabetes" }), 1),
            normalize_patient(&json!({ "id": "P3", "name": "Liam Scott", "gender": "Male", "city": "Pune" }), 2),
        ]
    }

    #[test]
    fn patient_filters_exact_and_range() {
        let f = PatientFilters {
            city: "Pune".to_string(),
            age_min: Some(30),
            age_max: Some(40),
            ..Default::default()
        };
        let ids: Vec<String> = apply_patient_filters(&patients(), &f)
            .into_iter()
            .map(|p| p.patient_id)
            .collect();
        // P3 has no age, so the bounds do not exclude it.
        assert_eq!(ids, vec!["P1", "P3"]);
    }

    #[test]
    fn patient_query_is_case_insensitive_substring() {
        let f = PatientFilters {
            query: "  DIAB ".to_string(),
            ..Default::default()
        };
        let out = apply_patient_filters(&patients(), &f);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].patient_id, "P2");
    }

    #[test]
    fn patient_kpis_count_genders_case_insensitively() {
        let k = patient_kpis(&patients());
        assert_eq!(k, PatientKpis { total: 3, male: 2, female: 1 });
    }
}
