//! Raw record → canonical entity normalization.
//!
//! Source files are loosely typed: the same field appears under several
//! names, values arrive as strings or numbers, and dates come in whatever
//! format the exporter felt like. Normalization never fails. Every canonical
//! field has an ordered list of [`Accessor`]s; the first one that yields a
//! non-null value wins, and a documented default covers the rest.
//!
//! Resolution order for each field is the `const` slice named after it
//! (e.g. [`PATIENT_ID`]), so precedence is visible and testable in one place.

use std::sync::OnceLock;

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use regex::Regex;
use serde_json::{Map, Value};
use tracing::debug;

use wardlens_contracts::{encounter::Encounter, patient::Patient};

/// A raw JSON object as read from a dataset file.
pub type RawRecord = Map<String, Value>;

// ── Accessors ─────────────────────────────────────────────────────────────────

/// One way of obtaining a candidate value for a canonical field.
#[derive(Clone, Copy)]
pub enum Accessor {
    /// Read a key verbatim. `null` counts as absent.
    Key(&'static str),
    /// Compute a value from the whole record.
    Derived(fn(&RawRecord) -> Option<Value>),
}

impl Accessor {
    pub fn get(&self, record: &RawRecord) -> Option<Value> {
        match self {
            Accessor::Key(key) => record.get(*key).filter(|v| !v.is_null()).cloned(),
            Accessor::Derived(f) => f(record),
        }
    }
}

/// Evaluate `accessors` in order and return the first defined value.
pub fn resolve_field(accessors: &[Accessor], record: &RawRecord) -> Option<Value> {
    accessors.iter().find_map(|a| a.get(record))
}

/// Like [`resolve_field`], rendered as a string. Empty strings count as absent.
pub fn resolve_text(accessors: &[Accessor], record: &RawRecord) -> Option<String> {
    resolve_field(accessors, record)
        .map(|v| value_to_string(&v))
        .filter(|s| !s.trim().is_empty())
}

pub const PATIENT_ID: &[Accessor] = &[
    Accessor::Key("patient_id"),
    Accessor::Key("PatientID"),
    Accessor::Key("id"),
];

pub const FIRST_NAME: &[Accessor] = &[
    Accessor::Key("first_name"),
    Accessor::Key("firstName"),
    Accessor::Key("FirstName"),
];

pub const LAST_NAME: &[Accessor] = &[
    Accessor::Key("last_name"),
    Accessor::Key("lastName"),
    Accessor::Key("LastName"),
];

pub const FULL_NAME: &[Accessor] = &[
    Accessor::Key("full_name"),
    Accessor::Key("fullName"),
    Accessor::Key("FullName"),
    Accessor::Key("name"),
    Accessor::Derived(compose_full_name),
];

pub const GENDER: &[Accessor] = &[Accessor::Key("gender"), Accessor::Key("Gender")];

pub const CITY: &[Accessor] = &[
    Accessor::Key("city"),
    Accessor::Key("City"),
    Accessor::Key("location"),
    Accessor::Key("Location"),
];

pub const AGE: &[Accessor] = &[Accessor::Key("age"), Accessor::Key("Age")];

pub const PRIMARY_CONDITION: &[Accessor] = &[
    Accessor::Key("primary_condition_name"),
    Accessor::Key("condition"),
    Accessor::Key("Condition"),
];

pub const ENCOUNTER_ID: &[Accessor] = &[
    Accessor::Key("encounter_id"),
    Accessor::Key("EncounterID"),
    Accessor::Key("id"),
];

pub const ENCOUNTER_PATIENT_ID: &[Accessor] = &[
    Accessor::Key("patient_id"),
    Accessor::Key("PatientID"),
    Accessor::Key("subject_id"),
];

pub const ENCOUNTER_TYPE: &[Accessor] = &[
    Accessor::Key("encounter_type"),
    Accessor::Key("type"),
    Accessor::Key("EncounterType"),
];

pub const DEPARTMENT: &[Accessor] = &[
    Accessor::Key("department"),
    Accessor::Key("service"),
    Accessor::Key("Department"),
];

pub const READMITTED: &[Accessor] = &[
    Accessor::Key("readmitted_30d_flag"),
    Accessor::Key("readmit"),
    Accessor::Key("Readmitted"),
];

pub const TOTAL_COST: &[Accessor] = &[
    Accessor::Key("total_cost_usd"),
    Accessor::Key("cost"),
    Accessor::Key("TotalCost"),
];

pub const ENCOUNTER_DATE: &[Accessor] = &[
    Accessor::Key("encounter_date"),
    Accessor::Key("EncounterDate"),
    Accessor::Key("date"),
    Accessor::Key("Date"),
    Accessor::Key("start"),
    Accessor::Key("Start"),
    Accessor::Key("start_date"),
    Accessor::Key("StartDate"),
    Accessor::Key("admit_date"),
    Accessor::Key("AdmitDate"),
];

/// `"{first} {last}"`, trimmed. Always defined; may be empty.
fn compose_full_name(record: &RawRecord) -> Option<Value> {
    let first = resolve_field(FIRST_NAME, record)
        .map(|v| value_to_string(&v))
        .unwrap_or_default();
    let last = resolve_field(LAST_NAME, record)
        .map(|v| value_to_string(&v))
        .unwrap_or_default();
    Some(Value::String(format!("{first} {last}").trim().to_string()))
}

// ── Coercion ──────────────────────────────────────────────────────────────────

/// Render any JSON value as display text. `null` becomes the empty string and
/// integral numbers print without a fractional part.
pub fn value_to_string(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                i.to_string()
            } else if let Some(u) = n.as_u64() {
                u.to_string()
            } else {
                let f = n.as_f64().unwrap_or(f64::NAN);
                if f.fract() == 0.0 && f.abs() < 1e15 {
                    format!("{}", f as i64)
                } else {
                    f.to_string()
                }
            }
        }
        other => other.to_string(),
    }
}

/// Numeric coercion with `Number()` semantics: `null` and blank strings are
/// 0, booleans are 0/1, anything unparseable is NaN. Callers substitute
/// their own default for non-finite results.
pub fn coerce_number(value: &Value) -> f64 {
    match value {
        Value::Null => 0.0,
        Value::Bool(b) => f64::from(u8::from(*b)),
        Value::Number(n) => n.as_f64().unwrap_or(f64::NAN),
        Value::String(s) => {
            let t = s.trim();
            if t.is_empty() {
                0.0
            } else {
                t.parse::<f64>().unwrap_or(f64::NAN)
            }
        }
        Value::Array(_) | Value::Object(_) => f64::NAN,
    }
}

fn finite_or(value: Option<Value>, default: f64) -> f64 {
    let n = value.as_ref().map(coerce_number).unwrap_or(default);
    if n.is_finite() {
        n
    } else {
        default
    }
}

// ── Dates ─────────────────────────────────────────────────────────────────────

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
];

const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%B %d, %Y",
    "%b %d, %Y",
    "%d %B %Y",
    "%d %b %Y",
];

fn partial_date_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^(\d{4})[-/](\d{2})(?:[-/](\d{2}))?").expect("partial date pattern is valid")
    })
}

fn midnight_utc(date: NaiveDate) -> Option<DateTime<Utc>> {
    date.and_hms_opt(0, 0, 0).map(|dt| Utc.from_utc_datetime(&dt))
}

/// Common textual formats. Offsets are honoured; naive values are read as UTC.
fn parse_native(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(s) {
        return Some(dt.with_timezone(&Utc));
    }
    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(Utc.from_utc_datetime(&dt));
        }
    }
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
        .and_then(midnight_utc)
}

/// Resolve a date string, never failing.
///
/// Tried in order:
/// 1. an all-digit string is an epoch timestamp in milliseconds;
/// 2. common full date / date-time formats;
/// 3. a leading `YYYY-MM[-DD]` or `YYYY/MM[/DD]`, day defaulting to 01.
///
/// The digit check runs first so `"2024"` is read as a timestamp, never as a
/// partial date. Out-of-range components (month 13, Feb 30) yield `None`.
pub fn parse_date_safe(input: &str) -> Option<DateTime<Utc>> {
    let s = input.trim();
    if s.is_empty() {
        return None;
    }

    if s.bytes().all(|b| b.is_ascii_digit()) {
        if let Some(dt) = s.parse::<i64>().ok().and_then(DateTime::from_timestamp_millis) {
            return Some(dt);
        }
    }

    if let Some(dt) = parse_native(s) {
        return Some(dt);
    }

    let caps = partial_date_pattern().captures(s)?;
    let year: i32 = caps.get(1)?.as_str().parse().ok()?;
    let month: u32 = caps.get(2)?.as_str().parse().ok()?;
    let day: u32 = caps.get(3).map_or(Some(1), |m| m.as_str().parse().ok())?;
    NaiveDate::from_ymd_opt(year, month, day).and_then(midnight_utc)
}

// ── Entities ──────────────────────────────────────────────────────────────────

const PATIENT_FIELDS: &[&str] = &[
    "patient_id",
    "full_name",
    "gender",
    "city",
    "age",
    "primary_condition_name",
];

const ENCOUNTER_FIELDS: &[&str] = &[
    "encounter_id",
    "patient_id",
    "encounter_type",
    "department",
    "readmitted_30d_flag",
    "total_cost_usd",
    "dateStr",
    "dateObj",
];

/// Copy of the raw record minus the canonical field names, which the
/// normalized values replace.
fn passthrough(record: &RawRecord, canonical: &[&str]) -> Map<String, Value> {
    record
        .iter()
        .filter(|(k, _)| !canonical.contains(&k.as_str()))
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect()
}

fn as_record(raw: &Value) -> RawRecord {
    raw.as_object().cloned().unwrap_or_default()
}

/// Normalize one raw patient. `index` is the record's position in its file
/// and only feeds the synthesized `PAT-NNNN` id.
pub fn normalize_patient(raw: &Value, index: usize) -> Patient {
    let record = as_record(raw);

    let patient_id = resolve_text(PATIENT_ID, &record)
        .unwrap_or_else(|| format!("PAT-{:04}", index + 1));

    let full_name = resolve_field(FULL_NAME, &record)
        .map(|v| value_to_string(&v))
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| "Unknown".to_string());

    let age = resolve_field(AGE, &record)
        .filter(|v| !matches!(v, Value::String(s) if s.trim().is_empty()))
        .map(|v| coerce_number(&v))
        .filter(|n| n.is_finite() && *n >= 0.0)
        .map(|n| n.trunc() as u32);

    Patient {
        patient_id,
        full_name,
        gender: resolve_field(GENDER, &record)
            .map(|v| value_to_string(&v))
            .unwrap_or_else(|| "Unknown".to_string()),
        city: resolve_field(CITY, &record)
            .map(|v| value_to_string(&v))
            .unwrap_or_else(|| "Unknown".to_string()),
        age,
        primary_condition_name: resolve_field(PRIMARY_CONDITION, &record)
            .map(|v| value_to_string(&v))
            .unwrap_or_else(|| "Unspecified".to_string()),
        extra: passthrough(&record, PATIENT_FIELDS),
    }
}

/// Normalize one raw encounter. `index` only feeds the synthesized
/// `ENC-NNNNN` id.
pub fn normalize_encounter(raw: &Value, index: usize) -> Encounter {
    let record = as_record(raw);

    let encounter_id = resolve_text(ENCOUNTER_ID, &record)
        .unwrap_or_else(|| format!("ENC-{:05}", index + 1));

    let readmit = finite_or(resolve_field(READMITTED, &record), 0.0);
    let cost = finite_or(resolve_field(TOTAL_COST, &record), 0.0);

    let date_str = resolve_field(ENCOUNTER_DATE, &record)
        .map(|v| value_to_string(&v))
        .unwrap_or_default();
    let date = parse_date_safe(&date_str);

    Encounter {
        encounter_id,
        patient_id: resolve_field(ENCOUNTER_PATIENT_ID, &record)
            .map(|v| value_to_string(&v))
            .unwrap_or_default(),
        encounter_type: resolve_field(ENCOUNTER_TYPE, &record)
            .map(|v| value_to_string(&v))
            .unwrap_or_else(|| "Unknown".to_string()),
        department: resolve_field(DEPARTMENT, &record)
            .map(|v| value_to_string(&v))
            .unwrap_or_else(|| "Unknown".to_string()),
        readmitted_30d_flag: u8::from(readmit == 1.0),
        total_cost_usd: cost.max(0.0),
        date_str,
        date,
        extra: passthrough(&record, ENCOUNTER_FIELDS),
    }
}

pub fn normalize_patients(raw: &[Value]) -> Vec<Patient> {
    let patients: Vec<Patient> = raw
        .iter()
        .enumerate()
        .map(|(i, p)| normalize_patient(p, i))
        .collect();
    debug!(count = patients.len(), "patients normalized");
    patients
}

pub fn normalize_encounters(raw: &[Value]) -> Vec<Encounter> {
    let encounters: Vec<Encounter> = raw
        .iter()
        .enumerate()
        .map(|(i, e)| normalize_encounter(e, i))
        .collect();
    let undated = encounters.iter().filter(|e| e.date.is_none()).count();
    debug!(count = encounters.len(), undated, "encounters normalized");
    encounters
}
