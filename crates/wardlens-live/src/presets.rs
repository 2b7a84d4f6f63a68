//! The three live records the dashboards display, with their policies and
//! tick cadences.

use std::time::Duration;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::{
    drift::{next_counter, next_value, CounterPolicy, DriftPolicy},
    feed::LiveState,
};

pub const VITALS_INTERVAL: Duration = Duration::from_secs(2);
pub const OPS_INTERVAL: Duration = Duration::from_secs(15);
pub const REVENUE_INTERVAL: Duration = Duration::from_secs(30);

const fn vital(min: f64, max: f64, step: f64, drift_to: f64) -> DriftPolicy {
    DriftPolicy {
        min,
        max,
        step,
        drift_to: Some(drift_to),
    }
}

const fn counter(min: f64, max: f64, up_step: f64, down_chance: f64, down_step: f64) -> CounterPolicy {
    CounterPolicy {
        min,
        max,
        up_step,
        down_chance,
        down_step,
        drift_to: None,
    }
}

// ── Vitals ────────────────────────────────────────────────────────────────────

pub const HEART_RATE: DriftPolicy = vital(55.0, 135.0, 2.0, 82.0);
pub const SPO2: DriftPolicy = vital(90.0, 100.0, 0.5, 97.0);
/// Fahrenheit.
pub const TEMPERATURE: DriftPolicy = vital(97.0, 103.5, 0.15, 98.6);
pub const SYSTOLIC: DriftPolicy = vital(90.0, 185.0, 2.0, 124.0);
pub const DIASTOLIC: DriftPolicy = vital(55.0, 115.0, 2.0, 78.0);
pub const RESPIRATORY_RATE: DriftPolicy = vital(10.0, 26.0, 1.0, 16.0);

/// One monitored patient's vitals. Starts at the drift targets.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VitalsState {
    pub hr: f64,
    pub spo2: f64,
    pub temp: f64,
    pub sys: f64,
    pub dia: f64,
    pub rr: f64,
}

impl Default for VitalsState {
    fn default() -> Self {
        Self {
            hr: 82.0,
            spo2: 97.0,
            temp: 98.6,
            sys: 124.0,
            dia: 78.0,
            rr: 16.0,
        }
    }
}

impl LiveState for VitalsState {
    fn evolve<R: Rng + ?Sized>(&self, rng: &mut R) -> Self {
        Self {
            hr: next_value(rng, self.hr, &HEART_RATE),
            spo2: next_value(rng, self.spo2, &SPO2),
            temp: next_value(rng, self.temp, &TEMPERATURE),
            sys: next_value(rng, self.sys, &SYSTOLIC),
            dia: next_value(rng, self.dia, &DIASTOLIC),
            rr: next_value(rng, self.rr, &RESPIRATORY_RATE),
        }
    }
}

// ── Operations ────────────────────────────────────────────────────────────────

pub const OPD_TODAY: CounterPolicy = counter(80.0, 320.0, 8.0, 0.22, 4.0);
pub const IP_ADMITS_TODAY: CounterPolicy = counter(3.0, 45.0, 2.0, 0.18, 1.0);
pub const OT_SURGERIES_TODAY: CounterPolicy = counter(0.0, 20.0, 1.0, 0.25, 1.0);
pub const ER_LAST_HOUR: CounterPolicy = counter(0.0, 35.0, 2.0, 0.30, 2.0);
pub const BED_OCCUPANCY_PCT: CounterPolicy = counter(50.0, 97.0, 1.0, 0.40, 1.0);

/// Hospital-wide operational counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpsState {
    pub opd_today: u32,
    pub ip_admits_today: u32,
    pub ot_surgeries_today: u32,
    pub er_last_hour: u32,
    pub bed_occ_pct: u32,
}

impl Default for OpsState {
    fn default() -> Self {
        Self {
            opd_today: 140,
            ip_admits_today: 12,
            ot_surgeries_today: 4,
            er_last_hour: 8,
            bed_occ_pct: 78,
        }
    }
}

/// Counters are clamped to non-negative bounds before the cast.
fn step_counter<R: Rng + ?Sized>(rng: &mut R, prev: u32, policy: &CounterPolicy) -> u32 {
    next_counter(rng, f64::from(prev), policy) as u32
}

impl LiveState for OpsState {
    fn evolve<R: Rng + ?Sized>(&self, rng: &mut R) -> Self {
        Self {
            opd_today: step_counter(rng, self.opd_today, &OPD_TODAY),
            ip_admits_today: step_counter(rng, self.ip_admits_today, &IP_ADMITS_TODAY),
            ot_surgeries_today: step_counter(rng, self.ot_surgeries_today, &OT_SURGERIES_TODAY),
            er_last_hour: step_counter(rng, self.er_last_hour, &ER_LAST_HOUR),
            bed_occ_pct: step_counter(rng, self.bed_occ_pct, &BED_OCCUPANCY_PCT),
        }
    }
}

// ── Revenue ───────────────────────────────────────────────────────────────────

pub const REVENUE_TODAY: CounterPolicy = counter(120_000.0, 1_200_000.0, 45_000.0, 0.14, 25_000.0);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevenueState {
    pub revenue_today: u32,
}

impl Default for RevenueState {
    fn default() -> Self {
        Self {
            revenue_today: 420_000,
        }
    }
}

impl LiveState for RevenueState {
    fn evolve<R: Rng + ?Sized>(&self, rng: &mut R) -> Self {
        Self {
            revenue_today: step_counter(rng, self.revenue_today, &REVENUE_TODAY),
        }
    }
}
