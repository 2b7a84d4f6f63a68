//! Deterministic hashing and pseudo-random streams.
//!
//! Every synthetic value in the dashboard is drawn from a generator seeded by
//! a composite string such as `"appt_{patient_id}_{encounter_id}"`. Each
//! derivation builds its own generator from its own key, so results never
//! depend on the order in which derivations run or on how many values some
//! other derivation consumed.
//!
//! ```rust,ignore
//! use wardlens_core::seeded::{seeded, int_in_range};
//!
//! let mut rng = seeded("doc_0_wardlens-demo");
//! let salary = int_in_range(&mut rng, 90_000, 240_000);
//! ```

/// FNV-1a (32-bit) over the UTF-16 code units of `text`, left to right.
///
/// Code units rather than `char`s or bytes keep the value identical to what a
/// browser-side implementation computes for the same key.
pub fn hash_str(text: &str) -> u32 {
    let mut h: u32 = 2_166_136_261;
    for unit in text.encode_utf16() {
        h ^= u32::from(unit);
        h = h.wrapping_mul(16_777_619);
    }
    h
}

/// The mulberry32 generator: a 32-bit state advanced by a fixed odd
/// increment, scrambled by two xorshift-multiply rounds and a final xorshift.
///
/// Not shared between threads or derivations; construct one per seed key.
#[derive(Debug, Clone)]
pub struct Mulberry32 {
    state: u32,
}

impl Mulberry32 {
    pub fn new(seed: u32) -> Self {
        Self { state: seed }
    }

    /// Advance the state and return a float in `[0, 1)`.
    pub fn next_f64(&mut self) -> f64 {
        self.state = self.state.wrapping_add(0x6D2B_79F5);
        let mut t = self.state;
        t = (t ^ (t >> 15)).wrapping_mul(t | 1);
        t ^= t.wrapping_add((t ^ (t >> 7)).wrapping_mul(t | 61));
        f64::from(t ^ (t >> 14)) / 4_294_967_296.0
    }
}

/// A fresh generator keyed by `hash_str(key)`.
pub fn seeded(key: &str) -> Mulberry32 {
    Mulberry32::new(hash_str(key))
}

/// Uniformly select one element, truncating the scaled draw toward zero.
///
/// Always consumes exactly one draw, even for an empty slice, so the
/// positions of later draws in the stream never shift.
pub fn pick<'a, T>(rng: &mut Mulberry32, options: &'a [T]) -> Option<&'a T> {
    let r = rng.next_f64();
    let idx = (r * options.len() as f64) as usize;
    options.get(idx)
}

/// Integer in `[min, max]`, both bounds inclusive.
pub fn int_in_range(rng: &mut Mulberry32, min: i64, max: i64) -> i64 {
    let span = (max - min + 1) as f64;
    (rng.next_f64() * span).floor() as i64 + min
}

/// Float in `[min, max)` rounded to `decimals` places.
pub fn num_in_range(rng: &mut Mulberry32, min: f64, max: f64, decimals: u32) -> f64 {
    let v = rng.next_f64() * (max - min) + min;
    round_to(v, decimals)
}

/// Round half away from zero to `decimals` places.
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}
