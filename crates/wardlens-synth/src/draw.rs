//! Typed wrappers over the seeded helpers, shared by every derivation.

use wardlens_contracts::filter::UNKNOWN;
use wardlens_core::seeded::{int_in_range, num_in_range, pick, Mulberry32};

use crate::config::{AmountRange, IntRange};

/// Integer draw for counts and money. Validated configs never produce a
/// negative value; anything out of `u32` range clamps to 0.
pub(crate) fn draw_count(rng: &mut Mulberry32, range: IntRange) -> u32 {
    u32::try_from(int_in_range(rng, range.min, range.max)).unwrap_or(0)
}

pub(crate) fn draw_amount(rng: &mut Mulberry32, range: AmountRange, decimals: u32) -> f64 {
    num_in_range(rng, range.min, range.max, decimals)
}

pub(crate) fn draw_label(rng: &mut Mulberry32, pool: &[&str]) -> String {
    pick(rng, pool).map_or_else(|| UNKNOWN.to_string(), |s| s.to_string())
}

/// The seed component for an entity: its id, or its position when the id is
/// blank.
pub(crate) fn id_or_index(id: &str, index: usize) -> String {
    if id.trim().is_empty() {
        index.to_string()
    } else {
        id.to_string()
    }
}
