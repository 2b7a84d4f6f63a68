//! Clamped random walk with drift toward a target.
//!
//! Noise comes from whatever `Rng` the caller hands in. Live feeds use an
//! entropy-seeded generator, since this is simulated telemetry and is not
//! meant to be reproducible; tests pass a seeded one.

use rand::Rng;

/// Pull toward `drift_to` applied per tick by [`next_value`].
pub const VALUE_DRIFT: f64 = 0.06;
/// Pull toward `drift_to` applied per tick by [`next_counter`].
pub const COUNTER_DRIFT: f64 = 0.03;

/// Bounds and step for a smoothly wandering value (vitals).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DriftPolicy {
    pub min: f64,
    pub max: f64,
    /// Noise is uniform in `[-step, step)`.
    pub step: f64,
    pub drift_to: Option<f64>,
}

/// Bounds and steps for an integer counter that mostly climbs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CounterPolicy {
    pub min: f64,
    pub max: f64,
    /// Upward moves are `up_step` scaled by a factor in `[0.4, 1.2)`.
    pub up_step: f64,
    /// Probability of a downward move on any tick.
    pub down_chance: f64,
    pub down_step: f64,
    pub drift_to: Option<f64>,
}

pub fn clamp(value: f64, min: f64, max: f64) -> f64 {
    min.max(max.min(value))
}

/// `clamp(prev + noise + drift)`.
pub fn next_value<R: Rng + ?Sized>(rng: &mut R, prev: f64, policy: &DriftPolicy) -> f64 {
    let noise = (rng.gen::<f64>() - 0.5) * policy.step * 2.0;
    let drift = policy.drift_to.map_or(0.0, |t| (t - prev) * VALUE_DRIFT);
    clamp(prev + noise + drift, policy.min, policy.max)
}

/// Like [`next_value`] but with an asymmetric delta, rounded to an integer.
pub fn next_counter<R: Rng + ?Sized>(rng: &mut R, prev: f64, policy: &CounterPolicy) -> f64 {
    let down = rng.gen::<f64>() < policy.down_chance;
    let delta = if down {
        -policy.down_step
    } else {
        policy.up_step * (0.4 + rng.gen::<f64>() * 0.8)
    };
    let drift = policy.drift_to.map_or(0.0, |t| (t - prev) * COUNTER_DRIFT);
    clamp(prev + delta + drift, policy.min, policy.max).round()
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, SeedableRng};

    use super::*;

    const WIDE: DriftPolicy = DriftPolicy {
        min: 0.0,
        max: 200.0,
        step: 2.0,
        drift_to: Some(100.0),
    };

    // ── clamp ─────────────────────────────────────────────────────────────────

    #[test]
    fn clamp_bounds_both_sides() {
        assert_eq!(clamp(-5.0, 0.0, 10.0), 0.0);
        assert_eq!(clamp(15.0, 0.0, 10.0), 10.0);
        assert_eq!(clamp(7.5, 0.0, 10.0), 7.5);
    }

    // ── next_value ────────────────────────────────────────────────────────────

    #[test]
    fn walk_stays_in_bounds_and_centres_on_target() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut v = 100.0;
        let mut sum = 0.0;
        for _ in 0..10_000 {
            v = next_value(&mut rng, v, &WIDE);
            assert!((0.0..=200.0).contains(&v));
            sum += v;
        }
        let mean = sum / 10_000.0;
        assert!((mean - 100.0).abs() < 2.0, "mean drifted to {mean}");
    }

    #[test]
    fn drift_pulls_a_distant_value_back() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut v = 190.0;
        for _ in 0..200 {
            v = next_value(&mut rng, v, &WIDE);
        }
        assert!(v < 120.0, "value stuck at {v}");
    }

    #[test]
    fn without_target_only_noise_moves_the_value() {
        let policy = DriftPolicy {
            drift_to: None,
            ..WIDE
        };
        let mut rng = StdRng::seed_from_u64(3);
        let next = next_value(&mut rng, 150.0, &policy);
        assert!((next - 150.0).abs() <= 2.0);
    }

    #[test]
    fn value_at_the_edge_never_overshoots() {
        let tight = DriftPolicy {
            min: 90.0,
            max: 100.0,
            step: 5.0,
            drift_to: Some(120.0),
        };
        let mut rng = StdRng::seed_from_u64(5);
        let mut v = 100.0;
        for _ in 0..1_000 {
            v = next_value(&mut rng, v, &tight);
            assert!((90.0..=100.0).contains(&v));
        }
    }

    // ── next_counter ──────────────────────────────────────────────────────────

    const OPD: CounterPolicy = CounterPolicy {
        min: 80.0,
        max: 320.0,
        up_step: 8.0,
        down_chance: 0.22,
        down_step: 4.0,
        drift_to: None,
    };

    #[test]
    fn counter_is_integral_and_bounded() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut v = 80.0;
        for _ in 0..500 {
            v = next_counter(&mut rng, v, &OPD);
            assert_eq!(v, v.round());
            assert!((80.0..=320.0).contains(&v));
        }
    }

    #[test]
    fn counter_trends_upward() {
        let mut rng = StdRng::seed_from_u64(2);
        let mut v = 80.0;
        for _ in 0..20 {
            v = next_counter(&mut rng, v, &OPD);
        }
        assert!(v > 100.0, "counter only reached {v}");
    }

    #[test]
    fn certain_down_step_is_exact() {
        let always_down = CounterPolicy {
            down_chance: 1.0,
            ..OPD
        };
        let mut rng = StdRng::seed_from_u64(9);
        assert_eq!(next_counter(&mut rng, 200.0, &always_down), 196.0);
        assert_eq!(next_counter(&mut rng, 81.0, &always_down), 80.0);
    }
}
