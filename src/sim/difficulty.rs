//! Score-driven difficulty scaling
//!
//! Pure functions of the running score. Both curves are monotonic in score and
//! bounded: the spawn interval never drops below `MIN_SPAWN_INTERVAL` and the
//! fall speed never exceeds the value reached at saturation.

use super::config::DifficultyCurve;
use crate::consts::*;

/// Spawn cadence and fall speed for the current score
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Difficulty {
    /// Seconds of logic time between spawns
    pub spawn_interval: f32,
    /// Downward speed of every item (pixels/s)
    pub fall_speed: f32,
}

/// Difficulty for `score` under the given curve
pub fn difficulty_for(score: u64, curve: DifficultyCurve) -> Difficulty {
    match curve {
        DifficultyCurve::Continuous => {
            let d = (score as f32 / MAX_DIFFICULTY_SCORE as f32).min(1.0);
            Difficulty {
                spawn_interval: INITIAL_SPAWN_INTERVAL
                    - (INITIAL_SPAWN_INTERVAL - MIN_SPAWN_INTERVAL) * d,
                fall_speed: INITIAL_FALL_SPEED + CONTINUOUS_SPEED_GAIN * d,
            }
        }
        DifficultyCurve::Stepped => {
            let level = difficulty_level(score) as f32;
            Difficulty {
                spawn_interval: (INITIAL_SPAWN_INTERVAL
                    - level * SPAWN_INTERVAL_DECREASE_PER_LEVEL)
                    .max(MIN_SPAWN_INTERVAL),
                fall_speed: INITIAL_FALL_SPEED + level * SPEED_INCREASE_PER_LEVEL,
            }
        }
    }
}

/// Stepped difficulty level (capped)
pub fn difficulty_level(score: u64) -> u64 {
    (score / DIFFICULTY_SCORE_INTERVAL).min(MAX_DIFFICULTY_LEVEL)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_baseline_at_zero() {
        for curve in [DifficultyCurve::Continuous, DifficultyCurve::Stepped] {
            let d = difficulty_for(0, curve);
            assert!((d.spawn_interval - INITIAL_SPAWN_INTERVAL).abs() < 1e-6);
            assert!((d.fall_speed - INITIAL_FALL_SPEED).abs() < 1e-6);
        }
    }

    #[test]
    fn test_continuous_saturates() {
        let at_cap = difficulty_for(MAX_DIFFICULTY_SCORE, DifficultyCurve::Continuous);
        let beyond = difficulty_for(MAX_DIFFICULTY_SCORE * 10, DifficultyCurve::Continuous);
        assert_eq!(at_cap, beyond);
        assert!((at_cap.spawn_interval - MIN_SPAWN_INTERVAL).abs() < 1e-5);
        assert!((at_cap.fall_speed - 420.0).abs() < 1e-3);
    }

    #[test]
    fn test_stepped_levels() {
        assert_eq!(difficulty_level(99), 0);
        assert_eq!(difficulty_level(100), 1);
        let d = difficulty_for(250, DifficultyCurve::Stepped);
        assert!((d.fall_speed - 170.0).abs() < 1e-4);
        assert!((d.spawn_interval - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_stepped_is_bounded() {
        let d = difficulty_for(u64::MAX, DifficultyCurve::Stepped);
        assert!(d.spawn_interval >= MIN_SPAWN_INTERVAL);
        assert!(d.fall_speed <= INITIAL_FALL_SPEED + 16.0 * SPEED_INCREASE_PER_LEVEL + 1e-3);
    }

    proptest! {
        #[test]
        fn prop_monotonic(a in 0u64..5_000, b in 0u64..5_000, stepped in any::<bool>()) {
            let curve = if stepped { DifficultyCurve::Stepped } else { DifficultyCurve::Continuous };
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            let d_lo = difficulty_for(lo, curve);
            let d_hi = difficulty_for(hi, curve);
            prop_assert!(d_hi.spawn_interval <= d_lo.spawn_interval + 1e-6);
            prop_assert!(d_hi.fall_speed + 1e-6 >= d_lo.fall_speed);
            prop_assert!(d_hi.spawn_interval >= MIN_SPAWN_INTERVAL - 1e-6);
        }
    }
}
