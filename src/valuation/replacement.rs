// Replacement-level baselines and value over replacement.
//
// The baseline for a position emulates the value of a borderline rosterable
// player: with a deep pool it is the average of the 8th through 12th best
// values, with a thin pool it degrades to the worst observed value, and with
// almost no data it is zero. VOR is a player's adjusted value minus their
// position's baseline.

use std::cmp::Ordering;
use std::collections::HashMap;

use crate::valuation::round1;

/// Pools with at least this many values use the borderline-starter slice.
const DEEP_POOL: usize = 12;
/// The 0-indexed slice of ranks averaged for a deep pool.
const BORDERLINE_SLICE: std::ops::Range<usize> = 7..12;
/// Below this many values the baseline is simply zero.
const MIN_POOL: usize = 3;

/// Derive one baseline per position from all fantasy values observed in the
/// current pool. Recomputed on every board build; never persisted.
pub fn replacement_baselines(
    values_by_position: &HashMap<String, Vec<f64>>,
) -> HashMap<String, f64> {
    let mut baselines = HashMap::new();

    for (position, values) in values_by_position {
        let mut sorted = values.clone();
        sorted.sort_by(|a, b| b.partial_cmp(a).unwrap_or(Ordering::Equal));

        let baseline = if sorted.len() >= DEEP_POOL {
            let slice = &sorted[BORDERLINE_SLICE];
            slice.iter().sum::<f64>() / slice.len() as f64
        } else if sorted.len() >= MIN_POOL {
            sorted[sorted.len() - 1]
        } else {
            0.0
        };

        baselines.insert(position.clone(), baseline);
    }

    baselines
}

/// Value over replacement for one player, rounded to one decimal. A position
/// with no baseline entry reads as baseline 0, so VOR equals the raw value.
pub fn value_over_replacement(
    value: f64,
    position_key: &str,
    baselines: &HashMap<String, f64>,
) -> f64 {
    let baseline = baselines.get(position_key).copied().unwrap_or(0.0);
    round1(value - baseline)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn pool(position: &str, values: &[f64]) -> HashMap<String, Vec<f64>> {
        let mut m = HashMap::new();
        m.insert(position.to_string(), values.to_vec());
        m
    }

    #[test]
    fn deep_pool_uses_borderline_slice_mean() {
        // Values 24, 23, ..., 13 descending; ranks 8-12 are 17..13.
        let values: Vec<f64> = (0..12).map(|i| 24.0 - i as f64).collect();
        let baselines = replacement_baselines(&pool("PG", &values));
        // Mean of 17, 16, 15, 14, 13 = 15.
        assert_eq!(baselines["PG"], 15.0);
    }

    #[test]
    fn slice_is_taken_after_sorting_descending() {
        let mut values: Vec<f64> = (0..15).map(|i| 30.0 - i as f64).collect();
        values.reverse(); // ascending input must not change the result
        let baselines = replacement_baselines(&pool("C", &values));
        // Sorted descending: 30..16; ranks 8-12 are 23, 22, 21, 20, 19.
        assert_eq!(baselines["C"], 21.0);
    }

    #[test]
    fn thin_pool_degrades_to_minimum() {
        let baselines = replacement_baselines(&pool("SS", &[40.0, 25.0, 18.5]));
        assert_eq!(baselines["SS"], 18.5);

        let baselines = replacement_baselines(&pool("SS", &(1..=11).map(f64::from).collect::<Vec<_>>()));
        assert_eq!(baselines["SS"], 1.0);
    }

    #[test]
    fn tiny_pool_is_zero() {
        let baselines = replacement_baselines(&pool("RP", &[50.0, 45.0]));
        assert_eq!(baselines["RP"], 0.0);

        let baselines = replacement_baselines(&pool("RP", &[]));
        assert_eq!(baselines["RP"], 0.0);
    }

    #[test]
    fn vor_subtracts_the_position_baseline() {
        let mut baselines = HashMap::new();
        baselines.insert("C".to_string(), 12.5);
        assert_eq!(value_over_replacement(30.0, "C", &baselines), 17.5);
        assert_eq!(value_over_replacement(10.0, "C", &baselines), -2.5);
    }

    #[test]
    fn unknown_position_keeps_the_raw_value() {
        let mut baselines = HashMap::new();
        baselines.insert("C".to_string(), 12.5);
        assert_eq!(value_over_replacement(30.0, "UTIL", &baselines), 30.0);
    }
}
