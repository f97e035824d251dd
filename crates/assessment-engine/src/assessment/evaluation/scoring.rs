use std::collections::BTreeMap;

use super::super::domain::{Category, CategoryId};
use super::rules::RawPoints;

pub const MIN_SCORE: u8 = 0;
pub const MAX_SCORE: u8 = 100;

/// Weight, round (half away from zero), then clamp a raw point total into `0..=100`.
pub fn final_score(raw_points: i64, weight: f64) -> u8 {
    let weighted = (raw_points as f64 * weight).round();
    if weighted.is_nan() {
        return MIN_SCORE;
    }
    weighted.clamp(f64::from(MIN_SCORE), f64::from(MAX_SCORE)) as u8
}

/// Final scores for every category; categories missing from `raw` score zero.
pub(crate) fn finalize(raw: &RawPoints, categories: &[Category]) -> BTreeMap<CategoryId, u8> {
    categories
        .iter()
        .map(|category| {
            let points = raw.get(&category.id).copied().unwrap_or(0);
            (category.id.clone(), final_score(points, category.weight))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounds_half_away_from_zero_before_clamping() {
        assert_eq!(final_score(1, 2.5), 3);
        assert_eq!(final_score(5, 1.1), 6);
        assert_eq!(final_score(3, 0.5), 2);
    }

    #[test]
    fn clamps_to_score_bounds() {
        assert_eq!(final_score(-400, 1.0), 0);
        assert_eq!(final_score(i64::from(i32::MAX), 3.0), 100);
        assert_eq!(final_score(-1, 0.4), 0);
    }

    #[test]
    fn non_finite_weights_stay_in_range() {
        assert_eq!(final_score(10, f64::NAN), 0);
        assert_eq!(final_score(10, f64::INFINITY), 100);
        assert_eq!(final_score(0, f64::INFINITY), 0);
    }

    #[test]
    fn weight_increase_never_lowers_score() {
        for raw in [-20_i64, 0, 3, 7, 40, 90] {
            let mut previous = final_score(raw, 0.1);
            for step in 2..=40 {
                let score = final_score(raw, f64::from(step) * 0.1);
                assert!(score >= previous, "raw {raw} weight step {step}");
                previous = score;
            }
        }
    }
}
