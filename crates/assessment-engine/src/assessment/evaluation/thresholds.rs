use super::super::domain::{CategoryId, Threshold};

/// First threshold, in stored order, of `category_id` whose inclusive range holds `score`.
pub(crate) fn resolve<'a>(
    category_id: &CategoryId,
    score: u8,
    thresholds: &'a [Threshold],
) -> Option<&'a Threshold> {
    let score = i32::from(score);
    thresholds
        .iter()
        .filter(|threshold| &threshold.category_id == category_id)
        .find(|threshold| threshold.contains(score))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assessment::domain::ThresholdId;

    fn threshold(id: &str, category: &str, min: i32, max: i32) -> Threshold {
        Threshold {
            id: ThresholdId::from(id),
            category_id: CategoryId::from(category),
            min_score: min,
            max_score: max,
            label: id.to_string(),
            color: "gray".to_string(),
        }
    }

    #[test]
    fn ignores_ranges_from_other_categories() {
        let thresholds = vec![
            threshold("other", "budget", 0, 100),
            threshold("mine", "tech", 50, 60),
        ];

        let resolved = resolve(&CategoryId::from("tech"), 20, &thresholds);

        assert!(resolved.is_none());
    }

    #[test]
    fn first_stored_match_wins_when_ranges_overlap() {
        let thresholds = vec![
            threshold("first", "tech", 0, 50),
            threshold("second", "tech", 40, 100),
        ];

        let resolved = resolve(&CategoryId::from("tech"), 45, &thresholds).expect("match");

        assert_eq!(resolved.id, ThresholdId::from("first"));
    }

    #[test]
    fn gaps_resolve_to_nothing() {
        let thresholds = vec![
            threshold("low", "tech", 0, 30),
            threshold("high", "tech", 71, 100),
        ];

        assert!(resolve(&CategoryId::from("tech"), 50, &thresholds).is_none());
    }
}
