use std::collections::BTreeMap;

use super::super::domain::{Answer, Category, CategoryId, Rule};
use super::conditions::matches;

/// Unweighted point totals keyed by category.
pub type RawPoints = BTreeMap<CategoryId, i64>;

/// Apply every rule to every answer for its field and sum the point deltas per category.
///
/// Every known category starts at zero. A rule fires once per matching answer, so duplicate
/// answers for a field count more than once. Rules pointing at an unknown category are inert.
pub(crate) fn accumulate(
    categories: &[Category],
    rules: &[Rule],
    answers: &[Answer],
) -> RawPoints {
    let mut points: RawPoints = categories
        .iter()
        .map(|category| (category.id.clone(), 0))
        .collect();

    for rule in rules {
        let Some(total) = points.get_mut(&rule.category_id) else {
            tracing::trace!(
                rule = %rule.id,
                category = %rule.category_id,
                "skipping rule for unknown category"
            );
            continue;
        };

        for answer in answers.iter().filter(|answer| answer.field == rule.field) {
            if matches(&answer.value, rule) {
                *total += i64::from(rule.points);
            }
        }
    }

    points
}
