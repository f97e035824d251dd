use super::super::domain::{Action, CategoryId, ThresholdId};

/// Actions attached to a category and threshold pair, in stored order.
pub(crate) fn recommend<'a>(
    category_id: &'a CategoryId,
    threshold_id: &'a ThresholdId,
    actions: &'a [Action],
) -> impl Iterator<Item = &'a Action> + 'a {
    actions.iter().filter(move |action| {
        &action.category_id == category_id && &action.threshold_id == threshold_id
    })
}
