use std::collections::HashSet;
use std::fmt;

use serde::Serialize;

use super::super::domain::{ActionId, CategoryId, Configuration, RuleId, ThresholdId};
use super::validation::EntityKind;

/// Referential or range problem that evaluation tolerates but authors should know about.
///
/// Imports and category deletes can leave a configuration in any of these states; edits made
/// through [`Configuration::apply`] cannot introduce them.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum IntegrityIssue {
    OrphanedRule {
        rule_id: RuleId,
        category_id: CategoryId,
    },
    OrphanedThreshold {
        threshold_id: ThresholdId,
        category_id: CategoryId,
    },
    OrphanedAction {
        action_id: ActionId,
        category_id: CategoryId,
    },
    DanglingActionThreshold {
        action_id: ActionId,
        threshold_id: ThresholdId,
    },
    MismatchedActionThreshold {
        action_id: ActionId,
        threshold_id: ThresholdId,
        category_id: CategoryId,
    },
    InvertedRange {
        threshold_id: ThresholdId,
        min_score: i32,
        max_score: i32,
    },
    OverlappingThresholds {
        category_id: CategoryId,
        first: ThresholdId,
        second: ThresholdId,
    },
    InvalidWeight {
        category_id: CategoryId,
        weight: f64,
    },
    DuplicateId {
        entity: EntityKind,
        id: String,
    },
}

impl fmt::Display for IntegrityIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IntegrityIssue::OrphanedRule {
                rule_id,
                category_id,
            } => write!(f, "rule {rule_id} targets missing category {category_id}"),
            IntegrityIssue::OrphanedThreshold {
                threshold_id,
                category_id,
            } => write!(
                f,
                "threshold {threshold_id} belongs to missing category {category_id}"
            ),
            IntegrityIssue::OrphanedAction {
                action_id,
                category_id,
            } => write!(
                f,
                "action {action_id} belongs to missing category {category_id}"
            ),
            IntegrityIssue::DanglingActionThreshold {
                action_id,
                threshold_id,
            } => write!(
                f,
                "action {action_id} references missing threshold {threshold_id}"
            ),
            IntegrityIssue::MismatchedActionThreshold {
                action_id,
                threshold_id,
                category_id,
            } => write!(
                f,
                "action {action_id} uses threshold {threshold_id} outside category {category_id}"
            ),
            IntegrityIssue::InvertedRange {
                threshold_id,
                min_score,
                max_score,
            } => write!(
                f,
                "threshold {threshold_id} has minimum {min_score} above maximum {max_score}"
            ),
            IntegrityIssue::OverlappingThresholds {
                category_id,
                first,
                second,
            } => write!(
                f,
                "thresholds {first} and {second} overlap in category {category_id}"
            ),
            IntegrityIssue::InvalidWeight {
                category_id,
                weight,
            } => write!(f, "category {category_id} has non-positive weight {weight}"),
            IntegrityIssue::DuplicateId { entity, id } => write!(f, "duplicate {entity} id {id}"),
        }
    }
}

pub(crate) fn audit(configuration: &Configuration) -> Vec<IntegrityIssue> {
    let mut issues = Vec::new();

    duplicate_ids(
        EntityKind::Category,
        configuration.categories.iter().map(|c| c.id.as_str()),
        &mut issues,
    );
    duplicate_ids(
        EntityKind::Rule,
        configuration.rules.iter().map(|r| r.id.as_str()),
        &mut issues,
    );
    duplicate_ids(
        EntityKind::Threshold,
        configuration.thresholds.iter().map(|t| t.id.as_str()),
        &mut issues,
    );
    duplicate_ids(
        EntityKind::Action,
        configuration.actions.iter().map(|a| a.id.as_str()),
        &mut issues,
    );

    for category in &configuration.categories {
        if !category.weight.is_finite() || category.weight <= 0.0 {
            issues.push(IntegrityIssue::InvalidWeight {
                category_id: category.id.clone(),
                weight: category.weight,
            });
        }
    }

    for rule in &configuration.rules {
        if configuration.category(&rule.category_id).is_none() {
            issues.push(IntegrityIssue::OrphanedRule {
                rule_id: rule.id.clone(),
                category_id: rule.category_id.clone(),
            });
        }
    }

    for (index, threshold) in configuration.thresholds.iter().enumerate() {
        if configuration.category(&threshold.category_id).is_none() {
            issues.push(IntegrityIssue::OrphanedThreshold {
                threshold_id: threshold.id.clone(),
                category_id: threshold.category_id.clone(),
            });
        }
        if threshold.min_score > threshold.max_score {
            issues.push(IntegrityIssue::InvertedRange {
                threshold_id: threshold.id.clone(),
                min_score: threshold.min_score,
                max_score: threshold.max_score,
            });
        }
        for later in &configuration.thresholds[index + 1..] {
            if later.category_id == threshold.category_id
                && later.overlaps(threshold.min_score, threshold.max_score)
            {
                issues.push(IntegrityIssue::OverlappingThresholds {
                    category_id: threshold.category_id.clone(),
                    first: threshold.id.clone(),
                    second: later.id.clone(),
                });
            }
        }
    }

    for action in &configuration.actions {
        if configuration.category(&action.category_id).is_none() {
            issues.push(IntegrityIssue::OrphanedAction {
                action_id: action.id.clone(),
                category_id: action.category_id.clone(),
            });
        }
        match configuration.threshold(&action.threshold_id) {
            None => issues.push(IntegrityIssue::DanglingActionThreshold {
                action_id: action.id.clone(),
                threshold_id: action.threshold_id.clone(),
            }),
            Some(threshold) if threshold.category_id != action.category_id => {
                issues.push(IntegrityIssue::MismatchedActionThreshold {
                    action_id: action.id.clone(),
                    threshold_id: threshold.id.clone(),
                    category_id: action.category_id.clone(),
                })
            }
            Some(_) => {}
        }
    }

    issues
}

fn duplicate_ids<'a>(
    entity: EntityKind,
    ids: impl Iterator<Item = &'a str>,
    issues: &mut Vec<IntegrityIssue>,
) {
    let mut seen = HashSet::new();
    let mut reported = HashSet::new();
    for id in ids {
        if !seen.insert(id) && reported.insert(id) {
            issues.push(IntegrityIssue::DuplicateId {
                entity,
                id: id.to_string(),
            });
        }
    }
}
