use std::fmt;

use serde::Serialize;

use super::super::domain::{CategoryId, Configuration, ThresholdId};
use super::{ActionDraft, CategoryDraft, RuleDraft, ThresholdDraft};

/// Kinds of editable configuration entities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Category,
    Rule,
    Threshold,
    Action,
}

impl EntityKind {
    pub const fn label(self) -> &'static str {
        match self {
            EntityKind::Category => "category",
            EntityKind::Rule => "rule",
            EntityKind::Threshold => "threshold",
            EntityKind::Action => "action",
        }
    }

    pub(crate) const fn id_prefix(self) -> &'static str {
        self.label()
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Reasons a create or update is refused. The configuration is left untouched.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("{entity} {field} is required")]
    MissingField {
        entity: EntityKind,
        field: &'static str,
    },
    #[error("category weight must be a positive number (found {weight})")]
    InvalidWeight { weight: f64 },
    #[error("minimum score {min_score} must not exceed maximum score {max_score}")]
    InvertedRange { min_score: i32, max_score: i32 },
    #[error(
        "score range {min_score}-{max_score} overlaps threshold \"{label}\" \
         ({existing_min}-{existing_max}) in category {category_id}"
    )]
    OverlappingThreshold {
        category_id: CategoryId,
        min_score: i32,
        max_score: i32,
        existing: ThresholdId,
        label: String,
        existing_min: i32,
        existing_max: i32,
    },
    #[error("{entity} references unknown category {category_id}")]
    UnknownCategory {
        entity: EntityKind,
        category_id: CategoryId,
    },
    #[error("action references unknown threshold {threshold_id}")]
    UnknownThreshold { threshold_id: ThresholdId },
    #[error("threshold {threshold_id} belongs to category {owner}, not {category_id}")]
    ThresholdCategoryMismatch {
        threshold_id: ThresholdId,
        owner: CategoryId,
        category_id: CategoryId,
    },
    #[error("{entity} {id} not found")]
    NotFound { entity: EntityKind, id: String },
}

fn required(entity: EntityKind, field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::MissingField { entity, field });
    }
    Ok(())
}

fn known_category(
    configuration: &Configuration,
    entity: EntityKind,
    category_id: &CategoryId,
) -> Result<(), ValidationError> {
    if configuration.category(category_id).is_none() {
        return Err(ValidationError::UnknownCategory {
            entity,
            category_id: category_id.clone(),
        });
    }
    Ok(())
}

pub(crate) fn validate_category(draft: &CategoryDraft) -> Result<(), ValidationError> {
    required(EntityKind::Category, "name", &draft.name)?;
    if !draft.weight.is_finite() || draft.weight <= 0.0 {
        return Err(ValidationError::InvalidWeight {
            weight: draft.weight,
        });
    }
    Ok(())
}

pub(crate) fn validate_rule(
    configuration: &Configuration,
    draft: &RuleDraft,
) -> Result<(), ValidationError> {
    required(EntityKind::Rule, "field", &draft.field)?;
    required(EntityKind::Rule, "value", &draft.value)?;
    required(EntityKind::Rule, "category", draft.category_id.as_str())?;
    known_category(configuration, EntityKind::Rule, &draft.category_id)
}

/// `editing` names the threshold being updated so it is not compared against itself.
pub(crate) fn validate_threshold(
    configuration: &Configuration,
    draft: &ThresholdDraft,
    editing: Option<&ThresholdId>,
) -> Result<(), ValidationError> {
    required(EntityKind::Threshold, "label", &draft.label)?;
    required(EntityKind::Threshold, "category", draft.category_id.as_str())?;
    known_category(configuration, EntityKind::Threshold, &draft.category_id)?;

    if draft.min_score > draft.max_score {
        return Err(ValidationError::InvertedRange {
            min_score: draft.min_score,
            max_score: draft.max_score,
        });
    }

    let conflict = configuration
        .thresholds_for(&draft.category_id)
        .filter(|existing| Some(&existing.id) != editing)
        .find(|existing| existing.overlaps(draft.min_score, draft.max_score));

    if let Some(existing) = conflict {
        return Err(ValidationError::OverlappingThreshold {
            category_id: draft.category_id.clone(),
            min_score: draft.min_score,
            max_score: draft.max_score,
            existing: existing.id.clone(),
            label: existing.label.clone(),
            existing_min: existing.min_score,
            existing_max: existing.max_score,
        });
    }

    Ok(())
}

pub(crate) fn validate_action(
    configuration: &Configuration,
    draft: &ActionDraft,
) -> Result<(), ValidationError> {
    required(EntityKind::Action, "category", draft.category_id.as_str())?;
    required(EntityKind::Action, "threshold", draft.threshold_id.as_str())?;
    required(EntityKind::Action, "title", &draft.action)?;
    known_category(configuration, EntityKind::Action, &draft.category_id)?;

    let threshold = configuration.threshold(&draft.threshold_id).ok_or_else(|| {
        ValidationError::UnknownThreshold {
            threshold_id: draft.threshold_id.clone(),
        }
    })?;

    if threshold.category_id != draft.category_id {
        return Err(ValidationError::ThresholdCategoryMismatch {
            threshold_id: threshold.id.clone(),
            owner: threshold.category_id.clone(),
            category_id: draft.category_id.clone(),
        });
    }

    Ok(())
}
