//! Editing operations over an immutable [`Configuration`].
//!
//! Every edit validates against the current configuration and yields a new value; a failed
//! edit returns a [`ValidationError`] and leaves the original untouched. Deletes never cascade:
//! rules, thresholds and actions that referenced a removed entity become inert.

mod audit;
mod document;
mod validation;

pub use audit::IntegrityIssue;
pub use document::{
    export_json, export_value, import_str, import_value, ImportError, ImportOutcome, Section,
    SectionReport, SectionStatus,
};
pub use validation::{EntityKind, ValidationError};

use serde::{Deserialize, Serialize};

use super::domain::{
    Action, ActionId, Category, CategoryId, Condition, Configuration, Priority, Rule, RuleId,
    Threshold, ThresholdId,
};
use validation::{validate_action, validate_category, validate_rule, validate_threshold};

fn default_weight() -> f64 {
    1.0
}

/// Editable fields of a category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryDraft {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default = "default_weight")]
    pub weight: f64,
}

/// Editable fields of a rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleDraft {
    pub field: String,
    pub condition: Condition,
    pub value: String,
    pub category_id: CategoryId,
    pub points: i32,
}

/// Editable fields of a threshold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThresholdDraft {
    pub category_id: CategoryId,
    pub min_score: i32,
    pub max_score: i32,
    pub label: String,
    pub color: String,
}

/// Editable fields of an action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionDraft {
    pub category_id: CategoryId,
    pub threshold_id: ThresholdId,
    pub action: String,
    #[serde(default)]
    pub description: String,
    pub priority: Priority,
}

/// A single create, update, or delete against the configuration.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigurationEdit {
    AddCategory(CategoryDraft),
    UpdateCategory { id: CategoryId, draft: CategoryDraft },
    RemoveCategory(CategoryId),
    AddRule(RuleDraft),
    UpdateRule { id: RuleId, draft: RuleDraft },
    RemoveRule(RuleId),
    AddThreshold(ThresholdDraft),
    UpdateThreshold { id: ThresholdId, draft: ThresholdDraft },
    RemoveThreshold(ThresholdId),
    AddAction(ActionDraft),
    UpdateAction { id: ActionId, draft: ActionDraft },
    RemoveAction(ActionId),
}

impl ConfigurationEdit {
    pub fn entity(&self) -> EntityKind {
        match self {
            Self::AddCategory(_) | Self::UpdateCategory { .. } | Self::RemoveCategory(_) => {
                EntityKind::Category
            }
            Self::AddRule(_) | Self::UpdateRule { .. } | Self::RemoveRule(_) => EntityKind::Rule,
            Self::AddThreshold(_) | Self::UpdateThreshold { .. } | Self::RemoveThreshold(_) => {
                EntityKind::Threshold
            }
            Self::AddAction(_) | Self::UpdateAction { .. } | Self::RemoveAction(_) => {
                EntityKind::Action
            }
        }
    }
}

/// Successful edit: the next configuration and the id of the entity it touched.
#[derive(Debug, Clone, PartialEq)]
pub struct AppliedEdit {
    pub configuration: Configuration,
    pub entity: EntityKind,
    pub id: String,
}

impl Configuration {
    pub fn apply(&self, edit: ConfigurationEdit) -> Result<AppliedEdit, ValidationError> {
        let entity = edit.entity();
        let mut next = self.clone();

        let id = match edit {
            ConfigurationEdit::AddCategory(draft) => next.add_category(draft)?.0,
            ConfigurationEdit::UpdateCategory { id, draft } => {
                next.update_category(&id, draft)?;
                id.0
            }
            ConfigurationEdit::RemoveCategory(id) => {
                remove_by(&mut next.categories, entity, id.as_str(), |c| &c.id.0)?;
                id.0
            }
            ConfigurationEdit::AddRule(draft) => next.add_rule(draft)?.0,
            ConfigurationEdit::UpdateRule { id, draft } => {
                next.update_rule(&id, draft)?;
                id.0
            }
            ConfigurationEdit::RemoveRule(id) => {
                remove_by(&mut next.rules, entity, id.as_str(), |r| &r.id.0)?;
                id.0
            }
            ConfigurationEdit::AddThreshold(draft) => next.add_threshold(draft)?.0,
            ConfigurationEdit::UpdateThreshold { id, draft } => {
                next.update_threshold(&id, draft)?;
                id.0
            }
            ConfigurationEdit::RemoveThreshold(id) => {
                remove_by(&mut next.thresholds, entity, id.as_str(), |t| &t.id.0)?;
                id.0
            }
            ConfigurationEdit::AddAction(draft) => next.add_action(draft)?.0,
            ConfigurationEdit::UpdateAction { id, draft } => {
                next.update_action(&id, draft)?;
                id.0
            }
            ConfigurationEdit::RemoveAction(id) => {
                remove_by(&mut next.actions, entity, id.as_str(), |a| &a.id.0)?;
                id.0
            }
        };

        Ok(AppliedEdit {
            configuration: next,
            entity,
            id,
        })
    }

    fn add_category(&mut self, draft: CategoryDraft) -> Result<CategoryId, ValidationError> {
        validate_category(&draft)?;
        // Ids still named by orphaned rules, thresholds or actions stay retired.
        let in_use = self
            .categories
            .iter()
            .map(|c| c.id.as_str())
            .chain(self.rules.iter().map(|r| r.category_id.as_str()))
            .chain(self.thresholds.iter().map(|t| t.category_id.as_str()))
            .chain(self.actions.iter().map(|a| a.category_id.as_str()));
        let id = CategoryId(fresh_id(EntityKind::Category, in_use));
        self.categories.push(Category {
            id: id.clone(),
            name: draft.name,
            description: draft.description,
            weight: draft.weight,
        });
        Ok(id)
    }

    fn update_category(
        &mut self,
        id: &CategoryId,
        draft: CategoryDraft,
    ) -> Result<(), ValidationError> {
        let index = self
            .categories
            .iter()
            .position(|category| &category.id == id)
            .ok_or_else(|| not_found(EntityKind::Category, id.as_str()))?;
        validate_category(&draft)?;
        let category = &mut self.categories[index];
        category.name = draft.name;
        category.description = draft.description;
        category.weight = draft.weight;
        Ok(())
    }

    fn add_rule(&mut self, draft: RuleDraft) -> Result<RuleId, ValidationError> {
        validate_rule(self, &draft)?;
        let id = RuleId(fresh_id(EntityKind::Rule, self.rules.iter().map(|r| r.id.as_str())));
        self.rules.push(Rule {
            id: id.clone(),
            field: draft.field,
            condition: draft.condition,
            value: draft.value,
            category_id: draft.category_id,
            points: draft.points,
        });
        Ok(id)
    }

    fn update_rule(&mut self, id: &RuleId, draft: RuleDraft) -> Result<(), ValidationError> {
        let index = self
            .rules
            .iter()
            .position(|rule| &rule.id == id)
            .ok_or_else(|| not_found(EntityKind::Rule, id.as_str()))?;
        validate_rule(self, &draft)?;
        let rule = &mut self.rules[index];
        rule.field = draft.field;
        rule.condition = draft.condition;
        rule.value = draft.value;
        rule.category_id = draft.category_id;
        rule.points = draft.points;
        Ok(())
    }

    fn add_threshold(&mut self, draft: ThresholdDraft) -> Result<ThresholdId, ValidationError> {
        validate_threshold(self, &draft, None)?;
        let in_use = self
            .thresholds
            .iter()
            .map(|t| t.id.as_str())
            .chain(self.actions.iter().map(|a| a.threshold_id.as_str()));
        let id = ThresholdId(fresh_id(EntityKind::Threshold, in_use));
        self.thresholds.push(Threshold {
            id: id.clone(),
            category_id: draft.category_id,
            min_score: draft.min_score,
            max_score: draft.max_score,
            label: draft.label,
            color: draft.color,
        });
        Ok(id)
    }

    fn update_threshold(
        &mut self,
        id: &ThresholdId,
        draft: ThresholdDraft,
    ) -> Result<(), ValidationError> {
        let index = self
            .thresholds
            .iter()
            .position(|threshold| &threshold.id == id)
            .ok_or_else(|| not_found(EntityKind::Threshold, id.as_str()))?;
        validate_threshold(self, &draft, Some(id))?;
        let threshold = &mut self.thresholds[index];
        threshold.category_id = draft.category_id;
        threshold.min_score = draft.min_score;
        threshold.max_score = draft.max_score;
        threshold.label = draft.label;
        threshold.color = draft.color;
        Ok(())
    }

    fn add_action(&mut self, draft: ActionDraft) -> Result<ActionId, ValidationError> {
        validate_action(self, &draft)?;
        let id = ActionId(fresh_id(
            EntityKind::Action,
            self.actions.iter().map(|a| a.id.as_str()),
        ));
        self.actions.push(Action {
            id: id.clone(),
            category_id: draft.category_id,
            threshold_id: draft.threshold_id,
            action: draft.action,
            description: draft.description,
            priority: draft.priority,
        });
        Ok(id)
    }

    fn update_action(&mut self, id: &ActionId, draft: ActionDraft) -> Result<(), ValidationError> {
        let index = self
            .actions
            .iter()
            .position(|action| &action.id == id)
            .ok_or_else(|| not_found(EntityKind::Action, id.as_str()))?;
        validate_action(self, &draft)?;
        let action = &mut self.actions[index];
        action.category_id = draft.category_id;
        action.threshold_id = draft.threshold_id;
        action.action = draft.action;
        action.description = draft.description;
        action.priority = draft.priority;
        Ok(())
    }

    /// Non-blocking integrity report; see [`IntegrityIssue`].
    pub fn audit(&self) -> Vec<IntegrityIssue> {
        audit::audit(self)
    }
}

fn not_found(entity: EntityKind, id: &str) -> ValidationError {
    ValidationError::NotFound {
        entity,
        id: id.to_string(),
    }
}

fn remove_by<T>(
    items: &mut Vec<T>,
    entity: EntityKind,
    id: &str,
    key: impl Fn(&T) -> &String,
) -> Result<(), ValidationError> {
    let before = items.len();
    items.retain(|item| key(item) != id);
    if items.len() == before {
        return Err(not_found(entity, id));
    }
    Ok(())
}

/// `<prefix>-<n>` where `n` is one past the largest numeric suffix in `in_use`.
///
/// Callers pass every id still referenced anywhere in the configuration, not just live
/// entities, so a removed id is never handed out again while orphans still name it.
pub(crate) fn fresh_id<'a>(
    entity: EntityKind,
    in_use: impl Iterator<Item = &'a str>,
) -> String {
    let prefix = entity.id_prefix();
    let next = in_use
        .filter_map(|id| id.strip_prefix(prefix)?.strip_prefix('-'))
        .filter_map(|suffix| suffix.parse::<u64>().ok())
        .max()
        .map_or(1, |max| max.saturating_add(1));
    format!("{prefix}-{next}")
}
