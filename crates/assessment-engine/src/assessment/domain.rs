use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        pub struct $name(pub String);

        impl $name {
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }
    };
}

entity_id!(
    /// Identifier wrapper for scoring categories.
    CategoryId
);
entity_id!(
    /// Identifier wrapper for scoring rules.
    RuleId
);
entity_id!(
    /// Identifier wrapper for labelled score ranges.
    ThresholdId
);
entity_id!(
    /// Identifier wrapper for recommended actions.
    ActionId
);

/// Weighted dimension of the assessment (e.g. "Technical Readiness").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub weight: f64,
}

/// Matching strategy applied between an answer and a rule value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Condition {
    Equals,
    Contains,
    GreaterThan,
    LessThan,
}

impl Condition {
    pub const fn label(self) -> &'static str {
        match self {
            Condition::Equals => "equals",
            Condition::Contains => "contains",
            Condition::GreaterThan => "greater than",
            Condition::LessThan => "less than",
        }
    }
}

/// Point delta applied to one category when an answer satisfies the condition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rule {
    pub id: RuleId,
    pub field: String,
    pub condition: Condition,
    pub value: String,
    pub category_id: CategoryId,
    pub points: i32,
}

/// Closed, inclusive score range carrying a display label and color token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Threshold {
    pub id: ThresholdId,
    pub category_id: CategoryId,
    pub min_score: i32,
    pub max_score: i32,
    pub label: String,
    pub color: String,
}

impl Threshold {
    pub fn contains(&self, score: i32) -> bool {
        self.min_score <= score && score <= self.max_score
    }

    pub fn overlaps(&self, min_score: i32, max_score: i32) -> bool {
        self.min_score <= max_score && min_score <= self.max_score
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    pub const fn label(self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        }
    }
}

/// Recommendation surfaced when a category resolves to the referenced threshold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Action {
    pub id: ActionId,
    pub category_id: CategoryId,
    pub threshold_id: ThresholdId,
    pub action: String,
    #[serde(default)]
    pub description: String,
    pub priority: Priority,
}

/// Questionnaire response value; multi-select questions produce a sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnswerValue {
    Scalar(String),
    Sequence(Vec<String>),
}

impl From<&str> for AnswerValue {
    fn from(value: &str) -> Self {
        AnswerValue::Scalar(value.to_string())
    }
}

impl From<Vec<&str>> for AnswerValue {
    fn from(values: Vec<&str>) -> Self {
        AnswerValue::Sequence(values.into_iter().map(str::to_string).collect())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Answer {
    pub field: String,
    pub value: AnswerValue,
}

impl Answer {
    pub fn new(field: impl Into<String>, value: impl Into<AnswerValue>) -> Self {
        Self {
            field: field.into(),
            value: value.into(),
        }
    }
}

/// Field-keyed view over a list of answers where later entries replace earlier ones.
///
/// Fields keep the position of their first appearance so evaluation output stays stable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnswerSheet {
    answers: Vec<Answer>,
}

impl AnswerSheet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, answer: Answer) {
        match self
            .answers
            .iter_mut()
            .find(|existing| existing.field == answer.field)
        {
            Some(existing) => existing.value = answer.value,
            None => self.answers.push(answer),
        }
    }

    pub fn get(&self, field: &str) -> Option<&AnswerValue> {
        self.answers
            .iter()
            .find(|answer| answer.field == field)
            .map(|answer| &answer.value)
    }

    pub fn answers(&self) -> &[Answer] {
        &self.answers
    }

    pub fn len(&self) -> usize {
        self.answers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.answers.is_empty()
    }
}

impl FromIterator<Answer> for AnswerSheet {
    fn from_iter<I: IntoIterator<Item = Answer>>(iter: I) -> Self {
        let mut sheet = AnswerSheet::new();
        for answer in iter {
            sheet.insert(answer);
        }
        sheet
    }
}

/// The editable rule set: the unit of export and import.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Configuration {
    pub categories: Vec<Category>,
    pub rules: Vec<Rule>,
    pub thresholds: Vec<Threshold>,
    pub actions: Vec<Action>,
}

impl Configuration {
    pub fn category(&self, id: &CategoryId) -> Option<&Category> {
        self.categories.iter().find(|category| &category.id == id)
    }

    pub fn rule(&self, id: &RuleId) -> Option<&Rule> {
        self.rules.iter().find(|rule| &rule.id == id)
    }

    pub fn threshold(&self, id: &ThresholdId) -> Option<&Threshold> {
        self.thresholds.iter().find(|threshold| &threshold.id == id)
    }

    pub fn action(&self, id: &ActionId) -> Option<&Action> {
        self.actions.iter().find(|action| &action.id == id)
    }

    /// Thresholds for one category in stored order.
    pub fn thresholds_for<'a>(
        &'a self,
        category_id: &'a CategoryId,
    ) -> impl Iterator<Item = &'a Threshold> + 'a {
        self.thresholds
            .iter()
            .filter(move |threshold| &threshold.category_id == category_id)
    }
}
