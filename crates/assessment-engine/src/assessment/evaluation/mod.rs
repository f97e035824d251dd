mod actions;
pub(crate) mod conditions;
mod rules;
mod scoring;
mod thresholds;

pub use rules::RawPoints;
pub use scoring::{final_score, MAX_SCORE, MIN_SCORE};

use super::domain::{
    Action, Answer, AnswerSheet, CategoryId, Configuration, Threshold, ThresholdId,
};
use serde::{Deserialize, Serialize};

/// Stateless evaluator that applies a configuration to questionnaire answers.
#[derive(Debug, Clone)]
pub struct EvaluationEngine {
    configuration: Configuration,
}

impl EvaluationEngine {
    pub fn new(configuration: Configuration) -> Self {
        Self { configuration }
    }

    pub fn configuration(&self) -> &Configuration {
        &self.configuration
    }

    /// Evaluate every answer in the slice; repeated fields each contribute points.
    pub fn evaluate(&self, answers: &[Answer]) -> AssessmentOutcome {
        evaluate(&self.configuration, answers)
    }

    /// Evaluate the latest answer per field.
    pub fn evaluate_sheet(&self, sheet: &AnswerSheet) -> AssessmentOutcome {
        evaluate(&self.configuration, sheet.answers())
    }
}

/// Run the full pipeline: rule accumulation, weighting, threshold lookup, and recommendations.
pub fn evaluate(configuration: &Configuration, answers: &[Answer]) -> AssessmentOutcome {
    tracing::debug!(
        categories = configuration.categories.len(),
        rules = configuration.rules.len(),
        answers = answers.len(),
        "evaluating assessment"
    );

    let raw = rules::accumulate(&configuration.categories, &configuration.rules, answers);
    let scores = scoring::finalize(&raw, &configuration.categories);

    let categories = configuration
        .categories
        .iter()
        .map(|category| {
            let score = scores.get(&category.id).copied().unwrap_or(MIN_SCORE);
            let threshold =
                thresholds::resolve(&category.id, score, &configuration.thresholds);
            let recommended_actions = threshold
                .map(|threshold| {
                    actions::recommend(&category.id, &threshold.id, &configuration.actions)
                        .cloned()
                        .collect()
                })
                .unwrap_or_default();

            CategoryAssessment {
                category_id: category.id.clone(),
                category_name: category.name.clone(),
                weight: category.weight,
                raw_points: raw.get(&category.id).copied().unwrap_or(0),
                score,
                threshold: threshold.map(ResolvedThreshold::from),
                actions: recommended_actions,
            }
        })
        .collect();

    AssessmentOutcome { categories }
}

/// Label and color of the range a category score landed in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedThreshold {
    pub id: ThresholdId,
    pub label: String,
    pub color: String,
}

impl From<&Threshold> for ResolvedThreshold {
    fn from(threshold: &Threshold) -> Self {
        Self {
            id: threshold.id.clone(),
            label: threshold.label.clone(),
            color: threshold.color.clone(),
        }
    }
}

/// Result for a single category, keeping the raw points for transparent audits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryAssessment {
    pub category_id: CategoryId,
    pub category_name: String,
    pub weight: f64,
    pub raw_points: i64,
    pub score: u8,
    pub threshold: Option<ResolvedThreshold>,
    pub actions: Vec<Action>,
}

impl CategoryAssessment {
    pub fn summary(&self) -> String {
        let label = self
            .threshold
            .as_ref()
            .map(|threshold| threshold.label.as_str())
            .unwrap_or("no threshold");
        match self.actions.len() {
            0 => format!("{}: {} ({})", self.category_name, self.score, label),
            count => format!(
                "{}: {} ({}, {} recommended action(s))",
                self.category_name, self.score, label, count
            ),
        }
    }
}

/// Evaluation output in configured category order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AssessmentOutcome {
    pub categories: Vec<CategoryAssessment>,
}

impl AssessmentOutcome {
    pub fn category(&self, id: &CategoryId) -> Option<&CategoryAssessment> {
        self.categories
            .iter()
            .find(|assessment| &assessment.category_id == id)
    }

    pub fn summary(&self) -> String {
        if self.categories.is_empty() {
            return "no categories configured".to_string();
        }
        self.categories
            .iter()
            .map(CategoryAssessment::summary)
            .collect::<Vec<_>>()
            .join("; ")
    }
}
