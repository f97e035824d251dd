//! Questionnaire scoring driven by editable configuration.
//!
//! [`domain`] holds the configuration aggregate and answers, [`evaluation`] turns answers into
//! per-category scores, labels and actions, and [`store`] edits, validates, imports and exports
//! the configuration. The service and router wrap both behind a repository for HTTP callers.

pub mod domain;
pub mod evaluation;
pub mod repository;
pub mod router;
mod samples;
pub mod service;
pub mod store;

#[cfg(test)]
mod tests;

pub use domain::{
    Action, ActionId, Answer, AnswerSheet, AnswerValue, Category, CategoryId, Condition,
    Configuration, Priority, Rule, RuleId, Threshold, ThresholdId,
};
pub use evaluation::{
    evaluate, AssessmentOutcome, CategoryAssessment, EvaluationEngine, ResolvedThreshold,
};
pub use repository::{ConfigurationRepository, RepositoryError};
pub use router::assessment_router;
pub use samples::sample_answers;
pub use service::{AssessmentService, AssessmentServiceError};
pub use store::{
    ActionDraft, AppliedEdit, CategoryDraft, ConfigurationEdit, EntityKind, ImportError,
    ImportOutcome, IntegrityIssue, RuleDraft, Section, SectionReport, SectionStatus,
    ThresholdDraft, ValidationError,
};
