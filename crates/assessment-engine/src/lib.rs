//! Configurable questionnaire scoring.
//!
//! Answers are matched against author-editable rules to produce per-category points, which are
//! weighted, rounded, clamped to `0..=100`, resolved to a labelled threshold, and joined with the
//! recommended actions for that threshold.

pub mod assessment;
pub mod config;
pub mod error;
pub mod telemetry;
