use std::sync::Arc;

use serde_json::json;

use super::common::*;
use crate::assessment::domain::{Answer, CategoryId, ThresholdId};
use crate::assessment::repository::RepositoryError;
use crate::assessment::store::{ConfigurationEdit, SectionStatus, ValidationError};
use crate::assessment::{AssessmentService, AssessmentServiceError};

#[test]
fn evaluate_reads_the_stored_configuration() {
    let (service, _) = build_service();

    let outcome = service
        .evaluate(&[Answer::new("current_tools", vec!["CRM", "ERP"])])
        .expect("evaluation succeeds");

    let tech = outcome
        .category(&CategoryId::from("tech"))
        .expect("tech assessed");
    assert_eq!(tech.score, 20);
    assert_eq!(
        tech.threshold.as_ref().map(|t| t.id.clone()),
        Some(ThresholdId::from("low"))
    );
}

#[test]
fn apply_persists_accepted_edits() {
    let (service, repository) = build_service();

    let applied = service
        .apply(ConfigurationEdit::RemoveThreshold(ThresholdId::from("high")))
        .expect("edit accepted");

    assert_eq!(applied.id, "high");
    assert_eq!(repository.saves(), 1);
    assert_eq!(repository.stored().thresholds.len(), 2);
}

#[test]
fn apply_propagates_validation_errors_without_saving() {
    let (service, repository) = build_service();

    let result = service.apply(ConfigurationEdit::AddThreshold(threshold_draft(
        "tech", 25, 40, "Overlap",
    )));

    match result {
        Err(AssessmentServiceError::Validation(ValidationError::OverlappingThreshold {
            ..
        })) => {}
        other => panic!("expected overlap rejection, got {other:?}"),
    }
    assert_eq!(repository.saves(), 0);
    assert_eq!(repository.stored(), readiness_configuration());
}

#[test]
fn import_saves_the_merged_configuration() {
    let (service, repository) = build_service();

    let outcome = service
        .import(json!({ "actions": [], "rules": "skip me" }))
        .expect("import succeeds");

    assert_eq!(outcome.sections[1].status, SectionStatus::NotAnArray);
    let stored = repository.stored();
    assert!(stored.actions.is_empty());
    assert_eq!(stored.rules, readiness_configuration().rules);
}

#[test]
fn export_returns_the_stored_document() {
    let (service, _) = build_service();

    let document = service.export().expect("export succeeds");

    assert_eq!(document["categories"][0]["id"], json!("tech"));
    assert_eq!(document["thresholds"].as_array().map(Vec::len), Some(3));
}

#[test]
fn repository_failures_surface_as_service_errors() {
    let service = AssessmentService::new(Arc::new(UnavailableRepository));

    match service.evaluate(&[]) {
        Err(AssessmentServiceError::Repository(RepositoryError::Unavailable(reason))) => {
            assert_eq!(reason, "database offline");
        }
        other => panic!("expected repository failure, got {other:?}"),
    }
    assert!(service.audit().is_err());
}
