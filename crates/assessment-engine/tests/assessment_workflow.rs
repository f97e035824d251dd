//! End-to-end scenarios for configuration authoring and evaluation through the public API.

use assessment_engine::assessment::store::{export_json, import_str};
use assessment_engine::assessment::{
    Answer, CategoryDraft, CategoryId, Condition, Configuration, ConfigurationEdit,
    EvaluationEngine, Priority, RuleDraft, ThresholdDraft, ValidationError,
};

mod common {
    use super::*;

    pub(super) fn author_configuration() -> Configuration {
        let mut configuration = Configuration::default();

        let applied = configuration
            .apply(ConfigurationEdit::AddCategory(CategoryDraft {
                name: "Technical Readiness".to_string(),
                description: "Automation experience and tooling".to_string(),
                weight: 1.0,
            }))
            .expect("category accepted");
        configuration = applied.configuration;
        let category_id = CategoryId(applied.id);

        for (field, condition, value, points) in [
            ("automation_experience", Condition::Equals, "Advanced", 10),
            ("current_tools", Condition::Contains, "CRM", 15),
            ("team_size", Condition::GreaterThan, "10", 10),
        ] {
            configuration = configuration
                .apply(ConfigurationEdit::AddRule(RuleDraft {
                    field: field.to_string(),
                    condition,
                    value: value.to_string(),
                    category_id: category_id.clone(),
                    points,
                }))
                .expect("rule accepted")
                .configuration;
        }

        for (min, max, label, color) in [
            (0, 30, "Not Ready", "red"),
            (31, 70, "Partially Ready", "yellow"),
            (71, 100, "Fully Ready", "green"),
        ] {
            configuration = configuration
                .apply(ConfigurationEdit::AddThreshold(ThresholdDraft {
                    category_id: category_id.clone(),
                    min_score: min,
                    max_score: max,
                    label: label.to_string(),
                    color: color.to_string(),
                }))
                .expect("threshold accepted")
                .configuration;
        }

        configuration
    }
}

#[test]
fn authored_configuration_scores_answers_end_to_end() {
    let configuration = common::author_configuration();
    let engine = EvaluationEngine::new(configuration);

    let outcome = engine.evaluate(&[
        Answer::new("automation_experience", "Advanced"),
        Answer::new("current_tools", vec!["CRM", "ERP"]),
        Answer::new("team_size", "42"),
    ]);

    let technical = &outcome.categories[0];
    assert_eq!(technical.category_id, CategoryId::from("category-1"));
    assert_eq!(technical.score, 35);
    assert_eq!(
        technical.threshold.as_ref().map(|t| t.label.as_str()),
        Some("Partially Ready")
    );
}

#[test]
fn overlapping_threshold_is_refused_for_authored_configuration() {
    let configuration = common::author_configuration();

    let err = configuration
        .apply(ConfigurationEdit::AddThreshold(ThresholdDraft {
            category_id: CategoryId::from("category-1"),
            min_score: 25,
            max_score: 40,
            label: "Emerging".to_string(),
            color: "orange".to_string(),
        }))
        .expect_err("overlap refused");

    assert!(matches!(err, ValidationError::OverlappingThreshold { .. }));
}

#[test]
fn sample_configuration_survives_export_and_import() {
    let sample = Configuration::sample();

    let exported = export_json(&sample).expect("export succeeds");
    let restored = import_str(&Configuration::default(), &exported)
        .expect("import succeeds")
        .configuration;

    assert_eq!(restored, sample);
    assert_eq!(restored.actions[0].priority, Priority::High);
}

#[test]
fn every_score_resolves_to_at_most_one_threshold() {
    let configuration = common::author_configuration();
    let category_id = CategoryId::from("category-1");

    for score in 0..=100 {
        let matching = configuration
            .thresholds_for(&category_id)
            .filter(|threshold| threshold.contains(score))
            .count();
        assert_eq!(matching, 1, "score {score}");
    }
}
