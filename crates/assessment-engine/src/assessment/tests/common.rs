use std::sync::{Arc, Mutex};

use axum::response::Response;
use serde_json::Value;

use crate::assessment::domain::{
    Action, ActionId, Category, CategoryId, Condition, Configuration, Priority, Rule, RuleId,
    Threshold, ThresholdId,
};
use crate::assessment::repository::{ConfigurationRepository, RepositoryError};
use crate::assessment::store::ThresholdDraft;
use crate::assessment::{assessment_router, AssessmentService};

pub(super) fn category(id: &str, weight: f64) -> Category {
    Category {
        id: CategoryId::from(id),
        name: format!("{id} readiness"),
        description: String::new(),
        weight,
    }
}

pub(super) fn rule(
    id: &str,
    field: &str,
    condition: Condition,
    value: &str,
    category_id: &str,
    points: i32,
) -> Rule {
    Rule {
        id: RuleId::from(id),
        field: field.to_string(),
        condition,
        value: value.to_string(),
        category_id: CategoryId::from(category_id),
        points,
    }
}

pub(super) fn threshold(
    id: &str,
    category_id: &str,
    min: i32,
    max: i32,
    label: &str,
) -> Threshold {
    Threshold {
        id: ThresholdId::from(id),
        category_id: CategoryId::from(category_id),
        min_score: min,
        max_score: max,
        label: label.to_string(),
        color: "gray".to_string(),
    }
}

pub(super) fn action(id: &str, category_id: &str, threshold_id: &str, title: &str) -> Action {
    Action {
        id: ActionId::from(id),
        category_id: CategoryId::from(category_id),
        threshold_id: ThresholdId::from(threshold_id),
        action: title.to_string(),
        description: String::new(),
        priority: Priority::Medium,
    }
}

/// One "tech" category with the three readiness bands and an action per band below the top.
pub(super) fn readiness_configuration() -> Configuration {
    Configuration {
        categories: vec![category("tech", 1.0)],
        rules: vec![
            rule(
                "rule-1",
                "automation_experience",
                Condition::Equals,
                "Advanced",
                "tech",
                10,
            ),
            rule("rule-2", "current_tools", Condition::Contains, "CRM", "tech", 20),
        ],
        thresholds: vec![
            threshold("low", "tech", 0, 30, "Not Ready"),
            threshold("mid", "tech", 31, 70, "Partially Ready"),
            threshold("high", "tech", 71, 100, "Fully Ready"),
        ],
        actions: vec![
            action("action-1", "tech", "low", "Start with fundamentals"),
            action("action-2", "tech", "mid", "Run a pilot"),
            action("action-3", "tech", "low", "Audit tooling"),
        ],
    }
}

pub(super) fn threshold_draft(
    category_id: &str,
    min: i32,
    max: i32,
    label: &str,
) -> ThresholdDraft {
    ThresholdDraft {
        category_id: CategoryId::from(category_id),
        min_score: min,
        max_score: max,
        label: label.to_string(),
        color: "blue".to_string(),
    }
}

#[derive(Default)]
pub(super) struct MemoryRepository {
    configuration: Mutex<Configuration>,
    saves: Mutex<usize>,
}

impl MemoryRepository {
    pub(super) fn with(configuration: Configuration) -> Self {
        Self {
            configuration: Mutex::new(configuration),
            saves: Mutex::new(0),
        }
    }

    pub(super) fn saves(&self) -> usize {
        *self.saves.lock().expect("saves mutex poisoned")
    }

    pub(super) fn stored(&self) -> Configuration {
        self.configuration
            .lock()
            .expect("configuration mutex poisoned")
            .clone()
    }
}

impl ConfigurationRepository for MemoryRepository {
    fn load(&self) -> Result<Configuration, RepositoryError> {
        Ok(self.stored())
    }

    fn save(&self, configuration: &Configuration) -> Result<(), RepositoryError> {
        *self
            .configuration
            .lock()
            .expect("configuration mutex poisoned") = configuration.clone();
        *self.saves.lock().expect("saves mutex poisoned") += 1;
        Ok(())
    }
}

pub(super) struct UnavailableRepository;

impl ConfigurationRepository for UnavailableRepository {
    fn load(&self) -> Result<Configuration, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn save(&self, _configuration: &Configuration) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

pub(super) fn build_service() -> (AssessmentService<MemoryRepository>, Arc<MemoryRepository>) {
    let repository = Arc::new(MemoryRepository::with(readiness_configuration()));
    (AssessmentService::new(repository.clone()), repository)
}

pub(super) fn router_with_service(service: AssessmentService<MemoryRepository>) -> axum::Router {
    assessment_router(Arc::new(service))
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
