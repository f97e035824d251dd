use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use super::domain::{ActionId, Answer, CategoryId, RuleId, ThresholdId};
use super::repository::{ConfigurationRepository, RepositoryError};
use super::service::{AssessmentService, AssessmentServiceError};
use super::store::{
    ActionDraft, CategoryDraft, ConfigurationEdit, EntityKind, RuleDraft, ThresholdDraft,
    ValidationError,
};

type SharedService<R> = Arc<AssessmentService<R>>;

/// Router builder exposing evaluation, configuration editing, and import/export endpoints.
pub fn assessment_router<R>(service: SharedService<R>) -> Router
where
    R: ConfigurationRepository + 'static,
{
    Router::new()
        .route("/api/v1/assessment/evaluate", post(evaluate_handler::<R>))
        .route(
            "/api/v1/assessment/configuration",
            get(export_handler::<R>).put(import_handler::<R>),
        )
        .route("/api/v1/assessment/audit", get(audit_handler::<R>))
        .route("/api/v1/assessment/categories", post(create_category::<R>))
        .route(
            "/api/v1/assessment/categories/:id",
            put(update_category::<R>).delete(remove_category::<R>),
        )
        .route("/api/v1/assessment/rules", post(create_rule::<R>))
        .route(
            "/api/v1/assessment/rules/:id",
            put(update_rule::<R>).delete(remove_rule::<R>),
        )
        .route("/api/v1/assessment/thresholds", post(create_threshold::<R>))
        .route(
            "/api/v1/assessment/thresholds/:id",
            put(update_threshold::<R>).delete(remove_threshold::<R>),
        )
        .route("/api/v1/assessment/actions", post(create_action::<R>))
        .route(
            "/api/v1/assessment/actions/:id",
            put(update_action::<R>).delete(remove_action::<R>),
        )
        .with_state(service)
}

#[derive(Debug, Deserialize)]
pub(crate) struct EvaluateRequest {
    pub(crate) answers: Vec<Answer>,
}

#[derive(Debug, Serialize)]
struct EditView {
    entity: EntityKind,
    id: String,
}

pub(crate) async fn evaluate_handler<R>(
    State(service): State<SharedService<R>>,
    Json(request): Json<EvaluateRequest>,
) -> Response
where
    R: ConfigurationRepository + 'static,
{
    match run_blocking(service, move |service| service.evaluate(&request.answers)).await {
        Ok(outcome) => (StatusCode::OK, Json(outcome)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn export_handler<R>(State(service): State<SharedService<R>>) -> Response
where
    R: ConfigurationRepository + 'static,
{
    match run_blocking(service, |service| service.export()).await {
        Ok(document) => (StatusCode::OK, Json(document)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn import_handler<R>(
    State(service): State<SharedService<R>>,
    Json(document): Json<Value>,
) -> Response
where
    R: ConfigurationRepository + 'static,
{
    match run_blocking(service, move |service| service.import(document)).await {
        Ok(outcome) => (StatusCode::OK, Json(outcome)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn audit_handler<R>(State(service): State<SharedService<R>>) -> Response
where
    R: ConfigurationRepository + 'static,
{
    match run_blocking(service, |service| service.audit()).await {
        Ok(issues) => {
            let messages: Vec<String> = issues.iter().map(ToString::to_string).collect();
            let payload = json!({ "issues": issues, "messages": messages });
            (StatusCode::OK, Json(payload)).into_response()
        }
        Err(err) => error_response(err),
    }
}

async fn create_category<R>(
    State(service): State<SharedService<R>>,
    Json(draft): Json<CategoryDraft>,
) -> Response
where
    R: ConfigurationRepository + 'static,
{
    respond_edit(service, ConfigurationEdit::AddCategory(draft), StatusCode::CREATED).await
}

async fn update_category<R>(
    State(service): State<SharedService<R>>,
    Path(id): Path<String>,
    Json(draft): Json<CategoryDraft>,
) -> Response
where
    R: ConfigurationRepository + 'static,
{
    let edit = ConfigurationEdit::UpdateCategory {
        id: CategoryId(id),
        draft,
    };
    respond_edit(service, edit, StatusCode::OK).await
}

async fn remove_category<R>(
    State(service): State<SharedService<R>>,
    Path(id): Path<String>,
) -> Response
where
    R: ConfigurationRepository + 'static,
{
    let edit = ConfigurationEdit::RemoveCategory(CategoryId(id));
    respond_edit(service, edit, StatusCode::NO_CONTENT).await
}

async fn create_rule<R>(
    State(service): State<SharedService<R>>,
    Json(draft): Json<RuleDraft>,
) -> Response
where
    R: ConfigurationRepository + 'static,
{
    respond_edit(service, ConfigurationEdit::AddRule(draft), StatusCode::CREATED).await
}

async fn update_rule<R>(
    State(service): State<SharedService<R>>,
    Path(id): Path<String>,
    Json(draft): Json<RuleDraft>,
) -> Response
where
    R: ConfigurationRepository + 'static,
{
    let edit = ConfigurationEdit::UpdateRule {
        id: RuleId(id),
        draft,
    };
    respond_edit(service, edit, StatusCode::OK).await
}

async fn remove_rule<R>(
    State(service): State<SharedService<R>>,
    Path(id): Path<String>,
) -> Response
where
    R: ConfigurationRepository + 'static,
{
    let edit = ConfigurationEdit::RemoveRule(RuleId(id));
    respond_edit(service, edit, StatusCode::NO_CONTENT).await
}

async fn create_threshold<R>(
    State(service): State<SharedService<R>>,
    Json(draft): Json<ThresholdDraft>,
) -> Response
where
    R: ConfigurationRepository + 'static,
{
    respond_edit(service, ConfigurationEdit::AddThreshold(draft), StatusCode::CREATED).await
}

async fn update_threshold<R>(
    State(service): State<SharedService<R>>,
    Path(id): Path<String>,
    Json(draft): Json<ThresholdDraft>,
) -> Response
where
    R: ConfigurationRepository + 'static,
{
    let edit = ConfigurationEdit::UpdateThreshold {
        id: ThresholdId(id),
        draft,
    };
    respond_edit(service, edit, StatusCode::OK).await
}

async fn remove_threshold<R>(
    State(service): State<SharedService<R>>,
    Path(id): Path<String>,
) -> Response
where
    R: ConfigurationRepository + 'static,
{
    let edit = ConfigurationEdit::RemoveThreshold(ThresholdId(id));
    respond_edit(service, edit, StatusCode::NO_CONTENT).await
}

async fn create_action<R>(
    State(service): State<SharedService<R>>,
    Json(draft): Json<ActionDraft>,
) -> Response
where
    R: ConfigurationRepository + 'static,
{
    respond_edit(service, ConfigurationEdit::AddAction(draft), StatusCode::CREATED).await
}

async fn update_action<R>(
    State(service): State<SharedService<R>>,
    Path(id): Path<String>,
    Json(draft): Json<ActionDraft>,
) -> Response
where
    R: ConfigurationRepository + 'static,
{
    let edit = ConfigurationEdit::UpdateAction {
        id: ActionId(id),
        draft,
    };
    respond_edit(service, edit, StatusCode::OK).await
}

async fn remove_action<R>(
    State(service): State<SharedService<R>>,
    Path(id): Path<String>,
) -> Response
where
    R: ConfigurationRepository + 'static,
{
    let edit = ConfigurationEdit::RemoveAction(ActionId(id));
    respond_edit(service, edit, StatusCode::NO_CONTENT).await
}

/// Repository calls may touch the filesystem, so they run off the async workers.
async fn run_blocking<R, T, F>(
    service: SharedService<R>,
    task: F,
) -> Result<T, AssessmentServiceError>
where
    R: ConfigurationRepository + 'static,
    T: Send + 'static,
    F: FnOnce(&AssessmentService<R>) -> Result<T, AssessmentServiceError> + Send + 'static,
{
    tokio::task::spawn_blocking(move || task(&service))
        .await
        .map_err(|err| {
            AssessmentServiceError::Repository(RepositoryError::Unavailable(format!(
                "configuration task failed: {err}"
            )))
        })?
}

pub(crate) async fn respond_edit<R>(
    service: SharedService<R>,
    edit: ConfigurationEdit,
    success: StatusCode,
) -> Response
where
    R: ConfigurationRepository + 'static,
{
    match run_blocking(service, move |service| service.apply(edit)).await {
        Ok(_) if success == StatusCode::NO_CONTENT => StatusCode::NO_CONTENT.into_response(),
        Ok(applied) => {
            let view = EditView {
                entity: applied.entity,
                id: applied.id,
            };
            (success, Json(view)).into_response()
        }
        Err(err) => error_response(err),
    }
}

pub(crate) fn error_response(error: AssessmentServiceError) -> Response {
    let status = match &error {
        AssessmentServiceError::Validation(ValidationError::NotFound { .. }) => {
            StatusCode::NOT_FOUND
        }
        AssessmentServiceError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
        AssessmentServiceError::Import(_) => StatusCode::BAD_REQUEST,
        AssessmentServiceError::Repository(_) | AssessmentServiceError::Export(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };

    let payload = json!({ "error": error.to_string() });
    (status, Json(payload)).into_response()
}
