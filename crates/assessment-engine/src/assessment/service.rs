use std::sync::{Arc, Mutex};

use serde_json::Value;

use super::domain::{Answer, Configuration};
use super::evaluation::{evaluate, AssessmentOutcome};
use super::repository::{ConfigurationRepository, RepositoryError};
use super::store::{
    export_value, import_value, AppliedEdit, ConfigurationEdit, ImportError, ImportOutcome,
    IntegrityIssue, ValidationError,
};

/// Service composing the configuration repository with the evaluation pipeline.
pub struct AssessmentService<R> {
    repository: Arc<R>,
    // Serialises load-apply-save so concurrent edits do not drop each other.
    write_lock: Mutex<()>,
}

impl<R> AssessmentService<R>
where
    R: ConfigurationRepository + 'static,
{
    pub fn new(repository: Arc<R>) -> Self {
        Self {
            repository,
            write_lock: Mutex::new(()),
        }
    }

    pub fn configuration(&self) -> Result<Configuration, AssessmentServiceError> {
        Ok(self.repository.load()?)
    }

    /// Score answers against the currently stored configuration.
    pub fn evaluate(
        &self,
        answers: &[Answer],
    ) -> Result<AssessmentOutcome, AssessmentServiceError> {
        let configuration = self.repository.load()?;
        Ok(evaluate(&configuration, answers))
    }

    /// Validate and persist a single edit, returning the id of the touched entity.
    pub fn apply(&self, edit: ConfigurationEdit) -> Result<AppliedEdit, AssessmentServiceError> {
        let _guard = self.write_lock.lock().map_err(|_| {
            RepositoryError::Unavailable("configuration write lock poisoned".to_string())
        })?;

        let current = self.repository.load()?;
        let applied = current.apply(edit).map_err(|err| {
            tracing::warn!(error = %err, "rejected configuration edit");
            err
        })?;
        self.repository.save(&applied.configuration)?;

        tracing::info!(entity = %applied.entity, id = %applied.id, "configuration updated");
        Ok(applied)
    }

    pub fn export(&self) -> Result<Value, AssessmentServiceError> {
        let configuration = self.repository.load()?;
        export_value(&configuration).map_err(|err| AssessmentServiceError::Export(err.to_string()))
    }

    /// Import a document over the stored configuration; well-formed sections are kept even when
    /// others are rejected.
    pub fn import(&self, document: Value) -> Result<ImportOutcome, AssessmentServiceError> {
        let _guard = self.write_lock.lock().map_err(|_| {
            RepositoryError::Unavailable("configuration write lock poisoned".to_string())
        })?;

        let current = self.repository.load()?;
        let outcome = import_value(&current, document)?;
        self.repository.save(&outcome.configuration)?;
        Ok(outcome)
    }

    pub fn audit(&self) -> Result<Vec<IntegrityIssue>, AssessmentServiceError> {
        Ok(self.repository.load()?.audit())
    }
}

/// Error raised by the assessment service.
#[derive(Debug, thiserror::Error)]
pub enum AssessmentServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Import(#[from] ImportError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error("configuration export failed: {0}")]
    Export(String),
}
