use assessment_engine::assessment::store::{export_json, import_str};
use assessment_engine::assessment::{
    Answer, Configuration, ConfigurationRepository, RepositoryError,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Keeps the configuration for the lifetime of the process.
#[derive(Clone)]
pub(crate) struct InMemoryConfigurationRepository {
    configuration: Arc<Mutex<Configuration>>,
}

impl InMemoryConfigurationRepository {
    pub(crate) fn new(configuration: Configuration) -> Self {
        Self {
            configuration: Arc::new(Mutex::new(configuration)),
        }
    }
}

impl Default for InMemoryConfigurationRepository {
    fn default() -> Self {
        Self::new(Configuration::sample())
    }
}

impl ConfigurationRepository for InMemoryConfigurationRepository {
    fn load(&self) -> Result<Configuration, RepositoryError> {
        let guard = self.configuration.lock().expect("repository mutex poisoned");
        Ok(guard.clone())
    }

    fn save(&self, configuration: &Configuration) -> Result<(), RepositoryError> {
        let mut guard = self.configuration.lock().expect("repository mutex poisoned");
        *guard = configuration.clone();
        Ok(())
    }
}

/// Stores the configuration as an exported JSON document; a missing file reads as the sample.
#[derive(Debug, Clone)]
pub(crate) struct JsonFileConfigurationRepository {
    path: PathBuf,
}

impl JsonFileConfigurationRepository {
    pub(crate) fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ConfigurationRepository for JsonFileConfigurationRepository {
    fn load(&self) -> Result<Configuration, RepositoryError> {
        if !self.path.exists() {
            return Ok(Configuration::sample());
        }
        read_configuration(&self.path)
    }

    fn save(&self, configuration: &Configuration) -> Result<(), RepositoryError> {
        let document = export_json(configuration)
            .map_err(|err| RepositoryError::Corrupt(err.to_string()))?;

        let staging = self.path.with_extension("json.tmp");
        fs::write(&staging, document).map_err(|err| unavailable(&staging, err))?;
        fs::rename(&staging, &self.path).map_err(|err| unavailable(&self.path, err))
    }
}

fn unavailable(path: &Path, err: std::io::Error) -> RepositoryError {
    RepositoryError::Unavailable(format!("{}: {err}", path.display()))
}

/// Read a stored document strictly: any rejected section makes the file unusable.
pub(crate) fn read_configuration(path: &Path) -> Result<Configuration, RepositoryError> {
    let raw = fs::read_to_string(path).map_err(|err| unavailable(path, err))?;
    let outcome = import_str(&Configuration::default(), &raw)
        .map_err(|err| RepositoryError::Corrupt(format!("{}: {err}", path.display())))?;

    if let Some(report) = outcome.rejected().next() {
        return Err(RepositoryError::Corrupt(format!(
            "{}: section '{}' does not match the configuration shape",
            path.display(),
            report.section.key()
        )));
    }

    Ok(outcome.configuration)
}

pub(crate) fn read_answers(path: &Path) -> Result<Vec<Answer>, std::io::Error> {
    let raw = fs::read_to_string(path)?;
    serde_json::from_str(&raw)
        .map_err(|err| std::io::Error::new(std::io::ErrorKind::InvalidData, err))
}

#[cfg(test)]
mod tests {
    use super::*;
    use assessment_engine::assessment::{CategoryDraft, ConfigurationEdit};

    #[test]
    fn missing_file_loads_the_sample() {
        let dir = tempfile::tempdir().expect("tempdir");
        let repository = JsonFileConfigurationRepository::new(dir.path().join("config.json"));

        let configuration = repository.load().expect("loads");

        assert_eq!(configuration, Configuration::sample());
    }

    #[test]
    fn saved_configuration_reloads_identically() {
        let dir = tempfile::tempdir().expect("tempdir");
        let repository = JsonFileConfigurationRepository::new(dir.path().join("config.json"));
        let edited = Configuration::sample()
            .apply(ConfigurationEdit::AddCategory(CategoryDraft {
                name: "Security Posture".to_string(),
                description: String::new(),
                weight: 0.9,
            }))
            .expect("edit accepted")
            .configuration;

        repository.save(&edited).expect("saves");

        assert_eq!(repository.load().expect("reloads"), edited);
        assert!(!dir.path().join("config.json.tmp").exists());
    }

    #[test]
    fn malformed_sections_mark_the_file_corrupt() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{ "categories": [ { "id": 7 } ] }"#).expect("write fixture");

        match JsonFileConfigurationRepository::new(&path).load() {
            Err(RepositoryError::Corrupt(reason)) => assert!(reason.contains("categories")),
            other => panic!("expected corrupt file, got {other:?}"),
        }
    }

    #[test]
    fn reads_scalar_and_multi_select_answers() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("answers.json");
        fs::write(
            &path,
            r#"[{"field":"timeline","value":"Immediate"},{"field":"tools","value":["CRM"]}]"#,
        )
        .expect("write fixture");

        let answers = read_answers(&path).expect("answers parse");

        assert_eq!(answers[0], Answer::new("timeline", "Immediate"));
        assert_eq!(answers[1], Answer::new("tools", vec!["CRM"]));
    }

    #[test]
    fn in_memory_repository_starts_from_the_sample() {
        let repository = InMemoryConfigurationRepository::default();
        assert_eq!(repository.load().expect("loads"), Configuration::sample());

        repository.save(&Configuration::default()).expect("saves");

        assert_eq!(repository.load().expect("loads"), Configuration::default());
    }
}
