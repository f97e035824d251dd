use super::domain::Configuration;

/// Storage abstraction so the service can run against memory, files, or a database.
pub trait ConfigurationRepository: Send + Sync {
    fn load(&self) -> Result<Configuration, RepositoryError>;
    fn save(&self, configuration: &Configuration) -> Result<(), RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("stored configuration is unreadable: {0}")]
    Corrupt(String),
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}
