use super::domain::{ApplicationId, ApplicationRecord};

/// Storage abstraction so the service module can be exercised in isolation.
/// The production implementation is database-backed; tests and the demo
/// deployment use an in-memory map.
pub trait ApplicationRepository: Send + Sync {
    fn insert(&self, record: ApplicationRecord) -> Result<ApplicationRecord, RepositoryError>;
    fn update(&self, record: ApplicationRecord) -> Result<(), RepositoryError>;
    fn fetch(&self, id: ApplicationId) -> Result<Option<ApplicationRecord>, RepositoryError>;
    fn remove(&self, id: ApplicationId) -> Result<(), RepositoryError>;
    fn list(&self) -> Result<Vec<ApplicationRecord>, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}
