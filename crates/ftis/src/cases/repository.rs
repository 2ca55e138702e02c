use super::domain::{CaseId, CaseRecord};

/// Storage seam for triage cases so the service can run against any backend.
pub trait CaseRepository: Send + Sync {
    fn insert(&self, record: CaseRecord) -> Result<CaseRecord, RepositoryError>;
    fn update(&self, record: CaseRecord) -> Result<(), RepositoryError>;
    fn fetch(&self, id: CaseId) -> Result<Option<CaseRecord>, RepositoryError>;
    /// Every stored case, in no particular order.
    fn all(&self) -> Result<Vec<CaseRecord>, RepositoryError>;
}

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("case already exists")]
    Conflict,
    #[error("case not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}
