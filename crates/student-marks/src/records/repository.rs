use super::domain::{StudentCandidate, StudentId, StudentRecord};

/// Storage abstraction so the service can be exercised against any backing store.
pub trait StudentRepository: Send + Sync {
    /// Persist a candidate, assigning it a fresh id.
    fn insert(&self, candidate: StudentCandidate) -> Result<StudentRecord, RepositoryError>;
    /// Replace the fields of an existing record.
    fn update(
        &self,
        id: StudentId,
        candidate: StudentCandidate,
    ) -> Result<StudentRecord, RepositoryError>;
    fn fetch(&self, id: StudentId) -> Result<Option<StudentRecord>, RepositoryError>;
    /// Remove a record, returning what was stored.
    fn delete(&self, id: StudentId) -> Result<StudentRecord, RepositoryError>;
    /// Every record ordered by id.
    fn all(&self) -> Result<Vec<StudentRecord>, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("no student exists with id {0}")]
    NotFound(StudentId),
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}
