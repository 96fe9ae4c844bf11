use std::sync::Arc;

use serde_json::Value;
use tracing::{info, warn};

use super::domain::{Mark, StudentCandidate, StudentId, StudentRecord};
use super::repository::{RepositoryError, StudentRepository};
use super::stats::MarkStats;

/// Reasons the store refuses a request body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum PayloadRejected {
    #[error("request body must be a JSON object")]
    NotAnObject,
    #[error("name must be a non-empty string")]
    Name,
    #[error("course must be a non-empty string")]
    Course,
    #[error("mark must be an integer between 0 and 100")]
    Mark,
}

/// Strictly validate a JSON body received by the store.
///
/// The store does not coerce: the mark must already be an in-range integer.
pub fn candidate_from_payload(body: &Value) -> Result<StudentCandidate, PayloadRejected> {
    let object = body.as_object().ok_or(PayloadRejected::NotAnObject)?;

    let name = non_blank_str(object.get("name")).ok_or(PayloadRejected::Name)?;
    let course = non_blank_str(object.get("course")).ok_or(PayloadRejected::Course)?;
    let mark = object
        .get("mark")
        .and_then(Value::as_i64)
        .and_then(Mark::new)
        .ok_or(PayloadRejected::Mark)?;

    Ok(StudentCandidate {
        name: name.to_string(),
        course: course.to_string(),
        mark,
    })
}

fn non_blank_str(value: Option<&Value>) -> Option<&str> {
    value
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|text| !text.is_empty())
}

/// Authoritative collection store: validation in front of a repository.
pub struct StudentService<R> {
    repository: Arc<R>,
}

impl<R> StudentService<R>
where
    R: StudentRepository + 'static,
{
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    pub fn list(&self) -> Result<Vec<StudentRecord>, StudentServiceError> {
        Ok(self.repository.all()?)
    }

    pub fn create(&self, body: &Value) -> Result<StudentRecord, StudentServiceError> {
        let candidate = candidate_from_payload(body)?;
        let record = self.repository.insert(candidate)?;
        info!(id = %record.id, course = %record.course, "student created");
        Ok(record)
    }

    /// Insert an already-normalized candidate, used when seeding the store.
    pub fn seed(&self, candidate: StudentCandidate) -> Result<StudentRecord, StudentServiceError> {
        Ok(self.repository.insert(candidate)?)
    }

    /// The id is checked before the body so unknown ids always report not found.
    pub fn update(&self, id: StudentId, body: &Value) -> Result<StudentRecord, StudentServiceError> {
        if self.repository.fetch(id)?.is_none() {
            warn!(%id, "update requested for unknown student");
            return Err(RepositoryError::NotFound(id).into());
        }

        let candidate = candidate_from_payload(body)?;
        let record = self.repository.update(id, candidate)?;
        info!(%id, "student updated");
        Ok(record)
    }

    pub fn delete(&self, id: StudentId) -> Result<StudentRecord, StudentServiceError> {
        match self.repository.delete(id) {
            Ok(record) => {
                info!(%id, "student deleted");
                Ok(record)
            }
            Err(err) => {
                warn!(%id, error = %err, "delete failed");
                Err(err.into())
            }
        }
    }

    pub fn stats(&self) -> Result<MarkStats, StudentServiceError> {
        let records = self.repository.all()?;
        Ok(MarkStats::from_records(&records))
    }
}

/// Error raised by the student service.
#[derive(Debug, thiserror::Error)]
pub enum StudentServiceError {
    #[error(transparent)]
    Payload(#[from] PayloadRejected),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
