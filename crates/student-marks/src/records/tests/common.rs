use std::sync::Arc;

use axum::body::to_bytes;
use axum::http::StatusCode;
use axum::response::Response;
use serde_json::{json, Value};

use crate::records::domain::{StudentCandidate, StudentId, StudentRecord};
use crate::records::memory::InMemoryStudentRepository;
use crate::records::repository::{RepositoryError, StudentRepository};
use crate::records::service::StudentService;

pub(super) fn body(name: &str, course: &str, mark: i64) -> Value {
    json!({ "name": name, "course": course, "mark": mark })
}

pub(super) fn seeded_service() -> (
    Arc<StudentService<InMemoryStudentRepository>>,
    Arc<InMemoryStudentRepository>,
) {
    let repository = Arc::new(InMemoryStudentRepository::default());
    let service = Arc::new(StudentService::new(repository.clone()));
    service
        .create(&body("Jane Doe", "COMP1531", 95))
        .expect("seed Jane");
    service
        .create(&body("Amy Lin", "COMP2521", 48))
        .expect("seed Amy");
    (service, repository)
}

pub(super) async fn json_body(response: Response) -> Value {
    let bytes = to_bytes(response.into_body(), 1024 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&bytes).expect("json payload")
}

pub(super) async fn assert_error_response(response: Response, status: StatusCode, message: &str) {
    assert_eq!(response.status(), status);
    let payload = json_body(response).await;
    assert_eq!(
        payload.get("error").and_then(Value::as_str),
        Some(message),
        "unexpected payload {payload}"
    );
}

/// Repository whose backing store is permanently offline.
pub(super) struct UnavailableRepository;

impl StudentRepository for UnavailableRepository {
    fn insert(&self, _candidate: StudentCandidate) -> Result<StudentRecord, RepositoryError> {
        Err(RepositoryError::Unavailable("offline".to_string()))
    }

    fn update(
        &self,
        _id: StudentId,
        _candidate: StudentCandidate,
    ) -> Result<StudentRecord, RepositoryError> {
        Err(RepositoryError::Unavailable("offline".to_string()))
    }

    fn fetch(&self, _id: StudentId) -> Result<Option<StudentRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("offline".to_string()))
    }

    fn delete(&self, _id: StudentId) -> Result<StudentRecord, RepositoryError> {
        Err(RepositoryError::Unavailable("offline".to_string()))
    }

    fn all(&self) -> Result<Vec<StudentRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("offline".to_string()))
    }
}
