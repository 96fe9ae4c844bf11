use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};
use tracing::error;

use super::domain::StudentId;
use super::repository::{RepositoryError, StudentRepository};
use super::service::{PayloadRejected, StudentService, StudentServiceError};

/// Router builder exposing the student collection over HTTP.
pub fn student_router<R>(service: Arc<StudentService<R>>) -> Router
where
    R: StudentRepository + 'static,
{
    Router::new()
        .route(
            "/students",
            get(list_handler::<R>).post(create_handler::<R>),
        )
        .route(
            "/students/:student_id",
            axum::routing::put(update_handler::<R>).delete(delete_handler::<R>),
        )
        .route("/stats", get(stats_handler::<R>))
        .with_state(service)
}

pub(crate) async fn list_handler<R>(State(service): State<Arc<StudentService<R>>>) -> Response
where
    R: StudentRepository + 'static,
{
    match service.list() {
        Ok(records) => (StatusCode::OK, Json(records)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn create_handler<R>(
    State(service): State<Arc<StudentService<R>>>,
    body: Result<Json<Value>, JsonRejection>,
) -> Response
where
    R: StudentRepository + 'static,
{
    let Ok(Json(body)) = body else {
        return error_response(PayloadRejected::NotAnObject.into());
    };

    match service.create(&body) {
        Ok(record) => (StatusCode::CREATED, Json(record)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn update_handler<R>(
    State(service): State<Arc<StudentService<R>>>,
    Path(raw_id): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> Response
where
    R: StudentRepository + 'static,
{
    let student_id = match parse_student_id(&raw_id) {
        Ok(id) => id,
        Err(response) => return response,
    };
    let body = body.map(|Json(value)| value).unwrap_or(Value::Null);

    match service.update(student_id, &body) {
        Ok(record) => (StatusCode::OK, Json(record)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn delete_handler<R>(
    State(service): State<Arc<StudentService<R>>>,
    Path(raw_id): Path<String>,
) -> Response
where
    R: StudentRepository + 'static,
{
    let student_id = match parse_student_id(&raw_id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    match service.delete(student_id) {
        Ok(record) => (StatusCode::OK, Json(record)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn stats_handler<R>(State(service): State<Arc<StudentService<R>>>) -> Response
where
    R: StudentRepository + 'static,
{
    match service.stats() {
        Ok(stats) => (StatusCode::OK, Json(stats)).into_response(),
        Err(err) => error_response(err),
    }
}

/// Ids that are not unsigned integers can never name a stored record.
fn parse_student_id(raw: &str) -> Result<StudentId, Response> {
    raw.parse::<u64>().map(StudentId).map_err(|_| {
        let payload = json!({
            "error": format!("no student exists with id {raw}"),
        });
        (StatusCode::NOT_FOUND, Json(payload)).into_response()
    })
}

fn error_response(err: StudentServiceError) -> Response {
    let status = match &err {
        StudentServiceError::Payload(_) => StatusCode::BAD_REQUEST,
        StudentServiceError::Repository(RepositoryError::NotFound(_)) => StatusCode::NOT_FOUND,
        StudentServiceError::Repository(RepositoryError::Unavailable(_)) => {
            error!(error = %err, "student repository unavailable");
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };

    let payload = json!({
        "error": err.to_string(),
    });
    (status, Json(payload)).into_response()
}
