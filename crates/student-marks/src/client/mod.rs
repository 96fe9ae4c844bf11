//! Typed async client for the student collection store.
//!
//! Every call is single-shot: no retries and no caching. Failed mutations surface the store's
//! `{error}` message when one is returned and a fixed per-operation message otherwise.

mod error;

pub use error::{ClientError, Operation};

use reqwest::{RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::config::ClientConfig;
use crate::records::{
    normalize, MarkStats, StudentCandidate, StudentDraft, StudentId, StudentRecord,
};

/// Acknowledgement of a successful delete.
///
/// `id` is the id that was requested. `body` is whatever JSON the store answered with, or
/// `Null` when the response was empty.
#[derive(Debug, Clone, PartialEq)]
pub struct DeleteAck {
    pub id: StudentId,
    pub body: Value,
}

#[derive(Debug, Deserialize)]
struct ErrorPayload {
    #[serde(default)]
    error: Option<String>,
}

#[derive(Debug, Clone)]
pub struct CollectionClient {
    http: reqwest::Client,
    base_url: String,
}

impl CollectionClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http: reqwest::Client::new(),
            base_url,
        }
    }

    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(config.base_url.clone())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn list(&self) -> Result<Vec<StudentRecord>, ClientError> {
        let request = self.http.get(self.url("/students"));
        self.execute(Operation::List, request).await
    }

    pub async fn create(&self, candidate: &StudentCandidate) -> Result<StudentRecord, ClientError> {
        let request = self.http.post(self.url("/students")).json(candidate);
        self.execute(Operation::Create, request).await
    }

    pub async fn update(
        &self,
        id: StudentId,
        candidate: &StudentCandidate,
    ) -> Result<StudentRecord, ClientError> {
        let request = self
            .http
            .put(self.url(&format!("/students/{id}")))
            .json(candidate);
        self.execute(Operation::Update, request).await
    }

    pub async fn delete(&self, id: StudentId) -> Result<DeleteAck, ClientError> {
        let operation = Operation::Delete;
        let request = self.http.delete(self.url(&format!("/students/{id}")));
        let response = self.send(operation, request).await?;

        let status = response.status();
        let bytes = response
            .bytes()
            .await
            .map_err(|source| ClientError::Transport {
                operation,
                status: Some(status),
                source: Some(source),
            })?;
        if bytes.is_empty() {
            return Ok(DeleteAck {
                id,
                body: Value::Null,
            });
        }

        let body = serde_json::from_slice(&bytes).map_err(|_| ClientError::Transport {
            operation,
            status: Some(status),
            source: None,
        })?;
        Ok(DeleteAck { id, body })
    }

    pub async fn stats(&self) -> Result<MarkStats, ClientError> {
        let request = self.http.get(self.url("/stats"));
        self.execute(Operation::Stats, request).await
    }

    /// Normalize a form draft and create it. Rejected drafts never reach the network.
    pub async fn submit_draft(&self, draft: &StudentDraft) -> Result<StudentRecord, ClientError> {
        let candidate = normalize(draft)?;
        self.create(&candidate).await
    }

    /// Normalize an edit form and apply it to an existing record.
    pub async fn submit_edit(
        &self,
        id: StudentId,
        draft: &StudentDraft,
    ) -> Result<StudentRecord, ClientError> {
        let candidate = normalize(draft)?;
        self.update(id, &candidate).await
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn execute<T>(&self, operation: Operation, request: RequestBuilder) -> Result<T, ClientError>
    where
        T: DeserializeOwned,
    {
        let response = self.send(operation, request).await?;
        let status = response.status();
        response
            .json::<T>()
            .await
            .map_err(|source| ClientError::Transport {
                operation,
                status: Some(status),
                source: Some(source),
            })
    }

    /// Send once and turn any non-success status into a [`ClientError`].
    async fn send(
        &self,
        operation: Operation,
        request: RequestBuilder,
    ) -> Result<Response, ClientError> {
        debug!(?operation, "sending collection request");
        let response = request
            .send()
            .await
            .map_err(|source| ClientError::Transport {
                operation,
                status: None,
                source: Some(source),
            })?;

        if !response.status().is_success() {
            return Err(failure(operation, response).await);
        }
        Ok(response)
    }
}

async fn failure(operation: Operation, response: Response) -> ClientError {
    let status = response.status();
    debug!(?operation, %status, "collection request failed");

    if operation.reads_error_payload() {
        let message = response
            .json::<ErrorPayload>()
            .await
            .ok()
            .and_then(|payload| payload.error)
            .filter(|message| !message.trim().is_empty());

        if let Some(message) = message {
            return ClientError::Domain {
                operation,
                status,
                message,
            };
        }
    }

    ClientError::Transport {
        operation,
        status: Some(status),
        source: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slashes_are_dropped_from_base_url() {
        let client = CollectionClient::new("http://localhost:5000//");
        assert_eq!(client.base_url(), "http://localhost:5000");
        assert_eq!(client.url("/stats"), "http://localhost:5000/stats");
    }

    #[tokio::test]
    async fn rejected_drafts_never_reach_the_network() {
        // Nothing listens on port 9; a network attempt would surface as a transport error.
        let client = CollectionClient::new("http://127.0.0.1:9");
        let draft = StudentDraft::new("   ", "COMP1531", "50");

        match client.submit_draft(&draft).await {
            Err(ClientError::ValidationRejected(_)) => {}
            other => panic!("expected validation rejection, got {other:?}"),
        }
    }
}
