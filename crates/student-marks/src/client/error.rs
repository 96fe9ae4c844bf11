use reqwest::StatusCode;

use crate::records::ValidationRejected;

/// The remote calls a [`CollectionClient`](super::CollectionClient) can make.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    List,
    Create,
    Update,
    Delete,
    Stats,
}

impl Operation {
    /// Fixed user-facing message used when the store gives no usable reason.
    pub fn failure_message(self) -> &'static str {
        match self {
            Operation::List => "Failed to load students",
            Operation::Create => "Failed to create student",
            Operation::Update => "Failed to update student",
            Operation::Delete => "Failed to delete student",
            Operation::Stats => "Failed to load stats",
        }
    }

    /// Whether a failed response body may carry an `{error}` payload worth surfacing.
    pub(crate) fn reads_error_payload(self) -> bool {
        matches!(
            self,
            Operation::Create | Operation::Update | Operation::Delete
        )
    }
}

/// Error returned by every client call. `Display` is the message shown to the user.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The draft never left the client.
    #[error(transparent)]
    ValidationRejected(#[from] ValidationRejected),
    /// The request failed or the store answered without a structured reason.
    #[error("{}", .operation.failure_message())]
    Transport {
        operation: Operation,
        status: Option<StatusCode>,
        #[source]
        source: Option<reqwest::Error>,
    },
    /// The store refused the request and said why.
    #[error("{message}")]
    Domain {
        operation: Operation,
        status: StatusCode,
        message: String,
    },
}

impl ClientError {
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ClientError::ValidationRejected(_) => None,
            ClientError::Transport { status, .. } => *status,
            ClientError::Domain { status, .. } => Some(*status),
        }
    }
}
