use serde::{Deserialize, Serialize};
use std::fmt;

/// Message returned when tokens are requested from an endpoint without authentication.
pub const AUTH_DISABLED_MESSAGE: &str = "Authentication not enabled on this endpoint";

/// Photon SDK error type
///
/// Represents all possible errors that can occur when talking to the Photon
/// control plane, its identity provider, or while parsing tokens. Errors compare
/// by content so callers can match a specific failure cause.
#[derive(Debug, Clone, PartialEq)]
pub enum PhotonError {
    /// Tokens were requested from an endpoint where authentication is disabled
    AuthDisabled,
    /// Request could not be sent or the response could not be parsed
    Transport(String),
    /// Control plane reported an error
    Api(ApiError),
    /// Control plane returned a non-success status without an error document
    Http { status: u16, message: String },
    /// Identity provider rejected the token request
    Provider(ProviderError),
    /// JWT does not have the expected structure
    MalformedToken(String),
    /// Task finished in the ERROR state
    Task(TaskError),
    /// Task did not reach a terminal state in time
    TaskTimeout { task_id: String },
}

impl PhotonError {
    /// Human-readable failure reason
    pub fn message(&self) -> String {
        match self {
            PhotonError::AuthDisabled => AUTH_DISABLED_MESSAGE.to_string(),
            PhotonError::Transport(msg) | PhotonError::MalformedToken(msg) => msg.clone(),
            PhotonError::Api(err) => err.message.clone(),
            PhotonError::Http { message, .. } => message.clone(),
            PhotonError::Provider(err) => err.message().to_string(),
            PhotonError::Task(err) => err.to_string(),
            PhotonError::TaskTimeout { task_id } => {
                format!("Timed out waiting for task {}", task_id)
            }
        }
    }
}

impl fmt::Display for PhotonError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PhotonError::AuthDisabled => write!(f, "{}", AUTH_DISABLED_MESSAGE),
            PhotonError::Transport(msg) => write!(f, "Transport error: {}", msg),
            PhotonError::Api(err) => write!(f, "{}", err),
            PhotonError::Http { status, message } => {
                write!(f, "HTTP {} error: {}", status, message)
            }
            PhotonError::Provider(err) => write!(f, "{}", err),
            PhotonError::MalformedToken(msg) => write!(f, "Malformed token: {}", msg),
            PhotonError::Task(err) => write!(f, "{}", err),
            PhotonError::TaskTimeout { task_id } => {
                write!(f, "Timed out waiting for task {}", task_id)
            }
        }
    }
}

impl std::error::Error for PhotonError {}

impl From<reqwest::Error> for PhotonError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            PhotonError::Transport("Request timeout".to_string())
        } else if err.is_connect() {
            PhotonError::Transport(format!("Connection failed: {}", err))
        } else if err.is_decode() {
            PhotonError::Transport(format!("Failed to parse response: {}", err))
        } else {
            PhotonError::Transport(err.to_string())
        }
    }
}

impl From<serde_json::Error> for PhotonError {
    fn from(err: serde_json::Error) -> Self {
        PhotonError::Transport(format!("Failed to parse response JSON: {}", err))
    }
}

impl From<url::ParseError> for PhotonError {
    fn from(err: url::ParseError) -> Self {
        PhotonError::Transport(format!("Invalid URL: {}", err))
    }
}

impl From<ApiError> for PhotonError {
    fn from(err: ApiError) -> Self {
        PhotonError::Api(err)
    }
}

impl From<ProviderError> for PhotonError {
    fn from(err: ProviderError) -> Self {
        PhotonError::Provider(err)
    }
}

impl From<TaskError> for PhotonError {
    fn from(err: TaskError) -> Self {
        PhotonError::Task(err)
    }
}

/// Error document returned by the control plane on non-success responses
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiError {
    pub code: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
    /// Filled from the response status, not from the body
    #[serde(skip)]
    pub http_status_code: u16,
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Photon error: {{ HTTP status: '{}', code: '{}', message: '{}' }}",
            self.http_status_code, self.code, self.message
        )
    }
}

impl std::error::Error for ApiError {}

/// Error returned by the identity provider token endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderError {
    /// OAuth error code (e.g. `invalid_grant`)
    #[serde(default)]
    pub error: String,
    #[serde(default)]
    pub error_description: String,
    #[serde(skip)]
    pub status: u16,
}

impl ProviderError {
    /// The provider's description, or its error code when no description was sent
    pub fn message(&self) -> &str {
        if self.error_description.is_empty() {
            &self.error
        } else {
            &self.error_description
        }
    }
}

impl fmt::Display for ProviderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Identity provider error (HTTP {}): {}",
            self.status,
            self.message()
        )
    }
}

impl std::error::Error for ProviderError {}

/// A task that finished in the ERROR state
#[derive(Debug, Clone, PartialEq)]
pub struct TaskError {
    pub task_id: String,
    /// Errors reported by the failed steps
    pub errors: Vec<ApiError>,
}

impl fmt::Display for TaskError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Task {} failed", self.task_id)?;
        if let Some(first) = self.errors.first() {
            write!(f, ": {} ({})", first.message, first.code)?;
        }
        Ok(())
    }
}

impl std::error::Error for TaskError {}
