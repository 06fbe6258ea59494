use serde::{Deserialize, Serialize};

/// Outcome class of a response: `fail` is the client's fault, `error` is
/// ours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApiStatus {
    Success,
    Fail,
    Error,
}

/// Uniform body wrapping every API response, success and failure alike.
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiEnvelope<T = serde_json::Value> {
    pub status: ApiStatus,
    pub data: Option<T>,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl<T> ApiEnvelope<T> {
    pub fn success(message: impl Into<String>, data: T) -> Self {
        Self {
            status: ApiStatus::Success,
            data: Some(data),
            message: message.into(),
            details: None,
        }
    }
}

impl ApiEnvelope<serde_json::Value> {
    pub fn success_empty(message: impl Into<String>) -> Self {
        Self {
            status: ApiStatus::Success,
            data: None,
            message: message.into(),
            details: None,
        }
    }

    pub fn fail(message: impl Into<String>, details: Option<serde_json::Value>) -> Self {
        Self {
            status: ApiStatus::Fail,
            data: None,
            message: message.into(),
            details,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: ApiStatus::Error,
            data: None,
            message: message.into(),
            details: None,
        }
    }
}
