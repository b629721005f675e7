//! Error types for the Canvas API client.
//!
//! # Design
//! Remote failures are not classified: every non-2xx response lands in
//! `Http` with the raw status code and body, and the caller decides what a
//! given status means. `remote_messages` offers a best-effort look at the
//! message list Canvas puts in most error bodies.

use serde::Deserialize;

use crate::validation::ValidationError;

/// Errors returned by request building, dispatch and decoding.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The descriptor failed validation; nothing was sent.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The transport could not complete the round-trip.
    #[error("transport failed: {0}")]
    Transport(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// The server answered with a non-2xx status.
    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    Deserialization(#[source] serde_json::Error),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(#[source] serde_json::Error),

    /// A `Link` response header could not be parsed.
    #[error("invalid Link header: {0}")]
    InvalidLinkHeader(String),

    /// A page cursor does not hold an absolute URL.
    #[error("invalid page cursor: {0}")]
    InvalidCursor(String),
}

impl ApiError {
    pub fn transport(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        ApiError::Transport(Box::new(err))
    }

    /// HTTP status of a remote error, if this is one.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Messages from a Canvas error body such as
    /// `{"errors":[{"message":"..."}]}` or `{"message":"..."}`.
    ///
    /// Empty for non-remote errors and for bodies in another shape.
    pub fn remote_messages(&self) -> Vec<String> {
        match self {
            ApiError::Http { body, .. } => serde_json::from_str::<RemoteErrorBody>(body)
                .map(RemoteErrorBody::into_messages)
                .unwrap_or_default(),
            _ => Vec::new(),
        }
    }
}

/// The error envelopes Canvas returns alongside 4xx/5xx statuses.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RemoteErrorBody {
    List { errors: Vec<RemoteErrorMessage> },
    Keyed { errors: serde_json::Map<String, serde_json::Value> },
    Single { message: String },
}

#[derive(Debug, Clone, Deserialize)]
pub struct RemoteErrorMessage {
    pub message: String,
}

impl RemoteErrorBody {
    pub fn into_messages(self) -> Vec<String> {
        match self {
            RemoteErrorBody::List { errors } => errors.into_iter().map(|e| e.message).collect(),
            // Validation failures arrive keyed by attribute:
            // {"errors":{"name":[{"message":"too long"}]}}
            RemoteErrorBody::Keyed { errors } => errors
                .into_iter()
                .flat_map(|(field, value)| {
                    let messages: Vec<String> = value
                        .as_array()
                        .map(|items| {
                            items
                                .iter()
                                .filter_map(|item| item.get("message").and_then(|m| m.as_str()))
                                .map(|m| format!("{field}: {m}"))
                                .collect()
                        })
                        .unwrap_or_default();
                    messages
                })
                .collect(),
            RemoteErrorBody::Single { message } => vec![message],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn http(body: &str) -> ApiError {
        ApiError::Http {
            status: 400,
            body: body.to_string(),
        }
    }

    #[test]
    fn remote_messages_from_error_list() {
        let err = http(r#"{"errors":[{"message":"user not authorized to perform that action"}]}"#);
        assert_eq!(
            err.remote_messages(),
            vec!["user not authorized to perform that action".to_string()]
        );
        assert_eq!(err.status(), Some(400));
    }

    #[test]
    fn remote_messages_from_keyed_errors() {
        let err = http(r#"{"errors":{"name":[{"attribute":"name","message":"too long"}]}}"#);
        assert_eq!(err.remote_messages(), vec!["name: too long".to_string()]);
    }

    #[test]
    fn remote_messages_from_single_message() {
        let err = http(r#"{"message":"Invalid access token."}"#);
        assert_eq!(err.remote_messages(), vec!["Invalid access token.".to_string()]);
    }

    #[test]
    fn remote_messages_empty_for_html_body() {
        assert!(http("<html>oops</html>").remote_messages().is_empty());
        assert!(ApiError::InvalidCursor("x".into()).remote_messages().is_empty());
    }

    #[test]
    fn http_error_display_includes_status_and_body() {
        let err = ApiError::Http {
            status: 500,
            body: "internal error".to_string(),
        };
        assert_eq!(err.to_string(), "HTTP 500: internal error");
    }
}
