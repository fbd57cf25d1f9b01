use std::{error::Error as StdError, sync::Arc};

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FetchErrorKind {
    RateLimited,
    Unauthorized,
    NetworkUnreachable,
    Unknown,
}

impl FetchErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FetchErrorKind::RateLimited => "rate_limited",
            FetchErrorKind::Unauthorized => "unauthorized",
            FetchErrorKind::NetworkUnreachable => "network_unreachable",
            FetchErrorKind::Unknown => "unknown",
        }
    }
}

/// Categorized failure of a page fetch.
///
/// The set is closed so callers can match exhaustively. Everything that is
/// not one of the recognized transport or API conditions lands in
/// [`FetchError::Unknown`] with its original message and cause preserved.
#[derive(Debug, Clone, Error)]
pub enum FetchError {
    #[error("photo API rate limit exceeded")]
    RateLimited,
    #[error("photo API rejected the access key")]
    Unauthorized,
    #[error("photo API is unreachable")]
    NetworkUnreachable,
    #[error("{message}")]
    Unknown {
        message: String,
        #[source]
        source: Option<Arc<dyn StdError + Send + Sync + 'static>>,
    },
}

impl FetchError {
    pub fn unknown(message: impl Into<String>) -> Self {
        FetchError::Unknown {
            message: message.into(),
            source: None,
        }
    }

    pub fn unknown_with_source(
        message: impl Into<String>,
        source: impl StdError + Send + Sync + 'static,
    ) -> Self {
        FetchError::Unknown {
            message: message.into(),
            source: Some(Arc::new(source)),
        }
    }

    pub fn kind(&self) -> FetchErrorKind {
        match self {
            FetchError::RateLimited => FetchErrorKind::RateLimited,
            FetchError::Unauthorized => FetchErrorKind::Unauthorized,
            FetchError::NetworkUnreachable => FetchErrorKind::NetworkUnreachable,
            FetchError::Unknown { .. } => FetchErrorKind::Unknown,
        }
    }

    /// Text suitable for showing next to an empty or partial gallery.
    pub fn user_message(&self) -> String {
        match self {
            FetchError::RateLimited => {
                "Too many requests to the photo service; wait a moment and try again.".to_string()
            }
            FetchError::Unauthorized => {
                "The photo service rejected the access key; check your configuration.".to_string()
            }
            FetchError::NetworkUnreachable => {
                "Photo service unreachable; check your network connection and retry.".to_string()
            }
            FetchError::Unknown { message, .. } => format!("Could not load photos: {message}"),
        }
    }
}

/// Equality ignores the attached cause; two `Unknown` errors match when their
/// messages do.
impl PartialEq for FetchError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (
                FetchError::Unknown { message: left, .. },
                FetchError::Unknown { message: right, .. },
            ) => left == right,
            (left, right) => left.kind() == right.kind(),
        }
    }
}

impl From<anyhow::Error> for FetchError {
    fn from(err: anyhow::Error) -> Self {
        match err.downcast::<FetchError>() {
            Ok(categorized) => categorized,
            Err(other) => {
                let message = format!("{other:#}");
                let source: Box<dyn StdError + Send + Sync + 'static> = other.into();
                FetchError::Unknown {
                    message,
                    source: Some(Arc::from(source)),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use anyhow::{anyhow, Context};

    use super::*;

    #[test]
    fn generic_errors_become_unknown_with_message_and_cause() {
        let err: FetchError = anyhow!("socket exploded").into();
        assert_eq!(err.kind(), FetchErrorKind::Unknown);
        assert_eq!(err.to_string(), "socket exploded");
        assert!(err.source().is_some());
    }

    #[test]
    fn wrapped_categorized_errors_keep_their_variant() {
        let err: FetchError = anyhow::Error::new(FetchError::RateLimited).into();
        assert_eq!(err.kind(), FetchErrorKind::RateLimited);
    }

    #[test]
    fn context_chain_is_preserved_in_unknown_message() {
        let result: anyhow::Result<()> = Err(anyhow!("disk full")).context("while caching page");
        let err: FetchError = result.expect_err("error").into();
        assert_eq!(err.to_string(), "while caching page: disk full");
    }

    #[test]
    fn kinds_serialize_as_snake_case() {
        let encoded = serde_json::to_string(&FetchErrorKind::NetworkUnreachable).expect("json");
        assert_eq!(encoded, "\"network_unreachable\"");
        assert_eq!(FetchErrorKind::RateLimited.as_str(), "rate_limited");
    }
}
