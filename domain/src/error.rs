//! Error types for the `domain` layer.
use std::error::Error as StdError;
use std::fmt;

/// Top-level domain error type.
/// Errors in the Domain layer are modeled as a tree structure
/// with `domain::error::Error` as the root type holding a tree of `error_kind`
/// enums that represent the kinds of errors that can occur while producing a
/// sequence. The `source` field is used to hold the original error, if any.
/// `sse` and `web` translate these kinds into log lines and HTTP status codes
/// without needing to know what produced them.
#[derive(Debug)]
pub struct Error {
    pub source: Option<Box<dyn StdError + Send + Sync>>,
    pub error_kind: DomainErrorKind,
}

/// Enum representing the major categories of errors that can occur in the `domain` layer.
#[derive(Debug, PartialEq)]
pub enum DomainErrorKind {
    Internal(InternalErrorKind),
}

/// Enum representing the various kinds of internal errors that can occur in the `domain` layer.
#[derive(Debug, PartialEq)]
pub enum InternalErrorKind {
    /// The subscriber dropped its `Flux` before the producer finished.
    SubscriberGone,
    /// An emitted value could not be encoded for the wire.
    Serialization,
}

impl Error {
    pub fn subscriber_gone() -> Self {
        Error {
            source: None,
            error_kind: DomainErrorKind::Internal(InternalErrorKind::SubscriberGone),
        }
    }

    pub fn is_subscriber_gone(&self) -> bool {
        self.error_kind == DomainErrorKind::Internal(InternalErrorKind::SubscriberGone)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Domain Error: {self:?}")
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn StdError + 'static))
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error {
            source: Some(Box::new(err)),
            error_kind: DomainErrorKind::Internal(InternalErrorKind::Serialization),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subscriber_gone_has_no_source() {
        let err = Error::subscriber_gone();
        assert!(err.is_subscriber_gone());
        assert!(StdError::source(&err).is_none());
    }

    #[test]
    fn test_serde_json_error_becomes_serialization_kind() {
        let json_err = serde_json::from_str::<u32>("not a number").unwrap_err();
        let err: Error = json_err.into();

        assert_eq!(
            err.error_kind,
            DomainErrorKind::Internal(InternalErrorKind::Serialization)
        );
        assert!(StdError::source(&err).is_some());
        assert!(!err.is_subscriber_gone());
    }
}
