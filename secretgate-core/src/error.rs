//! Secret store failure taxonomy and gateway errors

use std::fmt;
use thiserror::Error;
use tracing::warn;

/// Classification of secret store failure codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The store could not decrypt the secret with its KMS key
    DecryptionFailure,
    /// Server-side failure inside the store
    InternalServiceError,
    /// A parameter value was not valid
    InvalidParameter,
    /// A parameter value is not valid for the current state of the secret
    InvalidRequest,
    /// The secret does not exist
    ResourceNotFound,
    /// Any other code, or no code at all
    Unclassified,
}

impl ErrorKind {
    /// Map a store error code onto a kind
    pub fn from_code(code: Option<&str>) -> Self {
        match code {
            Some("DecryptionFailureException") => Self::DecryptionFailure,
            Some("InternalServiceErrorException") => Self::InternalServiceError,
            Some("InvalidParameterException") => Self::InvalidParameter,
            Some("InvalidRequestException") => Self::InvalidRequest,
            Some("ResourceNotFoundException") => Self::ResourceNotFound,
            _ => Self::Unclassified,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DecryptionFailure => "DecryptionFailureException",
            Self::InternalServiceError => "InternalServiceErrorException",
            Self::InvalidParameter => "InvalidParameterException",
            Self::InvalidRequest => "InvalidRequestException",
            Self::ResourceNotFound => "ResourceNotFoundException",
            Self::Unclassified => "Unclassified",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A failure reported by the secret store, not yet interpreted
#[derive(Debug, Error)]
#[error("{}: {message}", .code.as_deref().unwrap_or("no error code"))]
pub struct StoreFault {
    /// Machine-readable error code, when the store answered with one
    pub code: Option<String>,
    pub message: String,
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl StoreFault {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: Some(code.into()),
            message: message.into(),
            source: None,
        }
    }

    /// A fault raised before the store produced an error code (dispatch, timeout, ...)
    pub fn uncoded(message: impl Into<String>) -> Self {
        Self {
            code: None,
            message: message.into(),
            source: None,
        }
    }

    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }
}

/// A store fault together with its classification
#[derive(Debug, Error)]
#[error("secret store failure ({kind})")]
pub struct ClassifiedError {
    kind: ErrorKind,
    #[source]
    cause: StoreFault,
}

impl ClassifiedError {
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn cause(&self) -> &StoreFault {
        &self.cause
    }
}

/// Classify a store fault by its error code.
///
/// Classification only labels the failure; callers propagate the result
/// unchanged.
pub fn classify(fault: StoreFault) -> ClassifiedError {
    let kind = ErrorKind::from_code(fault.code.as_deref());
    warn!(
        kind = %kind,
        code = fault.code.as_deref().unwrap_or(""),
        message = %fault.message,
        "Secret store call failed"
    );
    ClassifiedError { kind, cause: fault }
}

/// Errors raised by the retrieval pipeline
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("invalid request: {0}")]
    Validation(String),

    #[error(transparent)]
    Store(#[from] ClassifiedError),

    #[error("secret string is not a JSON object")]
    MalformedSecretPayload(#[source] serde_json::Error),

    #[error("secret binary is not valid base64")]
    MalformedBinarySecret(#[source] base64::DecodeError),

    #[error("secret has neither a string nor a binary payload")]
    EmptySecretPayload,

    #[error("failed to encode response body")]
    Serialization(#[source] serde_json::Error),
}

impl GatewayError {
    /// The store failure kind, if this error came from the store
    pub fn error_kind(&self) -> Option<ErrorKind> {
        match self {
            Self::Store(err) => Some(err.kind()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_codes_map_to_kinds() {
        let table = [
            ("DecryptionFailureException", ErrorKind::DecryptionFailure),
            ("InternalServiceErrorException", ErrorKind::InternalServiceError),
            ("InvalidParameterException", ErrorKind::InvalidParameter),
            ("InvalidRequestException", ErrorKind::InvalidRequest),
            ("ResourceNotFoundException", ErrorKind::ResourceNotFound),
        ];

        for (code, kind) in table {
            assert_eq!(ErrorKind::from_code(Some(code)), kind);
            assert_eq!(kind.as_str(), code);
        }
    }

    #[test]
    fn test_unknown_or_missing_code_is_unclassified() {
        assert_eq!(
            ErrorKind::from_code(Some("AccessDeniedException")),
            ErrorKind::Unclassified
        );
        assert_eq!(ErrorKind::from_code(Some("")), ErrorKind::Unclassified);
        assert_eq!(ErrorKind::from_code(None), ErrorKind::Unclassified);
    }

    #[test]
    fn test_classify_keeps_cause() {
        let fault = StoreFault::new("ResourceNotFoundException", "Secret my-secret not found");
        let classified = classify(fault);

        assert_eq!(classified.kind(), ErrorKind::ResourceNotFound);
        assert_eq!(
            classified.cause().code.as_deref(),
            Some("ResourceNotFoundException")
        );
        assert_eq!(classified.cause().message, "Secret my-secret not found");
    }

    #[test]
    fn test_gateway_error_exposes_store_kind() {
        let err: GatewayError = classify(StoreFault::new("DecryptionFailureException", "kms")).into();
        assert_eq!(err.error_kind(), Some(ErrorKind::DecryptionFailure));
        assert_eq!(GatewayError::EmptySecretPayload.error_kind(), None);
    }

    #[test]
    fn test_fault_display() {
        let coded = StoreFault::new("InvalidRequestException", "secret is scheduled for deletion");
        assert_eq!(
            coded.to_string(),
            "InvalidRequestException: secret is scheduled for deletion"
        );

        let uncoded = StoreFault::uncoded("dispatch failure");
        assert_eq!(uncoded.to_string(), "no error code: dispatch failure");
    }
}
