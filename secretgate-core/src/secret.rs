//! Secret payloads as returned by the store, and their decoding

use base64::Engine;
use serde_json::Value;
use std::fmt;

use crate::error::GatewayError;

/// The store's raw reply to a successful GetSecretValue call
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawSecretRecord {
    /// Secret string value, expected to hold a JSON document
    pub secret_string: Option<String>,
    /// Secret binary value (base64 encoded)
    pub secret_binary: Option<String>,
}

impl RawSecretRecord {
    pub fn string(value: impl Into<String>) -> Self {
        Self {
            secret_string: Some(value.into()),
            secret_binary: None,
        }
    }

    pub fn binary(encoded: impl Into<String>) -> Self {
        Self {
            secret_string: None,
            secret_binary: Some(encoded.into()),
        }
    }
}

/// A decoded secret
#[derive(Clone, PartialEq)]
pub enum SecretResult {
    /// Any JSON document, usually an object of key/value pairs
    Structured(Value),
    Binary(Vec<u8>),
}

impl fmt::Debug for SecretResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Structured(value) => f
                .debug_struct("Structured")
                .field("kind", &json_kind(value))
                .finish(),
            Self::Binary(bytes) => f.debug_struct("Binary").field("len", &bytes.len()).finish(),
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Decode a raw record. The string payload wins when both are present.
pub fn decode(record: RawSecretRecord) -> Result<SecretResult, GatewayError> {
    if let Some(text) = record.secret_string {
        let value: Value =
            serde_json::from_str(&text).map_err(GatewayError::MalformedSecretPayload)?;
        return Ok(SecretResult::Structured(value));
    }

    if let Some(encoded) = record.secret_binary {
        let bytes = base64::engine::general_purpose::STANDARD
            .decode(encoded.trim())
            .map_err(GatewayError::MalformedBinarySecret)?;
        return Ok(SecretResult::Binary(bytes));
    }

    Err(GatewayError::EmptySecretPayload)
}
