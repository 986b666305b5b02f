//! API gateway proxy responses

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::GatewayError;
use crate::secret::SecretResult;

/// Message carried by the invalid-request body
pub const INVALID_REQUEST_MESSAGE: &str = "Invalid Request";

/// Status code of the invalid-request response
pub const INVALID_REQUEST_STATUS: u16 = 404;

/// The fixed header set attached to every response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProxyHeaders {
    #[serde(rename = "Content-Type")]
    pub content_type: String,
    #[serde(rename = "Access-Control-Allow-Origin")]
    pub allow_origin: String,
    #[serde(rename = "Access-Control-Allow-Credentials")]
    pub allow_credentials: bool,
}

impl Default for ProxyHeaders {
    fn default() -> Self {
        Self {
            content_type: "application/json".to_string(),
            allow_origin: "*".to_string(),
            allow_credentials: true,
        }
    }
}

/// Proxy-integration response handed back to the gateway
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProxyResponse {
    pub status_code: u16,
    /// JSON-encoded body
    pub body: String,
    pub headers: ProxyHeaders,
    pub is_base64_encoded: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SuccessBody<'a> {
    status_code: u16,
    result: &'a Value,
}

#[derive(Serialize)]
struct ErrorBody {
    result: ErrorResult,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ErrorResult {
    err_message: &'static str,
}

impl ProxyResponse {
    fn with_body(status_code: u16, body: String) -> Self {
        Self {
            status_code,
            body,
            headers: ProxyHeaders::default(),
            is_base64_encoded: false,
        }
    }

    /// The fixed 404 response for requests that cannot be served
    pub fn invalid_request() -> Self {
        let body = ErrorBody {
            result: ErrorResult {
                err_message: INVALID_REQUEST_MESSAGE,
            },
        };
        let body = serde_json::to_string(&body).unwrap_or_else(|_| {
            format!(r#"{{"result":{{"errMessage":"{INVALID_REQUEST_MESSAGE}"}}}}"#)
        });
        Self::with_body(INVALID_REQUEST_STATUS, body)
    }
}

/// Format a retrieved secret as a proxy response.
///
/// Structured secrets are returned as stored, whatever their JSON type.
/// Binary secrets are not surfaced: their result is an empty object.
pub fn format_response(
    status_code: u16,
    result: &SecretResult,
) -> Result<ProxyResponse, GatewayError> {
    let empty = Value::Object(Map::new());
    let result = match result {
        SecretResult::Structured(value) => value,
        SecretResult::Binary(_) => &empty,
    };

    let body = serde_json::to_string(&SuccessBody {
        status_code,
        result,
    })
    .map_err(GatewayError::Serialization)?;

    Ok(ProxyResponse::with_body(status_code, body))
}
