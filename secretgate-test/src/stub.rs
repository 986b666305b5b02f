//! HTTP handlers speaking the Secrets Manager JSON protocol

use axum::{
    body::Body,
    extract::State,
    http::{header, HeaderMap, StatusCode},
    response::Response,
};
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, warn};

use secretgate_core::{SecretRequest, StoreFault};
use secretgate_secretsmanager::{MemorySecretStore, SecretStore};

/// Region assumed when a request carries no SigV4 credential scope
pub const DEFAULT_REGION: &str = "us-east-1";

const CONTENT_TYPE: &str = "application/x-amz-json-1.1";

/// Handle Secrets Manager requests based on X-Amz-Target header
pub async fn handle_request(
    State(store): State<Arc<MemorySecretStore>>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let target = headers
        .get("x-amz-target")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");

    info!(target = %target, "Stub Secrets Manager request");

    match target {
        "secretsmanager.GetSecretValue" => {
            let region = headers
                .get(header::AUTHORIZATION)
                .and_then(|v| v.to_str().ok())
                .and_then(credential_scope_region)
                .unwrap_or(DEFAULT_REGION);
            handle_get_secret_value(&store, region, &body).await
        }
        _ => {
            warn!(target = %target, "Unsupported Secrets Manager operation");
            error_response(
                StatusCode::BAD_REQUEST,
                "UnknownOperationException",
                &format!("Unknown operation: {target}"),
            )
        }
    }
}

// === Request/Response types ===

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct GetSecretValueRequest {
    secret_id: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct GetSecretValueResponse {
    #[serde(rename = "ARN")]
    arn: String,
    name: String,
    version_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    secret_string: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    secret_binary: Option<String>,
    version_stages: Vec<String>,
    created_date: f64,
}

// === Handlers ===

async fn handle_get_secret_value(store: &MemorySecretStore, region: &str, body: &[u8]) -> Response {
    let req: GetSecretValueRequest = match serde_json::from_slice(body) {
        Ok(r) => r,
        Err(e) => {
            return error_response(
                StatusCode::BAD_REQUEST,
                "ValidationException",
                &e.to_string(),
            )
        }
    };

    let request = match SecretRequest::new(req.secret_id.as_str(), region) {
        Ok(request) => request,
        Err(e) => {
            return error_response(
                StatusCode::BAD_REQUEST,
                "InvalidParameterException",
                &e.to_string(),
            )
        }
    };

    match store.get_secret_value(&request).await {
        Ok(record) => {
            let response = GetSecretValueResponse {
                arn: format!(
                    "arn:aws:secretsmanager:{region}:000000000000:secret:{}-AbCdEf",
                    req.secret_id
                ),
                name: req.secret_id,
                version_id: "00000000-0000-0000-0000-000000000001".to_string(),
                secret_string: record.secret_string,
                secret_binary: record.secret_binary,
                version_stages: vec!["AWSCURRENT".to_string()],
                created_date: 1_700_000_000.0,
            };
            json_response(StatusCode::OK, &response)
        }
        Err(fault) => fault_response(&fault),
    }
}

// === Helpers ===

/// Region from a SigV4 header: `AWS4-HMAC-SHA256 Credential=AKID/DATE/REGION/SERVICE/aws4_request, ...`
fn credential_scope_region(authorization: &str) -> Option<&str> {
    let (_, components) = authorization.split_once(' ')?;
    let credential = components
        .split(',')
        .map(str::trim)
        .find_map(|component| component.strip_prefix("Credential="))?;

    let parts: Vec<&str> = credential.split('/').collect();
    if parts.len() != 5 {
        return None;
    }
    Some(parts[2])
}

fn fault_response(fault: &StoreFault) -> Response {
    let code = fault.code.as_deref().unwrap_or("InternalFailure");
    let status = if code == "InternalServiceErrorException" {
        StatusCode::INTERNAL_SERVER_ERROR
    } else {
        StatusCode::BAD_REQUEST
    };
    error_response(status, code, &fault.message)
}

fn json_response<T: Serialize>(status: StatusCode, body: &T) -> Response {
    match serde_json::to_string(body) {
        Ok(body) => Response::builder()
            .status(status)
            .header(header::CONTENT_TYPE, CONTENT_TYPE)
            .body(Body::from(body))
            .unwrap_or_default(),
        Err(e) => error_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            "InternalServiceErrorException",
            &e.to_string(),
        ),
    }
}

fn error_response(status: StatusCode, error_type: &str, message: &str) -> Response {
    let body = serde_json::json!({
        "__type": error_type,
        "message": message
    });
    Response::builder()
        .status(status)
        .header(header::CONTENT_TYPE, CONTENT_TYPE)
        .body(Body::from(body.to_string()))
        .unwrap_or_default()
}
