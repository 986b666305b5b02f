//! Local development server
//!
//! Serves the gateway over plain HTTP, the way API Gateway would invoke it:
//! the request path becomes the event resource and the query string becomes
//! the query parameters.

use axum::{
    body::Body,
    extract::{Query, State},
    http::{header, StatusCode, Uri},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;

use secretgate_core::ProxyResponse;
use secretgate_secretsmanager::SecretStore;

use crate::event::GatewayEvent;
use crate::handler::SecretGateway;

/// Create the development router
pub fn create_router<S: SecretStore + 'static>(gateway: Arc<SecretGateway<S>>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .fallback(handle_gateway::<S>)
        .layer(TraceLayer::new_for_http())
        .with_state(gateway)
}

/// Bind `addr` and serve until the process exits
pub async fn serve<S: SecretStore + 'static>(
    gateway: Arc<SecretGateway<S>>,
    addr: SocketAddr,
) -> std::io::Result<()> {
    let listener = TcpListener::bind(addr).await?;
    info!("Listening on http://{}", listener.local_addr()?);
    axum::serve(listener, create_router(gateway)).await
}

async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, r#"{"status":"running"}"#)
}

async fn handle_gateway<S: SecretStore + 'static>(
    State(gateway): State<Arc<SecretGateway<S>>>,
    uri: Uri,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    let event = GatewayEvent {
        resource: Some(uri.path().to_string()),
        query_string_parameters: Some(params),
    };
    into_http(gateway.handle(&event).await)
}

/// Convert a proxy response into the HTTP response API Gateway would send
pub fn into_http(proxy: ProxyResponse) -> Response {
    let headers = &proxy.headers;
    let status = StatusCode::from_u16(proxy.status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

    Response::builder()
        .status(status)
        .header(header::CONTENT_TYPE, headers.content_type.as_str())
        .header(header::ACCESS_CONTROL_ALLOW_ORIGIN, headers.allow_origin.as_str())
        .header(
            header::ACCESS_CONTROL_ALLOW_CREDENTIALS,
            headers.allow_credentials.to_string(),
        )
        .body(Body::from(proxy.body))
        .unwrap_or_else(|_| StatusCode::INTERNAL_SERVER_ERROR.into_response())
}
