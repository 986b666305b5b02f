//! Request handler: validate, retrieve, format

use std::backtrace::Backtrace;
use std::error::Error;
use tracing::{error, info, info_span, Instrument};

use secretgate_core::{
    classify, decode, format_response, GatewayError, ProxyResponse, RequestId, SecretRequest,
};
use secretgate_secretsmanager::SecretStore;

use crate::event::GatewayEvent;

/// Status code of a successful retrieval
pub const SUCCESS_STATUS: u16 = 200;

/// Serves secret retrieval requests against a [`SecretStore`]
pub struct SecretGateway<S> {
    store: S,
}

impl<S: SecretStore> SecretGateway<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Handle one event under a freshly generated request ID
    pub async fn handle(&self, event: &GatewayEvent) -> ProxyResponse {
        self.handle_invocation(&RequestId::new(), event).await
    }

    /// Handle one event. Never fails: every error becomes the invalid-request response.
    pub async fn handle_invocation(
        &self,
        request_id: &RequestId,
        event: &GatewayEvent,
    ) -> ProxyResponse {
        let span = info_span!(
            "invocation",
            request_id = %request_id,
            route = event.route().unwrap_or_default()
        );

        async {
            let request = match validate(event) {
                Ok(request) => request,
                Err(err) => {
                    info!(error = %err, "Rejected request");
                    return ProxyResponse::invalid_request();
                }
            };

            match self.retrieve(&request).await {
                Ok(response) => {
                    info!(status = response.status_code, "Execution status: success");
                    response
                }
                Err(err) => {
                    let report = FailureReport::capture(&err);
                    error!(
                        kind = report.kind,
                        error = %report.chain,
                        backtrace = %report.backtrace,
                        "Unable to process request"
                    );
                    ProxyResponse::invalid_request()
                }
            }
        }
        .instrument(span)
        .await
    }

    /// Retrieval pipeline: store call, decode, format
    pub async fn retrieve(&self, request: &SecretRequest) -> Result<ProxyResponse, GatewayError> {
        let record = self
            .store
            .get_secret_value(request)
            .await
            .map_err(classify)?;
        let result = decode(record)?;
        format_response(SUCCESS_STATUS, &result)
    }
}

/// Check an event has a recognizable resource and both query parameters
pub fn validate(event: &GatewayEvent) -> Result<SecretRequest, GatewayError> {
    if event.route().is_none() {
        return Err(GatewayError::Validation(
            "missing or unrecognized resource path".to_string(),
        ));
    }
    let params = event
        .query_params()
        .ok_or_else(|| GatewayError::Validation("no query parameters".to_string()))?;
    SecretRequest::from_query(params)
}

/// What gets logged when the retrieval pipeline fails
struct FailureReport {
    kind: Option<&'static str>,
    chain: String,
    /// Empty unless RUST_BACKTRACE or RUST_LIB_BACKTRACE is set
    backtrace: Backtrace,
}

impl FailureReport {
    fn capture(err: &GatewayError) -> Self {
        Self {
            kind: err.error_kind().map(|kind| kind.as_str()),
            chain: error_chain(err),
            backtrace: Backtrace::capture(),
        }
    }
}

/// Render an error with its whole source chain
fn error_chain(err: &(dyn Error + 'static)) -> String {
    std::iter::successors(Some(err), |err| err.source())
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(": ")
}
