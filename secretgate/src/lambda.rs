//! Lambda runtime integration

use lambda_runtime::{service_fn, Error, LambdaEvent};
use serde_json::Value;
use std::sync::Arc;
use tracing::warn;

use secretgate_core::{ProxyResponse, RequestId};
use secretgate_secretsmanager::SecretStore;

use crate::event::GatewayEvent;
use crate::handler::SecretGateway;

/// Handle one raw invocation payload.
///
/// A payload that is not a recognizable proxy event gets the invalid-request
/// response like any other unusable request.
pub async fn invoke<S: SecretStore>(
    gateway: &SecretGateway<S>,
    request_id: &RequestId,
    payload: Value,
) -> ProxyResponse {
    match serde_json::from_value::<GatewayEvent>(payload) {
        Ok(event) => gateway.handle_invocation(request_id, &event).await,
        Err(err) => {
            warn!(request_id = %request_id, error = %err, "Unrecognized event payload");
            ProxyResponse::invalid_request()
        }
    }
}

/// Run the Lambda runtime loop until the environment shuts down
pub async fn run<S: SecretStore + 'static>(gateway: Arc<SecretGateway<S>>) -> Result<(), Error> {
    lambda_runtime::run(service_fn(move |event: LambdaEvent<Value>| {
        let gateway = gateway.clone();
        async move {
            let request_id = RequestId::with_id(event.context.request_id.clone());
            Ok::<_, Error>(invoke(&gateway, &request_id, event.payload).await)
        }
    }))
    .await
}
