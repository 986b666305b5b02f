//! AWS Secrets Manager client.
//!
//! The process-wide [`SdkConfig`] carries credentials and transport settings.
//! A regional client is built for every call and dropped when the call
//! returns, so nothing tied to one request outlives it.

use async_trait::async_trait;
use aws_config::{BehaviorVersion, SdkConfig};
use aws_sdk_secretsmanager::config::http::HttpResponse;
use aws_sdk_secretsmanager::config::retry::RetryConfig;
use aws_sdk_secretsmanager::config::{Builder as SecretsManagerConfigBuilder, Region};
use aws_sdk_secretsmanager::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};
use aws_sdk_secretsmanager::operation::get_secret_value::GetSecretValueError;
use aws_sdk_secretsmanager::Client as SecretsManagerClient;
use base64::Engine;
use tracing::debug;

use secretgate_core::{RawSecretRecord, SecretRequest, StoreFault};

use crate::store::SecretStore;

/// [`SecretStore`] backed by AWS Secrets Manager
#[derive(Debug, Clone)]
pub struct AwsSecretStore {
    sdk_config: SdkConfig,
    endpoint_url: Option<String>,
}

impl AwsSecretStore {
    pub fn new(sdk_config: SdkConfig) -> Self {
        Self {
            sdk_config,
            endpoint_url: None,
        }
    }

    /// Load the shared configuration from the standard AWS credential chain
    pub async fn from_env() -> Self {
        let sdk_config = aws_config::defaults(BehaviorVersion::latest()).load().await;
        Self::new(sdk_config)
    }

    /// Send requests to a custom endpoint (e.g. LocalStack) instead of AWS
    pub fn with_endpoint_url(mut self, endpoint_url: impl Into<String>) -> Self {
        self.endpoint_url = Some(endpoint_url.into());
        self
    }

    pub fn endpoint_url(&self) -> Option<&str> {
        self.endpoint_url.as_deref()
    }

    /// Build a client bound to `region`.
    ///
    /// SDK retries are disabled: one invocation makes exactly one call.
    fn client_for(&self, region: &str) -> SecretsManagerClient {
        let mut builder = SecretsManagerConfigBuilder::from(&self.sdk_config)
            .region(Region::new(region.to_string()))
            .retry_config(RetryConfig::standard().with_max_attempts(1));
        if let Some(url) = &self.endpoint_url {
            builder = builder.endpoint_url(url);
        }
        SecretsManagerClient::from_conf(builder.build())
    }
}

#[async_trait]
impl SecretStore for AwsSecretStore {
    async fn get_secret_value(
        &self,
        request: &SecretRequest,
    ) -> Result<RawSecretRecord, StoreFault> {
        let client = self.client_for(request.region());

        debug!(
            secret_name = %request.secret_name(),
            region = %request.region(),
            "Calling GetSecretValue"
        );

        let output = client
            .get_secret_value()
            .secret_id(request.secret_name())
            .send()
            .await
            .map_err(store_fault)?;

        Ok(RawSecretRecord {
            secret_string: output.secret_string().map(str::to_owned),
            secret_binary: output
                .secret_binary()
                .map(|blob| base64::engine::general_purpose::STANDARD.encode(blob.as_ref())),
        })
    }
}

fn store_fault(err: SdkError<GetSecretValueError, HttpResponse>) -> StoreFault {
    let fault = match &err {
        SdkError::ServiceError(context) => {
            let service_err = context.err();
            let message = service_err
                .message()
                .map_or_else(|| service_err.to_string(), str::to_owned);
            match service_err.code() {
                Some(code) => StoreFault::new(code, message),
                None => StoreFault::uncoded(message),
            }
        }
        _ => StoreFault::uncoded(DisplayErrorContext(&err).to_string()),
    };
    fault.with_source(err)
}
