//! Stub Secrets Manager server management

use aws_config::{BehaviorVersion, SdkConfig};
use aws_sdk_secretsmanager::config::{Credentials, Region};
use axum::{routing::post, Router};
use thiserror::Error;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tracing::info;

use secretgate_secretsmanager::MemorySecretStore;

use crate::stub;

/// A Secrets Manager stub running on an ephemeral local port
pub struct StubSecretsManager {
    base_url: String,
    store: Arc<MemorySecretStore>,
    handle: JoinHandle<()>,
}

impl StubSecretsManager {
    /// Start serving `store` on 127.0.0.1 with a random available port
    pub async fn start(store: Arc<MemorySecretStore>) -> Result<Self, TestError> {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .map_err(TestError::StartFailed)?;
        let addr = listener
            .local_addr()
            .map_err(TestError::StartFailed)?;

        let router = Router::new()
            .route("/", post(stub::handle_request))
            .with_state(store.clone());

        let handle = tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, router).await {
                tracing::error!(error = %e, "Stub Secrets Manager stopped");
            }
        });

        info!(port = addr.port(), "Stub Secrets Manager ready");

        Ok(Self {
            base_url: format!("http://{addr}"),
            store,
            handle,
        })
    }

    /// Get the base URL
    pub fn url(&self) -> &str {
        &self.base_url
    }

    /// The secrets served by the stub
    pub fn store(&self) -> &MemorySecretStore {
        &self.store
    }

    /// Shared AWS configuration with static test credentials.
    ///
    /// The endpoint is not set here; point clients at [`Self::url`].
    pub async fn sdk_config(&self) -> SdkConfig {
        aws_config::defaults(BehaviorVersion::latest())
            .credentials_provider(Credentials::new(
                "test",
                "test",
                None,
                None,
                "secretgate-test",
            ))
            .region(Region::new(crate::stub::DEFAULT_REGION))
            .load()
            .await
    }
}

impl Drop for StubSecretsManager {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Errors that can occur with the stub server
#[derive(Debug, Error)]
pub enum TestError {
    #[error("failed to start stub server: {0}")]
    StartFailed(#[source] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_start_failure_keeps_io_error_as_source() {
        let err = TestError::StartFailed(std::io::Error::new(
            std::io::ErrorKind::AddrInUse,
            "address in use",
        ));

        assert_eq!(
            err.to_string(),
            "failed to start stub server: address in use"
        );
        assert!(err.source().is_some());
    }

    #[tokio::test]
    async fn test_start_serves_on_loopback() {
        let stub = StubSecretsManager::start(Arc::new(MemorySecretStore::new()))
            .await
            .unwrap();

        assert!(stub.url().starts_with("http://127.0.0.1:"));
    }
}
