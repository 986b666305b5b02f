//! The secret store boundary

use async_trait::async_trait;
use std::sync::Arc;

use secretgate_core::{RawSecretRecord, SecretRequest, StoreFault};

/// A store answering "get secret value" for a secret in a region.
///
/// Implementations issue exactly one call per invocation and do not
/// interpret faults; classification happens downstream.
#[async_trait]
pub trait SecretStore: Send + Sync {
    async fn get_secret_value(&self, request: &SecretRequest)
        -> Result<RawSecretRecord, StoreFault>;
}

#[async_trait]
impl<T: SecretStore + ?Sized> SecretStore for Arc<T> {
    async fn get_secret_value(
        &self,
        request: &SecretRequest,
    ) -> Result<RawSecretRecord, StoreFault> {
        (**self).get_secret_value(request).await
    }
}
