//! In-memory secret store, scoped by region

use async_trait::async_trait;
use base64::Engine;
use dashmap::DashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use secretgate_core::{RawSecretRecord, SecretRequest, StoreFault};

use crate::store::SecretStore;

/// Key for a secret within a region
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct RegionSecretKey {
    region: String,
    secret_name: String,
}

impl RegionSecretKey {
    fn new(region: impl Into<String>, secret_name: impl Into<String>) -> Self {
        Self {
            region: region.into(),
            secret_name: secret_name.into(),
        }
    }
}

#[derive(Debug, Clone)]
enum Entry {
    /// A stored secret value
    Value(RawSecretRecord),
    /// A fault to raise whenever the secret is read
    Fault { code: String, message: String },
}

/// Thread-safe in-memory secrets, with fault injection
#[derive(Debug, Default)]
pub struct MemorySecretStore {
    /// Secrets indexed by region and name
    secrets: DashMap<RegionSecretKey, Entry>,
    /// Number of GetSecretValue calls served
    calls: AtomicUsize,
}

impl MemorySecretStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a string secret
    pub fn put_string(&self, region: &str, secret_name: &str, value: impl Into<String>) {
        self.secrets.insert(
            RegionSecretKey::new(region, secret_name),
            Entry::Value(RawSecretRecord::string(value)),
        );
    }

    /// Store a binary secret
    pub fn put_binary(&self, region: &str, secret_name: &str, value: &[u8]) {
        let encoded = base64::engine::general_purpose::STANDARD.encode(value);
        self.secrets.insert(
            RegionSecretKey::new(region, secret_name),
            Entry::Value(RawSecretRecord::binary(encoded)),
        );
    }

    /// Store a record as-is, including records with no payload
    pub fn put_record(&self, region: &str, secret_name: &str, record: RawSecretRecord) {
        self.secrets
            .insert(RegionSecretKey::new(region, secret_name), Entry::Value(record));
    }

    /// Make reads of a secret fail with the given store error code
    pub fn fail_with(
        &self,
        region: &str,
        secret_name: &str,
        code: impl Into<String>,
        message: impl Into<String>,
    ) {
        self.secrets.insert(
            RegionSecretKey::new(region, secret_name),
            Entry::Fault {
                code: code.into(),
                message: message.into(),
            },
        );
    }

    /// Look up a secret without counting the call
    fn lookup(&self, region: &str, secret_name: &str) -> Result<RawSecretRecord, StoreFault> {
        let key = RegionSecretKey::new(region, secret_name);
        match self.secrets.get(&key).map(|entry| entry.value().clone()) {
            Some(Entry::Value(record)) => Ok(record),
            Some(Entry::Fault { code, message }) => Err(StoreFault::new(code, message)),
            None => Err(StoreFault::new(
                "ResourceNotFoundException",
                format!("Secrets Manager can't find the specified secret: {secret_name}"),
            )),
        }
    }

    /// Number of GetSecretValue calls served so far
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SecretStore for MemorySecretStore {
    async fn get_secret_value(
        &self,
        request: &SecretRequest,
    ) -> Result<RawSecretRecord, StoreFault> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.lookup(request.region(), request.secret_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(name: &str, region: &str) -> SecretRequest {
        SecretRequest::new(name, region).unwrap()
    }

    #[tokio::test]
    async fn test_put_and_get_secret() {
        let store = MemorySecretStore::new();
        store.put_string("us-east-1", "my-secret", r#"{"user":"a"}"#);

        let record = store
            .get_secret_value(&request("my-secret", "us-east-1"))
            .await
            .unwrap();

        assert_eq!(record.secret_string.as_deref(), Some(r#"{"user":"a"}"#));
        assert_eq!(record.secret_binary, None);
        assert_eq!(store.call_count(), 1);
    }

    #[tokio::test]
    async fn test_secrets_are_region_scoped() {
        let store = MemorySecretStore::new();
        store.put_string("us-east-1", "my-secret", "{}");

        let fault = store
            .get_secret_value(&request("my-secret", "us-west-2"))
            .await
            .unwrap_err();
        assert_eq!(fault.code.as_deref(), Some("ResourceNotFoundException"));
    }

    #[test]
    fn test_binary_secret_is_base64_encoded() {
        let store = MemorySecretStore::new();
        store.put_binary("us-east-1", "cert", b"hello");

        let record = store.lookup("us-east-1", "cert").unwrap();
        assert_eq!(record.secret_binary.as_deref(), Some("aGVsbG8="));
        assert_eq!(store.call_count(), 0);
    }

    #[tokio::test]
    async fn test_injected_fault() {
        let store = MemorySecretStore::new();
        store.fail_with(
            "us-east-1",
            "locked",
            "DecryptionFailureException",
            "KMS key unavailable",
        );

        let fault = store
            .get_secret_value(&request("locked", "us-east-1"))
            .await
            .unwrap_err();
        assert_eq!(fault.code.as_deref(), Some("DecryptionFailureException"));
        assert_eq!(fault.message, "KMS key unavailable");
    }
}
