//! Integration tests for the AWS Secrets Manager store
//!
//! These tests drive the real AWS SDK client against the stub server.

use std::sync::Arc;

use secretgate_core::{classify, decode, ErrorKind, SecretRequest, SecretResult};
use secretgate_secretsmanager::{AwsSecretStore, MemorySecretStore, SecretStore};
use secretgate_test::StubSecretsManager;

async fn start_stub() -> (StubSecretsManager, AwsSecretStore) {
    let stub = StubSecretsManager::start(Arc::new(MemorySecretStore::new()))
        .await
        .unwrap();
    let store = AwsSecretStore::new(stub.sdk_config().await).with_endpoint_url(stub.url());
    (stub, store)
}

fn request(name: &str, region: &str) -> SecretRequest {
    SecretRequest::new(name, region).unwrap()
}

#[tokio::test]
async fn test_get_string_secret() {
    let (stub, store) = start_stub().await;
    stub.store()
        .put_string("us-east-1", "app/db", r#"{"user":"a","pass":"b"}"#);

    let record = store
        .get_secret_value(&request("app/db", "us-east-1"))
        .await
        .unwrap();

    assert_eq!(
        record.secret_string.as_deref(),
        Some(r#"{"user":"a","pass":"b"}"#)
    );
    assert_eq!(record.secret_binary, None);
}

#[tokio::test]
async fn test_get_binary_secret() {
    let (stub, store) = start_stub().await;
    stub.store().put_binary("us-east-1", "app/cert", b"\x00\x01\x02cert");

    let record = store
        .get_secret_value(&request("app/cert", "us-east-1"))
        .await
        .unwrap();

    assert_eq!(record.secret_string, None);
    assert_eq!(
        decode(record).unwrap(),
        SecretResult::Binary(b"\x00\x01\x02cert".to_vec())
    );
}

#[tokio::test]
async fn test_request_region_is_used() {
    let (stub, store) = start_stub().await;
    stub.store().put_string("ap-southeast-2", "app/db", r#"{"k":"v"}"#);

    let found = store
        .get_secret_value(&request("app/db", "ap-southeast-2"))
        .await;
    assert!(found.is_ok());

    // Same name, other region: not there
    let fault = store
        .get_secret_value(&request("app/db", "us-east-1"))
        .await
        .unwrap_err();
    assert_eq!(fault.code.as_deref(), Some("ResourceNotFoundException"));
}

#[tokio::test]
async fn test_fault_codes_are_classified() {
    let (stub, store) = start_stub().await;
    let cases = [
        ("DecryptionFailureException", ErrorKind::DecryptionFailure),
        ("InternalServiceErrorException", ErrorKind::InternalServiceError),
        ("InvalidParameterException", ErrorKind::InvalidParameter),
        ("InvalidRequestException", ErrorKind::InvalidRequest),
        ("ResourceNotFoundException", ErrorKind::ResourceNotFound),
        ("AccessDeniedException", ErrorKind::Unclassified),
    ];

    for (code, kind) in cases {
        stub.store()
            .fail_with("us-east-1", code, code, format!("injected {code}"));

        let fault = store
            .get_secret_value(&request(code, "us-east-1"))
            .await
            .unwrap_err();
        assert_eq!(fault.code.as_deref(), Some(code));
        assert_eq!(fault.message, format!("injected {code}"));
        assert_eq!(classify(fault).kind(), kind);
    }
}

#[tokio::test]
async fn test_server_errors_are_not_retried() {
    let (stub, store) = start_stub().await;
    stub.store().fail_with(
        "us-east-1",
        "app/flaky",
        "InternalServiceErrorException",
        "try again",
    );

    let result = store
        .get_secret_value(&request("app/flaky", "us-east-1"))
        .await;

    assert!(result.is_err());
    assert_eq!(stub.store().call_count(), 1);
}

#[tokio::test]
async fn test_unreachable_store_is_unclassified() {
    let (stub, _) = start_stub().await;
    let store = AwsSecretStore::new(stub.sdk_config().await).with_endpoint_url("http://127.0.0.1:1");

    let fault = store
        .get_secret_value(&request("app/db", "us-east-1"))
        .await
        .unwrap_err();

    assert_eq!(fault.code, None);
    assert_eq!(classify(fault).kind(), ErrorKind::Unclassified);
}
