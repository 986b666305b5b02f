//! Test utilities for secretgate
//!
//! Provides utilities for integration testing:
//! - A stub Secrets Manager speaking the AWS JSON protocol, so the real SDK
//!   client can be exercised without AWS
//! - A client for the secretgate development server
//!
//! ## Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use secretgate_secretsmanager::{AwsSecretStore, MemorySecretStore};
//! use secretgate_test::StubSecretsManager;
//!
//! #[tokio::test]
//! async fn test_fetch() {
//!     let stub = StubSecretsManager::start(Arc::new(MemorySecretStore::new()))
//!         .await
//!         .unwrap();
//!     stub.store().put_string("us-east-1", "app/db", r#"{"user":"a"}"#);
//!
//!     let store = AwsSecretStore::new(stub.sdk_config().await).with_endpoint_url(stub.url());
//! }
//! ```

pub mod client;
pub mod server;
pub mod stub;

pub use client::{ClientError, GatewayClient, GatewayReply};
pub use server::{StubSecretsManager, TestError};
