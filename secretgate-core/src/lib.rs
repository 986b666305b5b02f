//! Core types for secretgate
//!
//! This crate holds the request and response model of the gateway, the
//! secret store failure taxonomy, and the secret payload decoder.

pub mod error;
pub mod request;
pub mod request_id;
pub mod response;
pub mod secret;

pub use error::{classify, ClassifiedError, ErrorKind, GatewayError, StoreFault};
pub use request::SecretRequest;
pub use request_id::RequestId;
pub use response::{format_response, ProxyHeaders, ProxyResponse};
pub use secret::{decode, RawSecretRecord, SecretResult};
