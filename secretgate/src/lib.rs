//! secretgate - request-scoped secret retrieval for API Gateway
//!
//! Validates an API Gateway proxy event, fetches the named secret from AWS
//! Secrets Manager in the requested region, and answers with a fixed-shape
//! proxy response whatever the outcome.

pub mod config;
pub mod event;
pub mod handler;
pub mod lambda;
pub mod server;
pub mod telemetry;

pub use config::{Config, LogFormat};
pub use event::GatewayEvent;
pub use handler::SecretGateway;
