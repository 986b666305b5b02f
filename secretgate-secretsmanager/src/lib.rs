//! Secret store access for secretgate
//!
//! Provides the [`SecretStore`] boundary with two implementations:
//! - [`AwsSecretStore`], calling AWS Secrets Manager GetSecretValue
//! - [`MemorySecretStore`], an in-memory store with fault injection

pub mod aws;
pub mod memory;
pub mod store;

pub use aws::AwsSecretStore;
pub use memory::MemorySecretStore;
pub use store::SecretStore;
