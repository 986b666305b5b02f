//! Validated secret retrieval request

use std::collections::HashMap;

use crate::error::GatewayError;

/// Query parameter carrying the secret identifier
pub const SECRET_NAME_PARAM: &str = "secret_name";
/// Query parameter carrying the store region
pub const REGION_NAME_PARAM: &str = "region_name";

/// A secret identifier and the region of the store holding it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecretRequest {
    secret_name: String,
    region: String,
}

impl SecretRequest {
    pub fn new(
        secret_name: impl Into<String>,
        region: impl Into<String>,
    ) -> Result<Self, GatewayError> {
        let secret_name = secret_name.into();
        let region = region.into();

        if secret_name.trim().is_empty() {
            return Err(GatewayError::Validation(format!(
                "{SECRET_NAME_PARAM} must not be empty"
            )));
        }
        if region.trim().is_empty() {
            return Err(GatewayError::Validation(format!(
                "{REGION_NAME_PARAM} must not be empty"
            )));
        }

        Ok(Self {
            secret_name,
            region,
        })
    }

    /// Build a request from `secret_name` and `region_name` query parameters
    pub fn from_query(params: &HashMap<String, String>) -> Result<Self, GatewayError> {
        let secret_name = params
            .get(SECRET_NAME_PARAM)
            .ok_or_else(|| GatewayError::Validation(format!("missing {SECRET_NAME_PARAM}")))?;
        let region = params
            .get(REGION_NAME_PARAM)
            .ok_or_else(|| GatewayError::Validation(format!("missing {REGION_NAME_PARAM}")))?;

        Self::new(secret_name.as_str(), region.as_str())
    }

    pub fn secret_name(&self) -> &str {
        &self.secret_name
    }

    pub fn region(&self) -> &str {
        &self.region
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn test_from_query() {
        let request = SecretRequest::from_query(&params(&[
            ("secret_name", "prod/db"),
            ("region_name", "eu-west-1"),
            ("unrelated", "ignored"),
        ]))
        .unwrap();

        assert_eq!(request.secret_name(), "prod/db");
        assert_eq!(request.region(), "eu-west-1");
    }

    #[test]
    fn test_missing_parameter_is_rejected() {
        let result = SecretRequest::from_query(&params(&[("secret_name", "prod/db")]));
        assert!(matches!(result, Err(GatewayError::Validation(msg)) if msg.contains("region_name")));

        let result = SecretRequest::from_query(&params(&[("region_name", "eu-west-1")]));
        assert!(matches!(result, Err(GatewayError::Validation(msg)) if msg.contains("secret_name")));
    }

    #[test]
    fn test_empty_parameter_is_rejected() {
        let result = SecretRequest::from_query(&params(&[
            ("secret_name", "  "),
            ("region_name", "eu-west-1"),
        ]));
        assert!(matches!(result, Err(GatewayError::Validation(_))));

        assert!(SecretRequest::new("prod/db", "").is_err());
    }
}
