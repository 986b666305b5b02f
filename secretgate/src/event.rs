//! Inbound API Gateway proxy events

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// The parts of an API Gateway proxy event the gateway reads
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GatewayEvent {
    /// Resource path, e.g. `/secrets`
    #[serde(default)]
    pub resource: Option<String>,
    #[serde(default)]
    pub query_string_parameters: Option<HashMap<String, String>>,
}

impl GatewayEvent {
    pub fn new(resource: impl Into<String>, params: HashMap<String, String>) -> Self {
        Self {
            resource: Some(resource.into()),
            query_string_parameters: Some(params),
        }
    }

    /// First segment of the resource path, if the path is recognizable
    pub fn route(&self) -> Option<&str> {
        self.resource.as_deref()?.split('/').nth(1)
    }

    /// Query parameters, treating `null` and `{}` alike
    pub fn query_params(&self) -> Option<&HashMap<String, String>> {
        self.query_string_parameters
            .as_ref()
            .filter(|params| !params.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_deserialize_proxy_event() {
        let event: GatewayEvent = serde_json::from_value(json!({
            "resource": "/secrets",
            "path": "/secrets",
            "httpMethod": "GET",
            "queryStringParameters": {
                "secret_name": "prod/db",
                "region_name": "us-east-1"
            },
            "requestContext": {"stage": "prod"}
        }))
        .unwrap();

        assert_eq!(event.route(), Some("secrets"));
        let params = event.query_params().unwrap();
        assert_eq!(params["secret_name"], "prod/db");
        assert_eq!(params["region_name"], "us-east-1");
    }

    #[test]
    fn test_null_query_parameters() {
        let event: GatewayEvent = serde_json::from_value(json!({
            "resource": "/secrets",
            "queryStringParameters": null
        }))
        .unwrap();

        assert!(event.query_params().is_none());
    }

    #[test]
    fn test_route() {
        let event = GatewayEvent::new("/v1/secrets", HashMap::new());
        assert_eq!(event.route(), Some("v1"));

        let event = GatewayEvent::new("secrets", HashMap::new());
        assert_eq!(event.route(), None);

        assert_eq!(GatewayEvent::default().route(), None);
    }
}
