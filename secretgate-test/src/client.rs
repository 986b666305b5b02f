//! Client for calling a running secretgate development server

use reqwest::Client;
use serde_json::Value;
use std::collections::HashMap;
use thiserror::Error;

/// An HTTP response from the gateway
#[derive(Debug, Clone)]
pub struct GatewayReply {
    pub status: u16,
    pub headers: HashMap<String, String>,
    pub body: String,
}

impl GatewayReply {
    /// Parse the body as JSON
    pub fn json(&self) -> Result<Value, ClientError> {
        serde_json::from_str(&self.body).map_err(ClientError::InvalidJson)
    }
}

/// Client for the secretgate development server
pub struct GatewayClient {
    base_url: String,
    client: Client,
}

impl GatewayClient {
    /// Create a new client
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientError> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()?;

        Ok(Self {
            base_url: base_url.into(),
            client,
        })
    }

    /// GET `path` with the given query parameters
    pub async fn get(&self, path: &str, query: &[(&str, &str)]) -> Result<GatewayReply, ClientError> {
        let url = format!("{}{}", self.base_url, path);
        let response = self.client.get(&url).query(query).send().await?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|value| (name.as_str().to_string(), value.to_string()))
            })
            .collect();
        let body = response.text().await?;

        Ok(GatewayReply {
            status,
            headers,
            body,
        })
    }

    /// Fetch a secret through the gateway
    pub async fn get_secret(
        &self,
        secret_name: &str,
        region_name: &str,
    ) -> Result<GatewayReply, ClientError> {
        self.get(
            "/secret",
            &[("secret_name", secret_name), ("region_name", region_name)],
        )
        .await
    }
}

/// Client errors
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("request to gateway failed")]
    Request(#[from] reqwest::Error),
    #[error("gateway reply is not valid JSON")]
    InvalidJson(#[source] serde_json::Error),
}
