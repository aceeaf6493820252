use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use crate::config::CONFIG;
use crate::core::errors::BackofficeError;
use crate::infrastructure::ip::IpResolver;

#[derive(Deserialize)]
struct IpEchoResponse {
    ip: String,
}

/// Resolves the public IP through an external JSON echo endpoint.
#[derive(Clone)]
pub struct HttpIpResolver {
    http: reqwest::Client,
    endpoint: String,
}

impl HttpIpResolver {
    pub fn new() -> Self {
        Self::with_endpoint(CONFIG.ip_echo_url.clone())
    }

    pub fn with_endpoint(endpoint: impl Into<String>) -> Self {
        HttpIpResolver {
            http: reqwest::Client::new(),
            endpoint: endpoint.into(),
        }
    }
}

#[async_trait]
impl IpResolver for HttpIpResolver {
    async fn resolve(&self) -> Result<String, BackofficeError> {
        let response = self
            .http
            .get(&self.endpoint)
            .send()
            .await
            .map_err(|e| BackofficeError::NetworkError(e.to_string()))?;
        let echo: IpEchoResponse = response
            .json()
            .await
            .map_err(|e| BackofficeError::NetworkError(e.to_string()))?;
        debug!(ip = %echo.ip, "resolved client ip");
        Ok(echo.ip)
    }
}
