use crate::core::errors::BackofficeError;
use async_trait::async_trait;

/// Best-effort resolution of the client's public IP address.
#[async_trait]
pub trait IpResolver: Send + Sync {
    async fn resolve(&self) -> Result<String, BackofficeError>;
}

pub mod fixed;
pub mod http;
