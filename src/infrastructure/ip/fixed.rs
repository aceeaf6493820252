use async_trait::async_trait;

use crate::core::errors::BackofficeError;
use crate::infrastructure::ip::IpResolver;

/// Always answers with a preconfigured address. Useful in tests and in
/// embeddings with no outbound network access.
#[derive(Clone)]
pub struct FixedIpResolver {
    ip: String,
}

impl FixedIpResolver {
    pub fn new(ip: impl Into<String>) -> Self {
        FixedIpResolver { ip: ip.into() }
    }
}

#[async_trait]
impl IpResolver for FixedIpResolver {
    async fn resolve(&self) -> Result<String, BackofficeError> {
        Ok(self.ip.clone())
    }
}
