use async_trait::async_trait;

use pricing_client::{PricingClient, PricingClientError, PricingRequest, PricingResponse};

#[async_trait]
pub trait PricingProvider: Send + Sync + 'static {
    async fn request_pricing(
        &self,
        request: &PricingRequest,
    ) -> Result<PricingResponse, PricingClientError>;
}

#[async_trait]
impl PricingProvider for PricingClient {
    async fn request_pricing(
        &self,
        request: &PricingRequest,
    ) -> Result<PricingResponse, PricingClientError> {
        PricingClient::request_pricing(self, request).await
    }
}


#[cfg(test)]
pub use dummy_impls::*;
