mod config;
mod error;
mod pricing_response;
mod primitives;

use reqwest::{
    header::{HeaderMap, HeaderValue, AUTHORIZATION},
    Client as ReqwestClient, Response,
};
use serde::de::DeserializeOwned;
use shared::tracing::record_error;
use tracing::instrument;
use url::Url;

pub use config::*;
pub use error::*;
pub use pricing_response::*;
pub use primitives::*;

#[derive(Clone, Debug)]
pub struct PricingClient {
    client: ReqwestClient,
    endpoint: Url,
}

impl PricingClient {
    pub fn new(config: PricingClientConfig) -> Result<Self, PricingClientError> {
        let mut headers = HeaderMap::new();
        if let Some(token) = config.auth_token.as_ref() {
            let mut value = HeaderValue::from_str(&format!("Bearer {token}"))?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }

        let client = ReqwestClient::builder()
            .use_rustls_tls()
            .timeout(config.timeout)
            .default_headers(headers)
            .build()?;
        let endpoint = endpoint(config.url, &config.path)?;

        Ok(Self { client, endpoint })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    #[instrument(
        name = "pricing_client.request_pricing",
        skip(self, request),
        fields(
            branch_id = %request.branch_id,
            exchange_rate_id = %request.exchange_rate_id,
            operation_type = %request.operation_type,
            amount = %request.amount,
            error,
            error.message,
        )
    )]
    pub async fn request_pricing(
        &self,
        request: &PricingRequest,
    ) -> Result<PricingResponse, PricingClientError> {
        let result = record_error(|| async move {
            let response = self
                .client
                .post(self.endpoint.clone())
                .json(request)
                .send()
                .await?;

            Self::extract_response_data::<PricingResponse>(response).await
        })
        .await;
        if let Err(ref e) = result {
            tracing::warn!(error.message = %e, "pricing request failed");
        }
        result
    }

    async fn extract_response_data<T: DeserializeOwned>(
        response: Response,
    ) -> Result<T, PricingClientError> {
        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(PricingClientError::UnexpectedResponse {
                status: status.as_u16(),
                body,
            });
        }

        Ok(serde_json::from_str::<T>(&body)?)
    }
}

/// Appends `path` to whatever path `url` already carries.
fn endpoint(mut base: Url, path: &str) -> Result<Url, PricingClientError> {
    base.path_segments_mut()
        .map_err(|_| PricingClientError::InvalidUrl(url::ParseError::RelativeUrlWithCannotBeABaseBase))?
        .pop_if_empty()
        .extend(path.split('/').filter(|segment| !segment.is_empty()));
    Ok(base)
}
