use thiserror::Error;

#[derive(Error, Debug)]
pub enum PricingClientError {
    #[error("PricingClientError - Reqwest: {0}")]
    Reqwest(#[from] reqwest::Error),
    #[error("PricingClientError - SerdeJson: {0}")]
    Deserialization(#[from] serde_json::Error),
    #[error("PricingClientError - InvalidHeaderValue: {0}")]
    Header(#[from] reqwest::header::InvalidHeaderValue),
    #[error("PricingClientError - InvalidUrl: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("PricingClientError - UnexpectedResponse: {status} - {body:?}")]
    UnexpectedResponse { status: u16, body: String },
}
