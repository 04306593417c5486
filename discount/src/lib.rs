#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![cfg_attr(feature = "fail-on-warnings", deny(clippy::all))]

mod calculator;
pub mod currency;
mod debounce;
mod session;
mod traits;

pub use calculator::*;
pub use debounce::*;
pub use session::*;
pub use traits::*;

pub use pricing_client::{
    BranchId, ExchangeRateId, OperationType, PricingClient, PricingClientConfig,
    PricingClientError, PricingRequest, PricingResponse,
};
