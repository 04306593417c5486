use serde::{Deserialize, Serialize};
use shared::numeric_id;

use std::fmt::Display;

numeric_id! { BranchId }
numeric_id! { ExchangeRateId }

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OperationType {
    Buy,
    Sell,
}

impl Display for OperationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OperationType::Buy => write!(f, "buy"),
            OperationType::Sell => write!(f, "sell"),
        }
    }
}

/// Body of the amount calculation request. `amount` is the foreign amount as text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingRequest {
    pub branch_id: BranchId,
    pub exchange_rate_id: ExchangeRateId,
    pub amount: String,
    pub operation_type: OperationType,
    pub is_rate_locked: bool,
}
