use rust_decimal::Decimal;
use serde::Serialize;

use crate::currency::*;
use pricing_client::{BranchId, ExchangeRateId, PricingRequest};

/// Supplied by the authentication context.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClientContext {
    pub is_guest: bool,
    pub client_discount_available: bool,
}

/// Whichever field the user is typing into; the other side is derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AmountInput {
    Foreign(ForeignAmount),
    Base(BaseAmount),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingInput {
    pub amount: AmountInput,
    pub mode: TransactionMode,
    pub rate: ExchangeRatePair,
    pub branch_id: Option<BranchId>,
    pub exchange_rate_id: Option<ExchangeRateId>,
    pub is_rate_locked: bool,
    pub client: ClientContext,
}

impl BookingInput {
    pub fn amounts(&self) -> (ForeignAmount, BaseAmount) {
        let converter = CurrencyConverter::new(&self.rate, self.mode);
        match self.amount {
            AmountInput::Foreign(foreign) => (foreign, converter.base_from_foreign(foreign)),
            AmountInput::Base(base) => (converter.foreign_from_base(base), base),
        }
    }

    /// `None` until the amount is positive and branch and rate are both selected.
    pub(super) fn pricing_request(
        &self,
        foreign: ForeignAmount,
        decimal_places: u32,
    ) -> Option<PricingRequest> {
        let foreign = foreign.round(decimal_places);
        if foreign.is_zero() {
            return None;
        }
        Some(PricingRequest {
            branch_id: self.branch_id?,
            exchange_rate_id: self.exchange_rate_id?,
            amount: format!("{:.*}", decimal_places as usize, foreign.amount()),
            operation_type: self.mode.into(),
            is_rate_locked: self.is_rate_locked,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DiscountResult {
    pub foreign_amount: ForeignAmount,
    pub base_amount: BaseAmount,
    pub eligible: bool,
    pub final_percent: Decimal,
    pub final_amount: Option<BaseAmount>,
    pub message: Option<String>,
    pub is_loading: bool,
}
