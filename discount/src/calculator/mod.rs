mod config;
mod message;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::currency::BaseAmount;
use pricing_client::PricingResponse;

pub use config::*;
pub use message::*;

/// Authoritative pricing returned by the backend, rounded on receipt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerPricing {
    pub to_amount: BaseAmount,
    pub discount_percent: Option<Decimal>,
}

impl ServerPricing {
    pub fn new(to_amount: Decimal, discount_percent: Option<Decimal>, decimal_places: u32) -> Self {
        Self {
            to_amount: BaseAmount::from(to_amount).round(decimal_places),
            discount_percent,
        }
    }

    pub fn from_response(response: PricingResponse, decimal_places: u32) -> Self {
        Self::new(
            response.to_amount,
            response.discount_percent,
            decimal_places,
        )
    }
}

pub struct DiscountCalculator {
    threshold: Decimal,
    fallback_percent: Decimal,
    decimal_places: u32,
}

impl DiscountCalculator {
    pub fn new(
        DiscountConfig {
            threshold,
            fallback_percent,
            decimal_places,
            ..
        }: DiscountConfig,
    ) -> Self {
        Self {
            threshold,
            fallback_percent,
            decimal_places,
        }
    }

    pub fn threshold(&self) -> Decimal {
        self.threshold
    }

    pub fn decimal_places(&self) -> u32 {
        self.decimal_places
    }

    /// Guests never qualify. Otherwise the backend flag or the threshold grants eligibility.
    pub fn can_show_discount(
        &self,
        is_guest: bool,
        client_discount_available: bool,
        base_amount: BaseAmount,
    ) -> bool {
        if is_guest {
            return false;
        }
        client_discount_available || *base_amount.amount() >= self.threshold
    }

    pub fn final_percent(&self, server: Option<&ServerPricing>, eligible: bool) -> Decimal {
        if !eligible {
            return Decimal::ZERO;
        }
        server
            .and_then(|pricing| pricing.discount_percent)
            .unwrap_or(self.fallback_percent)
    }

    pub fn resolve_final_amount(
        &self,
        server: Option<&ServerPricing>,
        base_amount: BaseAmount,
        final_percent: Decimal,
        eligible: bool,
    ) -> Option<BaseAmount> {
        if !eligible {
            return None;
        }
        if let Some(pricing) = server {
            return Some(pricing.to_amount.round(self.decimal_places));
        }
        let base = *base_amount.amount();
        let discounted = base - base * (final_percent / dec!(100));
        Some(BaseAmount::from(discounted).round(self.decimal_places))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn calculator() -> DiscountCalculator {
        DiscountCalculator::new(DiscountConfig::default())
    }

    #[test]
    fn threshold_gates_eligibility() {
        let calc = calculator();
        for amount in [dec!(0), dec!(1), dec!(499999.99), dec!(499999)] {
            assert!(!calc.can_show_discount(false, false, BaseAmount::from(amount)));
        }
        for amount in [dec!(500000), dec!(500000.01), dec!(10000000)] {
            assert!(calc.can_show_discount(false, false, BaseAmount::from(amount)));
        }
    }

    #[test]
    fn guests_never_qualify() {
        let calc = calculator();
        for flag in [true, false] {
            for amount in [dec!(0), dec!(500000), dec!(99999999)] {
                assert!(!calc.can_show_discount(true, flag, BaseAmount::from(amount)));
            }
        }
    }

    #[test]
    fn client_flag_qualifies_any_amount() {
        let calc = calculator();
        assert!(calc.can_show_discount(false, true, BaseAmount::zero()));
        assert!(calc.can_show_discount(false, true, BaseAmount::from(dec!(100))));
    }

    #[test]
    fn percent_defaults() {
        let calc = calculator();
        assert_eq!(calc.final_percent(None, true), dec!(5));
        assert_eq!(calc.final_percent(None, false), dec!(0));

        let server = ServerPricing::new(dec!(1000), Some(dec!(3.5)), 2);
        assert_eq!(calc.final_percent(Some(&server), true), dec!(3.5));
        assert_eq!(calc.final_percent(Some(&server), false), dec!(0));

        let server = ServerPricing::new(dec!(1000), None, 2);
        assert_eq!(calc.final_percent(Some(&server), true), dec!(5));
    }

    #[test]
    fn local_fallback() {
        let calc = calculator();
        let base = BaseAmount::from(dec!(600000));
        let percent = calc.final_percent(None, true);
        assert_eq!(
            calc.resolve_final_amount(None, base, percent, true),
            Some(BaseAmount::from(dec!(570000.00)))
        );

        let base = BaseAmount::from(dec!(523456.78));
        assert_eq!(
            calc.resolve_final_amount(None, base, percent, true),
            Some(BaseAmount::from(dec!(497283.94)))
        );
    }

    #[test]
    fn server_takes_precedence() {
        let calc = calculator();
        let server = ServerPricing::new(dec!(123456.789), Some(dec!(5)), 2);
        let resolved = calc.resolve_final_amount(
            Some(&server),
            BaseAmount::from(dec!(600000)),
            dec!(5),
            true,
        );
        assert_eq!(resolved, Some(BaseAmount::from(dec!(123456.79))));
    }

    #[test]
    fn nothing_when_not_eligible() {
        let calc = calculator();
        let server = ServerPricing::new(dec!(1), None, 2);
        assert_eq!(
            calc.resolve_final_amount(Some(&server), BaseAmount::from(dec!(600000)), dec!(0), false),
            None
        );
    }
}
