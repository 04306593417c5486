use rust_decimal::Decimal;
use crate::currency::{BaseAmount, TransactionMode};

/// Explains why the discount (buying) or premium (selling) is or is not offered.
pub struct MessageComposer {
    threshold: String,
}

impl MessageComposer {
    pub fn new(threshold: Decimal) -> Self {
        Self {
            threshold: BaseAmount::from(threshold).grouped(0),
        }
    }

    pub fn compose(
        &self,
        mode: TransactionMode,
        eligible: bool,
        client_discount_available: bool,
    ) -> String {
        let subject = match mode {
            TransactionMode::Buy => "Скидка",
            TransactionMode::Sell => "Наценка",
        };
        if eligible && client_discount_available {
            format!(
                "{subject} доступна при первом бронировании или при сумме больше {} ₸",
                self.threshold
            )
        } else {
            format!(
                "{subject} доступна только при сумме больше {} ₸",
                self.threshold
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn composer() -> MessageComposer {
        MessageComposer::new(dec!(500000))
    }

    #[test]
    fn not_eligible() {
        let buy = composer().compose(TransactionMode::Buy, false, false);
        assert!(buy.contains("Скидка доступна только при сумме больше 500 000"));

        let sell = composer().compose(TransactionMode::Sell, false, false);
        assert!(sell.contains("Наценка"));
        assert!(!sell.contains("Скидка"));
    }

    #[test]
    fn eligible_through_client_flag() {
        let message = composer().compose(TransactionMode::Buy, true, true);
        assert_eq!(
            message,
            "Скидка доступна при первом бронировании или при сумме больше 500 000 ₸"
        );
    }

    #[test]
    fn eligible_through_threshold() {
        let message = composer().compose(TransactionMode::Sell, true, false);
        assert_eq!(message, "Наценка доступна только при сумме больше 500 000 ₸");
    }
}
