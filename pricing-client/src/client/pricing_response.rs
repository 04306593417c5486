use rust_decimal::Decimal;
use serde::Deserialize;

#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PricingResponse {
    pub to_amount: Decimal,
    #[serde(default)]
    pub discount_percent: Option<Decimal>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn numeric_fields() {
        let raw = r#"{ "toAmount": 123456.789, "discountPercent": 4.5 }"#;
        let response = serde_json::from_str::<PricingResponse>(raw).unwrap();
        assert_eq!(response.to_amount, dec!(123456.789));
        assert_eq!(response.discount_percent, Some(dec!(4.5)));
    }

    #[test]
    fn missing_discount_percent() {
        let raw = r#"{ "toAmount": "570000" }"#;
        let response = serde_json::from_str::<PricingResponse>(raw).unwrap();
        assert_eq!(response.to_amount, dec!(570000));
        assert_eq!(response.discount_percent, None);
    }
}
