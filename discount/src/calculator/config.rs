use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use shared::money::DEFAULT_DECIMAL_PLACES;

use std::time::Duration;

#[serde_with::serde_as]
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct DiscountConfig {
    #[serde(default = "default_threshold")]
    pub threshold: Decimal,
    #[serde(default = "default_fallback_percent")]
    pub fallback_percent: Decimal,
    #[serde(default = "default_decimal_places")]
    pub decimal_places: u32,
    #[serde_as(as = "serde_with::DurationMilliSeconds<u64>")]
    #[serde(default = "default_debounce")]
    pub debounce: Duration,
}

fn default_threshold() -> Decimal {
    dec!(500000)
}

fn default_fallback_percent() -> Decimal {
    dec!(5)
}

fn default_decimal_places() -> u32 {
    DEFAULT_DECIMAL_PLACES
}

fn default_debounce() -> Duration {
    Duration::from_millis(450)
}

impl Default for DiscountConfig {
    fn default() -> Self {
        Self {
            threshold: default_threshold(),
            fallback_percent: default_fallback_percent(),
            decimal_places: default_decimal_places(),
            debounce: default_debounce(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = DiscountConfig::default();
        assert_eq!(config.threshold, dec!(500000));
        assert_eq!(config.fallback_percent, dec!(5));
        assert_eq!(config.decimal_places, 2);
        assert_eq!(config.debounce, Duration::from_millis(450));
    }

    #[test]
    fn partial_yaml() {
        let config: DiscountConfig =
            serde_yaml::from_str("threshold: 1000000\ndebounce: 300\n").unwrap();
        assert_eq!(config.threshold, dec!(1000000));
        assert_eq!(config.debounce, Duration::from_millis(300));
        assert_eq!(config.fallback_percent, dec!(5));
    }
}
