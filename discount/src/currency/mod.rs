use rust_decimal::Decimal;
use rusty_money::{FormattableCurrency, Formatter, LocalFormat, Money, Params, Position, Round};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use pricing_client::OperationType;
use shared::money::*;

macro_rules! currency {
    ($name:ident, $code:ident) => {
        #[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
        pub struct $name {
            inner: Money<'static, inner::kassa::Currency>,
        }

        impl $name {
            pub fn zero() -> Self {
                Self::from_decimal(Decimal::ZERO)
            }

            fn from_decimal(decimal: Decimal) -> Self {
                Self {
                    inner: Money::from_decimal(decimal, inner::kassa::$code),
                }
            }

            pub fn amount(&self) -> &Decimal {
                self.inner.amount()
            }

            pub fn is_zero(&self) -> bool {
                self.amount().is_zero()
            }

            /// Text as typed into the amount field; malformed input is zero.
            pub fn parse_input(text: &str) -> Self {
                Self::from_decimal(parse_amount_input(text))
            }

            /// Half away from zero, the single rounding rule for displayed amounts.
            pub fn round(&self, decimal_places: u32) -> Self {
                Self {
                    inner: self.inner.round(decimal_places, Round::HalfUp),
                }
            }

            /// Digits grouped the way the currency's locale writes them, e.g. `500 000`.
            pub fn grouped(&self, decimal_places: u32) -> String {
                let format = LocalFormat::from_locale(self.inner.currency().locale());
                Formatter::money(
                    &self.inner,
                    Params {
                        digit_separator: format.digit_separator,
                        exponent_separator: format.exponent_separator,
                        separator_pattern: format.digit_separator_pattern(),
                        positions: vec![Position::Amount],
                        rounding: Some(decimal_places),
                        ..Default::default()
                    },
                )
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::zero()
            }
        }

        impl From<Decimal> for $name {
            fn from(decimal: Decimal) -> Self {
                Self::from_decimal(non_negative(decimal))
            }
        }

        impl From<f64> for $name {
            fn from(raw: f64) -> Self {
                Self::from_decimal(decimal_from_f64(raw))
            }
        }

        impl From<$name> for Decimal {
            fn from(amount: $name) -> Self {
                *amount.amount()
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                Serialize::serialize(self.amount(), serializer)
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                <Decimal as Deserialize>::deserialize(deserializer).map(Self::from)
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.amount())
            }
        }
    };
}
currency! { BaseAmount, BASE }
currency! { ForeignAmount, FOREIGN }

/// Whether the customer buys or sells the foreign currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionMode {
    Buy,
    Sell,
}

impl From<TransactionMode> for OperationType {
    fn from(mode: TransactionMode) -> Self {
        match mode {
            TransactionMode::Buy => OperationType::Buy,
            TransactionMode::Sell => OperationType::Sell,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConversionDirection {
    ToBase,
    ToForeign,
}

/// Base-currency units per one unit of foreign currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExchangeRatePair {
    pub buy: Decimal,
    pub sell: Decimal,
}

impl ExchangeRatePair {
    pub fn new(buy: Decimal, sell: Decimal) -> Self {
        Self { buy, sell }
    }

    /// The institution buys from a selling customer and sells to a buying one.
    /// `None` while the quote for that side is missing or not positive.
    pub fn for_mode(&self, mode: TransactionMode) -> Option<Decimal> {
        let rate = match mode {
            TransactionMode::Sell => self.buy,
            TransactionMode::Buy => self.sell,
        };
        (rate > Decimal::ZERO).then_some(rate)
    }
}

pub fn convert(
    amount: Decimal,
    rate: &ExchangeRatePair,
    mode: TransactionMode,
    direction: ConversionDirection,
) -> Decimal {
    if amount <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    let rate = match rate.for_mode(mode) {
        Some(rate) => rate,
        None => return Decimal::ZERO,
    };
    let converted = match direction {
        ConversionDirection::ToBase => amount.checked_mul(rate),
        ConversionDirection::ToForeign => amount.checked_div(rate),
    };
    converted.unwrap_or(Decimal::ZERO)
}

pub struct CurrencyConverter<'a> {
    rate: &'a ExchangeRatePair,
    mode: TransactionMode,
}

impl<'a> CurrencyConverter<'a> {
    pub fn new(rate: &'a ExchangeRatePair, mode: TransactionMode) -> Self {
        Self { rate, mode }
    }

    pub fn base_from_foreign(&self, foreign: ForeignAmount) -> BaseAmount {
        BaseAmount::from(convert(
            foreign.into(),
            self.rate,
            self.mode,
            ConversionDirection::ToBase,
        ))
    }

    pub fn foreign_from_base(&self, base: BaseAmount) -> ForeignAmount {
        ForeignAmount::from(convert(
            base.into(),
            self.rate,
            self.mode,
            ConversionDirection::ToForeign,
        ))
    }
}


mod inner {
    use rusty_money::define_currency_set;
    define_currency_set!(
      kassa {
        BASE: {
          code: "KZT",
          exponent: 2,
          locale: Locale::EnBy,
          minor_units: 100,
          name: "Tenge",
          symbol: "\u{20B8}",
          symbol_first: false,
        },
        FOREIGN: {
          code: "FOREIGN",
          exponent: 2,
          locale: Locale::EnBy,
          minor_units: 100,
          name: "Foreign currency",
          symbol: "\u{00A4}",
          symbol_first: false,
        }
      }
    );
}
