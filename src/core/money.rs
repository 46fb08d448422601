//! Currencies and amount conversion
//!
//! Prices are stored as `rust_decimal::Decimal` in their natural form
//! (`44.99`, not `4499`). Minor units are only produced at the payment
//! gateway boundary.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Fixed EUR → USD conversion factor used to normalize prices.
///
/// Placeholder policy: there is no live rate source and no timestamp.
pub const EUR_TO_USD_RATE: Decimal = Decimal::from_parts(108, 0, 0, false, 2);

/// Number of fractional digits kept on stored amounts
pub const AMOUNT_SCALE: u32 = 2;

/// Currencies accepted for catalog prices
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Currency {
    #[default]
    Usd,
    Eur,
}

impl Currency {
    /// The currency all order totals are expressed in
    pub const REFERENCE: Currency = Currency::Usd;

    /// Lowercase ISO code, as the payment gateway expects it
    pub fn code(&self) -> &'static str {
        match self {
            Currency::Usd => "usd",
            Currency::Eur => "eur",
        }
    }

    /// Factor converting an amount in this currency to the reference currency
    pub fn rate_to_reference(&self) -> Decimal {
        match self {
            Currency::Usd => Decimal::ONE,
            Currency::Eur => EUR_TO_USD_RATE,
        }
    }

    /// Convert an amount in this currency into the reference currency
    pub fn normalize(&self, amount: Decimal) -> Decimal {
        amount * self.rate_to_reference()
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code().to_uppercase())
    }
}

impl FromStr for Currency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "usd" => Ok(Currency::Usd),
            "eur" => Ok(Currency::Eur),
            other => Err(format!("unsupported currency '{}'", other)),
        }
    }
}

/// Round an amount to the stored precision (banker's rounding), always
/// keeping exactly two fractional digits
pub fn round_amount(amount: Decimal) -> Decimal {
    let mut rounded =
        amount.round_dp_with_strategy(AMOUNT_SCALE, RoundingStrategy::MidpointNearestEven);
    rounded.rescale(AMOUNT_SCALE);
    rounded
}

/// Convert an amount to the gateway's integer minor units (cents)
///
/// Returns `None` when the amount is negative or does not fit in an `i64`.
pub fn to_minor_units(amount: Decimal) -> Option<i64> {
    use rust_decimal::prelude::ToPrimitive;

    if amount.is_sign_negative() {
        return None;
    }
    (round_amount(amount) * Decimal::ONE_HUNDRED).trunc().to_i64()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_usd_normalization_is_identity() {
        assert_eq!(Currency::Usd.normalize(dec!(42.17)), dec!(42.17));
    }

    #[test]
    fn test_eur_normalization_uses_fixed_rate() {
        assert_eq!(Currency::Eur.normalize(dec!(100.00)), dec!(108.0000));
        assert_eq!(EUR_TO_USD_RATE, dec!(1.08));
    }

    #[test]
    fn test_currency_codes_and_display() {
        assert_eq!(Currency::Usd.code(), "usd");
        assert_eq!(Currency::Eur.to_string(), "EUR");
        assert_eq!(Currency::default(), Currency::Usd);
    }

    #[test]
    fn test_currency_from_str() {
        assert_eq!("EUR".parse::<Currency>(), Ok(Currency::Eur));
        assert_eq!(" usd ".parse::<Currency>(), Ok(Currency::Usd));
        assert!("gbp".parse::<Currency>().is_err());
    }

    #[test]
    fn test_currency_serde_lowercase() {
        let json = serde_json::to_string(&Currency::Eur).unwrap();
        assert_eq!(json, "\"eur\"");
        let parsed: Currency = serde_json::from_str("\"usd\"").unwrap();
        assert_eq!(parsed, Currency::Usd);
    }

    #[test]
    fn test_round_amount_half_even() {
        assert_eq!(round_amount(dec!(1.005)), dec!(1.00));
        assert_eq!(round_amount(dec!(1.015)), dec!(1.02));
        assert_eq!(round_amount(dec!(98.2800)), dec!(98.28));
        assert_eq!(round_amount(Decimal::ZERO).to_string(), "0.00");
        assert_eq!(round_amount(dec!(110)).to_string(), "110.00");
    }

    #[test]
    fn test_to_minor_units() {
        assert_eq!(to_minor_units(dec!(98.28)), Some(9828));
        assert_eq!(to_minor_units(dec!(0)), Some(0));
        assert_eq!(to_minor_units(dec!(10.999)), Some(1100));
        assert_eq!(to_minor_units(dec!(-1)), None);
    }
}
