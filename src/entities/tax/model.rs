//! Tax entity model and request payload

use crate::core::validation::validators;
use crate::impl_entity;
use rust_decimal::Decimal;
use serde::Deserialize;
use validator::Validate;

impl_entity!(Tax, "tax", "taxes", {
    name: String,
    /// Percentage added on top of the discounted amount, in [0, 100]
    percent: Decimal,
    #[serde(default)]
    external_tax_id: Option<String>,
});

impl Tax {
    /// Apply this tax to an amount
    pub fn apply_to(&self, amount: Decimal) -> Decimal {
        amount * (Decimal::ONE + self.percent / Decimal::ONE_HUNDRED)
    }
}

/// Payload for `POST /taxes`
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateTaxRequest {
    #[validate(
        length(min = 1, max = 100),
        custom(function = "validators::not_blank")
    )]
    pub name: String,

    #[validate(custom(function = "validators::percent"))]
    pub percent: Decimal,
}

impl CreateTaxRequest {
    pub fn into_tax(self) -> Tax {
        Tax::new(self.name.trim().to_string(), self.percent, None)
    }
}
