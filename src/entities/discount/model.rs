//! Discount entity model and request payload

use crate::core::validation::validators;
use crate::impl_entity;
use rust_decimal::Decimal;
use serde::Deserialize;
use validator::Validate;

impl_entity!(Discount, "discount", "discounts", {
    name: String,
    /// Percentage taken off the subtotal, in [0, 100]
    percent: Decimal,
    #[serde(default)]
    external_coupon_id: Option<String>,
});

impl Discount {
    /// Apply this discount to an amount
    pub fn apply_to(&self, amount: Decimal) -> Decimal {
        amount * (Decimal::ONE - self.percent / Decimal::ONE_HUNDRED)
    }
}

/// Payload for `POST /discounts`
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateDiscountRequest {
    #[validate(
        length(min = 1, max = 100),
        custom(function = "validators::not_blank")
    )]
    pub name: String,

    #[validate(custom(function = "validators::percent"))]
    pub percent: Decimal,
}

impl CreateDiscountRequest {
    pub fn into_discount(self) -> Discount {
        Discount::new(self.name.trim().to_string(), self.percent, None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_apply_to() {
        let discount = Discount::new("Spring".to_string(), dec!(20), None);
        assert_eq!(discount.apply_to(dec!(100.00)), dec!(80.00));

        let free = Discount::new("Free".to_string(), dec!(100), None);
        assert!(free.apply_to(dec!(42.00)).is_zero());
    }

    #[test]
    fn test_percent_bounds() {
        for (percent, ok) in [("0", true), ("100", true), ("12.5", true), ("100.01", false), ("-5", false)] {
            let req: CreateDiscountRequest = serde_json::from_value(
                serde_json::json!({"name": "Promo", "percent": percent}),
            )
            .unwrap();
            assert_eq!(req.validate().is_ok(), ok, "percent {}", percent);
        }
    }
}
