//! Order total computation
//!
//! Pure functions: they read item prices and adjustment percentages and
//! never touch storage. Every price is normalized into
//! [`Currency::REFERENCE`] before summation, then the discount is applied,
//! then the tax on the discounted amount. Only the final value is rounded.

use crate::core::error::ValidationError;
use crate::core::money::{Currency, round_amount};
use crate::entities::{Discount, Item, Tax};
use rust_decimal::Decimal;
use std::collections::BTreeSet;

/// Sum of member prices, each normalized into the reference currency
pub fn subtotal(items: &[Item]) -> Decimal {
    items.iter().map(Item::normalized_price).sum()
}

pub fn apply_discount(amount: Decimal, discount: Option<&Discount>) -> Decimal {
    match discount {
        Some(discount) => discount.apply_to(amount),
        None => amount,
    }
}

pub fn apply_tax(amount: Decimal, tax: Option<&Tax>) -> Decimal {
    match tax {
        Some(tax) => tax.apply_to(amount),
        None => amount,
    }
}

/// Total of an order in the reference currency, two fractional digits
///
/// An empty item set always yields zero.
pub fn compute_total(items: &[Item], discount: Option<&Discount>, tax: Option<&Tax>) -> Decimal {
    let discounted = apply_discount(subtotal(items), discount);
    round_amount(apply_tax(discounted, tax))
}

/// Reject item sets priced in more than one currency
///
/// Returns the shared currency, or `None` for an empty set.
pub fn ensure_single_currency(items: &[Item]) -> Result<Option<Currency>, ValidationError> {
    let currencies: BTreeSet<Currency> = items.iter().map(|item| item.currency).collect();

    match currencies.len() {
        0 => Ok(None),
        1 => Ok(currencies.into_iter().next()),
        _ => Err(ValidationError::MixedCurrency {
            currencies: currencies.into_iter().collect(),
        }),
    }
}
