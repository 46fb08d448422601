//! Property tests for the pricing pipeline

use checkout::pricing::{compute_total, subtotal};
use checkout::prelude::*;
use proptest::prelude::*;
use rust_decimal::RoundingStrategy;

fn cents() -> impl Strategy<Value = Decimal> {
    (0i64..1_000_000).prop_map(|c| Decimal::new(c, 2))
}

fn percent() -> impl Strategy<Value = Decimal> {
    (0i64..=10_000).prop_map(|p| Decimal::new(p, 2))
}

fn currency() -> impl Strategy<Value = Currency> {
    prop_oneof![Just(Currency::Usd), Just(Currency::Eur)]
}

fn items() -> impl Strategy<Value = Vec<Item>> {
    (currency(), prop::collection::vec(cents(), 0..8)).prop_map(|(currency, prices)| {
        prices
            .into_iter()
            .enumerate()
            .map(|(i, price)| Item::new(format!("item-{}", i), None, price, currency, None))
            .collect()
    })
}

fn discount(percent: Decimal) -> Discount {
    Discount::new("Promo".to_string(), percent, None)
}

fn tax(percent: Decimal) -> Tax {
    Tax::new("VAT".to_string(), percent, None)
}

proptest! {
    #[test]
    fn total_has_two_fractional_digits(items in items(), d in percent(), t in percent()) {
        let total = compute_total(&items, Some(&discount(d)), Some(&tax(t)));
        prop_assert_eq!(total.scale(), 2);
        prop_assert!(total >= Decimal::ZERO);
    }

    #[test]
    fn total_ignores_item_order(items in items(), d in percent(), t in percent()) {
        let mut reversed = items.clone();
        reversed.reverse();
        let (d, t) = (discount(d), tax(t));

        prop_assert_eq!(
            compute_total(&items, Some(&d), Some(&t)),
            compute_total(&reversed, Some(&d), Some(&t))
        );
    }

    #[test]
    fn total_matches_closed_form(items in items(), d in percent(), t in percent()) {
        let rate = |currency: Currency| match currency {
            Currency::Usd => Decimal::ONE,
            Currency::Eur => Decimal::new(108, 2),
        };
        let subtotal: Decimal = items.iter().map(|item| item.price * rate(item.currency)).sum();
        let expected = (subtotal
            * (Decimal::ONE - d / Decimal::ONE_HUNDRED)
            * (Decimal::ONE + t / Decimal::ONE_HUNDRED))
            .round_dp_with_strategy(2, RoundingStrategy::MidpointNearestEven);

        prop_assert_eq!(compute_total(&items, Some(&discount(d)), Some(&tax(t))), expected);
    }

    #[test]
    fn zero_adjustments_are_identity(items in items()) {
        prop_assert_eq!(
            compute_total(&items, Some(&discount(Decimal::ZERO)), Some(&tax(Decimal::ZERO))),
            compute_total(&items, None, None)
        );
    }

    #[test]
    fn full_discount_zeroes_total(items in items(), t in percent()) {
        let total = compute_total(&items, Some(&discount(Decimal::ONE_HUNDRED)), Some(&tax(t)));
        prop_assert_eq!(total, Decimal::ZERO);
    }

    #[test]
    fn empty_order_is_zero(d in percent(), t in percent()) {
        prop_assert_eq!(
            compute_total(&[], Some(&discount(d)), Some(&tax(t))).to_string(),
            "0.00"
        );
    }

    #[test]
    fn eur_prices_are_scaled(price in cents()) {
        let usd = vec![Item::new("a".into(), None, price, Currency::Usd, None)];
        let eur = vec![Item::new("a".into(), None, price, Currency::Eur, None)];

        prop_assert_eq!(subtotal(&eur), subtotal(&usd) * Decimal::new(108, 2));
    }
}
