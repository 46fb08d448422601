//! Order lifecycle on top of the pricing engine
//!
//! Every mutation of an order's membership or adjustments goes through
//! [`OrderService`]: the candidate order is resolved, checked for a single
//! currency, priced, and only then written. A rejected mutation leaves the
//! stored order untouched.

use super::engine::{compute_total, ensure_single_currency};
use crate::core::error::EntityError;
use crate::core::{CheckoutResult, Currency};
use crate::entities::order::CreateOrderRequest;
use crate::entities::{Discount, Item, Order, Tax};
use crate::store::EntityStore;
use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

/// An order together with the records it references
#[derive(Debug, Clone, Serialize)]
pub struct PricedOrder {
    pub order: Order,
    pub items: Vec<Item>,
    pub discount: Option<Discount>,
    pub tax: Option<Tax>,
    /// Currency shared by the items; the reference currency when empty
    pub currency: Currency,
}

impl PricedOrder {
    /// Total in the reference currency
    pub fn total(&self) -> Decimal {
        compute_total(&self.items, self.discount.as_ref(), self.tax.as_ref())
    }

    /// Clear adjustment ids whose records are gone; true if any was cleared
    fn detach_dangling(&mut self) -> bool {
        let discount_id = self.discount.as_ref().map(|discount| discount.id);
        let tax_id = self.tax.as_ref().map(|tax| tax.id);
        let changed = self.order.discount_id != discount_id || self.order.tax_id != tax_id;

        self.order.discount_id = discount_id;
        self.order.tax_id = tax_id;
        changed
    }
}

/// Application service owning order mutations and total recomputation
#[derive(Clone)]
pub struct OrderService {
    store: EntityStore,
}

impl OrderService {
    pub fn new(store: EntityStore) -> Self {
        Self { store }
    }

    /// Load an order with its items and adjustments, without writing
    pub async fn get(&self, order_id: Uuid) -> CheckoutResult<PricedOrder> {
        let order = self.store.order(order_id).await?;
        self.resolve(order, None).await
    }

    /// Recompute an order's total and store it
    ///
    /// Idempotent: the order is only written when the total changed or a
    /// dangling adjustment id was dropped.
    pub async fn recompute_and_persist(&self, order_id: Uuid) -> CheckoutResult<PricedOrder> {
        let order = self.store.order(order_id).await?;
        let mut priced = self.resolve(order, None).await?;
        let detached = priced.detach_dangling();
        let total = priced.total();

        if detached || priced.order.total != Some(total) {
            priced.order.total = Some(total);
            priced.order.touch();
            priced.order = self
                .store
                .orders
                .update(&order_id, priced.order.clone())
                .await?;
            tracing::debug!(order_id = %order_id, total = %total, "Order total recomputed");
        }

        Ok(priced)
    }

    /// Create an order; referenced records must exist and share a currency
    pub async fn create_order(&self, request: CreateOrderRequest) -> CheckoutResult<PricedOrder> {
        self.require_adjustments(request.discount_id, request.tax_id)
            .await?;

        let mut order = Order::empty();
        order.add_items(request.item_ids);
        order.discount_id = request.discount_id;
        order.tax_id = request.tax_id;

        let priced = self.price(order).await?;
        let created = self.store.orders.create(priced.order.clone()).await?;
        tracing::info!(order_id = %created.id, items = created.item_ids.len(), "Order created");

        Ok(PricedOrder {
            order: created,
            ..priced
        })
    }

    pub async fn add_items(&self, order_id: Uuid, item_ids: &[Uuid]) -> CheckoutResult<PricedOrder> {
        let mut order = self.store.order(order_id).await?;
        let added = order.add_items(item_ids.iter().copied());
        tracing::debug!(order_id = %order_id, added, "Adding items to order");
        self.commit(order).await
    }

    pub async fn remove_item(&self, order_id: Uuid, item_id: Uuid) -> CheckoutResult<PricedOrder> {
        let mut order = self.store.order(order_id).await?;
        if !order.remove_item(&item_id) {
            return Err(EntityError::not_found::<Item>(item_id).into());
        }
        self.commit(order).await
    }

    pub async fn clear_items(&self, order_id: Uuid) -> CheckoutResult<PricedOrder> {
        let mut order = self.store.order(order_id).await?;
        order.clear_items();
        self.commit(order).await
    }

    /// Attach a discount, or detach with `None`
    pub async fn set_discount(
        &self,
        order_id: Uuid,
        discount_id: Option<Uuid>,
    ) -> CheckoutResult<PricedOrder> {
        self.require_adjustments(discount_id, None).await?;
        let mut order = self.store.order(order_id).await?;
        order.discount_id = discount_id;
        self.commit(order).await
    }

    /// Attach a tax, or detach with `None`
    pub async fn set_tax(&self, order_id: Uuid, tax_id: Option<Uuid>) -> CheckoutResult<PricedOrder> {
        self.require_adjustments(None, tax_id).await?;
        let mut order = self.store.order(order_id).await?;
        order.tax_id = tax_id;
        self.commit(order).await
    }

    pub async fn delete_order(&self, order_id: Uuid) -> CheckoutResult<Order> {
        let deleted = self.store.orders.delete(&order_id).await?;
        deleted.ok_or_else(|| EntityError::not_found::<Order>(order_id).into())
    }

    /// Store an edited item, repricing every order that contains it
    ///
    /// Fails without writing anything if the edit would leave one of those
    /// orders with mixed currencies.
    pub async fn update_item(&self, item: Item) -> CheckoutResult<Item> {
        let affected = self.orders_containing(item.id).await?;
        for order in &affected {
            self.resolve(order.clone(), Some(&item)).await?;
        }

        let item_id = item.id;
        let updated = self.store.items.update(&item_id, item).await?;
        for order in affected {
            self.recompute_and_persist(order.id).await?;
        }
        Ok(updated)
    }

    /// Delete an item and drop it from every order that held it
    ///
    /// Orders are rewritten before the item is removed, so a failed cascade
    /// leaves the item in place rather than orders pointing at nothing.
    pub async fn delete_item(&self, item_id: Uuid) -> CheckoutResult<Item> {
        let item = self.store.item(item_id).await?;

        for mut order in self.orders_containing(item_id).await? {
            order.remove_item(&item_id);
            self.commit(order).await?;
        }

        self.store.items.delete(&item_id).await?;
        Ok(item)
    }

    /// Delete a discount; orders referencing it lose the reference
    pub async fn delete_discount(&self, discount_id: Uuid) -> CheckoutResult<Discount> {
        let discount = self.store.discount(discount_id).await?;

        for mut order in self.store.orders.list().await? {
            if order.detach_discount(&discount_id) {
                self.commit(order).await?;
            }
        }

        self.store.discounts.delete(&discount_id).await?;
        Ok(discount)
    }

    /// Delete a tax; orders referencing it lose the reference
    pub async fn delete_tax(&self, tax_id: Uuid) -> CheckoutResult<Tax> {
        let tax = self.store.tax(tax_id).await?;

        for mut order in self.store.orders.list().await? {
            if order.detach_tax(&tax_id) {
                self.commit(order).await?;
            }
        }

        self.store.taxes.delete(&tax_id).await?;
        Ok(tax)
    }

    async fn orders_containing(&self, item_id: Uuid) -> CheckoutResult<Vec<Order>> {
        Ok(self
            .store
            .orders
            .list()
            .await?
            .into_iter()
            .filter(|order| order.item_ids.contains(&item_id))
            .collect())
    }

    /// Price a candidate order and write it over the stored one
    async fn commit(&self, order: Order) -> CheckoutResult<PricedOrder> {
        let order_id = order.id;
        let mut priced = self.price(order).await?;
        priced.order.touch();
        priced.order = self
            .store
            .orders
            .update(&order_id, priced.order.clone())
            .await?;
        tracing::debug!(order_id = %order_id, total = ?priced.order.total, "Order updated");
        Ok(priced)
    }

    /// Adjustments being attached must exist at that moment
    async fn require_adjustments(
        &self,
        discount_id: Option<Uuid>,
        tax_id: Option<Uuid>,
    ) -> CheckoutResult<()> {
        if let Some(id) = discount_id {
            self.store.discount(id).await?;
        }
        if let Some(id) = tax_id {
            self.store.tax(id).await?;
        }
        Ok(())
    }

    /// Resolve a candidate order, drop dangling adjustment ids and set its
    /// total
    async fn price(&self, order: Order) -> CheckoutResult<PricedOrder> {
        let mut priced = self.resolve(order, None).await?;
        if priced.detach_dangling() {
            tracing::debug!(order_id = %priced.order.id, "Dropped dangling adjustment reference");
        }
        priced.order.total = Some(priced.total());
        Ok(priced)
    }

    /// Load referenced records; `replacement` stands in for the stored
    /// item with the same id
    async fn resolve(&self, order: Order, replacement: Option<&Item>) -> CheckoutResult<PricedOrder> {
        let mut items = Vec::with_capacity(order.item_ids.len());
        for id in &order.item_ids {
            match replacement {
                Some(item) if item.id == *id => items.push(item.clone()),
                _ => items.push(self.store.item(*id).await?),
            }
        }

        let currency = ensure_single_currency(&items)
            .inspect_err(|e| tracing::debug!(order_id = %order.id, "{}", e))?
            .unwrap_or(Currency::REFERENCE);

        // Adjustments are weak references: a dangling id counts as absent
        let discount = match order.discount_id {
            Some(id) => self.store.discounts.get(&id).await?,
            None => None,
        };
        let tax = match order.tax_id {
            Some(id) => self.store.taxes.get(&id).await?,
            None => None,
        };

        Ok(PricedOrder {
            order,
            items,
            discount,
            tax,
            currency,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::CheckoutError;
    use crate::core::error::ValidationError;
    use rust_decimal_macros::dec;

    struct Fixture {
        service: OrderService,
        store: EntityStore,
    }

    impl Fixture {
        fn new() -> Self {
            let store = EntityStore::in_memory();
            Self {
                service: OrderService::new(store.clone()),
                store,
            }
        }

        async fn item(&self, price: Decimal, currency: Currency) -> Item {
            self.store
                .items
                .create(Item::new("Thing".into(), None, price, currency, None))
                .await
                .unwrap()
        }

        async fn discount(&self, percent: Decimal) -> Discount {
            self.store
                .discounts
                .create(Discount::new("Promo".into(), percent, None))
                .await
                .unwrap()
        }

        async fn tax(&self, percent: Decimal) -> Tax {
            self.store
                .taxes
                .create(Tax::new("VAT".into(), percent, None))
                .await
                .unwrap()
        }

        async fn order(&self, item_ids: Vec<Uuid>) -> PricedOrder {
            self.service
                .create_order(CreateOrderRequest {
                    item_ids,
                    ..Default::default()
                })
                .await
                .unwrap()
        }
    }

    fn is_mixed_currency(err: &CheckoutError) -> bool {
        matches!(
            err,
            CheckoutError::Validation(ValidationError::MixedCurrency { .. })
        )
    }

    #[tokio::test]
    async fn test_create_order_stores_total() {
        let fx = Fixture::new();
        let book = fx.item(dec!(100.00), Currency::Usd).await;
        let vat = fx.tax(dec!(10)).await;

        let priced = fx
            .service
            .create_order(CreateOrderRequest {
                item_ids: vec![book.id],
                tax_id: Some(vat.id),
                ..Default::default()
            })
            .await
            .unwrap();

        assert_eq!(priced.order.total, Some(dec!(110.00)));
        let stored = fx.store.order(priced.order.id).await.unwrap();
        assert_eq!(stored.total, Some(dec!(110.00)));
    }

    #[tokio::test]
    async fn test_empty_order_total_is_zero() {
        let fx = Fixture::new();
        let priced = fx.order(vec![]).await;

        assert_eq!(priced.order.total, Some(Decimal::ZERO));
        assert_eq!(priced.currency, Currency::Usd);
    }

    #[tokio::test]
    async fn test_create_order_with_unknown_item_fails() {
        let fx = Fixture::new();
        let err = fx
            .service
            .create_order(CreateOrderRequest {
                item_ids: vec![Uuid::new_v4()],
                ..Default::default()
            })
            .await
            .unwrap_err();

        assert!(matches!(err, CheckoutError::Entity(EntityError::NotFound { .. })));
        assert!(fx.store.orders.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_create_mixed_currency_order_is_not_persisted() {
        let fx = Fixture::new();
        let usd = fx.item(dec!(50.00), Currency::Usd).await;
        let eur = fx.item(dec!(50.00), Currency::Eur).await;

        let err = fx
            .service
            .create_order(CreateOrderRequest {
                item_ids: vec![usd.id, eur.id],
                ..Default::default()
            })
            .await
            .unwrap_err();

        assert!(is_mixed_currency(&err));
        assert!(fx.store.orders.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_add_items_recomputes_total() {
        let fx = Fixture::new();
        let a = fx.item(dec!(100.00), Currency::Eur).await;
        let b = fx.item(dec!(10.00), Currency::Eur).await;
        let order = fx.order(vec![a.id]).await;
        let promo = fx.discount(dec!(20)).await;

        let priced = fx.service.set_discount(order.order.id, Some(promo.id)).await.unwrap();
        assert_eq!(priced.order.total, Some(dec!(86.40)));

        let priced = fx.service.add_items(order.order.id, &[b.id, a.id]).await.unwrap();
        assert_eq!(priced.order.item_ids.len(), 2);
        assert_eq!(priced.order.total, Some(dec!(95.04)));
        assert_eq!(priced.currency, Currency::Eur);
    }

    #[tokio::test]
    async fn test_add_mixed_currency_item_leaves_order_untouched() {
        let fx = Fixture::new();
        let usd = fx.item(dec!(50.00), Currency::Usd).await;
        let eur = fx.item(dec!(50.00), Currency::Eur).await;
        let order = fx.order(vec![usd.id]).await;

        let err = fx.service.add_items(order.order.id, &[eur.id]).await.unwrap_err();
        assert!(is_mixed_currency(&err));

        let stored = fx.store.order(order.order.id).await.unwrap();
        assert_eq!(stored.item_ids.len(), 1);
        assert_eq!(stored.total, Some(dec!(50.00)));
    }

    #[tokio::test]
    async fn test_remove_and_clear_items() {
        let fx = Fixture::new();
        let a = fx.item(dec!(5.00), Currency::Usd).await;
        let b = fx.item(dec!(7.00), Currency::Usd).await;
        let order = fx.order(vec![a.id, b.id]).await;
        assert_eq!(order.order.total, Some(dec!(12.00)));

        let priced = fx.service.remove_item(order.order.id, a.id).await.unwrap();
        assert_eq!(priced.order.total, Some(dec!(7.00)));

        let err = fx.service.remove_item(order.order.id, a.id).await.unwrap_err();
        assert_eq!(err.status_code(), axum::http::StatusCode::NOT_FOUND);

        let priced = fx.service.clear_items(order.order.id).await.unwrap();
        assert_eq!(priced.order.total, Some(Decimal::ZERO));
    }

    #[tokio::test]
    async fn test_set_unknown_tax_fails() {
        let fx = Fixture::new();
        let order = fx.order(vec![]).await;

        assert!(fx.service.set_tax(order.order.id, Some(Uuid::new_v4())).await.is_err());
        let stored = fx.store.order(order.order.id).await.unwrap();
        assert!(stored.tax_id.is_none());
    }

    #[tokio::test]
    async fn test_recompute_is_idempotent() {
        let fx = Fixture::new();
        let a = fx.item(dec!(12.34), Currency::Usd).await;
        let order = fx.order(vec![a.id]).await;

        let first = fx.service.recompute_and_persist(order.order.id).await.unwrap();
        let second = fx.service.recompute_and_persist(order.order.id).await.unwrap();

        assert_eq!(first.order.total, second.order.total);
        assert_eq!(first.order.updated_at, second.order.updated_at);
    }

    #[tokio::test]
    async fn test_recompute_picks_up_stale_total() {
        let fx = Fixture::new();
        let a = fx.item(dec!(20.00), Currency::Usd).await;
        let order = fx.order(vec![a.id]).await;

        let mut stale = fx.store.order(order.order.id).await.unwrap();
        stale.total = None;
        fx.store.orders.update(&stale.id, stale.clone()).await.unwrap();

        let priced = fx.service.recompute_and_persist(stale.id).await.unwrap();
        assert_eq!(priced.order.total, Some(dec!(20.00)));
    }

    #[tokio::test]
    async fn test_deleting_item_reprices_orders() {
        let fx = Fixture::new();
        let a = fx.item(dec!(5.00), Currency::Usd).await;
        let b = fx.item(dec!(7.00), Currency::Usd).await;
        let order = fx.order(vec![a.id, b.id]).await;

        fx.service.delete_item(a.id).await.unwrap();

        let stored = fx.store.order(order.order.id).await.unwrap();
        assert!(!stored.item_ids.contains(&a.id));
        assert_eq!(stored.total, Some(dec!(7.00)));
    }

    #[tokio::test]
    async fn test_deleting_adjustments_detaches_them() {
        let fx = Fixture::new();
        let a = fx.item(dec!(100.00), Currency::Usd).await;
        let promo = fx.discount(dec!(10)).await;
        let vat = fx.tax(dec!(10)).await;
        let order = fx
            .service
            .create_order(CreateOrderRequest {
                item_ids: vec![a.id],
                discount_id: Some(promo.id),
                tax_id: Some(vat.id),
            })
            .await
            .unwrap();
        assert_eq!(order.order.total, Some(dec!(99.00)));

        fx.service.delete_discount(promo.id).await.unwrap();
        let stored = fx.store.order(order.order.id).await.unwrap();
        assert!(stored.discount_id.is_none());
        assert_eq!(stored.total, Some(dec!(110.00)));

        fx.service.delete_tax(vat.id).await.unwrap();
        let stored = fx.store.order(order.order.id).await.unwrap();
        assert!(stored.tax_id.is_none());
        assert_eq!(stored.total, Some(dec!(100.00)));
    }

    #[tokio::test]
    async fn test_item_update_reprices_orders() {
        let fx = Fixture::new();
        let mut a = fx.item(dec!(10.00), Currency::Usd).await;
        let order = fx.order(vec![a.id]).await;

        a.price = dec!(15.00);
        fx.service.update_item(a).await.unwrap();

        let stored = fx.store.order(order.order.id).await.unwrap();
        assert_eq!(stored.total, Some(dec!(15.00)));
    }

    #[tokio::test]
    async fn test_item_currency_change_rejected_when_it_mixes_an_order() {
        let fx = Fixture::new();
        let mut a = fx.item(dec!(10.00), Currency::Usd).await;
        let b = fx.item(dec!(20.00), Currency::Usd).await;
        fx.order(vec![a.id, b.id]).await;

        a.currency = Currency::Eur;
        let err = fx.service.update_item(a.clone()).await.unwrap_err();
        assert!(is_mixed_currency(&err));
        assert_eq!(fx.store.item(a.id).await.unwrap().currency, Currency::Usd);
    }

    #[tokio::test]
    async fn test_delete_missing_order() {
        let fx = Fixture::new();
        let err = fx.service.delete_order(Uuid::new_v4()).await.unwrap_err();
        assert_eq!(err.error_code(), "ENTITY_NOT_FOUND");
    }

    #[tokio::test]
    async fn test_dangling_discount_does_not_block_membership_changes() {
        let fx = Fixture::new();
        let a = fx.item(dec!(10.00), Currency::Usd).await;
        let b = fx.item(dec!(5.00), Currency::Usd).await;
        let mut seeded = Order::empty();
        seeded.add_items([a.id]);
        seeded.discount_id = Some(Uuid::new_v4());
        let seeded = fx.store.orders.create(seeded).await.unwrap();

        let priced = fx.service.add_items(seeded.id, &[b.id]).await.unwrap();
        assert!(priced.order.discount_id.is_none());
        assert_eq!(priced.order.total, Some(dec!(15.00)));

        fx.service.delete_item(a.id).await.unwrap();
        assert!(fx.store.items.get(&a.id).await.unwrap().is_none());
        let stored = fx.store.order(seeded.id).await.unwrap();
        assert_eq!(stored.item_ids.len(), 1);
        assert!(!stored.item_ids.contains(&a.id));
        assert_eq!(stored.total, Some(dec!(5.00)));
    }

    #[tokio::test]
    async fn test_recompute_drops_dangling_tax() {
        let fx = Fixture::new();
        let a = fx.item(dec!(10.00), Currency::Usd).await;
        let mut seeded = Order::empty();
        seeded.add_items([a.id]);
        seeded.tax_id = Some(Uuid::new_v4());
        seeded.total = Some(dec!(10.00));
        let seeded = fx.store.orders.create(seeded).await.unwrap();

        let priced = fx.service.recompute_and_persist(seeded.id).await.unwrap();
        assert!(priced.order.tax_id.is_none());
        assert!(fx.store.order(seeded.id).await.unwrap().tax_id.is_none());
    }

    #[tokio::test]
    async fn test_failed_item_cascade_keeps_item() {
        let fx = Fixture::new();
        let a = fx.item(dec!(10.00), Currency::Usd).await;
        let mut broken = Order::empty();
        broken.add_items([a.id, Uuid::new_v4()]);
        let broken = fx.store.orders.create(broken).await.unwrap();

        assert!(fx.service.delete_item(a.id).await.is_err());
        assert!(fx.store.items.get(&a.id).await.unwrap().is_some());
        assert!(fx.store.order(broken.id).await.unwrap().item_ids.contains(&a.id));
    }

    #[tokio::test]
    async fn test_attaching_unknown_discount_fails() {
        let fx = Fixture::new();
        let order = fx.order(vec![]).await;

        let err = fx
            .service
            .set_discount(order.order.id, Some(Uuid::new_v4()))
            .await
            .err()
            .unwrap();
        assert_eq!(err.error_code(), "ENTITY_NOT_FOUND");
    }
}
