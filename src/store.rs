//! Aggregated store for all checkout entities
//!
//! Wraps one [`DataService`] per entity type and turns missing records into
//! typed `NotFound` errors, so services can use `?` throughout.

use crate::core::{CheckoutResult, DataService, error::EntityError};
use crate::entities::{Discount, Item, Order, Tax};
use crate::storage::InMemoryDataService;
use std::sync::Arc;
use uuid::Uuid;

/// Aggregated store containing all entity repositories
#[derive(Clone)]
pub struct EntityStore {
    pub items: Arc<dyn DataService<Item>>,
    pub discounts: Arc<dyn DataService<Discount>>,
    pub taxes: Arc<dyn DataService<Tax>>,
    pub orders: Arc<dyn DataService<Order>>,
}

impl EntityStore {
    pub fn new(
        items: Arc<dyn DataService<Item>>,
        discounts: Arc<dyn DataService<Discount>>,
        taxes: Arc<dyn DataService<Tax>>,
        orders: Arc<dyn DataService<Order>>,
    ) -> Self {
        Self {
            items,
            discounts,
            taxes,
            orders,
        }
    }

    /// Store backed entirely by in-memory maps
    pub fn in_memory() -> Self {
        Self::new(
            Arc::new(InMemoryDataService::<Item>::new()),
            Arc::new(InMemoryDataService::<Discount>::new()),
            Arc::new(InMemoryDataService::<Tax>::new()),
            Arc::new(InMemoryDataService::<Order>::new()),
        )
    }

    pub async fn item(&self, id: Uuid) -> CheckoutResult<Item> {
        self.items
            .get(&id)
            .await?
            .ok_or_else(|| EntityError::not_found::<Item>(id).into())
    }

    pub async fn discount(&self, id: Uuid) -> CheckoutResult<Discount> {
        self.discounts
            .get(&id)
            .await?
            .ok_or_else(|| EntityError::not_found::<Discount>(id).into())
    }

    pub async fn tax(&self, id: Uuid) -> CheckoutResult<Tax> {
        self.taxes
            .get(&id)
            .await?
            .ok_or_else(|| EntityError::not_found::<Tax>(id).into())
    }

    pub async fn order(&self, id: Uuid) -> CheckoutResult<Order> {
        self.orders
            .get(&id)
            .await?
            .ok_or_else(|| EntityError::not_found::<Order>(id).into())
    }

    /// Load every listed item, failing on the first missing one
    pub async fn items_by_ids<'a, I>(&self, ids: I) -> CheckoutResult<Vec<Item>>
    where
        I: IntoIterator<Item = &'a Uuid>,
    {
        let mut items = Vec::new();
        for id in ids {
            items.push(self.item(*id).await?);
        }
        Ok(items)
    }
}

impl Default for EntityStore {
    fn default() -> Self {
        Self::in_memory()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{CheckoutError, Currency};
    use rust_decimal_macros::dec;

    #[tokio::test]
    async fn test_missing_records_are_not_found() {
        let store = EntityStore::in_memory();
        let id = Uuid::new_v4();

        match store.item(id).await {
            Err(CheckoutError::Entity(EntityError::NotFound { entity_type, id: missing })) => {
                assert_eq!(entity_type, "item");
                assert_eq!(missing, id);
            }
            other => panic!("unexpected result: {:?}", other.map(|i| i.id)),
        }
        assert!(store.order(id).await.is_err());
        assert!(store.discount(id).await.is_err());
        assert!(store.tax(id).await.is_err());
    }

    #[tokio::test]
    async fn test_items_by_ids() {
        let store = EntityStore::in_memory();
        let item = store
            .items
            .create(Item::new("Pen".into(), None, dec!(1.50), Currency::Usd, None))
            .await
            .unwrap();

        let found = store.items_by_ids([&item.id]).await.unwrap();
        assert_eq!(found.len(), 1);

        let missing = Uuid::new_v4();
        assert!(store.items_by_ids([&item.id, &missing]).await.is_err());
    }
}
