//! In-memory implementation of DataService for testing and development

use crate::core::{DataService, Entity};
use anyhow::{Result, anyhow};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use uuid::Uuid;

/// In-memory data service implementation
///
/// Useful for testing and development. Uses RwLock for thread-safe access;
/// clones share the same underlying map.
#[derive(Clone)]
pub struct InMemoryDataService<T: Entity> {
    entities: Arc<RwLock<HashMap<Uuid, T>>>,
}

impl<T: Entity> InMemoryDataService<T> {
    /// Create a new, empty in-memory data service
    pub fn new() -> Self {
        Self {
            entities: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

impl<T: Entity> Default for InMemoryDataService<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<T: Entity> DataService<T> for InMemoryDataService<T> {
    async fn create(&self, entity: T) -> Result<T> {
        let mut entities = self
            .entities
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        if entities.contains_key(&entity.id()) {
            return Err(anyhow!(
                "{} {} already exists",
                T::resource_name_singular(),
                entity.id()
            ));
        }

        entities.insert(entity.id(), entity.clone());

        Ok(entity)
    }

    async fn get(&self, id: &Uuid) -> Result<Option<T>> {
        let entities = self
            .entities
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        Ok(entities.get(id).cloned())
    }

    async fn list(&self) -> Result<Vec<T>> {
        let entities = self
            .entities
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        let mut all: Vec<T> = entities.values().cloned().collect();
        all.sort_by(|a, b| {
            a.created_at()
                .cmp(&b.created_at())
                .then_with(|| a.id().cmp(&b.id()))
        });

        Ok(all)
    }

    async fn update(&self, id: &Uuid, entity: T) -> Result<T> {
        let mut entities = self
            .entities
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        if entity.id() != *id {
            return Err(anyhow!(
                "Cannot update {} {} with a record for {}",
                T::resource_name_singular(),
                id,
                entity.id()
            ));
        }

        match entities.get_mut(id) {
            Some(existing) => {
                *existing = entity.clone();
                Ok(entity)
            }
            None => Err(anyhow!("{} {} not found", T::resource_name_singular(), id)),
        }
    }

    async fn delete(&self, id: &Uuid) -> Result<Option<T>> {
        let mut entities = self
            .entities
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        Ok(entities.remove(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Currency;
    use crate::entities::item::Item;
    use rust_decimal_macros::dec;

    fn item(name: &str) -> Item {
        Item::new(name.to_string(), None, dec!(10.00), Currency::Usd, None)
    }

    #[tokio::test]
    async fn test_create_and_get() {
        let service = InMemoryDataService::<Item>::new();
        let created = service.create(item("Book")).await.unwrap();

        let fetched = service.get(&created.id).await.unwrap();
        assert_eq!(fetched, Some(created));
    }

    #[tokio::test]
    async fn test_create_duplicate_id_fails() {
        let service = InMemoryDataService::<Item>::new();
        let created = service.create(item("Book")).await.unwrap();

        assert!(service.create(created).await.is_err());
    }

    #[tokio::test]
    async fn test_list_is_oldest_first() {
        let service = InMemoryDataService::<Item>::new();
        let first = service.create(item("First")).await.unwrap();
        let mut second = item("Second");
        second.created_at = first.created_at + chrono::Duration::seconds(1);
        let second = service.create(second).await.unwrap();

        let names: Vec<String> = service
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|i| i.name)
            .collect();
        assert_eq!(names, vec![first.name, second.name]);
    }

    #[tokio::test]
    async fn test_update_existing() {
        let service = InMemoryDataService::<Item>::new();
        let mut created = service.create(item("Book")).await.unwrap();
        created.price = dec!(12.50);

        let updated = service.update(&created.id, created.clone()).await.unwrap();
        assert_eq!(updated.price, dec!(12.50));
        assert_eq!(
            service.get(&created.id).await.unwrap().unwrap().price,
            dec!(12.50)
        );
    }

    #[tokio::test]
    async fn test_update_missing_fails() {
        let service = InMemoryDataService::<Item>::new();
        let ghost = item("Ghost");

        assert!(service.update(&ghost.id, ghost.clone()).await.is_err());
    }

    #[tokio::test]
    async fn test_update_with_mismatched_id_fails() {
        let service = InMemoryDataService::<Item>::new();
        let created = service.create(item("Book")).await.unwrap();

        assert!(service.update(&created.id, item("Other")).await.is_err());
    }

    #[tokio::test]
    async fn test_delete_returns_removed() {
        let service = InMemoryDataService::<Item>::new();
        let created = service.create(item("Book")).await.unwrap();

        let removed = service.delete(&created.id).await.unwrap();
        assert_eq!(removed.map(|i| i.id), Some(created.id));
        assert!(service.get(&created.id).await.unwrap().is_none());
        assert!(service.delete(&created.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_clones_share_state() {
        let service = InMemoryDataService::<Item>::new();
        let clone = service.clone();
        let created = service.create(item("Book")).await.unwrap();

        assert!(clone.get(&created.id).await.unwrap().is_some());
    }
}
