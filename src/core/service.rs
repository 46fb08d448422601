//! Service trait for entity persistence

use crate::core::Entity;
use anyhow::Result;
use async_trait::async_trait;
use uuid::Uuid;

/// Service trait for managing persisted entities
///
/// Implementations provide CRUD operations for a specific entity type.
/// Pricing and checkout code only talk to this trait, so the storage
/// mechanism stays swappable.
#[async_trait]
pub trait DataService<T: Entity>: Send + Sync {
    /// Create a new entity
    async fn create(&self, entity: T) -> Result<T>;

    /// Get an entity by ID
    async fn get(&self, id: &Uuid) -> Result<Option<T>>;

    /// List all entities, oldest first
    async fn list(&self) -> Result<Vec<T>>;

    /// Update an existing entity
    async fn update(&self, id: &Uuid, entity: T) -> Result<T>;

    /// Delete an entity, returning it if it existed
    async fn delete(&self, id: &Uuid) -> Result<Option<T>>;
}
