//! Item repository interface

use async_trait::async_trait;
use uuid::Uuid;

use super::model::Item;
use crate::domain::DomainResult;

/// Filter for item listings.
#[derive(Debug, Clone, Default)]
pub struct ItemFilter {
    pub category_id: Option<Uuid>,
    pub subcategory_id: Option<Uuid>,
    pub active: Option<bool>,
}

#[async_trait]
pub trait ItemRepository: Send + Sync {
    /// Persist a new item
    async fn save(&self, item: Item) -> DomainResult<()>;

    /// Find item by ID
    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<Item>>;

    /// Replace an existing item with the given value
    async fn update(&self, item: Item) -> DomainResult<()>;

    /// List items matching the filter, newest first
    async fn find_all(&self, filter: &ItemFilter) -> DomainResult<Vec<Item>>;
}
