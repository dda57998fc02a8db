//! Addon repository interface

use async_trait::async_trait;
use uuid::Uuid;

use super::model::Addon;
use crate::domain::DomainResult;

#[async_trait]
pub trait AddonRepository: Send + Sync {
    async fn save(&self, addon: Addon) -> DomainResult<()>;

    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<Addon>>;

    /// All add-ons belonging to one item
    async fn find_by_item(&self, item_id: Uuid) -> DomainResult<Vec<Addon>>;

    /// Active add-ons belonging to `item_id` whose id is in `ids`.
    /// Foreign or inactive ids are simply not returned.
    async fn find_selected(&self, item_id: Uuid, ids: &[Uuid]) -> DomainResult<Vec<Addon>>;
}
