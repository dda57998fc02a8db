//! Category and subcategory repository interfaces

use async_trait::async_trait;
use uuid::Uuid;

use super::model::{Category, Subcategory};
use crate::domain::DomainResult;

#[async_trait]
pub trait CategoryRepository: Send + Sync {
    async fn save(&self, category: Category) -> DomainResult<()>;

    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<Category>>;

    async fn update(&self, category: Category) -> DomainResult<()>;

    async fn find_all(&self) -> DomainResult<Vec<Category>>;
}

#[async_trait]
pub trait SubcategoryRepository: Send + Sync {
    async fn save(&self, subcategory: Subcategory) -> DomainResult<()>;

    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<Subcategory>>;

    async fn update(&self, subcategory: Subcategory) -> DomainResult<()>;

    /// Subcategories under one parent category
    async fn find_by_category(&self, category_id: Uuid) -> DomainResult<Vec<Subcategory>>;
}
