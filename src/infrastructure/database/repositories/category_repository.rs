//! SeaORM implementations of CategoryRepository and SubcategoryRepository

use async_trait::async_trait;
use log::debug;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use crate::domain::category::{
    Category, CategoryRepository, Subcategory, SubcategoryRepository,
};
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::entities::{category, subcategory};

use super::db_err;

pub struct SeaOrmCategoryRepository {
    db: DatabaseConnection,
}

impl SeaOrmCategoryRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn category_to_domain(m: category::Model) -> Category {
    Category {
        id: m.id,
        name: m.name,
        description: m.description,
        image: m.image,
        tax_applicable: m.tax_applicable,
        tax_percentage: m.tax_percentage,
        is_active: m.is_active,
        created_at: m.created_at,
        updated_at: m.updated_at,
    }
}

fn category_to_active(c: Category) -> category::ActiveModel {
    category::ActiveModel {
        id: Set(c.id),
        name: Set(c.name),
        description: Set(c.description),
        image: Set(c.image),
        tax_applicable: Set(c.tax_applicable),
        tax_percentage: Set(c.tax_percentage),
        is_active: Set(c.is_active),
        created_at: Set(c.created_at),
        updated_at: Set(c.updated_at),
    }
}

#[async_trait]
impl CategoryRepository for SeaOrmCategoryRepository {
    async fn save(&self, c: Category) -> DomainResult<()> {
        debug!("Saving category: {}", c.id);
        category_to_active(c).insert(&self.db).await.map_err(db_err)?;
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<Category>> {
        let model = category::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(category_to_domain))
    }

    async fn update(&self, c: Category) -> DomainResult<()> {
        debug!("Updating category: {}", c.id);

        let existing = category::Entity::find_by_id(c.id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        if existing.is_none() {
            return Err(DomainError::not_found("Category", c.id));
        }

        category_to_active(c).update(&self.db).await.map_err(db_err)?;
        Ok(())
    }

    async fn find_all(&self) -> DomainResult<Vec<Category>> {
        let models = category::Entity::find()
            .order_by_asc(category::Column::Name)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(category_to_domain).collect())
    }
}

pub struct SeaOrmSubcategoryRepository {
    db: DatabaseConnection,
}

impl SeaOrmSubcategoryRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn subcategory_to_domain(m: subcategory::Model) -> Subcategory {
    Subcategory {
        id: m.id,
        category_id: m.category_id,
        name: m.name,
        description: m.description,
        image: m.image,
        tax_applicable: m.tax_applicable,
        tax_percentage: m.tax_percentage,
        is_active: m.is_active,
        created_at: m.created_at,
        updated_at: m.updated_at,
    }
}

fn subcategory_to_active(s: Subcategory) -> subcategory::ActiveModel {
    subcategory::ActiveModel {
        id: Set(s.id),
        category_id: Set(s.category_id),
        name: Set(s.name),
        description: Set(s.description),
        image: Set(s.image),
        tax_applicable: Set(s.tax_applicable),
        tax_percentage: Set(s.tax_percentage),
        is_active: Set(s.is_active),
        created_at: Set(s.created_at),
        updated_at: Set(s.updated_at),
    }
}

#[async_trait]
impl SubcategoryRepository for SeaOrmSubcategoryRepository {
    async fn save(&self, s: Subcategory) -> DomainResult<()> {
        debug!("Saving subcategory: {}", s.id);
        subcategory_to_active(s)
            .insert(&self.db)
            .await
            .map_err(db_err)?;
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<Subcategory>> {
        let model = subcategory::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(subcategory_to_domain))
    }

    async fn update(&self, s: Subcategory) -> DomainResult<()> {
        let existing = subcategory::Entity::find_by_id(s.id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        if existing.is_none() {
            return Err(DomainError::not_found("Subcategory", s.id));
        }

        subcategory_to_active(s)
            .update(&self.db)
            .await
            .map_err(db_err)?;
        Ok(())
    }

    async fn find_by_category(&self, category_id: Uuid) -> DomainResult<Vec<Subcategory>> {
        let models = subcategory::Entity::find()
            .filter(subcategory::Column::CategoryId.eq(category_id))
            .order_by_asc(subcategory::Column::Name)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(subcategory_to_domain).collect())
    }
}
