//! SeaORM implementation of ItemRepository

use async_trait::async_trait;
use log::debug;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use crate::domain::item::{Availability, Item, ItemFilter, ItemRepository, PricingRule};
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::entities::item;

use super::db_err;

pub struct SeaOrmItemRepository {
    db: DatabaseConnection,
}

impl SeaOrmItemRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn model_to_domain(m: item::Model) -> DomainResult<Item> {
    let pricing: PricingRule = serde_json::from_value(m.pricing)
        .map_err(|e| DomainError::Storage(format!("corrupt pricing payload: {}", e)))?;
    let availability: Option<Availability> = m
        .availability
        .map(serde_json::from_value)
        .transpose()
        .map_err(|e| DomainError::Storage(format!("corrupt availability payload: {}", e)))?;

    Ok(Item {
        id: m.id,
        name: m.name,
        description: m.description,
        image: m.image,
        category_id: m.category_id,
        subcategory_id: m.subcategory_id,
        tax_applicable: m.tax_applicable,
        tax_percentage: m.tax_percentage,
        pricing,
        is_bookable: m.is_bookable,
        availability,
        is_active: m.is_active,
        created_at: m.created_at,
        updated_at: m.updated_at,
    })
}

fn domain_to_active(i: Item) -> DomainResult<item::ActiveModel> {
    let pricing = serde_json::to_value(&i.pricing)
        .map_err(|e| DomainError::Storage(format!("unserializable pricing: {}", e)))?;
    let availability = i
        .availability
        .as_ref()
        .map(serde_json::to_value)
        .transpose()
        .map_err(|e| DomainError::Storage(format!("unserializable availability: {}", e)))?;

    Ok(item::ActiveModel {
        id: Set(i.id),
        name: Set(i.name),
        description: Set(i.description),
        image: Set(i.image),
        category_id: Set(i.category_id),
        subcategory_id: Set(i.subcategory_id),
        tax_applicable: Set(i.tax_applicable),
        tax_percentage: Set(i.tax_percentage),
        pricing: Set(pricing),
        is_bookable: Set(i.is_bookable),
        availability: Set(availability),
        is_active: Set(i.is_active),
        created_at: Set(i.created_at),
        updated_at: Set(i.updated_at),
    })
}

// ── ItemRepository impl ─────────────────────────────────────────

#[async_trait]
impl ItemRepository for SeaOrmItemRepository {
    async fn save(&self, item: Item) -> DomainResult<()> {
        debug!("Saving item: {}", item.id);
        let model = domain_to_active(item)?;
        model.insert(&self.db).await.map_err(db_err)?;
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<Item>> {
        let model = item::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        model.map(model_to_domain).transpose()
    }

    async fn update(&self, item: Item) -> DomainResult<()> {
        debug!("Updating item: {}", item.id);

        let existing = item::Entity::find_by_id(item.id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        if existing.is_none() {
            return Err(DomainError::not_found("Item", item.id));
        }

        let model = domain_to_active(item)?;
        model.update(&self.db).await.map_err(db_err)?;
        Ok(())
    }

    async fn find_all(&self, filter: &ItemFilter) -> DomainResult<Vec<Item>> {
        let mut query = item::Entity::find();
        if let Some(category_id) = filter.category_id {
            query = query.filter(item::Column::CategoryId.eq(category_id));
        }
        if let Some(subcategory_id) = filter.subcategory_id {
            query = query.filter(item::Column::SubcategoryId.eq(subcategory_id));
        }
        if let Some(active) = filter.active {
            query = query.filter(item::Column::IsActive.eq(active));
        }

        let models = query
            .order_by_desc(item::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        models.into_iter().map(model_to_domain).collect()
    }
}
