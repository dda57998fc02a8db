//! SeaORM implementation of AddonRepository

use async_trait::async_trait;
use log::debug;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use crate::domain::addon::{Addon, AddonRepository};
use crate::domain::DomainResult;
use crate::infrastructure::database::entities::addon;

use super::db_err;

pub struct SeaOrmAddonRepository {
    db: DatabaseConnection,
}

impl SeaOrmAddonRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn model_to_domain(m: addon::Model) -> Addon {
    Addon {
        id: m.id,
        item_id: m.item_id,
        name: m.name,
        price: m.price,
        is_mandatory: m.is_mandatory,
        group: m.group,
        is_active: m.is_active,
        created_at: m.created_at,
        updated_at: m.updated_at,
    }
}

#[async_trait]
impl AddonRepository for SeaOrmAddonRepository {
    async fn save(&self, a: Addon) -> DomainResult<()> {
        debug!("Saving addon: {} for item {}", a.id, a.item_id);

        let model = addon::ActiveModel {
            id: Set(a.id),
            item_id: Set(a.item_id),
            name: Set(a.name),
            price: Set(a.price),
            is_mandatory: Set(a.is_mandatory),
            group: Set(a.group),
            is_active: Set(a.is_active),
            created_at: Set(a.created_at),
            updated_at: Set(a.updated_at),
        };
        model.insert(&self.db).await.map_err(db_err)?;
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<Addon>> {
        let model = addon::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(model_to_domain))
    }

    async fn find_by_item(&self, item_id: Uuid) -> DomainResult<Vec<Addon>> {
        let models = addon::Entity::find()
            .filter(addon::Column::ItemId.eq(item_id))
            .order_by_asc(addon::Column::Name)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }

    async fn find_selected(&self, item_id: Uuid, ids: &[Uuid]) -> DomainResult<Vec<Addon>> {
        let models = addon::Entity::find()
            .filter(addon::Column::ItemId.eq(item_id))
            .filter(addon::Column::IsActive.eq(true))
            .filter(addon::Column::Id.is_in(ids.iter().copied()))
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }
}
