//! Catalog CRUD: categories, subcategories, items, add-ons
//!
//! Thin layer over the repositories; its real job is configuration-time
//! validation (pricing payloads, availability patterns, the
//! category-XOR-subcategory invariant) so quote time can assume
//! well-formed records.

use std::sync::Arc;

use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use crate::domain::{
    Addon, Availability, Category, DomainError, DomainResult, Item, ItemFilter, PricingRule,
    RepositoryProvider, Subcategory,
};

#[derive(Debug, Clone)]
pub struct NewCategory {
    pub name: String,
    pub description: Option<String>,
    pub image: Option<String>,
    pub tax_applicable: bool,
    pub tax_percentage: Option<f64>,
}

#[derive(Debug, Clone, Default)]
pub struct CategoryUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
    pub tax_applicable: Option<bool>,
    pub tax_percentage: Option<f64>,
}

#[derive(Debug, Clone)]
pub struct NewSubcategory {
    pub name: String,
    pub description: Option<String>,
    pub image: Option<String>,
    /// `None` defers to the parent category
    pub tax_applicable: Option<bool>,
    pub tax_percentage: Option<f64>,
}

#[derive(Debug, Clone)]
pub struct NewItem {
    pub name: String,
    pub description: Option<String>,
    pub image: Option<String>,
    pub category_id: Option<Uuid>,
    pub subcategory_id: Option<Uuid>,
    pub tax_applicable: Option<bool>,
    pub tax_percentage: Option<f64>,
    pub pricing: PricingRule,
    pub is_bookable: bool,
    pub availability: Option<Availability>,
}

#[derive(Debug, Clone, Default)]
pub struct ItemUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
    pub tax_applicable: Option<bool>,
    pub tax_percentage: Option<f64>,
    pub pricing: Option<PricingRule>,
    pub is_bookable: Option<bool>,
    pub availability: Option<Availability>,
}

#[derive(Debug, Clone)]
pub struct NewAddon {
    pub name: String,
    pub price: f64,
    pub is_mandatory: bool,
    pub group: Option<String>,
}

pub struct CatalogService {
    repos: Arc<dyn RepositoryProvider>,
}

impl CatalogService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    // ── Categories ─────────────────────────────────────────────

    pub async fn create_category(&self, data: NewCategory) -> DomainResult<Category> {
        let now = Utc::now();
        let category = Category {
            id: Uuid::new_v4(),
            name: data.name,
            description: data.description,
            image: data.image,
            tax_applicable: data.tax_applicable,
            tax_percentage: data.tax_percentage,
            is_active: true,
            created_at: now,
            updated_at: now,
        };
        category.validate()?;
        self.repos.categories().save(category.clone()).await?;
        info!(category = %category.id, name = %category.name, "category created");
        Ok(category)
    }

    pub async fn get_category(&self, id: Uuid) -> DomainResult<Category> {
        self.repos
            .categories()
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Category", id))
    }

    pub async fn list_categories(&self) -> DomainResult<Vec<Category>> {
        self.repos.categories().find_all().await
    }

    pub async fn update_category(&self, id: Uuid, data: CategoryUpdate) -> DomainResult<Category> {
        let mut category = self.get_category(id).await?;
        if let Some(name) = data.name {
            category.name = name;
        }
        if let Some(description) = data.description {
            category.description = Some(description);
        }
        if let Some(image) = data.image {
            category.image = Some(image);
        }
        if let Some(applicable) = data.tax_applicable {
            category.tax_applicable = applicable;
        }
        if let Some(pct) = data.tax_percentage {
            category.tax_percentage = Some(pct);
        }
        category.updated_at = Utc::now();
        category.validate()?;
        self.repos.categories().update(category.clone()).await?;
        Ok(category)
    }

    /// Soft delete: load, compute the deactivated value, persist.
    pub async fn delete_category(&self, id: Uuid) -> DomainResult<Category> {
        let category = self.get_category(id).await?.deactivated();
        self.repos.categories().update(category.clone()).await?;
        info!(category = %id, "category deactivated");
        Ok(category)
    }

    // ── Subcategories ──────────────────────────────────────────

    pub async fn create_subcategory(
        &self,
        category_id: Uuid,
        data: NewSubcategory,
    ) -> DomainResult<Subcategory> {
        // Parent must exist.
        self.get_category(category_id).await?;

        let now = Utc::now();
        let subcategory = Subcategory {
            id: Uuid::new_v4(),
            category_id,
            name: data.name,
            description: data.description,
            image: data.image,
            tax_applicable: data.tax_applicable,
            tax_percentage: data.tax_percentage,
            is_active: true,
            created_at: now,
            updated_at: now,
        };
        subcategory.validate()?;
        self.repos.subcategories().save(subcategory.clone()).await?;
        Ok(subcategory)
    }

    pub async fn list_subcategories(&self, category_id: Uuid) -> DomainResult<Vec<Subcategory>> {
        self.repos.subcategories().find_by_category(category_id).await
    }

    // ── Items ──────────────────────────────────────────────────

    pub async fn create_item(&self, data: NewItem) -> DomainResult<Item> {
        match (data.category_id, data.subcategory_id) {
            (Some(_), Some(_)) => {
                return Err(DomainError::Validation(
                    "Item cannot belong to both category and subcategory".into(),
                ))
            }
            (None, None) => {
                return Err(DomainError::Validation(
                    "Item must belong to either category or subcategory".into(),
                ))
            }
            (Some(cat_id), None) => {
                self.get_category(cat_id).await?;
            }
            (None, Some(sub_id)) => {
                self.repos
                    .subcategories()
                    .find_by_id(sub_id)
                    .await?
                    .ok_or_else(|| DomainError::not_found("Subcategory", sub_id))?;
            }
        }

        data.pricing.validate()?;
        if let Some(availability) = &data.availability {
            availability.validate()?;
        }

        let now = Utc::now();
        let item = Item {
            id: Uuid::new_v4(),
            name: data.name,
            description: data.description,
            image: data.image,
            category_id: data.category_id,
            subcategory_id: data.subcategory_id,
            tax_applicable: data.tax_applicable,
            tax_percentage: data.tax_percentage,
            pricing: data.pricing,
            is_bookable: data.is_bookable,
            availability: data.availability,
            is_active: true,
            created_at: now,
            updated_at: now,
        };
        self.repos.items().save(item.clone()).await?;
        info!(item = %item.id, name = %item.name, rule = item.pricing.kind(), "item created");
        Ok(item)
    }

    pub async fn get_item(&self, id: Uuid) -> DomainResult<Item> {
        self.repos
            .items()
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Item", id))
    }

    pub async fn list_items(&self, filter: ItemFilter) -> DomainResult<Vec<Item>> {
        self.repos.items().find_all(&filter).await
    }

    pub async fn update_item(&self, id: Uuid, data: ItemUpdate) -> DomainResult<Item> {
        let mut item = self.get_item(id).await?;

        if let Some(pricing) = data.pricing {
            pricing.validate()?;
            item.pricing = pricing;
        }
        if let Some(availability) = data.availability {
            availability.validate()?;
            item.availability = Some(availability);
        }
        if let Some(name) = data.name {
            item.name = name;
        }
        if let Some(description) = data.description {
            item.description = Some(description);
        }
        if let Some(image) = data.image {
            item.image = Some(image);
        }
        if let Some(applicable) = data.tax_applicable {
            item.tax_applicable = Some(applicable);
        }
        if let Some(pct) = data.tax_percentage {
            item.tax_percentage = Some(pct);
        }
        if let Some(bookable) = data.is_bookable {
            item.is_bookable = bookable;
        }
        item.updated_at = Utc::now();

        self.repos.items().update(item.clone()).await?;
        Ok(item)
    }

    /// Soft delete. Existing bookings are untouched by contract.
    pub async fn delete_item(&self, id: Uuid) -> DomainResult<Item> {
        let item = self.get_item(id).await?.deactivated();
        self.repos.items().update(item.clone()).await?;
        info!(item = %id, "item deactivated");
        Ok(item)
    }

    // ── Add-ons ────────────────────────────────────────────────

    pub async fn create_addon(&self, item_id: Uuid, data: NewAddon) -> DomainResult<Addon> {
        self.get_item(item_id).await?;

        let now = Utc::now();
        let addon = Addon {
            id: Uuid::new_v4(),
            item_id,
            name: data.name,
            price: data.price,
            is_mandatory: data.is_mandatory,
            group: data.group,
            is_active: true,
            created_at: now,
            updated_at: now,
        };
        addon.validate()?;
        self.repos.addons().save(addon.clone()).await?;
        Ok(addon)
    }

    pub async fn list_addons(&self, item_id: Uuid) -> DomainResult<Vec<Addon>> {
        self.repos.addons().find_by_item(item_id).await
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Tier;
    use crate::infrastructure::storage::memory::InMemoryRepositoryProvider;

    fn service() -> (CatalogService, Arc<InMemoryRepositoryProvider>) {
        let repos = Arc::new(InMemoryRepositoryProvider::new());
        (CatalogService::new(repos.clone()), repos)
    }

    fn new_category() -> NewCategory {
        NewCategory {
            name: "Facilities".into(),
            description: None,
            image: None,
            tax_applicable: false,
            tax_percentage: None,
        }
    }

    fn new_item(category_id: Option<Uuid>, subcategory_id: Option<Uuid>) -> NewItem {
        NewItem {
            name: "Sauna".into(),
            description: None,
            image: None,
            category_id,
            subcategory_id,
            tax_applicable: None,
            tax_percentage: None,
            pricing: PricingRule::Static { price: 30.0 },
            is_bookable: false,
            availability: None,
        }
    }

    #[tokio::test]
    async fn item_requires_exactly_one_parent() {
        let (catalog, _) = service();
        let category = catalog.create_category(new_category()).await.unwrap();

        let err = catalog
            .create_item(new_item(None, None))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));

        let err = catalog
            .create_item(new_item(Some(category.id), Some(Uuid::new_v4())))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));

        catalog
            .create_item(new_item(Some(category.id), None))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn item_parent_must_exist() {
        let (catalog, _) = service();
        let err = catalog
            .create_item(new_item(Some(Uuid::new_v4()), None))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));

        let err = catalog
            .create_item(new_item(None, Some(Uuid::new_v4())))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));
    }

    #[tokio::test]
    async fn overlapping_tiers_rejected_at_creation() {
        let (catalog, _) = service();
        let category = catalog.create_category(new_category()).await.unwrap();

        let mut item = new_item(Some(category.id), None);
        item.pricing = PricingRule::Tiered {
            tiers: vec![
                Tier {
                    max_duration: 3.0,
                    price: 10.0,
                },
                Tier {
                    max_duration: 3.0,
                    price: 20.0,
                },
            ],
        };
        let err = catalog.create_item(item).await.unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[tokio::test]
    async fn category_tax_percentage_required_when_applicable() {
        let (catalog, _) = service();
        let mut data = new_category();
        data.tax_applicable = true;
        let err = catalog.create_category(data).await.unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[tokio::test]
    async fn subcategory_requires_existing_parent() {
        let (catalog, _) = service();
        let err = catalog
            .create_subcategory(
                Uuid::new_v4(),
                NewSubcategory {
                    name: "Indoor".into(),
                    description: None,
                    image: None,
                    tax_applicable: None,
                    tax_percentage: None,
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));
    }

    #[tokio::test]
    async fn delete_item_is_soft() {
        let (catalog, _) = service();
        let category = catalog.create_category(new_category()).await.unwrap();
        let item = catalog
            .create_item(new_item(Some(category.id), None))
            .await
            .unwrap();

        let deleted = catalog.delete_item(item.id).await.unwrap();
        assert!(!deleted.is_active);

        // Still loadable after deactivation.
        let loaded = catalog.get_item(item.id).await.unwrap();
        assert!(!loaded.is_active);
    }

    #[tokio::test]
    async fn update_item_revalidates_pricing() {
        let (catalog, _) = service();
        let category = catalog.create_category(new_category()).await.unwrap();
        let item = catalog
            .create_item(new_item(Some(category.id), None))
            .await
            .unwrap();

        let err = catalog
            .update_item(
                item.id,
                ItemUpdate {
                    pricing: Some(PricingRule::Static { price: -5.0 }),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));

        // Original pricing untouched after the failed update.
        let loaded = catalog.get_item(item.id).await.unwrap();
        assert_eq!(loaded.pricing, PricingRule::Static { price: 30.0 });
    }

    #[tokio::test]
    async fn addon_requires_existing_item_and_valid_price() {
        let (catalog, _) = service();
        let category = catalog.create_category(new_category()).await.unwrap();
        let item = catalog
            .create_item(new_item(Some(category.id), None))
            .await
            .unwrap();

        let err = catalog
            .create_addon(
                Uuid::new_v4(),
                NewAddon {
                    name: "Towels".into(),
                    price: 5.0,
                    is_mandatory: false,
                    group: None,
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));

        let err = catalog
            .create_addon(
                item.id,
                NewAddon {
                    name: "Towels".into(),
                    price: -1.0,
                    is_mandatory: false,
                    group: None,
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));

        let addon = catalog
            .create_addon(
                item.id,
                NewAddon {
                    name: "Towels".into(),
                    price: 5.0,
                    is_mandatory: false,
                    group: None,
                },
            )
            .await
            .unwrap();
        assert!(addon.is_active);
    }
}
