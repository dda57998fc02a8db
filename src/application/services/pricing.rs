//! Price quoting
//!
//! Dispatches on the item's pricing rule, aggregates selected add-ons and
//! applies the resolved tax to produce a full breakdown.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;
use utoipa::ToSchema;
use uuid::Uuid;

use super::tax::{EffectiveTax, TaxService};
use crate::domain::{DomainError, DomainResult, PricingDetail, RepositoryProvider};

/// Round a monetary value to 2 decimal places, half away from zero.
/// The one rounding step in the engine: applied to the tax amount and the
/// grand total, never to configured prices.
pub fn round_money(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Strategy-specific quote inputs. All optional; each strategy takes what
/// it requires and fails with a validation error when it is missing.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct PricingContext {
    /// Duration in hours (required by TIERED)
    pub duration: Option<f64>,
    /// Reference time `HH:MM` (DYNAMIC; defaults to now)
    pub time: Option<String>,
    /// Selected add-on ids
    #[serde(default)]
    pub addons: Vec<Uuid>,
}

/// Tax portion of a quote.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct TaxBreakdown {
    pub applicable: bool,
    pub percentage: f64,
    pub amount: f64,
}

/// Full price quote for one item.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PriceBreakdown {
    pub item_name: String,
    /// Pricing rule tag: STATIC, TIERED, COMPLIMENTARY, DISCOUNTED, DYNAMIC
    pub pricing_rule: String,
    pub pricing_details: PricingDetail,
    pub base_price: f64,
    pub addon_total: f64,
    pub subtotal: f64,
    pub tax: TaxBreakdown,
    pub grand_total: f64,
}

pub struct PricingService {
    repos: Arc<dyn RepositoryProvider>,
    tax: TaxService,
}

impl PricingService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        let tax = TaxService::new(repos.clone());
        Self { repos, tax }
    }

    /// Quote the final price for an item under the given context.
    pub async fn quote(&self, item_id: Uuid, context: PricingContext) -> DomainResult<PriceBreakdown> {
        let item = self
            .repos
            .items()
            .find_by_id(item_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Item", item_id))?;

        if !item.is_active {
            return Err(DomainError::InvalidState("Item is not active".into()));
        }

        let (base_price, pricing_details) = item
            .pricing
            .base_price(context.duration, context.time.as_deref())?;

        let addon_total = self.addon_total(item_id, &context.addons).await?;
        let tax = self.tax.resolve(&item).await?;

        let subtotal = base_price + addon_total;
        let tax_amount = Self::tax_amount(subtotal, tax);
        let grand_total = round_money(subtotal + tax_amount);

        debug!(
            item = %item.name,
            rule = item.pricing.kind(),
            base_price,
            addon_total,
            tax_amount,
            grand_total,
            "price quoted"
        );

        Ok(PriceBreakdown {
            item_name: item.name,
            pricing_rule: item.pricing.kind().to_string(),
            pricing_details,
            base_price,
            addon_total,
            subtotal,
            tax: TaxBreakdown {
                applicable: tax.applicable,
                percentage: tax.percentage,
                amount: tax_amount,
            },
            grand_total,
        })
    }

    /// Sum of the selected add-ons that belong to the item and are active.
    /// Foreign, inactive or unknown ids are silently excluded.
    pub async fn addon_total(&self, item_id: Uuid, addon_ids: &[Uuid]) -> DomainResult<f64> {
        if addon_ids.is_empty() {
            return Ok(0.0);
        }
        let addons = self.repos.addons().find_selected(item_id, addon_ids).await?;
        Ok(addons.iter().map(|a| a.price).sum())
    }

    fn tax_amount(subtotal: f64, tax: EffectiveTax) -> f64 {
        if tax.applicable {
            round_money(subtotal * tax.percentage / 100.0)
        } else {
            0.0
        }
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Addon, Category, Item, PricingRule, Subcategory, Tier};
    use crate::infrastructure::storage::memory::InMemoryRepositoryProvider;
    use chrono::Utc;

    fn provider() -> Arc<InMemoryRepositoryProvider> {
        Arc::new(InMemoryRepositoryProvider::new())
    }

    fn category(applicable: bool, pct: Option<f64>) -> Category {
        Category {
            id: Uuid::new_v4(),
            name: "Rooms".into(),
            description: None,
            image: None,
            tax_applicable: applicable,
            tax_percentage: pct,
            is_active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn item(pricing: PricingRule, category_id: Uuid) -> Item {
        Item {
            id: Uuid::new_v4(),
            name: "Conference room".into(),
            description: None,
            image: None,
            category_id: Some(category_id),
            subcategory_id: None,
            tax_applicable: None,
            tax_percentage: None,
            pricing,
            is_bookable: false,
            availability: None,
            is_active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn addon(item_id: Uuid, price: f64, active: bool) -> Addon {
        Addon {
            id: Uuid::new_v4(),
            item_id,
            name: "Projector".into(),
            price,
            is_mandatory: false,
            group: None,
            is_active: active,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    async fn seed(
        repos: &Arc<InMemoryRepositoryProvider>,
        cat: Category,
        it: Item,
    ) -> (Uuid, Uuid) {
        let (cat_id, item_id) = (cat.id, it.id);
        repos.categories().save(cat).await.unwrap();
        repos.items().save(it).await.unwrap();
        (cat_id, item_id)
    }

    #[tokio::test]
    async fn static_quote_with_tax_and_addons() {
        let repos = provider();
        let cat = category(true, Some(10.0));
        let it = item(PricingRule::Static { price: 100.0 }, cat.id);
        let (_, item_id) = seed(&repos, cat, it).await;

        let a1 = addon(item_id, 15.0, true);
        let a1_id = a1.id;
        repos.addons().save(a1).await.unwrap();

        let service = PricingService::new(repos.clone());
        let quote = service
            .quote(
                item_id,
                PricingContext {
                    addons: vec![a1_id],
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(quote.base_price, 100.0);
        assert_eq!(quote.addon_total, 15.0);
        assert_eq!(quote.subtotal, 115.0);
        assert!(quote.tax.applicable);
        assert_eq!(quote.tax.amount, 11.5);
        assert_eq!(quote.grand_total, 126.5);
        assert_eq!(quote.pricing_rule, "STATIC");
    }

    #[tokio::test]
    async fn foreign_and_inactive_addons_are_excluded() {
        let repos = provider();
        let cat = category(false, None);
        let it = item(PricingRule::Static { price: 50.0 }, cat.id);
        let (cat_id, item_id) = seed(&repos, cat, it).await;

        let other = item(PricingRule::Complimentary, cat_id);
        let other_id = other.id;
        repos.items().save(other).await.unwrap();

        let inactive = addon(item_id, 5.0, false);
        let foreign = addon(other_id, 7.0, true);
        let valid = addon(item_id, 3.0, true);
        let ids = vec![inactive.id, foreign.id, valid.id, Uuid::new_v4()];
        for a in [inactive, foreign, valid] {
            repos.addons().save(a).await.unwrap();
        }

        let service = PricingService::new(repos.clone());
        let quote = service
            .quote(
                item_id,
                PricingContext {
                    addons: ids,
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(quote.addon_total, 3.0);
        assert_eq!(quote.grand_total, 53.0);
    }

    #[tokio::test]
    async fn tiered_quote_uses_covering_tier() {
        let repos = provider();
        let cat = category(false, None);
        let it = item(
            PricingRule::Tiered {
                tiers: vec![
                    Tier {
                        max_duration: 2.0,
                        price: 50.0,
                    },
                    Tier {
                        max_duration: 5.0,
                        price: 100.0,
                    },
                ],
            },
            cat.id,
        );
        let (_, item_id) = seed(&repos, cat, it).await;

        let service = PricingService::new(repos.clone());
        let quote = service
            .quote(
                item_id,
                PricingContext {
                    duration: Some(3.0),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(quote.base_price, 100.0);
    }

    #[tokio::test]
    async fn item_tax_override_beats_category() {
        let repos = provider();
        let cat = category(true, Some(20.0));
        let mut it = item(PricingRule::Static { price: 100.0 }, cat.id);
        it.tax_applicable = Some(false);
        let (_, item_id) = seed(&repos, cat, it).await;

        let service = PricingService::new(repos.clone());
        let quote = service
            .quote(item_id, PricingContext::default())
            .await
            .unwrap();

        assert!(!quote.tax.applicable);
        assert_eq!(quote.tax.amount, 0.0);
        assert_eq!(quote.grand_total, 100.0);
    }

    #[tokio::test]
    async fn subcategory_tax_beats_category() {
        let repos = provider();
        let cat = category(true, Some(20.0));
        let cat_id = cat.id;
        repos.categories().save(cat).await.unwrap();

        let sub = Subcategory {
            id: Uuid::new_v4(),
            category_id: cat_id,
            name: "Suites".into(),
            description: None,
            image: None,
            tax_applicable: Some(true),
            tax_percentage: Some(5.0),
            is_active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let sub_id = sub.id;
        repos.subcategories().save(sub).await.unwrap();

        let mut it = item(PricingRule::Static { price: 100.0 }, cat_id);
        it.category_id = None;
        it.subcategory_id = Some(sub_id);
        let item_id = it.id;
        repos.items().save(it).await.unwrap();

        let service = PricingService::new(repos.clone());
        let quote = service
            .quote(item_id, PricingContext::default())
            .await
            .unwrap();

        assert_eq!(quote.tax.percentage, 5.0);
        assert_eq!(quote.tax.amount, 5.0);
    }

    #[tokio::test]
    async fn null_subcategory_defers_to_parent_category() {
        let repos = provider();
        let cat = category(true, Some(12.0));
        let cat_id = cat.id;
        repos.categories().save(cat).await.unwrap();

        let sub = Subcategory {
            id: Uuid::new_v4(),
            category_id: cat_id,
            name: "Suites".into(),
            description: None,
            image: None,
            tax_applicable: None,
            tax_percentage: None,
            is_active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let sub_id = sub.id;
        repos.subcategories().save(sub).await.unwrap();

        let mut it = item(PricingRule::Static { price: 100.0 }, cat_id);
        it.category_id = None;
        it.subcategory_id = Some(sub_id);
        let item_id = it.id;
        repos.items().save(it).await.unwrap();

        let service = PricingService::new(repos.clone());
        let quote = service
            .quote(item_id, PricingContext::default())
            .await
            .unwrap();

        assert_eq!(quote.tax.percentage, 12.0);
    }

    #[tokio::test]
    async fn inactive_item_is_invalid_state() {
        let repos = provider();
        let cat = category(false, None);
        let mut it = item(PricingRule::Static { price: 10.0 }, cat.id);
        it.is_active = false;
        let (_, item_id) = seed(&repos, cat, it).await;

        let service = PricingService::new(repos.clone());
        let err = service
            .quote(item_id, PricingContext::default())
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::InvalidState(_)));
    }

    #[tokio::test]
    async fn unknown_item_is_not_found() {
        let repos = provider();
        let service = PricingService::new(repos.clone());
        let err = service
            .quote(Uuid::new_v4(), PricingContext::default())
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));
    }

    #[test]
    fn round_money_is_half_away_from_zero() {
        assert_eq!(round_money(11.456), 11.46);
        assert_eq!(round_money(11.454), 11.45);
        assert_eq!(round_money(-11.456), -11.46);
        assert_eq!(round_money(0.0), 0.0);
    }
}
