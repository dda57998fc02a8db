//! Effective tax resolution
//!
//! Strict three-level cascade: item → subcategory → category, stopping at
//! the first explicit (non-null) setting. The cascade itself is a pure
//! function over optional settings; the service wraps it with repository
//! lookups.

use std::sync::Arc;

use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::{DomainError, DomainResult, Item, RepositoryProvider};

/// Resolved tax for an item.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, ToSchema)]
pub struct EffectiveTax {
    pub applicable: bool,
    pub percentage: f64,
}

impl EffectiveTax {
    /// Terminal fallback: not applicable, 0%.
    pub fn none() -> Self {
        Self {
            applicable: false,
            percentage: 0.0,
        }
    }
}

/// One level's tax setting. `applicable = None` means "defer to the next
/// level"; a missing percentage on an explicit level counts as 0.
#[derive(Debug, Clone, Copy)]
pub struct TaxSetting {
    pub applicable: Option<bool>,
    pub percentage: Option<f64>,
}

impl TaxSetting {
    /// The effective tax if this level is explicit.
    pub fn explicit(&self) -> Option<EffectiveTax> {
        self.applicable.map(|applicable| EffectiveTax {
            applicable,
            percentage: self.percentage.unwrap_or(0.0),
        })
    }
}

/// First explicit level wins; with no explicit level the tax is
/// not-applicable/0.
pub fn resolve_cascade(levels: &[TaxSetting]) -> EffectiveTax {
    levels
        .iter()
        .find_map(TaxSetting::explicit)
        .unwrap_or_else(EffectiveTax::none)
}

pub struct TaxService {
    repos: Arc<dyn RepositoryProvider>,
}

impl TaxService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    /// Resolve the effective tax for an item.
    ///
    /// Parent records are loaded lazily: the subcategory (and its parent
    /// category) are only fetched when the item itself has no explicit
    /// setting.
    pub async fn resolve(&self, item: &Item) -> DomainResult<EffectiveTax> {
        let item_level = TaxSetting {
            applicable: item.tax_applicable,
            percentage: item.tax_percentage,
        };
        if let Some(effective) = item_level.explicit() {
            return Ok(effective);
        }

        if let Some(sub_id) = item.subcategory_id {
            let sub = self
                .repos
                .subcategories()
                .find_by_id(sub_id)
                .await?
                .ok_or_else(|| DomainError::not_found("Subcategory", sub_id))?;

            let sub_level = TaxSetting {
                applicable: sub.tax_applicable,
                percentage: sub.tax_percentage,
            };
            if let Some(effective) = sub_level.explicit() {
                return Ok(effective);
            }

            let category = self
                .repos
                .categories()
                .find_by_id(sub.category_id)
                .await?
                .ok_or_else(|| DomainError::not_found("Category", sub.category_id))?;

            return Ok(resolve_cascade(&[TaxSetting {
                applicable: Some(category.tax_applicable),
                percentage: category.tax_percentage,
            }]));
        }

        if let Some(cat_id) = item.category_id {
            let category = self
                .repos
                .categories()
                .find_by_id(cat_id)
                .await?
                .ok_or_else(|| DomainError::not_found("Category", cat_id))?;

            return Ok(resolve_cascade(&[TaxSetting {
                applicable: Some(category.tax_applicable),
                percentage: category.tax_percentage,
            }]));
        }

        // Unreachable given the item invariant (exactly one parent), but
        // the contract still defines an answer.
        Ok(EffectiveTax::none())
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn level(applicable: Option<bool>, percentage: Option<f64>) -> TaxSetting {
        TaxSetting {
            applicable,
            percentage,
        }
    }

    #[test]
    fn first_explicit_level_wins() {
        let tax = resolve_cascade(&[
            level(Some(true), Some(18.0)),
            level(Some(false), None),
        ]);
        assert!(tax.applicable);
        assert_eq!(tax.percentage, 18.0);
    }

    #[test]
    fn deferring_level_falls_through() {
        let tax = resolve_cascade(&[
            level(None, Some(99.0)), // percentage alone is not explicit
            level(Some(true), Some(5.0)),
        ]);
        assert!(tax.applicable);
        assert_eq!(tax.percentage, 5.0);
    }

    #[test]
    fn explicit_false_stops_the_cascade() {
        let tax = resolve_cascade(&[
            level(Some(false), None),
            level(Some(true), Some(20.0)),
        ]);
        assert!(!tax.applicable);
        assert_eq!(tax.percentage, 0.0);
    }

    #[test]
    fn missing_percentage_counts_as_zero() {
        let tax = resolve_cascade(&[level(Some(true), None)]);
        assert!(tax.applicable);
        assert_eq!(tax.percentage, 0.0);
    }

    #[test]
    fn empty_cascade_is_not_applicable() {
        let tax = resolve_cascade(&[]);
        assert!(!tax.applicable);
        assert_eq!(tax.percentage, 0.0);
    }
}
