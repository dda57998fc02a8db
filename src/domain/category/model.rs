//! Category and subcategory domain entities

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::{DomainError, DomainResult};

/// Top-level catalog category.
///
/// The ultimate tax fallback: `tax_applicable` is never null here, so the
/// cascade (item → subcategory → category) always terminates.
#[derive(Debug, Clone)]
pub struct Category {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub image: Option<String>,
    pub tax_applicable: bool,
    pub tax_percentage: Option<f64>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Category {
    /// `tax_percentage` is mandatory once tax is applicable.
    pub fn validate(&self) -> DomainResult<()> {
        if self.tax_applicable && self.tax_percentage.is_none() {
            return Err(DomainError::Validation(
                "tax_percentage is required when tax_applicable is true".into(),
            ));
        }
        if let Some(pct) = self.tax_percentage {
            if !pct.is_finite() || pct < 0.0 {
                return Err(DomainError::Validation(
                    "tax_percentage must be non-negative".into(),
                ));
            }
        }
        Ok(())
    }

    pub fn deactivated(mut self) -> Self {
        self.is_active = false;
        self.updated_at = Utc::now();
        self
    }
}

/// Subcategory under a parent category.
///
/// Tax fields are nullable; null defers to the parent category.
#[derive(Debug, Clone)]
pub struct Subcategory {
    pub id: Uuid,
    pub category_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub image: Option<String>,
    pub tax_applicable: Option<bool>,
    pub tax_percentage: Option<f64>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Subcategory {
    pub fn validate(&self) -> DomainResult<()> {
        if let Some(pct) = self.tax_percentage {
            if !pct.is_finite() || pct < 0.0 {
                return Err(DomainError::Validation(
                    "tax_percentage must be non-negative".into(),
                ));
            }
        }
        Ok(())
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn category(applicable: bool, pct: Option<f64>) -> Category {
        Category {
            id: Uuid::new_v4(),
            name: "Beverages".into(),
            description: None,
            image: None,
            tax_applicable: applicable,
            tax_percentage: pct,
            is_active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn applicable_tax_requires_percentage() {
        assert!(category(true, None).validate().is_err());
        assert!(category(true, Some(18.0)).validate().is_ok());
        assert!(category(false, None).validate().is_ok());
    }

    #[test]
    fn negative_percentage_rejected() {
        assert!(category(true, Some(-5.0)).validate().is_err());
    }

    #[test]
    fn deactivated_clears_active_flag() {
        let c = category(false, None).deactivated();
        assert!(!c.is_active);
    }
}
