//! Addon domain entity

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::{DomainError, DomainResult};

/// Optional add-on scoped to one item.
#[derive(Debug, Clone)]
pub struct Addon {
    pub id: Uuid,
    pub item_id: Uuid,
    pub name: String,
    pub price: f64,
    pub is_mandatory: bool,
    /// Free-form grouping label (e.g. "toppings")
    pub group: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Addon {
    pub fn validate(&self) -> DomainResult<()> {
        if !self.price.is_finite() || self.price < 0.0 {
            return Err(DomainError::Validation(
                "Addon price must be non-negative".into(),
            ));
        }
        Ok(())
    }
}
