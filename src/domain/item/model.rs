//! Item domain entity and pricing rules

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::{DomainError, DomainResult};

/// Full weekday names used by availability patterns and booking dates.
pub const WEEKDAY_NAMES: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

/// Weekday name for a calendar date (e.g. `"Monday"`).
pub fn weekday_name(date: NaiveDate) -> String {
    date.format("%A").to_string()
}

/// Parse an `HH:MM` string into minutes since midnight.
pub fn slot_minutes(s: &str) -> Option<u32> {
    let t = NaiveTime::parse_from_str(s, "%H:%M").ok()?;
    use chrono::Timelike;
    Some(t.hour() * 60 + t.minute())
}

/// A fixed `(start, end)` time range a booking can occupy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct TimeSlot {
    /// Slot start, `HH:MM`
    pub start: String,
    /// Slot end, `HH:MM`
    pub end: String,
}

/// A `(max_duration, price)` band used by tiered pricing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Tier {
    /// Upper duration bound (inclusive), in hours
    pub max_duration: f64,
    pub price: f64,
}

/// A `(start, end, price)` window used by dynamic pricing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct TimeWindow {
    /// Window start, `HH:MM` (inclusive)
    pub start: String,
    /// Window end, `HH:MM` (exclusive)
    pub end: String,
    pub price: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DiscountType {
    Flat,
    Percentage,
}

impl std::fmt::Display for DiscountType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Flat => write!(f, "FLAT"),
            Self::Percentage => write!(f, "PERCENTAGE"),
        }
    }
}

/// Pricing strategy with one typed configuration payload per variant.
///
/// Serialized in the `{"type": "...", "config": {...}}` shape the API
/// exposes, so the wire format and the closed enum stay in lockstep.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(tag = "type", content = "config", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PricingRule {
    Static {
        price: f64,
    },
    Tiered {
        tiers: Vec<Tier>,
    },
    Complimentary,
    Discounted {
        base_price: f64,
        discount_type: DiscountType,
        discount_value: f64,
    },
    Dynamic {
        time_windows: Vec<TimeWindow>,
    },
}

/// Strategy-specific detail attached to a price breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PricingDetail {
    Static {
        price: f64,
    },
    Tiered {
        duration: f64,
        tier_used: String,
        price: f64,
    },
    Complimentary {
        message: String,
    },
    Discounted {
        original_price: f64,
        discount_type: DiscountType,
        discount_value: f64,
        discount_amount: f64,
        final_price: f64,
    },
    Dynamic {
        current_time: String,
        time_window: String,
        price: f64,
    },
}

impl PricingRule {
    /// Strategy tag as exposed on the wire.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Static { .. } => "STATIC",
            Self::Tiered { .. } => "TIERED",
            Self::Complimentary => "COMPLIMENTARY",
            Self::Discounted { .. } => "DISCOUNTED",
            Self::Dynamic { .. } => "DYNAMIC",
        }
    }

    /// Configuration-time validation. Runs on item create/update; quote
    /// time assumes a rule that passed this check.
    pub fn validate(&self) -> DomainResult<()> {
        match self {
            Self::Static { price } => {
                if !price.is_finite() || *price < 0.0 {
                    return Err(DomainError::Validation(
                        "Static pricing requires a non-negative price".into(),
                    ));
                }
            }
            Self::Tiered { tiers } => {
                if tiers.is_empty() {
                    return Err(DomainError::Validation(
                        "Tiered pricing requires a non-empty tiers array".into(),
                    ));
                }
                let mut sorted = tiers.clone();
                sorted.sort_by(|a, b| a.max_duration.total_cmp(&b.max_duration));
                for pair in sorted.windows(2) {
                    if pair[0].max_duration >= pair[1].max_duration {
                        return Err(DomainError::Validation("Tiers must not overlap".into()));
                    }
                }
            }
            Self::Complimentary => {}
            Self::Discounted {
                base_price,
                discount_value,
                ..
            } => {
                if !base_price.is_finite() || *base_price < 0.0 {
                    return Err(DomainError::Validation(
                        "Discounted pricing requires a non-negative base_price".into(),
                    ));
                }
                if !discount_value.is_finite() || *discount_value < 0.0 {
                    return Err(DomainError::Validation(
                        "discount_value must be non-negative".into(),
                    ));
                }
            }
            Self::Dynamic { time_windows } => {
                if time_windows.is_empty() {
                    return Err(DomainError::Validation(
                        "Dynamic pricing requires a non-empty time_windows array".into(),
                    ));
                }
                for w in time_windows {
                    if slot_minutes(&w.start).is_none() || slot_minutes(&w.end).is_none() {
                        return Err(DomainError::Validation(format!(
                            "Invalid time window: {} - {}",
                            w.start, w.end
                        )));
                    }
                }
            }
        }
        Ok(())
    }

    /// Resolve the base price for this rule.
    ///
    /// * `duration` — hours, required by `Tiered`
    /// * `time` — `HH:MM` reference time for `Dynamic`; current local time
    ///   when absent
    pub fn base_price(
        &self,
        duration: Option<f64>,
        time: Option<&str>,
    ) -> DomainResult<(f64, PricingDetail)> {
        match self {
            Self::Static { price } => Ok((*price, PricingDetail::Static { price: *price })),

            Self::Tiered { tiers } => {
                let duration = duration.ok_or_else(|| {
                    DomainError::Validation("Duration is required for tiered pricing".into())
                })?;

                let mut sorted = tiers.clone();
                sorted.sort_by(|a, b| a.max_duration.total_cmp(&b.max_duration));

                // First tier that covers the duration; beyond all bounds the
                // largest tier applies.
                let selected = sorted
                    .iter()
                    .find(|t| duration <= t.max_duration)
                    .or_else(|| sorted.last())
                    .ok_or_else(|| {
                        DomainError::Validation("Tiered pricing has no tiers".into())
                    })?;

                Ok((
                    selected.price,
                    PricingDetail::Tiered {
                        duration,
                        tier_used: format!("Up to {} hours", selected.max_duration),
                        price: selected.price,
                    },
                ))
            }

            Self::Complimentary => Ok((
                0.0,
                PricingDetail::Complimentary {
                    message: "This item is complimentary".into(),
                },
            )),

            Self::Discounted {
                base_price,
                discount_type,
                discount_value,
            } => {
                let discount_amount = match discount_type {
                    DiscountType::Flat => *discount_value,
                    DiscountType::Percentage => base_price * discount_value / 100.0,
                };
                let final_price = (base_price - discount_amount).max(0.0);
                Ok((
                    final_price,
                    PricingDetail::Discounted {
                        original_price: *base_price,
                        discount_type: *discount_type,
                        discount_value: *discount_value,
                        discount_amount,
                        final_price,
                    },
                ))
            }

            Self::Dynamic { time_windows } => {
                let reference = match time {
                    Some(t) => t.to_string(),
                    None => chrono::Local::now().format("%H:%M").to_string(),
                };
                let minutes = slot_minutes(&reference).ok_or_else(|| {
                    DomainError::Validation(format!("Invalid time: {}", reference))
                })?;

                // Declaration order wins; windows are not required to be sorted.
                let selected = time_windows
                    .iter()
                    .find(|w| {
                        match (slot_minutes(&w.start), slot_minutes(&w.end)) {
                            // Half-open: start inclusive, end exclusive
                            (Some(s), Some(e)) => s <= minutes && minutes < e,
                            _ => false,
                        }
                    })
                    .ok_or_else(|| {
                        DomainError::Validation("Item not available at this time".into())
                    })?;

                Ok((
                    selected.price,
                    PricingDetail::Dynamic {
                        current_time: reference,
                        time_window: format!("{} - {}", selected.start, selected.end),
                        price: selected.price,
                    },
                ))
            }
        }
    }
}

/// Weekly availability pattern for bookable items.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
pub struct Availability {
    /// Allowed weekday names; `None` means every day
    pub days: Option<Vec<String>>,
    /// Fixed slot catalog, order preserved
    pub time_slots: Vec<TimeSlot>,
}

impl Availability {
    pub fn validate(&self) -> DomainResult<()> {
        if let Some(days) = &self.days {
            for day in days {
                if !WEEKDAY_NAMES.contains(&day.as_str()) {
                    return Err(DomainError::Validation(format!("Invalid day: {}", day)));
                }
            }
        }
        for slot in &self.time_slots {
            if slot_minutes(&slot.start).is_none() || slot_minutes(&slot.end).is_none() {
                return Err(DomainError::Validation(format!(
                    "Invalid time slot: {} - {}",
                    slot.start, slot.end
                )));
            }
        }
        Ok(())
    }
}

/// Catalog item
#[derive(Debug, Clone)]
pub struct Item {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub image: Option<String>,
    /// Exactly one of `category_id` / `subcategory_id` is set.
    pub category_id: Option<Uuid>,
    pub subcategory_id: Option<Uuid>,
    /// `None` means "inherit from parent"
    pub tax_applicable: Option<bool>,
    pub tax_percentage: Option<f64>,
    pub pricing: PricingRule,
    pub is_bookable: bool,
    pub availability: Option<Availability>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Item {
    /// Whether bookings are allowed on the given weekday name.
    pub fn allows_weekday(&self, day: &str) -> bool {
        match self.availability.as_ref().and_then(|a| a.days.as_ref()) {
            Some(days) => days.iter().any(|d| d == day),
            None => true,
        }
    }

    /// Fixed slot catalog, in declaration order.
    pub fn slot_catalog(&self) -> &[TimeSlot] {
        self.availability
            .as_ref()
            .map(|a| a.time_slots.as_slice())
            .unwrap_or(&[])
    }

    /// Whether `(start, end)` exactly matches a catalog slot.
    pub fn has_slot(&self, slot: &TimeSlot) -> bool {
        self.slot_catalog().iter().any(|s| s == slot)
    }

    /// Next value with the soft-delete flag cleared.
    pub fn deactivated(mut self) -> Self {
        self.is_active = false;
        self.updated_at = Utc::now();
        self
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn tiered(tiers: Vec<(f64, f64)>) -> PricingRule {
        PricingRule::Tiered {
            tiers: tiers
                .into_iter()
                .map(|(max_duration, price)| Tier {
                    max_duration,
                    price,
                })
                .collect(),
        }
    }

    #[test]
    fn static_price_is_passed_through() {
        let rule = PricingRule::Static { price: 42.5 };
        let (base, _) = rule.base_price(Some(99.0), Some("23:59")).unwrap();
        assert_eq!(base, 42.5);
    }

    #[test]
    fn static_rejects_negative_price() {
        let rule = PricingRule::Static { price: -1.0 };
        assert!(matches!(rule.validate(), Err(DomainError::Validation(_))));
    }

    #[test]
    fn tiered_requires_duration() {
        let rule = tiered(vec![(2.0, 50.0)]);
        assert!(matches!(
            rule.base_price(None, None),
            Err(DomainError::Validation(_))
        ));
    }

    #[test]
    fn tiered_selects_first_covering_tier() {
        // Unordered on purpose: sorted at quote time.
        let rule = tiered(vec![(5.0, 100.0), (2.0, 50.0)]);
        let (base, detail) = rule.base_price(Some(3.0), None).unwrap();
        assert_eq!(base, 100.0);
        match detail {
            PricingDetail::Tiered { tier_used, .. } => {
                assert_eq!(tier_used, "Up to 5 hours");
            }
            other => panic!("unexpected detail: {:?}", other),
        }
    }

    #[test]
    fn tiered_boundary_selects_that_tier() {
        let rule = tiered(vec![(2.0, 50.0), (5.0, 100.0)]);
        let (base, _) = rule.base_price(Some(2.0), None).unwrap();
        assert_eq!(base, 50.0);
    }

    #[test]
    fn tiered_falls_back_to_largest_tier() {
        let rule = tiered(vec![(2.0, 50.0), (5.0, 100.0)]);
        let (base, _) = rule.base_price(Some(12.0), None).unwrap();
        assert_eq!(base, 100.0);
    }

    #[test]
    fn tiered_rejects_duplicate_boundaries() {
        let rule = tiered(vec![(2.0, 50.0), (2.0, 80.0)]);
        assert!(matches!(rule.validate(), Err(DomainError::Validation(_))));
    }

    #[test]
    fn tiered_rejects_empty_tiers() {
        let rule = tiered(vec![]);
        assert!(matches!(rule.validate(), Err(DomainError::Validation(_))));
    }

    #[test]
    fn complimentary_is_zero() {
        let (base, _) = PricingRule::Complimentary.base_price(None, None).unwrap();
        assert_eq!(base, 0.0);
    }

    #[test]
    fn discounted_flat() {
        let rule = PricingRule::Discounted {
            base_price: 100.0,
            discount_type: DiscountType::Flat,
            discount_value: 30.0,
        };
        let (base, _) = rule.base_price(None, None).unwrap();
        assert_eq!(base, 70.0);
    }

    #[test]
    fn discounted_never_goes_negative() {
        let rule = PricingRule::Discounted {
            base_price: 100.0,
            discount_type: DiscountType::Percentage,
            discount_value: 150.0,
        };
        let (base, detail) = rule.base_price(None, None).unwrap();
        assert_eq!(base, 0.0);
        match detail {
            PricingDetail::Discounted {
                discount_amount,
                final_price,
                ..
            } => {
                assert_eq!(discount_amount, 150.0);
                assert_eq!(final_price, 0.0);
            }
            other => panic!("unexpected detail: {:?}", other),
        }
    }

    #[test]
    fn dynamic_window_is_half_open() {
        let rule = PricingRule::Dynamic {
            time_windows: vec![TimeWindow {
                start: "09:00".into(),
                end: "12:00".into(),
                price: 80.0,
            }],
        };
        // start is inclusive
        let (base, _) = rule.base_price(None, Some("09:00")).unwrap();
        assert_eq!(base, 80.0);
        // end is exclusive
        assert!(matches!(
            rule.base_price(None, Some("12:00")),
            Err(DomainError::Validation(_))
        ));
    }

    #[test]
    fn dynamic_first_declared_window_wins() {
        let rule = PricingRule::Dynamic {
            time_windows: vec![
                TimeWindow {
                    start: "08:00".into(),
                    end: "20:00".into(),
                    price: 60.0,
                },
                TimeWindow {
                    start: "09:00".into(),
                    end: "12:00".into(),
                    price: 80.0,
                },
            ],
        };
        let (base, _) = rule.base_price(None, Some("10:00")).unwrap();
        assert_eq!(base, 60.0);
    }

    #[test]
    fn pricing_rule_wire_shape() {
        let rule = PricingRule::Static { price: 10.0 };
        let json = serde_json::to_value(&rule).unwrap();
        assert_eq!(json["type"], "STATIC");
        assert_eq!(json["config"]["price"], 10.0);

        let parsed: PricingRule =
            serde_json::from_value(serde_json::json!({ "type": "COMPLIMENTARY" })).unwrap();
        assert_eq!(parsed, PricingRule::Complimentary);
    }

    #[test]
    fn slot_minutes_parses_strict_hhmm() {
        assert_eq!(slot_minutes("09:30"), Some(570));
        assert_eq!(slot_minutes("00:00"), Some(0));
        assert_eq!(slot_minutes("24:00"), None);
        assert_eq!(slot_minutes("9h30"), None);
    }

    #[test]
    fn weekday_name_matches_calendar() {
        let date = NaiveDate::from_ymd_opt(2025, 6, 2).unwrap();
        assert_eq!(weekday_name(date), "Monday");
    }

    #[test]
    fn availability_rejects_bad_day_and_slot() {
        let bad_day = Availability {
            days: Some(vec!["Funday".into()]),
            time_slots: vec![],
        };
        assert!(bad_day.validate().is_err());

        let bad_slot = Availability {
            days: None,
            time_slots: vec![TimeSlot {
                start: "25:00".into(),
                end: "26:00".into(),
            }],
        };
        assert!(bad_slot.validate().is_err());
    }
}
