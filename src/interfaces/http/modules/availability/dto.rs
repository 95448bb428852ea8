//! Availability DTOs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::application::reservations::AvailabilityReport;
use crate::domain::pricing;

/// Availability query parameters
#[derive(Debug, Deserialize, IntoParams)]
pub struct AvailabilityQuery {
    pub property_id: String,
    pub room_id: String,
    /// Check-in date (YYYY-MM-DD)
    pub check_in: NaiveDate,
    /// Check-out date (YYYY-MM-DD), excluded from the stay
    pub check_out: NaiveDate,
}

/// A booking that conflicts with the requested range
#[derive(Debug, Serialize, ToSchema)]
pub struct ConflictDto {
    pub order_code: String,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
}

/// Price summary for an available range
#[derive(Debug, Serialize, ToSchema)]
pub struct PricingDto {
    pub nights: i64,
    pub price_per_night: Decimal,
    pub base_price: Decimal,
    /// True when a price override touches the stay window; the base
    /// price above does not include it
    pub has_adjustments: bool,
}

/// Availability answer
#[derive(Debug, Serialize, ToSchema)]
pub struct AvailabilityDto {
    pub available: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub unavailable_dates: Vec<NaiveDate>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub conflicting_dates: Vec<ConflictDto>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pricing: Option<PricingDto>,
}

impl From<AvailabilityReport> for AvailabilityDto {
    fn from(report: AvailabilityReport) -> Self {
        Self {
            available: report.available,
            message: report.message,
            unavailable_dates: report.blocked_dates,
            conflicting_dates: report
                .conflicts
                .into_iter()
                .map(|c| ConflictDto {
                    order_code: c.order_code,
                    check_in: c.check_in,
                    check_out: c.check_out,
                })
                .collect(),
            pricing: report.pricing.map(|p| PricingDto {
                nights: p.nights,
                price_per_night: pricing::to_decimal(p.price_per_night_cents),
                base_price: pricing::to_decimal(p.base_price_cents),
                has_adjustments: p.has_adjustments,
            }),
        }
    }
}
