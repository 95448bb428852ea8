//! Room repository interface
//!
//! Read-only from the engine's perspective: rooms, blocked dates and
//! price overrides are mutated by the property-management collaborator.

use async_trait::async_trait;
use chrono::NaiveDate;

use super::model::{PriceOverride, Room};
use crate::domain::error::DomainResult;

#[async_trait]
pub trait RoomRepository: Send + Sync {
    /// Find a room by ID
    async fn find_by_id(&self, id: &str) -> DomainResult<Option<Room>>;

    /// Owner-set blackout dates falling inside `[check_in, check_out)`,
    /// ascending.
    async fn blocked_dates_in(
        &self,
        room_id: &str,
        check_in: NaiveDate,
        check_out: NaiveDate,
    ) -> DomainResult<Vec<NaiveDate>>;

    /// Price overrides whose validity window touches `[check_in, check_out)`.
    async fn overrides_overlapping(
        &self,
        room_id: &str,
        check_in: NaiveDate,
        check_out: NaiveDate,
    ) -> DomainResult<Vec<PriceOverride>>;
}
