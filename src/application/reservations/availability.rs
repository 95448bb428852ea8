//! Room availability checks
//!
//! Read-only and idempotent: repeated calls without intervening writes
//! return identical reports, and nothing here reserves a slot. The
//! transactional re-check at commit time lives in the booking repository
//! (see `BookingRepository::create`).

use std::sync::Arc;

use chrono::NaiveDate;

use crate::domain::booking::validator;
use crate::domain::pricing::{self, PricingSummary};
use crate::domain::{DomainError, DomainResult, RepositoryProvider, Room, SlotConflict};
use crate::shared::clock::Clock;

/// Outcome of an availability query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvailabilityReport {
    pub available: bool,
    pub message: String,
    /// Owner-set blackout dates inside the requested range.
    pub blocked_dates: Vec<NaiveDate>,
    /// Slot-holding bookings overlapping the requested range.
    pub conflicts: Vec<SlotConflict>,
    /// Present only when the room is available.
    pub pricing: Option<PricingSummary>,
}

impl AvailabilityReport {
    /// Turn an unavailable report into the corresponding error; `Ok` when
    /// available.
    pub fn ensure_available(&self) -> DomainResult<()> {
        if self.available {
            return Ok(());
        }
        Err(DomainError::RoomUnavailable {
            blocked_dates: self.blocked_dates.clone(),
            conflicts: self.conflicts.clone(),
        })
    }
}

/// Composes the date rules, blocked-date records and existing bookings
/// for a room into one availability answer.
pub struct AvailabilityChecker {
    repos: Arc<dyn RepositoryProvider>,
    clock: Arc<dyn Clock>,
}

impl AvailabilityChecker {
    pub fn new(repos: Arc<dyn RepositoryProvider>, clock: Arc<dyn Clock>) -> Self {
        Self { repos, clock }
    }

    /// Check a room's availability for the half-open stay
    /// `[check_in, check_out)`.
    ///
    /// Fails with `InvalidDateRange` when the range breaks the date
    /// rules, `NotFound` when the room does not exist under the given
    /// property.
    pub async fn check(
        &self,
        property_id: &str,
        room_id: &str,
        check_in: NaiveDate,
        check_out: NaiveDate,
    ) -> DomainResult<AvailabilityReport> {
        validator::validate_date_range(check_in, check_out, self.clock.today())?;

        let room = self
            .repos
            .rooms()
            .find_by_id(room_id)
            .await?
            .filter(|r| r.property_id == property_id)
            .ok_or_else(|| DomainError::NotFound {
                entity: "Room",
                field: "id",
                value: room_id.to_string(),
            })?;

        self.report_for(&room, check_in, check_out).await
    }

    /// Same as [`check`](Self::check) for an already-loaded room.
    pub(crate) async fn report_for(
        &self,
        room: &Room,
        check_in: NaiveDate,
        check_out: NaiveDate,
    ) -> DomainResult<AvailabilityReport> {
        let nights = validator::validate_date_range(check_in, check_out, self.clock.today())?;

        let blocked_dates = self
            .repos
            .rooms()
            .blocked_dates_in(&room.id, check_in, check_out)
            .await?;
        if !blocked_dates.is_empty() {
            return Ok(AvailabilityReport {
                available: false,
                message: format!(
                    "Room is blocked on {} date(s) in the requested range",
                    blocked_dates.len()
                ),
                blocked_dates,
                conflicts: vec![],
                pricing: None,
            });
        }

        let overlapping = self
            .repos
            .bookings()
            .find_overlapping(&room.id, check_in, check_out)
            .await?;
        if !overlapping.is_empty() {
            let conflicts: Vec<SlotConflict> = overlapping
                .into_iter()
                .map(|b| SlotConflict {
                    order_code: b.order_code,
                    check_in: b.check_in,
                    check_out: b.check_out,
                })
                .collect();
            return Ok(AvailabilityReport {
                available: false,
                message: format!(
                    "Room is already reserved by {} overlapping booking(s)",
                    conflicts.len()
                ),
                blocked_dates: vec![],
                conflicts,
                pricing: None,
            });
        }

        let overrides = self
            .repos
            .rooms()
            .overrides_overlapping(&room.id, check_in, check_out)
            .await?;
        let has_adjustments = pricing::has_adjustments(&overrides, check_in, check_out);

        Ok(AvailabilityReport {
            available: true,
            message: "Room is available".to_string(),
            blocked_dates: vec![],
            conflicts: vec![],
            pricing: Some(PricingSummary::new(
                room.base_price_cents,
                nights,
                has_adjustments,
            )),
        })
    }
}
