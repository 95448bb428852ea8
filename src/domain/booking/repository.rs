//! Booking repository interface
//!
//! Booking rows are written exclusively through these methods; no other
//! code path mutates `Booking.status`.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};

use super::model::{Booking, BookingStatus, PaymentMethod};
use crate::domain::error::DomainResult;

#[async_trait]
pub trait BookingRepository: Send + Sync {
    /// Insert a new booking, re-running the slot-holding overlap query
    /// inside the same store transaction as the insert.
    ///
    /// This is the second half of the check-then-commit defense: a
    /// concurrent committer that raced past the read-only availability
    /// check must observe the winner's row here and fail with
    /// `RoomUnavailable` instead of double-booking the room.
    async fn create(&self, booking: Booking) -> DomainResult<Booking>;

    /// Find a booking by ID
    async fn find_by_id(&self, id: &str) -> DomainResult<Option<Booking>>;

    /// Find a booking by its order code
    async fn find_by_order_code(&self, order_code: &str) -> DomainResult<Option<Booking>>;

    /// All bookings, newest first
    async fn find_all(&self) -> DomainResult<Vec<Booking>>;

    /// Slot-holding bookings for a room whose stay overlaps
    /// `[check_in, check_out)`.
    async fn find_overlapping(
        &self,
        room_id: &str,
        check_in: NaiveDate,
        check_out: NaiveDate,
    ) -> DomainResult<Vec<Booking>>;

    /// Conditionally move a booking from `from` to `to`.
    ///
    /// Returns `true` if the row transitioned, `false` if it was not in
    /// `from` at the moment of the update (the caller decides whether
    /// that is an error). The condition and the write are one statement,
    /// so concurrent transitions cannot both win.
    async fn transition(
        &self,
        id: &str,
        from: BookingStatus,
        to: BookingStatus,
    ) -> DomainResult<bool>;

    /// Expire the booking iff it is still unpaid and its deadline has
    /// passed. Returns whether a transition happened; `false` is a
    /// no-op, not an error, so overlapping sweeps stay idempotent.
    async fn expire_if_due(&self, id: &str, now: DateTime<Utc>) -> DomainResult<bool>;

    /// Unpaid bookings whose hold deadline has passed as of `now`.
    async fn find_due_for_expiry(&self, now: DateTime<Utc>) -> DomainResult<Vec<Booking>>;

    /// Rewrite the payment method (gateway-failure downgrade path).
    async fn set_payment_method(&self, id: &str, method: PaymentMethod) -> DomainResult<()>;
}
