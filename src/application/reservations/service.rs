//! Reservation workflow
//!
//! `ReservationService` drives booking creation end to end — validate,
//! load context, guest cap, availability, price verification, atomic
//! commit, payment handoff — and owns every `Booking.status` write
//! through its state-transition primitives. It holds no mutable state of
//! its own; everything durable lives behind the repositories.

use std::sync::Arc;

use chrono::{Duration, NaiveDate};
use tracing::{info, warn};

use crate::application::payments::{PaymentGateway, PaymentToken};
use crate::application::reservations::availability::{AvailabilityChecker, AvailabilityReport};
use crate::domain::booking::validator::{self, GuestCounts};
use crate::domain::{
    generate_order_code, pricing, Booking, BookingStatus, DomainError, DomainResult, FieldErrors,
    NewBooking, PaymentMethod, RepositoryProvider,
};
use crate::shared::clock::Clock;

/// Tunables of the booking workflow.
#[derive(Debug, Clone)]
pub struct ReservationPolicy {
    /// How long an unpaid booking holds its slot.
    pub hold: Duration,
    /// Accepted quote/computed total difference, in minor units.
    pub price_tolerance_cents: i64,
    /// Attempts at allocating a fresh order code before giving up.
    pub order_code_attempts: u32,
}

impl Default for ReservationPolicy {
    fn default() -> Self {
        Self {
            hold: Duration::hours(1),
            price_tolerance_cents: pricing::PRICE_TOLERANCE_CENTS,
            order_code_attempts: 5,
        }
    }
}

/// A booking-creation request, already converted to engine types.
#[derive(Debug, Clone)]
pub struct CreateBookingCommand {
    pub guest_id: String,
    pub property_id: String,
    pub room_id: String,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub adults: u32,
    pub children: u32,
    pub pets: u32,
    pub price_per_night_cents: i64,
    pub total_amount_cents: i64,
    pub payment_method: PaymentMethod,
}

/// How payment ended up being set up for a created booking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaymentSetup {
    /// Guest pays by bank transfer and submits proof.
    ManualTransfer,
    /// Gateway issued a token; guest pays through it.
    GatewayToken(PaymentToken),
    /// Gateway was unreachable; the booking was downgraded to manual
    /// transfer and still holds its slot.
    GatewayUnavailable { reason: String },
}

/// Result of a successful booking creation.
#[derive(Debug, Clone)]
pub struct CreatedReservation {
    pub booking: Booking,
    pub payment: PaymentSetup,
}

pub struct ReservationService {
    repos: Arc<dyn RepositoryProvider>,
    availability: AvailabilityChecker,
    gateway: Arc<dyn PaymentGateway>,
    clock: Arc<dyn Clock>,
    policy: ReservationPolicy,
}

impl ReservationService {
    pub fn new(
        repos: Arc<dyn RepositoryProvider>,
        gateway: Arc<dyn PaymentGateway>,
        clock: Arc<dyn Clock>,
        policy: ReservationPolicy,
    ) -> Self {
        let availability = AvailabilityChecker::new(repos.clone(), clock.clone());
        Self {
            repos,
            availability,
            gateway,
            clock,
            policy,
        }
    }

    /// The read-only availability checker, shared with the HTTP layer.
    pub fn availability(&self) -> &AvailabilityChecker {
        &self.availability
    }

    /// Check availability without reserving anything.
    pub async fn check_availability(
        &self,
        property_id: &str,
        room_id: &str,
        check_in: NaiveDate,
        check_out: NaiveDate,
    ) -> DomainResult<AvailabilityReport> {
        self.availability
            .check(property_id, room_id, check_in, check_out)
            .await
    }

    /// Create a booking.
    ///
    /// Fails distinctly at every step: `Validation`, `NotFound` (guest,
    /// property, room), `GuestLimitExceeded`, `RoomUnavailable`,
    /// `PriceMismatch`. A gateway failure after the commit does NOT fail
    /// the operation: the booking is downgraded to manual transfer and
    /// the outcome carries the warning — losing the slot is worse than
    /// losing the preferred payment channel.
    pub async fn create(&self, cmd: CreateBookingCommand) -> DomainResult<CreatedReservation> {
        let counts = GuestCounts {
            adults: cmd.adults,
            children: cmd.children,
            pets: cmd.pets,
        };

        // 1. field-level validation
        let (nights, mut errors) =
            match validator::validate(&counts, cmd.check_in, cmd.check_out, self.clock.today()) {
                Ok(nights) => (nights, FieldErrors::new()),
                Err(errors) => (0, errors),
            };
        if cmd.price_per_night_cents <= 0 {
            errors.push("price_per_night", "nightly price must be positive");
        }
        if cmd.total_amount_cents <= 0 {
            errors.push("total_amount", "total amount must be positive");
        }
        if !errors.is_empty() {
            return Err(DomainError::Validation(errors));
        }

        // 2. resolve context
        let property = self
            .repos
            .properties()
            .find_by_id(&cmd.property_id)
            .await?
            .ok_or_else(|| DomainError::NotFound {
                entity: "Property",
                field: "id",
                value: cmd.property_id.clone(),
            })?;
        let guest = self
            .repos
            .guests()
            .find_by_id(&cmd.guest_id)
            .await?
            .ok_or_else(|| DomainError::NotFound {
                entity: "Guest",
                field: "id",
                value: cmd.guest_id.clone(),
            })?;
        let room = self
            .repos
            .rooms()
            .find_by_id(&cmd.room_id)
            .await?
            .filter(|r| r.property_id == property.id)
            .ok_or_else(|| DomainError::NotFound {
                entity: "Room",
                field: "id",
                value: cmd.room_id.clone(),
            })?;

        // 3. guest cap
        validator::check_guest_limit(&counts, room.effective_max_guests(property.max_guests))?;

        // 4. read-only availability check (the commit re-checks in-tx)
        let report = self
            .availability
            .report_for(&room, cmd.check_in, cmd.check_out)
            .await?;
        report.ensure_available()?;

        // 5. price verification against the caller's quote
        let computed = pricing::base_price_cents(cmd.price_per_night_cents, nights);
        if !pricing::totals_match(
            cmd.total_amount_cents,
            computed,
            self.policy.price_tolerance_cents,
        ) {
            return Err(DomainError::PriceMismatch {
                expected_cents: computed,
                provided_cents: cmd.total_amount_cents,
            });
        }

        // 6. atomic commit
        let order_code = self.allocate_order_code().await?;
        let booking = Booking::create(
            NewBooking {
                guest_id: guest.id,
                tenant_id: property.tenant_id.clone(),
                property_id: property.id.clone(),
                room_id: room.id.clone(),
                check_in: cmd.check_in,
                check_out: cmd.check_out,
                nights,
                price_per_night_cents: cmd.price_per_night_cents,
                total_amount_cents: cmd.total_amount_cents,
                payment_method: cmd.payment_method,
            },
            order_code,
            self.clock.now(),
            self.policy.hold,
        );
        let mut booking = self.repos.bookings().create(booking).await?;

        info!(
            order_code = %booking.order_code,
            room_id = %booking.room_id,
            nights = booking.nights,
            total = %pricing::format_cents(booking.total_amount_cents),
            "Booking created"
        );

        // 7. payment handoff
        let payment = match cmd.payment_method {
            PaymentMethod::ManualTransfer => PaymentSetup::ManualTransfer,
            PaymentMethod::PaymentGateway => match self.gateway.create_token(&booking).await {
                Ok(token) => PaymentSetup::GatewayToken(token),
                Err(err) => {
                    warn!(
                        order_code = %booking.order_code,
                        error = %err,
                        "Payment gateway failed; downgrading booking to manual transfer"
                    );
                    self.repos
                        .bookings()
                        .set_payment_method(&booking.id, PaymentMethod::ManualTransfer)
                        .await?;
                    booking.payment_method = PaymentMethod::ManualTransfer;
                    PaymentSetup::GatewayUnavailable {
                        reason: err.to_string(),
                    }
                }
            },
        };

        Ok(CreatedReservation { booking, payment })
    }

    /// Guest-initiated cancellation. Only valid from `WaitingPayment`;
    /// deliberately NOT idempotent — a second call fails with
    /// `InvalidState`.
    pub async fn cancel(&self, booking_id: &str) -> DomainResult<Booking> {
        let booking = self
            .strict_transition(
                booking_id,
                BookingStatus::WaitingPayment,
                BookingStatus::Canceled,
            )
            .await?;
        info!(order_code = %booking.order_code, "Booking canceled");
        Ok(booking)
    }

    /// Sweep primitive: expire the booking iff it is still unpaid and its
    /// deadline has passed. A no-op result (`false`) is NOT an error, so
    /// overlapping sweeps are idempotent.
    pub async fn expire(&self, booking_id: &str) -> DomainResult<bool> {
        self.repos
            .bookings()
            .expire_if_due(booking_id, self.clock.now())
            .await
    }

    /// Expire every unpaid booking past its deadline. Returns how many
    /// transitioned.
    pub async fn expire_due(&self) -> DomainResult<usize> {
        let due = self
            .repos
            .bookings()
            .find_due_for_expiry(self.clock.now())
            .await?;
        if due.is_empty() {
            return Ok(0);
        }

        let mut expired = 0;
        for booking in due {
            match self.expire(&booking.id).await {
                Ok(true) => expired += 1,
                Ok(false) => {} // raced with a payment or another sweep
                Err(err) => {
                    warn!(order_code = %booking.order_code, error = %err, "Failed to expire booking");
                }
            }
        }

        if expired > 0 {
            info!(count = expired, "Expired overdue bookings");
        }
        Ok(expired)
    }

    /// Proof-review primitive: guest submitted a manual-transfer proof.
    pub async fn submit_payment_proof(&self, booking_id: &str) -> DomainResult<Booking> {
        self.strict_transition(
            booking_id,
            BookingStatus::WaitingPayment,
            BookingStatus::WaitingConfirmation,
        )
        .await
    }

    /// Proof-review primitive: owner rejected the submitted proof.
    pub async fn reject_payment_proof(&self, booking_id: &str) -> DomainResult<Booking> {
        self.strict_transition(
            booking_id,
            BookingStatus::WaitingConfirmation,
            BookingStatus::WaitingPayment,
        )
        .await
    }

    /// Proof-review primitive: owner confirmed payment.
    pub async fn confirm(&self, booking_id: &str) -> DomainResult<Booking> {
        self.strict_transition(
            booking_id,
            BookingStatus::WaitingConfirmation,
            BookingStatus::Processing,
        )
        .await
    }

    /// Mark a processed stay as completed.
    pub async fn complete(&self, booking_id: &str) -> DomainResult<Booking> {
        self.strict_transition(
            booking_id,
            BookingStatus::Processing,
            BookingStatus::Completed,
        )
        .await
    }

    /// Fetch a booking by ID.
    pub async fn get(&self, booking_id: &str) -> DomainResult<Booking> {
        self.repos
            .bookings()
            .find_by_id(booking_id)
            .await?
            .ok_or_else(|| DomainError::NotFound {
                entity: "Booking",
                field: "id",
                value: booking_id.to_string(),
            })
    }

    /// All bookings, newest first.
    pub async fn list(&self) -> DomainResult<Vec<Booking>> {
        self.repos.bookings().find_all().await
    }

    /// Move a booking `from` → `to`, failing with `NotFound` when the
    /// booking does not exist and `InvalidState` when it is not in
    /// `from`. The conditional update makes concurrent transitions
    /// race-safe: only one caller observes `true`.
    async fn strict_transition(
        &self,
        booking_id: &str,
        from: BookingStatus,
        to: BookingStatus,
    ) -> DomainResult<Booking> {
        let booking = self.get(booking_id).await?;
        if booking.status != from {
            return Err(DomainError::InvalidState {
                current: booking.status.to_string(),
                expected: from.as_str(),
            });
        }

        let moved = self.repos.bookings().transition(booking_id, from, to).await?;
        if !moved {
            // lost a race since the read above; report the fresh state
            let current = self.get(booking_id).await?;
            return Err(DomainError::InvalidState {
                current: current.status.to_string(),
                expected: from.as_str(),
            });
        }

        self.get(booking_id).await
    }

    async fn allocate_order_code(&self) -> DomainResult<String> {
        for _ in 0..self.policy.order_code_attempts {
            let code = generate_order_code();
            if self
                .repos
                .bookings()
                .find_by_order_code(&code)
                .await?
                .is_none()
            {
                return Ok(code);
            }
        }
        Err(DomainError::Storage(
            "could not allocate a unique order code".to_string(),
        ))
    }
}
