//! End-to-end tests of the reservation engine on an in-memory SQLite
//! database: creation, conflict detection, pricing verification, state
//! transitions, expiry sweeps and the payment-gateway fallback.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Duration, NaiveDate, Utc};
use sea_orm::{ActiveModelTrait, ConnectOptions, Database, DatabaseConnection, Set};
use sea_orm_migration::MigratorTrait;

use stayhub::application::payments::{PaymentGateway, PaymentToken, UnconfiguredPaymentGateway};
use stayhub::application::reservations::{
    CreateBookingCommand, PaymentSetup, ReservationPolicy, ReservationService,
};
use stayhub::domain::{BookingStatus, DomainError, DomainResult, PaymentMethod};
use stayhub::infrastructure::database::entities::{guest, price_override, property, room, room_blocked_date};
use stayhub::infrastructure::database::migrator::Migrator;
use stayhub::shared::clock::FixedClock;

const NOW: &str = "2025-03-01T12:00:00Z";

// ── Gateway test doubles ───────────────────────────────────────

struct StaticTokenGateway;

#[async_trait]
impl PaymentGateway for StaticTokenGateway {
    async fn create_token(
        &self,
        booking: &stayhub::domain::Booking,
    ) -> DomainResult<PaymentToken> {
        Ok(PaymentToken {
            token: format!("tok-{}", booking.order_code),
            redirect_url: Some(format!("https://pay.test/{}", booking.order_code)),
        })
    }
}

struct FailingGateway;

#[async_trait]
impl PaymentGateway for FailingGateway {
    async fn create_token(
        &self,
        _booking: &stayhub::domain::Booking,
    ) -> DomainResult<PaymentToken> {
        Err(DomainError::PaymentGatewayUnavailable(
            "connection refused".to_string(),
        ))
    }
}

// ── Fixture ────────────────────────────────────────────────────

struct TestEnv {
    service: Arc<ReservationService>,
    clock: FixedClock,
}

async fn setup_db() -> DatabaseConnection {
    let mut opts = ConnectOptions::new("sqlite::memory:".to_owned());
    opts.max_connections(1);
    let db = Database::connect(opts).await.unwrap();
    Migrator::up(&db, None).await.unwrap();
    seed_catalog(&db).await;
    db
}

/// One property with two rooms: room-1 (100.00/night, capacity 2) and
/// room-2 (80.00/night, no capacity so the property cap of 4 applies).
async fn seed_catalog(db: &DatabaseConnection) {
    property::ActiveModel {
        id: Set("prop-1".into()),
        tenant_id: Set("tenant-1".into()),
        name: Set("Seaside Villa".into()),
        max_guests: Set(4),
    }
    .insert(db)
    .await
    .unwrap();

    room::ActiveModel {
        id: Set("room-1".into()),
        property_id: Set("prop-1".into()),
        name: Set("Ocean View 713".into()),
        base_price_cents: Set(10_000),
        capacity: Set(Some(2)),
    }
    .insert(db)
    .await
    .unwrap();

    room::ActiveModel {
        id: Set("room-2".into()),
        property_id: Set("prop-1".into()),
        name: Set("Garden 101".into()),
        base_price_cents: Set(8_000),
        capacity: Set(None),
    }
    .insert(db)
    .await
    .unwrap();

    guest::ActiveModel {
        id: Set("guest-1".into()),
        full_name: Set("Alice Tan".into()),
        email: Set("alice@example.com".into()),
    }
    .insert(db)
    .await
    .unwrap();
}

async fn setup_with_gateway(gateway: Arc<dyn PaymentGateway>) -> (TestEnv, DatabaseConnection) {
    let db = setup_db().await;
    let clock = FixedClock::at(NOW.parse::<DateTime<Utc>>().unwrap());
    let repos = Arc::new(stayhub::SeaOrmRepositoryProvider::new(db.clone()));
    let service = Arc::new(ReservationService::new(
        repos,
        gateway,
        Arc::new(clock.clone()),
        ReservationPolicy::default(),
    ));
    (TestEnv { service, clock }, db)
}

async fn setup() -> TestEnv {
    setup_with_gateway(Arc::new(UnconfiguredPaymentGateway)).await.0
}

fn d(s: &str) -> NaiveDate {
    s.parse().unwrap()
}

/// Two adults in room-1, correct quote for its 100.00 nightly rate.
fn room1_cmd(check_in: &str, check_out: &str) -> CreateBookingCommand {
    let nights = (d(check_out) - d(check_in)).num_days();
    CreateBookingCommand {
        guest_id: "guest-1".into(),
        property_id: "prop-1".into(),
        room_id: "room-1".into(),
        check_in: d(check_in),
        check_out: d(check_out),
        adults: 2,
        children: 0,
        pets: 0,
        price_per_night_cents: 10_000,
        total_amount_cents: 10_000 * nights,
        payment_method: PaymentMethod::ManualTransfer,
    }
}

// ── Creation ───────────────────────────────────────────────────

#[tokio::test]
async fn create_booking_holds_slot_with_payment_deadline() {
    let env = setup().await;
    let created = env
        .service
        .create(room1_cmd("2025-03-10", "2025-03-12"))
        .await
        .unwrap();

    let booking = &created.booking;
    assert_eq!(booking.status, BookingStatus::WaitingPayment);
    assert!(booking.order_code.starts_with("BK-"));
    assert_eq!(booking.nights, 2);
    assert_eq!(booking.total_amount_cents, 20_000);
    assert_eq!(booking.tenant_id, "tenant-1");
    assert_eq!(
        booking.expires_at,
        NOW.parse::<DateTime<Utc>>().unwrap() + Duration::hours(1)
    );
    assert_eq!(created.payment, PaymentSetup::ManualTransfer);

    // read-back through the service sees the same booking
    let fetched = env.service.get(&booking.id).await.unwrap();
    assert_eq!(fetched.order_code, booking.order_code);
}

#[tokio::test]
async fn quote_within_one_cent_is_accepted() {
    let env = setup().await;
    let mut cmd = room1_cmd("2025-03-10", "2025-03-12");
    cmd.total_amount_cents = 20_001;
    assert!(env.service.create(cmd).await.is_ok());
}

#[tokio::test]
async fn price_mismatch_is_rejected() {
    let env = setup().await;
    let mut cmd = room1_cmd("2025-03-10", "2025-03-12");
    // 199.50 quoted against a computed 200.00
    cmd.total_amount_cents = 19_950;

    let err = env.service.create(cmd).await.unwrap_err();
    match err {
        DomainError::PriceMismatch {
            expected_cents,
            provided_cents,
        } => {
            assert_eq!(expected_cents, 20_000);
            assert_eq!(provided_cents, 19_950);
        }
        other => panic!("expected PriceMismatch, got {:?}", other),
    }
}

#[tokio::test]
async fn field_validation_rejects_without_persisting() {
    let env = setup().await;
    let mut cmd = room1_cmd("2025-02-20", "2025-03-12");
    cmd.adults = 0;

    let err = env.service.create(cmd).await.unwrap_err();
    match err {
        DomainError::Validation(errors) => {
            assert!(errors.get("adults").is_some());
            assert!(errors.get("check_in").is_some());
        }
        other => panic!("expected Validation, got {:?}", other),
    }
    assert!(env.service.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn guest_limit_uses_room_capacity() {
    let env = setup().await;
    let mut cmd = room1_cmd("2025-03-10", "2025-03-12");
    cmd.adults = 3;

    let err = env.service.create(cmd).await.unwrap_err();
    assert!(matches!(
        err,
        DomainError::GuestLimitExceeded {
            requested: 3,
            max: 2
        }
    ));
    assert!(env.service.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn guest_limit_falls_back_to_property_cap() {
    let env = setup().await;
    let mut cmd = room1_cmd("2025-03-10", "2025-03-12");
    cmd.room_id = "room-2".into();
    cmd.price_per_night_cents = 8_000;
    cmd.total_amount_cents = 16_000;
    cmd.adults = 3;
    cmd.children = 1;
    // 4 persons against the property cap of 4
    assert!(env.service.create(cmd.clone()).await.is_ok());

    cmd.check_in = d("2025-04-01");
    cmd.check_out = d("2025-04-03");
    cmd.children = 2;
    let err = env.service.create(cmd).await.unwrap_err();
    assert!(matches!(
        err,
        DomainError::GuestLimitExceeded {
            requested: 5,
            max: 4
        }
    ));
}

#[tokio::test]
async fn unknown_references_fail_not_found() {
    let env = setup().await;

    let mut cmd = room1_cmd("2025-03-10", "2025-03-12");
    cmd.guest_id = "guest-404".into();
    assert!(matches!(
        env.service.create(cmd).await.unwrap_err(),
        DomainError::NotFound { entity: "Guest", .. }
    ));

    let mut cmd = room1_cmd("2025-03-10", "2025-03-12");
    cmd.property_id = "prop-404".into();
    assert!(matches!(
        env.service.create(cmd).await.unwrap_err(),
        DomainError::NotFound {
            entity: "Property",
            ..
        }
    ));

    let mut cmd = room1_cmd("2025-03-10", "2025-03-12");
    cmd.room_id = "room-404".into();
    assert!(matches!(
        env.service.create(cmd).await.unwrap_err(),
        DomainError::NotFound { entity: "Room", .. }
    ));
}

// ── Conflicts & availability ───────────────────────────────────

#[tokio::test]
async fn overlapping_request_conflicts_with_existing_booking() {
    let env = setup().await;
    let a = env
        .service
        .create(room1_cmd("2025-03-10", "2025-03-12"))
        .await
        .unwrap();

    // request B overlaps A's second night
    let report = env
        .service
        .check_availability("prop-1", "room-1", d("2025-03-11"), d("2025-03-13"))
        .await
        .unwrap();
    assert!(!report.available);
    assert_eq!(report.conflicts.len(), 1);
    assert_eq!(report.conflicts[0].order_code, a.booking.order_code);
    assert_eq!(report.conflicts[0].check_in, d("2025-03-10"));

    let err = env
        .service
        .create(room1_cmd("2025-03-11", "2025-03-13"))
        .await
        .unwrap_err();
    match err {
        DomainError::RoomUnavailable { conflicts, .. } => {
            assert_eq!(conflicts[0].order_code, a.booking.order_code);
        }
        other => panic!("expected RoomUnavailable, got {:?}", other),
    }
}

#[tokio::test]
async fn back_to_back_stays_do_not_conflict() {
    let env = setup().await;
    env.service
        .create(room1_cmd("2025-03-10", "2025-03-12"))
        .await
        .unwrap();

    // request C checks in on A's checkout day
    let report = env
        .service
        .check_availability("prop-1", "room-1", d("2025-03-12"), d("2025-03-14"))
        .await
        .unwrap();
    assert!(report.available);

    assert!(env
        .service
        .create(room1_cmd("2025-03-12", "2025-03-14"))
        .await
        .is_ok());
}

#[tokio::test]
async fn blocked_dates_make_room_unavailable() {
    let (env, db) = setup_with_gateway(Arc::new(UnconfiguredPaymentGateway)).await;
    room_blocked_date::ActiveModel {
        id: Set("blk-1".into()),
        room_id: Set("room-1".into()),
        date: Set(d("2025-03-20")),
    }
    .insert(&db)
    .await
    .unwrap();

    let report = env
        .service
        .check_availability("prop-1", "room-1", d("2025-03-19"), d("2025-03-21"))
        .await
        .unwrap();
    assert!(!report.available);
    assert_eq!(report.blocked_dates, vec![d("2025-03-20")]);

    let err = env
        .service
        .create(room1_cmd("2025-03-19", "2025-03-21"))
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::RoomUnavailable { ref blocked_dates, .. }
        if blocked_dates == &vec![d("2025-03-20")]));

    // a stay checking out on the blocked day is fine
    let report = env
        .service
        .check_availability("prop-1", "room-1", d("2025-03-18"), d("2025-03-20"))
        .await
        .unwrap();
    assert!(report.available);
}

#[tokio::test]
async fn price_overrides_are_flagged_not_applied() {
    let (env, db) = setup_with_gateway(Arc::new(UnconfiguredPaymentGateway)).await;
    price_override::ActiveModel {
        id: Set("ovr-1".into()),
        room_id: Set("room-1".into()),
        kind: Set("fixed_amount".into()),
        value: Set(2_500),
        starts_on: Set(d("2025-03-11")),
        ends_on: Set(d("2025-03-11")),
    }
    .insert(&db)
    .await
    .unwrap();

    let report = env
        .service
        .check_availability("prop-1", "room-1", d("2025-03-10"), d("2025-03-12"))
        .await
        .unwrap();
    assert!(report.available);
    let pricing = report.pricing.unwrap();
    assert!(pricing.has_adjustments);
    // the base price stays rate × nights; the override is only reported
    assert_eq!(pricing.base_price_cents, 20_000);

    // the committed total is still verified against the unadjusted quote
    assert!(env
        .service
        .create(room1_cmd("2025-03-10", "2025-03-12"))
        .await
        .is_ok());

    let report = env
        .service
        .check_availability("prop-1", "room-1", d("2025-03-20"), d("2025-03-22"))
        .await
        .unwrap();
    assert!(!report.pricing.unwrap().has_adjustments);
}

#[tokio::test]
async fn availability_is_idempotent() {
    let env = setup().await;
    env.service
        .create(room1_cmd("2025-03-10", "2025-03-12"))
        .await
        .unwrap();

    let first = env
        .service
        .check_availability("prop-1", "room-1", d("2025-03-11"), d("2025-03-13"))
        .await
        .unwrap();
    let second = env
        .service
        .check_availability("prop-1", "room-1", d("2025-03-11"), d("2025-03-13"))
        .await
        .unwrap();
    assert_eq!(first, second);
}

#[tokio::test]
async fn availability_rejects_invalid_ranges() {
    let env = setup().await;
    for (check_in, check_out) in [
        ("2025-03-12", "2025-03-10"), // inverted
        ("2025-03-10", "2025-03-10"), // zero nights
        ("2025-02-20", "2025-02-22"), // in the past
    ] {
        let err = env
            .service
            .check_availability("prop-1", "room-1", d(check_in), d(check_out))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::InvalidDateRange(_)));
    }
}

#[tokio::test]
async fn concurrent_creations_for_same_range_yield_one_winner() {
    let env = setup().await;

    let mut handles = Vec::new();
    for _ in 0..4 {
        let service = env.service.clone();
        handles.push(tokio::spawn(async move {
            service.create(room1_cmd("2025-03-10", "2025-03-12")).await
        }));
    }

    let mut winners = 0;
    let mut losers = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(_) => winners += 1,
            Err(DomainError::RoomUnavailable { .. }) => losers += 1,
            Err(other) => panic!("unexpected error: {:?}", other),
        }
    }
    assert_eq!(winners, 1);
    assert_eq!(losers, 3);

    // the invariant held: exactly one slot-holding booking
    let held: Vec<_> = env
        .service
        .list()
        .await
        .unwrap()
        .into_iter()
        .filter(|b| b.status.holds_slot())
        .collect();
    assert_eq!(held.len(), 1);
}

// ── Lifecycle transitions ──────────────────────────────────────

#[tokio::test]
async fn cancel_only_from_waiting_payment_and_not_idempotent() {
    let env = setup().await;
    let created = env
        .service
        .create(room1_cmd("2025-03-10", "2025-03-12"))
        .await
        .unwrap();

    let canceled = env.service.cancel(&created.booking.id).await.unwrap();
    assert_eq!(canceled.status, BookingStatus::Canceled);

    // second cancel fails: not idempotent
    let err = env.service.cancel(&created.booking.id).await.unwrap_err();
    assert!(matches!(
        err,
        DomainError::InvalidState { ref current, .. } if current == "canceled"
    ));

    // unknown booking
    assert!(matches!(
        env.service.cancel("nope").await.unwrap_err(),
        DomainError::NotFound { .. }
    ));

    // the slot is free again
    assert!(env
        .service
        .create(room1_cmd("2025-03-10", "2025-03-12"))
        .await
        .is_ok());
}

#[tokio::test]
async fn proof_review_transitions_follow_the_state_machine() {
    let env = setup().await;
    let id = env
        .service
        .create(room1_cmd("2025-03-10", "2025-03-12"))
        .await
        .unwrap()
        .booking
        .id;

    let b = env.service.submit_payment_proof(&id).await.unwrap();
    assert_eq!(b.status, BookingStatus::WaitingConfirmation);

    // guest can no longer cancel once proof is under review
    assert!(matches!(
        env.service.cancel(&id).await.unwrap_err(),
        DomainError::InvalidState { .. }
    ));

    // rejection sends it back to waiting_payment
    let b = env.service.reject_payment_proof(&id).await.unwrap();
    assert_eq!(b.status, BookingStatus::WaitingPayment);

    env.service.submit_payment_proof(&id).await.unwrap();
    let b = env.service.confirm(&id).await.unwrap();
    assert_eq!(b.status, BookingStatus::Processing);

    // the room stays held through confirmation
    let report = env
        .service
        .check_availability("prop-1", "room-1", d("2025-03-10"), d("2025-03-12"))
        .await
        .unwrap();
    assert!(!report.available);

    let b = env.service.complete(&id).await.unwrap();
    assert_eq!(b.status, BookingStatus::Completed);

    // completing twice is a state error
    assert!(matches!(
        env.service.complete(&id).await.unwrap_err(),
        DomainError::InvalidState { .. }
    ));
}

#[tokio::test]
async fn expire_is_deadline_gated_and_idempotent() {
    let env = setup().await;
    let id = env
        .service
        .create(room1_cmd("2025-03-10", "2025-03-12"))
        .await
        .unwrap()
        .booking
        .id;

    // before the deadline the sweep is a no-op, not an error
    assert!(!env.service.expire(&id).await.unwrap());
    assert_eq!(
        env.service.get(&id).await.unwrap().status,
        BookingStatus::WaitingPayment
    );

    env.clock.advance(Duration::hours(2));
    assert!(env.service.expire(&id).await.unwrap());
    assert_eq!(
        env.service.get(&id).await.unwrap().status,
        BookingStatus::Expired
    );

    // idempotent: second run is a quiet no-op
    assert!(!env.service.expire(&id).await.unwrap());
    // missing bookings are also a no-op for the sweeper
    assert!(!env.service.expire("nope").await.unwrap());

    // an expired booking releases its slot
    let report = env
        .service
        .check_availability("prop-1", "room-1", d("2025-03-10"), d("2025-03-12"))
        .await
        .unwrap();
    assert!(report.available);
}

#[tokio::test]
async fn expire_due_sweeps_only_overdue_bookings() {
    let env = setup().await;
    let overdue = env
        .service
        .create(room1_cmd("2025-03-10", "2025-03-12"))
        .await
        .unwrap()
        .booking
        .id;

    env.clock.advance(Duration::minutes(90));

    // created after the first one, so its deadline is still ahead
    let mut cmd = room1_cmd("2025-03-20", "2025-03-22");
    cmd.room_id = "room-2".into();
    cmd.price_per_night_cents = 8_000;
    cmd.total_amount_cents = 16_000;
    let fresh = env.service.create(cmd).await.unwrap().booking.id;

    assert_eq!(env.service.expire_due().await.unwrap(), 1);
    assert_eq!(
        env.service.get(&overdue).await.unwrap().status,
        BookingStatus::Expired
    );
    assert_eq!(
        env.service.get(&fresh).await.unwrap().status,
        BookingStatus::WaitingPayment
    );

    // overlapping sweeps change nothing further
    assert_eq!(env.service.expire_due().await.unwrap(), 0);
}

// ── Payment handoff ────────────────────────────────────────────

#[tokio::test]
async fn gateway_success_returns_token() {
    let (env, _db) = setup_with_gateway(Arc::new(StaticTokenGateway)).await;
    let mut cmd = room1_cmd("2025-03-10", "2025-03-12");
    cmd.payment_method = PaymentMethod::PaymentGateway;

    let created = env.service.create(cmd).await.unwrap();
    match created.payment {
        PaymentSetup::GatewayToken(token) => {
            assert_eq!(
                token.token,
                format!("tok-{}", created.booking.order_code)
            );
            assert!(token.redirect_url.is_some());
        }
        other => panic!("expected GatewayToken, got {:?}", other),
    }
    assert_eq!(
        created.booking.payment_method,
        PaymentMethod::PaymentGateway
    );
}

#[tokio::test]
async fn gateway_failure_downgrades_but_keeps_the_reservation() {
    let (env, _db) = setup_with_gateway(Arc::new(FailingGateway)).await;
    let mut cmd = room1_cmd("2025-03-10", "2025-03-12");
    cmd.payment_method = PaymentMethod::PaymentGateway;

    let created = env.service.create(cmd).await.unwrap();
    match &created.payment {
        PaymentSetup::GatewayUnavailable { reason } => {
            assert!(reason.contains("connection refused"));
        }
        other => panic!("expected GatewayUnavailable, got {:?}", other),
    }

    // downgrade is persisted, the booking still holds its slot
    let stored = env.service.get(&created.booking.id).await.unwrap();
    assert_eq!(stored.payment_method, PaymentMethod::ManualTransfer);
    assert_eq!(stored.status, BookingStatus::WaitingPayment);

    let report = env
        .service
        .check_availability("prop-1", "room-1", d("2025-03-10"), d("2025-03-12"))
        .await
        .unwrap();
    assert!(!report.available);
}
