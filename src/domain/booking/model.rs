//! Booking domain entity

use chrono::{DateTime, Duration, NaiveDate, Utc};
use rand::Rng;

/// Booking status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingStatus {
    /// Created, waiting for the guest to pay before the hold expires
    WaitingPayment,
    /// Manual-transfer proof submitted, waiting for owner review
    WaitingConfirmation,
    /// Payment confirmed, stay in progress
    Processing,
    /// Stay completed
    Completed,
    /// Guest cancelled before paying
    Canceled,
    /// Hold deadline passed without payment
    Expired,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::WaitingPayment => "waiting_payment",
            Self::WaitingConfirmation => "waiting_confirmation",
            Self::Processing => "processing",
            Self::Completed => "completed",
            Self::Canceled => "canceled",
            Self::Expired => "expired",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "waiting_payment" => Some(Self::WaitingPayment),
            "waiting_confirmation" => Some(Self::WaitingConfirmation),
            "processing" => Some(Self::Processing),
            "completed" => Some(Self::Completed),
            "canceled" => Some(Self::Canceled),
            "expired" => Some(Self::Expired),
            _ => None,
        }
    }

    /// Statuses that occupy the room for overlap purposes.
    pub fn holds_slot(&self) -> bool {
        matches!(
            self,
            Self::WaitingPayment | Self::WaitingConfirmation | Self::Processing | Self::Completed
        )
    }

    /// The holds-a-slot status set, as stored strings, for query filters.
    pub fn slot_holding_strs() -> [&'static str; 4] {
        [
            Self::WaitingPayment.as_str(),
            Self::WaitingConfirmation.as_str(),
            Self::Processing.as_str(),
            Self::Completed.as_str(),
        ]
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Canceled | Self::Expired)
    }
}

impl std::fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// How the guest intends to pay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PaymentMethod {
    #[default]
    ManualTransfer,
    PaymentGateway,
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ManualTransfer => "manual_transfer",
            Self::PaymentGateway => "payment_gateway",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "manual_transfer" => Some(Self::ManualTransfer),
            "payment_gateway" => Some(Self::PaymentGateway),
            _ => None,
        }
    }
}

impl std::fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Alphabet for order codes: uppercase alphanumerics minus the
/// lookalikes (0/O, 1/I/L), so codes survive being read over the phone.
const ORDER_CODE_ALPHABET: &[u8] = b"ABCDEFGHJKMNPQRSTUVWXYZ23456789";
const ORDER_CODE_PREFIX: &str = "BK-";
const ORDER_CODE_LEN: usize = 8;

/// Generate a human-readable order code, e.g. `BK-7QX2MRNF`.
///
/// Uniqueness is enforced by the store's unique index; callers re-generate
/// on the (astronomically rare) collision.
pub fn generate_order_code() -> String {
    let mut rng = rand::thread_rng();
    let suffix: String = (0..ORDER_CODE_LEN)
        .map(|_| {
            let idx = rng.gen_range(0..ORDER_CODE_ALPHABET.len());
            ORDER_CODE_ALPHABET[idx] as char
        })
        .collect();
    format!("{}{}", ORDER_CODE_PREFIX, suffix)
}

/// Input for creating a booking, after validation and price verification.
#[derive(Debug, Clone)]
pub struct NewBooking {
    pub guest_id: String,
    pub tenant_id: String,
    pub property_id: String,
    pub room_id: String,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub nights: i64,
    pub price_per_night_cents: i64,
    pub total_amount_cents: i64,
    pub payment_method: PaymentMethod,
}

/// One reservation attempt/commitment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Booking {
    pub id: String,
    /// Human-readable unique code, distinct from the internal id.
    pub order_code: String,
    pub guest_id: String,
    pub tenant_id: String,
    pub property_id: String,
    pub room_id: String,
    /// Stay is the half-open range `[check_in, check_out)`.
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub nights: i64,
    pub price_per_night_cents: i64,
    pub total_amount_cents: i64,
    pub status: BookingStatus,
    pub payment_method: PaymentMethod,
    pub created_at: DateTime<Utc>,
    /// Unpaid bookings past this instant are expired by the sweeper.
    pub expires_at: DateTime<Utc>,
}

impl Booking {
    /// Build a fresh booking in `WaitingPayment` with the given hold
    /// window. `now` comes from the injected clock, never read directly.
    pub fn create(new: NewBooking, order_code: String, now: DateTime<Utc>, hold: Duration) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            order_code,
            guest_id: new.guest_id,
            tenant_id: new.tenant_id,
            property_id: new.property_id,
            room_id: new.room_id,
            check_in: new.check_in,
            check_out: new.check_out,
            nights: new.nights,
            price_per_night_cents: new.price_per_night_cents,
            total_amount_cents: new.total_amount_cents,
            status: BookingStatus::WaitingPayment,
            payment_method: new.payment_method,
            created_at: now,
            expires_at: now + hold,
        }
    }

    /// Whether the payment hold has lapsed as of `now`.
    pub fn is_past_deadline(&self, now: DateTime<Utc>) -> bool {
        self.status == BookingStatus::WaitingPayment && now > self.expires_at
    }
}

// ── Tests ──────────────────────────────────────────────────────
