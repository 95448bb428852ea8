//! Domain errors
//!
//! Every expected failure of the reservation engine is a `DomainError`
//! variant and is returned, never panicked. Only genuinely unexpected
//! faults (store unreachable, corrupted rows) surface as `Storage`.

use std::collections::BTreeMap;
use std::fmt;

use chrono::NaiveDate;
use thiserror::Error;

/// Field-level validation messages, keyed by request field name.
///
/// Ordered so error output is stable for clients and tests.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FieldErrors(BTreeMap<String, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.insert(field.into(), message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn into_inner(self) -> BTreeMap<String, String> {
        self.0
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined: Vec<String> = self
            .0
            .iter()
            .map(|(field, msg)| format!("{}: {}", field, msg))
            .collect();
        write!(f, "{}", joined.join("; "))
    }
}

/// An existing booking that occupies (part of) a requested date range.
///
/// Carried inside `RoomUnavailable` so callers can show the guest exactly
/// which stay is in the way.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotConflict {
    pub order_code: String,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
}

#[derive(Debug, Error)]
pub enum DomainError {
    /// User-correctable input errors, field by field. Returned, never
    /// logged as an incident.
    #[error("Validation failed: {0}")]
    Validation(FieldErrors),

    #[error("Not found: {entity} with {field}={value}")]
    NotFound {
        entity: &'static str,
        field: &'static str,
        value: String,
    },

    /// The requested range is blocked or overlaps a slot-holding booking.
    /// Expected and recoverable; the caller shows a precise message.
    #[error(
        "Room is not available for the requested dates ({} blocked date(s), {} conflicting booking(s))",
        .blocked_dates.len(),
        .conflicts.len()
    )]
    RoomUnavailable {
        blocked_dates: Vec<NaiveDate>,
        conflicts: Vec<SlotConflict>,
    },

    #[error("Guest count {requested} exceeds the maximum of {max} for this room")]
    GuestLimitExceeded { requested: u32, max: u32 },

    #[error(
        "Quoted total {} does not match the computed total {}",
        format_minor_units(.provided_cents),
        format_minor_units(.expected_cents)
    )]
    PriceMismatch {
        expected_cents: i64,
        provided_cents: i64,
    },

    #[error("Invalid date range: {0}")]
    InvalidDateRange(String),

    /// The payment gateway could not issue a token. Recovered locally by
    /// downgrading the booking to manual transfer; the booking persists.
    #[error("Payment gateway unavailable: {0}")]
    PaymentGatewayUnavailable(String),

    /// A state transition was requested from the wrong current state.
    #[error("Invalid state: booking is {current}, expected {expected}")]
    InvalidState {
        current: String,
        expected: &'static str,
    },

    #[error("Storage error: {0}")]
    Storage(String),
}

/// Result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;

fn format_minor_units(cents: &i64) -> String {
    let sign = if *cents < 0 { "-" } else { "" };
    let abs = cents.abs();
    format!("{}{}.{:02}", sign, abs / 100, abs % 100)
}

// ── Tests ──────────────────────────────────────────────────────
