//! Room catalog entities
//!
//! Rooms, owner-set blackout dates and price overrides are owned by the
//! property-management collaborator; the engine only reads them.

use chrono::{Days, NaiveDate};

use crate::domain::daterange;

/// A bookable room.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Room {
    pub id: String,
    pub property_id: String,
    pub name: String,
    /// Base nightly rate in minor units.
    pub base_price_cents: i64,
    /// Guest capacity; when unset the owning property's cap applies.
    pub capacity: Option<u32>,
}

impl Room {
    /// The guest cap that applies to this room: its own capacity if set,
    /// otherwise the property-wide maximum.
    pub fn effective_max_guests(&self, property_max_guests: u32) -> u32 {
        self.capacity.unwrap_or(property_max_guests)
    }
}

/// A single date an owner marked unavailable, independent of bookings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomBlockedDate {
    pub id: String,
    pub room_id: String,
    pub date: NaiveDate,
}

/// Price override kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverrideKind {
    Percentage,
    FixedAmount,
}

impl OverrideKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Percentage => "percentage",
            Self::FixedAmount => "fixed_amount",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "percentage" => Some(Self::Percentage),
            "fixed_amount" => Some(Self::FixedAmount),
            _ => None,
        }
    }
}

/// A time-bounded adjustment to a room's nightly price.
///
/// The validity window `[starts_on, ends_on]` is inclusive on both ends;
/// an override for one specific date has `starts_on == ends_on`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriceOverride {
    pub id: String,
    pub room_id: String,
    pub kind: OverrideKind,
    /// Basis points for percentage overrides, minor units for fixed
    /// amounts. Interpretation belongs to the pricing policy owner; the
    /// engine only reports the override's presence.
    pub value: i64,
    pub starts_on: NaiveDate,
    pub ends_on: NaiveDate,
}

impl PriceOverride {
    /// Whether this override touches any charged night of the half-open
    /// stay `[check_in, check_out)`.
    pub fn applies_within(&self, check_in: NaiveDate, check_out: NaiveDate) -> bool {
        // inclusive window end → exclusive bound for the overlap test
        let window_end = self
            .ends_on
            .checked_add_days(Days::new(1))
            .unwrap_or(self.ends_on);
        daterange::overlaps(check_in, check_out, self.starts_on, window_end)
    }
}

// ── Tests ──────────────────────────────────────────────────────
