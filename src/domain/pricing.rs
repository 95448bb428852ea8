//! Stay pricing
//!
//! All persisted amounts are integer minor units (cents). `Decimal` only
//! appears at the API boundary, where quotes arrive as decimal amounts and
//! are converted through [`to_cents`].
//!
//! Price overrides are NOT folded into the committed total. An override
//! inside the stay window only raises the `has_adjustments` flag on the
//! pricing summary: the quoted total a guest confirmed must never be
//! silently replaced. Callers that need per-night itemization compute it
//! explicitly from the override rows.

use chrono::NaiveDate;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::domain::error::{DomainError, DomainResult};
use crate::domain::room::PriceOverride;

/// Accepted absolute difference between a quoted and a computed total,
/// in minor units. One cent, i.e. the ±0.01 rounding tolerance.
pub const PRICE_TOLERANCE_CENTS: i64 = 1;

/// Number of nights in the half-open stay `[check_in, check_out)`.
///
/// Always ≥ 1 for a valid range; `InvalidDateRange` when
/// `check_out <= check_in`.
pub fn nights(check_in: NaiveDate, check_out: NaiveDate) -> DomainResult<i64> {
    let nights = (check_out - check_in).num_days();
    if nights < 1 {
        return Err(DomainError::InvalidDateRange(format!(
            "check-out {} must be after check-in {}",
            check_out, check_in
        )));
    }
    Ok(nights)
}

/// Base stay price: nightly rate × nights, in minor units.
pub fn base_price_cents(price_per_night_cents: i64, nights: i64) -> i64 {
    price_per_night_cents * nights
}

/// Whether any price override touches the stay window.
pub fn has_adjustments(
    overrides: &[PriceOverride],
    check_in: NaiveDate,
    check_out: NaiveDate,
) -> bool {
    overrides
        .iter()
        .any(|o| o.applies_within(check_in, check_out))
}

/// Compare a caller-supplied total against the computed one.
pub fn totals_match(quoted_cents: i64, computed_cents: i64, tolerance_cents: i64) -> bool {
    (quoted_cents - computed_cents).abs() <= tolerance_cents
}

/// Convert a decimal amount to minor units.
///
/// Rejects amounts with sub-cent precision or outside the i64 range; the
/// message is meant to be attached to the offending request field.
pub fn to_cents(amount: Decimal) -> Result<i64, String> {
    let scaled = amount * Decimal::from(100);
    if !scaled.fract().is_zero() {
        return Err(format!("{} has sub-cent precision", amount));
    }
    scaled
        .to_i64()
        .ok_or_else(|| format!("{} is out of range", amount))
}

/// Minor units back to a decimal amount (two fractional digits).
pub fn to_decimal(cents: i64) -> Decimal {
    Decimal::new(cents, 2)
}

/// Format minor units as a plain decimal string, e.g. `200.00`.
pub fn format_cents(cents: i64) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let abs = cents.abs();
    format!("{}{}.{:02}", sign, abs / 100, abs % 100)
}

/// Price information returned alongside an availability report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PricingSummary {
    pub nights: i64,
    pub price_per_night_cents: i64,
    pub base_price_cents: i64,
    /// True when at least one price override touches the stay window.
    /// Reported, not applied — see the module docs.
    pub has_adjustments: bool,
}

impl PricingSummary {
    pub fn new(price_per_night_cents: i64, nights: i64, has_adjustments: bool) -> Self {
        Self {
            nights,
            price_per_night_cents,
            base_price_cents: base_price_cents(price_per_night_cents, nights),
            has_adjustments,
        }
    }
}

// ── Tests ──────────────────────────────────────────────────────
