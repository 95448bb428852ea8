//! Half-open date interval tests
//!
//! Stays are `[check_in, check_out)`: the check-out day is excluded, so a
//! booking checking out on the day another checks in never conflicts.
//! Pure functions, no I/O.

use chrono::NaiveDate;

/// True iff the half-open intervals `[a_start, a_end)` and
/// `[b_start, b_end)` intersect.
///
/// This is the standard collapsed form of the three-case union
/// (b starts inside a, b ends inside a, b contains a).
pub fn overlaps(
    a_start: NaiveDate,
    a_end: NaiveDate,
    b_start: NaiveDate,
    b_end: NaiveDate,
) -> bool {
    a_start < b_end && b_start < a_end
}

/// True iff `date` falls inside the half-open interval `[start, end)`.
pub fn contains_date(start: NaiveDate, end: NaiveDate, date: NaiveDate) -> bool {
    start <= date && date < end
}

// ── Tests ──────────────────────────────────────────────────────
