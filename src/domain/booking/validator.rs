//! Prospective-booking validation
//!
//! Runs before anything touches the store. Expected failures come back as
//! a field → message map (`FieldErrors`); nothing here panics on bad
//! input. "Today" is always passed in by the caller so deadline and
//! date-sanity rules are deterministic under test.

use chrono::NaiveDate;

use crate::domain::error::{DomainError, DomainResult, FieldErrors};
use crate::domain::pricing;

/// Longest stay the engine accepts, in nights.
pub const MAX_STAY_NIGHTS: i64 = 365;

/// Requested guest counts.
#[derive(Debug, Clone, Copy)]
pub struct GuestCounts {
    pub adults: u32,
    pub children: u32,
    pub pets: u32,
}

impl GuestCounts {
    /// Guests that count against the room cap (pets do not).
    pub fn persons(&self) -> u32 {
        self.adults + self.children
    }
}

/// Date rules shared by booking creation and availability queries:
/// check-in not in the past (date-only comparison), check-out strictly
/// after check-in, stay length within `[1, MAX_STAY_NIGHTS]`.
///
/// Returns the number of nights.
pub fn validate_date_range(
    check_in: NaiveDate,
    check_out: NaiveDate,
    today: NaiveDate,
) -> DomainResult<i64> {
    if check_in < today {
        return Err(DomainError::InvalidDateRange(format!(
            "check-in {} is in the past (today is {})",
            check_in, today
        )));
    }
    let nights = pricing::nights(check_in, check_out)?;
    if nights > MAX_STAY_NIGHTS {
        return Err(DomainError::InvalidDateRange(format!(
            "stay of {} nights exceeds the maximum of {}",
            nights, MAX_STAY_NIGHTS
        )));
    }
    Ok(nights)
}

/// Validate a prospective booking request.
///
/// On success returns the stay length in nights; on failure a map of
/// field names to human-readable messages, one per offending field.
pub fn validate(
    counts: &GuestCounts,
    check_in: NaiveDate,
    check_out: NaiveDate,
    today: NaiveDate,
) -> Result<i64, FieldErrors> {
    let mut errors = FieldErrors::new();

    if counts.adults < 1 {
        errors.push("adults", "at least one adult is required");
    }

    if check_in < today {
        errors.push("check_in", "check-in date must not be in the past");
    }

    let mut nights = 0;
    if check_out <= check_in {
        errors.push("check_out", "check-out must be after check-in");
    } else {
        nights = (check_out - check_in).num_days();
        if nights > MAX_STAY_NIGHTS {
            errors.push(
                "check_out",
                format!("stay cannot exceed {} nights", MAX_STAY_NIGHTS),
            );
        }
    }

    if errors.is_empty() {
        Ok(nights)
    } else {
        Err(errors)
    }
}

/// Enforce the effective guest cap (room capacity if set, otherwise the
/// property-wide maximum). Pets are not counted.
pub fn check_guest_limit(counts: &GuestCounts, max_guests: u32) -> DomainResult<()> {
    let requested = counts.persons();
    if requested > max_guests {
        return Err(DomainError::GuestLimitExceeded {
            requested,
            max: max_guests,
        });
    }
    Ok(())
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn counts(adults: u32, children: u32) -> GuestCounts {
        GuestCounts {
            adults,
            children,
            pets: 0,
        }
    }

    const TODAY: &str = "2025-03-01";

    #[test]
    fn valid_request_returns_nights() {
        let nights = validate(&counts(2, 1), d("2025-03-10"), d("2025-03-12"), d(TODAY));
        assert_eq!(nights, Ok(2));
    }

    #[test]
    fn check_in_today_is_allowed() {
        let nights = validate(&counts(1, 0), d(TODAY), d("2025-03-02"), d(TODAY));
        assert_eq!(nights, Ok(1));
    }

    #[test]
    fn zero_adults_is_a_field_error() {
        let errors = validate(&counts(0, 2), d("2025-03-10"), d("2025-03-12"), d(TODAY))
            .unwrap_err();
        assert!(errors.get("adults").is_some());
    }

    #[test]
    fn past_check_in_is_a_field_error() {
        let errors = validate(&counts(1, 0), d("2025-02-20"), d("2025-03-12"), d(TODAY))
            .unwrap_err();
        assert!(errors.get("check_in").is_some());
    }

    #[test]
    fn inverted_range_is_a_field_error() {
        let errors = validate(&counts(1, 0), d("2025-03-12"), d("2025-03-10"), d(TODAY))
            .unwrap_err();
        assert!(errors.get("check_out").is_some());
    }

    #[test]
    fn overlong_stay_is_a_field_error() {
        let errors = validate(&counts(1, 0), d("2025-03-10"), d("2026-03-12"), d(TODAY))
            .unwrap_err();
        assert!(errors.get("check_out").unwrap().contains("365"));
    }

    #[test]
    fn multiple_failures_reported_together() {
        let errors = validate(&counts(0, 0), d("2025-02-01"), d("2025-01-01"), d(TODAY))
            .unwrap_err();
        assert!(errors.get("adults").is_some());
        assert!(errors.get("check_in").is_some());
        assert!(errors.get("check_out").is_some());
    }

    #[test]
    fn date_range_rules_for_availability() {
        assert_eq!(
            validate_date_range(d("2025-03-10"), d("2025-03-12"), d(TODAY)).unwrap(),
            2
        );
        assert!(matches!(
            validate_date_range(d("2025-02-20"), d("2025-03-12"), d(TODAY)),
            Err(DomainError::InvalidDateRange(_))
        ));
        assert!(matches!(
            validate_date_range(d("2025-03-12"), d("2025-03-12"), d(TODAY)),
            Err(DomainError::InvalidDateRange(_))
        ));
        assert!(matches!(
            validate_date_range(d("2025-03-10"), d("2026-03-12"), d(TODAY)),
            Err(DomainError::InvalidDateRange(_))
        ));
    }

    #[test]
    fn guest_limit_counts_adults_and_children_only() {
        let c = GuestCounts {
            adults: 2,
            children: 1,
            pets: 3,
        };
        assert!(check_guest_limit(&c, 3).is_ok());
        assert!(matches!(
            check_guest_limit(&c, 2),
            Err(DomainError::GuestLimitExceeded {
                requested: 3,
                max: 2
            })
        ));
    }
}
