//! Core availability and pricing functions.
//!
//! Pure functions for the booking flow - no database access. Callers fetch
//! the room and its confirmed stays, pass an explicit `today`, and persist
//! the priced result themselves.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::models::Room;

use super::models::ConfirmedStay;

/// Validation failures for a stay request, in check order.
///
/// All of these are recoverable, user-facing rejections; the first failing
/// check wins.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BookingError {
    #[error("Check-in and check-out dates are required")]
    MissingDates,

    #[error("Check-in date cannot be in the past")]
    PastDate,

    #[error("Check-out must be after check-in")]
    InvalidRange,

    #[error("This room sleeps at most {capacity} guests")]
    CapacityExceeded { capacity: i32 },

    #[error("The room is already booked for part of that stay")]
    DateConflict,
}

/// Requested stay as it arrives from the booking form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StayRequest {
    pub check_in: Option<NaiveDate>,
    pub check_out: Option<NaiveDate>,
    pub guest_count: i32,
}

/// The room attributes a stay is validated and priced against
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoomTerms {
    pub nightly_rate: Decimal,
    pub capacity: i32,
}

impl From<&Room> for RoomTerms {
    fn from(room: &Room) -> Self {
        Self {
            nightly_rate: room.price_per_night,
            capacity: room.capacity,
        }
    }
}

/// A validated, priced stay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PricedStay {
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub nights: i64,
    pub total_price: Decimal,
}

/// True unless `date` falls inside the inclusive [check-in, check-out]
/// range of some confirmed stay.
///
/// The departure day itself stays blocked: the room is held through
/// turnover, so a new arrival on an existing stay's check-out day is not
/// offered.
pub fn is_date_available(date: NaiveDate, confirmed: &[ConfirmedStay]) -> bool {
    !confirmed
        .iter()
        .any(|stay| date >= stay.check_in && date <= stay.check_out)
}

/// Nights between check-in and check-out (calendar-day intervals)
pub fn nights_between(check_in: NaiveDate, check_out: NaiveDate) -> i64 {
    (check_out - check_in).num_days()
}

/// Validate a stay request against a room and its confirmed stays, then
/// price it.
///
/// `today` is an explicit input so callers own the clock. Checks run in a
/// fixed order and the first failure wins:
/// dates present, check-in not past, range valid, capacity, availability.
///
/// The requested stay claims the nights [check-in, check-out); the guest's
/// own departure day is left free until the booking is persisted.
pub fn validate_and_price(
    request: &StayRequest,
    room: RoomTerms,
    confirmed: &[ConfirmedStay],
    today: NaiveDate,
) -> Result<PricedStay, BookingError> {
    let (check_in, check_out) = match (request.check_in, request.check_out) {
        (Some(check_in), Some(check_out)) => (check_in, check_out),
        _ => return Err(BookingError::MissingDates),
    };

    if check_in < today {
        return Err(BookingError::PastDate);
    }

    if check_in >= check_out {
        return Err(BookingError::InvalidRange);
    }

    if request.guest_count > room.capacity {
        return Err(BookingError::CapacityExceeded {
            capacity: room.capacity,
        });
    }

    let conflict = check_in
        .iter_days()
        .take_while(|night| *night < check_out)
        .any(|night| !is_date_available(night, confirmed));
    if conflict {
        return Err(BookingError::DateConflict);
    }

    let nights = nights_between(check_in, check_out);
    Ok(PricedStay {
        check_in,
        check_out,
        nights,
        total_price: Decimal::from(nights) * room.nightly_rate,
    })
}

/// Dates in [from, to] blocked by confirmed stays, for the calendar widget
pub fn unavailable_dates(
    from: NaiveDate,
    to: NaiveDate,
    confirmed: &[ConfirmedStay],
) -> Vec<NaiveDate> {
    from.iter_days()
        .take_while(|date| *date <= to)
        .filter(|date| !is_date_available(*date, confirmed))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn stay(ci: NaiveDate, co: NaiveDate) -> ConfirmedStay {
        ConfirmedStay {
            check_in: ci,
            check_out: co,
        }
    }

    fn room(rate: Decimal, capacity: i32) -> RoomTerms {
        RoomTerms {
            nightly_rate: rate,
            capacity,
        }
    }

    fn request(ci: NaiveDate, co: NaiveDate, guests: i32) -> StayRequest {
        StayRequest {
            check_in: Some(ci),
            check_out: Some(co),
            guest_count: guests,
        }
    }

    const TODAY: (i32, u32, u32) = (2025, 5, 1);

    fn today() -> NaiveDate {
        date(TODAY.0, TODAY.1, TODAY.2)
    }

    // ==================== is_date_available tests ====================

    #[test]
    fn test_dates_inside_a_confirmed_stay_are_unavailable() {
        let confirmed = [stay(date(2025, 6, 10), date(2025, 6, 14))];
        for day in 10..=14 {
            assert!(!is_date_available(date(2025, 6, day), &confirmed));
        }
    }

    #[test]
    fn test_boundary_days_are_both_blocked() {
        // Inclusive on both ends: arrival day and departure day
        let confirmed = [stay(date(2025, 6, 10), date(2025, 6, 14))];
        assert!(!is_date_available(date(2025, 6, 10), &confirmed));
        assert!(!is_date_available(date(2025, 6, 14), &confirmed));
    }

    #[test]
    fn test_dates_outside_every_stay_are_available() {
        let confirmed = [
            stay(date(2025, 6, 10), date(2025, 6, 14)),
            stay(date(2025, 6, 20), date(2025, 6, 22)),
        ];
        assert!(is_date_available(date(2025, 6, 9), &confirmed));
        assert!(is_date_available(date(2025, 6, 15), &confirmed));
        assert!(is_date_available(date(2025, 6, 23), &confirmed));
    }

    #[test]
    fn test_no_confirmed_stays_means_everything_available() {
        assert!(is_date_available(date(2025, 6, 1), &[]));
    }

    // ==================== validate_and_price tests ====================

    #[test]
    fn test_three_night_stay_is_priced() {
        let result = validate_and_price(
            &request(date(2025, 6, 1), date(2025, 6, 4), 2),
            room(dec!(100), 4),
            &[],
            today(),
        )
        .unwrap();

        assert_eq!(result.nights, 3);
        assert_eq!(result.total_price, dec!(300));
        assert_eq!(result.check_in, date(2025, 6, 1));
        assert_eq!(result.check_out, date(2025, 6, 4));
    }

    #[test]
    fn test_missing_dates_rejected_first() {
        let missing = StayRequest {
            check_in: None,
            check_out: Some(date(2025, 6, 4)),
            guest_count: 2,
        };
        assert_eq!(
            validate_and_price(&missing, room(dec!(100), 4), &[], today()),
            Err(BookingError::MissingDates)
        );

        let missing = StayRequest {
            check_in: Some(date(2025, 6, 1)),
            check_out: None,
            guest_count: 2,
        };
        assert_eq!(
            validate_and_price(&missing, room(dec!(100), 4), &[], today()),
            Err(BookingError::MissingDates)
        );
    }

    #[test]
    fn test_check_in_before_today_rejected() {
        assert_eq!(
            validate_and_price(
                &request(date(2025, 4, 30), date(2025, 5, 3), 2),
                room(dec!(100), 4),
                &[],
                today(),
            ),
            Err(BookingError::PastDate)
        );
    }

    #[test]
    fn test_check_in_today_is_bookable() {
        let result = validate_and_price(
            &request(today(), date(2025, 5, 2), 2),
            room(dec!(100), 4),
            &[],
            today(),
        )
        .unwrap();
        assert_eq!(result.nights, 1);
        assert_eq!(result.total_price, dec!(100));
    }

    #[test]
    fn test_check_in_equal_to_check_out_rejected() {
        assert_eq!(
            validate_and_price(
                &request(date(2025, 6, 1), date(2025, 6, 1), 2),
                room(dec!(100), 4),
                &[],
                today(),
            ),
            Err(BookingError::InvalidRange)
        );
    }

    #[test]
    fn test_reversed_range_rejected() {
        assert_eq!(
            validate_and_price(
                &request(date(2025, 6, 4), date(2025, 6, 1), 2),
                room(dec!(100), 4),
                &[],
                today(),
            ),
            Err(BookingError::InvalidRange)
        );
    }

    #[test]
    fn test_capacity_exceeded_regardless_of_dates() {
        assert_eq!(
            validate_and_price(
                &request(date(2025, 6, 1), date(2025, 6, 4), 5),
                room(dec!(100), 4),
                &[],
                today(),
            ),
            Err(BookingError::CapacityExceeded { capacity: 4 })
        );
    }

    #[test]
    fn test_overlapping_confirmed_stay_rejected() {
        let confirmed = [stay(date(2025, 6, 2), date(2025, 6, 6))];
        assert_eq!(
            validate_and_price(
                &request(date(2025, 6, 1), date(2025, 6, 4), 2),
                room(dec!(100), 4),
                &confirmed,
                today(),
            ),
            Err(BookingError::DateConflict)
        );
    }

    #[test]
    fn test_arrival_on_existing_departure_day_rejected() {
        // No same-day turnover: the departing stay holds its check-out day
        let confirmed = [stay(date(2025, 6, 2), date(2025, 6, 6))];
        assert_eq!(
            validate_and_price(
                &request(date(2025, 6, 6), date(2025, 6, 8), 2),
                room(dec!(100), 4),
                &confirmed,
                today(),
            ),
            Err(BookingError::DateConflict)
        );
    }

    #[test]
    fn test_departure_on_existing_arrival_day_allowed() {
        // The new stay only claims [check-in, check-out), so leaving the day
        // the next guest arrives is fine
        let confirmed = [stay(date(2025, 6, 6), date(2025, 6, 9))];
        let result = validate_and_price(
            &request(date(2025, 6, 3), date(2025, 6, 6), 2),
            room(dec!(100), 4),
            &confirmed,
            today(),
        )
        .unwrap();
        assert_eq!(result.nights, 3);
    }

    #[test]
    fn test_first_failing_check_wins() {
        // Past date and over capacity at once: the date check fires first
        let confirmed = [stay(date(2025, 4, 28), date(2025, 5, 2))];
        assert_eq!(
            validate_and_price(
                &request(date(2025, 4, 30), date(2025, 5, 3), 9),
                room(dec!(100), 4),
                &confirmed,
                today(),
            ),
            Err(BookingError::PastDate)
        );
    }

    #[test]
    fn test_validate_and_price_is_idempotent() {
        let req = request(date(2025, 6, 1), date(2025, 6, 4), 2);
        let confirmed = [stay(date(2025, 6, 10), date(2025, 6, 12))];
        let first = validate_and_price(&req, room(dec!(100), 4), &confirmed, today());
        let second = validate_and_price(&req, room(dec!(100), 4), &confirmed, today());
        assert_eq!(first, second);
    }

    #[test]
    fn test_fractional_rate_pricing() {
        let result = validate_and_price(
            &request(date(2025, 6, 1), date(2025, 6, 3), 2),
            room(dec!(99.50), 4),
            &[],
            today(),
        )
        .unwrap();
        assert_eq!(result.total_price, dec!(199.00));
    }

    // ==================== nights_between tests ====================

    #[test]
    fn test_nights_between() {
        assert_eq!(nights_between(date(2025, 6, 1), date(2025, 6, 4)), 3);
        assert_eq!(nights_between(date(2025, 6, 1), date(2025, 6, 2)), 1);
        // Across a month boundary
        assert_eq!(nights_between(date(2025, 6, 30), date(2025, 7, 2)), 2);
    }

    // ==================== unavailable_dates tests ====================

    #[test]
    fn test_unavailable_dates_in_window() {
        let confirmed = [stay(date(2025, 6, 10), date(2025, 6, 12))];
        let blocked = unavailable_dates(date(2025, 6, 8), date(2025, 6, 14), &confirmed);
        assert_eq!(
            blocked,
            vec![date(2025, 6, 10), date(2025, 6, 11), date(2025, 6, 12)]
        );
    }

    #[test]
    fn test_unavailable_dates_empty_when_free() {
        assert!(unavailable_dates(date(2025, 6, 1), date(2025, 6, 30), &[]).is_empty());
    }
}
