//! Booking models

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::FromRow;
use uuid::Uuid;

/// Booking lifecycle states as stored by the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Cancelled,
}

impl BookingStatus {
    /// Parse the backend's text status; unknown values are rejected at the boundary
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "pending" => Some(Self::Pending),
            "confirmed" => Some(Self::Confirmed),
            "cancelled" => Some(Self::Cancelled),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Cancelled => "cancelled",
        }
    }

    /// Only confirmed stays block the calendar
    pub fn blocks_availability(&self) -> bool {
        matches!(self, Self::Confirmed)
    }
}

impl std::fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Booking from the backend's `bookings` table
#[derive(Debug, Clone, FromRow)]
pub struct Booking {
    pub id: Uuid,
    pub room_id: Uuid,
    pub user_id: Uuid,
    pub check_in_date: NaiveDate,
    pub check_out_date: NaiveDate,
    pub guest_count: i32,
    pub total_price: Decimal,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

impl Booking {
    pub fn parsed_status(&self) -> Option<BookingStatus> {
        BookingStatus::parse(&self.status)
    }
}

/// Booking joined with its room, for the guest dashboard
#[derive(Debug, Clone, FromRow)]
pub struct BookingWithRoom {
    pub id: Uuid,
    pub room_id: Uuid,
    pub check_in_date: NaiveDate,
    pub check_out_date: NaiveDate,
    pub guest_count: i32,
    pub total_price: Decimal,
    pub status: String,
    pub room_name: String,
    pub room_type: String,
}

impl BookingWithRoom {
    pub fn parsed_status(&self) -> Option<BookingStatus> {
        BookingStatus::parse(&self.status)
    }

    /// Whether the guest may still cancel (not cancelled, stay not started)
    pub fn cancellable(&self, today: NaiveDate) -> bool {
        self.parsed_status()
            .is_some_and(|s| s != BookingStatus::Cancelled)
            && today < self.check_in_date
    }
}

/// Booking joined with room and guest, for the admin back-office
#[derive(Debug, Clone, FromRow)]
pub struct BookingAdminRow {
    pub id: Uuid,
    pub check_in_date: NaiveDate,
    pub check_out_date: NaiveDate,
    pub guest_count: i32,
    pub total_price: Decimal,
    pub status: String,
    pub room_name: String,
    pub guest_email: String,
}

impl BookingAdminRow {
    pub fn is_pending(&self) -> bool {
        BookingStatus::parse(&self.status) == Some(BookingStatus::Pending)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_status_parse_round_trip() {
        for status in [
            BookingStatus::Pending,
            BookingStatus::Confirmed,
            BookingStatus::Cancelled,
        ] {
            assert_eq!(BookingStatus::parse(status.as_str()), Some(status));
        }
    }

    #[test]
    fn test_status_parse_rejects_unknown() {
        assert_eq!(BookingStatus::parse("approved"), None);
        assert_eq!(BookingStatus::parse(""), None);
        assert_eq!(BookingStatus::parse("Confirmed"), None);
    }

    #[test]
    fn test_only_confirmed_blocks_availability() {
        assert!(BookingStatus::Confirmed.blocks_availability());
        assert!(!BookingStatus::Pending.blocks_availability());
        assert!(!BookingStatus::Cancelled.blocks_availability());
    }

    fn booking_with(status: &str, check_in: NaiveDate) -> BookingWithRoom {
        BookingWithRoom {
            id: Uuid::new_v4(),
            room_id: Uuid::new_v4(),
            check_in_date: check_in,
            check_out_date: check_in + chrono::Days::new(2),
            guest_count: 2,
            total_price: dec!(240),
            status: status.to_string(),
            room_name: "Harbour View".to_string(),
            room_type: "double".to_string(),
        }
    }

    #[test]
    fn test_cancellable_before_check_in() {
        let today = date(2025, 6, 1);
        assert!(booking_with("pending", date(2025, 6, 2)).cancellable(today));
        assert!(booking_with("confirmed", date(2025, 6, 2)).cancellable(today));
    }

    #[test]
    fn test_not_cancellable_on_or_after_check_in() {
        let today = date(2025, 6, 1);
        assert!(!booking_with("confirmed", today).cancellable(today));
        assert!(!booking_with("confirmed", date(2025, 5, 30)).cancellable(today));
    }

    #[test]
    fn test_cancelled_booking_not_cancellable_again() {
        let today = date(2025, 6, 1);
        assert!(!booking_with("cancelled", date(2025, 6, 10)).cancellable(today));
    }
}
