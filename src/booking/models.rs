//! Database models for availability queries.

use chrono::NaiveDate;
use sqlx::FromRow;

use crate::models::BookingStatus;

/// One booking's stay window, as returned by the backend
#[derive(Debug, Clone, FromRow)]
pub struct BookingWindow {
    pub check_in_date: NaiveDate,
    pub check_out_date: NaiveDate,
    pub status: String,
}

/// A stay window that blocks the calendar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfirmedStay {
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
}

impl BookingWindow {
    /// Validate the row at the collaborator boundary.
    ///
    /// Rows that do not block availability (pending, cancelled, or an
    /// unknown status) are dropped.
    pub fn into_confirmed(self) -> Option<ConfirmedStay> {
        let status = BookingStatus::parse(&self.status)?;
        status.blocks_availability().then_some(ConfirmedStay {
            check_in: self.check_in_date,
            check_out: self.check_out_date,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn window(status: &str) -> BookingWindow {
        BookingWindow {
            check_in_date: date(2025, 6, 10),
            check_out_date: date(2025, 6, 12),
            status: status.to_string(),
        }
    }

    #[test]
    fn test_confirmed_window_blocks() {
        let stay = window("confirmed").into_confirmed().unwrap();
        assert_eq!(stay.check_in, date(2025, 6, 10));
        assert_eq!(stay.check_out, date(2025, 6, 12));
    }

    #[test]
    fn test_pending_and_cancelled_windows_do_not_block() {
        assert_eq!(window("pending").into_confirmed(), None);
        assert_eq!(window("cancelled").into_confirmed(), None);
    }

    #[test]
    fn test_unknown_status_is_dropped() {
        assert_eq!(window("held").into_confirmed(), None);
    }
}
