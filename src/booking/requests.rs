//! Request DTOs for the booking API and form

use chrono::NaiveDate;
use serde::Deserialize;

use super::calculators::StayRequest;

/// Quote request from the booking widget
#[derive(Debug, Deserialize)]
pub struct QuoteRequest {
    #[serde(default)]
    pub check_in_date: Option<NaiveDate>,
    #[serde(default)]
    pub check_out_date: Option<NaiveDate>,
    pub guest_count: i32,
}

impl QuoteRequest {
    pub fn stay(&self) -> StayRequest {
        StayRequest {
            check_in: self.check_in_date,
            check_out: self.check_out_date,
            guest_count: self.guest_count,
        }
    }
}

/// Booking form body.
///
/// HTML forms post dates as strings and an untouched field arrives as an
/// empty string, so both empty and unparseable values count as missing.
#[derive(Debug, Deserialize)]
pub struct BookingForm {
    pub check_in_date: String,
    pub check_out_date: String,
    pub guest_count: i32,
}

impl BookingForm {
    pub fn stay(&self) -> StayRequest {
        StayRequest {
            check_in: parse_form_date(&self.check_in_date),
            check_out: parse_form_date(&self.check_out_date),
            guest_count: self.guest_count,
        }
    }
}

/// Window for the unavailable-dates calendar query
#[derive(Debug, Deserialize)]
pub struct CalendarQuery {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

fn parse_form_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_form_dates_parse() {
        let form = BookingForm {
            check_in_date: "2025-06-01".to_string(),
            check_out_date: " 2025-06-04 ".to_string(),
            guest_count: 2,
        };
        let stay = form.stay();
        assert_eq!(stay.check_in, NaiveDate::from_ymd_opt(2025, 6, 1));
        assert_eq!(stay.check_out, NaiveDate::from_ymd_opt(2025, 6, 4));
        assert_eq!(stay.guest_count, 2);
    }

    #[test]
    fn test_empty_form_dates_are_missing() {
        let form = BookingForm {
            check_in_date: String::new(),
            check_out_date: String::new(),
            guest_count: 1,
        };
        let stay = form.stay();
        assert_eq!(stay.check_in, None);
        assert_eq!(stay.check_out, None);
    }

    #[test]
    fn test_garbage_form_date_is_missing() {
        let form = BookingForm {
            check_in_date: "01/06/2025".to_string(),
            check_out_date: "2025-06-04".to_string(),
            guest_count: 1,
        };
        assert_eq!(form.stay().check_in, None);
    }
}
