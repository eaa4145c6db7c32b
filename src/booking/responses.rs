//! Response DTOs for the booking API

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

use super::calculators::BookingError;

/// Currency every rate on the site is listed in
pub const CURRENCY: &str = "EUR";

/// Money value for JSON responses
#[derive(Debug, Clone, Serialize)]
pub struct MoneyResponse {
    #[serde(with = "rust_decimal::serde::str")]
    pub amount: Decimal,
    pub currency: String,
}

impl MoneyResponse {
    pub fn eur(amount: Decimal) -> Self {
        Self {
            amount,
            currency: CURRENCY.to_string(),
        }
    }
}

/// Successful quote for a stay
#[derive(Debug, Serialize)]
pub struct QuoteResponse {
    pub room_id: Uuid,
    pub check_in_date: NaiveDate,
    pub check_out_date: NaiveDate,
    pub nights: i64,
    pub nightly_rate: MoneyResponse,
    pub total_price: MoneyResponse,
}

/// Structured validation failure for a quote or booking attempt
#[derive(Debug, Serialize)]
pub struct QuoteErrorResponse {
    pub error_type: String,
    pub message: String,
}

impl QuoteErrorResponse {
    pub fn from_error(err: &BookingError) -> Self {
        let error_type = match err {
            BookingError::MissingDates => "missing_dates",
            BookingError::PastDate => "past_date",
            BookingError::InvalidRange => "invalid_range",
            BookingError::CapacityExceeded { .. } => "capacity_exceeded",
            BookingError::DateConflict => "date_conflict",
        };

        Self {
            error_type: error_type.to_string(),
            message: err.to_string(),
        }
    }
}

/// Blocked dates for the booking calendar
#[derive(Debug, Serialize)]
pub struct UnavailableDatesResponse {
    pub room_id: Uuid,
    pub unavailable_dates: Vec<NaiveDate>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_error_types_are_stable() {
        let cases = [
            (BookingError::MissingDates, "missing_dates"),
            (BookingError::PastDate, "past_date"),
            (BookingError::InvalidRange, "invalid_range"),
            (BookingError::CapacityExceeded { capacity: 2 }, "capacity_exceeded"),
            (BookingError::DateConflict, "date_conflict"),
        ];
        for (err, expected) in cases {
            assert_eq!(QuoteErrorResponse::from_error(&err).error_type, expected);
        }
    }

    #[test]
    fn test_capacity_message_names_the_limit() {
        let response =
            QuoteErrorResponse::from_error(&BookingError::CapacityExceeded { capacity: 4 });
        assert!(response.message.contains('4'));
    }

    #[test]
    fn test_money_serializes_amount_as_string() {
        let value = serde_json::to_value(MoneyResponse::eur(dec!(300))).unwrap();
        assert_eq!(value["amount"], "300");
        assert_eq!(value["currency"], "EUR");
    }
}
