//! Booking engine module.
//!
//! Availability checks and stay pricing for the booking flow. The calculators
//! are pure functions over a snapshot of confirmed stays; the services fetch
//! that snapshot and persist the outcome. The JSON routes here back the
//! booking form's calendar and price widget.

pub mod calculators;
pub mod models;
pub mod queries;
pub mod requests;
pub mod responses;
pub mod routes;
pub mod services;

// Re-export commonly used items
pub use calculators::{is_date_available, validate_and_price, BookingError, PricedStay, RoomTerms, StayRequest};
pub use models::ConfirmedStay;
pub use routes::router;
pub use services::{BookingOutcome, QuoteOutcome};
