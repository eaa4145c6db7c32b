//! Guest dashboard route handler

use askama::Template;
use axum::extract::State;
use axum::response::Html;
use chrono::{NaiveDate, Utc};

use crate::auth::CurrentUser;
use crate::booking::queries;
use crate::error::Result;
use crate::models::{BookingStatus, BookingWithRoom};
use crate::routes::Nav;
use crate::AppState;

/// One booking row with its per-row view state resolved
struct BookingView {
    booking: BookingWithRoom,
    cancellable: bool,
}

/// Dashboard template
#[derive(Template)]
#[template(path = "dashboard/index.html")]
struct DashboardTemplate {
    nav: Nav,
    full_name: String,
    bookings: Vec<BookingView>,
    upcoming_count: usize,
    completed_count: usize,
    has_bookings: bool,
}

/// The signed-in guest's bookings, earliest stay first
pub async fn index(State(state): State<AppState>, user: CurrentUser) -> Result<Html<String>> {
    let bookings = queries::get_bookings_for_user(&state.db, user.id).await?;
    let today = Utc::now().date_naive();
    let (upcoming_count, completed_count) = stay_counts(&bookings, today);

    let bookings = bookings
        .into_iter()
        .map(|booking| BookingView {
            cancellable: booking.cancellable(today),
            booking,
        })
        .collect::<Vec<_>>();

    let template = DashboardTemplate {
        nav: Nav::signed_in(&user),
        full_name: user.full_name.clone(),
        upcoming_count,
        completed_count,
        has_bookings: !bookings.is_empty(),
        bookings,
    };

    Ok(Html(template.render()?))
}

/// Upcoming (not cancelled, not yet started) and completed stays
fn stay_counts(bookings: &[BookingWithRoom], today: NaiveDate) -> (usize, usize) {
    let upcoming = bookings
        .iter()
        .filter(|b| {
            b.parsed_status()
                .is_some_and(|s| s != BookingStatus::Cancelled)
                && b.check_in_date >= today
        })
        .count();

    let completed = bookings
        .iter()
        .filter(|b| {
            b.parsed_status() == Some(BookingStatus::Confirmed) && b.check_out_date < today
        })
        .count();

    (upcoming, completed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use uuid::Uuid;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn booking(status: &str, check_in: NaiveDate, check_out: NaiveDate) -> BookingWithRoom {
        BookingWithRoom {
            id: Uuid::new_v4(),
            room_id: Uuid::new_v4(),
            check_in_date: check_in,
            check_out_date: check_out,
            guest_count: 2,
            total_price: dec!(200),
            status: status.to_string(),
            room_name: "Harbour View".to_string(),
            room_type: "double".to_string(),
        }
    }

    #[test]
    fn test_stay_counts() {
        let today = date(2025, 6, 15);
        let bookings = vec![
            // Upcoming, pending
            booking("pending", date(2025, 7, 1), date(2025, 7, 4)),
            // Upcoming, confirmed
            booking("confirmed", date(2025, 6, 20), date(2025, 6, 22)),
            // Cancelled upcoming stays count nowhere
            booking("cancelled", date(2025, 7, 10), date(2025, 7, 12)),
            // Completed
            booking("confirmed", date(2025, 5, 1), date(2025, 5, 4)),
        ];

        let (upcoming, completed) = stay_counts(&bookings, today);
        assert_eq!(upcoming, 2);
        assert_eq!(completed, 1);
    }

    #[test]
    fn test_stay_starting_today_is_upcoming() {
        let today = date(2025, 6, 15);
        let bookings = vec![booking("confirmed", today, date(2025, 6, 17))];
        assert_eq!(stay_counts(&bookings, today), (1, 0));
    }
}
