//! Booking form route handlers

use askama::Template;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::Form;
use chrono::Utc;
use uuid::Uuid;

use crate::auth::CurrentUser;
use crate::booking::requests::BookingForm;
use crate::booking::services::{self, BookingOutcome};
use crate::error::Result;
use crate::models::Room;
use crate::routes::Nav;
use crate::AppState;

/// Raw form values echoed back after a rejection
struct FormContext {
    check_in_date: String,
    check_out_date: String,
    guest_count: i32,
}

/// Booking form template
#[derive(Template)]
#[template(path = "bookings/new.html")]
struct BookingFormTemplate {
    nav: Nav,
    room: Room,
    today: String,
    error: Option<String>,
    form: FormContext,
}

/// Booking form (auth required)
pub async fn new_booking(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(room_id): Path<Uuid>,
) -> Result<Html<String>> {
    let room = super::rooms::get_room_cached(&state, room_id).await?;
    let today = Utc::now().date_naive();

    let template = BookingFormTemplate {
        nav: Nav::signed_in(&user),
        room,
        today: today.to_string(),
        error: None,
        form: FormContext {
            check_in_date: String::new(),
            check_out_date: String::new(),
            guest_count: 1,
        },
    };

    Ok(Html(template.render()?))
}

/// Place a booking; on rejection the form re-renders with the reason
pub async fn create_booking(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(room_id): Path<Uuid>,
    Form(form): Form<BookingForm>,
) -> Result<Response> {
    let today = Utc::now().date_naive();

    match services::place_booking(&state.db, user.id, room_id, &form.stay(), today).await? {
        BookingOutcome::Placed(_) => Ok(Redirect::to("/dashboard").into_response()),
        BookingOutcome::Rejected(err) => {
            let room = super::rooms::get_room_cached(&state, room_id).await?;
            let template = BookingFormTemplate {
                nav: Nav::signed_in(&user),
                room,
                today: today.to_string(),
                error: Some(err.to_string()),
                form: FormContext {
                    check_in_date: form.check_in_date,
                    check_out_date: form.check_out_date,
                    guest_count: form.guest_count,
                },
            };
            Ok((StatusCode::UNPROCESSABLE_ENTITY, Html(template.render()?)).into_response())
        }
    }
}

/// Cancel one of the guest's own bookings
pub async fn cancel(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(booking_id): Path<Uuid>,
) -> Result<Redirect> {
    let today = Utc::now().date_naive();
    services::cancel_own_booking(&state.db, user.id, booking_id, today).await?;

    Ok(Redirect::to("/dashboard"))
}
