//! JSON API routes for the booking widget.
//!
//! The booking form's calendar and price summary call these; everything that
//! writes goes through the HTML form handlers instead.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::Utc;
use uuid::Uuid;

use crate::error::Result;
use crate::AppState;

use super::requests::{CalendarQuery, QuoteRequest};
use super::responses::{MoneyResponse, QuoteErrorResponse, QuoteResponse, UnavailableDatesResponse};
use super::services::{self, QuoteOutcome};

/// Router for the booking JSON API, nested under /api
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/rooms/:id/quote", post(quote))
        .route("/rooms/:id/unavailable-dates", get(unavailable_dates))
}

/// Price a prospective stay
async fn quote(
    State(state): State<AppState>,
    Path(room_id): Path<Uuid>,
    Json(request): Json<QuoteRequest>,
) -> Result<Response> {
    let today = Utc::now().date_naive();

    match services::quote_stay(&state.db, room_id, &request.stay(), today).await? {
        QuoteOutcome::Priced { stay, nightly_rate } => {
            let response = QuoteResponse {
                room_id,
                check_in_date: stay.check_in,
                check_out_date: stay.check_out,
                nights: stay.nights,
                nightly_rate: MoneyResponse::eur(nightly_rate),
                total_price: MoneyResponse::eur(stay.total_price),
            };
            Ok(Json(response).into_response())
        }
        QuoteOutcome::Rejected(err) => Ok((
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(QuoteErrorResponse::from_error(&err)),
        )
            .into_response()),
    }
}

/// Dates the calendar should disable
async fn unavailable_dates(
    State(state): State<AppState>,
    Path(room_id): Path<Uuid>,
    Query(window): Query<CalendarQuery>,
) -> Result<Json<UnavailableDatesResponse>> {
    let dates =
        services::unavailable_dates_for_room(&state.db, room_id, window.from, window.to).await?;

    Ok(Json(UnavailableDatesResponse {
        room_id,
        unavailable_dates: dates,
    }))
}
