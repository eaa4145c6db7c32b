//! Admin back-office route handlers
//!
//! Every handler takes the AdminUser extractor; non-admins never get past it.

use askama::Template;
use axum::extract::{Path, State};
use axum::response::{Html, Redirect};
use axum::Form;
use rust_decimal::Decimal;
use serde::Deserialize;
use uuid::Uuid;

use crate::auth::AdminUser;
use crate::booking::queries as booking_queries;
use crate::db::{self, queries::RoomInput};
use crate::error::{AppError, Result};
use crate::models::{BookingAdminRow, BookingStatus, Room};
use crate::routes::Nav;
use crate::AppState;

/// Admin overview template
#[derive(Template)]
#[template(path = "admin/dashboard.html")]
struct AdminDashboardTemplate {
    nav: Nav,
    room_count: i64,
    pending_count: i64,
    confirmed_count: i64,
    total_bookings: i64,
}

/// Admin room list template
#[derive(Template)]
#[template(path = "admin/rooms.html")]
struct AdminRoomsTemplate {
    nav: Nav,
    rooms: Vec<Room>,
    has_rooms: bool,
}

/// Admin room edit template
#[derive(Template)]
#[template(path = "admin/room_edit.html")]
struct AdminRoomEditTemplate {
    nav: Nav,
    room: Room,
    images_text: String,
    amenities_text: String,
}

/// Admin booking list template
#[derive(Template)]
#[template(path = "admin/bookings.html")]
struct AdminBookingsTemplate {
    nav: Nav,
    bookings: Vec<BookingAdminRow>,
    has_bookings: bool,
}

/// Room create/update form body.
///
/// Images arrive one URL per line, amenities comma separated.
#[derive(Debug, Deserialize)]
pub struct RoomForm {
    pub name: String,
    pub description: String,
    pub price_per_night: String,
    pub capacity: i32,
    pub room_type: String,
    pub images: String,
    pub amenities: String,
}

impl RoomForm {
    fn to_input(&self) -> std::result::Result<RoomInput, String> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err("Room name cannot be empty".to_string());
        }

        let price: Decimal = self
            .price_per_night
            .trim()
            .parse()
            .map_err(|_| "Nightly rate must be a number".to_string())?;
        if price <= Decimal::ZERO {
            return Err("Nightly rate must be positive".to_string());
        }

        if self.capacity < 1 {
            return Err("Capacity must be at least 1".to_string());
        }

        let room_type = self.room_type.trim();
        if room_type.is_empty() {
            return Err("Room type cannot be empty".to_string());
        }

        Ok(RoomInput {
            name: name.to_string(),
            description: self.description.trim().to_string(),
            price_per_night: price,
            capacity: self.capacity,
            room_type: room_type.to_string(),
            images: split_lines(&self.images),
            amenities: split_csv(&self.amenities),
        })
    }
}

/// Booking status form body
#[derive(Debug, Deserialize)]
pub struct StatusForm {
    pub status: String,
}

/// Admin overview with counts
pub async fn dashboard(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
) -> Result<Html<String>> {
    let room_count = db::count_rooms(&state.db).await?;
    let pending_count = db::count_bookings(&state.db, Some("pending")).await?;
    let confirmed_count = db::count_bookings(&state.db, Some("confirmed")).await?;
    let total_bookings = db::count_bookings(&state.db, None).await?;

    let template = AdminDashboardTemplate {
        nav: Nav::signed_in(&admin),
        room_count,
        pending_count,
        confirmed_count,
        total_bookings,
    };

    Ok(Html(template.render()?))
}

/// Room management: list plus create form
pub async fn rooms(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
) -> Result<Html<String>> {
    let rooms = db::list_rooms(&state.db, &Default::default()).await?;

    let template = AdminRoomsTemplate {
        nav: Nav::signed_in(&admin),
        has_rooms: !rooms.is_empty(),
        rooms,
    };

    Ok(Html(template.render()?))
}

/// Create a room
pub async fn create_room(
    State(state): State<AppState>,
    AdminUser(_admin): AdminUser,
    Form(form): Form<RoomForm>,
) -> Result<Redirect> {
    let input = form.to_input().map_err(AppError::Validation)?;
    let room = db::insert_room(&state.db, &input).await?;

    state.cache.invalidate_room(room.id).await;
    tracing::info!(room_id = %room.id, "Room created");

    Ok(Redirect::to("/admin/rooms"))
}

/// Room edit form
pub async fn edit_room_form(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    Path(id): Path<Uuid>,
) -> Result<Html<String>> {
    let room = db::get_room(&state.db, id).await?;

    let template = AdminRoomEditTemplate {
        nav: Nav::signed_in(&admin),
        images_text: room.image_urls().join("\n"),
        amenities_text: room.amenity_list().join(", "),
        room,
    };

    Ok(Html(template.render()?))
}

/// Update a room
pub async fn update_room(
    State(state): State<AppState>,
    AdminUser(_admin): AdminUser,
    Path(id): Path<Uuid>,
    Form(form): Form<RoomForm>,
) -> Result<Redirect> {
    let input = form.to_input().map_err(AppError::Validation)?;
    db::update_room(&state.db, id, &input).await?;

    state.cache.invalidate_room(id).await;
    tracing::info!(room_id = %id, "Room updated");

    Ok(Redirect::to("/admin/rooms"))
}

/// Delete a room
pub async fn delete_room(
    State(state): State<AppState>,
    AdminUser(_admin): AdminUser,
    Path(id): Path<Uuid>,
) -> Result<Redirect> {
    db::delete_room(&state.db, id).await?;

    state.cache.invalidate_room(id).await;
    tracing::info!(room_id = %id, "Room deleted");

    Ok(Redirect::to("/admin/rooms"))
}

/// All bookings, newest first
pub async fn bookings(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
) -> Result<Html<String>> {
    let bookings = booking_queries::list_all_bookings(&state.db).await?;

    let template = AdminBookingsTemplate {
        nav: Nav::signed_in(&admin),
        has_bookings: !bookings.is_empty(),
        bookings,
    };

    Ok(Html(template.render()?))
}

/// Confirm or cancel a booking
pub async fn update_booking_status(
    State(state): State<AppState>,
    AdminUser(_admin): AdminUser,
    Path(id): Path<Uuid>,
    Form(form): Form<StatusForm>,
) -> Result<Redirect> {
    let status = BookingStatus::parse(&form.status)
        .ok_or_else(|| AppError::Validation("Unknown booking status".to_string()))?;

    let touched = booking_queries::update_booking_status(&state.db, id, status).await?;
    if !touched {
        return Err(AppError::NotFound);
    }

    tracing::info!(booking_id = %id, status = %status, "Booking status updated");

    Ok(Redirect::to("/admin/bookings"))
}

fn split_lines(raw: &str) -> Vec<String> {
    raw.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect()
}

fn split_csv(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(String::from)
        .collect()
}
