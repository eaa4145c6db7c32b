//! Database queries for the booking flow

use sqlx::PgPool;
use uuid::Uuid;

use crate::error::Result;
use crate::models::{Booking, BookingAdminRow, BookingStatus, BookingWithRoom};

use super::calculators::PricedStay;
use super::models::BookingWindow;

/// Stay windows that currently block a room's calendar.
///
/// Only confirmed bookings are fetched; rows are still revalidated through
/// `BookingWindow::into_confirmed` before the calculator sees them.
pub async fn get_confirmed_windows(pool: &PgPool, room_id: Uuid) -> Result<Vec<BookingWindow>> {
    let windows = sqlx::query_as::<_, BookingWindow>(
        r#"
        SELECT check_in_date, check_out_date, status
        FROM bookings
        WHERE room_id = $1
          AND status = 'confirmed'
        "#,
    )
    .bind(room_id)
    .fetch_all(pool)
    .await?;

    Ok(windows)
}

/// Insert a priced stay as a pending booking
pub async fn insert_booking(
    pool: &PgPool,
    room_id: Uuid,
    user_id: Uuid,
    stay: &PricedStay,
    guest_count: i32,
) -> Result<Booking> {
    let booking = sqlx::query_as::<_, Booking>(
        r#"
        INSERT INTO bookings
            (room_id, user_id, check_in_date, check_out_date, guest_count, total_price, status)
        VALUES ($1, $2, $3, $4, $5, $6, 'pending')
        RETURNING
            id, room_id, user_id, check_in_date, check_out_date,
            guest_count, total_price, status, created_at
        "#,
    )
    .bind(room_id)
    .bind(user_id)
    .bind(stay.check_in)
    .bind(stay.check_out)
    .bind(guest_count)
    .bind(stay.total_price)
    .fetch_one(pool)
    .await?;

    Ok(booking)
}

/// Get one booking by id
pub async fn get_booking(pool: &PgPool, id: Uuid) -> Result<Option<Booking>> {
    let booking = sqlx::query_as::<_, Booking>(
        r#"
        SELECT
            id, room_id, user_id, check_in_date, check_out_date,
            guest_count, total_price, status, created_at
        FROM bookings
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(booking)
}

/// A user's bookings with room names, earliest stay first
pub async fn get_bookings_for_user(pool: &PgPool, user_id: Uuid) -> Result<Vec<BookingWithRoom>> {
    let bookings = sqlx::query_as::<_, BookingWithRoom>(
        r#"
        SELECT
            b.id,
            b.room_id,
            b.check_in_date,
            b.check_out_date,
            b.guest_count,
            b.total_price,
            b.status,
            r.name AS room_name,
            r.room_type AS room_type
        FROM bookings b
        JOIN rooms r ON r.id = b.room_id
        WHERE b.user_id = $1
        ORDER BY b.check_in_date ASC
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    Ok(bookings)
}

/// All bookings with room and guest, newest first (admin)
pub async fn list_all_bookings(pool: &PgPool) -> Result<Vec<BookingAdminRow>> {
    let bookings = sqlx::query_as::<_, BookingAdminRow>(
        r#"
        SELECT
            b.id,
            b.check_in_date,
            b.check_out_date,
            b.guest_count,
            b.total_price,
            b.status,
            r.name AS room_name,
            p.email AS guest_email
        FROM bookings b
        JOIN rooms r ON r.id = b.room_id
        JOIN profiles p ON p.id = b.user_id
        ORDER BY b.created_at DESC
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(bookings)
}

/// Set a booking's status, returning whether a row was touched
pub async fn update_booking_status(
    pool: &PgPool,
    id: Uuid,
    status: BookingStatus,
) -> Result<bool> {
    let result = sqlx::query("UPDATE bookings SET status = $2 WHERE id = $1")
        .bind(id)
        .bind(status.as_str())
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}
