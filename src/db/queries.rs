//! Database queries for rooms, reviews, profiles and settings
//!
//! One function per query, deserializing straight into the typed records in
//! `crate::models`. Booking-flow queries live in `crate::booking::queries`.

use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{AppError, Result};
use crate::models::{Profile, ReviewWithAuthor, Room, SiteSettings};

/// Filters for the room list page
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RoomFilter {
    /// Case-insensitive match against name or description
    pub search: Option<String>,
    pub min_price: Option<Decimal>,
    pub max_price: Option<Decimal>,
    pub min_capacity: Option<i32>,
    pub room_type: Option<String>,
}

impl RoomFilter {
    /// True when no filter is set, i.e. the cacheable default listing
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// List rooms matching the filter, newest first
pub async fn list_rooms(pool: &PgPool, filter: &RoomFilter) -> Result<Vec<Room>> {
    let rooms = sqlx::query_as::<_, Room>(
        r#"
        SELECT
            id, name, description, price_per_night, capacity,
            room_type, images, amenities, created_at
        FROM rooms
        WHERE ($1::numeric IS NULL OR price_per_night >= $1)
          AND ($2::numeric IS NULL OR price_per_night <= $2)
          AND ($3::int IS NULL OR capacity >= $3)
          AND ($4::text IS NULL OR room_type = $4)
          AND ($5::text IS NULL
               OR name ILIKE '%' || $5 || '%'
               OR description ILIKE '%' || $5 || '%')
        ORDER BY created_at DESC
        "#,
    )
    .bind(filter.min_price)
    .bind(filter.max_price)
    .bind(filter.min_capacity)
    .bind(filter.room_type.as_deref())
    .bind(filter.search.as_deref())
    .fetch_all(pool)
    .await?;

    Ok(rooms)
}

/// A few recent rooms for the homepage
pub async fn featured_rooms(pool: &PgPool, limit: i64) -> Result<Vec<Room>> {
    let rooms = sqlx::query_as::<_, Room>(
        r#"
        SELECT
            id, name, description, price_per_night, capacity,
            room_type, images, amenities, created_at
        FROM rooms
        ORDER BY created_at DESC
        LIMIT $1
        "#,
    )
    .bind(limit)
    .fetch_all(pool)
    .await?;

    Ok(rooms)
}

/// Get a room by id
pub async fn get_room(pool: &PgPool, id: Uuid) -> Result<Room> {
    sqlx::query_as::<_, Room>(
        r#"
        SELECT
            id, name, description, price_per_night, capacity,
            room_type, images, amenities, created_at
        FROM rooms
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?
    .ok_or(AppError::NotFound)
}

/// Distinct room types for the filter dropdown
pub async fn list_room_types(pool: &PgPool) -> Result<Vec<String>> {
    let types = sqlx::query_scalar::<_, String>(
        r#"
        SELECT DISTINCT room_type
        FROM rooms
        ORDER BY room_type
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(types)
}

/// Fields for creating or replacing a room
#[derive(Debug, Clone)]
pub struct RoomInput {
    pub name: String,
    pub description: String,
    pub price_per_night: Decimal,
    pub capacity: i32,
    pub room_type: String,
    pub images: Vec<String>,
    pub amenities: Vec<String>,
}

/// Insert a room (admin)
pub async fn insert_room(pool: &PgPool, input: &RoomInput) -> Result<Room> {
    let room = sqlx::query_as::<_, Room>(
        r#"
        INSERT INTO rooms (name, description, price_per_night, capacity, room_type, images, amenities)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING
            id, name, description, price_per_night, capacity,
            room_type, images, amenities, created_at
        "#,
    )
    .bind(&input.name)
    .bind(&input.description)
    .bind(input.price_per_night)
    .bind(input.capacity)
    .bind(&input.room_type)
    .bind(sqlx::types::Json(&input.images))
    .bind(sqlx::types::Json(&input.amenities))
    .fetch_one(pool)
    .await?;

    Ok(room)
}

/// Replace a room's fields (admin)
pub async fn update_room(pool: &PgPool, id: Uuid, input: &RoomInput) -> Result<Room> {
    sqlx::query_as::<_, Room>(
        r#"
        UPDATE rooms
        SET name = $2,
            description = $3,
            price_per_night = $4,
            capacity = $5,
            room_type = $6,
            images = $7,
            amenities = $8
        WHERE id = $1
        RETURNING
            id, name, description, price_per_night, capacity,
            room_type, images, amenities, created_at
        "#,
    )
    .bind(id)
    .bind(&input.name)
    .bind(&input.description)
    .bind(input.price_per_night)
    .bind(input.capacity)
    .bind(&input.room_type)
    .bind(sqlx::types::Json(&input.images))
    .bind(sqlx::types::Json(&input.amenities))
    .fetch_optional(pool)
    .await?
    .ok_or(AppError::NotFound)
}

/// Delete a room (admin)
pub async fn delete_room(pool: &PgPool, id: Uuid) -> Result<()> {
    let result = sqlx::query("DELETE FROM rooms WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound);
    }
    Ok(())
}

/// Reviews for a room, newest first
pub async fn get_reviews_for_room(pool: &PgPool, room_id: Uuid) -> Result<Vec<ReviewWithAuthor>> {
    let reviews = sqlx::query_as::<_, ReviewWithAuthor>(
        r#"
        SELECT
            r.id,
            r.rating,
            r.comment,
            r.created_at,
            p.full_name AS author_name
        FROM reviews r
        JOIN profiles p ON p.id = r.user_id
        WHERE r.room_id = $1
        ORDER BY r.created_at DESC
        "#,
    )
    .bind(room_id)
    .fetch_all(pool)
    .await?;

    Ok(reviews)
}

/// Insert a review for a room
pub async fn insert_review(
    pool: &PgPool,
    room_id: Uuid,
    user_id: Uuid,
    rating: i32,
    comment: &str,
) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO reviews (room_id, user_id, rating, comment)
        VALUES ($1, $2, $3, $4)
        "#,
    )
    .bind(room_id)
    .bind(user_id)
    .bind(rating)
    .bind(comment)
    .execute(pool)
    .await?;

    Ok(())
}

/// Get a profile by user id
pub async fn get_profile(pool: &PgPool, user_id: Uuid) -> Result<Option<Profile>> {
    let profile = sqlx::query_as::<_, Profile>(
        r#"
        SELECT id, email, full_name, is_admin, created_at
        FROM profiles
        WHERE id = $1
        "#,
    )
    .bind(user_id)
    .fetch_optional(pool)
    .await?;

    Ok(profile)
}

/// Get site settings
pub async fn get_site_settings(pool: &PgPool) -> Result<SiteSettings> {
    let settings = sqlx::query_as::<_, SiteSettings>(
        r#"
        SELECT site_name, tagline, contact_email
        FROM site_settings
        LIMIT 1
        "#,
    )
    .fetch_optional(pool)
    .await?
    .unwrap_or_default();

    Ok(settings)
}

/// Count rooms (admin overview)
pub async fn count_rooms(pool: &PgPool) -> Result<i64> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM rooms")
        .fetch_one(pool)
        .await?;

    Ok(count)
}

/// Count bookings, optionally by status (admin overview)
pub async fn count_bookings(pool: &PgPool, status: Option<&str>) -> Result<i64> {
    let count: i64 = match status {
        Some(status) => {
            sqlx::query_scalar("SELECT COUNT(*) FROM bookings WHERE status = $1")
                .bind(status)
                .fetch_one(pool)
                .await?
        }
        None => {
            sqlx::query_scalar("SELECT COUNT(*) FROM bookings")
                .fetch_one(pool)
                .await?
        }
    };

    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_default_filter_is_empty() {
        assert!(RoomFilter::default().is_empty());
    }

    #[test]
    fn test_any_set_field_makes_filter_non_empty() {
        let filter = RoomFilter {
            min_price: Some(dec!(50)),
            ..Default::default()
        };
        assert!(!filter.is_empty());

        let filter = RoomFilter {
            search: Some("harbour".to_string()),
            ..Default::default()
        };
        assert!(!filter.is_empty());
    }
}
