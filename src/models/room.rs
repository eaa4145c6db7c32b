//! Room catalog models

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

/// Room from the backend's `rooms` table
#[derive(Debug, Clone, FromRow)]
pub struct Room {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub price_per_night: Decimal,
    pub capacity: i32,
    pub room_type: String,
    pub images: Json<Vec<String>>,
    pub amenities: Json<Vec<String>>,
    pub created_at: DateTime<Utc>,
}

impl Room {
    pub fn image_urls(&self) -> &[String] {
        &self.images.0
    }

    pub fn amenity_list(&self) -> &[String] {
        &self.amenities.0
    }

    /// First image, used for cards and previews
    pub fn cover_image(&self) -> Option<&str> {
        self.images.0.first().map(String::as_str)
    }
}
