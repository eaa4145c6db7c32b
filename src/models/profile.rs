//! User profile models

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Profile row from the backend's `profiles` table.
///
/// The id is the auth service's user id; the backend keeps the two in sync.
#[derive(Debug, Clone, FromRow)]
pub struct Profile {
    pub id: Uuid,
    pub email: String,
    pub full_name: String,
    pub is_admin: bool,
    pub created_at: DateTime<Utc>,
}
