//! Hotel Azure web frontend.
//!
//! Rust/Axum presentation layer over the managed booking backend: room
//! browsing and filtering, the booking flow with availability and pricing
//! checks, guest reviews, and the admin back-office. All business data lives
//! in the backend's Postgres; this crate reads typed snapshots of it and
//! writes bookings, reviews and room records back through it.

pub mod auth;
pub mod booking;
pub mod cache;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod routes;

use cache::AppCache;
use sqlx::PgPool;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub cache: AppCache,
}
