//! In-memory caching using moka
//!
//! Application-level caching for the room catalog and site settings. Rooms
//! change only through the admin back-office, so modest TTLs plus explicit
//! invalidation on admin writes keep the catalog fresh. Booking windows are
//! never cached: availability is always checked against a fresh snapshot.

use moka::future::Cache;
use serde::Serialize;
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::interval;
use tracing::{info, warn};
use uuid::Uuid;

use crate::db::queries::{self, RoomFilter};
use crate::models::{Room, SiteSettings};

/// Application cache holding rooms and site settings
#[derive(Clone)]
pub struct AppCache {
    /// Individual rooms (id -> Room)
    pub rooms: Cache<Uuid, Arc<Room>>,
    /// Room listings (cache_key -> Vec<Room>)
    pub room_listings: Cache<String, Arc<Vec<Room>>>,
    /// Site settings (singleton)
    pub settings: Cache<String, Arc<SiteSettings>>,
}

impl AppCache {
    /// Create a new cache instance with configured TTLs
    pub fn new() -> Self {
        Self {
            // Rooms: 500 entries, 30 min TTL, 10 min idle
            rooms: Cache::builder()
                .max_capacity(500)
                .time_to_live(Duration::from_secs(30 * 60))
                .time_to_idle(Duration::from_secs(10 * 60))
                .build(),

            // Room listings: 20 entries (the default listing plus the homepage strip), 15 min TTL
            room_listings: Cache::builder()
                .max_capacity(20)
                .time_to_live(Duration::from_secs(15 * 60))
                .time_to_idle(Duration::from_secs(5 * 60))
                .build(),

            // Site settings: 1 entry, 30 min TTL
            settings: Cache::builder()
                .max_capacity(1)
                .time_to_live(Duration::from_secs(30 * 60))
                .build(),
        }
    }

    /// Get cache statistics for monitoring
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            rooms_size: self.rooms.entry_count(),
            room_listings_size: self.room_listings.entry_count(),
            settings_cached: self.settings.entry_count() > 0,
        }
    }

    /// Invalidate all caches
    pub fn invalidate_all(&self) {
        self.rooms.invalidate_all();
        self.room_listings.invalidate_all();
        self.settings.invalidate_all();
        info!("All caches invalidated");
    }

    /// Invalidate a room after an admin write
    pub async fn invalidate_room(&self, id: Uuid) {
        self.rooms.invalidate(&id).await;
        // Listings embed room fields, so they go stale with the room
        self.room_listings.invalidate_all();
        info!("Cache invalidated for room: {}", id);
    }

    /// Cache key for the default (unfiltered) room listing
    pub fn default_listing_key() -> String {
        "rooms:all".to_string()
    }

    /// Cache key for the homepage's featured strip
    pub fn featured_key(limit: i64) -> String {
        format!("rooms:featured:{}", limit)
    }
}

impl Default for AppCache {
    fn default() -> Self {
        Self::new()
    }
}

/// Cache statistics for monitoring endpoint
#[derive(Debug, Clone, Serialize)]
pub struct CacheStats {
    pub rooms_size: u64,
    pub room_listings_size: u64,
    pub settings_cached: bool,
}

/// Start background cache warmer
///
/// Warms the cache on startup and refreshes every 10 minutes.
pub async fn start_cache_warmer(cache: AppCache, db: PgPool) {
    // Initial warm-up
    warm_cache(&cache, &db).await;

    // Periodic refresh every 10 minutes
    let mut interval = interval(Duration::from_secs(10 * 60));
    loop {
        interval.tick().await;
        warm_cache(&cache, &db).await;
    }
}

/// Warm the cache with commonly accessed data
async fn warm_cache(cache: &AppCache, db: &PgPool) {
    info!("Starting cache warm-up...");

    // Warm site settings
    match queries::get_site_settings(db).await {
        Ok(settings) => {
            cache
                .settings
                .insert("settings".to_string(), Arc::new(settings))
                .await;
        }
        Err(e) => warn!("Failed to warm settings cache: {}", e),
    }

    // Warm the default room listing
    match queries::list_rooms(db, &RoomFilter::default()).await {
        Ok(rooms) => {
            for room in &rooms {
                cache.rooms.insert(room.id, Arc::new(room.clone())).await;
            }
            cache
                .room_listings
                .insert(AppCache::default_listing_key(), Arc::new(rooms))
                .await;
        }
        Err(e) => warn!("Failed to warm room listing cache: {}", e),
    }

    info!("Cache warm-up complete. Stats: {:?}", cache.stats());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_listing_keys() {
        assert_eq!(AppCache::default_listing_key(), "rooms:all");
        assert_eq!(AppCache::featured_key(4), "rooms:featured:4");
    }
}
