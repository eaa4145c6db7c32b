//! Room browsing and review route handlers

use askama::Template;
use axum::extract::{Path, Query, State};
use axum::response::{Html, Redirect};
use axum::Form;
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::auth::{CurrentUser, MaybeUser};
use crate::cache::AppCache;
use crate::db::{self, queries::RoomFilter};
use crate::error::{AppError, Result};
use crate::models::{average_rating, ReviewWithAuthor, Room};
use crate::routes::Nav;
use crate::AppState;

/// Query parameters for the room list; empty strings mean unset
#[derive(Debug, Default, Deserialize)]
pub struct RoomListQuery {
    #[serde(default)]
    pub q: Option<String>,
    #[serde(default)]
    pub min_price: Option<String>,
    #[serde(default)]
    pub max_price: Option<String>,
    #[serde(default)]
    pub capacity: Option<String>,
    #[serde(default)]
    pub room_type: Option<String>,
}

impl RoomListQuery {
    fn filter(&self) -> RoomFilter {
        RoomFilter {
            search: non_empty(self.q.as_deref()),
            min_price: parse_param(self.min_price.as_deref()),
            max_price: parse_param(self.max_price.as_deref()),
            min_capacity: parse_param(self.capacity.as_deref()),
            room_type: non_empty(self.room_type.as_deref()),
        }
    }
}

/// Raw filter values echoed back into the form
struct FilterContext {
    q: String,
    min_price: String,
    max_price: String,
    capacity: String,
    room_type: String,
}

impl FilterContext {
    fn from_query(query: &RoomListQuery) -> Self {
        Self {
            q: query.q.clone().unwrap_or_default(),
            min_price: query.min_price.clone().unwrap_or_default(),
            max_price: query.max_price.clone().unwrap_or_default(),
            capacity: query.capacity.clone().unwrap_or_default(),
            room_type: query.room_type.clone().unwrap_or_default(),
        }
    }
}

/// Room list template
#[derive(Template)]
#[template(path = "rooms/list.html")]
struct RoomListTemplate {
    nav: Nav,
    rooms: Vec<Room>,
    room_types: Vec<String>,
    filter: FilterContext,
    has_rooms: bool,
}

/// Room detail template
#[derive(Template)]
#[template(path = "rooms/detail.html")]
struct RoomDetailTemplate {
    nav: Nav,
    room: Room,
    reviews: Vec<ReviewWithAuthor>,
    average: Option<String>,
    review_count: usize,
    has_reviews: bool,
    signed_in: bool,
}

/// Review form body
#[derive(Debug, Deserialize)]
pub struct ReviewForm {
    pub rating: i32,
    pub comment: String,
}

/// Room list with filters
pub async fn list(
    State(state): State<AppState>,
    user: MaybeUser,
    Query(query): Query<RoomListQuery>,
) -> Result<Html<String>> {
    let filter = query.filter();

    // Only the unfiltered default listing is worth caching
    let rooms: Vec<Room> = if filter.is_empty() {
        let key = AppCache::default_listing_key();
        if let Some(cached) = state.cache.room_listings.get(&key).await {
            tracing::debug!("Cache HIT for room listing");
            (*cached).clone()
        } else {
            tracing::debug!("Cache MISS for room listing");
            let rooms = db::list_rooms(&state.db, &filter).await?;
            state
                .cache
                .room_listings
                .insert(key, Arc::new(rooms.clone()))
                .await;
            rooms
        }
    } else {
        db::list_rooms(&state.db, &filter).await?
    };

    let room_types = db::list_room_types(&state.db).await?;

    let template = RoomListTemplate {
        nav: Nav::for_user(&user),
        has_rooms: !rooms.is_empty(),
        rooms,
        room_types,
        filter: FilterContext::from_query(&query),
    };

    Ok(Html(template.render()?))
}

/// Room detail with reviews
pub async fn detail(
    State(state): State<AppState>,
    user: MaybeUser,
    Path(id): Path<Uuid>,
) -> Result<Html<String>> {
    let room = get_room_cached(&state, id).await?;
    let reviews = db::get_reviews_for_room(&state.db, id).await?;
    let average = average_rating(&reviews).map(|avg| format!("{:.1}", avg));

    let template = RoomDetailTemplate {
        signed_in: user.0.is_some(),
        nav: Nav::for_user(&user),
        room,
        average,
        review_count: reviews.len(),
        has_reviews: !reviews.is_empty(),
        reviews,
    };

    Ok(Html(template.render()?))
}

/// Leave a review on a room
pub async fn create_review(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(room_id): Path<Uuid>,
    Form(form): Form<ReviewForm>,
) -> Result<Redirect> {
    if !(1..=5).contains(&form.rating) {
        return Err(AppError::Validation(
            "Rating must be between 1 and 5".to_string(),
        ));
    }

    let comment = form.comment.trim();
    if comment.is_empty() {
        return Err(AppError::Validation(
            "Review comment cannot be empty".to_string(),
        ));
    }

    // The room must exist before a review can point at it
    db::get_room(&state.db, room_id).await?;
    db::insert_review(&state.db, room_id, user.id, form.rating, comment).await?;

    Ok(Redirect::to(&format!("/rooms/{}", room_id)))
}

/// Room lookup through the cache
pub(crate) async fn get_room_cached(state: &AppState, id: Uuid) -> Result<Room> {
    if let Some(cached) = state.cache.rooms.get(&id).await {
        tracing::debug!("Cache HIT for room: {}", id);
        return Ok((*cached).clone());
    }

    tracing::debug!("Cache MISS for room: {}", id);
    let room = db::get_room(&state.db, id).await?;
    state.cache.rooms.insert(id, Arc::new(room.clone())).await;

    Ok(room)
}

fn non_empty(raw: Option<&str>) -> Option<String> {
    raw.map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn parse_param<T: std::str::FromStr>(raw: Option<&str>) -> Option<T> {
    raw.map(str::trim)
        .filter(|s| !s.is_empty())
        .and_then(|s| s.parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_empty_query_is_empty_filter() {
        assert!(RoomListQuery::default().filter().is_empty());
    }

    #[test]
    fn test_blank_params_are_unset() {
        let query = RoomListQuery {
            q: Some("  ".to_string()),
            min_price: Some(String::new()),
            ..Default::default()
        };
        assert!(query.filter().is_empty());
    }

    #[test]
    fn test_params_parse_into_filter() {
        let query = RoomListQuery {
            q: Some("harbour".to_string()),
            min_price: Some("50".to_string()),
            max_price: Some("150.50".to_string()),
            capacity: Some("2".to_string()),
            room_type: Some("double".to_string()),
        };
        let filter = query.filter();
        assert_eq!(filter.search.as_deref(), Some("harbour"));
        assert_eq!(filter.min_price, Some(dec!(50)));
        assert_eq!(filter.max_price, Some(dec!(150.50)));
        assert_eq!(filter.min_capacity, Some(2));
        assert_eq!(filter.room_type.as_deref(), Some("double"));
    }

    #[test]
    fn test_unparseable_numbers_are_ignored() {
        let query = RoomListQuery {
            min_price: Some("cheap".to_string()),
            capacity: Some("lots".to_string()),
            ..Default::default()
        };
        let filter = query.filter();
        assert_eq!(filter.min_price, None);
        assert_eq!(filter.min_capacity, None);
    }
}
