//! Homepage route handler

use askama::Template;
use axum::extract::State;
use axum::response::Html;
use std::sync::Arc;

use crate::auth::MaybeUser;
use crate::cache::AppCache;
use crate::db;
use crate::error::Result;
use crate::models::{Room, SiteSettings};
use crate::routes::Nav;
use crate::AppState;

const FEATURED_LIMIT: i64 = 4;

/// Homepage template
#[derive(Template)]
#[template(path = "home.html")]
struct HomeTemplate {
    nav: Nav,
    settings: SiteSettings,
    rooms: Vec<Room>,
    has_rooms: bool,
}

/// Homepage: site settings plus a strip of recent rooms
pub async fn home(State(state): State<AppState>, user: MaybeUser) -> Result<Html<String>> {
    let settings = get_settings_cached(&state).await?;

    let key = AppCache::featured_key(FEATURED_LIMIT);
    let rooms: Vec<Room> = if let Some(cached) = state.cache.room_listings.get(&key).await {
        (*cached).clone()
    } else {
        let rooms = db::featured_rooms(&state.db, FEATURED_LIMIT).await?;
        state
            .cache
            .room_listings
            .insert(key, Arc::new(rooms.clone()))
            .await;
        rooms
    };

    let template = HomeTemplate {
        nav: Nav::for_user(&user),
        settings,
        has_rooms: !rooms.is_empty(),
        rooms,
    };

    Ok(Html(template.render()?))
}

async fn get_settings_cached(state: &AppState) -> Result<SiteSettings> {
    if let Some(cached) = state.cache.settings.get("settings").await {
        return Ok((*cached).clone());
    }

    let settings = db::get_site_settings(&state.db).await?;
    state
        .cache
        .settings
        .insert("settings".to_string(), Arc::new(settings.clone()))
        .await;

    Ok(settings)
}
