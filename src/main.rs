//! Server entrypoint

use anyhow::Context;
use axum::routing::{get, post};
use axum::Router;
use sqlx::postgres::PgPoolOptions;
use tower::ServiceBuilder;
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::EnvFilter;

use hotelazure_web::config::Config;
use hotelazure_web::{auth, booking, cache, routes, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,tower_http=debug")),
        )
        .init();

    let config = Config::from_env()?;

    let db = PgPoolOptions::new()
        .max_connections(config.max_db_connections)
        .connect(&config.database_url)
        .await
        .context("failed to connect to the booking backend database")?;

    let app_cache = cache::AppCache::new();
    tokio::spawn(cache::start_cache_warmer(app_cache.clone(), db.clone()));

    let state = AppState {
        db,
        cache: app_cache,
    };

    let app = Router::new()
        .route("/", get(routes::home::home))
        .route("/rooms", get(routes::rooms::list))
        .route("/rooms/:id", get(routes::rooms::detail))
        .route(
            "/rooms/:id/book",
            get(routes::bookings::new_booking).post(routes::bookings::create_booking),
        )
        .route("/rooms/:id/reviews", post(routes::rooms::create_review))
        .route("/dashboard", get(routes::dashboard::index))
        .route("/bookings/:id/cancel", post(routes::bookings::cancel))
        .route(
            "/login",
            get(auth::routes::login_form).post(auth::routes::login),
        )
        .route(
            "/register",
            get(auth::routes::register_form).post(auth::routes::register),
        )
        .route("/logout", post(auth::routes::logout))
        .route("/admin", get(routes::admin::dashboard))
        .route(
            "/admin/rooms",
            get(routes::admin::rooms).post(routes::admin::create_room),
        )
        .route("/admin/rooms/:id/edit", get(routes::admin::edit_room_form))
        .route("/admin/rooms/:id", post(routes::admin::update_room))
        .route("/admin/rooms/:id/delete", post(routes::admin::delete_room))
        .route("/admin/bookings", get(routes::admin::bookings))
        .route(
            "/admin/bookings/:id/status",
            post(routes::admin::update_booking_status),
        )
        .nest("/api", booking::router())
        .nest_service("/static", ServeDir::new("static"))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CompressionLayer::new())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state);

    info!("Listening on {}", config.bind_addr);
    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .context("failed to bind listen address")?;
    axum::serve(listener, app).await?;

    Ok(())
}
