//! Session resolution and the auth extractors.
//!
//! Credentials never touch this application: sign-in and registration call
//! SQL functions owned by the backend (`auth_authenticate`, `auth_register`)
//! and only an opaque session token is kept here, carried in an HttpOnly
//! cookie and resolved against the `sessions` table on each request.

use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum_extra::extract::cookie::CookieJar;
use chrono::{Duration, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::error::{AppError, Result};
use crate::AppState;

/// Name of the session cookie
pub const SESSION_COOKIE: &str = "azure_session";

/// Sessions are valid this long after sign-in
const SESSION_TTL_DAYS: i64 = 30;

/// The signed-in user, resolved from the session cookie.
///
/// Extracting this rejects unauthenticated requests; use [`MaybeUser`] on
/// pages that render for guests too.
#[derive(Debug, Clone, FromRow)]
pub struct CurrentUser {
    pub id: Uuid,
    pub email: String,
    pub full_name: String,
    pub is_admin: bool,
}

/// The current user, if any
#[derive(Debug, Clone, Default)]
pub struct MaybeUser(pub Option<CurrentUser>);

#[async_trait]
impl FromRequestParts<AppState> for MaybeUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self> {
        let jar = CookieJar::from_headers(&parts.headers);
        let Some(cookie) = jar.get(SESSION_COOKIE) else {
            return Ok(Self(None));
        };

        let user = lookup_session(&state.db, cookie.value()).await?;
        Ok(Self(user))
    }
}

#[async_trait]
impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self> {
        let MaybeUser(user) = MaybeUser::from_request_parts(parts, state).await?;
        user.ok_or(AppError::AuthenticationRequired)
    }
}

/// A signed-in administrator
#[derive(Debug, Clone)]
pub struct AdminUser(pub CurrentUser);

#[async_trait]
impl FromRequestParts<AppState> for AdminUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self> {
        let user = CurrentUser::from_request_parts(parts, state).await?;
        if !user.is_admin {
            return Err(AppError::Forbidden);
        }
        Ok(Self(user))
    }
}

/// Resolve a session token to its user, ignoring expired sessions
async fn lookup_session(pool: &PgPool, token: &str) -> Result<Option<CurrentUser>> {
    let user = sqlx::query_as::<_, CurrentUser>(
        r#"
        SELECT p.id, p.email, p.full_name, p.is_admin
        FROM sessions s
        JOIN profiles p ON p.id = s.user_id
        WHERE s.token = $1
          AND s.expires_at > now()
        "#,
    )
    .bind(token)
    .fetch_optional(pool)
    .await?;

    Ok(user)
}

/// Verify credentials against the backend's auth function.
///
/// The backend returns NULL for unknown emails and bad passwords alike.
pub async fn authenticate(pool: &PgPool, email: &str, password: &str) -> Result<Option<Uuid>> {
    let user_id: Option<Uuid> = sqlx::query_scalar("SELECT auth_authenticate($1, $2)")
        .bind(email)
        .bind(password)
        .fetch_one(pool)
        .await?;

    Ok(user_id)
}

/// Register a new account via the backend's auth function.
///
/// The backend returns NULL when the email is already taken.
pub async fn register(
    pool: &PgPool,
    email: &str,
    password: &str,
    full_name: &str,
) -> Result<Option<Uuid>> {
    let user_id: Option<Uuid> = sqlx::query_scalar("SELECT auth_register($1, $2, $3)")
        .bind(email)
        .bind(password)
        .bind(full_name)
        .fetch_one(pool)
        .await?;

    Ok(user_id)
}

/// Mint a session for a user and return its token
pub async fn create_session(pool: &PgPool, user_id: Uuid) -> Result<String> {
    let token = Uuid::new_v4().to_string();
    let expires_at = Utc::now() + Duration::days(SESSION_TTL_DAYS);

    sqlx::query(
        r#"
        INSERT INTO sessions (token, user_id, expires_at)
        VALUES ($1, $2, $3)
        "#,
    )
    .bind(&token)
    .bind(user_id)
    .bind(expires_at)
    .execute(pool)
    .await?;

    Ok(token)
}

/// Drop a session token
pub async fn destroy_session(pool: &PgPool, token: &str) -> Result<()> {
    sqlx::query("DELETE FROM sessions WHERE token = $1")
        .bind(token)
        .execute(pool)
        .await?;

    Ok(())
}
