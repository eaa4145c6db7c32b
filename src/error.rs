//! Error handling for the application

use axum::{
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};

/// Application error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Page not found")]
    NotFound,

    #[error("Sign in required")]
    AuthenticationRequired,

    #[error("Admin access required")]
    Forbidden,

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Template error: {0}")]
    Template(#[from] askama::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::NotFound => (StatusCode::NOT_FOUND, "Page not found".to_string()),
            AppError::AuthenticationRequired => {
                // Browsers get the login form rather than a bare 401
                return Redirect::to("/login").into_response();
            }
            AppError::Forbidden => (StatusCode::FORBIDDEN, "Admin access required".to_string()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::Database(e) => {
                tracing::error!("Database error: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Database error".to_string())
            }
            AppError::Template(e) => {
                tracing::error!("Template error: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Template error".to_string())
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal error".to_string())
            }
        };

        // Return simple HTML error page
        let html = format!(
            r#"<!DOCTYPE html>
<html>
<head><title>{} - Hotel Azure</title></head>
<body style="font-family: sans-serif; text-align: center; padding: 50px;">
    <h1>{}</h1>
    <p>{}</p>
    <a href="/">Return to homepage</a>
</body>
</html>"#,
            status.as_u16(),
            status.as_u16(),
            message
        );

        (status, axum::response::Html(html)).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
