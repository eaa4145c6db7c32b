//! Sign-in, registration and sign-out handlers

use askama::Template;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::Form;
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::Deserialize;

use crate::auth::session::{self, SESSION_COOKIE};
use crate::error::Result;
use crate::routes::Nav;
use crate::AppState;

/// Sign-in page template
#[derive(Template)]
#[template(path = "auth/login.html")]
struct LoginTemplate {
    nav: Nav,
    error: Option<String>,
    email: String,
}

/// Registration page template
#[derive(Template)]
#[template(path = "auth/register.html")]
struct RegisterTemplate {
    nav: Nav,
    error: Option<String>,
    full_name: String,
    email: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct RegisterForm {
    pub full_name: String,
    pub email: String,
    pub password: String,
}

/// Sign-in form
pub async fn login_form() -> Result<Html<String>> {
    let template = LoginTemplate {
        nav: Nav::guest(),
        error: None,
        email: String::new(),
    };

    Ok(Html(template.render()?))
}

/// Sign in: verify credentials with the backend, mint a session
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<LoginForm>,
) -> Result<Response> {
    let email = form.email.trim().to_lowercase();

    let Some(user_id) = session::authenticate(&state.db, &email, &form.password).await? else {
        tracing::info!("Rejected sign-in for {}", email);
        let template = LoginTemplate {
            nav: Nav::guest(),
            error: Some("Unknown email or wrong password".to_string()),
            email,
        };
        return Ok((StatusCode::UNAUTHORIZED, Html(template.render()?)).into_response());
    };

    let token = session::create_session(&state.db, user_id).await?;
    let jar = jar.add(session_cookie(token));

    Ok((jar, Redirect::to("/dashboard")).into_response())
}

/// Registration form
pub async fn register_form() -> Result<Html<String>> {
    let template = RegisterTemplate {
        nav: Nav::guest(),
        error: None,
        full_name: String::new(),
        email: String::new(),
    };

    Ok(Html(template.render()?))
}

/// Register: create the account with the backend, then sign in
pub async fn register(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<RegisterForm>,
) -> Result<Response> {
    let full_name = form.full_name.trim().to_string();
    let email = form.email.trim().to_lowercase();

    if let Some(problem) = registration_problem(&full_name, &email, &form.password) {
        let template = RegisterTemplate {
            nav: Nav::guest(),
            error: Some(problem.to_string()),
            full_name,
            email,
        };
        return Ok((StatusCode::BAD_REQUEST, Html(template.render()?)).into_response());
    }

    let Some(user_id) = session::register(&state.db, &email, &form.password, &full_name).await?
    else {
        let template = RegisterTemplate {
            nav: Nav::guest(),
            error: Some("That email is already registered".to_string()),
            full_name,
            email,
        };
        return Ok((StatusCode::CONFLICT, Html(template.render()?)).into_response());
    };

    let token = session::create_session(&state.db, user_id).await?;
    let jar = jar.add(session_cookie(token));

    Ok((jar, Redirect::to("/dashboard")).into_response())
}

/// Sign out: drop the session row and clear the cookie
pub async fn logout(State(state): State<AppState>, jar: CookieJar) -> Result<Response> {
    if let Some(cookie) = jar.get(SESSION_COOKIE) {
        session::destroy_session(&state.db, cookie.value()).await?;
    }

    let jar = jar.remove(Cookie::build(SESSION_COOKIE).path("/").build());
    Ok((jar, Redirect::to("/")).into_response())
}

fn session_cookie(token: String) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build()
}

fn registration_problem(full_name: &str, email: &str, password: &str) -> Option<&'static str> {
    if full_name.is_empty() {
        return Some("Please tell us your name");
    }
    if !email.contains('@') {
        return Some("Please enter a valid email address");
    }
    if password.len() < 8 {
        return Some("Password must be at least 8 characters");
    }
    None
}
