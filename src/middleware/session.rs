// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Cookie-backed session middleware.
//!
//! Every API request gets a [`SessionToken`] extension. Browsers without a
//! valid session cookie are issued a new one on the response.

use crate::services::SessionToken;
use crate::AppState;
use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use std::sync::Arc;

/// Name of the session cookie.
pub const SESSION_COOKIE: &str = "checkin_session";

/// Middleware that attaches (and if needed issues) the session token.
pub async fn session_cookie(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    let presented = jar
        .get(SESSION_COOKIE)
        .and_then(|cookie| SessionToken::parse(cookie.value()));

    let (token, issued) = match presented {
        Some(token) => (token, false),
        None => {
            let token = SessionToken::generate(&state.rng).map_err(|e| {
                tracing::error!(error = %e, "Failed to generate session token");
                StatusCode::INTERNAL_SERVER_ERROR
            })?;
            (token, true)
        }
    };

    request.extensions_mut().insert(token.clone());
    let response = next.run(request).await;

    if !issued {
        return Ok(response);
    }

    tracing::debug!(session = %token, "Issued session cookie");
    let cookie = Cookie::build((SESSION_COOKIE, token.as_str().to_string()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(state.config.cookie_secure);

    Ok((jar.add(cookie), response).into_response())
}
