// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Bearer-token session extraction.

use axum::{
    extract::FromRequestParts,
    http::{StatusCode, header::AUTHORIZATION, request::Parts},
};
use bookstore_api::{ApiError, AuthenticatedActor, AuthenticationService};
use bookstore_persistence::UserData;
use tracing::{debug, warn};

use crate::AppState;
use crate::error::HttpError;

/// Extractor for authenticated users.
///
/// Validates the `Authorization: Bearer <token>` header and yields the
/// actor, the stored user and the raw token (for logout).
///
/// # Usage
///
/// ```ignore
/// async fn my_handler(session: SessionUser) -> Result<Json<Response>, HttpError> {
///     // session.actor: AuthenticatedActor
///     // session.user: UserData
///     Ok(Json(Response { ... }))
/// }
/// ```
///
/// # Errors
///
/// Rejects with HTTP 401 if the header is missing or malformed, or the
/// session is unknown, expired or belongs to an inactive user. Storage
/// failures reject with HTTP 500.
pub struct SessionUser {
    pub actor: AuthenticatedActor,
    pub user: UserData,
    pub token: String,
}

impl FromRequestParts<AppState> for SessionUser {
    type Rejection = HttpError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header: &str = parts
            .headers
            .get(AUTHORIZATION)
            .ok_or_else(|| {
                debug!("Missing Authorization header");
                HttpError::new(StatusCode::UNAUTHORIZED, "Missing Authorization header")
            })?
            .to_str()
            .map_err(|_| {
                warn!("Invalid Authorization header encoding");
                HttpError::new(StatusCode::UNAUTHORIZED, "Invalid Authorization header")
            })?;

        let token: &str = header.strip_prefix("Bearer ").ok_or_else(|| {
            warn!("Authorization header does not start with 'Bearer '");
            HttpError::new(
                StatusCode::UNAUTHORIZED,
                "Invalid Authorization header format. Expected: 'Bearer <token>'",
            )
        })?;

        let mut persistence = state.persistence.lock().await;
        let (actor, user): (AuthenticatedActor, UserData) =
            AuthenticationService::validate_session(&mut persistence, token).map_err(|e| {
                warn!(error = %e, "Session validation failed");
                HttpError::from(ApiError::from(e))
            })?;

        debug!(username = %actor.username, role = %actor.role, "Session validated");

        Ok(Self {
            actor,
            user,
            token: token.to_string(),
        })
    }
}
