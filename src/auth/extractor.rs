//! Request authentication extractor
//!
//! `CurrentUser` is the argument handlers take when a route requires a
//! logged-in staff member. Extraction validates the bearer token once per
//! request and caches the result in the request extensions.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;

use crate::auth::jwt::{Claims, JwtError, JwtService};
use crate::core::ServerState;
use crate::db::models::Role;
use crate::utils::AppError;

/// Authenticated staff identity attached to a request.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub id: String,
    pub username: String,
    pub role: Role,
    /// Restaurant scope; `None` for super admins
    pub restaurant_id: Option<String>,
}

impl CurrentUser {
    pub fn is_super_admin(&self) -> bool {
        self.role == Role::SuperAdmin
    }

    /// Every staff role may pass; exists so handlers read as intent.
    pub fn require_staff(&self) -> Result<(), AppError> {
        Ok(())
    }

    pub fn require_super_admin(&self) -> Result<(), AppError> {
        if self.is_super_admin() {
            Ok(())
        } else {
            Err(AppError::forbidden("super admin access required"))
        }
    }
}

impl TryFrom<Claims> for CurrentUser {
    type Error = AppError;

    fn try_from(claims: Claims) -> Result<Self, Self::Error> {
        let role = claims
            .role
            .parse::<Role>()
            .map_err(AppError::invalid_token)?;

        Ok(CurrentUser {
            id: claims.sub,
            username: claims.username,
            role,
            restaurant_id: claims.restaurant_id,
        })
    }
}

impl FromRequestParts<ServerState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &ServerState,
    ) -> Result<Self, Self::Rejection> {
        // Middleware or a previous extraction may have stored it already
        if let Some(user) = parts.extensions.get::<CurrentUser>() {
            return Ok(user.clone());
        }

        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or(AppError::Unauthorized)?;

        let token = JwtService::extract_from_header(header).ok_or(AppError::Unauthorized)?;

        let claims = state.jwt.validate_token(token).map_err(|e| match e {
            JwtError::ExpiredToken => AppError::TokenExpired,
            other => AppError::InvalidToken(other.to_string()),
        })?;

        let user = CurrentUser::try_from(claims)?;
        parts.extensions.insert(user.clone());
        Ok(user)
    }
}
