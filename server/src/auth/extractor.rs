use crate::api::ErrorResponse;
use crate::models::User;
use crate::AppState;
use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts, StatusCode},
    response::{IntoResponse, Response},
    Json,
};

use super::db::get_user_from_token;

/// Extractor that resolves `Authorization: Bearer <token>` into the
/// authenticated user, rejecting expired sessions.
///
/// Handlers declare authentication by taking it as an argument:
/// ```ignore
/// async fn my_handler(AuthUser(user): AuthUser) -> impl IntoResponse {
///     // user.id identifies the caller
/// }
/// ```
pub struct AuthUser(pub User);

/// Why bearer authentication failed. Every variant maps to 401 with its
/// own message.
pub enum AuthError {
    NoHeader,
    NotBearer,
    BadToken,
}

impl AuthError {
    fn message(&self) -> &'static str {
        match self {
            AuthError::NoHeader => "Authorization header is missing",
            AuthError::NotBearer => "Authorization header is not a Bearer token",
            AuthError::BadToken => "Invalid or expired token",
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        (
            StatusCode::UNAUTHORIZED,
            Json(ErrorResponse {
                error: self.message().to_string(),
            }),
        )
            .into_response()
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AuthError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let value = parts
            .headers
            .get(header::AUTHORIZATION)
            .ok_or(AuthError::NoHeader)?;

        let token = value
            .to_str()
            .ok()
            .and_then(|v| v.strip_prefix("Bearer "))
            .ok_or(AuthError::NotBearer)?;

        get_user_from_token(&state.pool, token)
            .await
            .map(AuthUser)
            .ok_or(AuthError::BadToken)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_failures_have_distinct_messages() {
        let messages = [
            AuthError::NoHeader.message(),
            AuthError::NotBearer.message(),
            AuthError::BadToken.message(),
        ];
        for (i, a) in messages.iter().enumerate() {
            for b in &messages[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }
}
