use axum::{extract::FromRequestParts, http::request::Parts};

use crate::error::AppError;
use crate::AppState;

/// Owner id of the caller, taken from the subject header set by the
/// upstream authenticator.
pub struct AuthUser(pub String);

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let identity = &state.identity;

        let subject = parts
            .headers
            .get(&identity.header)
            .and_then(|value| value.to_str().ok())
            .map(str::trim)
            .filter(|subject| !subject.is_empty())
            .map(str::to_string);

        subject
            .or_else(|| identity.default_owner.clone())
            .map(AuthUser)
            .ok_or(AppError::Unauthorized)
    }
}
