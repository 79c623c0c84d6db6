//! CurrentUser extractor
//!
//! Handlers behind [`require_staff`](super::require_staff) take
//! `CurrentUser` as an argument to learn who is acting.

use axum::{extract::FromRequestParts, http::request::Parts};
use shared::AppError;

use crate::auth::CurrentUser;

impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<CurrentUser>()
            .cloned()
            .ok_or_else(AppError::not_authenticated)
    }
}
