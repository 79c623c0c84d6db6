//! Authentication middleware
//!
//! Staff-only route groups are wrapped with [`require_staff`]; admin-only
//! groups additionally with [`require_admin`].

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use shared::{AppError, ErrorCode};

use crate::auth::{CurrentUser, JwtError, JwtService};
use crate::core::ServerState;
use crate::db::repository::user as user_repo;
use crate::security_log;

/// Require a valid staff token
///
/// Validates `Authorization: Bearer <token>`, re-checks that the account
/// still exists and is active, then injects [`CurrentUser`] into the
/// request extensions.
///
/// | Failure | Status |
/// |---------|--------|
/// | missing header | 401 NotAuthenticated |
/// | expired token | 401 TokenExpired |
/// | bad token | 401 TokenInvalid |
/// | disabled account | 401 AccountDisabled |
pub async fn require_staff(
    State(state): State<ServerState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    if req.method() == http::Method::OPTIONS {
        return Ok(next.run(req).await);
    }

    let auth_header = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok());

    let token = match auth_header {
        Some(header) => JwtService::extract_from_header(header)
            .ok_or_else(|| AppError::invalid_token("Invalid authorization header"))?,
        None => {
            security_log!("WARN", "auth_missing", uri = format!("{:?}", req.uri()));
            return Err(AppError::not_authenticated());
        }
    };

    let claims = match state.jwt_service.validate_token(token) {
        Ok(claims) => claims,
        Err(e) => {
            security_log!(
                "WARN",
                "auth_failed",
                error = format!("{}", e),
                uri = format!("{:?}", req.uri())
            );
            return Err(match e {
                JwtError::ExpiredToken => AppError::token_expired(),
                _ => AppError::invalid_token("Invalid token"),
            });
        }
    };

    let user = CurrentUser::try_from(claims)
        .map_err(|e| AppError::invalid_token(format!("Malformed JWT claims: {}", e)))?;

    let active = user_repo::find_by_id(&state.pool, user.id)
        .await?
        .is_some_and(|u| u.is_active);
    if !active {
        security_log!(
            "WARN",
            "auth_inactive_user",
            user_id = user.id,
            username = user.username.clone()
        );
        return Err(AppError::new(ErrorCode::AccountDisabled));
    }

    req.extensions_mut().insert(user);
    Ok(next.run(req).await)
}

/// Require the admin role; must run inside [`require_staff`]
pub async fn require_admin(req: Request, next: Next) -> Result<Response, AppError> {
    let user = req
        .extensions()
        .get::<CurrentUser>()
        .ok_or_else(AppError::not_authenticated)?;

    if !user.is_admin() {
        security_log!(
            "WARN",
            "admin_required",
            user_id = user.id,
            username = user.username.clone(),
            user_role = user.role.to_string()
        );
        return Err(AppError::admin_required());
    }

    Ok(next.run(req).await)
}
