//! Auth handlers

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use shared::models::UserInfo;
use shared::{AppError, AppResult, ErrorCode};

use crate::auth::{CurrentUser, verify_password};
use crate::core::ServerState;
use crate::db::repository::user as user_repo;
use crate::security_log;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: UserInfo,
}

/// POST /api/auth/login
pub async fn login(
    State(state): State<ServerState>,
    Json(req): Json<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    let user = user_repo::find_by_username(&state.pool, req.username.trim()).await?;

    let Some(user) = user.filter(|u| verify_password(&req.password, &u.password_hash)) else {
        security_log!("WARN", "login_failed", username = req.username.clone());
        return Err(AppError::invalid_credentials());
    };
    if !user.is_active {
        security_log!("WARN", "login_disabled_account", user_id = user.id);
        return Err(AppError::new(ErrorCode::AccountDisabled));
    }

    let token = state
        .jwt_service
        .generate_token(&user)
        .map_err(|e| AppError::internal(format!("Failed to issue token: {e}")))?;
    user_repo::touch_last_login(&state.pool, user.id).await?;

    let info = user_repo::find_info(&state.pool, user.id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::UserNotFound))?;
    security_log!("INFO", "login_success", user_id = user.id, role = user.role.to_string());
    Ok(Json(LoginResponse { token, user: info }))
}

/// GET /api/auth/me
pub async fn me(State(state): State<ServerState>, user: CurrentUser) -> AppResult<Json<UserInfo>> {
    let info = user_repo::find_info(&state.pool, user.id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::UserNotFound))?;
    Ok(Json(info))
}
