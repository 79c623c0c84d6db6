//! Staff account handlers

use axum::{
    Json,
    extract::{Path, State},
    response::IntoResponse,
};
use shared::models::{UserCreate, UserInfo, UserRole, UserUpdate, parse_enum};
use shared::{AppError, AppResult, ErrorCode};
use sqlx::SqlitePool;

use crate::api::created;
use crate::auth::{CurrentUser, hash_password};
use crate::core::ServerState;
use crate::db::RepoError;
use crate::db::repository::{store as store_repo, user as user_repo};
use crate::security_log;
use crate::utils::validation::{
    MAX_PASSWORD_LEN, MAX_USERNAME_LEN, MIN_PASSWORD_LEN, validate_optional_text,
    validate_required_text,
};

const MAX_EMAIL_LEN: usize = 254;

fn user_not_found() -> AppError {
    AppError::new(ErrorCode::UserNotFound)
}

fn validate_password(password: &str) -> AppResult<()> {
    let len = password.chars().count();
    if !(MIN_PASSWORD_LEN..=MAX_PASSWORD_LEN).contains(&len) {
        return Err(AppError::validation(format!(
            "password must be {MIN_PASSWORD_LEN} to {MAX_PASSWORD_LEN} characters"
        ))
        .with_detail("field", "password"));
    }
    Ok(())
}

async fn check_store(pool: &SqlitePool, store_id: Option<i64>) -> AppResult<()> {
    if let Some(id) = store_id
        && store_repo::find_by_id(pool, id).await?.is_none()
    {
        return Err(AppError::validation("Store does not exist").with_detail("field", "store_id"));
    }
    Ok(())
}

async fn load_info(pool: &SqlitePool, id: i64) -> AppResult<UserInfo> {
    user_repo::find_info(pool, id)
        .await?
        .ok_or_else(user_not_found)
}

/// GET /api/users
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<UserInfo>>> {
    Ok(Json(user_repo::find_all_info(&state.pool).await?))
}

/// GET /api/users/{id}
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<UserInfo>> {
    Ok(Json(load_info(&state.pool, id).await?))
}

/// POST /api/users
pub async fn create(
    State(state): State<ServerState>,
    admin: CurrentUser,
    Json(payload): Json<UserCreate>,
) -> AppResult<impl IntoResponse> {
    validate_required_text(&payload.username, "username", MAX_USERNAME_LEN)?;
    validate_password(&payload.password)?;
    validate_optional_text(&payload.email, "email", MAX_EMAIL_LEN)?;
    let role: UserRole = parse_enum(&payload.role, "role", UserRole::ALL)?;
    check_store(&state.pool, payload.store_id).await?;

    let password_hash = hash_password(&payload.password)?;
    let id = user_repo::create(
        &state.pool,
        user_repo::NewUser {
            username: payload.username.trim(),
            password_hash: &password_hash,
            email: payload.email.as_deref(),
            role,
            store_id: payload.store_id,
        },
    )
    .await
    .map_err(|e| match e {
        RepoError::Duplicate(_) => AppError::new(ErrorCode::UsernameExists)
            .with_detail("field", "username"),
        other => other.into(),
    })?;

    security_log!("INFO", "user_created", user_id = id, by = admin.id, role = role.to_string());
    Ok(created(load_info(&state.pool, id).await?))
}

/// PUT /api/users/{id}
pub async fn update(
    State(state): State<ServerState>,
    admin: CurrentUser,
    Path(id): Path<i64>,
    Json(payload): Json<UserUpdate>,
) -> AppResult<Json<UserInfo>> {
    validate_optional_text(&payload.email, "email", MAX_EMAIL_LEN)?;
    let role = payload
        .role
        .as_deref()
        .map(|r| parse_enum(r, "role", UserRole::ALL))
        .transpose()?;
    check_store(&state.pool, payload.store_id).await?;
    if id == admin.id && (payload.is_active == Some(false) || role.is_some_and(|r| !r.is_admin())) {
        return Err(AppError::validation("Admins cannot demote or disable themselves"));
    }

    let password_hash = match &payload.password {
        Some(password) => {
            validate_password(password)?;
            Some(hash_password(password)?)
        }
        None => None,
    };

    let changes = user_repo::UserChanges {
        password_hash,
        email: payload.email,
        role,
        store_id: payload.store_id,
        is_active: payload.is_active,
    };
    if !user_repo::update(&state.pool, id, changes).await? {
        return Err(user_not_found());
    }

    security_log!("INFO", "user_updated", user_id = id, by = admin.id);
    Ok(Json(load_info(&state.pool, id).await?))
}
