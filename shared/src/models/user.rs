//! Staff User Model

use serde::{Deserialize, Serialize};

text_enum! {
    pub enum UserRole {
        Admin => "admin",
        Chef => "chef",
        Supervisor => "supervisor",
        Staff => "staff",
    }
}

impl UserRole {
    pub fn is_admin(&self) -> bool {
        matches!(self, UserRole::Admin)
    }
}

/// Staff account
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct User {
    pub id: i64,
    pub username: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub email: Option<String>,
    pub role: UserRole,
    pub store_id: Option<i64>,
    pub is_active: bool,
    pub last_login_at: Option<i64>,
    pub created_at: i64,
    pub updated_at: i64,
}

/// User as returned by the API, with the store name resolved
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct UserInfo {
    pub id: i64,
    pub username: String,
    pub email: Option<String>,
    pub role: UserRole,
    pub store_id: Option<i64>,
    pub store_name: Option<String>,
    pub is_active: bool,
}

/// Create user payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserCreate {
    pub username: String,
    pub password: String,
    pub email: Option<String>,
    pub role: String,
    pub store_id: Option<i64>,
}

/// Update user payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserUpdate {
    pub password: Option<String>,
    pub email: Option<String>,
    pub role: Option<String>,
    pub store_id: Option<i64>,
    pub is_active: Option<bool>,
}
