//! Store Model

use serde::{Deserialize, Serialize};

/// Store entity (one restaurant location)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Store {
    pub id: i64,
    pub name: String,
    pub address: Option<String>,
    pub phone: Option<String>,
    /// Free-form JSON describing opening hours
    pub business_hours: Option<String>,
    pub is_active: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create store payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreCreate {
    pub name: String,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub business_hours: Option<String>,
}

/// Update store payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoreUpdate {
    pub name: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub business_hours: Option<String>,
    pub is_active: Option<bool>,
}
