//! Dining Table Model

use serde::{Deserialize, Serialize};

/// Dining table entity
///
/// `qr_code_url` is the identifier printed in the table's QR code; diners
/// present it when opening a session.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct DiningTable {
    pub id: i64,
    pub store_id: i64,
    pub table_number: String,
    pub qr_code_url: String,
    pub capacity: Option<i32>,
    pub is_available: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create dining table payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiningTableCreate {
    pub store_id: i64,
    pub table_number: String,
    pub qr_code_url: String,
    pub capacity: Option<i32>,
}

/// Update dining table payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DiningTableUpdate {
    pub table_number: Option<String>,
    pub qr_code_url: Option<String>,
    pub capacity: Option<i32>,
    pub is_available: Option<bool>,
}
