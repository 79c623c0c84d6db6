//! Payment Model
//!
//! A session has at most one live (non-cancelled) payment. Asking for the
//! bill again cancels the previous record and creates a fresh one.

use super::money::Money;
use serde::{Deserialize, Serialize};

text_enum! {
    pub enum PaymentStatus {
        Pending => "pending",
        Paid => "paid",
        Cancelled => "cancelled",
    }
}

text_enum! {
    /// Accepted ways to settle the bill
    pub enum PaymentMethod {
        Cash => "cash",
        CreditCard => "credit_card",
        Electronic => "electronic",
    }
}

/// Payment entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Payment {
    pub id: i64,
    pub session_id: i64,
    /// Sum of the session's non-cancelled order totals at request time
    pub total_amount: Money,
    pub payment_method: Option<PaymentMethod>,
    pub status: PaymentStatus,
    pub requested_at: i64,
    pub paid_at: Option<i64>,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Payment with the table and session it belongs to (staff listing)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct PaymentSummary {
    #[serde(flatten)]
    #[cfg_attr(feature = "db", sqlx(flatten))]
    pub payment: Payment,
    pub table_number: String,
    pub session_code: String,
}

/// Bill request from the mini-app
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentCreate {
    pub session_code: String,
}

/// Settle a pending payment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentComplete {
    pub payment_method: String,
}
