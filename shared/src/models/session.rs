//! Dining Session Model
//!
//! A session is one visit at a table, from seating until the bill is paid.
//! At most one session per table may be open at a time.

use super::money::Money;
use super::order::OrderWithItems;
use serde::{Deserialize, Serialize};

text_enum! {
    /// Session lifecycle
    ///
    /// ```text
    /// active <-> calling_staff
    ///    |            |
    ///    v            v
    ///  payment_requested  -> (calling_staff | active)
    ///
    /// any open status -> completed | cancelled
    /// ```
    pub enum SessionStatus {
        Active => "active",
        CallingStaff => "calling_staff",
        PaymentRequested => "payment_requested",
        Completed => "completed",
        Cancelled => "cancelled",
    }
}

impl SessionStatus {
    /// Statuses that keep the table occupied
    pub const OPEN: &'static [SessionStatus] = &[
        SessionStatus::Active,
        SessionStatus::CallingStaff,
        SessionStatus::PaymentRequested,
    ];

    pub fn is_open(&self) -> bool {
        Self::OPEN.contains(self)
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, SessionStatus::Completed | SessionStatus::Cancelled)
    }

    /// Diners may submit orders
    pub fn accepts_orders(&self) -> bool {
        matches!(self, SessionStatus::Active | SessionStatus::PaymentRequested)
    }

    /// Diners may call staff
    pub fn accepts_staff_calls(&self) -> bool {
        matches!(self, SessionStatus::Active | SessionStatus::PaymentRequested)
    }

    /// Diners may ask for the bill
    pub fn accepts_payment_request(&self) -> bool {
        matches!(self, SessionStatus::Active | SessionStatus::CallingStaff)
    }

    /// Transition table, checked before every session status write
    pub fn can_transition_to(&self, next: SessionStatus) -> bool {
        use SessionStatus::*;
        match (self, next) {
            (Completed | Cancelled, _) => false,
            (_, Completed | Cancelled) => true,
            (Active, CallingStaff | PaymentRequested) => true,
            (CallingStaff, Active | PaymentRequested) => true,
            (PaymentRequested, CallingStaff | Active) => true,
            _ => false,
        }
    }
}

/// Dining session entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Session {
    pub id: i64,
    pub store_id: i64,
    pub table_id: i64,
    pub session_code: String,
    pub party_size: i32,
    /// Chat the bot replies to; absent when the diner opened the page directly
    pub telegram_chat_id: Option<String>,
    pub status: SessionStatus,
    pub started_at: i64,
    pub ended_at: Option<i64>,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Session with its table, store, orders and running total
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionDetail {
    #[serde(flatten)]
    pub session: Session,
    pub table_number: String,
    pub store_name: String,
    pub orders: Vec<OrderWithItems>,
    /// Sum of non-cancelled order totals
    pub total_amount: Money,
}

/// Create-or-resume request sent by the mini-app
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionCreate {
    pub qr_code_url: String,
    pub party_size: i32,
    pub telegram_chat_id: Option<String>,
}

/// Create-or-resume result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionOpened {
    pub session: SessionDetail,
    /// `false` when an open session for the table already existed
    pub is_new: bool,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use SessionStatus::*;

    #[test]
    fn test_open_statuses() {
        assert!(Active.is_open());
        assert!(CallingStaff.is_open());
        assert!(PaymentRequested.is_open());
        assert!(!Completed.is_open());
        assert!(!Cancelled.is_open());
    }

    #[test]
    fn test_eligibility() {
        assert!(Active.accepts_orders());
        assert!(PaymentRequested.accepts_orders());
        assert!(!CallingStaff.accepts_orders());

        assert!(PaymentRequested.accepts_staff_calls());
        assert!(!CallingStaff.accepts_staff_calls());

        assert!(CallingStaff.accepts_payment_request());
        assert!(!PaymentRequested.accepts_payment_request());
        assert!(!Completed.accepts_payment_request());
    }

    #[test]
    fn test_terminal_statuses_are_final() {
        for next in SessionStatus::ALL {
            assert!(!Completed.can_transition_to(*next));
            assert!(!Cancelled.can_transition_to(*next));
        }
    }

    #[test]
    fn test_open_statuses_can_close() {
        for status in SessionStatus::OPEN {
            assert!(status.can_transition_to(Completed));
            assert!(status.can_transition_to(Cancelled));
        }
    }

    #[test]
    fn test_staff_call_round_trip() {
        assert!(Active.can_transition_to(CallingStaff));
        assert!(CallingStaff.can_transition_to(Active));
        assert!(PaymentRequested.can_transition_to(CallingStaff));
        assert!(!Active.can_transition_to(Active));
    }

    #[test]
    fn test_status_spelling() {
        assert_eq!(PaymentRequested.as_str(), "payment_requested");
        assert_eq!(
            serde_json::to_string(&CallingStaff).unwrap(),
            "\"calling_staff\""
        );
        assert_eq!("calling_staff".parse::<SessionStatus>(), Ok(CallingStaff));
    }
}
