//! Order Model
//!
//! An order is one cart submission inside a session. Line items snapshot
//! the menu item's name and price at submission time.

use super::money::Money;
use serde::{Deserialize, Serialize};

text_enum! {
    /// Kitchen progress of an order or of a single line item
    pub enum OrderStatus {
        Pending => "pending",
        Cooking => "cooking",
        Ready => "ready",
        Served => "served",
        Cancelled => "cancelled",
    }
}

/// Line items move through the same kitchen states as their order
pub type OrderItemStatus = OrderStatus;

impl OrderStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Served | OrderStatus::Cancelled)
    }

    /// Position on the kitchen line; `None` for cancelled
    fn stage(&self) -> Option<u8> {
        match self {
            OrderStatus::Pending => Some(0),
            OrderStatus::Cooking => Some(1),
            OrderStatus::Ready => Some(2),
            OrderStatus::Served => Some(3),
            OrderStatus::Cancelled => None,
        }
    }

    /// Transition table for orders and line items.
    ///
    /// Forward moves may skip stages, cancellation is allowed until the
    /// dish is served, and re-applying the current status is accepted as
    /// a no-op.
    pub fn can_transition_to(&self, next: OrderStatus) -> bool {
        if *self == next {
            return true;
        }
        if self.is_terminal() {
            return false;
        }
        match (self.stage(), next.stage()) {
            (_, None) => true,
            (Some(from), Some(to)) => to > from,
            (None, _) => false,
        }
    }
}

/// Recompute an order's status from its line items.
///
/// Returns the common status when every item agrees, `None` when the
/// items diverge or there are none.
pub fn derive_order_status<I>(items: I) -> Option<OrderStatus>
where
    I: IntoIterator<Item = OrderItemStatus>,
{
    let mut iter = items.into_iter();
    let first = iter.next()?;
    iter.all(|s| s == first).then_some(first)
}

/// Order entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Order {
    pub id: i64,
    pub session_id: i64,
    pub telegram_user_id: Option<String>,
    pub telegram_username: Option<String>,
    /// 1-based, sequential within the session
    pub order_number: i32,
    pub total_amount: Money,
    pub status: OrderStatus,
    pub ordered_at: i64,
    pub cooking_started_at: Option<i64>,
    pub ready_at: Option<i64>,
    pub served_at: Option<i64>,
    pub cancelled_at: Option<i64>,
    /// Staff user who cancelled the order
    pub cancelled_by: Option<i64>,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Order line item
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct OrderItem {
    pub id: i64,
    pub order_id: i64,
    pub menu_item_id: i64,
    pub menu_item_name: String,
    pub unit_price: Money,
    pub quantity: i32,
    pub subtotal: Money,
    pub status: OrderItemStatus,
    /// Allergy requests and similar
    pub note: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Order with its line items and table, as shown to staff and diners
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderWithItems {
    #[serde(flatten)]
    pub order: Order,
    pub table_number: String,
    pub items: Vec<OrderItem>,
}

/// One cart line
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItemInput {
    pub menu_item_id: i64,
    pub quantity: i32,
    pub note: Option<String>,
}

/// Cart submission from the mini-app
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderCreate {
    pub session_code: String,
    pub telegram_user_id: Option<String>,
    pub telegram_username: Option<String>,
    #[serde(default)]
    pub items: Vec<OrderItemInput>,
}

/// Status change request for an order or a line item
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusUpdate {
    pub status: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use OrderStatus::*;

    #[test]
    fn test_forward_moves_allowed() {
        assert!(Pending.can_transition_to(Cooking));
        assert!(Cooking.can_transition_to(Ready));
        assert!(Ready.can_transition_to(Served));
        assert!(Pending.can_transition_to(Served));
    }

    #[test]
    fn test_backward_moves_rejected() {
        assert!(!Ready.can_transition_to(Cooking));
        assert!(!Cooking.can_transition_to(Pending));
        assert!(!Served.can_transition_to(Ready));
    }

    #[test]
    fn test_cancel_until_served() {
        assert!(Pending.can_transition_to(Cancelled));
        assert!(Ready.can_transition_to(Cancelled));
        assert!(!Served.can_transition_to(Cancelled));
        assert!(!Cancelled.can_transition_to(Pending));
    }

    #[test]
    fn test_same_status_is_noop() {
        for status in OrderStatus::ALL {
            assert!(status.can_transition_to(*status));
        }
    }

    #[test]
    fn test_derive_converged() {
        assert_eq!(derive_order_status([Served, Served, Served]), Some(Served));
        assert_eq!(derive_order_status([Cooking]), Some(Cooking));
    }

    #[test]
    fn test_derive_diverged() {
        assert_eq!(derive_order_status([Served, Ready]), None);
        assert_eq!(derive_order_status([Cancelled, Served]), None);
        assert_eq!(derive_order_status(Vec::<OrderStatus>::new()), None);
    }

    #[test]
    fn test_order_create_defaults_items() {
        let req: OrderCreate =
            serde_json::from_str(r#"{"session_code":"TBL1-20240101-ABCDEF"}"#).unwrap();
        assert!(req.items.is_empty());
    }
}
