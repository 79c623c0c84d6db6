//! Chat message texts (Telegram legacy Markdown)

use std::fmt::Write;

use shared::models::{Money, Order, OrderStatus, OrderWithItems, StaffCall};

/// Escape the characters legacy Markdown treats as markup
pub fn escape_markdown(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '_' | '*' | '`' | '[') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

fn status_icon(status: OrderStatus) -> &'static str {
    match status {
        OrderStatus::Pending => "⏳",
        OrderStatus::Cooking => "👨‍🍳",
        OrderStatus::Ready => "✅",
        OrderStatus::Served => "🍽️",
        OrderStatus::Cancelled => "❌",
    }
}

fn status_label(status: OrderStatus) -> &'static str {
    match status {
        OrderStatus::Pending => "Received",
        OrderStatus::Cooking => "Cooking",
        OrderStatus::Ready => "Ready",
        OrderStatus::Served => "Served",
        OrderStatus::Cancelled => "Cancelled",
    }
}

pub fn order_created(order: &OrderWithItems) -> String {
    let mut text = String::from("🔔 *New order*\n\n");
    let _ = writeln!(text, "Table: {}", escape_markdown(&order.table_number));
    let _ = writeln!(text, "Order: #{}\n", order.order.order_number);
    for item in &order.items {
        let _ = writeln!(
            text,
            "• {} x{}",
            escape_markdown(&item.menu_item_name),
            item.quantity
        );
    }
    let _ = write!(text, "\nTotal: ¥{}", order.order.total_amount);
    text
}

pub fn staff_call_created(table_number: &str, call: &StaffCall) -> String {
    let mut text = String::from("🔔 *Staff call*\n\n");
    let _ = writeln!(text, "Table: {}", escape_markdown(table_number));
    let _ = write!(text, "Reason: {}", call.reason.label());
    if let Some(message) = call.message.as_deref().filter(|m| !m.trim().is_empty()) {
        let _ = write!(text, "\n\n{}", escape_markdown(message));
    }
    text
}

pub fn welcome(first_name: Option<&str>) -> String {
    let greeting = match first_name {
        Some(name) => format!("👋 Hello, {}!", escape_markdown(name)),
        None => "👋 Hello!".to_string(),
    };
    format!(
        "{greeting}\n\n\
         Welcome to table ordering 🎉\n\n\
         *How it works:*\n\
         1️⃣ Scan the QR code on your table\n\
         2️⃣ Pick dishes from the menu\n\
         3️⃣ Confirm your order\n\n\
         Everyone at the table can order at the same time!"
    )
}

pub const HELP: &str = "📖 *Table ordering help*\n\n\
    *Basics:*\n\
    • Scan the table QR code to start\n\
    • Pick dishes from the menu\n\
    • Choose quantities and confirm\n\n\
    *Commands:*\n\
    /start - start the bot\n\
    /help - show this help\n\
    /menu - open the menu\n\
    /order - order history\n\
    /status - kitchen progress\n\n\
    Need anything else? Use the staff call button 🙋";

pub const MENU: &str = "Here is the menu 📋";

pub const NO_OPEN_SESSION: &str =
    "You have no open table session.\nScan the QR code on your table to start ordering.";

pub const NO_ORDERS_YET: &str = "No orders yet.\nPick something from the menu.";

pub const ALL_SERVED: &str = "Everything has been served ✅";

/// Order history of a session, newest first, cancelled orders excluded
pub fn order_history(table_number: &str, orders: &[&Order]) -> String {
    let mut text = format!("📋 *Order history* (table {})\n\n", escape_markdown(table_number));
    for order in orders {
        let _ = writeln!(
            text,
            "{} *Order #{}*\nAmount: ¥{}\nStatus: {}\n",
            status_icon(order.status),
            order.order_number,
            order.total_amount,
            status_label(order.status)
        );
    }
    let total: Money = orders.iter().map(|o| o.total_amount).sum();
    let _ = write!(text, "*Total: ¥{total}*");
    text
}

/// Orders still on their way to the table, oldest first
pub fn kitchen_status(orders: &[&Order]) -> String {
    let mut text = String::from("📊 *Order status*\n\n");
    for order in orders {
        let _ = writeln!(
            text,
            "Order #{}: {} {}",
            order.order_number,
            status_icon(order.status),
            status_label(order.status)
        );
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::{OrderItem, StaffCallReason, StaffCallStatus};

    fn order(number: i32, total: i64, status: OrderStatus) -> Order {
        Order {
            id: number as i64,
            session_id: 1,
            telegram_user_id: None,
            telegram_username: None,
            order_number: number,
            total_amount: Money::from_units(total),
            status,
            ordered_at: 0,
            cooking_started_at: None,
            ready_at: None,
            served_at: None,
            cancelled_at: None,
            cancelled_by: None,
            created_at: 0,
            updated_at: 0,
        }
    }

    fn item(name: &str, quantity: i32) -> OrderItem {
        OrderItem {
            id: 1,
            order_id: 1,
            menu_item_id: 1,
            menu_item_name: name.to_string(),
            unit_price: Money::from_units(850),
            quantity,
            subtotal: Money::from_units(850).checked_times(quantity as i64).unwrap(),
            status: OrderStatus::Pending,
            note: None,
            created_at: 0,
            updated_at: 0,
        }
    }

    #[test]
    fn test_escape_markdown() {
        assert_eq!(escape_markdown("tako_yaki*"), "tako\\_yaki\\*");
        assert_eq!(escape_markdown("A-1"), "A-1");
    }

    #[test]
    fn test_order_created_lists_items_and_total() {
        let order = OrderWithItems {
            order: order(1, 2200, OrderStatus::Pending),
            table_number: "A-1".to_string(),
            items: vec![item("Karaage", 2), item("Edamame", 1)],
        };
        let text = order_created(&order);
        assert!(text.contains("Table: A-1"));
        assert!(text.contains("Order: #1"));
        assert!(text.contains("• Karaage x2"));
        assert!(text.contains("• Edamame x1"));
        assert!(text.ends_with("Total: ¥2200.00"));
    }

    #[test]
    fn test_staff_call_includes_reason_and_message() {
        let call = StaffCall {
            id: 1,
            session_id: 1,
            reason: StaffCallReason::Water,
            message: Some("two glasses".to_string()),
            status: StaffCallStatus::Pending,
            called_at: 0,
            responded_at: None,
            resolved_at: None,
            created_at: 0,
            updated_at: 0,
        };
        let text = staff_call_created("B-2", &call);
        assert!(text.contains("Table: B-2"));
        assert!(text.contains("Reason: Water, please"));
        assert!(text.ends_with("two glasses"));
    }

    #[test]
    fn test_order_history_totals() {
        let first = order(1, 2200, OrderStatus::Served);
        let second = order(2, 500, OrderStatus::Cooking);
        let text = order_history("A-1", &[&second, &first]);
        assert!(text.contains("*Order #2*"));
        assert!(text.ends_with("*Total: ¥2700.00*"));
    }

    #[test]
    fn test_kitchen_status_lines() {
        let pending = order(3, 100, OrderStatus::Pending);
        let text = kitchen_status(&[&pending]);
        assert!(text.contains("Order #3: ⏳ Received"));
    }
}
