//! Order submission and kitchen status changes
//!
//! Two status flows meet here:
//! - order level: the new status cascades down to every line item
//! - line level: once all lines agree, the order follows them up
//!   ([`derive_order_status`])

use std::collections::HashMap;

use shared::models::{
    MenuItem, Money, OrderCreate, OrderItem, OrderStatus, OrderWithItems, Session,
    derive_order_status, parse_enum,
};
use shared::{AppError, AppResult, ErrorCode};
use sqlx::SqlitePool;

use super::{acquire, begin, commit};
use crate::db::RepoError;
use crate::db::repository::{
    menu_item as menu_repo, order as order_repo, session as session_repo,
};
use crate::utils::validation::{
    LINE_QUANTITY_RANGE, MAX_CHAT_ID_LEN, MAX_NOTE_LEN, MAX_USERNAME_LEN, validate_optional_text,
    validate_range, validate_required_text,
};

/// Retries when a concurrent writer took the same order number
const NUMBER_ATTEMPTS: usize = 3;

fn check_input(input: &OrderCreate) -> AppResult<()> {
    validate_required_text(&input.session_code, "session_code", MAX_CHAT_ID_LEN)?;
    validate_optional_text(&input.telegram_user_id, "telegram_user_id", MAX_CHAT_ID_LEN)?;
    validate_optional_text(&input.telegram_username, "telegram_username", MAX_USERNAME_LEN)?;
    if input.items.is_empty() {
        return Err(AppError::new(ErrorCode::OrderEmpty).with_detail("field", "items"));
    }
    for line in &input.items {
        validate_range(line.quantity, "quantity", LINE_QUANTITY_RANGE)?;
        validate_optional_text(&line.note, "note", MAX_NOTE_LEN)?;
    }
    Ok(())
}

/// Check every cart line against the live menu.
///
/// Quantities of repeated lines for the same dish count together against
/// its per-order cap.
fn check_lines<'a>(
    session: &Session,
    input: &OrderCreate,
    menu: &'a HashMap<i64, MenuItem>,
) -> AppResult<Vec<&'a MenuItem>> {
    let mut per_item: HashMap<i64, i32> = HashMap::new();
    let mut resolved = Vec::with_capacity(input.items.len());

    for line in &input.items {
        let item = menu
            .get(&line.menu_item_id)
            .filter(|m| m.store_id == session.store_id)
            .ok_or_else(|| {
                AppError::validation(format!("Menu item {} does not exist", line.menu_item_id))
                    .with_detail("menu_item_id", line.menu_item_id)
            })?;
        if !item.is_orderable() {
            return Err(AppError::with_message(
                ErrorCode::MenuItemUnavailable,
                format!("{} is currently unavailable", item.name),
            )
            .with_detail("menu_item_id", item.id));
        }

        let total = per_item.entry(item.id).or_insert(0);
        *total += line.quantity;
        if *total > item.quantity_cap() {
            return Err(AppError::with_message(
                ErrorCode::OrderQuantityExceeded,
                format!(
                    "{} can be ordered at most {} at a time",
                    item.name,
                    item.quantity_cap()
                ),
            )
            .with_detail("menu_item_id", item.id)
            .with_detail("max_quantity", item.quantity_cap()));
        }
        resolved.push(item);
    }
    Ok(resolved)
}

fn amount_too_large(field: &str) -> AppError {
    AppError::validation(format!("{field} exceeds the largest storable amount"))
        .with_detail("field", field)
}

fn line_subtotals(input: &OrderCreate, lines: &[&MenuItem]) -> AppResult<Vec<Money>> {
    input
        .items
        .iter()
        .zip(lines)
        .map(|(line, item)| {
            item.price
                .checked_times(line.quantity.into())
                .filter(|m| !m.exceeds_limit())
                .ok_or_else(|| amount_too_large("subtotal"))
        })
        .collect()
}

fn order_total(subtotals: &[Money]) -> AppResult<Money> {
    subtotals
        .iter()
        .try_fold(Money::ZERO, |acc, m| acc.checked_add(*m))
        .filter(|m| !m.exceeds_limit())
        .ok_or_else(|| amount_too_large("total_amount"))
}

/// Create an order from a diner's cart.
///
/// Returns the session as well so the caller can notify its chat.
pub async fn create(
    pool: &SqlitePool,
    input: &OrderCreate,
) -> AppResult<(Session, OrderWithItems)> {
    check_input(input)?;

    let mut tx = begin(pool).await?;
    let session = session_repo::find_by_code(&mut *tx, &input.session_code)
        .await?
        .ok_or_else(|| {
            AppError::validation("Session not found").with_detail("field", "session_code")
        })?;
    if !session.status.accepts_orders() {
        return Err(AppError::session_not_eligible(
            "place an order",
            session.status.as_str(),
        ));
    }

    let ids: Vec<i64> = input.items.iter().map(|l| l.menu_item_id).collect();
    let menu: HashMap<i64, MenuItem> = menu_repo::find_by_ids(&mut tx, &ids)
        .await?
        .into_iter()
        .map(|m| (m.id, m))
        .collect();
    let lines = check_lines(&session, input, &menu)?;

    let subtotals = line_subtotals(input, &lines)?;
    let total_amount = order_total(&subtotals)?;

    let mut attempt = 0;
    let order = loop {
        attempt += 1;
        let inserted = order_repo::insert(
            &mut tx,
            order_repo::NewOrder {
                session_id: session.id,
                telegram_user_id: input.telegram_user_id.as_deref(),
                telegram_username: input.telegram_username.as_deref(),
                total_amount,
            },
        )
        .await;
        match inserted {
            Ok(order) => break order,
            Err(RepoError::Duplicate(_)) if attempt < NUMBER_ATTEMPTS => {
                tracing::debug!(session_id = session.id, attempt, "Order number taken, retrying");
            }
            Err(e) => return Err(e.into()),
        }
    };

    let mut items = Vec::with_capacity(lines.len());
    for ((line, item), subtotal) in input.items.iter().zip(&lines).zip(subtotals) {
        let created = order_repo::insert_item(
            &mut tx,
            order.id,
            order_repo::NewOrderItem {
                menu_item_id: item.id,
                menu_item_name: &item.name,
                unit_price: item.price,
                quantity: line.quantity,
                subtotal,
                note: line.note.as_deref(),
            },
        )
        .await?;
        items.push(created);
    }

    let (table_number, _) = session_repo::find_labels(&mut *tx, session.id)
        .await?
        .unwrap_or_default();
    commit(tx).await?;

    tracing::info!(
        session_id = session.id,
        order_id = order.id,
        order_number = order.order_number,
        total = %order.total_amount,
        "Order created"
    );
    Ok((
        session,
        OrderWithItems {
            order,
            table_number,
            items,
        },
    ))
}

fn parse_status(value: &str) -> AppResult<OrderStatus> {
    parse_enum(value, "status", OrderStatus::ALL)
        .map_err(|e| AppError::with_message(ErrorCode::OrderInvalidStatus, e.message))
}

fn illegal_move(what: &str, from: OrderStatus, to: OrderStatus) -> AppError {
    AppError::with_message(
        ErrorCode::OrderInvalidStatus,
        format!("Cannot move {what} from {from} to {to}"),
    )
}

/// Order-level transition, cascaded to every line item
pub async fn update_status(
    pool: &SqlitePool,
    order_id: i64,
    status: &str,
    staff_id: i64,
) -> AppResult<OrderWithItems> {
    let status = parse_status(status)?;

    let mut tx = begin(pool).await?;
    let order = order_repo::find_by_id(&mut *tx, order_id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::OrderNotFound))?;
    if !order.status.can_transition_to(status) {
        return Err(illegal_move("order", order.status, status));
    }

    order_repo::set_status(&mut *tx, order_id, status, Some(staff_id)).await?;
    order_repo::set_items_status(&mut *tx, order_id, status).await?;
    let updated = order_repo::find_with_items(&mut tx, order_id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::OrderNotFound))?;
    commit(tx).await?;

    tracing::info!(order_id, status = %status, staff_id, "Order status updated");
    Ok(updated)
}

/// Line-level transition followed by the roll-up to the parent order
pub async fn update_item_status(
    pool: &SqlitePool,
    item_id: i64,
    status: &str,
    staff_id: i64,
) -> AppResult<OrderItem> {
    let status = parse_status(status)?;

    let mut tx = begin(pool).await?;
    let item = order_repo::find_item(&mut *tx, item_id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::OrderItemNotFound))?;
    if !item.status.can_transition_to(status) {
        return Err(illegal_move("order item", item.status, status));
    }
    order_repo::set_item_status(&mut *tx, item_id, status).await?;

    let order = order_repo::find_by_id(&mut *tx, item.order_id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::OrderNotFound))?;
    let statuses = order_repo::item_statuses(&mut *tx, item.order_id).await?;
    if let Some(derived) = derive_order_status(statuses)
        && derived != order.status
    {
        order_repo::set_status(&mut *tx, order.id, derived, Some(staff_id)).await?;
        tracing::info!(order_id = order.id, status = %derived, "Order status rolled up from items");
    }

    let updated = order_repo::find_item(&mut *tx, item_id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::OrderItemNotFound))?;
    commit(tx).await?;
    Ok(updated)
}

pub async fn get(pool: &SqlitePool, order_id: i64) -> AppResult<OrderWithItems> {
    let mut conn = acquire(pool).await?;
    order_repo::find_with_items(&mut conn, order_id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::OrderNotFound))
}

pub async fn get_item(pool: &SqlitePool, item_id: i64) -> AppResult<OrderItem> {
    order_repo::find_item(pool, item_id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::OrderItemNotFound))
}

pub async fn list(
    pool: &SqlitePool,
    filter: order_repo::OrderFilter,
) -> AppResult<Vec<OrderWithItems>> {
    let mut conn = acquire(pool).await?;
    Ok(order_repo::find_all(&mut conn, filter).await?)
}

pub async fn by_session(pool: &SqlitePool, session_id: i64) -> AppResult<Vec<OrderWithItems>> {
    let mut conn = acquire(pool).await?;
    if session_repo::find_by_id(&mut *conn, session_id).await?.is_none() {
        return Err(AppError::new(ErrorCode::SessionNotFound));
    }
    Ok(order_repo::find_by_session(&mut conn, session_id).await?)
}

/// Kitchen queue, oldest first
pub async fn dashboard(pool: &SqlitePool) -> AppResult<Vec<OrderWithItems>> {
    let mut conn = acquire(pool).await?;
    Ok(order_repo::find_in_progress(&mut conn).await?)
}
