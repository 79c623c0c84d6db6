//! Order Repository
//!
//! Orders and their line items. Multi-row writes take a connection so the
//! service can run them inside one transaction.

use shared::models::{Money, Order, OrderItem, OrderItemStatus, OrderStatus, OrderWithItems};
use shared::util::now_millis;
use sqlx::{SqliteConnection, SqliteExecutor};

use super::RepoResult;

const COLUMNS: &str = "id, session_id, telegram_user_id, telegram_username, order_number, \
                       total_amount, status, ordered_at, cooking_started_at, ready_at, \
                       served_at, cancelled_at, cancelled_by, created_at, updated_at";

const ITEM_COLUMNS: &str = "id, order_id, menu_item_id, menu_item_name, unit_price, quantity, \
                            subtotal, status, note, created_at, updated_at";

/// Order joined with its table number
const LISTING_SELECT: &str = "SELECT o.id, o.session_id, o.telegram_user_id, o.telegram_username, \
     o.order_number, o.total_amount, o.status, o.ordered_at, o.cooking_started_at, o.ready_at, \
     o.served_at, o.cancelled_at, o.cancelled_by, o.created_at, o.updated_at, t.table_number \
     FROM orders o \
     JOIN sessions s ON s.id = o.session_id \
     JOIN dining_tables t ON t.id = s.table_id";

#[derive(sqlx::FromRow)]
struct OrderRow {
    #[sqlx(flatten)]
    order: Order,
    table_number: String,
}

/// Listing filters for `GET /api/orders`
#[derive(Debug, Default, Clone, Copy)]
pub struct OrderFilter {
    pub session_id: Option<i64>,
    pub status: Option<OrderStatus>,
}

pub struct NewOrder<'a> {
    pub session_id: i64,
    pub telegram_user_id: Option<&'a str>,
    pub telegram_username: Option<&'a str>,
    pub total_amount: Money,
}

pub struct NewOrderItem<'a> {
    pub menu_item_id: i64,
    pub menu_item_name: &'a str,
    pub unit_price: Money,
    pub quantity: i32,
    pub subtotal: Money,
    pub note: Option<&'a str>,
}

/// Insert an order with the next free number of its session.
///
/// Two writers racing on the same number hit the
/// `(session_id, order_number)` unique index and get `Duplicate`.
pub async fn insert(conn: &mut SqliteConnection, data: NewOrder<'_>) -> RepoResult<Order> {
    let now = now_millis();
    let sql = format!(
        r#"
        INSERT INTO orders
            (session_id, telegram_user_id, telegram_username, order_number, total_amount,
             status, ordered_at, created_at, updated_at)
        SELECT ?1, ?2, ?3, COALESCE(MAX(order_number), 0) + 1, ?4, 'pending', ?5, ?5, ?5
        FROM orders WHERE session_id = ?1
        RETURNING {COLUMNS}
        "#
    );
    Ok(sqlx::query_as(&sql)
        .bind(data.session_id)
        .bind(data.telegram_user_id)
        .bind(data.telegram_username)
        .bind(data.total_amount)
        .bind(now)
        .fetch_one(&mut *conn)
        .await?)
}

pub async fn insert_item(
    conn: &mut SqliteConnection,
    order_id: i64,
    data: NewOrderItem<'_>,
) -> RepoResult<OrderItem> {
    let now = now_millis();
    let sql = format!(
        "INSERT INTO order_items \
         (order_id, menu_item_id, menu_item_name, unit_price, quantity, subtotal, status, note, \
          created_at, updated_at) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, 'pending', ?7, ?8, ?8) RETURNING {ITEM_COLUMNS}"
    );
    Ok(sqlx::query_as(&sql)
        .bind(order_id)
        .bind(data.menu_item_id)
        .bind(data.menu_item_name)
        .bind(data.unit_price)
        .bind(data.quantity)
        .bind(data.subtotal)
        .bind(data.note)
        .bind(now)
        .fetch_one(&mut *conn)
        .await?)
}

pub async fn find_by_id(db: impl SqliteExecutor<'_>, id: i64) -> RepoResult<Option<Order>> {
    let sql = format!("SELECT {COLUMNS} FROM orders WHERE id = ?");
    Ok(sqlx::query_as(&sql).bind(id).fetch_optional(db).await?)
}

pub async fn find_items(db: impl SqliteExecutor<'_>, order_id: i64) -> RepoResult<Vec<OrderItem>> {
    let sql = format!("SELECT {ITEM_COLUMNS} FROM order_items WHERE order_id = ? ORDER BY id");
    Ok(sqlx::query_as(&sql).bind(order_id).fetch_all(db).await?)
}

pub async fn find_item(db: impl SqliteExecutor<'_>, id: i64) -> RepoResult<Option<OrderItem>> {
    let sql = format!("SELECT {ITEM_COLUMNS} FROM order_items WHERE id = ?");
    Ok(sqlx::query_as(&sql).bind(id).fetch_optional(db).await?)
}

/// One order with items and table number
pub async fn find_with_items(
    conn: &mut SqliteConnection,
    id: i64,
) -> RepoResult<Option<OrderWithItems>> {
    let sql = format!("{LISTING_SELECT} WHERE o.id = ?");
    let row: Option<OrderRow> = sqlx::query_as(&sql)
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?;
    match row {
        Some(row) => Ok(attach_items(conn, vec![row]).await?.pop()),
        None => Ok(None),
    }
}

/// Orders of one session by order number
pub async fn find_by_session(
    conn: &mut SqliteConnection,
    session_id: i64,
) -> RepoResult<Vec<OrderWithItems>> {
    let sql = format!("{LISTING_SELECT} WHERE o.session_id = ? ORDER BY o.order_number");
    let rows = sqlx::query_as(&sql)
        .bind(session_id)
        .fetch_all(&mut *conn)
        .await?;
    attach_items(conn, rows).await
}

pub async fn find_all(
    conn: &mut SqliteConnection,
    filter: OrderFilter,
) -> RepoResult<Vec<OrderWithItems>> {
    let sql = format!(
        "{LISTING_SELECT} \
         WHERE (?1 IS NULL OR o.session_id = ?1) AND (?2 IS NULL OR o.status = ?2) \
         ORDER BY o.ordered_at DESC, o.id DESC"
    );
    let rows = sqlx::query_as(&sql)
        .bind(filter.session_id)
        .bind(filter.status)
        .fetch_all(&mut *conn)
        .await?;
    attach_items(conn, rows).await
}

/// Kitchen queue: everything not yet served or cancelled, oldest first
pub async fn find_in_progress(conn: &mut SqliteConnection) -> RepoResult<Vec<OrderWithItems>> {
    let sql = format!(
        "{LISTING_SELECT} WHERE o.status IN ('pending', 'cooking', 'ready') \
         ORDER BY o.ordered_at, o.id"
    );
    let rows = sqlx::query_as(&sql).fetch_all(&mut *conn).await?;
    attach_items(conn, rows).await
}

async fn attach_items(
    conn: &mut SqliteConnection,
    rows: Vec<OrderRow>,
) -> RepoResult<Vec<OrderWithItems>> {
    let mut result = Vec::with_capacity(rows.len());
    for row in rows {
        let items = find_items(&mut *conn, row.order.id).await?;
        result.push(OrderWithItems {
            order: row.order,
            table_number: row.table_number,
            items,
        });
    }
    Ok(result)
}

/// Set the order status and stamp the matching timestamp the first time
/// it is reached. `cancelled_by` is recorded only on cancellation.
pub async fn set_status(
    db: impl SqliteExecutor<'_>,
    id: i64,
    status: OrderStatus,
    staff_id: Option<i64>,
) -> RepoResult<()> {
    sqlx::query(
        r#"
        UPDATE orders SET
            status = ?1,
            cooking_started_at = CASE WHEN ?1 = 'cooking' THEN COALESCE(cooking_started_at, ?2) ELSE cooking_started_at END,
            ready_at = CASE WHEN ?1 = 'ready' THEN COALESCE(ready_at, ?2) ELSE ready_at END,
            served_at = CASE WHEN ?1 = 'served' THEN COALESCE(served_at, ?2) ELSE served_at END,
            cancelled_at = CASE WHEN ?1 = 'cancelled' THEN COALESCE(cancelled_at, ?2) ELSE cancelled_at END,
            cancelled_by = CASE WHEN ?1 = 'cancelled' THEN COALESCE(?3, cancelled_by) ELSE cancelled_by END,
            updated_at = ?2
        WHERE id = ?4
        "#,
    )
    .bind(status)
    .bind(now_millis())
    .bind(staff_id)
    .bind(id)
    .execute(db)
    .await?;
    Ok(())
}

/// Cascade one status to every line item of an order
pub async fn set_items_status(
    db: impl SqliteExecutor<'_>,
    order_id: i64,
    status: OrderItemStatus,
) -> RepoResult<()> {
    sqlx::query("UPDATE order_items SET status = ?, updated_at = ? WHERE order_id = ?")
        .bind(status)
        .bind(now_millis())
        .bind(order_id)
        .execute(db)
        .await?;
    Ok(())
}

pub async fn set_item_status(
    db: impl SqliteExecutor<'_>,
    item_id: i64,
    status: OrderItemStatus,
) -> RepoResult<()> {
    sqlx::query("UPDATE order_items SET status = ?, updated_at = ? WHERE id = ?")
        .bind(status)
        .bind(now_millis())
        .bind(item_id)
        .execute(db)
        .await?;
    Ok(())
}

pub async fn item_statuses(
    db: impl SqliteExecutor<'_>,
    order_id: i64,
) -> RepoResult<Vec<OrderItemStatus>> {
    Ok(
        sqlx::query_scalar("SELECT status FROM order_items WHERE order_id = ? ORDER BY id")
            .bind(order_id)
            .fetch_all(db)
            .await?,
    )
}

/// Totals of every non-cancelled order of a session
pub async fn billable_totals(
    db: impl SqliteExecutor<'_>,
    session_id: i64,
) -> RepoResult<Vec<Money>> {
    Ok(sqlx::query_scalar(
        "SELECT total_amount FROM orders WHERE session_id = ? AND status <> 'cancelled'",
    )
    .bind(session_id)
    .fetch_all(db)
    .await?)
}

pub async fn count_by_session(db: impl SqliteExecutor<'_>, session_id: i64) -> RepoResult<i64> {
    Ok(
        sqlx::query_scalar("SELECT COUNT(*) FROM orders WHERE session_id = ?")
            .bind(session_id)
            .fetch_one(db)
            .await?,
    )
}
