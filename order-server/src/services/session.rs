//! Session lifecycle: create-or-resume, detail, complete, cancel

use shared::models::{Money, Session, SessionCreate, SessionDetail, SessionOpened, SessionStatus};
use shared::util::{generate_session_code, now_millis};
use shared::{AppError, AppResult, ErrorCode};
use sqlx::{SqliteConnection, SqlitePool};

use super::{acquire, begin, commit};
use crate::db::RepoError;
use crate::db::repository::{
    dining_table as table_repo, order as order_repo, payment as payment_repo,
    session as session_repo,
};
use crate::utils::validation::{
    MAX_CHAT_ID_LEN, MAX_URL_LEN, PARTY_SIZE_RANGE, validate_optional_text, validate_range,
    validate_required_text,
};

/// Attempts at drawing an unused session code
const CODE_ATTEMPTS: usize = 5;

pub const MSG_CREATED: &str = "Started a new session";
pub const MSG_RESUMED: &str = "Joined the existing session";

/// Open a session for the scanned table, or return the one already open.
pub async fn open(pool: &SqlitePool, input: &SessionCreate) -> AppResult<SessionOpened> {
    validate_required_text(&input.qr_code_url, "qr_code_url", MAX_URL_LEN)?;
    validate_range(input.party_size, "party_size", PARTY_SIZE_RANGE)?;
    validate_optional_text(&input.telegram_chat_id, "telegram_chat_id", MAX_CHAT_ID_LEN)?;

    let mut conn = acquire(pool).await?;
    let table = table_repo::find_by_qr(&mut *conn, &input.qr_code_url)
        .await?
        .ok_or_else(|| {
            AppError::validation("Table not found").with_detail("field", "qr_code_url")
        })?;
    if !table.is_available {
        return Err(AppError::with_message(
            ErrorCode::TableUnavailable,
            format!("Table {} is not available", table.table_number),
        ));
    }

    if let Some(existing) = session_repo::find_open_by_table(&mut *conn, table.id).await? {
        return resumed(&mut conn, existing).await;
    }

    for _ in 0..CODE_ATTEMPTS {
        let code = generate_session_code(table.id, now_millis());
        let inserted = session_repo::insert(
            &mut *conn,
            session_repo::NewSession {
                store_id: table.store_id,
                table_id: table.id,
                session_code: &code,
                party_size: input.party_size,
                telegram_chat_id: input.telegram_chat_id.as_deref(),
            },
        )
        .await;

        match inserted {
            Ok(session) => {
                tracing::info!(
                    session_id = session.id,
                    table_id = table.id,
                    session_code = %session.session_code,
                    "Session opened"
                );
                return Ok(SessionOpened {
                    session: detail_of(&mut conn, session).await?,
                    is_new: true,
                    message: MSG_CREATED.to_string(),
                });
            }
            // Either another diner opened the table first or the code collided
            Err(RepoError::Duplicate(_)) => {
                if let Some(winner) = session_repo::find_open_by_table(&mut *conn, table.id).await? {
                    return resumed(&mut conn, winner).await;
                }
            }
            Err(e) => return Err(e.into()),
        }
    }

    Err(AppError::internal("Could not allocate a unique session code"))
}

async fn resumed(conn: &mut SqliteConnection, session: Session) -> AppResult<SessionOpened> {
    tracing::debug!(session_id = session.id, "Resuming open session");
    Ok(SessionOpened {
        session: detail_of(conn, session).await?,
        is_new: false,
        message: MSG_RESUMED.to_string(),
    })
}

/// Session with table, store, orders and the running bill
pub async fn detail_of(conn: &mut SqliteConnection, session: Session) -> AppResult<SessionDetail> {
    let (table_number, store_name) = session_repo::find_labels(&mut *conn, session.id)
        .await?
        .unwrap_or_default();
    let orders = order_repo::find_by_session(&mut *conn, session.id).await?;
    let total_amount: Money = orders
        .iter()
        .filter(|o| o.order.status != shared::models::OrderStatus::Cancelled)
        .map(|o| o.order.total_amount)
        .sum();
    Ok(SessionDetail {
        session,
        table_number,
        store_name,
        orders,
        total_amount,
    })
}

pub async fn get_detail(pool: &SqlitePool, id: i64) -> AppResult<SessionDetail> {
    let mut conn = acquire(pool).await?;
    let session = session_repo::find_by_id(&mut *conn, id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::SessionNotFound))?;
    detail_of(&mut conn, session).await
}

pub async fn list(
    pool: &SqlitePool,
    filter: &session_repo::SessionFilter,
) -> AppResult<Vec<SessionDetail>> {
    let mut conn = acquire(pool).await?;
    let sessions = session_repo::find_all(&mut *conn, filter).await?;
    let mut result = Vec::with_capacity(sessions.len());
    for session in sessions {
        result.push(detail_of(&mut conn, session).await?);
    }
    Ok(result)
}

/// End the visit; a bill still pending is voided
pub async fn complete(pool: &SqlitePool, id: i64) -> AppResult<SessionDetail> {
    close(pool, id, SessionStatus::Completed).await
}

/// Abandon the visit; a pending bill is voided with it
pub async fn cancel(pool: &SqlitePool, id: i64) -> AppResult<SessionDetail> {
    close(pool, id, SessionStatus::Cancelled).await
}

async fn close(pool: &SqlitePool, id: i64, target: SessionStatus) -> AppResult<SessionDetail> {
    let mut tx = begin(pool).await?;
    let session = session_repo::find_by_id(&mut *tx, id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::SessionNotFound))?;
    if !session.status.can_transition_to(target) {
        return Err(AppError::with_message(
            ErrorCode::SessionInvalidTransition,
            format!("Cannot move session from {} to {}", session.status, target),
        ));
    }

    session_repo::set_status(&mut *tx, id, target).await?;
    // A closed table has no bill left to settle
    if let Some(payment) = payment_repo::find_pending_by_session(&mut *tx, id).await? {
        payment_repo::mark_cancelled(&mut *tx, payment.id).await?;
        tracing::info!(session_id = id, payment_id = payment.id, "Pending payment voided");
    }
    commit(tx).await?;
    tracing::info!(session_id = id, status = %target, "Session closed");

    get_detail(pool, id).await
}
