//! Bill request, settlement and cancellation

use shared::models::{
    Money, Payment, PaymentCreate, PaymentMethod, PaymentStatus, PaymentSummary, SessionStatus,
    parse_enum,
};
use shared::{AppError, AppResult, ErrorCode};
use sqlx::SqlitePool;

use super::{begin, commit};
use crate::db::repository::{
    order as order_repo, payment as payment_repo, session as session_repo,
};
use crate::utils::validation::{MAX_CHAT_ID_LEN, validate_required_text};

/// Ask for the bill of a session.
///
/// The total covers every order that was not cancelled. Any earlier
/// payment record of the session is voided in the same transaction.
pub async fn request(pool: &SqlitePool, input: &PaymentCreate) -> AppResult<Payment> {
    validate_required_text(&input.session_code, "session_code", MAX_CHAT_ID_LEN)?;

    let mut tx = begin(pool).await?;
    let session = session_repo::find_by_code(&mut *tx, &input.session_code)
        .await?
        .ok_or_else(|| {
            AppError::validation("Session not found").with_detail("field", "session_code")
        })?;
    if !session.status.accepts_payment_request() {
        return Err(AppError::session_not_eligible(
            "request payment",
            session.status.as_str(),
        ));
    }
    if payment_repo::find_pending_by_session(&mut *tx, session.id)
        .await?
        .is_some()
    {
        return Err(AppError::new(ErrorCode::PaymentAlreadyRequested));
    }
    if order_repo::count_by_session(&mut *tx, session.id).await? == 0 {
        return Err(AppError::new(ErrorCode::PaymentNoOrders));
    }

    let total: Money = order_repo::billable_totals(&mut *tx, session.id)
        .await?
        .into_iter()
        .sum();
    let voided = payment_repo::cancel_live(&mut *tx, session.id).await?;
    let payment = payment_repo::insert(&mut *tx, session.id, total).await?;
    session_repo::set_status(&mut *tx, session.id, SessionStatus::PaymentRequested).await?;
    commit(tx).await?;

    tracing::info!(
        session_id = session.id,
        payment_id = payment.id,
        total = %total,
        voided,
        "Payment requested"
    );
    Ok(payment)
}

/// Settle a pending bill and close the session
pub async fn complete(pool: &SqlitePool, id: i64, method: &str) -> AppResult<Payment> {
    let method: PaymentMethod = parse_enum(method, "payment_method", PaymentMethod::ALL)
        .map_err(|e| AppError::with_message(ErrorCode::PaymentInvalidMethod, e.message))?;

    let mut tx = begin(pool).await?;
    let payment = find_pending(&mut tx, id, "complete").await?;

    let paid = payment_repo::mark_paid(&mut *tx, id, method).await?;
    if let Some(session) = session_repo::find_by_id(&mut *tx, payment.session_id).await?
        && session.status.can_transition_to(SessionStatus::Completed)
    {
        session_repo::set_status(&mut *tx, session.id, SessionStatus::Completed).await?;
    }
    commit(tx).await?;

    tracing::info!(payment_id = id, method = %method, total = %paid.total_amount, "Payment completed");
    Ok(paid)
}

/// Withdraw a pending bill; the session returns to ordering
pub async fn cancel(pool: &SqlitePool, id: i64) -> AppResult<Payment> {
    let mut tx = begin(pool).await?;
    let payment = find_pending(&mut tx, id, "cancel").await?;

    let cancelled = payment_repo::mark_cancelled(&mut *tx, id).await?;
    if let Some(session) = session_repo::find_by_id(&mut *tx, payment.session_id).await?
        && session.status == SessionStatus::PaymentRequested
    {
        session_repo::set_status(&mut *tx, session.id, SessionStatus::Active).await?;
    }
    commit(tx).await?;

    tracing::info!(payment_id = id, session_id = payment.session_id, "Payment cancelled");
    Ok(cancelled)
}

async fn find_pending(
    conn: &mut sqlx::SqliteConnection,
    id: i64,
    action: &str,
) -> AppResult<Payment> {
    let payment = payment_repo::find_by_id(&mut *conn, id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::PaymentNotFound))?;
    if payment.status != PaymentStatus::Pending {
        return Err(AppError::with_message(
            ErrorCode::PaymentInvalidStatus,
            format!("Cannot {action} a payment that is {}", payment.status),
        ));
    }
    Ok(payment)
}

pub async fn get(pool: &SqlitePool, id: i64) -> AppResult<PaymentSummary> {
    payment_repo::find_summary(pool, id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::PaymentNotFound))
}

pub async fn list(pool: &SqlitePool, status: Option<PaymentStatus>) -> AppResult<Vec<PaymentSummary>> {
    Ok(payment_repo::find_summaries(pool, status).await?)
}
