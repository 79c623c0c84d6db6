//! Staff calls: diner request, staff response, resolution

use shared::models::{
    Session, SessionStatus, StaffCall, StaffCallCreate, StaffCallReason, StaffCallStatus,
    parse_enum,
};
use shared::{AppError, AppResult, ErrorCode};
use sqlx::SqlitePool;

use super::{begin, commit};
use crate::db::repository::{session as session_repo, staff_call as call_repo};
use crate::utils::validation::{
    MAX_CHAT_ID_LEN, MAX_NOTE_LEN, validate_optional_text, validate_required_text,
};

/// A newly created call together with what the notification needs
pub struct CreatedCall {
    pub session: Session,
    pub table_number: String,
    pub call: StaffCall,
}

pub async fn create(pool: &SqlitePool, input: &StaffCallCreate) -> AppResult<CreatedCall> {
    validate_required_text(&input.session_code, "session_code", MAX_CHAT_ID_LEN)?;
    validate_optional_text(&input.message, "message", MAX_NOTE_LEN)?;
    let reason: StaffCallReason = parse_enum(&input.reason, "reason", StaffCallReason::ALL)?;

    let mut tx = begin(pool).await?;
    let session = session_repo::find_by_code(&mut *tx, &input.session_code)
        .await?
        .ok_or_else(|| {
            AppError::validation("Session not found").with_detail("field", "session_code")
        })?;
    if !session.status.accepts_staff_calls() {
        return Err(AppError::session_not_eligible(
            "call staff",
            session.status.as_str(),
        ));
    }

    let call = call_repo::insert(&mut *tx, session.id, reason, input.message.as_deref()).await?;
    session_repo::set_status(&mut *tx, session.id, SessionStatus::CallingStaff).await?;
    let (table_number, _) = session_repo::find_labels(&mut *tx, session.id)
        .await?
        .unwrap_or_default();
    commit(tx).await?;

    tracing::info!(
        session_id = session.id,
        staff_call_id = call.id,
        reason = %reason,
        "Staff called"
    );
    Ok(CreatedCall {
        session,
        table_number,
        call,
    })
}

async fn advance(pool: &SqlitePool, id: i64, next: StaffCallStatus) -> AppResult<StaffCall> {
    let mut tx = begin(pool).await?;
    let call = call_repo::find_by_id(&mut *tx, id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::StaffCallNotFound))?;
    if !call.status.can_transition_to(next) {
        return Err(AppError::validation(format!(
            "Staff call is already {}",
            call.status
        )));
    }

    let updated = call_repo::set_status(&mut *tx, id, next).await?;

    // Answering the table releases the session, even if other calls are still open
    if next == StaffCallStatus::InProgress
        && let Some(session) = session_repo::find_by_id(&mut *tx, call.session_id).await?
        && session.status == SessionStatus::CallingStaff
    {
        session_repo::set_status(&mut *tx, session.id, SessionStatus::Active).await?;
    }
    commit(tx).await?;

    tracing::info!(staff_call_id = id, status = %next, "Staff call updated");
    Ok(updated)
}

/// Staff is on the way
pub async fn respond(pool: &SqlitePool, id: i64) -> AppResult<StaffCall> {
    advance(pool, id, StaffCallStatus::InProgress).await
}

pub async fn resolve(pool: &SqlitePool, id: i64) -> AppResult<StaffCall> {
    advance(pool, id, StaffCallStatus::Resolved).await
}

pub async fn list(
    pool: &SqlitePool,
    session_id: Option<i64>,
    pending_only: bool,
) -> AppResult<Vec<StaffCall>> {
    Ok(call_repo::find_all(pool, session_id, pending_only).await?)
}
