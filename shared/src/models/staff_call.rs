//! Staff Call Model

use serde::{Deserialize, Serialize};

text_enum! {
    /// Why the diner pressed the call button
    pub enum StaffCallReason {
        Water => "water",
        Payment => "payment",
        Question => "question",
        Complaint => "complaint",
        Other => "other",
    }
}

impl StaffCallReason {
    /// Human-readable label used in chat notifications
    pub fn label(&self) -> &'static str {
        match self {
            StaffCallReason::Water => "Water, please",
            StaffCallReason::Payment => "Ready to pay",
            StaffCallReason::Question => "Has a question",
            StaffCallReason::Complaint => "Complaint / problem",
            StaffCallReason::Other => "Other",
        }
    }
}

text_enum! {
    pub enum StaffCallStatus {
        Pending => "pending",
        InProgress => "in_progress",
        Resolved => "resolved",
    }
}

impl StaffCallStatus {
    pub fn can_transition_to(&self, next: StaffCallStatus) -> bool {
        use StaffCallStatus::*;
        matches!(
            (self, next),
            (Pending, InProgress) | (Pending, Resolved) | (InProgress, Resolved)
        )
    }
}

/// Staff call entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct StaffCall {
    pub id: i64,
    pub session_id: i64,
    pub reason: StaffCallReason,
    pub message: Option<String>,
    pub status: StaffCallStatus,
    pub called_at: i64,
    pub responded_at: Option<i64>,
    pub resolved_at: Option<i64>,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create staff call payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StaffCallCreate {
    pub session_code: String,
    pub reason: String,
    pub message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_flow() {
        use StaffCallStatus::*;
        assert!(Pending.can_transition_to(InProgress));
        assert!(InProgress.can_transition_to(Resolved));
        assert!(Pending.can_transition_to(Resolved));
        assert!(!Resolved.can_transition_to(InProgress));
        assert!(!InProgress.can_transition_to(InProgress));
    }

    #[test]
    fn test_reason_parse() {
        assert_eq!("water".parse::<StaffCallReason>(), Ok(StaffCallReason::Water));
        let err = "music".parse::<StaffCallReason>().unwrap_err();
        assert_eq!(err.to_string(), "unknown StaffCallReason value: music");
    }
}
