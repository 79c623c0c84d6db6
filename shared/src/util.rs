/// Current UTC timestamp in milliseconds
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Build a session code of the form `TBL{table_id}-{YYYYMMDD}-{XXXXXX}`.
///
/// The date is the UTC day of `now_ms`; the suffix is six uppercase hex
/// digits taken from a random v4 UUID. Uniqueness is still enforced by the
/// database, callers retry on collision.
pub fn generate_session_code(table_id: i64, now_ms: i64) -> String {
    let day = chrono::DateTime::from_timestamp_millis(now_ms)
        .unwrap_or_default()
        .format("%Y%m%d");
    let suffix = uuid::Uuid::new_v4().simple().to_string()[..6].to_uppercase();
    format!("TBL{}-{}-{}", table_id, day, suffix)
}
