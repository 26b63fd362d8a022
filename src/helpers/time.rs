use chrono::Utc;
use tokio::time::Instant;

/// Current UNIX time in whole seconds.
pub fn now_i64() -> i64 {
    Utc::now().timestamp()
}

pub fn get_instant() -> Instant {
    Instant::now()
}
