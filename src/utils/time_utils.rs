use chrono::{DateTime, Local, Utc};

pub struct TimeUtils;

impl TimeUtils {
    pub const STANDARD_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
}

/// Wall-clock epoch milliseconds, used for snapshot `savedAt` stamps.
pub fn now_timestamp_ms() -> i64 {
    Utc::now().timestamp_millis()
}

/// Renders an epoch-ms stamp in local time. Invalid stamps render as "-".
pub fn epoch_ms_to_local_string(epoch_ms: i64) -> String {
    match DateTime::from_timestamp_millis(epoch_ms) {
        Some(dt) => dt
            .with_timezone(&Local)
            .format(TimeUtils::STANDARD_TIME_FORMAT)
            .to_string(),
        None => "-".to_string(),
    }
}
