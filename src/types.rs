use chrono::{DateTime, Utc};

/// Project-wide Result type
pub type Result<T> = std::result::Result<T, crate::error::Error>;

/// Seconds since the Unix epoch, as exchanged with the backend
pub type UnixTimestamp = i64;

/// Convert a backend timestamp into a UTC date-time
pub fn timestamp_to_datetime(timestamp: UnixTimestamp) -> Option<DateTime<Utc>> {
    DateTime::<Utc>::from_timestamp(timestamp, 0)
}

/// Current time as a backend timestamp
pub fn now_timestamp() -> UnixTimestamp {
    Utc::now().timestamp()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timestamp_conversion() {
        let dt = timestamp_to_datetime(946_684_800).unwrap();
        assert_eq!(dt.to_rfc3339(), "2000-01-01T00:00:00+00:00");
        assert!(now_timestamp() > 946_684_800);
    }
}
