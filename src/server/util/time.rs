//! Time helpers.

use chrono::{DateTime, NaiveDateTime, Utc};

/// Seconds before the recorded expiry at which an access token is already treated as expired
pub const TOKEN_EXPIRY_MARGIN_SECS: i64 = 300;

/// Current time as Unix epoch seconds.
pub fn now_epoch() -> i64 {
    Utc::now().timestamp()
}

/// Whether a token expiring at `expires_at` (epoch seconds) must be refreshed at `now`.
///
/// A token is expired once `now` reaches `expires_at - TOKEN_EXPIRY_MARGIN_SECS`, leaving
/// headroom for the request that is about to use it.
pub fn is_token_expired(expires_at: i64, now: i64) -> bool {
    now >= expires_at - TOKEN_EXPIRY_MARGIN_SECS
}

/// Converts epoch seconds to a naive UTC timestamp.
pub fn epoch_to_naive(epoch: i64) -> Option<NaiveDateTime> {
    DateTime::from_timestamp(epoch, 0).map(|dt| dt.naive_utc())
}

/// Parses an RFC 2822 date as found in RSS `pubDate`.
pub fn parse_rfc2822(value: &str) -> Option<NaiveDateTime> {
    DateTime::parse_from_rfc2822(value.trim())
        .ok()
        .map(|dt| dt.naive_utc())
}
