//! Clock access, timers and relative timestamp formatting.

#[cfg(test)]
#[path = "time_test.rs"]
mod time_test;

use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;
use time::macros::format_description;

const HOUR_MS: f64 = 60.0 * 60.0 * 1000.0;

/// Milliseconds since the Unix epoch.
pub fn now_ms() -> f64 {
    #[cfg(feature = "hydrate")]
    {
        js_sys::Date::now()
    }
    #[cfg(not(feature = "hydrate"))]
    {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map_or(0.0, |d| d.as_secs_f64() * 1000.0)
    }
}

/// Same as [`now_ms`], truncated for cache bookkeeping.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn now_millis() -> u64 {
    now_ms().max(0.0) as u64
}

/// Format an email timestamp the way the list shows it.
///
/// - under 24 hours old: `3:07 PM`
/// - under 48 hours old: `Yesterday`
/// - otherwise: `Jan 5`
///
/// Unparseable timestamps are shown verbatim.
pub fn format_email_time(timestamp: &str, now_ms: f64) -> String {
    let Ok(at) = OffsetDateTime::parse(timestamp, &Rfc3339) else {
        return timestamp.to_owned();
    };
    #[allow(clippy::cast_precision_loss)]
    let at_ms = (at.unix_timestamp_nanos() / 1_000_000) as f64;
    let hours = ((now_ms - at_ms) / HOUR_MS).floor();

    let formatted = if hours < 24.0 {
        at.format(format_description!("[hour repr:12 padding:none]:[minute] [period]"))
    } else if hours < 48.0 {
        return "Yesterday".to_owned();
    } else {
        at.format(format_description!("[month repr:short] [day padding:none]"))
    };
    formatted.unwrap_or_else(|_| timestamp.to_owned())
}

/// Suspend for `ms` milliseconds in the browser; completes immediately
/// elsewhere.
pub async fn sleep(ms: u32) {
    #[cfg(feature = "hydrate")]
    {
        gloo_timers::future::TimeoutFuture::new(ms).await;
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = ms;
    }
}

/// Calendar year (UTC) at `now_ms`.
#[allow(clippy::cast_possible_truncation)]
pub fn year_at(now_ms: f64) -> i32 {
    OffsetDateTime::from_unix_timestamp((now_ms / 1000.0) as i64).map_or(1970, OffsetDateTime::year)
}
