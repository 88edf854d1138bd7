//! Time formatting helpers.

pub const SECS_PER_DAY: f64 = 86_400.0;

/// Format a signed duration in seconds as a short human-readable string.
pub fn format_duration(secs: i64) -> String {
    let sign = if secs < 0 { "-" } else { "" };
    let secs = secs.unsigned_abs();
    let body = if secs < 60 {
        format!("{}s", secs)
    } else if secs < 3600 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else if secs < 86400 {
        format!("{}h {}m", secs / 3600, (secs % 3600) / 60)
    } else {
        format!("{}d {}h", secs / 86400, (secs % 86400) / 3600)
    };
    format!("{sign}{body}")
}

pub fn secs_to_days(secs: f64) -> f64 {
    secs / SECS_PER_DAY
}
