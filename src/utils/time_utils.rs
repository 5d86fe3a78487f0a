use chrono::Duration;

/// Human readable TTL, e.g. `24 hours`, `90 minutes`, `1 day`.
pub fn describe_ttl(ttl: Duration) -> String {
    fn plural(n: i64, unit: &str) -> String {
        if n == 1 {
            format!("{n} {unit}")
        } else {
            format!("{n} {unit}s")
        }
    }

    let minutes = ttl.num_minutes();
    if minutes > 0 && minutes % 60 == 0 {
        plural(minutes / 60, "hour")
    } else if minutes > 0 {
        plural(minutes, "minute")
    } else {
        plural(ttl.num_seconds(), "second")
    }
}
