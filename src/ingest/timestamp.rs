use chrono::{DateTime, NaiveDateTime, Utc};

const NAIVE_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"];

/// Twitter v1 style, e.g. `Wed Oct 10 20:19:24 +0000 2018`
const TWITTER_FORMAT: &str = "%a %b %d %H:%M:%S %z %Y";

/// Parse a post timestamp into UTC. Naive timestamps are taken as UTC.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    for fmt in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(naive.and_utc());
        }
    }
    DateTime::parse_from_str(raw, TWITTER_FORMAT)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}
