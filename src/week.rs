use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};

/// First Thursday of the regular season, UTC.
const SEASON_START_UNIX: i64 = 1_756_944_000; // 2025-09-04T00:00:00Z

const FIRST_WEEK: u32 = 1;
const LAST_WEEK: u32 = 18;

/// Resolve a game's scheduled start into a 1..=18 season-week index.
///
/// An unparseable timestamp resolves to week 1 rather than dropping the game;
/// the pipeline keeps running and the record simply carries the fail-open
/// default.
pub fn week_of(raw_kickoff: &str) -> u32 {
    let Some(ts) = parse_timestamp(raw_kickoff) else {
        return FIRST_WEEK;
    };
    let days = (ts - SEASON_START_UNIX).div_euclid(86_400);
    let week = days.div_euclid(7) + 1;
    week.clamp(FIRST_WEEK as i64, LAST_WEEK as i64) as u32
}

pub fn parse_timestamp(raw: &str) -> Option<i64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.timestamp());
    }
    for fmt in [
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
    ] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, fmt) {
            return Some(Utc.from_utc_datetime(&naive).timestamp());
        }
    }
    None
}
