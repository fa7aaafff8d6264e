//! pubDate parsing.
//!
//! Feeds disagree on date formats, so parsing walks a fixed ordered list and
//! the first format that accepts the string wins. Named zones (GMT, MST, …)
//! carry no offset database and are read as UTC. A string no format accepts
//! maps to the epoch sentinel instead of an error; sentinel-dated entries
//! simply sort last.

use chrono::{DateTime, NaiveDateTime, Utc};

/// Sentinel for unparseable dates.
pub const EPOCH: DateTime<Utc> = DateTime::UNIX_EPOCH;

/// Parse a pubDate string against the format list, falling back to [`EPOCH`].
pub fn parse_pub_date(raw: &str) -> DateTime<Utc> {
    let text = raw.trim();

    // RFC 1123 with a numeric zone: "Mon, 02 Jan 2006 15:04:05 -0700"
    if let Ok(parsed) = DateTime::parse_from_str(text, "%a, %d %b %Y %H:%M:%S %z") {
        return parsed.with_timezone(&Utc);
    }
    // RFC 1123 with a named zone: "Mon, 02 Jan 2006 15:04:05 GMT"
    if let Ok(parsed) = NaiveDateTime::parse_from_str(text, "%a, %d %b %Y %H:%M:%S %Z") {
        return parsed.and_utc();
    }
    // RFC 850: "Monday, 02-Jan-06 15:04:05 GMT"
    if let Ok(parsed) = NaiveDateTime::parse_from_str(text, "%A, %d-%b-%y %H:%M:%S %Z") {
        return parsed.and_utc();
    }
    // ANSI C asctime: "Mon Jan  2 15:04:05 2006"
    if let Ok(parsed) = NaiveDateTime::parse_from_str(text, "%a %b %e %H:%M:%S %Y") {
        return parsed.and_utc();
    }
    // Single-digit day with a numeric zone: "Mon, 2 Jan 2006 15:04:05 -0700"
    if let Ok(parsed) = DateTime::parse_from_str(text, "%a, %e %b %Y %H:%M:%S %z") {
        return parsed.with_timezone(&Utc);
    }

    EPOCH
}
