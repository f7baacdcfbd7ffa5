use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Publication time of a content item.
///
/// Sources hand us either RFC 3339 timestamps or relative strings such as
/// `"2 hours ago"`. Both are resolved to an absolute instant at ingestion so
/// the feed can be ordered by recency; the raw string is kept for display.
///
/// Serialized as `publishedAt` / `publishedDate` so exported items can be
/// imported again as [`RawContentItem`](crate::domain::RawContentItem)s.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublishedDate {
    #[serde(rename = "publishedAt")]
    pub at: DateTime<Utc>,
    #[serde(rename = "publishedDate")]
    pub display: String,
}

impl PublishedDate {
    /// Resolve `raw` against the ingestion instant `now`.
    ///
    /// Strings that are neither a timestamp nor a recognised relative form
    /// resolve to the Unix epoch, so they sort after everything else.
    pub fn parse(raw: &str, now: DateTime<Utc>) -> Self {
        let at = parse_instant(raw, now).unwrap_or_else(|| {
            tracing::debug!("Unrecognised publish date {:?}, sorting last", raw);
            DateTime::<Utc>::UNIX_EPOCH
        });

        Self {
            at,
            display: raw.to_string(),
        }
    }

    pub fn from_instant(at: DateTime<Utc>) -> Self {
        Self {
            at,
            display: at.format("%Y-%m-%d %H:%M").to_string(),
        }
    }
}

fn parse_instant(raw: &str, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
    let trimmed = raw.trim();

    if let Ok(at) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(at.with_timezone(&Utc));
    }

    let lowered = trimmed.to_lowercase();
    match lowered.as_str() {
        "just now" | "now" | "today" => return Some(now),
        "yesterday" => return Some(now - Duration::days(1)),
        _ => {}
    }

    // "<n> <unit>[s] ago"
    let rest = lowered.strip_suffix(" ago")?;
    let mut parts = rest.split_whitespace();
    let amount = match parts.next()? {
        "a" | "an" | "one" => 1,
        n => n.parse::<i64>().ok()?,
    };
    let unit = parts.next()?;
    if parts.next().is_some() {
        return None;
    }

    let step = match unit.trim_end_matches('s') {
        "sec" | "second" => Duration::seconds(1),
        "min" | "minute" => Duration::minutes(1),
        "hour" | "hr" => Duration::hours(1),
        "day" => Duration::days(1),
        "week" => Duration::weeks(1),
        "month" => Duration::days(30),
        "year" => Duration::days(365),
        _ => return None,
    };

    // Out-of-range amounts fall back like any other unparseable date
    let offset = step.checked_mul(i32::try_from(amount).ok()?)?;
    now.checked_sub_signed(offset)
}
