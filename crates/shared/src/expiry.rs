use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString, VariantArray};

/// Items expiring within this many days count as "expiring soon".
pub const WARNING_THRESHOLD: i64 = 3;

/// Items beyond this many days are considered safely stocked.
pub const SAFE_THRESHOLD: i64 = 7;

#[derive(
    EnumString,
    Display,
    VariantArray,
    AsRefStr,
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
)]
pub enum ExpiryStatus {
    Expired,
    ExpiringSoon,
    Fresh,
}

impl ExpiryStatus {
    /// Bucket a signed day count: negative is expired, 0..=3 is expiring
    /// soon, anything later is fresh.
    pub fn from_days(days: i64) -> Self {
        if days < 0 {
            ExpiryStatus::Expired
        } else if days <= WARNING_THRESHOLD {
            ExpiryStatus::ExpiringSoon
        } else {
            ExpiryStatus::Fresh
        }
    }
}

/// Parse the date-like text values stored on food items.
///
/// Accepts RFC 3339 timestamps, `YYYY-MM-DD HH:MM:SS`, and plain
/// `YYYY-MM-DD` dates (interpreted as midnight). Returns `None` for
/// anything else instead of failing, so malformed legacy records degrade
/// rather than abort whole-inventory computations.
pub fn parse_date_time(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.naive_utc());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S") {
        return Some(dt);
    }
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Some(date.and_hms_opt(0, 0, 0)?);
    }
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y/%m/%d") {
        return Some(date.and_hms_opt(0, 0, 0)?);
    }

    None
}

/// Date component of a stored date-like text value.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    parse_date_time(value).map(|dt| dt.date())
}

/// Signed number of days until `expire_date`, rounded up.
///
/// Partial days round toward the item being expired sooner (ceiling of a
/// possibly negative quotient), so an item expiring later today reports 1
/// and an item that expired earlier today reports 0. Unparseable input
/// reports 0, treated as "expires today".
pub fn days_until_expiry(expire_date: &str, reference: NaiveDateTime) -> i64 {
    let Some(expire) = parse_date_time(expire_date) else {
        return 0;
    };

    ceil_days_between(reference, expire)
}

/// Same computation against the current wall clock.
pub fn days_until_expiry_now(expire_date: &str) -> i64 {
    days_until_expiry(expire_date, Utc::now().naive_utc())
}

/// Whole-day distance with both endpoints truncated to midnight.
///
/// The summary counters bucket on calendar dates, not instants: an item
/// expiring at 23:00 tonight still counts as "today" all day.
pub fn whole_days_until_expiry(expire_date: &str, reference: NaiveDate) -> i64 {
    let Some(expire) = parse_date(expire_date) else {
        return 0;
    };

    (expire - reference).num_days()
}

/// Status bucket for an item on a given calendar date.
pub fn status_on(expire_date: &str, reference: NaiveDate) -> ExpiryStatus {
    ExpiryStatus::from_days(whole_days_until_expiry(expire_date, reference))
}

fn ceil_days_between(reference: NaiveDateTime, expire: NaiveDateTime) -> i64 {
    const DAY_MS: i64 = 24 * 60 * 60 * 1000;

    let delta_ms = (expire - reference).num_milliseconds();
    let mut days = delta_ms.div_euclid(DAY_MS);
    if delta_ms.rem_euclid(DAY_MS) > 0 {
        days += 1;
    }
    days
}

/// Human phrasing for a signed expiry day count.
pub fn format_relative_expiry(days: i64) -> String {
    if days < 0 {
        format!("已过期{}天", days.abs())
    } else if days == 0 {
        "今天过期".to_string()
    } else if days == 1 {
        "明天过期".to_string()
    } else if days == 2 {
        "后天过期".to_string()
    } else {
        format!("{}天后过期", days)
    }
}

/// Display color for a signed expiry day count.
pub fn expiry_color(days: i64) -> &'static str {
    if days <= 1 {
        "#e74c3c"
    } else if days <= WARNING_THRESHOLD {
        "#f39c12"
    } else {
        "#27ae60"
    }
}
