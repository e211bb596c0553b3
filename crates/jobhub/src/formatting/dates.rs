use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, Utc};

/// Postings count as new for this many days after they are posted.
pub const NEW_POSTING_DAYS: i64 = 7;

const MILLIS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

/// A value that can be resolved to an instant: timestamps from the database
/// arrive as strings, callers holding parsed values pass them directly.
pub trait DateValue {
    fn to_instant(&self) -> Option<DateTime<Utc>>;
}

impl DateValue for str {
    fn to_instant(&self) -> Option<DateTime<Utc>> {
        parse_instant(self)
    }
}

impl DateValue for String {
    fn to_instant(&self) -> Option<DateTime<Utc>> {
        parse_instant(self)
    }
}

impl DateValue for DateTime<Utc> {
    fn to_instant(&self) -> Option<DateTime<Utc>> {
        Some(*self)
    }
}

impl DateValue for DateTime<FixedOffset> {
    fn to_instant(&self) -> Option<DateTime<Utc>> {
        Some(self.with_timezone(&Utc))
    }
}

impl DateValue for NaiveDateTime {
    fn to_instant(&self) -> Option<DateTime<Utc>> {
        Some(self.and_utc())
    }
}

impl DateValue for NaiveDate {
    fn to_instant(&self) -> Option<DateTime<Utc>> {
        self.and_hms_opt(0, 0, 0).map(|midnight| midnight.and_utc())
    }
}

impl<T: DateValue + ?Sized> DateValue for &T {
    fn to_instant(&self) -> Option<DateTime<Utc>> {
        (**self).to_instant()
    }
}

/// Parses RFC 3339, offset-less date-times (read as UTC) and bare dates
/// (UTC midnight).
pub fn parse_instant(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();

    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }
    if let Ok(parsed) = DateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f%#z") {
        return Some(parsed.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(parsed.and_utc());
        }
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.to_instant())
}

/// True when `date` is at most `days` days before `now`; future dates qualify.
pub fn is_within_days_at<D: DateValue + ?Sized>(date: &D, days: i64, now: DateTime<Utc>) -> bool {
    match date.to_instant() {
        Some(instant) => (now - instant).num_milliseconds() <= days.saturating_mul(MILLIS_PER_DAY),
        None => false,
    }
}

pub fn is_within_days<D: DateValue + ?Sized>(date: &D, days: i64) -> bool {
    is_within_days_at(date, days, Utc::now())
}

/// Whether a posting should carry the "new" badge; the boundary day counts.
pub fn is_new_posting_at<D: DateValue + ?Sized>(posted_at: Option<&D>, now: DateTime<Utc>) -> bool {
    posted_at.is_some_and(|date| is_within_days_at(date, NEW_POSTING_DAYS, now))
}

pub fn is_new_posting<D: DateValue + ?Sized>(posted_at: Option<&D>) -> bool {
    is_new_posting_at(posted_at, Utc::now())
}

/// Whole days elapsed since `date`, truncated toward negative infinity.
///
/// Returns `None` only when a string value cannot be parsed.
pub fn days_since_at<D: DateValue + ?Sized>(date: &D, now: DateTime<Utc>) -> Option<i64> {
    date.to_instant()
        .map(|instant| (now - instant).num_milliseconds().div_euclid(MILLIS_PER_DAY))
}

pub fn days_since<D: DateValue + ?Sized>(date: &D) -> Option<i64> {
    days_since_at(date, Utc::now())
}
