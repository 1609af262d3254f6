use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime};
use lazy_static::lazy_static;
use regex::Regex;

const LONG_DATE_FORMAT: &str = "%B %d, %Y";

/// A date as written by an author, before it is normalized.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum IsoDate {
    Date(NaiveDate),
    Local(NaiveDateTime),
    Zoned(DateTime<FixedOffset>),
}

impl IsoDate {
    pub fn to_iso_string(&self) -> String {
        match self {
            IsoDate::Date(d) => d.format("%Y-%m-%d").to_string(),
            IsoDate::Local(dt) => dt.format("%Y-%m-%dT%H:%M:%S").to_string(),
            IsoDate::Zoned(dt) => dt.format("%Y-%m-%dT%H:%M:%S%:z").to_string(),
        }
    }

    pub fn date(&self) -> NaiveDate {
        match self {
            IsoDate::Date(d) => *d,
            IsoDate::Local(dt) => dt.date(),
            IsoDate::Zoned(dt) => dt.date_naive(),
        }
    }
}

/// Parses `YYYY-MM-DD`, `YYYY-MM-DDTHH:MM[:SS[.fff]]` (or with a space instead
/// of `T`) and the same with an offset. A trailing `Z` is read as UTC.
pub fn parse_iso_date(buf: &str) -> Option<IsoDate> {
    let buf = buf.trim();
    if buf.is_empty() {
        return None;
    }

    if let Ok(date) = NaiveDate::parse_from_str(buf, "%Y-%m-%d") {
        return Some(IsoDate::Date(date));
    }

    let normalized = match buf.strip_suffix('Z').or_else(|| buf.strip_suffix('z')) {
        Some(rest) => format!("{}+00:00", rest),
        None => buf.to_string(),
    };
    let normalized = normalized.replacen(' ', "T", 1);

    if let Ok(dt) = DateTime::parse_from_rfc3339(&normalized) {
        return Some(IsoDate::Zoned(dt));
    }

    for fmt in ["%Y-%m-%dT%H:%M:%S%.f%:z", "%Y-%m-%dT%H:%M%:z"] {
        if let Ok(dt) = DateTime::parse_from_str(&normalized, fmt) {
            return Some(IsoDate::Zoned(dt));
        }
    }

    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(&normalized, fmt) {
            return Some(IsoDate::Local(dt));
        }
    }

    None
}

/// `2024-03-10-announcement` -> 2024-03-10
pub fn date_from_file_name(stem: &str) -> Option<NaiveDate> {
    lazy_static! {
        static ref DATE_PREFIX: Regex = Regex::new(r"^(?P<date>\d{4}-\d{2}-\d{2})").unwrap();
    }

    DATE_PREFIX.captures(stem)
        .and_then(|cap| cap.name("date"))
        .and_then(|date| NaiveDate::parse_from_str(date.as_str(), "%Y-%m-%d").ok())
}

/// Human readable form used on cards and detail pages, e.g. `March 10, 2024`.
/// Anything that does not parse is handed back untouched.
pub fn format_long_date(date_str: &str) -> String {
    match parse_iso_date(date_str) {
        Some(date) => date.date().format(LONG_DATE_FORMAT).to_string(),
        None => date_str.to_string(),
    }
}
