//! Date and time rendering for the `date`, `time` and `datetime` modifiers
//!
//! Format strings use the classic single-letter codes:
//!
//! - Y: 4-digit year (e.g., 2025)
//! - y: 2-digit year (e.g., 25)
//! - m / n: month with / without leading zero
//! - F / M: full / abbreviated month name
//! - d / j: day with / without leading zero
//! - l / D: full / abbreviated weekday name
//! - H / G: 24-hour with / without leading zero
//! - h / g: 12-hour with / without leading zero
//! - i, s: minutes, seconds
//! - A / a: AM/PM, am/pm
//! - T: timezone abbreviation (always `UTC`)
//! - U: seconds since the Unix epoch
//!
//! A backslash outputs the next character literally.

use super::value::ParamValue;
use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, TimeZone, Timelike, Utc, Weekday};

const NAIVE_DATETIME_FORMATS: &[&str] = &[
	"%Y-%m-%d %H:%M:%S",
	"%Y-%m-%dT%H:%M:%S",
	"%Y-%m-%d %H:%M",
	"%Y/%m/%d %H:%M:%S",
];

const NAIVE_DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d"];

/// Which part of a timestamp a named format renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateStyle {
	Date,
	Time,
	DateTime,
}

impl DateStyle {
	/// Format string for a named style, or `None` for a literal format.
	fn named(self, name: &str) -> Option<&'static str> {
		let pattern = match (self, name) {
			(Self::Date, "short") => "n/j/y",
			(Self::Date, "medium") => "M j, Y",
			(Self::Date, "long") => "F j, Y",
			(Self::Date, "full") => "l, F j, Y",
			(Self::Time, "short") => "g:i A",
			(Self::Time, "medium") => "g:i:s A",
			(Self::Time, "long" | "full") => "g:i:s A T",
			(Self::DateTime, "short") => "n/j/y g:i A",
			(Self::DateTime, "medium") => "M j, Y g:i:s A",
			(Self::DateTime, "long") => "F j, Y g:i:s A T",
			(Self::DateTime, "full") => "l, F j, Y g:i:s A T",
			_ => return None,
		};
		Some(pattern)
	}
}

/// Render `value` in `style`.
///
/// `format_name` is one of `short`, `medium`, `long`, `full` or a literal format
/// string. Values that cannot be read as a point in time are returned in
/// their canonical string form.
pub fn format_value(value: &ParamValue, style: DateStyle, format_name: &str) -> String {
	let Some(dt) = resolve_timestamp(value) else {
		return value.to_canonical_string();
	};
	let pattern = style.named(format_name).unwrap_or(format_name);
	format(&dt, pattern)
}

/// Read a value as a UTC point in time.
///
/// Accepts epoch seconds, `DateTime` values and strings in RFC 3339,
/// RFC 2822, `@<epoch>` or common `Y-m-d[ H:i[:s]]` shapes. Naive strings
/// are taken as UTC.
pub fn resolve_timestamp(value: &ParamValue) -> Option<DateTime<Utc>> {
	match value {
		ParamValue::Int(seconds) => Utc.timestamp_opt(*seconds, 0).single(),
		ParamValue::DateTime(dt) => Some(*dt),
		ParamValue::Str(s) => parse_datetime(s.trim()),
		_ => None,
	}
}

fn parse_datetime(s: &str) -> Option<DateTime<Utc>> {
	if s.is_empty() {
		return None;
	}
	if let Some(epoch) = s.strip_prefix('@') {
		return epoch
			.parse::<i64>()
			.ok()
			.and_then(|seconds| Utc.timestamp_opt(seconds, 0).single());
	}
	if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
		return Some(dt.with_timezone(&Utc));
	}
	if let Ok(dt) = DateTime::parse_from_rfc2822(s) {
		return Some(dt.with_timezone(&Utc));
	}
	for pattern in NAIVE_DATETIME_FORMATS {
		if let Ok(naive) = NaiveDateTime::parse_from_str(s, pattern) {
			return Some(naive.and_utc());
		}
	}
	for pattern in NAIVE_DATE_FORMATS {
		if let Ok(date) = NaiveDate::parse_from_str(s, pattern) {
			return date.and_hms_opt(0, 0, 0).map(|naive| naive.and_utc());
		}
	}
	None
}

/// Format a datetime with single-letter codes.
///
/// # Examples
///
/// ```
/// use tolk_i18n::formatter::dateformat::format;
/// use chrono::{TimeZone, Utc};
///
/// let dt = Utc.with_ymd_and_hms(2025, 1, 15, 14, 30, 45).unwrap();
/// assert_eq!(format(&dt, "Y-m-d"), "2025-01-15");
/// assert_eq!(format(&dt, "g:i A"), "2:30 PM");
/// assert_eq!(format(&dt, "l, F j, Y"), "Wednesday, January 15, 2025");
/// ```
pub fn format(dt: &DateTime<Utc>, format_str: &str) -> String {
	let mut result = String::new();
	let mut chars = format_str.chars();

	while let Some(c) = chars.next() {
		if c == '\\' {
			if let Some(next) = chars.next() {
				result.push(next);
			}
			continue;
		}

		match c {
			'Y' => result.push_str(&format!("{:04}", dt.year())),
			'y' => result.push_str(&format!("{:02}", dt.year().rem_euclid(100))),
			'm' => result.push_str(&format!("{:02}", dt.month())),
			'n' => result.push_str(&dt.month().to_string()),
			'F' => result.push_str(month_name(dt.month())),
			'M' => result.push_str(&month_name(dt.month())[..3]),
			'd' => result.push_str(&format!("{:02}", dt.day())),
			'j' => result.push_str(&dt.day().to_string()),
			'l' => result.push_str(weekday_name(dt.weekday())),
			'D' => result.push_str(&weekday_name(dt.weekday())[..3]),
			'H' => result.push_str(&format!("{:02}", dt.hour())),
			'G' => result.push_str(&dt.hour().to_string()),
			'h' => result.push_str(&format!("{:02}", hour12(dt.hour()))),
			'g' => result.push_str(&hour12(dt.hour()).to_string()),
			'i' => result.push_str(&format!("{:02}", dt.minute())),
			's' => result.push_str(&format!("{:02}", dt.second())),
			'A' => result.push_str(if dt.hour() < 12 { "AM" } else { "PM" }),
			'a' => result.push_str(if dt.hour() < 12 { "am" } else { "pm" }),
			'T' => result.push_str("UTC"),
			'U' => result.push_str(&dt.timestamp().to_string()),
			_ => result.push(c),
		}
	}

	result
}

fn hour12(hour: u32) -> u32 {
	match hour % 12 {
		0 => 12,
		h => h,
	}
}

fn month_name(month: u32) -> &'static str {
	match month {
		1 => "January",
		2 => "February",
		3 => "March",
		4 => "April",
		5 => "May",
		6 => "June",
		7 => "July",
		8 => "August",
		9 => "September",
		10 => "October",
		11 => "November",
		_ => "December",
	}
}

fn weekday_name(weekday: Weekday) -> &'static str {
	match weekday {
		Weekday::Mon => "Monday",
		Weekday::Tue => "Tuesday",
		Weekday::Wed => "Wednesday",
		Weekday::Thu => "Thursday",
		Weekday::Fri => "Friday",
		Weekday::Sat => "Saturday",
		Weekday::Sun => "Sunday",
	}
}
