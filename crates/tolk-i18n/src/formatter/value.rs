//! Replacement values passed to the message formatter

use crate::plural::PluralCount;
use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use std::fmt;
use std::sync::Arc;

/// A value substituted into a message placeholder.
#[derive(Clone)]
pub enum ParamValue {
	Null,
	Bool(bool),
	Int(i64),
	Float(f64),
	Str(String),
	List(Vec<ParamValue>),
	/// A point in time; also accepted by the date and time modifiers.
	DateTime(DateTime<Utc>),
	/// Any value with a string conversion.
	Display(Arc<dyn fmt::Display + Send + Sync>),
}

impl ParamValue {
	/// Wrap a value that only offers a `Display` conversion.
	pub fn display(value: impl fmt::Display + Send + Sync + 'static) -> Self {
		Self::Display(Arc::new(value))
	}

	/// Canonical string form used for plain substitution.
	///
	/// Lists are joined with `", "`; `Null` renders as the empty string.
	pub fn to_canonical_string(&self) -> String {
		match self {
			Self::Null => String::new(),
			Self::Bool(b) => if *b { "true" } else { "false" }.to_string(),
			Self::Int(i) => i.to_string(),
			Self::Float(f) => f.to_string(),
			Self::Str(s) => s.clone(),
			Self::List(items) => items
				.iter()
				.map(ParamValue::to_canonical_string)
				.collect::<Vec<_>>()
				.join(", "),
			Self::DateTime(dt) => dt.to_rfc3339(),
			Self::Display(d) => d.to_string(),
		}
	}

	/// Numeric view of the value.
	///
	/// Integers, floats and numeric strings qualify. Booleans, lists and
	/// non-finite numbers do not.
	pub fn as_number(&self) -> Option<f64> {
		match self {
			Self::Int(i) => Some(*i as f64),
			Self::Float(f) if f.is_finite() => Some(*f),
			Self::Str(s) => parse_numeric(s),
			_ => None,
		}
	}

	/// Integer coercion used where a count is expected.
	///
	/// Strings contribute their leading integer (`"12 apples"` is 12, `"abc"`
	/// is 0); floats are truncated.
	pub fn as_count(&self) -> i64 {
		match self {
			Self::Null => 0,
			Self::Bool(b) => i64::from(*b),
			Self::Int(i) => *i,
			Self::Float(f) if f.is_finite() => f.trunc() as i64,
			Self::Float(_) => 0,
			Self::Str(s) => leading_integer(s),
			Self::List(items) => i64::from(!items.is_empty()),
			Self::DateTime(_) | Self::Display(_) => 1,
		}
	}
}

/// Parse a trimmed numeric string; rejects `inf`, `nan` and friends.
pub(crate) fn parse_numeric(s: &str) -> Option<f64> {
	let trimmed = s.trim();
	if !trimmed.bytes().any(|b| b.is_ascii_digit()) {
		return None;
	}
	trimmed.parse::<f64>().ok().filter(|f| f.is_finite())
}

/// Leading optional sign and digits of a string, as an integer.
pub(crate) fn leading_integer(s: &str) -> i64 {
	let trimmed = s.trim_start();
	let (sign, digits) = match trimmed.strip_prefix('-') {
		Some(rest) => (-1, rest),
		None => (1, trimmed.strip_prefix('+').unwrap_or(trimmed)),
	};
	let end = digits
		.find(|c: char| !c.is_ascii_digit())
		.unwrap_or(digits.len());

	digits[..end]
		.parse::<i64>()
		.map(|value| sign * value)
		.unwrap_or(0)
}

impl fmt::Debug for ParamValue {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Null => f.write_str("Null"),
			Self::Bool(b) => f.debug_tuple("Bool").field(b).finish(),
			Self::Int(i) => f.debug_tuple("Int").field(i).finish(),
			Self::Float(x) => f.debug_tuple("Float").field(x).finish(),
			Self::Str(s) => f.debug_tuple("Str").field(s).finish(),
			Self::List(items) => f.debug_tuple("List").field(items).finish(),
			Self::DateTime(dt) => f.debug_tuple("DateTime").field(dt).finish(),
			Self::Display(d) => f.debug_tuple("Display").field(&d.to_string()).finish(),
		}
	}
}

impl From<&str> for ParamValue {
	fn from(value: &str) -> Self {
		Self::Str(value.to_string())
	}
}

impl From<String> for ParamValue {
	fn from(value: String) -> Self {
		Self::Str(value)
	}
}

impl From<&String> for ParamValue {
	fn from(value: &String) -> Self {
		Self::Str(value.clone())
	}
}

impl From<bool> for ParamValue {
	fn from(value: bool) -> Self {
		Self::Bool(value)
	}
}

macro_rules! impl_from_int {
	($($ty:ty),*) => {
		$(
			impl From<$ty> for ParamValue {
				fn from(value: $ty) -> Self {
					Self::Int(i64::from(value))
				}
			}
		)*
	};
}

impl_from_int!(i8, i16, i32, i64, u8, u16, u32);

impl From<u64> for ParamValue {
	fn from(value: u64) -> Self {
		i64::try_from(value).map_or(Self::Float(value as f64), Self::Int)
	}
}

impl From<usize> for ParamValue {
	fn from(value: usize) -> Self {
		i64::try_from(value).map_or(Self::Float(value as f64), Self::Int)
	}
}

impl From<f32> for ParamValue {
	fn from(value: f32) -> Self {
		Self::Float(f64::from(value))
	}
}

impl From<f64> for ParamValue {
	fn from(value: f64) -> Self {
		Self::Float(value)
	}
}

impl From<PluralCount> for ParamValue {
	fn from(count: PluralCount) -> Self {
		if count.is_integral() && count.value().abs() < i64::MAX as f64 {
			Self::Int(count.value() as i64)
		} else {
			Self::Float(count.value())
		}
	}
}

impl From<DateTime<Utc>> for ParamValue {
	fn from(value: DateTime<Utc>) -> Self {
		Self::DateTime(value)
	}
}

impl<T: Into<ParamValue>> From<Vec<T>> for ParamValue {
	fn from(values: Vec<T>) -> Self {
		Self::List(values.into_iter().map(Into::into).collect())
	}
}

impl<T: Into<ParamValue>> From<Option<T>> for ParamValue {
	fn from(value: Option<T>) -> Self {
		value.map_or(Self::Null, Into::into)
	}
}

impl From<serde_json::Value> for ParamValue {
	fn from(value: serde_json::Value) -> Self {
		match value {
			serde_json::Value::Null | serde_json::Value::Object(_) => Self::Null,
			serde_json::Value::Bool(b) => Self::Bool(b),
			serde_json::Value::Number(n) => n
				.as_i64()
				.map(Self::Int)
				.unwrap_or_else(|| Self::Float(n.as_f64().unwrap_or(0.0))),
			serde_json::Value::String(s) => Self::Str(s),
			serde_json::Value::Array(items) => {
				Self::List(items.into_iter().map(ParamValue::from).collect())
			}
		}
	}
}

/// Insertion-ordered placeholder values.
///
/// # Example
/// ```
/// use tolk_i18n::Replacements;
///
/// let replacements = Replacements::new().with("name", "Ada").with("count", 3);
/// assert_eq!(replacements.len(), 2);
///
/// let same: Replacements = [("name", "Ada")].into();
/// assert!(same.contains_key("name"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Replacements(IndexMap<String, ParamValue>);

impl Replacements {
	pub fn new() -> Self {
		Self::default()
	}

	/// Builder-style insert.
	pub fn with(mut self, key: impl Into<String>, value: impl Into<ParamValue>) -> Self {
		self.insert(key, value);
		self
	}

	/// Insert a value. An existing key keeps its position.
	pub fn insert(&mut self, key: impl Into<String>, value: impl Into<ParamValue>) {
		self.0.insert(key.into(), value.into());
	}

	pub fn get(&self, key: &str) -> Option<&ParamValue> {
		self.0.get(key)
	}

	pub fn contains_key(&self, key: &str) -> bool {
		self.0.contains_key(key)
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	pub fn len(&self) -> usize {
		self.0.len()
	}

	pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
		self.0.iter().map(|(k, v)| (k.as_str(), v))
	}
}

impl<K: Into<String>, V: Into<ParamValue>> FromIterator<(K, V)> for Replacements {
	fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
		Self(
			iter.into_iter()
				.map(|(k, v)| (k.into(), v.into()))
				.collect(),
		)
	}
}

impl<K: Into<String>, V: Into<ParamValue>, const N: usize> From<[(K, V); N]> for Replacements {
	fn from(entries: [(K, V); N]) -> Self {
		entries.into_iter().collect()
	}
}
