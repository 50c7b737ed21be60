//! Parser for pipe-delimited plural messages
//!
//! Supported form prefixes:
//!
//! - `{N} text` matches when the integer part of the count equals `N`
//! - `[min,max] text` matches when `min <= count <= max`; `max` may be `*`
//! - `category: text` matches a CLDR category (case-insensitive label)
//!
//! A form without a recognized prefix is positional.

use super::rules::PluralCategory;
use regex::Regex;
use std::sync::LazyLock;

static EXPLICIT_RE: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"(?s)^\{(\d+)\}\s*(.*)$").expect("valid explicit-count regex"));

static RANGE_RE: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"(?s)^\[(\d+),(\*|\d+)\]\s*(.*)$").expect("valid range regex"));

static CATEGORY_RE: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(r"(?is)^(zero|one|two|few|many|other):\s*(.*)$").expect("valid category regex")
});

/// How a plural form is selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMatcher {
	/// `{N}`: exact integer match.
	ExplicitCount(u64),
	/// `[min,max]`; `max == None` for `*`.
	Range { min: u64, max: Option<u64> },
	/// `one:`, `few:`, ...
	Category(PluralCategory),
	/// No prefix; index of the form in the message.
	Positional(usize),
}

/// One candidate form of a plural message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluralForm {
	pub matcher: FormMatcher,
	/// Form text with the prefix removed and surrounding whitespace trimmed.
	pub fragment: String,
}

impl PluralForm {
	/// Whether this form's explicit count equals the integer part of `count`.
	pub fn matches_explicit(&self, count: f64) -> bool {
		match self.matcher {
			FormMatcher::ExplicitCount(n) => count.trunc() == n as f64,
			_ => false,
		}
	}

	/// Whether `count` lies inside this form's inclusive range.
	pub fn matches_range(&self, count: f64) -> bool {
		match self.matcher {
			FormMatcher::Range { min, max } => {
				count >= min as f64 && max.is_none_or(|max| count <= max as f64)
			}
			_ => false,
		}
	}

	/// Whether this form is labelled with `category`.
	pub fn matches_category(&self, category: PluralCategory) -> bool {
		self.matcher == FormMatcher::Category(category)
	}

	pub fn is_positional(&self) -> bool {
		matches!(self.matcher, FormMatcher::Positional(_))
	}
}

/// Split a message on `|` and classify every form.
///
/// A `|` inside `{...}` belongs to a placeholder modifier and does not
/// separate forms.
///
/// # Example
/// ```
/// use tolk_i18n::plural::{parse_forms, FormMatcher, PluralCategory};
///
/// let forms = parse_forms("{0} None|[1,5] Few|other: Many");
/// assert_eq!(forms[0].matcher, FormMatcher::ExplicitCount(0));
/// assert_eq!(forms[1].matcher, FormMatcher::Range { min: 1, max: Some(5) });
/// assert_eq!(forms[2].matcher, FormMatcher::Category(PluralCategory::Other));
/// assert_eq!(forms[2].fragment, "Many");
/// ```
pub fn parse_forms(message: &str) -> Vec<PluralForm> {
	split_forms(message)
		.into_iter()
		.enumerate()
		.map(|(index, raw)| parse_form(index, raw.trim()))
		.collect()
}

fn split_forms(message: &str) -> Vec<&str> {
	let mut forms = Vec::new();
	let mut depth = 0usize;
	let mut start = 0;
	for (i, c) in message.char_indices() {
		match c {
			'{' => depth += 1,
			'}' => depth = depth.saturating_sub(1),
			'|' if depth == 0 => {
				forms.push(&message[start..i]);
				start = i + 1;
			}
			_ => {}
		}
	}
	forms.push(&message[start..]);
	forms
}

fn parse_form(index: usize, form: &str) -> PluralForm {
	if let Some(caps) = EXPLICIT_RE.captures(form)
		&& let Ok(n) = caps[1].parse::<u64>()
	{
		return PluralForm {
			matcher: FormMatcher::ExplicitCount(n),
			fragment: caps[2].trim().to_string(),
		};
	}

	if let Some(caps) = RANGE_RE.captures(form)
		&& let Ok(min) = caps[1].parse::<u64>()
	{
		let max = match &caps[2] {
			"*" => Some(None),
			digits => digits.parse::<u64>().ok().map(Some),
		};
		if let Some(max) = max {
			return PluralForm {
				matcher: FormMatcher::Range { min, max },
				fragment: caps[3].trim().to_string(),
			};
		}
	}

	if let Some(caps) = CATEGORY_RE.captures(form)
		&& let Ok(category) = caps[1].parse::<PluralCategory>()
	{
		return PluralForm {
			matcher: FormMatcher::Category(category),
			fragment: caps[2].trim().to_string(),
		};
	}

	PluralForm {
		matcher: FormMatcher::Positional(index),
		fragment: form.to_string(),
	}
}
