//! Brace-placeholder modifiers
//!
//! `{key|name}` and `{key|name:argument}` dispatch through a [`ModifierTable`]
//! keyed by lowercase modifier name. Every built-in returns a string for any
//! input; unknown names leave the canonical string untouched.

use super::dateformat::{self, DateStyle};
use super::number::{currency_format, number_format, percent_format};
use super::value::{ParamValue, leading_integer};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

const DEFAULT_TRUNCATE_LENGTH: usize = 50;
const DEFAULT_CURRENCY: &str = "USD";
const DEFAULT_DATE_FORMAT: &str = "medium";
const ELLIPSIS: &str = "...";

/// Inputs available to a modifier.
#[derive(Debug, Clone, Copy)]
pub struct ModifierContext<'a> {
	/// The replacement value as supplied.
	pub value: &'a ParamValue,
	/// Canonical string form of `value`.
	pub text: &'a str,
	/// Text after `:` in `{key|name:argument}`.
	pub argument: Option<&'a str>,
	pub locale: &'a str,
}

/// A modifier implementation.
pub type ModifierFn = Arc<dyn Fn(&ModifierContext<'_>) -> String + Send + Sync>;

/// Modifier name to implementation.
#[derive(Clone)]
pub struct ModifierTable {
	modifiers: HashMap<String, ModifierFn>,
}

impl ModifierTable {
	/// A table with no modifiers at all.
	pub fn empty() -> Self {
		Self {
			modifiers: HashMap::new(),
		}
	}

	/// A table with every built-in modifier and its aliases.
	pub fn builtin() -> Self {
		let mut table = Self::empty();
		table.register_all(&["upper", "uppercase"], upper);
		table.register_all(&["lower", "lowercase"], lower);
		table.register_all(&["title", "titlecase"], title);
		table.register_all(&["capitalize", "ucfirst"], capitalize);
		table.register("number", number);
		table.register("currency", currency);
		table.register_all(&["percent", "percentage"], percent);
		table.register("date", date);
		table.register("time", time);
		table.register("datetime", datetime);
		table.register("plural", plural);
		table.register("truncate", truncate);
		table.register("default", default_value);
		table
	}

	/// Add or replace a modifier. Names are case-insensitive.
	pub fn register<F>(&mut self, name: &str, modifier: F)
	where
		F: Fn(&ModifierContext<'_>) -> String + Send + Sync + 'static,
	{
		self.modifiers
			.insert(name.to_ascii_lowercase(), Arc::new(modifier));
	}

	fn register_all<F>(&mut self, names: &[&str], modifier: F)
	where
		F: Fn(&ModifierContext<'_>) -> String + Send + Sync + 'static,
	{
		let modifier: ModifierFn = Arc::new(modifier);
		for name in names {
			self.modifiers
				.insert(name.to_ascii_lowercase(), Arc::clone(&modifier));
		}
	}

	pub fn contains(&self, name: &str) -> bool {
		self.modifiers.contains_key(&name.to_ascii_lowercase())
	}

	/// Registered names, sorted.
	pub fn names(&self) -> Vec<&str> {
		let mut names: Vec<&str> = self.modifiers.keys().map(String::as_str).collect();
		names.sort_unstable();
		names
	}

	/// Run the modifier called `name`, or return the canonical text when no
	/// such modifier exists.
	pub fn apply(&self, name: &str, ctx: &ModifierContext<'_>) -> String {
		match self.modifiers.get(&name.to_ascii_lowercase()) {
			Some(modifier) => modifier(ctx),
			None => ctx.text.to_string(),
		}
	}
}

impl Default for ModifierTable {
	fn default() -> Self {
		Self::builtin()
	}
}

impl fmt::Debug for ModifierTable {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("ModifierTable")
			.field("modifiers", &self.names())
			.finish()
	}
}

fn upper(ctx: &ModifierContext<'_>) -> String {
	ctx.text.to_uppercase()
}

fn lower(ctx: &ModifierContext<'_>) -> String {
	ctx.text.to_lowercase()
}

fn title(ctx: &ModifierContext<'_>) -> String {
	title_case(ctx.text)
}

fn capitalize(ctx: &ModifierContext<'_>) -> String {
	upper_first(ctx.text)
}

fn number(ctx: &ModifierContext<'_>) -> String {
	let decimals = ctx.argument.map_or(0, leading_integer).max(0) as usize;
	match ctx.value.as_number() {
		Some(n) => number_format(n, decimals),
		None => ctx.text.to_string(),
	}
}

fn currency(ctx: &ModifierContext<'_>) -> String {
	match ctx.value.as_number() {
		Some(n) => currency_format(n, ctx.argument.unwrap_or(DEFAULT_CURRENCY)),
		None => ctx.text.to_string(),
	}
}

fn percent(ctx: &ModifierContext<'_>) -> String {
	match ctx.value.as_number() {
		Some(n) => percent_format(n),
		None => ctx.text.to_string(),
	}
}

fn date(ctx: &ModifierContext<'_>) -> String {
	dateformat::format_value(
		ctx.value,
		DateStyle::Date,
		ctx.argument.unwrap_or(DEFAULT_DATE_FORMAT),
	)
}

fn time(ctx: &ModifierContext<'_>) -> String {
	dateformat::format_value(
		ctx.value,
		DateStyle::Time,
		ctx.argument.unwrap_or(DEFAULT_DATE_FORMAT),
	)
}

fn datetime(ctx: &ModifierContext<'_>) -> String {
	dateformat::format_value(
		ctx.value,
		DateStyle::DateTime,
		ctx.argument.unwrap_or(DEFAULT_DATE_FORMAT),
	)
}

fn plural(ctx: &ModifierContext<'_>) -> String {
	pluralize_word(ctx.text, ctx.value.as_count())
}

fn truncate(ctx: &ModifierContext<'_>) -> String {
	let length = ctx
		.argument
		.filter(|arg| {
			arg.trim_start()
				.starts_with(|c: char| c.is_ascii_digit() || c == '-' || c == '+')
		})
		.map_or(DEFAULT_TRUNCATE_LENGTH, |arg| {
			leading_integer(arg).max(0) as usize
		});
	truncate_chars(ctx.text, length)
}

fn default_value(ctx: &ModifierContext<'_>) -> String {
	ctx.argument.unwrap_or(ctx.text).to_string()
}

/// Uppercase the first character of every word and lowercase the rest.
///
/// Apostrophes do not start a new word.
pub(crate) fn title_case(text: &str) -> String {
	let mut out = String::with_capacity(text.len());
	let mut at_word_start = true;

	for c in text.chars() {
		if c.is_alphanumeric() {
			if at_word_start {
				out.extend(c.to_uppercase());
			} else {
				out.extend(c.to_lowercase());
			}
			at_word_start = false;
		} else {
			out.push(c);
			if !matches!(c, '\'' | '\u{2019}') {
				at_word_start = true;
			}
		}
	}

	out
}

/// Uppercase only the first character.
pub(crate) fn upper_first(text: &str) -> String {
	let mut chars = text.chars();
	match chars.next() {
		Some(first) => first.to_uppercase().chain(chars).collect(),
		None => String::new(),
	}
}

/// Naive English plural of `word` unless `count == 1`.
pub(crate) fn pluralize_word(word: &str, count: i64) -> String {
	if count == 1 {
		return word.to_string();
	}

	let lower = word.to_lowercase();
	if ["s", "sh", "ch", "x", "z"]
		.iter()
		.any(|suffix| lower.ends_with(suffix))
	{
		return format!("{}es", word);
	}

	if let Some(stem) = word.strip_suffix(['y', 'Y'])
		&& stem
			.chars()
			.next_back()
			.is_some_and(|before| !matches!(before.to_ascii_lowercase(), 'a' | 'e' | 'i' | 'o' | 'u'))
	{
		return format!("{}ies", stem);
	}

	format!("{}s", word)
}

/// Keep the first `length` characters, appending an ellipsis if any were cut.
pub(crate) fn truncate_chars(text: &str, length: usize) -> String {
	match text.char_indices().nth(length) {
		Some((cut, _)) => format!("{}{}", &text[..cut], ELLIPSIS),
		None => text.to_string(),
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	fn apply(name: &str, value: impl Into<ParamValue>, argument: Option<&str>) -> String {
		let value = value.into();
		let text = value.to_canonical_string();
		let ctx = ModifierContext {
			value: &value,
			text: &text,
			argument,
			locale: "en",
		};
		ModifierTable::builtin().apply(name, &ctx)
	}

	#[rstest]
	#[case("upper", "straße", "STRASSE")]
	#[case("UPPERCASE", "abc", "ABC")]
	#[case("lower", "ÀB", "àb")]
	#[case("title", "hello wORLD-wide", "Hello World-Wide")]
	#[case("titlecase", "o'neil", "O'neil")]
	#[case("capitalize", "élan vital", "Élan vital")]
	#[case("ucfirst", "", "")]
	fn test_case_modifiers(#[case] name: &str, #[case] input: &str, #[case] expected: &str) {
		assert_eq!(apply(name, input, None), expected);
	}

	#[rstest]
	#[case(1234.5, None, "1,235")]
	#[case(1234.5, Some("2"), "1,234.50")]
	#[case(1234.5, Some("x"), "1,235")]
	fn test_number(#[case] value: f64, #[case] argument: Option<&str>, #[case] expected: &str) {
		assert_eq!(apply("number", value, argument), expected);
	}

	#[rstest]
	fn test_numeric_modifiers_fall_back_to_text() {
		assert_eq!(apply("number", "n/a", None), "n/a");
		assert_eq!(apply("currency", "free", None), "free");
		assert_eq!(apply("percent", true, None), "true");
	}

	#[rstest]
	#[case(9.5, Some("EUR"), "€9.50")]
	#[case(9.5, None, "$9.50")]
	#[case(9.5, Some("XYZ"), "XYZ9.50")]
	fn test_currency(#[case] value: f64, #[case] argument: Option<&str>, #[case] expected: &str) {
		assert_eq!(apply("currency", value, argument), expected);
	}

	#[rstest]
	fn test_percent_accepts_numeric_string() {
		assert_eq!(apply("percentage", "0.5", None), "50.00%");
	}

	#[rstest]
	#[case("apple", 1, "apple")]
	#[case("apple", 2, "apples")]
	#[case("apple", 0, "apples")]
	#[case("box", 3, "boxes")]
	#[case("bus", 3, "buses")]
	#[case("church", 2, "churches")]
	#[case("wish", 2, "wishes")]
	#[case("quiz", 2, "quizes")]
	#[case("city", 2, "cities")]
	#[case("day", 2, "days")]
	#[case("y", 2, "ys")]
	fn test_pluralize_word(#[case] word: &str, #[case] count: i64, #[case] expected: &str) {
		assert_eq!(pluralize_word(word, count), expected);
	}

	#[rstest]
	fn test_plural_modifier_uses_integer_value() {
		assert_eq!(apply("plural", "1", None), "1");
		assert_eq!(apply("plural", 2, None), "2s");
	}

	#[rstest]
	#[case("Hello World", Some("5"), "Hello...")]
	#[case("Hello", Some("5"), "Hello")]
	#[case("héllo wörld", Some("4"), "héll...")]
	#[case("short", Some("abc"), "short")]
	#[case("abc", Some("-1"), "...")]
	fn test_truncate(#[case] input: &str, #[case] argument: Option<&str>, #[case] expected: &str) {
		assert_eq!(apply("truncate", input, argument), expected);
	}

	#[rstest]
	fn test_truncate_default_length() {
		let long = "x".repeat(60);
		let expected = format!("{}...", "x".repeat(50));
		assert_eq!(apply("truncate", long.as_str(), None), expected);
	}

	#[rstest]
	fn test_default_modifier() {
		assert_eq!(apply("default", "", Some("N/A")), "N/A");
		assert_eq!(apply("default", "value", None), "value");
	}

	#[rstest]
	fn test_unknown_modifier_returns_text() {
		assert_eq!(apply("sparkle", "text", Some("arg")), "text");
	}

	#[rstest]
	fn test_register_overrides_builtin() {
		// Arrange
		let mut table = ModifierTable::builtin();
		table.register("Upper", |ctx: &ModifierContext<'_>| format!("<{}>", ctx.text));
		let value = ParamValue::from("x");

		// Act
		let result = table.apply(
			"UPPER",
			&ModifierContext {
				value: &value,
				text: "x",
				argument: None,
				locale: "en",
			},
		);

		// Assert
		assert_eq!(result, "<x>");
		assert!(table.contains("uppercase"));
	}
}
