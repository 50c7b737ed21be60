//! Placeholder substitution
//!
//! For every replacement, in insertion order, [`MessageFormatter::format`]
//! rewrites:
//!
//! - `:key` with the value's canonical string
//! - `:KEY` with the canonical string uppercased
//! - `:Key` with the canonical string's first letter uppercased
//! - `{key}`, `{key|modifier}` and `{key|modifier:argument}` through the
//!   [`ModifierTable`]
//!
//! Formatting never fails. Values a modifier cannot handle fall back to their
//! canonical string.

pub mod dateformat;
mod modifiers;
mod number;
mod value;

pub use modifiers::{ModifierContext, ModifierFn, ModifierTable};
pub use number::{currency_format, currency_symbol, number_format, percent_format};
pub use value::{ParamValue, Replacements};

use modifiers::upper_first;
use regex::{Captures, Regex};

/// Renders message templates with replacement values.
///
/// # Example
/// ```
/// use tolk_i18n::{MessageFormatter, Replacements};
///
/// let formatter = MessageFormatter::new();
/// let replacements = Replacements::new().with("name", "john").with("amount", 9.5);
///
/// assert_eq!(
///     formatter.format("Hello :Name, you owe {amount|currency:EUR}", &replacements, "en"),
///     "Hello John, you owe €9.50"
/// );
/// ```
#[derive(Debug, Clone, Default)]
pub struct MessageFormatter {
	modifiers: ModifierTable,
}

impl MessageFormatter {
	/// A formatter with the built-in modifiers.
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_modifiers(modifiers: ModifierTable) -> Self {
		Self { modifiers }
	}

	/// Add or override a modifier. Names are case-insensitive.
	pub fn register_modifier<F>(&mut self, name: &str, modifier: F) -> &mut Self
	where
		F: Fn(&ModifierContext<'_>) -> String + Send + Sync + 'static,
	{
		self.modifiers.register(name, modifier);
		self
	}

	pub fn modifiers(&self) -> &ModifierTable {
		&self.modifiers
	}

	/// Substitute `replacements` into `template`.
	///
	/// Returns the template unchanged when there are no replacements.
	pub fn format(&self, template: &str, replacements: &Replacements, locale: &str) -> String {
		if replacements.is_empty() {
			return template.to_string();
		}

		let mut message = template.to_string();
		for (key, value) in replacements.iter() {
			if key.is_empty() {
				continue;
			}
			message = self.replace_parameter(&message, key, value, locale);
		}
		message
	}

	fn replace_parameter(&self, message: &str, key: &str, value: &ParamValue, locale: &str) -> String {
		let text = value.to_canonical_string();

		let mut message = message.replace(&format!(":{}", key), &text);
		message = message.replace(&format!(":{}", key.to_uppercase()), &text.to_uppercase());
		message = message.replace(&format!(":{}", upper_first(key)), &upper_first(&text));

		if !message.contains('{') {
			return message;
		}
		self.replace_braced(&message, key, value, &text, locale)
	}

	fn replace_braced(
		&self,
		message: &str,
		key: &str,
		value: &ParamValue,
		text: &str,
		locale: &str,
	) -> String {
		let pattern = format!(
			r"\{{{}(?:\|([A-Za-z_]+)(?::([^}}]+))?)?\}}",
			regex::escape(key)
		);
		let Ok(re) = Regex::new(&pattern) else {
			tracing::warn!(key, "placeholder pattern could not be compiled");
			return message.to_string();
		};

		re.replace_all(message, |caps: &Captures<'_>| match caps.get(1) {
			None => text.to_string(),
			Some(name) => self.modifiers.apply(
				name.as_str(),
				&ModifierContext {
					value,
					text,
					argument: caps.get(2).map(|m| m.as_str()),
					locale,
				},
			),
		})
		.into_owned()
	}
}
