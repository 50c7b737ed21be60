//! Plural form selection

use super::forms::{PluralForm, parse_forms};
use super::rules::category;
use std::fmt;

/// Placeholder substituted with the count in the selected form.
const COUNT_PLACEHOLDER: &str = ":count";

/// Numeric count used for plural selection.
///
/// Integers render without a decimal point.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct PluralCount(pub f64);

impl PluralCount {
	pub fn value(&self) -> f64 {
		self.0
	}

	/// Whether the count has no fractional part.
	pub fn is_integral(&self) -> bool {
		self.0.is_finite() && self.0.fract() == 0.0
	}
}

impl fmt::Display for PluralCount {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		if self.0 == 0.0 {
			// -0.0 renders as "0"
			f.write_str("0")
		} else {
			write!(f, "{}", self.0)
		}
	}
}

macro_rules! impl_count_from {
	($($ty:ty),*) => {
		$(
			impl From<$ty> for PluralCount {
				fn from(value: $ty) -> Self {
					Self(value as f64)
				}
			}
		)*
	};
}

impl_count_from!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64);

/// Selects the grammatically correct form of a plural message.
///
/// Selection order: explicit count (`{N}`), range (`[min,max]`), CLDR category
/// (`one:`), then positional singular/plural. `:count` in the selected form is
/// replaced with the count.
///
/// # Example
/// ```
/// use tolk_i18n::Pluralizer;
///
/// let pluralizer = Pluralizer::new();
/// let message = "{0} No apples|one: One apple|other: :count apples";
///
/// assert_eq!(pluralizer.choose(message, 0, "en"), "No apples");
/// assert_eq!(pluralizer.choose(message, 1, "en"), "One apple");
/// assert_eq!(pluralizer.choose(message, 7, "en"), "7 apples");
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct Pluralizer;

impl Pluralizer {
	pub fn new() -> Self {
		Self
	}

	/// Choose the form of `message` that applies to `count` in `locale`.
	///
	/// A message made of a single unprefixed form is returned unchanged.
	pub fn choose(&self, message: &str, count: impl Into<PluralCount>, locale: &str) -> String {
		let count = count.into();
		let forms = parse_forms(message);

		if let [only] = forms.as_slice()
			&& only.is_positional()
		{
			return message.to_string();
		}

		let chosen = Self::select(&forms, count, locale);
		chosen.replace(COUNT_PLACEHOLDER, &count.to_string())
	}

	fn select<'a>(forms: &'a [PluralForm], count: PluralCount, locale: &str) -> &'a str {
		let n = count.value();

		if let Some(form) = forms.iter().find(|form| form.matches_explicit(n)) {
			return &form.fragment;
		}

		if let Some(form) = forms.iter().find(|form| form.matches_range(n)) {
			return &form.fragment;
		}

		let category = category(locale, n);
		if let Some(form) = forms.iter().find(|form| form.matches_category(category)) {
			return &form.fragment;
		}

		Self::positional(forms, n)
	}

	/// Index 0 for a count of one, index 1 otherwise, clamped to the last form.
	fn positional(forms: &[PluralForm], count: f64) -> &str {
		let index = if count == 1.0 { 0 } else { 1 };
		forms
			.get(index)
			.or_else(|| forms.last())
			.map(|form| form.fragment.as_str())
			.unwrap_or_default()
	}
}
