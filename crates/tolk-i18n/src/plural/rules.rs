//! CLDR plural categories and per-language rule families
//!
//! Every `(locale, count)` pair maps to exactly one [`PluralCategory`]. Only the
//! first two letters of the locale are significant, and the comparison is done
//! on the lowercased code.

use std::fmt;
use std::str::FromStr;

/// CLDR plural category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PluralCategory {
	Zero,
	One,
	Two,
	Few,
	Many,
	Other,
}

impl PluralCategory {
	/// All categories in CLDR order.
	pub const ALL: [PluralCategory; 6] = [
		Self::Zero,
		Self::One,
		Self::Two,
		Self::Few,
		Self::Many,
		Self::Other,
	];

	/// Lowercase CLDR label.
	pub fn as_str(&self) -> &'static str {
		match self {
			Self::Zero => "zero",
			Self::One => "one",
			Self::Two => "two",
			Self::Few => "few",
			Self::Many => "many",
			Self::Other => "other",
		}
	}
}

impl fmt::Display for PluralCategory {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Error returned when a label is not a CLDR category.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown plural category: {0}")]
pub struct UnknownCategory(pub String);

impl FromStr for PluralCategory {
	type Err = UnknownCategory;

	/// Parses a category label, ignoring ASCII case.
	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Self::ALL
			.into_iter()
			.find(|category| category.as_str().eq_ignore_ascii_case(s))
			.ok_or_else(|| UnknownCategory(s.to_string()))
	}
}

/// CLDR operands derived from a count.
///
/// - `n`: absolute value
/// - `i`: integer digits of `n`
/// - `v`: number of visible fraction digits
/// - `f`: visible fraction digits as an integer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PluralOperands {
	pub n: f64,
	pub i: u64,
	pub v: usize,
	pub f: u64,
}

impl PluralOperands {
	/// Compute operands from a numeric count.
	///
	/// Fraction digits are read from the shortest decimal rendering of the
	/// value, so `1.5` has `v == 1` and `2.0` has `v == 0`.
	pub fn from_count(count: f64) -> Self {
		let n = count.abs();
		let i = n.trunc() as u64;
		let rendered = n.to_string();
		let (v, f) = match rendered.split_once('.') {
			Some((_, fraction)) => (fraction.len(), fraction.parse::<u64>().unwrap_or(0)),
			None => (0, 0),
		};

		Self { n, i, v, f }
	}
}

/// Plural rule family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PluralRule {
	/// English, German, Dutch, Spanish, Italian and the default: `one` for 1.
	OneOther,
	/// French, Portuguese: `one` for 0 <= n < 2.
	OneIncludingZero,
	/// Polish: `one`, `few`, `other`.
	Polish,
	/// Russian, Ukrainian, Belarusian, Serbian, Croatian.
	Slavic,
	/// Czech, Slovak.
	Czech,
	/// Romanian, Moldavian.
	Romanian,
	/// Arabic: all six categories.
	Arabic,
	/// Welsh: exact matches only.
	Welsh,
	/// Japanese, Korean, Chinese, Thai, Vietnamese and similar: always `other`.
	NoPlural,
}

impl PluralRule {
	/// Select the rule family for a locale.
	///
	/// Only the first two characters of the locale are inspected, so `pt_BR`,
	/// `pt-PT` and `pt` all use the same rule.
	pub fn for_locale(locale: &str) -> Self {
		let lang: String = locale
			.chars()
			.take(2)
			.map(|c| c.to_ascii_lowercase())
			.collect();

		match lang.as_str() {
			"pl" => Self::Polish,
			"ru" | "uk" | "be" | "sr" | "hr" => Self::Slavic,
			"cs" | "sk" => Self::Czech,
			"ro" | "mo" => Self::Romanian,
			"ar" => Self::Arabic,
			"cy" => Self::Welsh,
			"fr" | "pt" => Self::OneIncludingZero,
			"ja" | "ko" | "zh" | "th" | "vi" | "id" | "ms" | "lo" | "bo" | "dz" | "km" => {
				Self::NoPlural
			}
			_ => Self::OneOther,
		}
	}

	/// Apply the rule to a set of operands. Predicates are tested in order.
	pub fn category(&self, ops: &PluralOperands) -> PluralCategory {
		let PluralOperands { n, i, v, .. } = *ops;
		let i10 = i % 10;
		let i100 = i % 100;

		match self {
			Self::OneOther => {
				if n == 1.0 {
					PluralCategory::One
				} else {
					PluralCategory::Other
				}
			}
			Self::OneIncludingZero => {
				if (0.0..2.0).contains(&n) {
					PluralCategory::One
				} else {
					PluralCategory::Other
				}
			}
			Self::Polish => {
				if v == 0 && i == 1 {
					PluralCategory::One
				} else if v == 0 && (2..=4).contains(&i10) && !(12..=14).contains(&i100) {
					PluralCategory::Few
				} else {
					PluralCategory::Other
				}
			}
			Self::Slavic => {
				if v == 0 && i10 == 1 && i100 != 11 {
					PluralCategory::One
				} else if v == 0 && (2..=4).contains(&i10) && !(12..=14).contains(&i100) {
					PluralCategory::Few
				} else {
					PluralCategory::Other
				}
			}
			Self::Czech => {
				if i == 1 && v == 0 {
					PluralCategory::One
				} else if (2..=4).contains(&i) && v == 0 {
					PluralCategory::Few
				} else {
					PluralCategory::Other
				}
			}
			Self::Romanian => {
				if i == 1 && v == 0 {
					PluralCategory::One
				} else if v != 0 || i == 0 || (2..=19).contains(&i100) {
					PluralCategory::Few
				} else {
					PluralCategory::Other
				}
			}
			Self::Arabic => {
				if n == 0.0 {
					PluralCategory::Zero
				} else if n == 1.0 {
					PluralCategory::One
				} else if n == 2.0 {
					PluralCategory::Two
				} else if (3..=10).contains(&i100) {
					PluralCategory::Few
				} else if i100 >= 11 {
					PluralCategory::Many
				} else {
					PluralCategory::Other
				}
			}
			Self::Welsh => {
				if n == 0.0 {
					PluralCategory::Zero
				} else if n == 1.0 {
					PluralCategory::One
				} else if n == 2.0 {
					PluralCategory::Two
				} else if n == 3.0 {
					PluralCategory::Few
				} else if n == 6.0 {
					PluralCategory::Many
				} else {
					PluralCategory::Other
				}
			}
			Self::NoPlural => PluralCategory::Other,
		}
	}
}

/// Map a locale and count to its CLDR plural category.
///
/// # Example
/// ```
/// use tolk_i18n::plural::{category, PluralCategory};
///
/// assert_eq!(category("en", 1.0), PluralCategory::One);
/// assert_eq!(category("ru", 22.0), PluralCategory::Few);
/// assert_eq!(category("ar", 0.0), PluralCategory::Zero);
/// assert_eq!(category("ja", 1.0), PluralCategory::Other);
/// ```
pub fn category(locale: &str, count: f64) -> PluralCategory {
	PluralRule::for_locale(locale).category(&PluralOperands::from_count(count))
}

#[cfg(test)]
mod tests {
	use super::*;
	use proptest::prelude::*;
	use rstest::rstest;

	#[rstest]
	#[case(1.0, PluralCategory::One)]
	#[case(2.0, PluralCategory::Few)]
	#[case(4.0, PluralCategory::Few)]
	#[case(5.0, PluralCategory::Other)]
	#[case(11.0, PluralCategory::Other)]
	#[case(12.0, PluralCategory::Other)]
	#[case(14.0, PluralCategory::Other)]
	#[case(21.0, PluralCategory::One)]
	#[case(22.0, PluralCategory::Few)]
	#[case(100.0, PluralCategory::Other)]
	#[case(111.0, PluralCategory::Other)]
	#[case(121.0, PluralCategory::One)]
	#[case(1.5, PluralCategory::Other)]
	fn test_slavic_boundaries(#[case] count: f64, #[case] expected: PluralCategory) {
		// Act
		let result = category("ru", count);

		// Assert
		assert_eq!(result, expected, "ru category for count={}", count);
	}

	#[rstest]
	#[case("uk")]
	#[case("be")]
	#[case("sr")]
	#[case("hr")]
	#[case("ru-RU")]
	#[case("RU")]
	fn test_slavic_family_membership(#[case] locale: &str) {
		assert_eq!(PluralRule::for_locale(locale), PluralRule::Slavic);
	}

	#[rstest]
	#[case(1.0, PluralCategory::One)]
	#[case(2.0, PluralCategory::Few)]
	#[case(5.0, PluralCategory::Other)]
	#[case(12.0, PluralCategory::Other)]
	#[case(21.0, PluralCategory::Other)]
	#[case(22.0, PluralCategory::Few)]
	#[case(0.0, PluralCategory::Other)]
	fn test_polish(#[case] count: f64, #[case] expected: PluralCategory) {
		assert_eq!(category("pl", count), expected, "pl count={}", count);
	}

	#[rstest]
	#[case(1.0, PluralCategory::One)]
	#[case(2.0, PluralCategory::Few)]
	#[case(4.0, PluralCategory::Few)]
	#[case(5.0, PluralCategory::Other)]
	#[case(0.0, PluralCategory::Other)]
	#[case(1.5, PluralCategory::Other)]
	fn test_czech(#[case] count: f64, #[case] expected: PluralCategory) {
		assert_eq!(category("cs", count), expected);
		assert_eq!(category("sk", count), expected);
	}

	#[rstest]
	#[case(1.0, PluralCategory::One)]
	#[case(0.0, PluralCategory::Few)]
	#[case(2.0, PluralCategory::Few)]
	#[case(19.0, PluralCategory::Few)]
	#[case(20.0, PluralCategory::Other)]
	#[case(102.0, PluralCategory::Few)]
	#[case(1.5, PluralCategory::Few)]
	fn test_romanian(#[case] count: f64, #[case] expected: PluralCategory) {
		assert_eq!(category("ro", count), expected);
	}

	#[rstest]
	#[case(0.0, PluralCategory::Zero)]
	#[case(1.0, PluralCategory::One)]
	#[case(2.0, PluralCategory::Two)]
	#[case(3.0, PluralCategory::Few)]
	#[case(10.0, PluralCategory::Few)]
	#[case(11.0, PluralCategory::Many)]
	#[case(99.0, PluralCategory::Many)]
	#[case(100.0, PluralCategory::Other)]
	#[case(102.0, PluralCategory::Other)]
	#[case(103.0, PluralCategory::Few)]
	fn test_arabic(#[case] count: f64, #[case] expected: PluralCategory) {
		assert_eq!(category("ar", count), expected);
	}

	#[rstest]
	#[case(0.0, PluralCategory::Zero)]
	#[case(1.0, PluralCategory::One)]
	#[case(2.0, PluralCategory::Two)]
	#[case(3.0, PluralCategory::Few)]
	#[case(6.0, PluralCategory::Many)]
	#[case(4.0, PluralCategory::Other)]
	#[case(5.0, PluralCategory::Other)]
	fn test_welsh(#[case] count: f64, #[case] expected: PluralCategory) {
		assert_eq!(category("cy", count), expected);
	}

	#[rstest]
	#[case("fr", 0.0, PluralCategory::One)]
	#[case("fr", 1.0, PluralCategory::One)]
	#[case("fr", 1.5, PluralCategory::One)]
	#[case("fr", 2.0, PluralCategory::Other)]
	#[case("pt_BR", 0.0, PluralCategory::One)]
	#[case("en", 0.0, PluralCategory::Other)]
	#[case("en", 1.0, PluralCategory::One)]
	#[case("en", -1.0, PluralCategory::One)]
	#[case("en", 2.0, PluralCategory::Other)]
	#[case("de", 1.0, PluralCategory::One)]
	#[case("es", 100.0, PluralCategory::Other)]
	fn test_one_other_families(
		#[case] locale: &str,
		#[case] count: f64,
		#[case] expected: PluralCategory,
	) {
		assert_eq!(category(locale, count), expected, "{}:{}", locale, count);
	}

	#[rstest]
	#[case("ja")]
	#[case("ko")]
	#[case("zh")]
	#[case("th")]
	#[case("vi")]
	#[case("id")]
	fn test_no_plural_always_other(#[case] locale: &str) {
		for count in [0.0, 1.0, 2.0, 5.0, 21.0] {
			assert_eq!(category(locale, count), PluralCategory::Other);
		}
	}

	#[rstest]
	#[case(1.0, 1, 0, 0)]
	#[case(1.5, 1, 1, 5)]
	#[case(-2.25, 2, 2, 25)]
	#[case(0.0, 0, 0, 0)]
	fn test_operands(#[case] count: f64, #[case] i: u64, #[case] v: usize, #[case] f: u64) {
		// Act
		let ops = PluralOperands::from_count(count);

		// Assert
		assert_eq!(ops.n, count.abs());
		assert_eq!(ops.i, i);
		assert_eq!(ops.v, v);
		assert_eq!(ops.f, f);
	}

	#[rstest]
	#[case("one", PluralCategory::One)]
	#[case("OTHER", PluralCategory::Other)]
	#[case("Few", PluralCategory::Few)]
	fn test_category_from_str(#[case] label: &str, #[case] expected: PluralCategory) {
		assert_eq!(label.parse::<PluralCategory>().unwrap(), expected);
	}

	#[rstest]
	fn test_category_from_str_rejects_unknown() {
		assert!("several".parse::<PluralCategory>().is_err());
	}

	proptest! {
		#[test]
		fn prop_every_count_has_a_category(
			locale in prop::sample::select(vec!["en", "fr", "pl", "ru", "cs", "ro", "ar", "cy", "ja", "xx"]),
			count in -1.0e9f64..1.0e9f64,
		) {
			let result = category(locale, count);
			prop_assert!(PluralCategory::ALL.contains(&result));
		}
	}
}
