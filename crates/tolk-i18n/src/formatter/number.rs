//! Locale-independent number rendering
//!
//! Thousands are grouped with `,` and the decimal separator is `.`.

const MAX_DECIMALS: usize = 15;

/// Currency symbols known without a locale-aware formatter.
const CURRENCY_SYMBOLS: &[(&str, &str)] = &[
	("USD", "$"),
	("EUR", "€"),
	("GBP", "£"),
	("JPY", "¥"),
	("CAD", "C$"),
	("AUD", "A$"),
	("CHF", "CHF"),
	("CNY", "¥"),
	("MXN", "$"),
	("BRL", "R$"),
];

/// Render `value` with `decimals` fractional digits and grouped thousands.
///
/// Halves round away from zero.
///
/// # Examples
///
/// ```
/// use tolk_i18n::formatter::number_format;
///
/// assert_eq!(number_format(1234567.891, 2), "1,234,567.89");
/// assert_eq!(number_format(2.5, 0), "3");
/// assert_eq!(number_format(-1234.5, 1), "-1,234.5");
/// ```
pub fn number_format(value: f64, decimals: usize) -> String {
	let decimals = decimals.min(MAX_DECIMALS);
	let factor = 10f64.powi(decimals as i32);
	let scaled = (value.abs() * factor).round();
	let magnitude = if scaled.is_finite() {
		scaled / factor
	} else {
		value.abs()
	};

	let fixed = format!("{:.*}", decimals, magnitude);
	let (integer, fraction) = fixed.split_once('.').unwrap_or((&fixed, ""));

	let mut out = String::with_capacity(fixed.len() + integer.len() / 3 + 1);
	if value.is_sign_negative() && magnitude != 0.0 {
		out.push('-');
	}
	out.push_str(&group_thousands(integer));
	if !fraction.is_empty() {
		out.push('.');
		out.push_str(fraction);
	}
	out
}

fn group_thousands(digits: &str) -> String {
	let len = digits.len();
	let mut out = String::with_capacity(len + len / 3);
	for (index, ch) in digits.chars().enumerate() {
		if index > 0 && (len - index) % 3 == 0 {
			out.push(',');
		}
		out.push(ch);
	}
	out
}

/// Symbol for an ISO currency code; unknown codes are their own symbol.
pub fn currency_symbol(code: &str) -> &str {
	CURRENCY_SYMBOLS
		.iter()
		.find(|(known, _)| *known == code)
		.map(|(_, symbol)| *symbol)
		.unwrap_or(code)
}

/// `symbol` + two-decimal amount.
pub fn currency_format(value: f64, code: &str) -> String {
	format!("{}{}", currency_symbol(code), number_format(value, 2))
}

/// Value times 100 with two decimals and a `%` suffix.
pub fn percent_format(value: f64) -> String {
	format!("{}%", number_format(value * 100.0, 2))
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	#[case(0.0, 0, "0")]
	#[case(999.0, 0, "999")]
	#[case(1000.0, 0, "1,000")]
	#[case(1234567.0, 0, "1,234,567")]
	#[case(1234.5678, 2, "1,234.57")]
	#[case(0.5, 0, "1")]
	#[case(-0.5, 0, "-1")]
	#[case(-0.001, 2, "0.00")]
	#[case(12.0, 3, "12.000")]
	#[case(-987654.321, 1, "-987,654.3")]
	fn test_number_format(#[case] value: f64, #[case] decimals: usize, #[case] expected: &str) {
		assert_eq!(number_format(value, decimals), expected);
	}

	#[rstest]
	#[case(9.5, "EUR", "€9.50")]
	#[case(1234.0, "USD", "$1,234.00")]
	#[case(10.0, "BRL", "R$10.00")]
	#[case(3.0, "SEK", "SEK3.00")]
	#[case(-9.5, "USD", "$-9.50")]
	fn test_currency_format(#[case] value: f64, #[case] code: &str, #[case] expected: &str) {
		assert_eq!(currency_format(value, code), expected);
	}

	#[rstest]
	#[case(0.25, "25.00%")]
	#[case(1.0, "100.00%")]
	#[case(0.1234, "12.34%")]
	fn test_percent_format(#[case] value: f64, #[case] expected: &str) {
		assert_eq!(percent_format(value), expected);
	}
}
