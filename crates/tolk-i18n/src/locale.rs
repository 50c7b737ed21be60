//! Locale validation, normalization and detection

use crate::error::{I18nError, I18nResult};
use indexmap::IndexSet;
use parking_lot::RwLock;
use std::fmt;
use std::sync::Arc;

/// Validate locale string format.
///
/// A locale is non-empty and made of ASCII letters, digits, `-` and `_`.
pub fn validate_locale(locale: &str) -> I18nResult<()> {
	if locale.is_empty() {
		return Err(I18nError::InvalidLocale(
			"Locale cannot be empty".to_string(),
		));
	}

	if !locale
		.chars()
		.all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
	{
		return Err(I18nError::InvalidLocale(locale.to_string()));
	}

	Ok(())
}

/// Lowercase a tag and use `-` as the subtag separator.
///
/// ```
/// use tolk_i18n::locale::normalize_locale;
///
/// assert_eq!(normalize_locale(" pt_BR "), "pt-br");
/// ```
pub fn normalize_locale(locale: &str) -> String {
	locale.trim().to_ascii_lowercase().replace('_', "-")
}

/// The language subtag of a locale: `en` for `en-US` or `en_GB`.
pub fn primary_subtag(locale: &str) -> &str {
	locale
		.split(['-', '_'])
		.next()
		.unwrap_or(locale)
}

/// Native display name of a language, or the code itself when unknown.
pub fn locale_name(locale: &str) -> &str {
	match locale {
		"en" => "English",
		"es" => "Español",
		"fr" => "Français",
		"de" => "Deutsch",
		"it" => "Italiano",
		"pt" => "Português",
		"ru" => "Русский",
		"ja" => "日本語",
		"ko" => "한국어",
		"zh" => "中文",
		"ar" => "العربية",
		"hi" => "हिन्दी",
		"nl" => "Nederlands",
		"pl" => "Polski",
		"tr" => "Türkçe",
		other => other,
	}
}

/// A source of the locale a caller prefers (URL, header, session, ...).
pub trait LocaleDetector: Send + Sync {
	/// Short name used in log output.
	fn name(&self) -> &str {
		"detector"
	}

	/// The preferred locale, if this source has an opinion.
	fn detect(&self) -> Option<String>;
}

impl<F> LocaleDetector for F
where
	F: Fn() -> Option<String> + Send + Sync,
{
	fn detect(&self) -> Option<String> {
		self()
	}
}

/// Tracks the supported locales and picks the active one.
///
/// # Example
/// ```
/// use tolk_i18n::LocaleManager;
///
/// let manager = LocaleManager::new("en", ["en", "es", "pt-br"], "en");
/// manager.add_detector(|| Some("es_MX".to_string()));
///
/// assert_eq!(manager.detect(), "es");
/// assert!(manager.set_locale("pt_BR").is_ok());
/// assert_eq!(manager.current_locale(), "pt-br");
/// assert!(manager.set_locale("ja").is_err());
/// ```
pub struct LocaleManager {
	default_locale: String,
	fallback_locale: String,
	supported: RwLock<IndexSet<String>>,
	detectors: RwLock<Vec<Arc<dyn LocaleDetector>>>,
	current: RwLock<Option<String>>,
}

impl LocaleManager {
	pub fn new<I, S>(default_locale: &str, supported: I, fallback_locale: &str) -> Self
	where
		I: IntoIterator<Item = S>,
		S: AsRef<str>,
	{
		Self {
			default_locale: normalize_locale(default_locale),
			fallback_locale: normalize_locale(fallback_locale),
			supported: RwLock::new(
				supported
					.into_iter()
					.map(|locale| normalize_locale(locale.as_ref()))
					.collect(),
			),
			detectors: RwLock::new(Vec::new()),
			current: RwLock::new(None),
		}
	}

	pub fn default_locale(&self) -> &str {
		&self.default_locale
	}

	pub fn fallback_locale(&self) -> &str {
		&self.fallback_locale
	}

	pub fn supported_locales(&self) -> Vec<String> {
		self.supported.read().iter().cloned().collect()
	}

	pub fn add_supported_locale(&self, locale: &str) {
		self.supported.write().insert(normalize_locale(locale));
	}

	/// Append a detector; detectors are consulted in registration order.
	pub fn add_detector(&self, detector: impl LocaleDetector + 'static) {
		self.add_shared_detector(Arc::new(detector));
	}

	/// [`add_detector`](Self::add_detector) for a detector that is already shared.
	pub fn add_shared_detector(&self, detector: Arc<dyn LocaleDetector>) {
		self.detectors.write().push(detector);
	}

	/// Map a tag onto the supported set.
	///
	/// Returns the normalized tag when it is supported, else its primary
	/// subtag when that is, else the normalized tag.
	pub fn normalize(&self, locale: &str) -> String {
		let normalized = normalize_locale(locale);
		let supported = self.supported.read();
		if supported.contains(&normalized) {
			return normalized;
		}

		let primary = primary_subtag(&normalized);
		if supported.contains(primary) {
			return primary.to_string();
		}
		normalized
	}

	pub fn is_supported(&self, locale: &str) -> bool {
		self.supported.read().contains(&normalize_locale(locale))
	}

	/// The active locale, running detection if none is set yet.
	///
	/// The first detector whose answer normalizes to a supported locale wins;
	/// otherwise the default locale is used. The result is kept until
	/// [`set_locale`](Self::set_locale) or [`reset`](Self::reset).
	pub fn detect(&self) -> String {
		if let Some(current) = self.current.read().as_ref() {
			return current.clone();
		}

		let detected = self
			.detectors
			.read()
			.iter()
			.find_map(|detector| {
				let candidate = self.normalize(&detector.detect()?);
				if self.is_supported(&candidate) {
					tracing::debug!(detector = detector.name(), locale = %candidate, "locale detected");
					Some(candidate)
				} else {
					None
				}
			})
			.unwrap_or_else(|| self.default_locale.clone());

		*self.current.write() = Some(detected.clone());
		detected
	}

	pub fn current_locale(&self) -> String {
		self.detect()
	}

	/// Make `locale` the active locale.
	///
	/// # Errors
	///
	/// [`I18nError::InvalidLocale`] for a malformed tag and
	/// [`I18nError::UnsupportedLocale`] for one outside the supported set.
	pub fn set_locale(&self, locale: &str) -> I18nResult<()> {
		validate_locale(locale.trim())?;

		let normalized = self.normalize(locale);
		if !self.is_supported(&normalized) {
			return Err(I18nError::UnsupportedLocale(locale.to_string()));
		}

		*self.current.write() = Some(normalized);
		Ok(())
	}

	/// Forget the active locale so the next call detects again.
	pub fn reset(&self) {
		*self.current.write() = None;
	}
}

impl fmt::Debug for LocaleManager {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("LocaleManager")
			.field("default_locale", &self.default_locale)
			.field("fallback_locale", &self.fallback_locale)
			.field("supported", &*self.supported.read())
			.field("detectors", &self.detectors.read().len())
			.field("current", &*self.current.read())
			.finish()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::{fixture, rstest};

	struct Fixed(&'static str);

	impl LocaleDetector for Fixed {
		fn name(&self) -> &str {
			"fixed"
		}

		fn detect(&self) -> Option<String> {
			Some(self.0.to_string())
		}
	}

	#[fixture]
	fn manager() -> LocaleManager {
		LocaleManager::new("en", ["en", "es", "fr", "pt-BR"], "en")
	}

	#[rstest]
	#[case("en")]
	#[case("pt_BR")]
	#[case("zh-Hant-TW")]
	fn test_validate_locale_accepts(#[case] locale: &str) {
		assert!(validate_locale(locale).is_ok());
	}

	#[rstest]
	#[case("")]
	#[case("en US")]
	#[case("en/../../etc")]
	#[case("fr.utf8")]
	fn test_validate_locale_rejects(#[case] locale: &str) {
		assert!(matches!(
			validate_locale(locale),
			Err(I18nError::InvalidLocale(_))
		));
	}

	#[rstest]
	#[case("EN", "en")]
	#[case("en_US", "en")]
	#[case("es-419", "es")]
	#[case("PT_br", "pt-br")]
	#[case("ja", "ja")]
	fn test_normalize(manager: LocaleManager, #[case] input: &str, #[case] expected: &str) {
		assert_eq!(manager.normalize(input), expected);
	}

	#[rstest]
	fn test_primary_subtag() {
		assert_eq!(primary_subtag("en-US"), "en");
		assert_eq!(primary_subtag("en_GB"), "en");
		assert_eq!(primary_subtag("fr"), "fr");
	}

	#[rstest]
	fn test_detect_first_supported_wins(manager: LocaleManager) {
		// Arrange
		manager.add_detector(|| None::<String>);
		manager.add_detector(Fixed("xx"));
		manager.add_detector(Fixed("fr-CA"));
		manager.add_detector(Fixed("es"));

		// Act
		let detected = manager.detect();

		// Assert
		assert_eq!(detected, "fr");
	}

	#[rstest]
	fn test_detect_defaults_when_nothing_matches(manager: LocaleManager) {
		manager.add_detector(Fixed("de"));
		assert_eq!(manager.detect(), "en");
	}

	#[rstest]
	fn test_detect_is_remembered_until_reset(manager: LocaleManager) {
		// Arrange
		manager.add_detector(Fixed("es"));
		assert_eq!(manager.current_locale(), "es");

		// Act
		manager.set_locale("fr").unwrap();
		let after_set = manager.current_locale();
		manager.reset();
		let after_reset = manager.current_locale();

		// Assert
		assert_eq!(after_set, "fr");
		assert_eq!(after_reset, "es");
	}

	#[rstest]
	fn test_set_locale_errors(manager: LocaleManager) {
		assert!(matches!(
			manager.set_locale("de"),
			Err(I18nError::UnsupportedLocale(locale)) if locale == "de"
		));
		assert!(matches!(
			manager.set_locale("e n"),
			Err(I18nError::InvalidLocale(_))
		));
	}

	#[rstest]
	fn test_add_supported_locale(manager: LocaleManager) {
		manager.add_supported_locale("DE");
		assert!(manager.is_supported("de"));
		assert!(manager.set_locale("de").is_ok());
		assert_eq!(manager.supported_locales().last().map(String::as_str), Some("de"));
	}

	#[rstest]
	#[case("ja", "日本語")]
	#[case("de", "Deutsch")]
	#[case("xx", "xx")]
	fn test_locale_name(#[case] locale: &str, #[case] expected: &str) {
		assert_eq!(locale_name(locale), expected);
	}
}
