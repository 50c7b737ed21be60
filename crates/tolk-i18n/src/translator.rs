//! Key resolution with locale fallback
//!
//! [`Translator`] lazily loads one bundle per (namespace, group, locale) from
//! every registered [`Loader`], deep-merging the non-empty results in
//! registration order. A bundle is remembered even when every loader came
//! back empty, so absent bundles are not reloaded.
//!
//! Resolution tries the requested locale, then the fallback locale once.
//! Unresolved keys come back unchanged.

use crate::formatter::{MessageFormatter, ParamValue, Replacements};
use crate::key::{BundleId, TranslationKey};
use crate::loader::Loader;
use crate::plural::{PluralCount, Pluralizer};
use crate::tree::MessageTree;
use indexmap::{IndexMap, IndexSet};
use parking_lot::{Mutex, RwLock};
use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

const COUNT_KEY: &str = "count";

/// A message template and the locale whose bundle supplied it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedMessage {
	pub template: String,
	pub locale: String,
}

/// Resolves translation keys to formatted messages.
///
/// Every method takes `&self`; a translator can be shared across threads
/// behind an `Arc`.
///
/// # Example
/// ```
/// use serde_json::json;
/// use tolk_i18n::{Replacements, StaticLoader, Translator};
///
/// let translator = Translator::new("es", "en").with_loader(
///     StaticLoader::new()
///         .with_bundle("en", "messages", None, json!({ "greeting": "Hello, :name!" }))
///         .with_bundle("es", "messages", None, json!({ "bye": "Adiós" })),
/// );
///
/// let replacements = Replacements::new().with("name", "Yorch");
/// assert_eq!(translator.trans("messages.greeting", &replacements, None), "Hello, Yorch!");
/// assert_eq!(translator.trans("messages.bye", &Replacements::new(), None), "Adiós");
/// assert_eq!(translator.trans("messages.nope", &Replacements::new(), None), "messages.nope");
/// ```
pub struct Translator {
	locale: RwLock<String>,
	fallback_locale: RwLock<String>,
	loaders: RwLock<Vec<Arc<dyn Loader>>>,
	namespaces: RwLock<IndexMap<String, PathBuf>>,
	bundles: RwLock<HashMap<BundleId, MessageTree>>,
	load_lock: Mutex<()>,
	formatter: MessageFormatter,
	pluralizer: Pluralizer,
	track_missing: AtomicBool,
	missing: Mutex<IndexSet<String>>,
}

impl Translator {
	pub fn new(locale: &str, fallback_locale: &str) -> Self {
		Self {
			locale: RwLock::new(normalize(locale)),
			fallback_locale: RwLock::new(normalize(fallback_locale)),
			loaders: RwLock::new(Vec::new()),
			namespaces: RwLock::new(IndexMap::new()),
			bundles: RwLock::new(HashMap::new()),
			load_lock: Mutex::new(()),
			formatter: MessageFormatter::new(),
			pluralizer: Pluralizer::new(),
			track_missing: AtomicBool::new(false),
			missing: Mutex::new(IndexSet::new()),
		}
	}

	/// Replace the formatter, e.g. one with extra modifiers.
	pub fn with_formatter(mut self, formatter: MessageFormatter) -> Self {
		self.formatter = formatter;
		self
	}

	/// Builder-style [`add_loader`](Self::add_loader).
	pub fn with_loader(self, loader: impl Loader + 'static) -> Self {
		self.add_loader(Arc::new(loader));
		self
	}

	/// Register a loader after those already present.
	///
	/// Namespaces registered so far are forwarded to it.
	pub fn add_loader(&self, loader: Arc<dyn Loader>) {
		for (namespace, path) in self.namespaces.read().iter() {
			loader.add_namespace(namespace, path);
		}
		self.loaders.write().push(loader);
	}

	/// Record a namespace path and forward it to every loader.
	pub fn add_namespace(&self, namespace: &str, path: impl AsRef<Path>) {
		let path = path.as_ref();
		self.namespaces
			.write()
			.insert(namespace.to_string(), path.to_path_buf());
		for loader in self.loaders.read().iter() {
			loader.add_namespace(namespace, path);
		}
	}

	/// Registered namespaces in registration order.
	pub fn namespaces(&self) -> IndexMap<String, PathBuf> {
		self.namespaces.read().clone()
	}

	pub fn formatter(&self) -> &MessageFormatter {
		&self.formatter
	}

	pub fn locale(&self) -> String {
		self.locale.read().clone()
	}

	pub fn set_locale(&self, locale: &str) {
		*self.locale.write() = normalize(locale);
	}

	pub fn fallback_locale(&self) -> String {
		self.fallback_locale.read().clone()
	}

	pub fn set_fallback_locale(&self, locale: &str) {
		*self.fallback_locale.write() = normalize(locale);
	}

	/// Enable or disable recording of unresolved keys.
	pub fn set_track_missing(&self, track: bool) {
		self.track_missing.store(track, Ordering::Relaxed);
	}

	pub fn is_tracking_missing(&self) -> bool {
		self.track_missing.load(Ordering::Relaxed)
	}

	/// Unresolved keys as `{locale}.{key}`, unique, in first-seen order.
	pub fn missing_translations(&self) -> Vec<String> {
		self.missing.lock().iter().cloned().collect()
	}

	pub fn clear_missing_translations(&self) {
		self.missing.lock().clear();
	}

	/// Forget every loaded bundle so the next lookup reloads from the loaders.
	pub fn clear_loaded(&self) {
		let _guard = self.load_lock.lock();
		self.bundles.write().clear();
	}

	/// Translate `key`, substituting `replacements`.
	///
	/// Formatting uses the locale whose bundle supplied the message, so a
	/// fallback hit is formatted in the fallback locale. Unresolved keys are
	/// returned as given.
	pub fn trans(&self, key: &str, replacements: &Replacements, locale: Option<&str>) -> String {
		match self.raw(key, locale) {
			Some(resolved) => {
				self.formatter
					.format(&resolved.template, replacements, &resolved.locale)
			}
			None => key.to_string(),
		}
	}

	/// Translate a plural message for `count`.
	///
	/// The raw template goes through the [`Pluralizer`] before any
	/// substitution, then `replacements` plus `count` are applied.
	///
	/// # Example
	/// ```
	/// use serde_json::json;
	/// use tolk_i18n::{Replacements, StaticLoader, Translator};
	///
	/// let translator = Translator::new("en", "en").with_loader(StaticLoader::new().with_bundle(
	///     "en",
	///     "cart",
	///     None,
	///     json!({ "items": "{0} Your cart is empty|one: One item for :name|other: :count items for :name" }),
	/// ));
	/// let replacements = Replacements::new().with("name", "Ada");
	///
	/// assert_eq!(translator.choice("cart.items", 0, &replacements, None), "Your cart is empty");
	/// assert_eq!(translator.choice("cart.items", 1, &replacements, None), "One item for Ada");
	/// assert_eq!(translator.choice("cart.items", 3, &replacements, None), "3 items for Ada");
	/// ```
	pub fn choice(
		&self,
		key: &str,
		count: impl Into<PluralCount>,
		replacements: &Replacements,
		locale: Option<&str>,
	) -> String {
		let count = count.into();
		let Some(resolved) = self.raw(key, locale) else {
			return key.to_string();
		};

		let chosen = self
			.pluralizer
			.choose(&resolved.template, count, &resolved.locale);

		let mut replacements = replacements.clone();
		replacements.insert(COUNT_KEY, ParamValue::from(count));
		self.formatter.format(&chosen, &replacements, &resolved.locale)
	}

	/// Whether `key` resolves in the given (or current) locale, without
	/// consulting the fallback locale.
	pub fn has(&self, key: &str, locale: Option<&str>) -> bool {
		let locale = self.request_locale(locale);
		let key = TranslationKey::parse(key);
		if !key.is_resolvable() {
			return false;
		}
		let id = BundleId::new(key.namespace.as_deref(), &key.group, &locale);
		self.ensure_loaded(&id);
		self.line(&id, &key.item).is_some()
	}

	/// Resolve `key` to its unformatted template.
	///
	/// Unresolved keys are recorded when tracking is enabled.
	pub fn raw(&self, key: &str, locale: Option<&str>) -> Option<ResolvedMessage> {
		let locale = self.request_locale(locale);
		let parsed = TranslationKey::parse(key);

		let resolved = if parsed.is_resolvable() {
			self.resolve(&parsed, &locale)
		} else {
			None
		};

		if resolved.is_none() {
			self.record_missing(&locale, key);
		}
		resolved
	}

	fn resolve(&self, key: &TranslationKey, locale: &str) -> Option<ResolvedMessage> {
		let id = BundleId::new(key.namespace.as_deref(), &key.group, locale);
		self.ensure_loaded(&id);
		if let Some(template) = self.line(&id, &key.item) {
			return Some(ResolvedMessage {
				template,
				locale: locale.to_string(),
			});
		}

		let fallback = self.fallback_locale();
		if fallback == locale {
			return None;
		}

		let fallback_id = BundleId::new(key.namespace.as_deref(), &key.group, &fallback);
		self.ensure_loaded(&fallback_id);
		let template = self.line(&fallback_id, &key.item)?;
		tracing::debug!(%key, locale, fallback = %fallback, "using fallback locale");
		Some(ResolvedMessage {
			template,
			locale: fallback,
		})
	}

	fn line(&self, id: &BundleId, item: &str) -> Option<String> {
		self.bundles
			.read()
			.get(id)
			.and_then(|tree| tree.lookup(item))
			.map(str::to_string)
	}

	fn ensure_loaded(&self, id: &BundleId) {
		if self.bundles.read().contains_key(id) {
			return;
		}

		let _guard = self.load_lock.lock();
		if self.bundles.read().contains_key(id) {
			return;
		}

		let loaders: Vec<Arc<dyn Loader>> = self.loaders.read().clone();
		let mut tree = MessageTree::new();
		for loader in &loaders {
			let loaded = loader.load(&id.locale, &id.group, id.namespace.as_deref());
			if !loaded.is_empty() {
				tree.merge(loaded);
			}
		}

		tracing::debug!(bundle = %id, leaves = tree.leaf_count(), "loaded translation bundle");
		self.bundles.write().insert(id.clone(), tree);
	}

	fn record_missing(&self, locale: &str, key: &str) {
		tracing::debug!(locale, key, "translation missing");
		if self.is_tracking_missing() {
			self.missing.lock().insert(format!("{}.{}", locale, key));
		}
	}

	fn request_locale(&self, locale: Option<&str>) -> String {
		match locale {
			Some(locale) => normalize(locale),
			None => self.locale(),
		}
	}
}

fn normalize(locale: &str) -> String {
	locale.trim().to_lowercase()
}

impl fmt::Debug for Translator {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let loaders: Vec<String> = self
			.loaders
			.read()
			.iter()
			.map(|loader| loader.name().to_string())
			.collect();
		f.debug_struct("Translator")
			.field("locale", &*self.locale.read())
			.field("fallback_locale", &*self.fallback_locale.read())
			.field("loaders", &loaders)
			.field("namespaces", &*self.namespaces.read())
			.field("loaded_bundles", &self.bundles.read().len())
			.field("track_missing", &self.is_tracking_missing())
			.finish()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::error::I18nResult;
	use crate::loader::StaticLoader;
	use rstest::{fixture, rstest};
	use serde_json::json;
	use std::sync::atomic::AtomicUsize;

	#[derive(Default)]
	struct CountingLoader {
		calls: AtomicUsize,
		namespaces: Mutex<Vec<String>>,
	}

	impl Loader for CountingLoader {
		fn try_load(&self, _: &str, _: &str, _: Option<&str>) -> I18nResult<MessageTree> {
			self.calls.fetch_add(1, Ordering::SeqCst);
			Ok(MessageTree::new())
		}

		fn add_namespace(&self, namespace: &str, _path: &Path) {
			self.namespaces.lock().push(namespace.to_string());
		}
	}

	#[fixture]
	fn translator() -> Translator {
		Translator::new("es", "en").with_loader(
			StaticLoader::new()
				.with_bundle(
					"en",
					"messages",
					None,
					json!({
						"welcome": "Welcome, :name!",
						"apples": "one: One apple|other: :count apples",
						"user": { "profile": "Profile", "settings": "Settings" }
					}),
				)
				.with_bundle(
					"es",
					"messages",
					None,
					json!({ "welcome": "¡Bienvenido, :name!", "user": { "profile": "Perfil" } }),
				)
				.with_bundle("en", "messages", Some("mail"), json!({ "subject": "New mail" })),
		)
	}

	#[rstest]
	#[case("messages.welcome", None, "¡Bienvenido, Ada!")]
	#[case("messages.welcome", Some("en"), "Welcome, Ada!")]
	#[case("messages.welcome", Some("EN"), "Welcome, Ada!")]
	#[case("messages.user.settings", None, "Settings")]
	#[case("messages.user.profile", None, "Perfil")]
	#[case("mail::messages.subject", None, "New mail")]
	#[case("messages.user", None, "messages.user")]
	#[case("messages", None, "messages")]
	#[case("unknown.key", None, "unknown.key")]
	fn test_trans(
		translator: Translator,
		#[case] key: &str,
		#[case] locale: Option<&str>,
		#[case] expected: &str,
	) {
		// Arrange
		let replacements = Replacements::new().with("name", "Ada");

		// Act
		let result = translator.trans(key, &replacements, locale);

		// Assert
		assert_eq!(result, expected);
	}

	#[rstest]
	fn test_fallback_reports_resolution_locale(translator: Translator) {
		// Act
		let resolved = translator.raw("messages.user.settings", None);

		// Assert
		assert_eq!(
			resolved,
			Some(ResolvedMessage {
				template: "Settings".to_string(),
				locale: "en".to_string(),
			})
		);
	}

	#[rstest]
	fn test_has_ignores_fallback(translator: Translator) {
		assert!(translator.has("messages.welcome", None));
		assert!(!translator.has("messages.user.settings", None));
		assert!(translator.has("messages.user.settings", Some("en")));
		assert!(!translator.has("messages", None));
	}

	#[rstest]
	#[case(1, "One apple")]
	#[case(5, "5 apples")]
	fn test_choice_via_fallback(translator: Translator, #[case] count: i64, #[case] expected: &str) {
		assert_eq!(
			translator.choice("messages.apples", count, &Replacements::new(), None),
			expected
		);
	}

	#[rstest]
	fn test_choice_missing_key_returns_key(translator: Translator) {
		assert_eq!(
			translator.choice("messages.pears", 3, &Replacements::new(), None),
			"messages.pears"
		);
	}

	#[rstest]
	fn test_choice_selects_form_before_substitution() {
		// Arrange
		// A replacement value containing `|` must not split the message
		let translator = Translator::new("en", "en").with_loader(StaticLoader::new().with_bundle(
			"en",
			"g",
			None,
			json!({ "m": "one: :who has one|other: :who has :count" }),
		));
		let replacements = Replacements::new().with("who", "a|b");

		// Act
		let result = translator.choice("g.m", 2, &replacements, None);

		// Assert
		assert_eq!(result, "a|b has 2");
	}

	#[rstest]
	fn test_choice_count_overrides_caller_value() {
		let translator = Translator::new("en", "en").with_loader(StaticLoader::new().with_bundle(
			"en",
			"g",
			None,
			json!({ "m": ":count things" }),
		));
		let replacements = Replacements::new().with("count", "many");
		assert_eq!(translator.choice("g.m", 2.5, &replacements, None), "2.5 things");
	}

	#[rstest]
	fn test_missing_tracking(translator: Translator) {
		// Arrange
		translator.set_track_missing(true);

		// Act
		translator.trans("messages.nope", &Replacements::new(), None);
		translator.trans("messages.nope", &Replacements::new(), None);
		translator.trans("other.key", &Replacements::new(), Some("fr"));
		translator.trans("messages.welcome", &Replacements::new(), None);

		// Assert
		assert_eq!(
			translator.missing_translations(),
			vec!["es.messages.nope".to_string(), "fr.other.key".to_string()]
		);
		translator.clear_missing_translations();
		assert!(translator.missing_translations().is_empty());
	}

	#[rstest]
	fn test_missing_not_tracked_by_default(translator: Translator) {
		translator.trans("messages.nope", &Replacements::new(), None);
		assert!(translator.missing_translations().is_empty());
	}

	#[rstest]
	fn test_bundles_load_once_even_when_empty() {
		// Arrange
		let loader = Arc::new(CountingLoader::default());
		let translator = Translator::new("en", "en");
		translator.add_loader(loader.clone());

		// Act
		for _ in 0..3 {
			translator.trans("messages.a", &Replacements::new(), None);
		}

		// Assert
		assert_eq!(loader.calls.load(Ordering::SeqCst), 1);
	}

	#[rstest]
	fn test_clear_loaded_forces_reload() {
		// Arrange
		let loader = Arc::new(CountingLoader::default());
		let translator = Translator::new("en", "en");
		translator.add_loader(loader.clone());
		translator.trans("messages.a", &Replacements::new(), None);

		// Act
		translator.clear_loaded();
		translator.trans("messages.a", &Replacements::new(), None);

		// Assert
		assert_eq!(loader.calls.load(Ordering::SeqCst), 2);
	}

	#[rstest]
	fn test_later_loader_deep_merges() {
		// Arrange
		let translator = Translator::new("en", "en")
			.with_loader(StaticLoader::new().with_bundle(
				"en",
				"messages",
				None,
				json!({ "user": { "profile": "P", "settings": "S" } }),
			))
			.with_loader(StaticLoader::new().with_bundle(
				"en",
				"messages",
				None,
				json!({ "user": { "profile": "P2" } }),
			));

		// Act
		let profile = translator.trans("messages.user.profile", &Replacements::new(), None);
		let settings = translator.trans("messages.user.settings", &Replacements::new(), None);

		// Assert
		assert_eq!(profile, "P2");
		assert_eq!(settings, "S");
	}

	#[rstest]
	fn test_namespaces_forwarded_to_all_loaders() {
		// Arrange
		let early = Arc::new(CountingLoader::default());
		let late = Arc::new(CountingLoader::default());
		let translator = Translator::new("en", "en");
		translator.add_loader(early.clone());

		// Act
		translator.add_namespace("mail", "/srv/mail/lang");
		translator.add_loader(late.clone());

		// Assert
		assert_eq!(*early.namespaces.lock(), vec!["mail".to_string()]);
		assert_eq!(*late.namespaces.lock(), vec!["mail".to_string()]);
		assert_eq!(
			translator.namespaces().get("mail"),
			Some(&PathBuf::from("/srv/mail/lang"))
		);
	}

	#[rstest]
	fn test_locale_accessors(translator: Translator) {
		// Act
		translator.set_locale("FR");
		translator.set_fallback_locale("De");

		// Assert
		assert_eq!(translator.locale(), "fr");
		assert_eq!(translator.fallback_locale(), "de");
	}

	#[rstest]
	fn test_translator_is_send_and_sync() {
		fn assert_send_sync<T: Send + Sync>() {}
		assert_send_sync::<Translator>();
	}

	#[rstest]
	fn test_concurrent_lookups_share_one_load() {
		// Arrange
		let loader = Arc::new(CountingLoader::default());
		let translator = Arc::new(Translator::new("en", "en"));
		translator.add_loader(loader.clone());

		// Act
		let handles: Vec<_> = (0..8)
			.map(|_| {
				let translator = Arc::clone(&translator);
				std::thread::spawn(move || translator.trans("messages.a", &Replacements::new(), None))
			})
			.collect();
		for handle in handles {
			assert_eq!(handle.join().unwrap(), "messages.a");
		}

		// Assert
		assert_eq!(loader.calls.load(Ordering::SeqCst), 1);
	}
}
