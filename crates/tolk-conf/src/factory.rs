//! Translator assembly
//!
//! [`TranslatorFactory`] turns an [`I18nConfig`] into a ready [`Translator`]:
//!
//! ```text
//! FileLoader(path) ──► CacheLoader (cache_enabled) ──┐
//!                                                    ├──► Translator
//! DatabaseLoader(repository) (database_enabled) ─────┘
//! ```

use crate::config::I18nConfig;
use crate::error::ConfigResult;
use std::sync::Arc;
use std::time::Duration;
use tolk_i18n::{Loader, LocaleDetector, LocaleManager, Translator};
use tolk_loaders::{
	CacheLoader, CacheStore, DatabaseLoader, FileLoader, InMemoryCacheStore, TranslationRepository,
};

/// Collaborators the configuration cannot describe.
#[derive(Default, Clone)]
pub struct FactoryParts {
	/// Store for the file cache; an [`InMemoryCacheStore`] when absent.
	pub cache_store: Option<Arc<dyn CacheStore>>,
	/// Source of database rows; required for `database_enabled`.
	pub repository: Option<Arc<dyn TranslationRepository>>,
}

impl FactoryParts {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_cache_store(mut self, store: Arc<dyn CacheStore>) -> Self {
		self.cache_store = Some(store);
		self
	}

	pub fn with_repository(mut self, repository: Arc<dyn TranslationRepository>) -> Self {
		self.repository = Some(repository);
		self
	}
}

/// Builds translators and locale managers from configuration.
///
/// # Example
/// ```no_run
/// use tolk_conf::{I18nConfig, TranslatorFactory};
///
/// let config = I18nConfig::from_file("config/i18n.toml")?;
/// let translator = TranslatorFactory::create(&config)?;
/// # Ok::<(), tolk_conf::ConfigError>(())
/// ```
pub struct TranslatorFactory;

impl TranslatorFactory {
	/// Translator over the configured files, cached when enabled.
	pub fn create(config: &I18nConfig) -> ConfigResult<Translator> {
		Self::create_with(config, FactoryParts::default())
	}

	/// Like [`create`](Self::create), with injected collaborators.
	///
	/// # Errors
	///
	/// Fails when `database_table` is not a plain identifier and a database
	/// loader is being built.
	pub fn create_with(config: &I18nConfig, parts: FactoryParts) -> ConfigResult<Translator> {
		let translator = Translator::new(&config.default_locale, &config.fallback_locale);

		let files: Arc<dyn Loader> = Arc::new(FileLoader::new(&config.path));
		if config.cache_enabled {
			let store = parts
				.cache_store
				.unwrap_or_else(|| Arc::new(InMemoryCacheStore::new()));
			let cached = CacheLoader::new(files, store)
				.with_ttl(Duration::from_secs(config.cache_ttl))
				.with_prefix(config.cache_prefix.as_str());
			translator.add_loader(Arc::new(cached));
		} else {
			translator.add_loader(files);
		}

		if config.database_enabled {
			match parts.repository {
				Some(repository) => {
					let database = DatabaseLoader::new(repository).with_table(&config.database_table)?;
					translator.add_loader(Arc::new(database));
				}
				None => tracing::warn!("database translations enabled without a repository; skipping"),
			}
		}

		for (name, path) in &config.namespaces {
			translator.add_namespace(name, path);
		}

		translator.set_track_missing(config.track_missing);

		tracing::debug!(
			locale = %config.default_locale,
			fallback = %config.fallback_locale,
			path = %config.path.display(),
			cache = config.cache_enabled,
			database = config.database_enabled,
			"translator created"
		);
		Ok(translator)
	}

	/// Locale manager over the configured locales. Detectors are added by
	/// the caller.
	pub fn create_locale_manager(config: &I18nConfig) -> LocaleManager {
		LocaleManager::new(
			&config.default_locale,
			&config.supported_locales,
			&config.fallback_locale,
		)
	}

	/// Locale manager with `detectors`, and a translator set to the locale
	/// they detect.
	pub fn create_system<I>(config: &I18nConfig, detectors: I) -> ConfigResult<(Translator, LocaleManager)>
	where
		I: IntoIterator<Item = Arc<dyn LocaleDetector>>,
	{
		Self::create_system_with(config, detectors, FactoryParts::default())
	}

	/// [`create_system`](Self::create_system) with injected collaborators.
	pub fn create_system_with<I>(
		config: &I18nConfig,
		detectors: I,
		parts: FactoryParts,
	) -> ConfigResult<(Translator, LocaleManager)>
	where
		I: IntoIterator<Item = Arc<dyn LocaleDetector>>,
	{
		let manager = Self::create_locale_manager(config);
		for detector in detectors {
			manager.add_shared_detector(detector);
		}

		let translator = Self::create_with(config, parts)?;
		translator.set_locale(&manager.detect());
		Ok((translator, manager))
	}
}
