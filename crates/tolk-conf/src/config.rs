//! Translator configuration
//!
//! Every field has a default, so a configuration file only needs to name
//! what it changes:
//!
//! ```toml
//! default_locale = "es"
//! supported_locales = ["es", "en"]
//! path = "lang"
//!
//! [namespaces]
//! mail = "vendor/mail/lang"
//! ```

use crate::error::{ConfigError, ConfigResult};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Settings used to assemble a translator and locale manager.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct I18nConfig {
	/// Locale used when no other locale is detected
	#[serde(default = "default_locale")]
	pub default_locale: String,

	/// Locale consulted when a key is missing
	#[serde(default = "default_locale")]
	pub fallback_locale: String,

	/// Locales accepted from detectors and `set_locale`
	#[serde(default = "default_supported_locales")]
	pub supported_locales: Vec<String>,

	/// Root directory of translation files
	#[serde(default = "default_path")]
	pub path: PathBuf,

	/// Wrap the file loader in a cache
	#[serde(default = "default_true")]
	pub cache_enabled: bool,

	/// Cache lifetime in seconds
	#[serde(default = "default_cache_ttl")]
	pub cache_ttl: u64,

	/// Cache key prefix
	#[serde(default = "default_cache_prefix")]
	pub cache_prefix: String,

	/// Read translations from a repository as well as from files
	#[serde(default)]
	pub database_enabled: bool,

	/// Table holding translation rows
	#[serde(default = "default_database_table")]
	pub database_table: String,

	/// Record keys that resolve nowhere
	#[serde(default)]
	pub track_missing: bool,

	/// Namespace name to translation root
	#[serde(default)]
	pub namespaces: IndexMap<String, PathBuf>,
}

impl Default for I18nConfig {
	fn default() -> Self {
		Self {
			default_locale: default_locale(),
			fallback_locale: default_locale(),
			supported_locales: default_supported_locales(),
			path: default_path(),
			cache_enabled: true,
			cache_ttl: default_cache_ttl(),
			cache_prefix: default_cache_prefix(),
			database_enabled: false,
			database_table: default_database_table(),
			track_missing: false,
			namespaces: IndexMap::new(),
		}
	}
}

impl I18nConfig {
	pub fn from_toml_str(contents: &str) -> ConfigResult<Self> {
		Ok(toml::from_str(contents)?)
	}

	pub fn from_json_str(contents: &str) -> ConfigResult<Self> {
		Ok(serde_json::from_str(contents)?)
	}

	/// Read a `.toml` or `.json` file.
	///
	/// # Errors
	///
	/// [`ConfigError::UnsupportedFormat`] for any other extension, plus read
	/// and parse failures.
	pub fn from_file(path: impl AsRef<Path>) -> ConfigResult<Self> {
		let path = path.as_ref();
		let extension = path.extension().and_then(|s| s.to_str());
		if !matches!(extension, Some("toml") | Some("json")) {
			return Err(ConfigError::UnsupportedFormat(path.to_path_buf()));
		}

		let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
			path: path.to_path_buf(),
			source,
		})?;

		tracing::debug!(path = %path.display(), "reading i18n configuration");
		match extension {
			Some("toml") => Self::from_toml_str(&contents),
			_ => Self::from_json_str(&contents),
		}
	}

	/// Builder-style setter for the default locale.
	pub fn with_default_locale(mut self, locale: impl Into<String>) -> Self {
		self.default_locale = locale.into();
		self
	}

	/// Builder-style setter for the translation root.
	pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
		self.path = path.into();
		self
	}

	/// Register a namespace root.
	pub fn with_namespace(mut self, name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
		self.namespaces.insert(name.into(), path.into());
		self
	}
}

fn default_locale() -> String {
	"en".to_string()
}

fn default_supported_locales() -> Vec<String> {
	["en", "es", "fr", "de", "it", "pt", "ru", "ja", "ko", "zh"]
		.into_iter()
		.map(String::from)
		.collect()
}

fn default_path() -> PathBuf {
	PathBuf::from("resources/lang")
}

fn default_true() -> bool {
	true
}

fn default_cache_ttl() -> u64 {
	3600
}

fn default_cache_prefix() -> String {
	"i18n".to_string()
}

fn default_database_table() -> String {
	"translations".to_string()
}
