//! Translations stored as database rows
//!
//! Each row holds one dotted key and its message for a (locale, group,
//! namespace) triple. The driver lives behind [`TranslationRepository`];
//! [`DatabaseLoader`] only shapes the query and rebuilds the nested bundle.

use crate::error::{LoaderError, LoaderResult};
use indexmap::IndexMap;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tolk_i18n::{I18nResult, Loader, MessageTree};

/// Default table name.
pub const DEFAULT_TABLE: &str = "translations";

/// One stored message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslationRow {
	/// Dotted path inside the group, e.g. `user.profile`.
	pub key: String,
	pub value: String,
}

impl TranslationRow {
	pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
		Self {
			key: key.into(),
			value: value.into(),
		}
	}
}

/// The rows a [`DatabaseLoader`] asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationQuery<'a> {
	pub table: &'a str,
	pub locale: &'a str,
	pub group: &'a str,
	/// `None` selects rows whose namespace is `NULL`.
	pub namespace: Option<&'a str>,
}

impl TranslationQuery<'_> {
	/// SQL text with named parameters `:locale`, `:group` and `:namespace`.
	///
	/// ```
	/// use tolk_loaders::TranslationQuery;
	///
	/// let query = TranslationQuery {
	///     table: "translations",
	///     locale: "en",
	///     group: "messages",
	///     namespace: None,
	/// };
	/// assert_eq!(
	///     query.sql(),
	///     "SELECT key, value FROM translations WHERE locale = :locale AND \"group\" = :group AND namespace IS NULL"
	/// );
	/// ```
	pub fn sql(&self) -> String {
		let namespace = match self.namespace {
			Some(_) => "namespace = :namespace",
			None => "namespace IS NULL",
		};
		format!(
			"SELECT key, value FROM {} WHERE locale = :locale AND \"group\" = :group AND {}",
			self.table, namespace
		)
	}
}

/// Executes [`TranslationQuery`] against some storage.
pub trait TranslationRepository: Send + Sync {
	fn fetch(&self, query: &TranslationQuery<'_>) -> LoaderResult<Vec<TranslationRow>>;
}

/// Check that a table name is a plain SQL identifier.
pub fn validate_table_name(table: &str) -> LoaderResult<()> {
	let mut chars = table.chars();
	let valid_start = chars
		.next()
		.is_some_and(|c| c.is_ascii_alphabetic() || c == '_');

	if !valid_start || !chars.all(|c| c.is_ascii_alphanumeric() || c == '_') {
		return Err(LoaderError::InvalidTable(table.to_string()));
	}
	Ok(())
}

/// Loads bundles from a [`TranslationRepository`].
///
/// # Example
/// ```
/// use std::sync::Arc;
/// use tolk_i18n::Loader;
/// use tolk_loaders::{DatabaseLoader, InMemoryTranslationRepository};
///
/// let repository = InMemoryTranslationRepository::new();
/// repository.insert("en", "messages", None, "user.profile", "Profile");
///
/// let loader = DatabaseLoader::new(Arc::new(repository));
/// assert_eq!(loader.load("en", "messages", None).lookup("user.profile"), Some("Profile"));
/// ```
pub struct DatabaseLoader {
	repository: Arc<dyn TranslationRepository>,
	table: String,
	namespaces: RwLock<IndexMap<String, PathBuf>>,
}

impl DatabaseLoader {
	pub fn new(repository: Arc<dyn TranslationRepository>) -> Self {
		Self {
			repository,
			table: DEFAULT_TABLE.to_string(),
			namespaces: RwLock::new(IndexMap::new()),
		}
	}

	/// Read from `table` instead of `translations`.
	///
	/// # Errors
	///
	/// [`LoaderError::InvalidTable`] unless `table` is a plain identifier.
	pub fn with_table(mut self, table: &str) -> LoaderResult<Self> {
		validate_table_name(table)?;
		self.table = table.to_string();
		Ok(self)
	}

	pub fn table(&self) -> &str {
		&self.table
	}

	/// Namespaces registered through [`Loader::add_namespace`].
	///
	/// Rows carry their namespace themselves, so the paths are informational.
	pub fn namespaces(&self) -> Vec<(String, PathBuf)> {
		self.namespaces
			.read()
			.iter()
			.map(|(name, path)| (name.clone(), path.clone()))
			.collect()
	}

	/// Fetch and nest the rows of one bundle.
	pub fn read_bundle(
		&self,
		locale: &str,
		group: &str,
		namespace: Option<&str>,
	) -> LoaderResult<MessageTree> {
		let query = TranslationQuery {
			table: &self.table,
			locale,
			group,
			namespace,
		};
		let rows = self.repository.fetch(&query)?;
		tracing::debug!(locale, group, namespace, rows = rows.len(), "translation rows fetched");

		let mut tree = MessageTree::new();
		for row in rows {
			tree.insert_dotted(&row.key, row.value);
		}
		Ok(tree)
	}
}

impl Loader for DatabaseLoader {
	fn name(&self) -> &str {
		"database"
	}

	fn try_load(&self, locale: &str, group: &str, namespace: Option<&str>) -> I18nResult<MessageTree> {
		self.read_bundle(locale, group, namespace)
			.map_err(|err| err.into_i18n(self.name()))
	}

	fn add_namespace(&self, namespace: &str, path: &Path) {
		self.namespaces
			.write()
			.insert(namespace.to_string(), path.to_path_buf());
	}
}

impl fmt::Debug for DatabaseLoader {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("DatabaseLoader")
			.field("table", &self.table)
			.field("namespaces", &*self.namespaces.read())
			.finish()
	}
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct RowScope {
	locale: String,
	group: String,
	namespace: Option<String>,
}

/// Rows kept in memory, for tests and embedded catalogs.
///
/// Ignores the table name of the query.
#[derive(Debug, Default)]
pub struct InMemoryTranslationRepository {
	rows: RwLock<IndexMap<RowScope, IndexMap<String, String>>>,
}

impl InMemoryTranslationRepository {
	pub fn new() -> Self {
		Self::default()
	}

	/// Store a row, replacing any row with the same scope and key.
	pub fn insert(
		&self,
		locale: &str,
		group: &str,
		namespace: Option<&str>,
		key: &str,
		value: &str,
	) {
		let scope = RowScope {
			locale: locale.to_string(),
			group: group.to_string(),
			namespace: namespace.map(str::to_string),
		};
		self.rows
			.write()
			.entry(scope)
			.or_default()
			.insert(key.to_string(), value.to_string());
	}

	/// Number of stored rows.
	pub fn len(&self) -> usize {
		self.rows.read().values().map(IndexMap::len).sum()
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}
}

impl TranslationRepository for InMemoryTranslationRepository {
	fn fetch(&self, query: &TranslationQuery<'_>) -> LoaderResult<Vec<TranslationRow>> {
		let scope = RowScope {
			locale: query.locale.to_string(),
			group: query.group.to_string(),
			namespace: query.namespace.map(str::to_string),
		};
		Ok(self
			.rows
			.read()
			.get(&scope)
			.map(|rows| {
				rows.iter()
					.map(|(key, value)| TranslationRow::new(key.clone(), value.clone()))
					.collect()
			})
			.unwrap_or_default())
	}
}
