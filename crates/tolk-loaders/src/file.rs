//! Translation files on disk
//!
//! Bundles are read from `{root}/{locale}/{group}.json` (or `.toml`). When
//! that yields nothing, a single file per locale is tried instead:
//! `{root}/{locale}.json` (or `.toml`), whose top-level `group` entry holds
//! the bundle.
//!
//! ```text
//! resources/lang/
//! ├── en/
//! │   ├── messages.json
//! │   └── validation.toml
//! ├── es.json              # { "messages": { ... }, "validation": { ... } }
//! └── vendor/mail/lang/    # registered as namespace "mail"
//!     └── en/emails.json
//! ```

use crate::error::{LoaderError, LoaderResult};
use parking_lot::RwLock;
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use tolk_i18n::{I18nResult, Loader, MessageTree};

/// Supported file formats, in lookup order.
const EXTENSIONS: [&str; 2] = ["json", "toml"];

/// Loads bundles from JSON and TOML files.
///
/// # Example
/// ```no_run
/// use tolk_i18n::Loader;
/// use tolk_loaders::FileLoader;
///
/// let loader = FileLoader::new("resources/lang");
/// loader.add_namespace("mail", "vendor/mail/lang".as_ref());
///
/// let messages = loader.load("en", "messages", None);
/// let emails = loader.load("en", "emails", Some("mail"));
/// ```
pub struct FileLoader {
	root: PathBuf,
	namespaces: RwLock<HashMap<String, PathBuf>>,
}

impl FileLoader {
	pub fn new(root: impl Into<PathBuf>) -> Self {
		Self {
			root: root.into(),
			namespaces: RwLock::new(HashMap::new()),
		}
	}

	pub fn root(&self) -> &Path {
		&self.root
	}

	/// Directory holding a namespace's bundles.
	///
	/// Unregistered namespaces share the default root.
	pub fn namespace_root(&self, namespace: Option<&str>) -> PathBuf {
		namespace
			.and_then(|ns| self.namespaces.read().get(ns).cloned())
			.unwrap_or_else(|| self.root.clone())
	}

	/// Read one bundle, reporting malformed files.
	pub fn read_bundle(
		&self,
		locale: &str,
		group: &str,
		namespace: Option<&str>,
	) -> LoaderResult<MessageTree> {
		check_segment(locale)?;
		check_segment(group)?;

		let root = self.namespace_root(namespace);

		let nested = self.read_nested(&root, locale, group)?;
		if !nested.is_empty() {
			return Ok(nested);
		}

		self.read_flat(&root, locale, group)
	}

	fn read_nested(&self, root: &Path, locale: &str, group: &str) -> LoaderResult<MessageTree> {
		let directory = root.join(locale);
		if !directory.is_dir() {
			return Ok(MessageTree::new());
		}

		match find_file(&directory, group) {
			Some(path) => Ok(MessageTree::from_json(&read_document(&path)?)),
			None => Ok(MessageTree::new()),
		}
	}

	fn read_flat(&self, root: &Path, locale: &str, group: &str) -> LoaderResult<MessageTree> {
		let Some(path) = find_file(root, locale) else {
			return Ok(MessageTree::new());
		};

		let document = read_document(&path)?;
		Ok(document
			.get(group)
			.filter(|value| value.is_object())
			.map(MessageTree::from_json)
			.unwrap_or_default())
	}
}

impl Loader for FileLoader {
	fn name(&self) -> &str {
		"file"
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

impl fmt::Debug for FileLoader {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("FileLoader")
			.field("root", &self.root)
			.field("namespaces", &*self.namespaces.read())
			.finish()
	}
}

/// Reject anything that could leave the directory it is joined onto.
fn check_segment(segment: &str) -> LoaderResult<()> {
	if segment.is_empty()
		|| segment == "."
		|| segment == ".."
		|| segment.contains(['/', '\\', '\0'])
	{
		return Err(LoaderError::InvalidSegment(segment.to_string()));
	}
	Ok(())
}

fn find_file(directory: &Path, stem: &str) -> Option<PathBuf> {
	EXTENSIONS
		.iter()
		.map(|ext| directory.join(format!("{stem}.{ext}")))
		.find(|path| path.is_file())
}

/// Parse a translation file into a JSON object.
fn read_document(path: &Path) -> LoaderResult<Value> {
	let content = fs::read_to_string(path).map_err(|source| LoaderError::Io {
		path: path.to_path_buf(),
		source,
	})?;

	let value = match path.extension().and_then(|ext| ext.to_str()) {
		Some("toml") => {
			let table: toml::Table = toml::from_str(&content).map_err(|source| LoaderError::Toml {
				path: path.to_path_buf(),
				source,
			})?;
			serde_json::to_value(table).map_err(|source| LoaderError::Json {
				path: path.to_path_buf(),
				source,
			})?
		}
		_ => serde_json::from_str(&content).map_err(|source| LoaderError::Json {
			path: path.to_path_buf(),
			source,
		})?,
	};

	if !value.is_object() {
		return Err(LoaderError::InvalidFormat {
			path: path.to_path_buf(),
			found: kind_of(&value).to_string(),
		});
	}

	tracing::debug!(path = %path.display(), "translation file read");
	Ok(value)
}

fn kind_of(value: &Value) -> &'static str {
	match value {
		Value::Null => "null",
		Value::Bool(_) => "boolean",
		Value::Number(_) => "number",
		Value::String(_) => "string",
		Value::Array(_) => "array",
		Value::Object(_) => "object",
	}
}
