//! Translation sources
//!
//! A [`Loader`] produces the [`MessageTree`] of one (locale, group, namespace)
//! bundle. Concrete file, cache and database loaders live in `tolk-loaders`;
//! [`StaticLoader`] keeps bundles in memory.

use crate::error::I18nResult;
use crate::key::BundleId;
use crate::tree::MessageTree;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::path::Path;

/// A source of translation bundles.
pub trait Loader: Send + Sync {
	/// Short name used in log output.
	fn name(&self) -> &str {
		"loader"
	}

	/// Load a bundle, reporting failures.
	///
	/// An absent bundle is not a failure: return an empty tree.
	fn try_load(&self, locale: &str, group: &str, namespace: Option<&str>) -> I18nResult<MessageTree>;

	/// Load a bundle. Failures are logged and yield an empty tree.
	fn load(&self, locale: &str, group: &str, namespace: Option<&str>) -> MessageTree {
		match self.try_load(locale, group, namespace) {
			Ok(tree) => tree,
			Err(err) => {
				tracing::warn!(
					loader = self.name(),
					locale,
					group,
					namespace,
					error = %err,
					"loader failed; using an empty bundle"
				);
				MessageTree::new()
			}
		}
	}

	/// Register where a namespace's bundles live. Ignored by loaders without
	/// a notion of paths.
	fn add_namespace(&self, _namespace: &str, _path: &Path) {}
}

/// In-memory bundles keyed by namespace, group and locale.
///
/// # Example
/// ```
/// use serde_json::json;
/// use tolk_i18n::{Loader, StaticLoader};
///
/// let loader = StaticLoader::new()
///     .with_bundle("en", "messages", None, json!({ "welcome": "Welcome!" }));
///
/// assert_eq!(loader.load("en", "messages", None).lookup("welcome"), Some("Welcome!"));
/// assert!(loader.load("fr", "messages", None).is_empty());
/// ```
#[derive(Debug, Default)]
pub struct StaticLoader {
	bundles: RwLock<HashMap<BundleId, MessageTree>>,
}

impl StaticLoader {
	pub fn new() -> Self {
		Self::default()
	}

	/// Builder-style [`insert`](Self::insert) from a JSON document.
	pub fn with_bundle(
		self,
		locale: &str,
		group: &str,
		namespace: Option<&str>,
		messages: serde_json::Value,
	) -> Self {
		self.insert(locale, group, namespace, MessageTree::from_json(&messages));
		self
	}

	/// Deep-merge `tree` into the stored bundle.
	pub fn insert(&self, locale: &str, group: &str, namespace: Option<&str>, tree: MessageTree) {
		self.bundles
			.write()
			.entry(BundleId::new(namespace, group, locale))
			.or_default()
			.merge(tree);
	}

	/// Drop every stored bundle.
	pub fn clear(&self) {
		self.bundles.write().clear();
	}
}

impl Loader for StaticLoader {
	fn name(&self) -> &str {
		"static"
	}

	fn try_load(&self, locale: &str, group: &str, namespace: Option<&str>) -> I18nResult<MessageTree> {
		Ok(self
			.bundles
			.read()
			.get(&BundleId::new(namespace, group, locale))
			.cloned()
			.unwrap_or_default())
	}
}
