//! Caching decorator for loaders
//!
//! [`CacheLoader`] wraps another [`Loader`] and keeps the bundles it returns
//! in a [`CacheStore`] under `{prefix}.{locale}.{group}[.{namespace}]`.
//! Empty bundles are never stored, so a bundle added later is picked up on
//! the next load.

use crate::error::{LoaderError, LoaderResult};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::fmt;
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, SystemTime};
use tolk_i18n::{I18nResult, Loader, MessageTree};

/// Default lifetime of a cached bundle.
pub const DEFAULT_TTL: Duration = Duration::from_secs(3600);

/// Default cache key prefix.
pub const DEFAULT_PREFIX: &str = "i18n";

/// Storage backend for cached bundles.
pub trait CacheStore: Send + Sync {
	/// Fetch a live entry.
	fn get(&self, key: &str) -> LoaderResult<Option<MessageTree>>;

	/// Store an entry; `None` keeps it until deleted.
	fn set(&self, key: &str, value: MessageTree, ttl: Option<Duration>) -> LoaderResult<()>;

	fn delete(&self, key: &str) -> LoaderResult<()>;

	/// Drop every entry.
	fn clear(&self) -> LoaderResult<()>;
}

/// Cache entry with expiration
#[derive(Debug, Clone)]
struct CacheEntry {
	value: MessageTree,
	expires_at: Option<SystemTime>,
}

impl CacheEntry {
	fn new(value: MessageTree, ttl: Option<Duration>) -> Self {
		// an unrepresentable deadline never expires
		let expires_at = ttl.and_then(|d| SystemTime::now().checked_add(d));
		Self { value, expires_at }
	}

	fn is_expired(&self) -> bool {
		if let Some(expires_at) = self.expires_at {
			SystemTime::now() > expires_at
		} else {
			false
		}
	}
}

/// Hit and miss counters of an [`InMemoryCacheStore`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStatistics {
	pub hits: u64,
	pub misses: u64,
	pub entry_count: u64,
}

/// Process-local [`CacheStore`].
///
/// Expired entries are dropped when they are next read, or in bulk by
/// [`cleanup_expired`](Self::cleanup_expired).
#[derive(Debug, Default)]
pub struct InMemoryCacheStore {
	store: RwLock<HashMap<String, CacheEntry>>,
	default_ttl: Option<Duration>,
	hits: AtomicU64,
	misses: AtomicU64,
}

impl InMemoryCacheStore {
	pub fn new() -> Self {
		Self::default()
	}

	/// Lifetime applied when [`CacheStore::set`] is called without one.
	pub fn with_default_ttl(mut self, ttl: Duration) -> Self {
		self.default_ttl = Some(ttl);
		self
	}

	pub fn cleanup_expired(&self) {
		self.store.write().retain(|_, entry| !entry.is_expired());
	}

	pub fn len(&self) -> usize {
		self.store.read().len()
	}

	pub fn is_empty(&self) -> bool {
		self.store.read().is_empty()
	}

	pub fn contains_key(&self, key: &str) -> bool {
		self.store
			.read()
			.get(key)
			.is_some_and(|entry| !entry.is_expired())
	}

	/// Drop `key` only if it is still expired under the write lock; an entry
	/// set since the read is kept.
	fn remove_if_expired(&self, key: &str) {
		let mut store = self.store.write();
		if store.get(key).is_some_and(CacheEntry::is_expired) {
			store.remove(key);
		}
	}

	pub fn statistics(&self) -> CacheStatistics {
		CacheStatistics {
			hits: self.hits.load(Ordering::Relaxed),
			misses: self.misses.load(Ordering::Relaxed),
			entry_count: self.store.read().len() as u64,
		}
	}
}

impl CacheStore for InMemoryCacheStore {
	fn get(&self, key: &str) -> LoaderResult<Option<MessageTree>> {
		let expired = match self.store.read().get(key) {
			Some(entry) if !entry.is_expired() => {
				self.hits.fetch_add(1, Ordering::Relaxed);
				return Ok(Some(entry.value.clone()));
			}
			Some(_) => true,
			None => false,
		};

		if expired {
			self.remove_if_expired(key);
		}
		self.misses.fetch_add(1, Ordering::Relaxed);
		Ok(None)
	}

	fn set(&self, key: &str, value: MessageTree, ttl: Option<Duration>) -> LoaderResult<()> {
		let entry = CacheEntry::new(value, ttl.or(self.default_ttl));
		self.store.write().insert(key.to_string(), entry);
		Ok(())
	}

	fn delete(&self, key: &str) -> LoaderResult<()> {
		self.store.write().remove(key);
		Ok(())
	}

	fn clear(&self) -> LoaderResult<()> {
		self.store.write().clear();
		Ok(())
	}
}

/// A [`Loader`] that consults a [`CacheStore`] before its inner loader.
///
/// Cache failures never hide translations: they are logged and the inner
/// loader is used directly.
///
/// # Example
/// ```
/// use serde_json::json;
/// use std::sync::Arc;
/// use tolk_i18n::{Loader, StaticLoader};
/// use tolk_loaders::{CacheLoader, InMemoryCacheStore};
///
/// let inner = StaticLoader::new().with_bundle("en", "messages", None, json!({ "hi": "Hi" }));
/// let store = Arc::new(InMemoryCacheStore::new());
/// let loader = CacheLoader::new(Arc::new(inner), store.clone());
///
/// assert_eq!(loader.load("en", "messages", None).lookup("hi"), Some("Hi"));
/// assert!(store.contains_key("i18n.en.messages"));
/// ```
pub struct CacheLoader {
	inner: Arc<dyn Loader>,
	store: Arc<dyn CacheStore>,
	ttl: Duration,
	prefix: String,
}

impl CacheLoader {
	pub fn new(inner: Arc<dyn Loader>, store: Arc<dyn CacheStore>) -> Self {
		Self {
			inner,
			store,
			ttl: DEFAULT_TTL,
			prefix: DEFAULT_PREFIX.to_string(),
		}
	}

	pub fn with_ttl(mut self, ttl: Duration) -> Self {
		self.ttl = ttl;
		self
	}

	pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
		self.prefix = prefix.into();
		self
	}

	pub fn ttl(&self) -> Duration {
		self.ttl
	}

	pub fn prefix(&self) -> &str {
		&self.prefix
	}

	/// `{prefix}.{locale}.{group}`, suffixed with `.{namespace}` when present.
	pub fn cache_key(&self, locale: &str, group: &str, namespace: Option<&str>) -> String {
		match namespace {
			Some(ns) => format!("{}.{}.{}.{}", self.prefix, locale, group, ns),
			None => format!("{}.{}.{}", self.prefix, locale, group),
		}
	}

	/// Drop every cached bundle.
	pub fn flush(&self) -> LoaderResult<()> {
		self.store.clear()
	}

	/// Drop one cached bundle.
	pub fn forget(&self, locale: &str, group: &str, namespace: Option<&str>) -> LoaderResult<()> {
		self.store.delete(&self.cache_key(locale, group, namespace))
	}

	fn log_store_error(&self, key: &str, err: &LoaderError) {
		tracing::warn!(key, error = %err, "translation cache unavailable");
	}
}

impl Loader for CacheLoader {
	fn name(&self) -> &str {
		"cache"
	}

	fn try_load(&self, locale: &str, group: &str, namespace: Option<&str>) -> I18nResult<MessageTree> {
		let key = self.cache_key(locale, group, namespace);

		match self.store.get(&key) {
			Ok(Some(tree)) => {
				tracing::trace!(key = %key, "translation cache hit");
				return Ok(tree);
			}
			Ok(None) => tracing::trace!(key = %key, "translation cache miss"),
			Err(err) => self.log_store_error(&key, &err),
		}

		let tree = self.inner.try_load(locale, group, namespace)?;
		if !tree.is_empty()
			&& let Err(err) = self.store.set(&key, tree.clone(), Some(self.ttl))
		{
			self.log_store_error(&key, &err);
		}
		Ok(tree)
	}

	fn add_namespace(&self, namespace: &str, path: &Path) {
		self.inner.add_namespace(namespace, path);
	}
}

impl fmt::Debug for CacheLoader {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("CacheLoader")
			.field("inner", &self.inner.name())
			.field("ttl", &self.ttl)
			.field("prefix", &self.prefix)
			.finish()
	}
}
