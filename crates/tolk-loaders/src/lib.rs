//! Tolk loaders - translation sources
//!
//! Concrete [`Loader`](tolk_i18n::Loader) implementations for the tolk
//! translator.
//!
//! # Features
//!
//! - **Files**: [`FileLoader`] reads JSON and TOML bundles, per group or one
//!   file per locale, with per-namespace roots
//! - **Caching**: [`CacheLoader`] wraps any loader with a TTL cache behind the
//!   [`CacheStore`] trait; [`InMemoryCacheStore`] ships in the box
//! - **Databases**: [`DatabaseLoader`] nests dotted-key rows fetched through a
//!   [`TranslationRepository`]
//!
//! # Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//! use tolk_i18n::{Replacements, Translator};
//! use tolk_loaders::{CacheLoader, FileLoader, InMemoryCacheStore};
//!
//! let files = Arc::new(FileLoader::new("resources/lang"));
//! let cached = CacheLoader::new(files, Arc::new(InMemoryCacheStore::new()));
//!
//! let translator = Translator::new("en", "en").with_loader(cached);
//! println!("{}", translator.trans("messages.welcome", &Replacements::new(), None));
//! ```
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐
//! │  Translator  │
//! └──────┬───────┘
//!        │ Loader
//! ┌──────▼───────┐      ┌────────────────┐
//! │ CacheLoader  ├─────►│   CacheStore   │
//! └──────┬───────┘      └────────────────┘
//!        │ Loader
//!   ┌────┴─────────────┐
//! ┌─▼──────────┐ ┌─────▼────────┐      ┌───────────────────────┐
//! │ FileLoader │ │DatabaseLoader├─────►│ TranslationRepository │
//! └────────────┘ └──────────────┘      └───────────────────────┘
//! ```

pub mod cache;
pub mod database;
pub mod error;
pub mod file;

pub use cache::{CacheLoader, CacheStatistics, CacheStore, InMemoryCacheStore};
pub use database::{
	DatabaseLoader, InMemoryTranslationRepository, TranslationQuery, TranslationRepository,
	TranslationRow,
};
pub use error::{LoaderError, LoaderResult};
pub use file::FileLoader;

/// Re-export commonly used types.
pub mod prelude {
	pub use crate::cache::{CacheLoader, CacheStore, InMemoryCacheStore};
	pub use crate::database::{DatabaseLoader, TranslationRepository, TranslationRow};
	pub use crate::error::{LoaderError, LoaderResult};
	pub use crate::file::FileLoader;
}
