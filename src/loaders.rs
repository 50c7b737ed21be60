//! Translation sources.
//!
//! # Examples
//!
//! ```rust,no_run
//! use tolk::loaders::{CacheLoader, FileLoader, InMemoryCacheStore};
//! ```

#[cfg(feature = "loaders")]
pub use tolk_loaders::*;
