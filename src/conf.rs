//! Configuration and translator assembly.
//!
//! # Examples
//!
//! ```rust,no_run
//! use tolk::conf::{I18nConfig, TranslatorFactory};
//! ```

#[cfg(feature = "conf")]
pub use tolk_conf::*;
