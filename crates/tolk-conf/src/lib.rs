//! Tolk conf - configuration for tolk translators
//!
//! Reads an [`I18nConfig`] from TOML or JSON and assembles a
//! [`Translator`](tolk_i18n::Translator) and
//! [`LocaleManager`](tolk_i18n::LocaleManager) from it.
//!
//! # Quick Start
//!
//! ```no_run
//! use tolk_conf::{I18nConfig, TranslatorFactory};
//! use tolk_i18n::{registry, Replacements};
//! use std::sync::Arc;
//!
//! let config = I18nConfig::from_file("config/i18n.toml")?;
//! let translator = TranslatorFactory::create(&config)?;
//! registry::install(Arc::new(translator));
//!
//! let greeting = registry::trans("messages.welcome", &Replacements::new(), None);
//! # Ok::<(), tolk_conf::ConfigError>(())
//! ```

pub mod config;
pub mod error;
pub mod factory;

pub use config::I18nConfig;
pub use error::{ConfigError, ConfigResult};
pub use factory::{FactoryParts, TranslatorFactory};
