//! # Tolk
//!
//! Translation, pluralization and message formatting for Rust applications.
//!
//! Tolk resolves `[namespace::]group.item.path` keys against nested message
//! bundles, falls back to a second locale, selects plural forms with CLDR
//! rules and fills placeholders through a small modifier language.
//!
//! ## Feature Flags
//!
//! - `loaders` - file (JSON/TOML), cache and database translation sources
//! - `conf` - `I18nConfig` and `TranslatorFactory`
//! - `full` (default) - all of the above
//!
//! The translation core in [`tolk_i18n`] is always available.
//!
//! ## Quick Example
//!
//! ```
//! use serde_json::json;
//! use tolk::prelude::*;
//!
//! let translator = Translator::new("fr", "en").with_loader(
//!     StaticLoader::new()
//!         .with_bundle("en", "cart", None, json!({ "total": "Total: {amount|currency:EUR}" }))
//!         .with_bundle("fr", "cart", None, json!({ "items": "one: :count article|other: :count articles" })),
//! );
//!
//! assert_eq!(translator.choice("cart.items", 0, &Replacements::new(), None), "0 article");
//! let amount = Replacements::new().with("amount", 1234.5);
//! assert_eq!(translator.trans("cart.total", &amount, None), "Total: €1,234.50");
//! ```

#[cfg(feature = "conf")]
pub mod conf;
#[cfg(feature = "loaders")]
pub mod loaders;

pub use tolk_i18n::*;

/// Re-export commonly used types.
pub mod prelude {
	pub use tolk_i18n::prelude::*;

	#[cfg(feature = "loaders")]
	pub use tolk_loaders::prelude::*;

	#[cfg(feature = "conf")]
	pub use tolk_conf::{ConfigError, FactoryParts, I18nConfig, TranslatorFactory};
}
