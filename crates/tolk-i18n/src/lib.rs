//! Tolk i18n - translation core
//!
//! Resolves `[namespace::]group.item.path` keys against nested message bundles,
//! falls back to a second locale once, selects plural forms with CLDR rules
//! and substitutes placeholders with a small modifier language.
//!
//! # Features
//!
//! - **Lazy bundles**: one [`MessageTree`] per (namespace, group, locale),
//!   deep-merged from every registered [`Loader`]
//! - **Fallback**: missing keys are looked up in the fallback locale; the
//!   supplying locale drives pluralization and formatting
//! - **Pluralization**: `{N}` exact counts, `[min,max]` ranges, `one:`/`few:`/...
//!   CLDR categories and positional forms
//! - **Formatting**: `:name`, `:NAME`, `:Name` and `{name|modifier:arg}` with
//!   case, number, currency, percent, date, plural, truncate and default
//!   modifiers; custom modifiers via [`MessageFormatter::register_modifier`]
//! - **Missing-key tracking** for spotting untranslated strings
//!
//! # Quick Start
//!
//! ```
//! use serde_json::json;
//! use tolk_i18n::prelude::*;
//!
//! let translator = Translator::new("pl", "en").with_loader(
//!     StaticLoader::new()
//!         .with_bundle("en", "shop", None, json!({ "title": "Shop of :owner" }))
//!         .with_bundle("pl", "shop", None, json!({
//!             "files": "one: :count plik|few: :count pliki|other: :count plików"
//!         })),
//! );
//!
//! assert_eq!(translator.choice("shop.files", 3, &Replacements::new(), None), "3 pliki");
//! assert_eq!(translator.choice("shop.files", 5, &Replacements::new(), None), "5 plików");
//!
//! let owner = Replacements::new().with("owner", "Ada");
//! assert_eq!(translator.trans("shop.title", &owner, None), "Shop of Ada");
//! ```
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────┐
//! │           Translator             │
//! │    - key parsing                 │
//! │    - bundle cache + fallback     │
//! │    - missing-key log             │
//! └────────────────┬─────────────────┘
//!                  │
//!     ┌────────────┼────────────┐
//!     │            │            │
//! ┌───▼──┐    ┌────▼────┐   ┌───▼─────┐
//! │Loader│    │Pluralizer│  │Formatter│
//! └──────┘    └─────────┘   └─────────┘
//! ```

pub mod error;
pub mod formatter;
pub mod key;
pub mod loader;
pub mod locale;
pub mod plural;
pub mod registry;
pub mod translator;
pub mod tree;

pub use error::{I18nError, I18nResult};
pub use formatter::{MessageFormatter, ModifierContext, ModifierTable, ParamValue, Replacements};
pub use key::{BundleId, TranslationKey};
pub use loader::{Loader, StaticLoader};
pub use locale::{LocaleDetector, LocaleManager};
pub use plural::{PluralCategory, PluralCount, PluralRule, Pluralizer};
pub use translator::{ResolvedMessage, Translator};
pub use tree::{MessageTree, MessageValue};

/// Re-export commonly used types.
pub mod prelude {
	pub use crate::error::{I18nError, I18nResult};
	pub use crate::formatter::{MessageFormatter, ModifierContext, ParamValue, Replacements};
	pub use crate::loader::{Loader, StaticLoader};
	pub use crate::locale::{LocaleDetector, LocaleManager};
	pub use crate::plural::{PluralCategory, Pluralizer};
	pub use crate::registry;
	pub use crate::translator::Translator;
	pub use crate::tree::MessageTree;
}
