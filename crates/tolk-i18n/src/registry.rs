//! Process-wide translator
//!
//! Nothing is installed implicitly: call [`install`] once during start-up,
//! after which the helper functions resolve through the installed
//! translator. Before that they return [`I18nError::NotInitialized`].
//!
//! # Example
//! ```
//! use std::sync::Arc;
//! use serde_json::json;
//! use tolk_i18n::{registry, Replacements, StaticLoader, Translator};
//!
//! let translator = Translator::new("en", "en").with_loader(
//!     StaticLoader::new().with_bundle("en", "messages", None, json!({ "hi": "Hi :name" })),
//! );
//! registry::install(Arc::new(translator));
//!
//! let replacements = Replacements::new().with("name", "Ada");
//! assert_eq!(registry::trans("messages.hi", &replacements, None).unwrap(), "Hi Ada");
//!
//! registry::uninstall();
//! assert!(registry::lang().is_err());
//! ```

use crate::error::{I18nError, I18nResult};
use crate::formatter::Replacements;
use crate::plural::PluralCount;
use crate::translator::Translator;
use parking_lot::{RwLock, const_rwlock};
use std::sync::Arc;

static TRANSLATOR: RwLock<Option<Arc<Translator>>> = const_rwlock(None);

/// Install `translator`, returning the one it replaces.
pub fn install(translator: Arc<Translator>) -> Option<Arc<Translator>> {
	tracing::debug!(locale = %translator.locale(), "installing process-wide translator");
	TRANSLATOR.write().replace(translator)
}

/// Remove the installed translator.
pub fn uninstall() -> Option<Arc<Translator>> {
	TRANSLATOR.write().take()
}

pub fn is_installed() -> bool {
	TRANSLATOR.read().is_some()
}

/// The installed translator.
pub fn translator() -> I18nResult<Arc<Translator>> {
	TRANSLATOR.read().clone().ok_or(I18nError::NotInitialized)
}

/// [`Translator::trans`] on the installed translator.
pub fn trans(key: &str, replacements: &Replacements, locale: Option<&str>) -> I18nResult<String> {
	Ok(translator()?.trans(key, replacements, locale))
}

/// [`Translator::choice`] on the installed translator.
pub fn trans_choice(
	key: &str,
	count: impl Into<PluralCount>,
	replacements: &Replacements,
	locale: Option<&str>,
) -> I18nResult<String> {
	Ok(translator()?.choice(key, count, replacements, locale))
}

/// Current locale of the installed translator.
pub fn lang() -> I18nResult<String> {
	Ok(translator()?.locale())
}

/// Change the locale of the installed translator.
pub fn set_lang(locale: &str) -> I18nResult<()> {
	translator()?.set_locale(locale);
	Ok(())
}
