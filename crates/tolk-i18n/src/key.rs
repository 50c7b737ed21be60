//! Translation key parsing
//!
//! Keys have the shape `[namespace::]group[.item.path]`.

use std::fmt;

const NAMESPACE_SEPARATOR: &str = "::";

/// A parsed translation key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TranslationKey {
	pub namespace: Option<String>,
	pub group: String,
	/// Dotted path inside the group; empty when the key names only a group.
	pub item: String,
}

impl TranslationKey {
	/// Parse a key.
	///
	/// # Example
	/// ```
	/// use tolk_i18n::TranslationKey;
	///
	/// let key = TranslationKey::parse("mail::messages.welcome.title");
	/// assert_eq!(key.namespace.as_deref(), Some("mail"));
	/// assert_eq!(key.group, "messages");
	/// assert_eq!(key.item, "welcome.title");
	/// ```
	pub fn parse(key: &str) -> Self {
		let (namespace, rest) = match key.split_once(NAMESPACE_SEPARATOR) {
			Some((namespace, rest)) => (Some(namespace.to_string()), rest),
			None => (None, key),
		};

		let (group, item) = rest.split_once('.').unwrap_or((rest, ""));

		Self {
			namespace,
			group: group.to_string(),
			item: item.to_string(),
		}
	}

	/// Whether the key can ever resolve to a message.
	pub fn is_resolvable(&self) -> bool {
		!self.item.is_empty()
	}
}

impl fmt::Display for TranslationKey {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		if let Some(namespace) = &self.namespace {
			write!(f, "{}{}", namespace, NAMESPACE_SEPARATOR)?;
		}
		f.write_str(&self.group)?;
		if !self.item.is_empty() {
			write!(f, ".{}", self.item)?;
		}
		Ok(())
	}
}

/// Identity of a loaded bundle.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BundleId {
	pub namespace: Option<String>,
	pub group: String,
	pub locale: String,
}

impl BundleId {
	pub fn new(namespace: Option<&str>, group: &str, locale: &str) -> Self {
		Self {
			namespace: namespace.map(str::to_string),
			group: group.to_string(),
			locale: locale.to_string(),
		}
	}
}

impl fmt::Display for BundleId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match &self.namespace {
			Some(namespace) => write!(f, "{}::{}.{}", namespace, self.group, self.locale),
			None => write!(f, "{}.{}", self.group, self.locale),
		}
	}
}
