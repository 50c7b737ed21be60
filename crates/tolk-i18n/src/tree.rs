//! Nested translation bundles
//!
//! A [`MessageTree`] holds the messages of one (namespace, group, locale)
//! bundle. Leaves are always strings; loaders drop any other scalar.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A node of a message tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MessageValue {
	Leaf(String),
	Node(MessageTree),
}

impl MessageValue {
	pub fn as_leaf(&self) -> Option<&str> {
		match self {
			Self::Leaf(s) => Some(s),
			Self::Node(_) => None,
		}
	}

	pub fn as_node(&self) -> Option<&MessageTree> {
		match self {
			Self::Leaf(_) => None,
			Self::Node(tree) => Some(tree),
		}
	}
}

impl From<&str> for MessageValue {
	fn from(value: &str) -> Self {
		Self::Leaf(value.to_string())
	}
}

impl From<String> for MessageValue {
	fn from(value: String) -> Self {
		Self::Leaf(value)
	}
}

impl From<MessageTree> for MessageValue {
	fn from(value: MessageTree) -> Self {
		Self::Node(value)
	}
}

/// Ordered mapping from key segments to leaves or nested trees.
///
/// # Example
/// ```
/// use serde_json::json;
/// use tolk_i18n::MessageTree;
///
/// let mut base = MessageTree::from_json(&json!({
///     "user": { "profile": "Profile", "settings": "Settings" }
/// }));
/// let overlay = MessageTree::from_json(&json!({ "user": { "profile": "My Profile" } }));
///
/// base.merge(overlay);
///
/// assert_eq!(base.lookup("user.profile"), Some("My Profile"));
/// assert_eq!(base.lookup("user.settings"), Some("Settings"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MessageTree {
	entries: IndexMap<String, MessageValue>,
}

impl MessageTree {
	pub fn new() -> Self {
		Self::default()
	}

	/// Build a tree from a JSON document.
	///
	/// Objects become nodes and strings become leaves. Numbers, booleans,
	/// arrays and nulls are dropped, as is anything that is not an object at
	/// the top level.
	pub fn from_json(value: &serde_json::Value) -> Self {
		match value {
			serde_json::Value::Object(map) => map
				.iter()
				.filter_map(|(key, value)| match value {
					serde_json::Value::String(s) => Some((key.clone(), MessageValue::Leaf(s.clone()))),
					serde_json::Value::Object(_) => {
						Some((key.clone(), MessageValue::Node(Self::from_json(value))))
					}
					_ => None,
				})
				.collect(),
			_ => Self::new(),
		}
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// Number of top-level entries.
	pub fn len(&self) -> usize {
		self.entries.len()
	}

	/// Number of string leaves at every depth.
	pub fn leaf_count(&self) -> usize {
		self.entries
			.values()
			.map(|value| match value {
				MessageValue::Leaf(_) => 1,
				MessageValue::Node(tree) => tree.leaf_count(),
			})
			.sum()
	}

	pub fn get(&self, segment: &str) -> Option<&MessageValue> {
		self.entries.get(segment)
	}

	pub fn insert(&mut self, segment: impl Into<String>, value: impl Into<MessageValue>) {
		self.entries.insert(segment.into(), value.into());
	}

	pub fn iter(&self) -> impl Iterator<Item = (&String, &MessageValue)> {
		self.entries.iter()
	}

	/// Set a leaf at a dotted path, creating intermediate nodes.
	///
	/// A leaf standing where a node is needed is replaced by a node.
	pub fn insert_dotted(&mut self, path: &str, value: impl Into<String>) {
		let mut segments = path.split('.').peekable();
		let mut current = self;

		while let Some(segment) = segments.next() {
			if segments.peek().is_none() {
				current
					.entries
					.insert(segment.to_string(), MessageValue::Leaf(value.into()));
				return;
			}

			let slot = current
				.entries
				.entry(segment.to_string())
				.or_insert_with(|| MessageValue::Node(MessageTree::new()));
			if let MessageValue::Leaf(_) = slot {
				*slot = MessageValue::Node(MessageTree::new());
			}
			let MessageValue::Node(tree) = slot else {
				return;
			};
			current = tree;
		}
	}

	/// Walk a dotted path and return the leaf string at its end.
	///
	/// Returns `None` for an empty path, a missing segment, or a path that ends
	/// on a node.
	pub fn lookup(&self, path: &str) -> Option<&str> {
		if path.is_empty() {
			return None;
		}

		let mut segments = path.split('.');
		let first = segments.next()?;
		let mut value = self.entries.get(first)?;

		for segment in segments {
			value = value.as_node()?.entries.get(segment)?;
		}

		value.as_leaf()
	}

	/// Deep-merge `other` onto this tree.
	///
	/// Where both sides hold a node the merge recurses, so siblings that
	/// `other` does not mention survive at every depth. Anywhere else the
	/// value from `other` replaces the existing one.
	pub fn merge(&mut self, other: MessageTree) {
		for (key, incoming) in other.entries {
			match (self.entries.get_mut(&key), incoming) {
				(Some(MessageValue::Node(existing)), MessageValue::Node(incoming)) => {
					existing.merge(incoming);
				}
				(_, incoming) => {
					self.entries.insert(key, incoming);
				}
			}
		}
	}

	/// Flatten to `(dotted.path, leaf)` pairs in tree order.
	pub fn flatten(&self) -> Vec<(String, String)> {
		let mut out = Vec::new();
		self.flatten_into("", &mut out);
		out
	}

	fn flatten_into(&self, prefix: &str, out: &mut Vec<(String, String)>) {
		for (key, value) in &self.entries {
			let path = if prefix.is_empty() {
				key.clone()
			} else {
				format!("{}.{}", prefix, key)
			};
			match value {
				MessageValue::Leaf(s) => out.push((path, s.clone())),
				MessageValue::Node(tree) => tree.flatten_into(&path, out),
			}
		}
	}
}

impl<K: Into<String>, V: Into<MessageValue>> FromIterator<(K, V)> for MessageTree {
	fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
		Self {
			entries: iter
				.into_iter()
				.map(|(k, v)| (k.into(), v.into()))
				.collect(),
		}
	}
}
