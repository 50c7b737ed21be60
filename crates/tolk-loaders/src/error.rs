//! Loader error types.

use std::path::PathBuf;
use thiserror::Error;
use tolk_i18n::I18nError;

/// Result type for loader operations.
pub type LoaderResult<T> = Result<T, LoaderError>;

/// Errors raised while reading translation sources.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum LoaderError {
	/// A translation file could not be read.
	#[error("failed to read {}: {source}", .path.display())]
	Io {
		/// File path.
		path: PathBuf,
		/// Underlying error.
		#[source]
		source: std::io::Error,
	},

	/// A JSON translation file is malformed.
	#[error("invalid JSON in {}: {source}", .path.display())]
	Json {
		/// File path.
		path: PathBuf,
		/// Underlying error.
		#[source]
		source: serde_json::Error,
	},

	/// A TOML translation file is malformed.
	#[error("invalid TOML in {}: {source}", .path.display())]
	Toml {
		/// File path.
		path: PathBuf,
		/// Underlying error.
		#[source]
		source: toml::de::Error,
	},

	/// A translation file parsed, but its top level is not a table.
	#[error("{} must contain a table of messages, found {found}", .path.display())]
	InvalidFormat {
		/// File path.
		path: PathBuf,
		/// Kind of value found instead.
		found: String,
	},

	/// A locale, group or namespace cannot be used as a path segment.
	#[error("invalid path segment: {0:?}")]
	InvalidSegment(String),

	/// A table name is not a plain SQL identifier.
	#[error("invalid table name: {0:?}")]
	InvalidTable(String),

	/// The translation repository failed.
	#[error("repository error: {0}")]
	Repository(String),

	/// The cache store failed.
	#[error("cache error: {0}")]
	Cache(String),
}

impl LoaderError {
	/// Wrap as the core error type, tagged with the loader's name.
	pub fn into_i18n(self, loader: &str) -> I18nError {
		I18nError::Loader {
			loader: loader.to_string(),
			message: self.to_string(),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn test_invalid_format_display() {
		let err = LoaderError::InvalidFormat {
			path: PathBuf::from("lang/en/messages.json"),
			found: "array".to_string(),
		};
		assert_eq!(
			err.to_string(),
			"lang/en/messages.json must contain a table of messages, found array"
		);
	}

	#[rstest]
	fn test_into_i18n_keeps_loader_and_message() {
		// Arrange
		let err = LoaderError::Repository("connection reset".to_string());

		// Act
		let converted = err.into_i18n("database");

		// Assert
		match converted {
			I18nError::Loader { loader, message } => {
				assert_eq!(loader, "database");
				assert_eq!(message, "repository error: connection reset");
			}
			other => panic!("unexpected error: {other:?}"),
		}
	}

	#[rstest]
	fn test_io_error_has_source() {
		let err = LoaderError::Io {
			path: PathBuf::from("x.json"),
			source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
		};
		assert!(std::error::Error::source(&err).is_some());
		assert!(err.to_string().starts_with("failed to read x.json"));
	}
}
