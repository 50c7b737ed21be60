//! Error types for the translation core.
//!
//! Resolution and formatting never fail: a missing key resolves to the key
//! itself and every formatting path has a string fallback. The errors below
//! only surface at the edges (locale validation, the process-wide registry,
//! and loaders that are called through their fallible entry point).

use thiserror::Error;

/// Result type for translation operations.
pub type I18nResult<T> = Result<T, I18nError>;

/// Errors raised by the translation core.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum I18nError {
	/// Locale string is empty or contains characters outside `[A-Za-z0-9_-]`.
	#[error("invalid locale: {0}")]
	InvalidLocale(String),

	/// Locale is well formed but not in the supported set.
	#[error("unsupported locale: {0}")]
	UnsupportedLocale(String),

	/// A registry helper was called before a translator was installed.
	#[error("translator not initialized: call registry::install first")]
	NotInitialized,

	/// A loader failed while producing a message tree.
	#[error("loader '{loader}' failed: {message}")]
	Loader {
		/// Loader name.
		loader: String,
		/// Failure description.
		message: String,
	},
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn test_invalid_locale_display() {
		let err = I18nError::InvalidLocale("e n".to_string());
		assert_eq!(err.to_string(), "invalid locale: e n");
	}

	#[rstest]
	fn test_unsupported_locale_display() {
		let err = I18nError::UnsupportedLocale("xx".to_string());
		assert_eq!(err.to_string(), "unsupported locale: xx");
	}

	#[rstest]
	fn test_loader_error_display() {
		let err = I18nError::Loader {
			loader: "file".to_string(),
			message: "permission denied".to_string(),
		};
		let msg = err.to_string();
		assert!(msg.contains("file"));
		assert!(msg.contains("permission denied"));
	}

	#[rstest]
	fn test_not_initialized_display() {
		assert!(
			I18nError::NotInitialized
				.to_string()
				.contains("not initialized")
		);
	}
}
