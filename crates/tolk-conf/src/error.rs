//! Configuration error types.

use std::path::PathBuf;
use thiserror::Error;
use tolk_loaders::LoaderError;

/// Result type for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors raised while reading configuration or assembling a translator.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
	/// Configuration file could not be read.
	#[error("failed to read {}: {source}", .path.display())]
	Io {
		/// File path.
		path: PathBuf,
		/// Underlying error.
		#[source]
		source: std::io::Error,
	},

	/// TOML parse error.
	#[error("TOML parse error: {0}")]
	Toml(#[from] toml::de::Error),

	/// JSON parse error.
	#[error("JSON parse error: {0}")]
	Json(#[from] serde_json::Error),

	/// File extension is neither `toml` nor `json`.
	#[error("unsupported configuration format: {}", .0.display())]
	UnsupportedFormat(PathBuf),

	/// A configured loader could not be built.
	#[error(transparent)]
	Loader(#[from] LoaderError),
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn test_unsupported_format_display() {
		let err = ConfigError::UnsupportedFormat(PathBuf::from("i18n.yaml"));
		assert_eq!(err.to_string(), "unsupported configuration format: i18n.yaml");
	}

	#[rstest]
	fn test_loader_error_is_transparent() {
		let err: ConfigError = LoaderError::InvalidTable("bad name".to_string()).into();
		assert_eq!(err.to_string(), "invalid table name: \"bad name\"");
	}
}
