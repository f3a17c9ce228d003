//! Configuration loading and validation.
//!
//! Network definitions are plain JSON files. A single file can be loaded with
//! [`ConfigLoader::load_from_path`], or a whole directory keyed by network slug with
//! [`ConfigLoader::load_all`].

use std::path::Path;

mod error;
mod network_config;

pub use error::ConfigError;

/// Directory searched for network definitions when none is given
pub const DEFAULT_NETWORKS_DIR: &str = "config/networks";

/// Common interface for loading configuration files
pub trait ConfigLoader: Sized {
	fn load_all<T>(path: Option<&Path>) -> Result<T, ConfigError>
	where
		T: FromIterator<(String, Self)>;

	fn load_from_path(path: &Path) -> Result<Self, ConfigError>;

	fn validate(&self) -> Result<(), String>;

	fn is_json_file(path: &Path) -> bool {
		path.extension()
			.map(|ext| ext.to_string_lossy().to_lowercase() == "json")
			.unwrap_or(false)
	}
}
