use std::error::Error;
use std::fmt;

use log::error;

#[derive(Debug)]
pub enum FilterError {
	/// The caller asked for an operation kind outside the taxonomy
	ConfigurationError(String),
}

impl FilterError {
	fn format_message(&self) -> String {
		match self {
			FilterError::ConfigurationError(msg) => format!("Configuration error: {}", msg),
		}
	}

	pub fn configuration_error(msg: impl Into<String>) -> Self {
		let error = FilterError::ConfigurationError(msg.into());
		error!("{}", error.format_message());
		error
	}
}

impl fmt::Display for FilterError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.format_message())
	}
}

impl Error for FilterError {}
