//! Block resolution error types.

use log::error;
use std::{error::Error, fmt};

use crate::services::blockchain::BlockChainError;

#[derive(Debug)]
pub enum ResolverError {
	/// The reference string does not follow the query syntax
	ParseError(String),

	/// The referenced block or level does not exist
	ResolutionError(String),

	/// The node could not be reached or answered unexpectedly
	TransportError(String),
}

impl ResolverError {
	fn format_message(&self) -> String {
		match self {
			Self::ParseError(msg) => format!("Parse error: {}", msg),
			Self::ResolutionError(msg) => format!("Resolution error: {}", msg),
			Self::TransportError(msg) => format!("Transport error: {}", msg),
		}
	}

	pub fn parse_error(msg: impl Into<String>) -> Self {
		let error = Self::ParseError(msg.into());
		error!("{}", error.format_message());
		error
	}

	pub fn resolution_error(msg: impl Into<String>) -> Self {
		let error = Self::ResolutionError(msg.into());
		error!("{}", error.format_message());
		error
	}

	pub fn transport_error(msg: impl Into<String>) -> Self {
		let error = Self::TransportError(msg.into());
		error!("{}", error.format_message());
		error
	}
}

impl fmt::Display for ResolverError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.format_message())
	}
}

impl Error for ResolverError {}

impl From<BlockChainError> for ResolverError {
	fn from(err: BlockChainError) -> Self {
		match err {
			BlockChainError::BlockNotFound(_) => Self::resolution_error(err.to_string()),
			other => Self::transport_error(other.to_string()),
		}
	}
}
