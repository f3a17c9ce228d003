//! Blockchain error types and handling.
//!
//! Covers everything that can go wrong between the inspector and a Tezos node:
//! connectivity, unexpected HTTP status, missing blocks and undecodable bodies.

use log::error;

/// Represents possible errors that can occur during node operations
#[derive(Debug)]
pub enum BlockChainError {
	/// Errors related to network connectivity issues
	ConnectionError(String),

	/// The node answered with a non-success status other than 404
	RequestError(String),

	/// The node answered 404 for the requested resource
	///
	/// Contains the resource path that was not found
	BlockNotFound(String),

	/// The body could not be decoded into the expected record
	ResponseParseError(String),

	/// Internal errors within the client
	InternalError(String),
}

impl BlockChainError {
	/// Formats the error message based on the error type
	fn format_message(&self) -> String {
		match self {
			Self::ConnectionError(msg) => format!("Connection error: {}", msg),
			Self::RequestError(msg) => format!("Request error: {}", msg),
			Self::BlockNotFound(resource) => format!("Block not found: {}", resource),
			Self::ResponseParseError(msg) => format!("Response parse error: {}", msg),
			Self::InternalError(msg) => format!("Internal error: {}", msg),
		}
	}

	/// Creates a new connection error with logging
	pub fn connection_error(msg: impl Into<String>) -> Self {
		let error = Self::ConnectionError(msg.into());
		error!("{}", error.format_message());
		error
	}

	/// Creates a new request error with logging
	pub fn request_error(msg: impl Into<String>) -> Self {
		let error = Self::RequestError(msg.into());
		error!("{}", error.format_message());
		error
	}

	/// Creates a new block not found error.
	///
	/// Not logged: successor lookups routinely miss at the chain tip.
	pub fn block_not_found(resource: impl Into<String>) -> Self {
		Self::BlockNotFound(resource.into())
	}

	/// Creates a new response parse error with logging
	pub fn response_parse_error(msg: impl Into<String>) -> Self {
		let error = Self::ResponseParseError(msg.into());
		error!("{}", error.format_message());
		error
	}

	/// Creates a new internal error with logging
	pub fn internal_error(msg: impl Into<String>) -> Self {
		let error = Self::InternalError(msg.into());
		error!("{}", error.format_message());
		error
	}

	pub fn is_not_found(&self) -> bool {
		matches!(self, Self::BlockNotFound(_))
	}
}

// Standard error trait implementations
impl std::fmt::Display for BlockChainError {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.format_message())
	}
}

impl std::error::Error for BlockChainError {}

impl From<serde_json::Error> for BlockChainError {
	fn from(err: serde_json::Error) -> Self {
		Self::response_parse_error(err.to_string())
	}
}
