use log::error;
use std::error::Error;
use std::fmt;

use crate::services::{
	blockchain::BlockChainError, render::RenderError, resolver::ResolverError,
};

#[derive(Debug)]
pub enum BlockWatcherError {
	/// The head subscription could not be opened or failed mid-stream
	NetworkError(String),
	ProcessingError(String),
	/// An accepted head could not be resolved to a block
	ResolutionError(String),
	/// The consumer rejected a block or went away
	SinkError(String),
}

impl BlockWatcherError {
	fn format_message(&self) -> String {
		match self {
			Self::NetworkError(msg) => format!("Network error: {}", msg),
			Self::ProcessingError(msg) => format!("Processing error: {}", msg),
			Self::ResolutionError(msg) => format!("Resolution error: {}", msg),
			Self::SinkError(msg) => format!("Sink error: {}", msg),
		}
	}

	pub fn network_error(msg: impl Into<String>) -> Self {
		let error = Self::NetworkError(msg.into());
		error!("{}", error.format_message());
		error
	}

	pub fn processing_error(msg: impl Into<String>) -> Self {
		let error = Self::ProcessingError(msg.into());
		error!("{}", error.format_message());
		error
	}

	pub fn resolution_error(msg: impl Into<String>) -> Self {
		let error = Self::ResolutionError(msg.into());
		error!("{}", error.format_message());
		error
	}

	pub fn sink_error(msg: impl Into<String>) -> Self {
		let error = Self::SinkError(msg.into());
		error!("{}", error.format_message());
		error
	}
}

impl fmt::Display for BlockWatcherError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.format_message())
	}
}

impl Error for BlockWatcherError {}

impl From<BlockChainError> for BlockWatcherError {
	fn from(err: BlockChainError) -> Self {
		Self::network_error(err.to_string())
	}
}

impl From<ResolverError> for BlockWatcherError {
	fn from(err: ResolverError) -> Self {
		match err {
			ResolverError::ResolutionError(_) => Self::resolution_error(err.to_string()),
			ResolverError::TransportError(_) => Self::network_error(err.to_string()),
			ResolverError::ParseError(_) => Self::processing_error(err.to_string()),
		}
	}
}

impl From<RenderError> for BlockWatcherError {
	fn from(err: RenderError) -> Self {
		Self::sink_error(err.to_string())
	}
}
