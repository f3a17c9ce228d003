//! Network transport implementations for node clients.
//!
//! The Tezos RPC is plain REST over HTTP: unary `GET`s answering one JSON document,
//! plus chunked monitoring endpoints that stream documents for as long as the
//! connection lives.

mod endpoint_manager;
mod http;

use async_trait::async_trait;
use futures::stream::BoxStream;
use serde_json::Value;

use crate::services::blockchain::BlockChainError;

pub use endpoint_manager::EndpointManager;
pub use http::HttpTransportClient;

/// HTTP status codes that trigger RPC endpoint rotation
/// - 429: Too Many Requests - indicates rate limiting from the current endpoint
pub const ROTATE_ON_ERROR_CODES: [u16; 1] = [429];

/// Raw body chunks of a streaming response, split wherever the network split them
pub type ByteStream = BoxStream<'static, Result<Vec<u8>, BlockChainError>>;

/// Joins a node base URL and an RPC path without doubling the separator
pub fn join_path(base: &str, path: &str) -> String {
	format!(
		"{}/{}",
		base.trim_end_matches('/'),
		path.trim_start_matches('/')
	)
}

/// Base trait for all node transport clients
#[async_trait]
pub trait BlockchainTransport: Send + Sync {
	/// Get the current URL being used by the transport
	async fn get_current_url(&self) -> String;

	/// Sends a unary `GET` for an RPC path and decodes the body as JSON
	async fn send_raw_request(&self, path: &str) -> Result<Value, BlockChainError>;

	/// Opens a streaming `GET` for an RPC path
	async fn open_stream(&self, path: &str) -> Result<ByteStream, BlockChainError>;
}

/// Extension trait for transports that support URL rotation
#[async_trait]
pub trait RotatingTransport: BlockchainTransport {
	/// Attempts to establish a connection with a new URL
	async fn try_connect(&self, url: &str) -> Result<(), BlockChainError>;

	/// Updates the client with a new URL
	async fn update_client(&self, url: &str) -> Result<(), BlockChainError>;
}
