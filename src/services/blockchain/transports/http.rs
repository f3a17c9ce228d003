//! HTTP transport implementation for Tezos node interactions.
//!
//! Supports:
//! - Multiple RPC endpoints with automatic failover
//! - Configurable retry policies for unary requests
//! - Connection health checks against the chain id endpoint
//! - Long-lived chunked streams for monitoring endpoints

use async_trait::async_trait;
use futures::StreamExt;
use reqwest::{Client, StatusCode};
use serde_json::Value;
use std::time::Duration;
use url::Url;

use crate::{
	models::Network,
	services::blockchain::{
		transports::{
			join_path, BlockchainTransport, ByteStream, EndpointManager, RotatingTransport,
		},
		BlockChainError,
	},
	utils::{create_retryable_http_client, HttpRetryConfig, TransientErrorRetryStrategy},
};

/// HTTP transport client for Tezos node interactions
///
/// The client is thread-safe and can be shared across multiple tasks.
#[derive(Clone, Debug)]
pub struct HttpTransportClient {
	/// Plain client used for probes and streams; streams must not be cut by a request timeout
	pub client: Client,
	/// Manages RPC endpoint rotation and request handling for high availability
	endpoint_manager: EndpointManager,
	/// RPC path probed to check that an endpoint serves the configured chain
	test_connection_path: String,
	request_timeout: Duration,
}

impl HttpTransportClient {
	/// Creates a new HTTP transport client with automatic endpoint management
	///
	/// Endpoints are tried in order of descending weight until one answers the
	/// `chains/{chain}/chain_id` probe. Endpoints with weight 0 are never used.
	///
	/// # Arguments
	/// * `network` - Network configuration containing RPC URLs, weights, and other details
	///
	/// # Returns
	/// * `Result<Self, BlockChainError>` - New client instance or connection error
	pub async fn new(network: &Network) -> Result<Self, BlockChainError> {
		let mut rpc_urls: Vec<_> = network
			.rpc_urls
			.iter()
			.filter(|rpc_url| rpc_url.type_ == "rpc" && rpc_url.weight > 0)
			.collect();

		rpc_urls.sort_by(|a, b| b.weight.cmp(&a.weight));

		let request_timeout = Duration::from_millis(network.request_timeout_ms());

		let http_client = reqwest::ClientBuilder::new()
			.pool_idle_timeout(Duration::from_secs(90))
			.pool_max_idle_per_host(32)
			.connect_timeout(Duration::from_secs(20))
			.build()
			.map_err(|e| {
				BlockChainError::internal_error(format!("Failed to create HTTP client: {}", e))
			})?;

		let unary_client = reqwest::ClientBuilder::new()
			.pool_idle_timeout(Duration::from_secs(90))
			.pool_max_idle_per_host(32)
			.timeout(request_timeout)
			.connect_timeout(Duration::from_secs(20))
			.build()
			.map_err(|e| {
				BlockChainError::internal_error(format!("Failed to create HTTP client: {}", e))
			})?;

		let client = create_retryable_http_client(
			&HttpRetryConfig::default(),
			unary_client,
			Some(TransientErrorRetryStrategy),
		);

		let test_connection_path = format!("chains/{}/chain_id", network.chain_id);

		for rpc_url in rpc_urls.iter() {
			if Url::parse(&rpc_url.url).is_err() {
				continue;
			}

			let probe = http_client
				.get(join_path(&rpc_url.url, &test_connection_path))
				.timeout(request_timeout)
				.send()
				.await;

			match probe {
				Ok(response) if response.status().is_success() => {
					let fallback_urls: Vec<String> = rpc_urls
						.iter()
						.filter(|url| url.url != rpc_url.url)
						.map(|url| url.url.clone())
						.collect();

					tracing::debug!(url = %rpc_url.url, "Connected to node");

					return Ok(Self {
						client: http_client,
						endpoint_manager: EndpointManager::new(
							client,
							rpc_url.url.as_ref(),
							fallback_urls,
						),
						test_connection_path,
						request_timeout,
					});
				}
				Ok(response) => {
					tracing::warn!(
						url = %rpc_url.url,
						status = %response.status(),
						"Node probe failed"
					);
				}
				Err(e) => {
					tracing::warn!(url = %rpc_url.url, error = %e, "Node unreachable");
				}
			}
		}

		Err(BlockChainError::connection_error(
			"All RPC URLs failed to connect",
		))
	}
}

#[async_trait]
impl BlockchainTransport for HttpTransportClient {
	async fn get_current_url(&self) -> String {
		self.endpoint_manager.active_url.read().await.clone()
	}

	async fn send_raw_request(&self, path: &str) -> Result<Value, BlockChainError> {
		self.endpoint_manager.send_raw_request(self, path).await
	}

	/// Opens a chunked stream against the active endpoint
	///
	/// Status handling matches unary requests. Once the stream is open, a failure while
	/// reading a chunk ends it with a `ConnectionError` item.
	async fn open_stream(&self, path: &str) -> Result<ByteStream, BlockChainError> {
		let url = join_path(&self.get_current_url().await, path);

		let response = self.client.get(&url).send().await.map_err(|e| {
			BlockChainError::connection_error(format!("Failed to open stream {}: {}", url, e))
		})?;

		let status = response.status();
		if status == StatusCode::NOT_FOUND {
			return Err(BlockChainError::block_not_found(path));
		}
		if !status.is_success() {
			let error_body = response.text().await.unwrap_or_default();
			return Err(BlockChainError::request_error(format!(
				"{} returned {}: {}",
				url, status, error_body
			)));
		}

		Ok(response
			.bytes_stream()
			.map(|chunk| {
				chunk.map(|bytes| bytes.to_vec()).map_err(|e| {
					BlockChainError::connection_error(format!("Stream interrupted: {}", e))
				})
			})
			.boxed())
	}
}

#[async_trait]
impl RotatingTransport for HttpTransportClient {
	async fn try_connect(&self, url: &str) -> Result<(), BlockChainError> {
		let url = Url::parse(url)
			.map_err(|_| BlockChainError::connection_error(format!("Invalid URL: {}", url)))?;

		let response = self
			.client
			.get(join_path(url.as_str(), &self.test_connection_path))
			.timeout(self.request_timeout)
			.send()
			.await
			.map_err(|e| {
				BlockChainError::connection_error(format!("Failed to connect to {}: {}", url, e))
			})?;

		if response.status().is_success() {
			Ok(())
		} else {
			Err(BlockChainError::connection_error(format!(
				"Failed to connect to {}: {}",
				url,
				response.status().as_u16()
			)))
		}
	}

	async fn update_client(&self, url: &str) -> Result<(), BlockChainError> {
		let parsed_url = Url::parse(url)
			.map_err(|_| BlockChainError::connection_error(format!("Invalid URL: {}", url)))?;
		// Normalize the URL by trimming trailing slash if present
		let normalized_url = parsed_url.as_str().trim_end_matches('/');

		// Only the endpoint manager's active URL changes; the HTTP client is shared
		let mut active_url = self.endpoint_manager.active_url.write().await;
		*active_url = normalized_url.to_string();
		Ok(())
	}
}
