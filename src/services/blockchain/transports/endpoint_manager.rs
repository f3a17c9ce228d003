//! Manages the rotation of node RPC endpoints
//!
//! Provides methods for rotating between multiple URLs and sending requests to the active endpoint
//! with automatic fallback to other URLs on failure.
use reqwest::StatusCode;
use reqwest_middleware::ClientWithMiddleware;
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::services::blockchain::{
	transports::{join_path, RotatingTransport, ROTATE_ON_ERROR_CODES},
	BlockChainError,
};

/// Manages the rotation of node RPC endpoints
///
/// # Fields
/// * `active_url` - The current active URL
/// * `fallback_urls` - A list of fallback URLs to rotate to
/// * `client` - The client to use for the endpoint manager
/// * `rotation_lock` - A lock for managing the rotation process
#[derive(Clone, Debug)]
pub struct EndpointManager {
	pub active_url: Arc<RwLock<String>>,
	pub fallback_urls: Arc<RwLock<Vec<String>>>,
	client: ClientWithMiddleware,
	rotation_lock: Arc<tokio::sync::Mutex<()>>,
}

/// Outcome of a single `GET` against one URL
#[derive(Debug)]
enum SingleRequestAttemptOutcome {
	/// Got a response (status might still be an error)
	Success(reqwest::Response),
	/// Error during send (e.g., connection, timeout)
	NetworkError(reqwest_middleware::Error),
}

impl EndpointManager {
	/// Creates a new rotating URL client
	///
	/// # Arguments
	/// * `client` - The client to use for the endpoint manager
	/// * `active_url` - The initial active URL
	/// * `fallback_urls` - A list of fallback URLs to rotate to
	pub fn new(client: ClientWithMiddleware, active_url: &str, fallback_urls: Vec<String>) -> Self {
		Self {
			active_url: Arc::new(RwLock::new(active_url.to_string())),
			fallback_urls: Arc::new(RwLock::new(fallback_urls)),
			rotation_lock: Arc::new(tokio::sync::Mutex::new(())),
			client,
		}
	}

	/// Rotates to the next available URL
	///
	/// The previous active URL is pushed to the back of the fallback list. A fallback that
	/// fails its connectivity probe stays in the list.
	pub async fn rotate_url<T: RotatingTransport>(
		&self,
		transport: &T,
	) -> Result<(), BlockChainError> {
		let _guard = self.rotation_lock.lock().await;

		let current_active = self.active_url.read().await.clone();

		let new_url = {
			let mut fallback_urls = self.fallback_urls.write().await;
			match fallback_urls.iter().position(|url| url != &current_active) {
				Some(pos) => fallback_urls.remove(pos),
				None => {
					return Err(BlockChainError::connection_error(format!(
						"No fallback URLs available for rotation. Current active URL: {}",
						current_active
					)));
				}
			}
		};

		if transport.try_connect(&new_url).await.is_ok() {
			transport.update_client(&new_url).await?;

			let mut active_url = self.active_url.write().await;
			let mut fallback_urls = self.fallback_urls.write().await;
			tracing::debug!(
				"Successful rotation - from: {}, to: {}",
				current_active,
				new_url
			);
			fallback_urls.push(current_active);
			*active_url = new_url;
			Ok(())
		} else {
			let mut fallback_urls = self.fallback_urls.write().await;
			fallback_urls.push(new_url.clone());
			Err(BlockChainError::connection_error(format!(
				"Failed to connect to new URL: {}",
				new_url
			)))
		}
	}

	/// Rotates when fallbacks exist and, for HTTP failures, the status is a rotation code
	///
	/// # Returns
	/// * `Ok(true)` - Rotation succeeded, caller should retry the request
	/// * `Ok(false)` - No rotation was needed or possible
	async fn should_attempt_rotation<T: RotatingTransport>(
		&self,
		transport: &T,
		status: Option<StatusCode>,
	) -> Result<bool, BlockChainError> {
		let should_rotate = {
			let fallback_urls = self.fallback_urls.read().await;
			!fallback_urls.is_empty()
				&& status.is_none_or(|s| ROTATE_ON_ERROR_CODES.contains(&s.as_u16()))
		};

		if should_rotate {
			self.rotate_url(transport).await?;
			Ok(true)
		} else {
			Ok(false)
		}
	}

	async fn attempt_request_on_url(&self, url: &str) -> SingleRequestAttemptOutcome {
		match self
			.client
			.get(url)
			.header("Accept", "application/json")
			.send()
			.await
		{
			Ok(response) => SingleRequestAttemptOutcome::Success(response),
			Err(network_error) => SingleRequestAttemptOutcome::NetworkError(network_error),
		}
	}

	/// Sends a `GET` for an RPC path with automatic URL rotation on failure
	///
	/// # Behavior
	/// - 404 maps to `BlockNotFound` and is never rotated
	/// - 429 and network errors rotate to a fallback URL when one is available
	/// - Any other non-success status fails with `RequestError`
	pub async fn send_raw_request<T: RotatingTransport>(
		&self,
		transport: &T,
		path: &str,
	) -> Result<Value, BlockChainError> {
		loop {
			let current_url = self.active_url.read().await.clone();
			let request_url = join_path(&current_url, path);

			match self.attempt_request_on_url(&request_url).await {
				SingleRequestAttemptOutcome::Success(response) => {
					let status = response.status();
					if status.is_success() {
						let body = response.bytes().await.map_err(|e| {
							BlockChainError::connection_error(format!(
								"Failed to read response from {}: {}",
								request_url, e
							))
						})?;
						return serde_json::from_slice(&body).map_err(|e| {
							BlockChainError::response_parse_error(format!(
								"Invalid JSON from {}: {}",
								request_url, e
							))
						});
					}

					if status == StatusCode::NOT_FOUND {
						return Err(BlockChainError::block_not_found(path));
					}

					let error_body = response.text().await.unwrap_or_default();
					tracing::warn!(
						"Request to {} failed with status {}: {}",
						request_url,
						status,
						error_body
					);

					if self.should_attempt_rotation(transport, Some(status)).await? {
						tracing::debug!(
							"Rotation successful after HTTP error status {}, retrying request.",
							status
						);
						continue;
					}

					return Err(BlockChainError::request_error(format!(
						"{} returned {}: {}",
						request_url, status, error_body
					)));
				}
				SingleRequestAttemptOutcome::NetworkError(network_error) => {
					tracing::warn!(
						"Network error while sending request to {}: {}",
						request_url,
						network_error
					);

					if self.should_attempt_rotation(transport, None).await? {
						tracing::debug!(
							"Rotation successful after network error, retrying request."
						);
						continue;
					}

					return Err(BlockChainError::connection_error(format!(
						"Failed to send request to {}: {}",
						request_url, network_error
					)));
				}
			}
		}
	}
}
