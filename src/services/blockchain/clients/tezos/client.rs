//! Tezos node client implementation.
//!
//! Fetches blocks by any identifier the node understands and subscribes to the
//! head monitoring stream of a chain.

use async_trait::async_trait;
use futures::{future, stream, StreamExt};
use tracing::{instrument, warn};

use crate::{
	models::{Block, Network},
	services::blockchain::{
		client::{HeadStream, NodeService},
		clients::HeadDecoder,
		transports::{BlockchainTransport, HttpTransportClient},
		BlockChainError,
	},
};

/// Client implementation for Tezos nodes
#[derive(Clone)]
pub struct TezosClient<T: Send + Sync + Clone> {
	/// The underlying transport client for RPC communication
	http_client: T,
}

impl<T: Send + Sync + Clone> TezosClient<T> {
	/// Creates a new Tezos client instance with a specific transport client
	pub fn new_with_transport(http_client: T) -> Self {
		Self { http_client }
	}
}

impl TezosClient<HttpTransportClient> {
	/// Creates a new Tezos client instance
	///
	/// # Arguments
	/// * `network` - Network configuration containing RPC endpoints and chain details
	///
	/// # Returns
	/// * `Result<Self, BlockChainError>` - New client instance or connection error
	pub async fn new(network: &Network) -> Result<Self, BlockChainError> {
		let http_client = HttpTransportClient::new(network).await?;
		Ok(Self::new_with_transport(http_client))
	}
}

#[async_trait]
impl<T: Send + Sync + Clone + BlockchainTransport> NodeService for TezosClient<T> {
	#[instrument(skip(self))]
	async fn get_block(&self, chain_id: &str, block_id: &str) -> Result<Block, BlockChainError> {
		let path = format!("chains/{}/blocks/{}", chain_id, block_id);
		let response = self.http_client.send_raw_request(&path).await?;

		serde_json::from_value(response).map_err(|e| {
			BlockChainError::response_parse_error(format!("Failed to decode block {}: {}", path, e))
		})
	}

	/// Opens `monitor/heads/{chain}` and decodes it into notifications
	///
	/// The returned stream ends after the first error item. A partial notification left
	/// when the node closes the stream is discarded.
	#[instrument(skip(self))]
	async fn subscribe_heads(&self, chain_id: &str) -> Result<HeadStream, BlockChainError> {
		let path = format!("monitor/heads/{}", chain_id);
		let chunks = self.http_client.open_stream(&path).await?;

		// `None` marks the end of the node's stream
		let heads = chunks
			.map(Some)
			.chain(stream::once(future::ready(None)))
			.scan(Some(HeadDecoder::new()), |state, chunk| {
				let Some(decoder) = state.as_mut() else {
					return future::ready(None);
				};
				let Some(chunk) = chunk else {
					if decoder.has_pending() {
						warn!("Head stream closed inside a notification, discarding partial data");
					}
					return future::ready(None);
				};
				let items: Vec<_> = match chunk.and_then(|bytes| decoder.push(&bytes)) {
					Ok(heads) => heads.into_iter().map(Ok).collect(),
					Err(e) => {
						*state = None;
						vec![Err(e)]
					}
				};
				future::ready(Some(stream::iter(items)))
			})
			.flatten()
			.boxed();

		Ok(heads)
	}
}
