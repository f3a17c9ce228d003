//! Core node client interface.
//!
//! Everything above the transport layer talks to a Tezos node through [`NodeService`],
//! which keeps the resolver and the head monitor independent of HTTP.

use async_trait::async_trait;
use futures::stream::BoxStream;

use crate::{
	models::{Block, HeadNotification},
	services::blockchain::BlockChainError,
};

/// Stream of head notifications; ends when the node closes the connection
pub type HeadStream = BoxStream<'static, Result<HeadNotification, BlockChainError>>;

/// Defines the interface to a Tezos node
#[async_trait]
pub trait NodeService: Send + Sync {
	/// Fetches a full block record
	///
	/// # Arguments
	/// * `chain_id` - Chain selector, e.g. `main`
	/// * `block_id` - Any identifier the node accepts: a hash, a level, `head`, `head~3`
	///
	/// # Returns
	/// * `Result<Block, BlockChainError>` - `BlockNotFound` when the node answers 404
	async fn get_block(&self, chain_id: &str, block_id: &str) -> Result<Block, BlockChainError>;

	/// Opens the head monitoring stream for a chain
	async fn subscribe_heads(&self, chain_id: &str) -> Result<HeadStream, BlockChainError>;
}
