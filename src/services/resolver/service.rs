//! Block reference resolution against a node.

use std::sync::Arc;
use tracing::instrument;

use crate::{
	models::{Block, ResolvedBlock},
	services::{
		blockchain::NodeService,
		resolver::{Anchor, BlockReference, ResolverError},
	},
};

/// Maps block references onto node lookups for one chain
pub struct BlockResolver<N: NodeService + ?Sized> {
	node: Arc<N>,
	chain_id: String,
}

impl<N: NodeService + ?Sized> Clone for BlockResolver<N> {
	fn clone(&self) -> Self {
		Self {
			node: Arc::clone(&self.node),
			chain_id: self.chain_id.clone(),
		}
	}
}

impl<N: NodeService + ?Sized> BlockResolver<N> {
	pub fn new(node: Arc<N>, chain_id: impl Into<String>) -> Self {
		Self {
			node,
			chain_id: chain_id.into(),
		}
	}

	pub fn chain_id(&self) -> &str {
		&self.chain_id
	}

	pub fn node(&self) -> &Arc<N> {
		&self.node
	}

	/// Resolves a reference to a block, optionally enriched with its successor
	///
	/// Lookup failures propagate without retry. A failed successor lookup only leaves
	/// the successor empty.
	#[instrument(skip(self), fields(chain_id = %self.chain_id))]
	pub async fn resolve(
		&self,
		reference: &str,
		want_successor: bool,
	) -> Result<ResolvedBlock, ResolverError> {
		let reference = BlockReference::parse(reference)?;
		let block = self.fetch_reference(&reference).await?;
		let resolved = ResolvedBlock::new(block);

		if !want_successor {
			return Ok(resolved);
		}

		let successor = self.fetch_successor(resolved.level()).await;
		Ok(resolved.with_successor(successor))
	}

	/// Resolves references in order, stopping at the first failure
	pub async fn resolve_all<I, S>(
		&self,
		references: I,
		want_successor: bool,
	) -> Result<Vec<ResolvedBlock>, ResolverError>
	where
		I: IntoIterator<Item = S>,
		S: AsRef<str>,
	{
		let mut blocks = Vec::new();
		for reference in references {
			blocks.push(self.resolve(reference.as_ref(), want_successor).await?);
		}
		Ok(blocks)
	}

	async fn fetch_reference(&self, reference: &BlockReference) -> Result<Block, ResolverError> {
		match &reference.anchor {
			Anchor::Level(level) => {
				let target = reference.target_level(*level)?;
				self.fetch_level(target).await
			}
			Anchor::Symbolic(id) => {
				let anchor = self.node.get_block(&self.chain_id, id).await?;
				if reference.offset == 0 {
					return Ok(anchor);
				}
				let target = reference.target_level(anchor.level())?;
				self.fetch_level(target).await
			}
		}
	}

	async fn fetch_level(&self, level: i64) -> Result<Block, ResolverError> {
		Ok(self
			.node
			.get_block(&self.chain_id, &level.to_string())
			.await?)
	}

	async fn fetch_successor(&self, level: i64) -> Option<Block> {
		let next = level.checked_add(1)?;
		match self.node.get_block(&self.chain_id, &next.to_string()).await {
			Ok(block) => Some(block),
			Err(e) => {
				tracing::debug!(level = next, error = %e, "Successor unavailable");
				None
			}
		}
	}
}
