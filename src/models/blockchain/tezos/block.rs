use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DisplayFromStr};
use std::ops::Deref;

use super::operation::{BalanceUpdate, Operation};

/// Block record as returned by `GET /chains/{chain}/blocks/{id}`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Block {
	pub protocol: String,
	pub chain_id: String,
	pub hash: String,
	pub header: BlockHeader,
	pub metadata: BlockMetadata,
	/// Operation groups, one list per validation pass
	#[serde(default)]
	pub operations: Vec<Vec<Operation>>,
}

impl Block {
	pub fn level(&self) -> i64 {
		self.header.level
	}
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BlockHeader {
	pub level: i64,
	pub proto: u32,
	pub predecessor: String,
	pub timestamp: DateTime<Utc>,
	pub validation_pass: u32,
	pub operations_hash: String,
	#[serde(default)]
	pub fitness: Vec<String>,
	pub context: String,
	#[serde(default)]
	pub priority: i64,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub proof_of_work_nonce: Option<String>,
	pub signature: String,
}

#[serde_as]
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct BlockMetadata {
	pub protocol: String,
	pub next_protocol: String,
	#[serde(default)]
	pub max_operations_ttl: i64,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub baker: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub level: Option<LevelInfo>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub voting_period_kind: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub nonce_hash: Option<String>,
	#[serde_as(as = "Option<DisplayFromStr>")]
	#[serde(skip_serializing_if = "Option::is_none")]
	pub consumed_gas: Option<u64>,
	#[serde(default)]
	pub deactivated: Vec<String>,
	#[serde(default)]
	pub balance_updates: Vec<BalanceUpdate>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct LevelInfo {
	pub level: i64,
	pub level_position: i64,
	pub cycle: i64,
	pub cycle_position: i64,
	pub voting_period: i64,
	pub voting_period_position: i64,
	pub expected_commitment: bool,
}

/// A block together with its successor, if the chain has produced one.
///
/// The successor is enrichment only: it is `None` both when the next block does not
/// exist yet and when fetching it failed. When present its level is always
/// `block.level() + 1`.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ResolvedBlock {
	#[serde(flatten)]
	block: Block,
	#[serde(skip)]
	successor: Option<Block>,
}

impl ResolvedBlock {
	pub fn new(block: Block) -> Self {
		Self {
			block,
			successor: None,
		}
	}

	/// Attaches a successor, discarding it unless it directly follows the block.
	pub fn with_successor(mut self, successor: Option<Block>) -> Self {
		self.successor = successor.filter(|next| next.level() == self.block.level() + 1);
		self
	}

	pub fn block(&self) -> &Block {
		&self.block
	}

	pub fn successor(&self) -> Option<&Block> {
		self.successor.as_ref()
	}
}

impl Deref for ResolvedBlock {
	type Target = Block;

	fn deref(&self) -> &Self::Target {
		&self.block
	}
}

/// A single entry of the `/monitor/heads/{chain}` stream
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HeadNotification {
	pub hash: String,
	pub level: i64,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub proto: Option<u32>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub predecessor: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub timestamp: Option<DateTime<Utc>>,
}

impl HeadNotification {
	pub fn new(hash: impl Into<String>, level: i64) -> Self {
		Self {
			hash: hash.into(),
			level,
			proto: None,
			predecessor: None,
			timestamp: None,
		}
	}
}
