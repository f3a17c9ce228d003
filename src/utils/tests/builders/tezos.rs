//! Test helper utilities for Tezos blocks and operations
//!
//! - `BlockBuilder`: Builder for creating test Block instances
//! - `OperationBuilder`: Builder for creating test operation groups
//! - `contents`: Constructors for individual operation content elements

use chrono::{DateTime, TimeZone, Utc};

use crate::models::{
	BalanceUpdate, BalanceUpdateKind, Block, BlockHeader, BlockMetadata, HeadNotification,
	LevelInfo, Operation, OperationContents,
};

/// Hash assigned to the block at `level` unless one is set explicitly
pub fn block_hash(level: i64) -> String {
	format!("BLock{:0>12}", level)
}

/// Builder for creating test Block instances
pub struct BlockBuilder {
	level: i64,
	hash: Option<String>,
	predecessor: Option<String>,
	timestamp: DateTime<Utc>,
	priority: i64,
	baker: Option<String>,
	cycle: Option<i64>,
	consumed_gas: Option<u64>,
	balance_updates: Vec<BalanceUpdate>,
	operations: Vec<Vec<Operation>>,
}

impl Default for BlockBuilder {
	fn default() -> Self {
		Self {
			level: 1,
			hash: None,
			predecessor: None,
			timestamp: Utc
				.with_ymd_and_hms(2019, 3, 1, 12, 0, 0)
				.single()
				.unwrap_or_default(),
			priority: 0,
			baker: Some("tz1TestBaker".to_string()),
			cycle: Some(0),
			consumed_gas: Some(0),
			balance_updates: Vec::new(),
			operations: vec![Vec::new(), Vec::new(), Vec::new(), Vec::new()],
		}
	}
}

impl BlockBuilder {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn level(mut self, level: i64) -> Self {
		self.level = level;
		self
	}

	pub fn hash(mut self, hash: &str) -> Self {
		self.hash = Some(hash.to_string());
		self
	}

	pub fn predecessor(mut self, predecessor: &str) -> Self {
		self.predecessor = Some(predecessor.to_string());
		self
	}

	pub fn timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
		self.timestamp = timestamp;
		self
	}

	pub fn priority(mut self, priority: i64) -> Self {
		self.priority = priority;
		self
	}

	pub fn baker(mut self, baker: Option<&str>) -> Self {
		self.baker = baker.map(str::to_string);
		self
	}

	pub fn cycle(mut self, cycle: Option<i64>) -> Self {
		self.cycle = cycle;
		self
	}

	pub fn consumed_gas(mut self, gas: Option<u64>) -> Self {
		self.consumed_gas = gas;
		self
	}

	pub fn balance_update(mut self, update: BalanceUpdate) -> Self {
		self.balance_updates.push(update);
		self
	}

	/// Appends a group to the given validation pass, creating passes as needed
	pub fn operation(mut self, pass: usize, operation: Operation) -> Self {
		if self.operations.len() <= pass {
			self.operations.resize_with(pass + 1, Vec::new);
		}
		self.operations[pass].push(operation);
		self
	}

	pub fn build(self) -> Block {
		let level_info = self.cycle.map(|cycle| LevelInfo {
			level: self.level,
			level_position: self.level - 1,
			cycle,
			cycle_position: 0,
			voting_period: 0,
			voting_period_position: 0,
			expected_commitment: false,
		});

		Block {
			protocol: "PsddFKi32cMJ2qPjf43Qv5GDWLDPZb3T3bF6fLKiF5HtvHNU7aP".to_string(),
			chain_id: "NetXdQprcVkpaWU".to_string(),
			hash: self.hash.unwrap_or_else(|| block_hash(self.level)),
			header: BlockHeader {
				level: self.level,
				proto: 1,
				predecessor: self
					.predecessor
					.unwrap_or_else(|| block_hash(self.level - 1)),
				timestamp: self.timestamp,
				validation_pass: 4,
				operations_hash: "LLoTestOperationsHash".to_string(),
				fitness: vec!["00".to_string()],
				context: "CoTestContext".to_string(),
				priority: self.priority,
				proof_of_work_nonce: None,
				signature: "sigTestSignature".to_string(),
			},
			metadata: BlockMetadata {
				protocol: "PsddFKi32cMJ2qPjf43Qv5GDWLDPZb3T3bF6fLKiF5HtvHNU7aP".to_string(),
				next_protocol: "PsddFKi32cMJ2qPjf43Qv5GDWLDPZb3T3bF6fLKiF5HtvHNU7aP".to_string(),
				max_operations_ttl: 60,
				baker: self.baker,
				level: level_info,
				voting_period_kind: Some("proposal".to_string()),
				nonce_hash: None,
				consumed_gas: self.consumed_gas,
				deactivated: Vec::new(),
				balance_updates: self.balance_updates,
			},
			operations: self.operations,
		}
	}

	/// Head notification announcing the block this builder would produce
	pub fn head(&self) -> HeadNotification {
		HeadNotification::new(
			self.hash.clone().unwrap_or_else(|| block_hash(self.level)),
			self.level,
		)
	}
}

/// Builder for creating test operation groups
pub struct OperationBuilder {
	hash: String,
	contents: Vec<OperationContents>,
}

impl OperationBuilder {
	pub fn new(hash: &str) -> Self {
		Self {
			hash: hash.to_string(),
			contents: Vec::new(),
		}
	}

	pub fn content(mut self, contents: OperationContents) -> Self {
		self.contents.push(contents);
		self
	}

	pub fn build(self) -> Operation {
		Operation {
			protocol: "PsddFKi32cMJ2qPjf43Qv5GDWLDPZb3T3bF6fLKiF5HtvHNU7aP".to_string(),
			chain_id: "NetXdQprcVkpaWU".to_string(),
			hash: self.hash,
			branch: "BLockBranch".to_string(),
			contents: self.contents,
			signature: Some("sigTestSignature".to_string()),
		}
	}
}

pub fn contract_update(contract: &str, change: i64) -> BalanceUpdate {
	BalanceUpdate {
		kind: BalanceUpdateKind::Contract,
		category: None,
		contract: Some(contract.to_string()),
		delegate: None,
		cycle: None,
		change,
	}
}

pub fn freezer_update(delegate: &str, category: &str, change: i64) -> BalanceUpdate {
	BalanceUpdate {
		kind: BalanceUpdateKind::Freezer,
		category: Some(category.to_string()),
		contract: None,
		delegate: Some(delegate.to_string()),
		cycle: Some(0),
		change,
	}
}

pub fn reward_update(delegate: &str, change: i64) -> BalanceUpdate {
	freezer_update(delegate, BalanceUpdate::REWARDS_CATEGORY, change)
}

/// Constructors for individual operation content elements
pub mod contents {
	use serde_json::json;

	use crate::models::{
		ActivateAccountOperation, BalanceUpdate, BallotOperation, DelegationOperation,
		DoubleBakingEvidenceOperation, DoubleEndorsementEvidenceOperation, EndorsementMetadata,
		EndorsementOperation, OperationContents, OperationMetadata, OriginationOperation,
		ProposalsOperation, RevealOperation, SeedNonceRevelationOperation, TransactionOperation,
	};

	fn metadata(balance_updates: Vec<BalanceUpdate>) -> OperationMetadata {
		OperationMetadata {
			balance_updates,
			operation_result: None,
		}
	}

	pub fn endorsement(
		level: i64,
		delegate: &str,
		balance_updates: Vec<BalanceUpdate>,
	) -> OperationContents {
		OperationContents::Endorsement(EndorsementOperation {
			level,
			metadata: EndorsementMetadata {
				balance_updates,
				delegate: delegate.to_string(),
				slots: vec![0],
			},
		})
	}

	pub fn seed_nonce_revelation(level: i64) -> OperationContents {
		OperationContents::SeedNonceRevelation(SeedNonceRevelationOperation {
			level,
			nonce: "00".repeat(32),
			metadata: OperationMetadata::default(),
		})
	}

	pub fn double_endorsement_evidence() -> OperationContents {
		OperationContents::DoubleEndorsementEvidence(DoubleEndorsementEvidenceOperation {
			op1: json!({ "branch": "BLockA" }),
			op2: json!({ "branch": "BLockB" }),
			metadata: OperationMetadata::default(),
		})
	}

	pub fn double_baking_evidence() -> OperationContents {
		OperationContents::DoubleBakingEvidence(DoubleBakingEvidenceOperation {
			bh1: json!({ "level": 1 }),
			bh2: json!({ "level": 1 }),
			metadata: OperationMetadata::default(),
		})
	}

	pub fn activate_account(pkh: &str, balance_updates: Vec<BalanceUpdate>) -> OperationContents {
		OperationContents::ActivateAccount(ActivateAccountOperation {
			pkh: pkh.to_string(),
			secret: "41f98b15efc63fa893d61d7d6eee4a2ce9427ac4".to_string(),
			metadata: metadata(balance_updates),
		})
	}

	pub fn proposals(source: &str) -> OperationContents {
		OperationContents::Proposals(ProposalsOperation {
			source: source.to_string(),
			period: 10,
			proposals: vec!["PtTestProposal".to_string()],
		})
	}

	pub fn ballot(source: &str) -> OperationContents {
		OperationContents::Ballot(BallotOperation {
			source: source.to_string(),
			period: 10,
			proposal: "PtTestProposal".to_string(),
			ballot: "yay".to_string(),
		})
	}

	pub fn reveal(source: &str, fee: u64) -> OperationContents {
		OperationContents::Reveal(RevealOperation {
			source: source.to_string(),
			fee,
			counter: 1,
			gas_limit: 10_000,
			storage_limit: 0,
			public_key: "edpkTestPublicKey".to_string(),
			metadata: OperationMetadata::default(),
		})
	}

	pub fn transaction(
		source: &str,
		destination: &str,
		amount: u64,
		fee: u64,
	) -> OperationContents {
		OperationContents::Transaction(TransactionOperation {
			source: source.to_string(),
			fee,
			counter: 2,
			gas_limit: 10_300,
			storage_limit: 0,
			amount,
			destination: destination.to_string(),
			parameters: None,
			metadata: OperationMetadata::default(),
		})
	}

	pub fn origination(source: &str, balance: Option<u64>, fee: u64) -> OperationContents {
		OperationContents::Origination(OriginationOperation {
			source: source.to_string(),
			fee,
			counter: 3,
			gas_limit: 10_000,
			storage_limit: 257,
			manager_pubkey: Some(source.to_string()),
			balance,
			spendable: Some(true),
			delegatable: Some(true),
			delegate: None,
			script: None,
			metadata: OperationMetadata::default(),
		})
	}

	pub fn delegation(source: &str, delegate: Option<&str>, fee: u64) -> OperationContents {
		OperationContents::Delegation(DelegationOperation {
			source: source.to_string(),
			fee,
			counter: 4,
			gas_limit: 10_000,
			storage_limit: 0,
			delegate: delegate.map(str::to_string),
			balance: None,
			metadata: OperationMetadata::default(),
		})
	}
}
