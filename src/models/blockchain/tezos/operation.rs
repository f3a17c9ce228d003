//! Operation groups and their content elements.
//!
//! Tezos operations are polymorphic on the `kind` tag. Each kind the adapter understands
//! gets its own variant carrying only the fields relevant to that kind. Kinds introduced by
//! later protocols decode as [`OperationContents::Unknown`] so the rest of the block stays
//! readable.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use serde_with::{serde_as, DisplayFromStr};

/// An operation group: one signed envelope holding one or more content elements
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Operation {
	#[serde(default)]
	pub protocol: String,
	#[serde(default)]
	pub chain_id: String,
	pub hash: String,
	pub branch: String,
	pub contents: Vec<OperationContents>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub signature: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum OperationContents {
	Endorsement(EndorsementOperation),
	SeedNonceRevelation(SeedNonceRevelationOperation),
	DoubleEndorsementEvidence(DoubleEndorsementEvidenceOperation),
	DoubleBakingEvidence(DoubleBakingEvidenceOperation),
	ActivateAccount(ActivateAccountOperation),
	Proposals(ProposalsOperation),
	Ballot(BallotOperation),
	Reveal(RevealOperation),
	Transaction(TransactionOperation),
	Origination(OriginationOperation),
	Delegation(DelegationOperation),
	/// Any kind outside the taxonomy; its fields are not kept
	#[serde(other)]
	Unknown,
}

impl OperationContents {
	/// Fee in mutez for the manager operations that pay one
	pub fn fee(&self) -> Option<u64> {
		match self {
			Self::Reveal(op) => Some(op.fee),
			Self::Transaction(op) => Some(op.fee),
			Self::Origination(op) => Some(op.fee),
			Self::Delegation(op) => Some(op.fee),
			_ => None,
		}
	}

	/// Balance updates recorded in the element's metadata
	pub fn balance_updates(&self) -> &[BalanceUpdate] {
		let metadata = match self {
			Self::Endorsement(op) => return &op.metadata.balance_updates,
			Self::Proposals(_) | Self::Ballot(_) | Self::Unknown => return &[],
			Self::SeedNonceRevelation(op) => &op.metadata,
			Self::DoubleEndorsementEvidence(op) => &op.metadata,
			Self::DoubleBakingEvidence(op) => &op.metadata,
			Self::ActivateAccount(op) => &op.metadata,
			Self::Reveal(op) => &op.metadata,
			Self::Transaction(op) => &op.metadata,
			Self::Origination(op) => &op.metadata,
			Self::Delegation(op) => &op.metadata,
		};
		&metadata.balance_updates
	}
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct OperationMetadata {
	#[serde(default)]
	pub balance_updates: Vec<BalanceUpdate>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub operation_result: Option<Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct EndorsementMetadata {
	#[serde(default)]
	pub balance_updates: Vec<BalanceUpdate>,
	pub delegate: String,
	#[serde(default)]
	pub slots: Vec<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EndorsementOperation {
	pub level: i64,
	pub metadata: EndorsementMetadata,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SeedNonceRevelationOperation {
	pub level: i64,
	pub nonce: String,
	#[serde(default)]
	pub metadata: OperationMetadata,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DoubleEndorsementEvidenceOperation {
	pub op1: Value,
	pub op2: Value,
	#[serde(default)]
	pub metadata: OperationMetadata,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DoubleBakingEvidenceOperation {
	pub bh1: Value,
	pub bh2: Value,
	#[serde(default)]
	pub metadata: OperationMetadata,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ActivateAccountOperation {
	pub pkh: String,
	pub secret: String,
	#[serde(default)]
	pub metadata: OperationMetadata,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProposalsOperation {
	pub source: String,
	pub period: i64,
	pub proposals: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BallotOperation {
	pub source: String,
	pub period: i64,
	pub proposal: String,
	pub ballot: String,
}

#[serde_as]
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RevealOperation {
	pub source: String,
	#[serde_as(as = "DisplayFromStr")]
	pub fee: u64,
	#[serde_as(as = "DisplayFromStr")]
	pub counter: u64,
	#[serde_as(as = "DisplayFromStr")]
	pub gas_limit: u64,
	#[serde_as(as = "DisplayFromStr")]
	pub storage_limit: u64,
	pub public_key: String,
	#[serde(default)]
	pub metadata: OperationMetadata,
}

#[serde_as]
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TransactionOperation {
	pub source: String,
	#[serde_as(as = "DisplayFromStr")]
	pub fee: u64,
	#[serde_as(as = "DisplayFromStr")]
	pub counter: u64,
	#[serde_as(as = "DisplayFromStr")]
	pub gas_limit: u64,
	#[serde_as(as = "DisplayFromStr")]
	pub storage_limit: u64,
	#[serde_as(as = "DisplayFromStr")]
	pub amount: u64,
	pub destination: String,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub parameters: Option<Value>,
	#[serde(default)]
	pub metadata: OperationMetadata,
}

#[serde_as]
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OriginationOperation {
	pub source: String,
	#[serde_as(as = "DisplayFromStr")]
	pub fee: u64,
	#[serde_as(as = "DisplayFromStr")]
	pub counter: u64,
	#[serde_as(as = "DisplayFromStr")]
	pub gas_limit: u64,
	#[serde_as(as = "DisplayFromStr")]
	pub storage_limit: u64,
	#[serde(rename = "managerPubkey", default, skip_serializing_if = "Option::is_none")]
	pub manager_pubkey: Option<String>,
	#[serde_as(as = "Option<DisplayFromStr>")]
	#[serde(skip_serializing_if = "Option::is_none")]
	pub balance: Option<u64>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub spendable: Option<bool>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub delegatable: Option<bool>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub delegate: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub script: Option<Value>,
	#[serde(default)]
	pub metadata: OperationMetadata,
}

#[serde_as]
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DelegationOperation {
	pub source: String,
	#[serde_as(as = "DisplayFromStr")]
	pub fee: u64,
	#[serde_as(as = "DisplayFromStr")]
	pub counter: u64,
	#[serde_as(as = "DisplayFromStr")]
	pub gas_limit: u64,
	#[serde_as(as = "DisplayFromStr")]
	pub storage_limit: u64,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub delegate: Option<String>,
	#[serde_as(as = "Option<DisplayFromStr>")]
	#[serde(skip_serializing_if = "Option::is_none")]
	pub balance: Option<u64>,
	#[serde(default)]
	pub metadata: OperationMetadata,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum BalanceUpdateKind {
	Contract,
	Freezer,
	#[serde(other)]
	Other,
}

/// Ledger-affecting side effect of a block or operation
#[serde_as]
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BalanceUpdate {
	pub kind: BalanceUpdateKind,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub category: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub contract: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub delegate: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub cycle: Option<i64>,
	#[serde_as(as = "DisplayFromStr")]
	pub change: i64,
}

impl BalanceUpdate {
	pub const REWARDS_CATEGORY: &'static str = "rewards";

	pub fn is_reward(&self) -> bool {
		self.category.as_deref() == Some(Self::REWARDS_CATEGORY)
	}
}
