//! Normalized reporting records derived from resolved blocks.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::{block::ResolvedBlock, operation::OperationContents};

/// Closed taxonomy of operation kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperationKind {
	Endorsement,
	SeedNonceRevelation,
	DoubleEndorsementEvidence,
	DoubleBakingEvidence,
	ActivateAccount,
	Proposals,
	Ballot,
	Reveal,
	Transaction,
	Origination,
	Delegation,
}

impl OperationKind {
	pub const ALL: [OperationKind; 11] = [
		Self::Endorsement,
		Self::SeedNonceRevelation,
		Self::DoubleEndorsementEvidence,
		Self::DoubleBakingEvidence,
		Self::ActivateAccount,
		Self::Proposals,
		Self::Ballot,
		Self::Reveal,
		Self::Transaction,
		Self::Origination,
		Self::Delegation,
	];

	/// Name used by the node in the `kind` tag
	pub fn canonical_name(&self) -> &'static str {
		match self {
			Self::Endorsement => "endorsement",
			Self::SeedNonceRevelation => "seed_nonce_revelation",
			Self::DoubleEndorsementEvidence => "double_endorsement_evidence",
			Self::DoubleBakingEvidence => "double_baking_evidence",
			Self::ActivateAccount => "activate_account",
			Self::Proposals => "proposals",
			Self::Ballot => "ballot",
			Self::Reveal => "reveal",
			Self::Transaction => "transaction",
			Self::Origination => "origination",
			Self::Delegation => "delegation",
		}
	}

	pub fn short_alias(&self) -> Option<&'static str> {
		match self {
			Self::Endorsement => Some("end"),
			Self::ActivateAccount => Some("act"),
			Self::Proposals => Some("prop"),
			Self::Ballot => Some("bal"),
			Self::Reveal => Some("rev"),
			Self::Transaction => Some("tx"),
			Self::Origination => Some("orig"),
			Self::Delegation => Some("del"),
			Self::SeedNonceRevelation
			| Self::DoubleEndorsementEvidence
			| Self::DoubleBakingEvidence => None,
		}
	}

	pub fn title(&self) -> &'static str {
		match self {
			Self::Endorsement => "Endorsement",
			Self::SeedNonceRevelation => "Nonce",
			Self::DoubleEndorsementEvidence => "Double Endorsement Evidence",
			Self::DoubleBakingEvidence => "Double Baking Evidence",
			Self::ActivateAccount => "Activation",
			Self::Proposals => "Proposals",
			Self::Ballot => "Ballot",
			Self::Reveal => "Reveal",
			Self::Transaction => "Transaction",
			Self::Origination => "Origination",
			Self::Delegation => "Delegation",
		}
	}

	/// Looks up a kind by canonical name or short alias
	pub fn from_alias(alias: &str) -> Option<Self> {
		Self::ALL
			.into_iter()
			.find(|kind| kind.canonical_name() == alias || kind.short_alias() == Some(alias))
	}

	/// Taxonomy kind of a content element, `None` for kinds outside the taxonomy
	pub fn of(contents: &OperationContents) -> Option<Self> {
		let kind = match contents {
			OperationContents::Endorsement(_) => Self::Endorsement,
			OperationContents::SeedNonceRevelation(_) => Self::SeedNonceRevelation,
			OperationContents::DoubleEndorsementEvidence(_) => Self::DoubleEndorsementEvidence,
			OperationContents::DoubleBakingEvidence(_) => Self::DoubleBakingEvidence,
			OperationContents::ActivateAccount(_) => Self::ActivateAccount,
			OperationContents::Proposals(_) => Self::Proposals,
			OperationContents::Ballot(_) => Self::Ballot,
			OperationContents::Reveal(_) => Self::Reveal,
			OperationContents::Transaction(_) => Self::Transaction,
			OperationContents::Origination(_) => Self::Origination,
			OperationContents::Delegation(_) => Self::Delegation,
			OperationContents::Unknown => return None,
		};
		Some(kind)
	}
}

impl fmt::Display for OperationKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.canonical_name())
	}
}

/// Uniform view of a single operation content element.
///
/// Amount and fee are in tez (mutez scaled by 10⁻⁶) and are `None` when the kind
/// carries no such value.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct OperationRecord<'a> {
	pub kind: OperationKind,
	pub title: Option<&'static str>,
	pub source: Option<String>,
	pub destination: Option<String>,
	pub amount: Option<Decimal>,
	pub fee: Option<Decimal>,
	pub hash: String,
	#[serde(skip)]
	pub block: &'a ResolvedBlock,
}

impl OperationRecord<'_> {
	pub fn level(&self) -> i64 {
		self.block.level()
	}
}

/// Per-block totals, always recomputed from the block itself
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Default)]
pub struct BlockAggregate {
	pub operations_num: usize,
	pub volume: Decimal,
	pub fees: Decimal,
	pub rewards: Decimal,
}
