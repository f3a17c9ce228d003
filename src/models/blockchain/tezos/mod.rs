//! Tezos data structures.
//!
//! Wire records mirror the node RPC JSON. Reporting records (`OperationRecord`,
//! `BlockAggregate`) are derived from resolved blocks and never fetched.

mod block;
mod operation;
mod report;

pub use block::{Block, BlockHeader, BlockMetadata, HeadNotification, LevelInfo, ResolvedBlock};
pub use operation::{
	ActivateAccountOperation, BalanceUpdate, BalanceUpdateKind, BallotOperation,
	DelegationOperation, DoubleBakingEvidenceOperation, DoubleEndorsementEvidenceOperation,
	EndorsementMetadata, EndorsementOperation, Operation, OperationContents, OperationMetadata,
	OriginationOperation, ProposalsOperation, RevealOperation, SeedNonceRevelationOperation,
	TransactionOperation,
};
pub use report::{BlockAggregate, OperationKind, OperationRecord};
