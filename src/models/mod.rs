//! Domain models and data structures for block inspection.
//!
//! - `blockchain`: Tezos wire records and derived reporting records
//! - `config`: Configuration loading and validation
//! - `core`: Core domain models (Network)

mod blockchain;
mod config;
mod core;

pub use blockchain::tezos::{
	ActivateAccountOperation, BalanceUpdate, BalanceUpdateKind, BallotOperation, Block,
	BlockAggregate, BlockHeader, BlockMetadata, DelegationOperation,
	DoubleBakingEvidenceOperation, DoubleEndorsementEvidenceOperation, EndorsementMetadata,
	EndorsementOperation, HeadNotification, LevelInfo, Operation, OperationContents,
	OperationKind, OperationMetadata, OperationRecord, OriginationOperation, ProposalsOperation,
	ResolvedBlock, RevealOperation, SeedNonceRevelationOperation, TransactionOperation,
};

pub use core::{Network, RpcUrl, DEFAULT_CHAIN_ID, DEFAULT_RPC_URL};

pub use config::{ConfigError, ConfigLoader, DEFAULT_NETWORKS_DIR};
