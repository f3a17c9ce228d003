//! Core domain models.
//!
//! - Networks: Tezos node endpoint definitions and connection details

mod network;

pub use network::{Network, RpcUrl, DEFAULT_CHAIN_ID, DEFAULT_RPC_URL};
