//! Node client implementations.
//!
//! - Tezos client speaking the node's REST RPC

mod tezos {
	pub mod client;
	pub mod heads;
}

pub use tezos::{client::TezosClient, heads::HeadDecoder};
