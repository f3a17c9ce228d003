//! Node client interfaces and implementations.
//!
//! Provides abstractions and concrete implementations for talking to Tezos nodes:
//!
//! - Generic node service trait
//! - Tezos client and head stream decoding
//! - HTTP transport with endpoint rotation
//! - Error handling for node operations

mod client;
mod clients;
mod error;
mod transports;

pub use client::{HeadStream, NodeService};
pub use clients::{HeadDecoder, TezosClient};
pub use error::BlockChainError;
pub use transports::{
	join_path, BlockchainTransport, ByteStream, EndpointManager, HttpTransportClient,
	RotatingTransport, ROTATE_ON_ERROR_CODES,
};
