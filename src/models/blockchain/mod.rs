//! Blockchain-specific model implementations.
//!
//! Tezos is the only platform: blocks, operations and the reporting records derived
//! from them live in [`tezos`].

pub mod tezos;
