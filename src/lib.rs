//! Tezos block inspection client.
//!
//! Resolves human-friendly block references against a Tezos node, follows the chain head
//! and turns block operations into uniform records and per-block totals.
//!
//! # Modules
//! - `bootstrap`: Command context and command runners
//! - `models`: Wire records, reporting records and configuration
//! - `services`: Node adapter, resolver, head monitor, classification and rendering
//! - `utils`: Logging, HTTP retry helpers and test builders

pub mod bootstrap;
pub mod models;
pub mod services;
pub mod utils;
