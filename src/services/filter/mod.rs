//! Operation classification and aggregation.
//!
//! - Kind allow-sets validated against the operation taxonomy
//! - Normalization of operation contents into reporting records
//! - Per-block volume, fee and reward totals

mod aggregate;
mod classify;
mod error;
mod kind_filter;

pub mod helpers;

pub use aggregate::aggregate;
pub use classify::{classify, classify_contents, raw_operations};
pub use error::FilterError;
pub use kind_filter::{KindFilter, ALL_KINDS};
