//! Core services implementing the inspector's business logic.
//!
//! - `blockchain`: Node service adapter and HTTP transport
//! - `blockwatcher`: Head monitoring pipeline
//! - `filter`: Operation classification and aggregation
//! - `render`: Structured encoders and text layouts
//! - `resolver`: Block reference resolution

pub mod blockchain;
pub mod blockwatcher;
pub mod filter;
pub mod render;
pub mod resolver;
