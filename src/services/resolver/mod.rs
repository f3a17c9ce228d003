//! Block reference resolution.
//!
//! Turns compact reference strings (`head`, `head~3`, `1000+10`, a block hash) into
//! resolved blocks by way of the node service.

mod error;
mod reference;
mod service;

pub use error::ResolverError;
pub use reference::{Anchor, BlockReference};
pub use service::BlockResolver;
