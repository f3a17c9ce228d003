//! Head monitoring pipeline.
//!
//! - Subscription loop with resubscribe on stream end
//! - Ordering and deduplication of heads
//! - Fan-out of resolved blocks to a single sink

mod error;
mod service;
mod sink;
mod tracker;

pub use error::BlockWatcherError;
pub use service::{cancelled, HeadMonitor};
pub use sink::{BlockSink, QueueSink, RenderFn};
pub use tracker::{HeadCheckResult, HeadTracker};
