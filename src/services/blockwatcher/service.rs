//! Live head following.
//!
//! [`HeadMonitor::run`] keeps a heads subscription open for as long as it is not
//! cancelled, resubscribing whenever the node closes the stream, and turns accepted heads
//! into resolved blocks handed to a [`BlockSink`].

use futures::StreamExt;
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::services::{
	blockchain::NodeService,
	blockwatcher::{BlockSink, BlockWatcherError, HeadCheckResult, HeadTracker},
	resolver::BlockResolver,
};

/// Resolves once the shutdown flag is set; never resolves if the sender is dropped first
pub async fn cancelled(shutdown: &mut watch::Receiver<bool>) {
	if shutdown.wait_for(|stopped| *stopped).await.is_err() {
		std::future::pending::<()>().await;
	}
}

pub struct HeadMonitor<N: NodeService + ?Sized> {
	resolver: BlockResolver<N>,
}

impl<N: NodeService + ?Sized> HeadMonitor<N> {
	pub fn new(resolver: BlockResolver<N>) -> Self {
		Self { resolver }
	}

	/// Follows the chain head until cancelled or a fatal error occurs
	///
	/// Cancellation returns `Ok(())` and abandons any queued blocks. On a fatal error the
	/// sink is drained first; if the consumer itself failed, its error is returned.
	pub async fn run(
		&self,
		mut sink: BlockSink,
		mut shutdown: watch::Receiver<bool>,
	) -> Result<(), BlockWatcherError> {
		info!(chain_id = %self.resolver.chain_id(), "Starting head monitor");

		match self.follow(&mut sink, &mut shutdown).await {
			Ok(()) => {
				sink.cancel().await;
				info!("Head monitor stopped");
				Ok(())
			}
			Err(error) => match (error, sink.close().await) {
				(BlockWatcherError::SinkError(_), Err(consumer_error)) => Err(consumer_error),
				(error, Err(consumer_error)) => {
					warn!(error = %consumer_error, "Consumer failed while shutting down");
					Err(error)
				}
				(error, Ok(())) => Err(error),
			},
		}
	}

	async fn follow(
		&self,
		sink: &mut BlockSink,
		shutdown: &mut watch::Receiver<bool>,
	) -> Result<(), BlockWatcherError> {
		let chain_id = self.resolver.chain_id().to_string();
		let mut tracker = HeadTracker::new();

		loop {
			let mut heads = tokio::select! {
				biased;
				_ = cancelled(shutdown) => return Ok(()),
				subscription = self.resolver.node().subscribe_heads(&chain_id) => subscription?,
			};
			debug!(chain_id = %chain_id, "Subscribed to heads");

			loop {
				let next = tokio::select! {
					biased;
					_ = cancelled(shutdown) => return Ok(()),
					next = heads.next() => next,
				};

				let Some(head) = next else {
					debug!(
						last_level = ?tracker.last_level(),
						"Head stream closed by node, resubscribing"
					);
					break;
				};
				let head = head?;

				match tracker.check(head.level) {
					HeadCheckResult::Accepted => {}
					HeadCheckResult::Duplicate { last_seen } => {
						debug!(level = head.level, last_seen, "Dropping duplicate head");
						continue;
					}
					HeadCheckResult::Stale { last_seen, received } => {
						debug!(level = received, last_seen, "Dropping stale head");
						continue;
					}
				}

				let block = tokio::select! {
					biased;
					_ = cancelled(shutdown) => return Ok(()),
					resolved = self.resolver.resolve(&head.hash, false) => resolved?,
				};
				debug!(level = block.level(), hash = %block.hash, "Dispatching block");

				tokio::select! {
					biased;
					_ = cancelled(shutdown) => return Ok(()),
					dispatched = sink.dispatch(block) => dispatched?,
				}
			}
		}
	}
}
