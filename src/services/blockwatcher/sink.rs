//! Consumers of resolved blocks.
//!
//! One sink is chosen before a monitor run starts and receives every dispatched block in
//! order. The queue sink moves rendering to its own task behind a bounded channel, so a
//! slow terminal throttles the head reader instead of growing memory.

use tokio::{
	sync::{mpsc, oneshot},
	task::JoinHandle,
};

use crate::{
	models::ResolvedBlock,
	services::{
		blockwatcher::BlockWatcherError,
		render::{BlockEncoder, RenderError},
	},
};

/// Per-block render callback
pub type RenderFn = Box<dyn FnMut(&ResolvedBlock) -> Result<(), RenderError> + Send>;

pub enum BlockSink {
	/// Structured encoder invoked per block
	Encoder(Box<dyn BlockEncoder>),
	/// Caller-supplied render function invoked per block
	Render(RenderFn),
	/// Bounded queue drained by a background task
	Queue(QueueSink),
}

impl BlockSink {
	pub fn encoder(encoder: impl BlockEncoder + 'static) -> Self {
		Self::Encoder(Box::new(encoder))
	}

	pub fn render<F>(render: F) -> Self
	where
		F: FnMut(&ResolvedBlock) -> Result<(), RenderError> + Send + 'static,
	{
		Self::Render(Box::new(render))
	}

	/// Spawns the queue consumer; must be called inside a tokio runtime
	pub fn queue<F>(capacity: usize, consumer: F) -> Self
	where
		F: FnMut(ResolvedBlock) -> Result<(), RenderError> + Send + 'static,
	{
		Self::Queue(QueueSink::spawn(capacity, consumer))
	}

	/// Hands a block to the consumer, waiting while the queue is full
	pub async fn dispatch(&mut self, block: ResolvedBlock) -> Result<(), BlockWatcherError> {
		match self {
			Self::Encoder(encoder) => Ok(encoder.encode_block(&block)?),
			Self::Render(render) => Ok(render(&block)?),
			Self::Queue(queue) => queue.send(block).await,
		}
	}

	/// Finishes the run: the queue is closed and fully drained before returning
	///
	/// Returns the consumer's error, if it failed.
	pub async fn close(self) -> Result<(), BlockWatcherError> {
		match self {
			Self::Queue(queue) => Ok(queue.close().await?),
			Self::Encoder(_) | Self::Render(_) => Ok(()),
		}
	}

	/// Abandons the run: queued blocks are dropped and the consumer stopped
	pub async fn cancel(self) {
		if let Self::Queue(queue) = self {
			queue.cancel().await;
		}
	}
}

/// Bounded producer/consumer queue with a completion signal
pub struct QueueSink {
	sender: Option<mpsc::Sender<ResolvedBlock>>,
	done: oneshot::Receiver<Result<(), RenderError>>,
	handle: JoinHandle<()>,
}

impl QueueSink {
	pub fn spawn<F>(capacity: usize, mut consumer: F) -> Self
	where
		F: FnMut(ResolvedBlock) -> Result<(), RenderError> + Send + 'static,
	{
		let (sender, mut receiver) = mpsc::channel::<ResolvedBlock>(capacity.max(1));
		let (done_tx, done) = oneshot::channel();

		let handle = tokio::spawn(async move {
			let mut outcome = Ok(());
			while let Some(block) = receiver.recv().await {
				if let Err(e) = consumer(block) {
					outcome = Err(e);
					break;
				}
			}
			let _ = done_tx.send(outcome);
		});

		Self {
			sender: Some(sender),
			done,
			handle,
		}
	}

	async fn send(&mut self, block: ResolvedBlock) -> Result<(), BlockWatcherError> {
		let sender = self
			.sender
			.as_ref()
			.ok_or_else(|| BlockWatcherError::sink_error("render queue already closed"))?;

		sender
			.send(block)
			.await
			.map_err(|_| BlockWatcherError::sink_error("render queue closed by consumer"))
	}

	/// Closes the queue and waits for the consumer to drain it
	pub async fn close(mut self) -> Result<(), RenderError> {
		self.sender.take();
		match self.done.await {
			Ok(outcome) => outcome,
			Err(_) => Err(RenderError::Task(
				"render task ended without signaling completion".to_string(),
			)),
		}
	}

	/// Stops the consumer without draining
	pub async fn cancel(mut self) {
		self.sender.take();
		self.handle.abort();
		let _ = self.handle.await;
	}
}
