use async_trait::async_trait;
use futures::StreamExt;
use std::{
	io::Write,
	sync::{
		atomic::{AtomicUsize, Ordering},
		Arc, Mutex,
	},
	time::Duration,
};
use tokio::sync::{watch, Notify};

use tezos_inspector::{
	models::{Block, HeadNotification},
	services::{
		blockchain::{BlockChainError, HeadStream, NodeService},
		blockwatcher::{BlockSink, BlockWatcherError, HeadMonitor},
		render::{EncoderView, OutputEncoding, RenderError, StructuredEncoder},
		resolver::BlockResolver,
	},
	utils::tests::builders::tezos::block_hash,
};

use crate::integration::mocks::{chain_of, heads, node_serving, MockNodeService};

/// Serves `subscriptions` in order, then a stream that never yields
fn subscribing(node: &mut MockNodeService, subscriptions: Vec<HeadStream>) {
	let mut subscriptions = subscriptions.into_iter();
	node.expect_subscribe_heads().returning(move |_| {
		Ok(subscriptions
			.next()
			.unwrap_or_else(|| futures::stream::pending().boxed()))
	});
}

fn monitor(node: MockNodeService) -> HeadMonitor<MockNodeService> {
	HeadMonitor::new(BlockResolver::new(Arc::new(node), "main"))
}

/// Render sink recording levels and requesting shutdown once `stop_at` is rendered
fn recording_sink(
	stop_at: i64,
	shutdown_tx: watch::Sender<bool>,
) -> (BlockSink, Arc<Mutex<Vec<i64>>>) {
	let rendered = Arc::new(Mutex::new(Vec::new()));
	let rendered_clone = rendered.clone();
	let sink = BlockSink::render(move |block| {
		rendered_clone.lock().unwrap().push(block.level());
		if block.level() == stop_at {
			let _ = shutdown_tx.send(true);
		}
		Ok(())
	});
	(sink, rendered)
}

/// Node whose block lookups never complete, signalling when one starts
struct StalledNode {
	lookup_started: Arc<Notify>,
}

#[async_trait]
impl NodeService for StalledNode {
	async fn get_block(&self, _chain_id: &str, _block_id: &str) -> Result<Block, BlockChainError> {
		self.lookup_started.notify_one();
		std::future::pending().await
	}

	async fn subscribe_heads(&self, _chain_id: &str) -> Result<HeadStream, BlockChainError> {
		Ok(heads(&[1]).chain(futures::stream::pending()).boxed())
	}
}

#[derive(Clone, Default)]
struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

impl Write for SharedBuffer {
	fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
		self.0.lock().unwrap().write(buf)
	}

	fn flush(&mut self) -> std::io::Result<()> {
		Ok(())
	}
}

#[tokio::test]
async fn test_resubscribes_after_stream_end() {
	let (mut node, _) = node_serving(chain_of(10));
	subscribing(&mut node, vec![heads(&[1, 2]), heads(&[2, 3])]);

	let (shutdown_tx, shutdown_rx) = watch::channel(false);
	let (sink, rendered) = recording_sink(3, shutdown_tx);

	monitor(node).run(sink, shutdown_rx).await.unwrap();

	assert_eq!(*rendered.lock().unwrap(), vec![1, 2, 3]);
}

#[tokio::test]
async fn test_drops_duplicate_and_stale_heads() {
	let (mut node, requested) = node_serving(chain_of(10));
	subscribing(&mut node, vec![heads(&[5, 3, 5, 4, 6])]);

	let (shutdown_tx, shutdown_rx) = watch::channel(false);
	let (sink, rendered) = recording_sink(6, shutdown_tx);

	monitor(node).run(sink, shutdown_rx).await.unwrap();

	assert_eq!(*rendered.lock().unwrap(), vec![5, 6]);
	assert_eq!(
		*requested.lock().unwrap(),
		vec![block_hash(5), block_hash(6)]
	);
}

#[tokio::test]
async fn test_cancelled_before_subscribing() {
	let mut node = MockNodeService::new();
	node.expect_subscribe_heads().times(0);
	node.expect_get_block().times(0);

	let (shutdown_tx, shutdown_rx) = watch::channel(true);
	let (sink, rendered) = recording_sink(1, shutdown_tx);

	monitor(node).run(sink, shutdown_rx).await.unwrap();
	assert!(rendered.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_subscription_failure_is_fatal() {
	let mut node = MockNodeService::new();
	node.expect_subscribe_heads()
		.times(1)
		.returning(|_| Err(BlockChainError::connection_error("node unreachable")));

	let (shutdown_tx, shutdown_rx) = watch::channel(false);
	let (sink, _) = recording_sink(1, shutdown_tx);

	let err = monitor(node).run(sink, shutdown_rx).await.unwrap_err();
	assert!(matches!(err, BlockWatcherError::NetworkError(_)));
}

#[tokio::test]
async fn test_stream_error_is_fatal() {
	let (mut node, _) = node_serving(chain_of(10));
	let items: Vec<Result<HeadNotification, BlockChainError>> = vec![
		Ok(HeadNotification::new(block_hash(1), 1)),
		Err(BlockChainError::response_parse_error("garbage on stream")),
	];
	subscribing(&mut node, vec![futures::stream::iter(items).boxed()]);

	let (shutdown_tx, shutdown_rx) = watch::channel(false);
	let (sink, rendered) = recording_sink(99, shutdown_tx);

	let err = monitor(node).run(sink, shutdown_rx).await.unwrap_err();
	assert!(matches!(err, BlockWatcherError::NetworkError(_)));
	assert_eq!(*rendered.lock().unwrap(), vec![1]);
}

#[tokio::test]
async fn test_unresolvable_head_is_fatal() {
	let (mut node, _) = node_serving(chain_of(10));
	subscribing(&mut node, vec![heads(&[9, 50])]);

	let (shutdown_tx, shutdown_rx) = watch::channel(false);
	let (sink, rendered) = recording_sink(99, shutdown_tx);

	let err = monitor(node).run(sink, shutdown_rx).await.unwrap_err();
	assert!(matches!(err, BlockWatcherError::ResolutionError(_)));
	assert_eq!(*rendered.lock().unwrap(), vec![9]);
}

#[tokio::test]
async fn test_queue_is_drained_before_fatal_error_returns() {
	let (mut node, _) = node_serving(chain_of(10));
	let mut items: Vec<Result<HeadNotification, BlockChainError>> = (1..=4)
		.map(|level| Ok(HeadNotification::new(block_hash(level), level)))
		.collect();
	items.push(Err(BlockChainError::connection_error("stream interrupted")));
	subscribing(&mut node, vec![futures::stream::iter(items).boxed()]);

	let consumed = Arc::new(Mutex::new(Vec::new()));
	let consumed_clone = consumed.clone();
	let sink = BlockSink::queue(2, move |block| {
		consumed_clone.lock().unwrap().push(block.level());
		Ok(())
	});

	let (_shutdown_tx, shutdown_rx) = watch::channel(false);
	let err = monitor(node).run(sink, shutdown_rx).await.unwrap_err();

	assert!(matches!(err, BlockWatcherError::NetworkError(_)));
	assert_eq!(*consumed.lock().unwrap(), vec![1, 2, 3, 4]);
}

#[tokio::test]
async fn test_consumer_error_takes_precedence() {
	let (mut node, _) = node_serving(chain_of(30));
	let levels: Vec<i64> = (1..=30).collect();
	subscribing(&mut node, vec![heads(&levels)]);

	let sink = BlockSink::queue(1, |block| {
		if block.level() == 2 {
			return Err(RenderError::Task("broken pipe".to_string()));
		}
		Ok(())
	});

	let (_shutdown_tx, shutdown_rx) = watch::channel(false);
	let err = monitor(node).run(sink, shutdown_rx).await.unwrap_err();

	match err {
		BlockWatcherError::SinkError(msg) => assert!(msg.contains("broken pipe")),
		other => panic!("unexpected error: {}", other),
	}
}

#[tokio::test]
async fn test_encoder_sink_writes_one_document_per_block() {
	let (mut node, _) = node_serving(chain_of(10));
	let (shutdown_tx, shutdown_rx) = watch::channel(false);

	let mut calls = 0;
	node.expect_subscribe_heads().returning(move |_| {
		calls += 1;
		if calls > 1 {
			let _ = shutdown_tx.send(true);
			return Ok(futures::stream::pending().boxed());
		}
		Ok(heads(&[7, 8]))
	});

	let buffer = SharedBuffer::default();
	let encoder =
		StructuredEncoder::new(buffer.clone(), OutputEncoding::Json, EncoderView::Blocks).unwrap();

	monitor(node)
		.run(BlockSink::encoder(encoder), shutdown_rx)
		.await
		.unwrap();

	let output = String::from_utf8(buffer.0.lock().unwrap().clone()).unwrap();
	let levels: Vec<i64> = serde_json::Deserializer::from_str(&output)
		.into_iter::<serde_json::Value>()
		.map(|document| document.unwrap()["header"]["level"].as_i64().unwrap())
		.collect();
	assert_eq!(levels, vec![7, 8]);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_cancel_while_queue_is_full() {
	let (mut node, _) = node_serving(chain_of(100));
	let levels: Vec<i64> = (1..=100).collect();
	subscribing(&mut node, vec![heads(&levels)]);

	let consumed = Arc::new(AtomicUsize::new(0));
	let consumed_clone = consumed.clone();
	let sink = BlockSink::queue(1, move |_block| {
		consumed_clone.fetch_add(1, Ordering::SeqCst);
		std::thread::sleep(Duration::from_millis(100));
		Ok(())
	});

	let (shutdown_tx, shutdown_rx) = watch::channel(false);
	let run = tokio::spawn(async move { monitor(node).run(sink, shutdown_rx).await });

	while consumed.load(Ordering::SeqCst) == 0 {
		tokio::time::sleep(Duration::from_millis(5)).await;
	}
	// One block is being rendered, one waits in the queue, the producer waits on the third
	tokio::time::sleep(Duration::from_millis(30)).await;
	shutdown_tx.send(true).unwrap();

	let result = tokio::time::timeout(Duration::from_secs(5), run)
		.await
		.expect("monitor did not stop after cancellation")
		.unwrap();
	assert!(result.is_ok());
	assert!(consumed.load(Ordering::SeqCst) <= 2);
}

#[tokio::test]
async fn test_cancel_during_head_resolution() {
	let lookup_started = Arc::new(Notify::new());
	let node = StalledNode {
		lookup_started: lookup_started.clone(),
	};
	let monitor = HeadMonitor::new(BlockResolver::new(Arc::new(node), "main"));

	let (shutdown_tx, shutdown_rx) = watch::channel(false);
	let rendered = Arc::new(Mutex::new(Vec::new()));
	let rendered_clone = rendered.clone();
	let sink = BlockSink::render(move |block| {
		rendered_clone.lock().unwrap().push(block.level());
		Ok(())
	});

	let run = tokio::spawn(async move { monitor.run(sink, shutdown_rx).await });
	lookup_started.notified().await;
	shutdown_tx.send(true).unwrap();

	let result = tokio::time::timeout(Duration::from_secs(5), run)
		.await
		.expect("monitor did not stop after cancellation")
		.unwrap();
	assert!(result.is_ok());
	assert!(rendered.lock().unwrap().is_empty());
}
