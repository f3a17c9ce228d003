//! Bootstrap module for building the inspector context and running commands.
//!
//! The binary parses its arguments into a [`Network`] and hands it to
//! [`initialize_context`]. The resulting [`InspectorContext`] is passed explicitly to every
//! command, so no command reads configuration from ambient state.
//!
//! # Commands
//! - `run_block_command`: Prints or encodes block summaries, once or for every new head
//! - `run_operations_command`: Prints or encodes the operations of blocks, once or for every
//!   new head
//! - `inspect_operations`: Validates the kind filter, then connects and runs
//!   `run_operations_command`

use std::{error::Error, io::Write, sync::Arc};
use tokio::sync::watch;
use tracing::info;

use crate::{
	models::Network,
	services::{
		blockchain::{HttpTransportClient, NodeService, TezosClient},
		blockwatcher::{BlockSink, HeadMonitor},
		filter::{classify, KindFilter},
		render::{
			render_block_summary, EncoderView, OperationsTable, OutputEncoding, StructuredEncoder,
		},
		resolver::BlockResolver,
	},
};

/// Type alias for command results
pub type Result<T> = std::result::Result<T, Box<dyn Error + Send + Sync>>;

/// Reference used when a command is given none
pub const DEFAULT_REFERENCE: &str = "head";

/// Everything a command needs to talk to one chain
pub struct InspectorContext<N: NodeService + ?Sized> {
	network: Network,
	resolver: BlockResolver<N>,
}

impl<N: NodeService + ?Sized> InspectorContext<N> {
	pub fn new(network: Network, node: Arc<N>) -> Self {
		let resolver = BlockResolver::new(node, network.chain_id.clone());
		Self { network, resolver }
	}

	pub fn network(&self) -> &Network {
		&self.network
	}

	pub fn resolver(&self) -> &BlockResolver<N> {
		&self.resolver
	}
}

/// Connects to the network's node and builds the command context.
///
/// # Arguments
/// * `network` - Validated network configuration
///
/// # Returns
/// * `Result<InspectorContext<..>>` - Context holding a connected Tezos client
///
/// # Errors
/// Returns an error if none of the network's RPC endpoints answers
pub async fn initialize_context(
	network: Network,
) -> Result<InspectorContext<TezosClient<HttpTransportClient>>> {
	let client = TezosClient::new(&network).await?;
	Ok(InspectorContext::new(network, Arc::new(client)))
}

fn references_or_head(references: &[String]) -> Vec<&str> {
	if references.is_empty() {
		vec![DEFAULT_REFERENCE]
	} else {
		references.iter().map(String::as_str).collect()
	}
}

/// Prints the block view.
///
/// Without `watch`, every reference is resolved before anything is written, so a failed
/// lookup produces no partial output. With `watch`, references are ignored and the chain
/// head is followed until `shutdown` is set.
///
/// # Arguments
/// * `ctx` - Command context
/// * `references` - Block references; empty means `head`
/// * `encoding` - Text summary or structured encoding
/// * `watch` - Follow new heads instead of resolving `references`
/// * `writer` - Destination of the rendered output
/// * `shutdown` - Cancellation flag for watch mode
pub async fn run_block_command<N, W>(
	ctx: &InspectorContext<N>,
	references: &[String],
	encoding: OutputEncoding,
	watch: bool,
	mut writer: W,
	shutdown: watch::Receiver<bool>,
) -> Result<()>
where
	N: NodeService + ?Sized,
	W: Write + Send + 'static,
{
	if watch {
		let sink = if encoding.is_structured() {
			BlockSink::encoder(StructuredEncoder::new(writer, encoding, EncoderView::Blocks)?)
		} else {
			BlockSink::render(move |block| render_block_summary(&mut writer, block))
		};
		info!(network = %ctx.network.slug, "Watching blocks");
		HeadMonitor::new(ctx.resolver.clone()).run(sink, shutdown).await?;
		return Ok(());
	}

	let references = references_or_head(references);
	let blocks = ctx
		.resolver
		.resolve_all(references, !encoding.is_structured())
		.await?;

	if encoding.is_structured() {
		StructuredEncoder::new(writer, encoding, EncoderView::Blocks)?.encode_batch(&blocks)?;
	} else {
		for block in &blocks {
			render_block_summary(&mut writer, block)?;
		}
	}
	Ok(())
}

/// Validates `kinds`, connects to the network and prints the operations view.
///
/// The kind list is parsed before the node is contacted, so an unknown alias is reported
/// even when no RPC endpoint answers.
///
/// # Arguments
/// * `network` - Validated network configuration
/// * `references` - Block references; empty means `head`
/// * `kinds` - Operation kind names or aliases; empty or `all` allows every kind
/// * `encoding` - Text table or structured encoding
/// * `watch` - Follow new heads instead of resolving `references`
/// * `writer` - Destination of the rendered output
/// * `shutdown` - Cancellation flag for watch mode
pub async fn inspect_operations<W>(
	network: Network,
	references: &[String],
	kinds: &[String],
	encoding: OutputEncoding,
	watch: bool,
	writer: W,
	shutdown: watch::Receiver<bool>,
) -> Result<()>
where
	W: Write + Send + 'static,
{
	let filter = KindFilter::parse(kinds)?;
	let ctx = initialize_context(network).await?;
	run_operations_command(&ctx, references, filter, encoding, watch, writer, shutdown).await
}

/// Prints the operations view.
///
/// In text watch mode rows are rendered by a background consumer fed through a bounded
/// queue of `Network::queue_capacity` blocks.
///
/// # Arguments
/// * `ctx` - Command context
/// * `references` - Block references; empty means `head`
/// * `filter` - Kinds to report
/// * `encoding` - Text table or structured encoding
/// * `watch` - Follow new heads instead of resolving `references`
/// * `writer` - Destination of the rendered output
/// * `shutdown` - Cancellation flag for watch mode
pub async fn run_operations_command<N, W>(
	ctx: &InspectorContext<N>,
	references: &[String],
	filter: KindFilter,
	encoding: OutputEncoding,
	watch: bool,
	writer: W,
	shutdown: watch::Receiver<bool>,
) -> Result<()>
where
	N: NodeService + ?Sized,
	W: Write + Send + 'static,
{
	if watch {
		let sink = if encoding.is_structured() {
			BlockSink::encoder(StructuredEncoder::new(
				writer,
				encoding,
				EncoderView::Operations(filter),
			)?)
		} else {
			let mut table = OperationsTable::new(writer);
			table.write_header()?;
			BlockSink::queue(ctx.network.queue_capacity(), move |block| {
				let records = classify(&block, &filter);
				table.write_records(&records)
			})
		};
		info!(network = %ctx.network.slug, "Watching operations");
		HeadMonitor::new(ctx.resolver.clone()).run(sink, shutdown).await?;
		return Ok(());
	}

	let references = references_or_head(references);
	let blocks = ctx
		.resolver
		.resolve_all(references, !encoding.is_structured())
		.await?;

	if encoding.is_structured() {
		StructuredEncoder::new(writer, encoding, EncoderView::Operations(filter))?
			.encode_batch(&blocks)?;
	} else {
		let records: Vec<_> = blocks
			.iter()
			.flat_map(|block| classify(block, &filter))
			.collect();
		OperationsTable::new(writer).write_records(&records)?;
	}
	Ok(())
}
