//! Structured (JSON / YAML) output.

use serde::Serialize;
use std::io::Write;

use crate::{
	models::ResolvedBlock,
	services::{
		filter::{raw_operations, KindFilter},
		render::RenderError,
	},
};

/// Output encoding selected on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputEncoding {
	#[default]
	Text,
	Json,
	Yaml,
}

impl OutputEncoding {
	pub fn is_structured(&self) -> bool {
		!matches!(self, Self::Text)
	}
}

/// What a structured encoder emits for each block
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EncoderView {
	/// The block record itself
	Blocks,
	/// The operation groups holding at least one allowed kind
	Operations(KindFilter),
}

/// Per-block consumer used by the head monitor's encoder sink
pub trait BlockEncoder: Send {
	fn encode_block(&mut self, block: &ResolvedBlock) -> Result<(), RenderError>;
}

/// Writes JSON or YAML documents to a writer
///
/// JSON documents are pretty-printed and newline terminated. YAML documents are each
/// introduced by a `---` marker so that a stream of them stays valid YAML.
pub struct StructuredEncoder<W: Write + Send> {
	writer: W,
	encoding: OutputEncoding,
	view: EncoderView,
}

impl<W: Write + Send> StructuredEncoder<W> {
	/// Fails with `RenderError::Task` when `encoding` is `Text`
	pub fn new(
		writer: W,
		encoding: OutputEncoding,
		view: EncoderView,
	) -> Result<Self, RenderError> {
		if !encoding.is_structured() {
			return Err(RenderError::Task(
				"text output has no structured encoder".to_string(),
			));
		}
		Ok(Self {
			writer,
			encoding,
			view,
		})
	}

	/// Encodes one document
	pub fn encode<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<(), RenderError> {
		match self.encoding {
			OutputEncoding::Json => {
				serde_json::to_writer_pretty(&mut self.writer, value)?;
				writeln!(self.writer)?;
			}
			OutputEncoding::Yaml => {
				writeln!(self.writer, "---")?;
				serde_yaml::to_writer(&mut self.writer, value)?;
			}
			OutputEncoding::Text => {}
		}
		self.writer.flush()?;
		Ok(())
	}

	/// Encodes a batch of resolved blocks as a single document
	pub fn encode_batch(&mut self, blocks: &[ResolvedBlock]) -> Result<(), RenderError> {
		match &self.view {
			EncoderView::Blocks => {
				let records: Vec<_> = blocks.iter().map(ResolvedBlock::block).collect();
				self.encode(&records)
			}
			EncoderView::Operations(filter) => {
				let groups: Vec<_> = blocks
					.iter()
					.flat_map(|block| raw_operations(block.block(), filter))
					.collect();
				self.encode(&groups)
			}
		}
	}

	pub fn into_inner(self) -> W {
		self.writer
	}
}

impl<W: Write + Send> BlockEncoder for StructuredEncoder<W> {
	fn encode_block(&mut self, block: &ResolvedBlock) -> Result<(), RenderError> {
		match &self.view {
			EncoderView::Blocks => self.encode(block.block()),
			EncoderView::Operations(filter) => {
				let groups = raw_operations(block.block(), filter);
				self.encode(&groups)
			}
		}
	}
}
