//! Output rendering for blocks and operations.
//!
//! - Structured JSON / YAML encoders
//! - Fixed text layouts for block summaries and operation tables

mod encoder;
mod error;
mod template;

pub use encoder::{BlockEncoder, EncoderView, OutputEncoding, StructuredEncoder};
pub use error::RenderError;
pub use template::{
	format_operation_row, render_block_summary, OperationsTable, OPERATIONS_HEADER, TEZ_SYMBOL,
};
