//! Incremental decoding of the head monitoring stream.
//!
//! The node writes one JSON document per new head with no framing. Chunk boundaries
//! are arbitrary: a chunk may hold several documents, or end in the middle of one.

use serde_json::Deserializer;

use crate::{models::HeadNotification, services::blockchain::BlockChainError};

/// Buffers raw chunks and yields every head notification completed so far
#[derive(Debug, Default)]
pub struct HeadDecoder {
	buffer: Vec<u8>,
}

impl HeadDecoder {
	pub fn new() -> Self {
		Self::default()
	}

	/// Appends a chunk and decodes all complete documents, in stream order
	///
	/// An incomplete trailing document stays buffered for the next chunk. A document that
	/// is complete but malformed fails with `ResponseParseError`.
	pub fn push(&mut self, chunk: &[u8]) -> Result<Vec<HeadNotification>, BlockChainError> {
		self.buffer.extend_from_slice(chunk);

		let mut heads = Vec::new();
		let mut consumed = 0;
		let mut documents =
			Deserializer::from_slice(&self.buffer).into_iter::<HeadNotification>();

		loop {
			match documents.next() {
				Some(Ok(head)) => {
					heads.push(head);
					consumed = documents.byte_offset();
				}
				Some(Err(e)) if e.is_eof() => break,
				Some(Err(e)) => {
					return Err(BlockChainError::response_parse_error(format!(
						"Invalid head notification: {}",
						e
					)));
				}
				None => {
					consumed = documents.byte_offset();
					break;
				}
			}
		}

		self.buffer.drain(..consumed);
		Ok(heads)
	}

	/// Whether a partial document is waiting for more bytes
	pub fn has_pending(&self) -> bool {
		self.buffer.iter().any(|byte| !byte.is_ascii_whitespace())
	}
}
