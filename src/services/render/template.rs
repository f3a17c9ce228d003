//! Fixed text layouts for block summaries and operation tables.

use chrono::SecondsFormat;
use rust_decimal::Decimal;
use std::io::Write;

use crate::{
	models::{OperationRecord, ResolvedBlock},
	services::{filter::aggregate, render::RenderError},
};

/// Tez symbol appended to every amount
pub const TEZ_SYMBOL: &str = "ꜩ";

const ABSENT: &str = "--";

/// Header line of the operations table
pub const OPERATIONS_HEADER: &str = "   Block Type         From                                 To                                           Amount            Fee Hash";

fn tez(amount: Decimal) -> String {
	format!("{:.6} {}", amount, TEZ_SYMBOL)
}

/// Right-aligned amount column, or `--` in the same width
fn amount_column(amount: Option<Decimal>) -> String {
	match amount {
		Some(amount) => format!("{:>12} {}", format!("{:.6}", amount), TEZ_SYMBOL),
		None => format!("{:>14}", ABSENT),
	}
}

fn or_absent(value: Option<impl ToString>) -> String {
	value
		.map(|value| value.to_string())
		.unwrap_or_else(|| ABSENT.to_string())
}

/// Writes the summary of one block, totals included
pub fn render_block_summary<W: Write + ?Sized>(
	writer: &mut W,
	block: &ResolvedBlock,
) -> Result<(), RenderError> {
	let totals = aggregate(block);
	let header = &block.header;
	let metadata = &block.metadata;

	writeln!(writer, "Block:        {}", block.hash)?;
	writeln!(writer, "Predecessor:  {}", header.predecessor)?;
	writeln!(
		writer,
		"Successor:    {}",
		or_absent(block.successor().map(|next| &next.hash))
	)?;
	writeln!(
		writer,
		"Timestamp:    {}",
		header.timestamp.to_rfc3339_opts(SecondsFormat::Secs, true)
	)?;
	writeln!(writer, "Level:        {}", header.level)?;
	writeln!(
		writer,
		"Cycle:        {}",
		or_absent(metadata.level.as_ref().map(|level| level.cycle))
	)?;
	writeln!(writer, "Priority:     {}", header.priority)?;
	writeln!(writer, "Max Ops TTL:  {}", metadata.max_operations_ttl)?;
	writeln!(writer, "Baker:        {}", or_absent(metadata.baker.as_ref()))?;
	writeln!(writer, "Consumed Gas: {}", or_absent(metadata.consumed_gas))?;
	writeln!(writer, "Volume:       {}", tez(totals.volume))?;
	writeln!(writer, "Fees:         {}", tez(totals.fees))?;
	writeln!(writer, "Rewards:      {}", tez(totals.rewards))?;
	writeln!(writer, "Operations:   {}", totals.operations_num)?;
	writeln!(writer)?;
	writer.flush()?;
	Ok(())
}

/// Formats one row of the operations table
pub fn format_operation_row(record: &OperationRecord<'_>) -> String {
	let title = record
		.title
		.map(str::to_string)
		.unwrap_or_else(|| record.kind.to_string());

	format!(
		"{:>8} {:<12.12} {:<36.36} {:<36.36} {} {} {}",
		record.level(),
		title,
		record.source.as_deref().unwrap_or(ABSENT),
		record.destination.as_deref().unwrap_or(ABSENT),
		amount_column(record.amount),
		amount_column(record.fee),
		record.hash
	)
}

/// Operations table writer; the header is written once, before the first row
pub struct OperationsTable<W: Write> {
	writer: W,
	header_written: bool,
}

impl<W: Write> OperationsTable<W> {
	pub fn new(writer: W) -> Self {
		Self {
			writer,
			header_written: false,
		}
	}

	pub fn write_header(&mut self) -> Result<(), RenderError> {
		if !self.header_written {
			writeln!(self.writer, "{}", OPERATIONS_HEADER)?;
			self.header_written = true;
		}
		Ok(())
	}

	pub fn write_records(&mut self, records: &[OperationRecord<'_>]) -> Result<(), RenderError> {
		self.write_header()?;
		for record in records {
			writeln!(self.writer, "{}", format_operation_row(record))?;
		}
		self.writer.flush()?;
		Ok(())
	}

	pub fn into_inner(self) -> W {
		self.writer
	}
}
