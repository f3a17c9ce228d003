//! Normalization of operation contents into reporting records.
//!
//! Every content element of a taxonomy kind maps to exactly one [`OperationKind`].
//! Elements of unknown kinds produce no record and never match a filter.

use crate::{
	models::{
		BalanceUpdateKind, Block, Operation, OperationContents, OperationKind, OperationRecord,
		ResolvedBlock,
	},
	services::filter::{helpers::mutez_to_tez, KindFilter},
};

/// Per-kind source, destination and amount (in mutez)
struct Extracted {
	source: Option<String>,
	destination: Option<String>,
	amount: Option<i128>,
}

fn extract(contents: &OperationContents) -> Extracted {
	let (source, destination, amount) = match contents {
		OperationContents::Unknown => (None, None, None),
		OperationContents::Endorsement(op) => (Some(op.metadata.delegate.clone()), None, None),
		OperationContents::SeedNonceRevelation(_)
		| OperationContents::DoubleEndorsementEvidence(_)
		| OperationContents::DoubleBakingEvidence(_) => (None, None, None),
		OperationContents::ActivateAccount(op) => {
			let mut credited = op
				.metadata
				.balance_updates
				.iter()
				.filter(|update| update.kind == BalanceUpdateKind::Contract)
				.peekable();
			let amount: Option<i128> = credited.peek().is_some().then(|| {
				credited
					.map(|update| update.change)
					.filter(|change| *change > 0)
					.map(i128::from)
					.sum()
			});
			(Some(op.pkh.clone()), None, amount)
		}
		OperationContents::Proposals(op) => (Some(op.source.clone()), None, None),
		OperationContents::Ballot(op) => (Some(op.source.clone()), None, None),
		OperationContents::Reveal(op) => (Some(op.source.clone()), None, None),
		OperationContents::Transaction(op) => (
			Some(op.source.clone()),
			Some(op.destination.clone()),
			Some(i128::from(op.amount)),
		),
		OperationContents::Origination(op) => (
			Some(op.source.clone()),
			op.delegate.clone(),
			op.balance.map(i128::from),
		),
		OperationContents::Delegation(op) => (
			Some(op.source.clone()),
			op.delegate.clone(),
			op.balance.map(i128::from),
		),
	};

	Extracted {
		source,
		destination,
		amount,
	}
}

/// Builds the record for one content element of `operation`
///
/// Returns `None` for content elements outside the taxonomy.
pub fn classify_contents<'a>(
	block: &'a ResolvedBlock,
	operation: &Operation,
	contents: &OperationContents,
) -> Option<OperationRecord<'a>> {
	let kind = OperationKind::of(contents)?;
	let extracted = extract(contents);

	Some(OperationRecord {
		kind,
		title: Some(kind.title()),
		source: extracted.source,
		destination: extracted.destination,
		amount: extracted.amount.map(mutez_to_tez),
		fee: contents.fee().map(|fee| mutez_to_tez(i128::from(fee))),
		hash: operation.hash.clone(),
		block,
	})
}

fn is_allowed(filter: &KindFilter, contents: &OperationContents) -> bool {
	OperationKind::of(contents).is_some_and(|kind| filter.allows(kind))
}

/// Classifies every allowed content element of the block, in block order
pub fn classify<'a>(block: &'a ResolvedBlock, filter: &KindFilter) -> Vec<OperationRecord<'a>> {
	block
		.operations
		.iter()
		.flatten()
		.flat_map(move |operation| {
			operation
				.contents
				.iter()
				.filter(move |contents| is_allowed(filter, contents))
				.filter_map(move |contents| classify_contents(block, operation, contents))
		})
		.collect()
}

/// Operation groups holding at least one allowed content element
///
/// Groups are returned whole and once each, for structured encoders.
pub fn raw_operations<'a>(block: &'a Block, filter: &KindFilter) -> Vec<&'a Operation> {
	block
		.operations
		.iter()
		.flatten()
		.filter(|operation| {
			operation
				.contents
				.iter()
				.any(|contents| is_allowed(filter, contents))
		})
		.collect()
}
