//! Per-block financial totals.

use crate::{
	models::{Block, BlockAggregate, OperationContents},
	services::filter::helpers::mutez_to_tez,
};

/// Computes operation count, volume, fees and rewards for a block
///
/// Sums are accumulated in mutez and scaled to tez once. Rewards are the credited
/// `rewards` balance updates of the block itself and of its endorsements.
pub fn aggregate(block: &Block) -> BlockAggregate {
	let mut operations_num = 0usize;
	let mut volume: i128 = 0;
	let mut fees: i128 = 0;
	let mut rewards: i128 = block
		.metadata
		.balance_updates
		.iter()
		.filter(|update| update.is_reward() && update.change > 0)
		.map(|update| i128::from(update.change))
		.sum();

	for contents in block
		.operations
		.iter()
		.flatten()
		.flat_map(|operation| operation.contents.iter())
	{
		operations_num += 1;

		if let Some(fee) = contents.fee() {
			fees += i128::from(fee);
		}

		match contents {
			OperationContents::Transaction(op) => volume += i128::from(op.amount),
			OperationContents::Endorsement(op) => {
				rewards += op
					.metadata
					.balance_updates
					.iter()
					.filter(|update| update.is_reward() && update.change > 0)
					.map(|update| i128::from(update.change))
					.sum::<i128>();
			}
			_ => {}
		}
	}

	BlockAggregate {
		operations_num,
		volume: mutez_to_tez(volume),
		fees: mutez_to_tez(fees),
		rewards: mutez_to_tez(rewards),
	}
}
