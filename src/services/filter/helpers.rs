//! Unit conversion helpers.

use rust_decimal::Decimal;

/// Mutez per tez
pub const MUTEZ_SCALE: u32 = 6;

/// Converts a mutez amount to tez, saturating at the largest representable value
pub fn mutez_to_tez(mutez: i128) -> Decimal {
	Decimal::try_from_i128_with_scale(mutez, MUTEZ_SCALE).unwrap_or(if mutez < 0 {
		Decimal::MIN
	} else {
		Decimal::MAX
	})
}
