//! Block reference query syntax.
//!
//! A reference is an anchor followed by an optional offset:
//!
//! ```text
//! reference := anchor [offset]
//! anchor    := [A-Za-z0-9]*
//! offset    := "~"* [signed-integer]
//! ```
//!
//! A run of `~` counts blocks backwards (`head~~~` is three behind `head`). An explicit
//! integer replaces the tilde count but keeps its sign, so `head~5` is five behind and
//! `head+5` is five ahead. An empty or numeric anchor names a level; anything else is a
//! hash or symbolic id such as `head`.

use std::{fmt, str::FromStr};

use crate::services::resolver::ResolverError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Anchor {
	Level(i64),
	Symbolic(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockReference {
	pub anchor: Anchor,
	pub offset: i64,
}

impl BlockReference {
	pub fn parse(reference: &str) -> Result<Self, ResolverError> {
		let split = reference
			.find(|c: char| !c.is_ascii_alphanumeric())
			.unwrap_or(reference.len());
		let (anchor, mut rest) = reference.split_at(split);

		let mut sign = 1i64;
		let mut magnitude = 0i64;

		if rest.starts_with('~') {
			let tildes = rest.find(|c: char| c != '~').unwrap_or(rest.len());
			sign = -1;
			magnitude = tildes as i64;
			rest = &rest[tildes..];
		}

		if !rest.is_empty() {
			magnitude = rest.parse::<i64>().map_err(|_| {
				ResolverError::parse_error(format!(
					"invalid offset `{}` in block reference `{}`",
					rest, reference
				))
			})?;
		}

		let offset = magnitude.checked_mul(sign).ok_or_else(|| {
			ResolverError::parse_error(format!("offset out of range in `{}`", reference))
		})?;

		let anchor = if anchor.is_empty() {
			Anchor::Level(0)
		} else if anchor.starts_with(|c: char| c.is_ascii_digit()) {
			Anchor::Level(anchor.parse().map_err(|_| {
				ResolverError::parse_error(format!(
					"invalid level `{}` in block reference `{}`",
					anchor, reference
				))
			})?)
		} else {
			Anchor::Symbolic(anchor.to_string())
		};

		Ok(Self { anchor, offset })
	}

	/// Applies the offset to a resolved anchor level
	///
	/// Fails when the result would be negative or overflow.
	pub fn target_level(&self, anchor_level: i64) -> Result<i64, ResolverError> {
		match anchor_level.checked_add(self.offset) {
			Some(level) if level >= 0 => Ok(level),
			_ => Err(ResolverError::resolution_error(format!(
				"block reference `{}` points before the genesis block",
				self
			))),
		}
	}
}

impl FromStr for BlockReference {
	type Err = ResolverError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Self::parse(s)
	}
}

impl fmt::Display for BlockReference {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match &self.anchor {
			Anchor::Level(level) => write!(f, "{}", level)?,
			Anchor::Symbolic(id) => f.write_str(id)?,
		}
		match self.offset {
			0 => Ok(()),
			offset if offset < 0 => write!(f, "~{}", offset.unsigned_abs()),
			offset => write!(f, "+{}", offset),
		}
	}
}
