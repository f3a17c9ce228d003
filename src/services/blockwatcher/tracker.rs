//! Head ordering and deduplication.
//!
//! Heads arrive repeated or out of order around reorganizations and reconnects.
//! [`HeadTracker`] accepts the first head unconditionally and afterwards only heads
//! above the last accepted level, so accepted levels are strictly increasing.

/// Result of checking a received head
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeadCheckResult {
	/// Head is new and must be processed
	Accepted,
	/// Same level as the last accepted head
	Duplicate { last_seen: i64 },
	/// Below the last accepted head
	Stale { last_seen: i64, received: i64 },
}

impl HeadCheckResult {
	pub fn is_accepted(&self) -> bool {
		matches!(self, Self::Accepted)
	}
}

/// Tracks the last accepted head level of one monitor run
///
/// Owned by the task reading the subscription, so no synchronization is needed.
#[derive(Debug, Clone, Default)]
pub struct HeadTracker {
	last_level: i64,
	seen_any: bool,
}

impl HeadTracker {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn last_level(&self) -> Option<i64> {
		self.seen_any.then_some(self.last_level)
	}

	/// Checks a head level, recording it when accepted
	pub fn check(&mut self, level: i64) -> HeadCheckResult {
		if self.seen_any && level <= self.last_level {
			return if level == self.last_level {
				HeadCheckResult::Duplicate {
					last_seen: self.last_level,
				}
			} else {
				HeadCheckResult::Stale {
					last_seen: self.last_level,
					received: level,
				}
			};
		}

		self.last_level = level;
		self.seen_any = true;
		HeadCheckResult::Accepted
	}
}
