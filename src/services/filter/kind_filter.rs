//! Operation kind allow-sets.

use std::collections::BTreeSet;

use crate::{models::OperationKind, services::filter::FilterError};

/// Literal accepted in place of a kind list to mean every kind
pub const ALL_KINDS: &str = "all";

/// Restricts classification to a set of operation kinds; `None` allows every kind
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KindFilter {
	allowed: Option<BTreeSet<OperationKind>>,
}

impl KindFilter {
	pub fn all() -> Self {
		Self { allowed: None }
	}

	pub fn only(kinds: impl IntoIterator<Item = OperationKind>) -> Self {
		Self {
			allowed: Some(kinds.into_iter().collect()),
		}
	}

	/// Builds a filter from canonical names and short aliases
	///
	/// Every entry is validated, so an unknown alias fails even next to `all`. An empty
	/// list allows every kind.
	pub fn parse<S: AsRef<str>>(aliases: &[S]) -> Result<Self, FilterError> {
		let mut kinds = BTreeSet::new();
		let mut everything = aliases.is_empty();

		for alias in aliases {
			let alias = alias.as_ref().trim();
			if alias == ALL_KINDS {
				everything = true;
				continue;
			}
			match OperationKind::from_alias(alias) {
				Some(kind) => {
					kinds.insert(kind);
				}
				None => {
					return Err(FilterError::configuration_error(format!(
						"Unknown operation kind: `{}'",
						alias
					)));
				}
			}
		}

		if everything {
			Ok(Self::all())
		} else {
			Ok(Self::only(kinds))
		}
	}

	pub fn allows(&self, kind: OperationKind) -> bool {
		self.allowed
			.as_ref()
			.is_none_or(|allowed| allowed.contains(&kind))
	}

	pub fn is_all(&self) -> bool {
		self.allowed.is_none()
	}
}
