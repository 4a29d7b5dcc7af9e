use crate::error::{QueryError, Result};
use ego_tree::{NodeId, Tree};
use scraper::{ElementRef, Node};
use std::str::FromStr;

/// A compiled css selector.
///
/// Compile once and reuse with [`NodeSet::find_with`](crate::NodeSet::find_with)
/// when the same selector is applied to many sets.
#[derive(Debug, Clone)]
pub struct Matcher {
	source: String,
	selector: scraper::Selector,
}

impl Matcher {
	pub fn parse(selector: &str) -> Result<Self> {
		let compiled =
			scraper::Selector::parse(selector).map_err(|err| QueryError::InvalidSelector {
				selector: selector.to_owned(),
				reason: format!("{err:?}"),
			})?;
		Ok(Self {
			source: selector.to_owned(),
			selector: compiled,
		})
	}

	pub fn as_str(&self) -> &str {
		&self.source
	}

	/// Matching elements among `node` and its descendants, in document order.
	pub fn match_all(&self, tree: &Tree<Node>, node: NodeId) -> Vec<NodeId> {
		let Some(scope) = tree.get(node) else {
			return Vec::new();
		};
		scope
			.descendants()
			.filter_map(ElementRef::wrap)
			.filter(|element| self.selector.matches(element))
			.map(|element| element.id())
			.collect()
	}
}

impl FromStr for Matcher {
	type Err = QueryError;

	fn from_str(s: &str) -> Result<Self> {
		Self::parse(s)
	}
}
