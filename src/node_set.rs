use crate::{
	attribute,
	error::{QueryError, Result},
	render::{self, TextSink},
	Document, Matcher,
};
use ego_tree::NodeId;
use std::collections::HashSet;

/// An ordered set of nodes from one [`Document`].
///
/// Sets are cheap to clone; they hold node handles, never node data.
#[derive(Clone)]
pub struct NodeSet<'doc> {
	document: &'doc Document,
	nodes: Vec<NodeId>,
}

impl<'doc> std::fmt::Debug for NodeSet<'doc> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_tuple("NodeSet").field(&self.nodes).finish()
	}
}

impl<'doc> NodeSet<'doc> {
	pub(crate) fn new(document: &'doc Document, nodes: Vec<NodeId>) -> Self {
		Self { document, nodes }
	}

	pub fn document(&self) -> &'doc Document {
		self.document
	}

	/// Elements matching `selector` among the nodes of this set and their
	/// descendants, without duplicates, in discovery order.
	pub fn find(&self, selector: &str) -> Result<NodeSet<'doc>> {
		let matcher = Matcher::parse(selector)?;
		Ok(self.find_with(&matcher))
	}

	pub fn find_with(&self, matcher: &Matcher) -> NodeSet<'doc> {
		let html = self.document.tree();
		let mut seen = HashSet::new();
		let mut working_set = Vec::new();
		for node in self.nodes.iter() {
			let matches = matcher.match_all(&html.tree, *node);
			log::trace!(
				"{:?} matched {} node(s) under {:?}",
				matcher.as_str(),
				matches.len(),
				node
			);
			for found in matches.into_iter() {
				if seen.insert(found) {
					working_set.push(found);
				}
			}
		}
		log::debug!(
			"find {:?} over {} node(s) -> {}",
			matcher.as_str(),
			self.nodes.len(),
			working_set.len()
		);
		NodeSet::new(self.document, working_set)
	}

	fn first_value_node(&self) -> Option<NodeId> {
		let html = self.document.tree();
		self.nodes.iter().copied().find(|id| {
			html.tree
				.get(*id)
				.map(|node| attribute::is_value_node(node.value()))
				.unwrap_or(false)
		})
	}

	fn first_element(&self) -> Option<NodeId> {
		let html = self.document.tree();
		self.nodes.iter().copied().find(|id| {
			html.tree
				.get(*id)
				.map(|node| node.value().is_element())
				.unwrap_or(false)
		})
	}

	fn attr_of(&self, id: NodeId, name: &str) -> Option<String> {
		let html = self.document.tree();
		let node = html.tree.get(id)?;
		attribute::get_attr(node.value(), name)
	}

	/// The `value` of the first input, textarea or select anywhere in the set.
	pub fn value(&self) -> String {
		self.first_value_node()
			.and_then(|id| self.attr_of(id, "value"))
			.unwrap_or_default()
	}

	/// Sets `value` on the first input, textarea or select in the set.
	/// Does nothing when the set has none.
	pub fn set_value(&self, value: &str) {
		if let Some(id) = self.first_value_node() {
			attribute::set_attr(&mut self.document.tree_mut().tree, id, "value", value);
		}
	}

	/// Attribute `name` of the first element in the set, or an empty string.
	pub fn attr(&self, name: &str) -> String {
		self.first_element()
			.and_then(|id| self.attr_of(id, name))
			.unwrap_or_default()
	}

	pub fn has_attr(&self, name: &str) -> bool {
		self.first_element()
			.and_then(|id| self.attr_of(id, name))
			.is_some()
	}

	/// Sets or creates attribute `name` on the first element in the set.
	pub fn set_attr(&self, name: &str, value: &str) {
		if let Some(id) = self.first_element() {
			attribute::set_attr(&mut self.document.tree_mut().tree, id, name, value);
		}
	}

	pub fn text(&self) -> Result<String> {
		self.text_at(0)
	}

	/// Markup of the children of the node at `index`, tags included.
	/// Empty when `index` is out of range.
	pub fn text_at(&self, index: usize) -> Result<String> {
		let Some(id) = self.nodes.get(index) else {
			return Ok(String::new());
		};
		let html = self.document.tree();
		let Some(node) = html.tree.get(*id) else {
			return Ok(String::new());
		};
		let mut sink = TextSink::new();
		render::render_children(node, &mut sink).map_err(QueryError::Render)?;
		Ok(sink.into_string())
	}

	pub fn len(&self) -> usize {
		self.nodes.len()
	}

	pub fn is_empty(&self) -> bool {
		self.nodes.is_empty()
	}

	/// The node at `index` as a set of its own; empty when out of range.
	pub fn index(&self, index: usize) -> NodeSet<'doc> {
		let nodes = self.nodes.get(index).copied().into_iter().collect();
		NodeSet::new(self.document, nodes)
	}

	pub fn first(&self) -> NodeSet<'doc> {
		self.index(0)
	}

	/// Calls `f` with each node wrapped in its own set, in order.
	pub fn for_each<F>(&self, mut f: F) -> &Self
	where
		F: FnMut(NodeSet<'doc>),
	{
		for node in self.iter() {
			f(node);
		}
		self
	}

	pub fn iter(&self) -> Iter<'_, 'doc> {
		Iter {
			document: self.document,
			inner: self.nodes.iter(),
		}
	}

	pub fn node(&self) -> Option<NodeId> {
		self.nodes.first().copied()
	}

	pub fn node_ids(&self) -> &[NodeId] {
		&self.nodes
	}

	/// Tag of the first element in the set.
	pub fn tag_name(&self) -> Option<String> {
		let id = self.first_element()?;
		let html = self.document.tree();
		let node = html.tree.get(id)?;
		node.value().as_element().map(|e| e.name().to_owned())
	}
}

pub struct Iter<'set, 'doc> {
	document: &'doc Document,
	inner: std::slice::Iter<'set, NodeId>,
}

impl<'set, 'doc> Iterator for Iter<'set, 'doc> {
	type Item = NodeSet<'doc>;

	fn next(&mut self) -> Option<Self::Item> {
		let id = self.inner.next()?;
		Some(NodeSet::new(self.document, vec![*id]))
	}

	fn size_hint(&self) -> (usize, Option<usize>) {
		self.inner.size_hint()
	}
}

impl<'set, 'doc> ExactSizeIterator for Iter<'set, 'doc> {}

impl<'set, 'doc> IntoIterator for &'set NodeSet<'doc> {
	type Item = NodeSet<'doc>;
	type IntoIter = Iter<'set, 'doc>;

	fn into_iter(self) -> Self::IntoIter {
		self.iter()
	}
}
