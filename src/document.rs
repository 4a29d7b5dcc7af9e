use crate::{error::ParseError, NodeSet};
use html5ever::tendril::TendrilSink;
use std::{
	cell::{Ref, RefCell, RefMut},
	io::Read,
	str::FromStr,
};

/// A parsed html document.
///
/// Owns the node tree that every [`NodeSet`] borrows from. Attribute edits
/// made through any set are visible to all others.
#[derive(Debug)]
pub struct Document {
	html: RefCell<scraper::Html>,
}

impl Document {
	pub fn parse(source: &str) -> Self {
		Self::from_html(scraper::Html::parse_document(source))
	}

	/// Parses a byte stream as it is read.
	///
	/// Invalid UTF-8 is decoded lossily; only failures of the reader itself
	/// are errors.
	pub fn from_reader<R: Read>(mut reader: R) -> Result<Self, ParseError> {
		let html = html5ever::parse_document(scraper::Html::new_document(), Default::default())
			.from_utf8()
			.read_from(&mut reader)?;
		Ok(Self::from_html(html))
	}

	fn from_html(html: scraper::Html) -> Self {
		if !html.errors.is_empty() {
			log::debug!(
				"recovered from {} parse error(s), first: {}",
				html.errors.len(),
				html.errors[0]
			);
		}
		Self {
			html: RefCell::new(html),
		}
	}

	/// A set holding only the document root.
	pub fn root(&self) -> NodeSet<'_> {
		let root = self.html.borrow().tree.root().id();
		NodeSet::new(self, vec![root])
	}

	pub fn empty(&self) -> NodeSet<'_> {
		NodeSet::new(self, Vec::new())
	}

	pub fn find(&self, selector: &str) -> crate::Result<NodeSet<'_>> {
		self.root().find(selector)
	}

	/// The whole document as markup, doctype and top-level comments included.
	pub fn html(&self) -> crate::Result<String> {
		self.root().text()
	}

	pub(crate) fn tree(&self) -> Ref<'_, scraper::Html> {
		self.html.borrow()
	}

	pub(crate) fn tree_mut(&self) -> RefMut<'_, scraper::Html> {
		self.html.borrow_mut()
	}
}

impl FromStr for Document {
	type Err = ParseError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Ok(Self::parse(s))
	}
}
