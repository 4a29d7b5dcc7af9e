use ego_tree::NodeRef;
use html5ever::serialize::{
	serialize, HtmlSerializer, Serialize, SerializeOpts, Serializer, TraversalScope,
};
use scraper::{ElementRef, Node};
use std::io;

/// Append-only buffer that markup is streamed into.
#[derive(Debug, Default, Clone)]
pub struct TextSink(String);

impl TextSink {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn as_str(&self) -> &str {
		&self.0
	}

	pub fn into_string(self) -> String {
		self.0
	}
}

impl io::Write for TextSink {
	fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
		let chunk =
			std::str::from_utf8(buf).map_err(|err| io::Error::new(io::ErrorKind::InvalidData, err))?;
		self.0.push_str(chunk);
		Ok(buf.len())
	}

	fn flush(&mut self) -> io::Result<()> {
		Ok(())
	}
}

impl std::fmt::Write for TextSink {
	fn write_str(&mut self, s: &str) -> std::fmt::Result {
		self.0.push_str(s);
		Ok(())
	}
}

impl std::fmt::Display for TextSink {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(&self.0)
	}
}

/// Writes the markup of every direct child of `node`, in order.
///
/// Elements go through html5ever's serializer scoped to their children, the
/// same path as scraper's `inner_html`. The document root has no element to
/// scope to, so its children are fed to the serializer one at a time.
pub fn render_children(node: NodeRef<'_, Node>, sink: &mut TextSink) -> io::Result<()> {
	if let Some(element) = ElementRef::wrap(node) {
		let opts = SerializeOpts {
			traversal_scope: TraversalScope::ChildrenOnly(Some(element.value().name.clone())),
			..Default::default()
		};
		return serialize(sink, &element, opts);
	}

	let mut serializer = HtmlSerializer::new(sink, SerializeOpts::default());
	for child in node.children() {
		match child.value() {
			Node::Element(_) => {
				if let Some(element) = ElementRef::wrap(child) {
					element.serialize(&mut serializer, TraversalScope::IncludeNode)?;
				}
			}
			Node::Text(text) => serializer.write_text(text)?,
			Node::Comment(comment) => serializer.write_comment(comment)?,
			Node::Doctype(doctype) => serializer.write_doctype(doctype.name())?,
			Node::ProcessingInstruction(pi) => {
				serializer.write_processing_instruction(&pi.target, &pi.data)?
			}
			// Roots never nest.
			Node::Document | Node::Fragment => {}
		}
	}
	Ok(())
}
