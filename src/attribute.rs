use ego_tree::{NodeId, Tree};
use html5ever::{tendril::StrTendril, Attribute, LocalName, Namespace, QualName};
use scraper::{node::Element, Node};

/// Elements whose `value` attribute carries form state.
pub const VALUE_TAGS: [&str; 3] = ["input", "textarea", "select"];

pub fn is_value_node(node: &Node) -> bool {
	match node.as_element() {
		Some(element) => VALUE_TAGS.contains(&element.name()),
		None => false,
	}
}

pub fn get_attr(node: &Node, key: &str) -> Option<String> {
	node.as_element()
		.and_then(|element| element.attr(key))
		.map(|value| value.to_owned())
}

/// Updates `key` in place, or appends it when the element lacks it.
///
/// The element is rebuilt from its attribute list so the id and class
/// lookups cached by scraper reflect the edit. Non-element nodes are left
/// untouched and `false` is returned.
pub fn set_attr(tree: &mut Tree<Node>, id: NodeId, key: &str, value: &str) -> bool {
	let Some(mut node) = tree.get_mut(id) else {
		return false;
	};
	let Node::Element(element) = node.value() else {
		return false;
	};

	let mut replaced = false;
	let mut attrs = element
		.attrs
		.iter()
		.map(|(name, current)| {
			let updated = if !replaced && &*name.local == key {
				replaced = true;
				StrTendril::from_slice(value)
			} else {
				current.clone()
			};
			Attribute {
				name: name.clone(),
				value: updated,
			}
		})
		.collect::<Vec<_>>();
	if !replaced {
		attrs.push(Attribute {
			name: QualName::new(None, Namespace::from(""), LocalName::from(key)),
			value: StrTendril::from_slice(value),
		});
	}

	*element = Element::new(element.name.clone(), attrs);
	true
}

#[cfg(test)]
mod tests {
	use super::*;

	fn first(html: &scraper::Html, css: &str) -> NodeId {
		let selector = scraper::Selector::parse(css).unwrap();
		html.select(&selector).next().unwrap().id()
	}

	#[test]
	fn value_tags_only() {
		let html = scraper::Html::parse_document(
			"<input><textarea></textarea><select></select><div></div>",
		);
		for (css, expected) in [
			("input", true),
			("textarea", true),
			("select", true),
			("div", false),
		] {
			let id = first(&html, css);
			assert_eq!(is_value_node(html.tree.get(id).unwrap().value()), expected, "{css}");
		}
		assert!(!is_value_node(html.tree.root().value()));
	}

	#[test]
	fn set_updates_existing_key() {
		let mut html = scraper::Html::parse_document(r#"<input name="q" value="x">"#);
		let id = first(&html, "input");
		assert!(set_attr(&mut html.tree, id, "value", "y"));

		let node = html.tree.get(id).unwrap().value();
		assert_eq!(get_attr(node, "value").as_deref(), Some("y"));
		assert_eq!(get_attr(node, "name").as_deref(), Some("q"));
		let element = node.as_element().unwrap();
		assert_eq!(element.attrs().filter(|(key, _)| *key == "value").count(), 1);
	}

	#[test]
	fn set_creates_missing_key() {
		let mut html = scraper::Html::parse_document("<p>hi</p>");
		let id = first(&html, "p");
		assert_eq!(get_attr(html.tree.get(id).unwrap().value(), "data-foo"), None);
		set_attr(&mut html.tree, id, "data-foo", "bar");
		assert_eq!(
			get_attr(html.tree.get(id).unwrap().value(), "data-foo").as_deref(),
			Some("bar")
		);
	}

	#[test]
	fn class_edits_are_visible_to_selectors() {
		let mut html = scraper::Html::parse_document("<p>hi</p>");
		let id = first(&html, "p");
		set_attr(&mut html.tree, id, "class", "greeting");
		let selector = scraper::Selector::parse("p.greeting").unwrap();
		assert_eq!(html.select(&selector).count(), 1);
	}

	#[test]
	fn set_ignores_non_elements() {
		let mut html = scraper::Html::parse_document("<p>hi</p>");
		let root = html.tree.root().id();
		assert!(!set_attr(&mut html.tree, root, "value", "y"));
	}
}
