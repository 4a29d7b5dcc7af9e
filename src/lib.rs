//! jQuery-like queries over parsed html.
//!
//! ```
//! let doc = htmlq::Document::parse(r#"<span class="id">102</span><span class="id">103</span>"#);
//! let mut ids = Vec::new();
//! doc.find("span.id")?.for_each(|span| ids.push(span.text().unwrap_or_default()));
//! assert_eq!(ids, vec!["102", "103"]);
//! # Ok::<(), htmlq::QueryError>(())
//! ```

pub mod attribute;
pub mod document;
pub mod error;
pub mod matcher;
pub mod node_set;
pub mod render;

pub use document::Document;
pub use error::{ParseError, QueryError, Result};
pub use matcher::Matcher;
pub use node_set::NodeSet;
pub use render::TextSink;
