pub type Result<T> = std::result::Result<T, QueryError>;

/// Failure to obtain markup for a [`Document`](crate::Document).
///
/// Malformed markup is never an error here; the parser recovers from it.
#[derive(thiserror::Error, Debug)]
pub enum ParseError {
	#[error("failed to read html source")]
	Read(#[from] std::io::Error),
}

#[derive(thiserror::Error, Debug)]
pub enum QueryError {
	#[error("invalid css selector {selector:?}: {reason}")]
	InvalidSelector { selector: String, reason: String },
	#[error("failed to render node markup")]
	Render(#[source] std::io::Error),
}
