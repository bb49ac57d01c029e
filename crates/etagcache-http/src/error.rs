//! Error types shared across the etagcache crates.
//!
//! The caching layer defines no failure modes of its own: errors originate
//! in the wrapped handler or in the transport sink and propagate unchanged.
//! [`Error::Handler`] exists so handlers outside this workspace can surface
//! their own failures through the shared `Result` without wrapping.

use thiserror::Error;

/// Result alias used throughout the etagcache crates.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by handlers and response sinks.
#[derive(Debug, Error)]
pub enum Error {
	/// A tag or header could not be represented as an HTTP header value.
	#[error("invalid header value: {0}")]
	InvalidHeaderValue(#[from] http::header::InvalidHeaderValue),

	/// A request URI could not be parsed.
	#[error("invalid uri: {0}")]
	InvalidUri(#[from] http::uri::InvalidUri),

	/// The transport failed while writing the response.
	#[error("i/o error: {0}")]
	Io(#[from] std::io::Error),

	/// A failure raised by the wrapped handler.
	#[error("handler error: {0}")]
	Handler(String),
}

impl Error {
	/// Create a handler error from any displayable value.
	pub fn handler(message: impl Into<String>) -> Self {
		Self::Handler(message.into())
	}
}
