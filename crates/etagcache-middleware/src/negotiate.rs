//! Conditional-match negotiation.
//!
//! Decides whether a request can be answered with `304 Not Modified`
//! instead of regenerating or retransmitting the response.

use hyper::StatusCode;
use tracing::debug;

use etagcache_http::ResponseWriter;

/// Outcome of negotiating a candidate tag against the client's
/// `If-None-Match` value.
#[derive(Debug, PartialEq, Eq)]
pub enum Negotiation {
	/// The client's copy is current; a 304 status has been written and the
	/// request is finished.
	NotModified,
	/// No match; the caller must set the `ETag` header and deliver the
	/// real response.
	Proceed,
}

/// Compare the client's conditional value against `tag` and short-circuit
/// on a match.
///
/// Comparison is exact single-value string equality: no comma-separated
/// list parsing and no `*` wildcard. On a match the 304 status is written
/// to `writer` with no headers and no body.
pub fn resolve(
	writer: &mut dyn ResponseWriter,
	if_none_match: Option<&str>,
	tag: &str,
) -> Negotiation {
	if if_none_match == Some(tag) {
		debug!(etag = tag, "client copy is current, short-circuiting to 304");
		writer.set_status(StatusCode::NOT_MODIFIED);
		return Negotiation::NotModified;
	}
	Negotiation::Proceed
}
