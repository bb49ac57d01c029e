//! HTTP response representation.

use bytes::Bytes;
use hyper::{HeaderMap, StatusCode};

/// A finished HTTP response.
///
/// Produced by a [`ResponseCollector`](crate::ResponseCollector) once a
/// handler has run; the transport serializes it to the wire.
#[derive(Debug)]
pub struct Response {
	pub status: StatusCode,
	pub headers: HeaderMap,
	pub body: Bytes,
}

impl Response {
	/// Create a response with the given status and no headers or body.
	///
	/// # Examples
	///
	/// ```
	/// use etagcache_http::Response;
	/// use hyper::StatusCode;
	///
	/// let response = Response::new(StatusCode::NOT_MODIFIED);
	/// assert_eq!(response.status, StatusCode::NOT_MODIFIED);
	/// assert!(response.body.is_empty());
	/// ```
	pub fn new(status: StatusCode) -> Self {
		Self {
			status,
			headers: HeaderMap::new(),
			body: Bytes::new(),
		}
	}

	/// Create a `200 OK` response.
	pub fn ok() -> Self {
		Self::new(StatusCode::OK)
	}

	/// Create a `204 No Content` response.
	pub fn no_content() -> Self {
		Self::new(StatusCode::NO_CONTENT)
	}

	/// Create a `404 Not Found` response.
	pub fn not_found() -> Self {
		Self::new(StatusCode::NOT_FOUND)
	}

	/// Set the response body.
	pub fn with_body(mut self, body: impl Into<Bytes>) -> Self {
		self.body = body.into();
		self
	}

	/// Add a header to the response.
	pub fn with_header(
		mut self,
		name: hyper::header::HeaderName,
		value: hyper::header::HeaderValue,
	) -> Self {
		self.headers.insert(name, value);
		self
	}
}
