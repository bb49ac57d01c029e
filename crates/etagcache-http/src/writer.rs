//! Response sink abstraction.
//!
//! A handler does not build a [`Response`] directly; it writes status,
//! headers, and body bytes into a [`ResponseWriter`]. That indirection is
//! what lets the caching layer substitute an intercepting sink and inspect
//! a response before any byte reaches the client.

use bytes::{BufMut, Bytes, BytesMut};
use hyper::{HeaderMap, StatusCode};
use hyper::header::{HeaderName, HeaderValue};

use crate::error::Result;
use crate::response::Response;

/// A sink that accepts an HTTP response piece by piece.
///
/// Implementations either forward to the transport or accumulate for later
/// inspection. Nothing is transmitted until the handler returns; the final
/// status is whatever was set last, defaulting to `200 OK`.
pub trait ResponseWriter: Send {
	/// Record the response status, overwriting any prior value.
	fn set_status(&mut self, status: StatusCode);

	/// Record a response header, overwriting any prior value for the name.
	fn insert_header(&mut self, name: HeaderName, value: HeaderValue);

	/// Append bytes to the response body.
	///
	/// # Errors
	///
	/// Transport-backed sinks may fail; accumulating sinks always succeed.
	fn write(&mut self, chunk: &[u8]) -> Result<()>;
}

/// A [`ResponseWriter`] that accumulates everything into a [`Response`].
///
/// This is the terminal sink: the transport runs a handler against one and
/// serializes the finished response. Tests use it to observe exactly what a
/// handler produced.
///
/// # Examples
///
/// ```
/// use etagcache_http::{ResponseCollector, ResponseWriter};
/// use hyper::StatusCode;
///
/// let mut collector = ResponseCollector::new();
/// collector.write(b"hello").unwrap();
///
/// let response = collector.into_response();
/// assert_eq!(response.status, StatusCode::OK);
/// assert_eq!(&response.body[..], b"hello");
/// ```
#[derive(Debug)]
pub struct ResponseCollector {
	status: StatusCode,
	headers: HeaderMap,
	body: BytesMut,
}

impl ResponseCollector {
	/// Create an empty collector with status `200 OK`.
	pub fn new() -> Self {
		Self {
			status: StatusCode::OK,
			headers: HeaderMap::new(),
			body: BytesMut::new(),
		}
	}

	/// The currently recorded status.
	pub fn status(&self) -> StatusCode {
		self.status
	}

	/// Finish collecting and produce the response.
	pub fn into_response(self) -> Response {
		Response {
			status: self.status,
			headers: self.headers,
			body: Bytes::from(self.body),
		}
	}
}

impl Default for ResponseCollector {
	fn default() -> Self {
		Self::new()
	}
}

impl ResponseWriter for ResponseCollector {
	fn set_status(&mut self, status: StatusCode) {
		self.status = status;
	}

	fn insert_header(&mut self, name: HeaderName, value: HeaderValue) {
		self.headers.insert(name, value);
	}

	fn write(&mut self, chunk: &[u8]) -> Result<()> {
		self.body.put_slice(chunk);
		Ok(())
	}
}
