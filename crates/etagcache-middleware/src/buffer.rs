//! Buffered response writer.
//!
//! HTTP response transmission is normally incremental, but computing a
//! content hash needs the complete body. [`BufferedWriter`] intercepts a
//! handler's output so the body can be inspected before any byte reaches
//! the client, at the cost of holding the full body in memory.

use bytes::{BufMut, BytesMut};
use hyper::{HeaderMap, StatusCode};
use hyper::header::{HeaderName, HeaderValue};

use etagcache_http::{ResponseWriter, Result};

/// A [`ResponseWriter`] that records instead of transmitting.
///
/// Owned exclusively by one in-flight request. The recorded status defaults
/// to `200 OK` until the handler sets one; writes accumulate in memory and
/// always succeed. [`flush`](Self::flush) replays the whole recording into
/// the real sink, exactly once.
#[derive(Debug)]
pub struct BufferedWriter {
	status: StatusCode,
	headers: HeaderMap,
	body: BytesMut,
}

impl BufferedWriter {
	/// Create an empty buffer with status `200 OK`.
	pub fn new() -> Self {
		Self {
			status: StatusCode::OK,
			headers: HeaderMap::new(),
			body: BytesMut::new(),
		}
	}

	/// The most recently recorded status.
	pub fn status(&self) -> StatusCode {
		self.status
	}

	/// The accumulated body bytes.
	pub fn body(&self) -> &[u8] {
		&self.body
	}

	/// Replay the recorded headers, status, and body into `sink`.
	///
	/// Consumes the buffer; a response is flushed at most once.
	///
	/// # Errors
	///
	/// Propagates any failure from the underlying sink unchanged.
	pub fn flush(self, sink: &mut dyn ResponseWriter) -> Result<()> {
		for (name, value) in &self.headers {
			sink.insert_header(name.clone(), value.clone());
		}
		sink.set_status(self.status);
		sink.write(&self.body)
	}
}

impl Default for BufferedWriter {
	fn default() -> Self {
		Self::new()
	}
}

impl ResponseWriter for BufferedWriter {
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

#[cfg(test)]
mod tests {
	use super::*;
	use etagcache_http::ResponseCollector;
	use hyper::header::CONTENT_TYPE;

	#[test]
	fn test_status_defaults_to_ok() {
		let buffer = BufferedWriter::new();
		assert_eq!(buffer.status(), StatusCode::OK);
	}

	#[test]
	fn test_last_status_wins() {
		let mut buffer = BufferedWriter::new();
		buffer.set_status(StatusCode::NOT_FOUND);
		buffer.set_status(StatusCode::NO_CONTENT);
		assert_eq!(buffer.status(), StatusCode::NO_CONTENT);
	}

	#[test]
	fn test_writes_accumulate_without_forwarding() {
		let mut buffer = BufferedWriter::new();
		buffer.write(b"first ").unwrap();
		buffer.write(b"second").unwrap();
		assert_eq!(buffer.body(), b"first second");
	}

	#[test]
	fn test_flush_replays_into_sink() {
		let mut buffer = BufferedWriter::new();
		buffer.set_status(StatusCode::CREATED);
		buffer.insert_header(CONTENT_TYPE, "text/plain".parse().unwrap());
		buffer.write(b"payload").unwrap();

		let mut collector = ResponseCollector::new();
		buffer.flush(&mut collector).unwrap();

		let response = collector.into_response();
		assert_eq!(response.status, StatusCode::CREATED);
		assert_eq!(response.headers.get(CONTENT_TYPE).unwrap(), "text/plain");
		assert_eq!(&response.body[..], b"payload");
	}
}
