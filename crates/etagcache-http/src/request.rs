//! HTTP request representation.

use bytes::Bytes;
use hyper::{HeaderMap, Method, Uri, Version};

use crate::error::Result;

/// An incoming HTTP request.
///
/// A plain value over hyper's vocabulary types; the transport constructs one
/// per connection-level request and hands it to a
/// [`Handler`](crate::Handler).
#[derive(Debug, Clone)]
pub struct Request {
	pub method: Method,
	pub uri: Uri,
	pub version: Version,
	pub headers: HeaderMap,
	pub body: Bytes,
}

impl Request {
	/// Create a request from its parts.
	///
	/// # Examples
	///
	/// ```
	/// use etagcache_http::Request;
	/// use hyper::{HeaderMap, Method, Uri, Version};
	/// use bytes::Bytes;
	///
	/// let request = Request::new(
	///     Method::GET,
	///     Uri::from_static("/api/resource"),
	///     Version::HTTP_11,
	///     HeaderMap::new(),
	///     Bytes::new(),
	/// );
	/// assert_eq!(request.path(), "/api/resource");
	/// ```
	pub fn new(
		method: Method,
		uri: Uri,
		version: Version,
		headers: HeaderMap,
		body: Bytes,
	) -> Self {
		Self {
			method,
			uri,
			version,
			headers,
			body,
		}
	}

	/// Start building a request.
	pub fn builder() -> RequestBuilder {
		RequestBuilder::default()
	}

	/// The path component of the request URI.
	pub fn path(&self) -> &str {
		self.uri.path()
	}

	/// A request header as a string, if present and valid UTF-8.
	pub fn header(&self, name: impl hyper::header::AsHeaderName) -> Option<&str> {
		self.headers.get(name).and_then(|v| v.to_str().ok())
	}
}

/// Builder for [`Request`].
///
/// Method defaults to `GET`, the URI to `/`, the version to HTTP/1.1, and
/// headers/body to empty.
#[derive(Debug, Default)]
pub struct RequestBuilder {
	method: Option<Method>,
	uri: Option<String>,
	version: Option<Version>,
	headers: HeaderMap,
	body: Bytes,
}

impl RequestBuilder {
	pub fn method(mut self, method: Method) -> Self {
		self.method = Some(method);
		self
	}

	pub fn uri(mut self, uri: impl Into<String>) -> Self {
		self.uri = Some(uri.into());
		self
	}

	pub fn version(mut self, version: Version) -> Self {
		self.version = Some(version);
		self
	}

	pub fn headers(mut self, headers: HeaderMap) -> Self {
		self.headers = headers;
		self
	}

	/// Insert a single header, keeping any set previously.
	pub fn header(mut self, name: hyper::header::HeaderName, value: hyper::header::HeaderValue) -> Self {
		self.headers.insert(name, value);
		self
	}

	pub fn body(mut self, body: impl Into<Bytes>) -> Self {
		self.body = body.into();
		self
	}

	/// Finish the request.
	///
	/// # Errors
	///
	/// Returns an error if the URI does not parse.
	pub fn build(self) -> Result<Request> {
		let uri = match self.uri {
			Some(uri) => uri.parse::<Uri>()?,
			None => Uri::from_static("/"),
		};
		Ok(Request {
			method: self.method.unwrap_or(Method::GET),
			uri,
			version: self.version.unwrap_or(Version::HTTP_11),
			headers: self.headers,
			body: self.body,
		})
	}
}
