//! ETag caching strategies.
//!
//! Each strategy wraps a next [`Handler`] and negotiates the client's
//! `If-None-Match` value against a candidate tag. On a match the response
//! is short-circuited to `304 Not Modified`; otherwise the `ETag` header is
//! attached and the real response is delivered.
//!
//! - [`StaticETag`] - a fixed, caller-supplied tag
//! - [`AutomaticETag`] - a tag hashed from the response body on every request
//! - [`ImmutableETag`] - a hash tag computed once and memoized

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::URL_SAFE;
use hyper::StatusCode;
use hyper::header::{ETAG, HeaderValue, IF_NONE_MATCH};
use sha2::{Digest, Sha256};
use std::sync::{Arc, OnceLock};
use tracing::debug;

use etagcache_http::{Handler, Request, ResponseWriter, Result};

use crate::buffer::BufferedWriter;
use crate::negotiate::{Negotiation, resolve};

/// Weak-tag marker prefix.
const WEAK_PREFIX: &str = "W/";

/// Derive a content tag from a full response body.
///
/// SHA-256 over the body bytes, encoded with the padded URL-safe base64
/// alphabet: a fixed-length printable token used verbatim as the tag.
fn content_tag(body: &[u8]) -> String {
	let hash = Sha256::digest(body);
	URL_SAFE.encode(hash)
}

/// Whether a buffered response may carry a tag at all.
///
/// 204 and anything outside the 2xx range is flushed verbatim: such
/// responses have bodies or statuses that may legitimately vary or be
/// empty, so tagging them would be wrong.
fn is_cacheable(status: StatusCode) -> bool {
	status != StatusCode::NO_CONTENT && status.is_success()
}

/// Caching middleware with a fixed tag supplied at setup time.
///
/// Because the tag is already known, negotiation happens before the wrapped
/// handler runs and no response buffering is needed: on a cache miss the
/// request flows straight through to the real sink.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use etagcache_http::{Handler, Request, ResponseCollector, ResponseWriter};
/// use etagcache_middleware::StaticETag;
/// use hyper::header::ETAG;
///
/// struct TestHandler;
///
/// #[async_trait::async_trait]
/// impl Handler for TestHandler {
///     async fn handle(
///         &self,
///         _request: Request,
///         writer: &mut dyn ResponseWriter,
///     ) -> etagcache_http::Result<()> {
///         writer.write(b"content")
///     }
/// }
///
/// # tokio_test::block_on(async {
/// let handler = StaticETag::new(Arc::new(TestHandler), "v1", false);
///
/// let request = Request::builder().uri("/resource").build().unwrap();
/// let mut collector = ResponseCollector::new();
/// handler.handle(request, &mut collector).await.unwrap();
///
/// let response = collector.into_response();
/// assert_eq!(response.headers.get(ETAG).unwrap(), "v1");
/// # });
/// ```
pub struct StaticETag {
	etag: String,
	next: Arc<dyn Handler>,
}

impl StaticETag {
	/// Wrap `next` with a fixed tag.
	///
	/// When `weak` is set the tag is prefixed with the `W/` marker. The
	/// middleware itself still compares by exact string equality; the
	/// weak/strong distinction is the caller's convention.
	pub fn new(next: Arc<dyn Handler>, etag: impl Into<String>, weak: bool) -> Self {
		let etag = etag.into();
		let etag = if weak {
			format!("{WEAK_PREFIX}{etag}")
		} else {
			etag
		};
		Self { etag, next }
	}
}

#[async_trait]
impl Handler for StaticETag {
	async fn handle(&self, request: Request, writer: &mut dyn ResponseWriter) -> Result<()> {
		let if_none_match = request.header(IF_NONE_MATCH);
		if resolve(writer, if_none_match, &self.etag) == Negotiation::NotModified {
			return Ok(());
		}

		writer.insert_header(ETAG, HeaderValue::from_str(&self.etag)?);
		self.next.handle(request, writer).await
	}
}

/// Caching middleware that derives the tag from the response body.
///
/// The wrapped handler always runs first, writing into a fresh
/// [`BufferedWriter`] so the full body is available for hashing before any
/// byte is transmitted. Responses with status 204 or outside the 2xx range
/// are flushed verbatim and never tagged.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use etagcache_http::{Handler, Request, ResponseCollector, ResponseWriter};
/// use etagcache_middleware::AutomaticETag;
/// use hyper::header::ETAG;
///
/// struct TestHandler;
///
/// #[async_trait::async_trait]
/// impl Handler for TestHandler {
///     async fn handle(
///         &self,
///         _request: Request,
///         writer: &mut dyn ResponseWriter,
///     ) -> etagcache_http::Result<()> {
///         writer.write(b"content")
///     }
/// }
///
/// # tokio_test::block_on(async {
/// let handler = AutomaticETag::new(Arc::new(TestHandler));
///
/// let request = Request::builder().uri("/resource").build().unwrap();
/// let mut collector = ResponseCollector::new();
/// handler.handle(request, &mut collector).await.unwrap();
///
/// let response = collector.into_response();
/// assert!(response.headers.contains_key(ETAG));
/// assert_eq!(&response.body[..], b"content");
/// # });
/// ```
pub struct AutomaticETag {
	next: Arc<dyn Handler>,
}

impl AutomaticETag {
	/// Wrap `next` with per-request content hashing.
	pub fn new(next: Arc<dyn Handler>) -> Self {
		Self { next }
	}
}

#[async_trait]
impl Handler for AutomaticETag {
	async fn handle(&self, request: Request, writer: &mut dyn ResponseWriter) -> Result<()> {
		let if_none_match = request.header(IF_NONE_MATCH).map(str::to_owned);

		let mut buffer = BufferedWriter::new();
		self.next.handle(request, &mut buffer).await?;

		if !is_cacheable(buffer.status()) {
			return buffer.flush(writer);
		}

		let etag = content_tag(buffer.body());
		if resolve(writer, if_none_match.as_deref(), &etag) == Negotiation::NotModified {
			return Ok(());
		}

		writer.insert_header(ETAG, HeaderValue::from_str(&etag)?);
		buffer.flush(writer)
	}
}

/// Caching middleware for content that never changes.
///
/// Like [`AutomaticETag`], but the hash is computed on the first cacheable
/// response and memoized for the remaining lifetime of the middleware.
/// Once the slot is populated the handler still runs on a cache miss, but
/// its output is written straight through without buffering or hashing -
/// the stored tag is served regardless of what the handler produces now.
///
/// Concurrent first requests may each invoke the handler and compute a
/// hash; the first store wins and the race is benign for deterministic
/// handlers. The guarantee is "at least once until first success", not
/// "exactly once".
pub struct ImmutableETag {
	next: Arc<dyn Handler>,
	cached: OnceLock<String>,
}

impl ImmutableETag {
	/// Wrap `next` with a process-memoized content hash.
	pub fn new(next: Arc<dyn Handler>) -> Self {
		Self {
			next,
			cached: OnceLock::new(),
		}
	}
}

#[async_trait]
impl Handler for ImmutableETag {
	async fn handle(&self, request: Request, writer: &mut dyn ResponseWriter) -> Result<()> {
		let if_none_match = request.header(IF_NONE_MATCH).map(str::to_owned);

		// Warm path: tag already known, no buffering or hashing needed.
		if let Some(etag) = self.cached.get() {
			if resolve(writer, if_none_match.as_deref(), etag) == Negotiation::NotModified {
				return Ok(());
			}
			writer.insert_header(ETAG, HeaderValue::from_str(etag)?);
			return self.next.handle(request, writer).await;
		}

		let mut buffer = BufferedWriter::new();
		self.next.handle(request, &mut buffer).await?;

		if !is_cacheable(buffer.status()) {
			return buffer.flush(writer);
		}

		let etag = content_tag(buffer.body());
		// First store wins; a racing request serves the tag it computed.
		if self.cached.set(etag.clone()).is_ok() {
			debug!(etag = %etag, "memoized content tag");
		}

		if resolve(writer, if_none_match.as_deref(), &etag) == Negotiation::NotModified {
			return Ok(());
		}

		writer.insert_header(ETAG, HeaderValue::from_str(&etag)?);
		buffer.flush(writer)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use etagcache_http::ResponseCollector;
	use std::sync::atomic::{AtomicUsize, Ordering};

	struct TestHandler {
		body: &'static str,
		status: StatusCode,
	}

	impl TestHandler {
		fn ok(body: &'static str) -> Arc<Self> {
			Arc::new(Self {
				body,
				status: StatusCode::OK,
			})
		}
	}

	#[async_trait]
	impl Handler for TestHandler {
		async fn handle(&self, _request: Request, writer: &mut dyn ResponseWriter) -> Result<()> {
			writer.set_status(self.status);
			writer.write(self.body.as_bytes())
		}
	}

	/// Returns a different body on every invocation and counts calls.
	struct DriftingHandler {
		calls: AtomicUsize,
	}

	#[async_trait]
	impl Handler for DriftingHandler {
		async fn handle(&self, _request: Request, writer: &mut dyn ResponseWriter) -> Result<()> {
			let call = self.calls.fetch_add(1, Ordering::SeqCst);
			writer.write(format!("body-{call}").as_bytes())
		}
	}

	fn request_with_tag(tag: &str) -> Request {
		Request::builder()
			.uri("/resource")
			.header(IF_NONE_MATCH, tag.parse().unwrap())
			.build()
			.unwrap()
	}

	fn plain_request() -> Request {
		Request::builder().uri("/resource").build().unwrap()
	}

	#[test]
	fn test_content_tag_is_urlsafe_sha256() {
		// SHA-256("content"), URL-safe base64 with padding.
		assert_eq!(
			content_tag(b"content"),
			"7XACtDnprIRfIjV9giusFERzD722AW0-yUMil7nsn3M="
		);
	}

	#[tokio::test]
	async fn test_static_sets_fixed_tag() {
		let handler = StaticETag::new(TestHandler::ok("content"), "v1", false);

		let mut collector = ResponseCollector::new();
		handler.handle(plain_request(), &mut collector).await.unwrap();

		let response = collector.into_response();
		assert_eq!(response.status, StatusCode::OK);
		assert_eq!(response.headers.get(ETAG).unwrap(), "v1");
		assert_eq!(&response.body[..], b"content");
	}

	#[tokio::test]
	async fn test_static_weak_tag_is_prefixed() {
		let handler = StaticETag::new(TestHandler::ok("content"), "v1", true);

		let mut collector = ResponseCollector::new();
		handler.handle(plain_request(), &mut collector).await.unwrap();

		let response = collector.into_response();
		assert_eq!(response.headers.get(ETAG).unwrap(), "W/v1");
	}

	#[tokio::test]
	async fn test_static_match_short_circuits_before_handler() {
		struct PanickingHandler;

		#[async_trait]
		impl Handler for PanickingHandler {
			async fn handle(
				&self,
				_request: Request,
				_writer: &mut dyn ResponseWriter,
			) -> Result<()> {
				panic!("handler must not run on a static-tag match");
			}
		}

		let handler = StaticETag::new(Arc::new(PanickingHandler), "v1", false);

		let mut collector = ResponseCollector::new();
		handler
			.handle(request_with_tag("v1"), &mut collector)
			.await
			.unwrap();

		let response = collector.into_response();
		assert_eq!(response.status, StatusCode::NOT_MODIFIED);
		assert!(response.body.is_empty());
	}

	#[tokio::test]
	async fn test_automatic_tags_with_body_hash() {
		let handler = AutomaticETag::new(TestHandler::ok("content"));

		let mut collector = ResponseCollector::new();
		handler.handle(plain_request(), &mut collector).await.unwrap();

		let response = collector.into_response();
		assert_eq!(response.status, StatusCode::OK);
		assert_eq!(
			response.headers.get(ETAG).unwrap(),
			content_tag(b"content").as_str()
		);
		assert_eq!(&response.body[..], b"content");
	}

	#[tokio::test]
	async fn test_automatic_match_returns_304() {
		let handler = AutomaticETag::new(TestHandler::ok("content"));

		let mut collector = ResponseCollector::new();
		handler
			.handle(request_with_tag(&content_tag(b"content")), &mut collector)
			.await
			.unwrap();

		let response = collector.into_response();
		assert_eq!(response.status, StatusCode::NOT_MODIFIED);
		assert!(response.body.is_empty());
		assert!(!response.headers.contains_key(ETAG));
	}

	#[tokio::test]
	async fn test_automatic_preserves_handler_status() {
		let handler = AutomaticETag::new(Arc::new(TestHandler {
			body: "created",
			status: StatusCode::CREATED,
		}));

		let mut collector = ResponseCollector::new();
		handler.handle(plain_request(), &mut collector).await.unwrap();

		let response = collector.into_response();
		assert_eq!(response.status, StatusCode::CREATED);
		assert!(response.headers.contains_key(ETAG));
	}

	#[tokio::test]
	async fn test_immutable_serves_first_tag_despite_drift() {
		let handler = ImmutableETag::new(Arc::new(DriftingHandler {
			calls: AtomicUsize::new(0),
		}));
		let first_tag = content_tag(b"body-0");

		let mut collector = ResponseCollector::new();
		handler.handle(plain_request(), &mut collector).await.unwrap();
		let first = collector.into_response();
		assert_eq!(first.headers.get(ETAG).unwrap(), first_tag.as_str());
		assert_eq!(&first.body[..], b"body-0");

		// Second request: handler output drifts but the memoized tag does not.
		let mut collector = ResponseCollector::new();
		handler.handle(plain_request(), &mut collector).await.unwrap();
		let second = collector.into_response();
		assert_eq!(second.headers.get(ETAG).unwrap(), first_tag.as_str());
		assert_eq!(&second.body[..], b"body-1");
	}

	#[tokio::test]
	async fn test_immutable_warm_match_skips_handler() {
		let drifting = Arc::new(DriftingHandler {
			calls: AtomicUsize::new(0),
		});
		let handler = ImmutableETag::new(drifting.clone());
		let first_tag = content_tag(b"body-0");

		let mut collector = ResponseCollector::new();
		handler.handle(plain_request(), &mut collector).await.unwrap();
		assert_eq!(drifting.calls.load(Ordering::SeqCst), 1);

		let mut collector = ResponseCollector::new();
		handler
			.handle(request_with_tag(&first_tag), &mut collector)
			.await
			.unwrap();

		let response = collector.into_response();
		assert_eq!(response.status, StatusCode::NOT_MODIFIED);
		assert!(response.body.is_empty());
		// Warm-path match never re-invokes the wrapped handler.
		assert_eq!(drifting.calls.load(Ordering::SeqCst), 1);
	}

	#[tokio::test]
	async fn test_immutable_does_not_memoize_uncacheable_status() {
		struct FlakyHandler {
			calls: AtomicUsize,
		}

		#[async_trait]
		impl Handler for FlakyHandler {
			async fn handle(
				&self,
				_request: Request,
				writer: &mut dyn ResponseWriter,
			) -> Result<()> {
				if self.calls.fetch_add(1, Ordering::SeqCst) == 0 {
					writer.set_status(StatusCode::SERVICE_UNAVAILABLE);
					writer.write(b"warming up")
				} else {
					writer.write(b"ready")
				}
			}
		}

		let handler = ImmutableETag::new(Arc::new(FlakyHandler {
			calls: AtomicUsize::new(0),
		}));

		let mut collector = ResponseCollector::new();
		handler.handle(plain_request(), &mut collector).await.unwrap();
		let first = collector.into_response();
		assert_eq!(first.status, StatusCode::SERVICE_UNAVAILABLE);
		assert!(!first.headers.contains_key(ETAG));

		// The failed warm-up was not memoized; the first success is.
		let mut collector = ResponseCollector::new();
		handler.handle(plain_request(), &mut collector).await.unwrap();
		let second = collector.into_response();
		assert_eq!(second.status, StatusCode::OK);
		assert_eq!(
			second.headers.get(ETAG).unwrap(),
			content_tag(b"ready").as_str()
		);
	}

	#[tokio::test]
	async fn test_handler_error_propagates_unchanged() {
		struct FailingHandler;

		#[async_trait]
		impl Handler for FailingHandler {
			async fn handle(
				&self,
				_request: Request,
				_writer: &mut dyn ResponseWriter,
			) -> Result<()> {
				Err(etagcache_http::Error::handler("upstream failed"))
			}
		}

		let handler = AutomaticETag::new(Arc::new(FailingHandler));

		let mut collector = ResponseCollector::new();
		let err = handler
			.handle(plain_request(), &mut collector)
			.await
			.unwrap_err();
		assert_eq!(err.to_string(), "handler error: upstream failed");
	}
}
