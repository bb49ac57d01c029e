//! # etagcache
//!
//! Middleware for caching HTTP responses based on an entity tag (ETag).
//!
//! A wrapped handler's output is negotiated against the client's
//! `If-None-Match` header: when the client already holds a matching
//! representation, the response is short-circuited to `304 Not Modified`
//! and the body is never sent.
//!
//! Three strategies are provided:
//!
//! - [`StaticETag`] — a caller-supplied tag, fixed at setup time
//! - [`AutomaticETag`] — a tag derived per request from a SHA-256 hash of
//!   the response body
//! - [`ImmutableETag`] — a hash tag computed once and memoized for the
//!   lifetime of the middleware, for content that never changes
//!
//! All three wrap the same [`Handler`] contract and can be dropped in front
//! of any handler that writes through a [`ResponseWriter`].
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//! use etagcache::{AutomaticETag, Handler, Request, ResponseCollector, ResponseWriter};
//! use hyper::Method;
//!
//! struct Hello;
//!
//! #[async_trait::async_trait]
//! impl Handler for Hello {
//!     async fn handle(
//!         &self,
//!         _request: Request,
//!         writer: &mut dyn ResponseWriter,
//!     ) -> etagcache::Result<()> {
//!         writer.write(b"hello")
//!     }
//! }
//!
//! # tokio_test::block_on(async {
//! let handler = AutomaticETag::new(Arc::new(Hello));
//!
//! let request = Request::builder()
//!     .method(Method::GET)
//!     .uri("/hello")
//!     .build()
//!     .unwrap();
//!
//! let mut collector = ResponseCollector::new();
//! handler.handle(request, &mut collector).await.unwrap();
//!
//! let response = collector.into_response();
//! assert!(response.headers.contains_key(hyper::header::ETAG));
//! # });
//! ```

pub use etagcache_http as http;
pub use etagcache_middleware as middleware;

pub use etagcache_http::{
	Error, Handler, Request, Response, ResponseCollector, ResponseWriter, Result,
};
pub use etagcache_middleware::{AutomaticETag, BufferedWriter, ImmutableETag, StaticETag};
