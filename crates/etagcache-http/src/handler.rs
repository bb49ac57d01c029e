//! Handler trait for HTTP request processing.

use async_trait::async_trait;
use std::sync::Arc;

use crate::error::Result;
use crate::request::Request;
use crate::writer::ResponseWriter;

/// Handler trait for processing requests.
///
/// This is the core abstraction - all request handlers implement this
/// trait. A handler receives a request and writes its status, headers, and
/// body into the supplied [`ResponseWriter`]; the sink decides whether that
/// output goes to the transport or into a buffer.
///
/// # Examples
///
/// ```
/// use etagcache_http::{Handler, Request, ResponseWriter};
/// use async_trait::async_trait;
///
/// struct MyHandler;
///
/// #[async_trait]
/// impl Handler for MyHandler {
///     async fn handle(
///         &self,
///         _request: Request,
///         writer: &mut dyn ResponseWriter,
///     ) -> etagcache_http::Result<()> {
///         writer.write(b"Hello!")
///     }
/// }
/// ```
#[async_trait]
pub trait Handler: Send + Sync {
	/// Handles an HTTP request, writing the response into `writer`.
	///
	/// # Errors
	///
	/// Returns an error if the request cannot be processed or the sink
	/// rejects a write.
	async fn handle(&self, request: Request, writer: &mut dyn ResponseWriter) -> Result<()>;
}

/// Blanket implementation for `Arc<T>` where T: Handler.
///
/// This allows `Arc<dyn Handler>` to be used as a Handler, enabling shared
/// ownership of handlers across threads.
#[async_trait]
impl<T: Handler + ?Sized> Handler for Arc<T> {
	async fn handle(&self, request: Request, writer: &mut dyn ResponseWriter) -> Result<()> {
		(**self).handle(request, writer).await
	}
}
