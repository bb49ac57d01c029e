//! ETag response-caching middleware.
//!
//! Computes or accepts an entity tag for a response and short-circuits
//! regeneration with `304 Not Modified` when the client already holds a
//! matching copy. Three strategies are provided over the
//! [`Handler`](etagcache_http::Handler) contract:
//!
//! - [`StaticETag`] - caller-supplied tag, fixed at setup time
//! - [`AutomaticETag`] - tag hashed from the response body on every request
//! - [`ImmutableETag`] - hash tag computed once and memoized for the
//!   middleware's lifetime
//!
//! All three share the same negotiation protocol ([`negotiate`]) and, for
//! the hash-based strategies, the same response interception mechanism
//! ([`BufferedWriter`]).

pub mod buffer;
pub mod etag;
pub mod negotiate;

pub use buffer::BufferedWriter;
pub use etag::{AutomaticETag, ImmutableETag, StaticETag};
pub use negotiate::{Negotiation, resolve};
