//! Core HTTP abstractions for the etagcache middleware.
//!
//! This crate defines the seams the caching strategies are written against:
//! the [`Handler`] contract for request processing, the [`ResponseWriter`]
//! sink a handler writes its response into, and plain [`Request`] /
//! [`Response`] types over hyper's vocabulary.
//!
//! The HTTP server/transport is an external collaborator: it parses
//! requests, hands them to a [`Handler`], and serializes whatever the
//! handler wrote. [`ResponseCollector`] is the accumulating sink used for
//! that final hand-off (and throughout the tests).

pub mod error;
pub mod handler;
pub mod request;
pub mod response;
pub mod writer;

pub use error::{Error, Result};
pub use handler::Handler;
pub use request::Request;
pub use response::Response;
pub use writer::{ResponseCollector, ResponseWriter};
