//! Transport layer: the raw HTTP exchange underneath the request engine.
//!
//! This module provides types and traits for:
//! - Building HTTP requests ([`HttpRequest`])
//! - Handling HTTP responses ([`HttpResponse`])
//! - Abstracting the HTTP library ([`Transport`])
//! - Production transport implementation ([`ReqwestTransport`])
//!
//! Nothing here knows about JSON, retries or the error taxonomy; the
//! [`HttpClient`](crate::client::HttpClient) layers those on top.

mod client;
mod error;
mod message;


pub use client::ReqwestTransport;
pub use error::TransportError;
pub use message::{HttpRequest, HttpResponse, Transport};
