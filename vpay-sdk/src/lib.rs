//! Shared types for the Voice Pay server.
//!
//! The `objects` module holds every request and response body exchanged
//! with the server, `signature` implements the payment provider's checkout
//! signature scheme, and `client` (behind the `client` feature) is a typed
//! HTTP client for the server API.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![forbid(unsafe_code)]

#[cfg(feature = "client")]
pub mod client;
pub mod objects;
pub mod signature;
