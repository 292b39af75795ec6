//! HTTP middleware for request processing and protection.
//!
//! Provides optional Bearer authentication, rate limiting for the token
//! endpoints, and request tracing.

pub mod auth;
pub mod rate_limit;
pub mod tracing;
