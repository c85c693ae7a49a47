//! # Loki Relay
//!
//! A thin backend that sits between a frontend and a Grafana Loki instance.
//! It exposes a small REST API for label discovery and log queries, and
//! forwards its own operational logs to the same Loki instance through a
//! fire-and-forget dispatcher with a local fallback sink.
//!
//! ## Modules
//!
//! - [`config`]: environment-driven configuration and Loki API constants
//! - [`loki`]: HTTP client for the Loki push and query endpoints
//! - [`logs`]: the async self-logging subsystem (dispatcher, severity,
//!   fallback sink)
//! - [`api`]: REST endpoints, response envelopes, and the server loop
//!
//! ## Self-logging contract
//!
//! Logging calls never block and never fail from the caller's point of
//! view. Each call spawns a detached task that makes exactly one delivery
//! attempt; on failure the message lands in the local fallback sink
//! instead of Loki, preceded by one warning describing the failure.

#![deny(clippy::all)]
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![deny(unused_extern_crates)]

/// REST endpoints, response envelopes, and the HTTP server loop
pub mod api;

/// Environment-driven configuration
pub mod config;

/// Process-level error taxonomy
pub mod error;

/// Async self-logging subsystem (dispatcher, severity, fallback sink)
pub mod logs;

/// Loki HTTP client (push path and query wrappers)
pub mod loki;
