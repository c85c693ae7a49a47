//! Async self-logging subsystem.
//!
//! The relay ships its own operational logs to Loki through a
//! fire-and-forget dispatcher. The pipeline per logging call:
//!
//! ```text
//!   caller ──▶ LogDispatcher::{debug,info,warning,error}
//!                 │  (returns immediately)
//!                 v
//!           detached tokio task
//!                 │
//!                 v
//!           LokiClient::push_log ──▶ 2xx: done
//!                 │
//!                 v (TransportError)
//!           fallback sink: one warning + the original message
//! ```
//!
//! Delivery is best effort: exactly one attempt per call, no retry, no
//! buffering, and no caller-visible failure.

pub mod dispatcher;
pub mod fallback;
pub mod severity;

pub use dispatcher::LogDispatcher;
pub use severity::Severity;
