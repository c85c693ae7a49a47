//! Local fallback sink for records that could not reach Loki.
//!
//! Writes go through `tracing`, which lands on the subscriber installed
//! by the binary (stderr). The sink never raises into its caller and is
//! safe for concurrent writes.

use crate::logs::severity::Severity;
use crate::loki::TransportError;
use tracing::{debug, error, info, warn};

/// Write a message locally at its original severity.
pub fn emit(severity: Severity, message: &str) {
    match severity {
        Severity::Debug => debug!("{message}"),
        Severity::Info => info!("{message}"),
        Severity::Warning => warn!("{message}"),
        Severity::Error => error!("{message}"),
    }
}

/// Write one warning describing a failed delivery attempt.
pub fn delivery_failure(err: &TransportError) {
    warn!("Failed to push log to Loki, logging locally: {err}");
}
