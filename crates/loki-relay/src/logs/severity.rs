//! Log severity for records shipped to Loki.
//!
//! Severity is implied by which dispatcher operation is called; parsing
//! from a string only happens at configuration boundaries, where an
//! unknown value is rejected eagerly rather than deferred to the
//! background task.

use crate::error::RelayError;
use std::fmt;
use std::str::FromStr;

/// Severity of a log record, rendered into the shipped line as
/// `[DEBUG]`, `[INFO]`, `[WARNING]`, or `[ERROR]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Severity {
    Debug,
    Info,
    Warning,
    Error,
}

impl AsRef<str> for Severity {
    fn as_ref(&self) -> &str {
        match self {
            Severity::Debug => "DEBUG",
            Severity::Info => "INFO",
            Severity::Warning => "WARNING",
            Severity::Error => "ERROR",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl FromStr for Severity {
    type Err = RelayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "DEBUG" => Ok(Severity::Debug),
            "INFO" => Ok(Severity::Info),
            "WARNING" => Ok(Severity::Warning),
            "ERROR" => Ok(Severity::Error),
            _ => Err(RelayError::InvalidConfig(format!(
                "Unknown log severity '{s}'. Must be one of: DEBUG, INFO, WARNING, ERROR"
            ))),
        }
    }
}
