// SPDX-License-Identifier: MIT OR Apache-2.0
//! Error types for transport operations and panel configuration.

use thiserror::Error;

/// Errors surfaced by transport and progress operations
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TransportError {
    /// Non-finite or out-of-domain numeric input
    #[error("Invalid {what}: {value}")]
    InvalidValue {
        /// Which input was rejected
        what: &'static str,
        /// The rejected value
        value: f64,
    },

    /// Loop boundaries would violate `loop_in <= loop_out`
    #[error("Invalid loop range: in {loop_in} is after out {loop_out}")]
    InvalidRange {
        /// Requested loop-in time
        loop_in: f64,
        /// Requested loop-out time
        loop_out: f64,
    },

    /// The timeline reported state the core cannot work with
    #[error("Timeline unavailable: {0}")]
    AdapterUnavailable(String),

    /// No label with this name on the timeline
    #[error("Unknown label: {0}")]
    UnknownLabel(String),
}

impl TransportError {
    pub(crate) fn invalid(what: &'static str, value: f64) -> Self {
        Self::InvalidValue { what, value }
    }
}

/// Result type for transport operations
pub type Result<T> = std::result::Result<T, TransportError>;

/// Errors raised while loading panel options
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Options file could not be read
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Options text is not valid RON
    #[error("Parse error: {0}")]
    Parse(#[from] ron::error::SpannedError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = TransportError::invalid("percentage", f64::NAN);
        assert_eq!(err.to_string(), "Invalid percentage: NaN");

        let err = TransportError::InvalidRange { loop_in: 3.0, loop_out: 1.0 };
        assert_eq!(err.to_string(), "Invalid loop range: in 3 is after out 1");
    }
}
