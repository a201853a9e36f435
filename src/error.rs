//! Error types
//!
//! Everything that can stop a generation run is reported through
//! [`GenerationError`]; configuration file problems use [`ConfigError`].

use std::fmt;
use thiserror::Error;

/// Pipeline stage that hit its iteration bound
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Smoothing,
    Connectivity,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Smoothing => write!(f, "smoothing"),
            Stage::Connectivity => write!(f, "connectivity"),
        }
    }
}

/// Failure of a generation run
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerationError {
    #[error("invalid dimensions {width}x{height}: both must be positive and the cell count must fit in i32")]
    InvalidDimensions { width: i32, height: i32 },

    #[error("invalid {name} threshold {value}: must be at least 1")]
    InvalidThreshold { name: &'static str, value: usize },

    #[error("invalid {name} limit {value}: must be in 0..=8")]
    InvalidNeighborLimit { name: &'static str, value: u8 },

    #[error("invalid fill percent {0}: must be in 0..=100")]
    InvalidFillPercent(u8),

    #[error("invalid decoration buckets: {0}")]
    InvalidDecoration(String),

    #[error("invalid tint component {name} = {value}: must be in 0.0..=1.0")]
    InvalidColor { name: &'static str, value: String },

    #[error("pruning discarded every floor region")]
    NoSurvivingRooms,

    #[error("{stage} did not converge within {limit} iterations")]
    IterationLimitExceeded { stage: Stage, limit: u32 },

    #[error("{count} rooms could not be connected to the main room")]
    StrandedRooms { count: usize },
}

/// Failure loading or writing a configuration preset
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {message}")]
    Parse { path: String, message: String },

    #[error("failed to serialize config: {0}")]
    Serialize(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = GenerationError::IterationLimitExceeded {
            stage: Stage::Smoothing,
            limit: 12,
        };
        assert_eq!(err.to_string(), "smoothing did not converge within 12 iterations");

        let err = GenerationError::InvalidDimensions { width: 0, height: 5 };
        assert!(err.to_string().contains("0x5"));
    }
}
