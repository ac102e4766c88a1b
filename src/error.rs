//! Error types
//!
//! Two regimes: `SetupError` rejects a malformed bike setup before it reaches
//! the engines, `ReferenceDataError` reports a reference file that could not
//! be read or parsed. The engines themselves never fail; lookup misses are
//! reported through `DiagnosisResult` instead.

use thiserror::Error;

/// Validation failure while building a `BikeSetup`
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SetupError {
    #[error("rider weight {0} kg is outside (30, 150]")]
    WeightOutOfRange(f64),

    #[error("travel {0} mm is outside (35, 250]")]
    TravelOutOfRange(u32),

    #[error("a hardtail cannot have a rear shock")]
    ShockOnHardtail,
}

/// Failure to read or parse a reference table
#[derive(Debug, Error)]
pub enum ReferenceDataError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse reference data: {0}")]
    Parse(#[from] serde_json::Error),
}
