//! Errors
//!
//! Custom error types used throughout the `crowdsift` crate.
use thiserror::Error;

/// Errors that can occur during campaign analysis.
#[derive(Debug, Error)]
pub enum CrowdsiftError {
    /// No records left to analyze.
    #[error("The dataset contains no records after filtering, nothing to analyze.")]
    EmptyDataset,
    /// Malformed bounds filter.
    #[error("Invalid bounds: lower bound {0} is greater than upper bound {1}.")]
    InvalidBounds(f64, f64),
    /// A cumulative group with zero records was about to be divided.
    /// Zero-total groups are excluded before the sweep, so this is unreachable.
    #[error("Internal division guard tripped at threshold {0}, this is a bug.")]
    DivisionGuard(f64),
    /// Unable to read the campaign data source.
    #[error("Unable to read campaign data: {0}")]
    UnableToRead(String),
    /// Unable to serialize analysis output.
    #[error("Unable to write analysis output: {0}")]
    UnableToWrite(String),
    /// Invalid value parsing.
    #[error("Invalid value {0} passed for {1}, expected one of {2}.")]
    ParseString(String, String, String),
}
