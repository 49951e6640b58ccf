//! Error types for the itinera ecosystem.
//!
//! The calendar exporter itself contributes no variants here: it accepts
//! any input and always produces a valid payload. Errors come from the
//! provider plumbing and configuration.

use thiserror::Error;

/// Errors that can occur in itinera operations.
#[derive(Error, Debug)]
pub enum ItineraError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Provider error: {0}")]
    Provider(String),

    #[error("Provider '{0}' is not installed (expected itinera-provider-{0} on PATH)")]
    ProviderNotInstalled(String),

    #[error("Provider request timed out after {0}s")]
    ProviderTimeout(u64),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Result type alias for itinera operations.
pub type ItineraResult<T> = Result<T, ItineraError>;
