// src/errors.rs

// error handling for the admission layer

// dependencies
use std::error::Error;
use std::fmt;

use crate::clock::ClockError;

/// Error type for admission-layer failures.
///
/// Rate-limited and unknown-route outcomes are decisions, not errors; they
/// are reported through [`AdmitDecision`](crate::AdmitDecision). This enum
/// covers startup configuration problems and clock failures only.
#[non_exhaustive]
#[derive(Debug)]
pub enum AdmissionError {
    EmptyConfig,              // no route limits configured at all
    InvalidBurst(String),     // burst of 0 for the named route
    InvalidSustained(String), // sustained rate of 0 for the named route
    ConfigIo(std::io::Error),
    ConfigParse(serde_json::Error),
    Clock(ClockError),
}

// implement the Display trait for the AdmissionError type
impl fmt::Display for AdmissionError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AdmissionError::EmptyConfig => {
                write!(f, "Rate limit configuration must contain at least one route")
            }
            AdmissionError::InvalidBurst(route) => {
                write!(f, "Burst limit must be positive for route '{route}'")
            }
            AdmissionError::InvalidSustained(route) => {
                write!(f, "Sustained rate must be positive for route '{route}'")
            }
            AdmissionError::ConfigIo(err) => {
                write!(f, "Failed to read rate limit configuration: {err}")
            }
            AdmissionError::ConfigParse(err) => {
                write!(f, "Failed to parse rate limit configuration: {err}")
            }
            AdmissionError::Clock(err) => write!(f, "Clock error occurred: {err}"),
        }
    }
}

// implement the Error trait for the AdmissionError type
impl Error for AdmissionError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            AdmissionError::ConfigIo(err) => Some(err),
            AdmissionError::ConfigParse(err) => Some(err),
            AdmissionError::Clock(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for AdmissionError {
    fn from(err: std::io::Error) -> Self {
        AdmissionError::ConfigIo(err)
    }
}

impl From<serde_json::Error> for AdmissionError {
    fn from(err: serde_json::Error) -> Self {
        AdmissionError::ConfigParse(err)
    }
}

impl From<ClockError> for AdmissionError {
    fn from(err: ClockError) -> Self {
        AdmissionError::Clock(err)
    }
}
