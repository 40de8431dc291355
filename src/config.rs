// src/config.rs

//! Configuration types for the admission layer

// dependencies
use std::collections::HashSet;
use std::fs;
use std::path::Path;

use serde::Deserialize;
use tracing::warn;

use crate::errors::AdmissionError;

/// Rate limit for a single route: burst capacity plus sustained rate in
/// tokens per minute. The route key is whatever identifier the routing layer
/// uses to select a bucket, typically a method plus path template such as
/// `GET /user/:id`.
#[derive(Debug, Clone, Deserialize)]
pub struct RouteLimit {
    #[serde(alias = "endpoint")]
    pub route: String,
    pub burst: u64,
    pub sustained: u64,
}

impl RouteLimit {
    /// Create a new route limit entry
    pub fn new(route: impl Into<String>, burst: u64, sustained: u64) -> Self {
        Self {
            route: route.into(),
            burst,
            sustained,
        }
    }
}

/// Ordered set of route limits consumed once at startup.
///
/// Deserializes from the JSON shape used by the config file, where the
/// top-level field is `rateLimitsPerEndpoint` and each entry names an
/// `endpoint` with its `burst` and `sustained` values.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AdmissionConfig {
    #[serde(rename = "rateLimitsPerEndpoint", alias = "routes")]
    pub routes: Vec<RouteLimit>,
}

impl AdmissionConfig {
    /// Create an empty configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style: append a route limit
    pub fn route(mut self, route: impl Into<String>, burst: u64, sustained: u64) -> Self {
        self.routes.push(RouteLimit::new(route, burst, sustained));
        self
    }

    /// Parse a configuration from a JSON string
    pub fn from_json_str(json: &str) -> Result<Self, AdmissionError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load and parse a configuration file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, AdmissionError> {
        let contents = fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    /// Validate the configuration.
    ///
    /// An empty route list or a zero burst/sustained value is fatal: the
    /// process must not start serving with an invalid registry. Duplicate
    /// route keys are allowed with last-entry-wins precedence, but flagged
    /// here so the overwrite is never silent.
    pub fn validate(&self) -> Result<(), AdmissionError> {
        if self.routes.is_empty() {
            return Err(AdmissionError::EmptyConfig);
        }
        let mut seen = HashSet::new();
        for limit in &self.routes {
            if limit.burst == 0 {
                return Err(AdmissionError::InvalidBurst(limit.route.clone()));
            }
            if limit.sustained == 0 {
                return Err(AdmissionError::InvalidSustained(limit.route.clone()));
            }
            if !seen.insert(limit.route.as_str()) {
                warn!(route = %limit.route, "duplicate route limit; last entry wins");
            }
        }
        Ok(())
    }
}
