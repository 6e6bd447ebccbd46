//! API error type and endpoint definitions
//!
//! The backend serves these paths and the frontend's fetch layer calls them.

use crate::lmp::{Lmp, Trace};
use serde::{Deserialize, Serialize};

/// API error types
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, thiserror::Error)]
pub enum ApiError {
    /// Network or connection error
    #[error("Network error: {0}")]
    Network(String),
    /// Server returned an error status
    #[error("Server error ({status}): {message}")]
    Server { status: u16, message: String },
    /// Failed to parse response
    #[error("Parse error: {0}")]
    Parse(String),
    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),
}

impl ApiError {
    /// Classify a non-success HTTP status.
    pub fn from_status(status: u16, message: impl Into<String>) -> Self {
        let message = message.into();
        if status == 404 {
            ApiError::NotFound(message)
        } else {
            ApiError::Server { status, message }
        }
    }
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: Option<String>,
}

/// Trait defining the LMP Studio API as seen by a client
///
/// The frontend implements this over gloo-net; tests implement it with
/// canned data.
#[allow(async_fn_in_trait)]
pub trait LmpStudioApi {
    /// All programs, aggregated by name, most recently updated first
    async fn fetch_lmps(&self) -> Result<Vec<Lmp>, ApiError>;

    /// Traces between versions of the given programs
    async fn fetch_traces(&self, lmps: &[Lmp]) -> Result<Vec<Trace>, ApiError>;

    /// One program by name
    async fn fetch_lmp(&self, name: &str) -> Result<Lmp, ApiError>;
}

/// API endpoint definitions
pub mod endpoints {
    pub const HEALTH: &str = "/api/health";
    pub const LMPS: &str = "/api/lmps";
    pub const TRACES: &str = "/api/traces";

    /// Path for one program; the name is percent-encoded as a single segment
    pub fn lmp(name: &str) -> String {
        format!("/api/lmps/{}", urlencoding::encode(name))
    }
}
