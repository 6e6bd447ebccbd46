//! Types and pure logic shared between the LMP Studio backend and frontend.
//!
//! Everything in this crate must stay WASM compatible: no tokio, no
//! filesystem, no clocks. Callers pass "now" in explicitly.

// API client types and endpoint paths
pub mod api;
pub use api::{ApiError, HealthResponse, LmpStudioApi};

// Program records and their aggregation
pub mod lmp;
pub use lmp::{aggregate_by_name, traces_for, Lmp, LmpRecord, LmpVersion, Trace};

// Display helpers for cards and headers
pub mod display;

// Relative time formatting
pub mod time;
pub use time::time_ago;

// Dependency graph construction and layout
pub mod graph;
pub use graph::{DependencyGraph, EdgeKind, GraphEdge, GraphNode};
