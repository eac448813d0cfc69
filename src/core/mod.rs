//! Core types for the Procflow workflow model.
//!
//! This module contains the foundational types the rest of the crate builds
//! on:
//! - Stage and constraint enums
//! - Canvas geometry (positions, viewport)
//! - Typed identifiers
//! - Error types and the validation report

pub mod error;
pub mod types;

// Re-export commonly used types
pub use error::{
    EdgeId, FlowError, FlowResult, GraphError, GraphResult, NodeId, SnapshotError,
    ValidationError, ValidationReport, ValidationWarning,
};
pub use types::{Position, ProcessConnection, ProcessDirection, ProcessOrigin, StageType, Viewport};
