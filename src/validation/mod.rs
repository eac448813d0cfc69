//! Validation module for workflow graphs.
//!
//! The pipeline runs after loading a snapshot to catch invariant violations
//! the mutation API would never have produced itself.

pub mod pipeline;
pub mod stages;

pub use pipeline::ValidationPipeline;
pub use stages::{
    EmailValidation, ReachabilityValidation, StageRuleValidation, StructuralValidation,
    ValidationStage,
};
