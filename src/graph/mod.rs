//! Graph module for process-flow workflows.
//!
//! A workflow is a directed graph where nodes represent process stages and
//! edges represent the business actions transitioning between them.

pub mod applicability;
pub mod edge;
pub mod model;
pub mod node;
pub mod serialization;

// Re-export commonly used types
pub use applicability::ActionContext;
pub use edge::{ActionEdge, Variant};
pub use model::ProcessGraph;
pub use node::StageNode;
pub use serialization::{SerializedEdge, SerializedNode, Snapshot};
