//! # Procflow - Process-Flow Workflow Graphs
//!
//! Procflow is the data-model kernel of a process-flow diagram editor:
//! directed graphs of stage nodes connected by labeled action edges, where
//! each action can notify by email, schedule reminders, and carry several
//! constraint-keyed variants of its behavior.
//!
//! ## Features
//!
//! - **Invariant-enforcing mutations**: duplicate edges, self-loops, actions
//!   into start stages and out of done stages are rejected with the graph
//!   left untouched
//! - **Edge splicing**: deleting stages reconnects their incomers to their
//!   outgoers so reachability through the deleted stage is preserved
//! - **Variant eligibility**: declarative include/exclude constraint sets per
//!   connection, origin, direction and prior stage, with a matching evaluator
//! - **Snapshots**: JSON persistence wire-compatible with the canvas frontend
//! - **Validation**: a staged pipeline reporting invariant violations in
//!   snapshots loaded from outside
//!
//! ## Quick Start
//!
//! ```rust
//! use procflow::prelude::*;
//!
//! // A fresh canvas: one start stage.
//! let mut graph = ProcessGraph::with_start_stage();
//! let start = graph.start_node().unwrap().id;
//!
//! // Create a stage and connect it.
//! let welcome = graph.create_node(Position::new(100.0, 225.0));
//! graph.set_node_label(welcome, "Welcome email sent").unwrap();
//! let action = graph.connect(start, welcome, "dn_0_source", "up_0_target").unwrap();
//!
//! // Configure the action.
//! graph.set_edge_label(action, "Send welcome email").unwrap();
//! graph.set_email_action(action, true).unwrap();
//! graph.variant_mut(action, 0).unwrap().email_template = "welcome-letter.html".into();
//!
//! // Persist and restore.
//! let snapshot = Snapshot::capture(&graph, Viewport::default());
//! let (restored, _viewport) = snapshot.restore();
//! assert_eq!(restored.edge_count(), 1);
//! ```
//!
//! ## Architecture
//!
//! - [`core`]: identifiers, domain enums, geometry and error types
//! - [`graph`]: the graph model, its mutation operations, variant
//!   applicability and snapshot serialization
//! - [`validation`]: multi-stage validation pipeline
//! - [`storage`]: single-slot snapshot stores
//! - [`samples`]: the canned customer-migration demo workflow
//!
//! The rendering layer is an external collaborator: it reports user gestures
//! as calls into [`graph::ProcessGraph`], surfaces rejected mutations as
//! transient notices, and re-renders from the resulting state. Nothing in
//! this crate knows about selection, toolbars or the canvas itself.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod core;
pub mod graph;
pub mod samples;
pub mod storage;
pub mod validation;

/// Prelude module for convenient imports.
///
/// Import everything commonly needed with:
/// ```rust
/// use procflow::prelude::*;
/// ```
pub mod prelude {
    // Core types
    pub use crate::core::error::{
        EdgeId, FlowError, FlowResult, GraphError, GraphResult, NodeId, SnapshotError,
        ValidationError, ValidationReport, ValidationWarning,
    };
    pub use crate::core::types::{
        Position, ProcessConnection, ProcessDirection, ProcessOrigin, StageType, Viewport,
    };

    // Graph
    pub use crate::graph::applicability::ActionContext;
    pub use crate::graph::edge::{ActionEdge, Variant};
    pub use crate::graph::model::ProcessGraph;
    pub use crate::graph::node::StageNode;
    pub use crate::graph::serialization::{SerializedEdge, SerializedNode, Snapshot};

    // Validation
    pub use crate::validation::pipeline::ValidationPipeline;
    pub use crate::validation::stages::{
        EmailValidation, ReachabilityValidation, StageRuleValidation, StructuralValidation,
        ValidationStage,
    };

    // Storage
    pub use crate::storage::{FileStore, MemoryStore, SnapshotStore};
}

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name.
pub const NAME: &str = env!("CARGO_PKG_NAME");

#[cfg(test)]
mod tests {
    use super::prelude::*;

    #[test]
    fn test_version() {
        assert!(!super::VERSION.is_empty());
        assert_eq!(super::NAME, "procflow");
    }

    #[test]
    fn test_editor_session() {
        // A full editor session: build, persist, reload, validate.
        let mut graph = ProcessGraph::with_start_stage();
        let start = graph.start_node().unwrap().id;
        let stage = graph.create_node(Position::new(100.0, 225.0));
        let done = graph.create_node(Position::new(100.0, 350.0));
        graph.set_node_type(done, StageType::Done).unwrap();
        graph.connect(start, stage, "", "").unwrap();
        graph.connect(stage, done, "", "").unwrap();

        let mut store = MemoryStore::new();
        store
            .save(&Snapshot::capture(&graph, Viewport::default()))
            .unwrap();

        let (reloaded, _) = store.load().unwrap().unwrap().restore();
        assert_eq!(reloaded.node_count(), 3);
        assert!(ValidationPipeline::default_pipeline().is_valid(&reloaded));
    }

    #[test]
    fn test_sample_round_trip() {
        let (graph, viewport) = crate::samples::migration_workflow();
        let json = Snapshot::capture(&graph, viewport).to_json().unwrap();
        let (restored, _) = Snapshot::from_json(&json).unwrap().restore();
        assert_eq!(restored.node_count(), graph.node_count());
        assert_eq!(restored.edge_count(), graph.edge_count());
    }
}
