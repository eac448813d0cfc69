//! Stage nodes.

use crate::core::error::NodeId;
use crate::core::types::{Position, StageType};
use serde::{Deserialize, Serialize};

/// A stage in the workflow.
///
/// Identity and type carry the structural invariants; position and the
/// editing flags are presentation state that happens to be persisted so the
/// frontend can restore its canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StageNode {
    /// Unique identifier, assigned at creation, immutable.
    pub id: NodeId,
    /// Display text, mutable via inline edit.
    pub label: String,
    /// The role this stage plays.
    pub stage_type: StageType,
    /// Position on the canvas.
    pub position: Position,
    /// Whether the label is currently being edited inline.
    pub is_editing: bool,
    /// Whether the floating toolbar is shown for this stage.
    pub is_toolbar_showing: bool,
}

impl StageNode {
    /// Create a new normal stage with the given label.
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            id: NodeId::new(),
            label: label.into(),
            stage_type: StageType::Normal,
            position: Position::default(),
            is_editing: false,
            is_toolbar_showing: true,
        }
    }

    /// Create with a specific ID.
    pub fn with_id(mut self, id: NodeId) -> Self {
        self.id = id;
        self
    }

    /// Set the stage type.
    pub fn with_type(mut self, stage_type: StageType) -> Self {
        self.stage_type = stage_type;
        self
    }

    /// Set the position.
    pub fn with_position(mut self, x: f64, y: f64) -> Self {
        self.position = Position::new(x, y);
        self
    }

    /// Mark the label as being edited inline.
    pub fn with_editing(mut self, editing: bool) -> Self {
        self.is_editing = editing;
        self
    }

    /// Whether this is the workflow entry stage.
    pub fn is_start(&self) -> bool {
        self.stage_type == StageType::Start
    }

    /// Whether this is a terminal stage.
    pub fn is_done(&self) -> bool {
        self.stage_type == StageType::Done
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_node_defaults() {
        let node = StageNode::new("Welcome email sent");
        assert_eq!(node.label, "Welcome email sent");
        assert_eq!(node.stage_type, StageType::Normal);
        assert!(!node.is_editing);
    }

    #[test]
    fn test_builder_chain() {
        let node = StageNode::new("Start")
            .with_type(StageType::Start)
            .with_position(100.0, 100.0);
        assert!(node.is_start());
        assert_eq!(node.position.x, 100.0);
    }
}
