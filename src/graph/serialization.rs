//! Snapshot serialization for saving and loading workflows.
//!
//! The wire shape mirrors what the frontend canvas persists: nodes and edges
//! with their presentation attributes under a `data` sub-object, plus the
//! canvas viewport. Keys are camelCase and enums SCREAMING_SNAKE_CASE so
//! snapshots written by either side stay interchangeable.

use crate::core::error::{EdgeId, NodeId};
use crate::core::types::{Position, StageType, Viewport};
use crate::graph::edge::{ActionEdge, Variant};
use crate::graph::model::ProcessGraph;
use crate::graph::node::StageNode;
use serde::{Deserialize, Serialize};

/// The `data` payload of a serialized stage.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SerializedNodeData {
    /// Display label.
    pub label: String,
    /// Stage type tag.
    #[serde(rename = "type")]
    pub stage_type: StageType,
    /// Whether the inline label editor is open.
    #[serde(default)]
    pub is_editing: bool,
    /// Whether the floating toolbar is shown.
    #[serde(default)]
    pub is_toolbar_showing: bool,
}

/// Serializable representation of a stage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SerializedNode {
    /// Stage ID.
    pub id: NodeId,
    /// Label, type and editing flags.
    pub data: SerializedNodeData,
    /// Position on the canvas.
    pub position: Position,
}

impl From<&StageNode> for SerializedNode {
    fn from(node: &StageNode) -> Self {
        Self {
            id: node.id,
            data: SerializedNodeData {
                label: node.label.clone(),
                stage_type: node.stage_type,
                is_editing: node.is_editing,
                is_toolbar_showing: node.is_toolbar_showing,
            },
            position: node.position,
        }
    }
}

impl From<SerializedNode> for StageNode {
    fn from(node: SerializedNode) -> Self {
        Self {
            id: node.id,
            label: node.data.label,
            stage_type: node.data.stage_type,
            position: node.position,
            is_editing: node.data.is_editing,
            is_toolbar_showing: node.data.is_toolbar_showing,
        }
    }
}

/// The `data` payload of a serialized action.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SerializedEdgeData {
    /// Whether the action triggers an email notification.
    pub is_email_action: bool,
    /// Variant records, in display order.
    pub variants: Vec<Variant>,
}

/// Serializable representation of an action.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SerializedEdge {
    /// Action ID.
    pub id: EdgeId,
    /// Source stage ID.
    pub source: NodeId,
    /// Target stage ID.
    pub target: NodeId,
    /// Handle the edge leaves from.
    #[serde(default)]
    pub source_handle: String,
    /// Handle the edge arrives at.
    #[serde(default)]
    pub target_handle: String,
    /// Action name.
    pub label: String,
    /// Email flag and variants.
    pub data: SerializedEdgeData,
}

impl From<&ActionEdge> for SerializedEdge {
    fn from(edge: &ActionEdge) -> Self {
        Self {
            id: edge.id,
            source: edge.source,
            target: edge.target,
            source_handle: edge.source_handle.clone(),
            target_handle: edge.target_handle.clone(),
            label: edge.label.clone(),
            data: SerializedEdgeData {
                is_email_action: edge.is_email_action,
                variants: edge.variants.clone(),
            },
        }
    }
}

impl From<SerializedEdge> for ActionEdge {
    fn from(edge: SerializedEdge) -> Self {
        Self {
            id: edge.id,
            source: edge.source,
            target: edge.target,
            source_handle: edge.source_handle,
            target_handle: edge.target_handle,
            label: edge.label,
            is_email_action: edge.data.is_email_action,
            variants: edge.data.variants,
        }
    }
}

/// A complete persisted workflow: graph plus canvas viewport.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    /// All stages.
    pub nodes: Vec<SerializedNode>,
    /// All actions.
    pub edges: Vec<SerializedEdge>,
    /// Canvas pan/zoom state.
    pub viewport: Viewport,
}

impl Snapshot {
    /// Capture the current graph and viewport.
    pub fn capture(graph: &ProcessGraph, viewport: Viewport) -> Self {
        Self {
            nodes: graph.nodes().map(SerializedNode::from).collect(),
            edges: graph.edges().iter().map(SerializedEdge::from).collect(),
            viewport,
        }
    }

    /// Rebuild a graph from this snapshot. Replaces, never merges.
    ///
    /// Actions referencing a stage that is not in the snapshot are dropped
    /// with a warning rather than restored dangling.
    pub fn restore(self) -> (ProcessGraph, Viewport) {
        let mut graph = ProcessGraph::new();
        for node in self.nodes {
            graph.add_node(node.into());
        }
        for edge in self.edges {
            let edge: ActionEdge = edge.into();
            let id = edge.id;
            if let Err(err) = graph.insert_edge_unchecked(edge) {
                log::warn!("Dropping action {} from snapshot: {}", id, err);
            }
        }
        (graph, self.viewport)
    }

    /// Serialize to JSON string.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Serialize to compact JSON (no whitespace).
    pub fn to_json_compact(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Deserialize from JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Deserialize, failing closed to an empty snapshot.
    ///
    /// Structurally invalid data (missing viewport, non-array nodes/edges)
    /// yields an empty workflow instead of an error; the problem is logged.
    pub fn from_json_or_empty(json: &str) -> Self {
        match Self::from_json(json) {
            Ok(snapshot) => snapshot,
            Err(err) => {
                log::warn!("Malformed snapshot, starting empty: {}", err);
                Self::default()
            }
        }
    }
}

impl Default for Snapshot {
    fn default() -> Self {
        Self {
            nodes: Vec::new(),
            edges: Vec::new(),
            viewport: Viewport::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::ProcessConnection;

    fn sample_graph() -> ProcessGraph {
        let mut graph = ProcessGraph::with_start_stage();
        let start = graph.start_node().unwrap().id;
        let welcome = graph.create_node(Position::new(100.0, 225.0));
        graph.set_node_label(welcome, "Welcome email sent").unwrap();
        let edge = graph
            .connect(start, welcome, "dn_0_source", "up_0_target")
            .unwrap();
        graph.set_edge_label(edge, "Send welcome email").unwrap();
        graph.set_email_action(edge, true).unwrap();
        graph.variant_mut(edge, 0).unwrap().email_template = "welcome-letter.html".to_string();
        graph
    }

    #[test]
    fn test_round_trip_preserves_everything() {
        let graph = sample_graph();
        let viewport = Viewport::new(773.7, -5.7, 0.57);

        let json = Snapshot::capture(&graph, viewport).to_json().unwrap();
        let (restored, restored_viewport) = Snapshot::from_json(&json).unwrap().restore();

        assert_eq!(restored_viewport, viewport);
        assert_eq!(restored.node_count(), graph.node_count());
        assert_eq!(restored.edge_count(), graph.edge_count());
        for node in graph.nodes() {
            assert_eq!(restored.get_node(node.id).unwrap(), node);
        }
        for edge in graph.edges() {
            assert_eq!(restored.get_edge(edge.id).unwrap(), edge);
        }
    }

    #[test]
    fn test_wire_shape_matches_frontend() {
        let graph = sample_graph();
        let json = Snapshot::capture(&graph, Viewport::default())
            .to_json_compact()
            .unwrap();

        assert!(json.contains("\"isEmailAction\":true"));
        assert!(json.contains("\"isEditing\""));
        assert!(json.contains("\"isToolbarShowing\""));
        assert!(json.contains("\"sourceHandle\":\"dn_0_source\""));
        assert!(json.contains("\"constraintsConnectionsIn\""));
        assert!(json.contains("\"type\":\"START\""));
        assert!(json.contains("\"viewport\""));
    }

    #[test]
    fn test_parses_frontend_edge_payload() {
        let json = r#"{
            "nodes": [
                { "id": "218c52b2-a362-45c1-902f-2a7d052e87d2",
                  "data": { "label": "Start", "type": "START", "isEditing": false, "isToolbarShowing": false },
                  "position": { "x": 100, "y": 100 } },
                { "id": "124b96ee-a903-4f23-a23e-802fcccbcabd",
                  "data": { "label": "Welcome email sent", "type": "NORMAL", "isEditing": false, "isToolbarShowing": true },
                  "position": { "x": 100, "y": 225 } }
            ],
            "edges": [
                { "id": "936d6714-e233-49cd-b8e8-66383d17e01e",
                  "source": "218c52b2-a362-45c1-902f-2a7d052e87d2",
                  "target": "124b96ee-a903-4f23-a23e-802fcccbcabd",
                  "sourceHandle": "dn_0_source", "targetHandle": "up_0_target",
                  "label": "Send welcome email",
                  "data": { "isEmailAction": true, "variants": [
                      { "label": "", "emailTemplate": "welcome-letter.html", "hasReminder": false,
                        "reminderEmailTemplate": "",
                        "constraintsConnectionsIn": ["AS2"], "constraintsConnectionsNotIn": [],
                        "constraintsOriginsIn": [], "constraintsOriginsNotIn": [],
                        "constraintsDirectionsIn": [], "constraintsDirectionsNotIn": [],
                        "constraintsStatesIn": [], "constraintsStatesNotIn": [] } ] } }
            ],
            "viewport": { "x": 773.72, "y": -5.73, "zoom": 0.57 }
        }"#;

        let (graph, viewport) = Snapshot::from_json(json).unwrap().restore();
        assert_eq!(graph.node_count(), 2);
        assert_eq!(graph.edge_count(), 1);
        assert!((viewport.zoom - 0.57).abs() < f64::EPSILON);

        let edge = &graph.edges()[0];
        assert!(edge.is_email_action);
        assert_eq!(edge.variants[0].email_template, "welcome-letter.html");
        assert_eq!(
            edge.variants[0].constraints_connections_in,
            vec![ProcessConnection::As2]
        );
    }

    #[test]
    fn test_dangling_edge_dropped_on_restore() {
        let graph = sample_graph();
        let mut snapshot = Snapshot::capture(&graph, Viewport::default());
        snapshot.edges[0].target = NodeId::new();

        let (restored, _) = snapshot.restore();
        assert_eq!(restored.node_count(), 2);
        assert_eq!(restored.edge_count(), 0);
    }

    #[test]
    fn test_malformed_snapshot_fails_closed() {
        // Missing viewport.
        let snapshot = Snapshot::from_json_or_empty(r#"{ "nodes": [], "edges": [] }"#);
        assert!(snapshot.nodes.is_empty());

        // Not JSON at all.
        let snapshot = Snapshot::from_json_or_empty("not json");
        assert!(snapshot.nodes.is_empty());
        assert_eq!(snapshot.viewport, Viewport::default());

        // Non-array nodes.
        assert!(Snapshot::from_json(r#"{ "nodes": 3, "edges": [], "viewport": { "x": 0, "y": 0, "zoom": 1 } }"#).is_err());
    }
}
