//! Workflow graph structure and mutation operations.
//!
//! The ProcessGraph is the central data structure that holds all stages and
//! actions. It uses a centralized approach for:
//! - Easy serialization
//! - Graph-wide invariant enforcement
//! - Deterministic edge splicing on stage deletion
//!
//! Every mutation is synchronous and all-or-nothing: a rejected operation
//! returns a [`GraphError`] and leaves the graph untouched.

use crate::core::error::{EdgeId, GraphError, GraphResult, NodeId};
use crate::core::types::{Position, StageType};
use crate::graph::edge::{ActionEdge, Variant};
use crate::graph::node::StageNode;
use indexmap::IndexMap;
use std::collections::HashSet;

/// The workflow graph: stages plus the actions connecting them.
///
/// Uses IndexMap for nodes to maintain insertion order for consistent
/// iteration; edges keep their creation order, which is also their display
/// order.
#[derive(Debug, Clone, Default)]
pub struct ProcessGraph {
    /// All stages, indexed by ID.
    nodes: IndexMap<NodeId, StageNode>,
    /// All actions, in display order.
    edges: Vec<ActionEdge>,
    /// Counter feeding auto-generated stage labels. Not persisted.
    node_seq: u64,
    /// Counter feeding auto-generated action labels. Not persisted.
    edge_seq: u64,
}

impl ProcessGraph {
    /// Create a new empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a graph seeded with a single start stage, the way a fresh
    /// editor canvas opens.
    pub fn with_start_stage() -> Self {
        let mut graph = Self::new();
        let mut start = StageNode::new("Start")
            .with_type(StageType::Start)
            .with_position(100.0, 100.0);
        start.is_toolbar_showing = false;
        graph.add_node(start);
        graph
    }

    // ========================================================================
    // Stage Management
    // ========================================================================

    /// Create a new stage at the given position.
    ///
    /// The stage gets a fresh id, type `Normal`, an auto-generated label and
    /// the inline editor open. Always succeeds.
    pub fn create_node(&mut self, position: Position) -> NodeId {
        self.node_seq += 1;
        let node = StageNode::new(format!("Stage #{}", self.node_seq))
            .with_position(position.x, position.y)
            .with_editing(true);
        self.add_node(node)
    }

    /// Add a prebuilt stage to the graph.
    pub fn add_node(&mut self, node: StageNode) -> NodeId {
        let id = node.id;
        self.nodes.insert(id, node);
        id
    }

    /// Get a reference to a stage.
    pub fn get_node(&self, id: NodeId) -> GraphResult<&StageNode> {
        self.nodes.get(&id).ok_or(GraphError::NodeNotFound(id))
    }

    /// Check if a stage exists.
    pub fn has_node(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    /// Get all stages.
    pub fn nodes(&self) -> impl Iterator<Item = &StageNode> {
        self.nodes.values()
    }

    /// Get all stage IDs.
    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes.keys().copied()
    }

    /// Get the number of stages.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Rename a stage.
    pub fn set_node_label(&mut self, id: NodeId, label: impl Into<String>) -> GraphResult<()> {
        let node = self.node_mut(id)?;
        node.label = label.into();
        Ok(())
    }

    /// Move a stage on the canvas.
    pub fn set_node_position(&mut self, id: NodeId, position: Position) -> GraphResult<()> {
        self.node_mut(id)?.position = position;
        Ok(())
    }

    /// Open or close the inline label editor for a stage.
    pub fn set_node_editing(&mut self, id: NodeId, editing: bool) -> GraphResult<()> {
        self.node_mut(id)?.is_editing = editing;
        Ok(())
    }

    /// Change a stage's type.
    ///
    /// Rejects `Start` when the stage has incoming actions or another start
    /// stage exists, and `Done` when the stage has outgoing actions. A
    /// rejection leaves the graph unchanged.
    pub fn set_node_type(&mut self, id: NodeId, stage_type: StageType) -> GraphResult<()> {
        self.get_node(id)?;

        match stage_type {
            StageType::Start => {
                let incoming = self.incomers(id).count();
                if incoming > 0 {
                    return Err(GraphError::StartHasIncomers { node: id, incoming });
                }
                if let Some(existing) = self.start_node().filter(|n| n.id != id) {
                    return Err(GraphError::SecondStart {
                        existing: existing.id,
                    });
                }
            }
            StageType::Done => {
                let outgoing = self.outgoers(id).count();
                if outgoing > 0 {
                    return Err(GraphError::DoneHasOutgoers { node: id, outgoing });
                }
            }
            _ => {}
        }

        self.node_mut(id)?.stage_type = stage_type;
        Ok(())
    }

    /// Delete a batch of stages, splicing their edges back together.
    ///
    /// Incomers and outgoers of every deleted stage are computed against the
    /// edge set as it stood before any deletion in the batch. All actions
    /// touching a deleted stage are removed, then for each deleted stage a
    /// splice action is synthesized from every incomer's source to every
    /// outgoer's target. Synthesized actions that would duplicate an existing
    /// ordered pair, form a self-loop, or end on another deleted stage are
    /// skipped, keeping the one-edge-per-pair invariant intact.
    ///
    /// Unknown ids are ignored. Returns the ids of the synthesized actions.
    pub fn delete_nodes(&mut self, ids: &[NodeId]) -> Vec<EdgeId> {
        let deleted: HashSet<NodeId> = ids
            .iter()
            .copied()
            .filter(|id| self.nodes.contains_key(id))
            .collect();
        if deleted.is_empty() {
            return Vec::new();
        }

        // Pre-deletion snapshot of every deleted stage's neighbors.
        let splices: Vec<(Vec<NodeId>, Vec<NodeId>)> = ids
            .iter()
            .filter(|id| deleted.contains(*id))
            .map(|&id| {
                let sources = self.incomers(id).map(|e| e.source).collect();
                let targets = self.outgoers(id).map(|e| e.target).collect();
                (sources, targets)
            })
            .collect();

        self.edges.retain(|edge| {
            !deleted.contains(&edge.source) && !deleted.contains(&edge.target)
        });

        let mut pairs: HashSet<(NodeId, NodeId)> = self
            .edges
            .iter()
            .map(|edge| (edge.source, edge.target))
            .collect();

        let mut created = Vec::new();
        for (sources, targets) in splices {
            for &source in &sources {
                for &target in &targets {
                    if source == target
                        || deleted.contains(&source)
                        || deleted.contains(&target)
                        || !pairs.insert((source, target))
                    {
                        continue;
                    }
                    self.edge_seq += 1;
                    let edge =
                        ActionEdge::new(source, target, format!("Action #{}", self.edge_seq));
                    created.push(edge.id);
                    self.edges.push(edge);
                }
            }
        }

        for id in &deleted {
            self.nodes.shift_remove(id);
        }

        created
    }

    /// Find the start stage, if any.
    pub fn start_node(&self) -> Option<&StageNode> {
        self.nodes.values().find(|n| n.is_start())
    }

    // ========================================================================
    // Action Management
    // ========================================================================

    /// Connect two stages with a new action.
    ///
    /// Rejects missing endpoints, self-loops, duplicate (source, target)
    /// pairs, actions into a start stage and actions out of a done stage.
    /// On success the new action carries one unconstrained non-email variant
    /// and an auto-generated label.
    pub fn connect(
        &mut self,
        source: NodeId,
        target: NodeId,
        source_handle: impl Into<String>,
        target_handle: impl Into<String>,
    ) -> GraphResult<EdgeId> {
        self.check_linkable(source, target, None)?;

        self.edge_seq += 1;
        let edge = ActionEdge::new(source, target, format!("Action #{}", self.edge_seq))
            .with_handles(source_handle, target_handle);
        let id = edge.id;
        self.edges.push(edge);
        Ok(id)
    }

    /// Add a prebuilt action, enforcing the same preconditions as
    /// [`ProcessGraph::connect`].
    pub fn add_edge(&mut self, edge: ActionEdge) -> GraphResult<EdgeId> {
        self.check_linkable(edge.source, edge.target, None)?;
        let id = edge.id;
        self.edges.push(edge);
        Ok(id)
    }

    /// Insert an action verbatim, checking only that both endpoints exist.
    ///
    /// Snapshot restore goes through here so that legacy snapshots with
    /// rule violations still load and can be reported by validation.
    pub(crate) fn insert_edge_unchecked(&mut self, edge: ActionEdge) -> GraphResult<EdgeId> {
        if !self.has_node(edge.source) {
            return Err(GraphError::NodeNotFound(edge.source));
        }
        if !self.has_node(edge.target) {
            return Err(GraphError::NodeNotFound(edge.target));
        }
        let id = edge.id;
        self.edges.push(edge);
        Ok(id)
    }

    /// Re-link an existing action to new endpoints, as when the user drags
    /// an edge end onto another handle.
    ///
    /// Preserves the action's id, label, email flag and all variant data.
    /// Same preconditions as [`ProcessGraph::connect`], checked against the
    /// other actions.
    pub fn update_edge_endpoints(
        &mut self,
        id: EdgeId,
        source: NodeId,
        target: NodeId,
        source_handle: impl Into<String>,
        target_handle: impl Into<String>,
    ) -> GraphResult<()> {
        self.get_edge(id)?;
        self.check_linkable(source, target, Some(id))?;

        let edge = self.edge_mut(id)?;
        edge.source = source;
        edge.target = target;
        edge.source_handle = source_handle.into();
        edge.target_handle = target_handle.into();
        Ok(())
    }

    /// Get a reference to an action.
    pub fn get_edge(&self, id: EdgeId) -> GraphResult<&ActionEdge> {
        self.edges
            .iter()
            .find(|e| e.id == id)
            .ok_or(GraphError::EdgeNotFound(id))
    }

    /// Get all actions.
    pub fn edges(&self) -> &[ActionEdge] {
        &self.edges
    }

    /// Get the number of actions.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Remove an action.
    pub fn delete_edge(&mut self, id: EdgeId) -> GraphResult<ActionEdge> {
        let pos = self
            .edges
            .iter()
            .position(|e| e.id == id)
            .ok_or(GraphError::EdgeNotFound(id))?;
        Ok(self.edges.remove(pos))
    }

    /// Rename an action.
    pub fn set_edge_label(&mut self, id: EdgeId, label: impl Into<String>) -> GraphResult<()> {
        self.edge_mut(id)?.label = label.into();
        Ok(())
    }

    /// All actions arriving at the given stage.
    pub fn incomers(&self, node: NodeId) -> impl Iterator<Item = &ActionEdge> {
        self.edges.iter().filter(move |e| e.target == node)
    }

    /// All actions leaving the given stage.
    pub fn outgoers(&self, node: NodeId) -> impl Iterator<Item = &ActionEdge> {
        self.edges.iter().filter(move |e| e.source == node)
    }

    /// Check if `target` is reachable from `start` following actions.
    pub fn is_reachable(&self, start: NodeId, target: NodeId) -> bool {
        if start == target {
            return true;
        }

        let mut visited = HashSet::new();
        let mut queue = std::collections::VecDeque::new();
        queue.push_back(start);

        while let Some(current) = queue.pop_front() {
            if current == target {
                return true;
            }

            if visited.insert(current) {
                for edge in self.outgoers(current) {
                    queue.push_back(edge.target);
                }
            }
        }

        false
    }

    // ========================================================================
    // Variant Management
    // ========================================================================

    /// Append a new unconstrained variant to an action. Returns its index.
    pub fn add_variant(&mut self, id: EdgeId) -> GraphResult<usize> {
        let edge = self.edge_mut(id)?;
        edge.variants.push(Variant::new());
        Ok(edge.variants.len() - 1)
    }

    /// Remove a variant by index.
    ///
    /// Removing the final variant is rejected: an action always keeps at
    /// least one.
    pub fn remove_variant(&mut self, id: EdgeId, index: usize) -> GraphResult<Variant> {
        let edge = self.edge_mut(id)?;
        if index >= edge.variants.len() {
            return Err(GraphError::VariantNotFound { edge: id, index });
        }
        if edge.variants.len() == 1 {
            return Err(GraphError::LastVariant(id));
        }
        Ok(edge.variants.remove(index))
    }

    /// Get mutable access to a single variant for field updates.
    ///
    /// Sibling variants and the action's identity are untouched by anything
    /// done through the returned reference.
    pub fn variant_mut(&mut self, id: EdgeId, index: usize) -> GraphResult<&mut Variant> {
        let edge = self.edge_mut(id)?;
        edge.variants
            .get_mut(index)
            .ok_or(GraphError::VariantNotFound { edge: id, index })
    }

    /// Set whether an action sends an email.
    ///
    /// Switching from email to non-email truncates the variant list to its
    /// first element, discarding the rest. This mirrors the editor's
    /// behavior exactly and is deliberately destructive.
    pub fn set_email_action(&mut self, id: EdgeId, is_email_action: bool) -> GraphResult<()> {
        let edge = self.edge_mut(id)?;
        if edge.is_email_action && !is_email_action {
            edge.variants.truncate(1);
        }
        edge.is_email_action = is_email_action;
        Ok(())
    }

    /// Flip an action's email flag. See [`ProcessGraph::set_email_action`].
    pub fn toggle_email_action(&mut self, id: EdgeId) -> GraphResult<bool> {
        let flag = !self.get_edge(id)?.is_email_action;
        self.set_email_action(id, flag)?;
        Ok(flag)
    }

    // ========================================================================
    // Maintenance
    // ========================================================================

    /// Check if the graph is empty.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Clear all stages and actions.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.edges.clear();
    }

    // ========================================================================
    // Internal helpers
    // ========================================================================

    fn node_mut(&mut self, id: NodeId) -> GraphResult<&mut StageNode> {
        self.nodes.get_mut(&id).ok_or(GraphError::NodeNotFound(id))
    }

    fn edge_mut(&mut self, id: EdgeId) -> GraphResult<&mut ActionEdge> {
        self.edges
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or(GraphError::EdgeNotFound(id))
    }

    /// Shared preconditions for creating or re-linking an action. `except`
    /// excludes an edge from the duplicate-pair check when re-linking.
    fn check_linkable(
        &self,
        source: NodeId,
        target: NodeId,
        except: Option<EdgeId>,
    ) -> GraphResult<()> {
        let source_node = self.get_node(source)?;
        let target_node = self.get_node(target)?;

        if source == target {
            return Err(GraphError::SelfLoop(source));
        }
        if self
            .edges
            .iter()
            .any(|e| Some(e.id) != except && e.connects(source, target))
        {
            return Err(GraphError::DuplicateEdge { source, target });
        }
        if target_node.is_start() {
            return Err(GraphError::EdgeIntoStart(target));
        }
        if source_node.is_done() {
            return Err(GraphError::EdgeOutOfDone(source));
        }
        Ok(())
    }
}


#[cfg(test)]
mod properties {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Random connect/delete sequences never violate the structural
        /// invariants: unique ordered pairs, live endpoints, non-empty
        /// variant lists.
        #[test]
        fn invariants_hold_under_random_mutations(
            ops in proptest::collection::vec((0usize..8, 0usize..8, any::<bool>()), 0..64)
        ) {
            let mut graph = ProcessGraph::new();
            let ids: Vec<NodeId> = (0..8)
                .map(|_| graph.create_node(Position::default()))
                .collect();

            for (s, t, delete) in ops {
                if delete {
                    graph.delete_nodes(&[ids[s]]);
                } else {
                    let _ = graph.connect(ids[s], ids[t], "", "");
                }
            }

            let mut pairs = HashSet::new();
            for edge in graph.edges() {
                prop_assert!(pairs.insert((edge.source, edge.target)));
                prop_assert!(edge.source != edge.target);
                prop_assert!(graph.has_node(edge.source));
                prop_assert!(graph.has_node(edge.target));
                prop_assert!(!edge.variants.is_empty());
            }
        }
    }
}
