//! Error types for Procflow.
//!
//! Uses thiserror for structured errors with context. Errors are designed to:
//! - Be serializable for sending to a frontend
//! - Include actionable information (which node, what to fix)
//! - Distinguish rejected mutations (non-fatal, graph unchanged) from faults

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use uuid::Uuid;

/// Unique identifier for a stage node in the graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub Uuid);

impl NodeId {
    /// Create a new random node ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create a node ID from a UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl Default for NodeId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", &self.0.to_string()[..8])
    }
}

/// Unique identifier for an action edge in the graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EdgeId(pub Uuid);

impl EdgeId {
    /// Create a new random edge ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create an edge ID from a UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl Default for EdgeId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for EdgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", &self.0.to_string()[..8])
    }
}

/// Top-level error type for Procflow.
///
/// This enum encompasses all error categories and enables automatic
/// conversion between specific error types.
#[derive(Error, Debug)]
pub enum FlowError {
    #[error("Graph error: {0}")]
    Graph(#[from] GraphError),

    #[error("Snapshot error: {0}")]
    Snapshot(#[from] SnapshotError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

/// Errors from rejected graph mutations.
///
/// Every variant here is a precondition failure: the operation performed no
/// mutation and the graph is exactly as it was before the call. Callers
/// surface these through a notification sink rather than treating them as
/// faults.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GraphError {
    #[error("Stage {0} not found")]
    NodeNotFound(NodeId),

    #[error("Action {0} not found")]
    EdgeNotFound(EdgeId),

    #[error("An action from {source} to {target} already exists")]
    DuplicateEdge { r#source: NodeId, target: NodeId },

    #[error("An action cannot connect stage {0} to itself")]
    SelfLoop(NodeId),

    #[error("Stage {0} is a start stage and cannot have incoming actions")]
    EdgeIntoStart(NodeId),

    #[error("Stage {0} is a done stage and cannot have outgoing actions")]
    EdgeOutOfDone(NodeId),

    #[error("Stage {node} cannot become a start stage: it has {incoming} incoming action(s)")]
    StartHasIncomers { node: NodeId, incoming: usize },

    #[error("Stage {node} cannot become a done stage: it has {outgoing} outgoing action(s)")]
    DoneHasOutgoers { node: NodeId, outgoing: usize },

    #[error("A start stage already exists ({existing})")]
    SecondStart { existing: NodeId },

    #[error("Action {edge} has no variant at index {index}")]
    VariantNotFound { edge: EdgeId, index: usize },

    #[error("Action {0} must keep at least one variant")]
    LastVariant(EdgeId),
}

/// Errors from reading or decoding a persisted snapshot.
#[derive(Error, Debug)]
pub enum SnapshotError {
    #[error("Snapshot is not valid JSON: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("Failed to read snapshot: {0}")]
    Io(#[from] std::io::Error),
}

// ============================================================================
// Validation Report
// ============================================================================

/// Errors found by the validation pipeline.
///
/// Validation errors describe graphs that violate a structural invariant.
/// They can only be produced by loading an out-of-band snapshot; the mutation
/// API rejects every operation that would introduce one.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValidationError {
    #[error("Action {edge} references missing stage {node}")]
    DanglingEndpoint { edge: EdgeId, node: NodeId },

    #[error("Duplicate action from {source} to {target}")]
    DuplicateEdge { r#source: NodeId, target: NodeId },

    #[error("Action {edge} is a self-loop on stage {node}")]
    SelfLoop { edge: EdgeId, node: NodeId },

    #[error("Action {0} has no variants")]
    EmptyVariants(EdgeId),

    #[error("No start stage found")]
    NoStartStage,

    #[error("Multiple start stages found: {0:?}")]
    MultipleStartStages(Vec<NodeId>),

    #[error("Start stage {0} has incoming actions")]
    StartHasIncomers(NodeId),

    #[error("Done stage {0} has outgoing actions")]
    DoneHasOutgoers(NodeId),

    #[error("{0}")]
    Other(String),
}

impl ValidationError {
    /// Check if this is a fatal error that should stop validation.
    ///
    /// Referential problems make later stages meaningless, so the pipeline
    /// stops on them.
    pub fn is_fatal(&self) -> bool {
        matches!(self, ValidationError::DanglingEndpoint { .. })
    }

    /// Get a suggestion for fixing this error.
    pub fn suggested_fix(&self) -> Option<String> {
        match self {
            ValidationError::DanglingEndpoint { edge, .. } => {
                Some(format!("Delete action {} or restore its stage", edge))
            }
            ValidationError::DuplicateEdge { source, target } => Some(format!(
                "Merge the duplicate actions between {} and {}",
                source, target
            )),
            ValidationError::EmptyVariants(edge) => {
                Some(format!("Add a variant to action {}", edge))
            }
            ValidationError::NoStartStage => Some("Mark one stage as the start stage".to_string()),
            ValidationError::MultipleStartStages(_) => {
                Some("Keep a single start stage and retype the others".to_string())
            }
            _ => None,
        }
    }

    /// Get the list of affected node IDs.
    pub fn affected_nodes(&self) -> Vec<NodeId> {
        match self {
            ValidationError::DanglingEndpoint { node, .. }
            | ValidationError::SelfLoop { node, .. }
            | ValidationError::StartHasIncomers(node)
            | ValidationError::DoneHasOutgoers(node) => vec![*node],
            ValidationError::DuplicateEdge { source, target } => vec![*source, *target],
            ValidationError::MultipleStartStages(nodes) => nodes.clone(),
            _ => vec![],
        }
    }
}

/// Non-fatal validation warning.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationWarning {
    /// Warning message.
    pub message: String,
    /// Node that triggered the warning, if applicable.
    pub node_id: Option<NodeId>,
    /// Edge that triggered the warning, if applicable.
    pub edge_id: Option<EdgeId>,
    /// Suggestion for addressing the warning.
    pub suggestion: Option<String>,
}

/// Comprehensive validation report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationReport {
    /// Whether validation passed without errors.
    pub success: bool,
    /// List of errors found.
    pub errors: Vec<ValidationError>,
    /// List of warnings (non-fatal issues).
    pub warnings: Vec<ValidationWarning>,
    /// Time taken for validation in milliseconds.
    pub duration_ms: u64,
}

impl ValidationReport {
    /// Create a new empty report (success).
    pub fn new() -> Self {
        Self {
            success: true,
            errors: Vec::new(),
            warnings: Vec::new(),
            duration_ms: 0,
        }
    }

    /// Add an error to the report.
    pub fn add_error(&mut self, error: ValidationError) {
        self.success = false;
        self.errors.push(error);
    }

    /// Add a warning to the report.
    pub fn add_warning(&mut self, warning: ValidationWarning) {
        self.warnings.push(warning);
    }

    /// Check if the graph satisfies every invariant.
    pub fn is_valid(&self) -> bool {
        self.success
    }

    /// Get a human-readable summary.
    pub fn summary(&self) -> String {
        if self.success {
            if self.warnings.is_empty() {
                "✓ Workflow is valid".to_string()
            } else {
                format!("✓ Workflow is valid with {} warning(s)", self.warnings.len())
            }
        } else {
            format!("✗ Validation failed with {} error(s)", self.errors.len())
        }
    }

    /// Get detailed error messages with suggestions.
    pub fn detailed_errors(&self) -> Vec<String> {
        self.errors
            .iter()
            .enumerate()
            .map(|(i, error)| {
                let mut msg = format!("{}. {}", i + 1, error);
                if let Some(fix) = error.suggested_fix() {
                    msg.push_str(&format!("\n   → Suggestion: {}", fix));
                }
                msg
            })
            .collect()
    }
}

impl Default for ValidationReport {
    fn default() -> Self {
        Self::new()
    }
}

/// Result type alias for Procflow operations.
pub type FlowResult<T> = Result<T, FlowError>;

/// Result type alias for graph mutations.
pub type GraphResult<T> = Result<T, GraphError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_id_display() {
        let id = NodeId::new();
        let display = format!("{}", id);
        assert_eq!(display.len(), 8);
    }

    #[test]
    fn test_validation_error_suggestions() {
        let error = ValidationError::EmptyVariants(EdgeId::new());
        assert!(error.suggested_fix().is_some());
        assert!(error.suggested_fix().unwrap().contains("variant"));
    }

    #[test]
    fn test_validation_report() {
        let mut report = ValidationReport::new();
        assert!(report.is_valid());

        report.add_error(ValidationError::NoStartStage);
        assert!(!report.is_valid());
        assert_eq!(report.errors.len(), 1);
    }

    #[test]
    fn test_fatal_errors() {
        let dangling = ValidationError::DanglingEndpoint {
            edge: EdgeId::new(),
            node: NodeId::new(),
        };
        assert!(dangling.is_fatal());
        assert!(!ValidationError::NoStartStage.is_fatal());
    }
}
