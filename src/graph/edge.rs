//! Action edges and their variants.

use crate::core::error::{EdgeId, NodeId};
use crate::core::types::{ProcessConnection, ProcessDirection, ProcessOrigin};
use serde::{Deserialize, Serialize};

/// One behavior of an action, keyed by a set of eligibility constraints.
///
/// An action with several variants picks the first one whose constraints
/// match the runtime context (see [`crate::graph::applicability`]). The
/// `constraints_states_*` sets over prior-stage labels are carried for
/// snapshot compatibility; no editing surface exercises them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Variant {
    /// Name distinguishing this variant when an action has several.
    pub label: String,
    /// Template used when the owning action is an email action.
    pub email_template: String,
    /// Whether a reminder is sent if the action goes unanswered.
    pub has_reminder: bool,
    /// Template for the reminder, meaningful only when `has_reminder`.
    pub reminder_email_template: String,
    pub constraints_connections_in: Vec<ProcessConnection>,
    pub constraints_connections_not_in: Vec<ProcessConnection>,
    pub constraints_origins_in: Vec<ProcessOrigin>,
    pub constraints_origins_not_in: Vec<ProcessOrigin>,
    pub constraints_directions_in: Vec<ProcessDirection>,
    pub constraints_directions_not_in: Vec<ProcessDirection>,
    pub constraints_states_in: Vec<String>,
    pub constraints_states_not_in: Vec<String>,
}

impl Variant {
    /// Create an unconstrained variant with empty templates.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the variant label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Set the email template.
    pub fn with_email_template(mut self, template: impl Into<String>) -> Self {
        self.email_template = template.into();
        self
    }

    /// Enable a reminder using the given template.
    pub fn with_reminder(mut self, template: impl Into<String>) -> Self {
        self.has_reminder = true;
        self.reminder_email_template = template.into();
        self
    }

    /// Require one of the given connection protocols.
    pub fn with_connections_in(mut self, connections: Vec<ProcessConnection>) -> Self {
        self.constraints_connections_in = connections;
        self
    }

    /// Require one of the given origins.
    pub fn with_origins_in(mut self, origins: Vec<ProcessOrigin>) -> Self {
        self.constraints_origins_in = origins;
        self
    }

    /// Require one of the given directions.
    pub fn with_directions_in(mut self, directions: Vec<ProcessDirection>) -> Self {
        self.constraints_directions_in = directions;
        self
    }

    /// Whether every constraint set is empty.
    pub fn is_unconstrained(&self) -> bool {
        self.constraints_connections_in.is_empty()
            && self.constraints_connections_not_in.is_empty()
            && self.constraints_origins_in.is_empty()
            && self.constraints_origins_not_in.is_empty()
            && self.constraints_directions_in.is_empty()
            && self.constraints_directions_not_in.is_empty()
            && self.constraints_states_in.is_empty()
            && self.constraints_states_not_in.is_empty()
    }
}

/// A business action connecting two stages.
///
/// At most one action may exist per ordered (source, target) pair; the model
/// enforces this on every mutation. The variant list is never empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionEdge {
    /// Unique identifier.
    pub id: EdgeId,
    /// Stage this action leaves from.
    pub source: NodeId,
    /// Stage this action arrives at.
    pub target: NodeId,
    /// Handle on the source stage the edge is attached to.
    pub source_handle: String,
    /// Handle on the target stage the edge is attached to.
    pub target_handle: String,
    /// Free-text action name.
    pub label: String,
    /// Whether performing this action triggers an email notification.
    pub is_email_action: bool,
    /// Alternate behaviors of this action, in display order. Never empty.
    pub variants: Vec<Variant>,
}

impl ActionEdge {
    /// Create a new action between two stages with a single default variant.
    pub fn new(source: NodeId, target: NodeId, label: impl Into<String>) -> Self {
        Self {
            id: EdgeId::new(),
            source,
            target,
            source_handle: String::new(),
            target_handle: String::new(),
            label: label.into(),
            is_email_action: false,
            variants: vec![Variant::new()],
        }
    }

    /// Create with a specific ID.
    pub fn with_id(mut self, id: EdgeId) -> Self {
        self.id = id;
        self
    }

    /// Set the attachment handles.
    pub fn with_handles(
        mut self,
        source_handle: impl Into<String>,
        target_handle: impl Into<String>,
    ) -> Self {
        self.source_handle = source_handle.into();
        self.target_handle = target_handle.into();
        self
    }

    /// Mark as an email action.
    pub fn with_email_action(mut self, is_email_action: bool) -> Self {
        self.is_email_action = is_email_action;
        self
    }

    /// Replace the variant list. Empty input is ignored, keeping the
    /// existing variants.
    pub fn with_variants(mut self, variants: Vec<Variant>) -> Self {
        if !variants.is_empty() {
            self.variants = variants;
        }
        self
    }

    /// Whether this action connects the same ordered stage pair.
    pub fn connects(&self, source: NodeId, target: NodeId) -> bool {
        self.source == source && self.target == target
    }

    /// Whether this action touches the given stage at either end.
    pub fn touches(&self, node: NodeId) -> bool {
        self.source == node || self.target == node
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_edge_has_default_variant() {
        let edge = ActionEdge::new(NodeId::new(), NodeId::new(), "Send welcome email");
        assert_eq!(edge.variants.len(), 1);
        assert!(!edge.is_email_action);
        assert!(edge.variants[0].is_unconstrained());
    }

    #[test]
    fn test_with_variants_ignores_empty() {
        let edge = ActionEdge::new(NodeId::new(), NodeId::new(), "a").with_variants(vec![]);
        assert_eq!(edge.variants.len(), 1);
    }

    #[test]
    fn test_connects_is_ordered() {
        let a = NodeId::new();
        let b = NodeId::new();
        let edge = ActionEdge::new(a, b, "a");
        assert!(edge.connects(a, b));
        assert!(!edge.connects(b, a));
    }

    #[test]
    fn test_variant_builder() {
        let variant = Variant::new()
            .with_label("SFTP External")
            .with_email_template("sftp-ext-migration-letter.html")
            .with_reminder("sftp-ext-migration-letter.html")
            .with_connections_in(vec![crate::core::types::ProcessConnection::Sftp]);
        assert!(variant.has_reminder);
        assert!(!variant.is_unconstrained());
    }
}
