//! Individual validation stages.
//!
//! Each stage checks for a specific category of problems. The mutation API
//! never produces an invalid graph on its own; validation exists for
//! snapshots loaded from outside and as a safety net for the editor shell.

use crate::core::error::{ValidationError, ValidationWarning};
use crate::graph::model::ProcessGraph;
use std::collections::HashSet;

/// Trait for validation stages.
pub trait ValidationStage: Send + Sync {
    /// Name of this validation stage.
    fn name(&self) -> &str;

    /// Validate the graph.
    ///
    /// Returns Ok with warnings, or Err with errors.
    fn validate(
        &self,
        graph: &ProcessGraph,
    ) -> Result<Vec<ValidationWarning>, Vec<ValidationError>>;
}

/// Structural validation - checks referential graph integrity.
///
/// Verifies:
/// - Every action references existing stages
/// - No two actions share the same ordered (source, target) pair
/// - No action is a self-loop
/// - Every action has at least one variant
pub struct StructuralValidation;

impl ValidationStage for StructuralValidation {
    fn name(&self) -> &str {
        "Structural Validation"
    }

    fn validate(
        &self,
        graph: &ProcessGraph,
    ) -> Result<Vec<ValidationWarning>, Vec<ValidationError>> {
        let mut errors = Vec::new();
        let mut warnings = Vec::new();

        // Empty graph warning (not error - a fresh canvas is empty)
        if graph.is_empty() {
            warnings.push(ValidationWarning {
                message: "Workflow is empty".to_string(),
                node_id: None,
                edge_id: None,
                suggestion: Some("Double-click the canvas to create a stage".to_string()),
            });
            return Ok(warnings);
        }

        let mut pairs = HashSet::new();
        for edge in graph.edges() {
            for endpoint in [edge.source, edge.target] {
                if !graph.has_node(endpoint) {
                    errors.push(ValidationError::DanglingEndpoint {
                        edge: edge.id,
                        node: endpoint,
                    });
                }
            }

            if edge.source == edge.target {
                errors.push(ValidationError::SelfLoop {
                    edge: edge.id,
                    node: edge.source,
                });
            }

            if !pairs.insert((edge.source, edge.target)) {
                errors.push(ValidationError::DuplicateEdge {
                    source: edge.source,
                    target: edge.target,
                });
            }

            if edge.variants.is_empty() {
                errors.push(ValidationError::EmptyVariants(edge.id));
            }
        }

        if errors.is_empty() {
            Ok(warnings)
        } else {
            Err(errors)
        }
    }
}

/// Stage-rule validation - checks stage-type adjacency invariants.
///
/// Verifies:
/// - Exactly one start stage exists
/// - The start stage has no incoming actions
/// - Done stages have no outgoing actions
pub struct StageRuleValidation;

impl ValidationStage for StageRuleValidation {
    fn name(&self) -> &str {
        "Stage Rule Validation"
    }

    fn validate(
        &self,
        graph: &ProcessGraph,
    ) -> Result<Vec<ValidationWarning>, Vec<ValidationError>> {
        let mut errors = Vec::new();
        let mut warnings = Vec::new();

        if graph.is_empty() {
            return Ok(warnings);
        }

        let starts: Vec<_> = graph.nodes().filter(|n| n.is_start()).collect();
        match starts.as_slice() {
            [] => errors.push(ValidationError::NoStartStage),
            [start] => {
                if graph.incomers(start.id).next().is_some() {
                    errors.push(ValidationError::StartHasIncomers(start.id));
                }
            }
            many => {
                errors.push(ValidationError::MultipleStartStages(
                    many.iter().map(|n| n.id).collect(),
                ));
            }
        }

        let mut has_done = false;
        for node in graph.nodes() {
            if node.is_done() {
                has_done = true;
                if graph.outgoers(node.id).next().is_some() {
                    errors.push(ValidationError::DoneHasOutgoers(node.id));
                }
            }
        }

        if !has_done {
            warnings.push(ValidationWarning {
                message: "Workflow has no done stage".to_string(),
                node_id: None,
                edge_id: None,
                suggestion: Some("Mark the terminal stage as DONE".to_string()),
            });
        }

        if errors.is_empty() {
            Ok(warnings)
        } else {
            Err(errors)
        }
    }
}

/// Reachability validation - warns about stages the workflow can never reach.
pub struct ReachabilityValidation;

impl ValidationStage for ReachabilityValidation {
    fn name(&self) -> &str {
        "Reachability Validation"
    }

    fn validate(
        &self,
        graph: &ProcessGraph,
    ) -> Result<Vec<ValidationWarning>, Vec<ValidationError>> {
        let mut warnings = Vec::new();

        let start = match graph.start_node() {
            Some(start) => start.id,
            // Stage rules already report the missing start.
            None => return Ok(warnings),
        };

        for node in graph.nodes() {
            if node.id != start && !graph.is_reachable(start, node.id) {
                warnings.push(ValidationWarning {
                    message: format!("Stage '{}' is unreachable from the start", node.label),
                    node_id: Some(node.id),
                    edge_id: None,
                    suggestion: Some("Connect it to the flow or delete it".to_string()),
                });
            }
        }

        Ok(warnings)
    }
}

/// Email validation - checks notification configuration on actions.
///
/// Verifies:
/// - Email actions have a template on every variant
/// - Reminders have a reminder template
/// - No variant has overlapping In/NotIn sets (never applicable)
/// - Non-email actions carry a single variant only
pub struct EmailValidation;

impl ValidationStage for EmailValidation {
    fn name(&self) -> &str {
        "Email Validation"
    }

    fn validate(
        &self,
        graph: &ProcessGraph,
    ) -> Result<Vec<ValidationWarning>, Vec<ValidationError>> {
        let mut warnings = Vec::new();

        for edge in graph.edges() {
            for (index, variant) in edge.variants.iter().enumerate() {
                if edge.is_email_action && variant.email_template.trim().is_empty() {
                    warnings.push(ValidationWarning {
                        message: format!(
                            "Email action '{}' variant {} has no email template",
                            edge.label, index
                        ),
                        node_id: None,
                        edge_id: Some(edge.id),
                        suggestion: Some("Pick a template for the variant".to_string()),
                    });
                }

                if variant.has_reminder && variant.reminder_email_template.trim().is_empty() {
                    warnings.push(ValidationWarning {
                        message: format!(
                            "Action '{}' variant {} has a reminder without a template",
                            edge.label, index
                        ),
                        node_id: None,
                        edge_id: Some(edge.id),
                        suggestion: Some("Pick a reminder template or disable the reminder".to_string()),
                    });
                }

                let overlap = variant
                    .constraints_connections_in
                    .iter()
                    .any(|c| variant.constraints_connections_not_in.contains(c))
                    || variant
                        .constraints_origins_in
                        .iter()
                        .any(|o| variant.constraints_origins_not_in.contains(o))
                    || variant
                        .constraints_directions_in
                        .iter()
                        .any(|d| variant.constraints_directions_not_in.contains(d))
                    || variant
                        .constraints_states_in
                        .iter()
                        .any(|s| variant.constraints_states_not_in.contains(s));
                if overlap {
                    warnings.push(ValidationWarning {
                        message: format!(
                            "Action '{}' variant {} excludes a value it requires",
                            edge.label, index
                        ),
                        node_id: None,
                        edge_id: Some(edge.id),
                        suggestion: Some("Remove the value from one of the two sets".to_string()),
                    });
                }
            }

            if !edge.is_email_action && edge.variants.len() > 1 {
                warnings.push(ValidationWarning {
                    message: format!(
                        "Action '{}' is not an email action but has {} variants",
                        edge.label,
                        edge.variants.len()
                    ),
                    node_id: None,
                    edge_id: Some(edge.id),
                    suggestion: Some("Only the variants of email actions are editable".to_string()),
                });
            }
        }

        Ok(warnings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{Position, ProcessConnection, StageType};
    use crate::graph::edge::{ActionEdge, Variant};

    fn linear_workflow() -> ProcessGraph {
        let mut graph = ProcessGraph::with_start_stage();
        let start = graph.start_node().unwrap().id;
        let mid = graph.create_node(Position::default());
        let end = graph.create_node(Position::default());
        graph.connect(start, mid, "", "").unwrap();
        graph.connect(mid, end, "", "").unwrap();
        graph.set_node_type(end, StageType::Done).unwrap();
        graph
    }

    #[test]
    fn test_structural_passes_on_valid_graph() {
        let graph = linear_workflow();
        let warnings = StructuralValidation.validate(&graph).unwrap();
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_structural_empty_graph_warns() {
        let graph = ProcessGraph::new();
        let warnings = StructuralValidation.validate(&graph).unwrap();
        assert_eq!(warnings.len(), 1);
    }

    #[test]
    fn test_structural_detects_empty_variants() {
        let mut graph = linear_workflow();
        let edge = graph.edges()[0].id;
        // Simulate a hand-edited snapshot with no variants.
        let mut broken: Vec<ActionEdge> = graph.edges().to_vec();
        broken.iter_mut().find(|e| e.id == edge).unwrap().variants.clear();
        let mut rebuilt = ProcessGraph::new();
        for node in graph.nodes() {
            rebuilt.add_node(node.clone());
        }
        for e in broken {
            rebuilt.insert_edge_unchecked(e).unwrap();
        }

        let errors = StructuralValidation.validate(&rebuilt).unwrap_err();
        assert!(errors.contains(&ValidationError::EmptyVariants(edge)));
    }

    #[test]
    fn test_stage_rules_pass_on_valid_graph() {
        let graph = linear_workflow();
        let warnings = StageRuleValidation.validate(&graph).unwrap();
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_stage_rules_detect_missing_start() {
        let mut graph = ProcessGraph::new();
        graph.create_node(Position::default());
        let errors = StageRuleValidation.validate(&graph).unwrap_err();
        assert!(errors.contains(&ValidationError::NoStartStage));
    }

    #[test]
    fn test_stage_rules_warn_on_missing_done() {
        let mut graph = ProcessGraph::with_start_stage();
        graph.create_node(Position::default());
        let warnings = StageRuleValidation.validate(&graph).unwrap();
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].message.contains("done"));
    }

    #[test]
    fn test_reachability_warns_on_orphan() {
        let mut graph = linear_workflow();
        let orphan = graph.create_node(Position::default());
        let warnings = ReachabilityValidation.validate(&graph).unwrap();
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].node_id, Some(orphan));
    }

    #[test]
    fn test_email_validation_flags_missing_template() {
        let mut graph = linear_workflow();
        let edge = graph.edges()[0].id;
        graph.set_email_action(edge, true).unwrap();

        let warnings = EmailValidation.validate(&graph).unwrap();
        assert!(warnings.iter().any(|w| w.message.contains("no email template")));
    }

    #[test]
    fn test_email_validation_flags_overlapping_sets() {
        let mut graph = linear_workflow();
        let edge = graph.edges()[0].id;
        graph.set_email_action(edge, true).unwrap();
        {
            let variant = graph.variant_mut(edge, 0).unwrap();
            *variant = Variant::new()
                .with_email_template("x.html")
                .with_connections_in(vec![ProcessConnection::Sftp]);
            variant.constraints_connections_not_in = vec![ProcessConnection::Sftp];
        }

        let warnings = EmailValidation.validate(&graph).unwrap();
        assert!(warnings.iter().any(|w| w.message.contains("excludes")));
    }
}
