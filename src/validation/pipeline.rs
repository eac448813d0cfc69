//! Validation pipeline implementation.

use crate::core::error::ValidationReport;
use crate::graph::model::ProcessGraph;
use crate::validation::stages::{
    EmailValidation, ReachabilityValidation, StageRuleValidation, StructuralValidation,
    ValidationStage,
};
use std::time::Instant;

/// Multi-stage validation pipeline.
///
/// Runs a series of validation stages on a workflow graph and collects
/// everything into a single report.
pub struct ValidationPipeline {
    stages: Vec<Box<dyn ValidationStage>>,
}

impl ValidationPipeline {
    /// Create a new pipeline with the given stages.
    pub fn new(stages: Vec<Box<dyn ValidationStage>>) -> Self {
        Self { stages }
    }

    /// Create the default validation pipeline with all standard stages.
    pub fn default_pipeline() -> Self {
        Self {
            stages: vec![
                Box::new(StructuralValidation),
                Box::new(StageRuleValidation),
                Box::new(ReachabilityValidation),
                Box::new(EmailValidation),
            ],
        }
    }

    /// Create a minimal pipeline (structural and stage-rule checks only).
    pub fn minimal_pipeline() -> Self {
        Self {
            stages: vec![Box::new(StructuralValidation), Box::new(StageRuleValidation)],
        }
    }

    /// Add a custom validation stage.
    pub fn add_stage(&mut self, stage: Box<dyn ValidationStage>) {
        self.stages.push(stage);
    }

    /// Validate a graph through all stages.
    pub fn validate(&self, graph: &ProcessGraph) -> ValidationReport {
        let start = Instant::now();
        let mut report = ValidationReport::new();

        for stage in &self.stages {
            match stage.validate(graph) {
                Ok(warnings) => {
                    for warning in warnings {
                        report.add_warning(warning);
                    }
                }
                Err(errors) => {
                    for error in errors {
                        let is_fatal = error.is_fatal();
                        report.add_error(error);

                        // Stop on fatal errors
                        if is_fatal {
                            report.duration_ms = start.elapsed().as_millis() as u64;
                            return report;
                        }
                    }
                }
            }
        }

        report.duration_ms = start.elapsed().as_millis() as u64;
        report
    }

    /// Quick check - does the graph satisfy every invariant?
    pub fn is_valid(&self, graph: &ProcessGraph) -> bool {
        self.validate(graph).is_valid()
    }
}

impl Default for ValidationPipeline {
    fn default() -> Self {
        Self::default_pipeline()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{Position, StageType};

    #[test]
    fn test_empty_graph_validation() {
        let graph = ProcessGraph::new();
        let pipeline = ValidationPipeline::default_pipeline();
        let report = pipeline.validate(&graph);

        // An empty canvas is valid but warned about.
        assert!(report.is_valid());
        assert!(!report.warnings.is_empty());
    }

    #[test]
    fn test_valid_workflow_passes_all_stages() {
        let mut graph = ProcessGraph::with_start_stage();
        let start = graph.start_node().unwrap().id;
        let done = graph.create_node(Position::default());
        graph.connect(start, done, "", "").unwrap();
        graph.set_node_type(done, StageType::Done).unwrap();

        let pipeline = ValidationPipeline::default_pipeline();
        let report = pipeline.validate(&graph);
        assert!(report.is_valid(), "report: {:?}", report);
        assert!(report.warnings.is_empty());
    }

    #[test]
    fn test_missing_start_fails() {
        let mut graph = ProcessGraph::new();
        graph.create_node(Position::default());

        let pipeline = ValidationPipeline::minimal_pipeline();
        assert!(!pipeline.is_valid(&graph));
    }

    #[test]
    fn test_report_has_summary() {
        let graph = ProcessGraph::with_start_stage();
        let report = ValidationPipeline::default_pipeline().validate(&graph);
        assert!(report.summary().contains("valid"));
    }
}
