//! Core domain types for process-flow workflows.
//!
//! Stage and constraint enums serialize as SCREAMING_SNAKE_CASE strings so
//! snapshots stay interchangeable with the frontend's JSON representation.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The role a stage plays in the workflow.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StageType {
    /// Entry point of the workflow. No incoming actions allowed.
    Start,
    /// Ordinary intermediate stage.
    #[default]
    Normal,
    /// Stage waiting on a counterparty response.
    AwaitingReply,
    /// Stage representing a failure condition.
    Error,
    /// Terminal stage. No outgoing actions allowed.
    Done,
}

impl StageType {
    /// All stage types, in display order.
    pub const ALL: [StageType; 5] = [
        StageType::Start,
        StageType::Normal,
        StageType::AwaitingReply,
        StageType::Error,
        StageType::Done,
    ];
}

impl fmt::Display for StageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            StageType::Start => "START",
            StageType::Normal => "NORMAL",
            StageType::AwaitingReply => "AWAITING_REPLY",
            StageType::Error => "ERROR",
            StageType::Done => "DONE",
        };
        write!(f, "{}", name)
    }
}

/// Connection protocol a trading partner uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProcessConnection {
    As2,
    Sftp,
    Http,
    Van,
    Webhook,
}

impl fmt::Display for ProcessConnection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ProcessConnection::As2 => "AS2",
            ProcessConnection::Sftp => "SFTP",
            ProcessConnection::Http => "HTTP",
            ProcessConnection::Van => "VAN",
            ProcessConnection::Webhook => "WEBHOOK",
        };
        write!(f, "{}", name)
    }
}

/// Whether the process is driven from inside or outside the organization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProcessOrigin {
    Internal,
    External,
}

impl fmt::Display for ProcessOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ProcessOrigin::Internal => "INTERNAL",
            ProcessOrigin::External => "EXTERNAL",
        };
        write!(f, "{}", name)
    }
}

/// Direction of the document flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProcessDirection {
    Inbound,
    Outbound,
}

impl fmt::Display for ProcessDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ProcessDirection::Inbound => "INBOUND",
            ProcessDirection::Outbound => "OUTBOUND",
        };
        write!(f, "{}", name)
    }
}

/// Position of a node on the canvas (presentation only, never invariant-bearing).
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Pan/zoom state of the canvas, persisted alongside the graph.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Viewport {
    pub x: f64,
    pub y: f64,
    pub zoom: f64,
}

impl Viewport {
    pub fn new(x: f64, y: f64, zoom: f64) -> Self {
        Self { x, y, zoom }
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            zoom: 1.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_type_serialization() {
        let json = serde_json::to_string(&StageType::AwaitingReply).unwrap();
        assert_eq!(json, "\"AWAITING_REPLY\"");

        let parsed: StageType = serde_json::from_str("\"DONE\"").unwrap();
        assert_eq!(parsed, StageType::Done);
    }

    #[test]
    fn test_connection_serialization() {
        let json = serde_json::to_string(&ProcessConnection::As2).unwrap();
        assert_eq!(json, "\"AS2\"");

        let parsed: ProcessConnection = serde_json::from_str("\"WEBHOOK\"").unwrap();
        assert_eq!(parsed, ProcessConnection::Webhook);
    }

    #[test]
    fn test_display_matches_serialized_form() {
        for stage in StageType::ALL {
            let json = serde_json::to_string(&stage).unwrap();
            assert_eq!(json, format!("\"{}\"", stage));
        }
    }

    #[test]
    fn test_default_viewport() {
        let viewport = Viewport::default();
        assert_eq!(viewport.zoom, 1.0);
        assert_eq!(viewport.x, 0.0);
    }
}
