//! Canned example workflows.
//!
//! The customer migration flow doubles as the demo payload the editor can
//! load and as a realistic fixture for tests: a linear onboarding chain with
//! per-connection email variants, a connection-testing loop with error and
//! retry edges, and a timed GoLive letter sequence.

use crate::core::error::NodeId;
use crate::core::types::{
    ProcessConnection, ProcessOrigin, StageType, Viewport,
};
use crate::graph::edge::{ActionEdge, Variant};
use crate::graph::model::ProcessGraph;
use crate::graph::node::StageNode;

fn stage(
    graph: &mut ProcessGraph,
    label: &str,
    stage_type: StageType,
    x: f64,
    y: f64,
) -> NodeId {
    graph.add_node(
        StageNode::new(label)
            .with_type(stage_type)
            .with_position(x, y),
    )
}

fn action(graph: &mut ProcessGraph, source: NodeId, target: NodeId, label: &str) {
    graph
        .add_edge(ActionEdge::new(source, target, label))
        .expect("sample workflow edges are unique and well-formed");
}

fn email_action(
    graph: &mut ProcessGraph,
    source: NodeId,
    target: NodeId,
    label: &str,
    variants: Vec<Variant>,
) {
    graph
        .add_edge(
            ActionEdge::new(source, target, label)
                .with_email_action(true)
                .with_variants(variants),
        )
        .expect("sample workflow edges are unique and well-formed");
}

fn migration_letter_variants() -> Vec<Variant> {
    vec![
        Variant::new()
            .with_label("AS2")
            .with_email_template("as2-migration-letter.html")
            .with_reminder("as2-migration-letter.html")
            .with_connections_in(vec![ProcessConnection::As2]),
        Variant::new()
            .with_label("SFTP Internal")
            .with_email_template("sftp-int-migration-letter.html")
            .with_reminder("sftp-int-migration-letter.html")
            .with_connections_in(vec![ProcessConnection::Sftp])
            .with_origins_in(vec![ProcessOrigin::Internal]),
        Variant::new()
            .with_label("SFTP External")
            .with_email_template("sftp-ext-migration-letter.html")
            .with_reminder("sftp-ext-migration-letter.html")
            .with_connections_in(vec![ProcessConnection::Sftp])
            .with_origins_in(vec![ProcessOrigin::External]),
        Variant::new()
            .with_label("HTTP")
            .with_email_template("http-migration-letter.html")
            .with_reminder("http-migration-letter.html")
            .with_connections_in(vec![ProcessConnection::Http]),
        Variant::new()
            .with_label("VAN")
            .with_email_template("van-migration-letter.html")
            .with_reminder("van-migration-letter.html")
            .with_connections_in(vec![ProcessConnection::Van]),
        Variant::new()
            .with_label("Web hook")
            .with_email_template("webhook-migration-letter.html")
            .with_reminder("webhook-migration-letter.html")
            .with_connections_in(vec![ProcessConnection::Webhook]),
    ]
}

fn connection_info_variants() -> Vec<Variant> {
    vec![
        Variant::new()
            .with_label("AS2")
            .with_connections_in(vec![ProcessConnection::As2]),
        Variant::new()
            .with_label("SFTP External")
            .with_connections_in(vec![ProcessConnection::Sftp])
            .with_origins_in(vec![ProcessOrigin::External]),
        Variant::new()
            .with_label("HTTP")
            .with_connections_in(vec![ProcessConnection::Http]),
    ]
}

/// Build the customer migration demo workflow.
pub fn migration_workflow() -> (ProcessGraph, Viewport) {
    let mut g = ProcessGraph::new();

    let start = stage(&mut g, "Start", StageType::Start, 100.0, 100.0);
    let welcome = stage(&mut g, "Welcome email sent", StageType::Normal, 100.0, 225.0);
    let letter_sent = stage(
        &mut g,
        "Migration letter sent",
        StageType::AwaitingReply,
        100.0,
        350.0,
    );
    let letter_ack = stage(
        &mut g,
        "Migration letter acknowledged",
        StageType::Normal,
        481.25,
        475.0,
    );
    let conn_info = stage(
        &mut g,
        "Connection info received",
        StageType::Normal,
        100.0,
        475.0,
    );
    let addl_info = stage(
        &mut g,
        "Additional connection info requested",
        StageType::AwaitingReply,
        -300.0,
        612.5,
    );
    let conn_ok = stage(&mut g, "Connection OK", StageType::Normal, 100.0, 725.0);
    let conn_failed = stage(&mut g, "Connection failed", StageType::Error, 487.5, 718.75);
    let test_suggested = stage(
        &mut g,
        "Connection test date suggested",
        StageType::AwaitingReply,
        950.0,
        775.0,
    );
    let test_confirmed = stage(
        &mut g,
        "Connection test date confirmed",
        StageType::Normal,
        487.5,
        831.25,
    );
    let t14_sent = stage(
        &mut g,
        "GoLive T-14 letter sent",
        StageType::AwaitingReply,
        100.0,
        875.0,
    );
    let t14_ack = stage(
        &mut g,
        "GoLive T-14 letter acknowledged",
        StageType::Normal,
        100.0,
        975.0,
    );
    let t5_sent = stage(
        &mut g,
        "GoLive T-5 letter sent",
        StageType::AwaitingReply,
        100.0,
        1075.0,
    );
    let t5_ack = stage(
        &mut g,
        "GoLive T-5 letter acknowledged",
        StageType::Normal,
        100.0,
        1175.0,
    );
    let t1_sent = stage(
        &mut g,
        "GoLive T-1 letter sent",
        StageType::AwaitingReply,
        100.0,
        1275.0,
    );
    let t1_ack = stage(
        &mut g,
        "GoLive T-1 letter acknowledged",
        StageType::Normal,
        100.0,
        1375.0,
    );
    let golive = stage(&mut g, "GoLive", StageType::Normal, 100.0, 1475.0);
    let test_load = stage(
        &mut g,
        "GoLive test load requested",
        StageType::AwaitingReply,
        500.0,
        1550.0,
    );
    let done = stage(&mut g, "Migration complete", StageType::Done, 100.0, 1625.0);

    email_action(
        &mut g,
        start,
        welcome,
        "Send welcome email",
        vec![Variant::new().with_email_template("welcome-letter.html")],
    );
    email_action(
        &mut g,
        welcome,
        letter_sent,
        "Send migration letter",
        migration_letter_variants(),
    );
    g.add_edge(
        ActionEdge::new(letter_sent, conn_info, "Receive connection info")
            .with_variants(connection_info_variants()),
    )
    .expect("sample workflow edges are unique and well-formed");
    action(&mut g, letter_sent, letter_ack, "Acknowledge");
    action(&mut g, letter_ack, conn_ok, "Mark connection OK");
    action(&mut g, letter_ack, conn_failed, "Mark connection failed");
    action(&mut g, conn_info, conn_ok, "Mark connection OK");
    action(&mut g, conn_info, conn_failed, "Mark connection failed");
    email_action(
        &mut g,
        conn_ok,
        addl_info,
        "Request additional connection info",
        vec![
            Variant::new()
                .with_label("AS2")
                .with_email_template("as2-additional-connection-info.html")
                .with_reminder("as2-additional-connection-info.html")
                .with_connections_in(vec![ProcessConnection::As2]),
            Variant::new()
                .with_label("SFTP External")
                .with_email_template("sftp-additional-connection-info.html")
                .with_reminder("sftp-additional-connection-info.html")
                .with_connections_in(vec![ProcessConnection::Sftp])
                .with_origins_in(vec![ProcessOrigin::External]),
            Variant::new()
                .with_label("HTTP")
                .with_email_template("http-additional-connection-info.html")
                .with_reminder("http-additional-connection-info.html")
                .with_connections_in(vec![ProcessConnection::Http]),
        ],
    );
    action(&mut g, addl_info, conn_info, "Receive connection info");
    action(&mut g, conn_ok, conn_failed, "Mark connection failed");
    email_action(
        &mut g,
        conn_failed,
        test_suggested,
        "Suggest connection test date",
        vec![Variant::new()
            .with_email_template("suggest-connection-test-date.html")
            .with_reminder("suggest-connection-test-date.html")],
    );
    action(
        &mut g,
        test_suggested,
        test_confirmed,
        "Confirm connection test date",
    );
    action(&mut g, test_confirmed, conn_failed, "Mark connection failed");
    action(&mut g, test_confirmed, conn_ok, "Mark connection OK");
    action(&mut g, conn_failed, conn_ok, "Mark connection OK");

    email_action(
        &mut g,
        conn_ok,
        t14_sent,
        "Send GoLive T-14 letter",
        vec![Variant::new()
            .with_email_template("golive-t14-letter")
            .with_reminder("golive-t14-letter")],
    );
    action(&mut g, t14_sent, t14_ack, "Acknowledge");
    email_action(
        &mut g,
        t14_ack,
        t5_sent,
        "Send GoLive T-5 letter",
        vec![Variant::new()
            .with_email_template("golive-t5-letter")
            .with_reminder("golive-t5-letter")],
    );
    action(&mut g, t5_sent, t5_ack, "Acknowledge");
    email_action(
        &mut g,
        t5_ack,
        t1_sent,
        "Send GoLive T-1 letter",
        vec![Variant::new().with_email_template("golive-t1-letter")],
    );
    action(&mut g, t1_sent, t1_ack, "Acknowledge");
    email_action(
        &mut g,
        t1_ack,
        golive,
        "Mark GoLive",
        vec![Variant::new().with_email_template("golive.html")],
    );
    email_action(
        &mut g,
        golive,
        test_load,
        "Request GoLive test load",
        vec![Variant::new()
            .with_email_template("request-live-load.html")
            .with_reminder("request-live-load.html")],
    );
    email_action(
        &mut g,
        golive,
        done,
        "Mark migration completed",
        vec![Variant::new().with_email_template("migration-complete.html")],
    );
    email_action(
        &mut g,
        test_load,
        done,
        "Mark migration completed",
        vec![Variant::new().with_email_template("migration-complete.html")],
    );

    let viewport = Viewport::new(773.72, -5.74, 0.57);
    (g, viewport)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::applicability::ActionContext;
    use crate::validation::ValidationPipeline;

    #[test]
    fn test_sample_is_valid() {
        let (graph, _) = migration_workflow();
        let report = ValidationPipeline::default_pipeline().validate(&graph);
        assert!(report.is_valid(), "report: {:?}", report.errors);
        // The demo keeps constraint variants on one non-email action, which
        // validation points out but tolerates.
        for warning in &report.warnings {
            assert!(warning.message.contains("variants"), "{}", warning.message);
        }
    }

    #[test]
    fn test_sample_shape() {
        let (graph, viewport) = migration_workflow();
        assert_eq!(graph.node_count(), 19);
        assert_eq!(graph.edge_count(), 26);
        assert!(graph.start_node().is_some());
        assert!(viewport.zoom < 1.0);
    }

    #[test]
    fn test_every_stage_reachable_from_start() {
        let (graph, _) = migration_workflow();
        let start = graph.start_node().unwrap().id;
        for node in graph.nodes() {
            assert!(
                graph.is_reachable(start, node.id),
                "stage '{}' unreachable",
                node.label
            );
        }
    }

    #[test]
    fn test_migration_letter_variant_selection() {
        let (graph, _) = migration_workflow();
        let letter = graph
            .edges()
            .iter()
            .find(|e| e.label == "Send migration letter")
            .unwrap();

        let ctx = ActionContext::new()
            .with_connection(ProcessConnection::Sftp)
            .with_origin(ProcessOrigin::External);
        let variant = letter.select_variant(&ctx).unwrap();
        assert_eq!(variant.label, "SFTP External");
        assert_eq!(variant.email_template, "sftp-ext-migration-letter.html");

        // Webhook is only constrained by connection.
        let ctx = ActionContext::new().with_connection(ProcessConnection::Webhook);
        assert_eq!(letter.select_variant(&ctx).unwrap().label, "Web hook");
    }
}
