// tests/property_propagation.rs
use std::collections::HashMap;

use proptest::prelude::*;
use starchart::config::ChartConfig;
use starchart::engine::Chart;
use starchart::types::{NodeStatus, PropagationMode, UnlockRule};
use starchart_test_utils::builders::{ChartConfigBuilder, NodeConfigBuilder};
use starchart_test_utils::recording::RecordingObserver;

fn status_strategy() -> impl Strategy<Value = NodeStatus> {
    prop_oneof![
        Just(NodeStatus::Locked),
        Just(NodeStatus::Unlocked),
        Just(NodeStatus::Completed),
    ]
}

// Arbitrary charts: any status per node, any edges (cycles, self loops and
// duplicate connections included) and the odd dangling connection.
fn chart_strategy(max_nodes: usize) -> impl Strategy<Value = ChartConfig> {
    (1..=max_nodes).prop_flat_map(|num_nodes| {
        let statuses = proptest::collection::vec(status_strategy(), num_nodes);
        let edges = proptest::collection::vec(
            proptest::collection::vec(0..num_nodes + 1, 0..4),
            num_nodes,
        );
        let modes = prop_oneof![
            Just(PropagationMode::SinglePass),
            Just(PropagationMode::FixedPoint),
        ];
        let rules = prop_oneof![Just(UnlockRule::Any), Just(UnlockRule::All)];

        (statuses, edges, modes, rules).prop_map(move |(statuses, edges, mode, rule)| {
            let mut builder = ChartConfigBuilder::new().propagation(mode).unlock_rule(rule);
            for (i, (status, targets)) in statuses.into_iter().zip(edges).enumerate() {
                let mut node = NodeConfigBuilder::new(&format!("n{i}")).status(status);
                for t in targets {
                    // Index `num_nodes` names a node that does not exist.
                    node = node.connects_to(&format!("n{t}"));
                }
                builder = builder.with_node(node.build());
            }
            builder.build()
        })
    })
}

fn statuses(chart: &Chart) -> HashMap<String, NodeStatus> {
    chart.all_nodes().map(|n| (n.id.clone(), n.status)).collect()
}

proptest! {
    #[test]
    fn completions_respect_the_status_rules(
        cfg in chart_strategy(8),
        requests in proptest::collection::vec(0..9usize, 1..12),
    ) {
        let mut chart = Chart::from_config(&cfg).unwrap();
        let observer = RecordingObserver::new();
        chart.subscribe(observer.clone());

        for idx in requests {
            let id = format!("n{idx}");
            let before = statuses(&chart);
            observer.clear();

            let outcome = chart.complete_node(&id);
            let after = statuses(&chart);

            // Statuses only ever move forward.
            for (node, old) in before.iter() {
                prop_assert!(after[node] >= *old, "{node} went from {old} to {}", after[node]);
            }

            // Notifications are exactly the real diffs, once each.
            let notified = observer.changes();
            prop_assert_eq!(notified.as_slice(), outcome.changes());
            let diffs = before.iter().filter(|(node, old)| after[*node] != **old).count();
            prop_assert_eq!(notified.len(), diffs);
            for change in notified.iter() {
                prop_assert_eq!(change.old, before[&change.id]);
                prop_assert_eq!(change.new, after[&change.id]);
            }

            if !outcome.is_completed() {
                prop_assert_eq!(&before, &after);
                continue;
            }

            prop_assert_eq!(before.get(&id).copied(), Some(NodeStatus::Unlocked));
            prop_assert_eq!(after[&id], NodeStatus::Completed);

            // After the global pass, no locked node has a completed
            // predecessor. Under `all` one completed predecessor is not enough.
            if cfg.config.unlock_rule != UnlockRule::Any {
                continue;
            }
            for node in chart.all_nodes().filter(|n| n.status == NodeStatus::Completed) {
                for target in node.connections.iter() {
                    if let Some(status) = after.get(target) {
                        prop_assert_ne!(*status, NodeStatus::Locked, "{} -> {}", node.id, target);
                    }
                }
            }
        }
    }
}
