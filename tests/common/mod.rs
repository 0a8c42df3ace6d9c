#![allow(dead_code)]

pub use starchart_test_utils::{builders, init_tracing, recording, with_timeout};

use starchart::engine::Chart;
use starchart::types::NodeStatus;

/// Current status of `id`; panics if the node does not exist.
pub fn status_of(chart: &Chart, id: &str) -> NodeStatus {
    chart
        .get_node(id)
        .map(|n| n.status)
        .unwrap_or_else(|| panic!("node {id} not in chart"))
}
