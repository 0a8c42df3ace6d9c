use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

/// Status of a single achievement node.
///
/// Statuses are ordered: a node only ever moves forward through
/// `Locked -> Unlocked -> Completed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeStatus {
    Locked,
    Unlocked,
    Completed,
}

impl NodeStatus {
    /// Whether a renderer should respond to hover/click on this node.
    pub fn is_interactive(self) -> bool {
        !matches!(self, NodeStatus::Locked)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            NodeStatus::Locked => "locked",
            NodeStatus::Unlocked => "unlocked",
            NodeStatus::Completed => "completed",
        }
    }
}

impl Default for NodeStatus {
    fn default() -> Self {
        NodeStatus::Locked
    }
}

impl fmt::Display for NodeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NodeStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "locked" => Ok(NodeStatus::Locked),
            "unlocked" => Ok(NodeStatus::Unlocked),
            "completed" => Ok(NodeStatus::Completed),
            other => Err(format!(
                "invalid node status: {other} (expected \"locked\", \"unlocked\" or \"completed\")"
            )),
        }
    }
}

/// How far unlocks cascade after a single completion.
///
/// - `SinglePass`: run exactly one global propagation scan per completion
///   (default).
/// - `FixedPoint`: repeat the scan until it stops changing anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PropagationMode {
    SinglePass,
    FixedPoint,
}

impl Default for PropagationMode {
    fn default() -> Self {
        PropagationMode::SinglePass
    }
}

impl FromStr for PropagationMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "single_pass" => Ok(PropagationMode::SinglePass),
            "fixed_point" => Ok(PropagationMode::FixedPoint),
            other => Err(format!(
                "invalid propagation mode: {other} (expected \"single_pass\" or \"fixed_point\")"
            )),
        }
    }
}

/// Which completed predecessors a locked node needs before it unlocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnlockRule {
    /// A single completed predecessor is enough (default).
    Any,
    /// Every known predecessor must be completed.
    All,
}

impl Default for UnlockRule {
    fn default() -> Self {
        UnlockRule::Any
    }
}

impl FromStr for UnlockRule {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "any" => Ok(UnlockRule::Any),
            "all" => Ok(UnlockRule::All),
            other => Err(format!(
                "invalid unlock_rule: {other} (expected \"any\" or \"all\")"
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statuses_are_ordered_forward() {
        assert!(NodeStatus::Locked < NodeStatus::Unlocked);
        assert!(NodeStatus::Unlocked < NodeStatus::Completed);
    }

    #[test]
    fn parses_modes_case_insensitively() {
        assert_eq!("Fixed-Point".parse(), Ok(PropagationMode::FixedPoint));
        assert_eq!(" single_pass ".parse(), Ok(PropagationMode::SinglePass));
        assert!("breadth".parse::<PropagationMode>().is_err());
        assert_eq!("ALL".parse(), Ok(UnlockRule::All));
        assert_eq!("Completed".parse(), Ok(NodeStatus::Completed));
    }

    #[test]
    fn only_locked_nodes_are_inert() {
        assert!(!NodeStatus::Locked.is_interactive());
        assert!(NodeStatus::Unlocked.is_interactive());
        assert!(NodeStatus::Completed.is_interactive());
    }
}
