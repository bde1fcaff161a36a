use thiserror::Error;

use super::NodeId;

/// The AST is shaped in a way the converter refuses to walk.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StructureError {
    #[error("rule tree exceeds the maximum depth of {limit}")]
    DepthExceeded { limit: usize },
}

/// A toggle request that does not name a collapsible node.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ToggleError {
    #[error("node {id} has no children and cannot be toggled")]
    Leaf { id: NodeId },

    #[error("node {id} is not part of the current tree")]
    UnknownNode { id: NodeId },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn depth_exceeded_message() {
        let err = StructureError::DepthExceeded { limit: 256 };
        assert_eq!(err.to_string(), "rule tree exceeds the maximum depth of 256");
    }

    #[test]
    fn leaf_toggle_message() {
        let err = ToggleError::Leaf { id: NodeId(3) };
        assert_eq!(err.to_string(), "node #3 has no children and cannot be toggled");
    }

    #[test]
    fn unknown_node_message() {
        let err = ToggleError::UnknownNode { id: NodeId(42) };
        assert_eq!(err.to_string(), "node #42 is not part of the current tree");
    }
}
