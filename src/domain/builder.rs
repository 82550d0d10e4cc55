//! Builder for assembling a binary tree from an external construction source.

use tracing::{debug, instrument};

use crate::domain::binary::{BinaryTree, NodeId, Side, Value};
use crate::domain::error::TreeResult;

/// Constructs a [`BinaryTree`] node by node.
///
/// Nodes can only be attached to empty slots of nodes already in the tree,
/// which keeps the result acyclic with a single parent per node. Handles
/// returned here stay valid in the built tree.
#[derive(Debug, Default)]
pub struct BinaryTreeBuilder {
    tree: BinaryTree,
}

impl BinaryTreeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    #[instrument(level = "debug", skip(self))]
    pub fn root(&mut self, value: Value) -> TreeResult<NodeId> {
        let idx = self.tree.attach(value, None)?;
        Ok(self.tree.handle(idx))
    }

    pub fn left(&mut self, parent: NodeId, value: Value) -> TreeResult<NodeId> {
        self.child(parent, Side::Left, value)
    }

    pub fn right(&mut self, parent: NodeId, value: Value) -> TreeResult<NodeId> {
        self.child(parent, Side::Right, value)
    }

    #[instrument(level = "trace", skip(self))]
    pub fn child(&mut self, parent: NodeId, side: Side, value: Value) -> TreeResult<NodeId> {
        let parent_idx = self.tree.resolve(parent)?;
        let idx = self.tree.attach(value, Some((parent_idx, side)))?;
        Ok(self.tree.handle(idx))
    }

    pub fn build(self) -> BinaryTree {
        debug!("built binary tree with {} nodes", self.tree.len());
        self.tree
    }
}
