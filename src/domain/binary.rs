//! Arena-backed binary tree with handle-based node identity.
//!
//! Nodes are stored in a generational arena owned by the tree. Callers refer
//! to nodes through [`NodeId`] handles, which carry the id of the owning tree
//! so that a handle from a different tree is never mistaken for a local node.

use std::collections::HashMap;
use std::fmt;

use generational_arena::{Arena, Index};
use tracing::{instrument, trace};
use uuid::Uuid;

use crate::domain::error::{DomainError, TreeResult};

/// Scalar carried by every binary tree node.
pub type Value = i64;

/// Child slot of a binary node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Left,
    Right,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Left => write!(f, "left"),
            Side::Right => write!(f, "right"),
        }
    }
}

/// Stable handle to a node of one particular [`BinaryTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId {
    tree: Uuid,
    index: Index,
}

impl NodeId {
    pub fn index(&self) -> Index {
        self.index
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (slot, generation) = self.index.into_raw_parts();
        write!(f, "node {}.{} of tree {}", slot, generation, self.tree.simple())
    }
}

/// Node payload stored in the arena.
#[derive(Debug)]
pub struct BinaryNode {
    pub value: Value,
    /// Index of parent node in the arena, None for the root
    pub parent: Option<Index>,
    pub left: Option<Index>,
    pub right: Option<Index>,
}

impl BinaryNode {
    pub fn child(&self, side: Side) -> Option<Index> {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }
}

/// Binary tree owning all of its nodes.
///
/// The shape is fixed once built (see [`crate::domain::BinaryTreeBuilder`]);
/// every query walks the arena with an explicit work-list.
#[derive(Debug)]
pub struct BinaryTree {
    id: Uuid,
    arena: Arena<BinaryNode>,
    root: Option<Index>,
}

impl Default for BinaryTree {
    fn default() -> Self {
        Self::new()
    }
}

impl BinaryTree {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            arena: Arena::new(),
            root: None,
        }
    }

    /// Inserts a node either as root (`slot == None`) or into an empty child slot.
    #[instrument(level = "trace", skip(self))]
    pub(crate) fn attach(&mut self, value: Value, slot: Option<(Index, Side)>) -> TreeResult<Index> {
        match slot {
            None => {
                if self.root.is_some() {
                    return Err(DomainError::RootAlreadySet);
                }
                let idx = self.arena.insert(BinaryNode {
                    value,
                    parent: None,
                    left: None,
                    right: None,
                });
                self.root = Some(idx);
                Ok(idx)
            }
            Some((parent_idx, side)) => {
                let occupied = self
                    .arena
                    .get(parent_idx)
                    .ok_or_else(|| DomainError::NodeNotFound(self.handle(parent_idx)))?
                    .child(side)
                    .is_some();
                if occupied {
                    return Err(DomainError::SlotOccupied {
                        parent: self.handle(parent_idx),
                        side,
                    });
                }
                let idx = self.arena.insert(BinaryNode {
                    value,
                    parent: Some(parent_idx),
                    left: None,
                    right: None,
                });
                if let Some(parent) = self.arena.get_mut(parent_idx) {
                    match side {
                        Side::Left => parent.left = Some(idx),
                        Side::Right => parent.right = Some(idx),
                    }
                }
                Ok(idx)
            }
        }
    }

    pub(crate) fn handle(&self, index: Index) -> NodeId {
        NodeId {
            tree: self.id,
            index,
        }
    }

    /// Maps a handle back to an arena index, rejecting foreign handles.
    pub(crate) fn resolve(&self, id: NodeId) -> TreeResult<Index> {
        if self.contains(id) {
            Ok(id.index)
        } else {
            Err(DomainError::NodeNotFound(id))
        }
    }

    pub(crate) fn get(&self, index: Index) -> Option<&BinaryNode> {
        self.arena.get(index)
    }

    pub(crate) fn root_index(&self) -> Option<Index> {
        self.root
    }

    pub fn root(&self) -> Option<NodeId> {
        self.root.map(|idx| self.handle(idx))
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn contains(&self, id: NodeId) -> bool {
        id.tree == self.id && self.arena.contains(id.index)
    }

    pub fn node(&self, id: NodeId) -> Option<NodeRef<'_>> {
        self.resolve(id).ok().map(|index| NodeRef { tree: self, index })
    }

    /// Preorder (node, left, right) traversal.
    pub fn iter(&self) -> PreorderIter<'_> {
        PreorderIter::new(self)
    }

    pub fn values(&self) -> Vec<Value> {
        self.iter().map(|node| node.value()).collect()
    }

    /// All nodes carrying `value`, in preorder.
    #[instrument(level = "debug", skip(self))]
    pub fn find(&self, value: Value) -> Vec<NodeId> {
        self.iter()
            .filter(|node| node.value() == value)
            .map(|node| node.id())
            .collect()
    }

    /// Node at preorder `position` (0-based).
    pub fn nth(&self, position: usize) -> Option<NodeId> {
        self.iter().nth(position).map(|node| node.id())
    }

    /// Depth of a node, the root being at depth 1.
    #[instrument(level = "debug", skip(self))]
    pub fn depth_of(&self, id: NodeId) -> TreeResult<usize> {
        let mut current = Some(self.resolve(id)?);
        let mut depth = 0;
        while let Some(idx) = current {
            depth += 1;
            current = self.arena.get(idx).and_then(|node| node.parent);
        }
        Ok(depth)
    }

    /// Best downward sum for every node of the subtree rooted at `start`.
    ///
    /// A node's best downward sum is its value plus the larger of its two
    /// children's sums, an absent child counting as 0. Computed post-order so
    /// children are always resolved before their parent.
    #[instrument(level = "trace", skip(self))]
    pub(crate) fn downward_sums(&self, start: Index) -> HashMap<Index, Value> {
        let mut sums: HashMap<Index, Value> = HashMap::new();
        let mut stack = vec![(start, false)];

        while let Some((idx, visited)) = stack.pop() {
            let Some(node) = self.arena.get(idx) else {
                continue;
            };
            if !visited {
                stack.push((idx, true));
                if let Some(right) = node.right {
                    stack.push((right, false));
                }
                if let Some(left) = node.left {
                    stack.push((left, false));
                }
            } else {
                let left_sum = node.left.and_then(|c| sums.get(&c).copied()).unwrap_or(0);
                let right_sum = node.right.and_then(|c| sums.get(&c).copied()).unwrap_or(0);
                let best = if left_sum > right_sum { left_sum } else { right_sum };
                sums.insert(idx, node.value.saturating_add(best));
            }
        }

        trace!("downward sums computed for {} nodes", sums.len());
        sums
    }

    /// Node value plus each child's downward sum that is positive.
    pub(crate) fn through_sum(&self, node: &BinaryNode, sums: &HashMap<Index, Value>) -> Value {
        let branch = |child: Option<Index>| {
            child
                .and_then(|c| sums.get(&c).copied())
                .filter(|sum| *sum > 0)
                .unwrap_or(0)
        };
        node.value
            .saturating_add(branch(node.left))
            .saturating_add(branch(node.right))
    }

    /// Structural and value equality, ignoring node identity.
    #[instrument(level = "debug", skip_all)]
    pub fn same_shape_and_values(&self, other: &BinaryTree) -> bool {
        let mut stack = vec![(self.root, other.root)];
        while let Some(pair) = stack.pop() {
            match pair {
                (None, None) => {}
                (Some(a), Some(b)) => match (self.arena.get(a), other.arena.get(b)) {
                    (Some(a), Some(b)) if a.value == b.value => {
                        stack.push((a.left, b.left));
                        stack.push((a.right, b.right));
                    }
                    _ => return false,
                },
                _ => return false,
            }
        }
        true
    }
}

impl PartialEq for BinaryTree {
    fn eq(&self, other: &Self) -> bool {
        self.same_shape_and_values(other)
    }
}

/// Borrowed view of one node, carrying the node-local primitives.
#[derive(Debug, Clone, Copy)]
pub struct NodeRef<'a> {
    tree: &'a BinaryTree,
    index: Index,
}

impl<'a> NodeRef<'a> {
    fn data(&self) -> Option<&'a BinaryNode> {
        self.tree.arena.get(self.index)
    }

    fn relative(&self, index: Option<Index>) -> Option<NodeRef<'a>> {
        index.map(|index| NodeRef {
            tree: self.tree,
            index,
        })
    }

    pub fn id(&self) -> NodeId {
        self.tree.handle(self.index)
    }

    pub fn value(&self) -> Value {
        self.data().map(|node| node.value).unwrap_or_default()
    }

    pub fn child(&self, side: Side) -> Option<NodeRef<'a>> {
        self.relative(self.data().and_then(|node| node.child(side)))
    }

    pub fn left(&self) -> Option<NodeRef<'a>> {
        self.child(Side::Left)
    }

    pub fn right(&self) -> Option<NodeRef<'a>> {
        self.child(Side::Right)
    }

    pub fn parent(&self) -> Option<NodeRef<'a>> {
        self.relative(self.data().and_then(|node| node.parent))
    }

    pub fn is_leaf(&self) -> bool {
        self.data().map(BinaryNode::is_leaf).unwrap_or(true)
    }

    /// True iff `candidate` lies strictly below this node.
    ///
    /// Identity based: a different node with an equal value does not match,
    /// and a node is never its own ancestor.
    #[instrument(level = "trace", skip(self))]
    pub fn is_ancestor_of(&self, candidate: NodeId) -> bool {
        if candidate.tree != self.tree.id || self.is_leaf() {
            return false;
        }
        let mut stack = vec![self.index];
        while let Some(idx) = stack.pop() {
            let Some(node) = self.tree.arena.get(idx) else {
                continue;
            };
            for child in [node.left, node.right].into_iter().flatten() {
                if child == candidate.index {
                    return true;
                }
                stack.push(child);
            }
        }
        false
    }

    /// Best downward sum starting at the `side` child, excluding this node.
    /// 0 when that child is absent.
    #[instrument(level = "trace", skip(self))]
    pub fn max_downward_sum(&self, side: Side) -> Value {
        match self.data().and_then(|node| node.child(side)) {
            Some(child) => self
                .tree
                .downward_sums(child)
                .get(&child)
                .copied()
                .unwrap_or(0),
            None => 0,
        }
    }

    /// Best sum of a path passing through this node: its value plus each
    /// positive downward branch.
    #[instrument(level = "trace", skip(self))]
    pub fn through_path_sum(&self) -> Value {
        match self.data() {
            Some(node) => {
                let sums = self.tree.downward_sums(self.index);
                self.tree.through_sum(node, &sums)
            }
            None => 0,
        }
    }
}

/// Preorder work-list iterator over a [`BinaryTree`].
pub struct PreorderIter<'a> {
    tree: &'a BinaryTree,
    stack: Vec<Index>,
}

impl<'a> PreorderIter<'a> {
    fn new(tree: &'a BinaryTree) -> Self {
        let mut stack = Vec::new();
        if let Some(root) = tree.root {
            stack.push(root);
        }
        Self { tree, stack }
    }
}

impl<'a> Iterator for PreorderIter<'a> {
    type Item = NodeRef<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(idx) = self.stack.pop() {
            if let Some(node) = self.tree.arena.get(idx) {
                // Right first so the left subtree is visited first
                if let Some(right) = node.right {
                    self.stack.push(right);
                }
                if let Some(left) = node.left {
                    self.stack.push(left);
                }
                return Some(NodeRef {
                    tree: self.tree,
                    index: idx,
                });
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attach_rejects_second_root() {
        let mut tree = BinaryTree::new();
        tree.attach(1, None).unwrap();
        assert_eq!(tree.attach(2, None), Err(DomainError::RootAlreadySet));
    }

    #[test]
    fn test_downward_sums_prefers_absent_child_over_negative() {
        let mut tree = BinaryTree::new();
        let root = tree.attach(5, None).unwrap();
        tree.attach(-3, Some((root, Side::Left))).unwrap();
        let sums = tree.downward_sums(root);
        assert_eq!(sums[&root], 5);
    }

    #[test]
    fn test_node_id_display_names_slot() {
        let mut tree = BinaryTree::new();
        let root = tree.attach(1, None).unwrap();
        let shown = tree.handle(root).to_string();
        assert!(shown.starts_with("node "), "{}", shown);
    }
}
