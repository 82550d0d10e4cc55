//! Whole-tree queries over a [`BinaryTree`].
//!
//! Every query seeds a work-list with the root and drains it; nothing here
//! recurses, so deep or degenerate trees do not grow the call stack.

use std::collections::HashSet;

use tracing::{debug, instrument};

use crate::domain::binary::{BinaryTree, NodeId, Value};
use crate::domain::error::{DomainError, TreeResult};

impl BinaryTree {
    /// Length of the shortest root-to-leaf path, 0 for an empty tree.
    ///
    /// Only nodes without any child count as leaves.
    #[instrument(level = "debug", skip(self))]
    pub fn min_depth(&self) -> usize {
        self.leaf_depths().min().unwrap_or(0)
    }

    /// Length of the longest root-to-leaf path, 0 for an empty tree.
    #[instrument(level = "debug", skip(self))]
    pub fn max_depth(&self) -> usize {
        self.leaf_depths().max().unwrap_or(0)
    }

    fn leaf_depths(&self) -> impl Iterator<Item = usize> + '_ {
        let mut stack: Vec<_> = self.root_index().map(|root| (root, 1)).into_iter().collect();
        std::iter::from_fn(move || {
            while let Some((idx, depth)) = stack.pop() {
                let Some(node) = self.get(idx) else {
                    continue;
                };
                if node.is_leaf() {
                    return Some(depth);
                }
                for child in [node.left, node.right].into_iter().flatten() {
                    stack.push((child, depth + 1));
                }
            }
            None
        })
    }

    /// Best path sum anywhere in the tree, 0 for an empty tree.
    ///
    /// The path need not pass through the root. Downward sums are computed
    /// once for the whole tree, then each node's through-path sum is taken.
    #[instrument(level = "debug", skip(self))]
    pub fn max_path_sum(&self) -> Value {
        let Some(root) = self.root_index() else {
            return 0;
        };
        let sums = self.downward_sums(root);
        let best = sums
            .keys()
            .filter_map(|idx| self.get(*idx))
            .map(|node| self.through_sum(node, &sums))
            .max()
            .unwrap_or(0);
        debug!("max path sum: {}", best);
        best
    }

    /// Smallest value strictly greater than `lower_bound`.
    ///
    /// Linear scan; the tree is not assumed to be ordered.
    #[instrument(level = "debug", skip(self))]
    pub fn next_larger(&self, lower_bound: Value) -> Option<Value> {
        let mut next_larger: Option<Value> = None;
        let mut stack: Vec<_> = self.root_index().into_iter().collect();
        while let Some(idx) = stack.pop() {
            let Some(node) = self.get(idx) else {
                continue;
            };
            if node.value > lower_bound && next_larger.map_or(true, |best| node.value < best) {
                next_larger = Some(node.value);
            }
            stack.extend([node.left, node.right].into_iter().flatten());
        }
        next_larger
    }

    /// Two nodes are cousins when they sit at the same depth under different
    /// parents. A node is not its own cousin.
    ///
    /// # Errors
    /// `NodeNotFound` if either handle does not belong to this tree.
    #[instrument(level = "debug", skip(self))]
    pub fn are_cousins(&self, a: NodeId, b: NodeId) -> TreeResult<bool> {
        let a_idx = self.resolve(a)?;
        let b_idx = self.resolve(b)?;
        if a_idx == b_idx {
            return Ok(false);
        }

        let mut a_depth = None;
        let mut b_depth = None;
        let mut stack: Vec<_> = self.root_index().map(|root| (root, 1)).into_iter().collect();

        while let Some((idx, depth)) = stack.pop() {
            let Some(node) = self.get(idx) else {
                continue;
            };
            let children = (node.left, node.right);
            if children == (Some(a_idx), Some(b_idx)) || children == (Some(b_idx), Some(a_idx)) {
                debug!("nodes are siblings, not cousins");
                return Ok(false);
            }
            if idx == a_idx {
                a_depth = Some(depth);
            }
            if idx == b_idx {
                b_depth = Some(depth);
            }
            for child in [node.left, node.right].into_iter().flatten() {
                stack.push((child, depth + 1));
            }
        }

        debug!(?a_depth, ?b_depth, "cousin depths");
        Ok(a_depth.is_some() && a_depth == b_depth)
    }

    /// Deepest node that is an ancestor of both `a` and `b`, or one of them
    /// if it already is an ancestor of the other. `a == b` yields `a`.
    ///
    /// Walks parent links: the ancestor chain of `a` is collected, then `b`
    /// climbs until it meets that chain. O(depth).
    ///
    /// # Errors
    /// `EmptyTree` on an empty tree, `NodeNotFound` for foreign handles.
    #[instrument(level = "debug", skip(self))]
    pub fn lowest_common_ancestor(&self, a: NodeId, b: NodeId) -> TreeResult<NodeId> {
        if self.is_empty() {
            return Err(DomainError::EmptyTree);
        }
        let a_idx = self.resolve(a)?;
        let b_idx = self.resolve(b)?;

        let mut chain = HashSet::new();
        let mut current = Some(a_idx);
        while let Some(idx) = current {
            chain.insert(idx);
            current = self.get(idx).and_then(|node| node.parent);
        }

        let mut current = Some(b_idx);
        while let Some(idx) = current {
            if chain.contains(&idx) {
                return Ok(self.handle(idx));
            }
            current = self.get(idx).and_then(|node| node.parent);
        }

        // Both nodes hang off the single root, so the chains always meet.
        Err(DomainError::NodeNotFound(b))
    }

    /// Candidate-scan variant of [`Self::lowest_common_ancestor`]: every node
    /// is tested with `is_ancestor_of` against both targets and the deepest
    /// match wins. O(n²); kept as a cross-check for the parent-link walk.
    #[instrument(level = "debug", skip(self))]
    pub fn lowest_common_ancestor_by_scan(&self, a: NodeId, b: NodeId) -> TreeResult<NodeId> {
        let root = self.root_index().ok_or(DomainError::EmptyTree)?;
        let node_a = self.node(a).ok_or(DomainError::NodeNotFound(a))?;
        let node_b = self.node(b).ok_or(DomainError::NodeNotFound(b))?;

        if a == b || node_a.is_ancestor_of(b) {
            return Ok(a);
        }
        if node_b.is_ancestor_of(a) {
            return Ok(b);
        }

        let mut max_depth = 0;
        let mut lowest = self.handle(root);
        let mut stack = vec![(root, 0usize)];
        while let Some((idx, depth)) = stack.pop() {
            let Some(node) = self.get(idx) else {
                continue;
            };
            let id = self.handle(idx);
            if depth > max_depth {
                if let Some(candidate) = self.node(id) {
                    if candidate.is_ancestor_of(a) && candidate.is_ancestor_of(b) {
                        max_depth = depth;
                        lowest = id;
                    }
                }
            }
            for child in [node.left, node.right].into_iter().flatten() {
                stack.push((child, depth + 1));
            }
        }
        Ok(lowest)
    }
}
