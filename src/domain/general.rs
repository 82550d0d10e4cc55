use generational_arena::{Arena, Index};
use tracing::instrument;

use crate::domain::binary::Value;
use crate::domain::error::{DomainError, TreeResult};

/// Tree node in the arena-based n-ary hierarchy.
#[derive(Debug)]
pub struct GeneralNode {
    pub value: Value,
    /// Index of parent node in the arena, None for the root
    pub parent: Option<Index>,
    /// Indices of child nodes in the arena, in insertion order
    pub children: Vec<Index>,
}

/// Arena-based n-ary tree.
///
/// Uses generational arena for memory-safe node references and O(1) lookups.
#[derive(Debug)]
pub struct GeneralTree {
    arena: Arena<GeneralNode>,
    /// Index of the root node, None for empty trees
    root: Option<Index>,
}

impl Default for GeneralTree {
    fn default() -> Self {
        Self::new()
    }
}

impl GeneralTree {
    pub fn new() -> Self {
        Self {
            arena: Arena::new(),
            root: None,
        }
    }

    /// Inserts `value` as the root (`parent == None`) or as the last child of `parent`.
    #[instrument(level = "trace", skip(self))]
    pub fn insert_node(&mut self, value: Value, parent: Option<Index>) -> TreeResult<Index> {
        match parent {
            None if self.root.is_some() => return Err(DomainError::RootAlreadySet),
            Some(parent_idx) if !self.arena.contains(parent_idx) => {
                return Err(DomainError::ParentNotFound(parent_idx))
            }
            _ => {}
        }

        let node_idx = self.arena.insert(GeneralNode {
            value,
            parent,
            children: Vec::new(),
        });

        if let Some(parent_idx) = parent {
            if let Some(parent) = self.arena.get_mut(parent_idx) {
                parent.children.push(node_idx);
            }
        } else {
            self.root = Some(node_idx);
        }

        Ok(node_idx)
    }

    pub fn get_node(&self, idx: Index) -> Option<&GeneralNode> {
        self.arena.get(idx)
    }

    pub fn root(&self) -> Option<Index> {
        self.root
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    pub fn iter(&self) -> TreeIterator<'_> {
        TreeIterator::new(self)
    }

    pub fn iter_postorder(&self) -> PostOrderIterator<'_> {
        PostOrderIterator::new(self)
    }

    /// Number of levels, 0 for an empty tree.
    #[instrument(level = "debug", skip(self))]
    pub fn depth(&self) -> usize {
        let mut max_depth = 0;
        let mut stack: Vec<_> = self.root.map(|root| (root, 1)).into_iter().collect();

        while let Some((idx, depth)) = stack.pop() {
            if let Some(node) = self.get_node(idx) {
                max_depth = max_depth.max(depth);
                for &child in &node.children {
                    stack.push((child, depth + 1));
                }
            }
        }

        max_depth
    }

    /// Values of all leaf nodes (nodes with no children), left to right.
    #[instrument(level = "debug", skip(self))]
    pub fn leaf_values(&self) -> Vec<Value> {
        self.iter()
            .filter(|(_, node)| node.children.is_empty())
            .map(|(_, node)| node.value)
            .collect()
    }

    /// Sum of all values, 0 for an empty tree.
    #[instrument(level = "debug", skip(self))]
    pub fn sum_values(&self) -> Value {
        self.iter()
            .fold(0, |sum: Value, (_, node)| sum.saturating_add(node.value))
    }

    /// Number of nodes with an even value.
    #[instrument(level = "debug", skip(self))]
    pub fn count_evens(&self) -> usize {
        self.iter().filter(|(_, node)| node.value % 2 == 0).count()
    }

    /// Number of nodes whose value is strictly greater than `lower_bound`.
    #[instrument(level = "debug", skip(self))]
    pub fn num_greater(&self, lower_bound: Value) -> usize {
        self.iter()
            .filter(|(_, node)| node.value > lower_bound)
            .count()
    }
}

pub struct TreeIterator<'a> {
    tree: &'a GeneralTree,
    stack: Vec<Index>,
}

impl<'a> TreeIterator<'a> {
    fn new(tree: &'a GeneralTree) -> Self {
        let mut stack = Vec::new();
        if let Some(root) = tree.root() {
            stack.push(root);
        }
        Self { tree, stack }
    }
}

impl<'a> Iterator for TreeIterator<'a> {
    type Item = (Index, &'a GeneralNode);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(current_idx) = self.stack.pop() {
            if let Some(node) = self.tree.get_node(current_idx) {
                // Push children in reverse order for left-to-right traversal
                for &child in node.children.iter().rev() {
                    self.stack.push(child);
                }
                return Some((current_idx, node));
            }
        }
        None
    }
}

pub struct PostOrderIterator<'a> {
    tree: &'a GeneralTree,
    stack: Vec<(Index, bool)>,
}

impl<'a> PostOrderIterator<'a> {
    fn new(tree: &'a GeneralTree) -> Self {
        let mut stack = Vec::new();
        if let Some(root) = tree.root() {
            stack.push((root, false));
        }
        Self { tree, stack }
    }
}

impl<'a> Iterator for PostOrderIterator<'a> {
    type Item = (Index, &'a GeneralNode);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((current_idx, visited)) = self.stack.pop() {
            if let Some(node) = self.tree.get_node(current_idx) {
                if !visited {
                    self.stack.push((current_idx, true));
                    for &child in node.children.iter().rev() {
                        self.stack.push((child, false));
                    }
                } else {
                    return Some((current_idx, node));
                }
            }
        }
        None
    }
}
