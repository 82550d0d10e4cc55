//! Terminal rendering of all tree kinds via `termtree`.
//!
//! Trees are assembled bottom-up from a post-order walk, so rendering a deep
//! tree does not recurse.

use std::collections::HashMap;

use generational_arena::Index;
use termtree::Tree;
use tracing::instrument;

use crate::domain::binary::BinaryTree;
use crate::domain::dom::{DomNode, DomTree};
use crate::domain::general::GeneralTree;

pub const EMPTY_LABEL: &str = "(empty)";

pub trait TreeRender {
    fn render_with_label(&self, empty_label: &str) -> Tree<String>;

    fn render(&self) -> Tree<String> {
        self.render_with_label(EMPTY_LABEL)
    }
}

/// Post-order assembly: `children(idx)` lists child indices with an optional
/// edge prefix, `label(idx)` gives the node text.
fn assemble<C, L>(root: Index, children: C, label: L) -> Option<Tree<String>>
where
    C: Fn(Index) -> Vec<(Index, &'static str)>,
    L: Fn(Index) -> String,
{
    let mut built: HashMap<Index, Tree<String>> = HashMap::new();
    let mut stack = vec![(root, "", false)];

    while let Some((idx, prefix, visited)) = stack.pop() {
        if !visited {
            stack.push((idx, prefix, true));
            for (child, child_prefix) in children(idx).into_iter().rev() {
                stack.push((child, child_prefix, false));
            }
        } else {
            let leaves: Vec<Tree<String>> = children(idx)
                .into_iter()
                .filter_map(|(child, _)| built.remove(&child))
                .collect();
            let node = Tree::new(format!("{}{}", prefix, label(idx))).with_leaves(leaves);
            built.insert(idx, node);
        }
    }

    built.remove(&root)
}

impl TreeRender for BinaryTree {
    #[instrument(level = "debug", skip(self))]
    fn render_with_label(&self, empty_label: &str) -> Tree<String> {
        self.root_index()
            .and_then(|root| {
                assemble(
                    root,
                    |idx| {
                        self.get(idx)
                            .map(|node| {
                                [(node.left, "L: "), (node.right, "R: ")]
                                    .into_iter()
                                    .filter_map(|(child, prefix)| child.map(|c| (c, prefix)))
                                    .collect()
                            })
                            .unwrap_or_default()
                    },
                    |idx| {
                        self.get(idx)
                            .map(|node| node.value.to_string())
                            .unwrap_or_default()
                    },
                )
            })
            .unwrap_or_else(|| Tree::new(empty_label.to_string()))
    }
}

impl TreeRender for GeneralTree {
    #[instrument(level = "debug", skip(self))]
    fn render_with_label(&self, empty_label: &str) -> Tree<String> {
        self.root()
            .and_then(|root| {
                assemble(
                    root,
                    |idx| {
                        self.get_node(idx)
                            .map(|node| node.children.iter().map(|&c| (c, "")).collect())
                            .unwrap_or_default()
                    },
                    |idx| {
                        self.get_node(idx)
                            .map(|node| node.value.to_string())
                            .unwrap_or_default()
                    },
                )
            })
            .unwrap_or_else(|| Tree::new(empty_label.to_string()))
    }
}

/// `DIV#main.wide.dark`, CSS-selector style.
pub fn element_label(node: &DomNode) -> String {
    let mut label = node.tag.clone().unwrap_or_else(|| "#document".to_string());
    if let Some(id) = &node.id {
        label.push('#');
        label.push_str(id);
    }
    for class in &node.class_list {
        label.push('.');
        label.push_str(class);
    }
    label
}

impl TreeRender for DomTree {
    #[instrument(level = "debug", skip(self))]
    fn render_with_label(&self, empty_label: &str) -> Tree<String> {
        self.root()
            .and_then(|root| {
                assemble(
                    root,
                    |idx| {
                        self.get_node(idx)
                            .map(|node| node.children.iter().map(|&c| (c, "")).collect())
                            .unwrap_or_default()
                    },
                    |idx| self.get_node(idx).map(element_label).unwrap_or_default(),
                )
            })
            .unwrap_or_else(|| Tree::new(empty_label.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::codec::deserialize;

    #[test]
    fn test_binary_render_marks_sides() {
        let tree = deserialize("[1,null,2,null,null]").unwrap();
        let text = tree.render().to_string();
        assert!(text.starts_with("1\n"), "{}", text);
        assert!(text.contains("R: 2"), "{}", text);
        assert!(!text.contains("L: "), "{}", text);
    }

    #[test]
    fn test_empty_tree_uses_label() {
        let tree = BinaryTree::new();
        assert_eq!(tree.render_with_label("nothing").to_string().trim(), "nothing");
    }
}
