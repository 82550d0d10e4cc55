//! In-memory mirror of a markup element hierarchy.
//!
//! Any hierarchical source implementing [`MarkupSource`] can be mirrored.
//! Children without a tag name (text, comments) are dropped together with
//! their subtrees. Tag names are stored upper-cased.

use std::collections::VecDeque;

use generational_arena::{Arena, Index};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Read access to an element of an external markup hierarchy.
pub trait MarkupSource {
    fn tag_name(&self) -> Option<&str>;
    fn id(&self) -> Option<&str>;
    fn class_list(&self) -> Vec<&str>;
    fn children(&self) -> Vec<&Self>;
}

/// Plain element description, loadable from JSON.
///
/// ```json
/// { "tag": "div", "id": "main", "classes": ["wide"], "children": [] }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ElementSpec {
    pub tag: Option<String>,
    pub id: Option<String>,
    pub classes: Vec<String>,
    pub children: Vec<ElementSpec>,
}

impl ElementSpec {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: Some(tag.to_string()),
            ..Self::default()
        }
    }

    pub fn text() -> Self {
        Self::default()
    }

    pub fn with_id(mut self, id: &str) -> Self {
        self.id = Some(id.to_string());
        self
    }

    pub fn with_class(mut self, class: &str) -> Self {
        self.classes.push(class.to_string());
        self
    }

    pub fn with_child(mut self, child: ElementSpec) -> Self {
        self.children.push(child);
        self
    }
}

impl MarkupSource for ElementSpec {
    fn tag_name(&self) -> Option<&str> {
        self.tag.as_deref()
    }

    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn class_list(&self) -> Vec<&str> {
        self.classes.iter().map(String::as_str).collect()
    }

    fn children(&self) -> Vec<&Self> {
        self.children.iter().collect()
    }
}

/// Mirrored element.
#[derive(Debug)]
pub struct DomNode {
    /// Upper-cased tag name
    pub tag: Option<String>,
    pub id: Option<String>,
    pub class_list: Vec<String>,
    pub parent: Option<Index>,
    pub children: Vec<Index>,
}

#[derive(Debug, Default)]
pub struct DomTree {
    arena: Arena<DomNode>,
    root: Option<Index>,
}

impl DomTree {
    /// Mirrors `source` and everything below it that carries a tag name.
    /// The source root itself is always mirrored.
    #[instrument(level = "debug", skip_all)]
    pub fn from_source<S: MarkupSource>(source: &S) -> Self {
        let mut tree = DomTree::default();
        let mut stack: Vec<(&S, Option<Index>)> = vec![(source, None)];

        while let Some((element, parent)) = stack.pop() {
            let idx = tree.arena.insert(DomNode {
                tag: element.tag_name().map(str::to_uppercase),
                id: element.id().filter(|id| !id.is_empty()).map(str::to_string),
                class_list: element.class_list().into_iter().map(str::to_string).collect(),
                parent,
                children: Vec::new(),
            });
            match parent.and_then(|p| tree.arena.get_mut(p)) {
                Some(parent_node) => parent_node.children.push(idx),
                None => tree.root = Some(idx),
            }
            // Reverse so children are inserted in document order
            for child in element.children().into_iter().rev() {
                if child.tag_name().is_some() {
                    stack.push((child, Some(idx)));
                }
            }
        }

        debug!("mirrored {} elements", tree.arena.len());
        tree
    }

    pub fn root(&self) -> Option<Index> {
        self.root
    }

    pub fn get_node(&self, idx: Index) -> Option<&DomNode> {
        self.arena.get(idx)
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// First element carrying `id`, in document order (depth-first).
    #[instrument(level = "debug", skip(self))]
    pub fn get_element_by_id(&self, id: &str) -> Option<&DomNode> {
        let mut stack: Vec<Index> = self.root.into_iter().collect();
        while let Some(idx) = stack.pop() {
            let Some(node) = self.arena.get(idx) else {
                continue;
            };
            if node.id.as_deref() == Some(id) {
                return Some(node);
            }
            stack.extend(node.children.iter().rev());
        }
        None
    }

    /// All elements with tag `tag` (case-insensitive), breadth-first.
    #[instrument(level = "debug", skip(self))]
    pub fn get_elements_by_tag_name(&self, tag: &str) -> Vec<&DomNode> {
        let tag = tag.to_uppercase();
        self.breadth_first(|node| node.tag.as_deref() == Some(tag.as_str()))
    }

    /// All elements whose class list contains `class_name`, breadth-first.
    #[instrument(level = "debug", skip(self))]
    pub fn get_elements_by_class_name(&self, class_name: &str) -> Vec<&DomNode> {
        self.breadth_first(|node| node.class_list.iter().any(|c| c == class_name))
    }

    fn breadth_first<F>(&self, matches: F) -> Vec<&DomNode>
    where
        F: Fn(&DomNode) -> bool,
    {
        let mut elements = Vec::new();
        let mut queue: VecDeque<Index> = self.root.into_iter().collect();
        while let Some(idx) = queue.pop_front() {
            if let Some(node) = self.arena.get(idx) {
                if matches(node) {
                    elements.push(node);
                }
                queue.extend(node.children.iter());
            }
        }
        elements
    }
}
