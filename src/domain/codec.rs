//! Text encoding of binary trees.
//!
//! The empty tree is the literal `null`. Any other tree is a JSON array
//! holding a preorder walk in which every absent child slot is written as
//! `null`:
//!
//! ```text
//!     1
//!    / \        [1,2,null,null,3,null,null]
//!   2   3
//! ```
//!
//! Because both slots of every node are always written, a left-only chain
//! and a right-only chain of the same values encode differently.

use std::fmt;
use std::str::FromStr;

use generational_arena::Index;
use tracing::{debug, instrument};

use crate::domain::binary::{BinaryTree, Side, Value};
use crate::domain::error::{DomainError, TreeResult};

/// Encoding of the empty tree.
pub const EMPTY_MARKER: &str = "null";

/// Compact single-line encoding.
#[instrument(level = "debug", skip_all)]
pub fn serialize(tree: &BinaryTree) -> String {
    match tokens(tree) {
        None => EMPTY_MARKER.to_string(),
        Some(tokens) => format!("[{}]", tokens.join(",")),
    }
}

/// One token per line, indented by two spaces.
#[instrument(level = "debug", skip_all)]
pub fn serialize_pretty(tree: &BinaryTree) -> String {
    match tokens(tree) {
        None => EMPTY_MARKER.to_string(),
        Some(tokens) => {
            let body: Vec<String> = tokens.iter().map(|t| format!("  {}", t)).collect();
            format!("[\n{}\n]", body.join(",\n"))
        }
    }
}

fn tokens(tree: &BinaryTree) -> Option<Vec<String>> {
    let root = tree.root_index()?;
    let mut out = Vec::with_capacity(tree.len() * 2 + 1);
    let mut stack = vec![Some(root)];
    while let Some(slot) = stack.pop() {
        match slot.and_then(|idx| tree.get(idx)) {
            Some(node) => {
                out.push(node.value.to_string());
                stack.push(node.right);
                stack.push(node.left);
            }
            None => out.push(EMPTY_MARKER.to_string()),
        }
    }
    Some(out)
}

/// Rebuilds a tree from its encoding.
///
/// The result shares nothing with whatever produced `text`. On any error no
/// tree is returned.
///
/// # Errors
/// `MalformedInput` for invalid JSON, non-integer tokens, an empty array,
/// an array starting with `null`, missing child slots or trailing tokens.
#[instrument(level = "debug", skip_all)]
pub fn deserialize(text: &str) -> TreeResult<BinaryTree> {
    let parsed: Option<Vec<Option<Value>>> =
        serde_json::from_str(text).map_err(|e| DomainError::malformed(e.to_string()))?;

    let mut tree = BinaryTree::new();
    let Some(tokens) = parsed else {
        debug!("empty marker");
        return Ok(tree);
    };

    let mut tokens = tokens.into_iter();
    let root_value = match tokens.next() {
        Some(Some(value)) => value,
        Some(None) => {
            return Err(DomainError::malformed(
                "array must start with the root value, the empty tree is `null`",
            ))
        }
        None => return Err(DomainError::malformed("empty token array")),
    };
    let root = tree.attach(root_value, None)?;

    // Pending child slots; Left is on top so it is filled first.
    let mut pending: Vec<(Index, Side)> = vec![(root, Side::Right), (root, Side::Left)];
    for (position, token) in tokens.enumerate() {
        let slot = pending.pop().ok_or_else(|| {
            DomainError::malformed(format!("trailing token at position {}", position + 1))
        })?;
        if let Some(value) = token {
            let child = tree.attach(value, Some(slot))?;
            pending.push((child, Side::Right));
            pending.push((child, Side::Left));
        }
    }

    if !pending.is_empty() {
        return Err(DomainError::malformed(format!(
            "{} child slot(s) missing",
            pending.len()
        )));
    }

    debug!("deserialized tree with {} nodes", tree.len());
    Ok(tree)
}

impl fmt::Display for BinaryTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            write!(f, "{}", serialize_pretty(self))
        } else {
            write!(f, "{}", serialize(self))
        }
    }
}

impl FromStr for BinaryTree {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        deserialize(s)
    }
}
