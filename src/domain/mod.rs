//! Domain layer: tree structures and their traversal algorithms
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod binary;
pub mod builder;
pub mod codec;
pub mod dom;
pub mod error;
pub mod general;
pub mod queries;
pub mod render;

pub use binary::{BinaryNode, BinaryTree, NodeId, NodeRef, PreorderIter, Side, Value};
pub use builder::BinaryTreeBuilder;
pub use codec::{deserialize, serialize, serialize_pretty, EMPTY_MARKER};
pub use dom::{DomNode, DomTree, ElementSpec, MarkupSource};
pub use error::{DomainError, TreeResult};
pub use general::{GeneralNode, GeneralTree};
pub use render::{TreeRender, EMPTY_LABEL};
