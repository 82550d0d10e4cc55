//! treewalk: binary, n-ary and DOM-mirroring trees with iterative traversal queries
//!
//! Architecture:
//! - `domain`: tree structures, queries and the binary tree text format
//! - `config`: layered settings
//! - `cli`: argument parsing and command dispatch

pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod util;

pub use domain::{
    deserialize, serialize, BinaryTree, BinaryTreeBuilder, DomTree, DomainError, GeneralTree,
    NodeId, Side, TreeResult,
};
