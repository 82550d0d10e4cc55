//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand, ValueHint};

/// Query binary, n-ary and markup trees from the command line
#[derive(Parser, Debug)]
#[command(name = "treewalk")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase log verbosity (-d info, -dd debug, -ddd trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub debug: u8,

    /// Config file layered on top of the global config
    #[arg(short, long, global = true, value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Serialized binary tree input; `-` reads stdin.
#[derive(Args, Debug, Clone)]
pub struct TreeInput {
    #[arg(value_hint = ValueHint::FilePath)]
    pub input: PathBuf,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Render a serialized binary tree
    Show {
        #[command(flatten)]
        tree: TreeInput,
    },

    /// Depths, best path sum and node count
    Stats {
        #[command(flatten)]
        tree: TreeInput,
    },

    /// Smallest value strictly greater than a bound
    NextLarger {
        #[command(flatten)]
        tree: TreeInput,
        #[arg(allow_negative_numbers = true)]
        bound: i64,
    },

    /// Whether two nodes (preorder positions, 0-based) are cousins
    Cousins {
        #[command(flatten)]
        tree: TreeInput,
        a: usize,
        b: usize,
    },

    /// Lowest common ancestor of two nodes (preorder positions, 0-based)
    Lca {
        #[command(flatten)]
        tree: TreeInput,
        a: usize,
        b: usize,
    },

    /// Re-serialize a tree (compact, or pretty per settings)
    Normalize {
        #[command(flatten)]
        tree: TreeInput,
    },

    /// Query a markup tree given as JSON elements
    Dom {
        #[arg(value_hint = ValueHint::FilePath)]
        input: PathBuf,
        #[command(flatten)]
        query: DomQuery,
    },

    /// Manage settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Args, Debug, Default)]
#[group(multiple = false)]
pub struct DomQuery {
    /// First element with this id
    #[arg(long)]
    pub id: Option<String>,

    /// All elements with this tag name (case-insensitive)
    #[arg(long)]
    pub tag: Option<String>,

    /// All elements carrying this class
    #[arg(long)]
    pub class: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show effective settings
    Show,
    /// Show global config file location
    Path,
}
