//! Command dispatch for the treewalk CLI.

use std::fs;
use std::io::{self, Read};
use std::path::Path;

use clap::CommandFactory;
use tracing::{debug, instrument};

use crate::cli::args::{Cli, Commands, ConfigCommands, DomQuery, TreeInput};
use crate::cli::error::{CliError, CliResult};
use crate::cli::output;
use crate::config::{global_config_path, Settings};
use crate::domain::render::element_label;
use crate::domain::{
    deserialize, serialize, serialize_pretty, BinaryTree, DomNode, DomainError, DomTree,
    ElementSpec, NodeId, TreeRender,
};

pub fn execute_command(cli: &Cli, settings: &Settings) -> CliResult<()> {
    match &cli.command {
        Commands::Show { tree } => _show(tree, settings),
        Commands::Stats { tree } => _stats(tree),
        Commands::NextLarger { tree, bound } => _next_larger(tree, *bound),
        Commands::Cousins { tree, a, b } => _cousins(tree, *a, *b),
        Commands::Lca { tree, a, b } => _lca(tree, *a, *b),
        Commands::Normalize { tree } => _normalize(tree, settings),
        Commands::Dom { input, query } => _dom(input, query, settings),
        Commands::Config { command } => _config(command, settings),
        Commands::Completion { shell } => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            clap_complete::generate(*shell, &mut cmd, name, &mut io::stdout());
            Ok(())
        }
    }
}

/// Reads a file, or stdin when `path` is `-`.
pub fn read_input(path: &Path) -> CliResult<String> {
    if path == Path::new("-") {
        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .map_err(|e| CliError::io("read stdin", e))?;
        Ok(buffer)
    } else {
        fs::read_to_string(path).map_err(|e| CliError::io(format!("read {}", path.display()), e))
    }
}

#[instrument(level = "debug")]
pub fn load_tree(input: &TreeInput) -> CliResult<BinaryTree> {
    let text = read_input(&input.input)?;
    let tree = deserialize(&text)?;
    debug!("loaded tree with {} nodes", tree.len());
    Ok(tree)
}

fn node_at(tree: &BinaryTree, position: usize) -> CliResult<NodeId> {
    tree.nth(position).ok_or_else(|| {
        CliError::InvalidArgs(format!(
            "no node at preorder position {} (tree has {} nodes)",
            position,
            tree.len()
        ))
    })
}

fn describe(tree: &BinaryTree, id: NodeId) -> CliResult<String> {
    let position = tree
        .iter()
        .position(|node| node.id() == id)
        .ok_or(DomainError::NodeNotFound(id))?;
    let value = tree.node(id).map(|node| node.value()).unwrap_or_default();
    Ok(format!("{} (position {})", value, position))
}

#[instrument(level = "debug", skip(settings))]
fn _show(input: &TreeInput, settings: &Settings) -> CliResult<()> {
    let tree = load_tree(input)?;
    output::info(&tree.render_with_label(&settings.empty_label));
    Ok(())
}

#[instrument(level = "debug")]
fn _stats(input: &TreeInput) -> CliResult<()> {
    let tree = load_tree(input)?;
    output::header(&input.input.display());
    output::action("nodes", &tree.len());
    output::action("min depth", &tree.min_depth());
    output::action("max depth", &tree.max_depth());
    output::action("max path sum", &tree.max_path_sum());
    Ok(())
}

#[instrument(level = "debug")]
fn _next_larger(input: &TreeInput, bound: i64) -> CliResult<()> {
    let tree = load_tree(input)?;
    match tree.next_larger(bound) {
        Some(value) => output::info(&value),
        None => output::warning(&format!("no value greater than {}", bound)),
    }
    Ok(())
}

#[instrument(level = "debug")]
fn _cousins(input: &TreeInput, a: usize, b: usize) -> CliResult<()> {
    let tree = load_tree(input)?;
    let cousins = tree.are_cousins(node_at(&tree, a)?, node_at(&tree, b)?)?;
    output::info(&cousins);
    Ok(())
}

#[instrument(level = "debug")]
fn _lca(input: &TreeInput, a: usize, b: usize) -> CliResult<()> {
    let tree = load_tree(input)?;
    let lca = tree.lowest_common_ancestor(node_at(&tree, a)?, node_at(&tree, b)?)?;
    output::info(&describe(&tree, lca)?);
    Ok(())
}

#[instrument(level = "debug", skip(settings))]
fn _normalize(input: &TreeInput, settings: &Settings) -> CliResult<()> {
    let tree = load_tree(input)?;
    let text = if settings.pretty {
        serialize_pretty(&tree)
    } else {
        serialize(&tree)
    };
    output::info(&text);
    Ok(())
}

#[instrument(level = "debug", skip(settings))]
fn _dom(input: &Path, query: &DomQuery, settings: &Settings) -> CliResult<()> {
    let text = read_input(input)?;
    let spec: ElementSpec = serde_json::from_str(&text)
        .map_err(|e| DomainError::malformed(format!("{}: {}", input.display(), e)))?;
    let tree = DomTree::from_source(&spec);

    let matches: Vec<&DomNode> = if let Some(id) = &query.id {
        tree.get_element_by_id(id).into_iter().collect()
    } else if let Some(tag) = &query.tag {
        tree.get_elements_by_tag_name(tag)
    } else if let Some(class) = &query.class {
        tree.get_elements_by_class_name(class)
    } else {
        output::info(&tree.render_with_label(&settings.empty_label));
        return Ok(());
    };

    if matches.is_empty() {
        output::warning("no matching elements");
    }
    for node in matches {
        output::info(&element_label(node));
    }
    Ok(())
}

fn _config(command: &ConfigCommands, settings: &Settings) -> CliResult<()> {
    match command {
        ConfigCommands::Show => {
            let text = settings
                .to_toml()
                .map_err(|e| config::ConfigError::Message(e.to_string()))?;
            output::info(text.trim_end());
        }
        ConfigCommands::Path => match global_config_path() {
            Some(path) => output::info(&path.display()),
            None => output::warning("no config directory available on this platform"),
        },
    }
    Ok(())
}
