//! Subcommand implementations.

use hsp3_ir::{OutlineKind, SymbolNode};
use hsp3_parse::{outline, parse_elements, AssemblyPolicy};
use thiserror::Error;

/// Anything a subcommand can fail on.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("unknown outline kind '{0}' (see `hsp3sym help` for the list)")]
    UnknownKind(String),
    #[error("failed to serialize symbols: {0}")]
    Serialize(#[from] serde_json::Error),
}

fn read(path: &str) -> Result<String, CommandError> {
    std::fs::read_to_string(path).map_err(|source| CommandError::Read {
        path: path.to_string(),
        source,
    })
}

/// Options for the `symbols` subcommand.
#[derive(Debug, Default)]
pub struct SymbolOptions {
    /// Outline kinds to mask, by name.
    pub masks: Vec<String>,
    /// Emit a module group left open at end of input instead of
    /// dropping it.
    pub flush_open_modules: bool,
    /// Emit JSON instead of the indented text form.
    pub json: bool,
}

fn policy_from(options: &SymbolOptions) -> Result<AssemblyPolicy, CommandError> {
    let mut policy = AssemblyPolicy {
        flush_open_group_at_eof: options.flush_open_modules,
        ..AssemblyPolicy::default()
    };
    for name in &options.masks {
        let kind = OutlineKind::from_name(name)
            .ok_or_else(|| CommandError::UnknownKind(name.clone()))?;
        policy.masks.insert(kind);
    }
    Ok(policy)
}

fn print_node(node: &SymbolNode, depth: usize) {
    let indent = "  ".repeat(depth);
    println!(
        "{indent}{} {} [{}]",
        node.kind, node.name, node.range
    );
    for child in &node.children {
        print_node(child, depth + 1);
    }
}

/// `hsp3sym symbols <file>` — the assembled outline tree.
pub fn run_symbols(path: &str, options: &SymbolOptions) -> Result<(), CommandError> {
    let source = read(path)?;
    let policy = policy_from(options)?;
    let tree = outline(&source, &policy);
    if options.json {
        println!("{}", serde_json::to_string_pretty(&tree)?);
    } else {
        for node in &tree.symbols {
            print_node(node, 0);
        }
    }
    Ok(())
}

/// `hsp3sym parse <file>` — the flat element list, before assembly.
pub fn run_parse(path: &str) -> Result<(), CommandError> {
    let source = read(path)?;
    let tokens = hsp3_lexer::tokenize(&source);
    for element in parse_elements(&tokens) {
        println!("{element}");
    }
    Ok(())
}

/// `hsp3sym lex <file>` — the raw token stream.
pub fn run_lex(path: &str) -> Result<(), CommandError> {
    let source = read(path)?;
    for token in hsp3_lexer::tokenize(&source) {
        println!("{token}");
    }
    Ok(())
}
