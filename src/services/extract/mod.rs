//! Structural extraction over tree-sitter parse trees.
//!
//! Two grammars are supported, Python and JavaScript. Each grammar module maps
//! raw node kinds onto a small tagged enumeration and walks the tree with an
//! explicit stack, so deeply nested input cannot exhaust the call stack. Both
//! produce the same [`FileStructure`] shape:
//!
//! - every class with the methods declared directly in its body,
//! - functions whose nearest enclosing definition is the module itself,
//! - the trimmed source text of every import statement.
//!
//! Trees containing syntax errors are rejected rather than half-read; the
//! caller records the file without a structural summary.

mod javascript;
mod python;

use crate::models::{FileStructure, Language};
use tree_sitter::{Node, Parser, Tree};

const MAX_SUMMARY_FUNCTIONS: usize = 10;
const MAX_SUMMARY_IMPORTS: usize = 5;

#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    #[error("failed to load the {language} grammar: {source}")]
    Grammar {
        language: Language,
        #[source]
        source: tree_sitter::LanguageError,
    },

    #[error("parser produced no tree")]
    ParseAborted,

    #[error("syntax error at line {row}, column {column}")]
    Syntax { row: usize, column: usize },
}

/// Grammars available for structural extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Grammar {
    Python,
    JavaScript,
}

impl Grammar {
    #[must_use]
    pub fn for_language(language: Language) -> Option<Self> {
        match language {
            Language::Python => Some(Grammar::Python),
            Language::JavaScript => Some(Grammar::JavaScript),
            _ => None,
        }
    }

    #[must_use]
    pub fn language(self) -> Language {
        match self {
            Grammar::Python => Language::Python,
            Grammar::JavaScript => Language::JavaScript,
        }
    }

    fn tree_sitter_language(self) -> tree_sitter::Language {
        match self {
            Grammar::Python => tree_sitter_python::LANGUAGE.into(),
            Grammar::JavaScript => tree_sitter_javascript::LANGUAGE.into(),
        }
    }
}

/// Enclosing definition of a node while walking a tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Scope {
    Module,
    Class,
    Function,
}

/// Extract classes, top-level functions and imports from `content`.
///
/// Returns `Ok(None)` for languages without a grammar.
///
/// # Errors
/// Fails when the grammar cannot be loaded, the parser gives up, or the
/// resulting tree contains syntax errors.
pub fn extract(content: &str, language: Language) -> Result<Option<FileStructure>, ExtractError> {
    let Some(grammar) = Grammar::for_language(language) else {
        return Ok(None);
    };

    let tree = parse(content, grammar)?;
    let root = tree.root_node();

    if root.has_error() {
        let (row, column) = first_error_position(root);
        return Err(ExtractError::Syntax { row, column });
    }

    let source = content.as_bytes();
    let structure = match grammar {
        Grammar::Python => python::collect(root, source),
        Grammar::JavaScript => javascript::collect(root, source),
    };

    Ok(Some(structure))
}

fn parse(content: &str, grammar: Grammar) -> Result<Tree, ExtractError> {
    let mut parser = Parser::new();
    parser
        .set_language(&grammar.tree_sitter_language())
        .map_err(|source| ExtractError::Grammar {
            language: grammar.language(),
            source,
        })?;
    parser.parse(content, None).ok_or(ExtractError::ParseAborted)
}

/// 1-based position of the first error or missing node in document order.
fn first_error_position(root: Node<'_>) -> (usize, usize) {
    let mut stack = vec![root];
    while let Some(node) = stack.pop() {
        if node.is_error() || node.is_missing() {
            let pos = node.start_position();
            return (pos.row + 1, pos.column + 1);
        }
        if node.has_error() {
            push_children_reversed(node, &mut stack);
        }
    }
    let pos = root.start_position();
    (pos.row + 1, pos.column + 1)
}

fn push_children_reversed<'t>(node: Node<'t>, stack: &mut Vec<Node<'t>>) {
    let mut cursor = node.walk();
    let children: Vec<Node<'t>> = node.children(&mut cursor).collect();
    stack.extend(children.into_iter().rev());
}

fn node_text<'s>(node: Node<'_>, source: &'s [u8]) -> &'s str {
    node.utf8_text(source).unwrap_or("")
}

fn field_text(node: Node<'_>, field: &str, source: &[u8]) -> Option<String> {
    node.child_by_field_name(field)
        .map(|n| node_text(n, source).trim().to_string())
        .filter(|name| !name.is_empty())
}

/// Render the compact digest used as prompt context.
///
/// ```text
/// Language: python
/// Classes: Bar (1 methods)
/// Functions: foo, helper, ... (+3 more)
/// Imports: import os; from x import y
/// ```
///
/// Lines with nothing to report are left out.
#[must_use]
pub fn render_summary(language: Language, structure: &FileStructure) -> String {
    let mut lines = vec![format!("Language: {language}")];

    if !structure.classes.is_empty() {
        let classes: Vec<String> = structure
            .classes
            .iter()
            .map(|c| format!("{} ({} methods)", c.name, c.methods.len()))
            .collect();
        lines.push(format!("Classes: {}", classes.join(", ")));
    }

    if !structure.functions.is_empty() {
        lines.push(format!(
            "Functions: {}",
            truncated(&structure.functions, MAX_SUMMARY_FUNCTIONS, ", ")
        ));
    }

    if !structure.imports.is_empty() {
        lines.push(format!(
            "Imports: {}",
            truncated(&structure.imports, MAX_SUMMARY_IMPORTS, "; ")
        ));
    }

    lines.join("\n")
}

fn truncated(items: &[String], limit: usize, sep: &str) -> String {
    let mut out = items
        .iter()
        .take(limit)
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(sep);
    if items.len() > limit {
        out.push_str(&format!("{sep}... (+{} more)", items.len() - limit));
    }
    out
}
