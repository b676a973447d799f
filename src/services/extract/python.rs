//! Python grammar visitor

use super::{Scope, field_text, node_text};
use crate::models::{ClassDescriptor, FileStructure};
use tree_sitter::Node;

/// Node kinds the visitor distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PyNode {
    ClassDefinition,
    FunctionDefinition,
    DecoratedDefinition,
    Import,
    Other,
}

impl PyNode {
    fn of(node: Node<'_>) -> Self {
        match node.kind() {
            "class_definition" => PyNode::ClassDefinition,
            "function_definition" => PyNode::FunctionDefinition,
            "decorated_definition" => PyNode::DecoratedDefinition,
            "import_statement" | "import_from_statement" | "future_import_statement" => {
                PyNode::Import
            }
            _ => PyNode::Other,
        }
    }
}

pub(super) fn collect(root: Node<'_>, source: &[u8]) -> FileStructure {
    let mut out = FileStructure::default();
    let mut stack = vec![(root, Scope::Module)];

    while let Some((node, scope)) = stack.pop() {
        let child_scope = match PyNode::of(node) {
            PyNode::ClassDefinition => {
                if let Some(name) = field_text(node, "name", source) {
                    let methods = node
                        .child_by_field_name("body")
                        .map(|body| direct_methods(body, source))
                        .unwrap_or_default();
                    out.classes.push(ClassDescriptor { name, methods });
                }
                Scope::Class
            }
            PyNode::FunctionDefinition => {
                if scope == Scope::Module
                    && let Some(name) = field_text(node, "name", source)
                {
                    out.functions.push(name);
                }
                Scope::Function
            }
            PyNode::Import => {
                out.imports.push(node_text(node, source).trim().to_string());
                continue;
            }
            PyNode::DecoratedDefinition | PyNode::Other => scope,
        };

        let mut cursor = node.walk();
        let children: Vec<Node<'_>> = node.named_children(&mut cursor).collect();
        stack.extend(children.into_iter().rev().map(|child| (child, child_scope)));
    }

    out
}

/// Names of functions defined directly in a class body, decorated or not.
fn direct_methods(body: Node<'_>, source: &[u8]) -> Vec<String> {
    let mut cursor = body.walk();
    let methods = body
        .named_children(&mut cursor)
        .filter_map(|child| match PyNode::of(child) {
            PyNode::FunctionDefinition => Some(child),
            PyNode::DecoratedDefinition => child
                .child_by_field_name("definition")
                .filter(|def| PyNode::of(*def) == PyNode::FunctionDefinition),
            _ => None,
        })
        .filter_map(|def| field_text(def, "name", source))
        .collect();
    methods
}
