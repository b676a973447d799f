//! JavaScript grammar visitor

use super::{Scope, field_text, node_text};
use crate::models::{ClassDescriptor, FileStructure};
use tree_sitter::Node;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum JsNode {
    /// `class Foo {}` and class expressions
    Class,
    /// `function foo() {}` and generator declarations
    FunctionDeclaration,
    /// Anything else that opens a function body
    FunctionBody,
    /// `const foo = ...`
    Declarator,
    Import,
    Other,
}

impl JsNode {
    fn of(node: Node<'_>) -> Self {
        match node.kind() {
            "class_declaration" | "class" => JsNode::Class,
            "function_declaration" | "generator_function_declaration" => {
                JsNode::FunctionDeclaration
            }
            "function_expression" | "function" | "generator_function" | "arrow_function"
            | "method_definition" => JsNode::FunctionBody,
            "variable_declarator" => JsNode::Declarator,
            "import_statement" => JsNode::Import,
            _ => JsNode::Other,
        }
    }

    fn is_function_value(node: Node<'_>) -> bool {
        matches!(
            node.kind(),
            "function_expression" | "function" | "generator_function" | "arrow_function"
        )
    }
}

pub(super) fn collect(root: Node<'_>, source: &[u8]) -> FileStructure {
    let mut out = FileStructure::default();
    let mut stack = vec![(root, Scope::Module)];

    while let Some((node, scope)) = stack.pop() {
        let child_scope = match JsNode::of(node) {
            JsNode::Class => {
                if let Some(name) = field_text(node, "name", source) {
                    let methods = node
                        .child_by_field_name("body")
                        .map(|body| direct_methods(body, source))
                        .unwrap_or_default();
                    out.classes.push(ClassDescriptor { name, methods });
                }
                Scope::Class
            }
            JsNode::FunctionDeclaration => {
                if scope == Scope::Module
                    && let Some(name) = field_text(node, "name", source)
                {
                    out.functions.push(name);
                }
                Scope::Function
            }
            JsNode::FunctionBody => Scope::Function,
            JsNode::Declarator => {
                if scope == Scope::Module
                    && node
                        .child_by_field_name("value")
                        .is_some_and(JsNode::is_function_value)
                    && node
                        .child_by_field_name("name")
                        .is_some_and(|n| n.kind() == "identifier")
                    && let Some(name) = field_text(node, "name", source)
                {
                    out.functions.push(name);
                }
                scope
            }
            JsNode::Import => {
                out.imports.push(node_text(node, source).trim().to_string());
                continue;
            }
            JsNode::Other => scope,
        };

        let mut cursor = node.walk();
        let children: Vec<Node<'_>> = node.named_children(&mut cursor).collect();
        stack.extend(children.into_iter().rev().map(|child| (child, child_scope)));
    }

    out
}

fn direct_methods(body: Node<'_>, source: &[u8]) -> Vec<String> {
    let mut cursor = body.walk();
    let methods = body
        .named_children(&mut cursor)
        .filter(|child| child.kind() == "method_definition")
        .filter_map(|method| field_text(method, "name", source))
        .collect();
    methods
}
