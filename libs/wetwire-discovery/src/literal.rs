//! Converts a Go initializer expression (a `tree-sitter-go` parse
//! subtree) into the structured [`GoLiteral`] the Serializer walks, and
//! separately collects the set of identifiers an initializer
//! references — the dependency extraction described in spec.md §4.1.

use std::collections::BTreeSet;

use tree_sitter::Node;
use wetwire_ir::GoLiteral;

const BUILTIN_IDENTS: &[&str] = &["true", "false", "nil", "iota"];
const UNUSED_SENTINEL: &str = "_";

/// Parse an initializer expression node into a [`GoLiteral`] tree.
pub fn parse_literal(node: Node<'_>, source: &[u8]) -> GoLiteral {
    match node.kind() {
        "interpreted_string_literal" | "raw_string_literal" => {
            GoLiteral::String(string_contents(node, source))
        }
        "int_literal" => text(node, source)
            .parse::<i64>()
            .map(GoLiteral::Int)
            .unwrap_or(GoLiteral::Int(0)),
        "float_literal" => text(node, source)
            .parse::<f64>()
            .map(GoLiteral::Float)
            .unwrap_or(GoLiteral::Float(0.0)),
        "true" => GoLiteral::Bool(true),
        "false" => GoLiteral::Bool(false),
        "nil" => GoLiteral::Nil,
        "identifier" | "field_identifier" => {
            let name = text(node, source);
            match name {
                "true" => GoLiteral::Bool(true),
                "false" => GoLiteral::Bool(false),
                "nil" => GoLiteral::Nil,
                other => GoLiteral::Ident(other.to_string()),
            }
        }
        "unary_expression" | "pointer_type" => {
            if let Some(operand) = node.child_by_field_name("operand") {
                GoLiteral::Indirect(Box::new(parse_literal(operand, source)))
            } else if let Some(last) = node.named_child(node.named_child_count().saturating_sub(1))
            {
                GoLiteral::Indirect(Box::new(parse_literal(last, source)))
            } else {
                GoLiteral::Nil
            }
        }
        "parenthesized_expression" => node
            .named_child(0)
            .map(|inner| GoLiteral::Indirect(Box::new(parse_literal(inner, source))))
            .unwrap_or(GoLiteral::Nil),
        "call_expression" => {
            let callee = node
                .child_by_field_name("function")
                .map(|f| callee_text(f, source))
                .unwrap_or_default();
            let args = node
                .child_by_field_name("arguments")
                .map(|args| {
                    let mut cursor = args.walk();
                    args.named_children(&mut cursor)
                        .map(|a| parse_literal(a, source))
                        .collect()
                })
                .unwrap_or_default();
            GoLiteral::Call { callee, args }
        }
        "composite_literal" => parse_composite(node, source),
        "literal_value" => parse_literal_value_elements(node, source),
        "selector_expression" => GoLiteral::Ident(callee_text(node, source)),
        _ => GoLiteral::Ident(text(node, source).to_string()),
    }
}

fn parse_composite(node: Node<'_>, source: &[u8]) -> GoLiteral {
    let type_text = node
        .child_by_field_name("type")
        .map(|t| text(t, source).to_string());
    let is_slice = type_text
        .as_deref()
        .is_some_and(|t| t.starts_with('[') && !t.starts_with("map["));
    let is_map = type_text.as_deref().is_some_and(|t| t.starts_with("map["));

    let body = node.child_by_field_name("body");
    let Some(body) = body else {
        return GoLiteral::Composite {
            type_name: type_text,
            fields: Vec::new(),
        };
    };

    if is_map {
        return GoLiteral::Map(parse_map_elements(body, source));
    }
    if is_slice {
        let mut cursor = body.walk();
        let items = body
            .named_children(&mut cursor)
            .filter(|c| c.kind() != "keyed_element" || true)
            .map(|c| element_value(c, source))
            .collect();
        return GoLiteral::Slice(items);
    }

    // Struct composite literal: every element should be `Field: value`.
    let mut fields = Vec::new();
    let mut cursor = body.walk();
    for element in body.named_children(&mut cursor) {
        if element.kind() == "keyed_element" {
            if let (Some(key), Some(value)) = (
                element.child_by_field_name("key"),
                element.child_by_field_name("value"),
            ) {
                fields.push((text(key, source).to_string(), parse_literal(value, source)));
            }
        }
    }
    GoLiteral::Composite {
        type_name: type_text,
        fields,
    }
}

fn element_value(node: Node<'_>, source: &[u8]) -> GoLiteral {
    if node.kind() == "keyed_element" {
        node.child_by_field_name("value")
            .map(|v| parse_literal(v, source))
            .unwrap_or(GoLiteral::Nil)
    } else {
        parse_literal(node, source)
    }
}

fn parse_map_elements(body: Node<'_>, source: &[u8]) -> Vec<(GoLiteral, GoLiteral)> {
    let mut cursor = body.walk();
    body.named_children(&mut cursor)
        .filter(|c| c.kind() == "keyed_element")
        .filter_map(|c| {
            let key = c.child_by_field_name("key")?;
            let value = c.child_by_field_name("value")?;
            Some((parse_literal(key, source), parse_literal(value, source)))
        })
        .collect()
}

fn parse_literal_value_elements(node: Node<'_>, source: &[u8]) -> GoLiteral {
    let mut cursor = node.walk();
    let fields = node
        .named_children(&mut cursor)
        .filter(|c| c.kind() == "keyed_element")
        .filter_map(|c| {
            let key = c.child_by_field_name("key")?;
            let value = c.child_by_field_name("value")?;
            Some((text(key, source).to_string(), parse_literal(value, source)))
        })
        .collect();
    GoLiteral::Composite {
        type_name: None,
        fields,
    }
}

/// Render a selector chain (`pkg.Type`, `a.b.c`) to dotted text, used to
/// recover a call's callee name for intrinsic-function recognition.
fn callee_text(node: Node<'_>, source: &[u8]) -> String {
    if node.kind() == "selector_expression" {
        let operand = node
            .child_by_field_name("operand")
            .map(|o| callee_text(o, source));
        let field = node
            .child_by_field_name("field")
            .map(|f| text(f, source).to_string());
        match (operand, field) {
            (Some(o), Some(f)) => format!("{o}.{f}"),
            (Some(o), None) => o,
            (None, Some(f)) => f,
            (None, None) => String::new(),
        }
    } else {
        text(node, source).to_string()
    }
}

fn text<'a>(node: Node<'_>, source: &'a [u8]) -> &'a str {
    node.utf8_text(source).unwrap_or_default()
}

fn string_contents(node: Node<'_>, source: &[u8]) -> String {
    let raw = text(node, source);
    raw.trim_matches(|c| c == '"' || c == '`').to_string()
}

/// Collect the set of identifiers an initializer expression references,
/// per the traversal rules in spec.md §4.1: descend through composite
/// literals, key-value pairs, calls, selectors (root only),
/// pointer/address-of, unary/binary operators, parens, and
/// slice/index/array/map type nodes. Builtins and `_` are excluded.
pub fn extract_identifiers(node: Node<'_>, source: &[u8]) -> BTreeSet<String> {
    let mut out = BTreeSet::new();
    walk_for_identifiers(node, source, &mut out);
    out
}

fn walk_for_identifiers(node: Node<'_>, source: &[u8], out: &mut BTreeSet<String>) {
    match node.kind() {
        "identifier" => {
            let name = text(node, source);
            if name != UNUSED_SENTINEL && !BUILTIN_IDENTS.contains(&name) {
                out.insert(name.to_string());
            }
        }
        "selector_expression" => {
            // Keep only the root of the selector chain.
            if let Some(operand) = node.child_by_field_name("operand") {
                walk_for_identifiers(root_of_selector(operand), source, out);
            }
        }
        _ => {
            let mut cursor = node.walk();
            for child in node.named_children(&mut cursor) {
                walk_for_identifiers(child, source, out);
            }
        }
    }
}

fn root_of_selector(node: Node<'_>) -> Node<'_> {
    let mut current = node;
    while current.kind() == "selector_expression" {
        match current.child_by_field_name("operand") {
            Some(operand) => current = operand,
            None => break,
        }
    }
    current
}
