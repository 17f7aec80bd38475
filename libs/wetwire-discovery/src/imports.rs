//! Resolves each file's import aliases to their module paths, so
//! Discovery can confirm a `package_alias` actually names a resources
//! package (spec.md §4.1) rather than an unrelated identifier collision.

use std::collections::HashMap;

use tree_sitter::Node;

/// alias → import path (without quotes).
pub fn collect_imports(root: Node<'_>, source: &[u8]) -> HashMap<String, String> {
    let mut map = HashMap::new();
    let mut cursor = root.walk();
    for child in root.named_children(&mut cursor) {
        if child.kind() == "import_declaration" {
            collect_from_declaration(child, source, &mut map);
        }
    }
    map
}

fn collect_from_declaration(decl: Node<'_>, source: &[u8], map: &mut HashMap<String, String>) {
    let mut cursor = decl.walk();
    for child in decl.named_children(&mut cursor) {
        match child.kind() {
            "import_spec" => insert_spec(child, source, map),
            "import_spec_list" => {
                let mut inner_cursor = child.walk();
                for spec in child.named_children(&mut inner_cursor) {
                    if spec.kind() == "import_spec" {
                        insert_spec(spec, source, map);
                    }
                }
            }
            _ => {}
        }
    }
}

fn insert_spec(spec: Node<'_>, source: &[u8], map: &mut HashMap<String, String>) {
    let path_node = match spec.child_by_field_name("path") {
        Some(n) => n,
        None => return,
    };
    let path = path_node
        .utf8_text(source)
        .unwrap_or_default()
        .trim_matches('"')
        .to_string();

    let alias = spec
        .child_by_field_name("name")
        .and_then(|n| n.utf8_text(source).ok())
        .map(str::to_string)
        .unwrap_or_else(|| default_alias(&path));

    map.insert(alias, path);
}

/// Go's default import alias is the last path segment (its package
/// name, conventionally matching the directory name).
fn default_alias(path: &str) -> String {
    path.rsplit('/').next().unwrap_or(path).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tree_sitter::Parser;

    fn imports_of(src: &str) -> HashMap<String, String> {
        let mut parser = Parser::new();
        parser
            .set_language(&tree_sitter_go::language())
            .expect("load go grammar");
        let tree = parser.parse(src, None).expect("parse");
        collect_imports(tree.root_node(), src.as_bytes())
    }

    #[test]
    fn default_alias_is_last_segment() {
        let src = r#"package main
import "example.com/wetwire-azure-go/resources/storage"
"#;
        let map = imports_of(src);
        assert_eq!(
            map.get("storage").map(String::as_str),
            Some("example.com/wetwire-azure-go/resources/storage")
        );
    }

    #[test]
    fn explicit_alias_overrides_default() {
        let src = r#"package main
import st "example.com/wetwire-azure-go/resources/storage"
"#;
        let map = imports_of(src);
        assert_eq!(
            map.get("st").map(String::as_str),
            Some("example.com/wetwire-azure-go/resources/storage")
        );
    }

    #[test]
    fn grouped_import_block() {
        let src = r#"package main
import (
	"example.com/wetwire-azure-go/resources/storage"
	compute "example.com/wetwire-azure-go/resources/compute"
)
"#;
        let map = imports_of(src);
        assert!(map.contains_key("storage"));
        assert!(map.contains_key("compute"));
    }
}
