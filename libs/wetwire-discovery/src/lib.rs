//! Discovery: parses Go source files and extracts top-level Azure
//! resource bindings into the Resource IR (spec.md §4.1).
//!
//! Uses `tree-sitter-go` rather than a full Go type checker — Discovery
//! only ever needs the shape of top-level `var` bindings and their
//! initializer expressions, never real type inference.

mod error;
mod imports;
mod literal;

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};
use tree_sitter::{Node, Parser};
use walkdir::WalkDir;

pub use error::DiscoveryError;
use wetwire_catalog::Catalog;
use wetwire_ir::{DiscoveredResource, TypedValue};

const UNUSED_SENTINEL: &str = "_";

/// Discovers resource bindings across a source tree.
pub struct Discoverer {
    catalog: Catalog,
}

impl Discoverer {
    pub fn new(catalog: Catalog) -> Self {
        Self { catalog }
    }

    /// Recursively locate all `.go` files under `root` and extract a
    /// [`DiscoveredResource`] for every top-level binding whose type
    /// resolves against the catalog, in source-encounter order.
    pub fn discover(&self, root: &Path) -> Result<Vec<DiscoveredResource>, DiscoveryError> {
        let mut files: Vec<PathBuf> = Vec::new();
        for entry in WalkDir::new(root) {
            let entry = entry.map_err(|source| DiscoveryError::Walk {
                path: root.to_path_buf(),
                source,
            })?;
            if entry.file_type().is_file()
                && entry.path().extension().is_some_and(|ext| ext == "go")
            {
                files.push(entry.path().to_path_buf());
            }
        }
        files.sort();

        let mut resources = Vec::new();
        for file in files {
            debug!(file = %file.display(), "discovering resources");
            resources.extend(self.discover_file(&file)?);
        }
        Ok(resources)
    }

    fn discover_file(&self, path: &Path) -> Result<Vec<DiscoveredResource>, DiscoveryError> {
        let source = std::fs::read_to_string(path).map_err(|source| DiscoveryError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let mut parser = Parser::new();
        parser.set_language(&tree_sitter_go::language())?;
        let tree = parser
            .parse(&source, None)
            .ok_or_else(|| DiscoveryError::Parse {
                path: path.to_path_buf(),
            })?;

        let root = tree.root_node();
        if root.has_error() {
            return Err(DiscoveryError::Parse {
                path: path.to_path_buf(),
            });
        }

        let bytes = source.as_bytes();
        let import_map = imports::collect_imports(root, bytes);

        let mut out = Vec::new();
        let mut cursor = root.walk();
        for top_level in root.named_children(&mut cursor) {
            if top_level.kind() == "var_declaration" {
                self.collect_var_declaration(top_level, bytes, path, &import_map, &mut out);
            }
        }
        Ok(out)
    }

    fn collect_var_declaration(
        &self,
        decl: Node<'_>,
        source: &[u8],
        path: &Path,
        import_map: &HashMap<String, String>,
        out: &mut Vec<DiscoveredResource>,
    ) {
        let mut cursor = decl.walk();
        for spec in decl.named_children(&mut cursor) {
            if spec.kind() == "var_spec" {
                self.collect_var_spec(spec, source, path, import_map, out);
            }
        }
    }

    fn collect_var_spec(
        &self,
        spec: Node<'_>,
        source: &[u8],
        path: &Path,
        import_map: &HashMap<String, String>,
        out: &mut Vec<DiscoveredResource>,
    ) {
        let names: Vec<Node> = spec.children_by_field_name("name").collect();
        let values: Vec<Node> = spec.children_by_field_name("value").collect();
        let explicit_type = spec.child_by_field_name("type");

        if !values.is_empty() && values.len() != names.len() {
            // Multi-return call assigned to a tuple — not a resource pattern.
            return;
        }

        for (i, name_node) in names.iter().enumerate() {
            let name = text(*name_node, source);
            if name == UNUSED_SENTINEL {
                continue;
            }

            let value_node = values.get(i).copied();

            let type_pair = explicit_type
                .and_then(|t| decompose_type_node(t, source))
                .or_else(|| value_node.and_then(|v| composite_type_of(v, source)));

            let Some((alias, type_identifier)) = type_pair else {
                continue;
            };

            let Some(entry) = self.catalog.lookup(&alias, &type_identifier) else {
                continue;
            };

            match import_map.get(&alias) {
                Some(import_path)
                    if import_path.contains(wetwire_catalog::catalog::RESOURCES_MODULE_MARKER) => {}
                _ => {
                    warn!(
                        alias = alias.as_str(),
                        "resource-shaped binding skipped: import does not resolve to a resources package"
                    );
                    continue;
                }
            }

            let literal = value_node
                .map(|v| literal::parse_literal(v, source))
                .unwrap_or(wetwire_ir::GoLiteral::Composite {
                    type_name: Some(type_identifier.clone()),
                    fields: Vec::new(),
                });

            let mut deps: Vec<String> = value_node
                .map(|v| literal::extract_identifiers(v, source))
                .unwrap_or_default()
                .into_iter()
                .filter(|d| d != name)
                .collect();
            deps.sort();

            out.push(DiscoveredResource::new(
                name,
                entry.arm_type,
                path.to_path_buf(),
                (name_node.start_position().row + 1) as u32,
                deps,
                TypedValue::new(literal),
            ));
        }
    }
}

fn decompose_type_node(node: Node<'_>, source: &[u8]) -> Option<(String, String)> {
    match node.kind() {
        "qualified_type" => {
            let pkg = node.child_by_field_name("package")?;
            let name = node.child_by_field_name("name")?;
            Some((text(pkg, source).to_string(), text(name, source).to_string()))
        }
        "type_identifier" => Some((String::new(), text(node, source).to_string())),
        _ => None,
    }
}

/// If `node` is (possibly through `&`/parens) a composite literal whose
/// type is `pkg.Type{...}` or `Type{...}`, return that type's pair.
fn composite_type_of(node: Node<'_>, source: &[u8]) -> Option<(String, String)> {
    let inner = unwrap_to_composite(node)?;
    let type_node = inner.child_by_field_name("type")?;
    decompose_type_node(type_node, source)
}

fn unwrap_to_composite(node: Node<'_>) -> Option<Node<'_>> {
    match node.kind() {
        "composite_literal" => Some(node),
        "unary_expression" => node.child_by_field_name("operand").and_then(unwrap_to_composite),
        "parenthesized_expression" => node.named_child(0).and_then(unwrap_to_composite),
        _ => None,
    }
}

fn text<'a>(node: Node<'_>, source: &'a [u8]) -> &'a str {
    node.utf8_text(source).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_source(dir: &tempfile::TempDir, name: &str, contents: &str) -> PathBuf {
        let path = dir.path().join(name);
        let mut f = std::fs::File::create(&path).unwrap();
        f.write_all(contents.as_bytes()).unwrap();
        path
    }

    const STORAGE_SRC: &str = r#"package infra

import "example.com/wetwire-azure-go/resources/storage"

var A = storage.StorageAccount{
	Name:     "mystorage",
	Location: "eastus",
}
"#;

    #[test]
    fn discovers_single_storage_account() {
        let dir = tempfile::tempdir().unwrap();
        write_source(&dir, "main.go", STORAGE_SRC);

        let discoverer = Discoverer::new(Catalog::new());
        let resources = discoverer.discover(dir.path()).unwrap();

        assert_eq!(resources.len(), 1);
        assert_eq!(resources[0].name, "A");
        assert_eq!(resources[0].arm_type, "Microsoft.Storage/storageAccounts");
        assert!(resources[0].dependencies.is_empty());
    }

    #[test]
    fn extracts_linear_dependency() {
        let dir = tempfile::tempdir().unwrap();
        let src = r#"package infra

import (
	"example.com/wetwire-azure-go/resources/storage"
	"example.com/wetwire-azure-go/resources/compute"
)

var A = storage.StorageAccount{
	Name:     "mystorage",
	Location: "eastus",
}

var B = compute.VirtualMachine{
	Name: "myvm",
	Disk: A,
}
"#;
        write_source(&dir, "main.go", src);

        let discoverer = Discoverer::new(Catalog::new());
        let resources = discoverer.discover(dir.path()).unwrap();

        assert_eq!(resources.len(), 2);
        let b = resources.iter().find(|r| r.name == "B").unwrap();
        assert_eq!(b.dependencies, vec!["A".to_string()]);
    }

    #[test]
    fn skips_unused_sentinel_and_non_catalog_types() {
        let dir = tempfile::tempdir().unwrap();
        let src = r#"package infra

var _ = 5
var notAResource = "plain string"
"#;
        write_source(&dir, "main.go", src);

        let discoverer = Discoverer::new(Catalog::new());
        let resources = discoverer.discover(dir.path()).unwrap();
        assert!(resources.is_empty());
    }

    #[test]
    fn parse_error_aborts_discovery() {
        let dir = tempfile::tempdir().unwrap();
        write_source(&dir, "broken.go", "package infra\nvar x = {{{\n");

        let discoverer = Discoverer::new(Catalog::new());
        let result = discoverer.discover(dir.path());
        assert!(result.is_err());
    }
}
