//! Code Generator (spec.md §4.6): renders an [`ArmDocument`] back into
//! syntactically-valid source text, inverting the Serializer.

use std::collections::{BTreeSet, HashMap};

use regex::Regex;
use serde_json::{Map, Value};
use wetwire_catalog::{name::module_name, Catalog, NameTransformer, RESOURCES_MODULE_MARKER};

use crate::parser::{ArmDocument, ImportedResource};

/// Nested top-level fields whose object shape is rendered as a typed
/// `package.Field{...}` composite literal rather than a generic map —
/// these are the structured sub-fields spec.md §3 names explicitly.
/// `tags` and `properties` stay generic: `tags` is conventionally a
/// flat string map and `properties` has no fixed shape at all.
const TYPED_OBJECT_FIELDS: &[&str] = &["sku", "identity", "plan"];

pub struct CodeGenerator {
    catalog: Catalog,
    names: NameTransformer,
}

impl CodeGenerator {
    pub fn new(catalog: Catalog, names: NameTransformer) -> Self {
        Self { catalog, names }
    }

    pub fn generate(&self, document: &ArmDocument, package: &str) -> String {
        let binding_names: HashMap<&str, String> = document
            .resources
            .iter()
            .map(|r| (r.name.as_str(), self.names.snake_kebab_to_pascal(&r.name)))
            .collect();

        let mut packages: BTreeSet<String> = BTreeSet::new();
        for resource in &document.resources {
            packages.insert(self.package_alias(&resource.arm_type));
        }

        let mut out = String::new();
        out.push_str(&format!("package {package}\n\n"));
        out.push_str("import (\n");
        out.push_str(&format!("\t\"{RESOURCES_MODULE_MARKER}\"\n"));
        for pkg in &packages {
            out.push_str(&format!("\t\"{RESOURCES_MODULE_MARKER}/{pkg}\"\n"));
        }
        out.push_str(")\n\n");

        for resource in &document.resources {
            out.push_str(&self.render_binding(resource, &binding_names));
            out.push('\n');
        }

        out
    }

    /// Resolved from the catalog when the ARM type is known; otherwise
    /// derived from the provider namespace segment (`Microsoft.Storage`
    /// → `storage`) via `module_name`, so an unrecognized type still
    /// gets a conventional, lowercase Go package alias rather than the
    /// raw mixed-case namespace segment.
    fn package_alias(&self, arm_type: &str) -> String {
        match self.catalog.inverse(arm_type) {
            Some((pkg, _)) => pkg.to_string(),
            None => {
                let namespace = arm_type
                    .split('/')
                    .next()
                    .unwrap_or(arm_type)
                    .rsplit('.')
                    .next()
                    .unwrap_or(arm_type);
                module_name(&capitalize_first(namespace))
            }
        }
    }

    fn type_identifier(&self, arm_type: &str) -> (String, String) {
        match self.catalog.inverse(arm_type) {
            Some((pkg, ty)) => (pkg.to_string(), ty.to_string()),
            None => {
                let pkg = self.package_alias(arm_type);
                let last_segment = arm_type.rsplit('/').next().unwrap_or(arm_type);
                let singular = singularize(last_segment);
                let ty = self.names.apply_acronyms(&capitalize_first(&singular));
                (pkg, ty)
            }
        }
    }

    fn render_binding(
        &self,
        resource: &ImportedResource,
        binding_names: &HashMap<&str, String>,
    ) -> String {
        let var_name = &binding_names[resource.name.as_str()];
        let (package, type_identifier) = self.type_identifier(&resource.arm_type);

        let mut comment = String::new();
        for dep in &resource.depends_on {
            if let Some(dep_name) = extract_dependency_name(dep) {
                if let Some(dep_var) = binding_names.get(dep_name.as_str()) {
                    comment.push_str(&format!("// DependsOn: {dep_var}\n"));
                }
            }
        }

        let mut fields = Vec::new();
        fields.push(format!("Name: {:?}", resource.name));
        fields.push(format!("Location: {:?}", resource.location));
        if let Some(sku) = &resource.sku {
            fields.push(format!("SKU: {}", self.render_top_field(&package, "SKU", sku)));
        }
        if let Some(kind) = &resource.kind {
            fields.push(format!("Kind: {}", self.render_value(kind)));
        }
        if let Some(tags) = &resource.tags {
            fields.push(format!("Tags: {}", self.render_value(tags)));
        }
        if let Some(identity) = &resource.identity {
            fields.push(format!(
                "Identity: {}",
                self.render_top_field(&package, "Identity", identity)
            ));
        }
        if let Some(zones) = &resource.zones {
            fields.push(format!("Zones: {}", self.render_value(zones)));
        }
        if let Some(plan) = &resource.plan {
            fields.push(format!("Plan: {}", self.render_top_field(&package, "Plan", plan)));
        }
        if let Some(properties) = &resource.properties {
            fields.push(format!("Properties: {}", self.render_value(properties)));
        }

        format!(
            "{comment}var {var_name} = {package}.{type_identifier}{{\n\t{}\n}}\n",
            fields.join(",\n\t")
        )
    }

    fn render_top_field(&self, package: &str, field_pascal: &str, value: &Value) -> String {
        match value.as_object() {
            Some(obj) if TYPED_OBJECT_FIELDS.contains(&field_pascal.to_lowercase().as_str()) => {
                self.render_typed_object(package, field_pascal, obj)
            }
            _ => self.render_value(value),
        }
    }

    fn render_typed_object(&self, package: &str, field_pascal: &str, obj: &Map<String, Value>) -> String {
        let mut keys: Vec<&String> = obj.keys().collect();
        keys.sort();
        let entries: Vec<String> = keys
            .iter()
            .map(|k| format!("{}: {}", self.names.camel_to_pascal(k), self.render_value(&obj[*k])))
            .collect();
        format!("{package}.{field_pascal}{{{}}}", entries.join(", "))
    }

    fn render_value(&self, value: &Value) -> String {
        match value {
            Value::Null => "nil".to_string(),
            Value::Bool(b) => b.to_string(),
            Value::Number(n) => n.to_string(),
            Value::String(s) => format!("{s:?}"),
            Value::Array(items) => {
                let rendered: Vec<String> = items.iter().map(|v| self.render_value(v)).collect();
                format!("[]interface{{}}{{{}}}", rendered.join(", "))
            }
            Value::Object(obj) => {
                let mut keys: Vec<&String> = obj.keys().collect();
                keys.sort();
                let entries: Vec<String> = keys
                    .iter()
                    .map(|k| format!("{k:?}: {}", self.render_value(&obj[*k])))
                    .collect();
                format!("map[string]interface{{}}{{{}}}", entries.join(", "))
            }
        }
    }
}

/// Strip a trailing `s` (unless `ss`), `ies`→`y`, `ses`→`se`.
fn singularize(word: &str) -> String {
    if let Some(stem) = word.strip_suffix("ies") {
        return format!("{stem}y");
    }
    if let Some(stem) = word.strip_suffix("ses") {
        return format!("{stem}se");
    }
    if word.ends_with("ss") {
        return word.to_string();
    }
    word.strip_suffix('s').unwrap_or(word).to_string()
}

fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(c) => c.to_uppercase().collect::<String>() + chars.as_str(),
    }
}

/// Pull the resource name out of a `dependsOn` entry, either the
/// canonical `[resourceId('type', 'name')]` intrinsic form or a
/// literal `Type/path/name` string.
fn extract_dependency_name(dep: &str) -> Option<String> {
    let resource_id = Regex::new(r"resourceId\(\s*'[^']*'\s*,\s*'([^']*)'\s*\)").unwrap();
    if let Some(caps) = resource_id.captures(dep) {
        return Some(caps[1].to_string());
    }
    dep.rsplit('/').next().map(|s| s.trim_matches('\'').to_string())
}
