//! Template assembly and emission: the ORDER → SERIALIZE → EMIT stages
//! of the build pipeline (spec.md §4.4). ADD and VALIDATE happen
//! upstream, in Discovery and the Validator.

use std::collections::HashMap;

use tracing::warn;
use wetwire_catalog::{Catalog, NameTransformer};
use wetwire_ir::{ArmResource, ArmTemplate, DiscoveredResource, GoLiteral, Intrinsic};

use crate::error::SerializerError;
use crate::json::non_zero_value;

pub const DEFAULT_LOCATION_EXPRESSION: &str = "[resourceGroup().location]";

/// Top-level ARM resource fields a resource's initializer may declare
/// directly. Any other top-level field name is unexpected for this
/// toolchain's resource shape and is dropped with a warning.
const KNOWN_TOP_LEVEL_FIELDS: &[&str] = &["sku", "kind", "tags", "identity", "zones", "plan", "properties"];

/// `name` and `location` are synthesized by the builder itself (from
/// the binding identifier and the fixed resource-group expression)
/// rather than read off the initializer, so they're recognized and
/// silently skipped rather than falling through to the "unexpected
/// field" warning.
const SYNTHESIZED_FIELDS: &[&str] = &["name", "location"];

/// Builds the final [`ArmTemplate`] from an already-validated, already-
/// ordered list of resources (spec.md §4.2 feeds this directly).
pub struct TemplateBuilder {
    catalog: Catalog,
    names: NameTransformer,
    location_expression: String,
    default_api_version: String,
}

impl TemplateBuilder {
    /// Uses `[resourceGroup().location]` and the catalog's own built-in
    /// default API version — the values a caller without a `BuildConfig`
    /// (tests, other crates) would otherwise have to repeat by hand.
    pub fn new(catalog: Catalog, names: NameTransformer) -> Self {
        Self::with_defaults(
            catalog,
            names,
            DEFAULT_LOCATION_EXPRESSION,
            wetwire_catalog::DEFAULT_API_VERSION,
        )
    }

    /// As [`TemplateBuilder::new`], but with the location expression and
    /// fallback API version a caller-supplied build configuration gives.
    pub fn with_defaults(
        catalog: Catalog,
        names: NameTransformer,
        location_expression: impl Into<String>,
        default_api_version: impl Into<String>,
    ) -> Self {
        Self {
            catalog,
            names,
            location_expression: location_expression.into(),
            default_api_version: default_api_version.into(),
        }
    }

    /// SERIALIZE: turn each ordered resource into an [`ArmResource`],
    /// then wrap the list into a full [`ArmTemplate`] document.
    pub fn build(&self, resources: &[DiscoveredResource]) -> Result<ArmTemplate, SerializerError> {
        let arm_type_by_name: HashMap<&str, &str> = resources
            .iter()
            .map(|r| (r.name.as_str(), r.arm_type.as_str()))
            .collect();

        let mut arm_resources = Vec::with_capacity(resources.len());
        for resource in resources {
            arm_resources.push(self.serialize_resource(resource, &arm_type_by_name)?);
        }
        Ok(ArmTemplate::new(arm_resources))
    }

    fn serialize_resource(
        &self,
        resource: &DiscoveredResource,
        arm_type_by_name: &HashMap<&str, &str>,
    ) -> Result<ArmResource, SerializerError> {
        let fields = match resource.typed_value.literal() {
            GoLiteral::Composite { fields, .. } => fields,
            _ => return Err(SerializerError::NotAComposite(resource.name.clone())),
        };

        let api_version = match self.catalog.inverse(&resource.arm_type) {
            Some(_) => self.catalog.api_version(&resource.arm_type).to_string(),
            None => self.default_api_version.clone(),
        };
        let mut arm = ArmResource::new(
            resource.name.clone(),
            resource.arm_type.clone(),
            api_version,
            self.location_expression.clone(),
        );

        for dep in &resource.dependencies {
            if let Some(arm_type) = arm_type_by_name.get(dep.as_str()) {
                arm.depends_on
                    .push(Intrinsic::resource_id(*arm_type, dep.clone()).expression());
            }
        }

        for (field_name, value) in fields {
            let camel = self.names.pascal_to_camel(field_name);
            if SYNTHESIZED_FIELDS.contains(&camel.as_str()) {
                continue;
            }
            if !KNOWN_TOP_LEVEL_FIELDS.contains(&camel.as_str()) {
                warn!(resource = %resource.name, field = %camel, "unexpected top-level field dropped");
                continue;
            }
            let converted = non_zero_value(value, &self.names);
            match camel.as_str() {
                "sku" => arm.sku = converted,
                "kind" => arm.kind = converted,
                "tags" => arm.tags = converted,
                "identity" => arm.identity = converted,
                "zones" => arm.zones = converted,
                "plan" => arm.plan = converted,
                "properties" => arm.properties = converted,
                _ => unreachable!("field already matched against KNOWN_TOP_LEVEL_FIELDS"),
            }
        }

        Ok(arm)
    }
}

/// EMIT: render the final document as pretty-printed JSON text, two-
/// space indented with a trailing newline (spec.md §6.2).
pub fn emit(template: &ArmTemplate) -> Result<String, serde_json::Error> {
    let mut text = serde_json::to_string_pretty(template)?;
    text.push('\n');
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use wetwire_ir::TypedValue;

    fn resource(name: &str, arm_type: &str, deps: &[&str], fields: Vec<(&str, GoLiteral)>) -> DiscoveredResource {
        DiscoveredResource::new(
            name,
            arm_type,
            PathBuf::from("main.go"),
            1,
            deps.iter().map(|d| d.to_string()).collect(),
            TypedValue::new(GoLiteral::Composite {
                type_name: None,
                fields: fields
                    .into_iter()
                    .map(|(k, v)| (k.to_string(), v))
                    .collect(),
            }),
        )
    }

    #[test]
    fn single_resource_gets_default_location_and_api_version() {
        let builder = TemplateBuilder::new(Catalog::new(), NameTransformer::new());
        let resources = vec![resource(
            "A",
            "Microsoft.Storage/storageAccounts",
            &[],
            vec![("Name", GoLiteral::String("mystorage".into()))],
        )];
        let template = builder.build(&resources).unwrap();
        assert_eq!(template.resources.len(), 1);
        assert_eq!(template.resources[0].name, "A");
        assert_eq!(template.resources[0].location, DEFAULT_LOCATION_EXPRESSION);
        assert_eq!(template.resources[0].api_version, "2021-04-01");
    }

    #[test]
    fn dependency_renders_as_resource_id_on_dependent() {
        let builder = TemplateBuilder::new(Catalog::new(), NameTransformer::new());
        let resources = vec![
            resource("A", "Microsoft.Storage/storageAccounts", &[], vec![]),
            resource("B", "Microsoft.Compute/virtualMachines", &["A"], vec![]),
        ];
        let template = builder.build(&resources).unwrap();
        assert_eq!(
            template.resources[1].depends_on,
            vec!["[resourceId('Microsoft.Storage/storageAccounts', 'A')]".to_string()]
        );
    }

    #[test]
    fn sku_and_tags_survive_zero_fields_are_dropped() {
        let builder = TemplateBuilder::new(Catalog::new(), NameTransformer::new());
        let resources = vec![resource(
            "A",
            "Microsoft.Storage/storageAccounts",
            &[],
            vec![
                (
                    "SKU",
                    GoLiteral::Composite {
                        type_name: None,
                        fields: vec![("Name".to_string(), GoLiteral::String("Standard_LRS".into()))],
                    },
                ),
                (
                    "Tags",
                    GoLiteral::Map(vec![]),
                ),
            ],
        )];
        let template = builder.build(&resources).unwrap();
        assert!(template.resources[0].sku.is_some());
        assert!(template.resources[0].tags.is_none());
    }

    #[test]
    fn with_defaults_threads_configured_location_and_fallback_api_version() {
        let builder = TemplateBuilder::with_defaults(
            Catalog::new(),
            NameTransformer::new(),
            "[parameters('location')]",
            "2023-01-01",
        );
        let resources = vec![
            resource("A", "Microsoft.Storage/storageAccounts", &[], vec![]),
            resource("B", "Microsoft.DoesNotExist/thing", &[], vec![]),
        ];
        let template = builder.build(&resources).unwrap();
        assert_eq!(template.resources[0].location, "[parameters('location')]");
        assert_eq!(template.resources[0].api_version, "2021-04-01");
        assert_eq!(template.resources[1].api_version, "2023-01-01");
    }

    #[test]
    fn emitted_text_is_pretty_and_newline_terminated() {
        let template = ArmTemplate::new(vec![]);
        let text = emit(&template).unwrap();
        assert!(text.ends_with('\n'));
        assert!(text.contains("  \"$schema\""));
    }
}
