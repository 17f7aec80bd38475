//! ARM Parser (spec.md §4.5): turns ARM JSON or YAML text into a
//! generic, loosely-typed resource IR. JSON is tried first; YAML is
//! attempted only if JSON parsing fails, since hand-written ARM
//! templates are overwhelmingly JSON.

use serde_json::{Map, Value};

use crate::error::ImportError;

/// One resource entry from a parsed ARM template. `sku`, `kind`,
/// `tags`, `identity`, `zones`, `plan`, and `properties` are kept as
/// raw JSON values — the Code Generator decides how to render each.
#[derive(Debug, Clone)]
pub struct ImportedResource {
    pub name: String,
    pub arm_type: String,
    pub api_version: String,
    pub location: String,
    pub depends_on: Vec<String>,
    pub sku: Option<Value>,
    pub kind: Option<Value>,
    pub tags: Option<Value>,
    pub identity: Option<Value>,
    pub zones: Option<Value>,
    pub plan: Option<Value>,
    pub properties: Option<Value>,
}

#[derive(Debug, Clone, Default)]
pub struct ArmDocument {
    pub resources: Vec<ImportedResource>,
}

impl ArmDocument {
    /// Parse ARM template text, trying JSON then YAML.
    pub fn parse(text: &str) -> Result<Self, ImportError> {
        let value = match serde_json::from_str::<Value>(text) {
            Ok(v) => v,
            Err(json_err) => serde_yaml::from_str::<Value>(text)
                .map_err(|yaml_err| ImportError::Parse(format!("{json_err}; {yaml_err}")))?,
        };
        Self::from_value(&value)
    }

    fn from_value(value: &Value) -> Result<Self, ImportError> {
        let resources = value
            .get("resources")
            .and_then(Value::as_array)
            .cloned()
            .unwrap_or_default();

        let mut out = Vec::with_capacity(resources.len());
        for entry in &resources {
            let obj = entry
                .as_object()
                .ok_or(ImportError::Parse("resource entry is not an object".into()))?;
            out.push(ImportedResource::from_object(obj)?);
        }
        Ok(Self { resources: out })
    }
}

impl ImportedResource {
    fn from_object(obj: &Map<String, Value>) -> Result<Self, ImportError> {
        let name = obj
            .get("name")
            .and_then(Value::as_str)
            .ok_or(ImportError::MissingField("name"))?
            .to_string();
        let arm_type = obj
            .get("type")
            .and_then(Value::as_str)
            .ok_or(ImportError::MissingField("type"))?
            .to_string();
        let api_version = obj
            .get("apiVersion")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();
        let location = obj
            .get("location")
            .and_then(Value::as_str)
            .unwrap_or("[resourceGroup().location]")
            .to_string();
        let depends_on = obj
            .get("dependsOn")
            .and_then(Value::as_array)
            .map(|items| {
                items
                    .iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        Ok(Self {
            name,
            arm_type,
            api_version,
            location,
            depends_on,
            sku: obj.get("sku").cloned(),
            kind: obj.get("kind").cloned(),
            tags: obj.get("tags").cloned(),
            identity: obj.get("identity").cloned(),
            zones: obj.get("zones").cloned(),
            plan: obj.get("plan").cloned(),
            properties: obj.get("properties").cloned(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEMPLATE: &str = r#"{
        "$schema": "https://schema.management.azure.com/schemas/2019-04-01/deploymentTemplate.json#",
        "contentVersion": "1.0.0.0",
        "parameters": {},
        "variables": {},
        "resources": [
            {
                "name": "mystorage",
                "type": "Microsoft.Storage/storageAccounts",
                "apiVersion": "2021-04-01",
                "location": "eastus",
                "sku": {"name": "Standard_LRS"},
                "kind": "StorageV2"
            }
        ],
        "outputs": {}
    }"#;

    #[test]
    fn parses_json_template() {
        let doc = ArmDocument::parse(TEMPLATE).unwrap();
        assert_eq!(doc.resources.len(), 1);
        let r = &doc.resources[0];
        assert_eq!(r.name, "mystorage");
        assert_eq!(r.arm_type, "Microsoft.Storage/storageAccounts");
        assert_eq!(r.location, "eastus");
        assert_eq!(r.kind.as_ref().unwrap(), "StorageV2");
    }

    #[test]
    fn parses_yaml_fallback() {
        let yaml = "resources:\n  - name: mystorage\n    type: Microsoft.Storage/storageAccounts\n";
        let doc = ArmDocument::parse(yaml).unwrap();
        assert_eq!(doc.resources.len(), 1);
        assert_eq!(doc.resources[0].name, "mystorage");
    }

    #[test]
    fn missing_required_field_is_an_error() {
        let bad = r#"{"resources": [{"type": "Microsoft.Storage/storageAccounts"}]}"#;
        let err = ArmDocument::parse(bad).unwrap_err();
        assert!(matches!(err, ImportError::MissingField("name")));
    }
}
