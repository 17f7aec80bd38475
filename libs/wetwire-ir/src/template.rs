//! External, serialized ARM template document shapes (spec.md §3, §6.2).

use serde::{Serialize, Serializer};
use serde_json::{Map, Value};

pub const ARM_SCHEMA: &str =
    "https://schema.management.azure.com/schemas/2019-04-01/deploymentTemplate.json#";
pub const CONTENT_VERSION: &str = "1.0.0.0";

/// Top-level ARM template document. Field order is fixed and is not
/// derived from struct declaration order alone — `parameters`,
/// `variables`, and `outputs` are serialized as empty objects (not
/// omitted) even when empty, per spec.md §6.2.
#[derive(Debug, Clone)]
pub struct ArmTemplate {
    pub parameters: Map<String, Value>,
    pub variables: Map<String, Value>,
    pub resources: Vec<ArmResource>,
    pub outputs: Map<String, Value>,
}

impl ArmTemplate {
    pub fn new(resources: Vec<ArmResource>) -> Self {
        Self {
            parameters: Map::new(),
            variables: Map::new(),
            resources,
            outputs: Map::new(),
        }
    }
}

impl Serialize for ArmTemplate {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        use serde::ser::SerializeMap;
        let mut map = serializer.serialize_map(Some(6))?;
        map.serialize_entry("$schema", ARM_SCHEMA)?;
        map.serialize_entry("contentVersion", CONTENT_VERSION)?;
        map.serialize_entry("parameters", &self.parameters)?;
        map.serialize_entry("variables", &self.variables)?;
        map.serialize_entry("resources", &self.resources)?;
        map.serialize_entry("outputs", &self.outputs)?;
        map.end()
    }
}

/// A single ARM resource entry. Field order matches spec.md §3:
/// `name, type, apiVersion, location, dependsOn?, sku?, kind?, tags?,
/// identity?, zones?, plan?, properties?`. Omitted fields are dropped
/// entirely, never emitted as `null`.
#[derive(Debug, Clone)]
pub struct ArmResource {
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

impl ArmResource {
    pub fn new(
        name: impl Into<String>,
        arm_type: impl Into<String>,
        api_version: impl Into<String>,
        location: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            arm_type: arm_type.into(),
            api_version: api_version.into(),
            location: location.into(),
            depends_on: Vec::new(),
            sku: None,
            kind: None,
            tags: None,
            identity: None,
            zones: None,
            plan: None,
            properties: None,
        }
    }
}

impl Serialize for ArmResource {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        use serde::ser::SerializeMap;
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("name", &self.name)?;
        map.serialize_entry("type", &self.arm_type)?;
        map.serialize_entry("apiVersion", &self.api_version)?;
        map.serialize_entry("location", &self.location)?;
        if !self.depends_on.is_empty() {
            map.serialize_entry("dependsOn", &self.depends_on)?;
        }
        for (key, value) in [
            ("sku", &self.sku),
            ("kind", &self.kind),
            ("tags", &self.tags),
            ("identity", &self.identity),
            ("zones", &self.zones),
            ("plan", &self.plan),
            ("properties", &self.properties),
        ] {
            if let Some(v) = value {
                map.serialize_entry(key, v)?;
            }
        }
        map.end()
    }
}
