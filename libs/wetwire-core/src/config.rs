//! Plain configuration structs, constructed directly by callers
//! (spec.md §4.10 — no env/file configuration layer exists in scope).

use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct BuildConfig {
    pub root: PathBuf,
    pub default_location_expression: String,
    pub default_api_version: String,
}

impl BuildConfig {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            default_location_expression: "[resourceGroup().location]".to_string(),
            default_api_version: wetwire_catalog::DEFAULT_API_VERSION.to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ImportConfig {
    pub file: PathBuf,
    pub package: String,
}

impl ImportConfig {
    pub fn new(file: impl Into<PathBuf>) -> Self {
        Self {
            file: file.into(),
            package: "infra".to_string(),
        }
    }
}
