//! Orchestrates Discovery, the Validator, the Serializer, and Import
//! behind the two top-level operations the external tool-protocol
//! layer calls (spec.md §6.1): [`build`] and [`import`].

mod config;
mod error;

use tracing::info;

pub use config::{BuildConfig, ImportConfig};
pub use error::{BuildError, ImportError};

use wetwire_catalog::{Catalog, NameTransformer};
use wetwire_discovery::Discoverer;
use wetwire_import::{ArmDocument, CodeGenerator};
use wetwire_serializer::{emit, TemplateBuilder};
use wetwire_validator::{validate, DependencyMode};

/// Outcome of [`build`]. An empty discovery is not an error (spec.md
/// §7, `EmptyBuild`) so it gets its own variant rather than `Ok(None)`.
#[derive(Debug)]
pub enum BuildOutcome {
    Empty,
    Built { resource_count: usize, json: String },
}

impl BuildOutcome {
    /// The exact external-facing message text (spec.md §6.1).
    pub fn message(&self) -> String {
        match self {
            BuildOutcome::Empty => "No Azure resources found in the specified path.".to_string(),
            BuildOutcome::Built { resource_count, json } => {
                format!("Successfully built ARM template with {resource_count} resource(s):\n\n{json}")
            }
        }
    }
}

pub fn build(config: &BuildConfig) -> Result<BuildOutcome, BuildError> {
    if !config.root.exists() {
        return Err(BuildError::PathNotFound(config.root.clone()));
    }

    let catalog = Catalog::new();
    let discoverer = Discoverer::new(catalog);
    let discovered = discoverer
        .discover(&config.root)
        .map_err(|e| BuildError::Discovery(e.into()))?;

    if discovered.is_empty() {
        return Ok(BuildOutcome::Empty);
    }
    info!(count = discovered.len(), "resources discovered");

    let ordered = validate(discovered, DependencyMode::Lenient)
        .map_err(|e| BuildError::TemplateBuild(e.into()))?;

    let builder = TemplateBuilder::with_defaults(
        Catalog::new(),
        NameTransformer::new(),
        config.default_location_expression.clone(),
        config.default_api_version.clone(),
    );
    let template = builder
        .build(&ordered)
        .map_err(|e| BuildError::TemplateBuild(e.into()))?;

    let json = emit(&template).map_err(|e| BuildError::TemplateBuild(e.into()))?;

    Ok(BuildOutcome::Built {
        resource_count: template.resources.len(),
        json,
    })
}

#[derive(Debug)]
pub struct ImportOutcome {
    pub resource_count: usize,
    pub source: String,
}

impl ImportOutcome {
    pub fn message(&self) -> String {
        format!(
            "Successfully imported ARM template with {} resource(s):\n\n{}",
            self.resource_count, self.source
        )
    }
}

pub fn import(config: &ImportConfig) -> Result<ImportOutcome, ImportError> {
    if config.file.as_os_str().is_empty() {
        return Err(ImportError::FileRequired);
    }

    let text = std::fs::read_to_string(&config.file).map_err(|e| ImportError::ReadFile(e.into()))?;

    let document = ArmDocument::parse(&text).map_err(|e| ImportError::Parse(e.into()))?;

    let generator = CodeGenerator::new(Catalog::new(), NameTransformer::new());
    let source = generator.generate(&document, &config.package);

    Ok(ImportOutcome {
        resource_count: document.resources.len(),
        source,
    })
}
