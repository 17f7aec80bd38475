use thiserror::Error;

#[derive(Debug, Error)]
pub enum BuildError {
    #[error("path not found: {0}")]
    PathNotFound(std::path::PathBuf),

    #[error("discovery failed: {0}")]
    Discovery(#[source] anyhow::Error),

    #[error("template build failed: {0}")]
    TemplateBuild(#[source] anyhow::Error),
}

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("file argument is required")]
    FileRequired,

    #[error("error reading file: {0}")]
    ReadFile(#[source] anyhow::Error),

    #[error("error parsing ARM template: {0}")]
    Parse(#[source] anyhow::Error),
}
