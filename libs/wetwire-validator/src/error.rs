use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidatorError {
    #[error("duplicate resource name: {0}")]
    DuplicateResource(String),

    #[error("missing dependency: {missing:?} referenced by {resource}")]
    MissingDependency { resource: String, missing: Vec<String> },

    #[error("circular dependency: {0:?}")]
    CyclicDependency(Vec<String>),
}
