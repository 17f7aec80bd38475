use thiserror::Error;

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("error parsing ARM template: {0}")]
    Parse(String),

    #[error("ARM template resource is missing required field `{0}`")]
    MissingField(&'static str),
}
