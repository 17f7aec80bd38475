use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SerializerError {
    #[error("resource {0} initializer is not a composite literal")]
    NotAComposite(String),
}
