//! Import: parses ARM JSON/YAML and regenerates equivalent source
//! declarations, inverting Discovery and the Serializer (spec.md §4.5,
//! §4.6).

mod codegen;
mod error;
mod parser;

pub use codegen::CodeGenerator;
pub use error::ImportError;
pub use parser::{ArmDocument, ImportedResource};
