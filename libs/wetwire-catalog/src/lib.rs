//! Process-wide, immutable Resource Type Catalog and bidirectional
//! acronym-aware Name Transformer shared by Discovery, the Serializer,
//! and Import.

pub mod catalog;
pub mod name;

pub use catalog::{Catalog, CatalogEntry, DEFAULT_API_VERSION, RESOURCES_MODULE_MARKER};
pub use name::NameTransformer;
