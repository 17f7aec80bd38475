//! Serializer: turns the Resource IR into canonical ARM JSON (spec.md
//! §4.3, §4.4).
//!
//! [`json`] converts a single parsed literal to `serde_json::Value`,
//! recognizing intrinsic calls and applying the `omitempty` rule.
//! [`template`] assembles the ordered per-resource output into a full
//! [`wetwire_ir::ArmTemplate`] and renders it to text.

mod error;
mod intrinsics;
mod json;
mod template;

pub use error::SerializerError;
pub use json::{non_zero_value, to_json_value};
pub use template::{emit, TemplateBuilder};
