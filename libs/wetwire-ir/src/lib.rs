//! Shared intermediate representation for the wetwire-azure toolchain.
//!
//! [`resource`] holds the Resource IR passed between Discovery, the
//! Validator, and the Serializer. [`intrinsic`] models ARM template
//! functions as a closed variant set. [`template`] models the external
//! ARM JSON document shapes.

pub mod intrinsic;
pub mod resource;
pub mod template;

pub use intrinsic::Intrinsic;
pub use resource::{DiscoveredResource, GoLiteral, TypedValue};
pub use template::{ArmResource, ArmTemplate};
