//! Recognizes calls into the shared `resources` helper package as
//! [`Intrinsic`] ARM expressions (spec.md §3). Intrinsic detection
//! precedes all other serialization rules (§4.3 rule 1).
//!
//! The helper surface is modeled as plain functions (`resources.Param
//! ("foo")`) rather than zero-arg-call-plus-selector chains
//! (`resources.ResourceGroup().Location`) — the filtered
//! `original_source/` pack kept no Go files to confirm the real call
//! shape, so this is the simpler, still-faithful surface. See
//! DESIGN.md.

use wetwire_ir::{GoLiteral, Intrinsic};

pub fn recognize(callee: &str, args: &[GoLiteral]) -> Option<Intrinsic> {
    match callee {
        "resources.ResourceID" => {
            let ty = string_arg(args, 0)?;
            let name = string_arg(args, 1)?;
            let segments = args.iter().skip(2).filter_map(as_string).collect();
            Some(Intrinsic::ResourceId {
                arm_type: ty,
                name,
                segments,
            })
        }
        "resources.Reference" => {
            let name = string_arg(args, 0)?;
            let api_version = string_arg(args, 1)?;
            let property = args.get(2).and_then(as_string);
            Some(Intrinsic::Reference {
                name,
                api_version,
                property,
            })
        }
        "resources.Param" => Some(Intrinsic::Parameter {
            name: string_arg(args, 0)?,
        }),
        "resources.Var" => Some(Intrinsic::Variable {
            name: string_arg(args, 0)?,
        }),
        "resources.ResourceGroup" => Some(Intrinsic::ResourceGroup {
            property: args.first().and_then(as_string),
        }),
        "resources.Subscription" => Some(Intrinsic::Subscription {
            property: args.first().and_then(as_string),
        }),
        "resources.Concat" => Some(Intrinsic::Concat {
            values: args.iter().filter_map(as_string).collect(),
        }),
        "resources.UniqueString" => Some(Intrinsic::UniqueString {
            values: args.iter().filter_map(as_string).collect(),
        }),
        _ => None,
    }
}

fn string_arg(args: &[GoLiteral], index: usize) -> Option<String> {
    args.get(index).and_then(as_string)
}

fn as_string(lit: &GoLiteral) -> Option<String> {
    match lit.unwrap_indirect() {
        GoLiteral::String(s) => Some(s.clone()),
        _ => None,
    }
}
