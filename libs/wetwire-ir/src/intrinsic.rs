//! ARM template intrinsic functions.
//!
//! A closed variant set describing the subset of ARM template functions
//! this toolchain understands. Each variant renders as the bracketed
//! string ARM expects at deployment time. `Concat` and `UniqueString`
//! intentionally collapse their arguments to `…` — see spec.md §9; full
//! fidelity is left for a caller that actually needs it.
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum Intrinsic {
    ResourceId {
        arm_type: String,
        name: String,
        segments: Vec<String>,
    },
    Reference {
        name: String,
        api_version: String,
        property: Option<String>,
    },
    Parameter {
        name: String,
    },
    Variable {
        name: String,
    },
    ResourceGroup {
        property: Option<String>,
    },
    Subscription {
        property: Option<String>,
    },
    Concat {
        values: Vec<String>,
    },
    UniqueString {
        values: Vec<String>,
    },
}

impl Intrinsic {
    /// Build the `[resourceId('<type>', '<name>')]` form used for
    /// `dependsOn` entries.
    pub fn resource_id(arm_type: impl Into<String>, name: impl Into<String>) -> Self {
        Intrinsic::ResourceId {
            arm_type: arm_type.into(),
            name: name.into(),
            segments: Vec::new(),
        }
    }

    /// The bracketed ARM expression string for this intrinsic.
    pub fn expression(&self) -> String {
        match self {
            Intrinsic::ResourceId {
                arm_type,
                name,
                segments,
            } => {
                let mut args = vec![quote(arm_type), quote(name)];
                args.extend(segments.iter().map(|s| quote(s)));
                format!("[resourceId({})]", args.join(", "))
            }
            Intrinsic::Reference {
                name,
                api_version,
                property,
            } => {
                let base = format!("reference({}, {})", quote(name), quote(api_version));
                match property {
                    Some(p) => format!("[{base}.{p}]"),
                    None => format!("[{base}]"),
                }
            }
            Intrinsic::Parameter { name } => format!("[parameters({})]", quote(name)),
            Intrinsic::Variable { name } => format!("[variables({})]", quote(name)),
            Intrinsic::ResourceGroup { property } => match property {
                Some(p) => format!("[resourceGroup().{p}]"),
                None => "[resourceGroup()]".to_string(),
            },
            Intrinsic::Subscription { property } => match property {
                Some(p) => format!("[subscription().{p}]"),
                None => "[subscription()]".to_string(),
            },
            Intrinsic::Concat { .. } => "[concat(…)]".to_string(),
            Intrinsic::UniqueString { .. } => "[uniqueString(…)]".to_string(),
        }
    }
}

impl fmt::Display for Intrinsic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.expression())
    }
}

fn quote(s: &str) -> String {
    format!("'{}'", s)
}
