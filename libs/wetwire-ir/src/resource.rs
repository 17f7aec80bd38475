//! The normalized unit passed between Discovery, the Validator, and the
//! Serializer.

use std::path::PathBuf;

/// A discovered top-level resource binding.
///
/// `typed_value` is exclusively owned by this entry; Discovery hands it
/// off once and nothing else retains a reference to the same literal.
#[derive(Debug, Clone)]
pub struct DiscoveredResource {
    /// Binding identifier in source. Unique within a build.
    pub name: String,
    /// Canonical ARM type string, e.g. `Microsoft.Storage/storageAccounts`.
    pub arm_type: String,
    /// Absolute path of the file the binding was found in.
    pub origin_file: PathBuf,
    /// 1-based line number of the binding.
    pub origin_line: u32,
    /// Ordered-set of other resource names this binding's initializer
    /// references. Deduplicated; never contains `name` itself.
    pub dependencies: Vec<String>,
    /// The original composite-literal initializer, retained for
    /// serialization.
    pub typed_value: TypedValue,
}

impl DiscoveredResource {
    pub fn new(
        name: impl Into<String>,
        arm_type: impl Into<String>,
        origin_file: PathBuf,
        origin_line: u32,
        dependencies: Vec<String>,
        typed_value: TypedValue,
    ) -> Self {
        Self {
            name: name.into(),
            arm_type: arm_type.into(),
            origin_file,
            origin_line,
            dependencies,
            typed_value,
        }
    }
}

/// Opaque handle around the parsed Go initializer expression.
///
/// The core has no access to the real Go type system, so rather than
/// reflect over runtime struct fields (as a language with reflection
/// would), the Serializer walks this parsed literal tree directly. See
/// `DESIGN.md` for why this stands in for the spec's "typed resource
/// value".
#[derive(Debug, Clone)]
pub struct TypedValue(pub GoLiteral);

impl TypedValue {
    pub fn new(literal: GoLiteral) -> Self {
        Self(literal)
    }

    pub fn literal(&self) -> &GoLiteral {
        &self.0
    }
}

/// A parsed Go expression, restricted to the literal/initializer forms
/// Discovery needs to understand: composite literals, calls (used to
/// recognize intrinsic functions), and scalars.
#[derive(Debug, Clone, PartialEq)]
pub enum GoLiteral {
    String(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    Nil,
    /// A bare identifier reference, e.g. another resource's variable name.
    Ident(String),
    /// `pkg.Type{Field: value, ...}` or `Type{...}`.
    Composite {
        type_name: Option<String>,
        fields: Vec<(String, GoLiteral)>,
    },
    /// `[]T{...}` or an array/slice literal.
    Slice(Vec<GoLiteral>),
    /// `map[K]V{...}`.
    Map(Vec<(GoLiteral, GoLiteral)>),
    /// A function/method call, e.g. `resources.ResourceID(...)`.
    Call { callee: String, args: Vec<GoLiteral> },
    /// `&x`, `*x`, or a parenthesized expression — transparently
    /// unwrapped by the Serializer.
    Indirect(Box<GoLiteral>),
}

impl GoLiteral {
    /// Unwrap address-of/dereference/paren chains down to the innermost
    /// value.
    pub fn unwrap_indirect(&self) -> &GoLiteral {
        let mut current = self;
        while let GoLiteral::Indirect(inner) = current {
            current = inner;
        }
        current
    }

    /// Whether this literal is the Go zero value for its apparent shape
    /// (used by the `omitempty` rule).
    pub fn is_zero(&self) -> bool {
        match self.unwrap_indirect() {
            GoLiteral::String(s) => s.is_empty(),
            GoLiteral::Int(n) => *n == 0,
            GoLiteral::Float(f) => *f == 0.0,
            GoLiteral::Bool(b) => !b,
            GoLiteral::Nil => true,
            GoLiteral::Ident(_) => false,
            GoLiteral::Composite { fields, .. } => fields.iter().all(|(_, v)| v.is_zero()),
            GoLiteral::Slice(items) => items.is_empty(),
            GoLiteral::Map(entries) => entries.is_empty(),
            GoLiteral::Call { .. } => false,
            GoLiteral::Indirect(_) => unreachable!("unwrapped above"),
        }
    }
}
