//! Member signatures used for collision checks.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::naming::erased_type_name;

/// Name under which constructors are recorded.
pub const CONSTRUCTOR_NAME: &str = "<init>";

/// What sort of member a [`MemberSignature`] identifies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MemberKind {
    /// An instance constructor.
    Constructor,
    /// A method, static or instance.
    Method,
    /// A nested type declaration.
    NestedType,
}

/// Identity of a member for "already exists" checks.
///
/// Parameter types are stored erased (see [`erased_type_name`]) so that a
/// signature declared in source and one recovered from a compiled descriptor
/// compare equal.
///
/// # Examples
///
/// ```
/// use accrete::model::MemberSignature;
///
/// let declared = MemberSignature::method("put", ["java.util.List<String>", "int"]);
/// let compiled = MemberSignature::method("put", ["List", "int"]);
/// assert_eq!(declared, compiled);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "SignatureRepr")]
pub struct MemberSignature {
    kind: MemberKind,
    name: String,
    parameter_types: Vec<String>,
}

#[derive(Deserialize)]
struct SignatureRepr {
    kind: MemberKind,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    parameter_types: Vec<String>,
}

impl From<SignatureRepr> for MemberSignature {
    fn from(repr: SignatureRepr) -> Self {
        let name = match repr.kind {
            MemberKind::Constructor => CONSTRUCTOR_NAME.to_owned(),
            MemberKind::Method | MemberKind::NestedType => repr.name.unwrap_or_default(),
        };
        Self::new(repr.kind, name, repr.parameter_types)
    }
}

impl MemberSignature {
    /// Creates a signature, erasing the parameter types.
    #[must_use]
    pub fn new<I, S>(kind: MemberKind, name: impl Into<String>, parameter_types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            kind,
            name: name.into(),
            parameter_types: parameter_types
                .into_iter()
                .map(|ty| erased_type_name(ty.as_ref()))
                .collect(),
        }
    }

    /// Signature of a constructor taking `parameter_types`.
    #[must_use]
    pub fn constructor<I, S>(parameter_types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::new(MemberKind::Constructor, CONSTRUCTOR_NAME, parameter_types)
    }

    /// Signature of a method.
    #[must_use]
    pub fn method<I, S>(name: impl Into<String>, parameter_types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::new(MemberKind::Method, name, parameter_types)
    }

    /// Signature of a nested type.
    #[must_use]
    pub fn nested_type(name: impl Into<String>) -> Self {
        Self::new(MemberKind::NestedType, name, std::iter::empty::<&str>())
    }

    /// Member kind.
    #[must_use]
    pub const fn kind(&self) -> MemberKind {
        self.kind
    }

    /// Member name; `<init>` for constructors.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Erased parameter types in order.
    #[must_use]
    pub fn parameter_types(&self) -> &[String] {
        &self.parameter_types
    }

    /// Whether this is a constructor without parameters.
    #[must_use]
    pub fn is_default_constructor(&self) -> bool {
        self.kind == MemberKind::Constructor && self.parameter_types.is_empty()
    }
}

impl fmt::Display for MemberSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            MemberKind::NestedType => return write!(f, "class {}", self.name),
            MemberKind::Constructor => f.write_str("constructor")?,
            MemberKind::Method => f.write_str(&self.name)?,
        }
        write!(f, "({})", self.parameter_types.join(", "))
    }
}
