//! Back-end neutral description of the members a strategy wants to add.
//!
//! A strategy never writes text or bytes. It describes each member as a
//! [`PlannedMember`]: a signature plus a [`MemberBody`] recipe. The source
//! emitter renders recipes as text and the binary emitter lowers them into
//! class-file additions, so both back-ends agree on what was synthesised.

mod context;

pub use context::{EmissionContext, PlanBuilder};

use serde::{Deserialize, Serialize};

use crate::model::{FieldDescriptor, MemberKind, MemberSignature};

/// Visibility of a generated member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    /// Visible everywhere.
    Public,
    /// Visible only inside the declaring type.
    Private,
}

/// A formal parameter of a generated member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Param {
    /// Parameter name.
    pub name: String,
    /// Parameter type as it should be written.
    pub declared_type: String,
}

impl Param {
    /// Creates a parameter.
    #[must_use]
    pub fn new(name: impl Into<String>, declared_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            declared_type: declared_type.into(),
        }
    }
}

impl From<&FieldDescriptor> for Param {
    fn from(field: &FieldDescriptor) -> Self {
        Self::new(&field.name, &field.declared_type)
    }
}

/// A field referenced by a body recipe, with the type needed to pick the
/// right comparison or hashing form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldRef {
    /// Field name.
    pub name: String,
    /// Declared type of the field.
    pub declared_type: String,
}

impl From<&FieldDescriptor> for FieldRef {
    fn from(field: &FieldDescriptor) -> Self {
        Self {
            name: field.name.clone(),
            declared_type: field.declared_type.clone(),
        }
    }
}

/// Value assigned to a field by a generated constructor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InitValue {
    /// The constructor parameter with the field's name.
    Param,
    /// A literal expression such as `0L` or `null`.
    Literal(String),
}

/// One field assignment inside a generated constructor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldInit {
    /// Assigned field.
    pub field: String,
    /// Assigned value.
    pub value: InitValue,
}

impl FieldInit {
    /// Assigns the same-named parameter to `field`.
    #[must_use]
    pub fn param(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            value: InitValue::Param,
        }
    }

    /// Assigns `literal` to `field`.
    #[must_use]
    pub fn literal(field: impl Into<String>, literal: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            value: InitValue::Literal(literal.into()),
        }
    }
}

/// How a conversion method turns its source field into the target type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Conversion {
    /// String rendering of the field.
    Text,
    /// Primitive widening or narrowing cast.
    Numeric,
}

/// What a generated member does, independent of how it is encoded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "recipe", rename_all = "snake_case")]
pub enum MemberBody {
    /// Rejects `null` for `null_checks`, then performs `assignments`.
    Init {
        /// Parameters that must not be `null`, in parameter order.
        null_checks: Vec<String>,
        /// Field assignments in declaration order.
        assignments: Vec<FieldInit>,
    },
    /// Returns the field.
    Getter {
        /// Field read.
        field: String,
    },
    /// Assigns the parameter to the field.
    Setter {
        /// Field written.
        field: String,
        /// Whether `null` is rejected first.
        null_check: bool,
    },
    /// Value equality over `fields`.
    Equals {
        /// Simple name of the compared type.
        type_name: String,
        /// Compared fields.
        fields: Vec<FieldRef>,
    },
    /// Hash over `fields`, consistent with [`MemberBody::Equals`].
    HashCode {
        /// Hashed fields.
        fields: Vec<FieldRef>,
    },
    /// `Type(f1=v1, f2=v2)` rendering.
    ToString {
        /// Simple name used as the prefix.
        type_name: String,
        /// Rendered fields.
        fields: Vec<FieldRef>,
    },
    /// Forwards its parameters to a constructor of `type_name`.
    StaticFactory {
        /// Simple name of the instantiated type.
        type_name: String,
        /// Forwarded parameter names.
        arguments: Vec<String>,
    },
    /// Returns a fresh builder instance.
    BuilderFactory {
        /// Simple name of the builder type.
        builder: String,
    },
    /// Stores the parameter in the builder field and returns the builder.
    FluentSetter {
        /// Builder field written.
        field: String,
    },
    /// Calls the all-arguments constructor with every builder field.
    Build {
        /// Simple name of the built type.
        type_name: String,
        /// Builder fields passed in constructor order.
        arguments: Vec<String>,
    },
    /// Instantiates through the no-argument constructor, then copies fields.
    Copy {
        /// Simple name of the copied type.
        type_name: String,
        /// Copied fields.
        fields: Vec<String>,
    },
    /// Returns `field` converted to `target`.
    Convert {
        /// Source field.
        field: String,
        /// Target type.
        target: String,
        /// Conversion applied.
        conversion: Conversion,
    },
}

/// A constructor or method scheduled for emission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlannedMember {
    /// Identity used for collision checks.
    pub signature: MemberSignature,
    /// Member visibility.
    pub visibility: Visibility,
    /// Whether the member is static.
    pub is_static: bool,
    /// Whether the member overrides an inherited method.
    pub overrides: bool,
    /// Declared return type; `None` for constructors.
    pub return_type: Option<String>,
    /// Formal parameters.
    pub params: Vec<Param>,
    /// Body recipe.
    pub body: MemberBody,
}

impl PlannedMember {
    /// A constructor taking `params`.
    #[must_use]
    pub fn constructor(visibility: Visibility, params: Vec<Param>, body: MemberBody) -> Self {
        Self {
            signature: MemberSignature::constructor(params.iter().map(|p| &p.declared_type)),
            visibility,
            is_static: false,
            overrides: false,
            return_type: None,
            params,
            body,
        }
    }

    /// A public instance method.
    #[must_use]
    pub fn method(
        name: impl Into<String>,
        return_type: impl Into<String>,
        params: Vec<Param>,
        body: MemberBody,
    ) -> Self {
        Self {
            signature: MemberSignature::method(name, params.iter().map(|p| &p.declared_type)),
            visibility: Visibility::Public,
            is_static: false,
            overrides: false,
            return_type: Some(return_type.into()),
            params,
            body,
        }
    }

    /// Marks the member static.
    #[must_use]
    pub const fn into_static(mut self) -> Self {
        self.is_static = true;
        self
    }

    /// Marks the member as overriding an inherited method.
    #[must_use]
    pub const fn overriding(mut self) -> Self {
        self.overrides = true;
        self
    }

    /// Whether this member is a constructor.
    #[must_use]
    pub fn is_constructor(&self) -> bool {
        self.signature.kind() == MemberKind::Constructor
    }

    /// Member name; the constructor marker for constructors.
    #[must_use]
    pub fn name(&self) -> &str {
        self.signature.name()
    }
}

/// A field of a generated nested type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NestedField {
    /// Field name.
    pub name: String,
    /// Declared type.
    pub declared_type: String,
    /// Initialiser expression.
    pub initializer: String,
}

/// A static nested type scheduled for emission, such as a builder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NestedType {
    /// Simple name of the nested type.
    pub name: String,
    /// Private fields in declaration order.
    pub fields: Vec<NestedField>,
    /// Members of the nested type.
    pub members: Vec<PlannedMember>,
}

impl NestedType {
    /// Identity used for collision checks on the enclosing type.
    #[must_use]
    pub fn signature(&self) -> MemberSignature {
        MemberSignature::nested_type(&self.name)
    }
}

/// One entry of an [`EmissionPlan`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "item", rename_all = "snake_case")]
pub enum PlannedItem {
    /// A constructor or method.
    Member(PlannedMember),
    /// A nested type.
    Type(NestedType),
}

impl PlannedItem {
    /// Identity used for collision checks.
    #[must_use]
    pub fn signature(&self) -> MemberSignature {
        match self {
            Self::Member(member) => member.signature.clone(),
            Self::Type(nested) => nested.signature(),
        }
    }
}

/// The ordered members one strategy adds to one type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmissionPlan {
    /// Strategy tag that produced the plan.
    pub tag: String,
    /// Items in emission order.
    pub items: Vec<PlannedItem>,
}

impl EmissionPlan {
    /// An empty plan attributed to `tag`.
    #[must_use]
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            items: Vec::new(),
        }
    }

    /// Whether the plan adds nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of planned items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Signatures of every planned item, in order.
    pub fn signatures(&self) -> impl Iterator<Item = MemberSignature> + '_ {
        self.items.iter().map(PlannedItem::signature)
    }

    /// Planned constructors and methods, skipping nested types.
    pub fn members(&self) -> impl Iterator<Item = &PlannedMember> {
        self.items.iter().filter_map(|item| match item {
            PlannedItem::Member(member) => Some(member),
            PlannedItem::Type(_) => None,
        })
    }

    /// Planned nested types.
    pub fn nested_types(&self) -> impl Iterator<Item = &NestedType> {
        self.items.iter().filter_map(|item| match item {
            PlannedItem::Type(nested) => Some(nested),
            PlannedItem::Member(_) => None,
        })
    }
}
