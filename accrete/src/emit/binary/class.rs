//! In-memory model of a compiled class and the snapshot taken from it.

use std::collections::BTreeSet;

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use super::descriptor::{parse_field_descriptor, parse_method_descriptor};
use crate::error::{AccreteResult, DescriptorError};
use crate::model::{
    CONSTRUCTOR_NAME, Declaration, DeclarationSet, FieldDecl, MemberSignature, TagUsage,
};
use crate::naming;
use crate::plan::{MemberBody, Visibility};

/// Name of the static initialiser, which never counts as a member.
const STATIC_INITIALIZER: &str = "<clinit>";

bitflags! {
    /// Class-file access flags for classes, fields, and methods.
    #[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct AccessFlags: u16 {
        /// Visible everywhere.
        const PUBLIC    = 0x0001;
        /// Visible inside the declaring class only.
        const PRIVATE   = 0x0002;
        /// Visible to subclasses and the package.
        const PROTECTED = 0x0004;
        /// Belongs to the class rather than an instance.
        const STATIC    = 0x0008;
        /// Cannot be reassigned or overridden.
        const FINAL     = 0x0010;
        /// Not present in source.
        const SYNTHETIC = 0x1000;
    }
}

impl AccessFlags {
    /// Flags for a generated member.
    #[must_use]
    pub const fn for_member(visibility: Visibility, is_static: bool) -> Self {
        let base = match visibility {
            Visibility::Public => Self::PUBLIC,
            Visibility::Private => Self::PRIVATE,
        };
        if is_static {
            base.union(Self::STATIC)
        } else {
            base
        }
    }
}

/// A field of a compiled class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompiledField {
    /// Field name.
    pub name: String,
    /// Field descriptor, such as `Ljava/lang/String;`.
    pub descriptor: String,
    /// Access flags.
    #[serde(default)]
    pub access: AccessFlags,
    /// Tags recovered from the field's annotations.
    #[serde(default)]
    pub tags: Vec<TagUsage>,
}

/// A method or constructor of a compiled class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompiledMethod {
    /// Method name; `<init>` for constructors.
    pub name: String,
    /// Method descriptor, such as `(I)V`.
    pub descriptor: String,
    /// Access flags.
    #[serde(default)]
    pub access: AccessFlags,
    /// Body recipe for generated methods; bytecode assembly is left to the
    /// host's class writer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<MemberBody>,
}

/// A compiled class as handed over by the host.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompiledClass {
    /// Internal name, such as `com/example/Person`.
    pub name: String,
    /// Internal name of the superclass.
    #[serde(default)]
    pub super_name: Option<String>,
    /// Access flags.
    #[serde(default)]
    pub access: AccessFlags,
    /// Declared fields.
    #[serde(default)]
    pub fields: Vec<CompiledField>,
    /// Declared methods and constructors.
    #[serde(default)]
    pub methods: Vec<CompiledMethod>,
    /// Tags recovered from the class annotations.
    #[serde(default)]
    pub tags: Vec<TagUsage>,
    /// Nested classes.
    #[serde(default)]
    pub nested: Vec<CompiledClass>,
}

impl CompiledClass {
    /// A public class with no members.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            access: AccessFlags::PUBLIC,
            ..Self::default()
        }
    }

    /// Parses a class from JSON.
    ///
    /// # Errors
    ///
    /// Returns [`crate::AccreteError::Json`] when `json` is not a valid
    /// class description.
    pub fn from_json(json: &str) -> AccreteResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Dotted name, such as `com.example.Person`.
    #[must_use]
    pub fn qualified_name(&self) -> String {
        self.name.replace('/', ".")
    }

    /// The method with `name` and `descriptor`, if declared.
    #[must_use]
    pub fn method(&self, name: &str, descriptor: &str) -> Option<&CompiledMethod> {
        self.methods
            .iter()
            .find(|m| m.name == name && m.descriptor == descriptor)
    }
}

/// Structural snapshot of a [`CompiledClass`], gathered in one pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassInfo {
    /// Dotted class name.
    pub name: String,
    /// Dotted superclass name.
    pub super_type: Option<String>,
    /// Fields with decoded types, in declaration order.
    pub fields: Vec<FieldDecl>,
    /// Signatures of declared methods, constructors, and nested classes.
    pub members: BTreeSet<MemberSignature>,
    /// Class tags.
    pub tags: Vec<TagUsage>,
}

impl ClassInfo {
    /// Records every field and member of `class`.
    ///
    /// # Errors
    ///
    /// Returns [`DescriptorError`] when a field or method descriptor is
    /// malformed.
    pub fn collect(class: &CompiledClass) -> Result<Self, DescriptorError> {
        let fields = class
            .fields
            .iter()
            .map(|field| {
                Ok(FieldDecl {
                    name: field.name.clone(),
                    declared_type: parse_field_descriptor(&field.descriptor)?,
                    is_final: field.access.contains(AccessFlags::FINAL),
                    is_static: field.access.contains(AccessFlags::STATIC),
                    is_private: field.access.contains(AccessFlags::PRIVATE),
                    tags: field.tags.clone(),
                })
            })
            .collect::<Result<Vec<_>, DescriptorError>>()?;

        let mut members = BTreeSet::new();
        for method in class.methods.iter().filter(|m| m.name != STATIC_INITIALIZER) {
            let (parameters, _) = parse_method_descriptor(&method.descriptor)?;
            members.insert(if method.name == CONSTRUCTOR_NAME {
                MemberSignature::constructor(parameters)
            } else {
                MemberSignature::method(&method.name, parameters)
            });
        }
        for nested in &class.nested {
            let qualified = nested.qualified_name();
            members.insert(MemberSignature::nested_type(naming::simple_name(&qualified)));
        }

        Ok(Self {
            name: class.qualified_name(),
            super_type: class.super_name.as_ref().map(|s| s.replace('/', ".")),
            fields,
            members,
            tags: class.tags.clone(),
        })
    }

    /// The snapshot as a host declaration.
    #[must_use]
    pub fn to_declaration(&self) -> Declaration {
        Declaration {
            name: self.name.clone(),
            super_type: self.super_type.clone(),
            fields: self.fields.clone(),
            members: self.members.iter().cloned().collect(),
            tags: self.tags.clone(),
            source: None,
        }
    }
}

/// Declarations for every class in `classes`, for resolving supertypes.
///
/// # Errors
///
/// Returns the first [`DescriptorError`] met while collecting.
pub fn class_path<'c>(
    classes: impl IntoIterator<Item = &'c CompiledClass>,
) -> Result<DeclarationSet, DescriptorError> {
    classes
        .into_iter()
        .map(|class| ClassInfo::collect(class).map(|info| info.to_declaration()))
        .collect()
}
