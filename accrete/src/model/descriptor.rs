//! Immutable structural descriptions consumed by the strategies.

use std::collections::BTreeSet;
use std::sync::Arc;

use super::{MemberSignature, TagUsage, field_tags};
use crate::naming;

/// A non-static field visible on a type, own or inherited.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    /// Field name.
    pub name: String,
    /// Declared type as written.
    pub declared_type: String,
    /// Whether the field is final.
    pub is_final: bool,
    /// Always `false`: static fields never reach a descriptor.
    pub is_static: bool,
    /// Whether the field is private.
    pub is_private: bool,
    /// Tags attached to the field.
    pub tags: Vec<TagUsage>,
    /// Qualified name of the type that declares the field.
    pub declared_in: String,
}

impl FieldDescriptor {
    /// The tag called `name`, if attached.
    #[must_use]
    pub fn tag(&self, name: &str) -> Option<&TagUsage> {
        self.tags.iter().find(|tag| tag.is(name))
    }

    /// Whether any of `names` is attached.
    #[must_use]
    pub fn has_any_tag(&self, names: &[&str]) -> bool {
        names.iter().any(|name| self.tag(name).is_some())
    }

    /// Whether the field is explicitly marked non-null.
    #[must_use]
    pub fn is_non_null(&self) -> bool {
        self.has_any_tag(&field_tags::NON_NULL)
    }

    /// Whether the field belongs to the required-arguments subset.
    #[must_use]
    pub fn is_required(&self) -> bool {
        self.is_final || self.is_non_null()
    }

    /// Whether generated code should reject `null` for this field.
    #[must_use]
    pub fn needs_null_check(&self) -> bool {
        self.is_non_null() && !naming::is_primitive_like(&self.declared_type)
    }

    /// Whether the field has opted out of the equality triad.
    #[must_use]
    pub fn is_excluded_from_equality(&self) -> bool {
        self.has_any_tag(&field_tags::EXCLUDE)
    }

    /// Initialiser expression from a `Builder.Default(value = ...)` tag.
    #[must_use]
    pub fn builder_default(&self) -> Option<&str> {
        self.tag(field_tags::BUILDER_DEFAULT)
            .and_then(|tag| tag.string("value").ok().flatten())
    }

    /// Reader name for this field.
    #[must_use]
    pub fn accessor_name(&self) -> String {
        naming::accessor_name(&self.name, &self.declared_type)
    }

    /// Mutator name for this field.
    #[must_use]
    pub fn mutator_name(&self) -> String {
        naming::mutator_name(&self.name)
    }
}

/// Immutable description of one type under synthesis.
///
/// Built by [`TypeModelBuilder`](super::TypeModelBuilder) once per type per
/// round. Fields are ordered with the type's own fields first, followed by
/// each ancestor's in turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDescriptor {
    pub(super) qualified_name: String,
    pub(super) super_type: Option<Arc<TypeDescriptor>>,
    pub(super) fields: Vec<FieldDescriptor>,
    pub(super) existing_members: BTreeSet<MemberSignature>,
    pub(super) tags: Vec<TagUsage>,
}

impl TypeDescriptor {
    /// Qualified type name.
    #[must_use]
    pub fn qualified_name(&self) -> &str {
        &self.qualified_name
    }

    /// Simple type name.
    #[must_use]
    pub fn simple_name(&self) -> &str {
        naming::simple_name(&self.qualified_name)
    }

    /// Descriptor of the resolved supertype, if any.
    #[must_use]
    pub fn super_type(&self) -> Option<&Self> {
        self.super_type.as_deref()
    }

    /// Every visible non-static field, own fields first.
    #[must_use]
    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    /// Members already declared on the type.
    #[must_use]
    pub const fn existing_members(&self) -> &BTreeSet<MemberSignature> {
        &self.existing_members
    }

    /// Tags attached to the type.
    #[must_use]
    pub fn tags(&self) -> &[TagUsage] {
        &self.tags
    }

    /// Whether `signature` is already declared.
    #[must_use]
    pub fn has_member(&self, signature: &MemberSignature) -> bool {
        self.existing_members.contains(signature)
    }

    /// Fields whose names are not in `names`, in order.
    #[must_use]
    pub fn fields_excluding(&self, names: &[&str]) -> Vec<&FieldDescriptor> {
        self.fields
            .iter()
            .filter(|field| !names.contains(&field.name.as_str()))
            .collect()
    }

    /// Fields that are final or explicitly marked required, in order.
    #[must_use]
    pub fn required_fields(&self) -> Vec<&FieldDescriptor> {
        self.fields.iter().filter(|f| f.is_required()).collect()
    }

    /// The visible field called `name`.
    #[must_use]
    pub fn field_named(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|field| field.name == name)
    }

    /// Whether a zero-parameter constructor is already declared.
    #[must_use]
    pub fn has_default_constructor(&self) -> bool {
        self.existing_members
            .iter()
            .any(MemberSignature::is_default_constructor)
    }

    /// A copy of this descriptor in which every field is final.
    #[must_use]
    pub fn with_all_fields_final(&self) -> Self {
        let mut immutable = self.clone();
        for field in &mut immutable.fields {
            field.is_final = true;
        }
        immutable
    }
}
