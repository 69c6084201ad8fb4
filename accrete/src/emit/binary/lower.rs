//! Turns emission plans into class-file additions.

use super::class::{AccessFlags, CompiledClass, CompiledField, CompiledMethod};
use super::descriptor::{field_descriptor, internal_name, method_descriptor};
use super::writer::MemberAddition;
use crate::error::DescriptorError;
use crate::model::{MemberKind, MemberSignature, TypeDescriptor};
use crate::naming::ROOT_TYPE;
use crate::plan::{EmissionPlan, NestedType, PlannedItem, PlannedMember};

/// Rewrites the simple names strategies use for the owner and its nested
/// types into names a descriptor can carry.
struct TypeResolver<'a> {
    owner: &'a str,
    owner_simple: &'a str,
    nested: Vec<&'a str>,
}

impl<'a> TypeResolver<'a> {
    fn new(owner: &'a TypeDescriptor, plan: &'a EmissionPlan) -> Self {
        Self {
            owner: owner.qualified_name(),
            owner_simple: owner.simple_name(),
            nested: plan
                .nested_types()
                .map(|n| n.name.as_str())
                .chain(
                    owner
                        .existing_members()
                        .iter()
                        .filter(|m| m.kind() == MemberKind::NestedType)
                        .map(MemberSignature::name),
                )
                .collect(),
        }
    }

    fn resolve(&self, type_name: &str) -> String {
        let trimmed = type_name.trim();
        let split = trimmed.find(['[', '<', '.']).unwrap_or(trimmed.len());
        let (base, rest) = trimmed.split_at(split);
        if base == self.owner_simple {
            format!("{}{rest}", self.owner)
        } else if self.nested.contains(&base) {
            format!("{}${base}{rest}", self.owner)
        } else {
            trimmed.to_owned()
        }
    }

    fn method(&self, member: &PlannedMember) -> Result<CompiledMethod, DescriptorError> {
        let return_type = member
            .return_type
            .as_deref()
            .map_or_else(|| "void".to_owned(), |ret| self.resolve(ret));
        let descriptor = method_descriptor(
            member.params.iter().map(|p| self.resolve(&p.declared_type)),
            &return_type,
        )?;
        Ok(CompiledMethod {
            name: member.name().to_owned(),
            descriptor,
            access: AccessFlags::for_member(member.visibility, member.is_static),
            code: Some(member.body.clone()),
        })
    }

    fn nested_class(&self, nested: &NestedType) -> Result<CompiledClass, DescriptorError> {
        let fields = nested
            .fields
            .iter()
            .map(|field| {
                Ok(CompiledField {
                    name: field.name.clone(),
                    descriptor: field_descriptor(&self.resolve(&field.declared_type))?,
                    access: AccessFlags::PRIVATE,
                    tags: Vec::new(),
                })
            })
            .collect::<Result<Vec<_>, DescriptorError>>()?;
        let methods = nested
            .members
            .iter()
            .map(|member| self.method(member))
            .collect::<Result<Vec<_>, DescriptorError>>()?;
        Ok(CompiledClass {
            name: internal_name(&format!("{}${}", self.owner, nested.name)),
            super_name: Some(internal_name(ROOT_TYPE)),
            access: AccessFlags::PUBLIC | AccessFlags::STATIC,
            fields,
            methods,
            tags: Vec::new(),
            nested: Vec::new(),
        })
    }
}

/// Lowers every item of `plan`, or nothing if any item cannot be encoded.
pub(super) fn lower(
    owner: &TypeDescriptor,
    plan: &EmissionPlan,
) -> Result<Vec<MemberAddition>, DescriptorError> {
    let resolver = TypeResolver::new(owner, plan);
    plan.items
        .iter()
        .map(|item| match item {
            PlannedItem::Member(member) => resolver.method(member).map(MemberAddition::Method),
            PlannedItem::Type(nested) => {
                resolver.nested_class(nested).map(MemberAddition::NestedClass)
            }
        })
        .collect()
}
