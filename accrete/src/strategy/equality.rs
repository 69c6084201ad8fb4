//! `equals`, `hashCode`, and `toString` over a shared field selection.

use crate::error::HandlerError;
use crate::model::{FieldDescriptor, TagUsage, TypeDescriptor};
use crate::plan::{FieldRef, MemberBody, Param, PlanBuilder, PlannedMember};

pub(super) fn triad(
    descriptor: &TypeDescriptor,
    usage: &TagUsage,
    plan: &mut PlanBuilder<'_>,
) -> Result<(), HandlerError> {
    let fields: Vec<FieldRef> = selected_fields(descriptor, usage)?
        .into_iter()
        .map(FieldRef::from)
        .collect();
    let type_name = descriptor.simple_name().to_owned();

    plan.add(
        PlannedMember::method(
            "equals",
            "boolean",
            vec![Param::new("o", "Object")],
            MemberBody::Equals {
                type_name: type_name.clone(),
                fields: fields.clone(),
            },
        )
        .overriding(),
    );
    plan.add(
        PlannedMember::method(
            "hashCode",
            "int",
            Vec::new(),
            MemberBody::HashCode {
                fields: fields.clone(),
            },
        )
        .overriding(),
    );
    plan.add(
        PlannedMember::method(
            "toString",
            "String",
            Vec::new(),
            MemberBody::ToString { type_name, fields },
        )
        .overriding(),
    );
    Ok(())
}

/// Fields taking part in equality, in descriptor order.
///
/// An explicit `include` list wins over field-level exclusion tags; the
/// `exclude` parameter always applies.
fn selected_fields<'d>(
    descriptor: &'d TypeDescriptor,
    usage: &TagUsage,
) -> Result<Vec<&'d FieldDescriptor>, HandlerError> {
    let include = usage.string_list("include")?;
    let exclude = usage.string_list("exclude")?.unwrap_or_default();
    if let Some(unknown) = include
        .iter()
        .flatten()
        .chain(&exclude)
        .find(|name| descriptor.field_named(name).is_none())
    {
        return Err(HandlerError::unknown_field(&usage.name, unknown));
    }

    let excluded: Vec<&str> = exclude.iter().map(String::as_str).collect();
    Ok(descriptor
        .fields_excluding(&excluded)
        .into_iter()
        .filter(|field| {
            include.as_ref().map_or_else(
                || !field.is_excluded_from_equality(),
                |names| names.contains(&field.name),
            )
        })
        .collect())
}
