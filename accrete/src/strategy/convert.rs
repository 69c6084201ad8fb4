//! `as<Target>()` conversion methods.

use crate::error::HandlerError;
use crate::model::{FieldDescriptor, TagUsage, TypeDescriptor};
use crate::naming;
use crate::plan::{Conversion, MemberBody, PlanBuilder, PlannedMember};

pub(super) fn convert(
    descriptor: &TypeDescriptor,
    usage: &TagUsage,
    plan: &mut PlanBuilder<'_>,
) -> Result<(), HandlerError> {
    let field = source_field(descriptor, usage)?;
    let targets = usage.string_list("targets")?.ok_or_else(|| {
        HandlerError::invalid_parameter(&usage.name, "targets", "is required")
    })?;

    for target in targets {
        let Some(conversion) = conversion_for(&field.declared_type, &target) else {
            plan.error(format!(
                "@{}: field '{}' of type {} cannot be converted to unsupported target '{target}'",
                usage.name, field.name, field.declared_type
            ));
            continue;
        };
        let name = format!("as{}", naming::capitalize(naming::simple_name(&target)));
        plan.add(PlannedMember::method(
            name,
            target.clone(),
            Vec::new(),
            MemberBody::Convert {
                field: field.name.clone(),
                target,
                conversion,
            },
        ));
    }
    Ok(())
}

fn source_field<'d>(
    descriptor: &'d TypeDescriptor,
    usage: &TagUsage,
) -> Result<&'d FieldDescriptor, HandlerError> {
    if let Some(name) = usage.identifier("field")? {
        return descriptor
            .field_named(name)
            .ok_or_else(|| HandlerError::unknown_field(&usage.name, name));
    }
    match descriptor.fields() {
        [only] => Ok(only),
        _ => Err(HandlerError::invalid_parameter(
            &usage.name,
            "field",
            "is required unless the type has exactly one field",
        )),
    }
}

fn conversion_for(source: &str, target: &str) -> Option<Conversion> {
    if matches!(target.trim(), "String" | "java.lang.String") {
        Some(Conversion::Text)
    } else if naming::is_numeric_primitive(target) && naming::is_numeric_primitive(source) {
        Some(Conversion::Numeric)
    } else {
        None
    }
}
