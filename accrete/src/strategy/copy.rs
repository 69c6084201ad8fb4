//! Shallow copy through the no-argument constructor.

use crate::error::HandlerError;
use crate::model::{MemberSignature, TagUsage, TypeDescriptor};
use crate::plan::{MemberBody, PlanBuilder, PlannedMember};

pub(super) fn copy(
    descriptor: &TypeDescriptor,
    usage: &TagUsage,
    plan: &mut PlanBuilder<'_>,
) -> Result<(), HandlerError> {
    let method = usage.identifier("method_name")?.unwrap_or("copy");
    let type_name = descriptor.simple_name();
    let staged = plan.contains(&MemberSignature::constructor(std::iter::empty::<&str>()));
    if !descriptor.has_default_constructor() && !staged {
        return Err(HandlerError::missing_prerequisite(format!(
            "{method}() on {type_name} requires a no-argument constructor, \
             but none is declared or generated earlier"
        )));
    }
    plan.add(PlannedMember::method(
        method,
        type_name,
        Vec::new(),
        MemberBody::Copy {
            type_name: type_name.to_owned(),
            fields: descriptor
                .fields()
                .iter()
                .filter(|f| !f.is_final)
                .map(|f| f.name.clone())
                .collect(),
        },
    ));
    Ok(())
}
