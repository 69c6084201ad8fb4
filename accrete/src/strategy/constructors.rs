//! Constructor strategies and their optional static factory.

use crate::error::HandlerError;
use crate::model::{FieldDescriptor, TagUsage, TypeDescriptor};
use crate::naming;
use crate::plan::{FieldInit, MemberBody, Param, PlanBuilder, PlannedMember, Visibility};

pub(super) fn all_args(
    descriptor: &TypeDescriptor,
    usage: &TagUsage,
    plan: &mut PlanBuilder<'_>,
) -> Result<(), HandlerError> {
    let fields: Vec<&FieldDescriptor> = descriptor.fields().iter().collect();
    over_fields(descriptor, usage, &fields, plan)
}

pub(super) fn required_args(
    descriptor: &TypeDescriptor,
    usage: &TagUsage,
    plan: &mut PlanBuilder<'_>,
) -> Result<(), HandlerError> {
    over_fields(descriptor, usage, &descriptor.required_fields(), plan)
}

pub(super) fn no_args(
    descriptor: &TypeDescriptor,
    usage: &TagUsage,
    plan: &mut PlanBuilder<'_>,
) -> Result<(), HandlerError> {
    let force = usage.flag("force")?.unwrap_or(false);
    let finals: Vec<&FieldDescriptor> = descriptor.fields().iter().filter(|f| f.is_final).collect();
    if !finals.is_empty() && !force {
        let names: Vec<&str> = finals.iter().map(|f| f.name.as_str()).collect();
        return Err(HandlerError::missing_prerequisite(format!(
            "a no-argument constructor for {} would leave final field(s) {} uninitialised; \
             set force = true to assign default values",
            descriptor.simple_name(),
            names.join(", ")
        )));
    }
    let assignments = finals
        .iter()
        .map(|f| FieldInit::literal(&f.name, naming::default_value_literal(&f.declared_type)))
        .collect();
    let body = MemberBody::Init {
        null_checks: Vec::new(),
        assignments,
    };
    emit(descriptor, usage, Vec::new(), body, plan)
}

/// Plans a public constructor over `descriptor`'s full field list, used by
/// strategies that need one to exist.
pub(super) fn ensure_all_args(descriptor: &TypeDescriptor, plan: &mut PlanBuilder<'_>) {
    let fields: Vec<&FieldDescriptor> = descriptor.fields().iter().collect();
    let (params, body) = assigning(&fields);
    plan.add(PlannedMember::constructor(Visibility::Public, params, body));
}

fn over_fields(
    descriptor: &TypeDescriptor,
    usage: &TagUsage,
    fields: &[&FieldDescriptor],
    plan: &mut PlanBuilder<'_>,
) -> Result<(), HandlerError> {
    let (params, body) = assigning(fields);
    emit(descriptor, usage, params, body, plan)
}

fn assigning(fields: &[&FieldDescriptor]) -> (Vec<Param>, MemberBody) {
    let params = fields.iter().map(|f| Param::from(*f)).collect();
    let body = MemberBody::Init {
        null_checks: fields
            .iter()
            .filter(|f| f.needs_null_check())
            .map(|f| f.name.clone())
            .collect(),
        assignments: fields.iter().map(|f| FieldInit::param(&f.name)).collect(),
    };
    (params, body)
}

fn emit(
    descriptor: &TypeDescriptor,
    usage: &TagUsage,
    params: Vec<Param>,
    body: MemberBody,
    plan: &mut PlanBuilder<'_>,
) -> Result<(), HandlerError> {
    let Some(factory) = usage.identifier("static_name")? else {
        plan.add(PlannedMember::constructor(Visibility::Public, params, body));
        return Ok(());
    };
    let arguments = params.iter().map(|p| p.name.clone()).collect();
    plan.add(PlannedMember::constructor(
        Visibility::Private,
        params.clone(),
        body,
    ));
    plan.add(
        PlannedMember::method(
            factory,
            descriptor.simple_name(),
            params,
            MemberBody::StaticFactory {
                type_name: descriptor.simple_name().to_owned(),
                arguments,
            },
        )
        .into_static(),
    );
    Ok(())
}
