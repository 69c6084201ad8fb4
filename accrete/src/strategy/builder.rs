//! Nested fluent builder.

use super::constructors;
use crate::error::HandlerError;
use crate::model::{MemberSignature, TagUsage, TypeDescriptor};
use crate::naming;
use crate::plan::{MemberBody, NestedField, NestedType, Param, PlanBuilder, PlannedMember};

pub(super) fn builder(
    descriptor: &TypeDescriptor,
    usage: &TagUsage,
    plan: &mut PlanBuilder<'_>,
) -> Result<(), HandlerError> {
    let builder_name = usage
        .identifier("builder_class_name")?
        .map_or_else(|| naming::builder_class_name(descriptor.qualified_name()), ToOwned::to_owned);
    let build_method = usage.identifier("build_method_name")?.unwrap_or("build");
    let factory_method = usage.identifier("builder_method_name")?.unwrap_or("builder");
    let type_name = descriptor.simple_name();
    let fields = descriptor.fields();

    let all_args = MemberSignature::constructor(fields.iter().map(|f| &f.declared_type));
    if !plan.contains(&all_args) {
        constructors::ensure_all_args(descriptor, plan);
    }

    let mut members: Vec<PlannedMember> = fields
        .iter()
        .map(|field| {
            PlannedMember::method(
                &field.name,
                &builder_name,
                vec![Param::from(field)],
                MemberBody::FluentSetter {
                    field: field.name.clone(),
                },
            )
        })
        .collect();
    members.push(PlannedMember::method(
        build_method,
        type_name,
        Vec::new(),
        MemberBody::Build {
            type_name: type_name.to_owned(),
            arguments: fields.iter().map(|f| f.name.clone()).collect(),
        },
    ));

    let nested = NestedType {
        name: builder_name.clone(),
        fields: fields
            .iter()
            .map(|field| NestedField {
                name: field.name.clone(),
                declared_type: field.declared_type.clone(),
                initializer: field.builder_default().map_or_else(
                    || naming::default_value_literal(&field.declared_type).to_owned(),
                    ToOwned::to_owned,
                ),
            })
            .collect(),
        members,
    };
    plan.add_type(nested);
    plan.add(
        PlannedMember::method(
            factory_method,
            &builder_name,
            Vec::new(),
            MemberBody::BuilderFactory {
                builder: builder_name.clone(),
            },
        )
        .into_static(),
    );
    Ok(())
}
