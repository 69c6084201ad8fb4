//! Readers and mutators.

use crate::model::TypeDescriptor;
use crate::plan::{MemberBody, Param, PlanBuilder, PlannedMember};

pub(super) fn getters(descriptor: &TypeDescriptor, plan: &mut PlanBuilder<'_>) {
    for field in descriptor.fields() {
        plan.add(PlannedMember::method(
            field.accessor_name(),
            &field.declared_type,
            Vec::new(),
            MemberBody::Getter {
                field: field.name.clone(),
            },
        ));
    }
}

/// Mutators for every non-final field. A type tagged `Value` is immutable
/// as a whole, so it gets none.
pub(super) fn setters(descriptor: &TypeDescriptor, plan: &mut PlanBuilder<'_>) {
    if descriptor.tags().iter().any(|tag| tag.is("Value")) {
        tracing::debug!(
            element = %descriptor.qualified_name(),
            "type is tagged Value; skipping mutators"
        );
        return;
    }
    for field in descriptor.fields().iter().filter(|f| !f.is_final) {
        plan.add(PlannedMember::method(
            field.mutator_name(),
            "void",
            vec![Param::from(field)],
            MemberBody::Setter {
                field: field.name.clone(),
                null_check: field.needs_null_check(),
            },
        ));
    }
}
