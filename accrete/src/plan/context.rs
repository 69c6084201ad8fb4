//! Per-declaration staging area shared by every strategy in one pass.

use std::collections::BTreeSet;

use super::{EmissionPlan, NestedType, PlannedItem, PlannedMember};
use crate::diagnostics::Diagnostic;
use crate::model::{MemberSignature, TagUsage, TypeDescriptor};

/// Tracks which members a declaration already has or will receive.
///
/// The context is created once per declaration per pass. Signatures from
/// the declaration itself seed it; each successful plan is committed so
/// later strategies see what earlier ones produced.
#[derive(Debug, Clone, Default)]
pub struct EmissionContext {
    target: String,
    existing: BTreeSet<MemberSignature>,
    staged: BTreeSet<MemberSignature>,
    diagnostics: Vec<Diagnostic>,
}

impl EmissionContext {
    /// Seeds a context from the members `descriptor` already declares.
    #[must_use]
    pub fn new(descriptor: &TypeDescriptor) -> Self {
        Self::with_existing(
            descriptor.qualified_name(),
            descriptor.existing_members().iter().cloned(),
        )
    }

    /// Seeds a context for `target` from an explicit signature set.
    #[must_use]
    pub fn with_existing(
        target: impl Into<String>,
        existing: impl IntoIterator<Item = MemberSignature>,
    ) -> Self {
        Self {
            target: target.into(),
            existing: existing.into_iter().collect(),
            staged: BTreeSet::new(),
            diagnostics: Vec::new(),
        }
    }

    /// Qualified name of the declaration being synthesised.
    #[must_use]
    pub fn target(&self) -> &str {
        &self.target
    }

    /// Whether `signature` exists or was staged by an earlier plan.
    #[must_use]
    pub fn is_taken(&self, signature: &MemberSignature) -> bool {
        self.existing.contains(signature) || self.staged.contains(signature)
    }

    /// Signatures staged by committed plans.
    #[must_use]
    pub const fn staged(&self) -> &BTreeSet<MemberSignature> {
        &self.staged
    }

    /// Records every item of `plan` as staged.
    pub fn commit(&mut self, plan: &EmissionPlan) {
        self.staged.extend(plan.signatures());
    }

    /// Queues an error diagnostic against the target declaration.
    pub fn error(&mut self, message: impl Into<String>) {
        let diagnostic = Diagnostic::error(self.target.clone(), message);
        self.diagnostics.push(diagnostic);
    }

    /// Hands over the queued diagnostics, leaving the queue empty.
    pub fn take_diagnostics(&mut self) -> Vec<Diagnostic> {
        std::mem::take(&mut self.diagnostics)
    }
}

/// Accumulates one strategy's plan while enforcing collision safety.
///
/// Nothing reaches the [`EmissionContext`] until the owning strategy
/// succeeds and the caller commits the finished plan.
#[derive(Debug)]
pub struct PlanBuilder<'c> {
    context: &'c mut EmissionContext,
    plan: EmissionPlan,
}

impl<'c> PlanBuilder<'c> {
    /// Starts an empty plan for `usage` against `context`.
    pub fn new(context: &'c mut EmissionContext, usage: &TagUsage) -> Self {
        Self {
            context,
            plan: EmissionPlan::new(&usage.name),
        }
    }

    /// Whether `signature` exists, is staged, or is already in this plan.
    #[must_use]
    pub fn contains(&self, signature: &MemberSignature) -> bool {
        self.context.is_taken(signature) || self.plan.signatures().any(|s| s == *signature)
    }

    /// Adds `member` unless its signature is taken. Returns whether it was
    /// added.
    pub fn add(&mut self, member: PlannedMember) -> bool {
        self.push(PlannedItem::Member(member))
    }

    /// Adds a nested type unless one with the same name is taken.
    pub fn add_type(&mut self, nested: NestedType) -> bool {
        self.push(PlannedItem::Type(nested))
    }

    fn push(&mut self, item: PlannedItem) -> bool {
        let signature = item.signature();
        if self.contains(&signature) {
            tracing::trace!(
                element = %self.context.target(),
                tag = %self.plan.tag,
                %signature,
                "member already present; skipping"
            );
            return false;
        }
        self.plan.items.push(item);
        true
    }

    /// Reports a member-level error; the caller skips that member.
    pub fn error(&mut self, message: impl Into<String>) {
        self.context.error(message);
    }

    /// Qualified name of the declaration being synthesised.
    #[must_use]
    pub fn target(&self) -> &str {
        self.context.target()
    }

    /// Returns the accumulated plan.
    #[must_use]
    pub fn finish(self) -> EmissionPlan {
        self.plan
    }
}
