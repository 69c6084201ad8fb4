//! Binary-level back-end: extends an already-compiled class.
//!
//! The pipeline has three explicit steps. [`ClassInfo::collect`] takes a
//! snapshot of the class, [`BinaryEmitter::plan`] runs every applicable
//! strategy against it and lowers the results to [`MemberAddition`]s, and
//! [`apply`] hands those to a [`ClassWriter`]. Members already in the class
//! are never touched.

mod class;
mod descriptor;
mod lower;
mod writer;

pub use class::{AccessFlags, ClassInfo, CompiledClass, CompiledField, CompiledMethod, class_path};
pub use descriptor::{
    field_descriptor, internal_name, method_descriptor, parse_field_descriptor,
    parse_method_descriptor,
};
pub use writer::{ClassRewriter, ClassWriter, MemberAddition, apply};

use crate::config::EngineConfig;
use crate::diagnostics::{Diagnostic, DiagnosticSink};
use crate::driver::report_failure;
use crate::error::HandlerError;
use crate::model::{DeclarationSource, TypeModelBuilder};
use crate::plan::EmissionContext;
use crate::registry::HandlerRegistry;

/// Plans and applies member additions for compiled classes.
#[derive(Debug, Clone, Copy)]
pub struct BinaryEmitter<'r> {
    registry: &'r HandlerRegistry,
    verbose: bool,
}

impl<'r> BinaryEmitter<'r> {
    /// Creates an emitter dispatching through `registry`.
    #[must_use]
    pub const fn new(registry: &'r HandlerRegistry, config: &EngineConfig) -> Self {
        Self {
            registry,
            verbose: config.verbose,
        }
    }

    /// Plans the additions for `class`.
    ///
    /// Supertypes resolve through `class_path`. Each strategy failure is
    /// reported against the class and the remaining strategies still run;
    /// a plan that cannot be lowered is dropped as a whole.
    pub fn plan(
        &self,
        class: &CompiledClass,
        class_path: &dyn DeclarationSource,
        diagnostics: &mut dyn DiagnosticSink,
    ) -> Vec<MemberAddition> {
        let target = class.qualified_name();
        let info = match ClassInfo::collect(class) {
            Ok(info) => info,
            Err(err) => {
                diagnostics.report(Diagnostic::error(&target, format!("cannot read class: {err}")));
                return Vec::new();
            }
        };
        let descriptor = match TypeModelBuilder::new(class_path).build(&info.to_declaration()) {
            Ok(descriptor) => descriptor,
            Err(err) => {
                diagnostics.report(Diagnostic::error(&target, err.to_string()));
                return Vec::new();
            }
        };

        let mut context = EmissionContext::new(&descriptor);
        let mut additions = Vec::new();
        for (usage, strategy) in self.registry.dispatch_usages(descriptor.tags()) {
            tracing::debug!(element = %target, tag = %usage.name, %strategy, "planning additions");
            let outcome = strategy
                .apply(&descriptor, usage, &mut context)
                .and_then(|plan| {
                    let lowered = lower::lower(&descriptor, &plan).map_err(HandlerError::from)?;
                    Ok((plan, lowered))
                });
            match outcome {
                Ok((plan, lowered)) => {
                    context.commit(&plan);
                    additions.extend(lowered);
                }
                Err(err) => report_failure(diagnostics, &target, usage, &err, self.verbose),
            }
            for diagnostic in context.take_diagnostics() {
                diagnostics.report(diagnostic);
            }
        }
        additions
    }

    /// Plans the additions for `class` and applies them, returning the
    /// extended class.
    pub fn transform(
        &self,
        class: CompiledClass,
        class_path: &dyn DeclarationSource,
        diagnostics: &mut dyn DiagnosticSink,
    ) -> CompiledClass {
        let additions = self.plan(&class, class_path, diagnostics);
        let mut writer = ClassRewriter::new(class);
        apply(additions, &mut writer);
        writer.finish()
    }
}
