//! Round-based processing driver.
//!
//! The host calls [`Engine::process`] once per round. Each round builds a
//! fresh descriptor and [`EmissionContext`] per declaration, dispatches
//! every registered tag in priority order, renders the combined plans, and
//! writes one artefact per declaration. A strategy failure is confined to
//! the declaration it was applied to.

mod round;

pub use round::Round;

use std::collections::HashSet;
use std::error::Error as _;

use indexmap::IndexMap;

use crate::config::EngineConfig;
use crate::diagnostics::{Diagnostic, DiagnosticSink};
use crate::emit::{ArtifactSink, SourceEmitter};
use crate::error::HandlerError;
use crate::model::{
    DeclarationSource, MemberSignature, TagUsage, TypeDescriptor, TypeModelBuilder,
};
use crate::plan::{EmissionContext, EmissionPlan};
use crate::registry::HandlerRegistry;
use crate::strategy::Strategy;

/// What the host should do after a call to [`Engine::process`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    /// More rounds may follow.
    Continue,
    /// The engine has finished; further rounds are ignored.
    Stop,
}

/// Lifecycle of an [`Engine`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DriverState {
    /// Rounds are dispatched.
    #[default]
    Active,
    /// A terminal round was seen; nothing is dispatched again.
    Final,
}

/// The host facilities an engine works against during one round.
pub struct Host<'h> {
    /// Resolves declarations and their supertypes.
    pub declarations: &'h dyn DeclarationSource,
    /// Receives generated source.
    pub artifacts: &'h mut dyn ArtifactSink,
    /// Receives diagnostics.
    pub diagnostics: &'h mut dyn DiagnosticSink,
}

impl<'h> Host<'h> {
    /// Bundles the host facilities.
    pub fn new(
        declarations: &'h dyn DeclarationSource,
        artifacts: &'h mut dyn ArtifactSink,
        diagnostics: &'h mut dyn DiagnosticSink,
    ) -> Self {
        Self {
            declarations,
            artifacts,
            diagnostics,
        }
    }
}

/// Everything synthesised for one declaration in one round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeSynthesis {
    /// The descriptor the strategies ran against.
    pub descriptor: TypeDescriptor,
    /// Non-empty plans in dispatch order.
    pub plans: Vec<EmissionPlan>,
}

impl TypeSynthesis {
    /// Whether no strategy added anything.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.plans.iter().all(EmissionPlan::is_empty)
    }

    /// Signatures of every planned item, in dispatch order.
    pub fn signatures(&self) -> impl Iterator<Item = MemberSignature> + '_ {
        self.plans.iter().flat_map(EmissionPlan::signatures)
    }
}

struct Slot {
    descriptor: TypeDescriptor,
    context: EmissionContext,
    plans: Vec<EmissionPlan>,
}

impl Slot {
    fn new(descriptor: TypeDescriptor) -> Self {
        let context = EmissionContext::new(&descriptor);
        Self {
            descriptor,
            context,
            plans: Vec::new(),
        }
    }

    /// Every usage of `tag` on the declaration, in declaration order.
    ///
    /// A round may name a tag the declaration does not carry; it then runs
    /// once with no parameters.
    fn usages_of(&self, tag: &str) -> Vec<TagUsage> {
        let usages: Vec<TagUsage> = self
            .descriptor
            .tags()
            .iter()
            .filter(|usage| usage.name == tag)
            .cloned()
            .collect();
        if usages.is_empty() {
            vec![TagUsage::new(tag)]
        } else {
            usages
        }
    }

    fn into_synthesis(self) -> TypeSynthesis {
        TypeSynthesis {
            descriptor: self.descriptor,
            plans: self.plans,
        }
    }
}

/// Drives the strategies over the rounds supplied by the host.
#[derive(Debug)]
pub struct Engine<'r> {
    registry: &'r HandlerRegistry,
    config: EngineConfig,
    emitter: SourceEmitter,
    state: DriverState,
    rounds: usize,
}

impl<'r> Engine<'r> {
    /// Creates an engine dispatching through `registry`.
    #[must_use]
    pub fn new(registry: &'r HandlerRegistry, config: EngineConfig) -> Self {
        let emitter = SourceEmitter::new(&config);
        Self {
            registry,
            config,
            emitter,
            state: DriverState::Active,
            rounds: 0,
        }
    }

    /// Current lifecycle state.
    #[must_use]
    pub const fn state(&self) -> DriverState {
        self.state
    }

    /// Configuration the engine was created with.
    #[must_use]
    pub const fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Processes one round.
    ///
    /// Returns [`Control::Stop`] without dispatching anything for the
    /// terminal round and for every round after it.
    pub fn process(&mut self, round: &Round, host: &mut Host<'_>) -> Control {
        if self.state == DriverState::Final {
            tracing::debug!("engine already finished; ignoring round");
            return Control::Stop;
        }
        if round.is_processing_over() {
            tracing::debug!(rounds = self.rounds, "processing over");
            self.state = DriverState::Final;
            return Control::Stop;
        }
        self.rounds += 1;
        tracing::debug!(round = self.rounds, "processing round");

        let synthesized = self.synthesize(round, host.declarations, &mut *host.diagnostics);
        self.write(&synthesized, host);
        Control::Continue
    }

    /// Runs every registered tag of `round` and returns the plans per
    /// declaration, in the order declarations were first dispatched.
    ///
    /// Nothing is written; [`Self::process`] renders and stores the result.
    pub fn synthesize(
        &self,
        round: &Round,
        declarations: &dyn DeclarationSource,
        diagnostics: &mut dyn DiagnosticSink,
    ) -> IndexMap<String, TypeSynthesis> {
        let builder = TypeModelBuilder::new(declarations);
        let mut slots: IndexMap<String, Slot> = IndexMap::new();
        let mut unresolved: HashSet<&str> = HashSet::new();

        for (tag, strategy) in self.registry.dispatch_order(round.tags()) {
            tracing::debug!(tag, %strategy, "dispatching tag");
            for element in round.elements_for(tag) {
                if unresolved.contains(element.as_str()) {
                    continue;
                }
                if !slots.contains_key(element) {
                    match builder.build_named(element) {
                        Ok(descriptor) => {
                            slots.insert(element.clone(), Slot::new(descriptor));
                        }
                        Err(err) => {
                            diagnostics.report(Diagnostic::error(element, err.to_string()));
                            unresolved.insert(element);
                            continue;
                        }
                    }
                }
                if let Some(slot) = slots.get_mut(element) {
                    for usage in slot.usages_of(tag) {
                        self.invoke(&usage, strategy, element, slot, diagnostics);
                    }
                }
            }
        }

        slots
            .into_iter()
            .map(|(name, slot)| (name, slot.into_synthesis()))
            .collect()
    }

    fn invoke(
        &self,
        usage: &TagUsage,
        strategy: Strategy,
        element: &str,
        slot: &mut Slot,
        diagnostics: &mut dyn DiagnosticSink,
    ) {
        match strategy.apply(&slot.descriptor, usage, &mut slot.context) {
            Ok(plan) => {
                tracing::debug!(
                    element,
                    tag = %usage.name,
                    members = plan.len(),
                    "strategy planned members"
                );
                slot.context.commit(&plan);
                if !plan.is_empty() {
                    slot.plans.push(plan);
                }
            }
            Err(err) => report_failure(diagnostics, element, usage, &err, self.config.verbose),
        }
        for diagnostic in slot.context.take_diagnostics() {
            diagnostics.report(diagnostic);
        }
    }

    fn write(&self, synthesized: &IndexMap<String, TypeSynthesis>, host: &mut Host<'_>) {
        for (name, synthesis) in synthesized {
            if synthesis.is_empty() {
                continue;
            }
            let Some(declaration) = host.declarations.declaration(name) else {
                continue;
            };
            let artifact = self.emitter.render(declaration, &synthesis.plans);
            if let Err(err) = host.artifacts.write(&artifact.path, &artifact.contents) {
                host.diagnostics.report(Diagnostic::error(
                    name,
                    format!("cannot write generated source: {err}"),
                ));
            }
        }
    }
}

/// Reports a strategy failure against `target`, followed by a detailed note
/// when `verbose` is set.
pub(crate) fn report_failure(
    diagnostics: &mut dyn DiagnosticSink,
    target: &str,
    usage: &TagUsage,
    err: &HandlerError,
    verbose: bool,
) {
    tracing::warn!(element = %target, tag = %usage.name, error = %err, "strategy failed");
    diagnostics.report(Diagnostic::error(target, format!("@{}: {err}", usage.name)));
    if verbose {
        let causes: String = std::iter::successors(err.source(), |&cause| cause.source())
            .map(|cause| format!("\n  caused by: {cause}"))
            .collect();
        diagnostics.report(Diagnostic::note(
            target,
            format!("while applying {usage}: {err:?}{causes}"),
        ));
    }
}
