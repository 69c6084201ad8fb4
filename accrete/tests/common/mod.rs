//! Shared helpers for the integration tests.

use accrete::{
    Control, DeclarationSet, Diagnostics, Engine, EngineConfig, HandlerRegistry, Host,
    MemorySink, Round,
};

/// Artefacts and diagnostics produced by one discovery round.
pub struct RoundOutput {
    pub control: Control,
    pub artifacts: MemorySink,
    pub diagnostics: Diagnostics,
}

/// Runs a single round over every tag in `declarations`.
pub fn run_round(declarations: &DeclarationSet, config: EngineConfig) -> RoundOutput {
    let registry = HandlerRegistry::standard();
    let mut engine = Engine::new(&registry, config);
    let mut artifacts = MemorySink::new();
    let mut diagnostics = Diagnostics::new();
    let control = engine.process(
        &Round::from_declarations(declarations),
        &mut Host::new(declarations, &mut artifacts, &mut diagnostics),
    );
    RoundOutput {
        control,
        artifacts,
        diagnostics,
    }
}
