//! One failing declaration never stops its siblings.

mod common;

use accrete::{
    Control, Declaration, DeclarationSet, EngineConfig, FieldDecl, Severity, TagUsage,
};
use anyhow::{Context, Result, ensure};
use common::run_round;
use rstest::{fixture, rstest};

fn account(name: &str) -> Declaration {
    Declaration::builder(name)
        .field(FieldDecl::new("id", "long").with_final())
        .field(FieldDecl::new("owner", "String"))
        .build()
}

/// Three declarations; the middle one excludes a field it does not have.
#[fixture]
fn ledger() -> DeclarationSet {
    let mut first = account("bank.First");
    first.tags.push(TagUsage::new("EqualsAndHashCode"));
    let mut second = account("bank.Second");
    second
        .tags
        .push(TagUsage::new("EqualsAndHashCode").with("exclude", vec!["balance"]));
    let mut third = account("bank.Third");
    third.tags.push(TagUsage::new("lombok.EqualsAndHashCode"));
    [first, second, third].into_iter().collect()
}

#[rstest]
fn siblings_are_emitted_around_a_failure(ledger: DeclarationSet) -> Result<()> {
    let output = run_round(&ledger, EngineConfig::default());
    ensure!(output.control == Control::Continue);

    for name in ["bank/First.java", "bank/Third.java"] {
        let source = output.artifacts.get(name).with_context(|| format!("{name} missing"))?;
        ensure!(source.contains("public boolean equals(Object o)"), "{source}");
        ensure!(source.contains("public int hashCode()"));
    }
    ensure!(output.artifacts.get("bank/Second.java").is_none());

    let errors: Vec<_> = output
        .diagnostics
        .entries()
        .iter()
        .filter(|d| d.severity == Severity::Error)
        .collect();
    ensure!(errors.len() == 1, "{errors:?}");
    let error = errors.first().context("one error")?;
    ensure!(error.target == "bank.Second");
    ensure!(error.message.contains("unknown field 'balance'"), "{}", error.message);
    Ok(())
}

#[rstest]
fn a_failing_tag_keeps_the_declarations_other_members() -> Result<()> {
    let declarations: DeclarationSet = [Declaration::builder("bank.Account")
        .field(FieldDecl::new("id", "long").with_final())
        .tag("Getter")
        .tag("Copy")
        .build()]
    .into_iter()
    .collect();

    let output = run_round(&declarations, EngineConfig::default());
    let source = output.artifacts.get("bank/Account.java").context("artefact")?;
    ensure!(source.contains("public long getId()"));
    ensure!(!source.contains("copy()"));
    ensure!(output.diagnostics.count(Severity::Error) == 1);
    ensure!(output.diagnostics.count(Severity::Note) == 0, "verbose is off");
    Ok(())
}

#[rstest]
fn cyclic_inheritance_is_reported_once() {
    let declarations: DeclarationSet = [
        Declaration::builder("loop.A").extends("loop.B").tag("Getter").tag("Setter").build(),
        Declaration::builder("loop.B").extends("loop.A").build(),
    ]
    .into_iter()
    .collect();

    let output = run_round(&declarations, EngineConfig::default());
    assert!(output.artifacts.is_empty());
    let errors: Vec<_> = output.diagnostics.for_target("loop.A").collect();
    assert_eq!(errors.len(), 1);
    assert!(errors.iter().all(|d| d.message.contains("loop.A -> loop.B -> loop.A")));
}
