use anyhow::{Context, Result, ensure};
use rstest::{fixture, rstest};

use super::*;
use crate::model::{
    Declaration, DeclarationSet, FieldDecl, MemberSignature, TagUsage, TypeDescriptor,
    TypeModelBuilder,
};
use crate::plan::{Conversion, EmissionContext, MemberBody, PlannedItem, Visibility};

fn describe(declaration: Declaration) -> Result<TypeDescriptor> {
    let name = declaration.name.clone();
    let set: DeclarationSet = [declaration].into_iter().collect();
    TypeModelBuilder::new(&set)
        .build_named(&name)
        .context("descriptor should build")
}

/// `name: String` (required), `age: final int`.
#[fixture]
fn person() -> Declaration {
    Declaration::builder("demo.Person")
        .field(FieldDecl::new("name", "String").tag("Required"))
        .field(FieldDecl::new("age", "int").with_final())
        .build()
}

fn run(strategy: Strategy, descriptor: &TypeDescriptor, usage: &TagUsage) -> Result<EmissionPlan> {
    let mut context = EmissionContext::new(descriptor);
    Ok(strategy.apply(descriptor, usage, &mut context)?)
}

fn names(plan: &EmissionPlan) -> Vec<String> {
    plan.signatures().map(|s| s.to_string()).collect()
}

#[rstest]
fn required_args_constructor_takes_required_fields_in_order(person: Declaration) -> Result<()> {
    let descriptor = describe(person)?;
    let plan = run(
        Strategy::RequiredArgsConstructor,
        &descriptor,
        &TagUsage::new("RequiredArgsConstructor"),
    )?;
    ensure!(names(&plan) == ["constructor(String, int)"], "{:?}", names(&plan));
    Ok(())
}

#[rstest]
fn required_fields_constructor_null_checks_reference_fields(person: Declaration) -> Result<()> {
    let descriptor = describe(person)?;
    let plan = run(
        Strategy::RequiredArgsConstructor,
        &descriptor,
        &TagUsage::new("RequiredArgsConstructor"),
    )?;
    let ctor = plan.members().next().context("constructor planned")?;
    let MemberBody::Init { null_checks, .. } = &ctor.body else {
        anyhow::bail!("unexpected body {:?}", ctor.body);
    };
    ensure!(null_checks == &["name"], "{null_checks:?}");
    Ok(())
}

#[rstest]
fn accessors_skip_setters_for_final_fields(person: Declaration) -> Result<()> {
    let descriptor = describe(person)?;
    let plan = run(Strategy::Accessors, &descriptor, &TagUsage::new("Accessors"))?;
    ensure!(
        names(&plan) == ["getName()", "getAge()", "setName(String)"],
        "{:?}",
        names(&plan)
    );
    Ok(())
}

#[rstest]
fn boolean_getter_uses_is_prefix() -> Result<()> {
    let descriptor = describe(
        Declaration::builder("demo.Flag")
            .field(FieldDecl::new("active", "boolean"))
            .build(),
    )?;
    let plan = run(Strategy::Getter, &descriptor, &TagUsage::new("Getter"))?;
    ensure!(names(&plan) == ["isActive()"]);
    Ok(())
}

#[rstest]
fn existing_members_are_never_regenerated(person: Declaration) -> Result<()> {
    let mut declaration = person;
    declaration
        .members
        .push(MemberSignature::method("getName", Vec::<String>::new()));
    let descriptor = describe(declaration)?;
    let plan = run(Strategy::Getter, &descriptor, &TagUsage::new("Getter"))?;
    ensure!(names(&plan) == ["getAge()"]);
    Ok(())
}

#[rstest]
fn static_name_makes_constructor_private_and_adds_factory(person: Declaration) -> Result<()> {
    let descriptor = describe(person)?;
    let usage = TagUsage::new("AllArgsConstructor").with("static_name", "of");
    let plan = run(Strategy::AllArgsConstructor, &descriptor, &usage)?;
    let members: Vec<_> = plan.members().collect();
    ensure!(members.len() == 2);
    ensure!(members[0].visibility == Visibility::Private);
    ensure!(members[1].is_static && members[1].name() == "of");
    ensure!(members[1].return_type.as_deref() == Some("Person"));
    Ok(())
}

#[rstest]
fn no_args_constructor_rejects_final_fields_without_force(person: Declaration) -> Result<()> {
    let descriptor = describe(person)?;
    let err = run(
        Strategy::NoArgsConstructor,
        &descriptor,
        &TagUsage::new("NoArgsConstructor"),
    )
    .err()
    .context("expected missing prerequisite")?;
    ensure!(err.to_string().contains("age"), "{err}");
    Ok(())
}

#[rstest]
fn forced_no_args_constructor_assigns_defaults(person: Declaration) -> Result<()> {
    let descriptor = describe(person)?;
    let usage = TagUsage::new("NoArgsConstructor").with("force", true);
    let plan = run(Strategy::NoArgsConstructor, &descriptor, &usage)?;
    let ctor = plan.members().next().context("constructor planned")?;
    let MemberBody::Init { assignments, .. } = &ctor.body else {
        anyhow::bail!("unexpected body {:?}", ctor.body);
    };
    ensure!(assignments == &[crate::plan::FieldInit::literal("age", "0")]);
    Ok(())
}

#[rstest]
#[case(TagUsage::new("EqualsAndHashCode"), &["name", "age"])]
#[case(TagUsage::new("EqualsAndHashCode").with("exclude", vec!["age"]), &["name"])]
#[case(TagUsage::new("EqualsAndHashCode").with("include", vec!["age"]), &["age"])]
fn equality_triad_respects_field_selection(
    person: Declaration,
    #[case] usage: TagUsage,
    #[case] expected: &[&str],
) -> Result<()> {
    let descriptor = describe(person)?;
    let plan = run(Strategy::EqualsAndHashCode, &descriptor, &usage)?;
    ensure!(names(&plan) == ["equals(Object)", "hashCode()", "toString()"]);
    let Some(MemberBody::HashCode { fields }) = plan.members().nth(1).map(|m| &m.body) else {
        anyhow::bail!("hashCode not planned");
    };
    let hashed: Vec<&str> = fields.iter().map(|f| f.name.as_str()).collect();
    ensure!(hashed == expected, "{hashed:?}");
    Ok(())
}

#[rstest]
fn equality_honours_field_level_exclusion() -> Result<()> {
    let descriptor = describe(
        Declaration::builder("demo.Account")
            .field(FieldDecl::new("id", "long"))
            .field(FieldDecl::new("cache", "Object").tag("EqualsAndHashCode.Exclude"))
            .build(),
    )?;
    let plan = run(
        Strategy::EqualsAndHashCode,
        &descriptor,
        &TagUsage::new("EqualsAndHashCode"),
    )?;
    let Some(MemberBody::Equals { fields, .. }) = plan.members().next().map(|m| &m.body) else {
        anyhow::bail!("equals not planned");
    };
    ensure!(fields.len() == 1 && fields[0].name == "id");
    Ok(())
}

#[rstest]
fn equality_rejects_unknown_field_names(person: Declaration) -> Result<()> {
    let descriptor = describe(person)?;
    let usage = TagUsage::new("EqualsAndHashCode").with("exclude", vec!["missing"]);
    let err = run(Strategy::EqualsAndHashCode, &descriptor, &usage)
        .err()
        .context("expected failure")?;
    ensure!(err.to_string() == "unknown field 'missing'", "{err}");
    Ok(())
}

#[rstest]
fn builder_stages_all_args_constructor_and_nested_type(person: Declaration) -> Result<()> {
    let descriptor = describe(person)?;
    let plan = run(Strategy::Builder, &descriptor, &TagUsage::new("Builder"))?;
    ensure!(
        names(&plan) == ["constructor(String, int)", "class PersonBuilder", "builder()"],
        "{:?}",
        names(&plan)
    );
    let nested = plan.nested_types().next().context("builder type planned")?;
    let initialisers: Vec<&str> = nested.fields.iter().map(|f| f.initializer.as_str()).collect();
    ensure!(initialisers == ["null", "0"]);
    let member_names: Vec<&str> = nested.members.iter().map(|m| m.name()).collect();
    ensure!(member_names == ["name", "age", "build"]);
    Ok(())
}

#[rstest]
fn builder_reuses_existing_constructor_and_honours_names() -> Result<()> {
    let descriptor = describe(
        Declaration::builder("demo.Point")
            .field(FieldDecl::new("x", "int").tag(TagUsage::new("Builder.Default").with("value", "7")))
            .member(MemberSignature::constructor(["int"]))
            .build(),
    )?;
    let usage = TagUsage::new("Builder")
        .with("builder_class_name", "Maker")
        .with("build_method_name", "make")
        .with("builder_method_name", "maker");
    let plan = run(Strategy::Builder, &descriptor, &usage)?;
    ensure!(names(&plan) == ["class Maker", "maker()"], "{:?}", names(&plan));
    let nested = plan.nested_types().next().context("builder type planned")?;
    ensure!(nested.fields[0].initializer == "7");
    ensure!(nested.members.last().map(|m| m.name()) == Some("make"));
    Ok(())
}

#[rstest]
fn copy_requires_a_default_constructor(person: Declaration) -> Result<()> {
    let descriptor = describe(person)?;
    let err = run(Strategy::Copy, &descriptor, &TagUsage::new("Copy"))
        .err()
        .context("expected missing prerequisite")?;
    ensure!(err.to_string().contains("no-argument constructor"), "{err}");
    Ok(())
}

#[rstest]
fn copy_sees_constructors_staged_earlier() -> Result<()> {
    let descriptor = describe(
        Declaration::builder("demo.Note")
            .field(FieldDecl::new("text", "String"))
            .build(),
    )?;
    let mut context = EmissionContext::new(&descriptor);
    let ctor = Strategy::NoArgsConstructor.apply(
        &descriptor,
        &TagUsage::new("NoArgsConstructor"),
        &mut context,
    )?;
    context.commit(&ctor);
    let plan = Strategy::Copy.apply(&descriptor, &TagUsage::new("Copy"), &mut context)?;
    ensure!(names(&plan) == ["copy()"]);
    Ok(())
}

#[rstest]
fn convert_skips_unsupported_targets_with_an_error() -> Result<()> {
    let descriptor = describe(
        Declaration::builder("demo.Meters")
            .field(FieldDecl::new("value", "int"))
            .build(),
    )?;
    let usage = TagUsage::new("Convert").with("targets", vec!["long", "String", "java.util.Date"]);
    let mut context = EmissionContext::new(&descriptor);
    let plan = Strategy::Convert.apply(&descriptor, &usage, &mut context)?;
    ensure!(names(&plan) == ["asLong()", "asString()"], "{:?}", names(&plan));
    let conversions: Vec<Conversion> = plan
        .members()
        .filter_map(|m| match &m.body {
            MemberBody::Convert { conversion, .. } => Some(*conversion),
            _ => None,
        })
        .collect();
    ensure!(conversions == [Conversion::Numeric, Conversion::Text]);
    let diagnostics = context.take_diagnostics();
    ensure!(diagnostics.len() == 1 && diagnostics[0].message.contains("java.util.Date"));
    Ok(())
}

#[rstest]
fn convert_requires_field_when_ambiguous(person: Declaration) -> Result<()> {
    let descriptor = describe(person)?;
    let usage = TagUsage::new("Convert").with("targets", vec!["String"]);
    ensure!(run(Strategy::Convert, &descriptor, &usage).is_err());
    Ok(())
}

#[rstest]
fn data_combines_constructor_accessors_and_triad(person: Declaration) -> Result<()> {
    let descriptor = describe(person)?;
    let plan = run(Strategy::Data, &descriptor, &TagUsage::new("Data"))?;
    ensure!(
        names(&plan)
            == [
                "constructor(String, int)",
                "getName()",
                "getAge()",
                "setName(String)",
                "equals(Object)",
                "hashCode()",
                "toString()",
            ],
        "{:?}",
        names(&plan)
    );
    Ok(())
}

#[rstest]
fn value_treats_every_field_as_final(person: Declaration) -> Result<()> {
    let descriptor = describe(person)?;
    let plan = run(Strategy::Value, &descriptor, &TagUsage::new("Value"))?;
    ensure!(!names(&plan).iter().any(|n| n.starts_with("set")));
    ensure!(names(&plan).first().map(String::as_str) == Some("constructor(String, int)"));
    Ok(())
}

#[rstest]
#[case(Strategy::Setter, "Setter")]
#[case(Strategy::Accessors, "Accessors")]
#[case(Strategy::Data, "Data")]
fn value_types_get_no_mutators_from_other_tags(
    #[case] strategy: Strategy,
    #[case] tag: &str,
) -> Result<()> {
    let descriptor = describe(
        Declaration::builder("demo.Point")
            .field(FieldDecl::new("x", "int"))
            .tag("lombok.Value")
            .tag(tag)
            .build(),
    )?;
    let plan = run(strategy, &descriptor, &TagUsage::new(tag))?;
    ensure!(!names(&plan).iter().any(|n| n.starts_with("set")), "{:?}", names(&plan));
    Ok(())
}

#[rstest]
fn copy_uses_a_declared_default_constructor() -> Result<()> {
    let descriptor = describe(
        Declaration::builder("demo.Note")
            .field(FieldDecl::new("text", "String"))
            .field(FieldDecl::new("id", "long").with_final())
            .member(MemberSignature::constructor(std::iter::empty::<&str>()))
            .build(),
    )?;
    let plan = run(Strategy::Copy, &descriptor, &TagUsage::new("Copy"))?;
    let copy = plan.members().next().context("copy planned")?;
    let MemberBody::Copy { fields, .. } = &copy.body else {
        anyhow::bail!("unexpected body {:?}", copy.body);
    };
    ensure!(fields == &["text".to_owned()], "{fields:?}");
    Ok(())
}

#[rstest]
fn applying_twice_is_idempotent(person: Declaration) -> Result<()> {
    let descriptor = describe(person)?;
    let usage = TagUsage::new("Data");
    ensure!(run(Strategy::Data, &descriptor, &usage)? == run(Strategy::Data, &descriptor, &usage)?);
    Ok(())
}

#[rstest]
fn priorities_put_constructors_first() {
    let mut ordered = Strategy::ALL;
    ordered.sort_by_key(|s| s.priority());
    assert_eq!(ordered, Strategy::ALL);
    assert!(Strategy::AllArgsConstructor.priority() < Strategy::Builder.priority());
    assert!(Strategy::NoArgsConstructor.priority() < Strategy::Copy.priority());
}

#[rstest]
fn plans_never_contain_duplicate_signatures(person: Declaration) -> Result<()> {
    let descriptor = describe(person)?;
    let plan = run(Strategy::Data, &descriptor, &TagUsage::new("Data"))?;
    let mut seen = std::collections::BTreeSet::new();
    for item in &plan.items {
        let signature = match item {
            PlannedItem::Member(member) => member.signature.clone(),
            PlannedItem::Type(nested) => nested.signature(),
        };
        ensure!(seen.insert(signature), "duplicate in plan");
    }
    Ok(())
}
