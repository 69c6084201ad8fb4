//! Unit tests for the structural model.

use anyhow::{Context, Result, ensure};
use rstest::{fixture, rstest};

use super::*;
use crate::error::{HandlerError, ModelError};

#[fixture]
fn hierarchy() -> DeclarationSet {
    [
        Declaration::builder("demo.Entity")
            .extends("java.lang.Object")
            .field(FieldDecl::new("id", "long").with_final())
            .field(FieldDecl::new("name", "String"))
            .build(),
        Declaration::builder("demo.Person")
            .extends("demo.Entity")
            .field(FieldDecl::new("name", "String").tag("NonNull"))
            .field(FieldDecl::new("age", "int"))
            .field(FieldDecl::new("COUNT", "int").with_static())
            .member(MemberSignature::constructor(Vec::<String>::new()))
            .tag("Data")
            .build(),
    ]
    .into_iter()
    .collect()
}

fn field_names(descriptor: &TypeDescriptor) -> Vec<&str> {
    descriptor.fields().iter().map(|f| f.name.as_str()).collect()
}

#[rstest]
fn subtype_fields_precede_ancestor_fields(hierarchy: DeclarationSet) -> Result<()> {
    let person = TypeModelBuilder::new(&hierarchy).build_named("demo.Person")?;
    ensure!(
        field_names(&person) == ["name", "age", "id"],
        "unexpected order: {:?}",
        field_names(&person)
    );
    Ok(())
}

#[rstest]
fn shadowed_ancestor_field_is_hidden(hierarchy: DeclarationSet) -> Result<()> {
    let person = TypeModelBuilder::new(&hierarchy).build_named("demo.Person")?;
    let name = person.field_named("name").context("name field")?;
    ensure!(name.declared_in == "demo.Person", "subtype field should win");
    ensure!(
        person.fields().iter().filter(|f| f.name == "name").count() == 1,
        "ordered list and lookup must agree"
    );
    Ok(())
}

#[rstest]
fn building_twice_yields_equal_descriptors(hierarchy: DeclarationSet) -> Result<()> {
    let builder = TypeModelBuilder::new(&hierarchy);
    let first = builder.build_named("demo.Person")?;
    let second = builder.build_named("demo.Person")?;
    ensure!(first == second, "descriptors differ");
    Ok(())
}

#[rstest]
fn static_fields_are_excluded(hierarchy: DeclarationSet) -> Result<()> {
    let person = TypeModelBuilder::new(&hierarchy).build_named("demo.Person")?;
    ensure!(person.field_named("COUNT").is_none(), "static field leaked");
    ensure!(person.fields().iter().all(|f| !f.is_static), "static flag set");
    Ok(())
}

#[rstest]
fn required_fields_are_final_or_non_null(hierarchy: DeclarationSet) -> Result<()> {
    let person = TypeModelBuilder::new(&hierarchy).build_named("demo.Person")?;
    let required: Vec<_> = person.required_fields().iter().map(|f| f.name.as_str()).collect();
    ensure!(required == ["name", "id"], "unexpected required set: {required:?}");
    let rest: Vec<_> = person
        .fields_excluding(&["name"])
        .iter()
        .map(|f| f.name.as_str())
        .collect();
    ensure!(rest == ["age", "id"], "unexpected exclusion result: {rest:?}");
    Ok(())
}

#[rstest]
fn default_constructor_detection(hierarchy: DeclarationSet) -> Result<()> {
    let builder = TypeModelBuilder::new(&hierarchy);
    ensure!(builder.build_named("demo.Person")?.has_default_constructor(), "person");
    ensure!(!builder.build_named("demo.Entity")?.has_default_constructor(), "entity");
    Ok(())
}

#[rstest]
fn super_type_is_resolved(hierarchy: DeclarationSet) -> Result<()> {
    let person = TypeModelBuilder::new(&hierarchy).build_named("demo.Person")?;
    let parent = person.super_type().context("parent")?;
    ensure!(parent.qualified_name() == "demo.Entity", "wrong parent");
    ensure!(parent.super_type().is_none(), "root type must terminate the walk");
    Ok(())
}

#[rstest]
fn unresolvable_super_type_is_opaque() -> Result<()> {
    let set: DeclarationSet = [Declaration::builder("demo.Widget")
        .extends("vendor.Unknown")
        .field(FieldDecl::new("size", "int"))
        .build()]
    .into_iter()
    .collect();
    let widget = TypeModelBuilder::new(&set).build_named("demo.Widget")?;
    ensure!(widget.super_type().is_none(), "unknown parent should be opaque");
    ensure!(field_names(&widget) == ["size"], "only own fields expected");
    Ok(())
}

#[rstest]
fn cyclic_inheritance_is_reported() {
    let set: DeclarationSet = [
        Declaration::builder("demo.A").extends("demo.B").build(),
        Declaration::builder("demo.B").extends("demo.A").build(),
    ]
    .into_iter()
    .collect();
    let err = TypeModelBuilder::new(&set).build_named("demo.A");
    assert_eq!(
        err,
        Err(ModelError::CyclicInheritance {
            cycle: "demo.A -> demo.B -> demo.A".to_owned()
        })
    );
}

#[rstest]
fn missing_declaration_is_reported() {
    let set = DeclarationSet::new();
    assert_eq!(
        TypeModelBuilder::new(&set).build_named("demo.Gone"),
        Err(ModelError::MissingDeclaration("demo.Gone".to_owned()))
    );
}

#[rstest]
fn replacing_a_declaration_keeps_its_position() -> Result<()> {
    let mut set: DeclarationSet = ["demo.A", "demo.B", "demo.C"]
        .into_iter()
        .map(|name| Declaration::builder(name).build())
        .collect();
    set.insert(Declaration::builder("demo.A").tag("Getter").build());

    let names: Vec<&str> = set.iter().map(|d| d.name.as_str()).collect();
    ensure!(names == ["demo.A", "demo.B", "demo.C"], "{names:?}");
    ensure!(set.len() == 3);
    ensure!(set.declaration("demo.A").context("replaced")?.has_tag("Getter"));
    Ok(())
}

#[rstest]
fn declarations_parse_from_json() -> Result<()> {
    let json = r#"[{
        "name": "demo.Point",
        "fields": [
            { "name": "x", "declared_type": "int", "is_final": true },
            { "name": "label", "declared_type": "String",
              "tags": [{ "name": "NonNull" }] }
        ],
        "members": [{ "kind": "method", "name": "toString" }],
        "tags": [{ "name": "Builder", "parameters": { "build_method_name": "create" } }]
    }]"#;
    let set = DeclarationSet::from_json(json)?;
    let point = set.declaration("demo.Point").context("point")?;
    ensure!(point.fields.len() == 2, "two fields expected");
    ensure!(
        point.members == [MemberSignature::method("toString", Vec::<String>::new())],
        "member mismatch"
    );
    let tag = point.tags.first().context("tag")?;
    ensure!(tag.string("build_method_name")? == Some("create"), "parameter lost");
    Ok(())
}

#[rstest]
#[case(TagValue::Bool(true), Ok(Some(true)))]
#[case(
    TagValue::Str("yes".to_owned()),
    Err(HandlerError::invalid_parameter(
        "NoArgsConstructor",
        "force",
        "must be a boolean, found a string \"yes\""
    ))
)]
fn flag_parameters_are_typed(
    #[case] value: TagValue,
    #[case] expected: Result<Option<bool>, HandlerError>,
) {
    let tag = TagUsage::new("NoArgsConstructor").with("force", value);
    assert_eq!(tag.flag("force"), expected);
}

#[rstest]
fn string_list_accepts_single_string() -> Result<()> {
    let tag = TagUsage::new("EqualsAndHashCode").with("exclude", "id");
    ensure!(tag.string_list("exclude")? == Some(vec!["id".to_owned()]), "single");
    let mixed = TagUsage::new("EqualsAndHashCode")
        .with("exclude", TagValue::List(vec![TagValue::Int(1)]));
    ensure!(mixed.string_list("exclude").is_err(), "integers are not names");
    Ok(())
}

#[rstest]
#[case("Builder.Default", "Builder.Default", true)]
#[case("lombok.Builder.Default", "Builder.Default", true)]
#[case("Default", "Builder.Default", false)]
#[case("xBuilder.Default", "Builder.Default", false)]
fn tag_names_match_bare_or_qualified(
    #[case] written: &str,
    #[case] wanted: &str,
    #[case] expected: bool,
) {
    assert_eq!(TagUsage::new(written).is(wanted), expected);
}

#[rstest]
fn tag_display_lists_parameters() {
    let tag = TagUsage::new("Convert")
        .with("targets", vec!["long", "String"])
        .with("field", "value");
    assert_eq!(
        tag.to_string(),
        "@Convert(field = \"value\", targets = {\"long\", \"String\"})"
    );
}

#[rstest]
fn signatures_compare_erased() {
    let declared = MemberSignature::constructor(["java.lang.String", "java.util.Map<K, V>"]);
    let compiled = MemberSignature::constructor(["String", "Map"]);
    assert_eq!(declared, compiled);
    assert_eq!(compiled.to_string(), "constructor(String, Map)");
}
