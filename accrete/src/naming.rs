//! Naming and defaulting helpers shared by the synthesis strategies.
//!
//! Every function here is pure. Strategies derive member names, default
//! initialisers, and escaped literals through this module so the source and
//! binary back-ends agree on what a generated member is called.

/// Root of every inheritance chain; the model builder stops here.
pub const ROOT_TYPE: &str = "java.lang.Object";

const PRIMITIVES: [&str; 8] = [
    "boolean", "byte", "char", "short", "int", "long", "float", "double",
];

const NUMERIC_PRIMITIVES: [&str; 6] = ["byte", "short", "int", "long", "float", "double"];

/// Upper-cases the first character of `name`, leaving the rest untouched.
///
/// # Examples
///
/// ```
/// use accrete::naming::capitalize;
///
/// assert_eq!(capitalize("name"), "Name");
/// assert_eq!(capitalize("uRL"), "URL");
/// assert_eq!(capitalize(""), "");
/// ```
#[must_use]
pub fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}

/// Derives the reader name for `field`.
///
/// `boolean` fields read through an `is` prefix; everything else, including
/// the boxed `Boolean`, uses `get`.
///
/// # Examples
///
/// ```
/// use accrete::naming::accessor_name;
///
/// assert_eq!(accessor_name("active", "boolean"), "isActive");
/// assert_eq!(accessor_name("name", "String"), "getName");
/// ```
#[must_use]
pub fn accessor_name(field: &str, declared_type: &str) -> String {
    let prefix = if declared_type.trim() == "boolean" {
        "is"
    } else {
        "get"
    };
    format!("{prefix}{}", capitalize(field))
}

/// Derives the mutator name for `field`.
#[must_use]
pub fn mutator_name(field: &str) -> String {
    format!("set{}", capitalize(field))
}

/// Escapes `text` for inclusion inside a double-quoted string literal.
///
/// Handles backslashes, double quotes, newlines, and tabs.
///
/// # Examples
///
/// ```
/// use accrete::naming::escape_literal;
///
/// assert_eq!(escape_literal("say \"hi\""), "say \\\"hi\\\"");
/// assert_eq!(escape_literal("a\tb\n"), "a\\tb\\n");
/// ```
#[must_use]
pub fn escape_literal(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '\\' => escaped.push_str("\\\\"),
            '"' => escaped.push_str("\\\""),
            '\n' => escaped.push_str("\\n"),
            '\t' => escaped.push_str("\\t"),
            other => escaped.push(other),
        }
    }
    escaped
}

/// Returns the last segment of a qualified name.
///
/// Both package separators (`.`) and nested-type separators (`$`) are
/// recognised.
///
/// # Examples
///
/// ```
/// use accrete::naming::simple_name;
///
/// assert_eq!(simple_name("com.example.Person"), "Person");
/// assert_eq!(simple_name("com.example.Outer$Inner"), "Inner");
/// assert_eq!(simple_name("Person"), "Person");
/// ```
#[must_use]
pub fn simple_name(qualified: &str) -> &str {
    qualified.rsplit(['.', '$']).next().unwrap_or(qualified)
}

/// Reports whether `type_name` is one of the eight primitive types.
#[must_use]
pub fn is_primitive_like(type_name: &str) -> bool {
    PRIMITIVES.contains(&type_name.trim())
}

/// Reports whether `type_name` is a numeric primitive (excludes `boolean`
/// and `char`).
#[must_use]
pub fn is_numeric_primitive(type_name: &str) -> bool {
    NUMERIC_PRIMITIVES.contains(&type_name.trim())
}

/// Reports whether `type_name` names the root object type.
#[must_use]
pub fn is_root_type(type_name: &str) -> bool {
    matches!(type_name.trim(), ROOT_TYPE | "Object")
}

/// Returns the zero value literal used when a field has no explicit default.
///
/// # Examples
///
/// ```
/// use accrete::naming::default_value_literal;
///
/// assert_eq!(default_value_literal("boolean"), "false");
/// assert_eq!(default_value_literal("char"), "'\\0'");
/// assert_eq!(default_value_literal("int"), "0");
/// assert_eq!(default_value_literal("SomeReferenceType"), "null");
/// ```
#[must_use]
pub fn default_value_literal(type_name: &str) -> &'static str {
    match type_name.trim() {
        "boolean" => "false",
        "char" => "'\\0'",
        "byte" | "short" | "int" => "0",
        "long" => "0L",
        "float" => "0.0f",
        "double" => "0.0d",
        _ => "null",
    }
}

/// Reduces a type name to the form used when comparing member signatures.
///
/// Generic arguments are stripped, qualified names are reduced to their
/// simple name, and varargs become array suffixes. Source declarations and
/// signatures recovered from compiled descriptors therefore compare equal.
///
/// # Examples
///
/// ```
/// use accrete::naming::erased_type_name;
///
/// assert_eq!(erased_type_name("java.util.List<java.lang.String>"), "List");
/// assert_eq!(erased_type_name("java.lang.String[]"), "String[]");
/// assert_eq!(erased_type_name("Object..."), "Object[]");
/// assert_eq!(erased_type_name("int"), "int");
/// ```
#[must_use]
pub fn erased_type_name(type_name: &str) -> String {
    let mut base = String::with_capacity(type_name.len());
    let mut depth = 0_usize;
    for ch in type_name.chars() {
        match ch {
            '<' => depth += 1,
            '>' => depth = depth.saturating_sub(1),
            c if depth == 0 && !c.is_whitespace() => base.push(c),
            _ => {}
        }
    }
    let (stem, varargs) = base
        .strip_suffix("...")
        .map_or((base.as_str(), false), |stem| (stem, true));
    let mut erased = simple_name(stem).to_owned();
    if varargs {
        erased.push_str("[]");
    }
    erased
}

/// Name of the nested builder type generated for `type_name`.
#[must_use]
pub fn builder_class_name(type_name: &str) -> String {
    format!("{}Builder", simple_name(type_name))
}
