//! Structural descriptions handed over by the host front end.
//!
//! A [`Declaration`] is the raw, host-supplied view of one type. The
//! [`TypeModelBuilder`](super::TypeModelBuilder) turns it into an immutable
//! [`TypeDescriptor`](super::TypeDescriptor) with the inheritance chain
//! resolved.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::{MemberSignature, TagUsage};
use crate::error::AccreteResult;

/// One field as declared in source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDecl {
    /// Field name.
    pub name: String,
    /// Declared type as written.
    pub declared_type: String,
    /// Whether the field is final.
    #[serde(default)]
    pub is_final: bool,
    /// Whether the field is static.
    #[serde(default)]
    pub is_static: bool,
    /// Whether the field is private.
    #[serde(default)]
    pub is_private: bool,
    /// Tags attached to the field.
    #[serde(default)]
    pub tags: Vec<TagUsage>,
}

impl FieldDecl {
    /// Creates a private, mutable instance field.
    #[must_use]
    pub fn new(name: impl Into<String>, declared_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            declared_type: declared_type.into(),
            is_final: false,
            is_static: false,
            is_private: true,
            tags: Vec::new(),
        }
    }

    /// Marks the field final.
    #[must_use]
    pub const fn with_final(mut self) -> Self {
        self.is_final = true;
        self
    }

    /// Marks the field static.
    #[must_use]
    pub const fn with_static(mut self) -> Self {
        self.is_static = true;
        self
    }

    /// Sets the private flag.
    #[must_use]
    pub const fn private(mut self, is_private: bool) -> Self {
        self.is_private = is_private;
        self
    }

    /// Attaches a tag.
    #[must_use]
    pub fn tag(mut self, tag: impl Into<TagUsage>) -> Self {
        self.tags.push(tag.into());
        self
    }
}

/// A type declaration as supplied by the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Declaration {
    /// Qualified type name.
    pub name: String,
    /// Qualified name of the direct supertype, if any.
    #[serde(default)]
    pub super_type: Option<String>,
    /// Fields in declaration order.
    #[serde(default)]
    pub fields: Vec<FieldDecl>,
    /// Methods and constructors already present.
    #[serde(default)]
    pub members: Vec<MemberSignature>,
    /// Tags attached to the type.
    #[serde(default)]
    pub tags: Vec<TagUsage>,
    /// Existing source text, used to splice generated members in place.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

impl Declaration {
    /// Starts building a declaration for `name`.
    ///
    /// # Examples
    ///
    /// ```
    /// use accrete::model::{Declaration, FieldDecl};
    ///
    /// let person = Declaration::builder("com.example.Person")
    ///     .field(FieldDecl::new("name", "String"))
    ///     .field(FieldDecl::new("age", "int").with_final())
    ///     .tag("Data")
    ///     .build();
    /// assert_eq!(person.fields.len(), 2);
    /// assert!(person.has_tag("Data"));
    /// ```
    #[must_use]
    pub fn builder(name: impl Into<String>) -> DeclarationBuilder {
        DeclarationBuilder::new(name)
    }

    /// Whether a tag called `name` is attached to the type.
    #[must_use]
    pub fn has_tag(&self, name: &str) -> bool {
        self.tags.iter().any(|tag| tag.is(name))
    }
}

/// Builder for [`Declaration`].
#[derive(Debug, Clone)]
pub struct DeclarationBuilder {
    declaration: Declaration,
}

impl DeclarationBuilder {
    /// Creates a builder for a type with no fields, members, or tags.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            declaration: Declaration {
                name: name.into(),
                super_type: None,
                fields: Vec::new(),
                members: Vec::new(),
                tags: Vec::new(),
                source: None,
            },
        }
    }

    /// Sets the direct supertype.
    #[must_use]
    pub fn extends(mut self, super_type: impl Into<String>) -> Self {
        self.declaration.super_type = Some(super_type.into());
        self
    }

    /// Appends a field.
    #[must_use]
    pub fn field(mut self, field: FieldDecl) -> Self {
        self.declaration.fields.push(field);
        self
    }

    /// Records an existing member.
    #[must_use]
    pub fn member(mut self, member: MemberSignature) -> Self {
        self.declaration.members.push(member);
        self
    }

    /// Attaches a tag.
    #[must_use]
    pub fn tag(mut self, tag: impl Into<TagUsage>) -> Self {
        self.declaration.tags.push(tag.into());
        self
    }

    /// Supplies existing source text.
    #[must_use]
    pub fn source(mut self, source: impl Into<String>) -> Self {
        self.declaration.source = Some(source.into());
        self
    }

    /// Finishes the declaration.
    #[must_use]
    pub fn build(self) -> Declaration {
        self.declaration
    }
}

/// The host's reflection facility: resolves declarations by qualified name.
pub trait DeclarationSource {
    /// Returns the declaration named `name`, if known.
    fn declaration(&self, name: &str) -> Option<&Declaration>;
}

/// In-memory [`DeclarationSource`].
///
/// # Examples
///
/// ```
/// use accrete::model::{Declaration, DeclarationSet, DeclarationSource};
///
/// let set = DeclarationSet::from_json(r#"[{ "name": "com.example.Empty" }]"#)?;
/// assert!(set.declaration("com.example.Empty").is_some());
/// # Ok::<_, accrete::AccreteError>(())
/// ```
#[derive(Debug, Default, Clone)]
pub struct DeclarationSet {
    declarations: IndexMap<String, Declaration>,
}

impl DeclarationSet {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `declaration`, replacing any earlier one with the same name.
    ///
    /// A replacement keeps the position of the declaration it replaces.
    pub fn insert(&mut self, declaration: Declaration) {
        self.declarations
            .insert(declaration.name.clone(), declaration);
    }

    /// Parses a JSON array of declarations.
    ///
    /// # Errors
    ///
    /// Returns [`crate::AccreteError::Json`] when the payload is not a valid
    /// array of declarations.
    pub fn from_json(json: &str) -> AccreteResult<Self> {
        let declarations: Vec<Declaration> = serde_json::from_str(json)?;
        Ok(declarations.into_iter().collect())
    }

    /// Declarations in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Declaration> {
        self.declarations.values()
    }

    /// Number of declarations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.declarations.len()
    }

    /// Whether the set is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }
}

impl FromIterator<Declaration> for DeclarationSet {
    fn from_iter<I: IntoIterator<Item = Declaration>>(iter: I) -> Self {
        let mut set = Self::new();
        for declaration in iter {
            set.insert(declaration);
        }
        set
    }
}

impl DeclarationSource for DeclarationSet {
    fn declaration(&self, name: &str) -> Option<&Declaration> {
        self.declarations.get(name)
    }
}
