//! Declarative tags and their parameters.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::HandlerError;

/// A parameter value carried by a [`TagUsage`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TagValue {
    /// Boolean flag, such as `force = true`.
    Bool(bool),
    /// Integer literal.
    Int(i64),
    /// String literal or expression text.
    Str(String),
    /// Array of values, such as `exclude = {"id", "version"}`.
    List(Vec<TagValue>),
}

impl TagValue {
    const fn kind(&self) -> &'static str {
        match self {
            Self::Bool(_) => "a boolean",
            Self::Int(_) => "an integer",
            Self::Str(_) => "a string",
            Self::List(_) => "a list",
        }
    }
}

impl fmt::Display for TagValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(i) => write!(f, "{i}"),
            Self::Str(s) => write!(f, "\"{s}\""),
            Self::List(items) => {
                f.write_str("{")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("}")
            }
        }
    }
}

impl From<bool> for TagValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for TagValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<&str> for TagValue {
    fn from(value: &str) -> Self {
        Self::Str(value.to_owned())
    }
}

impl From<String> for TagValue {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl<T: Into<Self>> From<Vec<T>> for TagValue {
    fn from(values: Vec<T>) -> Self {
        Self::List(values.into_iter().map(Into::into).collect())
    }
}

/// One tag attached to a declaration or field, with its parameters.
///
/// # Examples
///
/// ```
/// use accrete::model::TagUsage;
///
/// let tag = TagUsage::new("lombok.EqualsAndHashCode").with("exclude", vec!["id"]);
/// assert!(tag.is("EqualsAndHashCode"));
/// assert_eq!(tag.string_list("exclude")?, Some(vec!["id".to_owned()]));
/// # Ok::<_, accrete::HandlerError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagUsage {
    /// Tag name as written, possibly qualified.
    pub name: String,
    /// Named parameters.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub parameters: BTreeMap<String, TagValue>,
}

impl TagUsage {
    /// Creates a tag without parameters.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parameters: BTreeMap::new(),
        }
    }

    /// Adds a parameter, replacing any earlier value under `key`.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<TagValue>) -> Self {
        self.parameters.insert(key.into(), value.into());
        self
    }

    /// Whether this tag is `name`, written either bare or qualified.
    ///
    /// `lombok.Builder.Default` is `Builder.Default`; `Default` alone is not.
    #[must_use]
    pub fn is(&self, name: &str) -> bool {
        self.name == name
            || self
                .name
                .strip_suffix(name)
                .is_some_and(|prefix| prefix.ends_with('.'))
    }

    /// Raw parameter lookup.
    #[must_use]
    pub fn parameter(&self, key: &str) -> Option<&TagValue> {
        self.parameters.get(key)
    }

    /// Reads a boolean parameter.
    ///
    /// # Errors
    ///
    /// Returns [`HandlerError::InvalidParameter`] when the value is not a
    /// boolean.
    pub fn flag(&self, key: &str) -> Result<Option<bool>, HandlerError> {
        match self.parameter(key) {
            None => Ok(None),
            Some(TagValue::Bool(b)) => Ok(Some(*b)),
            Some(other) => Err(self.mismatch(key, "a boolean", other)),
        }
    }

    /// Reads a string parameter.
    ///
    /// # Errors
    ///
    /// Returns [`HandlerError::InvalidParameter`] when the value is not a
    /// string.
    pub fn string(&self, key: &str) -> Result<Option<&str>, HandlerError> {
        match self.parameter(key) {
            None => Ok(None),
            Some(TagValue::Str(s)) => Ok(Some(s.as_str())),
            Some(other) => Err(self.mismatch(key, "a string", other)),
        }
    }

    /// Reads a non-empty identifier parameter.
    ///
    /// # Errors
    ///
    /// Returns [`HandlerError::InvalidParameter`] when the value is not a
    /// string or is blank.
    pub fn identifier(&self, key: &str) -> Result<Option<&str>, HandlerError> {
        match self.string(key)? {
            Some(value) if value.trim().is_empty() => Err(HandlerError::invalid_parameter(
                &self.name,
                key,
                "must not be blank",
            )),
            other => Ok(other),
        }
    }

    /// Reads a list of strings; a single string is accepted as a one-element
    /// list.
    ///
    /// # Errors
    ///
    /// Returns [`HandlerError::InvalidParameter`] when the value or any of its
    /// elements is not a string.
    pub fn string_list(&self, key: &str) -> Result<Option<Vec<String>>, HandlerError> {
        match self.parameter(key) {
            None => Ok(None),
            Some(TagValue::Str(s)) => Ok(Some(vec![s.clone()])),
            Some(TagValue::List(items)) => items
                .iter()
                .map(|item| match item {
                    TagValue::Str(s) => Ok(s.clone()),
                    other => Err(self.mismatch(key, "a list of strings", other)),
                })
                .collect::<Result<Vec<_>, _>>()
                .map(Some),
            Some(other) => Err(self.mismatch(key, "a list of strings", other)),
        }
    }

    fn mismatch(&self, key: &str, expected: &str, found: &TagValue) -> HandlerError {
        HandlerError::invalid_parameter(
            &self.name,
            key,
            format!("must be {expected}, found {} {found}", found.kind()),
        )
    }
}

impl fmt::Display for TagUsage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "@{}", self.name)?;
        if self.parameters.is_empty() {
            return Ok(());
        }
        f.write_str("(")?;
        for (i, (key, value)) in self.parameters.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{key} = {value}")?;
        }
        f.write_str(")")
    }
}

impl From<&str> for TagUsage {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

/// Field tags recognised by the standard strategies.
pub mod field_tags {
    /// Marks a field as required and null-checked.
    pub const NON_NULL: [&str; 2] = ["NonNull", "Required"];
    /// Supplies a builder default through its `value` parameter.
    pub const BUILDER_DEFAULT: &str = "Builder.Default";
    /// Excludes a field from the equality triad.
    pub const EXCLUDE: [&str; 2] = ["EqualsAndHashCode.Exclude", "ToString.Exclude"];
}
