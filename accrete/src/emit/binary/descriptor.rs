//! Class-file type descriptors.
//!
//! Field descriptors look like `I`, `[J`, or `Ljava/lang/String;`; method
//! descriptors wrap the parameter descriptors in parentheses and append the
//! return descriptor, as in `(Ljava/lang/String;I)V`. Decoded types use the
//! source spelling: `int`, `long[]`, `java.lang.String`.

use crate::error::DescriptorError;

const PRIMITIVES: [(&str, char); 8] = [
    ("boolean", 'Z'),
    ("byte", 'B'),
    ("char", 'C'),
    ("short", 'S'),
    ("int", 'I'),
    ("long", 'J'),
    ("float", 'F'),
    ("double", 'D'),
];

/// Simple names resolved without an import, mapped to internal names.
const WELL_KNOWN: [(&str, &str); 17] = [
    ("Object", "java/lang/Object"),
    ("String", "java/lang/String"),
    ("CharSequence", "java/lang/CharSequence"),
    ("Number", "java/lang/Number"),
    ("Boolean", "java/lang/Boolean"),
    ("Byte", "java/lang/Byte"),
    ("Character", "java/lang/Character"),
    ("Short", "java/lang/Short"),
    ("Integer", "java/lang/Integer"),
    ("Long", "java/lang/Long"),
    ("Float", "java/lang/Float"),
    ("Double", "java/lang/Double"),
    ("List", "java/util/List"),
    ("Set", "java/util/Set"),
    ("Map", "java/util/Map"),
    ("Collection", "java/util/Collection"),
    ("Optional", "java/util/Optional"),
];

/// Converts a dotted type name to its internal, slash-separated form.
#[must_use]
pub fn internal_name(type_name: &str) -> String {
    type_name.replace('.', "/")
}

/// Encodes a source type name as a field descriptor.
///
/// Generic arguments are erased and varargs become arrays.
///
/// # Errors
///
/// Returns [`DescriptorError::Unrepresentable`] for `void`, empty names,
/// and names containing descriptor punctuation.
///
/// # Examples
///
/// ```
/// use accrete::emit::binary::field_descriptor;
///
/// assert_eq!(field_descriptor("int").unwrap(), "I");
/// assert_eq!(field_descriptor("String[]").unwrap(), "[Ljava/lang/String;");
/// assert_eq!(field_descriptor("java.util.List<String>").unwrap(), "Ljava/util/List;");
/// ```
pub fn field_descriptor(type_name: &str) -> Result<String, DescriptorError> {
    let unrepresentable = || DescriptorError::Unrepresentable(type_name.to_owned());
    let mut base = strip_generics(type_name);
    let mut dimensions = 0_usize;
    if let Some(stem) = base.strip_suffix("...") {
        base = stem.to_owned();
        dimensions += 1;
    }
    while let Some(stem) = base.strip_suffix("[]") {
        base = stem.to_owned();
        dimensions += 1;
    }
    if base.is_empty()
        || base == "void"
        || base
            .chars()
            .any(|c| matches!(c, ';' | '(' | ')' | '[' | ']' | '/' | '<' | '>'))
    {
        return Err(unrepresentable());
    }

    let mut descriptor = "[".repeat(dimensions);
    if let Some((_, code)) = PRIMITIVES.iter().find(|(name, _)| *name == base) {
        descriptor.push(*code);
    } else {
        let internal = WELL_KNOWN
            .iter()
            .find(|(simple, _)| *simple == base)
            .map_or_else(|| internal_name(&base), |(_, internal)| (*internal).to_owned());
        descriptor.push('L');
        descriptor.push_str(&internal);
        descriptor.push(';');
    }
    Ok(descriptor)
}

/// Encodes a method descriptor from parameter and return type names.
///
/// # Errors
///
/// Returns [`DescriptorError::Unrepresentable`] when any type cannot be
/// encoded.
///
/// # Examples
///
/// ```
/// use accrete::emit::binary::method_descriptor;
///
/// let descriptor = method_descriptor(["String", "int"], "void").unwrap();
/// assert_eq!(descriptor, "(Ljava/lang/String;I)V");
/// ```
pub fn method_descriptor<I, S>(
    parameter_types: I,
    return_type: &str,
) -> Result<String, DescriptorError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut descriptor = String::from("(");
    for parameter in parameter_types {
        descriptor.push_str(&field_descriptor(parameter.as_ref())?);
    }
    descriptor.push(')');
    if return_type.trim() == "void" {
        descriptor.push('V');
    } else {
        descriptor.push_str(&field_descriptor(return_type)?);
    }
    Ok(descriptor)
}

/// Decodes a field descriptor into a source type name.
///
/// # Errors
///
/// Returns [`DescriptorError`] when `descriptor` is malformed or has
/// trailing characters.
pub fn parse_field_descriptor(descriptor: &str) -> Result<String, DescriptorError> {
    let mut cursor = Cursor::new(descriptor);
    let ty = cursor.value_type()?;
    cursor.expect_end()?;
    Ok(ty)
}

/// Decodes a method descriptor into parameter type names and the return
/// type name.
///
/// # Errors
///
/// Returns [`DescriptorError`] when `descriptor` is malformed.
///
/// # Examples
///
/// ```
/// use accrete::emit::binary::parse_method_descriptor;
///
/// let (params, ret) = parse_method_descriptor("(Ljava/lang/String;[I)Z").unwrap();
/// assert_eq!(params, ["java.lang.String", "int[]"]);
/// assert_eq!(ret, "boolean");
/// ```
pub fn parse_method_descriptor(descriptor: &str) -> Result<(Vec<String>, String), DescriptorError> {
    let mut cursor = Cursor::new(descriptor);
    cursor.expect('(')?;
    let mut parameters = Vec::new();
    while cursor.peek()? != ')' {
        parameters.push(cursor.value_type()?);
    }
    cursor.expect(')')?;
    let return_type = if cursor.peek()? == 'V' {
        cursor.bump()?;
        "void".to_owned()
    } else {
        cursor.value_type()?
    };
    cursor.expect_end()?;
    Ok((parameters, return_type))
}

fn strip_generics(type_name: &str) -> String {
    let mut depth = 0_usize;
    type_name
        .chars()
        .filter(|&c| match c {
            '<' => {
                depth += 1;
                false
            }
            '>' => {
                depth = depth.saturating_sub(1);
                false
            }
            c => depth == 0 && !c.is_whitespace(),
        })
        .collect()
}

struct Cursor<'a> {
    text: &'a str,
    chars: Vec<char>,
    offset: usize,
}

impl<'a> Cursor<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            text,
            chars: text.chars().collect(),
            offset: 0,
        }
    }

    fn truncated(&self) -> DescriptorError {
        DescriptorError::Truncated(self.text.to_owned())
    }

    fn unexpected(&self, found: char) -> DescriptorError {
        DescriptorError::Unexpected {
            descriptor: self.text.to_owned(),
            found,
            offset: self.offset,
        }
    }

    fn peek(&self) -> Result<char, DescriptorError> {
        self.chars
            .get(self.offset)
            .copied()
            .ok_or_else(|| self.truncated())
    }

    fn bump(&mut self) -> Result<char, DescriptorError> {
        let c = self.peek()?;
        self.offset += 1;
        Ok(c)
    }

    fn expect(&mut self, wanted: char) -> Result<(), DescriptorError> {
        match self.peek()? {
            c if c == wanted => {
                self.offset += 1;
                Ok(())
            }
            c => Err(self.unexpected(c)),
        }
    }

    fn expect_end(&self) -> Result<(), DescriptorError> {
        match self.chars.get(self.offset) {
            None => Ok(()),
            Some(&c) => Err(self.unexpected(c)),
        }
    }

    fn value_type(&mut self) -> Result<String, DescriptorError> {
        let mut dimensions = 0_usize;
        while self.peek()? == '[' {
            self.offset += 1;
            dimensions += 1;
        }
        let code = self.peek()?;
        let mut ty = if let Some((name, _)) = PRIMITIVES.iter().find(|(_, c)| *c == code) {
            self.offset += 1;
            (*name).to_owned()
        } else if code == 'L' {
            self.offset += 1;
            let mut name = String::new();
            loop {
                match self.bump()? {
                    ';' if !name.is_empty() => break,
                    '/' => name.push('.'),
                    c @ (';' | '(' | ')' | '[' | '.') => {
                        self.offset -= 1;
                        return Err(self.unexpected(c));
                    }
                    c => name.push(c),
                }
            }
            name
        } else {
            return Err(self.unexpected(code));
        };
        for _ in 0..dimensions {
            ty.push_str("[]");
        }
        Ok(ty)
    }
}
