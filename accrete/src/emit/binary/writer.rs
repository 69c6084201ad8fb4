//! The writer step of the binary pipeline.

use super::class::{CompiledClass, CompiledMethod};

/// A member to append to a compiled class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MemberAddition {
    /// A method or constructor.
    Method(CompiledMethod),
    /// A nested class, such as a builder.
    NestedClass(CompiledClass),
}

impl MemberAddition {
    /// Name of the added member; the internal name for nested classes.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Method(method) => &method.name,
            Self::NestedClass(class) => &class.name,
        }
    }
}

/// Receives member additions in order.
///
/// Writers append. Members already present in the class are never
/// rewritten or reordered.
pub trait ClassWriter {
    /// Appends a method or constructor.
    fn add_method(&mut self, method: CompiledMethod);

    /// Appends a nested class.
    fn add_nested_class(&mut self, class: CompiledClass);
}

/// Feeds `additions` to `writer` in order.
pub fn apply(additions: Vec<MemberAddition>, writer: &mut dyn ClassWriter) {
    for addition in additions {
        match addition {
            MemberAddition::Method(method) => writer.add_method(method),
            MemberAddition::NestedClass(class) => writer.add_nested_class(class),
        }
    }
}

/// In-memory writer producing an extended copy of a class.
#[derive(Debug, Clone)]
pub struct ClassRewriter {
    class: CompiledClass,
}

impl ClassRewriter {
    /// Starts from `class`.
    #[must_use]
    pub const fn new(class: CompiledClass) -> Self {
        Self { class }
    }

    /// The rewritten class.
    #[must_use]
    pub fn finish(self) -> CompiledClass {
        self.class
    }
}

impl ClassWriter for ClassRewriter {
    fn add_method(&mut self, method: CompiledMethod) {
        self.class.methods.push(method);
    }

    fn add_nested_class(&mut self, class: CompiledClass) {
        self.class.nested.push(class);
    }
}
