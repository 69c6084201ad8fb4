//! Structural model of the types under synthesis.
//!
//! Hosts describe each type with a [`Declaration`]; the
//! [`TypeModelBuilder`] resolves the inheritance chain into an immutable
//! [`TypeDescriptor`] that strategies query.

mod builder;
mod declaration;
mod descriptor;
mod member;
mod tag;

pub use builder::TypeModelBuilder;
pub use declaration::{
    Declaration, DeclarationBuilder, DeclarationSet, DeclarationSource, FieldDecl,
};
pub use descriptor::{FieldDescriptor, TypeDescriptor};
pub use member::{CONSTRUCTOR_NAME, MemberKind, MemberSignature};
pub use tag::{TagUsage, TagValue, field_tags};

#[cfg(test)]
mod tests;
