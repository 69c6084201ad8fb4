//! Builds [`TypeDescriptor`]s by walking a declaration and its ancestors.

use std::sync::Arc;

use super::{Declaration, DeclarationSource, FieldDecl, FieldDescriptor, TypeDescriptor};
use crate::error::ModelError;
use crate::naming;

/// Walks declarations to produce immutable type descriptors.
///
/// Field order: the declaration's own non-static fields in declaration
/// order, then each ancestor's. A field whose name is already visible from a
/// subtype is hidden (the subtype's field shadows it), so the ordered field
/// list and [`TypeDescriptor::field_named`] always agree.
///
/// # Examples
///
/// ```
/// use accrete::model::{Declaration, DeclarationSet, FieldDecl, TypeModelBuilder};
///
/// let set: DeclarationSet = [
///     Declaration::builder("demo.Base").field(FieldDecl::new("id", "long")).build(),
///     Declaration::builder("demo.Child")
///         .extends("demo.Base")
///         .field(FieldDecl::new("name", "String"))
///         .build(),
/// ]
/// .into_iter()
/// .collect();
///
/// let builder = TypeModelBuilder::new(&set);
/// let child = builder.build_named("demo.Child")?;
/// let names: Vec<_> = child.fields().iter().map(|f| f.name.as_str()).collect();
/// assert_eq!(names, ["name", "id"]);
/// # Ok::<_, accrete::ModelError>(())
/// ```
#[derive(Clone, Copy)]
pub struct TypeModelBuilder<'a> {
    source: &'a dyn DeclarationSource,
}

impl<'a> TypeModelBuilder<'a> {
    /// Creates a builder resolving supertypes through `source`.
    #[must_use]
    pub const fn new(source: &'a dyn DeclarationSource) -> Self {
        Self { source }
    }

    /// Builds the descriptor for the declaration called `name`.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::MissingDeclaration`] when `name` cannot be
    /// resolved, or any error from [`Self::build`].
    pub fn build_named(&self, name: &str) -> Result<TypeDescriptor, ModelError> {
        let declaration = self
            .source
            .declaration(name)
            .ok_or_else(|| ModelError::MissingDeclaration(name.to_owned()))?;
        self.build(declaration)
    }

    /// Builds the descriptor for `declaration`.
    ///
    /// Supertypes the source cannot resolve are treated as opaque ancestors
    /// contributing no fields.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::CyclicInheritance`] when the supertype chain
    /// loops.
    pub fn build(&self, declaration: &Declaration) -> Result<TypeDescriptor, ModelError> {
        let mut stack = Vec::new();
        self.build_inner(declaration, &mut stack)
    }

    fn build_inner(
        &self,
        declaration: &Declaration,
        stack: &mut Vec<String>,
    ) -> Result<TypeDescriptor, ModelError> {
        if let Some(start) = stack.iter().position(|name| *name == declaration.name) {
            let mut cycle: Vec<&str> = stack
                .iter()
                .skip(start)
                .map(String::as_str)
                .collect();
            cycle.push(&declaration.name);
            return Err(ModelError::CyclicInheritance {
                cycle: cycle.join(" -> "),
            });
        }

        stack.push(declaration.name.clone());
        let super_type = self.resolve_super(declaration, stack)?;
        stack.pop();

        let mut fields: Vec<FieldDescriptor> = declaration
            .fields
            .iter()
            .filter(|field| !field.is_static)
            .map(|field| describe_field(field, &declaration.name))
            .collect();

        if let Some(parent) = &super_type {
            for inherited in parent.fields() {
                if fields.iter().any(|own| own.name == inherited.name) {
                    tracing::debug!(
                        element = %declaration.name,
                        field = %inherited.name,
                        hidden_in = %inherited.declared_in,
                        "ancestor field shadowed by subtype field"
                    );
                    continue;
                }
                fields.push(inherited.clone());
            }
        }

        Ok(TypeDescriptor {
            qualified_name: declaration.name.clone(),
            super_type,
            fields,
            existing_members: declaration.members.iter().cloned().collect(),
            tags: declaration.tags.clone(),
        })
    }

    fn resolve_super(
        &self,
        declaration: &Declaration,
        stack: &mut Vec<String>,
    ) -> Result<Option<Arc<TypeDescriptor>>, ModelError> {
        let Some(name) = declaration
            .super_type
            .as_deref()
            .filter(|name| !naming::is_root_type(name))
        else {
            return Ok(None);
        };
        match self.source.declaration(name) {
            Some(parent) => self.build_inner(parent, stack).map(|d| Some(Arc::new(d))),
            None => {
                tracing::debug!(
                    element = %declaration.name,
                    super_type = %name,
                    "supertype not resolvable; treating as opaque"
                );
                Ok(None)
            }
        }
    }
}

fn describe_field(field: &FieldDecl, declared_in: &str) -> FieldDescriptor {
    FieldDescriptor {
        name: field.name.clone(),
        declared_type: field.declared_type.clone(),
        is_final: field.is_final,
        is_static: false,
        is_private: field.is_private,
        tags: field.tags.clone(),
        declared_in: declared_in.to_owned(),
    }
}
