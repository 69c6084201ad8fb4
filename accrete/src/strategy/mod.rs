//! Synthesis strategies, one per supported tag.
//!
//! The set is closed: [`Strategy`] enumerates every strategy and
//! [`Strategy::apply`] matches exhaustively. Composite strategies such as
//! [`Strategy::Data`] call the primitive ones against the same
//! [`PlanBuilder`], so collision checks see everything the composite has
//! already planned.

mod accessors;
mod builder;
mod constructors;
mod convert;
mod copy;
mod equality;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::HandlerError;
use crate::model::{TagUsage, TypeDescriptor};
use crate::plan::{EmissionContext, EmissionPlan, PlanBuilder};

/// A member-synthesis strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Strategy {
    /// Constructor without parameters.
    NoArgsConstructor,
    /// Constructor over every field.
    AllArgsConstructor,
    /// Constructor over final and non-null fields.
    RequiredArgsConstructor,
    /// A reader per field.
    Getter,
    /// A mutator per non-final field.
    Setter,
    /// Readers and mutators together.
    Accessors,
    /// `equals`, `hashCode`, and `toString` over the selected fields.
    EqualsAndHashCode,
    /// Required-arguments constructor, accessors, and the equality triad.
    Data,
    /// All-arguments constructor, readers, and the equality triad over an
    /// immutable view of the type.
    Value,
    /// Nested fluent builder with a static factory.
    Builder,
    /// Shallow `copy()` through the no-argument constructor.
    Copy,
    /// `as<Target>()` conversion methods for one field.
    Convert,
}

impl Strategy {
    /// Every strategy, in dispatch priority order.
    pub const ALL: [Self; 12] = [
        Self::NoArgsConstructor,
        Self::AllArgsConstructor,
        Self::RequiredArgsConstructor,
        Self::Data,
        Self::Value,
        Self::Getter,
        Self::Setter,
        Self::Accessors,
        Self::EqualsAndHashCode,
        Self::Builder,
        Self::Copy,
        Self::Convert,
    ];

    /// Tag name the standard registry binds to this strategy.
    #[must_use]
    pub const fn default_tag(self) -> &'static str {
        match self {
            Self::NoArgsConstructor => "NoArgsConstructor",
            Self::AllArgsConstructor => "AllArgsConstructor",
            Self::RequiredArgsConstructor => "RequiredArgsConstructor",
            Self::Getter => "Getter",
            Self::Setter => "Setter",
            Self::Accessors => "Accessors",
            Self::EqualsAndHashCode => "EqualsAndHashCode",
            Self::Data => "Data",
            Self::Value => "Value",
            Self::Builder => "Builder",
            Self::Copy => "Copy",
            Self::Convert => "Convert",
        }
    }

    /// Dispatch rank within a round; lower runs first.
    ///
    /// Constructors come first so that later strategies can rely on them:
    /// a builder reuses an all-arguments constructor and `copy()` needs a
    /// no-argument one.
    #[must_use]
    pub const fn priority(self) -> u8 {
        match self {
            Self::NoArgsConstructor | Self::AllArgsConstructor | Self::RequiredArgsConstructor => 0,
            Self::Data | Self::Value => 1,
            Self::Getter | Self::Setter | Self::Accessors => 2,
            Self::EqualsAndHashCode => 3,
            Self::Builder => 4,
            Self::Copy => 5,
            Self::Convert => 6,
        }
    }

    /// Plans the members this strategy adds to `descriptor`.
    ///
    /// The returned plan is not committed; the caller commits it to
    /// `context` once it decides to keep it.
    ///
    /// # Errors
    ///
    /// Returns [`HandlerError`] when a tag parameter is malformed, names an
    /// unknown field, or a prerequisite member is missing. Nothing planned
    /// before the failure is kept.
    pub fn apply(
        self,
        descriptor: &TypeDescriptor,
        usage: &TagUsage,
        context: &mut EmissionContext,
    ) -> Result<EmissionPlan, HandlerError> {
        let mut plan = PlanBuilder::new(context, usage);
        match self {
            Self::NoArgsConstructor => constructors::no_args(descriptor, usage, &mut plan)?,
            Self::AllArgsConstructor => constructors::all_args(descriptor, usage, &mut plan)?,
            Self::RequiredArgsConstructor => {
                constructors::required_args(descriptor, usage, &mut plan)?;
            }
            Self::Getter => accessors::getters(descriptor, &mut plan),
            Self::Setter => accessors::setters(descriptor, &mut plan),
            Self::Accessors => {
                accessors::getters(descriptor, &mut plan);
                accessors::setters(descriptor, &mut plan);
            }
            Self::EqualsAndHashCode => equality::triad(descriptor, usage, &mut plan)?,
            Self::Data => {
                constructors::required_args(descriptor, usage, &mut plan)?;
                accessors::getters(descriptor, &mut plan);
                accessors::setters(descriptor, &mut plan);
                equality::triad(descriptor, usage, &mut plan)?;
            }
            Self::Value => {
                let immutable = descriptor.with_all_fields_final();
                constructors::all_args(&immutable, usage, &mut plan)?;
                accessors::getters(&immutable, &mut plan);
                equality::triad(&immutable, usage, &mut plan)?;
            }
            Self::Builder => builder::builder(descriptor, usage, &mut plan)?,
            Self::Copy => copy::copy(descriptor, usage, &mut plan)?,
            Self::Convert => convert::convert(descriptor, usage, &mut plan)?,
        }
        Ok(plan.finish())
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.default_tag())
    }
}

#[cfg(test)]
mod tests;
