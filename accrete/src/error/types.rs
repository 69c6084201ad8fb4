//! Error enums for each engine concern.

use camino::Utf8PathBuf;
use figment::Error as FigmentError;
use thiserror::Error;

/// Convenience alias for results carrying an [`AccreteError`].
pub type AccreteResult<T> = Result<T, AccreteError>;

/// Host-facing failures raised outside per-declaration dispatch.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AccreteError {
    /// Engine configuration could not be gathered or extracted.
    #[error("failed to load engine configuration: {0}")]
    Config(#[from] Box<FigmentError>),

    /// The structural description of a type was inconsistent.
    #[error(transparent)]
    Model(#[from] ModelError),

    /// A generated artefact could not be written.
    #[error("I/O error at {path}: {source}")]
    Io {
        /// Path of the artefact being written.
        path: Utf8PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// A structural description could not be decoded from JSON.
    #[error("failed to parse structural description: {0}")]
    Json(#[from] serde_json::Error),

    /// A compiled-class descriptor was malformed.
    #[error(transparent)]
    Descriptor(#[from] DescriptorError),
}

/// Failures while building a type model from declarations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    /// The inheritance chain loops back onto itself.
    #[error("cyclic inheritance detected: {cycle}")]
    CyclicInheritance {
        /// Chain of type names participating in the cycle.
        cycle: String,
    },

    /// A declaration named by the host could not be resolved.
    #[error("no structural description available for '{0}'")]
    MissingDeclaration(String),
}

/// Failures raised by a synthesis strategy for one declaration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HandlerError {
    /// A tag parameter had the wrong shape.
    #[error("parameter '{parameter}' {message}")]
    InvalidParameter {
        /// Tag carrying the parameter.
        tag: String,
        /// Parameter name.
        parameter: String,
        /// What was wrong with the value.
        message: String,
    },

    /// A tag parameter referred to a field the type does not have.
    #[error("unknown field '{field}'")]
    UnknownField {
        /// Tag carrying the reference.
        tag: String,
        /// Field name that failed to resolve.
        field: String,
    },

    /// A member the strategy depends on is absent and cannot be synthesised.
    #[error("{message}")]
    MissingPrerequisite {
        /// Description naming the missing prerequisite.
        message: String,
    },

    /// A type could not be expressed in descriptor form.
    #[error(transparent)]
    Descriptor(#[from] DescriptorError),
}

/// Malformed type or method descriptors in a compiled class.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DescriptorError {
    /// The descriptor ended before a complete type was read.
    #[error("descriptor '{0}' ends unexpectedly")]
    Truncated(String),

    /// An unexpected character was found.
    #[error("descriptor '{descriptor}' has unexpected '{found}' at offset {offset}")]
    Unexpected {
        /// Full descriptor text.
        descriptor: String,
        /// Offending character.
        found: char,
        /// Character offset of the offending character.
        offset: usize,
    },

    /// A type name cannot be expressed as a descriptor.
    #[error("type '{0}' cannot be expressed as a descriptor")]
    Unrepresentable(String),
}
