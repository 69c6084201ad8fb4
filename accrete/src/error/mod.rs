//! Error types produced by the synthesis engine.
//!
//! Handler failures never escape the driver: they are converted into
//! diagnostics scoped to the failing declaration. [`AccreteError`] covers the
//! remaining host-facing failures (configuration, I/O, malformed input).

mod constructors;
mod types;

pub use types::{AccreteError, AccreteResult, DescriptorError, HandlerError, ModelError};
