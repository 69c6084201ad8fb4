//! Emission back-ends.
//!
//! [`source`] renders plans as text for the host to compile alongside the
//! declaration; [`binary`] appends members to an already-compiled class.
//! Both consume the same [`EmissionPlan`](crate::plan::EmissionPlan)s, so
//! they add the same members.

mod artifact;
pub mod binary;
pub mod source;

pub use artifact::{ArtifactSink, DirSink, MemorySink, artifact_path};
pub use source::{SourceArtifact, SourceEmitter};
