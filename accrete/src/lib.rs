//! Declarative member synthesis for class-like type declarations.
//!
//! `accrete` reads a structural description of a type (its fields,
//! existing members, supertype chain, and declarative tags) and adds the
//! members the tags ask for: constructors, accessors, value equality,
//! builders, copy and conversion methods. Members can be emitted as source
//! text or appended to an already-compiled class.
//!
//! A host drives an [`Engine`] round by round:
//!
//! ```
//! use accrete::{
//!     Control, Declaration, DeclarationSet, Diagnostics, Engine, EngineConfig, FieldDecl,
//!     HandlerRegistry, Host, MemorySink, Round,
//! };
//!
//! let declarations: DeclarationSet = [Declaration::builder("com.example.Person")
//!     .field(FieldDecl::new("name", "String").tag("NonNull"))
//!     .field(FieldDecl::new("age", "int").with_final())
//!     .tag("RequiredArgsConstructor")
//!     .tag("Accessors")
//!     .build()]
//! .into_iter()
//! .collect();
//!
//! let registry = HandlerRegistry::standard();
//! let mut engine = Engine::new(&registry, EngineConfig::default());
//! let mut artifacts = MemorySink::new();
//! let mut diagnostics = Diagnostics::new();
//! let mut host = Host::new(&declarations, &mut artifacts, &mut diagnostics);
//!
//! let round = Round::from_declarations(&declarations);
//! assert_eq!(engine.process(&round, &mut host), Control::Continue);
//! assert_eq!(engine.process(&Round::terminal(), &mut host), Control::Stop);
//!
//! let source = artifacts.get("com/example/Person.java").unwrap();
//! assert!(source.contains("public Person(String name, int age)"));
//! assert!(source.contains("public void setName(String name)"));
//! assert!(!source.contains("setAge"));
//! ```

pub mod config;
pub mod diagnostics;
pub mod driver;
pub mod emit;
mod error;
pub mod model;
pub mod naming;
pub mod plan;
pub mod registry;
pub mod strategy;

pub use config::EngineConfig;
pub use diagnostics::{Diagnostic, DiagnosticSink, Diagnostics, Severity, TracingSink};
pub use driver::{Control, DriverState, Engine, Host, Round, TypeSynthesis};
pub use emit::{ArtifactSink, DirSink, MemorySink, SourceEmitter};
pub use error::{AccreteError, AccreteResult, DescriptorError, HandlerError, ModelError};
pub use model::{
    Declaration, DeclarationSet, DeclarationSource, FieldDecl, MemberSignature, TagUsage,
    TagValue, TypeDescriptor, TypeModelBuilder,
};
pub use registry::{HandlerRegistry, HandlerRegistryBuilder};
pub use strategy::Strategy;
