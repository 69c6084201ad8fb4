//! Source-level back-end: renders plans as text and places it in an
//! artefact.

mod render;

use camino::Utf8PathBuf;

use self::render::SourceWriter;
use super::artifact_path;
use crate::config::EngineConfig;
use crate::model::Declaration;
use crate::naming;
use crate::plan::EmissionPlan;

/// A rendered source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceArtifact {
    /// Path relative to the artefact root.
    pub path: Utf8PathBuf,
    /// File contents.
    pub contents: String,
}

/// Renders emission plans as Java-like source.
///
/// Members are indented one level, as they would sit inside the type body.
/// When the declaration carries its source text the members are spliced in
/// before the final closing brace; otherwise a companion fragment holding
/// only the members is produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceEmitter {
    emit_header: bool,
    file_extension: String,
}

impl Default for SourceEmitter {
    fn default() -> Self {
        Self::new(&EngineConfig::default())
    }
}

impl SourceEmitter {
    /// Creates an emitter honouring `config`.
    #[must_use]
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            emit_header: config.emit_header,
            file_extension: config.file_extension.clone(),
        }
    }

    /// Renders every item of `plans` as members of `type_name`.
    #[must_use]
    pub fn render_members(&self, type_name: &str, plans: &[EmissionPlan]) -> String {
        let mut writer = SourceWriter::with_depth(1);
        render::items(
            &mut writer,
            naming::simple_name(type_name),
            plans.iter().flat_map(|plan| &plan.items),
        );
        writer.finish()
    }

    /// Renders the artefact for `declaration`.
    #[must_use]
    pub fn render(&self, declaration: &Declaration, plans: &[EmissionPlan]) -> SourceArtifact {
        let members = self.render_members(&declaration.name, plans);
        let contents = match &declaration.source {
            Some(source) => splice(source, &members),
            None if self.emit_header => {
                format!("// Members generated for {}.\n\n{members}", declaration.name)
            }
            None => members,
        };
        SourceArtifact {
            path: artifact_path(&declaration.name, &self.file_extension),
            contents,
        }
    }
}

/// Inserts `members` before the last closing brace of `source`.
///
/// Source without a closing brace gets the members appended.
fn splice(source: &str, members: &str) -> String {
    let Some(close) = source.rfind('}') else {
        return format!("{source}\n{members}");
    };
    let (head, tail) = source.split_at(close);
    let body = head.trim_end();
    let separator = if body.ends_with('{') { "\n" } else { "\n\n" };
    format!("{body}{separator}{members}{tail}")
}
