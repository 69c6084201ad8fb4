//! Destinations for generated source artefacts.

use std::collections::BTreeMap;
use std::io::Write;

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::ambient_authority;
use cap_std::fs_utf8::{Dir, OpenOptions};

use crate::error::{AccreteError, AccreteResult};

/// Receives one generated file per synthesised type.
pub trait ArtifactSink {
    /// Writes `contents` to `path`, relative to the sink's root, replacing
    /// any earlier artefact at that path.
    ///
    /// # Errors
    ///
    /// Returns an error when the artefact cannot be stored.
    fn write(&mut self, path: &Utf8Path, contents: &str) -> AccreteResult<()>;
}

/// Artefact path for `qualified_name`: package segments become directories.
///
/// # Examples
///
/// ```
/// use accrete::emit::artifact_path;
///
/// assert_eq!(artifact_path("com.example.Person", "java"), "com/example/Person.java");
/// assert_eq!(artifact_path("Person", "java"), "Person.java");
/// ```
#[must_use]
pub fn artifact_path(qualified_name: &str, extension: &str) -> Utf8PathBuf {
    let mut path: Utf8PathBuf = qualified_name.split('.').collect();
    path.set_extension(extension);
    path
}

/// Keeps artefacts in memory, keyed by path.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct MemorySink {
    files: BTreeMap<Utf8PathBuf, String>,
}

impl MemorySink {
    /// Creates an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The artefact stored at `path`.
    #[must_use]
    pub fn get(&self, path: impl AsRef<Utf8Path>) -> Option<&str> {
        self.files.get(path.as_ref()).map(String::as_str)
    }

    /// Every stored artefact in path order.
    pub fn files(&self) -> impl Iterator<Item = (&Utf8Path, &str)> {
        self.files
            .iter()
            .map(|(path, contents)| (path.as_path(), contents.as_str()))
    }

    /// Number of stored artefacts.
    #[must_use]
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Whether nothing was written.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

impl ArtifactSink for MemorySink {
    fn write(&mut self, path: &Utf8Path, contents: &str) -> AccreteResult<()> {
        self.files.insert(path.to_path_buf(), contents.to_owned());
        Ok(())
    }
}

/// Writes artefacts below a root directory, creating it on first use.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirSink {
    root: Utf8PathBuf,
}

impl DirSink {
    /// A sink rooted at `root`.
    #[must_use]
    pub fn new(root: impl Into<Utf8PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The root directory.
    #[must_use]
    pub fn root(&self) -> &Utf8Path {
        &self.root
    }
}

impl ArtifactSink for DirSink {
    fn write(&mut self, path: &Utf8Path, contents: &str) -> AccreteResult<()> {
        let root = ensure_dir(&self.root)?;
        let target = self.root.join(path);
        if let Some(parent) = path.parent().filter(|p| !p.as_str().is_empty()) {
            root.create_dir_all(parent)
                .map_err(|io_err| AccreteError::io(self.root.join(parent), io_err))?;
        }
        let mut file = root
            .open_with(
                path,
                OpenOptions::new().write(true).create(true).truncate(true),
            )
            .map_err(|io_err| AccreteError::io(&target, io_err))?;
        file.write_all(contents.as_bytes())
            .map_err(|io_err| AccreteError::io(&target, io_err))?;
        tracing::debug!(path = %target, bytes = contents.len(), "wrote artefact");
        Ok(())
    }
}

fn ensure_dir(path: &Utf8Path) -> AccreteResult<Dir> {
    match Dir::open_ambient_dir(path, ambient_authority()) {
        Ok(dir) => Ok(dir),
        Err(open_err) if open_err.kind() == std::io::ErrorKind::NotFound => {
            Dir::create_ambient_dir_all(path, ambient_authority())
                .map_err(|io_err| AccreteError::io(path, io_err))?;
            Dir::open_ambient_dir(path, ambient_authority())
                .map_err(|io_err| AccreteError::io(path, io_err))
        }
        Err(open_err) => Err(AccreteError::io(path, open_err)),
    }
}

#[cfg(test)]
mod tests {
    use anyhow::{Context, Result, ensure};
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("com.example.Person", "java", "com/example/Person.java")]
    #[case("Top", "txt", "Top.txt")]
    fn artifact_path_maps_packages_to_directories(
        #[case] name: &str,
        #[case] extension: &str,
        #[case] expected: &str,
    ) {
        assert_eq!(artifact_path(name, extension), expected);
    }

    #[rstest]
    fn memory_sink_replaces_existing_artifacts() -> Result<()> {
        let mut sink = MemorySink::new();
        sink.write(Utf8Path::new("a/B.java"), "first")?;
        sink.write(Utf8Path::new("a/B.java"), "second")?;
        ensure!(sink.len() == 1);
        ensure!(sink.get("a/B.java") == Some("second"));
        Ok(())
    }

    #[rstest]
    fn dir_sink_creates_missing_directories() -> Result<()> {
        let temp = tempfile::tempdir()?;
        let root = Utf8PathBuf::from_path_buf(temp.path().join("out"))
            .map_err(|path| anyhow::anyhow!("non UTF-8 temp path: {}", path.display()))?;
        let mut sink = DirSink::new(&root);
        sink.write(Utf8Path::new("com/example/Person.java"), "class Person {}\n")?;

        let written = std::fs::read_to_string(root.join("com/example/Person.java"))
            .context("artefact should exist")?;
        ensure!(written == "class Person {}\n");
        Ok(())
    }
}
