//! Rendered units and output collection.

use crate::error::CodegenError;
use std::path::{Path, PathBuf};

/// One generated source unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedUnit {
    /// Output key, derived from the type's simple name.
    pub key: String,
    /// Full source text of the unit.
    pub text: String,
}

impl RenderedUnit {
    /// Creates a rendered unit.
    #[must_use]
    pub fn new(key: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            text: text.into(),
        }
    }

    /// Returns the file name for this unit, `<key>.<extension>`.
    ///
    /// An empty extension yields the bare key.
    #[must_use]
    pub fn file_name(&self, extension: &str) -> String {
        if extension.is_empty() {
            self.key.clone()
        } else {
            format!("{}.{}", self.key, extension)
        }
    }
}

/// Receiver for rendered units.
pub trait OutputSink {
    /// Takes ownership of one rendered unit.
    ///
    /// # Errors
    /// Returns `CodegenError` if the unit cannot be stored.
    fn add_source(&mut self, unit: RenderedUnit) -> Result<(), CodegenError>;
}

impl OutputSink for Vec<RenderedUnit> {
    fn add_source(&mut self, unit: RenderedUnit) -> Result<(), CodegenError> {
        self.push(unit);
        Ok(())
    }
}

/// Writes each unit to `<dir>/<key>.<extension>`.
///
/// A later unit with the same key overwrites the earlier file.
#[derive(Debug, Clone)]
pub struct DirectorySink {
    dir: PathBuf,
    extension: String,
    written: Vec<PathBuf>,
}

impl DirectorySink {
    /// Creates a sink writing `.cs` files into `dir`.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            extension: "cs".to_string(),
            written: Vec::new(),
        }
    }

    /// Sets the file extension (without the dot).
    #[must_use]
    pub fn extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    /// Output directory.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Paths written so far, in write order.
    #[must_use]
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }
}

impl OutputSink for DirectorySink {
    fn add_source(&mut self, unit: RenderedUnit) -> Result<(), CodegenError> {
        std::fs::create_dir_all(&self.dir)
            .map_err(|e| CodegenError::output(&unit.key, e.to_string()))?;
        let path = self.dir.join(unit.file_name(&self.extension));
        std::fs::write(&path, unit.text.as_bytes())
            .map_err(|e| CodegenError::output(&unit.key, e.to_string()))?;
        tracing::debug!(path = %path.display(), "wrote generated unit");
        self.written.push(path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_name() {
        let unit = RenderedUnit::new("GameSettings_g", "text");
        assert_eq!(unit.file_name("cs"), "GameSettings_g.cs");
        assert_eq!(unit.file_name(""), "GameSettings_g");
    }

    #[test]
    fn test_vec_sink_collects() {
        let mut sink: Vec<RenderedUnit> = Vec::new();
        sink.add_source(RenderedUnit::new("A_g", "a")).unwrap();
        sink.add_source(RenderedUnit::new("B_g", "b")).unwrap();
        assert_eq!(sink.len(), 2);
        assert_eq!(sink[1].key, "B_g");
    }

    #[test]
    fn test_directory_sink_writes_files() {
        let dir = tempfile::tempdir().expect("tempdir");
        let out = dir.path().join("generated");
        let mut sink = DirectorySink::new(&out);

        sink.add_source(RenderedUnit::new("A_g", "class A {}"))
            .expect("write");

        let path = out.join("A_g.cs");
        assert_eq!(sink.written(), &[path.clone()]);
        assert_eq!(std::fs::read_to_string(path).unwrap(), "class A {}");
    }

    #[test]
    fn test_directory_sink_reports_key_when_dir_fails() {
        let dir = tempfile::tempdir().expect("tempdir");
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, "not a directory").expect("write blocker");
        let mut sink = DirectorySink::new(blocker.join("generated"));

        let err = sink
            .add_source(RenderedUnit::new("A_g", "class A {}"))
            .unwrap_err();
        assert!(matches!(err, CodegenError::Output { ref key, .. } if key == "A_g"));
        assert!(sink.written().is_empty());
    }

    #[test]
    fn test_directory_sink_custom_extension_overwrites() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut sink = DirectorySink::new(dir.path()).extension("txt");

        sink.add_source(RenderedUnit::new("A_g", "first")).unwrap();
        sink.add_source(RenderedUnit::new("A_g", "second")).unwrap();

        let text = std::fs::read_to_string(dir.path().join("A_g.txt")).unwrap();
        assert_eq!(text, "second");
        assert_eq!(sink.written().len(), 2);
    }
}
