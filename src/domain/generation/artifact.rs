//! Generated files and the ordered set that collects them.

use crate::domain::AppError;

/// One generated file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    /// Path inside the bundle, `/`-separated.
    pub path: String,
    pub contents: Vec<u8>,
    pub executable: bool,
}

impl Artifact {
    pub fn text(path: &str, contents: impl Into<String>) -> Self {
        Self { path: path.to_string(), contents: contents.into().into_bytes(), executable: false }
    }

    pub fn script(path: &str, contents: impl Into<String>) -> Self {
        Self { executable: true, ..Self::text(path, contents) }
    }

    /// Contents as UTF-8, if they are.
    pub fn as_str(&self) -> Option<&str> {
        std::str::from_utf8(&self.contents).ok()
    }
}

/// Artifacts in insertion order with unique paths.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArtifactSet {
    artifacts: Vec<Artifact>,
}

impl ArtifactSet {
    pub fn push(&mut self, artifact: Artifact) -> Result<(), AppError> {
        if self.get(&artifact.path).is_some() {
            return Err(AppError::DuplicateArtifact(artifact.path));
        }
        self.artifacts.push(artifact);
        Ok(())
    }

    pub fn get(&self, path: &str) -> Option<&Artifact> {
        self.artifacts.iter().find(|artifact| artifact.path == path)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Artifact> {
        self.artifacts.iter()
    }

    pub fn paths(&self) -> Vec<&str> {
        self.artifacts.iter().map(|artifact| artifact.path.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.artifacts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.artifacts.is_empty()
    }
}
