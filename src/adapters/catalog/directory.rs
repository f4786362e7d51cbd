//! Catalog manifests read from a directory on disk.

use std::fs;
use std::path::Path;

use crate::adapters::catalog::ManifestCatalog;
use crate::domain::AppError;

impl ManifestCatalog {
    /// Load every `*.toml` manifest in `dir`, in file name order.
    pub fn from_dir(dir: &Path) -> Result<Self, AppError> {
        let mut paths = Vec::new();
        for entry in fs::read_dir(dir)? {
            let path = entry?.path();
            if path.is_file() && path.extension().is_some_and(|ext| ext == "toml") {
                paths.push(path);
            }
        }
        paths.sort();

        if paths.is_empty() {
            return Err(AppError::InvalidCatalog {
                source_name: dir.display().to_string(),
                reason: "directory contains no .toml manifests".to_string(),
            });
        }

        let mut sources = Vec::new();
        for path in &paths {
            let name = path.file_name().map(|n| n.to_string_lossy().to_string()).unwrap_or_default();
            sources.push((name, fs::read_to_string(path)?));
        }

        Self::from_sources(sources.iter().map(|(name, content)| (name.as_str(), content.as_str())))
    }
}
