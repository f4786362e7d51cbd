//! Catalog manifests compiled into the binary.

use include_dir::{Dir, include_dir};

use crate::adapters::catalog::ManifestCatalog;
use crate::domain::AppError;

/// Embedded catalog directory, one manifest per group.
static CATALOG_DIR: Dir<'_> = include_dir!("$CARGO_MANIFEST_DIR/src/assets/catalog");

impl ManifestCatalog {
    /// Load the built-in catalog.
    pub fn embedded() -> Result<Self, AppError> {
        let mut sources = Vec::new();
        for file in CATALOG_DIR.files() {
            let name = file.path().to_string_lossy().to_string();
            if !name.ends_with(".toml") {
                continue;
            }
            let content = file.contents_utf8().ok_or_else(|| AppError::InvalidCatalog {
                source_name: name.clone(),
                reason: "file is not valid UTF-8".to_string(),
            })?;
            sources.push((name, content));
        }
        sources.sort_by(|a, b| a.0.cmp(&b.0));

        Self::from_sources(sources.iter().map(|(name, content)| (name.as_str(), *content)))
    }
}
