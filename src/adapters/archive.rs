//! Zip packing of a generated artifact set.

use std::io::{Cursor, Write};

use tracing::info;
use zip::write::FileOptions;
use zip::{CompressionMethod, DateTime, ZipWriter};

use crate::domain::AppError;
use crate::domain::generation::ArtifactSet;

const EXECUTABLE_MODE: u32 = 0o755;
const REGULAR_MODE: u32 = 0o644;

/// Packs artifacts into a deflate-compressed zip archive.
pub struct ZipBundle;

impl ZipBundle {
    /// Assemble the archive in memory.
    ///
    /// Entries keep the set's order and paths. Every entry carries the same
    /// timestamp, so identical sets give identical bytes.
    pub fn assemble(artifacts: &ArtifactSet) -> Result<Vec<u8>, AppError> {
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));

        for artifact in artifacts.iter() {
            let mode = if artifact.executable { EXECUTABLE_MODE } else { REGULAR_MODE };
            let options = FileOptions::default()
                .compression_method(CompressionMethod::Deflated)
                .last_modified_time(DateTime::default())
                .unix_permissions(mode);

            writer
                .start_file(artifact.path.as_str(), options)
                .map_err(|e| AppError::Archive(format!("{}: {}", artifact.path, e)))?;
            writer
                .write_all(&artifact.contents)
                .map_err(|e| AppError::Archive(format!("{}: {}", artifact.path, e)))?;
        }

        let bytes = writer.finish().map_err(|e| AppError::Archive(e.to_string()))?.into_inner();
        info!(entries = artifacts.len(), bytes = bytes.len(), "bundle assembled");
        Ok(bytes)
    }
}
