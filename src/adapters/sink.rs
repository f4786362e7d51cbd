//! Delivery of the bundle into a local directory.

use std::fs;
use std::io::Write;
use std::path::PathBuf;

use tracing::info;

use crate::domain::AppError;
use crate::ports::BundleSink;

/// Writes bundles into a target directory.
#[derive(Debug, Clone)]
pub struct DirectorySink {
    dir: PathBuf,
}

impl DirectorySink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Sink for the current directory.
    pub fn current() -> Result<Self, AppError> {
        Ok(Self::new(std::env::current_dir()?))
    }
}

impl BundleSink for DirectorySink {
    /// Write through a hidden temporary file and rename it into place.
    fn deliver(&mut self, bytes: &[u8], file_name: &str) -> Result<PathBuf, AppError> {
        if file_name.is_empty() || file_name.contains(['/', '\\']) {
            return Err(AppError::Delivery(format!("invalid bundle file name '{}'", file_name)));
        }
        fs::create_dir_all(&self.dir).map_err(|e| {
            AppError::Delivery(format!("cannot create {}: {}", self.dir.display(), e))
        })?;

        let target = self.dir.join(file_name);
        let partial = self.dir.join(format!(".{}.partial", file_name));

        let written = fs::File::create(&partial).and_then(|mut file| {
            file.write_all(bytes)?;
            file.sync_all()
        });
        if let Err(e) = written.and_then(|_| fs::rename(&partial, &target)) {
            let _ = fs::remove_file(&partial);
            return Err(AppError::Delivery(format!("{}: {}", target.display(), e)));
        }

        info!(path = %target.display(), bytes = bytes.len(), "bundle delivered");
        Ok(target)
    }
}
