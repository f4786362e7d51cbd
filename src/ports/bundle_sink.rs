use std::path::PathBuf;

use crate::domain::AppError;

/// Port for delivering an assembled bundle.
pub trait BundleSink {
    /// Deliver the complete bundle under the suggested file name.
    ///
    /// Returns a description of where the bundle ended up.
    fn deliver(&mut self, bytes: &[u8], file_name: &str) -> Result<PathBuf, AppError>;
}
