//! Write a starter profile.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::domain::AppError;
use crate::domain::profile::{PROFILE_FILE, PROFILE_TEMPLATE};

/// Create `jellyserv.toml` in `dir`, refusing to overwrite an existing one.
pub fn execute(dir: &Path) -> Result<PathBuf, AppError> {
    let path = dir.join(PROFILE_FILE);
    if path.exists() {
        return Err(AppError::ProfileExists(path.display().to_string()));
    }

    fs::create_dir_all(dir)?;
    fs::write(&path, PROFILE_TEMPLATE)?;
    info!(path = %path.display(), "profile created");
    Ok(path)
}
