//! Profile file discovery and loading.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::domain::AppError;
use crate::domain::profile::{PROFILE_FILE, Profile};

/// Load the profile at `path`.
pub fn load_profile(path: &Path) -> Result<Profile, AppError> {
    if !path.is_file() {
        return Err(AppError::ProfileMissing(path.display().to_string()));
    }
    let content = fs::read_to_string(path)?;
    let profile = Profile::parse(&content)?;
    debug!(path = %path.display(), services = profile.services.len(), "profile loaded");
    Ok(profile)
}

/// Load `jellyserv.toml` from `dir` when present.
pub fn discover_profile(dir: &Path) -> Result<Option<Profile>, AppError> {
    let path = dir.join(PROFILE_FILE);
    if !path.is_file() {
        return Ok(None);
    }
    load_profile(&path).map(Some)
}
