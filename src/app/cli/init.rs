//! Init command implementation.

use std::path::PathBuf;

use crate::domain::AppError;

pub fn run_init(path: Option<PathBuf>) -> Result<(), AppError> {
    let created = match path {
        Some(dir) => crate::app::api::init_at(&dir)?,
        None => crate::app::api::init()?,
    };
    println!("✅ Created {}", created.display());
    println!("  Edit it, then run `jellyserv gen`.");
    Ok(())
}
