//! Doctor command implementation.

use std::path::PathBuf;

use crate::app::api::DoctorOptions;
use crate::domain::AppError;

pub fn run_doctor(strict: bool, catalog: Option<PathBuf>) -> Result<i32, AppError> {
    let catalog = crate::app::api::load_catalog(catalog.as_deref())?;
    let outcome = crate::app::api::doctor(&catalog, DoctorOptions { strict });
    outcome.report(strict);

    Ok(outcome.exit_code)
}
