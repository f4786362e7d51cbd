//! API Facade for the application.
//!
//! Glues adapter construction to command execution.

use std::path::{Path, PathBuf};

use crate::adapters::{DirectorySink, ManifestCatalog, MinijinjaRenderer, RandomSecrets};
use crate::app::AppContext;
use crate::app::commands::{doctor, generate, init, list};

pub use crate::app::commands::doctor::{DoctorOptions, DoctorOutcome};
pub use crate::app::commands::generate::{GenerateOptions, GenerateOutcome, parse_assignment};
pub use crate::app::commands::list::{FieldDetail, GroupListing, ServiceDetail, ServiceSummary};
pub use crate::domain::AppError;

/// Load the built-in catalog, or the manifests in `dir` when given.
pub fn load_catalog(dir: Option<&Path>) -> Result<ManifestCatalog, AppError> {
    match dir {
        Some(dir) => ManifestCatalog::from_dir(dir),
        None => ManifestCatalog::embedded(),
    }
}

/// Write a starter profile into the current directory.
pub fn init() -> Result<PathBuf, AppError> {
    init_at(&std::env::current_dir()?)
}

/// Write a starter profile into `dir`.
pub fn init_at(dir: &Path) -> Result<PathBuf, AppError> {
    init::execute(dir)
}

/// Generate the bundle and write it into `output` (the current directory when
/// `None`). A dry run generates without packing or writing anything.
pub fn generate(
    catalog: ManifestCatalog,
    options: &GenerateOptions,
    output: Option<&Path>,
    dry_run: bool,
) -> Result<GenerateOutcome, AppError> {
    let renderer = MinijinjaRenderer::embedded()?;
    let mut ctx = AppContext::new(catalog, RandomSecrets, renderer);

    if dry_run {
        return generate::execute::<_, _, _, DirectorySink>(&mut ctx, options, None);
    }
    let mut sink = match output {
        Some(dir) => DirectorySink::new(dir),
        None => DirectorySink::current()?,
    };
    generate::execute(&mut ctx, options, Some(&mut sink))
}

/// Selectable services grouped for display.
pub fn list(catalog: &ManifestCatalog, group: Option<&str>) -> Result<Vec<GroupListing>, AppError> {
    list::list(catalog, group)
}

/// Details of one catalog entry.
pub fn list_detail(catalog: &ManifestCatalog, id: &str) -> Result<ServiceDetail, AppError> {
    list::detail(catalog, id)
}

/// Validate a catalog.
pub fn doctor(catalog: &ManifestCatalog, options: DoctorOptions) -> DoctorOutcome {
    doctor::execute(catalog, options)
}
