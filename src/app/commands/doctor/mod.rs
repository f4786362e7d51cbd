mod checks;
mod diagnostics;

pub use checks::find_cycles;
pub use diagnostics::{Diagnostic, Diagnostics, Severity};

use tracing::debug;

use crate::ports::ServiceCatalog;

#[derive(Debug, Clone, Default)]
pub struct DoctorOptions {
    pub strict: bool,
}

#[derive(Debug)]
pub struct DoctorOutcome {
    pub diagnostics: Diagnostics,
    pub errors: usize,
    pub warnings: usize,
    pub exit_code: i32,
}

/// Run every catalog check. Findings never change how the catalog is used.
pub fn execute<C: ServiceCatalog>(catalog: &C, options: DoctorOptions) -> DoctorOutcome {
    let mut diagnostics = Diagnostics::default();

    checks::dependency_checks(catalog, &mut diagnostics);
    checks::cycle_checks(catalog, &mut diagnostics);
    checks::group_checks(catalog, &mut diagnostics);
    checks::exposure_checks(catalog, &mut diagnostics);
    checks::field_checks(catalog, &mut diagnostics);

    let errors = diagnostics.error_count();
    let warnings = diagnostics.warning_count();
    let exit_code = if errors > 0 {
        1
    } else if warnings > 0 && options.strict {
        2
    } else {
        0
    };
    debug!(services = catalog.names().len(), errors, warnings, "catalog checked");

    DoctorOutcome { diagnostics, errors, warnings, exit_code }
}

impl DoctorOutcome {
    /// Print the findings and a summary line.
    pub fn report(&self, strict: bool) {
        self.diagnostics.emit();

        if self.errors == 0 && self.warnings == 0 {
            println!("All checks passed.");
        } else if self.errors == 0 && !strict {
            eprintln!("Check completed with {} warning(s).", self.warnings);
        } else {
            eprintln!("Check failed: {} error(s), {} warning(s) found.", self.errors, self.warnings);
        }
    }
}
