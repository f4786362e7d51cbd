use crate::ports::{SecretSource, ServiceCatalog, TemplateRenderer};

/// Application context holding dependencies for command execution.
pub struct AppContext<C: ServiceCatalog, S: SecretSource, R: TemplateRenderer> {
    catalog: C,
    secrets: S,
    renderer: R,
}

impl<C: ServiceCatalog, S: SecretSource, R: TemplateRenderer> AppContext<C, S, R> {
    /// Create a new application context.
    pub fn new(catalog: C, secrets: S, renderer: R) -> Self {
        Self { catalog, secrets, renderer }
    }

    /// Get a reference to the service catalog.
    pub fn catalog(&self) -> &C {
        &self.catalog
    }

    /// Get a reference to the template renderer.
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Borrow the catalog and the secret source together.
    pub fn catalog_and_secrets(&mut self) -> (&C, &mut S) {
        (&self.catalog, &mut self.secrets)
    }
}
