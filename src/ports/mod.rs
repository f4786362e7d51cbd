mod bundle_sink;
mod secret_source;
mod service_catalog;
mod template_renderer;

pub use bundle_sink::BundleSink;
pub use secret_source::SecretSource;
pub use service_catalog::ServiceCatalog;
pub use template_renderer::TemplateRenderer;
