pub mod archive;
pub mod catalog;
pub mod secrets;
pub mod sink;
pub mod templates;

pub use archive::ZipBundle;
pub use catalog::ManifestCatalog;
pub use secrets::RandomSecrets;
pub use sink::DirectorySink;
pub use templates::MinijinjaRenderer;
