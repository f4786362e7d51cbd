mod directory;
mod embedded;
mod manifest;

pub use manifest::ManifestCatalog;
