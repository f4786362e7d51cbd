mod test_catalog;
mod test_renderer;
mod test_secrets;
mod test_sink;

pub use self::test_catalog::TestCatalog;
pub use self::test_renderer::JsonRenderer;
pub use self::test_secrets::SequentialSecrets;
pub use self::test_sink::MemorySink;
