pub mod ports;

#[allow(unused_imports)]
pub use ports::JsonRenderer;
#[allow(unused_imports)]
pub use ports::MemorySink;
#[allow(unused_imports)]
pub use ports::SequentialSecrets;
#[allow(unused_imports)]
pub use ports::TestCatalog;
