//! Selection domain: dependency closure over the catalog.

mod resolver;

pub use resolver::DependencyResolver;
