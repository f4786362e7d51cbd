//! Service catalog port definition.

use crate::domain::catalog::{ServiceDescriptor, ServiceGroup};

/// Trait for accessing the service catalog.
pub trait ServiceCatalog {
    /// Get a service by identifier.
    fn get(&self, id: &str) -> Option<&ServiceDescriptor>;

    /// List all services sorted by identifier.
    fn list_all(&self) -> Vec<&ServiceDescriptor>;

    /// Get all service identifiers.
    fn names(&self) -> Vec<&str>;

    /// List groups in display order.
    fn groups(&self) -> Vec<&ServiceGroup>;
}
