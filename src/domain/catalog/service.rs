//! Service catalog domain model.

use crate::domain::AppError;
use crate::domain::catalog::SettingsField;
use crate::impl_validated_id;

/// A validated service identifier.
///
/// Guarantees:
/// - Non-empty
/// - Contains only ASCII alphanumeric characters, `-` or `_`
/// - No path traversal components (/, \\, .., etc.)
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ServiceId(String);

impl_validated_id!(ServiceId, false, AppError::InvalidServiceId);

/// Presentation group a service belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceGroup {
    pub id: String,
    pub label: String,
    /// Position of the group in listings.
    pub order: u32,
}

/// A catalog entry describing one deployable service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceDescriptor {
    pub id: ServiceId,
    pub group: String,
    /// Human-readable name.
    pub name: String,
    pub description: String,
    pub doc_url: Option<String>,
    /// Direct dependencies, in declaration order.
    pub dependencies: Vec<ServiceId>,
    /// Never directly selectable; only reachable as a dependency.
    pub internal: bool,
    /// Part of every generated bundle regardless of selection.
    pub always_on: bool,
    /// Has an externally reachable endpoint.
    pub expose: bool,
    /// Initial value of the per-service edge router toggle.
    pub expose_traefik: Option<bool>,
    /// Catalog subdomain. An empty string means the apex domain.
    pub subdomain: Option<String>,
    /// Initial value of the per-service custom subdomain field.
    pub custom_subdomain: Option<String>,
    pub port: Option<u16>,
    pub fields: Vec<SettingsField>,
}

impl ServiceDescriptor {
    /// Whether a user may pick this service directly.
    pub fn is_selectable(&self) -> bool {
        !self.internal
    }

    /// Whether the service appears in the onboarding guide.
    pub fn is_reachable(&self) -> bool {
        self.expose && !self.internal
    }

    /// Settings keys declared by this service, in declaration order.
    pub fn field_keys(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(SettingsField::key)
    }
}
