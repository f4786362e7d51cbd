//! Catalog domain: service descriptors, settings fields and groups.

mod field;
mod service;

pub use field::{FieldCondition, FieldKind, SettingsField};
pub use service::{ServiceDescriptor, ServiceGroup, ServiceId};
