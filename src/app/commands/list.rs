//! Catalog listings for the `list` command.

use serde::Serialize;

use crate::domain::AppError;
use crate::domain::catalog::{ServiceDescriptor, SettingsField};
use crate::domain::selection::DependencyResolver;
use crate::ports::ServiceCatalog;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServiceSummary {
    pub id: String,
    pub name: String,
    pub description: String,
    pub dependencies: Vec<String>,
    pub always_on: bool,
    pub exposed: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupListing {
    pub id: String,
    pub label: String,
    pub services: Vec<ServiceSummary>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldDetail {
    pub key: String,
    pub description: String,
    pub kind: &'static str,
    pub default: Option<String>,
    pub generated: bool,
    pub required: bool,
    pub advanced: bool,
    pub options: Vec<String>,
    /// `FIELD=value` the field depends on, if any.
    pub condition: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServiceDetail {
    pub id: String,
    pub name: String,
    pub description: String,
    pub group: String,
    pub doc_url: Option<String>,
    pub dependencies: Vec<String>,
    /// Everything selected along with this service.
    pub closure: Vec<String>,
    pub internal: bool,
    pub always_on: bool,
    pub subdomain: Option<String>,
    pub port: Option<u16>,
    pub fields: Vec<FieldDetail>,
}

impl ServiceSummary {
    fn from_descriptor(service: &ServiceDescriptor) -> Self {
        Self {
            id: service.id.to_string(),
            name: service.name.clone(),
            description: service.description.clone(),
            dependencies: service.dependencies.iter().map(ToString::to_string).collect(),
            always_on: service.always_on,
            exposed: service.expose,
        }
    }
}

impl FieldDetail {
    fn from_field(field: &SettingsField) -> Self {
        Self {
            key: field.key().to_string(),
            description: field.description.clone(),
            kind: field.kind.as_str(),
            default: field.default.clone(),
            generated: field.generator,
            required: field.required,
            advanced: field.advanced,
            options: field.options.clone(),
            condition: field
                .condition
                .as_ref()
                .map(|condition| format!("{}={}", condition.field, condition.equals)),
        }
    }
}

/// Selectable services per group in display order; empty groups are skipped.
pub fn list<C: ServiceCatalog>(
    catalog: &C,
    group: Option<&str>,
) -> Result<Vec<GroupListing>, AppError> {
    if let Some(group) = group {
        if !catalog.groups().iter().any(|candidate| candidate.id == group) {
            return Err(AppError::GroupNotFound(group.to_string()));
        }
    }

    let services = catalog.list_all();
    let listings = catalog
        .groups()
        .into_iter()
        .filter(|candidate| group.is_none_or(|wanted| candidate.id == wanted))
        .map(|candidate| GroupListing {
            id: candidate.id.clone(),
            label: candidate.label.clone(),
            services: services
                .iter()
                .filter(|service| service.group == candidate.id && service.is_selectable())
                .map(|service| ServiceSummary::from_descriptor(service))
                .collect(),
        })
        .filter(|listing| !listing.services.is_empty())
        .collect();
    Ok(listings)
}

/// Full description of one service.
pub fn detail<C: ServiceCatalog>(catalog: &C, id: &str) -> Result<ServiceDetail, AppError> {
    let service =
        catalog.get(id).ok_or_else(|| AppError::service_not_found(id, &catalog.names()))?;

    Ok(ServiceDetail {
        id: service.id.to_string(),
        name: service.name.clone(),
        description: service.description.clone(),
        group: service.group.clone(),
        doc_url: service.doc_url.clone(),
        dependencies: service.dependencies.iter().map(ToString::to_string).collect(),
        closure: DependencyResolver::closure_of(id, catalog).iter().map(ToString::to_string).collect(),
        internal: service.internal,
        always_on: service.always_on,
        subdomain: service.expose.then(|| service.subdomain.clone()).flatten(),
        port: service.port,
        fields: service.fields.iter().map(FieldDetail::from_field).collect(),
    })
}
