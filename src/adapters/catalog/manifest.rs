//! Service catalog parsed from TOML manifest files.

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::domain::AppError;
use crate::domain::catalog::{
    FieldCondition, FieldKind, ServiceDescriptor, ServiceGroup, ServiceId, SettingsField,
};
use crate::ports::ServiceCatalog;

/// One manifest file: a group and its services.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct CatalogFile {
    group: GroupMeta,
    #[serde(default)]
    services: BTreeMap<String, ServiceMeta>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct GroupMeta {
    id: String,
    label: String,
    #[serde(default)]
    order: u32,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ServiceMeta {
    name: String,
    #[serde(default)]
    description: String,
    doc_url: Option<String>,
    #[serde(default)]
    dependencies: Vec<String>,
    #[serde(default)]
    internal: bool,
    #[serde(default)]
    always_on: bool,
    #[serde(default)]
    expose: bool,
    expose_traefik: Option<bool>,
    subdomain: Option<String>,
    custom_subdomain: Option<String>,
    port: Option<u16>,
    #[serde(default)]
    fields: Vec<FieldMeta>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct FieldMeta {
    name: String,
    #[serde(default)]
    description: String,
    #[serde(default = "default_kind")]
    kind: String,
    default: Option<String>,
    #[serde(default)]
    generator: bool,
    link_to: Option<String>,
    #[serde(default)]
    required: bool,
    #[serde(default)]
    advanced: bool,
    #[serde(default)]
    options: Vec<String>,
    condition: Option<ConditionMeta>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConditionMeta {
    field: String,
    equals: String,
}

fn default_kind() -> String {
    FieldKind::Text.as_str().to_string()
}

/// Catalog assembled from one or more manifest files.
#[derive(Debug, Clone, Default)]
pub struct ManifestCatalog {
    services: BTreeMap<String, ServiceDescriptor>,
    groups: Vec<ServiceGroup>,
}

impl ManifestCatalog {
    /// Parse every `(source name, content)` pair into one catalog.
    ///
    /// Service identifiers must be unique across all sources, as must group
    /// identifiers.
    pub fn from_sources<'a, I>(sources: I) -> Result<Self, AppError>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut catalog = Self::default();
        for (source_name, content) in sources {
            catalog.add_source(source_name, content)?;
        }
        catalog.groups.sort_by(|a, b| a.order.cmp(&b.order).then_with(|| a.id.cmp(&b.id)));
        Ok(catalog)
    }

    fn add_source(&mut self, source_name: &str, content: &str) -> Result<(), AppError> {
        let invalid = |reason: String| AppError::InvalidCatalog {
            source_name: source_name.to_string(),
            reason,
        };

        let file: CatalogFile = toml::from_str(content).map_err(|e| invalid(e.to_string()))?;

        if self.groups.iter().any(|group| group.id == file.group.id) {
            return Err(invalid(format!("Group '{}' is declared twice", file.group.id)));
        }

        for (id, meta) in file.services {
            if self.services.contains_key(&id) {
                return Err(invalid(format!("Service '{}' is declared twice", id)));
            }
            let service = Self::descriptor(&id, &file.group.id, meta).map_err(invalid)?;
            self.services.insert(id, service);
        }

        self.groups.push(ServiceGroup {
            id: file.group.id,
            label: file.group.label,
            order: file.group.order,
        });
        Ok(())
    }

    fn descriptor(id: &str, group: &str, meta: ServiceMeta) -> Result<ServiceDescriptor, String> {
        let service_id =
            ServiceId::new(id).map_err(|_| format!("Invalid service identifier '{}'", id))?;

        let mut dependencies = Vec::new();
        for dep in &meta.dependencies {
            dependencies.push(
                ServiceId::new(dep)
                    .map_err(|_| format!("Invalid dependency '{}' of service '{}'", dep, id))?,
            );
        }

        let mut fields = Vec::new();
        for field in meta.fields {
            let kind: FieldKind = field
                .kind
                .parse()
                .map_err(|e| format!("Field '{}' of service '{}': {}", field.name, id, e))?;
            fields.push(SettingsField {
                name: field.name,
                description: field.description,
                kind,
                default: field.default,
                generator: field.generator,
                link_to: field.link_to,
                condition: field
                    .condition
                    .map(|c| FieldCondition { field: c.field, equals: c.equals }),
                required: field.required,
                advanced: field.advanced,
                options: field.options,
            });
        }

        Ok(ServiceDescriptor {
            id: service_id,
            group: group.to_string(),
            name: meta.name,
            description: meta.description,
            doc_url: meta.doc_url,
            dependencies,
            internal: meta.internal,
            always_on: meta.always_on,
            expose: meta.expose,
            expose_traefik: meta.expose_traefik,
            subdomain: meta.subdomain,
            custom_subdomain: meta.custom_subdomain,
            port: meta.port,
            fields,
        })
    }
}

impl ServiceCatalog for ManifestCatalog {
    fn get(&self, id: &str) -> Option<&ServiceDescriptor> {
        self.services.get(id)
    }

    fn list_all(&self) -> Vec<&ServiceDescriptor> {
        self.services.values().collect()
    }

    fn names(&self) -> Vec<&str> {
        self.services.keys().map(String::as_str).collect()
    }

    fn groups(&self) -> Vec<&ServiceGroup> {
        self.groups.iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOWNLOADS: &str = r#"
[group]
id = "download"
label = "Downloads"
order = 2

[services.prowlarr]
name = "Prowlarr"
dependencies = ["gluetun"]
expose = true
subdomain = "prowlarr"
port = 9696

[services.gluetun]
name = "Gluetun"

[[services.gluetun.fields]]
name = "VPN_TYPE"
kind = "select"
options = ["openvpn", "wireguard"]
default = "openvpn"

[[services.gluetun.fields]]
name = "OPENVPN_USER"
condition = { field = "VPN_TYPE", equals = "openvpn" }
"#;

    const INFRA: &str = r#"
[group]
id = "infrastructure"
label = "Infrastructure"
order = 0

[services.traefik]
name = "Traefik"
always_on = true
"#;

    #[test]
    fn parses_services_and_fields() {
        let catalog = ManifestCatalog::from_sources([("download.toml", DOWNLOADS)]).unwrap();

        let prowlarr = catalog.get("prowlarr").unwrap();
        assert_eq!(prowlarr.group, "download");
        assert_eq!(prowlarr.dependencies[0].as_str(), "gluetun");
        assert_eq!(prowlarr.port, Some(9696));

        let gluetun = catalog.get("gluetun").unwrap();
        assert_eq!(gluetun.fields.len(), 2);
        assert_eq!(gluetun.fields[0].kind, FieldKind::Select);
        assert_eq!(gluetun.fields[1].kind, FieldKind::Text);
        assert!(gluetun.fields[1].condition.is_some());
    }

    #[test]
    fn groups_sorted_by_order() {
        let catalog =
            ManifestCatalog::from_sources([("download.toml", DOWNLOADS), ("infra.toml", INFRA)])
                .unwrap();

        let ids: Vec<&str> = catalog.groups().iter().map(|group| group.id.as_str()).collect();
        assert_eq!(ids, vec!["infrastructure", "download"]);
        assert_eq!(catalog.names(), vec!["gluetun", "prowlarr", "traefik"]);
    }

    #[test]
    fn duplicate_service_is_rejected() {
        let other = INFRA.replace("infrastructure", "other").replace("traefik", "prowlarr");
        let err = ManifestCatalog::from_sources([
            ("download.toml", DOWNLOADS),
            ("other.toml", other.as_str()),
        ])
        .unwrap_err();

        assert!(
            matches!(err, AppError::InvalidCatalog { source_name, .. } if source_name == "other.toml")
        );
    }

    #[test]
    fn unknown_field_kind_is_rejected() {
        let bad = format!("{}\n[[services.traefik.fields]]\nname = \"X\"\nkind = \"color\"\n", INFRA);
        let err = ManifestCatalog::from_sources([("infra.toml", bad.as_str())]).unwrap_err();

        assert!(err.to_string().contains("unknown field kind 'color'"));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let bad = format!("{}colour = \"red\"\n", INFRA);
        assert!(ManifestCatalog::from_sources([("infra.toml", bad.as_str())]).is_err());
    }
}
