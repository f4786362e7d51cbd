//! In-memory service catalog built fluently in tests.

use std::collections::BTreeMap;

use crate::domain::catalog::{
    FieldKind, ServiceDescriptor, ServiceGroup, ServiceId, SettingsField,
};
use crate::ports::ServiceCatalog;

pub const TEST_GROUP: &str = "general";

#[derive(Debug, Clone)]
pub struct TestCatalog {
    services: BTreeMap<String, ServiceDescriptor>,
    groups: Vec<ServiceGroup>,
}

impl Default for TestCatalog {
    fn default() -> Self {
        Self::new()
    }
}

#[allow(dead_code)]
impl TestCatalog {
    pub fn new() -> Self {
        Self {
            services: BTreeMap::new(),
            groups: vec![ServiceGroup {
                id: TEST_GROUP.to_string(),
                label: "General".to_string(),
                order: 0,
            }],
        }
    }

    /// Add a plain selectable service.
    pub fn service(mut self, id: &str, deps: &[&str]) -> Self {
        let descriptor = Self::descriptor(id, deps);
        self.services.insert(id.to_string(), descriptor);
        self
    }

    pub fn always_on(self, id: &str, deps: &[&str]) -> Self {
        self.service(id, deps).describe(id, |s| s.always_on = true)
    }

    pub fn internal(self, id: &str, deps: &[&str]) -> Self {
        self.service(id, deps).describe(id, |s| s.internal = true)
    }

    pub fn exposed(self, id: &str, deps: &[&str], subdomain: &str, port: u16) -> Self {
        let subdomain = subdomain.to_string();
        self.service(id, deps).describe(id, move |s| {
            s.expose = true;
            s.subdomain = Some(subdomain);
            s.port = Some(port);
        })
    }

    pub fn group(mut self, id: &str, label: &str, order: u32) -> Self {
        self.groups.push(ServiceGroup { id: id.to_string(), label: label.to_string(), order });
        self.groups.sort_by_key(|group| group.order);
        self
    }

    /// Mutate an already added service.
    pub fn describe(mut self, id: &str, edit: impl FnOnce(&mut ServiceDescriptor)) -> Self {
        let service = self.services.get_mut(id).expect("describe() on unknown test service");
        edit(service);
        self
    }

    /// A generated password field.
    pub fn secret(name: &str) -> SettingsField {
        SettingsField {
            name: name.to_string(),
            kind: FieldKind::Password,
            generator: true,
            ..Default::default()
        }
    }

    fn descriptor(id: &str, deps: &[&str]) -> ServiceDescriptor {
        ServiceDescriptor {
            id: ServiceId::new(id).expect("invalid test service id"),
            group: TEST_GROUP.to_string(),
            name: id.to_string(),
            description: format!("{} service", id),
            doc_url: None,
            dependencies: deps
                .iter()
                .map(|dep| ServiceId::new(dep).expect("invalid test dependency id"))
                .collect(),
            internal: false,
            always_on: false,
            expose: false,
            expose_traefik: None,
            subdomain: None,
            custom_subdomain: None,
            port: None,
            fields: Vec::new(),
        }
    }
}

impl ServiceCatalog for TestCatalog {
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
