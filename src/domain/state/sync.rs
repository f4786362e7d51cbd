//! Synchronization of configuration values with the effective service set.

use std::collections::BTreeSet;

use tracing::debug;

use crate::domain::catalog::ServiceId;
use crate::domain::state::globals::is_global;
use crate::domain::state::{ConfigValue, ConfigValues};
use crate::ports::{SecretSource, ServiceCatalog};

/// Length of generated secret tokens.
pub const SECRET_LENGTH: usize = 32;

const EXPOSE_SUFFIX: &str = "_expose_traefik";
const SUBDOMAIN_SUFFIX: &str = "_custom_subdomain";

/// Key of the per-service edge router toggle.
pub fn expose_key(id: &str) -> String {
    format!("{}{}", id, EXPOSE_SUFFIX)
}

/// Key of the per-service subdomain override.
pub fn subdomain_key(id: &str) -> String {
    format!("{}{}", id, SUBDOMAIN_SUFFIX)
}

/// Owning service of a namespaced per-service key.
pub fn namespace_owner(key: &str) -> Option<&str> {
    key.strip_suffix(EXPOSE_SUFFIX)
        .or_else(|| key.strip_suffix(SUBDOMAIN_SUFFIX))
        .filter(|owner| !owner.is_empty())
}

/// Keys touched by one synchronization pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncReport {
    pub populated: Vec<String>,
    pub removed: Vec<String>,
}

impl SyncReport {
    pub fn is_empty(&self) -> bool {
        self.populated.is_empty() && self.removed.is_empty()
    }
}

/// Bring `values` in line with the services in `effective`.
///
/// Populates missing fields of every effective service (secrets first, then
/// defaults, then exposure fields) and prunes fields owned only by services
/// outside the set. Existing values are never overwritten, so a second pass over
/// the same inputs changes nothing.
pub fn synchronize<C: ServiceCatalog, S: SecretSource>(
    values: &mut ConfigValues,
    effective: &BTreeSet<ServiceId>,
    catalog: &C,
    secrets: &mut S,
) -> SyncReport {
    let mut report = SyncReport::default();

    for id in effective {
        let Some(service) = catalog.get(id) else {
            continue;
        };

        for field in &service.fields {
            let key = field.key();
            if field.generator && values.is_blank(key) {
                values.set(key, ConfigValue::Text(secrets.generate(SECRET_LENGTH)));
                report.populated.push(key.to_string());
            }
            if let Some(default) = &field.default {
                if !values.contains(key) {
                    values.set(key, ConfigValue::text(default.as_str()));
                    report.populated.push(key.to_string());
                }
            }
        }

        if service.expose {
            let key = expose_key(id);
            if !values.contains(&key) {
                values.set(&key, ConfigValue::Flag(service.expose_traefik.unwrap_or(true)));
                report.populated.push(key);
            }
            let key = subdomain_key(id);
            if !values.contains(&key) {
                let initial = service.custom_subdomain.clone().unwrap_or_default();
                values.set(&key, ConfigValue::Text(initial));
                report.populated.push(key);
            }
        }
    }

    let declared: BTreeSet<&str> = catalog
        .list_all()
        .into_iter()
        .flat_map(|service| service.field_keys().collect::<Vec<_>>())
        .collect();
    let owned: BTreeSet<&str> = effective
        .iter()
        .filter_map(|id| catalog.get(id))
        .flat_map(|service| service.field_keys().collect::<Vec<_>>())
        .collect();

    let stale: Vec<String> = values
        .keys()
        .filter(|key| !is_global(key))
        .filter(|key| match namespace_owner(key) {
            Some(owner) => !effective.contains(owner),
            None => declared.contains(key) && !owned.contains(key),
        })
        .map(str::to_string)
        .collect();
    for key in stale {
        values.remove(&key);
        report.removed.push(key);
    }

    if !report.is_empty() {
        debug!(populated = ?report.populated, removed = ?report.removed, "synchronized settings");
    }
    report
}
