//! Data handed to descriptor fragment templates.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::domain::catalog::{ServiceDescriptor, ServiceId};
use crate::domain::state::globals::{PGID, PUID, RESTART_POLICY, TZ};
use crate::domain::state::{ConfigValues, expose_key, subdomain_key};
use crate::ports::ServiceCatalog;

pub const STACK_NAME: &str = "jellyserv";

/// Docker network names shared by every fragment.
#[derive(Debug, Clone, Serialize)]
pub struct NetworkNames {
    pub web: &'static str,
    pub db: &'static str,
    pub ai: &'static str,
}

pub const NETWORKS: NetworkNames =
    NetworkNames { web: "jellyserv_web", db: "jellyserv_db", ai: "jellyserv_ai" };

/// Host directories mounted into containers.
#[derive(Debug, Clone, Serialize)]
pub struct HostPaths {
    pub config: String,
    pub data: String,
    pub downloads: String,
    pub media: String,
    pub uploads: String,
}

/// Edge router settings of one exposed service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Route {
    /// Resolved subdomain; empty for the apex domain.
    pub host: String,
    /// Host rule with the domain left to compose interpolation.
    pub rule: String,
    pub enabled: bool,
    pub port: Option<u16>,
}

impl Route {
    pub fn resolve(service: &ServiceDescriptor, values: &ConfigValues) -> Self {
        let host = values
            .text(&subdomain_key(&service.id))
            .or_else(|| service.subdomain.clone())
            .unwrap_or_else(|| service.id.to_string());
        let enabled = values
            .get(&expose_key(&service.id))
            .and_then(|value| value.as_flag())
            .unwrap_or(service.expose_traefik.unwrap_or(true));
        let rule = if host.is_empty() {
            "${DOMAIN}".to_string()
        } else {
            format!("{}.${{DOMAIN}}", host)
        };
        Self { host, rule, enabled, port: service.port }
    }

    /// Public URL under the given domain.
    pub fn url(&self, domain: &str) -> String {
        if self.host.is_empty() {
            format!("https://{}", domain)
        } else {
            format!("https://{}.{}", self.host, domain)
        }
    }
}

/// Everything a fragment template may reference.
#[derive(Debug, Clone, Serialize)]
pub struct RenderContext {
    pub stack: &'static str,
    pub networks: NetworkNames,
    pub restart_policy: String,
    pub tz: String,
    pub puid: String,
    pub pgid: String,
    pub paths: HostPaths,
    /// Identifiers of the effective set.
    pub selected: Vec<String>,
    /// Routes of every exposed catalog service, keyed by identifier.
    pub routes: BTreeMap<String, Route>,
}

impl RenderContext {
    pub fn build<C: ServiceCatalog>(
        effective: &BTreeSet<ServiceId>,
        values: &ConfigValues,
        catalog: &C,
    ) -> Self {
        let value_or = |key: &str, fallback: &str| {
            values.text(key).unwrap_or_else(|| fallback.to_string())
        };

        let routes = catalog
            .list_all()
            .into_iter()
            .filter(|service| service.expose)
            .map(|service| (service.id.to_string(), Route::resolve(service, values)))
            .collect();

        Self {
            stack: STACK_NAME,
            networks: NETWORKS,
            restart_policy: value_or(RESTART_POLICY, "unless-stopped"),
            tz: value_or(TZ, "Europe/Paris"),
            puid: value_or(PUID, "1000"),
            pgid: value_or(PGID, "1000"),
            paths: HostPaths {
                config: value_or("CONFIG_PATH", "./config"),
                data: value_or("DATA_PATH", "./data"),
                downloads: value_or("DOWNLOADS_PATH", "./downloads"),
                media: value_or("MEDIA_PATH", "./media"),
                uploads: value_or("UPLOAD_PATH", "./uploads"),
            },
            selected: effective.iter().map(ToString::to_string).collect(),
            routes,
        }
    }
}
