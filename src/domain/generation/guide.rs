//! Model behind the onboarding guide.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::domain::catalog::ServiceId;
use crate::domain::generation::context::Route;
use crate::domain::state::ConfigValues;
use crate::domain::state::globals::DOMAIN;
use crate::ports::ServiceCatalog;

pub const GUIDE_PATH: &str = "onboarding.html";
pub const GUIDE_TEMPLATE: &str = "onboarding.html.j2";

const FALLBACK_DOMAIN: &str = "example.com";

/// One reachable service card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GuideEntry {
    pub id: String,
    pub name: String,
    pub description: String,
    pub url: String,
    pub port: Option<u16>,
    /// Whether the edge router publishes the service.
    pub routed: bool,
}

/// Follow-up steps for the content automation tools.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Automation {
    pub sonarr: bool,
    pub radarr: bool,
}

impl Automation {
    pub fn any(&self) -> bool {
        self.sonarr || self.radarr
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GuideModel {
    pub domain: String,
    pub services: Vec<GuideEntry>,
    /// The indexer manager is part of the stack.
    pub indexer: bool,
    pub automation: Automation,
    pub has_automation: bool,
}

impl GuideModel {
    pub fn build<C: ServiceCatalog>(
        effective: &BTreeSet<ServiceId>,
        values: &ConfigValues,
        catalog: &C,
    ) -> Self {
        let domain = values.text(DOMAIN).unwrap_or_else(|| FALLBACK_DOMAIN.to_string());

        let services = effective
            .iter()
            .filter_map(|id| catalog.get(id))
            .filter(|service| service.is_reachable())
            .map(|service| {
                let route = Route::resolve(service, values);
                GuideEntry {
                    id: service.id.to_string(),
                    name: service.name.clone(),
                    description: service.description.clone(),
                    url: route.url(&domain),
                    port: service.port,
                    routed: route.enabled,
                }
            })
            .collect();

        let automation = Automation {
            sonarr: effective.contains("sonarr"),
            radarr: effective.contains("radarr"),
        };

        Self {
            domain,
            services,
            indexer: effective.contains("prowlarr"),
            has_automation: automation.any(),
            automation,
        }
    }
}
