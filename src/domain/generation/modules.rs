//! Which descriptor fragments a selection activates.

use std::collections::BTreeSet;

use crate::domain::catalog::ServiceId;

/// A descriptor fragment and the template that renders it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fragment {
    pub path: &'static str,
    pub template: &'static str,
}

/// An optional fragment switched on by any of its trigger services.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Module {
    pub name: &'static str,
    pub fragment: Fragment,
    pub triggers: &'static [&'static str],
}

impl Module {
    pub fn is_active(&self, selected: &BTreeSet<ServiceId>) -> bool {
        self.triggers.iter().any(|trigger| selected.contains(*trigger))
    }
}

/// Fragments present in every bundle.
pub const BASELINE: [Fragment; 3] = [
    Fragment { path: "core/compose.yaml", template: "core/compose.yaml.j2" },
    Fragment { path: "core/authentik/compose.yaml", template: "core/authentik/compose.yaml.j2" },
    Fragment { path: "core/config/dynamic.yml", template: "core/config/dynamic.yml.j2" },
];

/// Baseline fragments that are compose files, in include order.
pub const BASELINE_INCLUDES: [&str; 2] = ["core/compose.yaml", "core/authentik/compose.yaml"];

/// Optional modules in activation order.
pub const MODULES: [Module; 4] = [
    Module {
        name: "media",
        fragment: Fragment { path: "apps/media/compose.yaml", template: "apps/media/compose.yaml.j2" },
        triggers: &["jellyfin", "jellyseerr", "wizarr", "jellystat", "tdarr"],
    },
    Module {
        name: "downloads",
        fragment: Fragment {
            path: "apps/downloads/compose.yaml",
            template: "apps/downloads/compose.yaml.j2",
        },
        triggers: &[
            "gluetun",
            "qbittorrent",
            "prowlarr",
            "sonarr",
            "radarr",
            "lidarr",
            "readarr",
            "bazarr",
        ],
    },
    Module {
        name: "ai",
        fragment: Fragment { path: "apps/ai/compose.yaml", template: "apps/ai/compose.yaml.j2" },
        triggers: &["ollama", "open-webui"],
    },
    Module {
        name: "monitoring",
        fragment: Fragment {
            path: "apps/monitoring/compose.yaml",
            template: "apps/monitoring/compose.yaml.j2",
        },
        triggers: &["prometheus", "grafana", "alertmanager", "uptime-kuma"],
    },
];

/// Modules activated by the selection, in declaration order.
pub fn activated_modules(selected: &BTreeSet<ServiceId>) -> Vec<&'static Module> {
    MODULES.iter().filter(|module| module.is_active(selected)).collect()
}
