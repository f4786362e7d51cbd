//! Global settings that exist independently of the selection.

use serde::Deserialize;

use crate::domain::state::{ConfigValue, ConfigValues};

pub const DOMAIN: &str = "DOMAIN";
pub const ACME_EMAIL: &str = "ACME_EMAIL";
pub const PROJECT_BASE_DIR: &str = "PROJECT_BASE_DIR";
pub const RESTART_POLICY: &str = "RESTART_POLICY";
pub const TZ: &str = "TZ";
pub const PUID: &str = "PUID";
pub const PGID: &str = "PGID";

pub const DEFAULT_BASE_DIR: &str = "/opt/homelab";

/// Base fields and their initial values, in settings file order.
pub const BASE_FIELDS: [(&str, &str); 7] = [
    (DOMAIN, ""),
    (ACME_EMAIL, ""),
    (TZ, "Europe/Paris"),
    (PUID, "1000"),
    (PGID, "1000"),
    (RESTART_POLICY, "unless-stopped"),
    (PROJECT_BASE_DIR, DEFAULT_BASE_DIR),
];

/// Path fields derived from the base directory, with their sub-directory.
pub const PATH_FIELDS: [(&str, &str); 5] = [
    ("CONFIG_PATH", "config"),
    ("DATA_PATH", "data"),
    ("DOWNLOADS_PATH", "downloads"),
    ("MEDIA_PATH", "media"),
    ("UPLOAD_PATH", "uploads"),
];

/// How the derived path fields are maintained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PathMode {
    /// Paths follow `PROJECT_BASE_DIR`.
    #[default]
    Default,
    /// Paths are left to the user.
    Custom,
}

/// How strictly generation validates the global settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfigMode {
    /// The domain is mandatory.
    #[default]
    Simple,
    Expert,
}

/// Every global key, in settings file order.
pub fn global_keys() -> impl Iterator<Item = &'static str> {
    BASE_FIELDS.iter().map(|(key, _)| *key).chain(PATH_FIELDS.iter().map(|(key, _)| *key))
}

pub fn is_global(key: &str) -> bool {
    global_keys().any(|global| global == key)
}

/// Initial configuration values with the default-mode derived paths applied.
pub fn initial_values() -> ConfigValues {
    let mut values = ConfigValues::default();
    for (key, value) in BASE_FIELDS {
        values.set(key, ConfigValue::text(value));
    }
    apply_derived_paths(&mut values);
    values
}

/// Recompute the derived path fields from `PROJECT_BASE_DIR`.
pub fn apply_derived_paths(values: &mut ConfigValues) {
    let base = values.text(PROJECT_BASE_DIR).unwrap_or_else(|| DEFAULT_BASE_DIR.to_string());
    let base = base.trim_end_matches('/');
    for (key, leaf) in PATH_FIELDS {
        values.set(key, ConfigValue::text(format!("{}/{}", base, leaf)));
    }
}
