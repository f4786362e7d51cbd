//! The `jellyserv.toml` profile: a saved selection and its settings.

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::domain::AppError;
use crate::domain::state::{ConfigMode, ConfigValue, PathMode, Preset, SelectionState};
use crate::ports::{SecretSource, ServiceCatalog};

pub const PROFILE_FILE: &str = "jellyserv.toml";

/// Profile written by `jellyserv init`.
pub const PROFILE_TEMPLATE: &str = r#"# jellyserv profile
# Run `jellyserv list` to see the available services.

# simple | expert (expert mode does not require DOMAIN)
mode = "simple"

# default | custom (default derives *_PATH from PROJECT_BASE_DIR)
paths = "default"

# "all", or leave unset and pick services below.
# preset = "all"

services = ["jellyfin", "sonarr", "radarr"]

# Generated secrets to replace with fresh values.
regenerate = []

[values]
DOMAIN = ""
ACME_EMAIL = ""
TZ = "Europe/Paris"
PROJECT_BASE_DIR = "/opt/homelab"
"#;

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Profile {
    #[serde(default)]
    pub mode: ConfigMode,
    #[serde(default)]
    pub paths: PathMode,
    pub preset: Option<String>,
    #[serde(default)]
    pub services: Vec<String>,
    #[serde(default)]
    pub regenerate: Vec<String>,
    #[serde(default)]
    pub values: BTreeMap<String, ConfigValue>,
}

impl Profile {
    pub fn parse(content: &str) -> Result<Self, AppError> {
        Ok(toml::from_str(content)?)
    }

    /// Apply the profile on top of `state`.
    ///
    /// Modes first, then the preset, then individual services, then values.
    /// Secrets listed under `regenerate` are replaced last.
    pub fn apply<C: ServiceCatalog, S: SecretSource>(
        &self,
        state: &mut SelectionState,
        catalog: &C,
        secrets: &mut S,
    ) -> Result<(), AppError> {
        state.set_config_mode(self.mode);
        state.set_path_mode(self.paths);

        if let Some(preset) = &self.preset {
            let preset: Preset = preset.parse()?;
            state.apply_preset(&preset, catalog, secrets);
        }
        if !self.services.is_empty() {
            let ids: Vec<&str> = self.services.iter().map(String::as_str).collect();
            state.toggle(&ids, true, catalog, secrets)?;
        }
        for (key, value) in &self.values {
            state.set_value(key, value.clone())?;
        }
        state.synchronize(catalog, secrets);

        for key in &self.regenerate {
            state.regenerate_secret(key, catalog, secrets)?;
        }
        Ok(())
    }
}
