//! Selection state: the single owner of the selection and configuration values.

pub mod globals;
mod sync;
mod values;

use std::collections::BTreeSet;
use std::str::FromStr;

use tracing::{debug, warn};

pub use globals::{ConfigMode, PathMode};
pub use sync::{SECRET_LENGTH, SyncReport, expose_key, namespace_owner, subdomain_key, synchronize};
pub use values::{ConfigValue, ConfigValues};

use crate::domain::AppError;
use crate::domain::catalog::ServiceId;
use crate::domain::identifiers::validation::validate_settings_key;
use crate::domain::selection::DependencyResolver;
use crate::ports::{SecretSource, ServiceCatalog};

/// Bulk selection shortcut.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Preset {
    /// Every selectable catalog entry.
    All,
    /// Exactly these services plus their dependencies.
    Services(Vec<String>),
}

impl FromStr for Preset {
    type Err = AppError;

    /// `all`, or a comma-separated list of service identifiers.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("all") {
            return Ok(Preset::All);
        }
        let ids: Vec<String> = trimmed
            .split(',')
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .map(str::to_string)
            .collect();
        if ids.is_empty() {
            return Err(AppError::Validation(format!("Empty preset '{}'", s)));
        }
        Ok(Preset::Services(ids))
    }
}

/// Selection and configuration values, kept consistent with each other.
///
/// Every mutation resolves dependencies and then synchronizes the values, so the
/// selection is always closed and every effective service has its fields.
#[derive(Debug, Clone)]
pub struct SelectionState {
    selected: BTreeSet<ServiceId>,
    /// Services the user picked directly; never pruned as orphaned dependencies.
    pinned: BTreeSet<ServiceId>,
    values: ConfigValues,
    path_mode: PathMode,
    config_mode: ConfigMode,
}

impl Default for SelectionState {
    fn default() -> Self {
        Self::new()
    }
}

impl SelectionState {
    pub fn new() -> Self {
        Self {
            selected: BTreeSet::new(),
            pinned: BTreeSet::new(),
            values: globals::initial_values(),
            path_mode: PathMode::Default,
            config_mode: ConfigMode::Simple,
        }
    }

    pub fn selected(&self) -> &BTreeSet<ServiceId> {
        &self.selected
    }

    pub fn values(&self) -> &ConfigValues {
        &self.values
    }

    pub fn path_mode(&self) -> PathMode {
        self.path_mode
    }

    pub fn config_mode(&self) -> ConfigMode {
        self.config_mode
    }

    /// Selection plus always-on services and their dependencies.
    pub fn effective<C: ServiceCatalog>(&self, catalog: &C) -> BTreeSet<ServiceId> {
        DependencyResolver::effective_set(&self.selected, catalog)
    }

    /// Turn the given services on or off.
    pub fn toggle<C: ServiceCatalog, S: SecretSource>(
        &mut self,
        ids: &[&str],
        on: bool,
        catalog: &C,
        secrets: &mut S,
    ) -> Result<SyncReport, AppError> {
        let to_toggle = ids
            .iter()
            .map(|id| Self::selectable_id(id, catalog))
            .collect::<Result<BTreeSet<_>, _>>()?;

        self.selected = DependencyResolver::apply_selection_with_pins(
            &self.selected,
            &self.pinned,
            &to_toggle,
            on,
            catalog,
        );
        if on {
            self.pinned.extend(to_toggle.iter().cloned());
        } else {
            self.pinned.retain(|id| !to_toggle.contains(id));
        }
        self.pinned.retain(|id| self.selected.contains(id));

        debug!(
            services = ?ids,
            on,
            selected = self.selected.len(),
            "selection updated"
        );
        Ok(self.synchronize(catalog, secrets))
    }

    /// Turn every selectable service of a group on or off.
    pub fn toggle_group<C: ServiceCatalog, S: SecretSource>(
        &mut self,
        group: &str,
        on: bool,
        catalog: &C,
        secrets: &mut S,
    ) -> Result<SyncReport, AppError> {
        if !catalog.groups().iter().any(|candidate| candidate.id == group) {
            return Err(AppError::GroupNotFound(group.to_string()));
        }
        let members: Vec<&str> = catalog
            .list_all()
            .into_iter()
            .filter(|service| service.group == group && service.is_selectable())
            .map(|service| service.id.as_str())
            .collect();
        self.toggle(&members, on, catalog, secrets)
    }

    /// Replace the selection with a preset.
    pub fn apply_preset<C: ServiceCatalog, S: SecretSource>(
        &mut self,
        preset: &Preset,
        catalog: &C,
        secrets: &mut S,
    ) -> SyncReport {
        let picks: BTreeSet<ServiceId> = match preset {
            Preset::All => catalog
                .list_all()
                .into_iter()
                .filter(|service| service.is_selectable())
                .map(|service| service.id.clone())
                .collect(),
            Preset::Services(ids) => ids
                .iter()
                .filter_map(|id| match catalog.get(id) {
                    Some(service) => Some(service.id.clone()),
                    None => {
                        warn!(service = %id, "ignoring unknown service in preset");
                        None
                    }
                })
                .collect(),
        };

        self.selected =
            DependencyResolver::apply_selection(&BTreeSet::new(), &picks, true, catalog);
        self.pinned = picks;
        debug!(selected = self.selected.len(), "preset applied");
        self.synchronize(catalog, secrets)
    }

    /// Set a configuration value verbatim.
    pub fn set_value(&mut self, key: &str, value: ConfigValue) -> Result<(), AppError> {
        if !validate_settings_key(key) {
            return Err(AppError::InvalidAssignment(key.to_string()));
        }
        if let ConfigValue::Text(text) = &value {
            if text.contains(['\n', '\r']) {
                return Err(AppError::InvalidAssignment(format!("{}: value spans several lines", key)));
            }
        }
        self.values.set(key, value);
        if key == globals::PROJECT_BASE_DIR && self.path_mode == PathMode::Default {
            globals::apply_derived_paths(&mut self.values);
        }
        Ok(())
    }

    pub fn set_path_mode(&mut self, mode: PathMode) {
        self.path_mode = mode;
        if mode == PathMode::Default {
            globals::apply_derived_paths(&mut self.values);
        }
    }

    pub fn set_config_mode(&mut self, mode: ConfigMode) {
        self.config_mode = mode;
    }

    /// Replace a generated secret with a fresh token.
    pub fn regenerate_secret<C: ServiceCatalog, S: SecretSource>(
        &mut self,
        key: &str,
        catalog: &C,
        secrets: &mut S,
    ) -> Result<(), AppError> {
        let generated = self
            .effective(catalog)
            .iter()
            .filter_map(|id| catalog.get(id))
            .flat_map(|service| service.fields.iter())
            .any(|field| field.generator && field.key() == key);
        if !generated {
            return Err(AppError::UnknownSecret(key.to_string()));
        }
        self.values.set(key, ConfigValue::Text(secrets.generate(SECRET_LENGTH)));
        debug!(key, "secret regenerated");
        Ok(())
    }

    /// Bring the values in line with the current effective set.
    pub fn synchronize<C: ServiceCatalog, S: SecretSource>(
        &mut self,
        catalog: &C,
        secrets: &mut S,
    ) -> SyncReport {
        let effective = self.effective(catalog);
        synchronize(&mut self.values, &effective, catalog, secrets)
    }

    fn selectable_id<C: ServiceCatalog>(id: &str, catalog: &C) -> Result<ServiceId, AppError> {
        let service =
            catalog.get(id).ok_or_else(|| AppError::service_not_found(id, &catalog.names()))?;
        if !service.is_selectable() {
            return Err(AppError::ServiceNotSelectable(id.to_string()));
        }
        Ok(service.id.clone())
    }
}
