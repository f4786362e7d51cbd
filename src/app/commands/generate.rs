//! Build the selection state and produce the bundle.

use std::path::PathBuf;

use tracing::info;

use crate::adapters::ZipBundle;
use crate::app::AppContext;
use crate::domain::generation::BUNDLE_FILE_NAME;
use crate::domain::state::globals::DOMAIN;
use crate::domain::{
    AppError, ArtifactSet, ConfigMode, ConfigValue, GenerationRequest, Generator, PathMode,
    Preset, Profile, SelectionState,
};
use crate::ports::{BundleSink, SecretSource, ServiceCatalog, TemplateRenderer};

/// Inputs of one generation pass. Command-line values override the profile.
#[derive(Debug, Clone, Default)]
pub struct GenerateOptions {
    pub profile: Option<Profile>,
    pub services: Vec<String>,
    pub preset: Option<Preset>,
    pub domain: Option<String>,
    pub assignments: Vec<(String, ConfigValue)>,
    pub regenerate: Vec<String>,
    pub expert: bool,
    pub custom_paths: bool,
}

/// Result of a generation pass.
#[derive(Debug)]
pub struct GenerateOutcome {
    pub selected: Vec<String>,
    pub effective: Vec<String>,
    pub artifacts: ArtifactSet,
    /// Where the bundle was delivered; `None` for a dry run.
    pub bundle: Option<PathBuf>,
}

/// Parse a `KEY=VALUE` command-line assignment.
pub fn parse_assignment(raw: &str) -> Result<(String, ConfigValue), AppError> {
    match raw.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => {
            Ok((key.trim().to_string(), ConfigValue::text(value)))
        }
        _ => Err(AppError::InvalidAssignment(raw.to_string())),
    }
}

/// Apply the profile and then the command-line options to a fresh state.
pub fn build_state<C: ServiceCatalog, S: SecretSource>(
    options: &GenerateOptions,
    catalog: &C,
    secrets: &mut S,
) -> Result<SelectionState, AppError> {
    let mut state = SelectionState::new();
    if let Some(profile) = &options.profile {
        profile.apply(&mut state, catalog, secrets)?;
    }

    if options.expert {
        state.set_config_mode(ConfigMode::Expert);
    }
    if options.custom_paths {
        state.set_path_mode(PathMode::Custom);
    }
    if let Some(preset) = &options.preset {
        state.apply_preset(preset, catalog, secrets);
    }
    if !options.services.is_empty() {
        let ids: Vec<&str> = options.services.iter().map(String::as_str).collect();
        state.toggle(&ids, true, catalog, secrets)?;
    }
    if let Some(domain) = &options.domain {
        state.set_value(DOMAIN, ConfigValue::text(domain.as_str()))?;
    }
    for (key, value) in &options.assignments {
        state.set_value(key, value.clone())?;
    }
    state.synchronize(catalog, secrets);

    for key in &options.regenerate {
        state.regenerate_secret(key, catalog, secrets)?;
    }
    Ok(state)
}

/// Generate the artifacts and, unless `sink` is `None`, pack and deliver them.
pub fn execute<C, S, R, K>(
    ctx: &mut AppContext<C, S, R>,
    options: &GenerateOptions,
    sink: Option<&mut K>,
) -> Result<GenerateOutcome, AppError>
where
    C: ServiceCatalog,
    S: SecretSource,
    R: TemplateRenderer,
    K: BundleSink,
{
    let state = {
        let (catalog, secrets) = ctx.catalog_and_secrets();
        build_state(options, catalog, secrets)?
    };

    let artifacts =
        Generator::generate(&GenerationRequest::from_state(&state), ctx.catalog(), ctx.renderer())?;

    let bundle = match sink {
        Some(sink) => {
            let bytes = ZipBundle::assemble(&artifacts)?;
            let path = sink.deliver(&bytes, BUNDLE_FILE_NAME)?;
            info!(path = %path.display(), "bundle ready");
            Some(path)
        }
        None => None,
    };

    Ok(GenerateOutcome {
        selected: state.selected().iter().map(ToString::to_string).collect(),
        effective: state.effective(ctx.catalog()).iter().map(ToString::to_string).collect(),
        artifacts,
        bundle,
    })
}
