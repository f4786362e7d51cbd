//! Deterministic generation of the bundle artifacts.

pub mod artifact;
pub mod context;
pub mod guide;
pub mod modules;
pub mod root_manifest;
pub mod settings_file;
pub mod static_files;

use std::collections::BTreeSet;

use tracing::info;

pub use artifact::{Artifact, ArtifactSet};
pub use context::{RenderContext, Route};
pub use guide::{GuideEntry, GuideModel};
pub use modules::{BASELINE, MODULES, Module, activated_modules};
pub use root_manifest::RootManifest;

use crate::domain::AppError;
use crate::domain::catalog::ServiceId;
use crate::domain::selection::DependencyResolver;
use crate::domain::state::globals::DOMAIN;
use crate::domain::state::{ConfigMode, ConfigValues, SelectionState};
use crate::ports::{ServiceCatalog, TemplateRenderer};

/// Suggested file name of the assembled bundle.
pub const BUNDLE_FILE_NAME: &str = "jellyserv-v6-setup.zip";

/// Snapshot of the state a generation pass reads.
#[derive(Debug, Clone, Copy)]
pub struct GenerationRequest<'a> {
    pub selected: &'a BTreeSet<ServiceId>,
    pub values: &'a ConfigValues,
    pub config_mode: ConfigMode,
}

impl<'a> GenerationRequest<'a> {
    pub fn from_state(state: &'a SelectionState) -> Self {
        Self { selected: state.selected(), values: state.values(), config_mode: state.config_mode() }
    }
}

/// Maps a request to its artifact set; holds no state between calls.
pub struct Generator;

impl Generator {
    pub fn generate<C: ServiceCatalog, R: TemplateRenderer>(
        request: &GenerationRequest<'_>,
        catalog: &C,
        renderer: &R,
    ) -> Result<ArtifactSet, AppError> {
        if request.config_mode == ConfigMode::Simple && request.values.is_blank(DOMAIN) {
            return Err(AppError::MissingDomain);
        }

        let effective = DependencyResolver::effective_set(request.selected, catalog);
        let context = RenderContext::build(&effective, request.values, catalog);
        let mut artifacts = ArtifactSet::default();

        for fragment in &BASELINE {
            artifacts.push(Artifact::text(
                fragment.path,
                renderer.render(fragment.template, &context)?,
            ))?;
        }

        let modules = activated_modules(request.selected);
        for module in &modules {
            let fragment = module.fragment;
            artifacts.push(Artifact::text(
                fragment.path,
                renderer.render(fragment.template, &context)?,
            ))?;
        }

        let manifest = RootManifest::build(&modules);
        artifacts.push(Artifact::text(root_manifest::ROOT_MANIFEST_PATH, manifest.to_yaml()?))?;

        artifacts.push(Artifact::text(
            settings_file::SETTINGS_PATH,
            settings_file::render(&effective, request.values, catalog),
        ))?;

        let guide = GuideModel::build(&effective, request.values, catalog);
        artifacts
            .push(Artifact::text(guide::GUIDE_PATH, renderer.render(guide::GUIDE_TEMPLATE, &guide)?))?;

        let readme = static_files::ReadmeContext::new(request.values);
        artifacts.push(Artifact::text(
            static_files::README_PATH,
            renderer.render(static_files::README_TEMPLATE, &readme)?,
        ))?;

        for script in static_files::scripts() {
            artifacts.push(script)?;
        }

        info!(
            artifacts = artifacts.len(),
            modules = ?modules.iter().map(|module| module.name).collect::<Vec<_>>(),
            "bundle artifacts generated"
        );
        Ok(artifacts)
    }
}
