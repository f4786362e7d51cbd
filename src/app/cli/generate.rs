//! Gen command implementation.

use std::collections::BTreeSet;
use std::path::PathBuf;

use clap::Args;
use dialoguer::MultiSelect;

use crate::adapters::ManifestCatalog;
use crate::app::api::{GenerateOptions, parse_assignment};
use crate::app::config::{discover_profile, load_profile};
use crate::domain::{AppError, Preset};
use crate::ports::ServiceCatalog;

#[derive(Args)]
pub struct GenArgs {
    /// Profile to start from (defaults to ./jellyserv.toml when present)
    #[arg(long)]
    profile: Option<PathBuf>,
    /// Service to include, with its dependencies (repeatable)
    #[arg(short = 's', long = "service")]
    services: Vec<String>,
    /// `all`, or a comma-separated list of services
    #[arg(long)]
    preset: Option<String>,
    /// Base domain for the routed services
    #[arg(long)]
    domain: Option<String>,
    /// Set a configuration value (KEY=VALUE, repeatable)
    #[arg(long = "set", value_name = "KEY=VALUE")]
    assignments: Vec<String>,
    /// Replace a generated secret with a fresh one (repeatable)
    #[arg(long, value_name = "KEY")]
    regenerate: Vec<String>,
    /// Expert mode: DOMAIN is not required
    #[arg(long)]
    expert: bool,
    /// Keep custom *_PATH values instead of deriving them from PROJECT_BASE_DIR
    #[arg(long)]
    custom_paths: bool,
    /// Load the catalog from a directory of manifests
    #[arg(long)]
    catalog: Option<PathBuf>,
    /// Directory to write the bundle into (defaults to current directory)
    #[arg(short = 'o', long)]
    output: Option<PathBuf>,
    /// Print the bundle contents without writing anything
    #[arg(long)]
    dry_run: bool,
    /// Pick services interactively when none are given
    #[arg(short = 'i', long)]
    interactive: bool,
}

pub fn run_gen(args: GenArgs) -> Result<(), AppError> {
    let catalog = crate::app::api::load_catalog(args.catalog.as_deref())?;

    let profile = match &args.profile {
        Some(path) => Some(load_profile(path)?),
        None => discover_profile(&std::env::current_dir()?)?,
    };
    let mut services = args.services;
    let nothing_chosen = services.is_empty()
        && args.preset.is_none()
        && profile.as_ref().is_none_or(|p| p.services.is_empty() && p.preset.is_none());
    if args.interactive && nothing_chosen {
        services = prompt_services(&catalog)?;
    }

    let options = GenerateOptions {
        profile,
        services,
        preset: args.preset.as_deref().map(str::parse::<Preset>).transpose()?,
        domain: args.domain,
        assignments: args
            .assignments
            .iter()
            .map(|raw| parse_assignment(raw))
            .collect::<Result<_, _>>()?,
        regenerate: args.regenerate,
        expert: args.expert,
        custom_paths: args.custom_paths,
    };

    let outcome =
        crate::app::api::generate(catalog, &options, args.output.as_deref(), args.dry_run)?;

    if args.dry_run {
        println!("Bundle contents ({} file(s)):", outcome.artifacts.len());
        for artifact in outcome.artifacts.iter() {
            let mode = if artifact.executable { " (executable)" } else { "" };
            println!("  {}{}", artifact.path, mode);
        }
    } else if let Some(path) = &outcome.bundle {
        println!("✅ Bundle written to {}", path.display());
    }
    println!("  Selected {} service(s): {}", outcome.selected.len(), outcome.selected.join(", "));
    println!("  Deployed with {} service(s) in total", outcome.effective.len());
    Ok(())
}

/// Ask for services group by group.
fn prompt_services(catalog: &ManifestCatalog) -> Result<Vec<String>, AppError> {
    let mut picked = BTreeSet::new();
    for listing in crate::app::api::list(catalog, None)? {
        let items: Vec<String> = listing
            .services
            .iter()
            .filter(|service| !service.always_on)
            .map(|service| format!("{} - {}", service.id, service.description))
            .collect();
        if items.is_empty() {
            continue;
        }
        let ids: Vec<&str> = listing
            .services
            .iter()
            .filter(|service| !service.always_on)
            .map(|service| service.id.as_str())
            .collect();

        let selection = MultiSelect::new()
            .with_prompt(format!("{} (space to toggle, enter to continue)", listing.label))
            .items(&items)
            .interact_opt()
            .map_err(|err| AppError::Validation(format!("Failed to select services: {}", err)))?;

        let Some(indices) = selection else {
            return Err(AppError::Validation("Selection cancelled".to_string()));
        };
        picked.extend(indices.into_iter().map(|index| ids[index].to_string()));
    }

    if picked.is_empty() {
        let available = catalog.names().len();
        return Err(AppError::Validation(format!(
            "No services selected ({} available, see `jellyserv list`)",
            available
        )));
    }
    Ok(picked.into_iter().collect())
}
