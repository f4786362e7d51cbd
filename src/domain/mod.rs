pub mod catalog;
pub mod error;
pub mod generation;
pub mod identifiers;
pub mod profile;
pub mod selection;
pub mod state;

pub use catalog::{ServiceDescriptor, ServiceGroup, ServiceId, SettingsField};
pub use error::AppError;
pub use generation::{Artifact, ArtifactSet, BUNDLE_FILE_NAME, GenerationRequest, Generator};
pub use profile::Profile;
pub use selection::DependencyResolver;
pub use state::{ConfigMode, ConfigValue, ConfigValues, PathMode, Preset, SelectionState};
