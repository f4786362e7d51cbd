//! jellyserv: compose a self-hosted service stack and package its Docker Compose bundle.

pub mod adapters;
pub mod app;
pub mod domain;
pub mod ports;

#[cfg(test)]
pub(crate) mod testing;

pub use app::api::{
    DoctorOptions, DoctorOutcome, GenerateOptions, GenerateOutcome, GroupListing, ServiceDetail,
    ServiceSummary, doctor, generate, init, init_at, list, list_detail, load_catalog,
};
pub use domain::{AppError, ArtifactSet, BUNDLE_FILE_NAME, Preset, Profile, SelectionState};
