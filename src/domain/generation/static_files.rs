//! Readme and helper scripts shipped with every bundle.

use serde::Serialize;

use crate::domain::generation::artifact::Artifact;
use crate::domain::state::ConfigValues;
use crate::domain::state::globals::DOMAIN;

pub const README_PATH: &str = "README.txt";
pub const README_TEMPLATE: &str = "README.txt.j2";

const START_SCRIPT: &str = "#!/bin/bash\ndocker compose up -d\n";
const STOP_SCRIPT: &str = "#!/bin/bash\ndocker compose down\n";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReadmeContext {
    /// Domain for the access URLs, `localhost` when unset.
    pub domain: String,
}

impl ReadmeContext {
    pub fn new(values: &ConfigValues) -> Self {
        Self { domain: values.text(DOMAIN).unwrap_or_else(|| "localhost".to_string()) }
    }
}

pub fn scripts() -> [Artifact; 2] {
    [Artifact::script("start.sh", START_SCRIPT), Artifact::script("stop.sh", STOP_SCRIPT)]
}
