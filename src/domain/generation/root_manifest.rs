//! The root compose file that includes every fragment.

use serde::Serialize;

use crate::domain::AppError;
use crate::domain::generation::context::{NETWORKS, STACK_NAME};
use crate::domain::generation::modules::{BASELINE_INCLUDES, Module};

pub const ROOT_MANIFEST_PATH: &str = "docker-compose.yml";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum IncludePath {
    Many(Vec<String>),
    One(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IncludeEntry {
    pub path: IncludePath,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub env_file: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_directory: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Network {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub driver: Option<String>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub internal: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Networks {
    pub web: Network,
    pub db_int: Network,
    pub ai_net: Network,
}

/// Named volume with default options.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Volume {}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Volumes {
    pub traefik_data: Volume,
    pub db_data: Volume,
    pub redis_data: Volume,
}

/// Structured form of `docker-compose.yml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RootManifest {
    pub name: String,
    pub include: Vec<IncludeEntry>,
    pub networks: Networks,
    pub volumes: Volumes,
}

impl RootManifest {
    /// Baseline include first, then one entry per module in the given order.
    pub fn build(modules: &[&Module]) -> Self {
        let mut include = vec![IncludeEntry {
            path: IncludePath::Many(BASELINE_INCLUDES.iter().map(ToString::to_string).collect()),
            env_file: None,
            project_directory: None,
        }];
        include.extend(modules.iter().map(|module| IncludeEntry {
            path: IncludePath::One(module.fragment.path.to_string()),
            env_file: Some(".env".to_string()),
            project_directory: Some(".".to_string()),
        }));

        let bridge = |name: &str| Network {
            name: name.to_string(),
            driver: Some("bridge".to_string()),
            internal: false,
        };

        Self {
            name: STACK_NAME.to_string(),
            include,
            networks: Networks {
                web: bridge(NETWORKS.web),
                db_int: Network { name: NETWORKS.db.to_string(), driver: None, internal: true },
                ai_net: bridge(NETWORKS.ai),
            },
            volumes: Volumes {
                traefik_data: Volume::default(),
                db_data: Volume::default(),
                redis_data: Volume::default(),
            },
        }
    }

    pub fn to_yaml(&self) -> Result<String, AppError> {
        serde_yaml::to_string(self)
            .map_err(|err| AppError::Serialization(format!("{}: {}", ROOT_MANIFEST_PATH, err)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::generation::modules::MODULES;

    fn parse(manifest: &RootManifest) -> serde_yaml::Value {
        serde_yaml::from_str(&manifest.to_yaml().unwrap()).unwrap()
    }

    #[test]
    fn baseline_only_manifest() {
        let doc = parse(&RootManifest::build(&[]));

        assert_eq!(doc["name"].as_str(), Some("jellyserv"));
        let include = doc["include"].as_sequence().unwrap();
        assert_eq!(include.len(), 1);
        let paths: Vec<&str> =
            include[0]["path"].as_sequence().unwrap().iter().filter_map(|p| p.as_str()).collect();
        assert_eq!(paths, vec!["core/compose.yaml", "core/authentik/compose.yaml"]);
        assert!(include[0].get("env_file").is_none());
    }

    #[test]
    fn modules_are_included_in_order() {
        let modules: Vec<&Module> = vec![&MODULES[0], &MODULES[2]];
        let doc = parse(&RootManifest::build(&modules));

        let include = doc["include"].as_sequence().unwrap();
        assert_eq!(include.len(), 3);
        assert_eq!(include[1]["path"].as_str(), Some("apps/media/compose.yaml"));
        assert_eq!(include[2]["path"].as_str(), Some("apps/ai/compose.yaml"));
        assert_eq!(include[2]["env_file"].as_str(), Some(".env"));
        assert_eq!(include[2]["project_directory"].as_str(), Some("."));
    }

    #[test]
    fn shared_networks_and_volumes() {
        let doc = parse(&RootManifest::build(&[]));

        assert_eq!(doc["networks"]["web"]["name"].as_str(), Some("jellyserv_web"));
        assert_eq!(doc["networks"]["db_int"]["internal"].as_bool(), Some(true));
        assert!(doc["networks"]["db_int"].get("driver").is_none());
        assert_eq!(doc["networks"]["ai_net"]["driver"].as_str(), Some("bridge"));
        let volumes = doc["volumes"].as_mapping().unwrap();
        assert_eq!(volumes.len(), 3);
    }

    #[test]
    fn yaml_is_stable() {
        let modules: Vec<&Module> = MODULES.iter().collect();
        let first = RootManifest::build(&modules).to_yaml().unwrap();
        let second = RootManifest::build(&modules).to_yaml().unwrap();
        assert_eq!(first, second);
        assert!(first.starts_with("name: jellyserv\n"));
    }
}
