//! Configuration values keyed by settings name.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// A single configuration value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConfigValue {
    Flag(bool),
    Text(String),
}

impl ConfigValue {
    pub fn text(value: impl Into<String>) -> Self {
        ConfigValue::Text(value.into())
    }

    /// Empty text counts as blank; flags never do.
    pub fn is_blank(&self) -> bool {
        matches!(self, ConfigValue::Text(text) if text.is_empty())
    }

    pub fn as_flag(&self) -> Option<bool> {
        match self {
            ConfigValue::Flag(flag) => Some(*flag),
            ConfigValue::Text(text) => match text.as_str() {
                "true" => Some(true),
                "false" => Some(false),
                _ => None,
            },
        }
    }
}

impl fmt::Display for ConfigValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigValue::Flag(flag) => write!(f, "{}", flag),
            ConfigValue::Text(text) => f.write_str(text),
        }
    }
}

impl From<&str> for ConfigValue {
    fn from(value: &str) -> Self {
        ConfigValue::Text(value.to_string())
    }
}

impl From<bool> for ConfigValue {
    fn from(value: bool) -> Self {
        ConfigValue::Flag(value)
    }
}

/// Mapping from settings key to value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ConfigValues(BTreeMap<String, ConfigValue>);

impl ConfigValues {
    pub fn get(&self, key: &str) -> Option<&ConfigValue> {
        self.0.get(key)
    }

    /// Text rendering of a value; `None` when missing or blank.
    pub fn text(&self, key: &str) -> Option<String> {
        self.0.get(key).filter(|value| !value.is_blank()).map(ToString::to_string)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Missing keys and empty text are blank.
    pub fn is_blank(&self, key: &str) -> bool {
        self.0.get(key).is_none_or(ConfigValue::is_blank)
    }

    pub fn set(&mut self, key: impl Into<String>, value: ConfigValue) -> Option<ConfigValue> {
        self.0.insert(key.into(), value)
    }

    pub fn remove(&mut self, key: &str) -> Option<ConfigValue> {
        self.0.remove(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ConfigValue)> {
        self.0.iter().map(|(key, value)| (key.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_detection() {
        let mut values = ConfigValues::default();
        assert!(values.is_blank("DOMAIN"));

        values.set("DOMAIN", ConfigValue::text(""));
        assert!(values.contains("DOMAIN"));
        assert!(values.is_blank("DOMAIN"));
        assert_eq!(values.text("DOMAIN"), None);

        values.set("DOMAIN", ConfigValue::text("example.com"));
        assert_eq!(values.text("DOMAIN").as_deref(), Some("example.com"));

        values.set("FLAG", ConfigValue::Flag(false));
        assert!(!values.is_blank("FLAG"));
    }

    #[test]
    fn flags_render_as_words() {
        assert_eq!(ConfigValue::Flag(true).to_string(), "true");
        assert_eq!(ConfigValue::text("false").as_flag(), Some(false));
        assert_eq!(ConfigValue::text("maybe").as_flag(), None);
    }

    #[test]
    fn deserializes_strings_and_booleans() {
        #[derive(Deserialize)]
        struct Doc {
            a: ConfigValue,
            b: ConfigValue,
        }

        let doc: Doc = toml::from_str("a = \"x\"\nb = true\n").unwrap();
        assert_eq!(doc.a, ConfigValue::text("x"));
        assert_eq!(doc.b, ConfigValue::Flag(true));
    }
}
