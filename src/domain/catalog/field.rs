//! Settings field descriptors attached to catalog services.

use std::fmt;
use std::str::FromStr;

use crate::domain::state::ConfigValues;

/// Input kind of a settings field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FieldKind {
    #[default]
    Text,
    Password,
    Email,
    Select,
    Boolean,
}

impl FieldKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldKind::Text => "text",
            FieldKind::Password => "password",
            FieldKind::Email => "email",
            FieldKind::Select => "select",
            FieldKind::Boolean => "boolean",
        }
    }
}

impl FromStr for FieldKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "text" => Ok(FieldKind::Text),
            "password" => Ok(FieldKind::Password),
            "email" => Ok(FieldKind::Email),
            "select" => Ok(FieldKind::Select),
            "boolean" => Ok(FieldKind::Boolean),
            other => Err(format!("unknown field kind '{}'", other)),
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Activation condition: the field only applies while another field holds a value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldCondition {
    pub field: String,
    pub equals: String,
}

impl FieldCondition {
    /// Evaluate against the current configuration values.
    ///
    /// A missing referenced field never satisfies the condition.
    pub fn holds(&self, values: &ConfigValues) -> bool {
        values.get(&self.field).is_some_and(|value| value.to_string() == self.equals)
    }
}

/// A configurable setting declared by a catalog service.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SettingsField {
    pub name: String,
    pub description: String,
    pub kind: FieldKind,
    pub default: Option<String>,
    /// Populated with a random token when empty.
    pub generator: bool,
    /// Shared settings key this field writes to instead of its own name.
    pub link_to: Option<String>,
    pub condition: Option<FieldCondition>,
    pub required: bool,
    /// Hidden from simple listings.
    pub advanced: bool,
    pub options: Vec<String>,
}

impl SettingsField {
    /// Key of this field in the configuration map and the settings file.
    pub fn key(&self) -> &str {
        self.link_to.as_deref().unwrap_or(&self.name)
    }

    /// Whether the field applies under the given values.
    pub fn is_active(&self, values: &ConfigValues) -> bool {
        self.condition.as_ref().is_none_or(|condition| condition.holds(values))
    }
}
