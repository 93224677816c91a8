use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// `tracereq.toml` schema v1.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct RequirementsConfigV1 {
    /// Optional schema string for tooling (`tracereq.requirements.v1`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,

    /// Name of the requirement to evaluate. Defaults to `root`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub root: Option<String>,

    /// Map of requirement name -> definition.
    #[serde(default)]
    pub requirements: BTreeMap<String, RequirementConfig>,
}

/// One named requirement.
///
/// `level` stays a string here so resolution can report which requirement carries a bad one.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RequirementConfig {
    /// Event names the trace must declare.
    Events {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        level: Option<String>,
        values: Vec<String>,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        information: Vec<String>,
    },

    /// Field names the trace's event types must carry.
    EventFields {
        /// Restrict to event types with this name; all event types when absent.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        event: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        level: Option<String>,
        values: Vec<String>,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        information: Vec<String>,
    },

    /// Other requirements, by name, folded under `level`.
    Composite {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        level: Option<String>,
        children: Vec<String>,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        information: Vec<String>,
    },
}

impl RequirementConfig {
    pub fn level(&self) -> Option<&str> {
        match self {
            RequirementConfig::Events { level, .. }
            | RequirementConfig::EventFields { level, .. }
            | RequirementConfig::Composite { level, .. } => level.as_deref(),
        }
    }

    pub fn information(&self) -> &[String] {
        match self {
            RequirementConfig::Events { information, .. }
            | RequirementConfig::EventFields { information, .. }
            | RequirementConfig::Composite { information, .. } => information,
        }
    }

    /// Referenced requirement names; empty for leaves.
    pub fn children(&self) -> &[String] {
        match self {
            RequirementConfig::Composite { children, .. } => children,
            _ => &[],
        }
    }
}
