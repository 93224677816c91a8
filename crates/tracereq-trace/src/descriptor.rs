use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use tracereq_domain::EventType;

/// Trace descriptor: what a trace declares about itself before being read.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct TraceDescriptor {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Whether the trace lists its event types up front. Defaults to `true`.
    #[serde(default = "default_true")]
    pub predefined_events: bool,

    /// Map of event type name -> declaration.
    #[serde(default)]
    pub events: BTreeMap<String, EventDecl>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct EventDecl {
    #[serde(default)]
    pub fields: BTreeSet<String>,
}

fn default_true() -> bool {
    true
}

impl Default for TraceDescriptor {
    fn default() -> Self {
        Self {
            name: None,
            predefined_events: true,
            events: BTreeMap::new(),
        }
    }
}

impl TraceDescriptor {
    /// Declared event types, or `None` when the trace does not predefine them.
    pub fn event_types(&self) -> Option<Vec<EventType>> {
        if !self.predefined_events {
            return None;
        }
        Some(
            self.events
                .iter()
                .map(|(name, decl)| EventType::new(name.as_str(), decl.fields.iter().cloned()))
                .collect(),
        )
    }
}
