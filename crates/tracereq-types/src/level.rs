use crate::ids;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// How the verdicts of several children (or values) fold into one verdict.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum PriorityLevel {
    /// Every child must be satisfied.
    Mandatory,
    /// At least one child must be satisfied.
    AtLeastOne,
    /// Either every child is satisfied, or none is.
    AllOrNothing,
    /// Always satisfied; children are advisory.
    Optional,
}

impl PriorityLevel {
    pub const ALL: [PriorityLevel; 4] = [
        PriorityLevel::Mandatory,
        PriorityLevel::AtLeastOne,
        PriorityLevel::AllOrNothing,
        PriorityLevel::Optional,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            PriorityLevel::Mandatory => ids::LEVEL_MANDATORY,
            PriorityLevel::AtLeastOne => ids::LEVEL_AT_LEAST_ONE,
            PriorityLevel::AllOrNothing => ids::LEVEL_ALL_OR_NOTHING,
            PriorityLevel::Optional => ids::LEVEL_OPTIONAL,
        }
    }
}

impl fmt::Display for PriorityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
