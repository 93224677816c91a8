//! Stable identifiers for schemas, priority levels and requirement kinds.
//!
//! Everything here is snake_case and appears verbatim in definition files and reports.

// Schemas
pub const SCHEMA_REQUIREMENTS_V1: &str = "tracereq.requirements.v1";

// Priority levels
pub const LEVEL_MANDATORY: &str = "mandatory";
pub const LEVEL_AT_LEAST_ONE: &str = "at_least_one";
pub const LEVEL_ALL_OR_NOTHING: &str = "all_or_nothing";
pub const LEVEL_OPTIONAL: &str = "optional";

// Requirement kinds (definition file `kind = ...`)
pub const KIND_EVENTS: &str = "events";
pub const KIND_EVENT_FIELDS: &str = "event_fields";
pub const KIND_COMPOSITE: &str = "composite";

// Defaults
pub const DEFAULT_ROOT: &str = "root";

// Tool-level
pub const TOOL_NAME: &str = "tracereq";
