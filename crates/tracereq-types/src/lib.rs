//! Stable DTOs and IDs used across the tracereq workspace.
//!
//! This crate is intentionally boring:
//! - the priority level vocabulary shared by definitions and reports
//! - data types for the emitted report
//! - stable string IDs
//! - explain registry for priority levels and requirement kinds

#![forbid(unsafe_code)]

pub mod explain;
pub mod ids;
pub mod level;
pub mod receipt;

pub use explain::{Explanation, lookup_explanation};
pub use level::PriorityLevel;
pub use receipt::{
    NodeKind, OutcomeCounts, OutcomeStatus, ReportData, RequirementOutcome, SCHEMA_REPORT_V1,
    ToolMeta, TraceResult, TracereqReport, Verdict,
};
