use crate::PriorityLevel;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Stable schema identifier for tracereq reports.
pub const SCHEMA_REPORT_V1: &str = "tracereq.report.v1";

/// Overall answer to "may this analysis run on these traces?".
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    Pass,
    Fail,
    /// The run itself failed; see `TracereqReport::error`.
    Error,
}

impl Verdict {
    pub fn from_satisfied(satisfied: bool) -> Self {
        if satisfied { Verdict::Pass } else { Verdict::Fail }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum OutcomeStatus {
    Satisfied,
    Unsatisfied,
    /// Not evaluated: a sibling already decided the parent, or the parent is optional.
    Skipped,
}

impl OutcomeStatus {
    pub fn from_satisfied(satisfied: bool) -> Self {
        if satisfied {
            OutcomeStatus::Satisfied
        } else {
            OutcomeStatus::Unsatisfied
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Leaf,
    Composite,
}

/// One node of an evaluated requirement tree.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct RequirementOutcome {
    pub name: String,
    pub kind: NodeKind,

    /// Combination policy; composites only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<PriorityLevel>,

    pub status: OutcomeStatus,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub information: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<RequirementOutcome>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct OutcomeCounts {
    pub satisfied: u32,
    pub unsatisfied: u32,
    pub skipped: u32,
}

impl OutcomeCounts {
    pub fn add(&mut self, other: OutcomeCounts) {
        self.satisfied += other.satisfied;
        self.unsatisfied += other.unsatisfied;
        self.skipped += other.skipped;
    }
}

/// Verdict for a single trace.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct TraceResult {
    pub trace: String,
    pub verdict: Verdict,
    pub outcome: RequirementOutcome,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ReportData {
    /// Name of the requirement that was evaluated.
    pub root: String,
    pub requirements_defined: u32,
    pub traces_evaluated: u32,
    pub counts: OutcomeCounts,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ToolMeta {
    pub name: String,
    pub version: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct TracereqReport {
    pub schema: String,
    pub tool: ToolMeta,
    #[schemars(with = "String")]
    #[serde(with = "time::serde::rfc3339")]
    pub started_at: OffsetDateTime,
    #[schemars(with = "String")]
    #[serde(with = "time::serde::rfc3339")]
    pub finished_at: OffsetDateTime,
    pub verdict: Verdict,
    #[serde(default)]
    pub traces: Vec<TraceResult>,
    #[serde(default)]
    pub data: ReportData,
    /// Runtime error message when `verdict` is `error`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    fn leaf(name: &str, status: OutcomeStatus) -> RequirementOutcome {
        RequirementOutcome {
            name: name.to_string(),
            kind: NodeKind::Leaf,
            level: None,
            status,
            information: Vec::new(),
            children: Vec::new(),
        }
    }

    #[test]
    fn report_serializes_with_rfc3339_timestamps_and_lowercase_enums() {
        let report = TracereqReport {
            schema: SCHEMA_REPORT_V1.to_string(),
            tool: ToolMeta {
                name: "tracereq".to_string(),
                version: "0.0.0".to_string(),
            },
            started_at: datetime!(2024-01-02 03:04:05 UTC),
            finished_at: datetime!(2024-01-02 03:04:06 UTC),
            verdict: Verdict::Fail,
            traces: vec![TraceResult {
                trace: "kernel".to_string(),
                verdict: Verdict::Fail,
                outcome: RequirementOutcome {
                    name: "root".to_string(),
                    kind: NodeKind::Composite,
                    level: Some(PriorityLevel::AtLeastOne),
                    status: OutcomeStatus::Unsatisfied,
                    information: Vec::new(),
                    children: vec![leaf("a", OutcomeStatus::Unsatisfied)],
                },
            }],
            data: ReportData::default(),
            error: None,
        };

        let json = serde_json::to_value(&report).expect("serialize report");
        assert_eq!(json["started_at"], "2024-01-02T03:04:05Z");
        assert_eq!(json["verdict"], "fail");
        assert_eq!(json["traces"][0]["outcome"]["level"], "at_least_one");
        assert_eq!(json["traces"][0]["outcome"]["children"][0]["status"], "unsatisfied");
        assert!(json["traces"][0]["outcome"]["children"][0].get("children").is_none());
        assert!(json.get("error").is_none());

        let back: TracereqReport = serde_json::from_value(json).expect("deserialize report");
        assert_eq!(back, report);
    }

    #[test]
    fn counts_accumulate() {
        let mut total = OutcomeCounts::default();
        total.add(OutcomeCounts {
            satisfied: 1,
            unsatisfied: 2,
            skipped: 3,
        });
        total.add(OutcomeCounts {
            satisfied: 1,
            unsatisfied: 0,
            skipped: 0,
        });
        assert_eq!(
            total,
            OutcomeCounts {
                satisfied: 2,
                unsatisfied: 2,
                skipped: 3,
            }
        );
    }
}
