use anyhow::Context;
use tracereq_render::{
    RenderableCounts, RenderableData, RenderableOutcome, RenderableReport, RenderableStatus,
    RenderableTrace, RenderableVerdict,
};
use tracereq_types::{
    OutcomeStatus, ReportData, RequirementOutcome, SCHEMA_REPORT_V1, ToolMeta, TracereqReport,
    Verdict, ids,
};
use time::OffsetDateTime;

pub fn parse_report_json(text: &str) -> anyhow::Result<TracereqReport> {
    let value: serde_json::Value = serde_json::from_str(text).context("parse report json")?;

    let schema = value
        .get("schema")
        .and_then(|v| v.as_str())
        .unwrap_or_default();
    if schema != SCHEMA_REPORT_V1 {
        anyhow::bail!("unknown report schema: {schema} (expected {SCHEMA_REPORT_V1})");
    }

    serde_json::from_value(value).context("parse tracereq report")
}

pub fn serialize_report(report: &TracereqReport) -> anyhow::Result<Vec<u8>> {
    serde_json::to_vec_pretty(report).context("serialize report")
}

/// Report for a run that could not evaluate anything.
pub fn runtime_error_report(message: &str) -> TracereqReport {
    let now = OffsetDateTime::now_utc();
    TracereqReport {
        schema: SCHEMA_REPORT_V1.to_string(),
        tool: ToolMeta {
            name: ids::TOOL_NAME.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
        started_at: now,
        finished_at: now,
        verdict: Verdict::Error,
        traces: Vec::new(),
        data: ReportData::default(),
        error: Some(message.to_string()),
    }
}

pub fn to_renderable(report: &TracereqReport) -> RenderableReport {
    RenderableReport {
        verdict: renderable_verdict(report.verdict),
        traces: report
            .traces
            .iter()
            .map(|t| RenderableTrace {
                name: t.trace.clone(),
                verdict: renderable_verdict(t.verdict),
                outcome: renderable_outcome(&t.outcome),
            })
            .collect(),
        data: RenderableData {
            root: report.data.root.clone(),
            traces_evaluated: report.data.traces_evaluated,
            counts: RenderableCounts {
                satisfied: report.data.counts.satisfied,
                unsatisfied: report.data.counts.unsatisfied,
                skipped: report.data.counts.skipped,
            },
        },
        error: report.error.clone(),
    }
}

fn renderable_verdict(verdict: Verdict) -> RenderableVerdict {
    match verdict {
        Verdict::Pass => RenderableVerdict::Pass,
        Verdict::Fail => RenderableVerdict::Fail,
        Verdict::Error => RenderableVerdict::Error,
    }
}

fn renderable_outcome(outcome: &RequirementOutcome) -> RenderableOutcome {
    RenderableOutcome {
        name: outcome.name.clone(),
        level: outcome.level.map(|l| l.as_str().to_string()),
        status: match outcome.status {
            OutcomeStatus::Satisfied => RenderableStatus::Satisfied,
            OutcomeStatus::Unsatisfied => RenderableStatus::Unsatisfied,
            OutcomeStatus::Skipped => RenderableStatus::Skipped,
        },
        information: outcome.information.clone(),
        children: outcome.children.iter().map(renderable_outcome).collect(),
    }
}
