//! The `check` use case: evaluate a requirement definition against traces and produce a report.

use anyhow::Context;
use camino::Utf8PathBuf;
use rayon::prelude::*;
use tracereq_domain::report::DomainReport;
use tracereq_settings::{Overrides, ResolvedRequirements};
use tracereq_trace::Trace;
use tracereq_types::{
    OutcomeCounts, ReportData, SCHEMA_REPORT_V1, ToolMeta, TraceResult, TracereqReport, Verdict,
    ids,
};
use time::OffsetDateTime;

/// Input for the check use case.
#[derive(Clone, Debug)]
pub struct CheckInput<'a> {
    /// Requirement definition contents (`tracereq.toml`).
    pub requirements_text: &'a str,
    /// Trace descriptor files, evaluated in this order.
    pub trace_paths: &'a [Utf8PathBuf],
    /// CLI overrides.
    pub overrides: Overrides,
}

/// Output from the check use case.
#[derive(Clone, Debug)]
pub struct CheckOutput {
    /// The generated report.
    pub report: TracereqReport,
    /// The resolved requirement graph used.
    pub resolved: ResolvedRequirements<Trace>,
}

/// Run the check use case: parse and resolve the definition, load traces, evaluate each
/// trace, produce the report.
pub fn run_check(input: CheckInput<'_>) -> anyhow::Result<CheckOutput> {
    let started_at = OffsetDateTime::now_utc();

    if input.trace_paths.is_empty() {
        anyhow::bail!("no traces to check");
    }

    let cfg = tracereq_settings::parse_requirements_toml(input.requirements_text)
        .context("parse requirements")?;
    let resolved: ResolvedRequirements<Trace> =
        tracereq_settings::resolve_requirements(cfg, input.overrides.clone())
            .context("resolve requirements")?;

    let traces = tracereq_trace::load_traces(input.trace_paths).context("load traces")?;

    let requirement = resolved.requirement.as_ref();
    let results: Vec<TraceResult> = traces
        .par_iter()
        .map(|trace| {
            let DomainReport {
                verdict, outcome, ..
            } = tracereq_domain::evaluate_detailed(requirement, trace)
                .with_context(|| format!("evaluate trace {}", trace.name))?;
            Ok::<_, anyhow::Error>(TraceResult {
                trace: trace.name.clone(),
                verdict,
                outcome,
            })
        })
        .collect::<anyhow::Result<_>>()?;

    let mut counts = OutcomeCounts::default();
    for result in &results {
        counts.add(tracereq_domain::report::count_outcomes(&result.outcome));
    }
    let verdict = Verdict::from_satisfied(results.iter().all(|r| r.verdict == Verdict::Pass));

    tracing::info!(
        root = %resolved.root,
        traces = results.len(),
        ?verdict,
        "check finished"
    );

    let report = TracereqReport {
        schema: SCHEMA_REPORT_V1.to_string(),
        tool: ToolMeta {
            name: ids::TOOL_NAME.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
        started_at,
        finished_at: OffsetDateTime::now_utc(),
        verdict,
        data: ReportData {
            root: resolved.root.clone(),
            requirements_defined: u32::try_from(resolved.defined).unwrap_or(u32::MAX),
            traces_evaluated: u32::try_from(results.len()).unwrap_or(u32::MAX),
            counts,
        },
        traces: results,
        error: None,
    };

    Ok(CheckOutput { report, resolved })
}

/// Map verdict to exit code: 0 = pass, 2 = fail, 1 = runtime error.
pub fn verdict_exit_code(verdict: Verdict) -> i32 {
    match verdict {
        Verdict::Pass => 0,
        Verdict::Fail => 2,
        Verdict::Error => 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use camino::Utf8Path;
    use tracereq_types::OutcomeStatus;

    const DEFINITION: &str = r#"
root = "cpu_usage"

[requirements.sched]
kind = "events"
level = "mandatory"
values = ["sched_switch"]

[requirements.irq]
kind = "events"
level = "all_or_nothing"
values = ["irq_handler_entry", "irq_handler_exit"]
information = ["enable both irq handler tracepoints"]

[requirements.extras]
kind = "composite"
level = "optional"
children = ["irq"]

[requirements.cpu_usage]
kind = "composite"
level = "mandatory"
children = ["sched", "irq", "extras"]
"#;

    fn write_trace(root: &Utf8Path, name: &str, contents: &str) -> Utf8PathBuf {
        let path = root.join(name);
        std::fs::write(&path, contents).expect("write trace");
        path
    }

    fn check(paths: &[Utf8PathBuf]) -> anyhow::Result<CheckOutput> {
        run_check(CheckInput {
            requirements_text: DEFINITION,
            trace_paths: paths,
            overrides: Overrides::default(),
        })
    }

    #[test]
    fn passing_and_failing_traces() {
        let tmp = tempfile::tempdir().expect("create temp dir");
        let root = Utf8Path::from_path(tmp.path()).expect("utf8 path");

        let good = write_trace(
            root,
            "good.toml",
            "[events.sched_switch]\n[events.irq_handler_entry]\n[events.irq_handler_exit]\n",
        );
        let bad = write_trace(
            root,
            "bad.json",
            r#"{"name":"half-irq","events":{"sched_switch":{},"irq_handler_entry":{}}}"#,
        );

        let output = check(&[good, bad]).expect("run_check");
        let report = output.report;

        assert_eq!(report.verdict, Verdict::Fail);
        assert_eq!(report.data.root, "cpu_usage");
        assert_eq!(report.data.requirements_defined, 4);
        assert_eq!(report.data.traces_evaluated, 2);
        assert_eq!(report.traces[0].trace, "good");
        assert_eq!(report.traces[0].verdict, Verdict::Pass);
        assert_eq!(report.traces[1].trace, "half-irq");
        assert_eq!(report.traces[1].verdict, Verdict::Fail);

        // good: cpu_usage, sched, irq, extras satisfied; irq under extras skipped.
        // half-irq: cpu_usage and irq unsatisfied, sched satisfied; extras never reached.
        assert_eq!(report.data.counts.satisfied, 5);
        assert_eq!(report.data.counts.unsatisfied, 2);
        assert_eq!(report.data.counts.skipped, 3);

        let failing = &report.traces[1].outcome;
        assert_eq!(failing.children[1].status, OutcomeStatus::Unsatisfied);
        assert_eq!(
            failing.children[1].information,
            vec!["enable both irq handler tracepoints".to_string()]
        );
        assert_eq!(failing.children[2].status, OutcomeStatus::Skipped);
    }

    #[test]
    fn undeclared_traces_pass() {
        let tmp = tempfile::tempdir().expect("create temp dir");
        let root = Utf8Path::from_path(tmp.path()).expect("utf8 path");
        let live = write_trace(root, "live.toml", "predefined_events = false\n");

        let output = check(&[live]).expect("run_check");
        assert_eq!(output.report.verdict, Verdict::Pass);
        assert_eq!(output.resolved.root, "cpu_usage");
    }

    #[test]
    fn errors_carry_context() {
        let tmp = tempfile::tempdir().expect("create temp dir");
        let root = Utf8Path::from_path(tmp.path()).expect("utf8 path");

        let err = check(&[]).unwrap_err();
        assert!(format!("{err:#}").contains("no traces to check"));

        let missing = root.join("missing.toml");
        let err = check(&[missing]).unwrap_err();
        assert!(format!("{err:#}").contains("load traces"));

        let trace = write_trace(root, "t.toml", "");
        let err = run_check(CheckInput {
            requirements_text: "[requirements.root]\nkind = \"composite\"\nlevel = \"x\"\nchildren = []\n",
            trace_paths: &[trace],
            overrides: Overrides::default(),
        })
        .unwrap_err();
        assert!(format!("{err:#}").contains("resolve requirements"));
    }

    #[test]
    fn verdict_exit_codes() {
        assert_eq!(verdict_exit_code(Verdict::Pass), 0);
        assert_eq!(verdict_exit_code(Verdict::Fail), 2);
        assert_eq!(verdict_exit_code(Verdict::Error), 1);
    }
}
