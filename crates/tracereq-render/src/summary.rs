use crate::RenderableReport;

/// One line per trace plus a totals line, for terminal output.
pub fn render_summary(report: &RenderableReport) -> String {
    let mut out = String::new();
    for trace in &report.traces {
        out.push_str(&format!("{}: {}\n", trace.name, trace.verdict.label()));
    }
    let counts = report.data.counts;
    out.push_str(&format!(
        "tracereq: {} ({} traces, {} satisfied, {} unsatisfied, {} skipped)\n",
        report.verdict.label(),
        report.data.traces_evaluated,
        counts.satisfied,
        counts.unsatisfied,
        counts.skipped
    ));
    out
}
