use crate::{RenderableOutcome, RenderableReport, RenderableStatus};

pub fn render_markdown(report: &RenderableReport) -> String {
    let mut out = String::new();

    out.push_str("# Tracereq report\n\n");
    out.push_str(&format!(
        "- Verdict: **{}**\n- Root requirement: {}\n- Traces evaluated: {}\n",
        report.verdict.label(),
        code(&report.data.root),
        report.data.traces_evaluated,
    ));
    let counts = report.data.counts;
    out.push_str(&format!(
        "- Requirements: {} satisfied / {} unsatisfied / {} skipped\n\n",
        counts.satisfied, counts.unsatisfied, counts.skipped
    ));

    if let Some(err) = &report.error {
        push_quoted(&mut out, "", &format!("Error: {err}"));
        return out;
    }

    if report.traces.is_empty() {
        out.push_str("No traces evaluated.\n");
        return out;
    }

    out.push_str("## Traces\n");

    for trace in &report.traces {
        out.push_str(&format!(
            "\n### {}: {}\n\n",
            code(&trace.name),
            trace.verdict.label()
        ));
        push_outcome(&mut out, &trace.outcome, 0);
    }

    out
}

fn push_outcome(out: &mut String, outcome: &RenderableOutcome, depth: usize) {
    let indent = "  ".repeat(depth);
    let mark = match outcome.status {
        RenderableStatus::Satisfied => "[x]",
        RenderableStatus::Unsatisfied => "[ ]",
        RenderableStatus::Skipped => "[-]",
    };
    out.push_str(&format!("{indent}- {mark} {}", code(&outcome.name)));
    if let Some(level) = &outcome.level {
        out.push_str(&format!(" ({level})"));
    }
    if outcome.status == RenderableStatus::Skipped {
        out.push_str(" _skipped_");
    }
    out.push('\n');

    // Hints only matter where something is missing.
    if outcome.status == RenderableStatus::Unsatisfied {
        for info in &outcome.information {
            push_quoted(out, &format!("{indent}  "), info);
        }
    }

    for child in &outcome.children {
        push_outcome(out, child, depth + 1);
    }
}

/// Inline code span wide enough for any backtick run in `text`.
fn code(text: &str) -> String {
    let longest = text.split(|c: char| c != '`').map(str::len).max().unwrap_or(0);
    let fence = "`".repeat(longest + 1);
    if text.starts_with('`') || text.ends_with('`') {
        format!("{fence} {text} {fence}")
    } else {
        format!("{fence}{text}{fence}")
    }
}

/// Blockquote every line of `text`, so multi-line messages stay inside the quote.
fn push_quoted(out: &mut String, indent: &str, text: &str) {
    let mut lines = text.lines().peekable();
    if lines.peek().is_none() {
        out.push_str(&format!("{indent}>\n"));
    }
    for line in lines {
        out.push_str(&format!("{indent}> {line}\n"));
    }
}
