//! Render use cases: Markdown and terminal summaries from in-memory reports.

use tracereq_render::RenderableReport;

pub fn render_markdown(report: &RenderableReport) -> String {
    tracereq_render::render_markdown(report)
}

pub fn render_summary(report: &RenderableReport) -> String {
    tracereq_render::render_summary(report)
}
