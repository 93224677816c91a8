//! Rendering utilities for CI surfaces (Markdown comments, terminal summaries).

#![forbid(unsafe_code)]

mod markdown;
mod model;
mod summary;

pub use markdown::render_markdown;
pub use model::{
    RenderableCounts, RenderableData, RenderableOutcome, RenderableReport, RenderableStatus,
    RenderableTrace, RenderableVerdict,
};
pub use summary::render_summary;
