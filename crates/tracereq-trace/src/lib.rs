//! Trace adapters: read trace descriptors from disk and expose them to requirement evaluation.
//!
//! This crate is allowed to do filesystem IO. Everything downstream only sees [`Trace`]
//! through the [`EventCatalog`] trait.

#![forbid(unsafe_code)]

mod descriptor;

pub use descriptor::{EventDecl, TraceDescriptor};

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use rayon::prelude::*;
use tracereq_domain::{EventCatalog, EventType};

/// A loaded trace, as seen by requirements.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Trace {
    pub name: String,
    event_types: Option<Vec<EventType>>,
}

impl Trace {
    pub fn new(name: impl Into<String>, event_types: Option<Vec<EventType>>) -> Self {
        Self {
            name: name.into(),
            event_types,
        }
    }

    /// Build a trace from a parsed descriptor. `fallback_name` is used when the
    /// descriptor does not name itself.
    pub fn from_descriptor(descriptor: TraceDescriptor, fallback_name: &str) -> Self {
        let name = descriptor
            .name
            .clone()
            .unwrap_or_else(|| fallback_name.to_string());
        Self::new(name, descriptor.event_types())
    }
}

impl EventCatalog for Trace {
    fn event_types(&self) -> Option<&[EventType]> {
        self.event_types.as_deref()
    }
}

/// Descriptor file formats, chosen by extension.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DescriptorFormat {
    Toml,
    Json,
}

impl DescriptorFormat {
    /// `.json` is JSON; anything else is read as TOML.
    pub fn from_path(path: &Utf8Path) -> Self {
        match path.extension() {
            Some(ext) if ext.eq_ignore_ascii_case("json") => DescriptorFormat::Json,
            _ => DescriptorFormat::Toml,
        }
    }
}

pub fn parse_trace_toml(text: &str) -> anyhow::Result<TraceDescriptor> {
    let descriptor: TraceDescriptor = toml::from_str(text).context("parse trace descriptor")?;
    Ok(descriptor)
}

pub fn parse_trace_json(text: &str) -> anyhow::Result<TraceDescriptor> {
    let descriptor: TraceDescriptor =
        serde_json::from_str(text).context("parse trace descriptor")?;
    Ok(descriptor)
}

/// Read one trace descriptor. Unnamed traces are named after the file stem.
pub fn load_trace(path: &Utf8Path) -> anyhow::Result<Trace> {
    let text = std::fs::read_to_string(path).with_context(|| format!("read {path}"))?;
    let descriptor = match DescriptorFormat::from_path(path) {
        DescriptorFormat::Toml => parse_trace_toml(&text),
        DescriptorFormat::Json => parse_trace_json(&text),
    }
    .with_context(|| format!("load trace {path}"))?;

    let trace = Trace::from_descriptor(descriptor, path.file_stem().unwrap_or(path.as_str()));
    tracing::debug!(
        trace = %trace.name,
        path = %path,
        event_types = trace.event_types.as_ref().map(Vec::len),
        "trace loaded"
    );
    Ok(trace)
}

/// Read several trace descriptors in parallel. Order follows `paths`; any failure
/// fails the whole load.
pub fn load_traces(paths: &[Utf8PathBuf]) -> anyhow::Result<Vec<Trace>> {
    paths.par_iter().map(|p| load_trace(p.as_path())).collect()
}
