#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RenderableVerdict {
    Pass,
    Fail,
    Error,
}

impl RenderableVerdict {
    pub fn label(self) -> &'static str {
        match self {
            RenderableVerdict::Pass => "PASS",
            RenderableVerdict::Fail => "FAIL",
            RenderableVerdict::Error => "ERROR",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RenderableStatus {
    Satisfied,
    Unsatisfied,
    Skipped,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderableOutcome {
    pub name: String,
    /// Priority level of a composite; `None` for leaves.
    pub level: Option<String>,
    pub status: RenderableStatus,
    pub information: Vec<String>,
    pub children: Vec<RenderableOutcome>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderableTrace {
    pub name: String,
    pub verdict: RenderableVerdict,
    pub outcome: RenderableOutcome,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RenderableCounts {
    pub satisfied: u32,
    pub unsatisfied: u32,
    pub skipped: u32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderableData {
    pub root: String,
    pub traces_evaluated: u32,
    pub counts: RenderableCounts,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderableReport {
    pub verdict: RenderableVerdict,
    pub traces: Vec<RenderableTrace>,
    pub data: RenderableData,
    pub error: Option<String>,
}
