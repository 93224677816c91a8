//! Explain registry for priority levels and requirement kinds.
//!
//! Maps identifiers to human-readable explanations with a definition example.

use crate::ids;

/// Explanation entry for a priority level or requirement kind.
#[derive(Debug, Clone)]
pub struct Explanation {
    /// Short description of the identifier.
    pub title: &'static str,
    /// What it means during evaluation.
    pub description: &'static str,
    /// When to reach for it.
    pub guidance: &'static str,
    /// A `tracereq.toml` fragment using it.
    pub example: &'static str,
}

/// Look up an explanation by priority level or requirement kind.
///
/// Returns `None` if the identifier is not recognized.
pub fn lookup_explanation(identifier: &str) -> Option<Explanation> {
    match identifier {
        // Levels
        ids::LEVEL_MANDATORY => Some(explain_mandatory()),
        ids::LEVEL_AT_LEAST_ONE => Some(explain_at_least_one()),
        ids::LEVEL_ALL_OR_NOTHING => Some(explain_all_or_nothing()),
        ids::LEVEL_OPTIONAL => Some(explain_optional()),

        // Kinds
        ids::KIND_EVENTS => Some(explain_events()),
        ids::KIND_EVENT_FIELDS => Some(explain_event_fields()),
        ids::KIND_COMPOSITE => Some(explain_composite()),

        _ => None,
    }
}

/// List all known priority levels.
pub fn all_levels() -> &'static [&'static str] {
    &[
        ids::LEVEL_MANDATORY,
        ids::LEVEL_AT_LEAST_ONE,
        ids::LEVEL_ALL_OR_NOTHING,
        ids::LEVEL_OPTIONAL,
    ]
}

/// List all known requirement kinds.
pub fn all_kinds() -> &'static [&'static str] {
    &[ids::KIND_EVENTS, ids::KIND_EVENT_FIELDS, ids::KIND_COMPOSITE]
}

// --- Levels ---

fn explain_mandatory() -> Explanation {
    Explanation {
        title: "Mandatory",
        description: "\
Every child (or value) must be satisfied.

A composite with no children is satisfied.",
        guidance: "\
Use for hard prerequisites: the analysis cannot produce anything meaningful
unless all of them hold.",
        example: r#"[requirements.sched]
kind = "events"
level = "mandatory"
values = ["sched_switch", "sched_wakeup"]"#,
    }
}

fn explain_at_least_one() -> Explanation {
    Explanation {
        title: "At Least One",
        description: "\
At least one child (or value) must be satisfied.

A composite with no children is NOT satisfied. An events or event_fields
requirement with no values is satisfied.",
        guidance: "\
Use when alternative implementations exist and any one of them suffices,
e.g. a tracer that emits either of two equivalent event names.",
        example: r#"[requirements.syscalls]
kind = "events"
level = "at_least_one"
values = ["syscall_entry_read", "sys_read"]"#,
    }
}

fn explain_all_or_nothing() -> Explanation {
    Explanation {
        title: "All Or Nothing",
        description: "\
Either every child (or value) is satisfied, or none is. A mix of satisfied
and unsatisfied children fails.

A composite with no children is satisfied.",
        guidance: "\
Use for optional subsystems that must be enabled completely or not at all:
a partial capability set would produce misleading results.",
        example: r#"[requirements.irq]
kind = "events"
level = "all_or_nothing"
values = ["irq_handler_entry", "irq_handler_exit"]"#,
    }
}

fn explain_optional() -> Explanation {
    Explanation {
        title: "Optional",
        description: "\
Always satisfied. Children are not evaluated.",
        guidance: "\
Use for advisory requirements that only publish information about what an
analysis can make use of, without gating whether it runs.",
        example: r#"[requirements.extras]
kind = "composite"
level = "optional"
children = ["irq", "syscalls"]
information = ["IRQ and syscall events improve the analysis when present"]"#,
    }
}

// --- Kinds ---

fn explain_events() -> Explanation {
    Explanation {
        title: "Events Requirement",
        description: "\
Checks the event names a trace declares against `values`, folded with
`level`. Traces that do not predeclare their event types always satisfy it.",
        guidance: "\
Use to gate an analysis on the presence of specific event types.",
        example: r#"[requirements.sched]
kind = "events"
level = "mandatory"
values = ["sched_switch"]"#,
    }
}

fn explain_event_fields() -> Explanation {
    Explanation {
        title: "Event Fields Requirement",
        description: "\
Checks the field names of the matching event types against `values`, folded
with `level`. With `event` set only that event type is inspected; without it
every event type is. Event types absent from the trace impose nothing.",
        guidance: "\
Use when an analysis reads specific payload fields, such as context fields
added by the tracer.",
        example: r#"[requirements.tid]
kind = "event_fields"
event = "sched_switch"
level = "mandatory"
values = ["prev_tid", "next_tid"]"#,
    }
}

fn explain_composite() -> Explanation {
    Explanation {
        title: "Composite Requirement",
        description: "\
Combines other requirements, referenced by name in `children`, under one
priority level. Children may be shared between composites. A requirement
tree may be at most 32 requirements deep, counting the root and its leaves;
deeper definitions are rejected.",
        guidance: "\
Use to express the full eligibility condition of an analysis as a tree.",
        example: r#"[requirements.root]
kind = "composite"
level = "mandatory"
children = ["sched", "tid"]"#,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_listed_identifier_has_an_explanation() {
        for id in all_levels().iter().chain(all_kinds()) {
            let exp = lookup_explanation(id).unwrap_or_else(|| panic!("missing: {id}"));
            assert!(!exp.title.is_empty());
            assert!(exp.example.contains("[requirements."));
        }
    }

    #[test]
    fn unknown_identifier_is_none() {
        assert!(lookup_explanation("sometimes").is_none());
    }
}
