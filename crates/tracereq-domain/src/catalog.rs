//! Requirements over the event types a trace declares.
//!
//! Both builders produce plain leaf requirements: the evaluator stays unaware of what a
//! trace context is. They only need the context to implement [`EventCatalog`].

use crate::model::Requirement;
use crate::policy::values_satisfied;
use std::collections::{BTreeMap, BTreeSet};
use tracereq_types::PriorityLevel;

/// An event type a trace can contain.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EventType {
    pub name: String,
    pub fields: BTreeSet<String>,
}

impl EventType {
    pub fn new<I, S>(name: impl Into<String>, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            fields: fields.into_iter().map(Into::into).collect(),
        }
    }
}

/// A trace context able to list its event types before any event is read.
pub trait EventCatalog {
    /// `None` when the trace cannot tell up front which event types it contains.
    fn event_types(&self) -> Option<&[EventType]>;
}

/// Require event names (`values`) in the trace, folded with `level`.
///
/// Satisfied when the trace cannot list its event types.
pub fn events_requirement<C, I, S>(
    name: impl Into<String>,
    level: PriorityLevel,
    values: I,
) -> Requirement<C>
where
    C: EventCatalog + ?Sized,
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let values: BTreeSet<String> = values.into_iter().map(Into::into).collect();
    Requirement::leaf(name, move |ctx: &C| {
        let Some(types) = ctx.event_types() else {
            return true;
        };
        let present: BTreeSet<&str> = types.iter().map(|t| t.name.as_str()).collect();
        values_satisfied(level, &values, &present)
    })
}

/// Require field names (`values`) on the event types of the trace, folded with `level`.
///
/// With `event` set, only event types of that name are inspected; otherwise all of them.
/// Fields of same-named event types are merged. Every inspected event type must pass;
/// event types absent from the trace impose nothing. Satisfied when the trace cannot list
/// its event types.
pub fn event_fields_requirement<C, I, S>(
    name: impl Into<String>,
    event: Option<String>,
    level: PriorityLevel,
    values: I,
) -> Requirement<C>
where
    C: EventCatalog + ?Sized,
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let values: BTreeSet<String> = values.into_iter().map(Into::into).collect();
    Requirement::leaf(name, move |ctx: &C| {
        let Some(types) = ctx.event_types() else {
            return true;
        };

        let mut fields_by_event: BTreeMap<&str, BTreeSet<&str>> = BTreeMap::new();
        for ty in types {
            if event.as_deref().is_none_or(|wanted| wanted == ty.name) {
                fields_by_event
                    .entry(ty.name.as_str())
                    .or_default()
                    .extend(ty.fields.iter().map(String::as_str));
            }
        }

        fields_by_event
            .values()
            .all(|present| values_satisfied(level, &values, present))
    })
}
