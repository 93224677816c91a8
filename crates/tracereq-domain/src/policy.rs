//! Folding child verdicts under a [`PriorityLevel`].

use std::collections::BTreeSet;
use tracereq_types::PriorityLevel;

/// Fold lazily produced child verdicts into one verdict.
///
/// Verdicts are pulled in order and only as far as needed to decide:
/// - `Mandatory` stops at the first `false` (empty: `true`)
/// - `AtLeastOne` stops at the first `true` (empty: `false`)
/// - `AllOrNothing` stops at the first verdict differing from the first one (empty: `true`)
/// - `Optional` pulls nothing and is `true`
///
/// The first error pulled is returned as-is.
pub fn combine<I, E>(level: PriorityLevel, verdicts: I) -> Result<bool, E>
where
    I: IntoIterator<Item = Result<bool, E>>,
{
    let mut verdicts = verdicts.into_iter();
    match level {
        PriorityLevel::Mandatory => {
            for verdict in verdicts {
                if !verdict? {
                    return Ok(false);
                }
            }
            Ok(true)
        }
        PriorityLevel::AtLeastOne => {
            for verdict in verdicts {
                if verdict? {
                    return Ok(true);
                }
            }
            Ok(false)
        }
        PriorityLevel::AllOrNothing => {
            let Some(first) = verdicts.next() else {
                return Ok(true);
            };
            let first = first?;
            for verdict in verdicts {
                if verdict? != first {
                    return Ok(false);
                }
            }
            Ok(true)
        }
        PriorityLevel::Optional => Ok(true),
    }
}

/// Apply `level` to a set of required values against the values a trace provides.
///
/// Used by value-based requirements (event names, event fields). Differs from [`combine`]
/// on one point: `AtLeastOne` over no values is satisfied, since nothing was asked for.
pub fn values_satisfied(
    level: PriorityLevel,
    required: &BTreeSet<String>,
    present: &BTreeSet<&str>,
) -> bool {
    let contained = |value: &String| present.contains(value.as_str());
    match level {
        PriorityLevel::Mandatory => required.iter().all(contained),
        PriorityLevel::AtLeastOne => required.is_empty() || required.iter().any(contained),
        PriorityLevel::AllOrNothing => {
            required.iter().all(contained) || !required.iter().any(contained)
        }
        PriorityLevel::Optional => true,
    }
}
