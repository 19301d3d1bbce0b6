//! Filterable event predicates.
//!
//! A fixed table maps predicate names to their evaluators. The table backs
//! `must-be` / `must-not-be` filter validation and lets callers enumerate
//! every predicate the assistant understands; a test asserts the name list
//! and the evaluator stay in sync.

use chrono::{DateTime, Utc};

use crate::error::{CalassistError, CalassistResult};
use crate::event_view::EventView;

/// Every predicate name accepted in `must-be` / `must-not-be` filters.
pub const PREDICATE_NAMES: &[&str] = &[
    "accepted",
    "declined",
    "tentative",
    "needs_action",
    "awaiting",
    "self",
    "commitment",
    "busy",
    "all_day",
    "recurring",
    "public",
    "private",
    "explicitly_visible",
    "visible_guestlist",
    "one_on_one",
    "abandoned",
    "location_event",
    "past",
    "current",
    "future",
];

/// Evaluate a predicate by name. `None` for unknown names.
pub fn evaluate(name: &str, event: &EventView, now: DateTime<Utc>) -> Option<bool> {
    let value = match name {
        "accepted" => event.is_accepted(),
        "declined" => event.is_declined(),
        "tentative" => event.is_tentative(),
        "needs_action" => event.needs_action(),
        "awaiting" => event.is_awaiting(),
        "self" => event.is_self(),
        "commitment" => event.is_commitment(),
        "busy" => event.is_busy(),
        "all_day" => event.is_all_day(),
        "recurring" => event.is_recurring(),
        "public" => event.is_public(),
        "private" => event.is_private(),
        "explicitly_visible" => event.is_explicitly_visible(),
        "visible_guestlist" => event.has_visible_guestlist(),
        "one_on_one" => event.is_one_on_one(),
        "abandoned" => event.is_abandoned(),
        "location_event" => event.is_location_event(),
        "past" => event.is_past(now),
        "current" => event.is_current(now),
        "future" => event.is_future(now),
        _ => return None,
    };
    Some(value)
}

fn validate(name: &str) -> CalassistResult<()> {
    if PREDICATE_NAMES.contains(&name) {
        Ok(())
    } else {
        Err(CalassistError::UnknownPredicate {
            name: name.to_string(),
            valid: PREDICATE_NAMES.join(", "),
        })
    }
}

/// An event filter built from `must-be` / `must-not-be` predicate lists.
///
/// Names are validated eagerly so a bad filter fails before any events are
/// fetched or examined.
#[derive(Debug, Clone, Default)]
pub struct PredicateFilter {
    must_be: Vec<String>,
    must_not_be: Vec<String>,
}

impl PredicateFilter {
    pub fn new(must_be: &[String], must_not_be: &[String]) -> CalassistResult<Self> {
        for name in must_be.iter().chain(must_not_be) {
            validate(name)?;
        }
        Ok(PredicateFilter {
            must_be: must_be.to_vec(),
            must_not_be: must_not_be.to_vec(),
        })
    }

    pub fn is_empty(&self) -> bool {
        self.must_be.is_empty() && self.must_not_be.is_empty()
    }

    /// True when every `must-be` predicate holds and no `must-not-be`
    /// predicate does.
    pub fn matches(&self, event: &EventView, now: DateTime<Utc>) -> bool {
        let holds = |name: &String| evaluate(name, event, now).unwrap_or(false);
        self.must_be.iter().all(holds) && !self.must_not_be.iter().any(holds)
    }
}
