//! External collaborator boundaries.
//!
//! The core computes over already-fetched records; these traits are the
//! seams where the surrounding layer plugs in a real calendar backend.
//! Failures from implementations pass through the core untouched.

use crate::error::CalassistResult;
use crate::event::{Event, NewEvent};
use crate::location::EventPatch;
use crate::time_span::TimeSpan;

/// An external calendar event store.
///
/// Only `find` is consumed by the core itself. The mutation methods exist
/// for callers applying a [`crate::location::ResolutionPlan`]; the core
/// never invokes them.
pub trait EventSource {
    /// All events intersecting `range`.
    fn find(&self, range: &TimeSpan) -> CalassistResult<Vec<Event>>;

    /// Create an event from attributes, returning the stored record.
    fn create(&self, attrs: &NewEvent) -> CalassistResult<Event>;

    /// Apply field updates to an existing record, returning the new record.
    fn update(&self, existing: &Event, patch: &EventPatch) -> CalassistResult<Event>;

    /// Delete an existing record.
    fn delete(&self, existing: &Event) -> CalassistResult<()>;
}

/// Resolves a recurring instance's parent record. A miss is an absent
/// value, never an error.
pub trait SeriesLookup {
    fn parent(&self, series_id: &str) -> Option<Event>;
}

impl<F> SeriesLookup for F
where
    F: Fn(&str) -> Option<Event>,
{
    fn parent(&self, series_id: &str) -> Option<Event> {
        self(series_id)
    }
}
