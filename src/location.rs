//! Location-marker overlap resolution.
//!
//! A location marker is a synthetic all-day transparent event whose summary
//! carries the worldmap glyph. Creating one for a date range may collide
//! with markers already covering some of those days; this module decides,
//! per existing marker, whether to delete it or shrink it. The output is a
//! plan of mutations for the caller to apply against the external store —
//! nothing here performs I/O.

use chrono::Duration;

use crate::event::{Event, EventTime, NewEvent, Transparency, EMOJI_WORLDMAP};
use crate::event_view::EventView;
use crate::time_span::DateRange;

/// Field updates for an existing event. Values are raw stored fields:
/// all-day end dates stay exclusive (one day past the last covered day).
#[derive(Debug, Clone, PartialEq)]
pub struct EventPatch {
    pub start: Option<EventTime>,
    pub end: Option<EventTime>,
}

impl EventPatch {
    /// The patched record, built fresh; the original is untouched.
    pub fn apply(&self, event: &Event) -> Event {
        Event {
            start: self.start.unwrap_or(event.start),
            end: self.end.unwrap_or(event.end),
            ..event.clone()
        }
    }
}

/// Ordered mutations for the caller to apply.
///
/// When several existing markers overlap the new range, each is resolved
/// independently against the original range; conflicting mutations are all
/// emitted as-is, with no cross-marker conflict detection.
#[derive(Debug, Clone, Default)]
pub struct ResolutionPlan {
    pub created: Vec<NewEvent>,
    pub modified: Vec<(EventView, EventPatch)>,
    pub deleted: Vec<EventView>,
}

/// The summary for a location marker covering `label`.
pub fn location_event_summary(label: &str) -> String {
    format!("{}  {}", EMOJI_WORLDMAP, label)
}

/// Plan the creation of a location marker for `range`, resolving overlaps
/// with the existing events handed in (typically everything found in a
/// window around `range`; non-markers are ignored here).
pub fn resolve_location_event(
    range: DateRange,
    label: &str,
    existing: &[EventView],
) -> ResolutionPlan {
    let mut plan = ResolutionPlan::default();
    plan.created.push(NewEvent {
        summary: location_event_summary(label),
        start: EventTime::Date(range.start),
        end: EventTime::Date(range.end + Duration::days(1)),
        transparency: Transparency::Transparent,
    });

    for event in existing {
        if !event.is_location_event() {
            continue;
        }
        let marker = event.date_range();
        if !marker.intersects(&range) {
            continue;
        }

        if marker == range {
            plan.deleted.push(event.clone());
        } else if range.end >= marker.end {
            // The new marker reaches or passes the existing one's far
            // boundary: truncate it to end where the new one begins.
            plan.modified.push((
                event.clone(),
                EventPatch {
                    start: None,
                    end: Some(EventTime::Date(range.start)),
                },
            ));
        } else {
            // The existing marker's tail survives past the new range. This
            // collapses it to its final calendar day instead of re-anchoring
            // at the day after the new range; kept as-is for compatibility,
            // flagged for product review.
            plan.modified.push((
                event.clone(),
                EventPatch {
                    start: Some(EventTime::Date(marker.end)),
                    end: None,
                },
            ));
        }
    }

    plan
}
