//! Provider-neutral calendar event records.
//!
//! These types represent raw events as fetched from an external calendar
//! backend. The core never mutates them in place: derived state lives in
//! [`crate::event_view::EventView`], and updates are expressed as new
//! records or as [`crate::location::EventPatch`] values applied by the
//! caller.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Glyph prefixed to the summary of synthetic location-marker events.
pub const EMOJI_WORLDMAP: &str = "\u{1F5FA}";

/// A raw calendar event record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: String,
    pub summary: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    pub start: EventTime,
    pub end: EventTime,

    /// Whether the event blocks time (opaque) or shows as free (transparent).
    #[serde(default)]
    pub transparency: Transparency,
    /// Sharing scope. `None` means the backend sent nothing at all.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visibility: Option<Visibility>,
    /// Whether guests can see the attendee list. Backends default to true.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guests_can_see_other_guests: Option<bool>,

    /// Identifier of the recurring series this instance belongs to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recurring_event_id: Option<String>,
    /// Raw RRULE/EXDATE lines for master events.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recurrence: Option<Vec<String>>,

    /// Attendee list. `None` means the backend omitted the field entirely,
    /// which is distinct from an event with an empty list.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attendees: Option<Vec<Attendee>>,
    /// Conference/video call URL supplied by the backend.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conference_url: Option<String>,
}

/// An event attendee.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attendee {
    /// Display name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Email address
    pub email: String,
    /// Participation response, if the attendee has one on record.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_status: Option<ParticipationStatus>,
    /// True when this attendee is the calendar's own account.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_self: bool,
    /// True when this attendee organized the event.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub organizer: bool,
    /// True when attendance is optional.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub optional: bool,
    /// True for rooms and equipment rather than people.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub resource: bool,
}

impl Attendee {
    /// A bare human attendee with the given email and response.
    pub fn new(email: &str, response_status: Option<ParticipationStatus>) -> Self {
        Attendee {
            name: None,
            email: email.to_string(),
            response_status,
            is_self: false,
            organizer: false,
            optional: false,
            resource: false,
        }
    }
}

/// An attendee's response to an invitation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ParticipationStatus {
    NeedsAction,
    Accepted,
    Declined,
    Tentative,
}

/// Event transparency (busy/free status).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Transparency {
    /// Event blocks time on the calendar (the backend default).
    #[default]
    Opaque,
    /// Event does not block time (shows as free).
    Transparent,
}

/// Event sharing scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    Default,
    Public,
    Private,
}

/// An event's start or end marker: a plain date for all-day events, a
/// timestamp otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum EventTime {
    Date(NaiveDate),
    DateTime(DateTime<Utc>),
}

impl EventTime {
    pub fn is_date(&self) -> bool {
        matches!(self, EventTime::Date(_))
    }
}

/// Attributes for an event to be created by the external store.
///
/// Only the fields the core ever sets on new events; everything else is
/// backend-assigned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewEvent {
    pub summary: String,
    pub start: EventTime,
    pub end: EventTime,
    pub transparency: Transparency,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_json_roundtrip() {
        let event = Event {
            id: "evt-1".to_string(),
            summary: "Standup".to_string(),
            description: None,
            location: Some("Room 4".to_string()),
            start: EventTime::Date(NaiveDate::from_ymd_opt(2019, 9, 3).unwrap()),
            end: EventTime::Date(NaiveDate::from_ymd_opt(2019, 9, 4).unwrap()),
            transparency: Transparency::Transparent,
            visibility: Some(Visibility::Private),
            guests_can_see_other_guests: None,
            recurring_event_id: None,
            recurrence: None,
            attendees: Some(vec![Attendee {
                is_self: true,
                ..Attendee::new("me@example.com", Some(ParticipationStatus::Accepted))
            }]),
            conference_url: None,
        };

        let json = serde_json::to_string(&event).unwrap();
        let parsed: Event = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, event);
    }

    #[test]
    fn test_participation_status_uses_backend_wire_names() {
        let json = serde_json::to_string(&ParticipationStatus::NeedsAction).unwrap();
        assert_eq!(json, "\"needsAction\"");

        let parsed: ParticipationStatus = serde_json::from_str("\"declined\"").unwrap();
        assert_eq!(parsed, ParticipationStatus::Declined);
    }

    #[test]
    fn test_absent_attendees_deserializes_as_none() {
        let json = r#"{
            "id": "evt-2",
            "summary": "Focus time",
            "start": {"DateTime": "2019-09-03T09:00:00Z"},
            "end": {"DateTime": "2019-09-03T10:00:00Z"}
        }"#;

        let event: Event = serde_json::from_str(json).unwrap();
        assert!(event.attendees.is_none());
        assert_eq!(event.transparency, Transparency::Opaque);
    }
}
