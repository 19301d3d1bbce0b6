//! Derived event state.
//!
//! `EventView` wraps one raw [`Event`] record together with the reference
//! time zone and exposes everything the assistant derives from it: response
//! state, busy/visibility predicates, attendee filtering, interval
//! containment, and meeting-link extraction. The wrapped record is never
//! mutated; an "update" is a new record and a new view.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use chrono_tz::Tz;
use regex::Regex;

use crate::error::CalassistResult;
use crate::event::{Attendee, Event, ParticipationStatus, Transparency, Visibility, EMOJI_WORLDMAP};
use crate::event::EventTime;
use crate::source::SeriesLookup;
use crate::time_span::{local_midnight, DateRange, TimeSpan};

/// The user's relationship to an event, derived from its attendee list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseStatus {
    /// No attendees at all: an event the user holds for themselves.
    SelfOnly,
    NeedsAction,
    Accepted,
    Declined,
    Tentative,
}

/// `b - a` in whole seconds.
pub fn duration_in_seconds(a: DateTime<Utc>, b: DateTime<Utc>) -> i64 {
    (b - a).num_seconds()
}

/// A raw event record decorated with derived predicates.
#[derive(Debug, Clone)]
pub struct EventView {
    event: Event,
    tz: Tz,
}

impl EventView {
    pub fn new(event: Event, tz: Tz) -> Self {
        EventView { event, tz }
    }

    /// The wrapped record. Immutable; updates produce new records.
    pub fn raw(&self) -> &Event {
        &self.event
    }

    pub fn into_raw(self) -> Event {
        self.event
    }

    pub fn tz(&self) -> Tz {
        self.tz
    }

    /// The authoritative response state: `SelfOnly` when the attendee list
    /// is absent or empty, the self-flagged attendee's response when one
    /// exists, `None` when attendees exist but none is flagged as self.
    pub fn response_status(&self) -> Option<ResponseStatus> {
        let attendees = match &self.event.attendees {
            Some(a) if !a.is_empty() => a,
            _ => return Some(ResponseStatus::SelfOnly),
        };

        attendees.iter().find(|a| a.is_self).map(|a| {
            // An invitation with no recorded response is still awaiting one.
            match a.response_status.unwrap_or(ParticipationStatus::NeedsAction) {
                ParticipationStatus::NeedsAction => ResponseStatus::NeedsAction,
                ParticipationStatus::Accepted => ResponseStatus::Accepted,
                ParticipationStatus::Declined => ResponseStatus::Declined,
                ParticipationStatus::Tentative => ResponseStatus::Tentative,
            }
        })
    }

    pub fn is_accepted(&self) -> bool {
        self.response_status() == Some(ResponseStatus::Accepted)
    }

    pub fn is_declined(&self) -> bool {
        self.response_status() == Some(ResponseStatus::Declined)
    }

    pub fn is_tentative(&self) -> bool {
        self.response_status() == Some(ResponseStatus::Tentative)
    }

    pub fn needs_action(&self) -> bool {
        self.response_status() == Some(ResponseStatus::NeedsAction)
    }

    /// Alias for [`needs_action`](Self::needs_action).
    pub fn is_awaiting(&self) -> bool {
        self.needs_action()
    }

    /// True for events with no attendee list (or an empty one).
    pub fn is_self(&self) -> bool {
        self.response_status() == Some(ResponseStatus::SelfOnly)
    }

    /// An event with other attendees that the user has not declined.
    pub fn is_commitment(&self) -> bool {
        match &self.event.attendees {
            Some(a) if !a.is_empty() => !self.is_declined(),
            _ => false,
        }
    }

    /// Opaque events consume calendar time; transparency defaults to opaque.
    pub fn is_busy(&self) -> bool {
        self.event.transparency != Transparency::Transparent
    }

    pub fn is_all_day(&self) -> bool {
        self.event.start.is_date() || self.event.end.is_date()
    }

    pub fn is_recurring(&self) -> bool {
        self.event.recurring_event_id.is_some()
    }

    pub fn is_public(&self) -> bool {
        self.event.visibility == Some(Visibility::Public)
    }

    pub fn is_private(&self) -> bool {
        self.event.visibility == Some(Visibility::Private)
    }

    /// True only when visibility was explicitly set to public or private.
    pub fn is_explicitly_visible(&self) -> bool {
        self.is_public() || self.is_private()
    }

    /// Guests can see the attendee list unless the record says otherwise.
    pub fn has_visible_guestlist(&self) -> bool {
        self.event.guests_can_see_other_guests.unwrap_or(true)
    }

    /// Exactly the user and one other human, ignoring rooms and equipment.
    pub fn is_one_on_one(&self) -> bool {
        match self.human_attendees() {
            Some(humans) => humans.len() == 2 && humans.iter().any(|a| a.is_self),
            None => false,
        }
    }

    /// A meeting the user still plans to attend but at least one other
    /// human has declined. Meaningless when the guestlist is hidden.
    pub fn is_abandoned(&self) -> bool {
        if !self.has_visible_guestlist() {
            return false;
        }
        let attendees = match &self.event.attendees {
            Some(a) => a,
            None => return false,
        };
        let self_attendee = match attendees.iter().find(|a| a.is_self) {
            Some(a) => a,
            None => return false,
        };
        if self_attendee.response_status == Some(ParticipationStatus::Declined) {
            return false;
        }
        attendees
            .iter()
            .any(|a| !a.is_self && !a.resource && a.response_status == Some(ParticipationStatus::Declined))
    }

    /// Attendees minus rooms and equipment. `None` when the record has no
    /// attendee list at all, which is distinct from an empty result.
    pub fn human_attendees(&self) -> Option<Vec<&Attendee>> {
        self.event
            .attendees
            .as_ref()
            .map(|a| a.iter().filter(|x| !x.resource).collect())
    }

    /// Human attendees other than the user.
    pub fn other_human_attendees(&self) -> Option<Vec<&Attendee>> {
        self.event
            .attendees
            .as_ref()
            .map(|a| a.iter().filter(|x| !x.resource && !x.is_self).collect())
    }

    /// Exact-match attendee lookup by email.
    pub fn attendee(&self, email: &str) -> Option<&Attendee> {
        self.event
            .attendees
            .as_ref()
            .and_then(|a| a.iter().find(|x| x.email == email))
    }

    /// Start as an instant in the reference zone; all-day events start at
    /// local midnight.
    pub fn start_time(&self) -> DateTime<Tz> {
        match self.event.start {
            EventTime::Date(d) => local_midnight(d, self.tz),
            EventTime::DateTime(dt) => dt.with_timezone(&self.tz),
        }
    }

    /// End as an instant in the reference zone. For all-day events this is
    /// midnight of the stored (exclusive) end date.
    pub fn end_time(&self) -> DateTime<Tz> {
        match self.event.end {
            EventTime::Date(d) => local_midnight(d, self.tz),
            EventTime::DateTime(dt) => dt.with_timezone(&self.tz),
        }
    }

    pub fn start_date(&self) -> NaiveDate {
        match self.event.start {
            EventTime::Date(d) => d,
            EventTime::DateTime(dt) => dt.with_timezone(&self.tz).date_naive(),
        }
    }

    pub fn end_date(&self) -> NaiveDate {
        match self.event.end {
            EventTime::Date(d) => d,
            EventTime::DateTime(dt) => dt.with_timezone(&self.tz).date_naive(),
        }
    }

    /// The event as a half-open span in the reference zone.
    pub fn span(&self) -> CalassistResult<TimeSpan> {
        TimeSpan::new(self.start_time(), self.end_time())
    }

    /// The inclusive calendar days the event covers. All-day events store an
    /// exclusive end date, so the last covered day is one before it.
    pub fn date_range(&self) -> DateRange {
        let end = if self.is_all_day() {
            self.end_date() - Duration::days(1)
        } else {
            self.end_date()
        };
        DateRange {
            start: self.start_date(),
            end,
        }
    }

    pub fn is_future(&self, now: DateTime<Utc>) -> bool {
        if self.is_all_day() {
            let today = now.with_timezone(&self.tz).date_naive();
            self.start_date() > today
        } else {
            self.start_time() > now
        }
    }

    pub fn is_past(&self, now: DateTime<Utc>) -> bool {
        if self.is_all_day() {
            let today = now.with_timezone(&self.tz).date_naive();
            self.end_date() <= today
        } else {
            self.end_time() <= now
        }
    }

    pub fn is_current(&self, now: DateTime<Utc>) -> bool {
        !self.is_past(now) && !self.is_future(now)
    }

    /// Half-open membership: all-day events compare the instant's calendar
    /// date in the reference zone, timed events compare instants directly.
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        if self.is_all_day() {
            let date = instant.with_timezone(&self.tz).date_naive();
            self.date_range().contains(date)
        } else {
            match self.span() {
                Ok(span) => span.contains(instant),
                Err(_) => false,
            }
        }
    }

    /// Human-readable duration: `"3d"` for all-day events, `"2h 30m"` for
    /// timed events (hour part omitted when zero).
    pub fn duration(&self) -> String {
        if self.is_all_day() {
            let days = (self.end_date() - self.start_date()).num_days();
            return format!("{}d", days);
        }
        let minutes = (self.end_time() - self.start_time()).num_minutes();
        let hours = minutes / 60;
        let minutes = minutes % 60;
        if hours == 0 {
            format!("{}m", minutes)
        } else {
            format!("{}h {}m", hours, minutes)
        }
    }

    pub fn duration_in_seconds(&self) -> i64 {
        (self.end_time() - self.start_time()).num_seconds()
    }

    /// Synthetic location markers carry a worldmap glyph prefix.
    pub fn is_location_event(&self) -> bool {
        self.event.summary.starts_with(EMOJI_WORLDMAP)
    }

    /// Extracted video-call link: first match in the location text, else the
    /// description, else the record's dedicated conference field.
    pub fn av_uri(&self) -> Option<String> {
        self.event
            .location
            .as_deref()
            .and_then(find_av_link)
            .or_else(|| self.event.description.as_deref().and_then(find_av_link))
            .or_else(|| self.event.conference_url.clone())
    }

    /// RRULE lines for this event. Recurring instances resolve their parent
    /// via `lookup`; a lookup miss is an absent result, never an error.
    pub fn recurrence_rules<L>(&self, lookup: L) -> Option<String>
    where
        L: SeriesLookup,
    {
        let lines = match &self.event.recurring_event_id {
            Some(series_id) => lookup.parent(series_id)?.recurrence?,
            None => self.event.recurrence.clone()?,
        };

        let rules: Vec<String> = lines.into_iter().filter(|l| l.starts_with("RRULE")).collect();
        if rules.is_empty() {
            None
        } else {
            Some(rules.join("\n"))
        }
    }
}

fn find_av_link(text: &str) -> Option<String> {
    let re = Regex::new(r"https://[A-Za-z0-9._-]*zoom\.us/\S+").unwrap();
    re.find(text).map(|m| m.as_str().to_string())
}
