//! Calendar assistance core.
//!
//! This crate derives everything a calendar helper needs from raw event
//! records pulled out of an external store:
//! - `event` and `event_view` for records and the predicates derived from them
//! - `predicates` for name-based filtering over those predicates
//! - `scheduler` for per-day availability within business hours
//! - `location` for planning all-day location markers and resolving overlaps
//! - `assistant` for the facade tying a store, config, and time zone together

pub mod assistant;
pub mod config;
pub mod error;
pub mod event;
pub mod event_view;
pub mod location;
pub mod predicates;
pub mod scheduler;
pub mod source;
pub mod time_span;

pub use assistant::CalendarAssistant;
pub use config::Config;
pub use error::{CalassistError, CalassistResult};
pub use event::{
    Attendee, Event, EventTime, NewEvent, ParticipationStatus, Transparency, Visibility,
    EMOJI_WORLDMAP,
};
pub use event_view::{duration_in_seconds, EventView, ResponseStatus};
pub use location::{
    location_event_summary, resolve_location_event, EventPatch, ResolutionPlan,
};
pub use predicates::{evaluate, PredicateFilter, PREDICATE_NAMES};
pub use scheduler::{available_blocks, AvailabilityBlock};
pub use source::{EventSource, SeriesLookup};
pub use time_span::{local_at, local_midnight, DateRange, TimeSpan};
