//! Orchestration facade.
//!
//! `CalendarAssistant` ties the pieces together for a caller holding an
//! [`EventSource`]: fetch raw records, wrap them in views, filter, and run
//! the scheduler or the location resolver. Fetching is the only store
//! access made here; resolution plans are returned for the caller to apply.

use std::collections::BTreeMap;

use chrono::{NaiveDate, Utc};
use chrono_tz::Tz;

use crate::config::Config;
use crate::error::CalassistResult;
use crate::event_view::EventView;
use crate::location::{resolve_location_event, ResolutionPlan};
use crate::scheduler::{available_blocks, AvailabilityBlock};
use crate::source::EventSource;
use crate::time_span::{DateRange, TimeSpan};

pub struct CalendarAssistant<S: EventSource> {
    source: S,
    config: Config,
    tz: Tz,
}

impl<S: EventSource> CalendarAssistant<S> {
    pub fn new(source: S, config: Config, tz: Tz) -> Self {
        CalendarAssistant { source, config, tz }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    fn fetch_views(&self, range: &TimeSpan) -> CalassistResult<Vec<EventView>> {
        let mut views: Vec<EventView> = self
            .source
            .find(range)?
            .into_iter()
            .map(|event| EventView::new(event, self.tz))
            .collect();
        views.sort_by_key(|v| v.start_time());
        Ok(views)
    }

    /// Events in `range`, wrapped, sorted by start, and narrowed by the
    /// configured `must-be` / `must-not-be` filter.
    pub fn find_events(&self, range: &TimeSpan) -> CalassistResult<Vec<EventView>> {
        let mut views = self.fetch_views(range)?;
        if !self.config.filter.is_empty() {
            let now = Utc::now();
            views.retain(|v| self.config.filter.matches(v, now));
        }
        Ok(views)
    }

    /// Location markers in `range`. Markers carry no attendees, so the
    /// configured display filter never applies to them.
    pub fn find_location_events(&self, range: &TimeSpan) -> CalassistResult<Vec<EventView>> {
        let mut views = self.fetch_views(range)?;
        views.retain(|v| v.is_location_event());
        Ok(views)
    }

    /// Events still awaiting the user's response.
    pub fn lint_events(&self, range: &TimeSpan) -> CalassistResult<Vec<EventView>> {
        let mut views = self.find_events(range)?;
        views.retain(|v| v.needs_action());
        Ok(views)
    }

    /// Per-day availability blocks within `range`.
    pub fn availability(
        &self,
        range: &TimeSpan,
    ) -> CalassistResult<BTreeMap<NaiveDate, Vec<AvailabilityBlock>>> {
        let events = self.find_events(range)?;
        Ok(available_blocks(range, &events, &self.config))
    }

    /// Plan a location marker for `range`, resolving overlaps with existing
    /// markers found in the store. The plan is returned for the caller to
    /// apply; this method only reads.
    pub fn create_location_event(
        &self,
        range: DateRange,
        label: &str,
    ) -> CalassistResult<ResolutionPlan> {
        let window = range.to_span(self.tz)?;
        let existing = self.find_location_events(&window)?;
        Ok(resolve_location_event(range, label, &existing))
    }
}
