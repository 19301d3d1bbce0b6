//! Availability computation.
//!
//! Scans each calendar day of a queried range, clips the configured business
//! hours to the range, and emits the gaps between busy accepted events that
//! are at least the configured meeting length.

use std::collections::BTreeMap;

use chrono::{DateTime, Duration, NaiveDate};
use chrono_tz::Tz;

use crate::config::Config;
use crate::event_view::EventView;
use crate::time_span::{local_at, local_midnight, DateRange, TimeSpan};

/// A contiguous block of free time within business hours.
#[derive(Debug, Clone, PartialEq)]
pub struct AvailabilityBlock {
    pub start: DateTime<Tz>,
    pub end: DateTime<Tz>,
}

impl AvailabilityBlock {
    pub fn duration(&self) -> Duration {
        self.end - self.start
    }
}

/// Compute per-day availability within `range`.
///
/// Every calendar date the half-open range touches gets an entry, in
/// ascending date order. Only events that are both busy and accepted block
/// time; everything else is ignored. Gaps shorter than the configured
/// meeting length are dropped.
pub fn available_blocks(
    range: &TimeSpan,
    events: &[EventView],
    config: &Config,
) -> BTreeMap<NaiveDate, Vec<AvailabilityBlock>> {
    let tz = range.start().timezone();

    // Busy spans that can block time, sorted by start. Degenerate records
    // with no valid span cannot block anything.
    let mut busy: Vec<TimeSpan> = events
        .iter()
        .filter(|e| e.is_busy() && e.is_accepted())
        .filter_map(|e| e.span().ok())
        .filter(|s| s.overlaps(range))
        .collect();
    busy.sort_by_key(|s| (s.start(), s.end()));

    let days = DateRange::from_span(range);
    let first = days.start;
    let mut last = days.end;
    // An end exactly at midnight does not touch that final date.
    if last > first && range.end() == local_midnight(last, tz) {
        last -= Duration::days(1);
    }

    let mut blocks = BTreeMap::new();
    let mut date = first;
    while date <= last {
        blocks.insert(date, day_blocks(date, range, &busy, config, tz));
        date += Duration::days(1);
    }
    blocks
}

fn day_blocks(
    date: NaiveDate,
    range: &TimeSpan,
    busy: &[TimeSpan],
    config: &Config,
    tz: Tz,
) -> Vec<AvailabilityBlock> {
    // Business window, clipped to the queried range on the first/last day.
    // A day whose clipped window is empty has no blocks.
    let business = match TimeSpan::new(
        local_at(date, config.start_of_day, tz),
        local_at(date, config.end_of_day, tz),
    ) {
        Ok(span) => span,
        Err(_) => return Vec::new(),
    };
    let window = match business.intersection(range) {
        Some(w) => w,
        None => return Vec::new(),
    };

    let mut blocks = Vec::new();
    let mut cursor = window.start();

    for span in busy {
        let (start, end) = (span.start(), span.end());
        if start >= window.end() {
            break;
        }
        if end <= window.start() {
            continue;
        }
        if start > cursor {
            push_block(&mut blocks, cursor, start.min(window.end()), config.meeting_length);
        }
        // Overlapping busy spans are absorbed by advancing with max, never
        // by moving the cursor backwards.
        cursor = cursor.max(end);
    }

    if cursor < window.end() {
        push_block(&mut blocks, cursor, window.end(), config.meeting_length);
    }

    blocks
}

fn push_block(
    blocks: &mut Vec<AvailabilityBlock>,
    start: DateTime<Tz>,
    end: DateTime<Tz>,
    min_length: Duration,
) {
    if end - start >= min_length {
        blocks.push(AvailabilityBlock { start, end });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::{Attendee, Event, EventTime, ParticipationStatus, Transparency};
    use crate::time_span::DateRange;
    use chrono::{TimeZone, Utc};
    use chrono_tz::UTC;

    fn accepted_event(date: (i32, u32, u32), start: (u32, u32), end: (u32, u32)) -> EventView {
        let (y, mo, d) = date;
        let event = Event {
            id: format!("evt-{}{}", start.0, start.1),
            summary: "busy".to_string(),
            description: None,
            location: None,
            start: EventTime::DateTime(Utc.with_ymd_and_hms(y, mo, d, start.0, start.1, 0).unwrap()),
            end: EventTime::DateTime(Utc.with_ymd_and_hms(y, mo, d, end.0, end.1, 0).unwrap()),
            transparency: Transparency::Opaque,
            visibility: None,
            guests_can_see_other_guests: None,
            recurring_event_id: None,
            recurrence: None,
            attendees: Some(vec![Attendee {
                is_self: true,
                ..Attendee::new("me@example.com", Some(ParticipationStatus::Accepted))
            }]),
            conference_url: None,
        };
        EventView::new(event, UTC)
    }

    fn day_events() -> Vec<EventView> {
        let d = (2018, 1, 1);
        vec![
            accepted_event(d, (8, 30), (10, 0)),
            accepted_event(d, (10, 30), (12, 0)),
            accepted_event(d, (13, 30), (14, 30)),
            accepted_event(d, (15, 0), (17, 0)),
            accepted_event(d, (17, 30), (18, 0)),
            accepted_event(d, (18, 30), (19, 0)),
        ]
    }

    fn single_day_range() -> TimeSpan {
        DateRange::single(NaiveDate::from_ymd_opt(2018, 1, 1).unwrap())
            .to_span(UTC)
            .unwrap()
    }

    fn block_times(blocks: &[AvailabilityBlock]) -> Vec<(u32, u32, u32, u32)> {
        use chrono::Timelike;
        blocks
            .iter()
            .map(|b| (b.start.hour(), b.start.minute(), b.end.hour(), b.end.minute()))
            .collect()
    }

    #[test]
    fn test_gaps_between_busy_events() {
        let found = available_blocks(&single_day_range(), &day_events(), &Config::default());

        let date = NaiveDate::from_ymd_opt(2018, 1, 1).unwrap();
        assert_eq!(found.keys().collect::<Vec<_>>(), vec![&date]);
        assert_eq!(
            block_times(&found[&date]),
            vec![(10, 0, 10, 30), (12, 0, 13, 30), (14, 30, 15, 0), (17, 0, 17, 30)]
        );
    }

    #[test]
    fn test_longer_meeting_length_drops_short_gaps() {
        let config = Config {
            meeting_length: Duration::minutes(60),
            ..Config::default()
        };
        let found = available_blocks(&single_day_range(), &day_events(), &config);

        let date = NaiveDate::from_ymd_opt(2018, 1, 1).unwrap();
        assert_eq!(block_times(&found[&date]), vec![(12, 0, 13, 30)]);
    }

    #[test]
    fn test_unaccepted_events_never_block_time() {
        let mut events = day_events();
        // Withdraw the self attendee's acceptance on the second event.
        let mut raw = events[1].raw().clone();
        if let Some(attendees) = raw.attendees.as_mut() {
            attendees[0].response_status = Some(ParticipationStatus::NeedsAction);
        }
        events[1] = EventView::new(raw, UTC);

        let found = available_blocks(&single_day_range(), &events, &Config::default());
        let date = NaiveDate::from_ymd_opt(2018, 1, 1).unwrap();
        assert_eq!(
            block_times(&found[&date]),
            vec![(10, 0, 13, 30), (14, 30, 15, 0), (17, 0, 17, 30)]
        );
    }

    #[test]
    fn test_transparent_events_never_block_time() {
        let mut raw = accepted_event((2018, 1, 1), (9, 0), (17, 0)).into_raw();
        raw.transparency = Transparency::Transparent;
        let events = vec![EventView::new(raw, UTC)];

        let found = available_blocks(&single_day_range(), &events, &Config::default());
        let date = NaiveDate::from_ymd_opt(2018, 1, 1).unwrap();
        assert_eq!(block_times(&found[&date]), vec![(9, 0, 18, 0)]);
    }

    #[test]
    fn test_free_day_is_one_full_window() {
        let found = available_blocks(&single_day_range(), &[], &Config::default());
        let date = NaiveDate::from_ymd_opt(2018, 1, 1).unwrap();
        assert_eq!(block_times(&found[&date]), vec![(9, 0, 18, 0)]);
    }

    #[test]
    fn test_multi_day_range_keys_every_date() {
        let range = DateRange {
            start: NaiveDate::from_ymd_opt(2018, 1, 1).unwrap(),
            end: NaiveDate::from_ymd_opt(2018, 1, 3).unwrap(),
        }
        .to_span(UTC)
        .unwrap();

        let found = available_blocks(&range, &[], &Config::default());
        let dates: Vec<NaiveDate> = found.keys().copied().collect();
        assert_eq!(
            dates,
            vec![
                NaiveDate::from_ymd_opt(2018, 1, 1).unwrap(),
                NaiveDate::from_ymd_opt(2018, 1, 2).unwrap(),
                NaiveDate::from_ymd_opt(2018, 1, 3).unwrap(),
            ]
        );
        for date in dates {
            assert_eq!(block_times(&found[&date]), vec![(9, 0, 18, 0)]);
        }
    }

    #[test]
    fn test_wider_business_hours() {
        let config = Config {
            start_of_day: chrono::NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
            end_of_day: chrono::NaiveTime::from_hms_opt(19, 0, 0).unwrap(),
            ..Config::default()
        };
        let found = available_blocks(&single_day_range(), &day_events(), &config);

        let date = NaiveDate::from_ymd_opt(2018, 1, 1).unwrap();
        assert_eq!(
            block_times(&found[&date]),
            vec![
                (8, 0, 8, 30),
                (10, 0, 10, 30),
                (12, 0, 13, 30),
                (14, 30, 15, 0),
                (17, 0, 17, 30),
                (18, 0, 18, 30),
            ]
        );
    }

    #[test]
    fn test_overlapping_busy_spans_merge_via_cursor() {
        let d = (2018, 1, 1);
        let events = vec![
            accepted_event(d, (9, 30), (11, 0)),
            accepted_event(d, (10, 0), (12, 0)),
            // Entirely inside the first two; must not reopen a gap.
            accepted_event(d, (10, 30), (11, 30)),
        ];

        let found = available_blocks(&single_day_range(), &events, &Config::default());
        let date = NaiveDate::from_ymd_opt(2018, 1, 1).unwrap();
        assert_eq!(block_times(&found[&date]), vec![(9, 0, 9, 30), (12, 0, 18, 0)]);
    }

    #[test]
    fn test_abutting_event_leaves_no_boundary_gap() {
        let events = vec![accepted_event((2018, 1, 1), (9, 0), (18, 0))];
        let found = available_blocks(&single_day_range(), &events, &Config::default());
        let date = NaiveDate::from_ymd_opt(2018, 1, 1).unwrap();
        assert!(found[&date].is_empty());
    }

    #[test]
    fn test_range_clips_first_and_last_day() {
        // Query starts mid-morning: the first gap is clipped to 10:15.
        let range = TimeSpan::new(
            UTC.with_ymd_and_hms(2018, 1, 1, 10, 15, 0).unwrap(),
            UTC.with_ymd_and_hms(2018, 1, 1, 16, 0, 0).unwrap(),
        )
        .unwrap();

        let events = vec![accepted_event((2018, 1, 1), (12, 0), (13, 0))];
        let found = available_blocks(&range, &events, &Config::default());
        let date = NaiveDate::from_ymd_opt(2018, 1, 1).unwrap();
        assert_eq!(block_times(&found[&date]), vec![(10, 15, 12, 0), (13, 0, 16, 0)]);
    }
}
