//! Half-open time intervals and inclusive calendar-day ranges.
//!
//! `TimeSpan` is the single interval representation used by the scheduler
//! and by event containment tests: `[start, end)` over instants in a
//! reference time zone. All-day events are normalized to midnight-to-midnight
//! spans in that zone before any interval arithmetic happens.

use chrono::{DateTime, Duration, LocalResult, NaiveDate, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;

use crate::error::{CalassistError, CalassistResult};

/// Resolve a local wall-clock time to an instant in `tz`. Times that fall in
/// a DST gap resolve to the earliest valid instant afterwards; ambiguous
/// times take the earlier offset.
pub fn local_at(date: NaiveDate, time: NaiveTime, tz: Tz) -> DateTime<Tz> {
    let naive = date.and_time(time);
    match tz.from_local_datetime(&naive) {
        LocalResult::Single(dt) => dt,
        LocalResult::Ambiguous(dt, _) => dt,
        LocalResult::None => tz
            .from_local_datetime(&(naive + Duration::hours(1)))
            .earliest()
            .unwrap_or_else(|| tz.from_utc_datetime(&naive)),
    }
}

/// Local midnight of `date` in `tz`.
pub fn local_midnight(date: NaiveDate, tz: Tz) -> DateTime<Tz> {
    local_at(date, NaiveTime::MIN, tz)
}

/// A half-open interval `[start, end)` of instants in a reference time zone.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeSpan {
    start: DateTime<Tz>,
    end: DateTime<Tz>,
}

impl TimeSpan {
    /// Build a span, enforcing `start < end`.
    pub fn new(start: DateTime<Tz>, end: DateTime<Tz>) -> CalassistResult<Self> {
        if start >= end {
            return Err(CalassistError::InvalidTimeSpan {
                start: start.to_rfc3339(),
                end: end.to_rfc3339(),
            });
        }
        Ok(TimeSpan { start, end })
    }

    pub fn start(&self) -> DateTime<Tz> {
        self.start
    }

    pub fn end(&self) -> DateTime<Tz> {
        self.end
    }

    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    /// Half-open membership: the start instant is in, the end instant is out.
    /// Instants from other time zones are converted before comparison.
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        let instant = instant.with_timezone(&self.start.timezone());
        self.start <= instant && instant < self.end
    }

    /// True when the two half-open spans share at least one instant.
    pub fn overlaps(&self, other: &TimeSpan) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// The shared sub-span, if any.
    pub fn intersection(&self, other: &TimeSpan) -> Option<TimeSpan> {
        let start = self.start.max(other.start);
        let end = self.end.min(other.end);
        if start < end {
            Some(TimeSpan { start, end })
        } else {
            None
        }
    }
}

/// An inclusive range of calendar days.
///
/// This is the user-visible shape of an all-day range: `2019-09-03..2019-09-05`
/// covers three days. Raw event records store the same range with an
/// exclusive end one day later.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    /// A single-day range.
    pub fn single(date: NaiveDate) -> Self {
        DateRange { start: date, end: date }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// True when the two inclusive ranges share at least one day.
    pub fn intersects(&self, other: &DateRange) -> bool {
        self.start <= other.end && other.start <= self.end
    }

    /// The calendar days touched by an instant span, inclusive on both ends.
    pub fn from_span(span: &TimeSpan) -> Self {
        DateRange {
            start: span.start().date_naive(),
            end: span.end().date_naive(),
        }
    }

    /// Widen to a full midnight-to-midnight span in the given zone,
    /// covering every day of the range.
    pub fn to_span(&self, tz: Tz) -> CalassistResult<TimeSpan> {
        let start = local_midnight(self.start, tz);
        let end = local_midnight(self.end + Duration::days(1), tz);
        TimeSpan::new(start, end)
    }
}
