//! Where "today" comes from.
//!
//! Everything that depends on the current date takes it as a [Date]
//! argument. A [Clock] supplies that date: [FixedClock] pins it, [LocalClock]
//! reads the system time in a configured time zone.

use time::{Date, OffsetDateTime, UtcOffset};
use time_tz::{Offset, TimeZone, Tz, timezones};

use crate::Error;

/// A source of the current date.
pub trait Clock {
    /// The current calendar date.
    fn today(&self) -> Date;
}

/// A clock stopped at one date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub Date);

impl Clock for FixedClock {
    fn today(&self) -> Date {
        self.0
    }
}

/// The system clock read in an IANA time zone.
#[derive(Debug, Clone, Copy)]
pub struct LocalClock {
    timezone: &'static Tz,
}

impl LocalClock {
    /// Create a clock for the canonical time zone name, e.g. "Pacific/Auckland".
    ///
    /// # Errors
    ///
    /// Returns [Error::InvalidTimezone] if `canonical_timezone` is not a known
    /// time zone.
    pub fn new(canonical_timezone: &str) -> Result<Self, Error> {
        timezones::get_by_name(canonical_timezone)
            .map(|timezone| Self { timezone })
            .ok_or_else(|| Error::InvalidTimezone(canonical_timezone.to_owned()))
    }

    /// The canonical name of the clock's time zone.
    pub fn timezone_name(&self) -> &'static str {
        self.timezone.name()
    }

    /// The zone's UTC offset at `now`, which changes with daylight saving.
    pub fn offset_at(&self, now: OffsetDateTime) -> UtcOffset {
        self.timezone.get_offset_utc(&now).to_utc()
    }
}

impl Clock for LocalClock {
    fn today(&self) -> Date {
        let now = OffsetDateTime::now_utc();
        local_date(now, self.offset_at(now))
    }
}

/// The calendar date at `now` for someone at `offset`.
pub fn local_date(now: OffsetDateTime, offset: UtcOffset) -> Date {
    now.to_offset(offset).date()
}
