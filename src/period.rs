//! Period windows: the inclusive date ranges covering one week, month or year.
//!
//! Weeks run Sunday to Saturday. Navigation shifts the reference date by one
//! unit and resolves the window again, clamping the day of month where the
//! target month is shorter (e.g. Jan 31 + 1 month = Feb 28).

use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};
use time::{Date, Duration, Month, PrimitiveDateTime, Time, macros::time};

use crate::Error;

/// The granularity of a recurring period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PeriodKind {
    /// Sunday to Saturday.
    Weekly,
    /// First to last day of a calendar month.
    Monthly,
    /// January 1 to December 31.
    Yearly,
}

impl PeriodKind {
    /// All period kinds, shortest first.
    pub const ALL: [PeriodKind; 3] = [Self::Weekly, Self::Monthly, Self::Yearly];

    /// The lowercase name used in stored records and on the command line.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
            Self::Yearly => "yearly",
        }
    }

    /// Human readable label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Weekly => "Week",
            Self::Monthly => "Month",
            Self::Yearly => "Year",
        }
    }
}

impl Display for PeriodKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for PeriodKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "weekly" | "week" => Ok(Self::Weekly),
            "monthly" | "month" => Ok(Self::Monthly),
            "yearly" | "year" => Ok(Self::Yearly),
            _ => Err(Error::InvalidPeriod(s.to_owned())),
        }
    }
}

/// Which way to move when navigating between windows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// One unit into the past.
    Back,
    /// One unit into the future.
    Forward,
}

impl Step {
    /// Map a direction of `-1` or `1` to a step.
    ///
    /// Any other value, including zero, is `None`.
    pub fn from_direction(direction: i64) -> Option<Self> {
        match direction {
            -1 => Some(Self::Back),
            1 => Some(Self::Forward),
            _ => None,
        }
    }

    fn sign(self) -> i32 {
        match self {
            Self::Back => -1,
            Self::Forward => 1,
        }
    }
}

/// An inclusive date range for one instance of a [PeriodKind].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PeriodWindow {
    /// The first day of the window.
    pub start: Date,
    /// The last day of the window, inclusive.
    pub end: Date,
}

impl PeriodWindow {
    /// Whether `date` lies within the window. Both ends are inclusive.
    pub fn contains(&self, date: Date) -> bool {
        self.start <= date && date <= self.end
    }

    /// Every date in the window, in order.
    pub fn days(&self) -> impl Iterator<Item = Date> + use<> {
        let end = self.end;
        std::iter::successors(Some(self.start), move |day| {
            day.next_day().filter(|next| *next <= end)
        })
        .filter(move |day| *day <= end)
    }

    /// The number of days covered by the window.
    pub fn len_days(&self) -> i64 {
        (self.end - self.start).whole_days() + 1
    }

    /// Midnight at the start of the first day.
    pub fn start_of_day(&self) -> PrimitiveDateTime {
        PrimitiveDateTime::new(self.start, Time::MIDNIGHT)
    }

    /// The last millisecond of the final day.
    pub fn end_of_day(&self) -> PrimitiveDateTime {
        PrimitiveDateTime::new(self.end, time!(23:59:59.999))
    }
}

/// Resolve the window of `kind` that contains `reference`.
pub fn window_for(kind: PeriodKind, reference: Date) -> PeriodWindow {
    match kind {
        PeriodKind::Weekly => week_bounds(reference),
        PeriodKind::Monthly => month_bounds(reference.year(), reference.month()),
        PeriodKind::Yearly => year_bounds(reference.year()),
    }
}

/// Move `reference` by one unit of `kind`.
///
/// Month and year steps keep the day of month where possible and clamp it to
/// the last day of the target month otherwise. If the result would fall
/// outside the range `time` can represent, `reference` is returned unchanged.
pub fn shift_reference(kind: PeriodKind, reference: Date, step: Step) -> Date {
    match kind {
        PeriodKind::Weekly => reference
            .checked_add(Duration::weeks(step.sign().into()))
            .unwrap_or(reference),
        PeriodKind::Monthly => {
            let (year, month) = match (step, reference.month()) {
                (Step::Forward, Month::December) => (reference.year() + 1, Month::January),
                (Step::Back, Month::January) => (reference.year() - 1, Month::December),
                (Step::Forward, month) => (reference.year(), month.next()),
                (Step::Back, month) => (reference.year(), month.previous()),
            };
            clamped_date(year, month, reference.day()).unwrap_or(reference)
        }
        PeriodKind::Yearly => clamped_date(
            reference.year() + step.sign(),
            reference.month(),
            reference.day(),
        )
        .unwrap_or(reference),
    }
}

/// Resolve the window adjacent to the one containing `reference`.
pub fn step_window(kind: PeriodKind, reference: Date, step: Step) -> PeriodWindow {
    window_for(kind, shift_reference(kind, reference, step))
}

/// The current window plus its neighbours, where the neighbours hold data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PeriodNavigation {
    /// The kind of window being navigated.
    pub kind: PeriodKind,
    /// The window containing the reference date.
    pub window: PeriodWindow,
    /// The previous window, if it overlaps `bounds`.
    pub prev: Option<PeriodWindow>,
    /// The next window, if it overlaps `bounds`.
    pub next: Option<PeriodWindow>,
}

impl PeriodNavigation {
    /// Build navigation for the window of `kind` containing `reference`.
    ///
    /// `bounds` is the date range spanned by the available data. Without
    /// bounds there is nothing to navigate to, so neither link is set.
    pub fn new(kind: PeriodKind, reference: Date, bounds: Option<PeriodWindow>) -> Self {
        let window = window_for(kind, reference);
        let prev_window = step_window(kind, reference, Step::Back);
        let next_window = step_window(kind, reference, Step::Forward);

        let (prev, next) = match bounds {
            Some(bounds) => {
                let prev = (prev_window != window && prev_window.end >= bounds.start)
                    .then_some(prev_window);
                let next = (next_window != window && next_window.start <= bounds.end)
                    .then_some(next_window);
                (prev, next)
            }
            None => (None, None),
        };

        Self {
            kind,
            window,
            prev,
            next,
        }
    }
}

/// Format a window as "1 Jan 2025 - 31 Jan 2025".
pub fn window_label(window: PeriodWindow) -> String {
    let start = format_date_label(window.start);
    let end = format_date_label(window.end);

    format!("{start} - {end}")
}

fn week_bounds(reference: Date) -> PeriodWindow {
    let days_since_sunday = reference.weekday().number_days_from_sunday() as i64;
    let start = reference - Duration::days(days_since_sunday);
    let end = start + Duration::days(6);

    PeriodWindow { start, end }
}

fn month_bounds(year: i32, month: Month) -> PeriodWindow {
    let start = Date::from_calendar_date(year, month, 1).expect("invalid month start date");
    let end = Date::from_calendar_date(year, month, last_day_of_month(year, month))
        .expect("invalid month end date");

    PeriodWindow { start, end }
}

fn year_bounds(year: i32) -> PeriodWindow {
    PeriodWindow {
        start: Date::from_calendar_date(year, Month::January, 1).expect("invalid year start date"),
        end: Date::from_calendar_date(year, Month::December, 31).expect("invalid year end date"),
    }
}

fn clamped_date(year: i32, month: Month, day: u8) -> Option<Date> {
    let day = day.min(last_day_of_month(year, month));
    Date::from_calendar_date(year, month, day).ok()
}

fn last_day_of_month(year: i32, month: Month) -> u8 {
    match month {
        Month::January
        | Month::March
        | Month::May
        | Month::July
        | Month::August
        | Month::October
        | Month::December => 31,
        Month::April | Month::June | Month::September | Month::November => 30,
        Month::February => {
            if is_leap_year(year) {
                29
            } else {
                28
            }
        }
    }
}

fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || (year % 400 == 0)
}

fn format_date_label(date: Date) -> String {
    format!(
        "{} {} {}",
        date.day(),
        month_abbrev(date.month()),
        date.year()
    )
}

pub(crate) fn month_abbrev(month: Month) -> &'static str {
    match month {
        Month::January => "Jan",
        Month::February => "Feb",
        Month::March => "Mar",
        Month::April => "Apr",
        Month::May => "May",
        Month::June => "Jun",
        Month::July => "Jul",
        Month::August => "Aug",
        Month::September => "Sep",
        Month::October => "Oct",
        Month::November => "Nov",
        Month::December => "Dec",
    }
}
