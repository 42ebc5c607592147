//! Runtime configuration for the command-line tool.

use std::path::PathBuf;

use time::{Date, macros::format_description};

use crate::{
    Error,
    clock::{Clock, FixedClock, LocalClock},
    snapshot::Snapshot,
};

/// The time zone used when none is configured.
pub const DEFAULT_TIMEZONE: &str = "UTC";

/// Where data lives and how "today" is determined.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// JSON array of stored transactions.
    pub transactions_path: PathBuf,
    /// JSON array of stored budget goals, if any.
    pub budgets_path: Option<PathBuf>,
    /// Canonical IANA time zone name used to determine today's date.
    pub timezone: String,
    /// A fixed date to use instead of the system clock.
    pub today: Option<Date>,
}

impl Config {
    /// The clock described by this configuration.
    ///
    /// # Errors
    ///
    /// Returns [Error::InvalidTimezone] if no fixed date is set and the time
    /// zone is unknown.
    pub fn clock(&self) -> Result<Box<dyn Clock>, Error> {
        match self.today {
            Some(today) => Ok(Box::new(FixedClock(today))),
            None => Ok(Box::new(LocalClock::new(&self.timezone)?)),
        }
    }

    /// Today's date according to [Config::clock].
    ///
    /// # Errors
    ///
    /// See [Config::clock].
    pub fn today(&self) -> Result<Date, Error> {
        let today = self.clock()?.today();
        tracing::debug!("Using {today} as today's date ({})", self.timezone);
        Ok(today)
    }

    /// Read the configured transaction and budget files.
    ///
    /// # Errors
    ///
    /// See [Snapshot::load].
    pub fn load_snapshot(&self) -> Result<Snapshot, Error> {
        Snapshot::load(&self.transactions_path, self.budgets_path.as_deref())
    }
}

/// Parse a `YYYY-MM-DD` date.
///
/// # Errors
///
/// Returns [Error::InvalidDate] if `text` is not a valid calendar date in that
/// format.
pub fn parse_date(text: &str) -> Result<Date, Error> {
    Date::parse(text.trim(), format_description!("[year]-[month]-[day]"))
        .map_err(|error| Error::InvalidDate(format!("{text}: {error}")))
}
