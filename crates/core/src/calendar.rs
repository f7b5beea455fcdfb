//! Israeli business calendar.
//!
//! Working days are Sunday through Thursday; Friday and Saturday are the
//! weekend. A fixed table of holidays (Gregorian dates, shifting yearly with
//! the Hebrew calendar) removes further days. The table is data, not logic:
//! new years are covered by extending the bundled entries, and a date in a
//! year the table does not cover is a configuration error rather than being
//! silently treated as a working day.
//!
//! All arithmetic is at UTC day granularity. Counting compares calendar
//! dates, never wall-clock deltas, so results cannot drift across timezones
//! or DST boundaries.

use std::collections::BTreeSet;

use chrono::{Datelike, NaiveDate, Weekday};

use crate::types::Timestamp;

// ---------------------------------------------------------------------------
// Bundled holiday data
// ---------------------------------------------------------------------------

/// Israeli holidays (Gregorian dates), pre-enumerated per year.
///
/// Extend this table as new years are published; the calendar refuses to
/// answer for years it does not cover.
const BUNDLED_HOLIDAYS: &[&str] = &[
    // 2025
    "2025-03-14", // Purim
    "2025-04-13", // Pesach 1st day
    "2025-04-14", // Pesach 2nd day
    "2025-04-19", // Pesach 7th day
    "2025-05-01", // Yom HaZikaron
    "2025-05-02", // Yom Haatzmaut
    "2025-06-02", // Shavuot
    "2025-09-23", // Rosh Hashana 1
    "2025-09-24", // Rosh Hashana 2
    "2025-10-02", // Yom Kippur
    "2025-10-07", // Sukkot 1st day
    "2025-10-14", // Simchat Torah
    // 2026
    "2026-03-03", // Purim
    "2026-04-02", // Pesach 1st day
    "2026-04-03", // Pesach 2nd day
    "2026-04-08", // Pesach 7th day
    "2026-04-22", // Yom HaZikaron
    "2026-04-23", // Yom Haatzmaut
    "2026-05-22", // Shavuot
    "2026-09-12", // Rosh Hashana 1
    "2026-09-13", // Rosh Hashana 2
    "2026-09-21", // Yom Kippur
    "2026-09-26", // Sukkot 1st day
    "2026-10-03", // Simchat Torah
    // 2027
    "2027-03-23", // Purim
    "2027-04-22", // Pesach 1st day
    "2027-04-23", // Pesach 2nd day
    "2027-04-28", // Pesach 7th day
    "2027-05-12", // Yom HaZikaron
    "2027-05-13", // Yom Haatzmaut
    "2027-06-11", // Shavuot
    "2027-10-02", // Rosh Hashana 1
    "2027-10-03", // Rosh Hashana 2
    "2027-10-11", // Yom Kippur
    "2027-10-16", // Sukkot 1st day
    "2027-10-23", // Simchat Torah
];

// ---------------------------------------------------------------------------
// Error
// ---------------------------------------------------------------------------

/// Error type for calendar misconfiguration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CalendarError {
    /// The holiday table has no entries, so no year is covered.
    #[error("holiday table is empty")]
    EmptyHolidayTable,

    /// The date falls in a year the holiday table does not cover.
    #[error("{date} is outside holiday table coverage ({first}..={last})")]
    OutsideCoverage {
        date: NaiveDate,
        first: i32,
        last: i32,
    },
}

// ---------------------------------------------------------------------------
// HolidayTable
// ---------------------------------------------------------------------------

/// A versioned holiday data resource: the set of exception dates, plus the
/// inclusive range of years it covers.
///
/// Coverage is year-granular: listing any date in a year claims the whole
/// year, which matches how the table is maintained (full years at a time).
#[derive(Debug, Clone)]
pub struct HolidayTable {
    dates: BTreeSet<NaiveDate>,
    first_year: i32,
    last_year: i32,
}

impl HolidayTable {
    /// Build a table from arbitrary holiday dates.
    ///
    /// The covered year range is derived from the earliest and latest entry.
    /// Fails on an empty input since an empty table covers nothing.
    pub fn from_entries(
        entries: impl IntoIterator<Item = NaiveDate>,
    ) -> Result<Self, CalendarError> {
        let dates: BTreeSet<NaiveDate> = entries.into_iter().collect();
        let (first_year, last_year) = match (dates.first(), dates.last()) {
            (Some(first), Some(last)) => (first.year(), last.year()),
            _ => return Err(CalendarError::EmptyHolidayTable),
        };
        Ok(Self {
            dates,
            first_year,
            last_year,
        })
    }

    /// The table shipped with this build (currently 2025 through 2027).
    ///
    /// # Panics
    ///
    /// Panics if the bundled data is malformed, which is a build defect and
    /// should fail fast at startup.
    pub fn bundled() -> Self {
        let entries = BUNDLED_HOLIDAYS.iter().map(|s| {
            NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .unwrap_or_else(|e| panic!("Invalid bundled holiday date '{s}': {e}"))
        });
        Self::from_entries(entries).expect("bundled holiday table must not be empty")
    }

    /// Whether the date is a listed holiday.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.dates.contains(&date)
    }

    /// Ensure the date's year is covered by this table.
    pub fn check_coverage(&self, date: NaiveDate) -> Result<(), CalendarError> {
        let year = date.year();
        if year < self.first_year || year > self.last_year {
            return Err(CalendarError::OutsideCoverage {
                date,
                first: self.first_year,
                last: self.last_year,
            });
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// BusinessCalendar
// ---------------------------------------------------------------------------

/// Working-day arithmetic over a [`HolidayTable`].
#[derive(Debug, Clone)]
pub struct BusinessCalendar {
    holidays: HolidayTable,
}

impl BusinessCalendar {
    /// Calendar backed by the given holiday table.
    pub fn new(holidays: HolidayTable) -> Self {
        Self { holidays }
    }

    /// Calendar backed by the bundled holiday table.
    pub fn bundled() -> Self {
        Self::new(HolidayTable::bundled())
    }

    /// Whether `date` is a working day.
    ///
    /// Friday, Saturday, and listed holidays are not working days. Errors if
    /// the date's year is outside the holiday table coverage.
    pub fn is_working_day(&self, date: NaiveDate) -> Result<bool, CalendarError> {
        self.holidays.check_coverage(date)?;
        if matches!(date.weekday(), Weekday::Fri | Weekday::Sat) {
            return Ok(false);
        }
        Ok(!self.holidays.contains(date))
    }

    /// Count working days strictly between `from` and `to`.
    ///
    /// Both endpoint days are excluded. `from >= to` counts zero; that is
    /// defined behavior, not an error. Comparison is on UTC calendar dates.
    pub fn count_working_days_between(
        &self,
        from: Timestamp,
        to: Timestamp,
    ) -> Result<u32, CalendarError> {
        let from_day = from.date_naive();
        let to_day = to.date_naive();

        let mut count = 0;
        for day in from_day.iter_days().skip(1).take_while(|d| *d < to_day) {
            if self.is_working_day(day)? {
                count += 1;
            }
        }
        Ok(count)
    }

    /// Whether at least `threshold` working days have elapsed between `date`
    /// and `now`. The boundary is inclusive: exactly `threshold` qualifies.
    pub fn is_older_than_working_days(
        &self,
        date: Timestamp,
        now: Timestamp,
        threshold: u32,
    ) -> Result<bool, CalendarError> {
        Ok(self.count_working_days_between(date, now)? >= threshold)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
